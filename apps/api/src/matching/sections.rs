//! Section Extractor — header-anchored list extraction from JD and resume text.
//!
//! Header recognition is case-insensitive prefix matching against the fixed
//! vocabularies below, never free-form NLP. A section ends at the next
//! recognized header or at a blank line; content after that boundary is never
//! appended to the current list. Nothing here is ever inferred: a missing
//! header yields an empty list, a missing name yields an empty string.

/// Headers that open the JD mandatory-skills section.
const MANDATORY_HEADERS: &[&str] = &[
    "mandatory skill set",
    "mandatory skills",
    "mandatory",
    "required skills",
    "required",
    "key responsibilities",
];

/// Headers that open the JD good-to-have section.
const GOOD_TO_HAVE_HEADERS: &[&str] = &[
    "good to have skills",
    "good to have",
    "nice to have",
    "preferred skills",
    "preferred qualifications",
    "preferred",
];

/// Headers that open a skill-bearing resume section.
const RESUME_SKILL_HEADERS: &[&str] = &[
    "technical skills",
    "core skills",
    "skills & tools",
    "skills and tools",
    "tools and platforms",
    "skills",
    "tools",
    "technologies",
    "expertise",
    "competencies",
    "stack",
    "certifications",
    "projects",
];

/// Headers that open a JD certification-requirements section.
const CERTIFICATION_HEADERS: &[&str] = &[
    "mandatory certifications",
    "required certifications",
    "certifications",
    "certification",
];

/// Prefixes that label the role line in a JD.
const ROLE_PREFIXES: &[&str] = &["job title", "job role", "designation", "position", "role"];

/// Prefixes that label the work-location line in a JD.
const LOCATION_PREFIXES: &[&str] = &["work location", "job location", "base location", "location"];

/// Prefix that labels an explicit name line in a resume.
const NAME_PREFIX: &str = "name";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum JdSection {
    Mandatory,
    GoodToHave,
}

/// The two JD skill lists, in document order, verbatim per bullet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JdSections {
    pub mandatory: Vec<String>,
    pub good_to_have: Vec<String>,
}

/// Strips a leading bullet marker and surrounding whitespace from a line.
fn strip_bullet(line: &str) -> &str {
    line.trim()
        .trim_start_matches(['-', '*', '•', '·', '◦'])
        .trim()
}

/// Returns the matched header kind and any inline remainder after a colon.
///
/// `"Required: Java, Spring"` is a header whose remainder `"Java, Spring"`
/// becomes the first list element (kept whole — commas never split JD items).
fn match_header<'a>(line: &'a str, vocabulary: &[&str]) -> Option<&'a str> {
    let stripped = strip_bullet(line);
    let lowered = stripped.to_lowercase();
    for header in vocabulary {
        if lowered.starts_with(header) {
            // The matched prefix is pure ASCII, so slicing the original
            // string by the header's byte length is safe.
            let rest = stripped[header.len()..].trim_start();
            // A header is the whole line, optionally followed by ':' and
            // inline content. "Required skills" must not match inside prose,
            // so the next character has to be a colon or end-of-line.
            if rest.is_empty() {
                return Some("");
            }
            if let Some(after_colon) = rest.strip_prefix(':') {
                return Some(after_colon.trim());
            }
        }
    }
    None
}

fn jd_header(line: &str) -> Option<(JdSection, &str)> {
    if let Some(rest) = match_header(line, GOOD_TO_HAVE_HEADERS) {
        return Some((JdSection::GoodToHave, rest));
    }
    if let Some(rest) = match_header(line, MANDATORY_HEADERS) {
        return Some((JdSection::Mandatory, rest));
    }
    None
}

/// Extracts the mandatory and good-to-have skill lists from a JD.
///
/// Bullets are consumed verbatim (bullet marker stripped, whitespace
/// trimmed); a bullet carrying several comma-separated items stays a single
/// element. No matching header means an empty list, never a guess.
pub fn extract_jd_sections(jd_text: &str) -> JdSections {
    let mut sections = JdSections::default();
    let mut current: Option<JdSection> = None;

    for line in jd_text.lines() {
        if line.trim().is_empty() {
            current = None;
            continue;
        }
        if let Some((section, inline)) = jd_header(line) {
            current = Some(section);
            if !inline.is_empty() {
                target(&mut sections, section).push(inline.to_string());
            }
            continue;
        }
        if match_header(line, CERTIFICATION_HEADERS).is_some() {
            // Recognized header of another section kind: hard boundary.
            current = None;
            continue;
        }
        if let Some(section) = current {
            let item = strip_bullet(line);
            if !item.is_empty() {
                target(&mut sections, section).push(item.to_string());
            }
        }
    }
    sections
}

fn target(sections: &mut JdSections, section: JdSection) -> &mut Vec<String> {
    match section {
        JdSection::Mandatory => &mut sections.mandatory,
        JdSection::GoodToHave => &mut sections.good_to_have,
    }
}

/// Extracts the resume skill inventory: every distinct literal phrase found
/// in skill-bearing sections, split on bullets and commas, casing preserved.
pub fn extract_resume_skills(resume_text: &str) -> Vec<String> {
    let mut skills: Vec<String> = Vec::new();
    let mut in_section = false;

    for line in resume_text.lines() {
        if line.trim().is_empty() {
            in_section = false;
            continue;
        }
        if let Some(inline) = match_header(line, RESUME_SKILL_HEADERS) {
            in_section = true;
            push_phrases(&mut skills, inline);
            continue;
        }
        if in_section {
            push_phrases(&mut skills, strip_bullet(line));
        }
    }
    skills
}

fn push_phrases(skills: &mut Vec<String>, line: &str) {
    for phrase in line.split(',') {
        let phrase = phrase.trim();
        if !phrase.is_empty() && !skills.iter().any(|existing| existing == phrase) {
            skills.push(phrase.to_string());
        }
    }
}

/// Extracts the candidate's full name, only if it literally appears: a
/// `Name:` line, one of the top lines, or a line adjacent to an email line.
/// Returns the empty string otherwise — names are never synthesized.
pub fn extract_candidate_name(resume_text: &str) -> String {
    let lines: Vec<&str> = resume_text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    for line in &lines {
        if line.to_lowercase().starts_with(NAME_PREFIX) {
            let rest = line[NAME_PREFIX.len()..].trim_start();
            if let Some(after_colon) = rest.strip_prefix(':') {
                let literal = after_colon.trim();
                if is_name_shaped(literal) {
                    return literal.to_string();
                }
            }
        }
    }

    for line in lines.iter().take(5) {
        if is_name_shaped(line) {
            return (*line).to_string();
        }
    }

    for (index, line) in lines.iter().enumerate() {
        if line.contains('@') {
            for neighbour in [index.checked_sub(1), Some(index + 1)].into_iter().flatten() {
                if let Some(candidate) = lines.get(neighbour) {
                    if is_name_shaped(candidate) {
                        return (*candidate).to_string();
                    }
                }
            }
        }
    }

    String::new()
}

/// A full-name-shaped string: 2–4 words, each starting with an uppercase
/// letter, containing only letters plus `.`, `-` and `'`, no digits.
fn is_name_shaped(text: &str) -> bool {
    if text.len() > 60 {
        return false;
    }
    let words: Vec<&str> = text.split_whitespace().collect();
    if !(2..=4).contains(&words.len()) {
        return false;
    }
    words.iter().all(|word| {
        word.chars().next().is_some_and(|c| c.is_uppercase())
            && word
                .chars()
                .all(|c| c.is_alphabetic() || matches!(c, '.' | '-' | '\''))
    })
}

/// Extracts the JD's certification requirements: the verbatim items of a
/// certification section. Empty when the JD has no such section.
pub fn extract_certifications(jd_text: &str) -> Vec<String> {
    let mut items = Vec::new();
    let mut in_section = false;

    for line in jd_text.lines() {
        if line.trim().is_empty() {
            in_section = false;
            continue;
        }
        if let Some(inline) = match_header(line, CERTIFICATION_HEADERS) {
            in_section = true;
            if !inline.is_empty() {
                items.push(inline.to_string());
            }
            continue;
        }
        if jd_header(line).is_some() {
            in_section = false;
            continue;
        }
        if in_section {
            let item = strip_bullet(line);
            if !item.is_empty() {
                items.push(item.to_string());
            }
        }
    }
    items
}

/// Extracts the literal work-location string from a JD's labelled location
/// line. `None` when the JD states no location.
pub fn extract_location(jd_text: &str) -> Option<String> {
    labelled_value(jd_text, LOCATION_PREFIXES)
}

fn labelled_value(text: &str, prefixes: &[&str]) -> Option<String> {
    for line in text.lines() {
        let stripped = strip_bullet(line);
        let lowered = stripped.to_lowercase();
        for prefix in prefixes {
            if lowered.starts_with(prefix) {
                let rest = stripped[prefix.len()..].trim_start();
                if let Some(after_colon) = rest.strip_prefix(':') {
                    let literal = after_colon.trim();
                    if !literal.is_empty() {
                        return Some(literal.to_string());
                    }
                }
            }
        }
    }
    None
}

/// Extracts the literal role string from a JD's labelled role line
/// (`Role:`, `Position:`, `Job Title:` …). Empty string when absent; a bare
/// first line is not provably a title and is never used.
pub fn extract_role(jd_text: &str) -> String {
    labelled_value(jd_text, ROLE_PREFIXES).unwrap_or_default()
}
