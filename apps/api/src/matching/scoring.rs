//! Scoring Engine — the seven mandatory-tag values and the aggregate score.
//!
//! Every tag is derived from literal text only: binary flags are 1 exactly
//! when the supporting statement is present verbatim, ratios come from the
//! exact-match subsets, and anything that cannot be established with
//! certainty scores 0. Numeric facts (years of experience) are extracted
//! with literal regular expressions — never computed from date ranges.

use std::sync::LazyLock;

use regex::Regex;

use crate::matching::exact::Haystack;
use crate::matching::normalizer::contains_word;
use crate::matching::policy::{ExperienceRule, MatchPolicy};
use crate::matching::sections::{extract_certifications, extract_location};
use crate::models::report::{FixedScore, MandatoryTags};

/// Degree and qualification keywords recognized in JD and resume text.
const DEGREE_KEYWORDS: &[&str] = &[
    "bachelor", "bachelors", "master", "masters", "b.tech", "btech", "m.tech", "mtech", "b.sc",
    "bsc", "m.sc", "msc", "bca", "mca", "mba", "ph.d", "phd", "doctorate",
];

/// Explicit relocation / remote-acceptance statements recognized in resumes.
const RELOCATION_PHRASES: &[&str] = &[
    "willing to relocate",
    "open to relocation",
    "open to relocate",
    "ready to relocate",
    "open to remote",
    "remote ok",
];

/// JD phrasings that state an employment-continuity constraint.
const GAP_CONSTRAINT_PHRASES: &[&str] = &[
    "career gap",
    "employment gap",
    "gap in employment",
    "no gaps",
    "continuous employment",
];

/// Resume phrasings that explicitly claim continuity.
const GAP_OK_PHRASES: &[&str] = &[
    "no career gap",
    "no employment gap",
    "no gaps",
    "without any gap",
    "without gaps",
    "continuous employment",
];

/// Keywords that mark a mandatory skill as a tool/platform, used only by
/// policies that do not share the tools ratio with the core ratio.
const TOOL_KEYWORDS: &[&str] = &[
    "aws", "azure", "gcp", "docker", "kubernetes", "jenkins", "git", "terraform", "airflow",
    "databricks", "snowflake", "tableau", "power bi", "jira", "linux", "spark", "kafka", "hadoop",
];

static YEARS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*\+?\s*(?:years?|yrs?)\b").expect("valid years regex")
});

static TOTAL_BEFORE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*\+?\s*(?:years?|yrs?)\b[^.;]{0,40}?experience")
        .expect("valid total-experience regex")
});

static TOTAL_AFTER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)experience[^.;0-9]{0,40}?(\d+(?:\.\d+)?)\s*\+?\s*(?:years?|yrs?)\b")
        .expect("valid experience-total regex")
});

static DURATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*\+?\s*(years?|yrs?|months?)\b")
        .expect("valid duration regex")
});

/// Requirements stated literally by the JD, as far as they can be located.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JdRequirements {
    pub min_years: Option<f64>,
    pub degrees: Vec<&'static str>,
    pub certifications: Vec<String>,
    pub location: Option<String>,
    pub gap_constraint: bool,
}

/// Locates the JD's literal requirement statements.
pub fn extract_jd_requirements(jd_text: &str) -> JdRequirements {
    let jd_haystack = Haystack::new(jd_text);
    JdRequirements {
        min_years: first_years_figure(jd_text),
        degrees: DEGREE_KEYWORDS
            .iter()
            .filter(|keyword| degree_present(jd_text, keyword))
            .copied()
            .collect(),
        certifications: extract_certifications(jd_text),
        location: extract_location(jd_text),
        gap_constraint: GAP_CONSTRAINT_PHRASES
            .iter()
            .any(|phrase| jd_haystack.contains_phrase(phrase)),
    }
}

/// The first explicit `N years` figure in the text, if any.
fn first_years_figure(text: &str) -> Option<f64> {
    YEARS_RE
        .captures(text)
        .and_then(|caps| caps[1].parse().ok())
}

/// An explicit total-experience statement: `8 years of experience` or
/// `experience of 8 years`, within the same sentence fragment.
pub fn explicit_total_years(resume_flat: &str) -> Option<f64> {
    TOTAL_BEFORE_RE
        .captures(resume_flat)
        .or_else(|| TOTAL_AFTER_RE.captures(resume_flat))
        .and_then(|caps| caps[1].parse().ok())
}

/// Sum of all clearly-stated durations (`2 years`, `18 months`) in the text.
/// Used only under `ExperienceRule::SumStatedDurations`, and only when no
/// explicit total exists. `None` when no duration is stated at all.
pub fn summed_stated_durations(resume_flat: &str) -> Option<f64> {
    let mut total = 0.0_f64;
    let mut found = false;
    for caps in DURATION_RE.captures_iter(resume_flat) {
        let Ok(amount) = caps[1].parse::<f64>() else {
            continue;
        };
        found = true;
        let unit = caps[2].to_lowercase();
        if unit.starts_with("month") {
            total += amount / 12.0;
        } else {
            total += amount;
        }
    }
    found.then_some(total)
}

/// Degree-keyword containment: the occurrence must start at a word boundary
/// ("mba" must not match inside "combat", "master" not inside "remastered"),
/// while an attached suffix is fine ("master" matches "Masters").
fn degree_present(text: &str, keyword: &str) -> bool {
    let haystack = text.to_lowercase();
    let mut start = 0;
    while let Some(pos) = haystack[start..].find(keyword) {
        let begin = start + pos;
        let left_ok = begin == 0
            || !haystack[..begin]
                .chars()
                .next_back()
                .is_some_and(|c| c.is_alphanumeric());
        if left_ok {
            return true;
        }
        start = begin + 1;
    }
    false
}

/// Everything the scoring pass needs about one (JD, resume) pair.
pub struct ScoreInputs<'a> {
    pub jd_text: &'a str,
    pub resume_flat: &'a str,
    pub resume_haystack: &'a Haystack,
    pub mandatory: &'a [String],
    pub parsed_mandatory: &'a [String],
}

/// Computes the seven mandatory tags under the given policy.
pub fn score_tags(policy: &MatchPolicy, inputs: &ScoreInputs<'_>) -> MandatoryTags {
    let requirements = extract_jd_requirements(inputs.jd_text);
    let core = FixedScore::ratio(inputs.parsed_mandatory.len(), inputs.mandatory.len());

    MandatoryTags {
        years_of_relevant_experience: experience_flag(policy, &requirements, inputs.resume_flat),
        education_qualification: education_flag(&requirements, inputs.resume_flat),
        core_technical_skills: core,
        tools_and_platforms_expertise: tools_ratio(policy, inputs, core),
        mandatory_certifications: certifications_flag(&requirements, inputs.resume_haystack),
        location_work_eligibility: location_flag(&requirements, inputs.resume_haystack),
        career_gap_stability: gap_flag(&requirements, inputs.resume_haystack),
    }
}

/// Arithmetic mean of the seven tags, scaled to 10.
pub fn aggregate_score(tags: &MandatoryTags) -> FixedScore {
    let values = tags.values();
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    FixedScore::new(mean * 10.0)
}

fn experience_flag(
    policy: &MatchPolicy,
    requirements: &JdRequirements,
    resume_flat: &str,
) -> FixedScore {
    let Some(minimum) = requirements.min_years else {
        // The JD states no minimum, so "resume total >= minimum" cannot be
        // established; absent facts score 0, never a guess.
        return FixedScore::ZERO;
    };
    let stated = match policy.experience {
        ExperienceRule::ExplicitTotalOnly => explicit_total_years(resume_flat),
        ExperienceRule::SumStatedDurations => {
            explicit_total_years(resume_flat).or_else(|| summed_stated_durations(resume_flat))
        }
    };
    FixedScore::flag(stated.is_some_and(|total| total >= minimum))
}

fn education_flag(requirements: &JdRequirements, resume_flat: &str) -> FixedScore {
    if requirements.degrees.is_empty() {
        return FixedScore::ZERO;
    }
    FixedScore::flag(
        requirements
            .degrees
            .iter()
            .all(|keyword| degree_present(resume_flat, keyword)),
    )
}

fn tools_ratio(policy: &MatchPolicy, inputs: &ScoreInputs<'_>, core: FixedScore) -> FixedScore {
    if policy.tools_share_core_ratio {
        return core;
    }
    let is_tool = |skill: &str| TOOL_KEYWORDS.iter().any(|kw| contains_word(skill, kw));
    let total = inputs.mandatory.iter().filter(|s| is_tool(s.as_str())).count();
    let matched = inputs
        .parsed_mandatory
        .iter()
        .filter(|s| is_tool(s.as_str()))
        .count();
    FixedScore::ratio(matched, total)
}

fn certifications_flag(requirements: &JdRequirements, resume: &Haystack) -> FixedScore {
    if requirements.certifications.is_empty() {
        return FixedScore::ZERO;
    }
    FixedScore::flag(
        requirements
            .certifications
            .iter()
            .all(|cert| resume.contains_phrase(cert)),
    )
}

fn location_flag(requirements: &JdRequirements, resume: &Haystack) -> FixedScore {
    let Some(location) = &requirements.location else {
        return FixedScore::ZERO;
    };
    FixedScore::flag(
        resume.contains_phrase(location)
            || RELOCATION_PHRASES
                .iter()
                .any(|phrase| resume.contains_phrase(phrase)),
    )
}

fn gap_flag(requirements: &JdRequirements, resume: &Haystack) -> FixedScore {
    if !requirements.gap_constraint {
        return FixedScore::ONE;
    }
    FixedScore::flag(
        GAP_OK_PHRASES
            .iter()
            .any(|phrase| resume.contains_phrase(phrase)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs<'a>(
        jd_text: &'a str,
        resume_flat: &'a str,
        resume_haystack: &'a Haystack,
        mandatory: &'a [String],
        parsed_mandatory: &'a [String],
    ) -> ScoreInputs<'a> {
        ScoreInputs {
            jd_text,
            resume_flat,
            resume_haystack,
            mandatory,
            parsed_mandatory,
        }
    }

    fn owned(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_first_years_figure() {
        assert_eq!(first_years_figure("Minimum 5+ years of experience"), Some(5.0));
        assert_eq!(first_years_figure("7.5 years in data"), Some(7.5));
        assert_eq!(first_years_figure("no figure here"), None);
    }

    #[test]
    fn test_explicit_total_years_both_orders() {
        assert_eq!(
            explicit_total_years("8 years of relevant experience in ETL"),
            Some(8.0)
        );
        assert_eq!(
            explicit_total_years("Total experience: 6 years"),
            Some(6.0)
        );
        assert_eq!(explicit_total_years("worked at three companies"), None);
    }

    #[test]
    fn test_years_without_experience_context_not_a_total() {
        // A bare duration ("2 years at Acme") is not an explicit total.
        assert_eq!(explicit_total_years("2 years at Acme building dashboards"), None);
    }

    #[test]
    fn test_summed_stated_durations() {
        assert_eq!(
            summed_stated_durations("Acme (2 years), Beta Corp (18 months)"),
            Some(3.5)
        );
        assert_eq!(summed_stated_durations("no durations"), None);
    }

    #[test]
    fn test_experience_strict_ignores_per_role_durations() {
        let hay = Haystack::new("Acme 4 years. Beta 3 years.");
        let mandatory = owned(&["Python"]);
        let parsed = owned(&[]);
        let i = inputs(
            "Required: 5+ years of experience",
            "Acme 4 years. Beta 3 years.",
            &hay,
            &mandatory,
            &parsed,
        );
        let strict = score_tags(&MatchPolicy::strict(), &i);
        assert_eq!(strict.years_of_relevant_experience, FixedScore::ZERO);
        let lenient = score_tags(&MatchPolicy::lenient(), &i);
        assert_eq!(lenient.years_of_relevant_experience, FixedScore::ONE);
    }

    #[test]
    fn test_experience_explicit_total_meets_minimum() {
        let resume = "Data engineer with 8 years of experience";
        let hay = Haystack::new(resume);
        let mandatory = owned(&[]);
        let parsed = owned(&[]);
        let i = inputs("Minimum 5 years of experience", resume, &hay, &mandatory, &parsed);
        let tags = score_tags(&MatchPolicy::strict(), &i);
        assert_eq!(tags.years_of_relevant_experience, FixedScore::ONE);
    }

    #[test]
    fn test_experience_zero_when_jd_states_no_minimum() {
        let resume = "10 years of experience";
        let hay = Haystack::new(resume);
        let mandatory = owned(&[]);
        let parsed = owned(&[]);
        let i = inputs("Great team, great snacks", resume, &hay, &mandatory, &parsed);
        let tags = score_tags(&MatchPolicy::strict(), &i);
        assert_eq!(tags.years_of_relevant_experience, FixedScore::ZERO);
    }

    #[test]
    fn test_core_ratio_two_of_three() {
        let hay = Haystack::new("python and sql");
        let mandatory = owned(&["Python", "SQL", "Scala"]);
        let parsed = owned(&["Python", "SQL"]);
        let i = inputs("jd", "python and sql", &hay, &mandatory, &parsed);
        let tags = score_tags(&MatchPolicy::strict(), &i);
        assert_eq!(tags.core_technical_skills.render(), "0.666666666666667");
        // Base policy: tools ratio shares numerator and denominator.
        assert_eq!(
            tags.tools_and_platforms_expertise,
            tags.core_technical_skills
        );
    }

    #[test]
    fn test_core_ratio_empty_mandatory_is_zero() {
        let hay = Haystack::new("anything");
        let mandatory: Vec<String> = vec![];
        let parsed: Vec<String> = vec![];
        let i = inputs("jd", "anything", &hay, &mandatory, &parsed);
        let tags = score_tags(&MatchPolicy::strict(), &i);
        assert_eq!(tags.core_technical_skills.render(), "0.000000000000000");
    }

    #[test]
    fn test_education_required_and_present() {
        let jd = "Mandatory:\nPython\n\nEducation: B.Tech or equivalent";
        let resume = "B.Tech in Computer Science, 2016";
        let hay = Haystack::new(resume);
        let mandatory = owned(&["Python"]);
        let parsed = owned(&[]);
        let tags = score_tags(
            &MatchPolicy::strict(),
            &inputs(jd, resume, &hay, &mandatory, &parsed),
        );
        assert_eq!(tags.education_qualification, FixedScore::ONE);
    }

    #[test]
    fn test_education_required_and_absent() {
        let jd = "Requires an MBA";
        let resume = "B.Sc in Physics; hand-to-hand combat champion";
        let hay = Haystack::new(resume);
        let mandatory = owned(&[]);
        let parsed = owned(&[]);
        let tags = score_tags(
            &MatchPolicy::strict(),
            &inputs(jd, resume, &hay, &mandatory, &parsed),
        );
        // "combat" must not satisfy "mba".
        assert_eq!(tags.education_qualification, FixedScore::ZERO);
    }

    #[test]
    fn test_education_master_matches_masters() {
        assert!(degree_present("Masters in Data Science", "master"));
        assert!(!degree_present("remastered audio", "master"));
    }

    #[test]
    fn test_certifications_all_present() {
        let jd = "Certifications:\nAWS Solutions Architect\nCKA";
        let resume = Haystack::new("AWS Solutions Architect (2021), CKA (2022)");
        let req = extract_jd_requirements(jd);
        assert_eq!(certifications_flag(&req, &resume), FixedScore::ONE);
    }

    #[test]
    fn test_certifications_missing_one_or_unspecified() {
        let jd = "Certifications:\nAWS Solutions Architect\nCKA";
        let resume = Haystack::new("AWS Solutions Architect (2021)");
        let req = extract_jd_requirements(jd);
        assert_eq!(certifications_flag(&req, &resume), FixedScore::ZERO);

        let none = extract_jd_requirements("Mandatory:\nPython");
        assert_eq!(certifications_flag(&none, &resume), FixedScore::ZERO);
    }

    #[test]
    fn test_location_match_and_relocation() {
        let req = extract_jd_requirements("Location: Hyderabad");
        assert_eq!(
            location_flag(&req, &Haystack::new("Based in Hyderabad, India")),
            FixedScore::ONE
        );
        assert_eq!(
            location_flag(&req, &Haystack::new("Pune. Willing to relocate.")),
            FixedScore::ONE
        );
        assert_eq!(
            location_flag(&req, &Haystack::new("Based in Pune")),
            FixedScore::ZERO
        );
    }

    #[test]
    fn test_gap_defaults_to_one_without_constraint() {
        let req = extract_jd_requirements("Mandatory:\nPython");
        assert_eq!(gap_flag(&req, &Haystack::new("whatever")), FixedScore::ONE);
    }

    #[test]
    fn test_gap_constraint_requires_explicit_continuity() {
        let req = extract_jd_requirements("No employment gap longer than 6 months accepted");
        assert!(req.gap_constraint);
        assert_eq!(
            gap_flag(&req, &Haystack::new("Continuous employment since 2015")),
            FixedScore::ONE
        );
        assert_eq!(
            gap_flag(&req, &Haystack::new("worked at Acme")),
            FixedScore::ZERO
        );
    }

    #[test]
    fn test_aggregate_is_mean_times_ten() {
        let tags = MandatoryTags {
            years_of_relevant_experience: FixedScore::ONE,
            education_qualification: FixedScore::ONE,
            core_technical_skills: FixedScore::ONE,
            tools_and_platforms_expertise: FixedScore::ONE,
            mandatory_certifications: FixedScore::ONE,
            location_work_eligibility: FixedScore::ONE,
            career_gap_stability: FixedScore::ONE,
        };
        assert_eq!(aggregate_score(&tags).render(), "10.000000000000000");

        let mixed = MandatoryTags {
            years_of_relevant_experience: FixedScore::ZERO,
            education_qualification: FixedScore::ZERO,
            core_technical_skills: FixedScore::ZERO,
            tools_and_platforms_expertise: FixedScore::ZERO,
            mandatory_certifications: FixedScore::ZERO,
            location_work_eligibility: FixedScore::ZERO,
            career_gap_stability: FixedScore::ONE,
        };
        // 1/7 * 10 = 10/7
        assert_eq!(aggregate_score(&mixed).render(), "1.428571428571429");
    }

    #[test]
    fn test_tools_ratio_restricted_policy() {
        let policy = MatchPolicy {
            tools_share_core_ratio: false,
            ..MatchPolicy::strict()
        };
        let hay = Haystack::new("docker and python");
        let mandatory = owned(&["Python", "Docker", "Terraform"]);
        let parsed = owned(&["Python", "Docker"]);
        let i = inputs("jd", "docker and python", &hay, &mandatory, &parsed);
        let tags = score_tags(&policy, &i);
        // Tool-ish mandatory skills: Docker, Terraform; matched: Docker.
        assert_eq!(tags.tools_and_platforms_expertise.render(), "0.500000000000000");
        assert_eq!(tags.core_technical_skills.render(), "0.666666666666667");
    }
}
