//! Report Builder — runs the full pipeline for one (JD, resume) pair and
//! enforces the hard-fail rule.
//!
//! The engine is a pure, single-pass, synchronous computation: no I/O, no
//! shared state, no suspension points. Running it twice on identical inputs
//! yields byte-identical JSON.

use thiserror::Error;
use tracing::warn;

use crate::matching::exact::{match_all, Haystack};
use crate::matching::normalizer::matching_view;
use crate::matching::policy::MatchPolicy;
use crate::matching::scoring::{aggregate_score, score_tags, ScoreInputs};
use crate::matching::sections::{
    extract_candidate_name, extract_jd_sections, extract_resume_skills, extract_role,
};
use crate::models::report::{MatchOutcome, MatchReport, MatchResult, SkillsMatch};

/// A violated report invariant. Always fatal to the whole report: the
/// contract is "never wrong", not "never empty".
#[derive(Debug, Clone, PartialEq, Error)]
#[error("report invariant violated: {0}")]
pub struct RuleViolation(String);

impl RuleViolation {
    fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Runs extraction, matching and scoring, then applies the hard-fail
/// override. Callers receive either a fully populated report or `{}`.
pub fn run_match(policy: &MatchPolicy, jd_text: &str, resume_text: &str) -> MatchOutcome {
    let jd_view = matching_view(jd_text);
    let resume_view = matching_view(resume_text);
    let resume_haystack = Haystack::new(&resume_view);

    let sections = extract_jd_sections(jd_text);
    let overall_skills = extract_resume_skills(resume_text);
    let candidate_name = extract_candidate_name(resume_text);
    let role_applying_for = extract_role(jd_text);

    let parsed_mandatory = match_all(&sections.mandatory, &resume_haystack);
    let parsed_good_to_have = match_all(&sections.good_to_have, &resume_haystack);

    let mut skills_match = SkillsMatch::default();
    for phrase in sections.mandatory.iter().chain(&sections.good_to_have) {
        skills_match.insert(phrase.clone(), resume_haystack.contains_phrase(phrase));
    }

    let mandatory_tags = score_tags(
        policy,
        &ScoreInputs {
            jd_text,
            resume_flat: &resume_view,
            resume_haystack: &resume_haystack,
            mandatory: &sections.mandatory,
            parsed_mandatory: &parsed_mandatory,
        },
    );
    let score_out_of_10 = aggregate_score(&mandatory_tags);

    let report = MatchReport {
        job_description: jd_view,
        mandatory_skills: sections.mandatory,
        good_to_have_skills: sections.good_to_have,
        parsed_overall_skill_set: overall_skills,
        parsed_mandatory_skill_set: parsed_mandatory,
        parsed_good_to_have_skills: parsed_good_to_have,
        result: MatchResult {
            candidate_name,
            role_applying_for,
            mandatory_tags,
            skills_match,
            score_out_of_10,
        },
    };

    enforce(report)
}

/// Applies the hard-fail override: any invariant violation collapses the
/// whole report to the canonical empty object, never a partial one.
pub fn enforce(report: MatchReport) -> MatchOutcome {
    match validate(&report) {
        Ok(()) => MatchOutcome::Report(Box::new(report)),
        Err(violation) => {
            warn!("{violation}; emitting empty report");
            MatchOutcome::HardFail
        }
    }
}

/// Re-checks every structural invariant of a built report.
pub fn validate(report: &MatchReport) -> Result<(), RuleViolation> {
    for phrase in &report.parsed_mandatory_skill_set {
        if !report.mandatory_skills.contains(phrase) {
            return Err(RuleViolation::new(format!(
                "parsed mandatory skill {phrase:?} is not a JD mandatory skill"
            )));
        }
    }
    for phrase in &report.parsed_good_to_have_skills {
        if !report.good_to_have_skills.contains(phrase) {
            return Err(RuleViolation::new(format!(
                "parsed good-to-have skill {phrase:?} is not a JD good-to-have skill"
            )));
        }
    }

    let result = &report.result;
    let expected = report.mandatory_skills.len() + report.good_to_have_skills.len();
    if result.skills_match.len() != expected {
        return Err(RuleViolation::new(format!(
            "SkillsMatch has {} keys, expected {expected}",
            result.skills_match.len()
        )));
    }
    let jd_phrases = report
        .mandatory_skills
        .iter()
        .chain(&report.good_to_have_skills);
    for (jd_phrase, (key, matched)) in jd_phrases.zip(result.skills_match.iter()) {
        if jd_phrase.as_str() != key {
            return Err(RuleViolation::new(format!(
                "SkillsMatch key {key:?} does not mirror JD phrase {jd_phrase:?}"
            )));
        }
        let parsed = report.parsed_mandatory_skill_set.contains(jd_phrase)
            || report.parsed_good_to_have_skills.contains(jd_phrase);
        if matched != parsed {
            return Err(RuleViolation::new(format!(
                "SkillsMatch value for {key:?} disagrees with the parsed sets"
            )));
        }
    }

    let tags = &result.mandatory_tags;
    for (name, value) in [
        ("YearsOfRelevantExperience", tags.years_of_relevant_experience),
        ("EducationQualification", tags.education_qualification),
        ("MandatoryCertifications", tags.mandatory_certifications),
        ("LocationWorkEligibility", tags.location_work_eligibility),
        ("CareerGapStability", tags.career_gap_stability),
    ] {
        if value.value() != 0.0 && value.value() != 1.0 {
            return Err(RuleViolation::new(format!(
                "binary tag {name} has non-binary value {}",
                value.render()
            )));
        }
    }
    for (name, value) in [
        ("CoreTechnicalSkills", tags.core_technical_skills),
        ("ToolsAndPlatformsExpertise", tags.tools_and_platforms_expertise),
    ] {
        if !(0.0..=1.0).contains(&value.value()) {
            return Err(RuleViolation::new(format!(
                "ratio tag {name} is outside [0, 1]: {}",
                value.render()
            )));
        }
    }

    let score = result.score_out_of_10.value();
    if !(0.0..=10.0).contains(&score) {
        return Err(RuleViolation::new(format!(
            "ScoreOutOf10 is outside [0, 10]: {score}"
        )));
    }
    if result.score_out_of_10 != aggregate_score(tags) {
        return Err(RuleViolation::new(
            "ScoreOutOf10 is not the mean of the seven tags times ten",
        ));
    }

    Ok(())
}
