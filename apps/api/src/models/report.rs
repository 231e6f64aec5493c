#![allow(dead_code)]

//! Data model for the match report JSON emitted by the engine.
//!
//! Field names and nesting mirror the persisted report schema exactly; the
//! serialized form is the external contract, so every rename is explicit.

use std::str::FromStr;

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use serde_json::Number;

/// A score rendered with exactly 15 digits after the decimal point.
///
/// The fixed-width rendering is a formatting contract on the report, not a
/// precision claim — every value is a small rational, so 15 decimal digits
/// are always exact or correctly rounded. Serialization goes through
/// `serde_json::Number` (arbitrary_precision) so the rendered text survives
/// into the JSON byte stream unchanged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedScore(f64);

impl FixedScore {
    pub const ZERO: FixedScore = FixedScore(0.0);
    pub const ONE: FixedScore = FixedScore(1.0);

    pub fn new(value: f64) -> Self {
        Self(value)
    }

    /// Binary flag: exactly 1 on true, exactly 0 on false.
    pub fn flag(set: bool) -> Self {
        if set {
            Self::ONE
        } else {
            Self::ZERO
        }
    }

    /// Proportional ratio with the denominator-zero rule: 0/0 is 0, never an error.
    pub fn ratio(numerator: usize, denominator: usize) -> Self {
        if denominator == 0 {
            Self::ZERO
        } else {
            Self(numerator as f64 / denominator as f64)
        }
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// The canonical textual form: 15 digits after the decimal point.
    pub fn render(&self) -> String {
        format!("{:.15}", self.0)
    }
}

impl Serialize for FixedScore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let number = Number::from_str(&self.render()).map_err(serde::ser::Error::custom)?;
        number.serialize(serializer)
    }
}

/// The seven mandatory-tag scores.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MandatoryTags {
    #[serde(rename = "YearsOfRelevantExperience")]
    pub years_of_relevant_experience: FixedScore,
    #[serde(rename = "EducationQualification")]
    pub education_qualification: FixedScore,
    #[serde(rename = "CoreTechnicalSkills")]
    pub core_technical_skills: FixedScore,
    #[serde(rename = "ToolsAndPlatformsExpertise")]
    pub tools_and_platforms_expertise: FixedScore,
    #[serde(rename = "MandatoryCertifications")]
    pub mandatory_certifications: FixedScore,
    #[serde(rename = "LocationWorkEligibility")]
    pub location_work_eligibility: FixedScore,
    #[serde(rename = "CareerGapStability")]
    pub career_gap_stability: FixedScore,
}

impl MandatoryTags {
    pub fn values(&self) -> [f64; 7] {
        [
            self.years_of_relevant_experience.value(),
            self.education_qualification.value(),
            self.core_technical_skills.value(),
            self.tools_and_platforms_expertise.value(),
            self.mandatory_certifications.value(),
            self.location_work_eligibility.value(),
            self.career_gap_stability.value(),
        ]
    }
}

/// Per-phrase presence map, keyed by the exact JD phrase.
///
/// Insertion order is JD list order (mandatory first, then good-to-have) and
/// is preserved through serialization — the report must be byte-identical
/// across runs on the same inputs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SkillsMatch(Vec<(String, bool)>);

impl SkillsMatch {
    pub fn insert(&mut self, phrase: impl Into<String>, matched: bool) {
        self.0.push((phrase.into(), matched));
    }

    pub fn get(&self, phrase: &str) -> Option<bool> {
        self.0
            .iter()
            .find(|(key, _)| key == phrase)
            .map(|&(_, matched)| matched)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.0.iter().map(|(key, matched)| (key.as_str(), *matched))
    }
}

impl Serialize for SkillsMatch {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (phrase, matched) in &self.0 {
            map.serialize_entry(phrase, if *matched { "Yes" } else { "No" })?;
        }
        map.end()
    }
}

/// The `result` object nested inside the report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    #[serde(rename = "CandidateName")]
    pub candidate_name: String,
    #[serde(rename = "RoleApplyingFor")]
    pub role_applying_for: String,
    #[serde(rename = "MandatoryTags")]
    pub mandatory_tags: MandatoryTags,
    #[serde(rename = "SkillsMatch")]
    pub skills_match: SkillsMatch,
    #[serde(rename = "ScoreOutOf10")]
    pub score_out_of_10: FixedScore,
}

/// The full match report for one (JD, resume) pair. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchReport {
    pub job_description: String,
    pub mandatory_skills: Vec<String>,
    pub good_to_have_skills: Vec<String>,
    pub parsed_overall_skill_set: Vec<String>,
    pub parsed_mandatory_skill_set: Vec<String>,
    pub parsed_good_to_have_skills: Vec<String>,
    pub result: MatchResult,
}

/// What a caller receives: either a fully schema-conformant report or the
/// literal empty object. There is no third, partial shape.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchOutcome {
    Report(Box<MatchReport>),
    HardFail,
}

impl MatchOutcome {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl Serialize for MatchOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            MatchOutcome::Report(report) => report.serialize(serializer),
            MatchOutcome::HardFail => serializer.serialize_map(Some(0))?.end(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_score_renders_15_digits() {
        assert_eq!(FixedScore::ratio(2, 3).render(), "0.666666666666667");
        assert_eq!(FixedScore::ratio(1, 3).render(), "0.333333333333333");
        assert_eq!(FixedScore::ZERO.render(), "0.000000000000000");
        assert_eq!(FixedScore::ONE.render(), "1.000000000000000");
    }

    #[test]
    fn test_fixed_score_denominator_zero_is_zero() {
        assert_eq!(FixedScore::ratio(0, 0), FixedScore::ZERO);
        assert_eq!(FixedScore::ratio(5, 0), FixedScore::ZERO);
    }

    #[test]
    fn test_fixed_score_serializes_rendered_text() {
        let json = serde_json::to_string(&FixedScore::ratio(2, 3)).unwrap();
        assert_eq!(json, "0.666666666666667");
        let json = serde_json::to_string(&FixedScore::ONE).unwrap();
        assert_eq!(json, "1.000000000000000");
    }

    #[test]
    fn test_skills_match_preserves_insertion_order() {
        let mut skills = SkillsMatch::default();
        skills.insert("Python", true);
        skills.insert("AWS Lambda", false);
        skills.insert("Docker", true);
        let json = serde_json::to_string(&skills).unwrap();
        assert_eq!(
            json,
            r#"{"Python":"Yes","AWS Lambda":"No","Docker":"Yes"}"#
        );
    }

    #[test]
    fn test_skills_match_get() {
        let mut skills = SkillsMatch::default();
        skills.insert("SQL", false);
        assert_eq!(skills.get("SQL"), Some(false));
        assert_eq!(skills.get("NoSQL"), None);
    }

    #[test]
    fn test_hard_fail_serializes_to_empty_object() {
        assert_eq!(MatchOutcome::HardFail.to_json().unwrap(), "{}");
    }
}
