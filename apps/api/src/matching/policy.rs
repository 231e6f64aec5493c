//! Scoring-policy variants, selected once at construction time.
//!
//! The scoring rules admit two observed interpretations of the experience
//! tag and the tools ratio. Rather than hardcoding one and silently changing
//! behavior later, the choice is an explicit versioned object carried in
//! application state (`MATCH_POLICY` env var; see `Config`).

use serde::{Deserialize, Serialize};

/// How `YearsOfRelevantExperience` may be derived from the resume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceRule {
    /// Only an explicit total-experience statement counts ("8 years of
    /// experience"). Scattered per-role durations are never combined.
    ExplicitTotalOnly,
    /// Falls back to summing clearly-stated per-role durations ("2 years",
    /// "18 months") when no explicit total is present. Still literal numeric
    /// extraction only — durations are never computed from date ranges.
    SumStatedDurations,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchPolicy {
    pub experience: ExperienceRule,
    /// When true (base policy), `ToolsAndPlatformsExpertise` shares both
    /// numerator and denominator with `CoreTechnicalSkills`. When false it
    /// is restricted to the tool-vocabulary subset of the mandatory list.
    pub tools_share_core_ratio: bool,
}

impl MatchPolicy {
    pub fn strict() -> Self {
        Self {
            experience: ExperienceRule::ExplicitTotalOnly,
            tools_share_core_ratio: true,
        }
    }

    pub fn lenient() -> Self {
        Self {
            experience: ExperienceRule::SumStatedDurations,
            tools_share_core_ratio: true,
        }
    }

    /// Resolves a policy by its configured name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "strict" => Some(Self::strict()),
            "lenient" => Some(Self::lenient()),
            _ => None,
        }
    }
}

impl Default for MatchPolicy {
    fn default() -> Self {
        Self::strict()
    }
}
