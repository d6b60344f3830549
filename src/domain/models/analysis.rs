//! Analysis output returned by the generative service.
//!
//! Deserialization is strict: every field is required and sub-scores must be
//! integers in `0..=10`. The overall viability score is never read from the
//! service; it is derived locally from the five sub-scores.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::errors::AnalysisError;

/// Upper bound of each viability sub-score.
pub const MAX_SUB_SCORE: u8 = 10;

/// Accept any JSON number that is an integer in `0..=10`.
///
/// `7` and `7.0` are both accepted; `7.5`, `11`, `-1` and strings are not.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn deserialize_sub_score<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    if !value.is_finite() || value.fract() != 0.0 || !(0.0..=f64::from(MAX_SUB_SCORE)).contains(&value)
    {
        return Err(de::Error::custom(format!(
            "sub-score must be an integer between 0 and {MAX_SUB_SCORE}, got {value}"
        )));
    }
    Ok(value as u8)
}

/// The five viability dimensions, each scored 0 to 10.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViabilityBreakdown {
    #[serde(deserialize_with = "deserialize_sub_score")]
    pub motivation: u8,
    #[serde(deserialize_with = "deserialize_sub_score")]
    pub skills: u8,
    #[serde(deserialize_with = "deserialize_sub_score")]
    pub market: u8,
    #[serde(deserialize_with = "deserialize_sub_score")]
    pub time: u8,
    #[serde(deserialize_with = "deserialize_sub_score")]
    pub financial: u8,
}

impl ViabilityBreakdown {
    pub const fn sum(&self) -> u32 {
        self.motivation as u32
            + self.skills as u32
            + self.market as u32
            + self.time as u32
            + self.financial as u32
    }

    /// `round((sum / 5) * 10)`, rounding half away from zero.
    ///
    /// With integral sub-scores this is always `2 * sum`, in `0..=100`.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn overall_score(&self) -> u8 {
        let mean = f64::from(self.sum()) / 5.0;
        (mean * 10.0).round() as u8
    }

    /// Labelled sub-scores in display order.
    pub const fn entries(&self) -> [(&'static str, u8); 5] {
        [
            ("Motivation", self.motivation),
            ("Skills", self.skills),
            ("Market", self.market),
            ("Time", self.time),
            ("Financial", self.financial),
        ]
    }
}

/// Viability assessment of the proposed direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viability {
    /// Derived locally; any value supplied by the service is ignored.
    #[serde(default, skip_deserializing)]
    pub score: u8,
    pub reasoning: String,
    pub breakdown: ViabilityBreakdown,
}

impl Viability {
    /// Overwrite `score` with the value derived from the breakdown.
    pub fn recompute_score(&mut self) {
        self.score = self.breakdown.overall_score();
    }
}

/// Closed set of risk categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskCategory {
    #[serde(alias = "Structurelles")]
    Structural,
    #[serde(alias = "Personnelles")]
    Personal,
    #[serde(alias = "Stratégiques")]
    Strategic,
}

impl RiskCategory {
    pub const ALL: [Self; 3] = [Self::Structural, Self::Personal, Self::Strategic];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Structural => "Structural",
            Self::Personal => "Personal",
            Self::Strategic => "Strategic",
        }
    }
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Risk {
    pub category: RiskCategory,
    pub description: String,
}

/// One step of the action plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelinePhase {
    /// Objective carrying a number (KPI), e.g. "Run 5 discovery interviews".
    pub objective: String,
    pub actions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    pub week1: TimelinePhase,
    pub month1: TimelinePhase,
    pub month3: TimelinePhase,
}

impl Timeline {
    pub const fn phases(&self) -> [(&'static str, &TimelinePhase); 3] {
        [
            ("Week 1", &self.week1),
            ("Month 1", &self.month1),
            ("Month 3", &self.month3),
        ]
    }
}

/// Full structured analysis of a [`UserInput`](super::UserInput).
///
/// Built wholesale from one service response and never partially updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Love ∩ good at.
    pub passion: String,
    /// Love ∩ needs.
    pub mission: String,
    /// Good at ∩ paid.
    pub profession: String,
    /// Needs ∩ paid.
    pub vocation: String,

    pub ikigai_statement: String,
    pub ikigai_description: String,

    pub key_insight: String,
    pub pivot_point: String,
    pub signature_phrase: String,

    pub contradictions: Vec<String>,
    pub viability: Viability,
    pub risks: Vec<Risk>,

    pub minimalist_ikigai: String,
    pub reality_tests: Vec<String>,

    pub timeline_context: String,
    pub timeline: Timeline,
}

impl AnalysisResult {
    /// Parse a service response body and derive the overall score.
    pub fn from_service_json(body: &str) -> Result<Self, AnalysisError> {
        let mut result: Self = serde_json::from_str(body)?;
        result.viability.recompute_score();
        Ok(result)
    }

    /// Risks of one category, in service order.
    pub fn risks_in(&self, category: RiskCategory) -> impl Iterator<Item = &Risk> {
        self.risks.iter().filter(move |r| r.category == category)
    }
}

/// Result shape of the first, four-circle-only version of the tool.
///
/// Any extended payload also deserializes into this subset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MinimalAnalysis {
    pub passion: String,
    pub mission: String,
    pub profession: String,
    pub vocation: String,
    pub ikigai_statement: String,
    pub ikigai_description: String,
    #[serde(default)]
    pub actionable_steps: Vec<String>,
}

impl From<&AnalysisResult> for MinimalAnalysis {
    fn from(result: &AnalysisResult) -> Self {
        Self {
            passion: result.passion.clone(),
            mission: result.mission.clone(),
            profession: result.profession.clone(),
            vocation: result.vocation.clone(),
            ikigai_statement: result.ikigai_statement.clone(),
            ikigai_description: result.ikigai_description.clone(),
            actionable_steps: result.reality_tests.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn breakdown(m: u8, s: u8, mk: u8, t: u8, f: u8) -> ViabilityBreakdown {
        ViabilityBreakdown {
            motivation: m,
            skills: s,
            market: mk,
            time: t,
            financial: f,
        }
    }

    #[test]
    fn test_overall_score_example() {
        let b = breakdown(8, 7, 6, 9, 5);
        assert_eq!(b.sum(), 35);
        assert_eq!(b.overall_score(), 70);
    }

    #[test]
    fn test_overall_score_bounds() {
        assert_eq!(breakdown(0, 0, 0, 0, 0).overall_score(), 0);
        assert_eq!(breakdown(10, 10, 10, 10, 10).overall_score(), 100);
    }

    #[test]
    fn test_overall_score_non_multiple_of_five() {
        // 33 / 5 = 6.6, not exactly representable in binary
        assert_eq!(breakdown(7, 7, 7, 6, 6).overall_score(), 66);
    }

    #[test]
    fn test_sub_score_accepts_integral_float() {
        let b: ViabilityBreakdown = serde_json::from_value(json!({
            "motivation": 7.0, "skills": 6, "market": 5, "time": 4, "financial": 3
        }))
        .unwrap();
        assert_eq!(b.motivation, 7);
    }

    #[test]
    fn test_sub_score_rejects_fraction_and_range() {
        for bad in [json!(7.5), json!(11), json!(-1), json!("7")] {
            let value = json!({
                "motivation": bad, "skills": 6, "market": 5, "time": 4, "financial": 3
            });
            assert!(
                serde_json::from_value::<ViabilityBreakdown>(value).is_err(),
                "should reject {bad}"
            );
        }
    }

    #[test]
    fn test_viability_ignores_service_score() {
        let mut v: Viability = serde_json::from_value(json!({
            "score": 12,
            "reasoning": "r",
            "breakdown": {"motivation": 8, "skills": 7, "market": 6, "time": 9, "financial": 5}
        }))
        .unwrap();
        assert_eq!(v.score, 0);
        v.recompute_score();
        assert_eq!(v.score, 70);
    }

    #[test]
    fn test_risk_category_aliases() {
        let c: RiskCategory = serde_json::from_str("\"Stratégiques\"").unwrap();
        assert_eq!(c, RiskCategory::Strategic);
        let c: RiskCategory = serde_json::from_str("\"Personal\"").unwrap();
        assert_eq!(c, RiskCategory::Personal);
        assert!(serde_json::from_str::<RiskCategory>("\"Financial\"").is_err());
        assert_eq!(serde_json::to_string(&RiskCategory::Structural).unwrap(), "\"Structural\"");
    }

    #[test]
    fn test_minimal_analysis_from_minimal_payload() {
        let minimal: MinimalAnalysis = serde_json::from_value(json!({
            "passion": "p", "mission": "m", "profession": "pr", "vocation": "v",
            "ikigaiStatement": "s", "ikigaiDescription": "d",
            "actionableSteps": ["one", "two"]
        }))
        .unwrap();
        assert_eq!(minimal.actionable_steps.len(), 2);
    }
}
