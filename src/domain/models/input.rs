//! User input: the four buckets plus the human context.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::errors::{FlowError, FlowResult, ValidationError};

/// Maximum number of core values a user may declare.
pub const MAX_VALUES: usize = 3;

/// Inclusive bounds of the energy level.
pub const ENERGY_RANGE: std::ops::RangeInclusive<u8> = 1..=5;

const fn default_energy_level() -> u8 {
    3
}

/// One of the four circles of the diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Bucket {
    Love,
    GoodAt,
    Paid,
    Needs,
}

impl Bucket {
    pub const ALL: [Self; 4] = [Self::Love, Self::GoodAt, Self::Paid, Self::Needs];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Love => "What you love",
            Self::GoodAt => "What you are good at",
            Self::Paid => "What you can be paid for",
            Self::Needs => "What the world needs",
        }
    }

    pub const fn hint(self) -> &'static str {
        match self {
            Self::Love => "Passions, curiosities, hobbies.",
            Self::GoodAt => "Talents, natural know-how.",
            Self::Paid => "Market, skills people pay for.",
            Self::Needs => "Causes, problems worth solving.",
        }
    }

    /// Short name used on the command line.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Love => "love",
            Self::GoodAt => "good-at",
            Self::Paid => "paid",
            Self::Needs => "needs",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Bucket {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "love" => Ok(Self::Love),
            "good-at" | "goodat" | "good_at" | "good" => Ok(Self::GoodAt),
            "paid" => Ok(Self::Paid),
            "needs" | "need" => Ok(Self::Needs),
            other => Err(format!(
                "unknown bucket '{other}' (expected one of: love, good-at, paid, needs)"
            )),
        }
    }
}

/// Everything the user typed in, owned by the flow controller.
///
/// Collections only grow through the `add_*` methods and only shrink through
/// the `remove_*` methods; items are never edited in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInput {
    #[serde(default)]
    love: Vec<String>,
    #[serde(default)]
    good_at: Vec<String>,
    #[serde(default)]
    paid: Vec<String>,
    #[serde(default)]
    needs: Vec<String>,

    #[serde(default)]
    values: Vec<String>,
    #[serde(default)]
    constraints: Vec<String>,
    #[serde(default = "default_energy_level")]
    energy_level: u8,
}

impl Default for UserInput {
    fn default() -> Self {
        Self {
            love: Vec::new(),
            good_at: Vec::new(),
            paid: Vec::new(),
            needs: Vec::new(),
            values: Vec::new(),
            constraints: Vec::new(),
            energy_level: default_energy_level(),
        }
    }
}

/// Trim `text` and push it, ignoring blank entries.
fn push_trimmed(list: &mut Vec<String>, text: &str) -> bool {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return false;
    }
    list.push(trimmed.to_string());
    true
}

fn remove_at(list: &mut Vec<String>, index: usize) -> FlowResult<String> {
    if index >= list.len() {
        return Err(FlowError::IndexOutOfRange {
            index,
            len: list.len(),
        });
    }
    Ok(list.remove(index))
}

impl UserInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bucket(&self, bucket: Bucket) -> &[String] {
        match bucket {
            Bucket::Love => &self.love,
            Bucket::GoodAt => &self.good_at,
            Bucket::Paid => &self.paid,
            Bucket::Needs => &self.needs,
        }
    }

    fn bucket_mut(&mut self, bucket: Bucket) -> &mut Vec<String> {
        match bucket {
            Bucket::Love => &mut self.love,
            Bucket::GoodAt => &mut self.good_at,
            Bucket::Paid => &mut self.paid,
            Bucket::Needs => &mut self.needs,
        }
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn constraints(&self) -> &[String] {
        &self.constraints
    }

    pub const fn energy_level(&self) -> u8 {
        self.energy_level
    }

    /// Append an item to a bucket. Returns `false` if the text was blank.
    pub fn add_item(&mut self, bucket: Bucket, text: &str) -> bool {
        push_trimmed(self.bucket_mut(bucket), text)
    }

    /// Remove the item at `index`, keeping the order of the others.
    pub fn remove_item(&mut self, bucket: Bucket, index: usize) -> FlowResult<String> {
        remove_at(self.bucket_mut(bucket), index)
    }

    /// Append a core value. No-op once [`MAX_VALUES`] are held.
    pub fn add_value(&mut self, text: &str) -> bool {
        if self.values.len() >= MAX_VALUES {
            return false;
        }
        push_trimmed(&mut self.values, text)
    }

    pub fn remove_value(&mut self, index: usize) -> FlowResult<String> {
        remove_at(&mut self.values, index)
    }

    pub fn add_constraint(&mut self, text: &str) -> bool {
        push_trimmed(&mut self.constraints, text)
    }

    pub fn remove_constraint(&mut self, index: usize) -> FlowResult<String> {
        remove_at(&mut self.constraints, index)
    }

    pub fn set_energy_level(&mut self, level: u8) -> FlowResult<()> {
        if !ENERGY_RANGE.contains(&level) {
            return Err(FlowError::EnergyOutOfRange(level));
        }
        self.energy_level = level;
        Ok(())
    }

    /// Check the preconditions for requesting an analysis.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(bucket) = Bucket::ALL.into_iter().find(|b| self.bucket(*b).is_empty()) {
            return Err(ValidationError::EmptyBucket(bucket));
        }
        if self.values.is_empty() {
            return Err(ValidationError::MissingValues);
        }
        Ok(())
    }

    /// Re-apply the collection invariants to input loaded from a file.
    ///
    /// Blank items are dropped, values beyond the cap are discarded and an
    /// out-of-range energy level is rejected.
    pub fn normalized(self) -> FlowResult<Self> {
        let mut input = Self::new();
        for bucket in Bucket::ALL {
            for item in self.bucket(bucket) {
                input.add_item(bucket, item);
            }
        }
        for value in &self.values {
            input.add_value(value);
        }
        for constraint in &self.constraints {
            input.add_constraint(constraint);
        }
        input.set_energy_level(self.energy_level)?;
        Ok(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> UserInput {
        let mut input = UserInput::new();
        input.add_item(Bucket::Love, "music");
        input.add_item(Bucket::GoodAt, "teaching");
        input.add_item(Bucket::Paid, "tutoring");
        input.add_item(Bucket::Needs, "education");
        input.add_value("freedom");
        input
    }

    #[test]
    fn test_default_energy_is_three() {
        assert_eq!(UserInput::new().energy_level(), 3);
    }

    #[test]
    fn test_add_item_trims_and_rejects_blank() {
        let mut input = UserInput::new();
        assert!(input.add_item(Bucket::Love, "  cooking  "));
        assert!(!input.add_item(Bucket::Love, "   "));
        assert!(!input.add_item(Bucket::Love, ""));
        assert_eq!(input.bucket(Bucket::Love), ["cooking"]);
    }

    #[test]
    fn test_duplicates_allowed() {
        let mut input = UserInput::new();
        input.add_item(Bucket::Paid, "x");
        input.add_item(Bucket::Paid, "x");
        assert_eq!(input.bucket(Bucket::Paid).len(), 2);
    }

    #[test]
    fn test_remove_item_preserves_order() {
        let mut input = UserInput::new();
        for item in ["a", "b", "c"] {
            input.add_item(Bucket::Needs, item);
        }
        assert_eq!(input.remove_item(Bucket::Needs, 1).unwrap(), "b");
        assert_eq!(input.bucket(Bucket::Needs), ["a", "c"]);
    }

    #[test]
    fn test_remove_item_out_of_range() {
        let mut input = UserInput::new();
        input.add_item(Bucket::Love, "a");
        assert_eq!(
            input.remove_item(Bucket::Love, 1),
            Err(FlowError::IndexOutOfRange { index: 1, len: 1 })
        );
    }

    #[test]
    fn test_values_capped_at_three() {
        let mut input = UserInput::new();
        assert!(input.add_value("freedom"));
        assert!(input.add_value("security"));
        assert!(input.add_value("justice"));
        assert!(!input.add_value("family"));
        assert_eq!(input.values().len(), MAX_VALUES);
        assert_eq!(input.values()[2], "justice");
    }

    #[test]
    fn test_constraints_unbounded() {
        let mut input = UserInput::new();
        for i in 0..10 {
            input.add_constraint(&format!("constraint {i}"));
        }
        assert_eq!(input.constraints().len(), 10);
        input.remove_constraint(0).unwrap();
        assert_eq!(input.constraints()[0], "constraint 1");
    }

    #[test]
    fn test_energy_bounds() {
        let mut input = UserInput::new();
        assert!(input.set_energy_level(5).is_ok());
        assert!(input.set_energy_level(1).is_ok());
        assert_eq!(input.set_energy_level(0), Err(FlowError::EnergyOutOfRange(0)));
        assert_eq!(input.set_energy_level(6), Err(FlowError::EnergyOutOfRange(6)));
        assert_eq!(input.energy_level(), 1);
    }

    #[test]
    fn test_validate_reports_first_empty_bucket() {
        let mut input = UserInput::new();
        input.add_item(Bucket::Love, "x");
        input.add_item(Bucket::Paid, "y");
        input.add_item(Bucket::Needs, "z");
        input.add_value("v");
        assert_eq!(
            input.validate(),
            Err(ValidationError::EmptyBucket(Bucket::GoodAt))
        );
    }

    #[test]
    fn test_validate_requires_values() {
        let mut input = filled();
        input.remove_value(0).unwrap();
        assert_eq!(input.validate(), Err(ValidationError::MissingValues));
    }

    #[test]
    fn test_validate_ok() {
        assert!(filled().validate().is_ok());
    }

    #[test]
    fn test_bucket_from_str() {
        assert_eq!("love".parse::<Bucket>().unwrap(), Bucket::Love);
        assert_eq!("Good-At".parse::<Bucket>().unwrap(), Bucket::GoodAt);
        assert_eq!("good_at".parse::<Bucket>().unwrap(), Bucket::GoodAt);
        assert_eq!("needs".parse::<Bucket>().unwrap(), Bucket::Needs);
        assert!("money".parse::<Bucket>().is_err());
    }

    #[test]
    fn test_yaml_parsing_uses_wire_names() {
        let yaml = r"
love: [music]
goodAt: [teaching]
paid: [tutoring]
needs: [education]
values: [freedom]
energyLevel: 4
";
        let input: UserInput = serde_yaml::from_str(yaml).expect("YAML should parse");
        assert_eq!(input.bucket(Bucket::GoodAt), ["teaching"]);
        assert_eq!(input.energy_level(), 4);
        assert!(input.constraints().is_empty());
    }

    #[test]
    fn test_normalized_applies_invariants() {
        let json = r#"{
            "love": ["  a ", ""],
            "values": ["1", "2", "3", "4"],
            "energyLevel": 2
        }"#;
        let input: UserInput = serde_json::from_str(json).unwrap();
        let input = input.normalized().unwrap();
        assert_eq!(input.bucket(Bucket::Love), ["a"]);
        assert_eq!(input.values().len(), 3);
        assert_eq!(input.energy_level(), 2);

        let bad: UserInput = serde_json::from_str(r#"{"energyLevel": 9}"#).unwrap();
        assert_eq!(bad.normalized(), Err(FlowError::EnergyOutOfRange(9)));
    }
}
