//! Tyre compounds, circuit severity tiers and the compound knowledge base.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StrategyError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Compound {
    Soft,
    Medium,
    Hard,
    Intermediate,
    Wet,
}

impl Compound {
    pub const ALL: [Compound; 5] = [
        Compound::Soft,
        Compound::Medium,
        Compound::Hard,
        Compound::Intermediate,
        Compound::Wet,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Compound::Soft => "SOFT",
            Compound::Medium => "MEDIUM",
            Compound::Hard => "HARD",
            Compound::Intermediate => "INTERMEDIATE",
            Compound::Wet => "WET",
        }
    }
}

impl fmt::Display for Compound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Compound {
    type Err = StrategyError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Compound::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| StrategyError::UnknownCompound(s.to_string()))
    }
}

/// How aggressively a circuit wears its tyres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TyreSeverity {
    Low,
    Medium,
    High,
}

impl TyreSeverity {
    pub const ALL: [TyreSeverity; 3] = [TyreSeverity::Low, TyreSeverity::Medium, TyreSeverity::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            TyreSeverity::Low => "low",
            TyreSeverity::Medium => "medium",
            TyreSeverity::High => "high",
        }
    }
}

impl fmt::Display for TyreSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TyreSeverity {
    type Err = StrategyError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        TyreSeverity::ALL
            .into_iter()
            .find(|sev| sev.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                StrategyError::InvalidInput(format!(
                    "tyre severity must be one of low, medium, high (got {s:?})"
                ))
            })
    }
}

/// Maximum usable stint length, in laps, for each severity tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaxUsableLaps {
    pub low: u32,
    pub medium: u32,
    pub high: u32,
}

impl MaxUsableLaps {
    pub fn get(&self, severity: TyreSeverity) -> u32 {
        match severity {
            TyreSeverity::Low => self.low,
            TyreSeverity::Medium => self.medium,
            TyreSeverity::High => self.high,
        }
    }
}

/// Per-compound constants.
///
/// * `pace_factor` - relative lap-time multiplier, 1.0 is the fastest compound
/// * `degradation_rate` - fractional lap-time growth per lap of wear
/// * `max_usable_laps` - stint length limit per severity tier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompoundProfile {
    pub pace_factor: f64,
    pub degradation_rate: f64,
    pub max_usable_laps: MaxUsableLaps,
}

/// Read-only lookup table of compound profiles. Built once and shared freely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompoundKnowledgeBase {
    profiles: BTreeMap<Compound, CompoundProfile>,
}

impl CompoundKnowledgeBase {
    pub fn new(profiles: BTreeMap<Compound, CompoundProfile>) -> Self {
        Self { profiles }
    }

    pub fn profile(&self, compound: Compound) -> Result<&CompoundProfile> {
        self.profiles
            .get(&compound)
            .ok_or_else(|| StrategyError::UnknownCompound(compound.to_string()))
    }

    pub fn max_usable_laps(&self, compound: Compound, severity: TyreSeverity) -> Result<u32> {
        Ok(self.profile(compound)?.max_usable_laps.get(severity))
    }

    pub fn contains(&self, compound: Compound) -> bool {
        self.profiles.contains_key(&compound)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Compound, &CompoundProfile)> {
        self.profiles.iter().map(|(c, p)| (*c, p))
    }
}

impl Default for CompoundKnowledgeBase {
    fn default() -> Self {
        let profile = |pace_factor, degradation_rate, low, medium, high| CompoundProfile {
            pace_factor,
            degradation_rate,
            max_usable_laps: MaxUsableLaps { low, medium, high },
        };

        let profiles = BTreeMap::from([
            (Compound::Soft, profile(1.0, 0.08, 25, 20, 15)),
            (Compound::Medium, profile(0.97, 0.05, 40, 30, 25)),
            (Compound::Hard, profile(0.94, 0.03, 55, 45, 35)),
            (Compound::Intermediate, profile(0.92, 0.06, 30, 25, 20)),
            (Compound::Wet, profile(0.88, 0.07, 35, 30, 25)),
        ]);

        Self { profiles }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(Compound::Soft, TyreSeverity::Low, 25)]
    #[test_case(Compound::Medium, TyreSeverity::Medium, 30)]
    #[test_case(Compound::Hard, TyreSeverity::High, 35)]
    #[test_case(Compound::Intermediate, TyreSeverity::Medium, 25)]
    #[test_case(Compound::Wet, TyreSeverity::Low, 35)]
    fn test_default_max_usable_laps(compound: Compound, severity: TyreSeverity, expected: u32) {
        let kb = CompoundKnowledgeBase::default();
        assert_eq!(kb.max_usable_laps(compound, severity).unwrap(), expected);
    }

    #[test]
    fn test_soft_is_fastest_and_wears_quickest() {
        let kb = CompoundKnowledgeBase::default();
        let soft = kb.profile(Compound::Soft).unwrap();
        for (compound, profile) in kb.iter() {
            assert!(profile.pace_factor > 0.0 && profile.pace_factor <= soft.pace_factor);
            if compound != Compound::Soft {
                assert!(profile.degradation_rate < soft.degradation_rate);
            }
        }
    }

    #[test]
    fn test_missing_profile_is_unknown_compound() {
        let kb = CompoundKnowledgeBase::new(BTreeMap::new());
        let err = kb.profile(Compound::Hard).unwrap_err();
        assert!(matches!(err, StrategyError::UnknownCompound(ref name) if name == "HARD"));
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("soft".parse::<Compound>().unwrap(), Compound::Soft);
        assert_eq!(" Intermediate ".parse::<Compound>().unwrap(), Compound::Intermediate);
        assert!(matches!(
            "HYPERSOFT".parse::<Compound>(),
            Err(StrategyError::UnknownCompound(_))
        ));

        assert_eq!("HIGH".parse::<TyreSeverity>().unwrap(), TyreSeverity::High);
        assert!(matches!(
            "extreme".parse::<TyreSeverity>(),
            Err(StrategyError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_serde_spelling() {
        assert_eq!(serde_json::to_string(&Compound::Intermediate).unwrap(), "\"INTERMEDIATE\"");
        assert_eq!(serde_json::to_string(&TyreSeverity::Medium).unwrap(), "\"medium\"");

        let kb = CompoundKnowledgeBase::default();
        let json = serde_json::to_value(&kb).unwrap();
        assert_eq!(json["HARD"]["max_usable_laps"]["low"], 55);
    }
}
