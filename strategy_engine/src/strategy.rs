//! Race inputs and the strategy value types handed back to callers.

use serde::{Deserialize, Serialize};

use crate::compound::{Compound, TyreSeverity};
use crate::error::{Result, StrategyError};

/// One static snapshot of the conditions a strategy is planned for.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RaceConditions {
    pub total_race_laps: u32,
    pub track_temp_c: f64,
    pub air_temp_c: f64,
    pub tyre_severity: TyreSeverity,
    pub rainfall: bool,
}

impl RaceConditions {
    pub fn validate(&self) -> Result<()> {
        if self.total_race_laps == 0 {
            return Err(StrategyError::InvalidInput(
                "total_race_laps must be positive".to_string(),
            ));
        }
        if !self.track_temp_c.is_finite() {
            return Err(StrategyError::InvalidInput(format!(
                "track_temp_c must be finite (got {})",
                self.track_temp_c
            )));
        }
        if !self.air_temp_c.is_finite() {
            return Err(StrategyError::InvalidInput(format!(
                "air_temp_c must be finite (got {})",
                self.air_temp_c
            )));
        }
        Ok(())
    }
}

/// One contiguous segment of the race on a single set of tyres.
///
/// Laps are 1-based and inclusive. `pit_after_lap` is 0 for the final stint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StintPlan {
    pub stint_number: u32,
    pub compound: Compound,
    pub start_lap: u32,
    pub end_lap: u32,
    pub total_laps: u32,
    pub pit_after_lap: u32,
}

impl StintPlan {
    pub fn is_final(&self) -> bool {
        self.pit_after_lap == 0
    }
}

/// Lays out stints from the pit laps alone: stint `i` ends on `pit_laps[i]`,
/// the last one ends on `race_laps`. Lap counts come from `end - start + 1`,
/// zero for a stint that starts past its end.
///
/// Callers guarantee `pit_laps` is strictly increasing and below `race_laps`.
pub(crate) fn lay_out_stints(race_laps: u32, compounds: &[Compound], pit_laps: &[u32]) -> Vec<StintPlan> {
    debug_assert_eq!(compounds.len(), pit_laps.len() + 1);

    let mut start_lap = 1;
    compounds
        .iter()
        .enumerate()
        .map(|(i, &compound)| {
            let (end_lap, pit_after_lap) = match pit_laps.get(i) {
                Some(&pit) => (pit, pit),
                None => (race_laps, 0),
            };
            let stint = StintPlan {
                stint_number: i as u32 + 1,
                compound,
                start_lap,
                end_lap,
                total_laps: if end_lap >= start_lap { end_lap - start_lap + 1 } else { 0 },
                pit_after_lap,
            };
            start_lap = end_lap.saturating_add(1);
            stint
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        };
        f.write_str(s)
    }
}

/// The closed set of plan variants the generator produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    OneStop,
    TwoStop,
    ThreeStop,
    WetNoStop,
    WetOneStop,
}

impl StrategyKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            StrategyKind::OneStop => "One-Stop Strategy",
            StrategyKind::TwoStop => "Two-Stop Strategy",
            StrategyKind::ThreeStop => "Three-Stop Strategy",
            StrategyKind::WetNoStop => "No-Stop Strategy (Wet)",
            StrategyKind::WetOneStop => "One-Stop Strategy (Wet)",
        }
    }

    pub fn is_wet(&self) -> bool {
        matches!(self, StrategyKind::WetNoStop | StrategyKind::WetOneStop)
    }
}

/// Dry-weather plan shapes, by number of pit stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DryPlan {
    OneStop,
    TwoStop,
    ThreeStop,
}

impl DryPlan {
    pub const ALL: [DryPlan; 3] = [DryPlan::OneStop, DryPlan::TwoStop, DryPlan::ThreeStop];

    pub fn stops(&self) -> usize {
        match self {
            DryPlan::OneStop => 1,
            DryPlan::TwoStop => 2,
            DryPlan::ThreeStop => 3,
        }
    }

    pub fn stints(&self) -> usize {
        self.stops() + 1
    }

    pub fn kind(&self) -> StrategyKind {
        match self {
            DryPlan::OneStop => StrategyKind::OneStop,
            DryPlan::TwoStop => StrategyKind::TwoStop,
            DryPlan::ThreeStop => StrategyKind::ThreeStop,
        }
    }
}

/// One complete race plan. Stints are in race order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PitStopStrategy {
    pub kind: StrategyKind,
    pub name: String,
    pub total_pit_stops: u32,
    pub stints: Vec<StintPlan>,
    pub estimated_race_time_seconds: f64,
    pub risk_level: RiskLevel,
    pub confidence_score: f64,
    pub reasoning: String,
}

impl PitStopStrategy {
    pub fn compounds(&self) -> Vec<Compound> {
        self.stints.iter().map(|s| s.compound).collect()
    }

    pub fn pit_laps(&self) -> Vec<u32> {
        self.stints
            .iter()
            .filter(|s| !s.is_final())
            .map(|s| s.pit_after_lap)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conditions() -> RaceConditions {
        RaceConditions {
            total_race_laps: 58,
            track_temp_c: 35.0,
            air_temp_c: 28.0,
            tyre_severity: TyreSeverity::Medium,
            rainfall: false,
        }
    }

    #[test]
    fn test_validate_rejects_zero_laps() {
        let c = RaceConditions { total_race_laps: 0, ..conditions() };
        assert!(matches!(c.validate(), Err(StrategyError::InvalidInput(_))));
    }

    #[test]
    fn test_validate_rejects_non_finite_temperature() {
        let c = RaceConditions { track_temp_c: f64::NAN, ..conditions() };
        assert!(c.validate().is_err());
        let c = RaceConditions { air_temp_c: f64::INFINITY, ..conditions() };
        assert!(c.validate().is_err());
        assert!(conditions().validate().is_ok());
    }

    #[test]
    fn test_lay_out_stints_is_contiguous() {
        let stints = lay_out_stints(
            58,
            &[Compound::Soft, Compound::Medium, Compound::Hard],
            &[16, 34],
        );

        assert_eq!(stints.len(), 3);
        assert_eq!((stints[0].start_lap, stints[0].end_lap, stints[0].total_laps), (1, 16, 16));
        assert_eq!((stints[1].start_lap, stints[1].end_lap, stints[1].total_laps), (17, 34, 18));
        assert_eq!((stints[2].start_lap, stints[2].end_lap, stints[2].total_laps), (35, 58, 24));
        assert_eq!(stints[0].pit_after_lap, 16);
        assert_eq!(stints[1].pit_after_lap, 34);
        assert!(stints[2].is_final());
        assert_eq!(stints.iter().map(|s| s.total_laps).sum::<u32>(), 58);
    }

    #[test]
    fn test_single_stint_covers_race() {
        let stints = lay_out_stints(1, &[Compound::Intermediate], &[]);
        assert_eq!(stints.len(), 1);
        assert_eq!((stints[0].start_lap, stints[0].end_lap, stints[0].total_laps), (1, 1, 1));
        assert_eq!(stints[0].pit_after_lap, 0);
    }

    #[test]
    fn test_kind_serde_and_names() {
        assert_eq!(serde_json::to_string(&StrategyKind::WetOneStop).unwrap(), "\"wet_one_stop\"");
        assert!(StrategyKind::WetNoStop.display_name().contains("Wet"));
        assert!(!StrategyKind::ThreeStop.is_wet());
    }
}
