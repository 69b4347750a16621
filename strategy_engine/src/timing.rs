//! Raw pit-lap placement as fixed fractions of race distance.

use serde::{Deserialize, Serialize};

use crate::compound::TyreSeverity;
use crate::error::{Result, StrategyError};
use crate::strategy::DryPlan;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeverityFractions {
    pub low: f64,
    pub medium: f64,
    pub high: f64,
}

impl SeverityFractions {
    pub fn get(&self, severity: TyreSeverity) -> f64 {
        match severity {
            TyreSeverity::Low => self.low,
            TyreSeverity::Medium => self.medium,
            TyreSeverity::High => self.high,
        }
    }
}

/// Pit-lap fractions per plan shape. Only the one-stop window moves with
/// severity; for longer plans severity shows up in the compound choice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingPlanner {
    pub one_stop: SeverityFractions,
    pub two_stop: Vec<f64>,
    pub three_stop: Vec<f64>,
    pub wet: f64,
}

fn lap_at(race_laps: u32, fraction: f64) -> u32 {
    (f64::from(race_laps) * fraction).floor() as u32
}

impl TimingPlanner {
    /// Candidate pit laps before any compound-life adjustment, one per stop.
    pub fn pit_laps(&self, race_laps: u32, severity: TyreSeverity, plan: DryPlan) -> Vec<u32> {
        match plan {
            DryPlan::OneStop => vec![lap_at(race_laps, self.one_stop.get(severity))],
            DryPlan::TwoStop => self.two_stop.iter().map(|&f| lap_at(race_laps, f)).collect(),
            DryPlan::ThreeStop => self.three_stop.iter().map(|&f| lap_at(race_laps, f)).collect(),
        }
    }

    pub fn wet_pit_lap(&self, race_laps: u32) -> u32 {
        lap_at(race_laps, self.wet)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        let in_range = |f: f64| f > 0.0 && f < 1.0;

        let singles = [
            ("one_stop.low", self.one_stop.low),
            ("one_stop.medium", self.one_stop.medium),
            ("one_stop.high", self.one_stop.high),
            ("wet", self.wet),
        ];
        for (name, f) in singles {
            if !in_range(f) {
                return Err(StrategyError::InvalidConfig(format!(
                    "timing fraction {name} must lie in (0, 1) (got {f})"
                )));
            }
        }

        for (plan, fractions) in [(DryPlan::TwoStop, &self.two_stop), (DryPlan::ThreeStop, &self.three_stop)] {
            if fractions.len() != plan.stops() {
                return Err(StrategyError::InvalidConfig(format!(
                    "{} needs {} timing fractions (got {})",
                    plan.kind().display_name(),
                    plan.stops(),
                    fractions.len()
                )));
            }
            let increasing = fractions.windows(2).all(|w| w[0] < w[1]);
            if !increasing || !fractions.iter().all(|&f| in_range(f)) {
                return Err(StrategyError::InvalidConfig(format!(
                    "{} timing fractions must be increasing within (0, 1) (got {:?})",
                    plan.kind().display_name(),
                    fractions
                )));
            }
        }

        Ok(())
    }
}

impl Default for TimingPlanner {
    fn default() -> Self {
        Self {
            one_stop: SeverityFractions {
                low: 0.45,
                medium: 0.40,
                high: 0.35,
            },
            two_stop: vec![0.28, 0.60],
            three_stop: vec![0.22, 0.43, 0.68],
            wet: 0.50,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(TyreSeverity::Low, 26)]
    #[test_case(TyreSeverity::Medium, 23)]
    #[test_case(TyreSeverity::High, 20)]
    fn test_one_stop_window_by_severity(severity: TyreSeverity, expected: u32) {
        let planner = TimingPlanner::default();
        assert_eq!(planner.pit_laps(58, severity, DryPlan::OneStop), vec![expected]);
    }

    #[test]
    fn test_multi_stop_laps_ignore_severity() {
        let planner = TimingPlanner::default();
        for severity in TyreSeverity::ALL {
            assert_eq!(planner.pit_laps(58, severity, DryPlan::TwoStop), vec![16, 34]);
            assert_eq!(planner.pit_laps(58, severity, DryPlan::ThreeStop), vec![12, 24, 39]);
        }
    }

    #[test]
    fn test_laps_are_floored() {
        let planner = TimingPlanner::default();
        // 53 * 0.28 = 14.84, 53 * 0.60 = 31.8
        assert_eq!(planner.pit_laps(53, TyreSeverity::Low, DryPlan::TwoStop), vec![14, 31]);
        assert_eq!(planner.wet_pit_lap(58), 29);
        assert_eq!(planner.wet_pit_lap(57), 28);
    }

    #[test]
    fn test_validate() {
        assert!(TimingPlanner::default().validate().is_ok());

        let mut planner = TimingPlanner::default();
        planner.three_stop = vec![0.22, 0.68, 0.43];
        assert!(planner.validate().is_err());

        let mut planner = TimingPlanner::default();
        planner.two_stop = vec![0.5];
        assert!(planner.validate().is_err());

        let mut planner = TimingPlanner::default();
        planner.one_stop.high = 1.2;
        assert!(planner.validate().is_err());
    }
}
