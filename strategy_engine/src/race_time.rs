//! Total race duration under per-stint linear tyre wear.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::compound::CompoundKnowledgeBase;
use crate::error::{Result, StrategyError};
use crate::strategy::StintPlan;

/// * `base_lap_time_s` - lap time on the fastest compound with fresh tyres
/// * `degradation_scale` - seconds added per lap of wear per unit of degradation rate
/// * `pit_loss_s` - fixed cost of one stop, pit lane plus in/out lap
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RaceTimeEstimator {
    pub base_lap_time_s: f64,
    pub degradation_scale: f64,
    pub pit_loss_s: f64,
}

impl RaceTimeEstimator {
    /// Lap time on a compound after `laps_on_tyre` completed laps in the stint.
    pub fn lap_time(&self, pace_factor: f64, degradation_rate: f64, laps_on_tyre: u32) -> f64 {
        self.base_lap_time_s / pace_factor
            + degradation_rate * f64::from(laps_on_tyre) * self.degradation_scale
    }

    /// Sum of `lap_time` over laps `0..laps` of one stint, in closed form.
    pub fn stint_time(&self, pace_factor: f64, degradation_rate: f64, laps: u32) -> f64 {
        let n = f64::from(laps);
        n * self.base_lap_time_s / pace_factor
            + degradation_rate * self.degradation_scale * n * (n - 1.0).max(0.0) / 2.0
    }

    /// Every stint's laps, wear resetting at each stop, plus pit losses.
    pub fn estimate(&self, knowledge: &CompoundKnowledgeBase, stints: &[StintPlan]) -> Result<f64> {
        let mut total = 0.0;

        for stint in stints {
            let profile = knowledge.profile(stint.compound)?;
            let stint_time = self.stint_time(profile.pace_factor, profile.degradation_rate, stint.total_laps);
            trace!(stint = stint.stint_number, compound = %stint.compound, stint_time, "stint time");
            total += stint_time;
        }

        let stops = stints.len().saturating_sub(1);
        total += stops as f64 * self.pit_loss_s;

        Ok(total)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        let checks = [
            ("base_lap_time_s", self.base_lap_time_s, self.base_lap_time_s > 0.0),
            ("degradation_scale", self.degradation_scale, self.degradation_scale >= 0.0),
            ("pit_loss_s", self.pit_loss_s, self.pit_loss_s >= 0.0),
        ];
        for (name, value, ok) in checks {
            if !ok || !value.is_finite() {
                return Err(StrategyError::InvalidConfig(format!(
                    "race time constant {name} out of range (got {value})"
                )));
            }
        }
        Ok(())
    }
}

impl Default for RaceTimeEstimator {
    fn default() -> Self {
        Self {
            base_lap_time_s: 90.0,
            degradation_scale: 0.1,
            pit_loss_s: 22.0,
        }
    }
}
