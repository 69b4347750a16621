//! Fits candidate pit laps to compound life limits.

use tracing::debug;

use crate::compound::{Compound, CompoundKnowledgeBase, TyreSeverity};
use crate::error::Result;
use crate::strategy::{lay_out_stints, StintPlan};

/// Single forward pass over the stint boundaries.
///
/// A non-final stint that outlasts its compound is cut back so it runs
/// `max_usable_laps - safety_margin_laps`, and the next stint absorbs the
/// difference. If the final stint still overruns its compound, or any stint
/// ends up empty, the plan is infeasible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeasibilityAdjuster {
    pub safety_margin_laps: u32,
}

impl FeasibilityAdjuster {
    pub fn new(safety_margin_laps: u32) -> Self {
        Self { safety_margin_laps }
    }

    /// Returns `Ok(None)` for an infeasible plan. Errors only on a compound
    /// missing from the knowledge base.
    pub fn adjust(
        &self,
        knowledge: &CompoundKnowledgeBase,
        race_laps: u32,
        severity: TyreSeverity,
        compounds: &[Compound],
        raw_pit_laps: &[u32],
    ) -> Result<Option<Vec<StintPlan>>> {
        debug_assert_eq!(compounds.len(), raw_pit_laps.len() + 1);

        let mut pit_laps = Vec::with_capacity(raw_pit_laps.len());
        let mut previous = 0;

        for (&compound, &raw_pit) in compounds.iter().zip(raw_pit_laps) {
            let max_laps = knowledge.max_usable_laps(compound, severity)?;
            let mut pit = raw_pit;

            if pit.saturating_sub(previous) > max_laps {
                pit = previous + max_laps.saturating_sub(self.safety_margin_laps);
                debug!(
                    %compound, raw_pit, pit, max_laps,
                    "stint exceeds compound life, pitting earlier"
                );
            }

            if pit <= previous || pit >= race_laps {
                debug!(%compound, pit, previous, race_laps, "stint has no laps left to run");
                return Ok(None);
            }

            pit_laps.push(pit);
            previous = pit;
        }

        let final_compound = compounds[compounds.len() - 1];
        let final_max = knowledge.max_usable_laps(final_compound, severity)?;
        let final_laps = race_laps - previous;
        if final_laps > final_max {
            debug!(
                compound = %final_compound,
                final_laps,
                max_laps = final_max,
                "final stint overruns compound life"
            );
            return Ok(None);
        }

        Ok(Some(lay_out_stints(race_laps, compounds, &pit_laps)))
    }
}

impl Default for FeasibilityAdjuster {
    fn default() -> Self {
        Self::new(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compound::Compound::{Hard, Medium, Soft};

    fn kb() -> CompoundKnowledgeBase {
        CompoundKnowledgeBase::default()
    }

    #[test]
    fn test_fitting_plan_is_untouched() {
        let stints = FeasibilityAdjuster::default()
            .adjust(&kb(), 58, TyreSeverity::Medium, &[Soft, Medium, Medium, Hard], &[12, 24, 39])
            .unwrap()
            .expect("plan fits");

        let ends: Vec<u32> = stints.iter().map(|s| s.end_lap).collect();
        assert_eq!(ends, vec![12, 24, 39, 58]);
    }

    #[test]
    fn test_long_first_stint_is_cut_to_margin() {
        // SOFT on a high-severity track lasts 15 laps; a lap-30 stop is too late.
        let stints = FeasibilityAdjuster::default()
            .adjust(&kb(), 45, TyreSeverity::High, &[Soft, Hard], &[30])
            .unwrap()
            .expect("hard stint absorbs the rest");

        assert_eq!(stints[0].end_lap, 13);
        assert_eq!(stints[0].total_laps, 13);
        assert_eq!(stints[1].start_lap, 14);
        assert_eq!(stints[1].total_laps, 32);
    }

    #[test]
    fn test_shift_can_push_final_stint_over_limit() {
        // Same shift on a 60-lap race leaves 47 laps for HARD (limit 35).
        let plan = FeasibilityAdjuster::default()
            .adjust(&kb(), 60, TyreSeverity::High, &[Soft, Hard], &[30])
            .unwrap();
        assert!(plan.is_none());
    }

    #[test]
    fn test_shift_propagates_into_next_stint() {
        // 60 laps, medium severity, SOFT limit 20: pit moves 30 -> 18,
        // the HARD stint grows to 42 laps which fits its 45-lap limit.
        let stints = FeasibilityAdjuster::default()
            .adjust(&kb(), 60, TyreSeverity::Medium, &[Soft, Hard], &[30])
            .unwrap()
            .expect("feasible after shift");

        assert_eq!(stints[0].pit_after_lap, 18);
        assert_eq!(stints[1].start_lap, 19);
        assert_eq!(stints[1].total_laps, 42);
    }

    #[test]
    fn test_final_stint_overrun_is_infeasible() {
        let plan = FeasibilityAdjuster::default()
            .adjust(&kb(), 58, TyreSeverity::Medium, &[Medium, Medium], &[23])
            .unwrap();
        assert!(plan.is_none(), "35 laps on MEDIUM exceeds its 30-lap limit");
    }

    #[test]
    fn test_margin_is_configurable() {
        let stints = FeasibilityAdjuster::new(5)
            .adjust(&kb(), 60, TyreSeverity::Medium, &[Soft, Hard], &[30])
            .unwrap()
            .unwrap();
        assert_eq!(stints[0].end_lap, 15);

        let stints = FeasibilityAdjuster::new(0)
            .adjust(&kb(), 60, TyreSeverity::Medium, &[Soft, Hard], &[30])
            .unwrap()
            .unwrap();
        assert_eq!(stints[0].end_lap, 20);
    }

    #[test]
    fn test_margin_swallowing_whole_stint_is_infeasible() {
        let plan = FeasibilityAdjuster::new(20)
            .adjust(&kb(), 60, TyreSeverity::Medium, &[Soft, Hard], &[30])
            .unwrap();
        assert!(plan.is_none());
    }

    #[test]
    fn test_empty_first_stint_is_infeasible() {
        // 3 laps: floor(3 * 0.22) = 0
        let plan = FeasibilityAdjuster::default()
            .adjust(&kb(), 3, TyreSeverity::Low, &[Soft, Soft, Soft, Medium], &[0, 1, 2])
            .unwrap();
        assert!(plan.is_none());
    }

    #[test]
    fn test_missing_compound_propagates() {
        let empty = CompoundKnowledgeBase::new(Default::default());
        let result = FeasibilityAdjuster::default().adjust(&empty, 58, TyreSeverity::Low, &[Soft, Hard], &[26]);
        assert!(result.is_err());
    }
}
