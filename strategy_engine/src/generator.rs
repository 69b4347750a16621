//! Orchestration: builds every candidate plan for one set of race conditions
//! and ranks the feasible ones.

use tracing::debug;

use crate::compound::{Compound, CompoundKnowledgeBase, TyreSeverity};
use crate::config::EngineConfig;
use crate::error::Result;
use crate::feasibility::FeasibilityAdjuster;
use crate::strategy::{
    lay_out_stints, DryPlan, PitStopStrategy, RaceConditions, RiskLevel, StintPlan, StrategyKind,
};

// Final-stint share of compound life above which a one-stop gets riskier.
const ONE_STOP_HIGH_RISK_SHARE: f64 = 0.9;
const ONE_STOP_MEDIUM_RISK_SHARE: f64 = 0.8;

const ONE_STOP_LOW_RISK: (RiskLevel, f64) = (RiskLevel::Low, 0.90);
const ONE_STOP_MEDIUM_RISK: (RiskLevel, f64) = (RiskLevel::Medium, 0.85);
const ONE_STOP_HIGH_RISK: (RiskLevel, f64) = (RiskLevel::High, 0.70);
const TWO_STOP_RISK: (RiskLevel, f64) = (RiskLevel::Medium, 0.88);
const THREE_STOP_RISK: (RiskLevel, f64) = (RiskLevel::High, 0.72);
const WET_RISK: (RiskLevel, f64) = (RiskLevel::Medium, 0.80);

/// Shown to the user when `generate` returns no strategy.
pub const NO_VIABLE_STRATEGY: &str = "no viable strategy for the given conditions";

/// Stateless apart from its read-only config; share it across threads freely.
#[derive(Debug, Clone)]
pub struct StrategyGenerator {
    config: EngineConfig,
    feasibility: FeasibilityAdjuster,
}

impl Default for StrategyGenerator {
    fn default() -> Self {
        Self::from_valid_config(EngineConfig::default())
    }
}

impl StrategyGenerator {
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: EngineConfig) -> Self {
        let feasibility = FeasibilityAdjuster::new(config.safety_margin_laps);
        Self { config, feasibility }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn knowledge(&self) -> &CompoundKnowledgeBase {
        &self.config.compounds
    }

    /// All feasible strategies for `conditions`, highest confidence first.
    ///
    /// In the wet exactly one plan comes back. In the dry any stop-count that
    /// cannot fit the compound limits is left out, so the result may be empty.
    pub fn generate(&self, conditions: &RaceConditions) -> Result<Vec<PitStopStrategy>> {
        conditions.validate()?;
        debug!(
            laps = conditions.total_race_laps,
            track_temp_c = conditions.track_temp_c,
            air_temp_c = conditions.air_temp_c,
            severity = %conditions.tyre_severity,
            rainfall = conditions.rainfall,
            "generating strategies"
        );

        if conditions.rainfall {
            return Ok(vec![self.wet_strategy(conditions)?]);
        }

        let mut strategies = Vec::with_capacity(DryPlan::ALL.len());
        for plan in DryPlan::ALL {
            match self.dry_strategy(plan, conditions)? {
                Some(strategy) => strategies.push(strategy),
                None => debug!(plan = plan.kind().display_name(), "plan infeasible, omitted"),
            }
        }

        // Stable, so equal scores keep one/two/three-stop order.
        strategies.sort_by(|a, b| b.confidence_score.total_cmp(&a.confidence_score));
        Ok(strategies)
    }

    fn dry_strategy(&self, plan: DryPlan, c: &RaceConditions) -> Result<Option<PitStopStrategy>> {
        let severity = c.tyre_severity;
        let compounds = self.config.selector.select(c.track_temp_c, severity, plan)?;
        let raw_pits = self.config.timing.pit_laps(c.total_race_laps, severity, plan);

        let Some(stints) = self.feasibility.adjust(
            self.knowledge(),
            c.total_race_laps,
            severity,
            &compounds,
            &raw_pits,
        )?
        else {
            return Ok(None);
        };

        let (risk_level, confidence_score) = match plan {
            DryPlan::OneStop => self.one_stop_risk(&stints, severity)?,
            DryPlan::TwoStop => TWO_STOP_RISK,
            DryPlan::ThreeStop => THREE_STOP_RISK,
        };
        let reasoning = match plan {
            DryPlan::OneStop => self.one_stop_reasoning(&stints, severity)?,
            DryPlan::TwoStop => two_stop_reasoning(&stints),
            DryPlan::ThreeStop => three_stop_reasoning(&stints),
        };

        self.finish(plan.kind(), stints, risk_level, confidence_score, reasoning)
            .map(Some)
    }

    fn one_stop_risk(&self, stints: &[StintPlan], severity: TyreSeverity) -> Result<(RiskLevel, f64)> {
        let last = final_stint(stints);
        let max_laps = f64::from(self.knowledge().max_usable_laps(last.compound, severity)?);
        let laps = f64::from(last.total_laps);

        Ok(if laps > max_laps * ONE_STOP_HIGH_RISK_SHARE {
            ONE_STOP_HIGH_RISK
        } else if laps > max_laps * ONE_STOP_MEDIUM_RISK_SHARE {
            ONE_STOP_MEDIUM_RISK
        } else {
            ONE_STOP_LOW_RISK
        })
    }

    fn one_stop_reasoning(&self, stints: &[StintPlan], severity: TyreSeverity) -> Result<String> {
        let (first, last) = (&stints[0], final_stint(stints));
        let max_laps = self.knowledge().max_usable_laps(last.compound, severity)?;
        Ok(format!(
            "Start on {}, pit lap {}, finish on {}. Conservative strategy with 1 pit stop. \
             Stint 2: {} laps on {} (max: {}).",
            first.compound, first.pit_after_lap, last.compound, last.total_laps, last.compound, max_laps
        ))
    }

    fn wet_strategy(&self, c: &RaceConditions) -> Result<PitStopStrategy> {
        let race_laps = c.total_race_laps;
        let compound = Compound::Intermediate;
        let max_laps = self.knowledge().max_usable_laps(compound, c.tyre_severity)?;

        let (kind, stints) = if race_laps <= max_laps {
            (StrategyKind::WetNoStop, lay_out_stints(race_laps, &[compound], &[]))
        } else {
            let pit = self.config.timing.wet_pit_lap(race_laps).clamp(1, race_laps - 1);
            (
                StrategyKind::WetOneStop,
                lay_out_stints(race_laps, &[compound, compound], &[pit]),
            )
        };

        let mut reasoning = format!(
            "Wet conditions detected: {compound} throughout. \
             Monitor track conditions for a potential switch to slicks."
        );
        if let Some(longest) = stints.iter().map(|s| s.total_laps).max().filter(|&l| l > max_laps) {
            reasoning.push_str(&format!(
                " Longest stint ({longest} laps) exceeds {compound} life ({max_laps} laps); expect heavy wear."
            ));
        }

        let (risk_level, confidence_score) = WET_RISK;
        self.finish(kind, stints, risk_level, confidence_score, reasoning)
    }

    fn finish(
        &self,
        kind: StrategyKind,
        stints: Vec<StintPlan>,
        risk_level: RiskLevel,
        confidence_score: f64,
        reasoning: String,
    ) -> Result<PitStopStrategy> {
        let estimated_race_time_seconds = self.config.race_time.estimate(self.knowledge(), &stints)?;
        Ok(PitStopStrategy {
            kind,
            name: kind.display_name().to_string(),
            total_pit_stops: stints.len().saturating_sub(1) as u32,
            stints,
            estimated_race_time_seconds,
            risk_level,
            confidence_score,
            reasoning,
        })
    }
}

fn final_stint(stints: &[StintPlan]) -> &StintPlan {
    &stints[stints.len() - 1]
}

fn two_stop_reasoning(stints: &[StintPlan]) -> String {
    let ranges: Vec<String> = stints
        .iter()
        .map(|s| format!("{} (lap {}-{})", s.compound, s.start_lap, s.end_lap))
        .collect();
    format!(
        "Aggressive two-stop: {}. Pit stops at lap {} and {}.",
        ranges.join(", "),
        stints[0].pit_after_lap,
        stints[1].pit_after_lap
    )
}

fn three_stop_reasoning(stints: &[StintPlan]) -> String {
    let sequence: Vec<&str> = stints.iter().map(|s| s.compound.as_str()).collect();
    format!(
        "Very aggressive three-stop for maximum pace. Pits at lap {}, {}, and {}. \
         Sequence: {}. Requires clean air and no safety cars.",
        stints[0].pit_after_lap,
        stints[1].pit_after_lap,
        stints[2].pit_after_lap,
        sequence.join(" → ")
    )
}
