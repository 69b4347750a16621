//! Race-long tyre strategy engine.
//!
//! From one static snapshot of race conditions (length, temperatures,
//! circuit tyre severity, rain) the engine enumerates 0-3 stop plans,
//! picks a compound per stint, places the pit stops, drops plans that
//! overrun compound life, estimates race time and ranks what is left.
//!
//! ```
//! use strategy_engine::{generate_strategies, TyreSeverity};
//!
//! let plans = generate_strategies(58, 35.0, 28.0, TyreSeverity::Medium, false).unwrap();
//! for plan in &plans {
//!     println!("{} ({:.0}%)", plan.name, plan.confidence_score * 100.0);
//! }
//! ```

pub mod compound;
pub mod config;
pub mod error;
pub mod feasibility;
pub mod generator;
pub mod race_time;
mod report;
pub mod selector;
pub mod strategy;
pub mod timing;

pub use compound::{Compound, CompoundKnowledgeBase, CompoundProfile, MaxUsableLaps, TyreSeverity};
pub use config::EngineConfig;
pub use error::{Result, StrategyError};
pub use feasibility::FeasibilityAdjuster;
pub use generator::{StrategyGenerator, NO_VIABLE_STRATEGY};
pub use race_time::RaceTimeEstimator;
pub use selector::CompoundSelector;
pub use strategy::{DryPlan, PitStopStrategy, RaceConditions, RiskLevel, StintPlan, StrategyKind};
pub use timing::TimingPlanner;

/// Strategies for the given conditions using the built-in tables.
pub fn generate_strategies(
    total_race_laps: u32,
    track_temp_c: f64,
    air_temp_c: f64,
    tyre_severity: TyreSeverity,
    rainfall: bool,
) -> Result<Vec<PitStopStrategy>> {
    let conditions = RaceConditions {
        total_race_laps,
        track_temp_c,
        air_temp_c,
        tyre_severity,
        rainfall,
    };
    StrategyGenerator::default().generate(&conditions)
}
