use serde::{Deserialize, Serialize};
use strategy_engine::{PitStopStrategy, RaceConditions, StrategyGenerator, NO_VIABLE_STRATEGY};

use crate::config::{FeedError, TrackCatalog, TrackProfile};

/// A pit-wall request: which circuit, and the weather to plan for.
#[derive(Deserialize, Debug)]
pub struct StrategyQuery {
    pub track: String,
    pub track_temp_c: f64,
    pub air_temp_c: f64,
    #[serde(default)]
    pub rainfall: bool,
    /// Overrides the circuit's scheduled distance, e.g. for a shortened race.
    #[serde(default)]
    pub total_laps: Option<u32>,
}

impl StrategyQuery {
    pub fn conditions(&self, track: &TrackProfile) -> RaceConditions {
        RaceConditions {
            total_race_laps: self.total_laps.unwrap_or(track.total_laps),
            track_temp_c: self.track_temp_c,
            air_temp_c: self.air_temp_c,
            tyre_severity: track.tyre_severity,
            rainfall: self.rainfall,
        }
    }
}

#[derive(Serialize, Debug)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FeedReply {
    Strategies {
        track: String,
        conditions: RaceConditions,
        strategies: Vec<PitStopStrategy>,
        #[serde(skip_serializing_if = "Option::is_none")]
        message: Option<&'static str>,
    },
    Error {
        error: String,
    },
}

fn plan(text: &str, catalog: &TrackCatalog, generator: &StrategyGenerator) -> Result<FeedReply, FeedError> {
    let query: StrategyQuery = serde_json::from_str(text)?;
    let track = catalog.get(&query.track)?;
    let conditions = query.conditions(track);
    let strategies = generator.generate(&conditions)?;
    Ok(FeedReply::Strategies {
        track: track.name.clone(),
        conditions,
        message: strategies.is_empty().then_some(NO_VIABLE_STRATEGY),
        strategies,
    })
}

/// Turns one incoming text frame into the reply frame. Never fails: problems
/// with the query come back as an `error` reply.
pub fn answer(text: &str, catalog: &TrackCatalog, generator: &StrategyGenerator) -> FeedReply {
    plan(text, catalog, generator).unwrap_or_else(|e| FeedReply::Error { error: e.to_string() })
}
