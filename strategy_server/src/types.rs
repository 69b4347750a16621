use serde::Serialize;
use strategy_engine::{PitStopStrategy, NO_VIABLE_STRATEGY};

#[derive(Debug, Serialize)]
pub struct StrategiesOut {
    pub strategies: Vec<PitStopStrategy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

impl From<Vec<PitStopStrategy>> for StrategiesOut {
    fn from(strategies: Vec<PitStopStrategy>) -> Self {
        let message = strategies.is_empty().then_some(NO_VIABLE_STRATEGY);
        Self { strategies, message }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthOut {
    pub status: &'static str,
    pub config_version: u32,
}
