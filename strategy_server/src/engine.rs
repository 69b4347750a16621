use anyhow::{Context, Result};
use strategy_engine::{EngineConfig, RaceConditions, StrategyGenerator, TyreSeverity};

/// Builds the generator from `config_path`, or the built-in tables when absent.
pub fn load_generator(config_path: Option<&str>) -> Result<StrategyGenerator> {
    let config = match config_path {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("failed to load engine config at {}", path))?,
        None => EngineConfig::default(),
    };

    let generator = StrategyGenerator::new(config).context("engine config rejected")?;

    // Warmup to catch table problems before serving traffic
    let probe = RaceConditions {
        total_race_laps: 58,
        track_temp_c: 35.0,
        air_temp_c: 28.0,
        tyre_severity: TyreSeverity::Medium,
        rainfall: false,
    };
    let plans = generator.generate(&probe).context("warmup generation failed")?;
    tracing::info!("warmup ok; {} plan(s) for the probe race", plans.len());

    Ok(generator)
}
