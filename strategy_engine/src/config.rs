use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::compound::{Compound, CompoundKnowledgeBase};
use crate::error::{Result, StrategyError};
use crate::race_time::RaceTimeEstimator;
use crate::selector::CompoundSelector;
use crate::timing::TimingPlanner;

pub const CONFIG_VERSION: u32 = 1;

fn default_safety_margin() -> u32 {
    2
}

/// Every tunable constant of the engine, versioned so tables can be
/// swapped without touching the orchestration code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub version: u32,
    pub compounds: CompoundKnowledgeBase,
    pub selector: CompoundSelector,
    pub timing: TimingPlanner,
    pub race_time: RaceTimeEstimator,
    #[serde(default = "default_safety_margin")]
    pub safety_margin_laps: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            compounds: CompoundKnowledgeBase::default(),
            selector: CompoundSelector::default(),
            timing: TimingPlanner::default(),
            race_time: RaceTimeEstimator::default(),
            safety_margin_laps: default_safety_margin(),
        }
    }
}

impl EngineConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path).map_err(|source| StrategyError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&data)
    }

    pub fn from_json(data: &str) -> Result<Self> {
        let cfg: EngineConfig = serde_json::from_str(data)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.version != CONFIG_VERSION {
            return Err(StrategyError::InvalidConfig(format!(
                "unsupported config version {} (expected {CONFIG_VERSION})",
                self.version
            )));
        }

        for (compound, profile) in self.compounds.iter() {
            if !(profile.pace_factor > 0.0 && profile.pace_factor <= 1.0) {
                return Err(StrategyError::InvalidConfig(format!(
                    "{compound} pace factor must lie in (0, 1] (got {})",
                    profile.pace_factor
                )));
            }
            if !(profile.degradation_rate >= 0.0 && profile.degradation_rate.is_finite()) {
                return Err(StrategyError::InvalidConfig(format!(
                    "{compound} degradation rate must be non-negative (got {})",
                    profile.degradation_rate
                )));
            }
            let max = profile.max_usable_laps;
            if max.low == 0 || max.medium == 0 || max.high == 0 {
                return Err(StrategyError::InvalidConfig(format!(
                    "{compound} max usable laps must be positive"
                )));
            }
        }

        // Intermediates back the wet plan regardless of the dry tables.
        if !self.compounds.contains(Compound::Intermediate) {
            return Err(StrategyError::UnknownCompound(Compound::Intermediate.to_string()));
        }
        if let Some(missing) = self
            .selector
            .referenced_compounds()
            .find(|c| !self.compounds.contains(*c))
        {
            return Err(StrategyError::UnknownCompound(missing.to_string()));
        }

        self.selector.validate()?;
        self.timing.validate()?;
        self.race_time.validate()?;
        Ok(())
    }
}
