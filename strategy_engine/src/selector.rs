//! Temperature-banded compound sequences.

use serde::{Deserialize, Serialize};

use crate::compound::{Compound, TyreSeverity};
use crate::error::{Result, StrategyError};
use crate::strategy::DryPlan;

use crate::compound::Compound::{Hard as H, Medium as M, Soft as S};

/// A compound sequence with an optional harder variant for high-severity circuits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceRule {
    pub base: Vec<Compound>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high_severity: Option<Vec<Compound>>,
}

impl SequenceRule {
    fn fixed(base: &[Compound]) -> Self {
        Self {
            base: base.to_vec(),
            high_severity: None,
        }
    }

    fn with_high(base: &[Compound], high: &[Compound]) -> Self {
        Self {
            base: base.to_vec(),
            high_severity: Some(high.to_vec()),
        }
    }

    pub fn resolve(&self, severity: TyreSeverity) -> &[Compound] {
        match (&self.high_severity, severity) {
            (Some(high), TyreSeverity::High) => high,
            _ => &self.base,
        }
    }

    fn sequences(&self) -> impl Iterator<Item = &Vec<Compound>> {
        std::iter::once(&self.base).chain(self.high_severity.iter())
    }
}

/// Track temperatures strictly below `below_c` fall in this band; `None` is open-ended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureBand {
    pub below_c: Option<f64>,
    pub one_stop: SequenceRule,
    pub two_stop: SequenceRule,
    pub three_stop: SequenceRule,
}

impl TemperatureBand {
    fn rule(&self, plan: DryPlan) -> &SequenceRule {
        match plan {
            DryPlan::OneStop => &self.one_stop,
            DryPlan::TwoStop => &self.two_stop,
            DryPlan::ThreeStop => &self.three_stop,
        }
    }

    fn contains(&self, track_temp_c: f64) -> bool {
        self.below_c.map_or(true, |upper| track_temp_c < upper)
    }
}

/// Maps track temperature and severity to a compound per stint.
///
/// Pure lookup; whether the sequence fits the race is decided later by the
/// feasibility pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompoundSelector {
    pub bands: Vec<TemperatureBand>,
}

impl CompoundSelector {
    pub fn select(
        &self,
        track_temp_c: f64,
        severity: TyreSeverity,
        plan: DryPlan,
    ) -> Result<Vec<Compound>> {
        let band = self
            .bands
            .iter()
            .find(|band| band.contains(track_temp_c))
            .ok_or_else(|| {
                StrategyError::InvalidConfig(format!(
                    "no temperature band covers {track_temp_c}°C"
                ))
            })?;

        Ok(band.rule(plan).resolve(severity).to_vec())
    }

    /// Every compound any band can hand out.
    pub fn referenced_compounds(&self) -> impl Iterator<Item = Compound> + '_ {
        self.bands
            .iter()
            .flat_map(|band| DryPlan::ALL.into_iter().map(move |plan| band.rule(plan)))
            .flat_map(SequenceRule::sequences)
            .flat_map(|seq| seq.iter().copied())
    }

    pub(crate) fn validate(&self) -> Result<()> {
        let (last, rest) = self
            .bands
            .split_last()
            .ok_or_else(|| StrategyError::InvalidConfig("selector has no temperature bands".into()))?;

        if last.below_c.is_some() {
            return Err(StrategyError::InvalidConfig(
                "last temperature band must be open-ended".into(),
            ));
        }

        let mut previous = f64::NEG_INFINITY;
        for band in rest {
            let upper = band.below_c.ok_or_else(|| {
                StrategyError::InvalidConfig("only the last temperature band may be open-ended".into())
            })?;
            if !upper.is_finite() || upper <= previous {
                return Err(StrategyError::InvalidConfig(format!(
                    "temperature band bounds must be finite and increasing (got {upper} after {previous})"
                )));
            }
            previous = upper;
        }

        for band in &self.bands {
            for plan in DryPlan::ALL {
                if band.rule(plan).sequences().any(|seq| seq.len() != plan.stints()) {
                    return Err(StrategyError::InvalidConfig(format!(
                        "{} sequence must name {} compounds",
                        plan.kind().display_name(),
                        plan.stints()
                    )));
                }
            }
        }

        Ok(())
    }
}

impl Default for CompoundSelector {
    fn default() -> Self {
        let bands = vec![
            TemperatureBand {
                below_c: Some(25.0),
                one_stop: SequenceRule::fixed(&[S, M]),
                two_stop: SequenceRule::fixed(&[S, S, M]),
                three_stop: SequenceRule::fixed(&[S, S, S, M]),
            },
            TemperatureBand {
                below_c: Some(32.0),
                one_stop: SequenceRule::with_high(&[S, M], &[S, H]),
                two_stop: SequenceRule::fixed(&[S, S, M]),
                three_stop: SequenceRule::fixed(&[S, S, S, M]),
            },
            TemperatureBand {
                below_c: Some(40.0),
                one_stop: SequenceRule::with_high(&[M, M], &[M, H]),
                two_stop: SequenceRule::with_high(&[S, M, S], &[S, M, H]),
                three_stop: SequenceRule::with_high(&[S, M, M, H], &[S, M, H, H]),
            },
            TemperatureBand {
                below_c: Some(48.0),
                one_stop: SequenceRule::fixed(&[M, H]),
                two_stop: SequenceRule::with_high(&[M, M, H], &[H, H, M]),
                three_stop: SequenceRule::fixed(&[S, M, M, H]),
            },
            TemperatureBand {
                below_c: None,
                one_stop: SequenceRule::with_high(&[M, H], &[H, H]),
                two_stop: SequenceRule::fixed(&[M, H, H]),
                three_stop: SequenceRule::fixed(&[M, M, H, H]),
            },
        ];

        Self { bands }
    }
}
