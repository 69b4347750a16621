//! Plain-text rendering of a strategy for terminals and logs.

use std::fmt;

use crate::strategy::PitStopStrategy;

const RULE_WIDTH: usize = 80;

impl fmt::Display for PitStopStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(RULE_WIDTH);
        let total_secs = self.estimated_race_time_seconds.max(0.0).round();
        let minutes = (total_secs / 60.0).floor();
        let seconds = total_secs - minutes * 60.0;

        writeln!(f, "{rule}")?;
        writeln!(f, "{}", self.name.to_uppercase())?;
        writeln!(f, "{rule}")?;
        writeln!(f)?;
        writeln!(f, "Overview:")?;
        writeln!(f, "   - Total Pit Stops: {}", self.total_pit_stops)?;
        writeln!(f, "   - Risk Level: {}", self.risk_level)?;
        writeln!(f, "   - Confidence: {:.1}%", self.confidence_score * 100.0)?;
        writeln!(f, "   - Est. Race Time: {minutes:.0}m {seconds:.0}s")?;
        writeln!(f)?;
        writeln!(f, "Stint Breakdown:")?;
        for stint in &self.stints {
            writeln!(f)?;
            writeln!(f, "   Stint {}: {}", stint.stint_number, stint.compound)?;
            writeln!(
                f,
                "      Laps: {} -> {} ({} laps)",
                stint.start_lap, stint.end_lap, stint.total_laps
            )?;
            if !stint.is_final() {
                writeln!(f, "      PIT STOP after lap {}", stint.pit_after_lap)?;
            }
        }
        writeln!(f)?;
        writeln!(f, "Strategy Reasoning:")?;
        writeln!(f, "   {}", self.reasoning)?;
        writeln!(f)?;
        write!(f, "{rule}")
    }
}

#[cfg(test)]
mod tests {
    use crate::compound::Compound;
    use crate::strategy::{lay_out_stints, PitStopStrategy, RiskLevel, StrategyKind};

    #[test]
    fn test_render() {
        let strategy = PitStopStrategy {
            kind: StrategyKind::OneStop,
            name: StrategyKind::OneStop.display_name().to_string(),
            total_pit_stops: 1,
            stints: lay_out_stints(58, &[Compound::Medium, Compound::Hard], &[23]),
            estimated_race_time_seconds: 5421.4,
            risk_level: RiskLevel::Low,
            confidence_score: 0.9,
            reasoning: "Start on MEDIUM.".to_string(),
        };

        let text = strategy.to_string();
        println!("{text}");

        assert!(text.contains("ONE-STOP STRATEGY"));
        assert!(text.contains("Confidence: 90.0%"));
        assert!(text.contains("Est. Race Time: 90m 21s"));
        assert!(text.contains("Stint 2: HARD"));
        assert!(text.contains("Laps: 24 -> 58 (35 laps)"));
        assert_eq!(text.matches("PIT STOP after lap").count(), 1);
    }

    #[test]
    fn test_race_time_rounds_into_next_minute() {
        let strategy = PitStopStrategy {
            kind: StrategyKind::WetNoStop,
            name: StrategyKind::WetNoStop.display_name().to_string(),
            total_pit_stops: 0,
            stints: lay_out_stints(20, &[Compound::Intermediate], &[]),
            estimated_race_time_seconds: 5459.6,
            risk_level: RiskLevel::Medium,
            confidence_score: 0.8,
            reasoning: "Full wet race.".to_string(),
        };

        let text = strategy.to_string();
        assert!(text.contains("Est. Race Time: 91m 0s"), "{text}");
    }
}
