// Timing trials for the festival solvers.
//
// A trial runs two sweeps for one strategy:
// - size sweep: fresh random programmes of growing length, fixed budget;
// - budget sweep: one random programme of fixed length, growing budget.
// Each point is solved once and timed with `Instant`. The samples show the
// growth class of each strategy (2^n for exhaustive, n*m for the others);
// statistically careful measurement is the criterion bench's job.
//
// `TrialConfig` is loaded from JSON laid over the preset of the strategy
// being timed, so a file only needs the fields it overrides.
// `TrialConfig::for_strategy` gives each strategy sweep bounds it can finish
// in reasonable time; the exhaustive size sweep in particular must stay
// small. Overrides replace whole top-level fields: a sweep given in the file
// is taken as written, not merged with the preset's sweep.

use std::path::Path;
use std::time::{Duration, Instant};

use cadenza_prng::TrialRng;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::error::{FestivalError, Result};
use crate::event::{Event, ValueRange, random_programme};
use crate::strategy::Strategy;

/// How a sweep advances from one point to the next.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepStep {
    Add(usize),
    Multiply(usize),
}

/// Points `start`, `step(start)`, ... up to and including `limit`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sweep {
    pub start: usize,
    pub limit: usize,
    pub step: SweepStep,
}

impl Sweep {
    pub const fn new(start: usize, limit: usize, step: SweepStep) -> Self {
        Sweep { start, limit, step }
    }

    fn validate(&self, what: &str) -> Result<()> {
        let advances = match self.step {
            SweepStep::Add(n) => n > 0,
            SweepStep::Multiply(n) => n > 1 && self.start > 0,
        };
        if !advances {
            return Err(FestivalError::InvalidConfig(format!(
                "{what} sweep {self:?} never advances"
            )));
        }
        Ok(())
    }

    /// Every point of the sweep. Call `validate` first; a sweep that never
    /// advances would loop forever.
    pub fn points(&self) -> Vec<usize> {
        let mut points = Vec::new();
        let mut value = self.start;
        while value <= self.limit {
            points.push(value);
            let next = match self.step {
                SweepStep::Add(n) => value.checked_add(n),
                SweepStep::Multiply(n) => value.checked_mul(n),
            };
            match next {
                Some(next) if next > value => value = next,
                _ => break,
            }
        }
        points
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrialConfig {
    /// Seed for the programme generator.
    pub seed: u64,
    /// Range of event durations in minutes.
    pub durations: ValueRange,
    /// Range of event costs in dollars.
    pub costs: ValueRange,
    /// Programme lengths for the size sweep.
    pub size_sweep: Sweep,
    /// Budget used for every point of the size sweep.
    pub fixed_budget: i64,
    /// Budgets for the budget sweep.
    pub budget_sweep: Sweep,
    /// Programme length used for every point of the budget sweep.
    pub fixed_size: usize,
}

impl Default for TrialConfig {
    fn default() -> Self {
        TrialConfig::for_strategy(Strategy::Tabulated)
    }
}

impl TrialConfig {
    /// Sweep bounds sized to what each strategy can finish quickly.
    pub fn for_strategy(strategy: Strategy) -> Self {
        let (size_sweep, budget_sweep, fixed_size) = match strategy {
            Strategy::Exhaustive => (
                Sweep::new(10, 28, SweepStep::Add(3)),
                Sweep::new(8, 500, SweepStep::Multiply(2)),
                20,
            ),
            Strategy::Memoized => (
                Sweep::new(10, 2500, SweepStep::Multiply(2)),
                Sweep::new(8, 10_000, SweepStep::Multiply(2)),
                20,
            ),
            Strategy::Tabulated => (
                Sweep::new(50, 5000, SweepStep::Multiply(2)),
                Sweep::new(8, 5000, SweepStep::Multiply(2)),
                200,
            ),
        };
        TrialConfig {
            seed: 0x00C0_FFEE,
            durations: ValueRange::new(50, 150),
            costs: ValueRange::new(0, 30),
            size_sweep,
            fixed_budget: 100,
            budget_sweep,
            fixed_size,
        }
    }

    /// Load a config from a JSON file. Missing fields come from
    /// `strategy`'s preset.
    pub fn load(path: &Path, strategy: Strategy) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        TrialConfig::overlay_json(&text, TrialConfig::for_strategy(strategy))
    }

    /// Parse `text` as a JSON object whose top-level fields replace those
    /// of `base`, then validate the result.
    pub fn overlay_json(text: &str, base: TrialConfig) -> Result<Self> {
        let Value::Object(overrides) = serde_json::from_str::<Value>(text)? else {
            return Err(FestivalError::InvalidConfig(
                "trial config must be a JSON object".to_string(),
            ));
        };
        let mut merged = serde_json::to_value(base)?;
        if let Value::Object(fields) = &mut merged {
            fields.extend(overrides);
        }
        let config: TrialConfig = serde_json::from_value(merged)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.durations.is_valid() {
            return Err(FestivalError::InvalidConfig(format!(
                "duration range {:?} is empty",
                self.durations
            )));
        }
        if !self.costs.is_valid() {
            return Err(FestivalError::InvalidConfig(format!(
                "cost range {:?} is empty",
                self.costs
            )));
        }
        if self.fixed_budget < 0 {
            return Err(FestivalError::NegativeBudget {
                budget: self.fixed_budget,
            });
        }
        self.size_sweep.validate("size")?;
        self.budget_sweep.validate("budget")?;
        Ok(())
    }
}

/// Which parameter a sample varied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrialAxis {
    Size,
    Budget,
}

/// One timed solve.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TrialSample {
    pub strategy: Strategy,
    pub axis: TrialAxis,
    pub events: usize,
    pub budget: i64,
    pub minutes: u64,
    pub elapsed: Duration,
}

/// Run the size sweep then the budget sweep for `strategy`.
pub fn run_trials(strategy: Strategy, config: &TrialConfig) -> Result<Vec<TrialSample>> {
    config.validate()?;
    let mut rng = TrialRng::new(config.seed);
    let mut samples = Vec::new();

    for size in config.size_sweep.points() {
        let events = random_programme(&mut rng, size, config.durations, config.costs);
        samples.push(time_solve(
            strategy,
            TrialAxis::Size,
            &events,
            config.fixed_budget,
        )?);
    }

    let events = random_programme(&mut rng, config.fixed_size, config.durations, config.costs);
    for budget in config.budget_sweep.points() {
        let budget = i64::try_from(budget).map_err(|_| {
            FestivalError::InvalidConfig(format!("budget {budget} does not fit in i64"))
        })?;
        samples.push(time_solve(strategy, TrialAxis::Budget, &events, budget)?);
    }
    Ok(samples)
}

fn time_solve(
    strategy: Strategy,
    axis: TrialAxis,
    events: &[Event],
    budget: i64,
) -> Result<TrialSample> {
    let start = Instant::now();
    let minutes = strategy.solve(events, budget)?;
    let elapsed = start.elapsed();
    info!(
        %strategy,
        events = events.len(),
        budget,
        minutes,
        elapsed_us = elapsed.as_micros() as u64,
        "trial sample"
    );
    Ok(TrialSample {
        strategy,
        axis,
        events: events.len(),
        budget,
        minutes,
        elapsed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_config() -> TrialConfig {
        TrialConfig {
            size_sweep: Sweep::new(4, 12, SweepStep::Add(4)),
            budget_sweep: Sweep::new(8, 64, SweepStep::Multiply(2)),
            fixed_size: 10,
            ..TrialConfig::for_strategy(Strategy::Exhaustive)
        }
    }

    #[test]
    fn sweep_points_include_limit() {
        assert_eq!(
            Sweep::new(10, 28, SweepStep::Add(3)).points(),
            vec![10, 13, 16, 19, 22, 25, 28]
        );
        assert_eq!(Sweep::new(8, 64, SweepStep::Multiply(2)).points(), vec![8, 16, 32, 64]);
        assert!(Sweep::new(9, 8, SweepStep::Add(1)).points().is_empty());
    }

    #[test]
    fn stalled_sweeps_are_invalid() {
        let config = TrialConfig {
            size_sweep: Sweep::new(0, 10, SweepStep::Multiply(2)),
            ..TrialConfig::default()
        };
        assert!(matches!(config.validate(), Err(FestivalError::InvalidConfig(_))));
        let config = TrialConfig {
            budget_sweep: Sweep::new(1, 10, SweepStep::Add(0)),
            ..TrialConfig::default()
        };
        assert!(matches!(config.validate(), Err(FestivalError::InvalidConfig(_))));
    }

    #[test]
    fn empty_ranges_are_invalid() {
        let config = TrialConfig {
            costs: ValueRange::new(30, 0),
            ..TrialConfig::default()
        };
        assert!(matches!(config.validate(), Err(FestivalError::InvalidConfig(_))));
    }

    #[test]
    fn presets_are_valid() {
        for strategy in Strategy::ALL {
            TrialConfig::for_strategy(strategy).validate().unwrap();
        }
    }

    #[test]
    fn partial_json_takes_defaults() {
        let json = r#"{"seed": 7, "size_sweep": {"start": 1, "limit": 3, "step": {"add": 1}}}"#;
        let config: TrialConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.size_sweep.points(), vec![1, 2, 3]);
        assert_eq!(config.costs, TrialConfig::default().costs);
        assert_eq!(config.fixed_budget, 100);
    }

    #[test]
    fn overlay_keeps_the_strategy_preset() {
        let preset = TrialConfig::for_strategy(Strategy::Exhaustive);
        let config = TrialConfig::overlay_json(r#"{"seed": 7}"#, preset.clone()).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.size_sweep, preset.size_sweep);
        assert_eq!(config.budget_sweep, preset.budget_sweep);
        assert_eq!(config.fixed_size, preset.fixed_size);
        assert_ne!(config.size_sweep, TrialConfig::default().size_sweep);
    }

    #[test]
    fn overlay_replaces_whole_fields() {
        let json = r#"{
            "fixed_size": 4,
            "budget_sweep": {"start": 1, "limit": 4, "step": {"add": 3}}
        }"#;
        let preset = TrialConfig::for_strategy(Strategy::Memoized);
        let config = TrialConfig::overlay_json(json, preset.clone()).unwrap();
        assert_eq!(config.fixed_size, 4);
        assert_eq!(config.budget_sweep.points(), vec![1, 4]);
        assert_eq!(config.seed, preset.seed);
        assert_eq!(config.size_sweep, preset.size_sweep);
    }

    #[test]
    fn overlay_rejects_non_objects_and_bad_values() {
        let base = TrialConfig::default();
        assert!(matches!(
            TrialConfig::overlay_json("[1, 2]", base.clone()),
            Err(FestivalError::InvalidConfig(_))
        ));
        assert!(matches!(
            TrialConfig::overlay_json(r#"{"seed": "seven"}"#, base.clone()),
            Err(FestivalError::Json(_))
        ));
        assert!(matches!(
            TrialConfig::overlay_json(r#"{"fixed_budget": -1}"#, base),
            Err(FestivalError::NegativeBudget { budget: -1 })
        ));
    }

    #[test]
    fn trial_produces_one_sample_per_point() {
        let config = tiny_config();
        let samples = run_trials(Strategy::Memoized, &config).unwrap();
        let sizes: Vec<usize> = samples
            .iter()
            .filter(|s| s.axis == TrialAxis::Size)
            .map(|s| s.events)
            .collect();
        assert_eq!(sizes, vec![4, 8, 12]);
        let budgets: Vec<i64> = samples
            .iter()
            .filter(|s| s.axis == TrialAxis::Budget)
            .map(|s| s.budget)
            .collect();
        assert_eq!(budgets, vec![8, 16, 32, 64]);
    }

    #[test]
    fn trials_are_reproducible_across_strategies() {
        let config = tiny_config();
        let exhaustive = run_trials(Strategy::Exhaustive, &config).unwrap();
        let tabulated = run_trials(Strategy::Tabulated, &config).unwrap();
        let minutes =
            |samples: &[TrialSample]| samples.iter().map(|s| s.minutes).collect::<Vec<_>>();
        assert_eq!(minutes(&exhaustive), minutes(&tabulated));
    }
}
