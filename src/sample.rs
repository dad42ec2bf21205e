use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::Engine;

/// Largest accepted `steps`; a sweep evaluates `steps + 1` positions.
pub const MAX_SWEEP_STEPS: usize = 1_000_000;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SweepError {
    #[error("sweep bounds must be finite (got {min} .. {max})")]
    NonFinite { min: f64, max: f64 },

    #[error("sweep minimum {min} is greater than maximum {max}")]
    Inverted { min: f64, max: f64 },

    #[error("sweep needs at least one step")]
    NoSteps,

    #[error("sweep is limited to {max} steps")]
    TooManySteps { max: usize },
}

/// A range of values to bind one variable to, one evaluation per value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sweep {
    pub variable: String,
    pub min: f64,
    pub max: f64,
    pub steps: usize,
}

impl Sweep {
    pub fn new(variable: &str, min: f64, max: f64, steps: usize) -> Self {
        Self {
            variable: variable.to_string(),
            min,
            max,
            steps,
        }
    }

    pub fn validate(&self) -> Result<(), SweepError> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(SweepError::NonFinite {
                min: self.min,
                max: self.max,
            });
        }
        if self.min > self.max {
            return Err(SweepError::Inverted {
                min: self.min,
                max: self.max,
            });
        }
        if self.steps == 0 {
            return Err(SweepError::NoSteps);
        }
        if self.steps > MAX_SWEEP_STEPS {
            return Err(SweepError::TooManySteps {
                max: MAX_SWEEP_STEPS,
            });
        }
        Ok(())
    }

    /// The `i`th sample position, `0..=steps`.
    fn position(&self, i: usize) -> f64 {
        if i == self.steps {
            return self.max;
        }
        self.min + (self.max - self.min) * (i as f64) / (self.steps as f64)
    }
}

/// One plotted point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Bounds of a set of points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotStats {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl PlotStats {
    pub fn from_points(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let mut stats = Self {
            min_x: first.x,
            max_x: first.x,
            min_y: first.y,
            max_y: first.y,
        };
        for p in &points[1..] {
            stats.min_x = stats.min_x.min(p.x);
            stats.max_x = stats.max_x.max(p.x);
            stats.min_y = stats.min_y.min(p.y);
            stats.max_y = stats.max_y.max(p.y);
        }
        Some(stats)
    }
}

/// Evaluate the engine's program once per sweep position.
///
/// Positions whose evaluation fails, or whose value is subnormal, are
/// skipped. The swept variable keeps the last position's value afterwards.
pub fn sample(engine: &mut Engine, sweep: &Sweep) -> Result<Vec<Point>, SweepError> {
    sweep.validate()?;

    let mut points = Vec::with_capacity(sweep.steps + 1);
    for i in 0..=sweep.steps {
        let x = sweep.position(i);
        engine.set_variable(&sweep.variable, x);
        match engine.evaluate_and_report() {
            Ok(y) if y.is_normal() || y == 0.0 => points.push(Point { x, y }),
            Ok(y) => tracing::trace!(x, y, "skipping subnormal sample"),
            Err(e) => tracing::trace!(x, error = %e, "skipping failed sample"),
        }
    }

    tracing::debug!(
        variable = %sweep.variable,
        kept = points.len(),
        total = sweep.steps + 1,
        "sweep finished"
    );
    Ok(points)
}

/// Sample a stored program on a fresh engine.
pub fn sample_program<S: AsRef<str>>(words: &[S], sweep: &Sweep) -> Result<Vec<Point>, SweepError> {
    let mut engine = Engine::new();
    engine.set_program(words);
    sample(&mut engine, sweep)
}
