//! Lattice settings and the time grid the tree is built on.

use super::error::LatticeError;

/// Two grid times closer than this are the same point.
pub const TIME_TOLERANCE: f64 = 1e-10;

/// Lattice discretisation settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LatticeConfig {
    /// Target number of steps over the horizon.
    pub steps: usize,
    /// Hard cap on the number of steps.
    pub max_steps: usize,
    /// Lower bound on step density.
    pub min_steps_per_year: usize,
}

impl Default for LatticeConfig {
    fn default() -> Self {
        Self {
            steps: 50,
            max_steps: 2000,
            min_steps_per_year: 3,
        }
    }
}

impl LatticeConfig {
    /// Checks the settings are usable.
    pub fn validate(&self) -> Result<(), LatticeError> {
        if self.steps == 0 {
            return Err(LatticeError::InvalidConfig("steps must be positive".into()));
        }
        if self.min_steps_per_year == 0 {
            return Err(LatticeError::InvalidConfig(
                "min_steps_per_year must be positive".into(),
            ));
        }
        if self.max_steps < self.steps {
            return Err(LatticeError::InvalidConfig(format!(
                "max_steps ({}) is below steps ({})",
                self.max_steps, self.steps
            )));
        }
        Ok(())
    }
}

/// Increasing grid `0 = t_0 < t_1 < … < t_n` containing every mandatory time.
///
/// Each gap between consecutive mandatory times is split into equal steps
/// no longer than `min(horizon / steps, 1 / min_steps_per_year)`.
///
/// # Examples
///
/// ```
/// use pricer_models::models::rates::{LatticeConfig, TimeGrid};
///
/// let grid = TimeGrid::new(&[1.0, 2.5, 5.0], &LatticeConfig::default()).unwrap();
/// assert_eq!(grid.times()[0], 0.0);
/// assert_eq!(grid.horizon(), 5.0);
/// assert!(grid.index_of(2.5).is_some());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TimeGrid {
    times: Vec<f64>,
}

impl TimeGrid {
    /// Builds the grid from mandatory times (curve times, in years).
    ///
    /// Times at zero are already on the grid; negative times are rejected.
    ///
    /// # Errors
    ///
    /// - `InvalidHorizon` if a time is negative or non-finite, or no time is
    ///   positive
    /// - `TooManySteps` if the grid exceeds `config.max_steps`
    pub fn new(mandatory: &[f64], config: &LatticeConfig) -> Result<Self, LatticeError> {
        config.validate()?;

        if let Some(&bad) = mandatory
            .iter()
            .find(|t| !t.is_finite() || **t < -TIME_TOLERANCE)
        {
            return Err(LatticeError::InvalidHorizon(bad));
        }

        let mut points: Vec<f64> = mandatory
            .iter()
            .copied()
            .filter(|t| *t > TIME_TOLERANCE)
            .collect();
        points.sort_by(f64::total_cmp);
        points.dedup_by(|a, b| (*a - *b).abs() < TIME_TOLERANCE);

        let horizon = match points.last() {
            Some(&h) => h,
            None => return Err(LatticeError::InvalidHorizon(0.0)),
        };

        let max_dt = (horizon / config.steps as f64).min(1.0 / config.min_steps_per_year as f64);

        let mut splits = Vec::with_capacity(points.len());
        let mut prev = 0.0;
        for &t in &points {
            let n = ((t - prev) / max_dt - 1e-9).ceil().max(1.0) as usize;
            splits.push(n);
            prev = t;
        }

        let total: usize = splits.iter().sum();
        if total > config.max_steps {
            return Err(LatticeError::TooManySteps {
                steps: total,
                max: config.max_steps,
            });
        }

        let mut times = Vec::with_capacity(total + 1);
        times.push(0.0);
        let mut prev = 0.0;
        for (&t, &n) in points.iter().zip(&splits) {
            let width = t - prev;
            for k in 1..n {
                times.push(prev + width * k as f64 / n as f64);
            }
            times.push(t);
            prev = t;
        }

        Ok(Self { times })
    }

    /// Grid times, starting at zero.
    #[inline]
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Number of steps (one less than the number of times).
    #[inline]
    pub fn steps(&self) -> usize {
        self.times.len() - 1
    }

    /// Last grid time.
    #[inline]
    pub fn horizon(&self) -> f64 {
        self.times[self.times.len() - 1]
    }

    /// Length of step `i` (from `t_i` to `t_{i+1}`).
    #[inline]
    pub fn dt(&self, i: usize) -> f64 {
        self.times[i + 1] - self.times[i]
    }

    /// Index of the grid point equal to `t`, if any.
    pub fn index_of(&self, t: f64) -> Option<usize> {
        let idx = self.times.partition_point(|x| *x < t - TIME_TOLERANCE);
        self.times
            .get(idx)
            .filter(|x| (**x - t).abs() < TIME_TOLERANCE)
            .map(|_| idx)
    }
}
