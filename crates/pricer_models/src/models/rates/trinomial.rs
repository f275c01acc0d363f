//! Recombining trinomial tree for the Hull-White model.
//!
//! The tree is built on the Ornstein-Uhlenbeck state `x` with a variable
//! time step. For step `i` of length `dt`, a node at `x` branches to the
//! three nodes around `k·dx'` with
//!
//! ```text
//! mean = x·e^{−a·dt}      v = σ²/(2a)·(1 − e^{−2a·dt})     dx' = √(3v)
//! k = round(mean/dx')     e = mean − k·dx'
//! p_down = 1/6 + e²/(6v) − e/(2√(3v))
//! p_mid  = 2/3 − e²/(3v)
//! p_up   = 1/6 + e²/(6v) + e/(2√(3v))
//! ```
//!
//! which matches the conditional mean and variance. The shift α_i turning
//! `x` into the short rate is solved step by step from the Arrow-Debreu
//! prices so that the tree reprices every discount factor on the grid.
//!
//! Nodes live in one arena; each slice owns a contiguous index range.

use std::ops::Range;

use pricer_core::market_data::YieldCurve;

use super::error::LatticeError;
use super::hull_white::HullWhiteParams;
use super::time_grid::TimeGrid;

/// One lattice node.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Node {
    /// State offset x (short rate minus the slice shift).
    x: f64,
    /// Arrow-Debreu price of the node seen from t = 0.
    state_price: f64,
    /// Local index of the middle successor in the next slice.
    successor: usize,
    /// Down, middle and up branching probabilities.
    probs: [f64; 3],
}

/// Hull-White trinomial tree fitted to a discount curve.
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::{CurveInterpolation, DiscountCurve, YieldCurve};
/// use pricer_core::types::{Date, DayCountConvention};
/// use pricer_models::models::rates::{HullWhiteParams, HullWhiteTree, LatticeConfig, TimeGrid};
///
/// let reference = Date::from_ymd(2025, 1, 2).unwrap();
/// let curve = DiscountCurve::new(
///     reference,
///     DayCountConvention::Actual360,
///     vec![Date::from_ymd(2030, 1, 2).unwrap()],
///     vec![0.8_f64],
///     CurveInterpolation::LogLinear,
/// )
/// .unwrap();
///
/// let grid = TimeGrid::new(&[2.0, 4.0], &LatticeConfig::default()).unwrap();
/// let tree = HullWhiteTree::build(HullWhiteParams::default(), grid, &curve).unwrap();
///
/// let last = tree.grid().steps();
/// let p = curve.discount_factor(tree.grid().horizon()).unwrap();
/// assert!((tree.state_price_sum(last) - p).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct HullWhiteTree {
    params: HullWhiteParams,
    grid: TimeGrid,
    nodes: Vec<Node>,
    slices: Vec<Range<usize>>,
    alphas: Vec<f64>,
}

impl HullWhiteTree {
    /// Builds the tree on `grid` and fits the drift to `curve`.
    ///
    /// # Errors
    ///
    /// - parameter validation errors from [`HullWhiteParams::validate`]
    /// - `NonPositiveVariance` if a step has no diffusion
    /// - `DegenerateStatePrices` if the Arrow-Debreu sum collapses
    /// - `MarketData` if the curve cannot be queried on the grid
    pub fn build<C>(params: HullWhiteParams, grid: TimeGrid, curve: &C) -> Result<Self, LatticeError>
    where
        C: YieldCurve<f64> + ?Sized,
    {
        params.validate()?;

        let steps = grid.steps();
        let mut nodes = Vec::with_capacity(steps * steps + 1);
        let mut slices = Vec::with_capacity(steps + 1);
        let mut alphas = Vec::with_capacity(steps);

        nodes.push(Node {
            x: 0.0,
            state_price: 1.0,
            successor: 0,
            probs: [0.0; 3],
        });
        slices.push(0..1);

        for step in 0..steps {
            let dt = grid.dt(step);
            let variance = params.conditional_variance(dt);
            if !(variance > 0.0) || !variance.is_finite() {
                return Err(LatticeError::NonPositiveVariance { step, variance });
            }
            let dx = (3.0 * variance).sqrt();
            let decay = params.decay(dt);
            let current = slices[step].clone();

            // Centre of each node's branching, on the next slice's integer grid.
            let centres: Vec<i64> = nodes[current.clone()]
                .iter()
                .map(|n| (n.x * decay / dx).round() as i64)
                .collect();
            let (kmin, kmax) = centres
                .iter()
                .fold((i64::MAX, i64::MIN), |(lo, hi), &k| (lo.min(k), hi.max(k)));
            let jmin = kmin - 1;
            let width = (kmax - jmin + 2) as usize;

            for (node, &k) in nodes[current.clone()].iter_mut().zip(&centres) {
                let e = node.x * decay - k as f64 * dx;
                let e2v = e * e / variance;
                let skew = e / (2.0 * (3.0 * variance).sqrt());
                node.successor = (k - jmin) as usize;
                node.probs = [
                    1.0 / 6.0 + e2v / 6.0 - skew,
                    2.0 / 3.0 - e2v / 3.0,
                    1.0 / 6.0 + e2v / 6.0 + skew,
                ];
            }

            let sum: f64 = nodes[current.clone()]
                .iter()
                .map(|n| n.state_price * (-n.x * dt).exp())
                .sum();
            let target = curve.discount_factor(grid.times()[step + 1])?;
            if !(sum > 0.0) || !sum.is_finite() {
                return Err(LatticeError::DegenerateStatePrices { step, sum });
            }
            let alpha = (sum.ln() - target.ln()) / dt;
            alphas.push(alpha);

            let mut next = vec![0.0; width];
            for node in &nodes[current.clone()] {
                let weight = node.state_price * (-(node.x + alpha) * dt).exp();
                for (m, p) in node.probs.iter().enumerate() {
                    next[node.successor + m - 1] += weight * p;
                }
            }

            let start = nodes.len();
            nodes.extend(next.into_iter().enumerate().map(|(l, q)| Node {
                x: (jmin + l as i64) as f64 * dx,
                state_price: q,
                successor: 0,
                probs: [0.0; 3],
            }));
            slices.push(start..nodes.len());
        }

        Ok(Self {
            params,
            grid,
            nodes,
            slices,
            alphas,
        })
    }

    /// Model parameters.
    pub fn params(&self) -> &HullWhiteParams {
        &self.params
    }

    /// The time grid.
    pub fn grid(&self) -> &TimeGrid {
        &self.grid
    }

    /// Number of nodes on slice `i`.
    pub fn slice_len(&self, i: usize) -> usize {
        self.slices[i].len()
    }

    /// Fitted shift α_i applied over step `i`.
    pub fn alpha(&self, i: usize) -> f64 {
        self.alphas[i]
    }

    /// Short rate at every node of slice `i < steps`.
    pub fn short_rates(&self, i: usize) -> Vec<f64> {
        let alpha = self.alphas[i];
        self.nodes[self.slices[i].clone()]
            .iter()
            .map(|n| n.x + alpha)
            .collect()
    }

    /// Arrow-Debreu prices on slice `i`.
    pub fn state_prices(&self, i: usize) -> Vec<f64> {
        self.nodes[self.slices[i].clone()]
            .iter()
            .map(|n| n.state_price)
            .collect()
    }

    /// Sum of Arrow-Debreu prices on slice `i`, equal to P(0, t_i).
    pub fn state_price_sum(&self, i: usize) -> f64 {
        self.nodes[self.slices[i].clone()]
            .iter()
            .map(|n| n.state_price)
            .sum()
    }

    /// Discounted expectation of `next` (values on slice `i + 1`) at every
    /// node of slice `i`.
    pub fn rollback(&self, i: usize, next: &[f64]) -> Vec<f64> {
        let dt = self.grid.dt(i);
        let alpha = self.alphas[i];
        self.nodes[self.slices[i].clone()]
            .iter()
            .map(|n| {
                let centre = n.successor;
                let expected = n.probs[0] * next[centre - 1]
                    + n.probs[1] * next[centre]
                    + n.probs[2] * next[centre + 1];
                expected * (-(n.x + alpha) * dt).exp()
            })
            .collect()
    }

    /// Rolls values on slice `to` back to slice `from` (`from <= to`).
    pub fn rollback_range(&self, from: usize, to: usize, values: Vec<f64>) -> Vec<f64> {
        (from..to)
            .rev()
            .fold(values, |acc, i| self.rollback(i, &acc))
    }

    /// Price of the zero-coupon bond maturing at slice `maturity`, at every
    /// node of slice `from`.
    pub fn zero_bond(&self, from: usize, maturity: usize) -> Vec<f64> {
        let ones = vec![1.0; self.slice_len(maturity)];
        self.rollback_range(from, maturity, ones)
    }

    /// Present value at t = 0 of values on slice `i`.
    pub fn present_value(&self, i: usize, values: &[f64]) -> f64 {
        self.nodes[self.slices[i].clone()]
            .iter()
            .zip(values)
            .map(|(n, v)| n.state_price * v)
            .sum()
    }
}
