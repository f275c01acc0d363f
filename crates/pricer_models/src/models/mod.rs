//! Short-rate models.

pub mod rates;
