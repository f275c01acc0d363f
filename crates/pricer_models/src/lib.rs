//! # Pricer Models (L2: Business Logic)
//!
//! Rates instruments, payment schedules and the models that value them.
//!
//! This crate provides:
//! - Payment schedules with business-day adjustment
//! - Interest rate swaps and European / Bermudan swaptions
//! - Black's formula for European swaptions
//! - A Hull-White trinomial lattice fitted to a discount curve
//!
//! ## Design Principles
//!
//! - **Enum-based instruments** for static dispatch
//! - **Validated construction**: instruments reject bad terms up front
//! - **Builder pattern** for ergonomic API with sensible defaults

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod instruments;
pub mod models;
pub mod schedules;
