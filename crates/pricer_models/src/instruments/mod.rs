//! Instrument definitions.
//!
//! Instruments are plain data validated at construction. Valuation lives in
//! [`rates::pricing`] and is reached through [`RatesInstrument::value`].

mod error;
pub mod rates;

pub use error::InstrumentError;
pub use rates::RatesInstrument;
