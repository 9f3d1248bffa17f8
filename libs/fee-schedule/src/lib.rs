//! Fee schedule library for payment integrations
//!
//! Computes the fee a payment processor deducts under a single schedule
//! (percentage rate, flat charge above a threshold, overall cap), and the
//! inverse: the gross amount to charge so that a target amount settles.
//!
//! All amounts are whole minor units of the currency (kobo, cents, ...).
//! Rates are `Decimal` so results are identical on every platform.
//!
//! # Modules
//! - `calculator`: `FeeCalculator`, `calculate_for` / `add_to`
//! - `schedule`: `FeeSchedule` parameters, presets and derived boundaries
//! - `validate`: domain checks for parameters and amounts
//! - `errors`: Error taxonomy
//!
//! # Usage
//!
//! ```
//! use fee_schedule::prelude::*;
//!
//! let calc = FeeCalculator::new();
//! assert_eq!(calc.calculate_for(10_153)?, 153);
//! assert_eq!(calc.add_to(10_000)?, 10_153);
//! # Ok::<(), FeeError>(())
//! ```

// Public modules
pub mod calculator;
pub mod schedule;
pub mod validate;
pub mod errors;

pub use calculator::{FeeCalculator, InverseRegime};
pub use errors::{FeeError, FeeResult};
pub use schedule::{Boundaries, FeeSchedule};

// Library version constant
pub const FEE_SCHEDULE_VERSION: &str = "1.0.0";

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::calculator::*;
    pub use crate::schedule::*;
    pub use crate::errors::*;
}
