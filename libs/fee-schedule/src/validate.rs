//! Domain checks for schedule parameters and amounts
//!
//! Every setter and operation passes its input through one of these before
//! any state is touched or any arithmetic runs.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tracing::warn;

use crate::errors::{FeeError, FeeResult};

fn reject(parameter: &'static str, reason: String) -> FeeError {
    warn!(parameter, reason = %reason, "Rejected fee parameter");
    FeeError::InvalidParameter { parameter, reason }
}

/// Accept a rate in `[0, 1)`.
pub fn fraction_below_one(parameter: &'static str, value: Decimal) -> FeeResult<Decimal> {
    if value < Decimal::ZERO {
        return Err(reject(parameter, format!("{} is negative", value)));
    }
    if value >= Decimal::ONE {
        return Err(reject(parameter, format!("{} is not less than 1", value)));
    }
    Ok(value.normalize())
}

/// Accept a whole number of minor units, zero included.
pub fn non_negative_integer(parameter: &'static str, value: Decimal) -> FeeResult<u64> {
    if value < Decimal::ZERO {
        return Err(reject(parameter, format!("{} is negative", value)));
    }
    if !value.fract().is_zero() {
        return Err(reject(parameter, format!("{} is not a whole number", value)));
    }
    value
        .to_u64()
        .ok_or_else(|| reject(parameter, format!("{} exceeds the u64 range", value)))
}

/// Accept a whole number of minor units, at least 1.
pub fn positive_integer(parameter: &'static str, value: Decimal) -> FeeResult<u64> {
    let units = non_negative_integer(parameter, value)?;
    if units == 0 {
        return Err(reject(parameter, "must be at least 1".to_string()));
    }
    Ok(units)
}
