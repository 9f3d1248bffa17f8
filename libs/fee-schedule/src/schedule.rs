//! Fee schedule configuration
//!
//! A schedule is a percentage rate, a flat charge added above a threshold,
//! and a cap on the total fee. All amounts are in the currency's smallest
//! unit (kobo, cents, ...).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{FeeError, FeeResult};
use crate::validate;

// ---------------------------------------------------------------------------
// Defaults (local NGN card schedule)
// ---------------------------------------------------------------------------

/// 1.5%
pub const DEFAULT_PERCENTAGE: Decimal = Decimal::from_parts(15, 0, 0, false, 3);

/// NGN 100 in kobo.
pub const DEFAULT_ADDITIONAL_CHARGE: u64 = 10_000;

/// NGN 2,500 in kobo.
pub const DEFAULT_THRESHOLD: u64 = 250_000;

/// NGN 2,000 in kobo.
pub const DEFAULT_CAP: u64 = 200_000;

/// 3.5%
const USD_PERCENTAGE: Decimal = Decimal::from_parts(35, 0, 0, false, 3);

/// No real cap on USD payments; large enough never to bind.
const USD_CAP: u64 = 1_000_000_000_000;

/// Fee schedule parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct FeeSchedule {
    /// Fractional rate in `[0, 1)`
    pub percentage: Decimal,
    /// Flat charge applied once the amount exceeds `threshold`
    pub additional_charge: u64,
    pub threshold: u64,
    /// Upper bound on the total fee, at least 1
    pub cap: u64,
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self::local_ngn()
    }
}

impl FeeSchedule {
    /// Local NGN card payments: 1.5% + NGN 100 above NGN 2,500, capped at NGN 2,000.
    pub fn local_ngn() -> Self {
        Self {
            percentage: DEFAULT_PERCENTAGE,
            additional_charge: DEFAULT_ADDITIONAL_CHARGE,
            threshold: DEFAULT_THRESHOLD,
            cap: DEFAULT_CAP,
        }
    }

    /// International USD payments: a flat 3.5% with no flat charge.
    pub fn international_usd() -> Self {
        Self {
            percentage: USD_PERCENTAGE,
            additional_charge: 0,
            threshold: 0,
            cap: USD_CAP,
        }
    }

    /// Check every field against its domain.
    pub fn validate(&self) -> FeeResult<()> {
        validate::fraction_below_one("percentage", self.percentage)?;
        validate::positive_integer("cap", Decimal::from(self.cap))?;
        Ok(())
    }

    /// Parse a schedule from JSON. Missing fields take the defaults.
    pub fn from_json(json: &str) -> FeeResult<Self> {
        let schedule: FeeSchedule = serde_json::from_str(json)?;
        schedule.validate()?;
        debug!(
            percentage = %schedule.percentage,
            additional_charge = schedule.additional_charge,
            threshold = schedule.threshold,
            cap = schedule.cap,
            "Loaded fee schedule"
        );
        Ok(schedule)
    }

    pub fn to_json(&self) -> FeeResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Derive the net amounts at which the inverse calculation switches formula.
    pub fn boundaries(&self) -> FeeResult<Boundaries> {
        let overflow = || FeeError::Overflow {
            operation: "boundaries",
        };

        let charge_divider = Decimal::ONE - self.percentage;
        let crossover = Decimal::from(self.threshold)
            .checked_mul(charge_divider)
            .and_then(|v| v.checked_sub(Decimal::from(self.additional_charge)))
            .ok_or_else(overflow)?;

        let cap = Decimal::from(self.cap);
        let headroom = cap - Decimal::from(self.additional_charge);
        let flatline_plus_charge = if self.percentage.is_zero() {
            None
        } else {
            match headroom.checked_div(self.percentage) {
                Some(v) => Some(v),
                // A rate this small never reaches the cap in range.
                None if headroom >= Decimal::ZERO => None,
                None => Some(Decimal::MIN),
            }
        };
        let flatline = flatline_plus_charge.map(|v| v.saturating_sub(cap));

        Ok(Boundaries {
            charge_divider,
            crossover,
            flatline_plus_charge,
            flatline,
        })
    }
}

/// Boundary values derived from a [`FeeSchedule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Boundaries {
    /// `1 - percentage`
    pub charge_divider: Decimal,
    /// Net amount above which the flat charge applies when inverting.
    pub crossover: Decimal,
    /// Gross amount at which percentage plus flat charge reaches the cap.
    /// `None` when the cap is unreachable (zero rate).
    pub flatline_plus_charge: Option<Decimal>,
    /// Net amount above which the fee is saturated at the cap.
    pub flatline: Option<Decimal>,
}
