//! Forward fee calculation and its inverse
//!
//! `calculate_for` answers "what fee is deducted from this charge?".
//! `add_to` answers "what must be charged so that this much settles?".
//!
//! The forward fee is `min(ceil(percentage * amount + flat), cap)` where
//! `flat` is the additional charge once `amount > threshold`. Inverting a
//! capped, stepped function needs the schedule's [`Boundaries`]: net amounts
//! above `flatline` are cap-saturated, those above `crossover` carry the
//! flat charge, and the rest pay the percentage alone.
//!
//! All arithmetic is `Decimal`; results are whole minor units.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::errors::{FeeError, FeeResult};
use crate::schedule::{Boundaries, FeeSchedule};
use crate::validate;

/// Which formula the inverse calculation uses for a net amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InverseRegime {
    /// Zero rate: the fee is the flat charge, capped.
    FlatOnly,
    /// The fee is pinned at the cap.
    CapSaturated,
    /// Percentage plus flat charge.
    ThresholdCrossed,
    /// Percentage only.
    BelowThreshold,
}

/// Fee calculator over a validated [`FeeSchedule`].
///
/// Built fluently; any field left unset keeps its default:
///
/// ```
/// use fee_schedule::FeeCalculator;
/// use rust_decimal::Decimal;
///
/// let calc = FeeCalculator::new()
///     .with_percentage(Decimal::new(35, 3))?
///     .with_additional_charge(0)?
///     .with_threshold(0)?
///     .with_cap(1_000_000_000_000u64)?;
///
/// assert_eq!(calc.calculate_for(100_000)?, 3_500);
/// assert_eq!(calc.add_to(5_000)?, 5_182);
/// # Ok::<(), fee_schedule::FeeError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeeCalculator {
    schedule: FeeSchedule,
}

impl FeeCalculator {
    /// Calculator over the default (local NGN) schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Calculator over an existing schedule, validated first.
    pub fn from_schedule(schedule: FeeSchedule) -> FeeResult<Self> {
        schedule.validate()?;
        Ok(Self { schedule })
    }

    pub fn schedule(&self) -> &FeeSchedule {
        &self.schedule
    }

    // -- configuration -----------------------------------------------------

    /// Set the rate. Must lie in `[0, 1)`.
    pub fn with_percentage(mut self, percentage: Decimal) -> FeeResult<Self> {
        self.schedule.percentage = validate::fraction_below_one("percentage", percentage)?;
        Ok(self)
    }

    /// Set the flat charge added above the threshold. Whole, non-negative.
    pub fn with_additional_charge(mut self, additional_charge: impl Into<Decimal>) -> FeeResult<Self> {
        self.schedule.additional_charge =
            validate::non_negative_integer("additional_charge", additional_charge.into())?;
        Ok(self)
    }

    /// Set the amount beyond which the flat charge applies. Whole, non-negative.
    pub fn with_threshold(mut self, threshold: impl Into<Decimal>) -> FeeResult<Self> {
        self.schedule.threshold = validate::non_negative_integer("threshold", threshold.into())?;
        Ok(self)
    }

    /// Set the maximum fee. Whole, at least 1.
    pub fn with_cap(mut self, cap: impl Into<Decimal>) -> FeeResult<Self> {
        self.schedule.cap = validate::positive_integer("cap", cap.into())?;
        Ok(self)
    }

    // -- operations --------------------------------------------------------

    /// Fee deducted when `amount` is charged.
    pub fn calculate_for(&self, amount: impl Into<Decimal>) -> FeeResult<u64> {
        let amount = validate::non_negative_integer("amount", amount.into())?;
        self.fee_for(amount)
    }

    /// Gross amount to charge so that `net_amount` settles after fees.
    pub fn add_to(&self, net_amount: impl Into<Decimal>) -> FeeResult<u64> {
        let net = validate::non_negative_integer("amount", net_amount.into())?;
        let regime = self.classify(net)?;
        let schedule = &self.schedule;
        let overflow = || FeeError::Overflow { operation: "add_to" };

        let gross = match regime {
            InverseRegime::FlatOnly => net
                .checked_add(schedule.additional_charge.min(schedule.cap))
                .ok_or_else(overflow)?,
            InverseRegime::CapSaturated => net.checked_add(schedule.cap).ok_or_else(overflow)?,
            InverseRegime::ThresholdCrossed => {
                let target = Decimal::from(net) + Decimal::from(schedule.additional_charge);
                self.gross_up(target)?
            }
            InverseRegime::BelowThreshold => match self.gross_up(Decimal::from(net))? {
                // Never ask to charge nothing.
                0 => 1,
                gross => gross,
            },
        };

        debug!(net, gross, regime = ?regime, "Computed gross amount");
        Ok(gross)
    }

    /// The inverse formula `add_to` would use for `net_amount`.
    pub fn regime_for(&self, net_amount: impl Into<Decimal>) -> FeeResult<InverseRegime> {
        let net = validate::non_negative_integer("amount", net_amount.into())?;
        self.classify(net)
    }

    /// Amount settled when `gross_amount` is charged, floored at zero.
    pub fn net_of(&self, gross_amount: impl Into<Decimal>) -> FeeResult<u64> {
        let gross = validate::non_negative_integer("amount", gross_amount.into())?;
        Ok(gross.saturating_sub(self.fee_for(gross)?))
    }

    pub fn boundaries(&self) -> FeeResult<Boundaries> {
        self.schedule.boundaries()
    }

    // -- internals ---------------------------------------------------------

    fn fee_for(&self, amount: u64) -> FeeResult<u64> {
        let schedule = &self.schedule;
        let flat = if amount > schedule.threshold {
            schedule.additional_charge
        } else {
            0
        };

        let fee = schedule
            .percentage
            .checked_mul(Decimal::from(amount))
            .and_then(|v| v.checked_add(Decimal::from(flat)))
            .ok_or(FeeError::Overflow {
                operation: "calculate_for",
            })?
            .ceil()
            .min(Decimal::from(schedule.cap));

        trace!(amount, fee = %fee, "Computed fee");
        to_minor_units(fee, "calculate_for")
    }

    fn classify(&self, net: u64) -> FeeResult<InverseRegime> {
        if self.schedule.percentage.is_zero() {
            return Ok(InverseRegime::FlatOnly);
        }

        let boundaries = self.schedule.boundaries()?;
        let net = Decimal::from(net);
        let regime = if boundaries.flatline.is_some_and(|flatline| net > flatline) {
            InverseRegime::CapSaturated
        } else if net > boundaries.crossover {
            InverseRegime::ThresholdCrossed
        } else {
            InverseRegime::BelowThreshold
        };
        Ok(regime)
    }

    /// `ceil(target / (1 - percentage))`
    fn gross_up(&self, target: Decimal) -> FeeResult<u64> {
        let divider = Decimal::ONE - self.schedule.percentage;
        let gross = target
            .checked_div(divider)
            .ok_or(FeeError::Overflow { operation: "add_to" })?
            .ceil();
        to_minor_units(gross, "add_to")
    }
}

fn to_minor_units(value: Decimal, operation: &'static str) -> FeeResult<u64> {
    value.to_u64().ok_or(FeeError::Overflow { operation })
}
