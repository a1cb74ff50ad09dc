// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Revenue calculator: converts platform-specific raw earnings into net
//! take-home pay. Pure and stateless; nothing here touches the database.
//!
//! Tip platforms (SOOP balloons, Chzzk cheese) report raw unit counts, so
//! their income runs forward: count -> gross -> commission -> withholding
//! -> net. YouTube settlements arrive already net of commission, so that
//! path reconstructs the implied gross backward for display only. The two
//! directions are deliberately separate functions.

use serde::Serialize;
use thiserror::Error;

use crate::models::{ChzzkTier, SoopTier, YoutubeIncomeType};

/// Freelance withholding applied to tip-platform settlements (3.3%).
/// Never applied to YouTube or user-declared amounts.
pub const WITHHOLDING_TAX_RATE: f64 = 0.033;

/// One SOOP balloon in won.
pub const SOOP_BALLOON_PRICE: i64 = 110;
/// One Chzzk cheese in won.
pub const CHZZK_CHEESE_PRICE: i64 = 1;

#[derive(Debug, Error, PartialEq)]
pub enum CalcError {
    #[error("unit count must be non-negative, got {0}")]
    NegativeCount(i64),
    #[error("settled amount must be non-negative, got {0}")]
    NegativeAmount(i64),
    #[error("commission rate must be a finite percentage in 0..=100, got {0}")]
    InvalidRate(f64),
}

/// Breakdown of a single settlement, all amounts in integer won.
/// Fractions are floored so net income is never overstated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CalculationResult {
    pub raw_amount: i64,
    pub commission_rate: f64,
    pub commission_amount: i64,
    pub withholding_tax: i64,
    pub net_amount: i64,
}

impl SoopTier {
    pub fn commission_rate(self) -> f64 {
        match self {
            SoopTier::Normal => 40.0,
            SoopTier::Best => 30.0,
            SoopTier::Partner => 20.0,
        }
    }
}

impl ChzzkTier {
    pub fn commission_rate(self) -> f64 {
        match self {
            ChzzkTier::Rookie => 35.0,
            ChzzkTier::Pro => 25.0,
            ChzzkTier::Partner => 20.0,
        }
    }
}

impl YoutubeIncomeType {
    pub fn commission_rate(self) -> f64 {
        match self {
            YoutubeIncomeType::Ad => 45.0,
            YoutubeIncomeType::Superchat => 30.0,
            YoutubeIncomeType::Membership => 30.0,
        }
    }
}

/// SOOP balloon income. `custom_rate` overrides the tier's commission.
pub fn soop_income(
    count: i64,
    tier: SoopTier,
    custom_rate: Option<f64>,
) -> Result<CalculationResult, CalcError> {
    tipped_income(
        count,
        SOOP_BALLOON_PRICE,
        effective_rate(custom_rate, tier.commission_rate())?,
    )
}

/// Chzzk cheese income. `custom_rate` overrides the tier's commission.
pub fn chzzk_income(
    count: i64,
    tier: ChzzkTier,
    custom_rate: Option<f64>,
) -> Result<CalculationResult, CalcError> {
    tipped_income(
        count,
        CHZZK_CHEESE_PRICE,
        effective_rate(custom_rate, tier.commission_rate())?,
    )
}

/// YouTube pays out already net of its commission, so the gross and
/// commission here are reconstructed for the on-screen breakdown only.
/// Withholding is zero: the settlement has already accounted for it.
pub fn youtube_income_from_net(
    net_amount: i64,
    income_type: YoutubeIncomeType,
) -> Result<CalculationResult, CalcError> {
    if net_amount < 0 {
        return Err(CalcError::NegativeAmount(net_amount));
    }
    let commission_rate = income_type.commission_rate();
    let raw_amount = (net_amount as f64 / (1.0 - commission_rate / 100.0)).round() as i64;
    Ok(CalculationResult {
        raw_amount,
        commission_rate,
        commission_amount: raw_amount - net_amount,
        withholding_tax: 0,
        net_amount,
    })
}

fn effective_rate(custom: Option<f64>, default: f64) -> Result<f64, CalcError> {
    match custom {
        Some(r) if !r.is_finite() || !(0.0..=100.0).contains(&r) => Err(CalcError::InvalidRate(r)),
        Some(r) => Ok(r),
        None => Ok(default),
    }
}

fn tipped_income(
    count: i64,
    unit_price: i64,
    commission_rate: f64,
) -> Result<CalculationResult, CalcError> {
    if count < 0 {
        return Err(CalcError::NegativeCount(count));
    }
    let raw_amount = count * unit_price;
    let after_commission = raw_amount as f64 * (1.0 - commission_rate / 100.0);
    let withholding_tax = (after_commission * WITHHOLDING_TAX_RATE).floor() as i64;
    let net_amount = (after_commission - withholding_tax as f64).floor() as i64;
    let commission_amount = (raw_amount as f64 - after_commission).floor() as i64;
    Ok(CalculationResult {
        raw_amount,
        commission_rate,
        commission_amount,
        withholding_tax,
        net_amount,
    })
}
