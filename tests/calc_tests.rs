// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use creatorcash::calc::{self, CalcError};
use creatorcash::models::{ChzzkTier, SoopTier, YoutubeIncomeType};

#[test]
fn soop_normal_tier_exact_breakdown() {
    // 1,000 balloons at 110 won, 40% commission, 3.3% withholding
    let r = calc::soop_income(1000, SoopTier::Normal, None).unwrap();
    assert_eq!(r.raw_amount, 110_000);
    assert_eq!(r.commission_rate, 40.0);
    assert_eq!(r.commission_amount, 44_000);
    assert_eq!(r.withholding_tax, 2_178);
    assert_eq!(r.net_amount, 63_822);
}

#[test]
fn soop_higher_tier_nets_strictly_more() {
    let normal = calc::soop_income(1000, SoopTier::Normal, None).unwrap();
    let best = calc::soop_income(1000, SoopTier::Best, None).unwrap();
    let partner = calc::soop_income(1000, SoopTier::Partner, None).unwrap();
    assert!(best.net_amount > normal.net_amount);
    assert!(partner.net_amount > best.net_amount);
}

#[test]
fn chzzk_tiers_and_unit_price() {
    // one cheese = one won
    let rookie = calc::chzzk_income(100_000, ChzzkTier::Rookie, None).unwrap();
    assert_eq!(rookie.raw_amount, 100_000);
    assert_eq!(rookie.commission_rate, 35.0);

    let pro = calc::chzzk_income(100_000, ChzzkTier::Pro, None).unwrap();
    let partner = calc::chzzk_income(100_000, ChzzkTier::Partner, None).unwrap();
    assert!(pro.net_amount > rookie.net_amount);
    assert!(partner.net_amount > pro.net_amount);
}

#[test]
fn custom_rate_overrides_tier() {
    let r = calc::soop_income(1000, SoopTier::Normal, Some(25.0)).unwrap();
    assert_eq!(r.commission_rate, 25.0);
    let default = calc::soop_income(1000, SoopTier::Normal, None).unwrap();
    assert!(r.net_amount > default.net_amount);
}

#[test]
fn withholding_applies_to_tip_platforms() {
    let r = calc::soop_income(1000, SoopTier::Normal, None).unwrap();
    assert!(r.withholding_tax > 0);
}

#[test]
fn net_never_reaches_gross_when_commission_positive() {
    for count in [1, 7, 999, 123_456] {
        let r = calc::soop_income(count, SoopTier::Partner, None).unwrap();
        assert!(r.net_amount < r.raw_amount);
        assert!(r.net_amount >= 0);
    }
}

#[test]
fn zero_count_is_all_zero() {
    let r = calc::chzzk_income(0, ChzzkTier::Pro, None).unwrap();
    assert_eq!(r.raw_amount, 0);
    assert_eq!(r.commission_amount, 0);
    assert_eq!(r.withholding_tax, 0);
    assert_eq!(r.net_amount, 0);
}

#[test]
fn youtube_reconstructs_gross_from_settled_net() {
    // 45% ad commission: 55,000 settled implies 100,000 gross
    let r = calc::youtube_income_from_net(55_000, YoutubeIncomeType::Ad).unwrap();
    assert_eq!(r.raw_amount, 100_000);
    assert_eq!(r.commission_amount, 45_000);
    assert_eq!(r.net_amount, 55_000);
    // settlement already handled withholding
    assert_eq!(r.withholding_tax, 0);
}

#[test]
fn youtube_membership_rate() {
    let r = calc::youtube_income_from_net(70_000, YoutubeIncomeType::Membership).unwrap();
    assert_eq!(r.commission_rate, 30.0);
    assert_eq!(r.raw_amount, 100_000);
}

#[test]
fn invalid_input_fails_fast() {
    assert_eq!(
        calc::soop_income(-1, SoopTier::Normal, None),
        Err(CalcError::NegativeCount(-1))
    );
    assert_eq!(
        calc::youtube_income_from_net(-500, YoutubeIncomeType::Ad),
        Err(CalcError::NegativeAmount(-500))
    );
    assert!(matches!(
        calc::chzzk_income(10, ChzzkTier::Pro, Some(150.0)),
        Err(CalcError::InvalidRate(_))
    ));
    assert!(matches!(
        calc::chzzk_income(10, ChzzkTier::Pro, Some(f64::NAN)),
        Err(CalcError::InvalidRate(_))
    ));
}
