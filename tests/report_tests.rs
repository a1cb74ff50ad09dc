// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use creatorcash::models::{
    Campaign, Collaborator, Expense, ExpenseType, Income, IncomeKind, InputMethod, PaymentType,
    Platform,
};
use creatorcash::report;

fn platform_income(date: &str, source: Platform, amount: i64) -> Income {
    Income {
        id: 0,
        r#type: IncomeKind::Platform,
        source: Some(source),
        income_type: None,
        input_method: Some(InputMethod::Direct),
        raw_count: None,
        raw_amount: None,
        commission_rate: None,
        commission_amount: None,
        withholding_tax: None,
        amount,
        date: date.to_string(),
        memo: None,
    }
}

fn campaign(payment_date: &str, amount: i64, is_paid: bool) -> Campaign {
    Campaign {
        id: 0,
        brand_name: "Brand".to_string(),
        amount,
        payment_date: Some(payment_date.to_string()),
        is_paid,
        memo: None,
    }
}

fn other_expense(date: &str, amount: i64, is_paid: bool) -> Expense {
    Expense {
        id: 0,
        r#type: ExpenseType::Other,
        collaborator_id: None,
        description: None,
        amount,
        date: date.to_string(),
        is_paid,
        memo: None,
    }
}

fn payroll_expense(
    date: &str,
    amount: i64,
    is_paid: bool,
    collaborator_id: Option<i64>,
    description: Option<&str>,
) -> Expense {
    Expense {
        id: 0,
        r#type: ExpenseType::Collaborator,
        collaborator_id,
        description: description.map(|s| s.to_string()),
        amount,
        date: date.to_string(),
        is_paid,
        memo: None,
    }
}

fn collaborator(id: i64, name: &str, payment_type: PaymentType, base: Option<i64>, pct: Option<f64>) -> Collaborator {
    Collaborator {
        id,
        name: name.to_string(),
        role: None,
        payment_type,
        base_amount: base,
        percentage: pct,
        memo: None,
    }
}

#[test]
fn total_income_sums_platform_and_paid_campaigns() {
    let incomes = vec![
        platform_income("2025-03-01", Platform::Soop, 100_000),
        platform_income("2025-03-05", Platform::Youtube, 50_000),
    ];
    let campaigns = vec![
        campaign("2025-03-10", 200_000, true),
        campaign("2025-03-15", 100_000, false),
    ];
    assert_eq!(report::total_income(&incomes, &campaigns), 350_000);
    assert_eq!(report::total_income(&[], &[]), 0);
}

#[test]
fn total_expense_counts_paid_only() {
    let expenses = vec![
        other_expense("2025-03-01", 50_000, true),
        other_expense("2025-03-02", 30_000, false),
        other_expense("2025-03-03", 20_000, true),
    ];
    assert_eq!(report::total_expense(&expenses), 70_000);
}

#[test]
fn net_income_can_go_negative() {
    assert_eq!(report::net_income(100_000, 150_000), -50_000);
    assert_eq!(report::net_income(0, 0), 0);
}

#[test]
fn change_rate_fixtures() {
    assert_eq!(report::change_rate(1_200_000, 1_000_000), 20.0);
    assert_eq!(report::change_rate(800_000, 1_000_000), -20.0);
    assert_eq!(report::change_rate(100_000, 0), 100.0);
    assert_eq!(report::change_rate(0, 0), 0.0);
    // exactly one decimal place, no float drift
    assert_eq!(report::change_rate(1_150_000, 1_000_000), 15.0);
    assert_eq!(report::change_rate(1_151_234, 1_000_000), 15.1);
}

#[test]
fn collaborator_expected_expense_by_payment_type() {
    let fixed = collaborator(1, "editor", PaymentType::Fixed, Some(500_000), None);
    assert_eq!(report::collaborator_expected_expense(&fixed, 1_000_000), 500_000);

    let pct = collaborator(2, "thumbnail", PaymentType::Percentage, None, Some(10.0));
    assert_eq!(report::collaborator_expected_expense(&pct, 1_000_000), 100_000);

    let hybrid = collaborator(3, "manager", PaymentType::Hybrid, Some(300_000), Some(5.0));
    assert_eq!(report::collaborator_expected_expense(&hybrid, 1_000_000), 350_000);

    let empty = collaborator(4, "mod", PaymentType::Fixed, None, None);
    assert_eq!(report::collaborator_expected_expense(&empty, 1_000_000), 0);
}

#[test]
fn annual_report_months_and_totals() {
    let incomes = vec![
        platform_income("2025-01-10", Platform::Soop, 100_000),
        platform_income("2025-02-20", Platform::Youtube, 200_000),
    ];
    let campaigns = vec![
        campaign("2025-02-15", 300_000, true),
        campaign("2025-03-01", 500_000, false), // unpaid never counts
    ];
    let collaborators = vec![collaborator(7, "editor-kim", PaymentType::Fixed, Some(50_000), None)];
    let expenses = vec![
        payroll_expense("2025-01-25", 50_000, true, Some(7), None),
        payroll_expense("2025-02-05", 70_000, false, Some(7), None),
        other_expense("2025-02-07", 20_000, true),
    ];

    let r = report::build_annual_report(2025, &incomes, &campaigns, &expenses, &collaborators);

    assert_eq!(r.monthly_summaries.len(), 12);
    let jan = &r.monthly_summaries[0];
    assert_eq!(jan.month, "2025-01");
    assert_eq!(jan.total_income, 100_000);
    assert_eq!(jan.total_expense, 50_000);
    assert_eq!(jan.net_income, 50_000);
    assert_eq!(jan.change_rate, 0.0); // no prior reference

    let feb = &r.monthly_summaries[1];
    assert_eq!(feb.total_income, 500_000);
    assert_eq!(feb.total_expense, 20_000);
    assert_eq!(feb.net_income, 480_000);
    // chained against January: (480000-50000)/50000 = 860%
    assert_eq!(feb.change_rate, 860.0);

    let mar = &r.monthly_summaries[2];
    assert_eq!(mar.total_income, 0);
    assert_eq!(mar.change_rate, -100.0);

    // year totals are the sum of the twelve months
    assert_eq!(
        r.total_income,
        r.monthly_summaries.iter().map(|m| m.total_income).sum::<i64>()
    );
    assert_eq!(r.total_income, 600_000);
    assert_eq!(r.total_expense, 70_000);
    assert_eq!(r.net_income, 530_000);
}

#[test]
fn annual_report_income_by_source_is_never_sparse() {
    let incomes = vec![platform_income("2025-06-01", Platform::Chzzk, 40_000)];
    let campaigns = vec![campaign("2025-06-02", 10_000, true)];
    let r = report::build_annual_report(2025, &incomes, &campaigns, &[], &[]);

    assert_eq!(r.income_by_source.chzzk, 40_000);
    assert_eq!(r.income_by_source.ad, 10_000);
    assert_eq!(r.income_by_source.youtube, 0);
    assert_eq!(r.income_by_source.soop, 0);
    assert_eq!(r.income_by_source.instagram, 0);
    assert_eq!(r.income_by_source.tiktok, 0);
    assert_eq!(r.income_by_source.other, 0);
}

#[test]
fn annual_report_groups_payroll_by_resolved_name() {
    let collaborators = vec![
        collaborator(1, "editor-kim", PaymentType::Fixed, Some(1), None),
        collaborator(2, "thumb-lee", PaymentType::Fixed, Some(1), None),
    ];
    let expenses = vec![
        payroll_expense("2025-01-10", 100_000, true, Some(1), None),
        payroll_expense("2025-02-10", 150_000, true, Some(1), None),
        payroll_expense("2025-01-15", 80_000, true, Some(2), None),
        // dangling reference falls back to the free-text description
        payroll_expense("2025-03-01", 30_000, true, Some(99), Some("freelancer")),
        // nothing to resolve at all
        payroll_expense("2025-03-02", 10_000, true, None, None),
        // unpaid payroll is invisible
        payroll_expense("2025-04-01", 999_999, false, Some(2), None),
    ];

    let r = report::build_annual_report(2025, &[], &[], &expenses, &collaborators);
    let names: Vec<(&str, i64)> = r
        .expense_by_collaborator
        .iter()
        .map(|c| (c.name.as_str(), c.amount))
        .collect();
    assert_eq!(
        names,
        vec![
            ("editor-kim", 250_000),
            ("thumb-lee", 80_000),
            ("freelancer", 30_000),
            ("unspecified", 10_000),
        ]
    );
}

#[test]
fn annual_report_is_idempotent_and_skips_malformed_dates() {
    let incomes = vec![
        platform_income("2025-05-05", Platform::Soop, 70_000),
        platform_income("not-a-date", Platform::Tiktok, 999),
    ];
    let r1 = report::build_annual_report(2025, &incomes, &[], &[], &[]);
    let r2 = report::build_annual_report(2025, &incomes, &[], &[], &[]);
    assert_eq!(r1, r2);

    // the malformed row belongs to no month
    assert_eq!(r1.total_income, 70_000);
    assert!(r1.monthly_summaries.iter().all(|m| m.total_income != 999));
    // but the source breakdown still sees it, like the input it came from
    assert_eq!(r1.income_by_source.tiktok, 999);
}

#[test]
fn dashboard_compares_against_prior_calendar_month() {
    let cur_incomes = vec![platform_income("2025-08-01", Platform::Soop, 1_200_000)];
    let prev_incomes = vec![platform_income("2025-07-01", Platform::Soop, 1_000_000)];
    let cur_expenses = vec![other_expense("2025-08-02", 200_000, true)];
    let prev_expenses = vec![other_expense("2025-07-02", 400_000, true)];

    let s = report::dashboard_summary(
        &cur_incomes,
        &[],
        &cur_expenses,
        &prev_incomes,
        &[],
        &prev_expenses,
    );
    assert_eq!(s.total_income, 1_200_000);
    assert_eq!(s.total_expense, 200_000);
    assert_eq!(s.net_income, 1_000_000);
    assert_eq!(s.previous_month_net_income, 600_000);
    assert_eq!(s.income_change_rate, 20.0);
    assert_eq!(s.expense_change_rate, -50.0);
    // (1_000_000 - 600_000) / 600_000 -> 66.7%
    assert_eq!(s.change_rate, 66.7);
}
