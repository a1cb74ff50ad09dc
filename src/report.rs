// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Aggregation and reporting engine. Pure derivations over record slices:
//! no I/O, no hidden state, identical inputs always produce identical
//! output. Callers (the command layer) fetch the records and hand them in.
//!
//! Campaigns and expenses are cash-basis: they count only while `is_paid`
//! is set, regardless of date. Month membership is a `YYYY-MM` prefix
//! match on the date string, so a malformed date simply belongs to no
//! month rather than sinking the whole report.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::{
    Campaign, Collaborator, Expense, ExpenseType, Income, IncomeKind, PaymentType, Platform,
};

/// Platform-type income plus paid campaigns. Unpaid campaigns are
/// expected-but-not-received money and never inflate realized income.
pub fn total_income(incomes: &[Income], campaigns: &[Campaign]) -> i64 {
    let platform: i64 = incomes
        .iter()
        .filter(|i| i.r#type == IncomeKind::Platform)
        .map(|i| i.amount)
        .sum();
    let ads: i64 = campaigns
        .iter()
        .filter(|c| c.is_paid)
        .map(|c| c.amount)
        .sum();
    platform + ads
}

/// Paid expenses only, same gating as campaigns.
pub fn total_expense(expenses: &[Expense]) -> i64 {
    expenses
        .iter()
        .filter(|e| e.is_paid)
        .map(|e| e.amount)
        .sum()
}

pub fn net_income(total_income: i64, total_expense: i64) -> i64 {
    total_income - total_expense
}

/// Percentage change vs the prior period, to exactly one decimal place.
///
/// Growth from zero reports 100 (or 0 if still zero). Otherwise the rate
/// is `round(((current - previous) / previous) * 1000) / 10`, computed
/// with scaled integer arithmetic so results reproduce exactly; rounding
/// a float quotient drifts on edge cases. Halves round toward positive
/// infinity.
pub fn change_rate(current: i64, previous: i64) -> f64 {
    if previous == 0 {
        return if current > 0 { 100.0 } else { 0.0 };
    }
    let mut num = (current - previous) as i128 * 1000;
    let mut den = previous as i128;
    if den < 0 {
        num = -num;
        den = -den;
    }
    let tenths = (2 * num + den).div_euclid(2 * den);
    tenths as f64 / 10.0
}

/// Expected payroll for one collaborator given a period's realized
/// income. Not tied to any persisted expense row; this is the "what you
/// will owe" preview. Missing base/percentage fields count as zero.
pub fn collaborator_expected_expense(collaborator: &Collaborator, period_income: i64) -> i64 {
    let base = collaborator.base_amount.unwrap_or(0);
    let share =
        (period_income as f64 * collaborator.percentage.unwrap_or(0.0) / 100.0).floor() as i64;
    match collaborator.payment_type {
        PaymentType::Fixed => base,
        PaymentType::Percentage => share,
        PaymentType::Hybrid => base + share,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlySummary {
    pub month: String, // YYYY-MM
    pub total_income: i64,
    pub total_expense: i64,
    pub net_income: i64,
    /// Chained: net income vs the previous entry in the same report.
    pub change_rate: f64,
}

/// Fixed-key income breakdown; zero-contribution keys stay at 0 so the
/// presentation layer never sees a sparse map.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct IncomeBySource {
    pub youtube: i64,
    pub soop: i64,
    pub chzzk: i64,
    pub instagram: i64,
    pub tiktok: i64,
    pub other: i64,
    pub ad: i64,
}

impl IncomeBySource {
    fn add_platform(&mut self, platform: Platform, amount: i64) {
        match platform {
            Platform::Youtube => self.youtube += amount,
            Platform::Soop => self.soop += amount,
            Platform::Chzzk => self.chzzk += amount,
            Platform::Instagram => self.instagram += amount,
            Platform::Tiktok => self.tiktok += amount,
            Platform::Other => self.other += amount,
        }
    }

    pub fn get(&self, platform: Platform) -> i64 {
        match platform {
            Platform::Youtube => self.youtube,
            Platform::Soop => self.soop,
            Platform::Chzzk => self.chzzk,
            Platform::Instagram => self.instagram,
            Platform::Tiktok => self.tiktok,
            Platform::Other => self.other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollaboratorExpense {
    pub name: String,
    pub amount: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnualReport {
    pub year: i32,
    pub total_income: i64,
    pub total_expense: i64,
    pub net_income: i64,
    pub income_by_source: IncomeBySource,
    pub expense_by_collaborator: Vec<CollaboratorExpense>,
    pub monthly_summaries: Vec<MonthlySummary>,
}

/// Current month vs the prior calendar month, each period fetched
/// independently. A distinct comparison basis from the chained
/// month-over-month rate inside [`AnnualReport`]; the two are kept apart
/// on purpose.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub total_income: i64,
    pub total_expense: i64,
    pub net_income: i64,
    pub previous_month_net_income: i64,
    pub change_rate: f64,
    pub income_change_rate: f64,
    pub expense_change_rate: f64,
}

pub fn dashboard_summary(
    incomes: &[Income],
    campaigns: &[Campaign],
    expenses: &[Expense],
    prev_incomes: &[Income],
    prev_campaigns: &[Campaign],
    prev_expenses: &[Expense],
) -> DashboardSummary {
    let income = total_income(incomes, campaigns);
    let expense = total_expense(expenses);
    let net = net_income(income, expense);

    let prev_income = total_income(prev_incomes, prev_campaigns);
    let prev_expense = total_expense(prev_expenses);
    let prev_net = net_income(prev_income, prev_expense);

    DashboardSummary {
        total_income: income,
        total_expense: expense,
        net_income: net,
        previous_month_net_income: prev_net,
        change_rate: change_rate(net, prev_net),
        income_change_rate: change_rate(income, prev_income),
        expense_change_rate: change_rate(expense, prev_expense),
    }
}

/// Derives the full year view from the year's record set. Recomputed on
/// demand, never persisted. The input slices are expected to be scoped
/// to `year` by the caller's query; rows whose dates fall outside every
/// month of the year contribute nothing to the monthly summaries.
pub fn build_annual_report(
    year: i32,
    incomes: &[Income],
    campaigns: &[Campaign],
    expenses: &[Expense],
    collaborators: &[Collaborator],
) -> AnnualReport {
    let mut monthly_summaries: Vec<MonthlySummary> = Vec::with_capacity(12);

    for month in 1..=12u32 {
        let prefix = format!("{year}-{month:02}");

        let month_income: i64 = incomes
            .iter()
            .filter(|i| i.r#type == IncomeKind::Platform && i.date.starts_with(&prefix))
            .map(|i| i.amount)
            .sum::<i64>()
            + campaigns
                .iter()
                .filter(|c| {
                    c.is_paid && c.payment_date.as_deref().is_some_and(|d| d.starts_with(&prefix))
                })
                .map(|c| c.amount)
                .sum::<i64>();

        let month_expense: i64 = expenses
            .iter()
            .filter(|e| e.is_paid && e.date.starts_with(&prefix))
            .map(|e| e.amount)
            .sum();

        let month_net = net_income(month_income, month_expense);

        // Chained vs the previous entry; January has no prior reference.
        let rate = match monthly_summaries.last() {
            Some(prev) => change_rate(month_net, prev.net_income),
            None => 0.0,
        };

        monthly_summaries.push(MonthlySummary {
            month: prefix,
            total_income: month_income,
            total_expense: month_expense,
            net_income: month_net,
            change_rate: rate,
        });
    }

    let mut income_by_source = IncomeBySource::default();
    for income in incomes {
        if income.r#type == IncomeKind::Platform {
            if let Some(source) = income.source {
                income_by_source.add_platform(source, income.amount);
            }
        }
    }
    for campaign in campaigns.iter().filter(|c| c.is_paid) {
        income_by_source.ad += campaign.amount;
    }

    // BTreeMap keeps grouping deterministic; ties in the final sort fall
    // back to name order so identical inputs yield identical reports.
    let mut by_collaborator: BTreeMap<String, i64> = BTreeMap::new();
    for expense in expenses
        .iter()
        .filter(|e| e.is_paid && e.r#type == ExpenseType::Collaborator)
    {
        let name = expense
            .collaborator_id
            .and_then(|id| collaborators.iter().find(|c| c.id == id))
            .map(|c| c.name.clone())
            .or_else(|| expense.description.clone())
            .unwrap_or_else(|| "unspecified".to_string());
        *by_collaborator.entry(name).or_insert(0) += expense.amount;
    }
    let mut expense_by_collaborator: Vec<CollaboratorExpense> = by_collaborator
        .into_iter()
        .map(|(name, amount)| CollaboratorExpense { name, amount })
        .collect();
    expense_by_collaborator.sort_by(|a, b| b.amount.cmp(&a.amount));

    let total_income: i64 = monthly_summaries.iter().map(|m| m.total_income).sum();
    let total_expense: i64 = monthly_summaries.iter().map(|m| m.total_expense).sum();

    AnnualReport {
        year,
        total_income,
        total_expense,
        net_income: net_income(total_income, total_expense),
        income_by_source,
        expense_by_collaborator,
        monthly_summaries,
    }
}
