//! Derived budget figures. Nothing here is stored; everything is recomputed
//! from [`BudgetData`] on demand.

use serde::Serialize;

use crate::budget::models::BudgetData;

/// Share of net income assumed to go to taxes and deductions.
const NET_TO_GROSS_FACTOR: f64 = 0.7;
const HEALTHY_MAX_PCT: f64 = 70.0;
const WARNING_MAX_PCT: f64 = 90.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GaugeStatus {
    Healthy,
    Warning,
    Danger,
}

impl GaugeStatus {
    pub fn label(self) -> &'static str {
        match self {
            GaugeStatus::Healthy => "Sain",
            GaugeStatus::Warning => "Avertissement",
            GaugeStatus::Danger => "Danger",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Gauge {
    /// Expense ratio clamped to [0, 100].
    pub value_pct: f64,
    pub status: GaugeStatus,
    pub label: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryShare {
    pub label: &'static str,
    pub amount: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct BudgetSummary {
    pub total_expenses: f64,
    pub total_startup_costs: f64,
    pub balance: f64,
    pub gross_annual_required: f64,
    /// Unclamped `total_expenses / income * 100`; 0 when income is 0.
    pub expense_ratio_pct: f64,
    pub gauge: Gauge,
    pub categories: Vec<CategoryShare>,
}

pub fn total_expenses(budget: &BudgetData) -> f64 {
    category_totals(budget).iter().map(|(_, v)| v).sum()
}

fn category_totals(budget: &BudgetData) -> [(&'static str, f64); 6] {
    let e = &budget.expenses;
    [
        ("Logement", e.housing.total()),
        ("Alimentation", e.food.total()),
        ("Transport", e.transport.total()),
        ("Communications", e.communications.total()),
        ("Vie quotidienne", e.daily_life.total()),
        ("Épargne", e.emergency),
    ]
}

pub fn expense_ratio_pct(total_expenses: f64, income: f64) -> f64 {
    if income > 0.0 {
        total_expenses / income * 100.0
    } else {
        0.0
    }
}

pub fn gauge(ratio_pct: f64) -> Gauge {
    let value_pct = ratio_pct.clamp(0.0, 100.0);
    let status = if value_pct <= HEALTHY_MAX_PCT {
        GaugeStatus::Healthy
    } else if value_pct <= WARNING_MAX_PCT {
        GaugeStatus::Warning
    } else {
        GaugeStatus::Danger
    };
    Gauge {
        value_pct,
        status,
        label: status.label(),
    }
}

pub fn summarize(budget: &BudgetData) -> BudgetSummary {
    let totals = category_totals(budget);
    let total_expenses: f64 = totals.iter().map(|(_, v)| v).sum();
    let ratio = expense_ratio_pct(total_expenses, budget.income);

    BudgetSummary {
        total_expenses,
        total_startup_costs: budget.startup_costs.total(),
        balance: budget.income - total_expenses,
        gross_annual_required: total_expenses * 12.0 / NET_TO_GROSS_FACTOR,
        expense_ratio_pct: ratio,
        gauge: gauge(ratio),
        categories: totals
            .into_iter()
            .filter(|(_, amount)| *amount > 0.0)
            .map(|(label, amount)| CategoryShare { label, amount })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn budget_with(income: f64, rent: f64, groceries: f64) -> BudgetData {
        let mut budget = BudgetData::default();
        budget.income = income;
        budget.expenses.housing.rent = rent;
        budget.expenses.food.groceries = groceries;
        budget
    }

    #[test]
    fn test_balance_and_ratio() {
        let summary = summarize(&budget_with(2000.0, 1000.0, 500.0));
        assert_eq!(summary.total_expenses, 1500.0);
        assert_eq!(summary.balance, 500.0);
        assert!((summary.expense_ratio_pct - 75.0).abs() < 1e-9);
        assert!((summary.gauge.value_pct - 75.0).abs() < 1e-9);
        assert_eq!(summary.gauge.status, GaugeStatus::Warning);
    }

    #[test]
    fn test_emergency_counts_toward_expenses() {
        let mut budget = budget_with(1000.0, 0.0, 0.0);
        budget.expenses.emergency = 100.0;
        assert_eq!(total_expenses(&budget), 100.0);
    }

    #[test]
    fn test_zero_income_ratio_is_zero() {
        let summary = summarize(&budget_with(0.0, 800.0, 0.0));
        assert_eq!(summary.expense_ratio_pct, 0.0);
        assert_eq!(summary.balance, -800.0);
    }

    #[test]
    fn test_gauge_thresholds() {
        assert_eq!(gauge(70.0).status, GaugeStatus::Healthy);
        assert_eq!(gauge(70.5).status, GaugeStatus::Warning);
        assert_eq!(gauge(90.0).status, GaugeStatus::Warning);
        assert_eq!(gauge(140.0).status, GaugeStatus::Danger);
        assert_eq!(gauge(140.0).value_pct, 100.0);
    }

    #[test]
    fn test_gross_annual_required() {
        let summary = summarize(&budget_with(3000.0, 700.0, 0.0));
        assert!((summary.gross_annual_required - 12_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_categories_skip_empty() {
        let summary = summarize(&budget_with(2000.0, 900.0, 0.0));
        assert_eq!(summary.categories.len(), 1);
        assert_eq!(summary.categories[0].label, "Logement");
    }

    #[test]
    fn test_startup_costs_total() {
        let mut budget = BudgetData::default();
        budget.startup_costs.deposit = 500.0;
        budget.startup_costs.moving = 250.0;
        assert_eq!(summarize(&budget).total_startup_costs, 750.0);
    }
}
