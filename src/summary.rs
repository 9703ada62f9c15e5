use crate::schema::{Transaction, TransactionKind};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Headline figures shown on the dashboard cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FinancialSummary {
    pub total_revenue: Decimal,
    pub total_expenses: Decimal,
    pub net_profit: Decimal,
    pub count: usize,
}

impl FinancialSummary {
    /// Net profit as a percentage of revenue, rounded to two places.
    /// Zero when there is no revenue to measure against.
    pub fn net_profit_margin(&self) -> Decimal {
        if self.total_revenue <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        (self.net_profit / self.total_revenue * Decimal::ONE_HUNDRED).round_dp(2)
    }
}

pub fn summarize(transactions: &[Transaction]) -> FinancialSummary {
    let (total_revenue, total_expenses) = transactions.iter().fold(
        (Decimal::ZERO, Decimal::ZERO),
        |(revenue, expenses), tx| match tx.kind {
            TransactionKind::Revenue => (revenue + tx.amount, expenses),
            TransactionKind::Expense => (revenue, expenses + tx.amount),
        },
    );

    FinancialSummary {
        total_revenue,
        total_expenses,
        net_profit: total_revenue - total_expenses,
        count: transactions.len(),
    }
}
