use crate::error::{DashboardError, Result};
use crate::schema::Transaction;
use crate::utils::{first_of_month, month_label, next_month_start};
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// A calendar month, serialized as `YYYY-MM`. Ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthKey(NaiveDate);

impl MonthKey {
    pub fn from_date(date: NaiveDate) -> Self {
        MonthKey(first_of_month(date))
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.0
    }

    pub fn next(&self) -> Result<MonthKey> {
        next_month_start(self.0).map(MonthKey)
    }

    /// Axis label such as `Nov 2023`.
    pub fn label(&self) -> String {
        month_label(self.0)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for MonthKey {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self> {
        let start = format!("{}-01", s.trim());
        NaiveDate::parse_from_str(&start, "%Y-%m-%d")
            .map(MonthKey)
            .map_err(|_| {
                DashboardError::DateError(format!("Invalid month key '{}'. Expected YYYY-MM", s))
            })
    }
}

impl TryFrom<String> for MonthKey {
    type Error = DashboardError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<MonthKey> for String {
    fn from(key: MonthKey) -> Self {
        key.to_string()
    }
}

/// Net profit accumulated over one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthBucket {
    pub month: MonthKey,
    pub net_profit: Decimal,
}

/// Groups transactions by calendar month into a chronological net-profit series.
///
/// Every month holding at least one transaction yields a bucket, so a single
/// transaction produces a one-point series. Whether that is enough to chart is
/// decided by [`crate::forecast::profit_chart`].
pub fn build_monthly_series(transactions: &[Transaction]) -> Vec<MonthBucket> {
    let mut monthly: BTreeMap<MonthKey, Decimal> = BTreeMap::new();

    for tx in transactions {
        *monthly.entry(MonthKey::from_date(tx.date)).or_default() += tx.signed_amount();
    }

    monthly
        .into_iter()
        .map(|(month, net_profit)| MonthBucket { month, net_profit })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::TransactionKind;
    use crate::summary::summarize;
    use rust_decimal_macros::dec;

    fn tx(kind: TransactionKind, amount: Decimal, y: i32, m: u32, d: u32) -> Transaction {
        Transaction {
            id: 0,
            kind,
            description: "entry".to_string(),
            amount,
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
        }
    }

    #[test]
    fn test_month_key_format_and_parse() {
        let key = MonthKey::from_date(NaiveDate::from_ymd_opt(2024, 3, 17).unwrap());
        assert_eq!(key.to_string(), "2024-03");
        assert_eq!(key.label(), "Mar 2024");
        assert_eq!("2024-03".parse::<MonthKey>().unwrap(), key);
        assert!("2024-13".parse::<MonthKey>().is_err());
        assert!("March".parse::<MonthKey>().is_err());

        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"2024-03\"");
        let back: MonthKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
    }

    #[test]
    fn test_month_key_next_rolls_year() {
        let dec_key: MonthKey = "2023-12".parse().unwrap();
        assert_eq!(dec_key.next().unwrap().to_string(), "2024-01");
    }

    #[test]
    fn test_buckets_are_chronological_and_signed() {
        // Insertion order deliberately out of calendar order.
        let transactions = vec![
            tx(TransactionKind::Revenue, dec!(1500), 2024, 2, 5),
            tx(TransactionKind::Revenue, dec!(2500), 2023, 10, 15),
            tx(TransactionKind::Expense, dec!(50), 2023, 10, 20),
            tx(TransactionKind::Expense, dec!(120), 2024, 2, 10),
            tx(TransactionKind::Expense, dec!(550), 2024, 3, 1),
        ];

        let series = build_monthly_series(&transactions);
        let keys: Vec<String> = series.iter().map(|b| b.month.to_string()).collect();
        assert_eq!(keys, vec!["2023-10", "2024-02", "2024-03"]);

        assert_eq!(series[0].net_profit, dec!(2450));
        assert_eq!(series[1].net_profit, dec!(1380));
        assert_eq!(series[2].net_profit, dec!(-550));
    }

    #[test]
    fn test_month_boundaries_use_calendar_date() {
        let transactions = vec![
            tx(TransactionKind::Revenue, dec!(10), 2024, 1, 31),
            tx(TransactionKind::Revenue, dec!(20), 2024, 2, 1),
        ];
        let series = build_monthly_series(&transactions);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].net_profit, dec!(10));
        assert_eq!(series[1].net_profit, dec!(20));
    }

    #[test]
    fn test_single_transaction_yields_single_bucket() {
        let transactions = vec![tx(TransactionKind::Revenue, dec!(1000), 2024, 3, 9)];
        let series = build_monthly_series(&transactions);
        assert_eq!(series.len(), 1);
        assert!(build_monthly_series(&[]).is_empty());
    }

    #[test]
    fn test_buckets_sum_to_net_profit() {
        let transactions = vec![
            tx(TransactionKind::Revenue, dec!(2500), 2023, 10, 15),
            tx(TransactionKind::Expense, dec!(50.25), 2023, 10, 20),
            tx(TransactionKind::Revenue, dec!(1200), 2023, 11, 5),
            tx(TransactionKind::Expense, dec!(150), 2023, 11, 10),
            tx(TransactionKind::Expense, dec!(500), 2023, 12, 1),
        ];

        let total: Decimal = build_monthly_series(&transactions)
            .iter()
            .map(|b| b.net_profit)
            .sum();
        assert_eq!(total, summarize(&transactions).net_profit);
        assert_eq!(
            build_monthly_series(&transactions),
            build_monthly_series(&transactions)
        );
    }
}
