use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money coming in (sales, fees, services rendered)
    Revenue,
    /// Money going out (subscriptions, supplies, marketing)
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Revenue => "revenue",
            TransactionKind::Expense => "expense",
        }
    }

    /// Sign applied to an amount when folding it into net profit.
    pub fn signed(&self, amount: Decimal) -> Decimal {
        match self {
            TransactionKind::Revenue => amount,
            TransactionKind::Expense => -amount,
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Largest amount the ledger accepts for a transaction or an invoice line,
/// one quadrillion currency units. Keeps every fold over ledger records well
/// inside the `Decimal` range.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

/// A single revenue or expense entry. Immutable once recorded in the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: u64,
    pub kind: TransactionKind,
    pub description: String,
    /// Strictly positive and at most [`MAX_AMOUNT`]; the direction comes from `kind`.
    pub amount: Decimal,
    pub date: NaiveDate,
}

impl Transaction {
    pub fn signed_amount(&self) -> Decimal {
        self.kind.signed(self.amount)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceItem {
    pub description: String,
    pub quantity: u32,
    pub unit_price: Decimal,
}

impl InvoiceItem {
    pub fn new(description: impl Into<String>, quantity: u32, unit_price: Decimal) -> Self {
        Self {
            description: description.into(),
            quantity,
            unit_price,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: u64,
    /// Display sequence such as `INV-1001`, assigned when the invoice is recorded.
    pub number: String,
    pub client_name: String,
    pub client_address: String,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub items: Vec<InvoiceItem>,
}

/// Invoice as submitted from the invoice form, before the ledger assigns id and number.
/// Dates are kept as the raw `YYYY-MM-DD` strings and validated on insertion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewInvoice {
    pub client_name: String,
    pub client_address: String,
    pub issue_date: String,
    pub due_date: String,
    pub items: Vec<InvoiceItem>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_kind_serializes_lowercase() {
        let json = serde_json::to_string(&TransactionKind::Revenue).unwrap();
        assert_eq!(json, "\"revenue\"");

        let kind: TransactionKind = serde_json::from_str("\"expense\"").unwrap();
        assert_eq!(kind, TransactionKind::Expense);
    }

    #[test]
    fn test_signed_amount() {
        let tx = Transaction {
            id: 1,
            kind: TransactionKind::Expense,
            description: "Office Supplies".to_string(),
            amount: dec!(150),
            date: NaiveDate::from_ymd_opt(2023, 11, 10).unwrap(),
        };
        assert_eq!(tx.signed_amount(), dec!(-150));
        assert_eq!(TransactionKind::Revenue.signed(dec!(42.5)), dec!(42.5));
    }

    #[test]
    fn test_transaction_json_shape() {
        let json = r#"{
            "id": 7,
            "kind": "revenue",
            "description": "Website Design Project",
            "amount": "2800",
            "date": "2024-01-15"
        }"#;

        let tx: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx.kind, TransactionKind::Revenue);
        assert_eq!(tx.amount, dec!(2800));
        assert_eq!(tx.date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
    }

    #[test]
    fn test_max_amount() {
        assert_eq!(MAX_AMOUNT, dec!(1_000_000_000_000_000));
    }
}
