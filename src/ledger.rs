//! Append-only store of transactions and invoices.
//!
//! The ledger is the single source of truth for every derived metric. Records are
//! validated on the way in and never mutated afterwards; readers borrow slices in
//! insertion order.

use crate::config::InvoiceConfig;
use crate::error::{DashboardError, Result};
use crate::schema::{Invoice, NewInvoice, Transaction, TransactionKind, MAX_AMOUNT};
use crate::utils::{first_of_month, last_day_of_month, parse_date};
use chrono::NaiveDate;
use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub struct Ledger {
    transactions: Vec<Transaction>,
    invoices: Vec<Invoice>,
    next_id: u64,
    numbering: InvoiceConfig,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    pub fn new() -> Self {
        Self::with_invoice_numbering(InvoiceConfig::default())
    }

    pub fn with_invoice_numbering(numbering: InvoiceConfig) -> Self {
        Self {
            transactions: Vec::new(),
            invoices: Vec::new(),
            next_id: 1,
            numbering,
        }
    }

    pub fn add_transaction(
        &mut self,
        kind: TransactionKind,
        description: &str,
        amount: Decimal,
        date: &str,
    ) -> Result<&Transaction> {
        let description = description.trim();
        if description.is_empty() {
            return Err(DashboardError::validation(
                "description",
                "Description must not be empty",
            ));
        }
        if amount <= Decimal::ZERO {
            return Err(DashboardError::validation(
                "amount",
                format!("Amount must be positive, got {}", amount),
            ));
        }
        if amount > MAX_AMOUNT {
            return Err(DashboardError::validation(
                "amount",
                format!("Amount {} exceeds the maximum of {}", amount, MAX_AMOUNT),
            ));
        }
        let date = parse_date(date, "date")?;

        let transaction = Transaction {
            id: self.allocate_id(),
            kind,
            description: description.to_string(),
            amount,
            date,
        };
        debug!(
            "Recorded {} #{} of {} on {}",
            transaction.kind, transaction.id, transaction.amount, transaction.date
        );

        self.transactions.push(transaction);
        Ok(&self.transactions[self.transactions.len() - 1])
    }

    pub fn add_invoice(&mut self, invoice: NewInvoice) -> Result<&Invoice> {
        if invoice.items.is_empty() {
            return Err(DashboardError::validation(
                "items",
                "An invoice needs at least one line item",
            ));
        }
        for (idx, item) in invoice.items.iter().enumerate() {
            if item.unit_price < Decimal::ZERO {
                return Err(DashboardError::validation(
                    "items",
                    format!(
                        "Line item #{} '{}' has negative unit price {}",
                        idx, item.description, item.unit_price
                    ),
                ));
            }
            if item.unit_price > MAX_AMOUNT || item.line_total() > MAX_AMOUNT {
                return Err(DashboardError::validation(
                    "items",
                    format!(
                        "Line item #{} '{}' exceeds the maximum line total of {}",
                        idx, item.description, MAX_AMOUNT
                    ),
                ));
            }
        }
        let issue_date = parse_date(&invoice.issue_date, "issue_date")?;
        let due_date = parse_date(&invoice.due_date, "due_date")?;

        let number = self.numbering.format_number(self.invoices.len());
        let record = Invoice {
            id: self.allocate_id(),
            number,
            client_name: invoice.client_name,
            client_address: invoice.client_address,
            issue_date,
            due_date,
            items: invoice.items,
        };
        debug!(
            "Recorded invoice {} for '{}' with {} line items",
            record.number,
            record.client_name,
            record.items.len()
        );

        self.invoices.push(record);
        Ok(&self.invoices[self.invoices.len() - 1])
    }

    /// All transactions in insertion order.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// All invoices in insertion order.
    pub fn invoices(&self) -> &[Invoice] {
        &self.invoices
    }

    pub fn filter(&self, filter: &TransactionFilter) -> Vec<&Transaction> {
        self.transactions
            .iter()
            .filter(|tx| filter.matches(tx))
            .collect()
    }

    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

/// Criteria for narrowing the transaction list. Date bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionFilter {
    pub kind: Option<TransactionKind>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl TransactionFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn kind(kind: TransactionKind) -> Self {
        Self {
            kind: Some(kind),
            ..Self::default()
        }
    }

    /// Every transaction dated within the calendar month containing `date`.
    pub fn month_of(date: NaiveDate) -> Result<Self> {
        Ok(Self {
            kind: None,
            start: Some(first_of_month(date)),
            end: Some(last_day_of_month(date)?),
        })
    }

    /// Builds a filter from the raw form fields; empty strings mean "unbounded".
    pub fn from_form(kind: Option<TransactionKind>, start: &str, end: &str) -> Result<Self> {
        let parse_bound = |value: &str, field: &str| -> Result<Option<NaiveDate>> {
            if value.trim().is_empty() {
                Ok(None)
            } else {
                parse_date(value, field).map(Some)
            }
        };

        Ok(Self {
            kind,
            start: parse_bound(start, "start")?,
            end: parse_bound(end, "end")?,
        })
    }

    pub fn matches(&self, tx: &Transaction) -> bool {
        if self.kind.is_some_and(|kind| kind != tx.kind) {
            return false;
        }
        if self.start.is_some_and(|start| tx.date < start) {
            return false;
        }
        if self.end.is_some_and(|end| tx.date > end) {
            return false;
        }
        true
    }
}

/// The `limit` most recent transactions, newest first. Transactions sharing a
/// date stay in the order they were recorded.
pub fn recent_transactions(transactions: &[Transaction], limit: usize) -> Vec<&Transaction> {
    let mut ordered: Vec<&Transaction> = transactions.iter().collect();
    ordered.sort_by(|a, b| b.date.cmp(&a.date));
    ordered.truncate(limit);
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::InvoiceItem;
    use rust_decimal_macros::dec;

    fn sample_invoice(client: &str) -> NewInvoice {
        NewInvoice {
            client_name: client.to_string(),
            client_address: "12 Harbour Street".to_string(),
            issue_date: "2024-03-01".to_string(),
            due_date: "2024-03-31".to_string(),
            items: vec![
                InvoiceItem::new("Design work", 2, dec!(100)),
                InvoiceItem::new("Hosting", 1, dec!(50)),
            ],
        }
    }

    #[test]
    fn test_add_transaction_assigns_ids_in_order() {
        let mut ledger = Ledger::new();
        let first = ledger
            .add_transaction(TransactionKind::Revenue, "Consulting", dec!(1200), "2023-11-05")
            .unwrap()
            .id;
        let second = ledger
            .add_transaction(TransactionKind::Expense, "Supplies", dec!(150), "2023-11-10")
            .unwrap()
            .id;

        assert!(second > first);
        assert_eq!(ledger.transactions().len(), 2);
        assert_eq!(ledger.transactions()[0].description, "Consulting");
        assert_eq!(ledger.transactions()[1].kind, TransactionKind::Expense);
    }

    #[test]
    fn test_add_transaction_rejects_bad_input() {
        let mut ledger = Ledger::new();

        let zero = ledger.add_transaction(TransactionKind::Revenue, "Sale", dec!(0), "2024-01-01");
        assert!(matches!(
            zero,
            Err(DashboardError::ValidationError { ref field, .. }) if field == "amount"
        ));

        let negative =
            ledger.add_transaction(TransactionKind::Expense, "Refund", dec!(-5), "2024-01-01");
        assert!(negative.unwrap_err().is_validation());

        let blank = ledger.add_transaction(TransactionKind::Revenue, "   ", dec!(10), "2024-01-01");
        assert!(matches!(
            blank,
            Err(DashboardError::ValidationError { ref field, .. }) if field == "description"
        ));

        let bad_date =
            ledger.add_transaction(TransactionKind::Revenue, "Sale", dec!(10), "2024-13-01");
        assert!(bad_date.unwrap_err().is_validation());

        assert!(ledger.transactions().is_empty());
    }

    #[test]
    fn test_amounts_are_capped_so_totals_stay_in_range() {
        let mut ledger = Ledger::new();
        let too_large =
            ledger.add_transaction(TransactionKind::Revenue, "Windfall", Decimal::MAX, "2024-01-01");
        assert!(matches!(
            too_large,
            Err(DashboardError::ValidationError { ref field, .. }) if field == "amount"
        ));
        let just_over = MAX_AMOUNT + dec!(0.01);
        assert!(ledger
            .add_transaction(TransactionKind::Revenue, "Windfall", just_over, "2024-01-01")
            .is_err());
        assert!(ledger.transactions().is_empty());

        for _ in 0..3 {
            ledger
                .add_transaction(TransactionKind::Revenue, "Windfall", MAX_AMOUNT, "2024-01-01")
                .unwrap();
        }
        let summary = crate::summary::summarize(ledger.transactions());
        assert_eq!(summary.total_revenue, MAX_AMOUNT * dec!(3));
        let series = crate::timeseries::build_monthly_series(ledger.transactions());
        assert_eq!(series[0].net_profit, MAX_AMOUNT * dec!(3));
    }

    #[test]
    fn test_invoice_lines_are_capped() {
        let mut ledger = Ledger::new();

        let mut huge_price = sample_invoice("Acme");
        huge_price.items[0].unit_price = Decimal::MAX;
        assert!(ledger.add_invoice(huge_price).unwrap_err().is_validation());

        let mut huge_line = sample_invoice("Acme");
        huge_line.items[0] = InvoiceItem::new("Bulk order", u32::MAX, MAX_AMOUNT);
        assert!(ledger.add_invoice(huge_line).unwrap_err().is_validation());

        assert!(ledger.invoices().is_empty());
    }

    #[test]
    fn test_invoice_numbering_is_sequential() {
        let mut ledger = Ledger::new();
        for n in 1..=3 {
            let invoice = ledger.add_invoice(sample_invoice("Acme")).unwrap();
            assert_eq!(invoice.number, format!("INV-{}", 1000 + n));
        }
    }

    #[test]
    fn test_invoice_numbering_respects_config() {
        let mut ledger = Ledger::with_invoice_numbering(InvoiceConfig {
            number_prefix: "Q-".to_string(),
            first_number: 1,
        });
        assert_eq!(ledger.add_invoice(sample_invoice("A")).unwrap().number, "Q-1");
        assert_eq!(ledger.add_invoice(sample_invoice("B")).unwrap().number, "Q-2");
    }

    #[test]
    fn test_add_invoice_validation() {
        let mut ledger = Ledger::new();

        let mut empty = sample_invoice("Acme");
        empty.items.clear();
        assert!(ledger.add_invoice(empty).unwrap_err().is_validation());

        let mut negative = sample_invoice("Acme");
        negative.items[1].unit_price = dec!(-1);
        assert!(ledger.add_invoice(negative).unwrap_err().is_validation());

        let mut bad_due = sample_invoice("Acme");
        bad_due.due_date = "soon".to_string();
        assert!(matches!(
            ledger.add_invoice(bad_due),
            Err(DashboardError::ValidationError { ref field, .. }) if field == "due_date"
        ));

        // Rejected invoices must not consume a number.
        let accepted = ledger.add_invoice(sample_invoice("Acme")).unwrap();
        assert_eq!(accepted.number, "INV-1001");
    }

    #[test]
    fn test_zero_priced_item_is_allowed() {
        let mut ledger = Ledger::new();
        let mut invoice = sample_invoice("Acme");
        invoice.items.push(InvoiceItem::new("Goodwill discount call", 1, dec!(0)));
        assert_eq!(ledger.add_invoice(invoice).unwrap().items.len(), 3);
    }

    #[test]
    fn test_filter_by_kind_and_range() {
        let mut ledger = Ledger::new();
        ledger
            .add_transaction(TransactionKind::Revenue, "A", dec!(10), "2024-01-31")
            .unwrap();
        ledger
            .add_transaction(TransactionKind::Expense, "B", dec!(20), "2024-02-01")
            .unwrap();
        ledger
            .add_transaction(TransactionKind::Revenue, "C", dec!(30), "2024-02-29")
            .unwrap();
        ledger
            .add_transaction(TransactionKind::Revenue, "D", dec!(40), "2024-03-01")
            .unwrap();

        let revenue = ledger.filter(&TransactionFilter::kind(TransactionKind::Revenue));
        assert_eq!(revenue.len(), 3);

        let feb = TransactionFilter::month_of(NaiveDate::from_ymd_opt(2024, 2, 14).unwrap())
            .unwrap();
        let in_feb = ledger.filter(&feb);
        let names: Vec<&str> = in_feb.iter().map(|tx| tx.description.as_str()).collect();
        assert_eq!(names, vec!["B", "C"]);

        let form = TransactionFilter::from_form(Some(TransactionKind::Revenue), "", "2024-02-29")
            .unwrap();
        assert_eq!(ledger.filter(&form).len(), 2);

        assert_eq!(ledger.filter(&TransactionFilter::all()).len(), 4);
        assert!(TransactionFilter::from_form(None, "yesterday", "").is_err());
    }

    #[test]
    fn test_recent_transactions_newest_first() {
        let mut ledger = Ledger::new();
        ledger
            .add_transaction(TransactionKind::Revenue, "old", dec!(1), "2023-10-15")
            .unwrap();
        ledger
            .add_transaction(TransactionKind::Revenue, "newest", dec!(1), "2024-03-01")
            .unwrap();
        ledger
            .add_transaction(TransactionKind::Expense, "middle-a", dec!(1), "2024-01-20")
            .unwrap();
        ledger
            .add_transaction(TransactionKind::Expense, "middle-b", dec!(1), "2024-01-20")
            .unwrap();

        let recent = recent_transactions(ledger.transactions(), 3);
        let names: Vec<&str> = recent.iter().map(|tx| tx.description.as_str()).collect();
        assert_eq!(names, vec!["newest", "middle-a", "middle-b"]);

        assert!(recent_transactions(&[], 5).is_empty());
    }
}
