use crate::schema::{Invoice, InvoiceItem};
use crate::utils::format_currency;
use rust_decimal::Decimal;

impl InvoiceItem {
    pub fn line_total(&self) -> Decimal {
        Decimal::from(self.quantity) * self.unit_price
    }
}

impl Invoice {
    pub fn total(&self) -> Decimal {
        invoice_total(&self.items)
    }

    /// Rendered lines for the invoice preview: description, quantity, unit
    /// price and line total, followed by the grand total.
    pub fn preview_lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .items
            .iter()
            .map(|item| {
                format!(
                    "{} | {} x {} | {}",
                    item.description,
                    item.quantity,
                    format_currency(item.unit_price),
                    format_currency(item.line_total())
                )
            })
            .collect();
        lines.push(format!("Total: {}", format_currency(self.total())));
        lines
    }
}

pub fn invoice_total(items: &[InvoiceItem]) -> Decimal {
    items.iter().map(InvoiceItem::line_total).sum()
}
