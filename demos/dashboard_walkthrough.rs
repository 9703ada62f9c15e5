use business_dashboard_core::*;
use rust_decimal_macros::dec;
use std::error::Error;

fn main() -> std::result::Result<(), Box<dyn Error>> {
    println!("📊 Business Dashboard Walkthrough");
    println!("═══════════════════════════════════════════════════════════════\n");

    // 1. Seed the ledger
    let mut dashboard = Dashboard::with_sample_data()?;
    dashboard.add_transaction(
        TransactionKind::Revenue,
        "Logo Refresh",
        dec!(950),
        "2024-03-12",
    )?;

    let summary = dashboard.summary();
    println!("💰 Summary ({} transactions)", summary.count);
    println!("   Revenue:  {}", format_currency(summary.total_revenue));
    println!("   Expenses: {}", format_currency(summary.total_expenses));
    println!("   Net:      {}", format_currency(summary.net_profit));
    println!("   Margin:   {}%\n", summary.net_profit_margin());

    // 2. Profit history and projection
    println!("📈 Monthly profit");
    for point in dashboard.profit_chart()? {
        let actual = point.actual.map(format_currency).unwrap_or_default();
        let predicted = point.predicted.map(format_currency).unwrap_or_default();
        println!("   {:<9} {:>12} {:>12}", point.label, actual, predicted);
    }
    println!();

    println!("🕒 Recent transactions");
    for tx in dashboard.recent_transactions() {
        println!(
            "   {} {:<8} {:<24} {}",
            tx.date,
            tx.kind,
            tx.description,
            format_currency(tx.amount)
        );
    }
    println!();

    // 3. Break-even
    let inputs = BreakEvenInputs::parse("5000", "15", "40")?;
    let result = break_even(&inputs)?;
    println!(
        "⚖️  Break-even: {} units ({})\n",
        result.units,
        format_currency(result.revenue)
    );

    // 4. Invoice
    let invoice = dashboard.add_invoice(NewInvoice {
        client_name: "Harbour Bakery".to_string(),
        client_address: "12 Harbour Street".to_string(),
        issue_date: "2024-03-15".to_string(),
        due_date: "2024-04-14".to_string(),
        items: vec![
            InvoiceItem::new("Website redesign", 1, dec!(1800)),
            InvoiceItem::new("Hosting (months)", 12, dec!(25)),
        ],
    })?;
    println!("🧾 Invoice {} for {}", invoice.number, invoice.client_name);
    for line in invoice.preview_lines() {
        println!("   {}", line);
    }

    Ok(())
}
