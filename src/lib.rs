//! # Business Dashboard Core
//!
//! The computational core of a small-business financial dashboard: an
//! append-only ledger of transactions and invoices, the metrics derived from
//! it, and a boundary to a generative-AI service for qualitative insights.
//!
//! ## Core Concepts
//!
//! - **Ledger**: Validated, insertion-ordered records; the only mutable state
//! - **Summary**: Total revenue, total expenses and net profit over any slice
//! - **Monthly Series**: Net profit bucketed by calendar month, ascending
//! - **Projection**: A fixed-rate trend extension of the monthly series
//! - **Insights**: Provider-backed recommendations, reports and analyses that
//!   never feed back into the deterministic metrics
//!
//! ## Example
//!
//! ```rust,ignore
//! use business_dashboard_core::*;
//! use rust_decimal_macros::dec;
//!
//! let mut dashboard = Dashboard::new(DashboardConfig::default())?;
//! dashboard.add_transaction(TransactionKind::Revenue, "Consulting", dec!(1500), "2024-02-05")?;
//! dashboard.add_transaction(TransactionKind::Expense, "Office Supplies", dec!(120), "2024-02-10")?;
//!
//! let summary = dashboard.summary();
//! assert_eq!(summary.net_profit, dec!(1380));
//!
//! let chart = dashboard.profit_chart()?;
//! let units = break_even(&BreakEvenInputs::new(dec!(5000), dec!(15), dec!(40)))?.units;
//! assert_eq!(units, 200);
//! ```

pub mod breakeven;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod forecast;
pub mod insights;
pub mod invoice;
pub mod ledger;
pub mod schema;
pub mod summary;
pub mod timeseries;
pub mod utils;

pub use breakeven::{break_even, BreakEvenInputs, BreakEvenResult};
pub use config::{ChartConfig, DashboardConfig, InsightConfig, InvoiceConfig, ProjectionConfig};
pub use dashboard::{Dashboard, DashboardSnapshot, InsightBoard, InsightSlot};
pub use error::{DashboardError, Result};
pub use forecast::{profit_chart, project, ForecastPoint, ProfitChartPoint};
pub use insights::InsightProvider;
pub use invoice::invoice_total;
pub use ledger::{recent_transactions, Ledger, TransactionFilter};
pub use schema::*;
pub use summary::{summarize, FinancialSummary};
pub use timeseries::{build_monthly_series, MonthBucket, MonthKey};
pub use utils::*;
