//! Composition root: owns the ledger and configuration, derives every metric
//! on demand, and keeps the latest outcome of each insight request.
//!
//! Insight refreshes borrow the ledger read-only for the duration of the
//! provider call. A failed refresh records a user-facing message in its slot
//! and leaves everything else untouched.

use crate::breakeven::BreakEvenInputs;
use crate::config::DashboardConfig;
use crate::error::{DashboardError, Result};
use crate::forecast::{profit_chart, project, ForecastPoint, ProfitChartPoint};
use crate::insights::{
    Benchmark, BreakEvenScenario, CompetitorAnalysis, CompetitorQuery, ForecastMonth,
    InsightKind, InsightProvider, MarketTrends,
};
use crate::ledger::{recent_transactions, Ledger, TransactionFilter};
use crate::schema::{Invoice, NewInvoice, Transaction, TransactionKind};
use crate::summary::{summarize, FinancialSummary};
use crate::timeseries::{build_monthly_series, MonthBucket};
use log::{info, warn};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Latest outcome of one insight kind. A failure keeps the previous value so
/// the last good result stays visible next to the error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightSlot<T> {
    pub value: Option<T>,
    pub error: Option<String>,
}

impl<T> Default for InsightSlot<T> {
    fn default() -> Self {
        Self {
            value: None,
            error: None,
        }
    }
}

impl<T> InsightSlot<T> {
    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn settle(&mut self, kind: InsightKind, outcome: Result<T>) {
        match outcome {
            Ok(value) => {
                info!("Refreshed {}", kind);
                self.value = Some(value);
                self.error = None;
            }
            Err(e) => {
                warn!("Could not refresh {}: {}", kind, e);
                self.error = Some(kind.failure_message().to_string());
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InsightBoard {
    pub recommendations: InsightSlot<Vec<String>>,
    pub competitor_analysis: InsightSlot<CompetitorAnalysis>,
    pub financial_report: InsightSlot<String>,
    pub market_trends: InsightSlot<MarketTrends>,
    pub industry_benchmark: InsightSlot<Benchmark>,
    pub advanced_forecast: InsightSlot<Vec<ForecastMonth>>,
    pub break_even_scenarios: InsightSlot<Vec<BreakEvenScenario>>,
}

/// Everything the overview page shows, computed in one pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub summary: FinancialSummary,
    pub recent: Vec<Transaction>,
    pub chart: Vec<ProfitChartPoint>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct Dashboard {
    ledger: Ledger,
    config: DashboardConfig,
    insights: InsightBoard,
}

const SAMPLE_TRANSACTIONS: [(TransactionKind, &str, i64, &str); 12] = [
    (TransactionKind::Revenue, "Website Design Project", 2500, "2023-10-15"),
    (TransactionKind::Expense, "Software Subscription", 50, "2023-10-20"),
    (TransactionKind::Revenue, "Consulting Services", 1200, "2023-11-05"),
    (TransactionKind::Expense, "Office Supplies", 150, "2023-11-10"),
    (TransactionKind::Revenue, "E-commerce Sales", 3200, "2023-11-25"),
    (TransactionKind::Expense, "Marketing Campaign", 500, "2023-12-01"),
    (TransactionKind::Revenue, "Website Design Project", 2800, "2024-01-15"),
    (TransactionKind::Expense, "Software Subscription", 50, "2024-01-20"),
    (TransactionKind::Revenue, "Consulting Services", 1500, "2024-02-05"),
    (TransactionKind::Expense, "Office Supplies", 120, "2024-02-10"),
    (TransactionKind::Revenue, "E-commerce Sales", 3500, "2024-02-25"),
    (TransactionKind::Expense, "Marketing Campaign", 550, "2024-03-01"),
];

impl Dashboard {
    pub fn new(config: DashboardConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            ledger: Ledger::with_invoice_numbering(config.invoices.clone()),
            config,
            insights: InsightBoard::default(),
        })
    }

    /// A dashboard with default configuration seeded with twelve transactions
    /// of small-agency activity, October 2023 to March 2024.
    pub fn with_sample_data() -> Result<Self> {
        let mut dashboard = Self::new(DashboardConfig::default())?;
        for (kind, description, amount, date) in SAMPLE_TRANSACTIONS {
            dashboard.add_transaction(kind, description, Decimal::from(amount), date)?;
        }
        info!(
            "Seeded dashboard with {} sample transactions",
            dashboard.ledger.transactions().len()
        );
        Ok(dashboard)
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn insights(&self) -> &InsightBoard {
        &self.insights
    }

    pub fn transactions(&self) -> &[Transaction] {
        self.ledger.transactions()
    }

    pub fn invoices(&self) -> &[Invoice] {
        self.ledger.invoices()
    }

    pub fn add_transaction(
        &mut self,
        kind: TransactionKind,
        description: &str,
        amount: Decimal,
        date: &str,
    ) -> Result<&Transaction> {
        self.ledger.add_transaction(kind, description, amount, date)
    }

    pub fn add_invoice(&mut self, invoice: NewInvoice) -> Result<&Invoice> {
        self.ledger.add_invoice(invoice)
    }

    pub fn filter_transactions(&self, filter: &TransactionFilter) -> Vec<&Transaction> {
        self.ledger.filter(filter)
    }

    pub fn summary(&self) -> FinancialSummary {
        summarize(self.transactions())
    }

    pub fn monthly_series(&self) -> Vec<MonthBucket> {
        build_monthly_series(self.transactions())
    }

    pub fn projection(&self) -> Result<Vec<ForecastPoint>> {
        project(&self.monthly_series(), &self.config.projection)
    }

    pub fn profit_chart(&self) -> Result<Vec<ProfitChartPoint>> {
        profit_chart(
            self.transactions(),
            &self.config.projection,
            &self.config.chart,
        )
    }

    pub fn recent_transactions(&self) -> Vec<&Transaction> {
        recent_transactions(self.transactions(), self.config.chart.recent_limit)
    }

    pub fn snapshot(&self) -> Result<DashboardSnapshot> {
        let recommendations = self
            .insights
            .recommendations
            .value()
            .map(|all| {
                all.iter()
                    .take(self.config.insights.recommendation_limit)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        Ok(DashboardSnapshot {
            summary: self.summary(),
            recent: self.recent_transactions().into_iter().cloned().collect(),
            chart: self.profit_chart()?,
            recommendations,
        })
    }

    pub async fn refresh_recommendations(
        &mut self,
        provider: &dyn InsightProvider,
    ) -> &InsightSlot<Vec<String>> {
        let outcome = provider.recommendations(self.ledger.transactions()).await;
        self.insights
            .recommendations
            .settle(InsightKind::Recommendations, outcome);
        &self.insights.recommendations
    }

    pub async fn refresh_competitor_analysis(
        &mut self,
        provider: &dyn InsightProvider,
        query: &CompetitorQuery,
    ) -> &InsightSlot<CompetitorAnalysis> {
        let outcome = provider.competitor_analysis(query).await;
        self.insights
            .competitor_analysis
            .settle(InsightKind::CompetitorAnalysis, outcome);
        &self.insights.competitor_analysis
    }

    /// Requires at least one transaction to report on.
    pub async fn refresh_financial_report(
        &mut self,
        provider: &dyn InsightProvider,
    ) -> Result<&InsightSlot<String>> {
        if self.ledger.transactions().is_empty() {
            return Err(DashboardError::validation(
                "transactions",
                "Add transactions before generating a report",
            ));
        }
        let outcome = provider.financial_report(self.ledger.transactions()).await;
        self.insights
            .financial_report
            .settle(InsightKind::FinancialReport, outcome);
        Ok(&self.insights.financial_report)
    }

    pub async fn refresh_market_trends(
        &mut self,
        provider: &dyn InsightProvider,
        topic: &str,
    ) -> Result<&InsightSlot<MarketTrends>> {
        let topic = required(topic, "topic")?;
        let outcome = provider.market_trends(topic).await;
        self.insights
            .market_trends
            .settle(InsightKind::MarketTrends, outcome);
        Ok(&self.insights.market_trends)
    }

    pub async fn refresh_industry_benchmark(
        &mut self,
        provider: &dyn InsightProvider,
        industry: &str,
    ) -> Result<&InsightSlot<Benchmark>> {
        let industry = required(industry, "industry")?;
        let outcome = provider
            .industry_benchmark(self.ledger.transactions(), industry)
            .await;
        self.insights
            .industry_benchmark
            .settle(InsightKind::IndustryBenchmark, outcome);
        Ok(&self.insights.industry_benchmark)
    }

    pub async fn refresh_advanced_forecast(
        &mut self,
        provider: &dyn InsightProvider,
    ) -> &InsightSlot<Vec<ForecastMonth>> {
        let outcome = provider.advanced_forecast(self.ledger.transactions()).await;
        self.insights
            .advanced_forecast
            .settle(InsightKind::AdvancedForecast, outcome);
        &self.insights.advanced_forecast
    }

    /// Only the price/cost relation is checked here; scenarios are useful
    /// before fixed costs are known.
    pub async fn refresh_break_even_scenarios(
        &mut self,
        provider: &dyn InsightProvider,
        inputs: &BreakEvenInputs,
    ) -> Result<&InsightSlot<Vec<BreakEvenScenario>>> {
        if inputs.contribution_margin() <= Decimal::ZERO {
            return Err(DashboardError::validation(
                "sale_price_per_unit",
                "Sale price must be greater than variable cost",
            ));
        }
        let outcome = provider.break_even_scenarios(inputs).await;
        self.insights
            .break_even_scenarios
            .settle(InsightKind::BreakEvenScenarios, outcome);
        Ok(&self.insights.break_even_scenarios)
    }
}

fn required<'a>(value: &'a str, field: &str) -> Result<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(DashboardError::validation(
            field,
            format!("{} must not be empty", field),
        ));
    }
    Ok(value)
}
