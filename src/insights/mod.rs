//! Boundary to the external generative-AI service.
//!
//! Every insight is produced by an [`InsightProvider`]. Results are typed per
//! kind and checked on arrival; the deterministic metrics never depend on them.

pub mod prompts;
pub mod types;
pub mod wire;

#[cfg(feature = "gemini")]
pub mod gemini;

#[cfg(feature = "gemini")]
pub use gemini::GeminiClient;
pub use types::*;

use crate::breakeven::BreakEvenInputs;
use crate::error::Result;
use crate::schema::Transaction;
use futures::future::BoxFuture;

/// One asynchronous call per insight kind. Implementations fail with
/// [`crate::DashboardError::ProviderError`] (or another provider-side error)
/// when the service is unreachable or replies with an unexpected shape.
///
/// Dropping a returned future abandons the request without side effects.
pub trait InsightProvider: Send + Sync {
    fn recommendations<'a>(
        &'a self,
        transactions: &'a [Transaction],
    ) -> BoxFuture<'a, Result<Vec<String>>>;

    fn competitor_analysis<'a>(
        &'a self,
        query: &'a CompetitorQuery,
    ) -> BoxFuture<'a, Result<CompetitorAnalysis>>;

    /// Markdown weekly report.
    fn financial_report<'a>(&'a self, transactions: &'a [Transaction])
        -> BoxFuture<'a, Result<String>>;

    fn market_trends<'a>(&'a self, topic: &'a str) -> BoxFuture<'a, Result<MarketTrends>>;

    fn industry_benchmark<'a>(
        &'a self,
        transactions: &'a [Transaction],
        industry: &'a str,
    ) -> BoxFuture<'a, Result<Benchmark>>;

    fn advanced_forecast<'a>(
        &'a self,
        transactions: &'a [Transaction],
    ) -> BoxFuture<'a, Result<Vec<ForecastMonth>>>;

    fn break_even_scenarios<'a>(
        &'a self,
        inputs: &'a BreakEvenInputs,
    ) -> BoxFuture<'a, Result<Vec<BreakEvenScenario>>>;
}
