use crate::error::{DashboardError, Result};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    Recommendations,
    CompetitorAnalysis,
    FinancialReport,
    MarketTrends,
    IndustryBenchmark,
    AdvancedForecast,
    BreakEvenScenarios,
}

impl InsightKind {
    /// Message shown to the user when this insight could not be produced.
    pub fn failure_message(&self) -> &'static str {
        match self {
            InsightKind::Recommendations => "Failed to generate financial recommendations from AI.",
            InsightKind::CompetitorAnalysis => "Failed to generate competitor analysis from AI.",
            InsightKind::FinancialReport => "Failed to generate financial report from AI.",
            InsightKind::MarketTrends => "Failed to get market trends from AI.",
            InsightKind::IndustryBenchmark => "Failed to get industry benchmarks from AI.",
            InsightKind::AdvancedForecast => "Failed to get advanced forecast from AI.",
            InsightKind::BreakEvenScenarios => "Failed to get break-even scenarios from AI.",
        }
    }
}

impl fmt::Display for InsightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InsightKind::Recommendations => "recommendations",
            InsightKind::CompetitorAnalysis => "competitor analysis",
            InsightKind::FinancialReport => "financial report",
            InsightKind::MarketTrends => "market trends",
            InsightKind::IndustryBenchmark => "industry benchmark",
            InsightKind::AdvancedForecast => "advanced forecast",
            InsightKind::BreakEvenScenarios => "break-even scenarios",
        };
        f.write_str(name)
    }
}

/// A web source the provider grounded its answer on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    pub uri: String,
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct MarketTrends {
    pub text: String,
    pub sources: Vec<Citation>,
}

/// Input to a competitor analysis, as collected from the competitor form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetitorQuery {
    pub industry: String,
    pub usp: String,
    pub competitors: Vec<String>,
}

impl CompetitorQuery {
    /// Blank competitor entries are dropped; at least one must remain.
    pub fn new(industry: &str, usp: &str, competitors: &[&str]) -> Result<Self> {
        let industry = industry.trim();
        let usp = usp.trim();
        if industry.is_empty() {
            return Err(DashboardError::validation("industry", "Industry is required"));
        }
        if usp.is_empty() {
            return Err(DashboardError::validation(
                "usp",
                "Unique selling proposition is required",
            ));
        }

        let competitors: Vec<String> = competitors
            .iter()
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect();
        if competitors.is_empty() {
            return Err(DashboardError::validation(
                "competitors",
                "At least one competitor is required",
            ));
        }

        Ok(Self {
            industry: industry.to_string(),
            usp: usp.to_string(),
            competitors,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Competitor {
    pub name: String,

    #[schemars(description = "A brief analysis of the competitor's pricing strategy.")]
    pub pricing_strategy: String,

    #[schemars(description = "A brief analysis of the competitor's marketing strategy.")]
    pub marketing_strategy: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Default)]
pub struct CompetitorAnalysis {
    pub competitors: Vec<Competitor>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Benchmark {
    #[schemars(description = "The user's metric, e.g., '15.20% Net Profit Margin'")]
    pub user_metric: String,

    #[schemars(description = "The industry average metric, e.g., '10-12% Net Profit Margin'")]
    pub industry_average: String,

    #[schemars(description = "A brief analysis comparing the two and providing context.")]
    pub analysis: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ForecastMonth {
    #[schemars(description = "The forecasted month, e.g., 'July 2024'")]
    pub month: String,

    #[schemars(description = "Predicted total revenue for the month")]
    pub revenue: f64,

    #[schemars(description = "Predicted total expenses for the month")]
    pub expenses: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct BreakEvenScenario {
    #[schemars(description = "The title of the scenario, e.g., 'Reduce Material Costs'")]
    pub title: String,

    #[schemars(description = "A brief description of the strategy.")]
    pub description: String,
}

/// Structured provider output that can be checked after deserialization.
pub trait InsightPayload {
    fn check(&self) -> std::result::Result<(), String>;
}

fn require(value: &str, what: &str) -> std::result::Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("missing {}", what))
    } else {
        Ok(())
    }
}

impl InsightPayload for CompetitorAnalysis {
    fn check(&self) -> std::result::Result<(), String> {
        for competitor in &self.competitors {
            require(&competitor.name, "competitor name")?;
            require(&competitor.pricing_strategy, "pricing strategy")?;
            require(&competitor.marketing_strategy, "marketing strategy")?;
        }
        Ok(())
    }
}

impl InsightPayload for Benchmark {
    fn check(&self) -> std::result::Result<(), String> {
        require(&self.user_metric, "user_metric")?;
        require(&self.industry_average, "industry_average")?;
        require(&self.analysis, "analysis")
    }
}

impl InsightPayload for ForecastMonth {
    fn check(&self) -> std::result::Result<(), String> {
        require(&self.month, "month")?;
        if self.revenue < 0.0 || self.expenses < 0.0 {
            return Err(format!("negative figures for {}", self.month));
        }
        Ok(())
    }
}

impl InsightPayload for BreakEvenScenario {
    fn check(&self) -> std::result::Result<(), String> {
        require(&self.title, "title")?;
        require(&self.description, "description")
    }
}

impl<T: InsightPayload> InsightPayload for Vec<T> {
    fn check(&self) -> std::result::Result<(), String> {
        self.iter().try_for_each(|item| item.check())
    }
}

/// Cuts the JSON document out of a model reply that may be wrapped in prose or
/// a markdown code fence.
fn clean_json_output(raw: &str) -> &str {
    let object = raw.find('{');
    let array = raw.find('[');
    let (start, close) = match (object, array) {
        (Some(o), Some(a)) if a < o => (a, ']'),
        (Some(o), _) => (o, '}'),
        (None, Some(a)) => (a, ']'),
        (None, None) => return raw.trim(),
    };
    match raw.rfind(close) {
        Some(end) if end > start => &raw[start..=end],
        _ => raw.trim(),
    }
}

/// Decodes and checks a structured reply. Any mismatch with the expected shape
/// is a provider failure, never a partially filled result.
pub fn parse_structured<T>(kind: InsightKind, raw: &str) -> Result<T>
where
    T: DeserializeOwned + InsightPayload,
{
    let value: T = serde_json::from_str(clean_json_output(raw)).map_err(|e| {
        DashboardError::ProviderError(format!("Malformed {} response: {}", kind, e))
    })?;
    value.check().map_err(|reason| {
        DashboardError::ProviderError(format!("Invalid {} response: {}", kind, reason))
    })?;
    Ok(value)
}

/// Splits a free-text recommendation list into one entry per line, dropping
/// bullet markers and blank lines.
pub fn parse_recommendations(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| {
            let line = line.trim();
            line.strip_prefix(['*', '-']).unwrap_or(line).trim().to_string()
        })
        .filter(|line| !line.is_empty())
        .collect()
}
