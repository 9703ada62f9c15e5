use crate::breakeven::BreakEvenInputs;
use crate::config::InsightConfig;
use crate::error::{DashboardError, Result};
use crate::insights::prompts;
use crate::insights::types::*;
use crate::insights::wire::{
    GenerateContentRequest, GenerateContentResponse, GenerationConfig, Tool,
};
use crate::insights::InsightProvider;
use crate::schema::Transaction;
use chrono::Local;
use futures::future::BoxFuture;
use log::{debug, warn};
use reqwest::{Client, StatusCode};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tokio::time::sleep;

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    forecast_months: u32,
    max_retries: u32,
    retry_delay: Duration,
}

impl GeminiClient {
    pub fn new(api_key: String, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: GEMINI_BASE_URL.to_string(),
            model: model.into(),
            forecast_months: 6,
            max_retries: 1,
            retry_delay: Duration::from_secs(2),
        }
    }

    /// Builds a client from the insight configuration, reading the API key
    /// from the environment variable it names.
    pub fn from_config(config: &InsightConfig) -> Result<Self> {
        let api_key = std::env::var(&config.api_key_env).map_err(|_| {
            DashboardError::ConfigError(format!("{} must be set", config.api_key_env))
        })?;
        let mut client = Self::new(api_key, config.model.clone());
        client.forecast_months = config.forecast_months;
        Ok(client)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_retries(mut self, max_retries: u32, retry_delay: Duration) -> Self {
        self.max_retries = max_retries;
        self.retry_delay = retry_delay;
        self
    }

    async fn generate(&self, payload: &GenerateContentRequest) -> Result<GenerateContentResponse> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        let mut attempt = 0;
        loop {
            let res = self.client.post(&url).json(payload).send().await?;
            let status = res.status();

            if status.is_success() {
                return Ok(res.json().await?);
            }

            let err_text = res.text().await?;
            if attempt < self.max_retries && is_transient(status) {
                attempt += 1;
                warn!(
                    "Gemini returned {}; retrying ({}/{})",
                    status, attempt, self.max_retries
                );
                sleep(self.retry_delay).await;
                continue;
            }

            return Err(DashboardError::ProviderError(format!(
                "Gemini API Error (status {}): {}",
                status, err_text
            )));
        }
    }

    async fn generate_text(&self, prompt: &str) -> Result<String> {
        self.generate(&GenerateContentRequest::text(prompt))
            .await?
            .text()
    }

    async fn generate_structured<T>(&self, kind: InsightKind, prompt: &str) -> Result<T>
    where
        T: DeserializeOwned + JsonSchema + InsightPayload,
    {
        let payload = GenerateContentRequest {
            generation_config: Some(GenerationConfig::json_for::<T>()?),
            ..GenerateContentRequest::text(prompt)
        };
        let text = self.generate(&payload).await?.text()?;
        debug!("Gemini {} reply: {} bytes", kind, text.len());
        parse_structured(kind, &text)
    }

    /// Free-text answer grounded with Google Search, plus the sources it cited.
    async fn grounded_search(&self, prompt: &str) -> Result<MarketTrends> {
        let mut payload = GenerateContentRequest::text(prompt);
        payload.tools.push(Tool::google_search());

        let response = self.generate(&payload).await?;
        Ok(MarketTrends {
            text: response.text()?,
            sources: response.citations(),
        })
    }
}

fn is_transient(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

fn logged<T>(kind: InsightKind, outcome: Result<T>) -> Result<T> {
    if let Err(e) = &outcome {
        warn!("Error getting {}: {}", kind, e);
    }
    outcome
}

impl InsightProvider for GeminiClient {
    fn recommendations<'a>(
        &'a self,
        transactions: &'a [Transaction],
    ) -> BoxFuture<'a, Result<Vec<String>>> {
        Box::pin(async move {
            let prompt = prompts::recommendations_prompt(transactions);
            let outcome = self
                .generate_text(&prompt)
                .await
                .map(|text| parse_recommendations(&text));
            logged(InsightKind::Recommendations, outcome)
        })
    }

    fn competitor_analysis<'a>(
        &'a self,
        query: &'a CompetitorQuery,
    ) -> BoxFuture<'a, Result<CompetitorAnalysis>> {
        Box::pin(async move {
            let prompt = prompts::competitor_analysis_prompt(query);
            let outcome = self
                .generate_structured(InsightKind::CompetitorAnalysis, &prompt)
                .await;
            logged(InsightKind::CompetitorAnalysis, outcome)
        })
    }

    fn financial_report<'a>(
        &'a self,
        transactions: &'a [Transaction],
    ) -> BoxFuture<'a, Result<String>> {
        Box::pin(async move {
            let prompt = prompts::financial_report_prompt(transactions);
            let outcome = self.generate_text(&prompt).await;
            logged(InsightKind::FinancialReport, outcome)
        })
    }

    fn market_trends<'a>(&'a self, topic: &'a str) -> BoxFuture<'a, Result<MarketTrends>> {
        Box::pin(async move {
            let outcome = self.grounded_search(&prompts::market_trends_prompt(topic)).await;
            logged(InsightKind::MarketTrends, outcome)
        })
    }

    fn industry_benchmark<'a>(
        &'a self,
        transactions: &'a [Transaction],
        industry: &'a str,
    ) -> BoxFuture<'a, Result<Benchmark>> {
        Box::pin(async move {
            let prompt = prompts::industry_benchmark_prompt(transactions, industry);
            let outcome = self
                .generate_structured(InsightKind::IndustryBenchmark, &prompt)
                .await;
            logged(InsightKind::IndustryBenchmark, outcome)
        })
    }

    fn advanced_forecast<'a>(
        &'a self,
        transactions: &'a [Transaction],
    ) -> BoxFuture<'a, Result<Vec<ForecastMonth>>> {
        Box::pin(async move {
            let reference = transactions
                .last()
                .map(|t| t.date)
                .unwrap_or_else(|| Local::now().date_naive());
            let prompt =
                prompts::advanced_forecast_prompt(transactions, reference, self.forecast_months);
            let outcome = self
                .generate_structured(InsightKind::AdvancedForecast, &prompt)
                .await;
            logged(InsightKind::AdvancedForecast, outcome)
        })
    }

    fn break_even_scenarios<'a>(
        &'a self,
        inputs: &'a BreakEvenInputs,
    ) -> BoxFuture<'a, Result<Vec<BreakEvenScenario>>> {
        Box::pin(async move {
            let prompt = prompts::break_even_scenarios_prompt(inputs);
            let outcome = self
                .generate_structured(InsightKind::BreakEvenScenarios, &prompt)
                .await;
            logged(InsightKind::BreakEvenScenarios, outcome)
        })
    }
}
