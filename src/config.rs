//! Dashboard configuration, loaded from JSON. Every field has a default so a
//! partial document (or `{}`) is valid.

use crate::error::{DashboardError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub projection: ProjectionConfig,
    pub chart: ChartConfig,
    pub invoices: InvoiceConfig,
    pub insights: InsightConfig,
}

/// Longest projection the dashboard will compute, ten years of months.
pub const MAX_HORIZON_MONTHS: u32 = 120;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    pub horizon_months: u32,
    /// Month-over-month growth applied when projecting, e.g. `0.05` for 5%.
    pub growth_rate: Decimal,
    /// Seed used in place of a last month at or below zero.
    pub loss_floor: Decimal,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            horizon_months: 3,
            growth_rate: Decimal::new(5, 2),
            loss_floor: Decimal::ONE_HUNDRED,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Fewer transactions than this and the profit chart stays empty.
    pub min_transactions: usize,
    pub recent_limit: usize,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            min_transactions: 2,
            recent_limit: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvoiceConfig {
    pub number_prefix: String,
    pub first_number: u64,
}

impl Default for InvoiceConfig {
    fn default() -> Self {
        Self {
            number_prefix: "INV-".to_string(),
            first_number: 1001,
        }
    }
}

impl InvoiceConfig {
    /// Display number for an invoice when `existing` invoices are already held.
    pub fn format_number(&self, existing: usize) -> String {
        format!("{}{}", self.number_prefix, self.first_number + existing as u64)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightConfig {
    pub model: String,
    /// Environment variable holding the provider API key.
    pub api_key_env: String,
    /// How many recommendations the dashboard surfaces.
    pub recommendation_limit: usize,
    /// Months requested from the provider's own forecast.
    pub forecast_months: u32,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-flash".to_string(),
            api_key_env: "GEMINI_API_KEY".to_string(),
            recommendation_limit: 3,
            forecast_months: 6,
        }
    }
}

impl DashboardConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: DashboardConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.projection.horizon_months > MAX_HORIZON_MONTHS {
            return Err(DashboardError::ConfigError(format!(
                "projection.horizon_months {} exceeds the maximum of {}",
                self.projection.horizon_months, MAX_HORIZON_MONTHS
            )));
        }
        if self.projection.growth_rate <= -Decimal::ONE {
            return Err(DashboardError::ConfigError(format!(
                "projection.growth_rate {} would drive every projection to zero or below",
                self.projection.growth_rate
            )));
        }
        if self.projection.loss_floor <= Decimal::ZERO {
            return Err(DashboardError::ConfigError(format!(
                "projection.loss_floor must be positive, got {}",
                self.projection.loss_floor
            )));
        }
        if self.invoices.number_prefix.trim().is_empty() {
            return Err(DashboardError::ConfigError(
                "invoices.number_prefix must not be empty".to_string(),
            ));
        }
        if self.insights.model.trim().is_empty() {
            return Err(DashboardError::ConfigError(
                "insights.model must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
