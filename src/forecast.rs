//! Fixed-rate trend projection of the monthly profit series and the combined
//! actual/predicted chart the dashboard renders.

use crate::config::{ChartConfig, ProjectionConfig};
use crate::error::{DashboardError, Result};
use crate::schema::Transaction;
use crate::timeseries::{build_monthly_series, MonthBucket, MonthKey};
use crate::utils::round_to_whole;
use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub month: MonthKey,
    /// Display label, e.g. `Apr 2024`.
    pub label: String,
    /// Whole currency units.
    pub projected_profit: Decimal,
}

/// One point on the profit chart. Historical months carry `actual`, projected
/// months carry `predicted`; the last historical month carries both so the two
/// lines meet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfitChartPoint {
    pub label: String,
    pub actual: Option<Decimal>,
    pub predicted: Option<Decimal>,
}

/// Extends `series` by `horizon_months` months, compounding the last month's
/// profit at `growth_rate`. A last month at or below zero is replaced by
/// `loss_floor` before compounding. An empty series projects nothing.
pub fn project(series: &[MonthBucket], config: &ProjectionConfig) -> Result<Vec<ForecastPoint>> {
    let Some(last) = series.last() else {
        return Ok(Vec::new());
    };

    let mut base = if last.net_profit > Decimal::ZERO {
        last.net_profit
    } else {
        config.loss_floor
    };
    let multiplier = Decimal::ONE + config.growth_rate;
    let mut cursor = last.month;

    let mut points = Vec::new();
    for _ in 0..config.horizon_months {
        cursor = cursor.next()?;
        base = base.checked_mul(multiplier).ok_or_else(|| {
            DashboardError::CalculationError(format!(
                "Projected profit for {} overflows at growth rate {}",
                cursor, config.growth_rate
            ))
        })?;
        points.push(ForecastPoint {
            month: cursor,
            label: cursor.label(),
            projected_profit: round_to_whole(base),
        });
    }

    debug!(
        "Projected {} months past {} from base {}",
        points.len(),
        last.month,
        last.net_profit
    );
    Ok(points)
}

/// Builds the dashboard profit chart: historical buckets followed by the
/// projection. Below `chart.min_transactions` there is not enough history and
/// the chart is empty.
pub fn profit_chart(
    transactions: &[Transaction],
    projection: &ProjectionConfig,
    chart: &ChartConfig,
) -> Result<Vec<ProfitChartPoint>> {
    if transactions.len() < chart.min_transactions {
        return Ok(Vec::new());
    }

    let series = build_monthly_series(transactions);
    let forecast = project(&series, projection)?;

    let mut points: Vec<ProfitChartPoint> = series
        .iter()
        .map(|bucket| ProfitChartPoint {
            label: bucket.month.label(),
            actual: Some(bucket.net_profit),
            predicted: None,
        })
        .collect();

    if let Some(boundary) = points.last_mut() {
        boundary.predicted = boundary.actual;
    }

    points.extend(forecast.into_iter().map(|point| ProfitChartPoint {
        label: point.label,
        actual: None,
        predicted: Some(point.projected_profit),
    }));

    Ok(points)
}
