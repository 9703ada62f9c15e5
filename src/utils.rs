use crate::error::{DashboardError, Result};
use chrono::{Datelike, Days, Months, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};

/// Parses a calendar date in `YYYY-MM-DD` form. Failures are reported as
/// validation errors against `field` since dates arrive from user input.
pub fn parse_date(value: &str, field: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        DashboardError::validation(
            field,
            format!("Invalid date '{}'. Expected YYYY-MM-DD", value),
        )
    })
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.day0()))
}

pub fn next_month_start(date: NaiveDate) -> Result<NaiveDate> {
    first_of_month(date)
        .checked_add_months(Months::new(1))
        .ok_or_else(|| {
            DashboardError::DateError(format!("No month follows {}", date.format("%Y-%m")))
        })
}

pub fn last_day_of_month(date: NaiveDate) -> Result<NaiveDate> {
    next_month_start(date).map(|next| next - Days::new(1))
}

/// Short month label used on chart axes, e.g. `Mar 2024`.
pub fn month_label(date: NaiveDate) -> String {
    date.format("%b %Y").to_string()
}

/// Rounds to the nearest whole currency unit, halves away from zero.
pub fn round_to_whole(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats an amount as US-style currency: `$1,234.50`, `-$75.00`.
pub fn format_currency(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let magnitude = format!("{:.2}", rounded.abs());
    let (whole, cents) = magnitude.split_once('.').unwrap_or((magnitude.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{}${}.{}", sign, grouped, cents)
}
