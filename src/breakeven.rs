use crate::error::{DashboardError, Result};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The three figures entered on the break-even form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakEvenInputs {
    pub fixed_costs: Decimal,
    pub variable_cost_per_unit: Decimal,
    pub sale_price_per_unit: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakEvenResult {
    pub units: u64,
    pub revenue: Decimal,
}

impl BreakEvenInputs {
    pub fn new(
        fixed_costs: Decimal,
        variable_cost_per_unit: Decimal,
        sale_price_per_unit: Decimal,
    ) -> Self {
        Self {
            fixed_costs,
            variable_cost_per_unit,
            sale_price_per_unit,
        }
    }

    /// Converts floating point inputs, rejecting NaN and infinities.
    pub fn from_f64(fixed_costs: f64, variable_cost: f64, sale_price: f64) -> Result<Self> {
        Ok(Self {
            fixed_costs: finite(fixed_costs, "fixed_costs")?,
            variable_cost_per_unit: finite(variable_cost, "variable_cost_per_unit")?,
            sale_price_per_unit: finite(sale_price, "sale_price_per_unit")?,
        })
    }

    /// Parses the raw form fields.
    pub fn parse(fixed_costs: &str, variable_cost: &str, sale_price: &str) -> Result<Self> {
        Ok(Self {
            fixed_costs: parse_amount(fixed_costs, "fixed_costs")?,
            variable_cost_per_unit: parse_amount(variable_cost, "variable_cost_per_unit")?,
            sale_price_per_unit: parse_amount(sale_price, "sale_price_per_unit")?,
        })
    }

    pub fn contribution_margin(&self) -> Decimal {
        self.sale_price_per_unit - self.variable_cost_per_unit
    }

    pub fn validate(&self) -> Result<()> {
        if self.fixed_costs <= Decimal::ZERO {
            return Err(DashboardError::validation(
                "fixed_costs",
                format!("Fixed costs must be positive, got {}", self.fixed_costs),
            ));
        }
        if self.sale_price_per_unit <= self.variable_cost_per_unit {
            return Err(DashboardError::validation(
                "sale_price_per_unit",
                format!(
                    "Sale price {} must exceed variable cost {}",
                    self.sale_price_per_unit, self.variable_cost_per_unit
                ),
            ));
        }
        Ok(())
    }
}

fn finite(value: f64, field: &str) -> Result<Decimal> {
    if !value.is_finite() {
        return Err(DashboardError::validation(
            field,
            format!("{} is not a finite number", value),
        ));
    }
    Decimal::from_f64(value).ok_or_else(|| {
        DashboardError::validation(field, format!("{} is out of the supported range", value))
    })
}

fn parse_amount(value: &str, field: &str) -> Result<Decimal> {
    Decimal::from_str(value.trim()).map_err(|_| {
        DashboardError::validation(field, format!("'{}' is not a number", value))
    })
}

/// Units that must be sold for contribution margin to cover fixed costs, and
/// the revenue those units bring in.
pub fn break_even(inputs: &BreakEvenInputs) -> Result<BreakEvenResult> {
    inputs.validate()?;

    let units = inputs
        .fixed_costs
        .checked_div(inputs.contribution_margin())
        .ok_or_else(|| {
            DashboardError::validation(
                "fixed_costs",
                format!(
                    "Fixed costs {} over a margin of {} exceed the supported range",
                    inputs.fixed_costs,
                    inputs.contribution_margin()
                ),
            )
        })?
        .ceil();
    let units = units.to_u64().ok_or_else(|| {
        DashboardError::validation("fixed_costs", format!("Break-even of {} units is too large", units))
    })?;
    let revenue = Decimal::from(units)
        .checked_mul(inputs.sale_price_per_unit)
        .ok_or_else(|| {
            DashboardError::validation(
                "fixed_costs",
                format!(
                    "Revenue for {} units at {} exceeds the supported range",
                    units, inputs.sale_price_per_unit
                ),
            )
        })?;

    Ok(BreakEvenResult { units, revenue })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn inputs(fixed: Decimal, variable: Decimal, price: Decimal) -> BreakEvenInputs {
        BreakEvenInputs::new(fixed, variable, price)
    }

    #[test]
    fn test_exact_break_even() {
        let result = break_even(&inputs(dec!(5000), dec!(15), dec!(40))).unwrap();
        assert_eq!(result.units, 200);
        assert_eq!(result.revenue, dec!(8000));
    }

    #[test]
    fn test_rounds_units_up() {
        // 1000 / 30 = 33.3 units
        let result = break_even(&inputs(dec!(1000), dec!(20), dec!(50))).unwrap();
        assert_eq!(result.units, 34);
        assert_eq!(result.revenue, dec!(1700));
    }

    #[test]
    fn test_rejects_non_positive_margin() {
        let zero = break_even(&inputs(dec!(5000), dec!(20), dec!(20)));
        assert!(zero.unwrap_err().is_validation());

        let negative = break_even(&inputs(dec!(5000), dec!(25), dec!(20)));
        assert!(negative.unwrap_err().is_validation());
    }

    #[test]
    fn test_rejects_non_positive_fixed_costs() {
        assert!(break_even(&inputs(dec!(0), dec!(10), dec!(20))).is_err());
        assert!(break_even(&inputs(dec!(-100), dec!(10), dec!(20))).is_err());
    }

    #[test]
    fn test_units_are_minimal() {
        let cases = [
            (dec!(5000), dec!(15), dec!(40)),
            (dec!(1), dec!(0), dec!(3)),
            (dec!(999.99), dec!(0.01), dec!(7.5)),
            (dec!(12345), dec!(99.5), dec!(100)),
        ];

        for (fixed, variable, price) in cases {
            let result = break_even(&inputs(fixed, variable, price)).unwrap();
            let margin = price - variable;
            let units = Decimal::from(result.units);
            assert!(units * margin >= fixed, "{} units do not cover {}", units, fixed);
            assert!((units - Decimal::ONE) * margin < fixed);
        }
    }

    #[test]
    fn test_out_of_range_results_are_rejected() {
        // Units fit in u64 but their revenue does not fit in a Decimal.
        let err = break_even(&inputs(dec!(1e19), dec!(9999999999), dec!(10000000000))).unwrap_err();
        assert!(matches!(
            err,
            DashboardError::ValidationError { ref field, .. } if field == "fixed_costs"
        ));

        // A tiny margin pushes the unit count past the Decimal range.
        let err = break_even(&inputs(dec!(1e20), dec!(0), dec!(0.0000000001))).unwrap_err();
        assert!(err.is_validation());

        let err = break_even(&inputs(Decimal::MAX, dec!(0), dec!(0.5))).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_from_f64_rejects_non_finite() {
        assert!(BreakEvenInputs::from_f64(f64::NAN, 10.0, 20.0).is_err());
        assert!(BreakEvenInputs::from_f64(5000.0, f64::INFINITY, 20.0).is_err());

        let parsed = BreakEvenInputs::from_f64(5000.0, 15.0, 40.0).unwrap();
        assert_eq!(break_even(&parsed).unwrap().units, 200);
    }

    #[test]
    fn test_parse_form_fields() {
        let parsed = BreakEvenInputs::parse("5000", " 15 ", "40.00").unwrap();
        assert_eq!(parsed.contribution_margin(), dec!(25));

        let err = BreakEvenInputs::parse("", "15", "40").unwrap_err();
        assert!(matches!(
            err,
            DashboardError::ValidationError { ref field, .. } if field == "fixed_costs"
        ));
    }
}
