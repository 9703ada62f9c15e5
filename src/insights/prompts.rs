use crate::breakeven::BreakEvenInputs;
use crate::insights::types::CompetitorQuery;
use crate::schema::Transaction;
use crate::summary::summarize;
use chrono::NaiveDate;

/// One line per transaction: `2023-10-15: revenue - Website Design Project - $2500`.
pub fn format_transactions(transactions: &[Transaction]) -> String {
    transactions
        .iter()
        .map(|t| {
            format!(
                "{}: {} - {} - ${}",
                t.date.format("%Y-%m-%d"),
                t.kind,
                t.description,
                t.amount.normalize()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Same as [`format_transactions`] without descriptions; the forecast only
/// needs dates, direction and amounts.
pub fn format_transaction_amounts(transactions: &[Transaction]) -> String {
    transactions
        .iter()
        .map(|t| format!("{}: {} - ${}", t.date.format("%Y-%m-%d"), t.kind, t.amount.normalize()))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn recommendations_prompt(transactions: &[Transaction]) -> String {
    format!(
        r#"
Based on the following financial transactions, provide 3-5 actionable recommendations for a small business to improve profitability.
Focus on cost-saving opportunities, revenue growth ideas, and financial management improvements.
Keep each recommendation concise and clear.

Transactions:
{}

Recommendations:
"#,
        format_transactions(transactions)
    )
}

pub fn competitor_analysis_prompt(query: &CompetitorQuery) -> String {
    format!(
        r#"
Analyze the competitive landscape for a small business.
Industry: {}
Our Unique Selling Proposition (USP): {}
Competitors to analyze: {}

For each competitor, provide a brief analysis of their likely pricing and marketing strategies.
Return the analysis in JSON format.
"#,
        query.industry,
        query.usp,
        query.competitors.join(", ")
    )
}

pub fn financial_report_prompt(transactions: &[Transaction]) -> String {
    format!(
        r#"
You are a financial analyst AI. Based on the following transactions, generate a weekly email report.
The report should include:
1. A **Financial Summary** (total revenue, expenses, net profit).
2. A **Key Insights** section identifying the largest revenue source and largest expense.
3. An **Alerts & Opportunities** section with one key risk or opportunity you've identified from the data.

Format it clearly with markdown-style headings (e.g., ### Financial Summary).

Transactions:
{}
"#,
        format_transactions(transactions)
    )
}

pub fn market_trends_prompt(topic: &str) -> String {
    format!(
        "Provide a summary of the current market trends and social media sentiment for the \"{}\" industry. Include any recent news or significant events.",
        topic.trim()
    )
}

/// The margin is computed locally; only the percentage leaves the process.
pub fn industry_benchmark_prompt(transactions: &[Transaction], industry: &str) -> String {
    let margin = summarize(transactions).net_profit_margin();
    format!(
        r#"
A small business in the "{}" industry has a net profit margin of {:.2}%.
What is a typical net profit margin for this industry?
Provide a brief analysis comparing the business's performance to the industry average.
"#,
        industry.trim(),
        margin
    )
}

/// `reference` is the date the forecast starts after, normally the most recent
/// transaction's date.
pub fn advanced_forecast_prompt(
    transactions: &[Transaction],
    reference: NaiveDate,
    months: u32,
) -> String {
    format!(
        r#"
Analyze the following financial transactions, looking for monthly patterns and potential seasonality.
Then, provide a {}-month financial forecast starting from the month after {}.
For each month, predict the total revenue and total expenses.

Transactions:
{}
"#,
        months,
        reference.format("%Y-%m-%d"),
        format_transaction_amounts(transactions)
    )
}

pub fn break_even_scenarios_prompt(inputs: &BreakEvenInputs) -> String {
    format!(
        r#"
A business has the following financials:
- Monthly Fixed Costs: ${}
- Variable Cost per Unit: ${}
- Sale Price per Unit: ${}

Suggest 2-3 actionable scenarios to lower their break-even point. For each scenario, provide a title and a brief description of the strategy.
"#,
        inputs.fixed_costs.normalize(),
        inputs.variable_cost_per_unit.normalize(),
        inputs.sale_price_per_unit.normalize()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::TransactionKind;
    use rust_decimal_macros::dec;

    fn sample() -> Vec<Transaction> {
        vec![
            Transaction {
                id: 1,
                kind: TransactionKind::Revenue,
                description: "Website Design Project".to_string(),
                amount: dec!(2500.00),
                date: NaiveDate::from_ymd_opt(2023, 10, 15).unwrap(),
            },
            Transaction {
                id: 2,
                kind: TransactionKind::Expense,
                description: "Software Subscription".to_string(),
                amount: dec!(49.99),
                date: NaiveDate::from_ymd_opt(2023, 10, 20).unwrap(),
            },
        ]
    }

    #[test]
    fn test_format_transactions() {
        assert_eq!(
            format_transactions(&sample()),
            "2023-10-15: revenue - Website Design Project - $2500\n2023-10-20: expense - Software Subscription - $49.99"
        );
        assert_eq!(
            format_transaction_amounts(&sample()),
            "2023-10-15: revenue - $2500\n2023-10-20: expense - $49.99"
        );
        assert_eq!(format_transactions(&[]), "");
    }

    #[test]
    fn test_benchmark_prompt_carries_margin() {
        let prompt = industry_benchmark_prompt(&sample(), " Web Design ");
        // (2500 - 49.99) / 2500 = 98.0004%
        assert!(prompt.contains("net profit margin of 98.00%"));
        assert!(prompt.contains("\"Web Design\" industry"));
    }

    #[test]
    fn test_forecast_prompt() {
        let prompt =
            advanced_forecast_prompt(&sample(), NaiveDate::from_ymd_opt(2023, 10, 20).unwrap(), 6);
        assert!(prompt.contains("6-month financial forecast starting from the month after 2023-10-20"));
        assert!(prompt.contains("2023-10-20: expense - $49.99"));
    }

    #[test]
    fn test_competitor_and_break_even_prompts() {
        let query = CompetitorQuery::new("Bakery", "Sourdough", &["Crumbs", "Loaf Co"]).unwrap();
        let prompt = competitor_analysis_prompt(&query);
        assert!(prompt.contains("Competitors to analyze: Crumbs, Loaf Co"));

        let inputs = BreakEvenInputs::new(dec!(5000), dec!(15.50), dec!(40));
        let prompt = break_even_scenarios_prompt(&inputs);
        assert!(prompt.contains("Monthly Fixed Costs: $5000"));
        assert!(prompt.contains("Variable Cost per Unit: $15.5"));
    }
}
