use business_dashboard_core::insights::{CompetitorQuery, GeminiClient};
use business_dashboard_core::{BreakEvenInputs, Dashboard};
use dotenv::dotenv;
use rust_decimal_macros::dec;
use std::error::Error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv().ok();

    let mut dashboard = Dashboard::with_sample_data()?;
    let client = GeminiClient::from_config(&dashboard.config().insights)?;

    println!("🤖 AI Insights");
    println!("═══════════════════════════════════════════════════════════════\n");

    println!("💡 Recommendations");
    let slot = dashboard.refresh_recommendations(&client).await;
    match (slot.value(), slot.error()) {
        (_, Some(error)) => println!("   ⚠️  {}", error),
        (Some(tips), None) => tips.iter().for_each(|tip| println!("   • {}", tip)),
        (None, None) => {}
    }
    println!();

    println!("🌐 Market trends");
    let slot = dashboard.refresh_market_trends(&client, "Web Design").await?;
    if let Some(trends) = slot.value() {
        println!("{}\n", trends.text);
        for source in &trends.sources {
            println!(
                "   🔗 {} {}",
                source.title.as_deref().unwrap_or("(untitled)"),
                source.uri
            );
        }
    }
    if let Some(error) = slot.error() {
        println!("   ⚠️  {}", error);
    }
    println!();

    println!("🏁 Competitors");
    let query = CompetitorQuery::new(
        "Web Design",
        "Fixed-price sites delivered in two weeks",
        &["Pixel Perfect Studio", "Northside Digital"],
    )?;
    let slot = dashboard.refresh_competitor_analysis(&client, &query).await;
    if let Some(analysis) = slot.value() {
        for competitor in &analysis.competitors {
            println!("   {}", competitor.name);
            println!("      Pricing:   {}", competitor.pricing_strategy);
            println!("      Marketing: {}", competitor.marketing_strategy);
        }
    }
    println!();

    println!("📅 Advanced forecast");
    let slot = dashboard.refresh_advanced_forecast(&client).await;
    for month in slot.value().into_iter().flatten() {
        println!(
            "   {:<14} revenue {:>10.2}  expenses {:>10.2}",
            month.month, month.revenue, month.expenses
        );
    }
    println!();

    println!("⚖️  Break-even scenarios");
    let inputs = BreakEvenInputs::new(dec!(5000), dec!(15), dec!(40));
    let slot = dashboard.refresh_break_even_scenarios(&client, &inputs).await?;
    for scenario in slot.value().into_iter().flatten() {
        println!("   • {}: {}", scenario.title, scenario.description);
    }

    Ok(())
}
