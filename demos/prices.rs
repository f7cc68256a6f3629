//! Prints today's electricity and gas prices.
//!
//! Set `FRANK_ENERGIE_EMAIL` and `FRANK_ENERGIE_PASSWORD` to also fetch the
//! customer-specific prices for the first delivery site.
//!
//! ```text
//! RUST_LOG=frank_energie=debug cargo run --example prices
//! ```

use frank_energie::{FrankEnergie, FrankEnergieError, MarketPrices};
use tracing_subscriber::EnvFilter;

fn print_prices(label: &str, prices: &MarketPrices) -> Result<(), FrankEnergieError> {
    println!("== {label} ==");
    for (name, series) in [("electricity", &prices.electricity), ("gas", &prices.gas)] {
        if series.is_empty() {
            println!("{name}: no prices");
            continue;
        }
        println!("{name}: {} entries", series.len());
        for entry in series.today() {
            println!("  {entry}");
        }
        if let Ok(current) = series.current_hour() {
            println!("  current hour: {:.4}", current.total());
        }
        println!(
            "  min {:.4} / max {:.4} / avg {:.5}",
            series.today_min()?.total(),
            series.today_max()?.total(),
            series.today_avg()?
        );
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let client = FrankEnergie::new();
    let today = chrono::Utc::now().date_naive();

    let prices = client.prices(today, None).await?;
    print_prices("market prices", &prices)?;

    if let (Ok(email), Ok(password)) = (
        std::env::var("FRANK_ENERGIE_EMAIL"),
        std::env::var("FRANK_ENERGIE_PASSWORD"),
    ) {
        client.login(&email, &password).await?;
        let me = client.me(None).await?;
        match me.delivery_sites.first() {
            Some(site) => {
                let prices = client.user_prices(today, &site.reference).await?;
                print_prices(&format!("customer prices for {}", site.reference), &prices)?;
            }
            None => println!("no delivery sites on this account"),
        }
    }

    client.close();
    Ok(())
}
