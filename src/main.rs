use anyhow::Result;
use clap::Parser;
use stock_forecast::cli::Cli;
use stock_forecast::output::write_report;
use stock_forecast::{build_app, AppConfig};

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = AppConfig::from_cli(&cli)?;
    let app = build_app(&config)?;

    let response = app.handle(&cli.ticker, cli.days);
    let report = response.outcome?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Forecast for {} over {}", report.ticker, report.horizon);
        print!("{}", report.summary);
        print!("{}", report.forecast.metadata().accuracy);
        println!("Visitors: {}", response.hit_count);
    }

    if let Some(path) = &cli.output {
        write_report(&report, path)?;
    }

    Ok(())
}
