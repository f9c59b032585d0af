use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "stock_forecast")]
#[command(about = "Forecast a stock's closing price", long_about = None)]
pub struct Cli {
    /// Ticker symbol, e.g. INFY.NS
    #[arg(short, long, env = "STOCK_TICKER")]
    pub ticker: String,

    /// Number of future days to forecast
    #[arg(short, long, default_value_t = 30, allow_negative_numbers = true)]
    pub days: i64,

    /// Directory holding one `<TICKER>.csv` price history per symbol
    #[arg(long, env = "FORECAST_DATA_DIR", default_value = "data")]
    pub data_dir: PathBuf,

    /// Write the forecast curve here (`.json` writes the whole report)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Fewest daily observations accepted for a fit
    #[arg(long, env = "FORECAST_MIN_HISTORY")]
    pub min_history: Option<usize>,

    /// Print the report as JSON instead of text
    #[arg(long)]
    pub json: bool,
}
