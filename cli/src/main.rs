use clap::{Parser, Subcommand};
use forecast_insight::{
    api::DashboardBuilder,
    init_logger,
    interpret::{interpret_with_style, NarrativeStyle},
    models::ForecastSummary,
    services::CsvHistoryService,
    utils::{format_percentage_with_sign, format_price, DEFAULT_BIN_COUNT},
};

#[derive(Parser)]
#[command(name = "forecast-insight")]
#[command(about = "Interpret probabilistic return forecasts and build dashboard snapshots")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Args)]
pub struct ForecastArgs {
    /// Subject label, e.g. "Amazon (AMZN)"
    #[arg(long, default_value = "Amazon (AMZN)")]
    subject: String,
    /// Forecast horizon label
    #[arg(long, default_value = "next 5 trading days")]
    horizon: String,
    /// Median projected return in percent
    #[arg(long, default_value_t = 0.84, allow_negative_numbers = true)]
    median: f64,
    /// Lower price bound
    #[arg(long, default_value_t = 172.30)]
    lower: f64,
    /// Upper price bound
    #[arg(long, default_value_t = 181.90)]
    upper: f64,
}

impl ForecastArgs {
    fn to_summary(&self) -> ForecastSummary {
        ForecastSummary::new(&self.subject, &self.horizon, self.median, self.lower, self.upper)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Classify a forecast and print its narrative
    Interpret {
        #[command(flatten)]
        forecast: ForecastArgs,
        /// Keep **bold** markers in the narrative
        #[arg(long)]
        markdown: bool,
    },
    /// Load a price history CSV and print the dashboard snapshot as JSON
    Snapshot {
        /// Path to the feature export CSV
        #[arg(short, long, default_value = "amzn_features_final.csv")]
        data: String,
        #[command(flatten)]
        forecast: ForecastArgs,
        /// Bins of the return distribution
        #[arg(long, default_value_t = DEFAULT_BIN_COUNT)]
        bins: usize,
    },
}

fn run(command: Commands) -> anyhow::Result<String> {
    match command {
        Commands::Interpret { forecast, markdown } => {
            let style = if markdown { NarrativeStyle::Markdown } else { NarrativeStyle::Plain };
            let summary = forecast.to_summary();
            let result = interpret_with_style(&summary, style)?;

            Ok(format!(
                "{}\n\nBias:         {}\nUncertainty:  {}\nMedian:       {}\nRange:        {} - {}",
                result.narrative,
                result.bias,
                result.uncertainty,
                format_percentage_with_sign(summary.median_return_pct),
                format_price(summary.lower_price),
                format_price(summary.upper_price),
            ))
        }
        Commands::Snapshot { data, forecast, bins } => {
            let history = CsvHistoryService::new(&data).load()?;
            let snapshot = DashboardBuilder::new()
                .with_forecast(forecast.to_summary())
                .with_history(history)
                .with_bins(bins)
                .build()?;

            Ok(serde_json::to_string_pretty(&snapshot)?)
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_logger()?;

    let cli = Cli::parse();
    println!("{}", run(cli.command)?);

    Ok(())
}
