use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use u_forecast::forecast::{ForecastEngine, ForecastOptions, ForecastSummary};
use u_forecast::io::{pivot_rows, read_request, to_json, write_report};
use u_forecast::models::PriorityOrder;

#[derive(Parser)]
#[command(name = "u-forecast")]
#[command(about = "Forecast weekly feature delivery from team capacity and priorities")]
struct Cli {
    /// Workbook with Team, Feature and Planning sheets
    workbook: PathBuf,

    /// Where to write the workbook with the pivot sheet (default: in place)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// How feature priorities are ordered
    #[arg(long, value_enum, default_value_t = OrderArg::Numeric)]
    priority_order: OrderArg,

    /// First week number
    #[arg(long, default_value_t = 1)]
    start_week: u32,

    /// Print pivot rows as JSON instead of writing the workbook
    #[arg(long)]
    json: bool,

    /// Log a per-team delivery summary
    #[arg(long)]
    summary: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum OrderArg {
    /// 1, 2, 10
    Numeric,
    /// 1, 10, 2 (string comparison)
    Lexicographic,
}

impl From<OrderArg> for PriorityOrder {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::Numeric => PriorityOrder::Numeric,
            OrderArg::Lexicographic => PriorityOrder::Lexicographic,
        }
    }
}

/// Logs go to stderr so `--json` output stays clean.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "u_forecast=info".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let options = ForecastOptions::new()
        .with_start_week(cli.start_week)
        .with_priority_order(cli.priority_order.into());

    let request = read_request(&cli.workbook)?;
    let forecast = ForecastEngine::new()
        .with_options(options)
        .forecast_request(&request)?;
    let rows = pivot_rows(&forecast, &request.features)?;

    if cli.summary {
        let summary = ForecastSummary::calculate(&forecast, &request.teams);
        for team in &summary.teams {
            tracing::info!(
                team = %team.team_name,
                last_week = team.last_week,
                scheduled = team.scheduled_efforts,
                idle = team.idle_efforts,
                utilization = %format!("{:.1}%", team.utilization * 100.0),
                "team summary"
            );
        }
    }

    if cli.json {
        println!("{}", to_json(&rows)?);
    } else {
        let output = cli.output.as_ref().unwrap_or(&cli.workbook);
        write_report(&cli.workbook, output, &rows)?;
        tracing::info!("Wrote {} pivot rows to {}", rows.len(), output.display());
    }

    Ok(())
}
