//! GDD field dashboard - command line client
//!
//! Prints a field's view-model with its chart specs, or the farm overview,
//! as JSON.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde::Serialize;
use shared::FieldId;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use gdd_dashboard::clock::{Clock, FixedClock, SystemClock};
use gdd_dashboard::config::{Config, LoggingConfig};
use gdd_dashboard::external::HttpDashboardApi;
use gdd_dashboard::render::HeadlessSurface;
use gdd_dashboard::services::{FarmOverviewSession, FieldDashboardSession, FieldRow};

#[derive(Parser)]
#[command(name = "gdd-dashboard", version, about = "GDD field monitoring dashboard")]
struct Cli {
    /// Evaluate cutting status against this date instead of today (YYYY-MM-DD)
    #[arg(long, global = true)]
    today: Option<NaiveDate>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show one field's dashboard with its forecast charts
    Field {
        /// Field identifier
        field_id: String,
    },
    /// Show every farm with its field rows
    Farms,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FarmOverview {
    farm_id: String,
    farm_name: String,
    fields: Vec<FieldRow>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::load()?;
    init_tracing(&config.logging);

    let cli = Cli::parse();
    tracing::info!(environment = %config.environment, base_url = %config.api.base_url, "Starting GDD dashboard");

    let clock: Box<dyn Clock> = match cli.today {
        Some(today) => Box::new(FixedClock(today)),
        None => Box::new(SystemClock),
    };
    let api = HttpDashboardApi::from_config(&config.api)?;

    match cli.command {
        Command::Field { field_id } => {
            let mut session = FieldDashboardSession::new(api, HeadlessSurface::new(), clock)
                .with_chart_settings(config.charts.clone())
                .with_refresh_policy(config.session.refresh_policy);
            let view = session.load(FieldId::new(field_id)).await?;
            println!("{}", serde_json::to_string_pretty(view)?);
        }
        Command::Farms => {
            let today = clock.today();
            let mut session =
                FarmOverviewSession::new(api).with_refresh_policy(config.session.refresh_policy);
            session.load().await?;

            let mut overview = Vec::new();
            for farm in session.farms().to_vec() {
                session.select_farm(&farm.farm_id)?;
                overview.push(FarmOverview {
                    farm_id: farm.farm_id.to_string(),
                    farm_name: farm.farm_name,
                    fields: session.field_rows(today),
                });
            }
            println!("{}", serde_json::to_string_pretty(&overview)?);
        }
    }

    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| "gdd_dashboard=info".into());
    let registry = tracing_subscriber::registry().with(filter);

    // Logs go to stderr so stdout stays valid JSON
    if logging.json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
