use chrono::Utc;
use clap::{Parser, Subcommand};
use registration::{
    AgeGroup, DashboardQuery, EventCatalog, StatusFilter, admin::export_filename, load_dashboard,
};
use std::path::PathBuf;
use storage::Database;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "swimfest-admin")]
#[command(about = "Swim Fest registration administration", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the filtered registrations to a dated CSV file
    Export {
        #[arg(long, env = "DATABASE_URL")]
        database_url: String,

        #[arg(long, default_value = "all")]
        status: StatusFilter,

        #[arg(long)]
        search: Option<String>,

        #[arg(long, default_value = "./exports")]
        output: PathBuf,
    },
    /// Print one registration by its registration id
    Show {
        reg_id: String,

        #[arg(long, env = "DATABASE_URL")]
        database_url: String,
    },
    /// List the event catalog
    Events {
        #[arg(long)]
        age_group: Option<AgeGroup>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("swimfest_admin={},registration={}", log_level, log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Export {
            database_url,
            status,
            search,
            output,
        } => {
            handle_export(&database_url, DashboardQuery { status, search }, output).await?;
        }
        Commands::Show {
            reg_id,
            database_url,
        } => {
            handle_show(&database_url, &reg_id).await?;
        }
        Commands::Events { age_group } => list_events(age_group),
    }

    Ok(())
}

async fn handle_export(
    database_url: &str,
    query: DashboardQuery,
    output: PathBuf,
) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::new(database_url).await?;

    let dashboard = load_dashboard(&db).await;
    if let Some(notice) = &dashboard.notice {
        return Err(notice.clone().into());
    }

    let csv = dashboard.export(&query);
    let summary = dashboard.summary();

    tokio::fs::create_dir_all(&output).await?;
    let path = output.join(export_filename(Utc::now().date_naive()));
    tokio::fs::write(&path, csv).await?;

    tracing::info!(
        "Wrote {} of {} registrations to {} (paid: {}, pending: {}, attended: {})",
        dashboard.filtered(&query).len(),
        summary.total,
        path.display(),
        summary.paid,
        summary.pending,
        summary.attended
    );

    Ok(())
}

async fn handle_show(database_url: &str, reg_id: &str) -> Result<(), Box<dyn std::error::Error>> {
    use registration::RegistrationStore;

    let db = Database::new(database_url).await?;
    let registration = db.find_by_reg_id(reg_id).await?;

    println!("{}", serde_json::to_string_pretty(&registration)?);
    Ok(())
}

fn list_events(age_group: Option<AgeGroup>) {
    let catalog = EventCatalog::standard();

    let groups = match age_group {
        Some(group) => vec![(group, catalog.events_for_age_group(group))],
        None => catalog.grouped(),
    };

    for (group, events) in groups {
        println!("{}:", group);
        for event in events {
            println!(
                "  {:<14} {} {} ({}) - ₹{}",
                event.id, event.event, event.distance, event.gender, event.fee
            );
        }
    }
}
