//! Campaign Dashboard — command-line front end for the campaign store,
//! dashboard summary, list filtering and the creation form.
//!
//! Results are printed to stdout as JSON; logs go to stderr.

use std::path::PathBuf;
use std::process::ExitCode;

use campaign_core::config::{AppConfig, LoggingConfig};
use campaign_core::CampaignError;
use campaign_management::{
    aggregate, build_campaign, filter, AuthDirectory, CampaignForm, CampaignStatus, CampaignStore,
    InMemoryCampaignStore, SimulatedLatency, StatusFilter, TimeoutStore,
};
use clap::{Args, Parser, Subcommand};
use serde_json::json;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "campaign-dashboard")]
#[command(about = "Advertising campaign dashboard over an in-memory store")]
#[command(version)]
struct Cli {
    /// TOML configuration file
    #[arg(long, env = "CAMPAIGN_DASHBOARD_CONFIG")]
    config: Option<PathBuf>,

    /// Skip simulated store and login delays
    #[arg(long, default_value_t = false)]
    no_latency: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Totals, status counts and recently updated campaigns
    Summary,
    /// Campaign list narrowed by search term and status
    List {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, default_value = "all")]
        status: StatusFilter,
    },
    /// Single campaign by id
    Get { id: String },
    /// Validate the creation form and store the campaign
    Create(CreateArgs),
    /// Pause, resume, complete or archive a campaign
    SetStatus { id: String, status: CampaignStatus },
    /// Remove a campaign
    Delete { id: String },
}

#[derive(Args, Debug)]
struct CreateArgs {
    #[arg(long)]
    name: String,
    #[arg(long, default_value = "")]
    description: String,
    #[arg(long, default_value = "")]
    status: String,
    #[arg(long)]
    budget: String,
    #[arg(long)]
    start_date: String,
    #[arg(long)]
    end_date: String,
    /// Repeatable
    #[arg(long = "location")]
    locations: Vec<String>,
    /// Repeatable
    #[arg(long = "interest")]
    interests: Vec<String>,
    #[arg(long, default_value = "")]
    gender: String,
    #[arg(long, default_value = "")]
    income: String,
    #[arg(long, default_value = "")]
    education: String,
    /// Log in as this demo user to stamp `created_by`
    #[arg(long, requires = "password")]
    email: Option<String>,
    #[arg(long, requires = "email")]
    password: Option<String>,
}

impl CreateArgs {
    fn form(&self) -> CampaignForm {
        CampaignForm {
            name: self.name.clone(),
            description: self.description.clone(),
            status: self.status.clone(),
            budget: self.budget.clone(),
            start_date: self.start_date.clone(),
            end_date: self.end_date.clone(),
            locations: self.locations.clone(),
            interests: self.interests.clone(),
            gender: self.gender.clone(),
            income: self.income.clone(),
            education: self.education.clone(),
            age_range: None,
        }
    }
}

fn init_tracing(cfg: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.filter));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if cfg.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn print_json(value: &serde_json::Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Render expected failures as JSON instead of aborting.
fn report(err: CampaignError) -> anyhow::Result<ExitCode> {
    let kind = match err {
        CampaignError::NotFound { .. } => "not_found",
        CampaignError::Validation { .. } => "validation",
        CampaignError::Unauthorized(_) => "unauthorized",
        CampaignError::Transient(_) => "unavailable",
        _ => return Err(err.into()),
    };
    print_json(&json!({
        "error": kind,
        "field": err.field(),
        "message": err.to_string(),
    }))?;
    Ok(ExitCode::FAILURE)
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let loaded = AppConfig::load(cli.config.as_deref());
    let mut config = match &loaded {
        Ok(config) => config.clone(),
        // An explicitly named file must load.
        Err(e) if cli.config.is_some() => return Err(CampaignError::Config(e.to_string()).into()),
        Err(_) => AppConfig::default(),
    };
    if cli.no_latency {
        config.store.simulate_latency = false;
        config.auth.login_ms = 0;
        config.auth.logout_ms = 0;
    }

    init_tracing(&config.logging);
    if let Err(e) = loaded {
        warn!(error = %e, "Failed to load config, using defaults");
    }

    let latency = SimulatedLatency::from_config(&config.store);
    let inner = if config.store.seed_demo_data {
        InMemoryCampaignStore::with_demo_data(latency)
    } else {
        InMemoryCampaignStore::new(latency)
    };
    let store = TimeoutStore::new(inner, config.store.timeout());
    let auth = AuthDirectory::with_demo_users(&config.auth)?;

    info!(
        simulate_latency = config.store.simulate_latency,
        seeded = config.store.seed_demo_data,
        "Campaign dashboard ready"
    );

    let outcome = run(cli.command, &store, &auth, &config).await;
    match outcome {
        Ok(value) => {
            print_json(&value)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => report(err),
    }
}

async fn run(
    command: Command,
    store: &impl CampaignStore,
    auth: &AuthDirectory,
    config: &AppConfig,
) -> Result<serde_json::Value, CampaignError> {
    let value = match command {
        Command::Summary => {
            let summary = aggregate(&store.list().await?);
            json!({
                "budget_utilization": summary.budget_utilization(),
                "click_through_rate": summary.click_through_rate(),
                "conversion_rate": summary.conversion_rate(),
                "roas": summary.roas(),
                "summary": summary,
            })
        }
        Command::List { search, status } => {
            let campaigns = filter(&store.list().await?, &search, status);
            info!(search = %search, status = %status, matches = campaigns.len(), "Campaign list filtered");
            serde_json::to_value(campaigns)?
        }
        Command::Get { id } => serde_json::to_value(store.get(&id).await?)?,
        Command::Create(args) => {
            let created_by = match (&args.email, &args.password) {
                (Some(email), Some(password)) => {
                    let session = auth.login(email, password).await?;
                    session.user.id
                }
                _ => config.auth.current_user_fallback.clone(),
            };
            let draft = build_campaign(&args.form(), &created_by)?;
            serde_json::to_value(store.create(draft).await?)?
        }
        Command::SetStatus { id, status } => serde_json::to_value(store.set_status(&id, status).await?)?,
        Command::Delete { id } => json!({ "id": id, "deleted": store.delete(&id).await? }),
    };
    Ok(value)
}
