//! somsov CLI - SOM/SOV market analysis

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use clap::{Parser, Subcommand};
use colored::Colorize;
use tokio_stream::StreamExt;

use somsov::agent::{
    call_agent, create_transport, AgentRole, AnalysisCoordinatorResult, NormalizedAgentResponse,
    AGENT_IDS,
};
use somsov::analysis::{
    spawn_analysis, AnalysisError, AnalysisEvent, AnalysisRequest, AnalysisRunner,
};
use somsov::config::{mask_api_key, SomSovConfig};
use somsov::error::{FixSuggestion, Result, SomSovError};
use somsov::preview::{load_input_file, parse_preview, EXPECTED_COLUMNS};

#[derive(Parser)]
#[command(name = "somsov")]
#[command(about = "SOM/SOV market analysis dashboard")]
#[command(version)]
struct Cli {
    /// Defaults to the dashboard
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the dashboard
    Tui {
        /// Market data to pre-load (.csv)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Agent transport (http, mock)
        #[arg(short, long, default_value = "http")]
        agent: String,
    },

    /// Run one analysis without the dashboard
    Analyze {
        /// Market data file (.csv)
        file: PathBuf,

        /// Agent transport (http, mock)
        #[arg(short, long, default_value = "http")]
        agent: String,

        /// Analysis period (e.g. "March 2024")
        #[arg(short, long)]
        period: Option<String>,

        /// Competitor brand, repeatable
        #[arg(short, long = "competitor")]
        competitors: Vec<String>,

        /// Print the normalized response as JSON
        #[arg(long)]
        json: bool,

        /// Skip the animated progress steps
        #[arg(long)]
        no_delay: bool,
    },

    /// Show the preview grid for a data file
    Preview {
        /// Market data file (.csv)
        file: PathBuf,
    },

    /// Send one message to a single agent
    Ask {
        /// coordinator, data-validation, som-sov-calculator,
        /// competitive-intelligence, strategic-advisor
        #[arg(short, long)]
        role: String,

        message: String,

        /// Agent transport (http, mock)
        #[arg(short, long, default_value = "http")]
        agent: String,
    },

    /// List the agent roles and their identifiers
    Agents,

    /// Inspect or create the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Print the config file location
    Path,
    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() {
    // Load .env file (ignore if not present)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Tui {
        input: None,
        agent: "http".to_string(),
    });

    init_tracing(matches!(command, Commands::Tui { .. }));

    let result = match command {
        Commands::Tui { input, agent } => {
            if let Err(e) = run_dashboard(input, &agent).await {
                eprintln!("{} {:#}", "Error:".red().bold(), e);
                if let Some(suggestion) = e
                    .downcast_ref::<SomSovError>()
                    .and_then(|e| e.fix_suggestion())
                {
                    eprintln!("  {} {}", "Fix:".yellow(), suggestion);
                }
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Analyze {
            file,
            agent,
            period,
            competitors,
            json,
            no_delay,
        } => analyze(file, &agent, period, competitors, json, no_delay).await,
        Commands::Preview { file } => preview(file),
        Commands::Ask {
            role,
            message,
            agent,
        } => ask(&role, &message, &agent).await,
        Commands::Agents => {
            list_agents();
            Ok(())
        }
        Commands::Config { action } => config_command(action),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        if let Some(suggestion) = e.fix_suggestion() {
            eprintln!("  {} {}", "Fix:".yellow(), suggestion);
        }
        std::process::exit(1);
    }
}

/// The dashboard owns the terminal, so it logs to a file instead of stderr
fn init_tracing(to_file: bool) {
    let filter = || {
        tracing_subscriber::EnvFilter::from_default_env()
            .add_directive(tracing::Level::INFO.into())
    };

    if to_file {
        let path = SomSovConfig::log_path();
        let file = path
            .parent()
            .map_or(Ok(()), fs::create_dir_all)
            .and_then(|_| OpenOptions::new().create(true).append(true).open(&path));
        if let Ok(file) = file {
            tracing_subscriber::fmt()
                .with_env_filter(filter())
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        return;
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_writer(std::io::stderr)
        .init();
}

fn load_config() -> Result<SomSovConfig> {
    Ok(SomSovConfig::load()?.with_env())
}

async fn run_dashboard(input: Option<PathBuf>, agent: &str) -> anyhow::Result<()> {
    let config = load_config()?;
    let transport = create_transport(agent, &config)?;
    somsov::tui::run(config, transport, input).await
}

// ─────────────────────────────────────────────────────────────────────────────
// Headless commands
// ─────────────────────────────────────────────────────────────────────────────

async fn analyze(
    file: PathBuf,
    agent: &str,
    period: Option<String>,
    competitors: Vec<String>,
    json: bool,
    no_delay: bool,
) -> Result<()> {
    let config = load_config()?;
    let data = load_input_file(&file)?;
    let transport = create_transport(agent, &config)?;

    let mut runner = AnalysisRunner::from_settings(transport, &config.analysis);
    if no_delay {
        runner = runner.without_simulated_progress();
    }

    let period = period.unwrap_or_else(|| config.analysis.default_period.clone());
    let request = AnalysisRequest::new(data)
        .with_period(period)
        .with_competitors(&competitors.join(","));

    if !json {
        println!(
            "{} Analyzing {} via {} agent",
            "→".cyan(),
            file.display().to_string().cyan().bold(),
            runner.transport_name().cyan()
        );
    }

    let mut events = spawn_analysis(Arc::new(runner), request).into_stream();
    while let Some(event) = events.next().await {
        match event {
            AnalysisEvent::Progress(progress) => {
                if !json && progress.step_index().is_some_and(|i| i < 4) {
                    println!("  {} {}", "•".yellow(), progress.label());
                }
            }
            AnalysisEvent::Completed(response) => {
                if json {
                    println!("{}", serde_json::to_string_pretty(&response)?);
                } else {
                    print_analysis(&response);
                }
                return Ok(());
            }
            AnalysisEvent::Failed(error) => return Err(error.into()),
        }
    }

    Err(AnalysisError::Interrupted.into())
}

fn print_analysis(response: &NormalizedAgentResponse) {
    println!("{} Analysis complete", "✓".green());

    let Some(result) = response
        .typed_result(AgentRole::Coordinator)
        .and_then(|r| r.as_coordinator().cloned())
    else {
        if let Some(raw) = response.result() {
            println!("{}", serde_json::to_string_pretty(raw).unwrap_or_default());
        }
        return;
    };

    print_coordinator_result(&result);
}

fn print_coordinator_result(result: &AnalysisCoordinatorResult) {
    let summary = &result.validation_summary;
    println!();
    println!(
        "{} {}  ({} brands analyzed, {} issues)",
        "Data Quality:".cyan().bold(),
        summary.data_quality_status,
        summary.total_brands_analyzed,
        summary.issues_found.len()
    );

    let metrics = &result.market_metrics;
    println!();
    println!("{}", "Metrics".cyan().bold());
    println!("  Total Market Share   {:.1}%", metrics.total_market_share);
    println!("  Total Voice Share    {:.1}%", metrics.total_voice_share);
    println!("  Top Brand SOM        {:.1}%", metrics.top_brand_som);
    println!("  Top Brand SOV        {:.1}%", metrics.top_brand_sov);
    println!(
        "  Efficiency Leader    {}  {}",
        metrics.efficiency_leader.bold(),
        "(highest SOV/SOM ratio)".dimmed()
    );

    let insights = &result.competitive_insights;
    print_list("Market Trends", &insights.market_trends);
    print_list("Competitor Activities", &insights.competitor_activities);
    print_list("Industry Developments", &insights.industry_developments);

    let recs = &result.strategic_recommendations;
    print_list("Priority Actions", &recs.priority_actions);
    print_list("Risk Areas", &recs.risk_areas);
    print_list("Opportunity Areas", &recs.opportunity_areas);
}

fn print_list(title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    println!();
    println!("{}", title.cyan().bold());
    for item in items {
        println!("  • {}", item);
    }
}

fn preview(file: PathBuf) -> Result<()> {
    let text = load_input_file(&file)?;
    let grid = parse_preview(&text);

    if grid.is_empty() {
        println!("{} {} is empty", "!".yellow(), file.display());
        return Ok(());
    }

    println!(
        "{} {} ({} rows, {} columns)",
        "Preview:".cyan().bold(),
        file.display(),
        grid.len(),
        grid.column_count()
    );
    for row in grid.rows() {
        println!("  {}", row.join(" | "));
    }

    println!();
    println!("  Expected columns: {}", EXPECTED_COLUMNS.join(", "));
    let missing = grid.missing_columns();
    if missing.is_empty() {
        println!("  {} All expected columns present", "✓".green());
    } else {
        println!("  {} Missing: {}", "!".yellow(), missing.join(", "));
    }

    Ok(())
}

async fn ask(role: &str, message: &str, agent: &str) -> Result<()> {
    let role: AgentRole = role.parse()?;
    let config = load_config()?;
    let transport = create_transport(agent, &config)?;

    let response = call_agent(transport.as_ref(), message, role).await;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

fn list_agents() {
    println!("{}", "Agents:".cyan().bold());
    for (role, id) in AGENT_IDS {
        let note = if role == AgentRole::Coordinator {
            "  (used by analyze)".dimmed().to_string()
        } else {
            String::new()
        };
        println!(
            "  {:<26} {} {}{}",
            role.display_name(),
            format!("{:<26}", role.slug()).cyan(),
            id,
            note
        );
    }
}

fn config_command(action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Path => {
            println!("{}", SomSovConfig::config_path().display());
        }
        ConfigAction::Show => {
            let mut config = load_config()?;
            config.agent.api_key = config.agent.api_key.map(|k| mask_api_key(&k, 8));
            let toml = toml::to_string_pretty(&config).map_err(|e| SomSovError::ConfigError {
                reason: format!("Failed to serialize config: {}", e),
            })?;
            println!("{}", toml);
        }
        ConfigAction::Init { force } => {
            let path = SomSovConfig::config_path();
            if path.exists() && !force {
                return Err(SomSovError::ConfigError {
                    reason: format!("{} already exists (use --force to overwrite)", path.display()),
                });
            }
            let path = SomSovConfig::default().save()?;
            println!("{} Wrote {}", "✓".green(), path.display());
        }
    }
    Ok(())
}
