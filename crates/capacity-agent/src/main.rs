use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::{info, warn};

use capacity_agent::config::{default_config_path, load_config};
use capacity_agent::logging::{self, LogFormat};
use capacity_agent::notify::OutboxDispatcher;
use capacity_agent::pipeline::{NoopProgress, Pipeline, PipelineConfig, PipelineState};
use capacity_agent::{open_source, AgentConfig, FailureMode, PlanningMode};

#[derive(Parser)]
#[command(name = "capacity-agent")]
#[command(about = "Storage facility utilization monitor and reallocation planner")]
#[command(version)]
struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the full pipeline and deliver notifications
    Run(RunArgs),
    /// Print reallocation recommendations without notifying anyone
    Plan(CommonArgs),
}

#[derive(Args)]
struct CommonArgs {
    /// Facility snapshot (.csv or .json)
    #[arg(long)]
    data: PathBuf,

    /// Configuration file; defaults to the user config directory if present
    #[arg(long, env = "CAPACITY_AGENT_CONFIG")]
    config: Option<PathBuf>,

    /// Utilization threshold in percent
    #[arg(long)]
    threshold: Option<f64>,

    #[arg(long, value_enum)]
    planning_mode: Option<ModeArg>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct RunArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Write notifications as message files into this directory instead of logging them
    #[arg(long)]
    outbox: Option<PathBuf>,

    /// Build the plan but do not render or send notifications
    #[arg(long)]
    no_notify: bool,

    /// Skip the remaining stages after the first failure
    #[arg(long)]
    fail_fast: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Legacy,
    CapacityAware,
}

impl From<ModeArg> for PlanningMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Legacy => PlanningMode::Legacy,
            ModeArg::CapacityAware => PlanningMode::CapacityAware,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(if cli.log_json {
        LogFormat::Json
    } else {
        LogFormat::Text
    })
    .context("initializing logging")?;

    match cli.command {
        Command::Run(args) => run(args),
        Command::Plan(args) => plan(args),
    }
}

fn resolve_config(args: &CommonArgs) -> anyhow::Result<AgentConfig> {
    let path = args
        .config
        .clone()
        .or_else(|| default_config_path().filter(|p| p.exists()));

    let mut config = match path {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            load_config(&path).with_context(|| format!("loading {}", path.display()))?
        }
        None => AgentConfig::default(),
    };

    if let Some(threshold) = args.threshold {
        config.threshold = threshold;
    }
    if let Some(mode) = args.planning_mode {
        config.planning_mode = mode.into();
    }
    Ok(config)
}

fn build_pipeline(args: &CommonArgs, config: &AgentConfig) -> anyhow::Result<Pipeline> {
    let source = open_source(&args.data)
        .with_context(|| format!("opening {}", args.data.display()))?;
    let pipeline_config =
        PipelineConfig::from_config(config).context("invalid pipeline configuration")?;
    Ok(Pipeline::from_config(
        Arc::new(pipeline_config),
        Arc::from(source),
    ))
}

fn run(args: RunArgs) -> anyhow::Result<()> {
    let mut config = resolve_config(&args.common)?;
    if args.no_notify {
        config.notifications_enabled = false;
    }
    if args.fail_fast {
        config.failure_mode = FailureMode::FailFast;
    }

    let mut pipeline = build_pipeline(&args.common, &config)?;
    if let Some(dir) = &args.outbox {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("creating outbox {}", dir.display()))?;
        pipeline = pipeline.with_dispatcher(Arc::new(OutboxDispatcher::new(dir)));
    }

    let state = pipeline.run(&NoopProgress);

    if args.common.json {
        println!("{}", serde_json::to_string_pretty(&state)?);
    } else {
        print_summary(&state);
    }

    if let Some(error) = &state.error {
        warn!(stage = %error.stage, kind = %error.kind, "Run finished with errors");
        bail!("{}", state.status);
    }
    Ok(())
}

fn plan(args: CommonArgs) -> anyhow::Result<()> {
    let mut config = resolve_config(&args)?;
    config.notifications_enabled = false;
    config.insights_enabled = false;

    let state = build_pipeline(&args, &config)?.run(&NoopProgress);
    if let Some(error) = &state.error {
        bail!("{}: {}", error.kind, error.message);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&state.recommendations)?);
        return Ok(());
    }

    if state.recommendations.is_empty() {
        println!("No reallocation needed at {}% threshold.", config.threshold);
    }
    for rec in &state.recommendations {
        println!(
            "[{}] {} ({:.2}%) -> {} ({:.2}%): {} pallets",
            rec.region,
            rec.from_facility.name,
            rec.from_current_util,
            rec.to_facility.name,
            rec.to_current_util,
            rec.pallets_to_move
        );
    }
    Ok(())
}

fn print_summary(state: &PipelineState) {
    println!("Run {}", state.run_id);
    println!("  Facilities:      {}", state.facilities.len());
    println!("  Over-utilized:   {}", state.overutilized.len());
    println!("  Under-utilized:  {}", state.underutilized.len());
    println!("  Recommendations: {}", state.recommendations.len());
    println!(
        "  Notifications:   {}/{} delivered",
        state.delivered_count(),
        state.dispatch_results.len()
    );
    if let Some(insight) = &state.insight {
        println!();
        println!("{}", insight);
    }
    println!();
    println!("Status: {}", state.status);
}
