//! tf - CLI entry point
//!
//! Inspects and drives travel-planning sessions against the file-backed
//! session store. The conversational host uses the same library paths;
//! this bin exists for operators and debugging.

use std::sync::Arc;

use clap::Parser;
use colored::Colorize;
use eyre::{Context, Result};
use tracing::debug;

use sessionstore::FileStore;
use tripflow::cli::{Cli, Command, OutputFormat};
use tripflow::config::Config;
use tripflow::domain::{ActionType, SegmentStatus, WorkflowStep};
use tripflow::events::{create_history_bus, spawn_history_logger};
use tripflow::slots::all_segments;
use tripflow::state::WorkflowManager;

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) {
    let level = match cli_log_level
        .or(config_log_level)
        .map(str::to_uppercase)
        .as_deref()
    {
        Some("TRACE") => tracing::Level::TRACE,
        Some("DEBUG") => tracing::Level::DEBUG,
        Some("WARN") | Some("WARNING") => tracing::Level::WARN,
        Some("ERROR") => tracing::Level::ERROR,
        _ => tracing::Level::INFO,
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    setup_logging(cli.log_level.as_deref(), config.log_level.as_deref());

    let store = FileStore::open(&config.store_path).context("Failed to open session store")?;
    let history = create_history_bus();
    let _logger = spawn_history_logger(&config.history_dir, &history);
    let manager = WorkflowManager::with_history(Arc::new(store), history);

    debug!(command = ?cli.command, "main: dispatching command");
    match cli.command {
        Command::Show { session, format } => cmd_show(&manager, &session, format).await,
        Command::Step { session, step } => cmd_step(&manager, &session, &step).await,
        Command::Action { session, action } => cmd_action(&manager, &session, &action).await,
        Command::Reset { session } => cmd_reset(&manager, &session).await,
        Command::Sessions => cmd_sessions(&manager).await,
        Command::Init { path } => cmd_init(&config, path),
    }
}

/// Write the active configuration to disk
fn cmd_init(config: &Config, path: Option<std::path::PathBuf>) -> Result<()> {
    debug!(?path, "cmd_init: called");
    let path = match path {
        Some(p) => p,
        None => dirs::config_dir()
            .ok_or_else(|| eyre::eyre!("No config directory available"))?
            .join("tripflow")
            .join("config.yml"),
    };
    config.save(&path).context("Failed to write config")?;
    println!("Wrote config to {}", path.display());
    Ok(())
}

/// Show a session's workflow state and trip plan
async fn cmd_show(manager: &WorkflowManager, session: &str, format: OutputFormat) -> Result<()> {
    debug!(%session, ?format, "cmd_show: called");
    let workflow = manager.workflow_state(session).await?;
    let plan = manager.trip_plan(session).await?;

    match format {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "session_id": session,
                "workflow": workflow,
                "plan": plan,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Text => {
            println!("Session {}", session.bold());
            match &workflow {
                Some(state) => {
                    println!("  Step: {}", state.step.to_string().cyan());
                    println!("  Slots complete: {}", state.slots_complete);
                }
                None => println!("  No workflow state"),
            }
            match &plan {
                Some(plan) => {
                    println!("  Mode: {} ({})", plan.mode, plan.trip_type);
                    println!(
                        "  Plan complete: {}",
                        if plan.is_complete() { "yes".green() } else { "no".yellow() }
                    );
                    for (kind, index, segment) in all_segments(plan) {
                        let status = match segment.status {
                            SegmentStatus::Confirmed => segment.status.to_string().green(),
                            SegmentStatus::Selecting => segment.status.to_string().cyan(),
                            _ => segment.status.to_string().yellow(),
                        };
                        println!(
                            "  {}[{}]: {} ({} options)",
                            kind,
                            index,
                            status,
                            segment.options_pool.len()
                        );
                    }
                }
                None => println!("  No trip plan"),
            }
        }
    }

    Ok(())
}

/// Request a workflow step
async fn cmd_step(manager: &WorkflowManager, session: &str, step: &str) -> Result<()> {
    debug!(%session, %step, "cmd_step: called");
    let before = manager
        .workflow_state(session)
        .await?
        .map(|s| s.step)
        .unwrap_or_default();
    let requested = WorkflowStep::parse_lenient(step);
    let state = manager.set_step(session, None, requested).await?;

    if state.step == requested {
        println!("Session '{}': {} -> {}", session, before, state.step);
    } else {
        println!(
            "Session '{}': transition {} -> {} rejected, step remains {}",
            session, before, requested, state.step
        );
    }
    Ok(())
}

/// Apply a controller action
async fn cmd_action(manager: &WorkflowManager, session: &str, action: &str) -> Result<()> {
    debug!(%session, %action, "cmd_action: called");
    let decoded = ActionType::decode(action);
    let state = manager.apply_action(session, None, decoded).await?;
    println!("Session '{}': {} applied, step is {}", session, decoded, state.step);
    Ok(())
}

/// Clear a session's workflow state and trip plan
async fn cmd_reset(manager: &WorkflowManager, session: &str) -> Result<()> {
    debug!(%session, "cmd_reset: called");
    let had_workflow = manager.clear_workflow(session).await?;
    let had_plan = manager.clear_trip_plan(session).await?;

    if had_workflow || had_plan {
        println!("Session '{}' reset", session);
    } else {
        println!("Session '{}' had no state", session);
    }
    Ok(())
}

/// List sessions with workflow state
async fn cmd_sessions(manager: &WorkflowManager) -> Result<()> {
    debug!("cmd_sessions: called");
    let ids = manager.session_ids().await?;
    if ids.is_empty() {
        println!("No sessions found");
        return Ok(());
    }
    for id in ids {
        let step = manager
            .workflow_state(&id)
            .await?
            .map(|s| s.step.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        println!("{:<40} {}", id, step);
    }
    Ok(())
}
