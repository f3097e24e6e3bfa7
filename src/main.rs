use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use mono_release::cli::orchestration::{run_release_workflow, WorkflowArgs};
use mono_release::config;
use mono_release::git::Git2Repository;
use mono_release::ui;

#[derive(clap::Parser)]
#[command(
    name = "mono-release",
    version,
    about = "Compute per-workspace semantic version bumps in a monorepo"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, default_value = ".", help = "Monorepo root directory")]
    root: PathBuf,

    #[arg(short, long, help = "Analyse commits since this tag, branch or commit")]
    since: Option<String>,

    #[arg(short, long, help = "Skip confirmation prompts")]
    force: bool,

    #[arg(long, help = "Preview what would happen without making changes")]
    dry_run: bool,

    #[arg(long, help = "Print the report as JSON")]
    json: bool,

    #[arg(short, long, help = "Enable debug logging")]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Report a fatal error and exit, as a JSON object on stdout in `--json` mode
fn fail(json: bool, message: String) -> ! {
    if json {
        println!("{}", serde_json::json!({ "error": message }));
    } else {
        ui::display_error(&message);
    }
    std::process::exit(1);
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = match config::load_config(args.config.as_deref(), &args.root) {
        Ok(cfg) => cfg,
        Err(e) => fail(args.json, format!("Error loading config: {}", e)),
    };

    let repo = match Git2Repository::open(&args.root) {
        Ok(repo) => repo,
        Err(e) => fail(args.json, format!("Git repository error: {}", e)),
    };

    let workflow_args = WorkflowArgs {
        root: args.root.clone(),
        since: args.since.clone(),
        force: args.force,
        dry_run: args.dry_run,
        interactive: !args.json,
    };

    let json = args.json;
    let mut prompted = false;
    let result = run_release_workflow(&repo, &workflow_args, &config, |report| {
        prompted = true;
        ui::display_release_plan(report);
        ui::display_pending_writes(report);
        Ok(ui::confirm_action("Rewrite these manifests?")?)
    });

    let result = match result {
        Ok(result) => result,
        Err(e) => fail(json, e.to_string()),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    for warning in &result.report.warnings {
        ui::display_boundary_warning(warning);
    }

    if !prompted {
        ui::display_release_plan(&result.report);
    }

    if result.dry_run {
        ui::display_changelogs(&result.report);
        ui::display_status("Dry run: no manifest was written");
        return Ok(());
    }

    if !result.confirmed {
        println!("Operation cancelled by user.");
        return Ok(());
    }

    ui::display_changelogs(&result.report);
    for name in &result.written {
        ui::display_success(&format!("Updated manifest of {}", name));
    }
    if result.written.is_empty() {
        ui::display_status("Nothing to update");
    }

    Ok(())
}
