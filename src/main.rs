mod cli;

use anyhow::{bail, Context, Result};
use clap::Parser;
use cli::args::{ClearArgs, ExportArgs, ScanArgs, StudentsArgs};
use cli::{helpers, Cli, Commands};
use mess_queue::desk::export_file_name;
use mess_queue::{Config, Desk, EntryStatus, FileStore, QueueEngine, Refresher, Roster};
use std::path::PathBuf;
use tokio::signal;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments first to get debug flag
    let cli = Cli::parse();

    let level = if cli.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    let config = match &cli.config {
        Some(path) => Config::from_file(path).context("Failed to load config")?,
        None => Config::default(),
    };

    // One store for the whole session, shared by the roster and the engine
    let store = FileStore::new(&config.storage.data_dir);
    let roster = match config.roster_seed()? {
        Some(seed) => Roster::with_seed(&store, seed),
        None => Roster::new(&store),
    };
    let engine = QueueEngine::new(&store).with_capacity(config.queue.capacity());
    let desk = Desk::new(roster, engine);

    match cli.command.unwrap_or(Commands::Status) {
        Commands::Scan(args) => handle_scan_command(&desk, &args)?,
        Commands::Advance => handle_advance_command(&desk)?,
        Commands::Stats => println!("{}", helpers::format_stats(&desk.compute_stats()?)),
        Commands::Status => handle_status_command(&desk)?,
        Commands::Students(args) => handle_students_command(&desk, &args)?,
        Commands::Export(args) => handle_export_command(&desk, &args)?,
        Commands::Clear(args) => handle_clear_command(&desk, &args)?,
        Commands::Watch => handle_watch_command(&desk, &config).await?,
    }

    Ok(())
}

/// Handle scan command. Denials are shown to the user and exit non-zero.
fn handle_scan_command(desk: &Desk<'_, FileStore>, args: &ScanArgs) -> Result<()> {
    match desk.scan_code(&args.code) {
        Ok(outcome) => {
            println!("{}", helpers::format_scan_outcome(&outcome));
            Ok(())
        }
        Err(e) if e.is_denial() => {
            eprintln!("❌ {}", e);
            std::process::exit(2);
        }
        Err(e) => Err(e).context("Failed to process scan"),
    }
}

fn handle_advance_command(desk: &Desk<'_, FileStore>) -> Result<()> {
    match desk.advance_one()? {
        Some(entry) => {
            let name = desk
                .roster()
                .find_by_id(&entry.person_id)?
                .map(|p| p.name)
                .unwrap_or(entry.person_id);
            println!("🍽️ {} moved into the mess", name);
        }
        None => println!("ℹ️ Nobody to move (queue empty or mess full)"),
    }
    Ok(())
}

fn handle_status_command(desk: &Desk<'_, FileStore>) -> Result<()> {
    let now = desk.engine().now();
    println!(
        "{}",
        helpers::format_stage("Waiting queue", &desk.stage(EntryStatus::InQueue)?, now)
    );
    println!(
        "{}",
        helpers::format_stage("In mess", &desk.stage(EntryStatus::InMess)?, now)
    );
    Ok(())
}

fn handle_students_command(desk: &Desk<'_, FileStore>, args: &StudentsArgs) -> Result<()> {
    let people = match &args.term {
        Some(term) => desk.roster().search(term)?,
        None => desk.list_people()?,
    };
    if people.is_empty() {
        println!("ℹ️ No students match");
    } else {
        println!("{}", helpers::format_students(&people));
    }
    Ok(())
}

fn handle_export_command(desk: &Desk<'_, FileStore>, args: &ExportArgs) -> Result<()> {
    let snapshot = desk.export_snapshot()?;
    let path = args.output.clone().unwrap_or_else(|| {
        PathBuf::from(export_file_name(
            snapshot.export_date.with_timezone(&chrono::Local).date_naive(),
        ))
    });

    std::fs::write(&path, snapshot.to_json_pretty()?)
        .with_context(|| format!("Failed to write export file: {}", path.display()))?;
    println!("📦 Exported to {}", path.display());
    Ok(())
}

fn handle_clear_command(desk: &Desk<'_, FileStore>, args: &ClearArgs) -> Result<()> {
    if !args.yes {
        bail!("Clearing today's queue data cannot be undone; re-run with --yes to confirm");
    }
    desk.clear_today()?;
    println!("🧹 Cleared today's queue data");
    Ok(())
}

/// Print statistics on every refresh until Ctrl+C
async fn handle_watch_command(desk: &Desk<'_, FileStore>, config: &Config) -> Result<()> {
    let refresher = Refresher::new(config.queue.refresh_interval());
    println!(
        "👀 Refreshing every {}s, press Ctrl+C to stop",
        refresher.period().as_secs()
    );

    let refresh = refresher.run(None, || {
        println!("\n{}", helpers::format_stats(&desk.compute_stats()?));
        Ok(())
    });

    tokio::select! {
        _ = refresh => {}
        result = signal::ctrl_c() => {
            result.context("Failed to listen for ctrl_c")?;
            println!("\n🛑 Received Ctrl+C, stopping");
        }
    }
    Ok(())
}
