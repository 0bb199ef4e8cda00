use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to config YAML file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging for internal details
    #[arg(short, long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Check a student in or out by scan code
    Scan(ScanArgs),
    /// Move the next queued student into the mess
    Advance,
    /// Show queue statistics
    Stats,
    /// Show who is queued and who is in the mess (default)
    Status,
    /// List registered students, optionally filtered
    Students(StudentsArgs),
    /// Write a JSON backup of students and queue entries
    Export(ExportArgs),
    /// Discard today's queue entries
    Clear(ClearArgs),
    /// Print statistics on every refresh until Ctrl+C
    Watch,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ScanArgs {
    /// Scan code printed on the student's card
    pub code: String,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct StudentsArgs {
    /// Match against name, roll number or e-mail, ignoring case
    pub term: Option<String>,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ExportArgs {
    /// Output file (default: mess-queue-data-<date>.json)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ClearArgs {
    /// Confirm the irreversible clear
    #[arg(long)]
    pub yes: bool,
}
