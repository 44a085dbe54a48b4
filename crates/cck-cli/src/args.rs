use crate::types::{HistoryStyle, LogLevel, OutputFormat, TemplateName};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cck")]
#[command(about = "Keep CLAUDE.md in sync with your codebase", long_about = None)]
#[command(version)]
pub struct Cli {
    #[arg(long, default_value = "plain", global = true)]
    pub format: OutputFormat,

    #[arg(long, default_value = "warn", global = true)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Scan the project and update the generated region of CLAUDE.md")]
    Sync {
        #[arg(default_value = ".")]
        path: PathBuf,

        #[arg(short, long, default_value = "CLAUDE.md", help = "Output file, relative to PATH")]
        output: String,

        #[arg(long, help = "Print the merged document instead of writing it")]
        dry_run: bool,
    },

    #[command(about = "Show detected project facts without writing anything")]
    Info {
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    #[command(about = "Poll for changes and re-sync until interrupted")]
    Watch {
        #[arg(default_value = ".")]
        path: PathBuf,

        #[arg(short, long, default_value = "CLAUDE.md")]
        output: String,

        #[arg(
            long,
            default_value_t = 30,
            value_parser = clap::value_parser!(u64).range(1..),
            help = "Seconds between polls"
        )]
        interval: u64,
    },

    #[command(about = "Write a starter config file")]
    Init {
        #[arg(default_value = ".")]
        path: PathBuf,

        #[arg(long, default_value = "minimal")]
        template: TemplateName,

        #[arg(long, help = "Write ./cck.toml instead of .claude/cck.toml")]
        root: bool,

        #[arg(long, help = "Overwrite an existing config")]
        force: bool,
    },

    #[command(about = "Show recorded file changes and operations, newest first")]
    History {
        #[arg(default_value = ".")]
        path: PathBuf,

        #[arg(long, help = "Defaults to reminder.history_limit")]
        limit: Option<usize>,

        #[arg(long, help = "Defaults to reminder.format")]
        style: Option<HistoryStyle>,
    },

    #[command(about = "Print the per-turn reminder text")]
    Reminder {
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    #[command(about = "Record a tool operation (for editor hooks)")]
    LogOp {
        operation_type: String,

        summary: String,

        #[arg(long, default_value = ".")]
        path: PathBuf,
    },
}
