use clap::{Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "
{before-help}{name} - {about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}";

#[derive(Parser)]
#[command(name = "dp")]
#[command(about = "Process enforcement for AI-assisted development", long_about = None)]
#[command(version)]
#[command(help_template = HELP_TEMPLATE)]
#[command(subcommand_help_heading = "Commands")]
pub struct Cli {
    /// Project directory (defaults to $CLAUDE_PROJECT_DIR, then the current directory)
    #[arg(short = 'C', long, global = true, value_name = "DIR")]
    pub project_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run health checks and update the degradation level
    Health {
        /// Print the resulting state as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the current degradation level without probing
    Status {
        /// Print the status report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check whether a feature is available (exit status 1 if not)
    Feature {
        /// Feature name, e.g. task_tracking or pre_commit_checks
        name: String,
    },

    /// Freeze the degradation level
    Lock {
        /// Why the level is being held
        reason: String,
    },

    /// Release a locked degradation level
    Unlock,

    /// Reset degradation state to FULL (clears any lock)
    Reset,

    /// Goal-backward verification of a task
    Verify {
        /// JSON file holding the task (id, title, description)
        #[arg(short, long, value_name = "FILE")]
        task: PathBuf,

        /// Code-line threshold for short-file stub rules
        #[arg(long)]
        threshold: Option<usize>,

        #[arg(long)]
        json: bool,
    },

    /// Validate a plan: coverage, completeness, and dependencies
    Validate {
        /// JSON array of tasks (defaults to the builtin task list)
        #[arg(short, long, value_name = "FILE")]
        tasks: Option<PathBuf>,

        /// JSON array of specs to check coverage against
        #[arg(short, long, value_name = "FILE")]
        specs: Option<PathBuf>,

        #[arg(long)]
        json: bool,
    },

    /// Check whether a single file is a stub
    Stub {
        file: PathBuf,

        /// Code-line threshold for short-file stub rules
        #[arg(long)]
        threshold: Option<usize>,

        #[arg(long)]
        json: bool,
    },
}
