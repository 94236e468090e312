mod cli;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_verbosity_flag::{LogLevel, Verbosity};
use macros_rs::string;

use minder::process;

#[derive(Copy, Clone, Debug, Default)]
struct NoneLevel;
impl LogLevel for NoneLevel {
    fn default() -> Option<log::Level> {
        None
    }
}

#[derive(Parser)]
#[command(
    name = "minder",
    version,
    about = "Daemon-less process manager: start, track, stop and restart long-running processes"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[clap(flatten)]
    verbose: Verbosity<NoneLevel>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a process from a script
    Start {
        /// Script to run
        script: String,
        /// Process name (derived from the script when omitted)
        #[arg(short, long)]
        name: Option<String>,
        /// Interpreter used to run the script
        #[arg(short, long, default_value = process::DEFAULT_INTERPRETER)]
        interpreter: String,
        /// Working directory
        #[arg(long)]
        cwd: Option<PathBuf>,
        /// Record a watch intent on the process
        #[arg(long)]
        watch: bool,
    },
    /// Stop a process
    #[command(visible_alias = "kill")]
    Stop {
        /// Process name or id
        name: String,
    },
    /// Restart a process
    Restart {
        /// Process name or id
        name: String,
    },
    /// Stop every process
    StopAll,
    /// Stop then remove a process
    #[command(visible_alias = "rm", visible_alias = "del")]
    Delete {
        /// Process name or id
        name: String,
    },
    /// List all processes
    #[command(visible_alias = "status", visible_alias = "ls")]
    Ps {
        /// Format output
        #[arg(long, default_value_t = string!("default"))]
        format: String,
    },
    /// Show details for a process
    #[command(visible_alias = "show")]
    Describe {
        /// Process name or id
        name: String,
        /// Format output
        #[arg(long, default_value_t = string!("default"))]
        format: String,
    },
    /// Show logs for a process
    Logs {
        /// Process name or id
        name: String,
        /// Number of lines to display from the end of each log file
        #[arg(short = 'n', long, default_value_t = 50)]
        lines: usize,
        /// Follow log output (like tail -f)
        #[arg(short, long)]
        follow: bool,
        /// Show only error logs
        #[arg(long)]
        error: bool,
    },
    /// Truncate logs for one process, or for all of them
    Flush {
        /// Process name or id
        name: Option<String>,
    },
    /// Start every process listed in a config file
    #[command(visible_alias = "ecosystem")]
    Startfile {
        /// Path to a JSON config with an `apps` array
        config: PathBuf,
    },
    /// Show the data directory and process counts
    Info,
}

fn main() {
    let cli = Cli::parse();
    let mut env = env_logger::Builder::new();
    let level = cli.verbose.log_level_filter();
    env.filter_level(level).init();

    match &cli.command {
        Commands::Start {
            script,
            name,
            interpreter,
            cwd,
            watch,
        } => cli::start(script, name, interpreter, cwd, *watch),
        Commands::Stop { name } => cli::stop(name),
        Commands::Restart { name } => cli::restart(name),
        Commands::StopAll => cli::stop_all(),
        Commands::Delete { name } => cli::remove(name),
        Commands::Ps { format } => cli::list(format),
        Commands::Describe { name, format } => cli::describe(name, format),
        Commands::Logs {
            name,
            lines,
            follow,
            error,
        } => cli::logs(name, lines, *follow, *error),
        Commands::Flush { name } => cli::flush(name),
        Commands::Startfile { config } => cli::startfile(config),
        Commands::Info => cli::info(),
    }

    // Wait out any force-kill timers scheduled by stop before exiting; the
    // stop operation itself returns without awaiting them.
    process::join_deferred();
}
