//! # Taskform
//!
//! A terminal form for entering tasks. Each submission is validated; accepted
//! tasks are printed and the form resets, rejected ones show a message next
//! to every field that failed.
//!
//! ## Rules
//!
//! *   **Name**: required, 8 to 15 characters.
//! *   **Due date**: required, `DD/MM/YYYY`, today or later.
//! *   **Priority**: `Basse`, `Moyenne` or `Elevée`. Defaults to `Basse`.
//! *   **Completed**: a flag, defaults to false.
//!
//! ## Usage
//!
//! ### Interactive Mode (TUI)
//!
//! ```bash
//! taskform
//! # or explicitly
//! taskform ui
//! ```
//!
//! *   `Tab` / `↑` / `↓`: Move between fields
//! *   `←` / `→` / `Space`: Change priority
//! *   `Space`: Toggle completed
//! *   `Enter`: Submit
//! *   `Esc`: Reset the form
//! *   `q` (outside text fields) or `Ctrl-C`: Quit
//!
//! Tasks accepted during the session are printed as JSON lines on exit.
//!
//! ### Command Line Interface (CLI)
//!
//! ```bash
//! taskform add "Write report" --due 01/12/2030 --priority Moyenne
//! taskform --locale en add "Short" --due 31/13/2030
//! echo '{"name":"TaskTest1","dueDate":"01/01/2099"}' | taskform check
//! ```
//!
//! `add` and `check` exit with 0 when the task is valid, 1 when it is not and
//! 2 on any other error.
//!
//! ## Configuration
//!
//! Read from `~/.config/taskform/config.toml` (or `TASKFORM_CONFIG`):
//!
//! ```toml
//! locale = "fr"   # or "en"
//! output = "table" # or "json"
//! ```
//!
//! `TASKFORM_LOCALE` overrides the locale. Set `RUST_LOG=debug` for logs.

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use env_logger::Env;
use log::debug;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use taskform::clock::SystemClock;
use taskform::commands::{cmd_add, cmd_check, CommandError};
use taskform::config::{Config, OutputFormat};
use taskform::messages::Locale;
use taskform::models::TaskInput;
use taskform::tui::run_tui;

#[derive(Parser)]
#[command(name = "taskform")]
#[command(about = "Terminal task entry form with validation", long_about = None)]
struct Cli {
    /// Language of messages (fr, en)
    #[arg(short, long, global = true, value_enum)]
    locale: Option<Locale>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a task given as arguments
    Add {
        /// Task name (quoted if it has spaces)
        name: String,
        /// Due date in DD/MM/YYYY
        #[arg(short, long)]
        due: String,
        /// Priority (Basse, Moyenne, Elevée)
        #[arg(short, long)]
        priority: Option<String>,
        /// Mark the task as completed
        #[arg(short, long)]
        completed: bool,
        /// Print the accepted task as JSON
        #[arg(long)]
        json: bool,
    },
    /// Validate a task given as JSON (file or stdin)
    Check {
        /// JSON file, or `-` for stdin
        file: Option<PathBuf>,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell, elvish)
        shell: String,
    },
    /// Open interactive form
    Ui,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::from(2);
        }
    };
    let locale = cli.locale.unwrap_or(config.locale);
    debug!("Using locale {}", locale);

    match cli.command {
        Some(Commands::Add { name, due, priority, completed, json }) => {
            let input = TaskInput {
                name: Some(name),
                due_date: Some(due),
                priority,
                is_completed: Some(completed),
            };
            let format = if json { OutputFormat::Json } else { config.output };
            match cmd_add(input, &SystemClock, locale, format, false) {
                Ok(_) => ExitCode::SUCCESS,
                Err(_) => ExitCode::from(1),
            }
        }
        Some(Commands::Check { file }) => match cmd_check(file.as_deref(), &SystemClock, locale, false) {
            Ok(_) => ExitCode::SUCCESS,
            Err(CommandError::Invalid(_)) => ExitCode::from(1),
            Err(e) => {
                eprintln!("{}", e);
                ExitCode::from(2)
            }
        },
        Some(Commands::Completions { shell }) => {
            let shell_enum = match shell.as_str() {
                "bash" => Shell::Bash,
                "zsh" => Shell::Zsh,
                "fish" => Shell::Fish,
                "powershell" => Shell::PowerShell,
                "elvish" => Shell::Elvish,
                _ => {
                    eprintln!("Unsupported shell: {}", shell);
                    return ExitCode::from(2);
                }
            };
            let mut cmd = Cli::command();
            generate(shell_enum, &mut cmd, "taskform", &mut io::stdout());
            ExitCode::SUCCESS
        }
        Some(Commands::Ui) | None => match run_tui(locale) {
            Ok(records) => {
                for record in records {
                    match serde_json::to_string(&record) {
                        Ok(line) => println!("{}", line),
                        Err(e) => eprintln!("Failed to serialize task: {}", e),
                    }
                }
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Error running TUI: {}", e);
                ExitCode::from(2)
            }
        },
    }
}
