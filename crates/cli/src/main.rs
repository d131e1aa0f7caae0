// squares - terminal editor for grids of titled, colored code squares

mod exit_codes;
mod layout;
mod tui;
mod util;

use std::fs::OpenOptions;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use squares_config::Settings;
use squares_engine::{AutoColor, Board};
use squares_io::{json, SqliteStore};

use exit_codes::{EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "squares")]
#[command(about = "Grids of titled, colored code squares, edited from the keyboard")]
#[command(version)]
struct Cli {
    /// Square database (overrides storage.path)
    #[arg(long, global = true, env = "SQUARES_DB", value_name = "PATH")]
    db: Option<PathBuf>,

    /// Settings file (default: <config dir>/squares/settings.json)
    #[arg(long, global = true, value_name = "PATH")]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every stored square as JSON
    #[command(after_help = "\
Examples:
  squares dump
  squares dump -o squares.json
  squares --db board.db dump | jq '.[].title'")]
    Dump {
        /// Output file (omit for stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn usage(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self { code: EXIT_ERROR, message: msg.into(), hint: None }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Log to `squares.log` next to the database so the terminal UI stays clean.
/// Filter from `SQUARES_LOG`, default `warn`.
fn init_logging(db_path: &Path) {
    let dir = db_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(Settings::data_dir);
    if std::fs::create_dir_all(&dir).is_err() {
        return;
    }
    let Ok(file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("squares.log"))
    else {
        return;
    };

    let _ = env_logger::Builder::from_env(env_logger::Env::default().filter_or("SQUARES_LOG", "warn"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init();
}

fn open_board(settings: &Settings, db_path: &Path) -> Result<Board<SqliteStore>, CliError> {
    let grids = layout::build(settings).map_err(|e| {
        let path = Settings::config_path_display();
        CliError::usage(format!("unusable board layout: {}", e))
            .with_hint(format!("check grid and navigation settings in {}", path))
    })?;
    let store = SqliteStore::open(db_path).map_err(|e| {
        CliError::error(format!("cannot open {}: {}", db_path.display(), e))
    })?;
    log::info!(
        "opened {} (format {}, {} grids)",
        db_path.display(),
        store.format_version().unwrap_or_default(),
        grids.grids().count()
    );

    let auto_color = AutoColor { saturation: settings.auto_saturation, value: settings.auto_value };
    Ok(Board::with_stored_hue(store, grids, settings.hue_step).with_auto_color(auto_color))
}

fn cmd_dump(board: &Board<SqliteStore>, output: Option<PathBuf>) -> Result<(), CliError> {
    match output {
        Some(path) => json::export(board, &path)
            .map_err(|e| CliError::error(format!("cannot write {}: {}", path.display(), e))),
        None => {
            let text = json::to_string(board).map_err(CliError::error)?;
            println!("{}", text);
            Ok(())
        }
    }
}

fn cmd_edit(board: Board<SqliteStore>) -> Result<(), CliError> {
    if !std::io::stdout().is_terminal() {
        return Err(CliError::usage("the editor needs a terminal")
            .with_hint("use `squares dump` to read squares from a script"));
    }
    tui::run(board).map_err(CliError::error)
}

fn run(cli: Cli) -> Result<(), CliError> {
    let settings = match &cli.settings {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    };
    let db_path = cli.db.clone().unwrap_or_else(|| settings.db_path());
    init_logging(&db_path);

    let board = open_board(&settings, &db_path)?;
    match cli.command {
        Some(Commands::Dump { output }) => cmd_dump(&board, output),
        None => cmd_edit(board),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}
