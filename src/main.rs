mod app;
mod config;
mod dialog;
mod domain;
mod engine;
mod error;
mod input;
mod logging;
mod notifications;
mod persistence;
mod queue;
mod store;
mod ticker;
mod ui;
mod validation;

use anyhow::{Context, Result};
use app::AppState;
use clap::{Parser, Subcommand};
use config::{load_config, save_config, AppConfig};
use crossterm::{
    event::{self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use domain::{checkbox_glyph, filter_label, Filter, EMPTY_STATE_MESSAGE};
use engine::{EngineOptions, Outcome, TaskListEngine};
use notifications::ConsoleNotifier;
use persistence::{config_file, ensure_data_dir, init_local_data_dir, log_dir, storage_file, FileKvStore};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "tasklist")]
#[command(about = "A small terminal task list with confirmed, queued edits", long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error, off). Overrides config.json
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .tasklist directory in the current directory
    Init,
    /// Print the task list
    List {
        /// all, completed or uncompleted. Defaults to the saved filter.
        #[arg(short, long, value_parser = parse_filter)]
        filter: Option<Filter>,
    },
    /// Add a task
    Add {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Remove every task
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

fn parse_filter(value: &str) -> Result<Filter, String> {
    Filter::from_wire(value).ok_or_else(|| format!("unknown filter {:?}; expected all, completed or uncompleted", value))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init) => {
            let current_dir = std::env::current_dir().context("Could not determine current directory")?;
            let data_dir = init_local_data_dir(&current_dir)?;
            save_config(config_file(&data_dir), &AppConfig::default())?;
            println!("Initialized task list directory: {}", data_dir.display());
            println!();
            println!("Run 'tasklist' to start.");
            Ok(())
        }
        Some(Commands::List { filter }) => {
            let (data_dir, config) = bootstrap(cli.log_level.as_deref())?;
            list_tasks(&data_dir, &config, filter)
        }
        Some(Commands::Add { text }) => {
            let (data_dir, config) = bootstrap(cli.log_level.as_deref())?;
            add_task(&data_dir, &config, &text.join(" "))
        }
        Some(Commands::Clear { yes }) => {
            let (data_dir, config) = bootstrap(cli.log_level.as_deref())?;
            clear_tasks(&data_dir, &config, yes)
        }
        None => {
            let (data_dir, config) = bootstrap(cli.log_level.as_deref())?;
            run_tui(&data_dir, &config)
        }
    }
}

/// Resolve the data directory, read config.json and start file logging
fn bootstrap(log_level: Option<&str>) -> Result<(PathBuf, AppConfig)> {
    let data_dir = ensure_data_dir()?;
    let config = load_config(config_file(&data_dir))?;

    let level = log_level.unwrap_or(&config.log_level);
    if let Err(err) = logging::init_logging(level, &log_dir(&data_dir)) {
        eprintln!("Warning: logging disabled: {:#}", err);
    }

    Ok((data_dir, config))
}

/// One-shot commands report as they go and never wait on notification pacing
fn console_engine(data_dir: &Path, config: &AppConfig) -> Result<TaskListEngine<FileKvStore, ConsoleNotifier>> {
    let kv = FileKvStore::open(storage_file(data_dir))?;
    let options = EngineOptions {
        gate_on_notification: false,
        ..config.engine_options()
    };
    Ok(TaskListEngine::new(kv, ConsoleNotifier, options))
}

fn list_tasks(data_dir: &Path, config: &AppConfig, filter: Option<Filter>) -> Result<()> {
    let engine = console_engine(data_dir, config)?;
    let store = engine.store();
    let filter = filter.unwrap_or_else(|| store.filter());
    let counts = store.counts();

    let tabs: Vec<String> = Filter::all()
        .iter()
        .map(|f| filter_label(*f, &counts))
        .collect();
    println!("{}", tabs.join("  |  "));
    println!();

    let tasks = store.list(filter);
    if tasks.is_empty() {
        println!("{}", EMPTY_STATE_MESSAGE);
    }
    for task in tasks {
        println!("{} {}", checkbox_glyph(task.completed), task.text);
    }
    Ok(())
}

fn add_task(data_dir: &Path, config: &AppConfig, text: &str) -> Result<()> {
    let mut engine = console_engine(data_dir, config)?;
    engine.add(text);
    exit_on_rejection(engine.take_outcomes().into_iter().map(|(_, outcome)| outcome))
}

fn clear_tasks(data_dir: &Path, config: &AppConfig, yes: bool) -> Result<()> {
    let mut engine = console_engine(data_dir, config)?;
    engine.clear_all();

    if let Some(prompt) = engine.pending_confirmation().cloned() {
        let confirmed = yes || ask(&prompt.plain_text())?;
        engine.resolve(prompt.id, confirmed);
    }
    exit_on_rejection(engine.take_outcomes().into_iter().map(|(_, outcome)| outcome))
}

/// The notifier already told the user why; only the exit status is left
fn exit_on_rejection(outcomes: impl Iterator<Item = Outcome>) -> Result<()> {
    for outcome in outcomes {
        match outcome {
            Outcome::Rejected(error::TaskError::ConfirmationCancelled) => {}
            Outcome::Rejected(_) | Outcome::Applied { persisted: false } => std::process::exit(1),
            _ => {}
        }
    }
    Ok(())
}

fn ask(question: &str) -> Result<bool> {
    print!("{} [y/N] ", question);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer).context("Failed to read answer")?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

fn run_tui(data_dir: &Path, config: &AppConfig) -> Result<()> {
    eprintln!("Using task list directory: {}", data_dir.display());
    if let Some((level, dir)) = logging::logging_status() {
        eprintln!("Logging at {} to {}", level, dir.display());
    }

    let kv = FileKvStore::open(storage_file(data_dir))?;
    let mut app = AppState::new(Box::new(kv), config);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableBracketedPaste, LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Leaving with a field open counts as leaving the field; queued work still runs
    app.shutdown();
    log::info!("event=app_exit tasks={}", app.engine.store().len());

    if let Err(err) = result {
        eprintln!("Error: {}", err);
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppState) -> Result<()> {
    let tick_rate = ticker::tick_duration();

    loop {
        terminal.draw(|f| ui::render(f, app))?;

        // Handle events with timeout for ticking
        if event::poll(tick_rate)? {
            match event::read()? {
                // Only process key press events (ignore key release)
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if input::handle_key(app, key)? {
                        return Ok(());
                    }
                }
                Event::Paste(text) => input::handle_paste(app, &text),
                _ => {}
            }
        }

        app.tick();
    }
}
