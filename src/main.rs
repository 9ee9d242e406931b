mod app;
mod commands;
mod config;
mod domain;
mod input;
mod logging;
mod notifications;
mod persistence;
mod timer;
mod ui;

use anyhow::Result;
use app::{PomodoroApp, TodoApp};
use clap::{Parser, Subcommand};
use config::{load_timer_config, Overrides};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use notifications::SystemNotifier;
use persistence::{init_local_dir, load_tasks_or_fresh, save_tasks, DataDir, JsonSessionStore};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;
use timer::poll_interval;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "non")]
#[command(about = "Now or Never: a Pomodoro timer and a tiny to-do list for the terminal", long_about = None)]
struct Cli {
    /// Directory holding tasks.json, sessions.json and config.json
    #[arg(long, global = true, env = "NON_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .now-or-never directory in the current directory
    Init,
    /// Add a task. Prompts for the title when none is given.
    Add {
        title: Vec<String>,
    },
    /// List tasks, oldest first
    List,
    /// Mark a task done (by id or list position)
    Done {
        task: String,
    },
    /// Delete a task (by id or list position)
    Delete {
        task: String,
    },
    /// Change a task's title
    Edit {
        task: String,
        #[arg(required = true)]
        title: Vec<String>,
    },
    /// Delete all tasks
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Run the Pomodoro timer
    Pomodoro {
        /// Work session length in seconds
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        work: Option<u64>,
        /// Short break length in seconds
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        short_break: Option<u64>,
        /// Long break length in seconds
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        long_break: Option<u64>,
        /// Work sessions between long breaks
        #[arg(long = "long-break-every", value_parser = clap::value_parser!(u32).range(1..))]
        long_break_every: Option<u32>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init) => {
            let current_dir = std::env::current_dir()?;
            let dir = init_local_dir(&current_dir)?;
            println!("Initialized data directory: {}", dir.display());
            println!();
            println!("Tasks and sessions will now be stored in this local directory.");
            println!("Run 'non' to open your to-do list or 'non pomodoro' to start the timer.");
            Ok(())
        }
        Some(Commands::Add { title }) => {
            let data_dir = open_data_dir(cli.data_dir)?;
            let title = if title.is_empty() {
                prompt("Task title: ")?
            } else {
                title.join(" ")
            };
            run_command(&data_dir, |tasks, out| commands::cmd_add(tasks, &title, out))
        }
        Some(Commands::List) => {
            let data_dir = open_data_dir(cli.data_dir)?;
            let (tasks, warning) = load_tasks_or_fresh(&data_dir.tasks_file())?;
            let mut out = io::stdout().lock();
            if let Some(warning) = warning {
                writeln!(out, "{}", warning)?;
            }
            commands::cmd_list(&tasks, &mut out)
        }
        Some(Commands::Done { task }) => {
            let data_dir = open_data_dir(cli.data_dir)?;
            run_command(&data_dir, |tasks, out| commands::cmd_done(tasks, &task, out))
        }
        Some(Commands::Delete { task }) => {
            let data_dir = open_data_dir(cli.data_dir)?;
            run_command(&data_dir, |tasks, out| commands::cmd_delete(tasks, &task, out))
        }
        Some(Commands::Edit { task, title }) => {
            let data_dir = open_data_dir(cli.data_dir)?;
            let title = title.join(" ");
            run_command(&data_dir, |tasks, out| commands::cmd_edit(tasks, &task, &title, out))
        }
        Some(Commands::Clear { yes }) => {
            let data_dir = open_data_dir(cli.data_dir)?;
            let confirmed =
                yes || commands::is_yes(&prompt("Delete ALL tasks? Type 'yes' to confirm: ")?);
            run_command(&data_dir, |tasks, out| commands::cmd_clear(tasks, confirmed, out))
        }
        Some(Commands::Pomodoro {
            work,
            short_break,
            long_break,
            long_break_every,
        }) => {
            let data_dir = open_data_dir(cli.data_dir)?;
            let overrides = Overrides {
                work,
                short_break,
                long_break,
                work_sessions_per_long_break: long_break_every,
            };
            run_pomodoro_tui(&data_dir, overrides)
        }
        None => {
            let data_dir = open_data_dir(cli.data_dir)?;
            run_todo_tui(&data_dir)
        }
    }
}

/// Resolve and create the data directory, then start file logging there
fn open_data_dir(explicit: Option<PathBuf>) -> Result<DataDir> {
    let data_dir = DataDir::resolve(explicit)?;
    data_dir.ensure()?;
    if let Err(e) = logging::init_logging(&data_dir) {
        eprintln!("Warning: {:#}", e);
    }
    info!(data_dir = %data_dir.root().display(), "starting");
    Ok(data_dir)
}

/// Print a prompt and read one line from stdin
fn prompt(message: &str) -> Result<String> {
    let mut stdout = io::stdout();
    write!(stdout, "{}", message)?;
    stdout.flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Load the task list, run one command against it, and save if it changed
fn run_command<F>(data_dir: &DataDir, command: F) -> Result<()>
where
    F: FnOnce(&mut domain::TaskList, &mut io::StdoutLock<'static>) -> Result<bool>,
{
    let path = data_dir.tasks_file();
    let (mut tasks, warning) = load_tasks_or_fresh(&path)?;

    let mut out = io::stdout().lock();
    if let Some(warning) = warning {
        writeln!(out, "{}", warning)?;
    }

    if command(&mut tasks, &mut out)? {
        save_tasks(&path, &tasks)?;
    }
    Ok(())
}

type Tui = Terminal<CrosstermBackend<io::Stdout>>;

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn run_todo_tui(data_dir: &DataDir) -> Result<()> {
    let path = data_dir.tasks_file();
    let (tasks, warning) = load_tasks_or_fresh(&path)?;
    let mut app = TodoApp::new(tasks, path, warning);

    let mut terminal = setup_terminal()?;
    let result = run_todo_app(&mut terminal, &mut app);
    restore_terminal(&mut terminal)?;

    // Save on exit, retrying an earlier failed write
    if app.needs_save || app.save_failed {
        if let Err(e) = app.save() {
            eprintln!("Error saving tasks: {}", e);
        }
    }

    if let Err(err) = result {
        error!(error = %err, "to-do window failed");
        eprintln!("Error: {}", err);
    }

    Ok(())
}

fn run_todo_app(terminal: &mut Tui, app: &mut TodoApp) -> Result<()> {
    loop {
        terminal.draw(|f| ui::render_todo(f, app))?;

        if event::poll(poll_interval())? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press && input::handle_todo_key(app, key) {
                    return Ok(());
                }
            }
        }

        // Autosave after every change
        app.autosave();
    }
}

fn run_pomodoro_tui(data_dir: &DataDir, overrides: Overrides) -> Result<()> {
    let config = load_timer_config(&data_dir.config_file(), overrides)?;
    let store = JsonSessionStore::new(data_dir.sessions_file());
    info!(?config, sessions = %store.path().display(), "timer configured");

    let mut app = PomodoroApp::new(config, store, SystemNotifier);

    let mut terminal = setup_terminal()?;
    let result = run_pomodoro_app(&mut terminal, &mut app);
    restore_terminal(&mut terminal)?;

    if let Err(err) = result {
        error!(error = %err, "timer window failed");
        eprintln!("Error: {}", err);
    }

    Ok(())
}

fn run_pomodoro_app(terminal: &mut Tui, app: &mut PomodoroApp) -> Result<()> {
    let mut redraw = true;

    loop {
        if app.take_redraw() || redraw {
            terminal.draw(|f| ui::render_pomodoro(f, app))?;
            redraw = false;
        }

        if event::poll(app.next_wakeup(Instant::now()))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if input::handle_pomodoro_key(app, key) {
                        return Ok(());
                    }
                    redraw = true;
                }
                Event::Resize(_, _) => redraw = true,
                _ => {}
            }
        }

        app.pump(Instant::now());
    }
}
