use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use docshell::{event_queue, ui_channel, Config, MemoryEngine, Shell, Worker, WorkerSettings};
use ratatui::prelude::*;
use std::io::stdout;
use std::path::PathBuf;

mod app;
mod input;
mod theme;
mod ui;

#[derive(Parser)]
#[command(name = "docshell", about = "Terminal front-end for a document engine worker")]
struct Cli {
    /// Document to open on startup
    document: Option<PathBuf>,

    /// Config file (defaults to the user config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write log output to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Forward key input and selection handle moves to the engine
    #[arg(long)]
    editing: bool,
}

fn init_logging(log_file: Option<&PathBuf>) -> Result<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Some(path) = log_file {
        let file = std::fs::File::create(path)
            .with_context(|| format!("creating log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_ref())?;

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    if cli.editing {
        config.editing.experimental = true;
    }

    // Engine worker and UI queues
    let (dispatcher, receiver) = event_queue(&config.queue);
    let (poster, scheduler) = ui_channel();
    let worker = Worker::spawn(
        receiver,
        MemoryEngine::new(),
        poster.clone(),
        WorkerSettings::from(&config),
    )
    .context("starting engine worker")?;
    let shell = Shell::new(dispatcher, poster, config);

    if let Some(document) = &cli.document {
        shell.dispatcher().send_load_event(document.clone());
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let mut app = App::new(shell);
    let result = app.run(&mut terminal, &scheduler);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    // Dropping the app drops the last dispatcher, which stops the worker
    drop(app);
    match worker.join() {
        Ok(summary) => log::info!("engine worker processed {} events", summary.processed),
        Err(_) => log::error!("engine worker panicked"),
    }

    // Handle any errors from the app
    if let Err(e) = result {
        eprintln!("Error: {e:?}");
        std::process::exit(1);
    }

    Ok(())
}
