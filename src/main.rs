mod app;
mod domain;
mod input;
mod persistence;
mod report;
mod shell;
mod store;
mod ticker;
mod timer;
mod ui;

use anyhow::Result;
use app::AppState;
use chrono::Datelike;
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use domain::format_hm;
use persistence::{
    checkins_file, ensure_stint_dir, get_stint_dir, init_local_stint, tasks_file, JsonRepository,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use shell::DesktopShell;
use std::io;
use std::time::Instant;
use store::{CheckInStore, TaskStore};

#[derive(Parser)]
#[command(name = "stint")]
#[command(about = "A terminal task timer with estimates, receipts, and a daily check-in calendar", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .stint directory in the current directory
    Init,
    /// Write the completed-task receipt to a file
    Receipt {
        /// Output file path. Defaults to ~/.stint/receipt-YYYY-MM-DD.txt
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Print a monthly check-in summary
    Summary {
        /// Month to summarize (YYYY-MM format). Defaults to the current month.
        #[arg(short, long)]
        month: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init) => {
            let stint_dir = init_local_stint()?;
            println!("Initialized stint directory: {}", stint_dir.display());
            println!();
            println!("Stint will now use this local directory for storage.");
            println!("Run 'stint' to start tracking tasks.");
            Ok(())
        }
        Some(Commands::Receipt { output }) => {
            let tasks = TaskStore::open(Box::new(JsonRepository::new(tasks_file()?)));
            let output_path = output.map(std::path::PathBuf::from);

            let receipt_path = report::write_receipt(tasks.tasks(), output_path)?;
            println!("Receipt written: {}", receipt_path.display());
            Ok(())
        }
        Some(Commands::Summary { month }) => {
            let (year, month) = match month {
                Some(value) => parse_month(&value)?,
                None => {
                    let today = store::today();
                    (today.year(), today.month())
                }
            };

            let checkins = CheckInStore::open(Box::new(JsonRepository::new(checkins_file()?)));
            let summary = report::month_summary(&checkins, year, month);

            println!("Check-in summary for {}-{:02}", year, month);
            println!("  Total time: {}", format_hm(summary.total_seconds));
            println!("  Work days:  {}", summary.work_days);
            Ok(())
        }
        None => run_tui(),
    }
}

/// Parse "YYYY-MM" into a (year, month) pair
fn parse_month(value: &str) -> Result<(i32, u32)> {
    let error = || anyhow::anyhow!("Invalid month format. Use YYYY-MM: {}", value);

    let (year, month) = value.split_once('-').ok_or_else(error)?;
    let year: i32 = year.parse().map_err(|_| error())?;
    let month: u32 = month.parse().map_err(|_| error())?;
    if !(1..=12).contains(&month) {
        return Err(error());
    }
    Ok((year, month))
}

fn run_tui() -> Result<()> {
    // Ensure storage exists and show which directory we're using
    ensure_stint_dir()?;
    let stint_dir = get_stint_dir()?;
    eprintln!("Using stint directory: {}", stint_dir.display());

    // Open the stores; a failed load falls back to in-memory defaults
    let tasks = TaskStore::open(Box::new(JsonRepository::new(tasks_file()?)));
    let checkins = CheckInStore::open(Box::new(JsonRepository::new(checkins_file()?)));

    let mut app = AppState::new(tasks, checkins, Box::new(DesktopShell));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, &mut app);

    // Commit any live timing session before leaving
    app.flush_session(Instant::now());

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Print any errors
    if let Err(err) = result {
        eprintln!("Error: {}", err);
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    let tick_rate = ticker::tick_duration();

    loop {
        // Render
        terminal.draw(|f| ui::render(f, app))?;

        // Handle events with timeout for ticking
        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press {
                    let should_quit = input::handle_key(app, key, Instant::now());
                    if should_quit {
                        return Ok(());
                    }
                }
            }
        }

        // Drive the timer session and shell hooks
        app.tick(Instant::now());
    }
}
