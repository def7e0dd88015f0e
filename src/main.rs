//! SwipeQuiz - Main entry point
//!
//! Parses the command line, sets up logging and either runs the interactive
//! terminal quiz or one of the headless commands.

use std::fs::OpenOptions;
use std::io::stdout;
use std::sync::Mutex;

use anyhow::{Context, Result};
use crossterm::event::{DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use swipequiz::app::App;
use swipequiz::catalog::Product;
use swipequiz::cli::{Cli, Commands};
use swipequiz::config::AppConfig;
use swipequiz::filter::filter_catalog;
use swipequiz::loader::{DataLoader, DirectorySource, FileStore, MemoryStore};
use swipequiz::quiz::Selections;
use swipequiz::swatch::swatch_for;
use swipequiz::types::{FilterStage, QuestionKind};

/// Initialize tracing.
///
/// The interactive UI owns the terminal, so its logs go to the configured
/// file or nowhere. Headless commands log to stderr.
fn init_logging(config: &AppConfig, interactive: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);

    match (&config.log_file, interactive) {
        (Some(path), _) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        (None, true) => builder.with_writer(std::io::sink).init(),
        (None, false) => builder.with_writer(std::io::stderr).init(),
    }
    Ok(())
}

/// Data loader for the configured directories
fn build_loader(config: &AppConfig) -> DataLoader {
    let source = DirectorySource::new(&config.data_dir);
    match (&config.cache_dir, config.use_cache) {
        (Some(dir), true) => DataLoader::new(source, FileStore::new(dir)),
        _ => DataLoader::new(source, MemoryStore::new()),
    }
}

/// Main application entry point
fn main() -> Result<()> {
    let cli = Cli::parse_args();
    let config = cli.resolve_config()?;
    init_logging(&config, cli.is_interactive())?;
    info!("SwipeQuiz starting up");
    debug!(?config, "Configuration resolved");

    let loader = build_loader(&config);

    match cli.command.clone().unwrap_or(Commands::Run) {
        Commands::Run => run_tui(&config, loader),
        Commands::Filter {
            category,
            color,
            price,
            json,
        } => run_filter(loader, [category, color, price], json),
        Commands::Validate => run_validate(loader),
        Commands::Questions => run_questions(loader),
    }
}

/// Run the interactive quiz
fn run_tui(config: &AppConfig, loader: DataLoader) -> Result<()> {
    debug!("Initializing terminal for TUI mode");

    enable_raw_mode().context("Failed to enable raw mode")?;
    crossterm::execute!(stdout(), EnterAlternateScreen, EnableMouseCapture, EnableFocusChange)
        .context("Failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout());
    let result = Terminal::new(backend)
        .context("Failed to create terminal")
        .and_then(|mut terminal| {
            let mut app = App::new(config, loader);
            let outcome = app.run(&mut terminal);
            let _ = terminal.show_cursor();
            outcome.map_err(Into::into)
        });

    // Always restore the terminal, even if the app failed
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(stdout(), DisableFocusChange, DisableMouseCapture, LeaveAlternateScreen);

    if let Err(e) = &result {
        error!(error = %e, "Quiz exited with an error");
    }
    result
}

/// Headless run of the filter pipeline
fn run_filter(mut loader: DataLoader, answers: [Option<String>; 3], json: bool) -> Result<()> {
    let dataset = loader.load()?;

    let selections: Selections = FilterStage::in_order()
        .zip(answers)
        .filter_map(|(stage, answer)| answer.map(|a| (stage.step(), a)))
        .collect();
    let products = filter_catalog(&dataset.catalog, &selections);
    info!(matches = products.len(), "Filter finished");

    if json {
        println!("{}", serde_json::to_string_pretty(&products)?);
        return Ok(());
    }

    if products.is_empty() {
        println!("No Products Found");
        return Ok(());
    }
    for product in &products {
        println!("{}", product_line(product));
    }
    println!("\n{} products", products.len());
    Ok(())
}

fn product_line(product: &Product) -> String {
    let mut line = format!("{:<32} {:>12}", product.display_name(), product.price_label());
    if let Some(old) = product.old_price_label() {
        line.push_str(&format!("  (was {old})"));
    }
    if let Some(url) = &product.url {
        line.push_str(&format!("  {url}"));
    }
    line
}

/// Load everything and report counts
fn run_validate(mut loader: DataLoader) -> Result<()> {
    match loader.load() {
        Ok(dataset) => {
            println!("✓ {} quiz steps", dataset.questions.len());
            match dataset.catalog.records() {
                Some(records) => println!("✓ {} products", records.len()),
                None => println!("⚠ products document is not an array; every filter yields nothing"),
            }
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Validation failed");
            eprintln!("✗ {e}");
            std::process::exit(1);
        }
    }
}

/// Print the quiz steps
fn run_questions(mut loader: DataLoader) -> Result<()> {
    let dataset = loader.load()?;
    for (index, question) in dataset.questions.iter().enumerate() {
        println!("{}. {} ({})", index + 1, question.title, question.kind);
        for answer in &question.answers {
            match question.kind {
                QuestionKind::Color => {
                    let swatch = swatch_for(answer);
                    let note = if swatch.known { "" } else { " (no color mapping)" };
                    println!("   - {answer} {}{note}", swatch.hex);
                }
                QuestionKind::Text => println!("   - {answer}"),
            }
        }
    }
    Ok(())
}
