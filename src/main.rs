// plc: token and syntax tree explorer for PLC programs

use std::fs;
use std::io;
use std::path::Path;
use std::process::ExitCode;

use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::info;

use plc::config::{usage, Config, Mode};
use plc::parser::lexer::tokenize;
use plc::parser::location::SourceLocation;
use plc::parser::pretty::render_tree;
use plc::parser::{parse_program, Error};
use plc::ui::App;

/// Print `error` as `path:line:column: message`
fn report(path: &Path, source: &str, error: &Error) {
    let location = SourceLocation::locate(source, error.offset());
    eprintln!(
        "{}:{}:{}: {}",
        path.display(),
        location.line,
        location.column,
        error
    );
}

fn explore(source: String) -> Result<(), Box<dyn std::error::Error>> {
    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let mut app = App::new(source);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    plc::init_tracing();

    // Parse command-line arguments
    let args: Vec<String> = std::env::args().collect();
    let program_name = args.first().map(|s| s.as_str()).unwrap_or("plc");

    let config = match Config::from_args(args.iter().skip(1).cloned()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            eprintln!("{}", usage(program_name));
            return Ok(ExitCode::FAILURE);
        }
    };

    if !config.path.exists() {
        eprintln!("Error: File '{}' not found", config.path.display());
        eprintln!("{}", usage(program_name));
        return Ok(ExitCode::FAILURE);
    }

    // Read source code
    let source = fs::read_to_string(&config.path)?;
    info!(path = %config.path.display(), mode = ?config.mode, "loaded source");

    match config.mode {
        Mode::Tokens => match tokenize(&source) {
            Ok(tokens) => {
                for token in tokens {
                    println!("{:>6}  {:<10}  {}", token.offset, token.kind.name(), token.text);
                }
            }
            Err(e) => {
                report(&config.path, &source, &e.into());
                return Ok(ExitCode::FAILURE);
            }
        },
        Mode::Ast => match parse_program(&source) {
            Ok(program) => print!("{}", render_tree(&program)),
            Err(e) => {
                report(&config.path, &source, &e);
                return Ok(ExitCode::FAILURE);
            }
        },
        Mode::Explore => explore(source)?,
    }

    Ok(ExitCode::SUCCESS)
}
