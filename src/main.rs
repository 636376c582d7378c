// minic: syntax analyzer and tree explorer for a small C-like language

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser as _;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use minic::diagnostics::{DiagnosticSink, StderrSink};
use minic::parser::ast::Program;
use minic::parser::lexer::Lexer;
use minic::parser::{parse, ParseError, Token, TokenSource};
use minic::tree::{self, NodeStats, PrintOptions};
use minic::ui::App;

#[derive(clap::Parser, Debug)]
#[command(version, about = "Parse a minic source file and print its syntax tree")]
struct Cli {
    /// Source file, or `-` to read stdin
    file: PathBuf,

    /// Spaces per depth level in the dump
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u16).range(0..=64))]
    indent: u16,

    /// Print node statistics to stderr after the dump
    #[arg(long)]
    stats: bool,

    /// Print the token stream instead of parsing
    #[arg(long, conflicts_with = "explore")]
    tokens: bool,

    /// Browse the tree in a terminal UI instead of printing it
    #[arg(long)]
    explore: bool,
}

fn initialize_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off"));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_filter(env_filter),
        )
        .init();
}

fn read_source(path: &Path) -> anyhow::Result<String> {
    if path.as_os_str() == "-" {
        let mut source = String::new();
        io::stdin()
            .read_to_string(&mut source)
            .context("failed to read stdin")?;
        Ok(source)
    } else {
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
    }
}

fn main() -> anyhow::Result<ExitCode> {
    initialize_logging();
    let cli = Cli::parse();

    let source = read_source(&cli.file)?;
    debug!(file = %cli.file.display(), bytes = source.len(), "read source");

    if cli.tokens {
        return dump_tokens(&source);
    }

    let Some(program) = parse(Lexer::new(&source), &mut StderrSink) else {
        return Ok(ExitCode::FAILURE);
    };

    if cli.explore {
        let program = explore(program, source)?;
        tree::release(Some(program));
        return Ok(ExitCode::SUCCESS);
    }

    let options = PrintOptions {
        indent_width: usize::from(cli.indent),
    };
    let mut out = io::BufWriter::new(io::stdout().lock());
    tree::write_tree(&mut out, &program, &options).context("failed to write tree")?;

    let stats = cli.stats.then(|| NodeStats::collect(&program));
    let report = tree::release(Some(program));

    if let Some(stats) = stats {
        eprint!("{}", stats);
        eprintln!("released: {}", report.released);
    }

    Ok(ExitCode::SUCCESS)
}

/// Print `line:column token` per token, up to and including end of file
fn dump_tokens(source: &str) -> anyhow::Result<ExitCode> {
    let mut lexer = Lexer::new(source);
    let mut out = io::stdout().lock();

    loop {
        let token = match lexer.next_token() {
            Ok(token) => token,
            Err(err) => {
                StderrSink.report(&ParseError::from(err));
                return Ok(ExitCode::FAILURE);
            }
        };
        let location = token.location();
        writeln!(out, "{}:{} {}", location.line, location.column, token)?;
        if matches!(token, Token::Eof(_)) {
            break;
        }
    }

    out.flush()?;
    Ok(ExitCode::SUCCESS)
}

/// Run the explorer until the user quits, then hand the tree back
fn explore(program: Program, source: String) -> anyhow::Result<Program> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(program, source);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res.context("explorer failed")?;
    Ok(app.into_program())
}
