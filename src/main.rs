mod app;
mod command;
mod config;
mod consts;
mod game;
mod util;
use crate::app::App;
use crate::config::{Config, LogConfig};
use anyhow::Context;
use crossterm::event::{
    DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
};
use crossterm::execute;
use lexopt::{Arg, Parser};
use log::LevelFilter;
use simplelog::WriteLogger;
use std::io::{self, ErrorKind};
use std::path::PathBuf;
use std::process::ExitCode;

const USAGE: &str = "\
Usage: gridsnake [<options>]

Play snake in the terminal.  Click on the board to turn.

Options:
  -c, --config <PATH>   Read configuration from the given file
      --log-file <PATH> Write log messages to the given file
  -h, --help            Show this help message and exit
  -V, --version         Show the program version and exit
";

#[derive(Clone, Debug, Eq, PartialEq)]
enum Invocation {
    Run(Arguments),
    Help,
    Version,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct Arguments {
    config: Option<PathBuf>,
    log_file: Option<PathBuf>,
}

impl Invocation {
    fn from_parser(mut parser: Parser) -> Result<Invocation, lexopt::Error> {
        let mut args = Arguments::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('c') | Arg::Long("config") => {
                    args.config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Long("log-file") => args.log_file = Some(PathBuf::from(parser.value()?)),
                Arg::Short('h') | Arg::Long("help") => return Ok(Invocation::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Invocation::Version),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Invocation::Run(args))
    }
}

fn main() -> ExitCode {
    match Invocation::from_parser(Parser::from_env()) {
        Ok(Invocation::Run(args)) => exit(run(args)),
        Ok(Invocation::Help) => {
            print!("{USAGE}");
            ExitCode::SUCCESS
        }
        Ok(Invocation::Version) => {
            println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("gridsnake: {e}\n\n{USAGE}");
            ExitCode::from(2)
        }
    }
}

fn run(args: Arguments) -> anyhow::Result<()> {
    let config = match args.config {
        Some(path) => Config::load(&path, false),
        None => Config::default_path().and_then(|path| Config::load(&path, true)),
    }
    .context("failed to load configuration")?;
    init_logging(&config.log, args.log_file)?;
    log::info!(
        "Starting {} {} with a {}x{} grid",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        config.grid.width(),
        config.grid.height(),
    );
    let terminal = ratatui::init();
    let r = execute!(io::stdout(), EnableMouseCapture, EnableFocusChange)
        .and_then(|()| App::new(&config).run(terminal));
    if let Err(e) = execute!(io::stdout(), DisableFocusChange, DisableMouseCapture) {
        log::warn!("Failed to disable mouse capture: {e}");
    }
    ratatui::restore();
    r.context("terminal I/O failed")
}

/// Start logging to the file named on the command line or in the
/// configuration.  Nothing is logged if the configured level is `off`.
fn init_logging(config: &LogConfig, log_file: Option<PathBuf>) -> anyhow::Result<()> {
    if config.level == LevelFilter::Off {
        return Ok(());
    }
    let path = log_file
        .or_else(|| config.log_file())
        .context("failed to determine path to local data directory for log file")?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs_err::create_dir_all(parent).context("failed to create log file directory")?;
    }
    let fp = fs_err::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .context("failed to open log file")?;
    WriteLogger::init(config.level, simplelog::Config::default(), fp)
        .context("failed to initialize logger")?;
    Ok(())
}

fn exit(r: anyhow::Result<()>) -> ExitCode {
    match r {
        Ok(()) => ExitCode::SUCCESS,
        Err(e)
            if e.root_cause()
                .downcast_ref::<io::Error>()
                .is_some_and(|e| e.kind() == ErrorKind::BrokenPipe) =>
        {
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Exiting on error: {e:#}");
            eprintln!("gridsnake: {e:?}");
            ExitCode::from(2)
        }
    }
}
