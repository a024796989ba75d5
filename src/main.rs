mod app;
mod export;
mod grid;
mod help;
mod logging;
mod period;
mod picker;
mod preview;
mod render;
mod theme;
use crate::app::App;
use crate::export::export;
use crate::period::Period;
use crate::render::render;
use anyhow::Context;
use lexopt::{Arg, Parser, ValueExt};
use ratatui::DefaultTerminal;
use std::path::PathBuf;

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run {
        options: Options,
        period: Option<Period>,
    },
    Help,
    Version,
}

#[derive(Clone, Debug, Eq, PartialEq)]
struct Options {
    outdir: PathBuf,
    log_file: Option<PathBuf>,
}

impl Default for Options {
    fn default() -> Options {
        Options {
            outdir: PathBuf::from("."),
            log_file: None,
        }
    }
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut options = Options::default();
        let mut period = None;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('o') | Arg::Long("outdir") => {
                    options.outdir = PathBuf::from(parser.value()?);
                }
                Arg::Long("log-file") => {
                    options.log_file = Some(PathBuf::from(parser.value()?));
                }
                Arg::Value(value) if period.is_none() => {
                    period = Some(value.parse::<Period>()?);
                }
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run { options, period })
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run {
                options,
                period: Some(period),
            } => {
                match options.log_file {
                    Some(ref path) => logging::init_file(path)?,
                    None => logging::init_stderr(),
                }
                let dashboard = render(period);
                let saved = export(&dashboard, &options.outdir)?;
                println!("{}", saved.path().display());
                Ok(())
            }
            Command::Run {
                options,
                period: None,
            } => {
                if let Some(ref path) = options.log_file {
                    logging::init_file(path)?;
                }
                with_terminal(|mut terminal| {
                    terminal.hide_cursor().context("failed to hide cursor")?;
                    App::new(options.outdir).run(terminal)?;
                    Ok(())
                })
            }
            Command::Help => {
                println!("Usage: habitgrid [options] [YYYY-MM]");
                println!();
                println!("Generate printable monthly habit & sleep tracker pages");
                println!();
                println!("With no arguments, an interactive form is shown for choosing the month.");
                println!("Given a month, the page for it is saved directly and its path printed.");
                println!();
                println!("Options:");
                println!("  -o, --outdir <DIR>    Save pages in the given directory [default: .]");
                println!("      --log-file <PATH> Write log messages to the given file");
                println!("  -h, --help            Display this help message and exit");
                println!("  -V, --version         Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    Command::from_parser(Parser::from_env())?.run()
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = func(terminal);
    ratatui::restore();
    r
}
