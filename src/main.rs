mod app;
mod help;
use crate::app::App;
use anyhow::Context;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
};
use datepick::{parse_ymd, Options, OptionsFile};
use env_logger::{Builder, Env, Target};
use lexopt::{Arg, Parser, ValueExt};
use ratatui::DefaultTerminal;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use time::{Date, OffsetDateTime, Weekday};

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run {
        date: Option<Date>,
        config: Option<PathBuf>,
        log_file: Option<PathBuf>,
        weekdays_only: bool,
    },
    Help,
    Version,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut date = None;
        let mut config = None;
        let mut log_file = None;
        let mut weekdays_only = false;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('c') | Arg::Long("config") => {
                    config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Short('l') | Arg::Long("log-file") => {
                    log_file = Some(PathBuf::from(parser.value()?));
                }
                Arg::Short('w') | Arg::Long("weekdays-only") => weekdays_only = true,
                Arg::Value(value) if date.is_none() => {
                    let value = value.string()?;
                    match parse_ymd(&value) {
                        Ok(d) => date = Some(d),
                        Err(e) => {
                            return Err(lexopt::Error::ParsingFailed {
                                value,
                                error: Box::new(e),
                            })
                        }
                    }
                }
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run {
            date,
            config,
            log_file,
            weekdays_only,
        })
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run {
                date,
                config,
                log_file,
                weekdays_only,
            } => {
                if let Some(path) = log_file {
                    init_logging(&path)?;
                }
                let mut options = load_options(config.as_deref())?;
                if date.is_some() {
                    options.default_date = date;
                }
                if weekdays_only {
                    options = options.with_availability(|d| {
                        !matches!(d.weekday(), Weekday::Saturday | Weekday::Sunday)
                    });
                }
                let today = OffsetDateTime::now_local()
                    .context("failed to determine local date")?
                    .date();
                let name = options.input_name.clone();
                let picked = with_terminal(|mut terminal| {
                    terminal.hide_cursor().context("failed to hide cursor")?;
                    let _capture = MouseCapture::enable().context("failed to capture mouse")?;
                    let picked = App::new(options, today).run(&mut terminal)?;
                    Ok(picked)
                })?;
                if let Some(date) = picked {
                    println!("{name}={date}");
                }
                Ok(())
            }
            Command::Help => {
                println!("Usage: datepick [<options>] [YYYY-MM-DD]");
                println!();
                println!("Pick a date from a calendar popup in the terminal");
                println!();
                println!("Options:");
                println!("  -c, --config FILE     Read picker options from a RON file");
                println!("  -l, --log-file FILE   Write log messages to FILE");
                println!("  -w, --weekdays-only   Only allow picking Monday through Friday");
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

fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;
    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .try_init()
        .context("failed to initialize logging")
}

// A config file that cannot be read or parsed is fatal.  Bad values inside a
// readable file are only logged.
fn load_options(config: Option<&Path>) -> anyhow::Result<Options> {
    let Some(path) = config else {
        return Ok(Options::default());
    };
    let file = OptionsFile::load(path).context("failed to load config file")?;
    Ok(file.apply(Options::default()))
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

/// Keeps mouse reporting enabled for as long as it is alive
#[derive(Debug)]
struct MouseCapture;

impl MouseCapture {
    fn enable() -> io::Result<MouseCapture> {
        execute!(io::stdout(), EnableMouseCapture)?;
        Ok(MouseCapture)
    }
}

impl Drop for MouseCapture {
    fn drop(&mut self) {
        if let Err(e) = execute!(io::stdout(), DisableMouseCapture) {
            log::warn!("Failed to release mouse capture: {e}");
        }
    }
}
