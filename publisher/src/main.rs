//! Terminal client for the Daily Assignment Publisher.
//!
//! Renders a date-pill strip around today, loads the assignment for the
//! selected date, and publishes edits back through the HTTP API.

mod api;
mod app;
mod picker;
mod strip;

use crate::api::ApiClient;
use crate::app::App;
use anyhow::Context;
use chrono::{Local, NaiveDate};
use lexopt::{Arg, Parser, ValueExt};
use ratatui::DefaultTerminal;

const DEFAULT_API_BASE: &str = "http://127.0.0.1:8788/api";

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run {
        date: Option<NaiveDate>,
        api_base: Option<String>,
    },
    Help,
    Version,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut date = None;
        let mut api_base = None;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('a') | Arg::Long("api-base") => {
                    api_base = Some(parser.value()?.string()?);
                }
                Arg::Value(value) if date.is_none() => {
                    let value = value.string()?;
                    match NaiveDate::parse_from_str(&value, "%Y-%m-%d") {
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
        Ok(Command::Run { date, api_base })
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run { date, api_base } => {
                let api_base = api_base
                    .or_else(|| std::env::var("ASSIGNMENTS_API").ok())
                    .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
                let api = ApiClient::new(api_base)?;
                let today = Local::now().date_naive();
                with_terminal(|terminal| {
                    let mut app = App::new(api, today);
                    if let Some(date) = date {
                        app.select_date(date);
                    } else {
                        app.select_date(today);
                    }
                    app.run(terminal).context("terminal client failed")
                })
            }
            Command::Help => {
                println!("Usage: publisher [OPTIONS] [YYYY-MM-DD]");
                println!();
                println!("Terminal client for the daily assignment publisher");
                println!();
                println!("Options:");
                println!("  -a, --api-base URL  API base URL (default: $ASSIGNMENTS_API)");
                println!("  -h, --help          Display this help message and exit");
                println!("  -V, --version       Show the program version and exit");
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
