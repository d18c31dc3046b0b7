use crate::config::AppConfig;
use crate::deck::Deck;
use crate::input::{InputError, Prompter};
use crate::log::{init_logger, log_error, log_info};
use crate::screen;
use crate::session;
use crate::typing::Typer;
use anyhow::Result;
use clap::Parser;
use std::io;

#[derive(Parser)]
#[command(name = "tarot", version, about = "An interactive tarot card reading for your terminal")]
pub struct Cli {
    /// Enable logging to tarot.log
    #[arg(long)]
    log: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Override the card dataset URL
    #[arg(long)]
    url: Option<String>,

    /// Output speed from 0 (slowest) to 10 (instant)
    #[arg(long)]
    speed: Option<f64>,
}

pub fn execute() -> Result<()> {
    let args = Cli::parse();

    init_logger(args.log, None)?;
    if args.log {
        log_info("Starting tarot application");
    }

    if args.no_color {
        colored::control::set_override(false);
    }

    let mut config = AppConfig::default();
    if let Some(url) = args.url {
        config.dataset_url = url;
    }
    if let Some(speed) = args.speed {
        config.input_speed = speed;
        config.print_speed = speed;
    }

    let screen = screen::detect();
    let mut prompter = Prompter::new(
        io::stdin().lock(),
        io::stdout(),
        Typer::new(config.input_speed),
        Typer::new(config.print_speed),
    );

    let url = config.dataset_url.clone();
    let result = session::run(&mut prompter, screen.as_ref(), &config, move || {
        Deck::fetch(&url)
    });

    if let Err(e) = result {
        // The exhausted-retries path is a deliberate give-up, not a crash:
        // short message, non-zero exit, no stack detail.
        if let Some(InputError::Exhausted) = e.downcast_ref::<InputError>() {
            Typer::new(config.print_speed).type_from(|| format!("{}\n", e));
            log_error("Input attempts exhausted, terminating");
            std::process::exit(1);
        }
        log_error(&format!("Session failed: {}", e));
        return Err(e);
    }

    log_info("Session completed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_overrides() {
        let cli = Cli::try_parse_from(["tarot", "--url", "http://localhost/cards.json", "--speed", "10"]).unwrap();
        assert_eq!(cli.url.as_deref(), Some("http://localhost/cards.json"));
        assert_eq!(cli.speed, Some(10.0));
        assert!(!cli.log);
    }

    #[test]
    fn defaults_need_no_arguments() {
        let cli = Cli::try_parse_from(["tarot"]).unwrap();
        assert!(cli.url.is_none());
        assert!(cli.speed.is_none());
        assert!(!cli.no_color);
    }
}
