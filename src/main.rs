mod cli;
mod config;
mod deck;
mod input;
mod log;
mod screen;
mod session;
mod typing;

use anyhow::Result;

fn main() -> Result<()> {
    cli::execute()
}
