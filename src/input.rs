use crate::log::log_warn;
use crate::typing::Typer;
use colored::Colorize;
use std::io::{self, BufRead, Write};
use std::ops::RangeInclusive;

/// Attempt budget for a single validated-input request. The third failed
/// attempt is terminal for the whole program.
pub const MAX_ATTEMPTS: u32 = 3;

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("Exceeded maximum number of tries..")]
    Exhausted,
    #[error("input stream closed")]
    Closed,
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Prompts on `output`, reads lines from `input`, and validates answers
/// against a datatype and an optional allowed set. Generic over both
/// streams so the retry machinery can be driven from tests.
pub struct Prompter<R, W> {
    input: R,
    output: W,
    prompt_typer: Typer,
    print_typer: Typer,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W, prompt_typer: Typer, print_typer: Typer) -> Self {
        Self {
            input,
            output,
            prompt_typer,
            print_typer,
        }
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    /// Types `text` at body speed.
    pub fn say(&mut self, text: &str) -> Result<(), InputError> {
        self.print_typer.write_to(&mut self.output, text)?;
        Ok(())
    }

    /// Runs `produce` and types whatever text it yields.
    pub fn say_from<F>(&mut self, produce: F) -> Result<(), InputError>
    where
        F: FnOnce() -> String,
    {
        self.say(&produce())
    }

    /// Writes a line immediately, without the typing effect.
    pub fn show(&mut self, text: &str) -> Result<(), InputError> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    /// Reads one line of free text; with `choices`, re-prompts until the
    /// answer is one of them or the attempt budget runs out.
    pub fn read_text(&mut self, label: &str, choices: Option<&[&str]>) -> Result<String, InputError> {
        for attempt in 1..=MAX_ATTEMPTS {
            let answer = self.ask(label)?;
            match choices {
                Some(allowed) if !allowed.contains(&answer.as_str()) => {
                    log_warn(&format!(
                        "Rejected answer '{}' for '{}' (attempt {}/{})",
                        answer, label, attempt, MAX_ATTEMPTS
                    ));
                    if attempt < MAX_ATTEMPTS {
                        self.hint(&format!("Choose ({})", allowed.join(" or ")))?;
                    }
                }
                _ => return Ok(answer),
            }
        }
        Err(InputError::Exhausted)
    }

    /// Reads an integer; with `range`, re-prompts until the value falls
    /// inside it. Parse failures consume an attempt like rejections do.
    pub fn read_int(&mut self, label: &str, range: Option<RangeInclusive<i64>>) -> Result<i64, InputError> {
        for attempt in 1..=MAX_ATTEMPTS {
            let answer = self.ask(label)?;
            match answer.parse::<i64>() {
                Ok(value) => match &range {
                    Some(allowed) if !allowed.contains(&value) => {
                        log_warn(&format!(
                            "Out-of-range answer {} for '{}' (attempt {}/{})",
                            value, label, attempt, MAX_ATTEMPTS
                        ));
                        if attempt < MAX_ATTEMPTS {
                            self.hint(&format!("Valid choice ({} to {})", allowed.start(), allowed.end()))?;
                        }
                    }
                    _ => return Ok(value),
                },
                Err(_) => {
                    log_warn(&format!(
                        "Unparsable answer '{}' for '{}' (attempt {}/{})",
                        answer, label, attempt, MAX_ATTEMPTS
                    ));
                    if attempt < MAX_ATTEMPTS {
                        self.hint("Invalid input... Expecting int")?;
                    }
                }
            }
        }
        Err(InputError::Exhausted)
    }

    pub fn read_float(&mut self, label: &str) -> Result<f64, InputError> {
        for attempt in 1..=MAX_ATTEMPTS {
            let answer = self.ask(label)?;
            match answer.parse::<f64>() {
                Ok(value) => return Ok(value),
                Err(_) => {
                    if attempt < MAX_ATTEMPTS {
                        self.hint("Invalid input... Expecting float")?;
                    }
                }
            }
        }
        Err(InputError::Exhausted)
    }

    fn ask(&mut self, label: &str) -> Result<String, InputError> {
        let prompt = format!("{}: ", capitalize(label));
        self.prompt_typer.write_to(&mut self.output, &prompt)?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(InputError::Closed);
        }
        Ok(line.trim().to_string())
    }

    fn hint(&mut self, text: &str) -> Result<(), InputError> {
        let line = format!("{}\n", text.yellow());
        self.print_typer.write_to(&mut self.output, &line)?;
        Ok(())
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
