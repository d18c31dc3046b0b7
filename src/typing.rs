use std::{
    io::{self, Write},
    thread,
    time::Duration,
};

const DELAY_STEP_MS: u64 = 5;

/// Character-paced console writer simulating a typewriter effect.
pub struct Typer {
    delay: Duration,
}

impl Typer {
    /// Speed runs from 0 (slowest) to 10 (instant); values outside that
    /// range clamp to the nearest boundary.
    pub fn new(speed: f64) -> Self {
        let speed = speed.clamp(0.0, 10.0);
        let delay = Duration::from_millis(((10.0 - speed) * DELAY_STEP_MS as f64) as u64);
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Types `text` to stdout one character at a time. Display-only
    /// primitive; console write failures are ignored like a plain print.
    pub fn type_out(&self, text: &str) {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        let _ = self.write_to(&mut handle, text);
    }

    /// Runs `produce` and types whatever text it yields.
    pub fn type_from<F>(&self, produce: F)
    where
        F: FnOnce() -> String,
    {
        self.type_out(&produce());
    }

    /// Same pacing against an arbitrary writer, flushing after every
    /// character so the effect is visible on line-buffered terminals.
    pub fn write_to<W: Write>(&self, out: &mut W, text: &str) -> io::Result<()> {
        for ch in text.chars() {
            write!(out, "{}", ch)?;
            out.flush()?;
            if !self.delay.is_zero() {
                thread::sleep(self.delay);
            }
        }
        Ok(())
    }
}
