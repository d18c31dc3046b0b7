use crate::log::log_debug;
use std::process::Command;

/// Clears the terminal between major screen transitions. A failed clear is
/// cosmetic and never takes the session down.
pub trait Screen {
    fn clear(&self);
}

pub struct UnixScreen;

impl Screen for UnixScreen {
    fn clear(&self) {
        if let Err(e) = Command::new("clear").status() {
            log_debug(&format!("Screen clear failed: {}", e));
        }
    }
}

pub struct WindowsScreen;

impl Screen for WindowsScreen {
    fn clear(&self) {
        // cls is a cmd builtin, not an executable
        if let Err(e) = Command::new("cmd").args(["/C", "cls"]).status() {
            log_debug(&format!("Screen clear failed: {}", e));
        }
    }
}

/// Picks the implementation for the current platform, once at startup.
pub fn detect() -> Box<dyn Screen> {
    if cfg!(windows) {
        Box::new(WindowsScreen)
    } else {
        Box::new(UnixScreen)
    }
}
