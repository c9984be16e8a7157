//! Operator-visible message channel.
//! Informational lines go to stdout; warnings and errors go to stderr so
//! they stay visible when the normal output is piped.

use std::fmt;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

#[derive(Clone, Copy)]
enum Level {
    Info,
    Success,
    Warning,
    Error,
}

impl Level {
    fn style(self) -> (&'static str, &'static str) {
        match self {
            Level::Info => ("\x1b[34m", "ℹ️"),
            Level::Success => ("\x1b[32m", "✅"),
            Level::Warning => ("\x1b[33m", "⚠️"),
            Level::Error => ("\x1b[31m", "❌"),
        }
    }

    fn to_stderr(self) -> bool {
        matches!(self, Level::Warning | Level::Error)
    }
}

fn emit(level: Level, msg: &dyn fmt::Display) {
    let (color, icon) = level.style();
    if level.to_stderr() {
        eprintln!("{color}{BOLD}{icon} {RESET}{msg}");
    } else {
        println!("{color}{BOLD}{icon} {RESET}{msg}");
    }
}

pub fn info<T: fmt::Display>(msg: T) {
    emit(Level::Info, &msg);
}

pub fn success<T: fmt::Display>(msg: T) {
    emit(Level::Success, &msg);
}

pub fn warning<T: fmt::Display>(msg: T) {
    emit(Level::Warning, &msg);
}

pub fn error<T: fmt::Display>(msg: T) {
    emit(Level::Error, &msg);
}

/// Section header above a table
pub fn header<T: fmt::Display>(msg: T) {
    println!("\x1b[34m{BOLD}── {msg} ──{RESET}");
}
