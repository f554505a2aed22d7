//! Terminal commands for theme control.
//!
//! Each line typed on stdin is either a manual stop edit (`mid #FF4500`) or a
//! free-text mood sent to palette generation.

use nebula_core::{Rgb, ThemeError, ThemeStop};
use std::io::{self, BufRead};
use std::sync::mpsc::{self, Receiver};
use std::thread;

#[derive(Clone, Debug, PartialEq)]
pub enum PromptCommand {
    Generate(String),
    SetStop(ThemeStop, Rgb),
}

/// Parse one input line. Blank lines yield `None`.
pub fn parse_command(line: &str) -> Option<Result<PromptCommand, ThemeError>> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let mut words = line.split_whitespace();
    if let (Some(first), Some(second), None) = (words.next(), words.next(), words.next()) {
        if second.starts_with('#') {
            if let Ok(stop) = first.parse::<ThemeStop>() {
                return Some(Rgb::parse_hex(second).map(|c| PromptCommand::SetStop(stop, c)));
            }
        }
    }
    Some(Ok(PromptCommand::Generate(line.to_string())))
}

/// Read stdin on a background thread and forward parsed commands.
pub fn spawn_reader() -> io::Result<Receiver<PromptCommand>> {
    let (tx, rx) = mpsc::channel();
    thread::Builder::new()
        .name("prompt-reader".into())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                match parse_command(&line) {
                    Some(Ok(command)) => {
                        if tx.send(command).is_err() {
                            break;
                        }
                    }
                    Some(Err(e)) => log::warn!("[prompt] {e}"),
                    None => {}
                }
            }
            log::debug!("[prompt] stdin closed");
        })?;
    Ok(rx)
}
