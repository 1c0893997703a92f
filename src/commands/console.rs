//! Line-oriented prompt/response I/O shared by all interactive commands

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use std::fmt::Display;
use std::io::{BufRead, Write};

use crate::error::InputClosed;
use crate::tracker::store::FIELD_SEPARATOR;

const BANNER_WIDTH: usize = 20;

/// Prompts on `output` and reads replies from `input`
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print `prompt` and read one line, without its line terminator
    ///
    /// Invalid UTF-8 is replaced rather than rejected, so it reaches the
    /// caller's validation like any other bad reply. Fails with
    /// [`InputClosed`] once input is exhausted.
    pub fn ask(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut raw = Vec::new();
        let read = self
            .input
            .read_until(b'\n', &mut raw)
            .context("Failed to read input")?;
        if read == 0 {
            return Err(InputClosed.into());
        }

        let line = String::from_utf8_lossy(&raw);
        Ok(line.trim_end_matches(['\n', '\r']).to_string())
    }

    pub fn say(&mut self, message: impl Display) -> Result<()> {
        writeln!(self.output, "{}", message)?;
        Ok(())
    }

    /// Message framed by dashed lines
    pub fn banner(&mut self, message: impl Display) -> Result<()> {
        let rule = "-".repeat(BANNER_WIDTH);
        writeln!(self.output, "{}", rule.dimmed())?;
        writeln!(self.output, "{}", message)?;
        writeln!(self.output, "{}", rule.dimmed())?;
        Ok(())
    }

    pub fn error(&mut self, message: &str) -> Result<()> {
        self.banner(message.red())
    }

    pub fn success(&mut self, message: &str) -> Result<()> {
        self.banner(message.green())
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}

/// Reason a value cannot be stored as a record field, if any
pub fn field_problem(value: &str) -> Option<String> {
    if value.contains(FIELD_SEPARATOR) {
        Some(format!("'{}' is not allowed here.", FIELD_SEPARATOR))
    } else if value.contains(['\n', '\r']) {
        Some("Line breaks are not allowed here.".to_string())
    } else {
        None
    }
}
