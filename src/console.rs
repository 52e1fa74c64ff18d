//! Line-based operator I/O boundary.
//!
//! The pipeline performs exactly one blocking read per retry attempt and
//! writes diagnostics a line at a time; both directions go through this
//! trait so scripted sessions can stand in for a terminal.
use anyhow::{bail, Context, Result};
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

pub trait Console {
    /// Write `prompt` without a newline and block for one line of input.
    fn read_line(&mut self, prompt: &str) -> Result<String>;
    /// Write one line of output.
    fn write_line(&mut self, text: &str) -> Result<()>;
}

/// Terminal-backed console over stdin/stdout.
pub struct StdConsole;

impl Console for StdConsole {
    fn read_line(&mut self, prompt: &str) -> Result<String> {
        let mut stdout = io::stdout();
        write!(stdout, "{prompt}").context("write prompt")?;
        stdout.flush().context("flush prompt")?;

        let mut line = String::new();
        let read = io::stdin()
            .lock()
            .read_line(&mut line)
            .context("read operator input")?;
        if read == 0 {
            bail!("input stream closed");
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    fn write_line(&mut self, text: &str) -> Result<()> {
        println!("{text}");
        Ok(())
    }
}

/// Deterministic console over a queued input script.
///
/// Records every prompt and output line in order, so tests can assert on
/// the transcript as well as the outcome.
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    inputs: VecDeque<String>,
    transcript: Vec<String>,
}

impl ScriptedConsole {
    pub fn new<I, S>(inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            transcript: Vec::new(),
        }
    }

    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }

    pub fn remaining_inputs(&self) -> usize {
        self.inputs.len()
    }
}

impl Console for ScriptedConsole {
    fn read_line(&mut self, prompt: &str) -> Result<String> {
        self.transcript.push(format!("prompt: {prompt}"));
        match self.inputs.pop_front() {
            Some(input) => Ok(input),
            None => bail!("script exhausted at prompt: {prompt}"),
        }
    }

    fn write_line(&mut self, text: &str) -> Result<()> {
        self.transcript.push(format!("out: {text}"));
        Ok(())
    }
}
