//! Interactive input sources.
//!
//! The explorer's re-prompt loops read through the [`Prompt`] trait so tests
//! can feed a scripted sequence of lines instead of a real terminal.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// One line of user input at a time.
pub trait Prompt {
    /// Show `prompt` and read one trimmed line. `None` means the input
    /// source is exhausted (EOF).
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;
}

/// Reads from the process's stdin, writing prompts to stdout.
pub struct ConsolePrompt;

impl Prompt for ConsolePrompt {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        let mut stdout = io::stdout().lock();
        stdout.write_all(prompt.as_bytes())?;
        stdout.flush()?;

        let mut line = String::new();
        let n = io::stdin().lock().read_line(&mut line)?;
        if n == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

/// A canned sequence of input lines. Returns `None` once exhausted.
pub struct ScriptedPrompt {
    lines: VecDeque<String>,
}

impl ScriptedPrompt {
    /// Build a scripted source from the given lines, in order.
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }
}

impl Prompt for ScriptedPrompt {
    fn read_line(&mut self, _prompt: &str) -> io::Result<Option<String>> {
        Ok(self.lines.pop_front().map(|line| line.trim().to_string()))
    }
}
