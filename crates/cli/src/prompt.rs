//! Interactive yes/no prompts on the terminal

use colored::Colorize;
use scaffold_ir::DecisionSource;
use std::io::{self, BufRead, Write};

/// Decision source reading answers from a line-based input
///
/// Prompts and notes go to `output` (stderr in the binary) so that stdout
/// stays free for command output. An empty line, end of input, a read
/// error, or a failed write to `output` answers with the prompt's default.
pub struct TerminalDecisions<R, W> {
    input: R,
    output: W,
}

impl TerminalDecisions<io::StdinLock<'static>, io::Stderr> {
    /// Prompt on stderr, read answers from stdin
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> TerminalDecisions<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Consume the source, returning the output sink
    pub fn into_output(self) -> W {
        self.output
    }

    fn read_answer(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim().to_ascii_lowercase()),
        }
    }
}

/// Interpret an answer: `Some(true)` for yes, `Some(false)` for no
pub fn parse_answer(answer: &str) -> Option<bool> {
    match answer {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

impl<R: BufRead, W: Write> TerminalDecisions<R, W> {
    /// Ask until a yes/no answer arrives. Write failures are returned.
    fn ask(&mut self, prompt: &str, default: bool) -> io::Result<bool> {
        let hint = if default { "[Y/n]" } else { "[y/N]" };

        loop {
            write!(self.output, "{} {} ", prompt.green(), hint.dimmed())?;
            self.output.flush()?;

            let Some(answer) = self.read_answer() else {
                writeln!(self.output)?;
                return Ok(default);
            };

            if answer.is_empty() {
                return Ok(default);
            }

            match parse_answer(&answer) {
                Some(value) => return Ok(value),
                None => writeln!(self.output, "{}", "Please answer yes or no.".yellow())?,
            }
        }
    }
}

impl<R: BufRead, W: Write> DecisionSource for TerminalDecisions<R, W> {
    fn confirm(&mut self, prompt: &str, default: bool) -> bool {
        self.ask(prompt, default).unwrap_or_else(|e| {
            tracing::warn!("Cannot write prompt ({}), answering {}", e, default);
            default
        })
    }

    fn note(&mut self, message: &str) {
        if let Err(e) = writeln!(self.output, "{}", message.cyan()) {
            tracing::debug!("Cannot write note: {}", e);
        }
    }
}
