//! Prompter reading answers from a terminal

use colored::Colorize;
use sesid_email::Prompter;
use std::io::{self, BufRead, Write};
use tokio::runtime::RuntimeFlavor;

/// Run a blocking terminal operation without stalling the runtime.
///
/// On a multi-thread runtime the worker hands its scheduler to another thread
/// for the duration, so the signal and timer drivers keep running even with a
/// single worker. Elsewhere the closure just runs inline.
pub fn blocking_io<T>(f: impl FnOnce() -> T) -> T {
    match tokio::runtime::Handle::try_current() {
        Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
            tokio::task::block_in_place(f)
        }
        _ => f(),
    }
}

/// Line-based prompter over any reader/writer pair (stdin/stdout in practice)
pub struct TerminalPrompter<R, W> {
    input: R,
    output: W,
}

impl TerminalPrompter<io::BufReader<io::Stdin>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::BufReader::new(io::stdin()), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalPrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Read one line; `None` on EOF
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        let input = &mut self.input;
        if blocking_io(|| input.read_line(&mut line))? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

impl<R: BufRead, W: Write> Prompter for TerminalPrompter<R, W> {
    fn input(&mut self, message: &str, default: Option<&str>) -> io::Result<Option<String>> {
        match default {
            Some(default) => write!(
                self.output,
                "{} {} ",
                message.bright_white().bold(),
                format!("[{}]:", default).bright_cyan()
            )?,
            None => write!(self.output, "{} ", format!("{}:", message).bright_white().bold())?,
        }
        self.output.flush()?;

        Ok(self.read_line()?.map(|answer| match default {
            Some(default) if answer.is_empty() => default.to_string(),
            _ => answer,
        }))
    }

    fn select(&mut self, message: &str, choices: &[String]) -> io::Result<Option<usize>> {
        writeln!(self.output, "{}", message.bright_white().bold())?;
        for (i, choice) in choices.iter().enumerate() {
            writeln!(
                self.output,
                "  {} {}",
                format!("{:>2})", i + 1).bright_cyan(),
                choice
            )?;
        }

        loop {
            write!(
                self.output,
                "{} ",
                format!("Enter a number (1-{}):", choices.len()).bright_white()
            )?;
            self.output.flush()?;

            let Some(answer) = self.read_line()? else {
                return Ok(None);
            };
            if answer.is_empty() {
                return Ok(None);
            }
            match answer.parse::<usize>() {
                Ok(n) if (1..=choices.len()).contains(&n) => return Ok(Some(n - 1)),
                _ => writeln!(
                    self.output,
                    "{}",
                    "Please enter one of the listed numbers.".bright_yellow()
                )?,
            }
        }
    }

    fn confirm(&mut self, message: &str, default: bool) -> io::Result<Option<bool>> {
        let hint = if default { "(Y/n):" } else { "(y/N):" };
        loop {
            write!(
                self.output,
                "{} {} ",
                message.bright_white().bold(),
                hint.bright_cyan()
            )?;
            self.output.flush()?;

            let Some(response) = self.read_line()? else {
                return Ok(None);
            };
            match response.to_lowercase().as_str() {
                "" => return Ok(Some(default)),
                "y" | "yes" => return Ok(Some(true)),
                "n" | "no" => return Ok(Some(false)),
                _ => writeln!(
                    self.output,
                    "{}",
                    "Please enter 'y' for yes or 'n' for no.".bright_white()
                )?,
            }
        }
    }
}
