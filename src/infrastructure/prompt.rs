//! Interactive terminal prompts.
//!
//! A line-based multi-select and yes/no confirmation. Input and output are
//! generic so prompts can be driven from byte buffers in tests.

use std::io::{BufRead, StdinLock, Stdout, Write};

use colored::Colorize;

use crate::domain::{AppError, RepositoryName, Result, WatchStatus};

/// User interaction needed by the watch session.
pub trait Prompter {
    /// Let the user pick repositories to watch, starting from the current
    /// watch flags. Returns the selection in list order.
    ///
    /// # Errors
    /// Returns error if the terminal cannot be read or written.
    fn select_repositories(&mut self, statuses: &[WatchStatus]) -> Result<Vec<RepositoryName>>;

    /// Ask a yes/no question.
    ///
    /// # Errors
    /// Returns error if the terminal cannot be read or written.
    fn confirm(&mut self, message: &str, default: bool) -> Result<bool>;
}

/// Prompter reading answers line by line.
pub struct TerminalPrompter<R, W> {
    input: R,
    output: W,
}

impl TerminalPrompter<StdinLock<'static>, Stdout> {
    /// Prompter bound to the process's standard input and output.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalPrompter<R, W> {
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Read one line; `None` at end of input.
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(|e| AppError::io("Failed to read answer", e))?;

        Ok((read > 0).then(|| line.trim().to_string()))
    }

    fn write(&mut self, text: &str) -> Result<()> {
        self.output
            .write_all(text.as_bytes())
            .and_then(|()| self.output.flush())
            .map_err(|e| AppError::io("Failed to write prompt", e))
    }
}

impl<R: BufRead, W: Write> Prompter for TerminalPrompter<R, W> {
    fn select_repositories(&mut self, statuses: &[WatchStatus]) -> Result<Vec<RepositoryName>> {
        let mut checked: Vec<bool> = statuses.iter().map(|s| s.is_watched).collect();

        loop {
            let list = render_selection(statuses, &checked);
            self.write(&format!(
                "{}\n{list}\n{} ",
                "Select the repositories that you wish to watch:".bold(),
                "Toggle by number (e.g. 1 4 7-9), Enter to accept:".dimmed()
            ))?;

            let Some(line) = self.read_line()? else {
                break;
            };
            if line.is_empty() {
                break;
            }

            match parse_toggles(&line, statuses.len()) {
                Ok(indices) => {
                    for index in indices {
                        checked[index] = !checked[index];
                    }
                }
                Err(message) => self.write(&format!("{}\n", message.yellow()))?,
            }
        }

        Ok(statuses
            .iter()
            .zip(checked)
            .filter(|(_, is_checked)| *is_checked)
            .map(|(status, _)| status.repo.clone())
            .collect())
    }

    fn confirm(&mut self, message: &str, default: bool) -> Result<bool> {
        let hint = if default { "(Y/n)" } else { "(y/N)" };

        loop {
            self.write(&format!("{message} {hint} "))?;

            let Some(line) = self.read_line()? else {
                return Ok(default);
            };

            match line.to_lowercase().as_str() {
                "" => return Ok(default),
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => self.write("Please answer yes or no.\n")?,
            }
        }
    }
}

/// Numbered checkbox list, one repository per line.
fn render_selection(statuses: &[WatchStatus], checked: &[bool]) -> String {
    let width = statuses.len().to_string().len();

    statuses
        .iter()
        .zip(checked)
        .enumerate()
        .map(|(i, (status, is_checked))| {
            let marker = if *is_checked {
                "[x]".green().to_string()
            } else {
                "[ ]".to_string()
            };
            format!("  {:>width$}. {marker} {}", i + 1, status.repo)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parse toggle input (`1 3, 5-7`) into zero-based indices below `count`.
///
/// # Errors
/// Returns a message naming the first token that is not a valid 1-based
/// number or range.
pub fn parse_toggles(input: &str, count: usize) -> std::result::Result<Vec<usize>, String> {
    let mut indices = Vec::new();

    for token in input
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
    {
        let invalid = || format!("Invalid selection {token:?}: use numbers between 1 and {count}");
        let parse = |s: &str| -> std::result::Result<usize, String> {
            match s.trim().parse::<usize>() {
                Ok(n) if (1..=count).contains(&n) => Ok(n - 1),
                _ => Err(invalid()),
            }
        };

        match token.split_once('-') {
            Some((start, end)) => {
                let (start, end) = (parse(start)?, parse(end)?);
                if start > end {
                    return Err(invalid());
                }
                indices.extend(start..=end);
            }
            None => indices.push(parse(token)?),
        }
    }

    Ok(indices)
}
