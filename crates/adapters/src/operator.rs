//! Line-oriented terminal operator.
//!
//! Prompts are written without a trailing newline and answers are read one
//! line at a time. End of input at any prompt cancels the session.

use std::io::{self, BufRead, BufReader, Stdin, Stdout, Write};
use std::sync::Mutex;
use stepdoc_ports::{DescriptionProvider, DescriptionRequest, Notice, OperatorPort, is_affirmative};
use stepdoc_shared::{ErrorCode, ErrorEnvelope, Result};

const ROOT_PROMPT: &str = "Repo directory path: ";
const ITEM_PROMPT: &str = "Item number: ";
const DESCRIPTION_PROMPT: &str = "Short message (required): ";
const CONFIRM_HEADER: &str = "The following files will be included:";
const CONFIRM_PROMPT: &str = "Do you want to continue? (y/n): ";

struct Streams<R, W> {
    input: R,
    output: W,
}

/// Operator reading answers from `R` and writing prompts to `W`.
pub struct StdioOperator<R, W> {
    streams: Mutex<Streams<R, W>>,
}

impl StdioOperator<BufReader<Stdin>, Stdout> {
    /// Operator bound to the process stdin and stdout.
    #[must_use]
    pub fn terminal() -> Self {
        Self::new(BufReader::new(io::stdin()), io::stdout())
    }
}

impl<R, W> StdioOperator<R, W>
where
    R: BufRead + Send,
    W: Write + Send,
{
    /// Build an operator over arbitrary streams.
    pub const fn new(input: R, output: W) -> Self {
        Self {
            streams: Mutex::new(Streams { input, output }),
        }
    }

    /// Recover the underlying streams.
    pub fn into_parts(self) -> Result<(R, W)> {
        let streams = self.streams.into_inner().map_err(|_| poisoned())?;
        Ok((streams.input, streams.output))
    }

    fn with_streams<T>(&self, action: impl FnOnce(&mut Streams<R, W>) -> Result<T>) -> Result<T> {
        let mut guard = self.streams.lock().map_err(|_| poisoned())?;
        action(&mut guard)
    }
}

impl<R, W> Streams<R, W>
where
    R: BufRead,
    W: Write,
{
    fn prompt(&mut self, prompt: &str) -> Result<String> {
        self.output.write_all(prompt.as_bytes())?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ErrorEnvelope::cancelled("input closed"));
        }
        let trimmed_len = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed_len);
        Ok(line)
    }

    fn line(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{text}")?;
        self.output.flush()?;
        Ok(())
    }
}

impl<R, W> DescriptionProvider for StdioOperator<R, W>
where
    R: BufRead + Send,
    W: Write + Send,
{
    fn describe(&self, request: &DescriptionRequest<'_>) -> Result<String> {
        self.with_streams(|streams| {
            if request.attempt == 1 {
                streams.line(&format!("\nFile: {}", request.label))?;
            }
            streams.prompt(DESCRIPTION_PROMPT)
        })
    }

    fn notify(&self, notice: &Notice) {
        let text = match notice {
            Notice::DescriptionIntro => format!("\n{notice}"),
            _ => notice.to_string(),
        };
        // A closed stdout leaves nothing to report to.
        let _ = self.with_streams(|streams| streams.line(&text));
    }
}

impl<R, W> OperatorPort for StdioOperator<R, W>
where
    R: BufRead + Send,
    W: Write + Send,
{
    fn ask_root_dir(&self) -> Result<String> {
        self.with_streams(|streams| streams.prompt(ROOT_PROMPT))
    }

    fn ask_item_number(&self) -> Result<String> {
        self.with_streams(|streams| streams.prompt(ITEM_PROMPT))
    }

    fn confirm(&self, labels: &[String]) -> Result<bool> {
        self.with_streams(|streams| {
            streams.line(&format!("\n{CONFIRM_HEADER}"))?;
            for label in labels {
                streams.line(&format!("- {label}"))?;
            }
            let answer = streams.prompt(&format!("\n{CONFIRM_PROMPT}"))?;
            Ok(is_affirmative(&answer))
        })
    }
}

fn poisoned() -> ErrorEnvelope {
    ErrorEnvelope::invariant(ErrorCode::internal(), "operator streams lock poisoned")
}
