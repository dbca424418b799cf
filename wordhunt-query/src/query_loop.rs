use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use wordhunt_common::{Result, TieBreak};
use wordhunt_text::FrequencyIndex;

use crate::command::{Command, parse_command};

/// First line written to the output, before any command is read.
pub const BANNER: &str = "Type a word to search for. Type \"-all\" to display all words.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    AwaitingCommand,
    Terminated,
}

/// What a finished loop did.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoopSummary {
    pub lookups: usize,
    pub listings: usize,
}

/// Interactive read-evaluate-print loop over a built [`FrequencyIndex`].
///
/// Reads whitespace-delimited tokens from `input` and answers each one on
/// `output`. End of input moves the loop to [`LoopState::Terminated`]; so
/// does any I/O failure, which is also returned to the caller.
///
/// ```
/// use std::io::Cursor;
/// use wordhunt_query::QueryLoop;
/// use wordhunt_text::FrequencyIndex;
///
/// let index = FrequencyIndex::build(["Hello", "world", "Hello"]);
/// let mut out = Vec::new();
/// QueryLoop::new(&index, Cursor::new("Hello xyz\n"), &mut out)
///     .run()
///     .unwrap();
///
/// let text = String::from_utf8(out).unwrap();
/// let mut lines = text.lines().skip(1);
/// assert_eq!(lines.next(), Some("\"Hello\" was found 2 time(s)"));
/// assert_eq!(lines.next(), Some("\"xyz\" was found 0 time(s)"));
/// ```
pub struct QueryLoop<'a, R, W> {
    index: &'a FrequencyIndex,
    tie_break: TieBreak,
    tokens: Tokens<R>,
    output: W,
    state: LoopState,
    summary: LoopSummary,
}

impl<'a, R: BufRead, W: Write> QueryLoop<'a, R, W> {
    pub fn new(index: &'a FrequencyIndex, input: R, output: W) -> Self {
        Self {
            index,
            tie_break: TieBreak::default(),
            tokens: Tokens::new(input),
            output,
            state: LoopState::AwaitingCommand,
            summary: LoopSummary::default(),
        }
    }

    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Write the banner, then answer commands until input is exhausted.
    pub fn run(&mut self) -> Result<LoopSummary> {
        if let Err(err) = writeln!(self.output, "{BANNER}").and_then(|_| self.output.flush()) {
            self.state = LoopState::Terminated;
            return Err(err.into());
        }
        while self.step()? == LoopState::AwaitingCommand {}
        Ok(self.summary)
    }

    /// Consume one token and answer it.
    pub fn step(&mut self) -> Result<LoopState> {
        if self.state == LoopState::Terminated {
            return Ok(self.state);
        }

        let token = match self.tokens.next_token() {
            Ok(Some(token)) => token,
            Ok(None) => {
                self.state = LoopState::Terminated;
                tracing::info!(
                    lookups = self.summary.lookups,
                    listings = self.summary.listings,
                    "query.input_closed"
                );
                return Ok(self.state);
            }
            Err(err) => {
                self.state = LoopState::Terminated;
                tracing::warn!(error = %err, "query.read_failed");
                return Err(err.into());
            }
        };

        if let Some(command) = parse_command(&token) {
            if let Err(err) = self.respond(command) {
                self.state = LoopState::Terminated;
                tracing::warn!(error = %err, "query.write_failed");
                return Err(err.into());
            }
        }
        Ok(self.state)
    }

    fn respond(&mut self, command: Command) -> io::Result<()> {
        match command {
            Command::All => {
                let listing = self.index.ascending(self.tie_break);
                tracing::debug!(entries = listing.len(), tie_break = ?self.tie_break, "query.list_all");
                for (word, count) in listing {
                    write_count(&mut self.output, word, count)?;
                }
                self.summary.listings += 1;
            }
            Command::Lookup(word) => {
                let count = self.index.count(&word);
                tracing::debug!(%word, count, "query.lookup");
                write_count(&mut self.output, &word, count)?;
                self.summary.lookups += 1;
            }
        }
        self.output.flush()
    }
}

fn write_count<W: Write>(out: &mut W, word: &str, count: u64) -> io::Result<()> {
    writeln!(out, "\"{word}\" was found {count} time(s)")
}

/// Whitespace-delimited tokens pulled lazily from line-oriented input.
struct Tokens<R> {
    input: R,
    pending: VecDeque<String>,
    line: Vec<u8>,
}

impl<R: BufRead> Tokens<R> {
    fn new(input: R) -> Self {
        Self {
            input,
            pending: VecDeque::new(),
            line: Vec::new(),
        }
    }

    /// Next token, or `None` once the input is closed.
    fn next_token(&mut self) -> io::Result<Option<String>> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(Some(token));
            }
            self.line.clear();
            if self.input.read_until(b'\n', &mut self.line)? == 0 {
                return Ok(None);
            }
            let line = String::from_utf8_lossy(&self.line);
            self.pending
                .extend(line.split_whitespace().map(str::to_owned));
        }
    }
}
