//! One-shot and interactive command cycles.
//!
//! Every cycle starts from a freshly fetched [`Directory`]; nothing read from
//! the bridge outlives the cycle that read it.

use std::borrow::Cow;
use std::io::{BufRead, Write};

use tracing::{debug, warn};

use crate::bridge::BridgeGateway;
use crate::command;
use crate::directory::Directory;
use crate::dispatch::dispatch;
use crate::error::{HueError, ValidationError};
use crate::keywords::KeywordTable;
use crate::patch::StatePatch;
use crate::report::{help_text, render_selection, render_status};
use crate::resolver::{GroupSelector, resolve};

pub const PROMPT: &str = "Enter command or one of status, help, quit:";

/// Where the session is in its command cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingInput,
    Parsing,
    Resolving,
    Dispatching,
    Reporting,
    Terminated,
}

/// Classification of one line typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Status(Option<String>),
    Help,
    Quit,
    Blank,
    Command(String),
}

impl Input {
    pub fn classify(line: &str) -> Self {
        let trimmed = line.trim();
        let (head, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (trimmed, ""),
        };
        if trimmed.is_empty() {
            Input::Blank
        } else if head.eq_ignore_ascii_case("status") && !mentions_keyword(rest) {
            Input::Status((!rest.is_empty()).then(|| rest.to_string()))
        } else if rest.is_empty() && head.eq_ignore_ascii_case("help") {
            Input::Help
        } else if rest.is_empty() && head.eq_ignore_ascii_case("quit") {
            Input::Quit
        } else {
            Input::Command(trimmed.to_string())
        }
    }
}

/// `status kitchen` asks for a filtered table; `status on` drives a group called "status".
fn mentions_keyword(words: &str) -> bool {
    words
        .split_whitespace()
        .any(|word| KeywordTable::lookup(word).is_some())
}

/// Result of a command cycle that did not hit a fatal error.
#[derive(Debug)]
pub enum CycleOutcome {
    Applied {
        selector: GroupSelector,
        patch: StatePatch,
    },
    /// The command named no state change; nothing was sent.
    NoChange,
    /// Bad input; reported to the user, the session carries on.
    Rejected(HueError),
}

/// A single invocation's worth of work, as given on the command line.
#[derive(Debug, Clone, Default)]
pub struct OneShot {
    pub group: Option<String>,
    pub patch: StatePatch,
    pub print_status: bool,
}

/// Drives command cycles against one bridge.
pub struct Session<'g, G: BridgeGateway + ?Sized> {
    gateway: &'g G,
    state: SessionState,
}

impl<'g, G: BridgeGateway + ?Sized> Session<'g, G> {
    pub fn new(gateway: &'g G) -> Self {
        Self {
            gateway,
            state: SessionState::AwaitingInput,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    fn transition(&mut self, next: SessionState) {
        debug!(from = ?self.state, to = ?next, "session state");
        self.state = next;
    }

    /// Run a one-shot invocation. Every error is fatal here.
    pub fn run_once<W: Write>(&mut self, request: &OneShot, out: &mut W) -> Result<(), HueError> {
        let result = self.one_shot(request, out);
        self.transition(SessionState::Terminated);
        result
    }

    fn one_shot<W: Write>(&mut self, request: &OneShot, out: &mut W) -> Result<(), HueError> {
        self.transition(SessionState::Parsing);
        let Some(group) = request.group.as_deref() else {
            if request.print_status && request.patch.is_empty() {
                return self.print_status(None, out);
            }
            return Err(ValidationError::NoGroup.into());
        };
        if request.patch.is_empty() {
            return Err(ValidationError::NoChange.into());
        }

        let directory = Directory::fetch(self.gateway)?;
        self.transition(SessionState::Resolving);
        let selector = resolve(group, &directory)?;
        self.transition(SessionState::Dispatching);
        dispatch(self.gateway, selector, &request.patch)?;

        if request.print_status {
            self.transition(SessionState::Reporting);
            self.print_status(None, out)?;
        }
        Ok(())
    }

    /// Run the prompt loop until `quit`, end of input, or a fatal error.
    pub fn run_interactive<R: BufRead, W: Write>(
        &mut self,
        input: R,
        out: &mut W,
    ) -> Result<(), HueError> {
        let result = self.interact(input, out);
        self.transition(SessionState::Terminated);
        result
    }

    fn interact<R: BufRead, W: Write>(&mut self, mut input: R, out: &mut W) -> Result<(), HueError> {
        self.print_status(None, out)?;
        self.transition(SessionState::AwaitingInput);

        let mut raw = Vec::new();
        while self.state != SessionState::Terminated {
            writeln!(out, "{PROMPT}")?;
            out.flush()?;
            raw.clear();
            if input.read_until(b'\n', &mut raw)? == 0 {
                debug!("input closed");
                self.transition(SessionState::Terminated);
                break;
            }
            // Undecodable bytes become U+FFFD and fall out as unknown words.
            let line = String::from_utf8_lossy(&raw);
            if let Cow::Owned(_) = line {
                warn!(line = %line.trim_end(), "input line is not valid UTF-8");
            }

            match Input::classify(&line) {
                Input::Quit => self.transition(SessionState::Terminated),
                Input::Blank => {}
                Input::Help => writeln!(out, "\n{}", help_text())?,
                Input::Status(filter) => {
                    if let Err(err) = self.print_status(filter.as_deref(), out) {
                        self.recover(err, out)?;
                    }
                }
                Input::Command(text) => match self.execute(&text, out)? {
                    CycleOutcome::Applied { .. } => {}
                    CycleOutcome::NoChange => {
                        writeln!(out, "\nNo state change specified; nothing sent. Type 'help' for syntax.\n")?;
                    }
                    CycleOutcome::Rejected(err) => self.recover(err, out)?,
                },
            }
        }
        Ok(())
    }

    /// Run one command line through parse, resolve, dispatch and report.
    ///
    /// Recoverable failures come back as [`CycleOutcome::Rejected`]; an `Err`
    /// means the session cannot continue.
    pub fn execute<W: Write>(&mut self, line: &str, out: &mut W) -> Result<CycleOutcome, HueError> {
        match self.cycle(line, out) {
            Ok(outcome) => {
                self.transition(SessionState::AwaitingInput);
                Ok(outcome)
            }
            Err(err) if err.is_recoverable() => {
                self.transition(SessionState::AwaitingInput);
                Ok(CycleOutcome::Rejected(err))
            }
            Err(err) => {
                self.transition(SessionState::Terminated);
                Err(err)
            }
        }
    }

    fn cycle<W: Write>(&mut self, line: &str, out: &mut W) -> Result<CycleOutcome, HueError> {
        let directory = Directory::fetch(self.gateway)?;

        self.transition(SessionState::Parsing);
        let command = command::parse_line(line)?;

        self.transition(SessionState::Resolving);
        let selector = resolve(&command.group, &directory)?;
        if command.patch.is_empty() {
            warn!(line, "command carries no state change");
            return Ok(CycleOutcome::NoChange);
        }

        self.transition(SessionState::Dispatching);
        dispatch(self.gateway, selector, &command.patch)?;

        self.transition(SessionState::Reporting);
        self.print_status(None, out)?;
        Ok(CycleOutcome::Applied {
            selector,
            patch: command.patch,
        })
    }

    /// Fetch a fresh snapshot and print it, optionally narrowed to one group.
    fn print_status<W: Write>(&mut self, filter: Option<&str>, out: &mut W) -> Result<(), HueError> {
        let directory = Directory::fetch(self.gateway)?;
        let table = match filter {
            Some(token) => render_selection(&directory, resolve(token, &directory)?),
            None => render_status(&directory),
        };
        writeln!(out, "\n{table}")?;
        Ok(())
    }

    fn recover<W: Write>(&mut self, err: HueError, out: &mut W) -> Result<(), HueError> {
        if !err.is_recoverable() {
            self.transition(SessionState::Terminated);
            return Err(err);
        }
        debug!(error = %err, "recoverable command error");
        writeln!(out, "\n{err}\n")?;
        self.transition(SessionState::AwaitingInput);
        Ok(())
    }
}
