//! # Command Interpreter
//!
//! Executes one command line at a time against a [`DatabaseStore`].
//!
//! ## Flow per line
//!
//! ```text
//! parse ──usage error──→ reply
//!   │
//!   ├── exit / unsupported ──→ reply (no disk access)
//!   │
//!   └── new/show/merge/pow/del
//!         load (reload-before-dispatch) ──error──→ abort
//!         dispatch on the owned Database
//!         save (mutating commands only)  ──error──→ abort, nothing reported as done
//!         reply
//! ```
//!
//! The database lives only for the duration of one command. Nothing is
//! cached between lines, so every command sees the latest state persisted by
//! any process, and the last save wins.

mod command;

pub use command::{Command, DEL_USAGE, MERGE_USAGE, NEW_USAGE, POW_USAGE};

use tracing::{debug, warn};

use crate::domain::database::Database;
use crate::domain::errors::CommandError;
use crate::domain::power::power;
use crate::domain::reference::resolve;
use crate::ports::outbound::DatabaseStore;

/// Whether the loop keeps reading after a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Exit,
}

/// Output of one command: every line to print, and what the loop does next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub lines: Vec<String>,
    pub control: Control,
}

impl Reply {
    fn lines(lines: Vec<String>) -> Self {
        Self {
            lines,
            control: Control::Continue,
        }
    }

    fn error(err: &CommandError) -> Self {
        Self::lines(vec![render_error(err)])
    }

    pub fn is_exit(&self) -> bool {
        self.control == Control::Exit
    }
}

/// Format an error as a reply line. Usage lines are printed bare.
pub fn render_error(err: &CommandError) -> String {
    match err {
        CommandError::Usage(_) => err.to_string(),
        _ => format!("Error: {}", err),
    }
}

fn render_array(name: &str, values: &[i64]) -> String {
    format!("{}: {:?}", name, values)
}

/// The interactive command interpreter.
pub struct Interpreter<S: DatabaseStore> {
    store: S,
}

impl<S: DatabaseStore> Interpreter<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Parse and run one input line.
    pub fn execute(&mut self, line: &str) -> Reply {
        match Command::parse(line) {
            Ok(command) => self.dispatch(command),
            Err(err) => Reply::error(&err),
        }
    }

    /// Run an already parsed command.
    pub fn dispatch(&mut self, command: Command) -> Reply {
        match command {
            Command::Exit => Reply {
                lines: vec!["Bye!".to_string()],
                control: Control::Exit,
            },
            Command::Unsupported(name) => Reply::error(&CommandError::UnsupportedOperation(name)),
            command => {
                debug!(?command, "dispatching");
                let mut lines = Vec::new();
                if let Err(err) = self.run(command, &mut lines) {
                    if matches!(err, CommandError::Load(_) | CommandError::Save(_)) {
                        warn!(error = %err, "command aborted by persistence failure");
                    }
                    lines.push(render_error(&err));
                }
                Reply::lines(lines)
            }
        }
    }

    /// Reload, dispatch, persist. `out` may already hold warning lines when an
    /// error is returned.
    fn run(&self, command: Command, out: &mut Vec<String>) -> Result<(), CommandError> {
        let mut db = self.store.load().map_err(CommandError::Load)?;
        let mutates = command.mutates();

        // Reported only once the database is saved.
        let confirmation = match command {
            Command::New { name, values } => {
                if db.contains(&name) {
                    return Err(CommandError::DuplicateArray(name));
                }

                let mut parsed = Vec::with_capacity(values.len());
                for token in values {
                    match token.parse::<i64>() {
                        Ok(value) => parsed.push(value),
                        Err(_) => out.push(render_error(&CommandError::InvalidNumberToken(token))),
                    }
                }

                let count = parsed.len();
                db.insert(name, parsed);
                Some(format!("CREATED ({})", count))
            }

            Command::Show { name: None } => {
                if db.is_empty() {
                    out.push("No arrays present".to_string());
                }
                out.extend(db.iter().map(|(name, values)| render_array(name, values)));
                None
            }

            Command::Show { name: Some(name) } => {
                let values = db
                    .get(&name)
                    .ok_or_else(|| CommandError::UnknownArray(name.clone()))?;
                out.push(render_array(&name, values));
                None
            }

            Command::Merge { target, source } => {
                db.append(&target, &source)?;
                Some("MERGED".to_string())
            }

            Command::Pow { base, exponent } => {
                let base = resolve(&base, &db)?;
                let exponent = resolve(&exponent, &db)?;
                out.push(power(base, exponent)?.to_string());
                None
            }

            Command::Del { name } => {
                if db.remove(&name).is_none() {
                    return Err(CommandError::UnknownArray(name));
                }
                Some("DELETED".to_string())
            }

            Command::Exit | Command::Unsupported(_) => None,
        };

        if mutates {
            self.persist(&db)?;
        }
        out.extend(confirmation);
        Ok(())
    }

    fn persist(&self, db: &Database) -> Result<(), CommandError> {
        self.store.save(db).map_err(CommandError::Save)
    }
}
