//! # Command Parsing
//!
//! Turns one input line into a [`Command`]. Parsing never touches the
//! database; argument-count errors are reported before any reload.

use crate::domain::errors::CommandError;

pub const NEW_USAGE: &str = "new <array_name> [num1 num2 ...]";
pub const MERGE_USAGE: &str = "merge <target_array> <source_array>";
pub const POW_USAGE: &str = "pow <arrayA.indexA> <arrayB.indexB>";
pub const DEL_USAGE: &str = "del <array_name>";

/// One tokenized command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `new <name> [int...]`. Value tokens stay raw so invalid ones can be
    /// reported one by one at dispatch.
    New { name: String, values: Vec<String> },
    /// `show [name]`
    Show { name: Option<String> },
    /// `merge <target> <source>`
    Merge { target: String, source: String },
    /// `pow <ref> <ref>`
    Pow { base: String, exponent: String },
    /// `del <name>`
    Del { name: String },
    Exit,
    /// Anything else, including an empty line (empty name).
    Unsupported(String),
}

impl Command {
    /// Tokenize `line` on whitespace and build a command.
    ///
    /// Extra trailing arguments are ignored.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let mut tokens = line.split_whitespace();
        let name = tokens.next().unwrap_or_default();
        let args: Vec<&str> = tokens.collect();

        let command = match name {
            "new" => {
                let (name, values) = args.split_first().ok_or(CommandError::Usage(NEW_USAGE))?;
                Command::New {
                    name: name.to_string(),
                    values: values.iter().map(|v| v.to_string()).collect(),
                }
            }
            "show" => Command::Show {
                name: args.first().map(|n| n.to_string()),
            },
            "merge" => match args.as_slice() {
                [target, source, ..] => Command::Merge {
                    target: target.to_string(),
                    source: source.to_string(),
                },
                _ => return Err(CommandError::Usage(MERGE_USAGE)),
            },
            "pow" => match args.as_slice() {
                [base, exponent, ..] => Command::Pow {
                    base: base.to_string(),
                    exponent: exponent.to_string(),
                },
                _ => return Err(CommandError::Usage(POW_USAGE)),
            },
            "del" => match args.first() {
                Some(name) => Command::Del {
                    name: name.to_string(),
                },
                None => return Err(CommandError::Usage(DEL_USAGE)),
            },
            "exit" => Command::Exit,
            other => Command::Unsupported(other.to_string()),
        };

        Ok(command)
    }

    /// Whether a successful run writes the database back.
    pub fn mutates(&self) -> bool {
        matches!(
            self,
            Command::New { .. } | Command::Merge { .. } | Command::Del { .. }
        )
    }
}
