// Copyright (c) 2020 Google LLC All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Declarative command line argument parsing with typed values, grouped
//! short options and nested subcommands.
//!
//! Commands are declared with builders and frozen by [`Command::build`] into
//! a [`Parser`], which can then parse any number of argument lists. Each
//! parse returns a [`ParseOutcome`]: a typed [`ParseResult`], the help or
//! version text the user asked for, or the first [`ParseError`] found.
//!
//! ## Basic Example
//!
//! ```rust,no_run
//! use argscope::{Command, OptionSpec, PositionalSpec};
//!
//! let parser = Command::new("goup")
//!     .description("Reach new heights.")
//!     .option(OptionSpec::flag(('j', "jump")).help("whether or not to jump"))
//!     .option(OptionSpec::int("height").required().help("how high to go"))
//!     .option(OptionSpec::string("pilot-nickname").help("an optional nickname for the pilot"))
//!     .build()
//!     .unwrap();
//!
//! let up = parser.from_env();
//! let height: i64 = up.get("height").unwrap();
//! ```
//!
//! `./some_bin --help` will then output the following:
//!
//! ```bash
//! Usage: goup [OPTIONS] --height <integer>
//!
//! Reach new heights.
//!
//! Options:
//!   -j, --jump             whether or not to jump
//!       --height <integer>
//!                          how high to go [required]
//!       --pilot-nickname <string>
//!                          an optional nickname for the pilot
//!   -h, --help             Show this help message and exit
//! ```
//!
//! The resulting program can then be used in any of these ways:
//! - `./some_bin --height 5`
//! - `./some_bin -j --height=5`
//! - `./some_bin --jump --height 5 --pilot-nickname Wes`
//!
//! Short options can be grouped, and a valued one at the end of a group
//! takes the rest of the group or the next argument, so `-vn15`,
//! `-vn 15` and `-v -n 15` all mean the same thing. Everything after `--`
//! is positional.
//!
//! ## Repeated options
//!
//! Counting flags count their occurrences. Repeated valued options keep
//! every occurrence, optionally split on a delimiter:
//!
//! ```rust
//! use argscope::{Command, OptionSpec};
//!
//! let parser = Command::new("cc")
//!     .option(OptionSpec::count(('v', "verbose")))
//!     .option(OptionSpec::string('I').repeated().delimiter(','))
//!     .build()
//!     .unwrap();
//!
//! let result = parser.parse(&["-vv", "-I123", "-I", "45,6"]).into_result().unwrap();
//! assert_eq!(result.count('v'), 2);
//! assert_eq!(result.get_all::<String>('I'), ["123", "45", "6"]);
//! ```
//!
//! ## Subcommands
//!
//! The first positional argument of a command with subcommands selects
//! one. Later arguments are bound against the subcommand only.
//!
//! ```rust
//! use argscope::{Command, OptionSpec, ParseError, ParseOutcome};
//!
//! let parser = Command::new("git")
//!     .option(OptionSpec::flag("verbose"))
//!     .subcommand(Command::new("commit").option(OptionSpec::flag(('a', "all"))))
//!     .build()
//!     .unwrap();
//!
//! let result = parser.parse(&["--verbose", "commit", "-a"]).into_result().unwrap();
//! assert_eq!(result.command_path(), ["commit"]);
//! assert!(result.flag("verbose") && result.flag("all"));
//!
//! assert_eq!(
//!     parser.parse(&["commit", "--verbose"]),
//!     ParseOutcome::Failure(ParseError::ScopeMismatch {
//!         option: "--verbose".to_string(),
//!         scope: "git".to_string(),
//!     })
//! );
//! ```

#![deny(missing_docs)]

mod bind;
mod error;
mod help;
mod key;
mod option;
mod positional;
mod result;
mod scope;
mod token;
mod validate;
mod value;

use console::style;

pub use argscope_shared::{
    CommandInfoWithArgs, FlagInfo, FlagInfoKind, HelpLayout, Optionality, PositionalInfo,
    SubCommandInfo,
};

pub use crate::{
    error::{BuildError, ParseError},
    key::{Names, OptionKey},
    option::{Delimiter, Multiplicity, OptionKind, OptionSpec},
    positional::PositionalSpec,
    result::{Matches, ParseResult},
    scope::{Command, Parser, ScopeId},
    value::{FromValue, Value, ValueType},
};

/// Everything a parse can end in.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome {
    /// The arguments were valid.
    Success(ParseResult),
    /// `-h`/`--help` was given; holds the help text of the command that was
    /// active at the end of the arguments.
    Help(String),
    /// `-V`/`--version` was given and a version is configured.
    Version(String),
    /// The first problem found.
    Failure(ParseError),
}

impl ParseOutcome {
    /// The process exit code: 0 unless the parse failed.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Failure(_) => 1,
            _ => 0,
        }
    }

    /// The result of a successful parse, or why there is none.
    pub fn into_result(self) -> Result<ParseResult, EarlyExit> {
        match self {
            Self::Success(result) => Ok(result),
            Self::Help(output) => Err(EarlyExit { output, status: Ok(()) }),
            Self::Version(version) => Err(EarlyExit { output: version, status: Ok(()) }),
            Self::Failure(error) => Err(error.into()),
        }
    }
}

/// Information to display to the user about why a parse produced no result.
///
/// This can occur due to either failed parsing or a flag like `--help`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EarlyExit {
    /// The output to display to the user of the commandline tool.
    pub output: String,
    /// Status of argument parsing.
    ///
    /// `Ok` if the command was parsed successfully and the early exit is due
    /// to a flag like `--help` causing early exit with output.
    ///
    /// `Err` if the arguments were not successfully parsed.
    pub status: Result<(), ()>,
}

impl From<ParseError> for EarlyExit {
    fn from(error: ParseError) -> Self {
        Self { output: error.to_string(), status: Err(()) }
    }
}

/// Extract the base cmd from a path
fn cmd<'a>(default: &'a str, path: &'a str) -> &'a str {
    std::path::Path::new(path).file_name().and_then(|s| s.to_str()).unwrap_or(default)
}

impl Parser {
    /// Parse the current process's `env::args`.
    ///
    /// This function will exit early from the current process if argument
    /// parsing was unsuccessful or if information like `--help` was
    /// requested. Error messages will be printed to stderr, and `--help`
    /// output to stdout. Both are styled when printed to a terminal.
    pub fn from_env(&self) -> ParseResult {
        let strings: Vec<String> = std::env::args_os()
            .map(|s| s.into_string())
            .collect::<Result<Vec<_>, _>>()
            .unwrap_or_else(|arg| {
                eprintln!("Invalid utf8: {}", arg.to_string_lossy());
                std::process::exit(1)
            });

        if strings.is_empty() {
            eprintln!("No program name, argv is empty");
            std::process::exit(1)
        }

        let cmd = cmd(&strings[0], &strings[0]);
        let outcome = bind::Binder::new(self).styled().run(&strings[1..]);
        let code = outcome.exit_code();
        match outcome {
            ParseOutcome::Success(result) => return result,
            ParseOutcome::Help(help) => print!("{}", help),
            ParseOutcome::Version(version) => println!("{}", version),
            ParseOutcome::Failure(error) => {
                let prefix = style("Error:").red().bold().for_stderr();
                eprintln!("{} {}\nRun {} --help for more information.", prefix, error, cmd)
            }
        }
        std::process::exit(code)
    }

    /// Structured info about every command, flag and positional, for
    /// generating reference documentation.
    pub fn args_info(&self) -> CommandInfoWithArgs<'_> {
        help::args_info(self, self.root())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_cmd_extraction() {
        let expected = "test_cmd";
        let path = format!("/tmp/{}", expected);
        let cmd = cmd(&path, &path);
        assert_eq!(expected, cmd);
    }

    #[test]
    fn exit_codes() {
        let parser = Command::new("tool").version("1.2.3").build().unwrap();
        assert_eq!(parser.parse(&["-V"]), ParseOutcome::Version("1.2.3".to_string()));
        assert_eq!(parser.parse(&["-V"]).exit_code(), 0);
        assert_eq!(parser.parse(&["--help"]).exit_code(), 0);
        assert_eq!(parser.parse(&["-x"]).exit_code(), 1);
    }

    #[test]
    fn early_exit_carries_status() {
        let parser = Command::new("tool").build().unwrap();
        let early_exit = parser.parse(&["--nope"]).into_result().unwrap_err();
        assert_eq!(early_exit.output, "Invalid option '--nope'.");
        assert_eq!(early_exit.status, Err(()));
        assert_eq!(parser.parse(&["-h"]).into_result().unwrap_err().status, Ok(()));
    }

    #[test]
    fn parser_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Parser>();
    }
}
