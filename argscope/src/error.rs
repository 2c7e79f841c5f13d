// Copyright (c) 2020 Google LLC All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use thiserror::Error;

use crate::key::OptionKey;

/// A problem with the command line a user typed.
///
/// Exactly one is reported per parse: the first one found.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The option is not declared by any command.
    #[error("Invalid option '{option}'.{}", suggestion_text(.suggestion))]
    UnknownIdentifier {
        /// The option as typed, like `--colour`.
        option: String,
        /// A declared option of the active command with a similar name.
        suggestion: Option<String>,
    },

    /// The option is declared, but by a command other than the active one.
    #[error("Option '{option}' is not recognized in this scope; it belongs to '{scope}'.")]
    ScopeMismatch {
        /// The option as typed.
        option: String,
        /// The command path that declares it, like `git commit`.
        scope: String,
    },

    /// A valued option was the last argument.
    #[error("Option '{option}' requires a value.")]
    MissingOptionValue {
        /// The option as typed.
        option: String,
    },

    /// A flag was given a value with `--flag=value`.
    #[error("Option '{option}' does not take a value.")]
    UnexpectedValue {
        /// The option as typed.
        option: String,
    },

    /// The value text does not parse as the declared type.
    #[error(
        "Invalid value for option '{option}'. Expected {} {expected}, but got '{received}'.",
        article(.expected)
    )]
    TypeCoercionFailure {
        /// The declared form of the option, like `-n, --count`.
        option: String,
        /// The declared type name, like `integer`.
        expected: &'static str,
        /// The text that was given.
        received: String,
    },

    /// A required option was not given.
    #[error("Missing required option '{option}'.")]
    MissingRequiredOption {
        /// The declared form of the option.
        option: String,
    },

    /// A required positional was not given.
    #[error("Missing required positional argument '{name}'.")]
    MissingRequiredPositional {
        /// The declared name of the positional.
        name: String,
    },
}

fn suggestion_text(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(suggestion) => format!(" Did you mean '{}'?", suggestion),
        None => String::new(),
    }
}

fn article(word: &str) -> &'static str {
    match word.chars().next() {
        Some('a' | 'e' | 'i' | 'o' | 'u') => "an",
        _ => "a",
    }
}

/// A mistake in the declared commands, found by [`Command::build`](crate::Command::build).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// An option has neither a short nor a long name.
    #[error("An option of '{scope}' has neither a short nor a long name.")]
    MissingIdentity {
        /// The command path.
        scope: String,
    },

    /// A name cannot be typed as an option, positional or subcommand.
    #[error("Invalid name '{name}' in '{scope}'.")]
    InvalidName {
        /// The command path.
        scope: String,
        /// The offending name.
        name: String,
    },

    /// Two options of one command share a key.
    #[error("Option '{key}' is declared more than once in '{scope}'.")]
    DuplicateKey {
        /// The command path.
        scope: String,
        /// The shared key.
        key: OptionKey,
    },

    /// An option uses `-h`/`--help`, or `-V`/`--version` when a version is set.
    #[error("Option '{key}' in '{scope}' is reserved.")]
    ReservedKey {
        /// The command path.
        scope: String,
        /// The reserved key.
        key: OptionKey,
    },

    /// A variadic positional is followed by another positional.
    #[error("Variadic positional '{name}' of '{scope}' must be declared last.")]
    VariadicNotLast {
        /// The command path.
        scope: String,
        /// The variadic positional.
        name: String,
    },

    /// More than one variadic positional.
    #[error("'{scope}' declares more than one variadic positional.")]
    MultipleVariadic {
        /// The command path.
        scope: String,
    },

    /// Two positionals share a name.
    #[error("Positional '{name}' is declared more than once in '{scope}'.")]
    DuplicatePositional {
        /// The command path.
        scope: String,
        /// The shared name.
        name: String,
    },

    /// Two subcommands share a name.
    #[error("Subcommand '{name}' is declared more than once in '{scope}'.")]
    DuplicateSubcommand {
        /// The command path.
        scope: String,
        /// The shared name.
        name: String,
    },

    /// A default value does not have the declared type.
    #[error("Default value '{found}' for option '{option}' is not of type {expected}.")]
    DefaultTypeMismatch {
        /// The declared form of the option.
        option: String,
        /// The declared type name.
        expected: &'static str,
        /// The default as given.
        found: String,
    },

    /// A single positional was given several default values.
    #[error("Positional '{name}' takes one value but has several defaults.")]
    MultipleDefaults {
        /// The positional.
        name: String,
    },

    /// An option or positional is both required and defaulted.
    #[error("'{name}' is required and cannot have a default.")]
    RequiredWithDefault {
        /// The declared form of the option or positional.
        name: String,
    },

    /// A feature was used on a kind of option that does not support it.
    #[error("Option '{option}' does not support {feature}.")]
    Unsupported {
        /// The declared form of the option.
        option: String,
        /// The feature, like `counting`.
        feature: &'static str,
    },

    /// A delimiter was set on an option that is not repeated.
    #[error("Option '{option}' has a delimiter but is not repeated.")]
    DelimiterNotRepeated {
        /// The declared form of the option.
        option: String,
    },

    /// A delimiter option is missing or is not a single `char` option.
    #[error(
        "Delimiter '{delimiter}' of option '{option}' is not a char option of the same command."
    )]
    InvalidDelimiterOption {
        /// The declared form of the option.
        option: String,
        /// The key naming the delimiter option.
        delimiter: OptionKey,
    },
}
