// Copyright (c) 2020 Google LLC All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Shared functionality between the argscope runtime and its help output.
//!
//! This library holds the text layout used by usage rendering and the
//! structured argument info that can be serialized for documentation tools.

mod help;

pub use help::{
    HelpFieldKind, HelpFlagInfo, HelpInfo, HelpOptionality, HelpPositionalInfo,
};

#[cfg(feature = "serde")]
use serde::Serialize;

/// Information about a particular command used for output.
pub struct CommandInfo<'a> {
    /// The name of the command.
    pub name: &'a str,
    /// A short description of the command's functionality.
    pub description: &'a str,
}

/// Information about the command line arguments for a given command.
#[derive(Debug, Default, PartialEq, Eq, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct CommandInfoWithArgs<'a> {
    /// The name of the command.
    pub name: &'a str,
    /// A short description of the command's functionality.
    pub description: &'a str,
    /// Flags and valued options accepted by the command.
    pub flags: Vec<FlagInfo<'a>>,
    /// Positional arguments, in declaration order.
    pub positionals: Vec<PositionalInfo<'a>>,
    /// Subcommands.
    pub commands: Vec<SubCommandInfo<'a>>,
}

/// Information about a subcommand.
#[derive(Debug, Default, PartialEq, Eq, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SubCommandInfo<'a> {
    /// The subcommand name.
    pub name: &'a str,
    /// The information about the subcommand.
    pub command: CommandInfoWithArgs<'a>,
}

/// Information about a flag or option.
#[derive(Debug, Default, PartialEq, Eq, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct FlagInfo<'a> {
    /// The kind of flag.
    pub kind: FlagInfoKind<'a>,
    /// The optionality of the flag.
    pub optionality: Optionality,
    /// The long string of the flag, without leading dashes.
    pub long: Option<&'a str>,
    /// The single character short indicator for this flag.
    pub short: Option<char>,
    /// The description of the flag.
    pub description: &'a str,
    /// Visibility in the help for this argument.
    pub hidden: bool,
}

/// The kind of flags.
#[derive(Debug, Default, PartialEq, Eq, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum FlagInfoKind<'a> {
    /// Switch represents a boolean flag.
    #[default]
    Switch,
    /// Count represents a flag whose occurrences are counted.
    Count,
    /// Option is a flag that also has an associated value.
    Option {
        /// The name shown for the value, like `<num>`.
        arg_name: &'a str,
    },
}

/// The optionality defines the requirements related
/// to the presence of the argument on the command line.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum Optionality {
    /// Required indicates the argument is required
    /// exactly once.
    #[default]
    Required,
    /// Optional indicates the argument may or may not
    /// be present.
    Optional,
    /// Repeating indicates the argument may appear zero
    /// or more times.
    Repeating,
    /// RequiredRepeating indicates the argument must appear
    /// at least once and may repeat.
    RequiredRepeating,
}

/// Information about positional arguments.
#[derive(Debug, Default, PartialEq, Eq, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct PositionalInfo<'a> {
    /// The name of the argument.
    pub name: &'a str,
    /// Description of the argument.
    pub description: &'a str,
    /// Optionality of the argument.
    pub optionality: Optionality,
}

pub const INDENT: &str = "  ";

/// Column layout for help text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HelpLayout {
    /// Column at which descriptions start.
    pub description_indent: usize,
    /// Lines are wrapped before exceeding this width.
    pub wrap_width: usize,
}

impl Default for HelpLayout {
    fn default() -> Self {
        Self { description_indent: 25, wrap_width: 80 }
    }
}

/// Write command names and descriptions to an output string.
///
/// Embedded newlines in the description start a new line at the
/// description column.
pub fn write_description(out: &mut String, cmd: &CommandInfo<'_>, layout: &HelpLayout) {
    let mut current_line = INDENT.to_string();
    current_line.push_str(cmd.name);

    if cmd.description.is_empty() {
        new_line(&mut current_line, out);
        return;
    }

    // Leave two columns between the name and its description.
    if char_len(&current_line) + 2 > layout.description_indent
        || !indent_description(&mut current_line, layout.description_indent)
    {
        // Start the description on a new line if the flag names already
        // add up to more than the description indent.
        new_line(&mut current_line, out);
    }

    for (index, paragraph) in cmd.description.split('\n').enumerate() {
        if index > 0 {
            new_line(&mut current_line, out);
        }

        let mut words = paragraph.split(' ').peekable();
        while let Some(first_word) = words.next() {
            indent_description(&mut current_line, layout.description_indent);
            current_line.push_str(first_word);

            'inner: while let Some(&word) = words.peek() {
                if (char_len(&current_line) + char_len(word) + 1) > layout.wrap_width {
                    new_line(&mut current_line, out);
                    break 'inner;
                } else {
                    // advance the iterator
                    let _ = words.next();
                    current_line.push(' ');
                    current_line.push_str(word);
                }
            }
        }
    }
    new_line(&mut current_line, out);
}

// Indent the current line in to `indent` chars.
// Returns a boolean indicating whether or not spacing was added.
fn indent_description(line: &mut String, indent: usize) -> bool {
    let cur_len = char_len(line);
    if cur_len < indent {
        let num_spaces = indent - cur_len;
        line.extend(std::iter::repeat_n(' ', num_spaces));
        true
    } else {
        false
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

// Append a newline and the current line to the output,
// clearing the current line.
fn new_line(current_line: &mut String, out: &mut String) {
    out.push('\n');
    out.push_str(current_line);
    current_line.truncate(0);
}
