// Copyright (c) 2022 Google LLC All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Usage text assembled from plain descriptions of a command's arguments.

use super::{CommandInfo, HelpLayout, write_description};

const SECTION_SEPARATOR: &str = "\n\n";

/// Everything needed to render the usage text of one command.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HelpInfo<'a> {
    /// Free text printed under the usage line.
    pub description: &'a str,
    /// Flags and options, in display order.
    pub flags: Vec<HelpFlagInfo<'a>>,
    /// Positional arguments, in declaration order.
    pub positionals: Vec<HelpPositionalInfo<'a>>,
    /// Subcommand names and their one-line descriptions.
    pub subcommands: Vec<(&'a str, &'a str)>,
    /// Free text appended after all sections.
    pub footer: &'a str,
}

impl<'a> HelpInfo<'a> {
    /// Render the help text for the command addressed by `command_name`.
    pub fn help(&self, command_name: &[&str], layout: &HelpLayout) -> String {
        self.styled_help(command_name, layout, str::to_string)
    }

    /// Like [`HelpInfo::help`], passing every section heading, colon
    /// included, through `style`.
    pub fn styled_help(
        &self,
        command_name: &[&str],
        layout: &HelpLayout,
        style: impl Fn(&str) -> String,
    ) -> String {
        let command_name = command_name.join(" ");
        let mut out = style("Usage:");
        out.push(' ');
        out.push_str(&command_name);

        if !self.subcommands.is_empty() {
            out.push_str(" [SUBCOMMAND]");
        }

        if !self.flags.is_empty() {
            out.push_str(" [OPTIONS]");
        }

        for flag in self.flags.iter().filter(|flag| flag.optionality.is_required()) {
            out.push(' ');
            flag.help_usage(&mut out);
        }

        for positional in &self.positionals {
            out.push(' ');
            positional.help_usage(&mut out);
        }

        if !self.description.is_empty() {
            out.push_str(SECTION_SEPARATOR);
            out.push_str(self.description);
        }

        if !self.subcommands.is_empty() {
            out.push_str(SECTION_SEPARATOR);
            out.push_str(&style("Subcommands:"));
            for &(name, description) in &self.subcommands {
                write_description(&mut out, &CommandInfo { name, description }, layout);
            }
        }

        if !self.positionals.is_empty() {
            out.push_str(SECTION_SEPARATOR);
            out.push_str(&style("Positional Arguments:"));
            for positional in &self.positionals {
                positional.help_description(&mut out, layout);
            }
        }

        // One section per heading, in order of first appearance.
        let mut sections: Vec<(Option<&str>, Vec<&HelpFlagInfo<'_>>)> = Vec::new();
        for flag in &self.flags {
            match sections.iter_mut().find(|(heading, _)| *heading == flag.heading) {
                Some((_, flags)) => flags.push(flag),
                None => sections.push((flag.heading, vec![flag])),
            }
        }
        for (heading, flags) in sections {
            out.push_str(SECTION_SEPARATOR);
            out.push_str(&style(&format!("{}:", heading.unwrap_or("Options"))));
            for flag in flags {
                flag.help_description(&mut out, layout);
            }
        }

        if !self.footer.is_empty() {
            out.push_str(SECTION_SEPARATOR);
            out.push_str(self.footer);
        }

        out.push('\n');

        out
    }
}

/// Whether an argument must appear, may appear, or may repeat.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum HelpOptionality {
    /// Must appear exactly once.
    Required,
    /// May appear at most once.
    #[default]
    Optional,
    /// May appear any number of times.
    Repeating,
    /// Must appear at least once and may repeat.
    RequiredRepeating,
}

impl HelpOptionality {
    fn is_required(&self) -> bool {
        matches!(self, HelpOptionality::Required | HelpOptionality::RequiredRepeating)
    }

    fn is_repeating(&self) -> bool {
        matches!(self, HelpOptionality::Repeating | HelpOptionality::RequiredRepeating)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HelpPositionalInfo<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub optionality: HelpOptionality,
    /// Rendered default, shown as `[default: ...]`.
    pub default: Option<String>,
}

impl<'a> HelpPositionalInfo<'a> {
    /// Add positional arguments like `[foo]...` to a help format string.
    pub fn help_usage(&self, out: &mut String) {
        if !self.optionality.is_required() {
            out.push('[');
        }

        out.push_str(self.name);

        if !self.optionality.is_required() {
            out.push(']');
        }

        if self.optionality.is_repeating() {
            out.push_str("...");
        }
    }

    /// Describes a positional argument like this:
    ///  hello       positional argument description
    pub fn help_description(&self, out: &mut String, layout: &HelpLayout) {
        let description = with_default(self.description, self.default.as_deref());
        let info = CommandInfo { name: self.name, description: description.trim_start() };
        write_description(out, &info, layout);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HelpFlagInfo<'a> {
    pub short: Option<char>,
    /// Long name without the leading dashes.
    pub long: Option<&'a str>,
    pub description: &'a str,
    pub optionality: HelpOptionality,
    pub kind: HelpFieldKind<'a>,
    /// Rendered default, shown as `[default: ...]`.
    pub default: Option<String>,
    /// Marks this side of a toggle pair as the one in effect when absent.
    pub is_default_side: bool,
    /// Section heading this entry is listed under.
    pub heading: Option<&'a str>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum HelpFieldKind<'a> {
    #[default]
    Switch,
    Option {
        arg_name: &'a str,
    },
}

impl<'a> HelpFlagInfo<'a> {
    /// Add options like `-f <foo>` to a help format string.
    pub fn help_usage(&self, out: &mut String) {
        if !self.optionality.is_required() {
            out.push('[');
        }

        match (self.short, self.long) {
            (Some(short), _) => {
                out.push('-');
                out.push(short);
            }
            (None, Some(long)) => {
                out.push_str("--");
                out.push_str(long);
            }
            (None, None) => {}
        }

        if let HelpFieldKind::Option { arg_name } = self.kind {
            out.push_str(" <");
            out.push_str(arg_name);
            out.push('>');
        }

        if !self.optionality.is_required() {
            out.push(']');
        }

        if self.optionality.is_repeating() {
            out.push_str("...");
        }
    }

    /// Describes an option like this:
    ///  -f, --force <bool>     force, ignore minor errors. This description
    ///                         is so long that it wraps to the next line.
    pub fn help_description(&self, out: &mut String, layout: &HelpLayout) {
        let mut name = String::new();
        match self.short {
            Some(short) => {
                name.push('-');
                name.push(short);
                if self.long.is_some() {
                    name.push_str(", ");
                }
            }
            // Keep long names aligned with the ones that follow a short name.
            None => name.push_str("    "),
        }
        if let Some(long) = self.long {
            name.push_str("--");
            name.push_str(long);
        }
        if let HelpFieldKind::Option { arg_name } = self.kind {
            name.push_str(" <");
            name.push_str(arg_name);
            name.push('>');
        }

        let mut description = with_default(self.description, self.default.as_deref());
        if self.optionality.is_required() {
            description.push_str(" [required]");
        }
        if self.is_default_side {
            description.push_str(" (default)");
        }

        let info = CommandInfo { name: &name, description: description.trim_start() };
        write_description(out, &info, layout);
    }
}

fn with_default(description: &str, default: Option<&str>) -> String {
    match default {
        Some(default) => format!("{} [default: {}]", description, default),
        None => description.to_string(),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn layout() -> HelpLayout {
        HelpLayout { description_indent: 20, wrap_width: 80 }
    }

    #[test]
    fn usage_lists_required_options_and_positionals() {
        let info = HelpInfo {
            description: "Record changes.",
            flags: vec![
                HelpFlagInfo {
                    short: Some('a'),
                    long: Some("all"),
                    description: "commit all",
                    ..Default::default()
                },
                HelpFlagInfo {
                    short: Some('m'),
                    long: Some("message"),
                    description: "the message",
                    optionality: HelpOptionality::Required,
                    kind: HelpFieldKind::Option { arg_name: "string" },
                    ..Default::default()
                },
            ],
            positionals: vec![HelpPositionalInfo {
                name: "pathspec",
                description: "paths",
                optionality: HelpOptionality::Repeating,
                default: None,
            }],
            ..Default::default()
        };

        assert_eq!(
            info.help(&["git", "commit"], &layout()),
            "Usage: git commit [OPTIONS] -m <string> [pathspec]...

Record changes.

Positional Arguments:
  pathspec          paths

Options:
  -a, --all         commit all
  -m, --message <string>
                    the message [required]
"
        );
    }

    #[test]
    fn entries_grouped_by_heading() {
        let info = HelpInfo {
            flags: vec![
                HelpFlagInfo {
                    short: Some('e'),
                    long: Some("regexp"),
                    heading: Some("Input Options"),
                    ..Default::default()
                },
                HelpFlagInfo { short: Some('c'), heading: Some("Output"), ..Default::default() },
                HelpFlagInfo {
                    short: Some('f'),
                    heading: Some("Input Options"),
                    ..Default::default()
                },
                HelpFlagInfo { long: Some("help"), ..Default::default() },
            ],
            footer: "Examples:\n  grep -e foo",
            ..Default::default()
        };

        assert_eq!(
            info.help(&["grep"], &layout()),
            "Usage: grep [OPTIONS]

Input Options:
  -e, --regexp
  -f

Output:
  -c

Options:
      --help

Examples:
  grep -e foo
"
        );
    }

    #[test]
    fn headings_pass_through_style() {
        let info = HelpInfo {
            description: "Search files.",
            flags: vec![
                HelpFlagInfo { short: Some('i'), heading: Some("Matching"), ..Default::default() },
                HelpFlagInfo { long: Some("help"), ..Default::default() },
            ],
            positionals: vec![HelpPositionalInfo {
                name: "pattern",
                optionality: HelpOptionality::Required,
                ..Default::default()
            }],
            subcommands: vec![("index", "")],
            ..Default::default()
        };

        let styled = info.styled_help(&["grep"], &layout(), |heading| format!("<{}>", heading));
        assert_eq!(
            styled,
            "<Usage:> grep [SUBCOMMAND] [OPTIONS] pattern

Search files.

<Subcommands:>
  index

<Positional Arguments:>
  pattern

<Matching:>
  -i

<Options:>
      --help
"
        );
        assert_eq!(info.help(&["grep"], &layout()), styled.replace(&['<', '>'][..], ""));
    }
}
