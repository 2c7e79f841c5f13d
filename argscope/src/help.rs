// Copyright (c) 2022 Google LLC All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Help text and structured argument info, derived from the declarations
//! alone.

use argscope_shared::{
    CommandInfoWithArgs, FlagInfo, FlagInfoKind, HelpFieldKind, HelpFlagInfo, HelpInfo,
    HelpOptionality, HelpPositionalInfo, Optionality, PositionalInfo, SubCommandInfo,
};

use console::style;

use crate::{
    option::{Multiplicity, OptionKind, OptionSpec},
    positional::PositionalSpec,
    scope::{Parser, ScopeId},
    value::Value,
};

const HELP_DESCRIPTION: &str = "Show this help message and exit";
const VERSION_DESCRIPTION: &str = "Show version information and exit";

fn option_optionality(spec: &OptionSpec) -> HelpOptionality {
    let repeating = spec.multiplicity != Multiplicity::Single;
    match (spec.required, repeating) {
        (true, true) => HelpOptionality::RequiredRepeating,
        (true, false) => HelpOptionality::Required,
        (false, true) => HelpOptionality::Repeating,
        (false, false) => HelpOptionality::Optional,
    }
}

fn positional_optionality(spec: &PositionalSpec) -> HelpOptionality {
    match (spec.required, spec.variadic) {
        (true, true) => HelpOptionality::RequiredRepeating,
        (true, false) => HelpOptionality::Required,
        (false, true) => HelpOptionality::Repeating,
        (false, false) => HelpOptionality::Optional,
    }
}

fn to_optionality(optionality: HelpOptionality) -> Optionality {
    match optionality {
        HelpOptionality::Required => Optionality::Required,
        HelpOptionality::Optional => Optionality::Optional,
        HelpOptionality::Repeating => Optionality::Repeating,
        HelpOptionality::RequiredRepeating => Optionality::RequiredRepeating,
    }
}

/// The help entries of one option: itself, then its negation if any.
fn flag_entries<'a>(spec: &'a OptionSpec, out: &mut Vec<HelpFlagInfo<'a>>) {
    let kind = match spec.arg_name() {
        Some(arg_name) => HelpFieldKind::Option { arg_name },
        None => HelpFieldKind::Switch,
    };
    let default = match (spec.kind, &spec.default) {
        (OptionKind::Valued(_), Some(default)) => Some(default.to_string()),
        _ => None,
    };
    let on_by_default = spec.default == Some(Value::Bool(true));
    let heading = spec.heading.as_deref();

    out.push(HelpFlagInfo {
        short: spec.names.short,
        long: spec.names.long.as_deref(),
        description: &spec.help,
        optionality: option_optionality(spec),
        kind,
        default,
        is_default_side: spec.negation.is_some() && on_by_default,
        heading,
    });

    if let Some(negation) = &spec.negation {
        out.push(HelpFlagInfo {
            short: negation.short,
            long: negation.long.as_deref(),
            description: &spec.negation_help,
            is_default_side: !on_by_default,
            heading,
            ..Default::default()
        });
    }
}

fn builtin_entries<'a>(parser: &'a Parser, out: &mut Vec<HelpFlagInfo<'a>>) {
    let heading = parser.builtin_heading.as_deref();
    if parser.version.is_some() {
        out.push(HelpFlagInfo {
            short: Some('V'),
            long: Some("version"),
            description: VERSION_DESCRIPTION,
            heading,
            ..Default::default()
        });
    }
    out.push(HelpFlagInfo {
        short: Some('h'),
        long: Some("help"),
        description: HELP_DESCRIPTION,
        heading,
        ..Default::default()
    });
}

/// Render the help text of `id`. Styled headings are bold and underlined
/// when stdout is a terminal.
pub(crate) fn render(parser: &Parser, id: ScopeId, styled: bool) -> String {
    let scope = parser.scope(id);

    let mut flags = Vec::new();
    for spec in scope.options.iter().filter(|spec| !spec.hidden) {
        flag_entries(spec, &mut flags);
    }
    builtin_entries(parser, &mut flags);

    let positionals = scope
        .positionals
        .iter()
        .map(|spec| HelpPositionalInfo {
            name: &spec.name,
            description: &spec.help,
            optionality: positional_optionality(spec),
            default: (!spec.default.is_empty()).then(|| spec.default.join(" ")),
        })
        .collect();

    let subcommands = scope
        .children
        .iter()
        .map(|child| {
            let child = parser.scope(*child);
            (child.name.as_str(), child.description.as_str())
        })
        .collect();

    let info = HelpInfo {
        description: &scope.description,
        flags,
        positionals,
        subcommands,
        footer: &scope.footer,
    };
    let command_name = [scope.path.as_str()];
    if styled {
        info.styled_help(&command_name, &parser.layout, |heading| {
            style(heading).bold().underlined().to_string()
        })
    } else {
        info.help(&command_name, &parser.layout)
    }
}

/// Structured info about `id` and every command below it.
pub(crate) fn args_info(parser: &Parser, id: ScopeId) -> CommandInfoWithArgs<'_> {
    let scope = parser.scope(id);

    let mut flags = Vec::new();
    for spec in &scope.options {
        let kind = match (spec.kind, spec.multiplicity) {
            (OptionKind::Flag, Multiplicity::Counting) => FlagInfoKind::Count,
            (OptionKind::Flag, _) => FlagInfoKind::Switch,
            (OptionKind::Valued(_), _) => {
                FlagInfoKind::Option { arg_name: spec.arg_name().unwrap_or_default() }
            }
        };
        flags.push(FlagInfo {
            kind,
            optionality: to_optionality(option_optionality(spec)),
            long: spec.names.long.as_deref(),
            short: spec.names.short,
            description: &spec.help,
            hidden: spec.hidden,
        });
        if let Some(negation) = &spec.negation {
            flags.push(FlagInfo {
                kind: FlagInfoKind::Switch,
                optionality: Optionality::Optional,
                long: negation.long.as_deref(),
                short: negation.short,
                description: &spec.negation_help,
                hidden: spec.hidden,
            });
        }
    }

    let mut builtins = Vec::new();
    builtin_entries(parser, &mut builtins);
    flags.extend(builtins.into_iter().map(|builtin| FlagInfo {
        kind: FlagInfoKind::Switch,
        optionality: Optionality::Optional,
        long: builtin.long,
        short: builtin.short,
        description: builtin.description,
        hidden: false,
    }));

    CommandInfoWithArgs {
        name: &scope.name,
        description: &scope.description,
        flags,
        positionals: scope
            .positionals
            .iter()
            .map(|spec| PositionalInfo {
                name: &spec.name,
                description: &spec.help,
                optionality: to_optionality(positional_optionality(spec)),
            })
            .collect(),
        commands: scope
            .children
            .iter()
            .map(|child| SubCommandInfo {
                name: &parser.scope(*child).name,
                command: args_info(parser, *child),
            })
            .collect(),
    }
}

#[cfg(test)]
mod test {
    use super::render;
    use crate::{Command, OptionSpec, PositionalSpec};

    #[test]
    fn toggle_marks_default_side() {
        let parser = Command::new("git")
            .option(
                OptionSpec::toggle(('s', "signoff"), "no-signoff")
                    .help("add Signed-off-by")
                    .negation_help("do not add Signed-off-by"),
            )
            .build()
            .unwrap();

        assert_eq!(
            parser.usage(),
            "Usage: git [OPTIONS]

Options:
  -s, --signoff          add Signed-off-by
      --no-signoff       do not add Signed-off-by (default)
  -h, --help             Show this help message and exit
"
        );
    }

    #[test]
    fn hidden_options_and_defaults() {
        let parser = Command::new("cc")
            .version("1.0")
            .option(OptionSpec::int('O').default(2).help("optimization level"))
            .option(OptionSpec::flag("internal").hidden())
            .positional(PositionalSpec::new("output-file").default("a.out"))
            .build()
            .unwrap();

        assert_eq!(
            parser.usage(),
            "Usage: cc [OPTIONS] [output-file]

Positional Arguments:
  output-file            [default: a.out]

Options:
  -O <integer>           optimization level [default: 2]
  -V, --version          Show version information and exit
  -h, --help             Show this help message and exit
"
        );
    }

    #[test]
    fn builtins_under_their_own_heading() {
        let parser = Command::new("cc")
            .version("1.0")
            .builtin_heading("Other Behaviors")
            .option(OptionSpec::flag('c').heading("Compile").help("compile only"))
            .option(OptionSpec::flag('E').heading("Preprocess").help("preprocess only"))
            .option(OptionSpec::flag('S').heading("Compile").help("emit assembly"))
            .build()
            .unwrap();

        assert_eq!(
            parser.usage(),
            "Usage: cc [OPTIONS]

Compile:
  -c                     compile only
  -S                     emit assembly

Preprocess:
  -E                     preprocess only

Other Behaviors:
  -V, --version          Show version information and exit
  -h, --help             Show this help message and exit
"
        );
    }

    #[test]
    fn styling_only_adds_escape_codes() {
        let parser = Command::new("git")
            .description("the stupid content tracker")
            .option(OptionSpec::flag(('v', "verbose")).heading("Output"))
            .subcommand(Command::new("commit"))
            .build()
            .unwrap();

        console::set_colors_enabled(true);
        let styled = render(&parser, parser.root(), true);
        assert!(styled.contains('\u{1b}'));
        assert_eq!(console::strip_ansi_codes(&styled), parser.usage());
        assert!(!parser.usage().contains('\u{1b}'));
    }
}
