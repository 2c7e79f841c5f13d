#![cfg(test)]
// Copyright (c) 2023 Google LLC All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use argscope::{
    Command, CommandInfoWithArgs, FlagInfo, FlagInfoKind, OptionSpec, Optionality,
    PositionalInfo, PositionalSpec, SubCommandInfo,
};

const HELP_FLAG: FlagInfo<'_> = FlagInfo {
    kind: FlagInfoKind::Switch,
    optionality: Optionality::Optional,
    long: Some("help"),
    short: Some('h'),
    description: "Show this help message and exit",
    hidden: false,
};

#[test]
fn args_info_test_subcommand() {
    let parser = Command::new("top")
        .description("Top-level command.")
        .subcommand(
            Command::new("one")
                .description("First subcommand.")
                .option(OptionSpec::int('x').required().value_name("num").help("how many x")),
        )
        .subcommand(
            Command::new("two")
                .description("Second subcommand.")
                .option(OptionSpec::flag("fooey").help("whether to fooey")),
        )
        .build()
        .unwrap();

    let command_one = CommandInfoWithArgs {
        name: "one",
        description: "First subcommand.",
        flags: vec![
            FlagInfo {
                kind: FlagInfoKind::Option { arg_name: "num" },
                optionality: Optionality::Required,
                long: None,
                short: Some('x'),
                description: "how many x",
                hidden: false,
            },
            HELP_FLAG,
        ],
        ..Default::default()
    };
    let command_two = CommandInfoWithArgs {
        name: "two",
        description: "Second subcommand.",
        flags: vec![
            FlagInfo {
                kind: FlagInfoKind::Switch,
                optionality: Optionality::Optional,
                long: Some("fooey"),
                short: None,
                description: "whether to fooey",
                hidden: false,
            },
            HELP_FLAG,
        ],
        ..Default::default()
    };

    assert_eq!(
        parser.args_info(),
        CommandInfoWithArgs {
            name: "top",
            description: "Top-level command.",
            flags: vec![HELP_FLAG],
            commands: vec![
                SubCommandInfo { name: "one", command: command_one },
                SubCommandInfo { name: "two", command: command_two },
            ],
            ..Default::default()
        }
    );
}

#[test]
fn args_info_test_multiplicity_and_positionals() {
    let parser = Command::new("cc")
        .version("1.0")
        .option(OptionSpec::count('v').help("verbosity"))
        .option(OptionSpec::string('I').repeated().help("include dirs"))
        .option(OptionSpec::toggle("color", "no-color").hidden())
        .positional(PositionalSpec::new("input").help("the input"))
        .positional(PositionalSpec::variadic("more"))
        .build()
        .unwrap();

    let info = parser.args_info();
    let kinds: Vec<_> =
        info.flags.iter().map(|flag| (flag.long, flag.short, flag.kind.clone())).collect();
    assert_eq!(
        kinds,
        vec![
            (None, Some('v'), FlagInfoKind::Count),
            (None, Some('I'), FlagInfoKind::Option { arg_name: "string" }),
            (Some("color"), None, FlagInfoKind::Switch),
            (Some("no-color"), None, FlagInfoKind::Switch),
            (Some("version"), Some('V'), FlagInfoKind::Switch),
            (Some("help"), Some('h'), FlagInfoKind::Switch),
        ]
    );
    assert_eq!(info.flags[1].optionality, Optionality::Repeating);
    assert!(info.flags[2].hidden && info.flags[3].hidden);
    assert_eq!(
        info.positionals,
        vec![
            PositionalInfo {
                name: "input",
                description: "the input",
                optionality: Optionality::Required,
            },
            PositionalInfo { name: "more", description: "", optionality: Optionality::Repeating },
        ]
    );
}

#[cfg(feature = "serde")]
#[test]
fn args_info_serializes_to_json() {
    let parser = Command::new("tool")
        .description("A tool.")
        .option(OptionSpec::int(('j', "jobs")).value_name("n").help("parallel jobs"))
        .positional(PositionalSpec::new("target").optional())
        .build()
        .unwrap();

    let json = serde_json::to_value(parser.args_info()).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "name": "tool",
            "description": "A tool.",
            "flags": [
                {
                    "kind": { "Option": { "arg_name": "n" } },
                    "optionality": "Optional",
                    "long": "jobs",
                    "short": "j",
                    "description": "parallel jobs",
                    "hidden": false
                },
                {
                    "kind": "Switch",
                    "optionality": "Optional",
                    "long": "help",
                    "short": "h",
                    "description": "Show this help message and exit",
                    "hidden": false
                }
            ],
            "positionals": [
                { "name": "target", "description": "", "optionality": "Optional" }
            ],
            "commands": []
        })
    );
}
