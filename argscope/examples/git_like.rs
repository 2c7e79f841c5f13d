// Copyright (c) 2022 Google LLC All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use argscope::{BuildError, Command, OptionSpec, Parser, PositionalSpec};

fn parser() -> Result<Parser, BuildError> {
    Command::new("git")
        .description("the stupid content tracker")
        .version(env!("CARGO_PKG_VERSION"))
        .option(OptionSpec::flag(('v', "verbose")).help("be verbose"))
        .subcommand(
            Command::new("commit")
                .description("Record changes to the repository")
                .option(OptionSpec::string(('m', "message")).required().help("commit message"))
                .option(OptionSpec::flag(('a', "all")).help("commit all changed files"))
                .option(
                    OptionSpec::toggle(('s', "signoff"), "no-signoff")
                        .help("add a Signed-off-by trailer")
                        .negation_help("do not add a Signed-off-by trailer"),
                )
                .positional(PositionalSpec::variadic("pathspec").help("files to commit")),
        )
        .subcommand(
            Command::new("remote")
                .description("Manage remotes")
                .subcommand(
                    Command::new("add")
                        .description("Add a remote")
                        .positional(PositionalSpec::new("name").help("name of the remote"))
                        .positional(PositionalSpec::new("url").help("where it lives")),
                ),
        )
        .build()
}

fn main() -> Result<(), BuildError> {
    env_logger::init();

    let parser = parser()?;
    let result = parser.from_env();

    match result.command_path().as_slice() {
        ["commit"] => {
            println!("message: {}", result.get_str("message").unwrap_or_default());
            println!("all: {}, signoff: {}", result.flag("all"), result.flag("signoff"));
            println!("paths: {:?}", result.positionals("pathspec"));
        }
        ["remote", "add"] => println!(
            "adding remote {} at {}",
            result.positional("name").unwrap_or_default(),
            result.positional("url").unwrap_or_default()
        ),
        path => {
            print!("{}", parser.usage_for(parser.find_scope(path).unwrap_or(parser.root())))
        }
    }

    if result.scope("git").is_some_and(|git| git.flag("verbose")) {
        println!("(verbose)");
    }
    Ok(())
}
