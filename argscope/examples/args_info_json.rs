// Copyright (c) 2022 Google LLC All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Prints the structured description of a command tree as JSON.

use argscope::{Command, OptionSpec, PositionalSpec};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let parser = Command::new("tool")
        .description("A tool with a documented interface.")
        .option(OptionSpec::count(('v', "verbose")).help("more output"))
        .subcommand(
            Command::new("run")
                .description("Run a script")
                .option(OptionSpec::string("env").repeated().delimiter(',').help("variables"))
                .positional(PositionalSpec::new("script").help("what to run")),
        )
        .build()?;

    println!("{}", serde_json::to_string_pretty(&parser.args_info())?);
    Ok(())
}
