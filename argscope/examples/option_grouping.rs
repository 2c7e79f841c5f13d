// Copyright (c) 2022 Google LLC All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use argscope::{BuildError, Command, OptionSpec, PositionalSpec};

fn main() -> Result<(), BuildError> {
    env_logger::init();

    let parser = Command::new("cc")
        .description("Compile a few sources.")
        .description_indent(28)
        .option(OptionSpec::count(('v', "verbose")).help("more output, repeatable"))
        .option(OptionSpec::int(('O', "optimize")).default(0).help("optimization level"))
        .option(OptionSpec::string(('o', "output")).default("a.out").help("output file"))
        .option(
            OptionSpec::string('I')
                .repeated()
                .delimiter_from('d')
                .value_name("dir")
                .heading("Search Options")
                .help("include directories"),
        )
        .option(
            OptionSpec::character('d')
                .default(':')
                .heading("Search Options")
                .help("separator for -I"),
        )
        .positional(PositionalSpec::variadic("sources").help("files to compile"))
        .builtin_heading("Other Behaviors")
        .footer("Try: cc -vvO2 -I src:include -o app main.c")
        .build()?;

    let result = parser.from_env();
    println!("verbosity: {}", result.count("verbose"));
    println!("optimize: {}", result.get::<i64>("optimize").unwrap_or_default());
    println!("output: {}", result.get_str("output").unwrap_or_default());
    println!("include: {:?}", result.get_all::<String>('I'));
    println!("sources: {:?}", result.positionals("sources"));
    if !result.rest().is_empty() {
        println!("ignored: {:?}", result.rest());
    }
    Ok(())
}
