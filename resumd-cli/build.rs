use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the formats registered in resumd-babel's FormatRegistry.
// Build scripts can't access the library, so the list is duplicated here.
const TARGET_FORMATS: &[&str] = &["markdown", "json", "html", "pdf", "png"];

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let input = || {
        Arg::new("input")
            .help("Input file path")
            .required(true)
            .index(1)
            .value_hint(ValueHint::FilePath)
    };

    let mut cmd = Command::new("resumd")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert, inspect and export Markdown resumes")
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .arg(input())
                .arg(Arg::new("from").long("from").value_hint(ValueHint::Other))
                .arg(
                    Arg::new("to")
                        .long("to")
                        .required(true)
                        .value_parser(clap::builder::PossibleValuesParser::new(TARGET_FORMATS)),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("hide-section")
                        .long("hide-section")
                        .action(ArgAction::Append),
                ),
        )
        .subcommand(Command::new("outline").arg(input()))
        .subcommand(Command::new("layout").arg(input()))
        .subcommand(
            Command::new("merge")
                .arg(
                    Arg::new("base")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("additional")
                        .required(true)
                        .index(2)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(Command::new("generate-css"));

    // Generate completions for bash
    generate_to(Bash, &mut cmd, "resumd", &outdir)?;

    // Generate completions for zsh
    generate_to(Zsh, &mut cmd, "resumd", &outdir)?;

    // Generate completions for fish
    generate_to(Fish, &mut cmd, "resumd", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
