//! Build script for optlayer-cli.
//!
//! This script generates a man page at build time using clap_mangen.
//! The generated man page is placed in OUT_DIR for inclusion in release builds.
//!
//! Note: We build a minimal command structure here rather than importing from
//! the main crate, since build scripts cannot depend on the crate being built.

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

fn flag(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .help(help)
        .global(true)
        .action(ArgAction::SetTrue)
}

fn value(name: &'static str, value_name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .help(help)
        .value_name(value_name)
        .global(true)
}

/// Build the CLI command structure for man page generation.
///
/// Keep this synchronized with src/cli.rs.
fn build_cli() -> Command {
    Command::new("optlayer")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Resolve options from arguments, a config file and the environment")
        .long_about(
            "Resolve a set of typed options from command-line arguments, \
             ~/.config/<id>/<id>.toml and <ID>_* environment variables, where \
             the environment overrides the file and the file overrides arguments",
        )
        .arg(flag("verbose", "Enable verbose output"))
        .arg(flag("quiet", "Suppress non-essential output"))
        .arg(
            value(
                "identifier",
                "ID",
                "Application identifier used for the config path and the variable prefix",
            )
            .env("OPTLAYER_IDENTIFIER")
            .default_value("optlayer-demo"),
        )
        .arg(value(
            "config",
            "PATH",
            "Read this configuration file instead of the default one",
        ))
        .arg(flag(
            "lenient",
            "Tolerate a missing or unreadable configuration file",
        ))
        .arg(flag("no-file", "Do not read the configuration file"))
        .arg(flag("no-env", "Do not read environment variables"))
        .arg(value("timeout", "SECONDS", "Timeout in seconds"))
        .arg(value("name", "NAME", "Display name"))
        .arg(value("ratio", "RATIO", "Ratio between 0 and 1"))
        .arg(
            value("debug", "BOOL", "Enable debug mode")
                .num_args(0..=1)
                .default_missing_value("true"),
        )
        .subcommands(vec![
            Command::new("show")
                .about("Resolve the options and print them")
                .long_about("Resolve the options from every enabled source and print them")
                .arg(
                    Arg::new("format")
                        .long("format")
                        .value_name("FORMAT")
                        .help("Output format (toml, yaml, json, env)")
                        .default_value("toml"),
                ),
            Command::new("show-path")
                .about("Show the default configuration file path")
                .long_about("Display the configuration file path derived from the identifier")
                .arg(
                    Arg::new("effective")
                        .long("effective")
                        .help("Print the path given with --config instead, when present")
                        .action(ArgAction::SetTrue),
                ),
            Command::new("show-env")
                .about("Show the environment prefix and the recognized variables")
                .long_about("Display the environment variables the resolver would apply"),
            Command::new("fields")
                .about("List the declared fields and their types")
                .long_about("Display every declared field with its type"),
        ])
}

fn main() {
    // Generate man pages at build time
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).unwrap();

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();
    man.render(&mut buffer).unwrap();

    fs::write(man_dir.join("optlayer.1"), buffer).unwrap();

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
}
