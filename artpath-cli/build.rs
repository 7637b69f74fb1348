//! Build script for artpath-cli.
//!
//! This script generates man pages at build time using clap_mangen.
//! The generated man page is placed in OUT_DIR for inclusion in release builds.
//!
//! Note: We build a minimal command structure here rather than importing from
//! the main crate, since build scripts cannot depend on the crate being built.

use clap::{Arg, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// IMPORTANT: Keep this structure synchronized with src/cli.rs
/// When adding/removing/modifying commands, update both files.
fn build_cli() -> Command {
    Command::new("artpath")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Inspect Artifactory path resolution and parameter encoding")
        .long_about(
            "Command-line tool for splitting Artifactory URLs into repository roots and \
             components, and for encoding deploy parameters and item properties",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Load repository roots from this file instead of ~/.artpath/config.yaml")
                .value_name("PATH")
                .global(true)
                .env("ARTPATH_CONFIG"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .help("Output format")
                .value_parser(["text", "json"])
                .default_value("text")
                .global(true),
        )
        .subcommands(vec![
            Command::new("split")
                .about("Split a path into root, directory marker and tail")
                .long_about("Show how a path resolves and which strategy decided its root"),
            Command::new("parts")
                .about("Show the components and derived names of a path")
                .long_about("Parse path segments and print their components, optionally relative to an ancestor"),
            Command::new("lookup")
                .about("Show the registered root matching a URL")
                .long_about("Display the registered root and settings that apply to a URL"),
            Command::new("encode-matrix")
                .about("Encode KEY=VALUE pairs as matrix parameters")
                .long_about("Encode parameters in the `;key=value` form used by deploy URLs"),
            Command::new("encode-props")
                .about("Encode KEY=VALUE pairs as an item property string")
                .long_about("Encode properties in the escaped `key=v1,v2|other=x` form"),
            Command::new("decode-props")
                .about("Decode an item property string")
                .long_about("Decode an escaped property string into KEY=VALUE lines"),
            Command::new("validate")
                .about("Validate a root configuration file")
                .long_about("Check an artpath configuration file for errors"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() {
    // Generate man pages at build time
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).unwrap();

    // Generate main artpath.1 man page
    let app = build_cli();
    let man = Man::new(app);
    let mut buffer = Vec::new();
    man.render(&mut buffer).unwrap();

    fs::write(man_dir.join("artpath.1"), buffer).unwrap();

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
}
