use clap::{Arg, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let language = Arg::new("language").long("language").short('l');

    let mut cmd = Command::new("astview")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Explore syntax trees of small programs")
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .global(true)
                .value_hint(ValueHint::FilePath),
        )
        .subcommand(
            Command::new("view")
                .about("Open the interactive viewer")
                .arg(Arg::new("path").index(1).value_hint(ValueHint::FilePath))
                .arg(language.clone()),
        )
        .subcommand(
            Command::new("analyze")
                .about("Analyze a file and print its tree")
                .arg(
                    Arg::new("path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(language)
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .default_value("outline"),
                ),
        )
        .subcommand(
            Command::new("sample")
                .about("Print the built-in sample program of a language")
                .arg(Arg::new("language").required(true).index(1)),
        )
        .subcommand(Command::new("list-formats").about("List available output formats"));

    generate_to(Bash, &mut cmd, "astview", &outdir)?;
    generate_to(Zsh, &mut cmd, "astview", &outdir)?;
    generate_to(Fish, &mut cmd, "astview", &outdir)?;

    println!("cargo:rerun-if-changed=build.rs");

    Ok(())
}
