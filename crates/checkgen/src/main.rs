use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use checkgen::config::DEFAULT_SOURCE_DELIM_REGEX;
use checkgen::{generate_checks, generate_checks_with_source, CheckGenConfig};
use clap::{Parser, ValueHint};
use tracing::{info, Level};

/// Generate FileCheck assertions from an SSA IR listing
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// IR listing to generate checks for; reads stdin when omitted or `-`
    #[arg(value_hint = ValueHint::FilePath)]
    input: Option<PathBuf>,

    /// File to write the result to instead of stdout
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    output: Option<PathBuf>,

    /// Prefix of the emitted check lines
    #[arg(long, default_value = checkgen::config::DEFAULT_CHECK_PREFIX)]
    check_prefix: String,

    /// Nesting depth at which top-level constructs begin
    #[arg(long, default_value_t = 0)]
    starts_from_scope: usize,

    /// Test file the listing was produced from; checks are interleaved with it
    #[arg(long, value_hint = ValueHint::FilePath)]
    source: Option<PathBuf>,

    /// Regex splitting the source file into segments
    #[arg(long, default_value = DEFAULT_SOURCE_DELIM_REGEX)]
    source_delim_regex: String,

    /// Rewrite the source file in place with the interleaved result
    #[arg(short, long, requires = "source")]
    inplace: bool,

    /// Prepend a note stating the checks were autogenerated
    #[arg(long)]
    banner: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    if args.verbose {
        tracing_subscriber::fmt()
            .with_max_level(Level::DEBUG)
            .with_writer(io::stderr)
            .init();
    }

    let mut config = CheckGenConfig::default()
        .with_check_prefix(args.check_prefix.clone())
        .with_starts_from_scope(args.starts_from_scope)
        .with_source_delim_regex(args.source_delim_regex.clone());
    if args.banner {
        config = config.with_banner(env!("CARGO_PKG_NAME"));
    }

    let input = read_input(args.input.as_ref())?;

    let output = match &args.source {
        Some(source_path) => {
            let source = fs::read_to_string(source_path).with_context(|| {
                format!("Error reading source file '{}'", source_path.display())
            })?;
            generate_checks_with_source(&input, &source, &config)
                .context("Failed to generate checks")?
        }
        None => generate_checks(&input, &config).context("Failed to generate checks")?,
    };

    let destination = if args.inplace {
        if args.output.is_some() {
            bail!("--inplace and --output cannot be used together");
        }
        args.source.as_ref()
    } else {
        args.output.as_ref()
    };

    match destination {
        Some(path) => {
            fs::write(path, &output)
                .with_context(|| format!("Error writing '{}'", path.display()))?;
            info!(path = %path.display(), "wrote checks");
        }
        None => print!("{output}"),
    }

    Ok(())
}

fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) if path.as_os_str() != "-" => fs::read_to_string(path)
            .with_context(|| format!("Error reading input file '{}'", path.display())),
        _ => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("Error reading stdin")?;
            Ok(input)
        }
    }
}
