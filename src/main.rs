use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use log::LevelFilter;

use hackvm::driver;

/// Translate VM code (a .vm file or a directory of them) to Hack assembly.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Source file or directory
    input: Option<PathBuf>,

    /// Output file (default: <file>.asm, or <dir>/<dir>.asm)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Always emit the bootstrap block
    #[arg(long, conflicts_with = "no_bootstrap")]
    bootstrap: bool,

    /// Never emit the bootstrap block
    #[arg(long)]
    no_bootstrap: bool,

    /// Echo each VM command as a comment above its code
    #[arg(long)]
    echo: bool,

    /// More logging; repeat for more
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let bootstrap = match (args.bootstrap, args.no_bootstrap) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    };

    let job = driver::plan(args.input.as_deref(), args.output, bootstrap, args.echo)?;
    driver::run(&job)?;

    Ok(())
}
