//! Source discovery, reading and output writing around a [`Translator`].

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::asm::Code;
use crate::error::Error;
use crate::translator::{Options, Translator};

const SOURCE_EXTENSION: &str = "vm";
const OUTPUT_EXTENSION: &str = "asm";

/// Everything needed to run one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub sources: Vec<PathBuf>,
    pub output: PathBuf,
    pub options: Options,
}

fn is_source(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(OsStr::to_str)
            .map_or(false, |ext| ext.eq_ignore_ascii_case(SOURCE_EXTENSION))
}

fn stem(path: &Path) -> &str {
    path.file_stem().and_then(OsStr::to_str).unwrap_or_default()
}

/// Works out sources, output path and default options for `input`.
///
/// A directory translates every `.vm` file in it, in name order, into
/// `<dir>/<dirname>.asm` with the bootstrap. A single file goes to the same
/// path with an `.asm` extension and no bootstrap. `bootstrap` overrides the
/// default either way.
pub fn plan(
    input: Option<&Path>,
    output: Option<PathBuf>,
    bootstrap: Option<bool>,
    echo_source: bool,
) -> Result<Job, Error> {
    let input = input.ok_or(Error::MissingInputPath)?;

    let (sources, default_output, directory) = if input.is_dir() {
        let dir = fs::canonicalize(input).map_err(Error::io(input))?;
        let name = dir
            .file_name()
            .and_then(OsStr::to_str)
            .ok_or_else(|| Error::InvalidInputPath(input.to_path_buf()))?
            .to_string();

        let mut sources = vec![];
        for entry in fs::read_dir(input).map_err(Error::io(input))? {
            let path = entry.map_err(Error::io(input))?.path();
            if is_source(&path) {
                sources.push(path);
            }
        }
        sources.sort();
        if sources.is_empty() {
            warn!("no .{} files in {}", SOURCE_EXTENSION, input.display());
        }

        let output = input.join(format!("{}.{}", name, OUTPUT_EXTENSION));
        (sources, output, true)
    } else if input.is_file() {
        let output = input.with_extension(OUTPUT_EXTENSION);
        (vec![input.to_path_buf()], output, false)
    } else {
        return Err(Error::InvalidInputPath(input.to_path_buf()));
    };

    Ok(Job {
        sources,
        output: output.unwrap_or(default_output),
        options: Options {
            include_bootstrap: bootstrap.unwrap_or(directory),
            echo_source,
        },
    })
}

/// Translates `sources` in order as one session.
pub fn translate_files(sources: &[PathBuf], options: Options) -> Result<Code, Error> {
    let mut translator = Translator::new(options);
    for path in sources {
        info!("translating {}", path.display());
        let source = fs::read_to_string(path).map_err(Error::io(path))?;
        translator.translate_source(stem(path), &source)?;
    }
    Ok(translator.finish())
}

/// Runs `job`, writing the output only once every source translated.
pub fn run(job: &Job) -> Result<(), Error> {
    let code = translate_files(&job.sources, job.options)?;
    fs::write(&job.output, code.render()).map_err(Error::io(&job.output))?;
    info!("wrote {} lines to {}", code.len(), job.output.display());
    Ok(())
}
