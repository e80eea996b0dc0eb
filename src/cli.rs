//! Command-line options and the file driver.

use std::{
    ffi::OsStr,
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use clap::{ArgAction, Parser};
use log::{debug, info, LevelFilter};

use crate::{error::Error, translate_source, translator::Translator};

#[derive(Parser, Debug)]
#[command(
    name = "vm-translator",
    version,
    about = "Translates VM stack code into Hack assembly"
)]
pub struct Cli {
    /// Source files. All are translated in one run and share comparison labels.
    #[arg(value_name = "FILE.vm", required = true)]
    pub inputs: Vec<PathBuf>,
    /// Directory for the generated .asm files. Defaults to each input's directory.
    #[arg(short = 'o', long = "out-dir", value_name = "DIR")]
    pub out_dir: Option<PathBuf>,
    /// More log output; repeat for more detail. RUST_LOG takes precedence.
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

/// Base name used for static symbols, e.g. `Foo` for `dir/Foo.vm`.
pub fn unit_name(path: &Path) -> Result<&str, Error> {
    path.file_stem()
        .and_then(OsStr::to_str)
        .filter(|stem| !stem.is_empty())
        .ok_or_else(|| Error::BadPath {
            path: path.to_path_buf(),
        })
}

pub fn output_path(input: &Path, out_dir: Option<&Path>) -> PathBuf {
    let asm = input.with_extension("asm");
    match (out_dir, asm.file_name()) {
        (Some(dir), Some(name)) => dir.join(name),
        _ => asm,
    }
}

fn write_lines(path: &Path, lines: &[String]) -> Result<(), Error> {
    let io_err = |source| Error::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut out = BufWriter::new(File::create(path).map_err(io_err)?);
    for line in lines {
        writeln!(out, "{}", line).map_err(io_err)?;
    }
    out.flush().map_err(io_err)
}

/// Translates one file within the run and writes its `.asm` next to it (or
/// into `out_dir`). Nothing is written when translation fails.
pub fn translate_file(
    translator: &mut Translator,
    input: &Path,
    out_dir: Option<&Path>,
) -> Result<PathBuf, Error> {
    let unit = unit_name(input)?;
    let source = fs::read_to_string(input).map_err(|source| Error::Io {
        path: input.to_path_buf(),
        source,
    })?;

    let lines = translate_source(translator, &source, unit)?;

    let output = output_path(input, out_dir);
    write_lines(&output, &lines)?;
    info!(
        "{} -> {} ({} lines)",
        input.display(),
        output.display(),
        lines.len()
    );
    Ok(output)
}

/// Runs the whole invocation. Files are handled in order and the first
/// error stops the run; outputs already written are left in place.
pub fn run(cli: &Cli) -> Result<Vec<PathBuf>, Error> {
    let mut translator = Translator::new();
    let out_dir = cli.out_dir.as_deref();
    let outputs = cli
        .inputs
        .iter()
        .map(|input| translate_file(&mut translator, input, out_dir))
        .collect::<Result<Vec<_>, _>>()?;
    debug!(
        "translated {} files, {} comparison labels",
        outputs.len(),
        translator.labels().issued()
    );
    Ok(outputs)
}
