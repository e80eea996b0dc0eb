//! Translates stack-machine VM code (`.vm`) into Hack assembly (`.asm`).
//!
//! The parser turns source text into [`ast::Command`]s, and a
//! [`translator::Translator`] expands each into assembly lines. One
//! translator should be used for a whole run so comparison labels stay
//! unique across every file it sees.

pub mod ast;
pub mod cli;
pub mod error;
pub mod parser;
pub mod translator;

pub use error::{Error, TranslateError};
pub use translator::Translator;

/// Parses and compiles one source unit with the given run's translator.
pub fn translate_source(
    translator: &mut Translator,
    source: &str,
    file: &str,
) -> Result<Vec<String>, Error> {
    let commands = parser::parse(source, file)?;
    translator
        .translate(&commands)
        .map_err(|source| Error::Compile {
            file: file.to_string(),
            source,
        })
}
