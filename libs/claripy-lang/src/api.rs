//! Public entry points (C_API): file-extension dispatch plus the four
//! operations a caller actually wants — translate one way, translate
//! the other way, evaluate, and build a display tree.
//!
//! File dispatch is a strict extension check (`.txt` → ClariPy,
//! `.py` → PyLite) rather than the substring match the distilled
//! design inherited from its source — `report.py.bak` should not be
//! mistaken for PyLite source.

use std::fs;
use std::path::Path;

use tracing::instrument;

use crate::ast::Module;
use crate::display_tree::{self, DisplayNode};
use crate::engine::{self, RunOutcome};
use crate::error::{Error, Result};
use crate::{pretty_claripy, pretty_pylite, pylite_parser, stmt_parser};

/// The surface syntax a source file is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    ClariPy,
    PyLite,
}

/// Classifies a path by its extension: `.txt` is ClariPy, `.py` is
/// PyLite, anything else is a syntax error (there is no sniffing the
/// content to guess).
pub fn dialect_of(path: &Path) -> Result<Dialect> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("txt") => Ok(Dialect::ClariPy),
        Some("py") => Ok(Dialect::PyLite),
        _ => Err(Error::syntax(format!(
            "unrecognized source extension for {}: expected '.txt' or '.py'",
            path.display()
        ))),
    }
}

fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::Io(format!("{}: {e}", path.display())))
}

/// Parses a source file (using the dialect implied by its extension)
/// into the shared AST.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn parse_file(path: &Path) -> Result<Module> {
    let source = read_source(path)?;
    match dialect_of(path)? {
        Dialect::ClariPy => stmt_parser::parse_source(&source),
        Dialect::PyLite => pylite_parser::parse_source(&source),
    }
}

/// Translates a source file into PyLite text, regardless of which
/// dialect it was originally written in.
pub fn translate_to_pylite(path: &Path) -> Result<String> {
    let module = parse_file(path)?;
    Ok(pretty_pylite::print_module(&module))
}

/// Translates a source file into ClariPy text, regardless of which
/// dialect it was originally written in.
pub fn translate_to_clarypy(path: &Path) -> Result<String> {
    let module = parse_file(path)?;
    Ok(pretty_claripy::print_module(&module))
}

/// Parses and runs a source file, returning its `Print` output and
/// final environment.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn run_file(path: &Path) -> Result<RunOutcome> {
    let module = parse_file(path)?;
    engine::run(&module)
}

/// Parses a source file and builds its display tree.
pub fn display_tree_of(path: &Path) -> Result<DisplayNode> {
    let module = parse_file(path)?;
    Ok(display_tree::build_tree(&module))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn dialect_of_recognizes_txt_and_py() {
        assert_eq!(dialect_of(&PathBuf::from("a.txt")).unwrap(), Dialect::ClariPy);
        assert_eq!(dialect_of(&PathBuf::from("a.py")).unwrap(), Dialect::PyLite);
    }

    #[test]
    fn dialect_of_rejects_lookalike_extensions() {
        assert!(dialect_of(&PathBuf::from("report.py.bak")).is_err());
        assert!(dialect_of(&PathBuf::from("a.pyx")).is_err());
    }
}
