use std::fs;
use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;
use serde_json::Value;
use serde_json::ser::{PrettyFormatter, Serializer};
use tempfile::NamedTempFile;

use crate::error::{AccessError, Result};

/// How documents are written back to disk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PersistOptions {
    /// Spaces per nesting level in the pretty output. Files written by
    /// JsonCpp's styled writer use 3.
    pub indent: usize,
    /// Write to a temp file in the same directory, then rename over the target.
    pub atomic_writes: bool,
    /// When false, write failures are logged and mutators still succeed.
    pub report_write_failures: bool,
}

impl Default for PersistOptions {
    fn default() -> Self {
        Self {
            indent: 2,
            atomic_writes: false,
            report_write_failures: true,
        }
    }
}

/// Reads and parses a whole file. Does not create missing files.
pub fn read_document(path: &Path) -> Result<Value> {
    let data = fs::read(path).map_err(|source| AccessError::OpenFailure {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&data).map_err(|e| AccessError::ParseFailure {
        path: path.to_path_buf(),
        line: e.line(),
        column: e.column(),
        message: e.to_string(),
    })
}

/// Pretty output of the whole tree followed by a trailing newline.
pub fn render_document(value: &Value, indent: usize) -> io::Result<Vec<u8>> {
    let indent = " ".repeat(indent);
    let mut out = Vec::new();
    let formatter = PrettyFormatter::with_indent(indent.as_bytes());
    let mut ser = Serializer::with_formatter(&mut out, formatter);
    value.serialize(&mut ser).map_err(io::Error::from)?;
    out.push(b'\n');
    Ok(out)
}

/// Overwrites `path` with the rendered tree.
pub fn write_document(path: &Path, value: &Value, opts: &PersistOptions) -> Result<()> {
    let write = || -> io::Result<()> {
        let bytes = render_document(value, opts.indent)?;
        if opts.atomic_writes {
            write_atomic(path, &bytes)
        } else {
            fs::write(path, bytes)
        }
    };
    write().map_err(|source| AccessError::WriteFailure {
        path: path.to_path_buf(),
        source,
    })
}

fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    // temp files are created 0600; keep the target's mode across the rename
    if let Ok(meta) = fs::metadata(path) {
        tmp.as_file().set_permissions(meta.permissions())?;
    }
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
