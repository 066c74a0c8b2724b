//! Output destinations for the rendered digest.

use std::fs::File;
use std::io::{self, BufWriter, Write};

use camino::Utf8Path;
use prdigest::DigestError;

/// Writes the document to `path`, or to stdout when no path is given.
///
/// # Errors
///
/// Returns [`DigestError::Io`] when the file cannot be created or written.
pub fn write_document(path: Option<&str>, document: &str) -> Result<(), DigestError> {
    if let Some(path) = path {
        write_file(Utf8Path::new(path), document)
    } else {
        let stdout = io::stdout();
        let mut writer = stdout.lock();
        write_to(&mut writer, document)
    }
}

fn write_file(path: &Utf8Path, document: &str) -> Result<(), DigestError> {
    let file = File::create(path).map_err(|e| DigestError::Io {
        message: format!("failed to create output file '{path}': {e}"),
    })?;
    let mut writer = BufWriter::new(file);
    write_to(&mut writer, document)
}

/// Writes the document to the given writer and flushes it.
pub fn write_to<W: Write>(writer: &mut W, document: &str) -> Result<(), DigestError> {
    writer
        .write_all(document.as_bytes())
        .and_then(|()| writer.flush())
        .map_err(|e| DigestError::Io {
            message: format!("failed to write digest: {e}"),
        })
}
