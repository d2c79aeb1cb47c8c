use std::io::Read;
use std::path::Path;
use std::process::Command;

use anyhow::Context;
use tracing::debug;

use crate::error::AcervoError;

/// Read a source document and return its text content.
///
/// `.txt`, `.md`, and `.markdown` files are read directly. `.pdf` files are
/// converted with the `pdftotext` system binary. Other extensions are
/// rejected with [`AcervoError::UnsupportedFormat`].
pub fn read_document(path: &Path) -> anyhow::Result<String> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_lowercase();

    match ext.as_str() {
        "txt" | "md" | "markdown" => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        "pdf" => pdf_to_text(path),
        other => Err(AcervoError::UnsupportedFormat(other.to_string()).into()),
    }
}

/// Read document text from an arbitrary reader (used for stdin input).
pub fn read_from(reader: &mut dyn Read) -> anyhow::Result<String> {
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .context("Failed to read document from input")?;
    Ok(text)
}

fn pdf_to_text(path: &Path) -> anyhow::Result<String> {
    debug!(path = %path.display(), "Converting PDF with pdftotext");

    let output = Command::new("pdftotext")
        .arg(path)
        .arg("-")
        .output()
        .context("Failed to run pdftotext (is it installed?)")?;

    if !output.status.success() {
        anyhow::bail!(
            "pdftotext failed: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    let text = String::from_utf8_lossy(&output.stdout).into_owned();
    if text.trim().is_empty() {
        return Err(AcervoError::EmptyDocument.into());
    }
    Ok(text)
}
