//! Document output files
//!
//! Documents are rendered into a temporary file next to their destination
//! and moved into place only once the renderer has finished, so a failed
//! render never leaves a partial document behind.

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use reportgen_core::OutputTarget;
use tempfile::NamedTempFile;

use crate::error::{Error, Result};

const FALLBACK_STEM: &str = "report";

/// File name for a report: whitespace runs and path separators become `_`,
/// followed by the target's extension
pub fn output_file_name(report_name: &str, target: OutputTarget) -> String {
    let mut stem = String::with_capacity(report_name.len());
    let mut in_gap = false;
    for c in report_name.trim().chars() {
        if c.is_whitespace() || c == '/' || c == '\\' {
            if !in_gap {
                stem.push('_');
                in_gap = true;
            }
        } else {
            stem.push(c);
            in_gap = false;
        }
    }
    if stem.is_empty() {
        stem.push_str(FALLBACK_STEM);
    }
    format!("{}.{}", stem, target.extension())
}

/// Destination directory for rendered documents
#[derive(Debug, Clone)]
pub struct DocumentSink {
    dir: PathBuf,
}

impl DocumentSink {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    /// Create `file_name` in the output directory from whatever `write`
    /// puts into a fresh file. On error the temporary file is removed and
    /// any existing document is left untouched.
    pub fn write_with<F>(&self, file_name: &str, write: F) -> Result<PathBuf>
    where
        F: FnOnce(&mut File) -> Result<()>,
    {
        let path = self.dir.join(file_name);
        let mut temp = NamedTempFile::new_in(&self.dir)?;

        write(temp.as_file_mut())?;
        temp.as_file_mut().flush()?;
        temp.as_file().sync_all()?;

        temp.persist(&path).map_err(|e| Error::Io(e.error))?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_output_file_name() {
        assert_eq!(
            output_file_name("Employee Survey", OutputTarget::Xlsx),
            "Employee_Survey.xlsx"
        );
        assert_eq!(
            output_file_name("  Q1 \t Sales ", OutputTarget::Pdf),
            "Q1_Sales.pdf"
        );
        assert_eq!(output_file_name("a/b", OutputTarget::Html), "a_b.html");
        assert_eq!(output_file_name("   ", OutputTarget::Xlsx), "report.xlsx");
    }

    #[test]
    fn test_write_with_persists() {
        let dir = tempfile::tempdir().unwrap();
        let sink = DocumentSink::new(dir.path());

        let path = sink
            .write_with("out.html", |file| {
                file.write_all(b"<html></html>")?;
                Ok(())
            })
            .unwrap();

        assert_eq!(path, dir.path().join("out.html"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<html></html>");
    }

    #[test]
    fn test_failed_write_leaves_nothing_behind() {
        let dir = tempfile::tempdir().unwrap();
        let sink = DocumentSink::new(dir.path());

        let result = sink.write_with("out.html", |file| {
            file.write_all(b"partial")?;
            Err(Error::MissingSource("Sales".into()))
        });

        assert!(result.is_err());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
