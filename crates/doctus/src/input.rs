//! Document input and HTML output plumbing.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use crate::error::CliError;
use crate::output::Output;

/// File extensions recognized as Doctus documents.
const DOCUMENT_EXTENSIONS: [&str; 2] = ["md", "txt"];

/// Where a document is read from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Source {
    Stdin,
    File(PathBuf),
}

impl Source {
    /// Interpret an optional CLI path. `-` and no path both mean stdin.
    pub(crate) fn from_arg(path: Option<&Path>) -> Self {
        match path {
            Some(path) if path != Path::new("-") => Self::File(path.to_path_buf()),
            _ => Self::Stdin,
        }
    }

    /// The file path, if reading from a file.
    pub(crate) fn path(&self) -> Option<&Path> {
        match self {
            Self::Stdin => None,
            Self::File(path) => Some(path),
        }
    }

    /// Read the whole document.
    ///
    /// Files with an unexpected extension are read anyway, with a warning.
    pub(crate) fn read(&self, output: &Output) -> Result<String, CliError> {
        match self {
            Self::Stdin => {
                let mut text = String::new();
                std::io::stdin().read_to_string(&mut text)?;
                Ok(text)
            }
            Self::File(path) => {
                if !is_document_path(path) {
                    output.warning(&format!(
                        "Warning: {} is not a .md or .txt file, rendering anyway",
                        path.display()
                    ));
                }
                std::fs::read_to_string(path).map_err(CliError::file("read", path))
            }
        }
    }
}

/// Check whether `path` has a `.md` or `.txt` extension (case-insensitive).
pub(crate) fn is_document_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            DOCUMENT_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Default HTML output path for a document: same location, `.html` extension.
pub(crate) fn html_path_for(input: &Path) -> PathBuf {
    input.with_extension("html")
}

/// Write `text` to `path`, or to stdout when no path is given.
pub(crate) fn write_output(path: Option<&Path>, text: &str) -> Result<(), CliError> {
    match path {
        Some(path) => std::fs::write(path, text).map_err(CliError::file("write", path)),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            if !text.ends_with('\n') {
                stdout.write_all(b"\n")?;
            }
            stdout.flush()?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_source_from_arg() {
        assert_eq!(Source::from_arg(None), Source::Stdin);
        assert_eq!(Source::from_arg(Some(Path::new("-"))), Source::Stdin);
        assert_eq!(
            Source::from_arg(Some(Path::new("notes.md"))),
            Source::File(PathBuf::from("notes.md"))
        );
    }

    #[test]
    fn test_source_path() {
        assert_eq!(Source::Stdin.path(), None);
        assert_eq!(
            Source::File(PathBuf::from("a.md")).path(),
            Some(Path::new("a.md"))
        );
    }

    #[test]
    fn test_is_document_path() {
        assert!(is_document_path(Path::new("notes.md")));
        assert!(is_document_path(Path::new("notes.TXT")));
        assert!(!is_document_path(Path::new("notes.html")));
        assert!(!is_document_path(Path::new("README")));
    }

    #[test]
    fn test_html_path_for() {
        assert_eq!(
            html_path_for(Path::new("docs/notes.md")),
            PathBuf::from("docs/notes.html")
        );
        assert_eq!(html_path_for(Path::new("README")), PathBuf::from("README.html"));
    }

    #[test]
    fn test_read_file_with_other_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.markdown");
        std::fs::write(&path, "!!hi!!").unwrap();

        let text = Source::File(path).read(&Output::new()).unwrap();
        assert_eq!(text, "!!hi!!");
    }

    #[test]
    fn test_read_missing_file() {
        let err = Source::File(PathBuf::from("/nonexistent/notes.md"))
            .read(&Output::new())
            .unwrap_err();
        assert!(err.to_string().starts_with("Couldn't read /nonexistent/notes.md: "));
        assert!(matches!(
            err,
            CliError::File { action: "read", ref source, .. }
                if source.kind() == std::io::ErrorKind::NotFound
        ));
    }

    #[test]
    fn test_write_into_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing/out.html");
        let err = write_output(Some(&path), "<p>x</p>").unwrap_err();
        assert!(matches!(err, CliError::File { action: "write", .. }));
    }

    #[test]
    fn test_write_output_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.html");
        write_output(Some(&path), "<p>x</p>\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<p>x</p>\n");
    }
}
