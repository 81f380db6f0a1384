//! Writing rendered reports.

use anyhow::{Context, Result};
use std::io::IsTerminal;
use std::path::PathBuf;

/// Target for output - either stdout or a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Write to stdout
    Stdout,
    /// Write to a file
    File(PathBuf),
}

impl OutputTarget {
    /// Create output target from optional path
    #[must_use]
    pub fn from_option(path: Option<PathBuf>) -> Self {
        path.map_or(Self::Stdout, Self::File)
    }

    /// Check if output is to a terminal
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Stdout) && std::io::stdout().is_terminal()
    }
}

/// Write output to the target (stdout or file)
pub fn write_output(content: &str, target: &OutputTarget, quiet: bool) -> Result<()> {
    match target {
        OutputTarget::Stdout => {
            print!("{content}");
            Ok(())
        }
        OutputTarget::File(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write output to {}", path.display()))?;
            if !quiet {
                tracing::info!("Report written to {}", path.display());
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_output_target_from_option() {
        assert_eq!(OutputTarget::from_option(None), OutputTarget::Stdout);
        let path = PathBuf::from("/tmp/view.csv");
        assert_eq!(
            OutputTarget::from_option(Some(path.clone())),
            OutputTarget::File(path)
        );
    }

    #[test]
    fn test_file_target_is_not_terminal() {
        assert!(!OutputTarget::File(PathBuf::from("out.json")).is_terminal());
    }

    #[test]
    fn test_write_output_to_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("report.txt");
        write_output("hello\n", &OutputTarget::File(path.clone()), true).unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "hello\n");
    }

    #[test]
    fn test_write_output_missing_dir_fails() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("missing").join("report.txt");
        let err = write_output("x", &OutputTarget::File(path), true).unwrap_err();
        assert!(err.to_string().contains("Failed to write output"));
    }
}
