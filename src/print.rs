//! Printing: hands a rendered itinerary document to the platform.

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::info;

use crate::error::PrintError;

/// Platform print hook.
#[async_trait]
pub trait Printer: Send + Sync {
    fn name(&self) -> &str;

    /// Print a complete HTML document.
    async fn print(&self, document: &str) -> Result<(), PrintError>;
}

/// Writes the document to a file so it can be opened and printed from a
/// browser.
pub struct FilePrinter {
    path: PathBuf,
}

impl FilePrinter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[async_trait]
impl Printer for FilePrinter {
    fn name(&self) -> &str {
        "file"
    }

    async fn print(&self, document: &str) -> Result<(), PrintError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        tokio::fs::write(&self.path, document).await?;
        info!(path = %self.path.display(), bytes = document.len(), "Itinerary written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn writes_document_creating_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/trip.html");
        let printer = FilePrinter::new(&path);
        printer.print("<html></html>").await.unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<html></html>");
        assert_eq!(printer.name(), "file");
    }
}
