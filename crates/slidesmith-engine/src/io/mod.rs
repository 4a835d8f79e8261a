use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid deck directory: {0}")]
    InvalidDeckDir(String),
}

/// Read a deck document
pub fn read_document(path: &Path) -> Result<String, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    Ok(fs::read_to_string(path)?)
}

/// Write a deck document, creating parent directories as needed
pub fn write_document(path: &Path, content: &str) -> Result<(), IoError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}

/// Find `.html` decks under a directory, sorted
pub fn scan_decks(root: &Path) -> Result<Vec<PathBuf>, IoError> {
    if !root.is_dir() {
        return Err(IoError::InvalidDeckDir(format!(
            "{} is not a directory",
            root.display()
        )));
    }

    let mut decks = Vec::new();
    scan_directory_recursive(root, &mut decks)?;
    decks.sort();
    Ok(decks)
}

fn scan_directory_recursive(dir: &Path, decks: &mut Vec<PathBuf>) -> Result<(), IoError> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();

        if path.is_dir() {
            scan_directory_recursive(&path, decks)?;
        } else if let Some(ext) = path.extension()
            && (ext == "html" || ext == "htm")
        {
            decks.push(path);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{create_test_deck_dir, create_test_file};

    #[test]
    fn test_read_document_not_found() {
        let dir = create_test_deck_dir();
        let result = read_document(&dir.path().join("missing.html"));
        assert!(matches!(result, Err(IoError::NotFound(_))));
    }

    #[test]
    fn test_write_then_read() {
        // Given a fresh directory
        let dir = create_test_deck_dir();
        let path = dir.path().join("decks/q3/talk.html");

        // When writing into a nested path
        write_document(&path, "<div class=\"slide\"></div>").unwrap();

        // Then the parents exist and the content comes back
        assert!(dir.path().join("decks/q3").is_dir());
        assert_eq!(read_document(&path).unwrap(), "<div class=\"slide\"></div>");
    }

    #[test]
    fn test_write_overwrites_existing() {
        let dir = create_test_deck_dir();
        let path = create_test_file(&dir, "deck.html", "old");
        write_document(&path, "new").unwrap();
        assert_eq!(read_document(&path).unwrap(), "new");
    }

    #[test]
    fn test_scan_decks_finds_html_only() {
        let dir = create_test_deck_dir();
        create_test_file(&dir, "b.html", "");
        create_test_file(&dir, "a.htm", "");
        create_test_file(&dir, "notes.md", "");
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        create_test_file(&dir, "sub/c.html", "");

        let decks = scan_decks(dir.path()).unwrap();

        let names: Vec<_> = decks
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.htm", "b.html", "sub/c.html"]);
    }

    #[test]
    fn test_scan_decks_rejects_missing_dir() {
        let result = scan_decks(Path::new("/this/path/does/not/exist"));
        assert!(matches!(result, Err(IoError::InvalidDeckDir(_))));
    }
}
