use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a temporary directory for deck files
pub fn create_test_deck_dir() -> TempDir {
    tempfile::tempdir().unwrap()
}

/// Create a file under the test directory with content
pub fn create_test_file(dir: &TempDir, filename: &str, content: &str) -> PathBuf {
    let file_path = dir.path().join(filename);
    fs::write(&file_path, content).unwrap();
    file_path
}

/// Wrap slide bodies in a minimal document, each with a page footer
pub fn deck_with_slides(bodies: &[&str]) -> String {
    let total = bodies.len();
    let slides: Vec<String> = bodies
        .iter()
        .enumerate()
        .map(|(i, body)| {
            format!(
                "<div class=\"slide\">\n        {body}\n        <div class=\"footer\">\n            Deck - スライド {}/{total}\n        </div>\n    </div>",
                i + 1
            )
        })
        .collect();
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n    <title>Test</title>\n</head>\n<body>\n    {}\n</body>\n</html>",
        slides.join("\n\n    ")
    )
}
