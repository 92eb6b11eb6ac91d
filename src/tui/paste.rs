//! Dropped-file detection for bracketed paste.
//!
//! Dragging files onto most terminal emulators pastes their paths, either
//! shell-quoted (`'/a b/c.pdf'`), backslash-escaped (`/a\ b/c.pdf`) or as
//! `file://` URIs, one per line or space separated. A paste counts as a drop
//! only when every token is an absolute path or `file:` URI naming an
//! existing file, so pasting prose or a bare `Cargo.toml` does nothing.

use std::path::PathBuf;

use reqwest::Url;

/// Split a paste into shell-style words.
///
/// Returns `None` on an unterminated quote.
fn split_words(text: &str) -> Option<Vec<String>> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        match c {
            '\'' | '"' => {
                in_word = true;
                let quote = c;
                loop {
                    match chars.next() {
                        Some(q) if q == quote => break,
                        Some('\\') if quote == '"' => match chars.next() {
                            Some(escaped) => current.push(escaped),
                            None => return None,
                        },
                        Some(other) => current.push(other),
                        None => return None,
                    }
                }
            }
            '\\' => {
                in_word = true;
                if let Some(escaped) = chars.next() {
                    current.push(escaped);
                }
            }
            c if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            c => {
                in_word = true;
                current.push(c);
            }
        }
    }
    if in_word {
        words.push(current);
    }
    Some(words)
}

/// Map one token to a local path. `file:` URIs go through `Url`, plain
/// tokens must already be absolute.
fn to_path(word: &str) -> Option<PathBuf> {
    if word.starts_with("file:") {
        return Url::parse(word).ok()?.to_file_path().ok();
    }
    let path = PathBuf::from(word);
    path.is_absolute().then_some(path)
}

/// Interpret pasted text as a list of dropped files.
///
/// Returns `None` unless the paste is non-empty and every token is an
/// absolute path (or `file:` URI) to an existing regular file.
pub fn parse_dropped_paths(text: &str) -> Option<Vec<PathBuf>> {
    let words = split_words(text)?;
    if words.is_empty() {
        return None;
    }
    let paths: Option<Vec<PathBuf>> = words.iter().map(|w| to_path(w)).collect();
    match paths {
        Some(paths) if paths.iter().all(|p| p.is_file()) => Some(paths),
        _ => {
            log::debug!("Paste is not a file drop ({} token(s))", words.len());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_words_handles_quotes_and_escapes() {
        assert_eq!(
            split_words(r#"'/a b/c.pdf' /d\ e.pdf "/f g.pdf""#).unwrap(),
            vec!["/a b/c.pdf", "/d e.pdf", "/f g.pdf"]
        );
    }

    #[test]
    fn test_split_words_newline_separated() {
        assert_eq!(
            split_words("/a.pdf\n/b.pdf\n").unwrap(),
            vec!["/a.pdf", "/b.pdf"]
        );
    }

    #[test]
    fn test_unterminated_quote() {
        assert!(split_words("'/a.pdf").is_none());
    }

    #[test]
    fn test_file_uri_is_decoded() {
        assert_eq!(
            to_path("file:///tmp/my%20report.pdf"),
            Some(PathBuf::from("/tmp/my report.pdf"))
        );
    }

    #[test]
    fn test_relative_token_is_not_a_path() {
        assert_eq!(to_path("Cargo.toml"), None);
        // Only local hosts map to a path
        assert_eq!(to_path("file://fileserver/share/a.pdf"), None);
    }

    #[test]
    fn test_localhost_file_uri_is_a_drop() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a b.pdf");
        std::fs::write(&a, b"").unwrap();

        let uri = Url::from_file_path(&a).unwrap();
        let localhost = uri.as_str().replacen("file://", "file://localhost", 1);
        assert_eq!(parse_dropped_paths(&localhost), Some(vec![a.clone()]));
        assert_eq!(parse_dropped_paths(uri.as_str()), Some(vec![a]));
    }

    #[test]
    fn test_relative_existing_file_is_not_a_drop() {
        let dir = tempfile::tempdir().unwrap();
        let name = "relative-drop-check.pdf";
        std::fs::write(dir.path().join(name), b"").unwrap();

        // Exists relative to the directory, but terminals only drop absolute paths
        assert!(dir.path().join(name).is_file());
        assert_eq!(parse_dropped_paths(name), None);
    }

    #[test]
    fn test_existing_files_are_a_drop() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a b.pdf");
        let b = dir.path().join("notes.txt");
        std::fs::write(&a, b"").unwrap();
        std::fs::write(&b, b"").unwrap();

        let paste = format!("'{}' '{}'", a.display(), b.display());
        assert_eq!(parse_dropped_paths(&paste), Some(vec![a, b]));
    }

    #[test]
    fn test_missing_file_is_not_a_drop() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.pdf");
        std::fs::write(&a, b"").unwrap();

        let paste = format!("{} {}", a.display(), dir.path().join("gone.pdf").display());
        assert_eq!(parse_dropped_paths(&paste), None);
        assert_eq!(parse_dropped_paths("   "), None);
    }
}
