use std::path::{Path, PathBuf};

use url::Url;

/// A file the user dropped onto the surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedFile {
    pub path: PathBuf,
}

impl DroppedFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Final path component, or the whole path when it has none.
    pub fn display_name(&self) -> String {
        display_name(&self.path)
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

/// Splits the text a terminal pastes on drag-and-drop into file paths.
///
/// Terminals differ: some quote each path, some backslash-escape spaces, some
/// send `file://` URIs one per line, and some paste the raw path with its
/// spaces intact. Backslashes not followed by a space, quote or backslash are
/// kept literally so Windows paths survive.
pub fn parse_drop_payload(raw: &str) -> Vec<DroppedFile> {
    raw.lines()
        .flat_map(|line| match raw_path(line) {
            Some(path) => vec![path],
            None => split_words(line),
        })
        .filter_map(|word| to_path(&word))
        .map(DroppedFile::new)
        .collect()
}

/// A line without quoting that names an existing file is one path, spaces
/// and all.
fn raw_path(line: &str) -> Option<String> {
    let line = line.trim();
    let quoted =
        line.contains(['\'', '"']) || line.contains("\\ ") || line.starts_with("file://");
    if quoted || !line.contains(char::is_whitespace) || !Path::new(line).is_file() {
        return None;
    }
    Some(line.to_string())
}

fn split_words(line: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match (quote, ch) {
            (Some(open), c) if c == open => quote = None,
            (Some(_), c) => current.push(c),
            (None, '\'' | '"') => {
                quote = Some(ch);
                in_word = true;
            }
            (None, '\\') => {
                match chars.peek() {
                    Some(&next @ (' ' | '\\' | '\'' | '"')) => {
                        current.push(next);
                        chars.next();
                    }
                    _ => current.push('\\'),
                }
                in_word = true;
            }
            (None, c) if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            (None, c) => {
                current.push(c);
                in_word = true;
            }
        }
    }
    if in_word {
        words.push(current);
    }
    words
}

fn to_path(word: &str) -> Option<PathBuf> {
    if word.is_empty() {
        return None;
    }
    if word.starts_with("file://") {
        return Url::parse(word).ok()?.to_file_path().ok();
    }
    Some(PathBuf::from(word))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_quoted_words_and_keeps_inner_spaces() {
        assert_eq!(
            split_words("'/tmp/a b.txt' \"/tmp/c.txt\""),
            vec!["/tmp/a b.txt".to_string(), "/tmp/c.txt".to_string()]
        );
    }

    #[test]
    fn empty_quotes_produce_an_empty_word() {
        assert_eq!(split_words("''"), vec![String::new()]);
        assert!(to_path("").is_none());
    }
}
