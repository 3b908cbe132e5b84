pub mod buckets;
pub mod chatlog;
pub mod config;
pub mod highlights;
pub mod output;
pub mod timestamp;
pub mod twitch;

use std::path::Path;

use eyre::{Result, WrapErr};

/// Read a username list: one login per line, trimmed, blank lines skipped.
pub fn read_usernames(path: &Path) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("could not read username file {}", path.display()))?;
    Ok(parse_usernames(&text))
}

pub fn parse_usernames(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_usernames() {
        let text = "somestreamer\n  otherstreamer  \n\nthird\n";
        assert_eq!(parse_usernames(text), vec!["somestreamer", "otherstreamer", "third"]);
    }

    #[test]
    fn test_parse_usernames_empty() {
        assert!(parse_usernames("").is_empty());
        assert!(parse_usernames("\n\n  \n").is_empty());
    }

    #[test]
    fn test_read_usernames_missing_file() {
        assert!(read_usernames(Path::new("/nonexistent/users.txt")).is_err());
    }
}
