//! Issue key extraction.
//!
//! An issue key is a project prefix made of ASCII letters, a hyphen, and a
//! numeric identifier (for example `ABC-123`). Keys are pulled out of free
//! text such as commit messages or pull request titles.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

static KEY_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new("[A-Za-z]+-[0-9]+").ok());

static EXACT_KEY_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new("^[A-Za-z]+-[0-9]+$").ok());

/// Issue tracker key such as `ABC-123`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IssueKey(String);

impl IssueKey {
    /// Parses a complete issue key.
    ///
    /// Returns `None` unless the whole input matches `[A-Za-z]+-[0-9]+`.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        EXACT_KEY_PATTERN
            .as_ref()
            .filter(|pattern| pattern.is_match(value))
            .map(|_| Self(value.to_owned()))
    }

    /// Borrow the key text.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// The letter prefix naming the project.
    #[must_use]
    pub fn project(&self) -> &str {
        self.0.split_once('-').map_or("", |(project, _)| project)
    }

    /// The numeric identifier following the hyphen.
    #[must_use]
    pub fn number(&self) -> &str {
        self.0.split_once('-').map_or("", |(_, number)| number)
    }

    /// Whether the key is a placeholder for a ticket that does not exist yet.
    ///
    /// Placeholders have a numeric part made only of zeros (`ABC-0`,
    /// `ABC-000`) and are never looked up remotely.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        let number = self.number();
        !number.is_empty() && number.bytes().all(|digit| digit == b'0')
    }
}

impl fmt::Display for IssueKey {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl AsRef<str> for IssueKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Returns every issue key in `text`, left to right.
///
/// Matches never overlap. The same key may appear more than once in the
/// output if the text repeats it.
#[must_use]
pub fn extract_keys(text: &str) -> Vec<IssueKey> {
    KEY_PATTERN.as_ref().map_or_else(Vec::new, |pattern| {
        pattern
            .find_iter(text)
            .map(|found| IssueKey(found.as_str().to_owned()))
            .collect()
    })
}
