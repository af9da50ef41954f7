use crate::error::{GitVersionError, Result};
use regex::Regex;
use std::collections::HashMap;

/// Captured groups of a successful match, keyed by group index ("0", "1", ...)
/// and by group name for named groups.
pub type CaptureMap = HashMap<String, String>;

/// A compiled regular expression that must match a candidate string in full.
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    source: String,
    regex: Regex,
}

impl PatternMatcher {
    /// Pattern used when a descriptor does not declare one.
    pub const MATCH_ALL: &'static str = ".*";

    /// Compile a pattern. Invalid syntax is reported immediately.
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = Regex::new(&format!("^(?:{})$", pattern)).map_err(|source| {
            GitVersionError::Pattern {
                pattern: pattern.to_string(),
                source,
            }
        })?;

        Ok(PatternMatcher {
            source: pattern.to_string(),
            regex,
        })
    }

    /// Pattern source as written in the configuration
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// Match `text` and collect every participating group.
    ///
    /// Optional groups that did not participate are absent from the map.
    pub fn captures(&self, text: &str) -> Option<CaptureMap> {
        let caps = self.regex.captures(text)?;
        let mut groups = CaptureMap::new();

        for (index, group) in caps.iter().enumerate() {
            if let Some(group) = group {
                groups.insert(index.to_string(), group.as_str().to_string());
            }
        }

        for name in self.regex.capture_names().flatten() {
            if let Some(group) = caps.name(name) {
                groups.insert(name.to_string(), group.as_str().to_string());
            }
        }

        Some(groups)
    }

    /// Every key `captures` can produce, without running a match.
    pub fn group_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = (0..self.regex.captures_len())
            .map(|index| index.to_string())
            .collect();
        keys.extend(self.regex.capture_names().flatten().map(str::to_string));
        keys
    }
}
