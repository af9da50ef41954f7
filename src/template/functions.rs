//! Value transformations applied by `:function` suffixes of a placeholder

use std::fmt;
use std::str::FromStr;

/// A transformation applied to a placeholder value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateFunction {
    Lowercase,
    Uppercase,
    /// Collapse runs outside `[A-Za-z0-9_-]` to `-`
    Slug,
    /// Like `Slug`, keeping `.`
    SlugDot,
    /// Like `Slug`, also replacing `_`
    SlugHyphen,
    /// Allowed set `[A-Za-z0-9-.]`
    SlugHyphenDot,
    /// Collapse runs outside `[A-Za-z0-9_]` to `_`
    Word,
    /// Like `Word`, keeping `.`
    WordDot,
    /// Increment a trailing number, or append `.1`
    Next,
    /// Increment the rightmost number anywhere in the value
    IncrementLast,
}

impl TemplateFunction {
    /// Name as written in a format string
    pub fn name(&self) -> &'static str {
        match self {
            TemplateFunction::Lowercase => "lowercase",
            TemplateFunction::Uppercase => "uppercase",
            TemplateFunction::Slug => "slug",
            TemplateFunction::SlugDot => "slug+dot",
            TemplateFunction::SlugHyphen => "slug+hyphen",
            TemplateFunction::SlugHyphenDot => "slug+hyphen+dot",
            TemplateFunction::Word => "word",
            TemplateFunction::WordDot => "word+dot",
            TemplateFunction::Next => "next",
            TemplateFunction::IncrementLast => "incrementlast",
        }
    }

    pub fn apply(&self, value: &str) -> String {
        match self {
            TemplateFunction::Lowercase => value.to_lowercase(),
            TemplateFunction::Uppercase => value.to_uppercase(),
            TemplateFunction::Slug => collapse(value, |c| c == '_' || c == '-', '-'),
            TemplateFunction::SlugDot => collapse(value, |c| matches!(c, '_' | '-' | '.'), '-'),
            TemplateFunction::SlugHyphen => collapse(value, |c| c == '-', '-'),
            TemplateFunction::SlugHyphenDot => collapse(value, |c| c == '-' || c == '.', '-'),
            TemplateFunction::Word => collapse(value, |c| c == '_', '_'),
            TemplateFunction::WordDot => collapse(value, |c| c == '_' || c == '.', '_'),
            TemplateFunction::Next => next(value),
            TemplateFunction::IncrementLast => increment_last(value),
        }
    }
}

impl FromStr for TemplateFunction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lowercase" => Ok(TemplateFunction::Lowercase),
            "uppercase" => Ok(TemplateFunction::Uppercase),
            "slug" => Ok(TemplateFunction::Slug),
            "slug+dot" => Ok(TemplateFunction::SlugDot),
            "slug+hyphen" => Ok(TemplateFunction::SlugHyphen),
            "slug+hyphen+dot" => Ok(TemplateFunction::SlugHyphenDot),
            "word" => Ok(TemplateFunction::Word),
            "word+dot" => Ok(TemplateFunction::WordDot),
            "next" => Ok(TemplateFunction::Next),
            "incrementlast" => Ok(TemplateFunction::IncrementLast),
            other => Err(format!("unknown function '{}'", other)),
        }
    }
}

impl fmt::Display for TemplateFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Replace every maximal run of disallowed characters with `separator`.
///
/// ASCII letters and digits are always allowed; `extra` admits more.
fn collapse(value: &str, extra: impl Fn(char) -> bool, separator: char) -> String {
    let mut result = String::with_capacity(value.len());
    let mut in_run = false;

    for c in value.chars() {
        if c.is_ascii_alphanumeric() || extra(c) {
            result.push(c);
            in_run = false;
        } else if !in_run {
            result.push(separator);
            in_run = true;
        }
    }

    result
}

fn next(value: &str) -> String {
    let prefix_len = value.trim_end_matches(|c: char| c.is_ascii_digit()).len();
    if prefix_len == value.len() {
        return format!("{}.1", value);
    }

    let (prefix, digits) = value.split_at(prefix_len);
    format!("{}{}", prefix, increment_digits(digits))
}

fn increment_last(value: &str) -> String {
    let Some(last_digit) = value.rfind(|c: char| c.is_ascii_digit()) else {
        return value.to_string();
    };

    let end = last_digit + 1;
    let start = value[..end]
        .trim_end_matches(|c: char| c.is_ascii_digit())
        .len();

    format!(
        "{}{}{}",
        &value[..start],
        increment_digits(&value[start..end]),
        &value[end..]
    )
}

/// Add one to a run of ASCII digits, keeping its width unless it overflows
/// ("09" -> "10", "99" -> "100").
fn increment_digits(digits: &str) -> String {
    let mut result: Vec<char> = digits.chars().collect();

    for c in result.iter_mut().rev() {
        if *c == '9' {
            *c = '0';
        } else {
            *c = char::from(*c as u8 + 1);
            return result.into_iter().collect();
        }
    }

    std::iter::once('1').chain(result).collect()
}
