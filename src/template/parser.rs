use super::functions::TemplateFunction;
use crate::error::{GitVersionError, Result};

/// Piece of a parsed format string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Placeholder(Placeholder),
}

/// Shell-style operator following the placeholder key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operator {
    /// `:-text`, used when the key is unset
    Default(String),
    /// `:+text`, used instead of the value when the key is set
    Override(String),
}

/// A parsed `${key[:-default|:+override](:function)*}` expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// Source text, rendered verbatim when the key is unset
    pub raw: String,
    pub key: String,
    pub operator: Option<Operator>,
    pub functions: Vec<TemplateFunction>,
}

/// Split a format string into literal text and placeholders
pub fn parse(format: &str) -> Result<Vec<Segment>> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut rest = format;

    while let Some(start) = rest.find("${") {
        literal.push_str(&rest[..start]);
        let after_open = &rest[start + 2..];

        let Some(end) = after_open.find('}') else {
            return Err(GitVersionError::template(
                &rest[start..],
                "unterminated placeholder, missing '}'",
            ));
        };

        let raw = &rest[start..start + 2 + end + 1];
        let placeholder = parse_placeholder(raw, &after_open[..end])?;

        if !literal.is_empty() {
            segments.push(Segment::Literal(std::mem::take(&mut literal)));
        }
        segments.push(Segment::Placeholder(placeholder));

        rest = &after_open[end + 1..];
    }

    literal.push_str(rest);
    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }

    Ok(segments)
}

fn parse_placeholder(raw: &str, body: &str) -> Result<Placeholder> {
    let mut parts = split_unescaped(body).into_iter();

    let key = parts.next().unwrap_or_default();
    if key.is_empty() {
        return Err(GitVersionError::template(raw, "empty placeholder key"));
    }

    let mut operator = None;
    let mut functions = Vec::new();

    for (index, part) in parts.enumerate() {
        if index == 0 {
            if let Some(default) = part.strip_prefix('-') {
                operator = Some(Operator::Default(default.to_string()));
                continue;
            }
            if let Some(replacement) = part.strip_prefix('+') {
                operator = Some(Operator::Override(replacement.to_string()));
                continue;
            }
        }

        let function = part
            .parse::<TemplateFunction>()
            .map_err(|reason| GitVersionError::template(raw, reason))?;
        functions.push(function);
    }

    Ok(Placeholder {
        raw: raw.to_string(),
        key,
        operator,
        functions,
    })
}

/// Split on single `:` while reading `::` as a literal colon
fn split_unescaped(body: &str) -> Vec<String> {
    let mut parts = vec![String::new()];
    let mut chars = body.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            ':' if chars.peek() == Some(&':') => {
                chars.next();
                if let Some(part) = parts.last_mut() {
                    part.push(':');
                }
            }
            ':' => parts.push(String::new()),
            _ => {
                if let Some(part) = parts.last_mut() {
                    part.push(c);
                }
            }
        }
    }

    parts
}
