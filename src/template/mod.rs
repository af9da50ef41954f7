//! Format string templating
//!
//! A format string is literal text with embedded placeholders:
//!
//! - `${key}` renders the value bound to `key`, or stays verbatim when unset
//! - `${key:-text}` renders `text` when `key` is unset
//! - `${key:+text}` renders `text` when `key` is set, and nothing otherwise
//! - `${key:slug:lowercase}` pipes the value through functions, left to right
//!
//! A key counts as set when it is bound to a non-empty value. Inside default
//! and override text a literal colon is written `::`.
//!
//! ```rust
//! # use gitver::template::{substitute, TemplateContext};
//! let context: TemplateContext = [("branch", "Feature/Login")].into_iter().collect();
//! let rendered = substitute("${branch:slug:lowercase}${dirty:+-dirty}", &context).unwrap();
//! assert_eq!(rendered, "feature-login");
//! ```

pub mod context;
pub mod functions;
pub mod parser;

pub use context::{ContextValue, TemplateContext};
pub use functions::TemplateFunction;
pub use parser::{Operator, Placeholder, Segment};

use crate::error::Result;

/// A format string parsed once and rendered many times
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
}

impl Template {
    /// Parse a format string, rejecting malformed placeholders and unknown
    /// functions.
    pub fn parse(format: &str) -> Result<Self> {
        Ok(Template {
            source: format.to_string(),
            segments: parser::parse(format)?,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn render(&self, context: &TemplateContext<'_>) -> String {
        let mut rendered = String::with_capacity(self.source.len());

        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => rendered.push_str(text),
                Segment::Placeholder(placeholder) => {
                    rendered.push_str(&render_placeholder(placeholder, context))
                }
            }
        }

        rendered
    }
}

fn render_placeholder(placeholder: &Placeholder, context: &TemplateContext<'_>) -> String {
    let value = context.resolve(&placeholder.key);

    let value = match (&placeholder.operator, value) {
        (None, Some(value)) => value,
        (None, None) => return placeholder.raw.clone(),
        (Some(Operator::Default(_)), Some(value)) => value,
        (Some(Operator::Default(default)), None) => default.clone(),
        (Some(Operator::Override(replacement)), Some(_)) => replacement.clone(),
        (Some(Operator::Override(_)), None) => String::new(),
    };

    placeholder
        .functions
        .iter()
        .fold(value, |value, function| function.apply(&value))
}

/// Parse and render `format` in one step
pub fn substitute(format: &str, context: &TemplateContext<'_>) -> Result<String> {
    Ok(Template::parse(format)?.render(context))
}
