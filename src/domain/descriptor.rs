use crate::domain::PatternMatcher;
use crate::error::Result;
use crate::template::Template;

/// Rewrites a property whose name and value both match
#[derive(Debug, Clone)]
pub struct PropertyDescriptor {
    name_pattern: PatternMatcher,
    value_pattern: PatternMatcher,
    value_format: Template,
}

impl PropertyDescriptor {
    /// Compile a property descriptor; `value_pattern` defaults to match-everything
    pub fn new(name_pattern: &str, value_pattern: Option<&str>, value_format: &str) -> Result<Self> {
        Ok(PropertyDescriptor {
            name_pattern: PatternMatcher::new(name_pattern)?,
            value_pattern: PatternMatcher::new(value_pattern.unwrap_or(PatternMatcher::MATCH_ALL))?,
            value_format: Template::parse(value_format)?,
        })
    }

    pub fn applies_to(&self, name: &str, value: &str) -> bool {
        self.name_pattern.is_match(name) && self.value_pattern.is_match(value)
    }

    pub fn name_pattern(&self) -> &PatternMatcher {
        &self.name_pattern
    }

    pub fn value_pattern(&self) -> &PatternMatcher {
        &self.value_pattern
    }

    pub fn value_format(&self) -> &Template {
        &self.value_format
    }
}

/// How to render a version for refs matching `pattern`.
///
/// The commit fallback descriptor has no pattern and applies to anything.
#[derive(Debug, Clone)]
pub struct VersionDescriptor {
    pattern: Option<PatternMatcher>,
    format: Template,
    prefix: String,
    properties: Vec<PropertyDescriptor>,
}

impl VersionDescriptor {
    /// Descriptor for branches or tags; `pattern` defaults to match-everything
    pub fn for_ref(pattern: Option<&str>, format: &str) -> Result<Self> {
        Ok(VersionDescriptor {
            pattern: Some(PatternMatcher::new(
                pattern.unwrap_or(PatternMatcher::MATCH_ALL),
            )?),
            format: Template::parse(format)?,
            prefix: String::new(),
            properties: Vec::new(),
        })
    }

    /// Fallback descriptor used when no branch or tag descriptor applies
    pub fn commit(format: &str) -> Result<Self> {
        Ok(VersionDescriptor {
            pattern: None,
            format: Template::parse(format)?,
            prefix: String::new(),
            properties: Vec::new(),
        })
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_property(mut self, property: PropertyDescriptor) -> Self {
        self.properties.push(property);
        self
    }

    pub fn matches(&self, ref_name: &str) -> bool {
        self.pattern
            .as_ref()
            .map_or(true, |pattern| pattern.is_match(ref_name))
    }

    /// Ref name without this descriptor's prefix
    pub fn strip_prefix<'n>(&self, ref_name: &'n str) -> &'n str {
        ref_name.strip_prefix(self.prefix.as_str()).unwrap_or(ref_name)
    }

    pub fn pattern(&self) -> Option<&PatternMatcher> {
        self.pattern.as_ref()
    }

    pub fn format(&self) -> &Template {
        &self.format
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn properties(&self) -> &[PropertyDescriptor] {
        &self.properties
    }

    /// First property descriptor applying to `name` = `value`
    pub fn find_property(&self, name: &str, value: &str) -> Option<&PropertyDescriptor> {
        self.properties
            .iter()
            .find(|property| property.applies_to(name, value))
    }
}
