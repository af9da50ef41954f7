use crate::domain::PatternMatcher;
use std::cell::OnceCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// A value a placeholder can resolve to
#[derive(Clone)]
pub enum ContextValue<'a> {
    Literal(String),
    /// Computed on first lookup; `None` means unset
    Lazy(Rc<dyn Fn() -> Option<String> + 'a>),
}

impl ContextValue<'_> {
    fn get(&self) -> Option<String> {
        match self {
            ContextValue::Literal(value) => Some(value.clone()),
            ContextValue::Lazy(compute) => compute(),
        }
    }
}

impl fmt::Debug for ContextValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextValue::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            ContextValue::Lazy(_) => f.write_str("Lazy(..)"),
        }
    }
}

/// Placeholder values available to a single render
#[derive(Debug, Clone, Default)]
pub struct TemplateContext<'a> {
    values: HashMap<String, ContextValue<'a>>,
}

impl<'a> TemplateContext<'a> {
    pub fn new() -> Self {
        TemplateContext {
            values: HashMap::new(),
        }
    }

    /// Bind `key`, replacing any earlier binding of the same name
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values
            .insert(key.into(), ContextValue::Literal(value.into()));
    }

    pub fn insert_lazy(&mut self, key: impl Into<String>, compute: impl Fn() -> Option<String> + 'a) {
        self.values
            .insert(key.into(), ContextValue::Lazy(Rc::new(compute)));
    }

    /// Bind every capture group of `matcher` against `text`.
    ///
    /// Each group is bound once per prefix (use `""` for bare group keys).
    /// The match itself runs at most once, on the first lookup of any of
    /// these keys. A group that did not take part in the match resolves to
    /// whatever the key was bound to before.
    pub fn insert_captures(&mut self, matcher: &'a PatternMatcher, text: &'a str, prefixes: &[&str]) {
        let captures = Rc::new(OnceCell::new());

        for group in matcher.group_keys() {
            for prefix in prefixes {
                let key = format!("{}{}", prefix, group);
                let previous = self.values.get(&key).cloned();
                let captures = Rc::clone(&captures);
                let group = group.clone();
                self.insert_lazy(key, move || {
                    captures
                        .get_or_init(|| matcher.captures(text).unwrap_or_default())
                        .get(&group)
                        .cloned()
                        .or_else(|| previous.as_ref().and_then(ContextValue::get))
                });
            }
        }
    }

    /// Value bound to `key`, if it is set to a non-empty string
    pub fn resolve(&self, key: &str) -> Option<String> {
        self.values
            .get(key)
            .and_then(ContextValue::get)
            .filter(|value| !value.is_empty())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }
}

impl<'a, K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TemplateContext<'a> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut context = TemplateContext::new();
        for (key, value) in iter {
            context.insert(key, value);
        }
        context
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_empty_value_is_unset() {
        let context: TemplateContext = [("empty", ""), ("name", "main")].into_iter().collect();
        assert_eq!(context.resolve("empty"), None);
        assert_eq!(context.resolve("name").as_deref(), Some("main"));
        assert_eq!(context.resolve("missing"), None);
        assert!(context.contains_key("empty"));
    }

    #[test]
    fn test_later_insert_replaces() {
        let mut context = TemplateContext::new();
        context.insert("ref", "first");
        context.insert("ref", "second");
        assert_eq!(context.resolve("ref").as_deref(), Some("second"));
    }

    #[test]
    fn test_lazy_value_computed_on_lookup() {
        let calls = Cell::new(0);
        let mut context = TemplateContext::new();
        context.insert_lazy("lazy", || {
            calls.set(calls.get() + 1);
            Some("value".to_string())
        });

        assert_eq!(calls.get(), 0);
        assert_eq!(context.resolve("lazy").as_deref(), Some("value"));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_captures_are_bound_lazily_per_prefix() {
        let matcher = PatternMatcher::new(r"feature/(?<name>.+)").unwrap();
        let mut context = TemplateContext::new();
        context.insert_captures(&matcher, "feature/login", &["", "ref."]);

        assert_eq!(context.resolve("name").as_deref(), Some("login"));
        assert_eq!(context.resolve("ref.name").as_deref(), Some("login"));
        assert_eq!(context.resolve("1").as_deref(), Some("login"));
        assert_eq!(context.resolve("ref.0").as_deref(), Some("feature/login"));
    }

    #[test]
    fn test_captures_without_match_are_unset() {
        let matcher = PatternMatcher::new(r"v(\d+)").unwrap();
        let mut context = TemplateContext::new();
        context.insert_captures(&matcher, "main", &[""]);

        assert!(context.contains_key("1"));
        assert_eq!(context.resolve("1"), None);
    }

    #[test]
    fn test_unmatched_group_keeps_earlier_binding() {
        let matcher = PatternMatcher::new(r"(?:(?<branch>\d+)-)?(?<rest>.*)").unwrap();
        let mut context = TemplateContext::new();
        context.insert("branch", "develop");
        context.insert_captures(&matcher, "abc", &[""]);

        assert_eq!(context.resolve("branch").as_deref(), Some("develop"));
        assert_eq!(context.resolve("rest").as_deref(), Some("abc"));
    }

    #[test]
    fn test_matched_group_replaces_earlier_binding() {
        let matcher = PatternMatcher::new(r"(?:(?<branch>\d+)-)?.*").unwrap();
        let mut context = TemplateContext::new();
        context.insert("branch", "develop");
        context.insert_captures(&matcher, "42-abc", &[""]);

        assert_eq!(context.resolve("branch").as_deref(), Some("42"));
    }
}
