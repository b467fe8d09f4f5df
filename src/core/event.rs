//! Event edges between states.

use super::guard::Guard;
use super::hooks::{Action, Meta};
use std::borrow::Cow;
use std::fmt;

/// A named, optionally guarded edge to a target state.
///
/// Events are immutable once declared. The target is a state name that is
/// resolved lazily by the execution engine.
pub struct Event<C> {
    name: String,
    target: String,
    condition: Option<Guard<C>>,
    meta: Meta,
    action: Option<Action<C>>,
}

impl<C> Event<C> {
    pub fn new(
        name: impl Into<String>,
        target: impl Into<String>,
        condition: Option<Guard<C>>,
        meta: Meta,
        action: Option<Action<C>>,
    ) -> Self {
        Self {
            name: name.into(),
            target: target.into(),
            condition,
            meta,
            action,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn condition(&self) -> Option<&Guard<C>> {
        self.condition.as_ref()
    }

    pub fn meta(&self) -> &Meta {
        &self.meta
    }

    pub fn action(&self) -> Option<&Action<C>> {
        self.action.as_ref()
    }

    /// Whether this event may fire for `context`: no guard, or a passing one.
    pub fn is_eligible(&self, context: &C) -> bool {
        self.condition.as_ref().map_or(true, |g| g.check(context))
    }

    /// Label for presentation.
    ///
    /// Uses `meta["display_name"]` when it is a string, otherwise the event
    /// name with underscores replaced and the first letter capitalized.
    pub fn display_name(&self) -> Cow<'_, str> {
        match self.meta.get("display_name").and_then(|v| v.as_str()) {
            Some(label) => Cow::Borrowed(label),
            None => Cow::Owned(humanize(&self.name)),
        }
    }
}

impl<C> Clone for Event<C> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            target: self.target.clone(),
            condition: self.condition.clone(),
            meta: self.meta.clone(),
            action: self.action.clone(),
        }
    }
}

impl<C> fmt::Debug for Event<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("name", &self.name)
            .field("target", &self.target)
            .field("guarded", &self.condition.is_some())
            .field("meta", &self.meta)
            .field("has_action", &self.action.is_some())
            .finish()
    }
}

fn humanize(name: &str) -> String {
    let spaced = name.replace('_', " ");
    let mut chars = spaced.trim().chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Doc {
        words: usize,
    }

    fn event(name: &str, condition: Option<Guard<Doc>>) -> Event<Doc> {
        Event::new(name, "review", condition, Meta::new(), None)
    }

    #[test]
    fn unguarded_event_is_always_eligible() {
        let e = event("submit", None);
        assert!(e.is_eligible(&Doc { words: 0 }));
    }

    #[test]
    fn guarded_event_follows_guard() {
        let e = event("submit", Some(Guard::new(|d: &Doc| d.words >= 100)));

        assert!(e.is_eligible(&Doc { words: 250 }));
        assert!(!e.is_eligible(&Doc { words: 10 }));
    }

    #[test]
    fn display_name_humanizes_event_name() {
        assert_eq!(event("submit_for_review", None).display_name(), "Submit for review");
        assert_eq!(event("approve", None).display_name(), "Approve");
    }

    #[test]
    fn display_name_prefers_meta_label() {
        let mut meta = Meta::new();
        meta.insert("display_name".to_string(), json!("Send to editor"));
        let e: Event<Doc> = Event::new("submit", "review", None, meta, None);

        assert_eq!(e.display_name(), "Send to editor");
    }

    #[test]
    fn accessors_expose_declaration() {
        let e = event("submit", None);

        assert_eq!(e.name(), "submit");
        assert_eq!(e.target(), "review");
        assert!(e.condition().is_none());
        assert!(e.action().is_none());
        assert!(e.meta().is_empty());
    }
}
