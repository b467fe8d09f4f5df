//! Ordered multi-map of events leaving a single state.

use super::event::Event;
use std::collections::HashMap;
use std::fmt;

/// Events of one state grouped by name.
///
/// Insertion order is preserved both across names (first declaration of a
/// name fixes its position) and within a name. Pushing an event under an
/// existing name appends it as a further alternative; resolution picks the
/// first eligible alternative, so this order is significant.
pub struct EventCollection<C> {
    entries: Vec<(String, Vec<Event<C>>)>,
    index: HashMap<String, usize>,
}

impl<C> EventCollection<C> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Append an event under its name.
    pub fn push(&mut self, event: Event<C>) {
        match self.index.get(event.name()) {
            Some(&position) => self.entries[position].1.push(event),
            None => {
                let name = event.name().to_string();
                self.index.insert(name.clone(), self.entries.len());
                self.entries.push((name, vec![event]));
            }
        }
    }

    /// Events declared under `name`, in declaration order.
    ///
    /// Empty if the name was never declared.
    pub fn get(&self, name: &str) -> &[Event<C>] {
        self.index
            .get(name)
            .map_or(&[][..], |&position| self.entries[position].1.as_slice())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// First event under `name` whose guard passes for `context`.
    pub fn first_eligible(&self, name: &str, context: &C) -> Option<&Event<C>> {
        self.get(name).iter().find(|e| e.is_eligible(context))
    }

    /// `(name, events)` pairs in first-declared-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Event<C>])> + Clone + '_ {
        self.entries
            .iter()
            .map(|(name, events)| (name.as_str(), events.as_slice()))
    }

    /// Distinct event names in first-declared order.
    pub fn names(&self) -> impl Iterator<Item = &str> + Clone + '_ {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Every event, grouped by name in declaration order.
    pub fn events(&self) -> impl Iterator<Item = &Event<C>> + '_ {
        self.entries.iter().flat_map(|(_, events)| events.iter())
    }

    /// Number of distinct event names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<C> Default for EventCollection<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> fmt::Debug for EventCollection<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(name, events)| (name, events)))
            .finish()
    }
}
