//! A module's topic→handler mapping.

use crate::handler::Handler;
use crate::payload::Payload;
use crate::topic::Topic;
use std::fmt;
use std::sync::Arc;

/// The topic→handler mapping one module contributes to the bus.
///
/// A manifest is produced once at resolution time and never mutated
/// afterward; entries keep their insertion order, which becomes the
/// within-module registration order when manifests are merged. Each topic
/// owns at most one slot per manifest: registering a topic twice replaces
/// the earlier handler in place.
///
/// A slot may be registered empty with [`Manifest::on_maybe`]: the module
/// stays listed but contributes nothing for that topic, and the merge step
/// filters the slot out instead of creating a phantom no-op handler.
pub struct Manifest<T: Payload> {
    entries: Vec<(Topic, Option<Arc<dyn Handler<T>>>)>,
}

impl<T: Payload> Manifest<T> {
    /// Create an empty manifest.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Register a handler for a topic.
    pub fn on<H>(self, topic: impl Into<Topic>, handler: H) -> Self
    where
        H: Handler<T>,
    {
        self.insert(topic.into(), Some(Arc::new(handler)))
    }

    /// Register an optional handler for a topic.
    ///
    /// `None` records the slot but contributes no handler: the module
    /// declines interest in this specific topic while still registering
    /// others.
    pub fn on_maybe<H>(self, topic: impl Into<Topic>, handler: Option<H>) -> Self
    where
        H: Handler<T>,
    {
        self.insert(
            topic.into(),
            handler.map(|h| Arc::new(h) as Arc<dyn Handler<T>>),
        )
    }

    fn insert(mut self, topic: Topic, handler: Option<Arc<dyn Handler<T>>>) -> Self {
        match self.entries.iter_mut().find(|(t, _)| *t == topic) {
            Some(slot) => slot.1 = handler,
            None => self.entries.push((topic, handler)),
        }
        self
    }

    /// Number of recorded slots, including declined ones.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the manifest records no slots at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The topics this manifest records, in insertion order.
    pub fn topics(&self) -> impl Iterator<Item = &Topic> {
        self.entries.iter().map(|(t, _)| t)
    }
}

impl<T: Payload> Default for Manifest<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Payload> fmt::Debug for Manifest<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Manifest")
            .field("topics", &self.topics().collect::<Vec<_>>())
            .finish()
    }
}

impl<T: Payload> IntoIterator for Manifest<T> {
    type Item = (Topic, Option<Arc<dyn Handler<T>>>);
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_keep_insertion_order() {
        let manifest: Manifest<String> = Manifest::new()
            .on("b", |d: String| d)
            .on("a", |d: String| d)
            .on("c", |d: String| d);
        let topics: Vec<_> = manifest.topics().map(Topic::as_str).collect();
        assert_eq!(topics, ["b", "a", "c"]);
    }

    #[test]
    fn re_registering_a_topic_replaces_in_place() {
        let manifest: Manifest<String> = Manifest::new()
            .on("t", |d: String| format!("{d}-old"))
            .on("u", |d: String| d)
            .on("t", |d: String| format!("{d}-new"));
        assert_eq!(manifest.len(), 2);
        let (_, handler) = manifest.into_iter().next().unwrap();
        let handler = handler.unwrap();
        assert_eq!(handler.call("x".to_string()), "x-new");
    }

    #[test]
    fn declined_slot_is_recorded_without_a_handler() {
        let manifest: Manifest<String> =
            Manifest::new().on_maybe("t", None::<fn(String) -> String>);
        assert_eq!(manifest.len(), 1);
        let (_, handler) = manifest.into_iter().next().unwrap();
        assert!(handler.is_none());
    }
}
