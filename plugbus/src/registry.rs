//! Topic registry storage.

use crate::resolver::Resolved;
use plugbus_core::{Handler, ModuleName, Payload, Topic};
use std::collections::HashMap;
use std::sync::Arc;

/// One installed entry under a topic.
pub(crate) enum HookEntry<T: Payload> {
    /// A handler contributed by a module manifest.
    Handler(Arc<dyn Handler<T>>),
    /// A placeholder for a module that was required but never defined.
    Missing(ModuleName),
}

impl<T: Payload> Clone for HookEntry<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Handler(handler) => Self::Handler(handler.clone()),
            Self::Missing(name) => Self::Missing(name.clone()),
        }
    }
}

/// Append-only mapping from topics to installed entries.
///
/// Entry lists are shared slices: dispatch clones the `Arc` under a read
/// lock and walks it without holding the lock, so a concurrent append
/// replaces the slice instead of mutating it in place.
pub(crate) struct TopicRegistry<T: Payload> {
    topics: HashMap<Topic, Arc<[HookEntry<T>]>>,
}

impl<T: Payload> TopicRegistry<T> {
    pub(crate) fn new() -> Self {
        Self {
            topics: HashMap::new(),
        }
    }

    /// Merge one resolved module into the registry.
    ///
    /// Manifest entries append in manifest order, after everything already
    /// installed under the same topic; declined slots inside a manifest are
    /// skipped. A missing module installs a placeholder under the topic
    /// equal to its own name.
    pub(crate) fn merge(&mut self, name: &ModuleName, resolved: Resolved<T>) {
        match resolved {
            Resolved::Manifest(manifest) => {
                for (topic, handler) in manifest {
                    if let Some(handler) = handler {
                        self.append(topic, HookEntry::Handler(handler));
                    }
                }
            }
            Resolved::Declined => {}
            Resolved::Missing => {
                self.append(Topic::from(name), HookEntry::Missing(name.clone()));
            }
        }
    }

    fn append(&mut self, topic: Topic, entry: HookEntry<T>) {
        match self.topics.get_mut(&topic) {
            Some(entries) => {
                let mut extended = Vec::with_capacity(entries.len() + 1);
                extended.extend(entries.iter().cloned());
                extended.push(entry);
                *entries = extended.into();
            }
            None => {
                self.topics.insert(topic, vec![entry].into());
            }
        }
    }

    /// Clone the entry list for `topic`, if any.
    pub(crate) fn snapshot(&self, topic: &str) -> Option<Arc<[HookEntry<T>]>> {
        self.topics.get(topic).cloned()
    }

    pub(crate) fn has_topic(&self, topic: &str) -> bool {
        self.topics.contains_key(topic)
    }

    /// Number of live handlers under `topic`, placeholders excluded.
    pub(crate) fn handler_count(&self, topic: &str) -> usize {
        self.topics.get(topic).map_or(0, |entries| {
            entries
                .iter()
                .filter(|entry| matches!(entry, HookEntry::Handler(_)))
                .count()
        })
    }

    /// All registered topics, in no particular order.
    pub(crate) fn topics(&self) -> Vec<Topic> {
        self.topics.keys().cloned().collect()
    }
}
