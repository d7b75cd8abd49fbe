//! The bus: construction, late addition, and dispatch.

use crate::module::ModuleDef;
use crate::registry::{HookEntry, TopicRegistry};
use crate::resolver;
use parking_lot::RwLock;
use plugbus_core::{Config, DispatchError, Handler, ModuleName, Payload, ResolveError, Topic};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

struct BusInner<T: Payload> {
    registry: RwLock<TopicRegistry<T>>,
    config: Config,
}

/// A message bus over a fixed payload type `T`.
///
/// A bus is a cheaply clonable handle: all clones share the same registry,
/// so a handle captured by an initializer or a handler observes every module
/// installed later.
///
/// # Example
///
/// ```rust,ignore
/// let bus = Bus::<String>::builder()
///     .module("shout", Manifest::new().on("format", |s: String| s.to_uppercase()))
///     .build()
///     .await?;
///
/// assert_eq!(bus.serial("format", "hi".into())?, "HI");
/// ```
pub struct Bus<T: Payload> {
    inner: Arc<BusInner<T>>,
}

impl<T: Payload> Clone for Bus<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: Payload> fmt::Debug for Bus<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bus")
            .field("topics", &self.topics())
            .finish()
    }
}

impl<T: Payload> Bus<T> {
    /// Start building a bus.
    pub fn builder() -> BusBuilder<T> {
        BusBuilder::new()
    }

    fn with_config(config: Config) -> Self {
        Self {
            inner: Arc::new(BusInner {
                registry: RwLock::new(TopicRegistry::new()),
                config,
            }),
        }
    }

    fn snapshot(&self, topic: &str) -> Option<Arc<[HookEntry<T>]>> {
        self.inner.registry.read().snapshot(topic)
    }

    /// Dispatch serially: fold the seed through every handler registered
    /// under `topic`, in registration order.
    ///
    /// An unregistered topic returns the seed unchanged. Reaching the
    /// placeholder of a module that was required but never defined fails
    /// with [`DispatchError::PluginMissing`].
    pub fn serial(&self, topic: &str, seed: T) -> Result<T, DispatchError> {
        let Some(entries) = self.snapshot(topic) else {
            return Ok(seed);
        };
        let mut data = seed;
        for entry in entries.iter() {
            match entry {
                HookEntry::Handler(handler) => data = handler.call(data),
                HookEntry::Missing(name) => {
                    return Err(DispatchError::PluginMissing(name.clone()));
                }
            }
        }
        Ok(data)
    }

    /// Dispatch to every handler under `topic`, like [`serial`](Self::serial).
    pub fn call(&self, topic: &str, seed: T) -> Result<T, DispatchError> {
        self.serial(topic, seed)
    }

    /// Dispatch to the first handler registered under `topic` only.
    ///
    /// An unregistered topic returns the seed unchanged.
    pub fn one(&self, topic: &str, seed: T) -> Result<T, DispatchError> {
        let Some(entries) = self.snapshot(topic) else {
            return Ok(seed);
        };
        match entries.first() {
            Some(HookEntry::Handler(handler)) => Ok(handler.call(seed)),
            Some(HookEntry::Missing(name)) => Err(DispatchError::PluginMissing(name.clone())),
            None => Ok(seed),
        }
    }

    /// Dispatch in fan-out: every handler under `topic` receives its own
    /// clone of the seed, and the outputs are collected in registration
    /// order.
    ///
    /// An unregistered topic yields an empty vector.
    pub fn parallel(&self, topic: &str, seed: T) -> Result<Vec<T>, DispatchError>
    where
        T: Clone,
    {
        let Some(entries) = self.snapshot(topic) else {
            return Ok(Vec::new());
        };
        let mut outputs = Vec::with_capacity(entries.len());
        for entry in entries.iter() {
            match entry {
                HookEntry::Handler(handler) => outputs.push(handler.call(seed.clone())),
                HookEntry::Missing(name) => {
                    return Err(DispatchError::PluginMissing(name.clone()));
                }
            }
        }
        Ok(outputs)
    }

    /// Resolve one more module and append its handlers to the live bus.
    ///
    /// The definition is resolved against the current registry, so an
    /// initializer added here observes everything installed before it.
    /// Existing registrations are never reordered or replaced.
    pub async fn add(
        &self,
        name: impl Into<ModuleName>,
        def: impl Into<ModuleDef<T>>,
    ) -> Result<(), ResolveError> {
        let name = name.into();
        let resolved =
            resolver::resolve(&name, def.into(), self.clone(), &self.inner.config).await?;
        #[cfg(feature = "tracing")]
        tracing::debug!(module = %name, "module added");
        self.inner.registry.write().merge(&name, resolved);
        Ok(())
    }

    /// All registered topics, in no particular order.
    pub fn topics(&self) -> Vec<Topic> {
        self.inner.registry.read().topics()
    }

    /// Whether any module registered under `topic`.
    pub fn has_topic(&self, topic: &str) -> bool {
        self.inner.registry.read().has_topic(topic)
    }

    /// Number of live handlers under `topic`.
    pub fn handler_count(&self, topic: &str) -> usize {
        self.inner.registry.read().handler_count(topic)
    }

    /// The configuration the bus was built with.
    pub fn config(&self) -> &Config {
        &self.inner.config
    }
}

/// Builder for constructing a [`Bus`].
///
/// Modules resolve concurrently in [`build`](Self::build), but their
/// handlers merge in a deterministic order: definition order, or the order
/// given by [`require`](Self::require) calls when any are present.
pub struct BusBuilder<T: Payload> {
    modules: Vec<(ModuleName, ModuleDef<T>)>,
    requires: Vec<ModuleName>,
    config: Config,
}

impl<T: Payload> Default for BusBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Payload> BusBuilder<T> {
    /// Create a new empty bus builder.
    pub fn new() -> Self {
        Self {
            modules: Vec::new(),
            requires: Vec::new(),
            config: Config::none(),
        }
    }

    /// Define a module.
    ///
    /// Defining the same name twice keeps the first definition's position
    /// and the last definition's content.
    pub fn module(mut self, name: impl Into<ModuleName>, def: impl Into<ModuleDef<T>>) -> Self {
        let name = name.into();
        let def = def.into();
        match self.modules.iter_mut().find(|(slot, _)| *slot == name) {
            Some(slot) => slot.1 = def,
            None => self.modules.push((name, def)),
        }
        self
    }

    /// Require a module by name.
    ///
    /// Any `require` call switches the builder to an explicit load list:
    /// only required names load, in require order. A required name with no
    /// matching definition still builds, but dispatching the topic equal to
    /// that name fails with [`DispatchError::PluginMissing`].
    pub fn require(mut self, name: impl Into<ModuleName>) -> Self {
        let name = name.into();
        if !self.requires.contains(&name) {
            self.requires.push(name);
        }
        self
    }

    /// Set the configuration value handed to module initializers.
    pub fn config(mut self, config: impl Into<Config>) -> Self {
        self.config = config.into();
        self
    }

    /// Resolve every selected module and build the bus.
    ///
    /// Initializers run concurrently against a bus whose registry is still
    /// empty; the merged registry installs only after the whole batch
    /// resolved. On error nothing is installed, and the error reported is
    /// the first failing module in merge order.
    pub async fn build(self) -> Result<Bus<T>, ResolveError> {
        let Self {
            modules,
            requires,
            config,
        } = self;

        let bus = Bus::with_config(config.clone());
        let selected = select(modules, requires);
        let resolved = resolver::resolve_all(selected, &bus, &config).await?;

        #[cfg(feature = "tracing")]
        tracing::debug!(modules = resolved.len(), "installing resolved modules");

        let mut registry = TopicRegistry::new();
        for (name, outcome) in resolved {
            registry.merge(&name, outcome);
        }
        *bus.inner.registry.write() = registry;
        Ok(bus)
    }
}

/// Pick which modules load and in what order.
///
/// With no requirements every defined module loads in definition order.
/// Otherwise the require list decides both membership and order, and a
/// required name with no definition selects `None`.
fn select<T: Payload>(
    modules: Vec<(ModuleName, ModuleDef<T>)>,
    requires: Vec<ModuleName>,
) -> Vec<(ModuleName, Option<ModuleDef<T>>)> {
    if requires.is_empty() {
        return modules
            .into_iter()
            .map(|(name, def)| (name, Some(def)))
            .collect();
    }

    let mut defs: HashMap<ModuleName, ModuleDef<T>> = modules.into_iter().collect();
    requires
        .into_iter()
        .map(|name| {
            let def = defs.remove(&name);
            (name, def)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::Resolved;
    use plugbus_core::Manifest;

    #[test]
    fn selection_defaults_to_definition_order() {
        let modules: Vec<(ModuleName, ModuleDef<String>)> = vec![
            ("a".into(), Manifest::new().on("t", |d: String| d).into()),
            ("b".into(), Manifest::new().on("u", |d: String| d).into()),
        ];

        let selected = select(modules, Vec::new());

        let names: Vec<_> = selected.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, ["a", "b"]);
        assert!(selected.iter().all(|(_, def)| def.is_some()));
    }

    #[test]
    fn requirements_pick_membership_and_order() {
        let modules: Vec<(ModuleName, ModuleDef<String>)> = vec![
            ("a".into(), Manifest::new().on("t", |d: String| d).into()),
            ("b".into(), Manifest::new().on("u", |d: String| d).into()),
        ];
        let requires: Vec<ModuleName> = vec!["b".into(), "ghost".into()];

        let selected = select(modules, requires);

        assert_eq!(selected.len(), 2);
        assert_eq!(selected[0].0, "b");
        assert!(selected[0].1.is_some());
        assert_eq!(selected[1].0, "ghost");
        assert!(selected[1].1.is_none());
    }

    #[test]
    fn duplicate_module_names_replace_in_place() {
        let builder = Bus::<String>::builder()
            .module("a", Manifest::new().on("first", |d: String| d))
            .module("b", Manifest::new().on("other", |d: String| d))
            .module("a", Manifest::new().on("second", |d: String| d));

        assert_eq!(builder.modules.len(), 2);
        assert_eq!(builder.modules[0].0, "a");
        let ModuleDef::Manifest(manifest) = &builder.modules[0].1 else {
            panic!("expected a literal manifest");
        };
        assert_eq!(manifest.topics().next().map(Topic::as_str), Some("second"));
    }

    #[test]
    fn debug_formatting_lists_topics() {
        let bus: Bus<String> = Bus::with_config(Config::none());
        assert_eq!(format!("{bus:?}"), "Bus { topics: [] }");

        bus.inner.registry.write().merge(
            &ModuleName::from("m"),
            Resolved::Manifest(Manifest::new().on("t", |d: String| d)),
        );
        assert_eq!(format!("{bus:?}"), r#"Bus { topics: [Topic("t")] }"#);
    }
}
