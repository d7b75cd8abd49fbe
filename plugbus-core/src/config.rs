//! Opaque configuration passed to module initializers.

use serde_json::Value;
use std::sync::Arc;

/// An opaque configuration value, shared across one bus.
///
/// The bus never interprets configuration beyond the per-module slicing
/// rule: when the underlying value is a JSON object that owns a key equal to
/// a module's name, that sub-value is the module's slice; otherwise the
/// module receives the whole value. There is no deep merge. Presence of the
/// key decides, not its contents: an explicit `null` under a module's name
/// is that module's slice.
///
/// Cloning is O(1); the value is behind an `Arc`.
#[derive(Clone, Debug)]
pub struct Config(Arc<Value>);

impl Config {
    /// Wrap a configuration value.
    pub fn new(value: Value) -> Self {
        Self(Arc::new(value))
    }

    /// The empty configuration (`null`).
    pub fn none() -> Self {
        Self::new(Value::Null)
    }

    /// The underlying value.
    pub fn value(&self) -> &Value {
        &self.0
    }

    /// Look a key up, when the underlying value is an object.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// The slice an initializer for `name` receives.
    pub fn for_module(&self, name: &str) -> Config {
        match self.0.as_object().and_then(|map| map.get(name)) {
            Some(slice) => Self::new(slice.clone()),
            None => self.clone(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::none()
    }
}

impl From<Value> for Config {
    fn from(value: Value) -> Self {
        Self::new(value)
    }
}
