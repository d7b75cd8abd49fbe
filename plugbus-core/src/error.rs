//! Error types for plugbus.
//!
//! - [`DispatchError`] - the single dispatch-time error kind
//! - [`ResolveError`] - construction-time initializer failures
//! - [`BusError`] - umbrella over both phases
//!
//! Absence is not an error: a topic nobody registered degrades to the
//! identity/empty fallback, and a module declining to register contributes
//! nothing. Only a name-only requirement that was never defined produces an
//! error, and it does so lazily, at dispatch time.

use crate::topic::ModuleName;
use thiserror::Error;

/// A boxed error type for failures raised by user-supplied initializers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error type for all bus operations.
#[derive(Error, Debug)]
pub enum BusError {
    /// An error occurred while dispatching a topic.
    #[error("dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    /// An error occurred while resolving module definitions.
    #[error("resolve error: {0}")]
    Resolve(#[from] ResolveError),
}

/// Errors raised by `serial`/`one`/`parallel`.
///
/// Raised lazily: constructing a bus over a missing requirement succeeds,
/// and the error surfaces only from a dispatch call that actually reaches
/// the placeholder entry. It propagates out of that call and is never caught
/// or retried internally.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// The dispatched topic is registered only by a module that was
    /// required by name but never defined.
    #[error("plugin {0} is missing")]
    PluginMissing(ModuleName),
}

/// Errors raised while resolving module definitions in `build`/`add`.
///
/// A failed resolution aborts its whole batch: no partial registry is
/// installed.
#[derive(Error, Debug)]
pub enum ResolveError {
    /// A module's initializer returned an error.
    #[error("module {module} failed to initialize")]
    Init {
        /// The module whose initializer failed.
        module: ModuleName,
        /// The initializer's own error.
        #[source]
        source: BoxError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn dispatch_error_converts_into_bus_error() {
        let err = BusError::from(DispatchError::PluginMissing(ModuleName::from("ghost")));
        assert_eq!(err.to_string(), "dispatch error: plugin ghost is missing");
        assert!(matches!(err, BusError::Dispatch(_)));
    }

    #[test]
    fn resolve_error_converts_into_bus_error() {
        let err = BusError::from(ResolveError::Init {
            module: ModuleName::from("broken"),
            source: "boom".into(),
        });
        assert_eq!(
            err.to_string(),
            "resolve error: module broken failed to initialize"
        );
        assert!(matches!(err, BusError::Resolve(_)));
    }

    #[test]
    fn bus_error_keeps_the_source_chain() {
        let err = BusError::from(ResolveError::Init {
            module: ModuleName::from("broken"),
            source: "boom".into(),
        });

        let resolve = err.source().expect("wrapped phase error should be attached");
        let init = resolve.source().expect("initializer error should be attached");
        assert_eq!(init.to_string(), "boom");
    }
}
