//! Module definitions.
//!
//! A module is registered under a name and describes itself in one of two
//! forms: a literal [`Manifest`] taken as-is, or an initializer that runs
//! against the bus and a configuration slice and produces a manifest (or
//! declines).

use crate::bus::Bus;
use plugbus_core::{BoxError, Config, Manifest, Payload};
use std::fmt;
use std::future::Future;
use std::pin::Pin;

/// Future returned by a module initializer.
pub type InitFuture<T> =
    Pin<Box<dyn Future<Output = Result<Option<Manifest<T>>, BoxError>> + Send>>;

/// A boxed module initializer.
///
/// Invoked at most once, with a handle to the bus being assembled and the
/// configuration slice selected for this module.
pub type InitFn<T> = Box<dyn FnOnce(Bus<T>, Config) -> InitFuture<T> + Send>;

/// A module definition: either a literal manifest or an initializer that
/// produces one.
///
/// The initializer form returns `Ok(Some(manifest))` to register handlers,
/// `Ok(None)` to decline (the module contributes nothing), or `Err` to abort
/// the batch it was resolved in.
///
/// The bus handle passed to an initializer is live: during
/// [`BusBuilder::build`](crate::BusBuilder::build) its registry is still
/// empty, so dispatching from inside an initializer yields only the
/// identity/empty fallbacks, while during [`Bus::add`] the handle carries
/// everything already installed. Handlers that capture the handle see the
/// finished registry once construction completes.
pub enum ModuleDef<T: Payload> {
    /// A manifest used verbatim, without running any module code.
    Manifest(Manifest<T>),
    /// An initializer invoked with the bus and this module's config slice.
    Init(InitFn<T>),
}

impl<T: Payload> ModuleDef<T> {
    /// Define a module by a literal manifest.
    pub fn manifest(manifest: Manifest<T>) -> Self {
        Self::Manifest(manifest)
    }

    /// Define a module by an initializer.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let def = ModuleDef::init(|_bus, config| async move {
    ///     if config.get("enabled") == Some(&serde_json::Value::Bool(false)) {
    ///         return Ok(None);
    ///     }
    ///     Ok(Some(Manifest::new().on("greet", |s: String| format!("{s}!"))))
    /// });
    /// ```
    pub fn init<F, Fut>(f: F) -> Self
    where
        F: FnOnce(Bus<T>, Config) -> Fut + Send + 'static,
        Fut: Future<Output = Result<Option<Manifest<T>>, BoxError>> + Send + 'static,
    {
        Self::Init(Box::new(move |bus, config| Box::pin(f(bus, config))))
    }
}

impl<T: Payload> From<Manifest<T>> for ModuleDef<T> {
    fn from(manifest: Manifest<T>) -> Self {
        Self::Manifest(manifest)
    }
}

impl<T: Payload> fmt::Debug for ModuleDef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Manifest(manifest) => f.debug_tuple("Manifest").field(manifest).finish(),
            Self::Init(_) => f.write_str("Init(..)"),
        }
    }
}
