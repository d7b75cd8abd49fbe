//! Resolution of module definitions into manifests.
//!
//! Resolution is the first of the two bus phases: every definition in a
//! batch is turned into a [`Resolved`] outcome concurrently, and only a
//! fully resolved batch is handed to the registry for merging.

use crate::bus::Bus;
use crate::module::ModuleDef;
use futures::future::join_all;
use plugbus_core::{Config, Manifest, ModuleName, Payload, ResolveError};

/// Outcome of resolving one module definition.
pub(crate) enum Resolved<T: Payload> {
    /// The module produced a manifest to merge.
    Manifest(Manifest<T>),
    /// The module declined to register anything.
    Declined,
    /// The module was required by name but never defined.
    Missing,
}

/// Resolve a single definition.
///
/// A literal manifest is taken verbatim. An initializer runs with the bus
/// handle and the configuration slice selected for `name`; its error is
/// wrapped with the module name and aborts the caller's batch.
pub(crate) async fn resolve<T: Payload>(
    name: &ModuleName,
    def: ModuleDef<T>,
    bus: Bus<T>,
    config: &Config,
) -> Result<Resolved<T>, ResolveError> {
    match def {
        ModuleDef::Manifest(manifest) => Ok(Resolved::Manifest(manifest)),
        ModuleDef::Init(init) => {
            let slice = config.for_module(name.as_str());
            match init(bus, slice).await {
                Ok(Some(manifest)) => Ok(Resolved::Manifest(manifest)),
                Ok(None) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(module = %name, "module declined to register");
                    Ok(Resolved::Declined)
                }
                Err(source) => Err(ResolveError::Init {
                    module: name.clone(),
                    source,
                }),
            }
        }
    }
}

/// Resolve one batch slot: a definition, or a requirement nobody defined.
async fn resolve_slot<T: Payload>(
    name: ModuleName,
    def: Option<ModuleDef<T>>,
    bus: Bus<T>,
    config: Config,
) -> Result<(ModuleName, Resolved<T>), ResolveError> {
    match def {
        Some(def) => {
            let resolved = resolve(&name, def, bus, &config).await?;
            Ok((name, resolved))
        }
        None => {
            #[cfg(feature = "tracing")]
            tracing::warn!(module = %name, "required module is not defined");
            Ok((name, Resolved::Missing))
        }
    }
}

/// Resolve a whole batch concurrently.
///
/// A `None` definition marks a name that was required but never defined; it
/// resolves to [`Resolved::Missing`] rather than failing, so the error
/// surfaces only when the matching topic is dispatched.
///
/// Outcomes are returned in input order regardless of completion order, and
/// on failure the error reported is the first failing module in that order.
pub(crate) async fn resolve_all<T: Payload>(
    defs: Vec<(ModuleName, Option<ModuleDef<T>>)>,
    bus: &Bus<T>,
    config: &Config,
) -> Result<Vec<(ModuleName, Resolved<T>)>, ResolveError> {
    let futures: Vec<_> = defs
        .into_iter()
        .map(|(name, def)| resolve_slot(name, def, bus.clone(), config.clone()))
        .collect();

    let results = join_all(futures).await;

    let mut resolved = Vec::with_capacity(results.len());
    for result in results {
        resolved.push(result?);
    }
    Ok(resolved)
}
