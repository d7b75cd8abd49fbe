//! # plugbus-core
//!
//! Core types for the plugbus plugin registry and message bus.
//!
//! This crate has minimal dependencies and is designed to be imported by
//! modules and extensions that don't need the full `plugbus` engine.
//!
//! # Two-Phase Model
//!
//! plugbus splits a plugin system into two phases, and this crate carries the
//! vocabulary both of them share:
//!
//! ## Phase 1: Resolution
//!
//! Modules describe themselves with a [`Manifest`]: an ordered mapping from
//! topic names to handlers. A manifest can be written down literally or
//! produced by an initializer that runs against the bus and a [`Config`]
//! slice. Resolution turns a batch of module definitions into manifests.
//!
//! - **Declarative**: A manifest is data, inspectable before installation
//! - **Ordered**: Entry order inside a manifest is preserved verbatim
//! - **Optional**: An initializer may decline, contributing nothing
//!
//! ## Phase 2: Dispatch
//!
//! Installed handlers are plain synchronous functions over a payload type.
//! The [`Handler`] trait is the whole contract: take the payload, give one
//! back. Handlers are infallible by construction; a fallible pipeline picks
//! `T = Result<..>` and folds over it.
//!
//! - **Uniform**: Every handler on a bus shares one payload type `T`
//! - **Composable**: Serial dispatch is a left fold, parallel is a map
//! - **Plain**: The contract hands a handler no bus or registry access
//!
//! # Error Types
//!
//! - [`BusError`] - Top-level error type
//! - [`DispatchError`] - Dispatch-time errors
//! - [`ResolveError`] - Initializer failures

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod config;
mod error;
mod handler;
mod manifest;
mod payload;
mod topic;

// Re-exports
pub use config::Config;
pub use error::{BoxError, BusError, DispatchError, ResolveError};
pub use handler::Handler;
pub use manifest::Manifest;
pub use payload::Payload;
pub use topic::{ModuleName, Topic};
