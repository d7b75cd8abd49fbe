//! # plugbus - In-Process Plugin Registry and Message Bus
//!
//! `plugbus` assembles a set of named modules into a message bus. Each
//! module contributes handlers under topic names; dispatching a topic folds
//! a payload through its handlers (serial), invokes just the first (one), or
//! fans the payload out to all of them (parallel).
//!
//! Module sets are open: a module can be a literal [`Manifest`] or an async
//! initializer that inspects its configuration slice and decides what to
//! register, and more modules can join a live bus via [`Bus::add`].
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use plugbus::{Bus, Manifest};
//!
//! let bus = Bus::<String>::builder()
//!     .module("exclaim", Manifest::new().on("format", |s: String| format!("{s}!")))
//!     .module("shout", Manifest::new().on("format", |s: String| s.to_uppercase()))
//!     .build()
//!     .await?;
//!
//! // Handlers fold in registration order.
//! assert_eq!(bus.serial("format", "hi".into())?, "HI!");
//! ```

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod bus;
mod module;
mod registry;
mod resolver;

pub mod testing;

pub use bus::{Bus, BusBuilder};
pub use module::{InitFn, InitFuture, ModuleDef};

pub use plugbus_core::{
    // Errors
    BoxError,
    BusError,
    // Configuration
    Config,
    DispatchError,
    // Core traits
    Handler,
    // Registration
    Manifest,
    ModuleName,
    Payload,
    ResolveError,
    Topic,
};

/// Prelude module - common imports for plugbus.
///
/// # Usage
///
/// ```rust,ignore
/// use plugbus::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        Bus, BusBuilder, Config, Handler, Manifest, ModuleDef, ModuleName, Payload, Topic,
    };
}
