//! Payload trait for the values a bus carries.

/// A marker trait for the value type flowing through a bus.
///
/// Payloads must be `Send + Sync + 'static` so handler lists can be shared
/// across threads.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Clone)]
/// struct Document { body: String }
///
/// impl Payload for Document {}
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a valid Payload",
    label = "must be `Send + Sync + 'static`",
    note = "All values carried by a bus must be thread-safe and static."
)]
pub trait Payload: Send + Sync + 'static {}

// Common Payload implementations
impl Payload for () {}
impl Payload for String {}
impl Payload for &'static str {}
impl Payload for serde_json::Value {}
impl<T: Payload> Payload for Box<T> {}
impl<T: Payload> Payload for std::sync::Arc<T> {}
impl<T: Payload> Payload for Vec<T> {}
impl<T: Payload> Payload for Option<T> {}
impl<T: Payload, E: Payload> Payload for Result<T, E> {}
