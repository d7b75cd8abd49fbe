//! The handler contract modules register for topics.
//!
//! A handler is a unary transformation over the bus payload. The dispatcher
//! never inspects or awaits a handler's result: if a topic's handlers
//! produce pending values, the payload type itself is future-shaped and
//! awaiting is the caller's responsibility.

use crate::payload::Payload;

/// A single-argument transformation contributed by a module for a topic.
///
/// Serial dispatch feeds each handler's output to the next; parallel
/// dispatch hands every handler its own copy of the seed. Handlers are
/// infallible by contract. A module that wants fallible handlers picks a
/// `Result` payload type and the bus chains it opaquely like any other
/// value.
///
/// Closures implement this automatically:
///
/// ```rust,ignore
/// let manifest = Manifest::new().on("greet", |data: String| format!("{data}!"));
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `Handler<{T}>`",
    label = "missing `Handler` implementation",
    note = "Handlers must implement `call` for the payload type `{T}`, \
            or be a `Fn({T}) -> {T}` closure."
)]
pub trait Handler<T: Payload>: Send + Sync + 'static {
    /// Transform one payload value.
    fn call(&self, data: T) -> T;
}

// Blanket implementation: any compatible closure is a handler.
impl<T, F> Handler<T> for F
where
    T: Payload,
    F: Fn(T) -> T + Send + Sync + 'static,
{
    fn call(&self, data: T) -> T {
        (self)(data)
    }
}

// Allow an already-erased handler to be registered where Handler is expected.
impl<T: Payload> Handler<T> for std::sync::Arc<dyn Handler<T>> {
    fn call(&self, data: T) -> T {
        self.as_ref().call(data)
    }
}
