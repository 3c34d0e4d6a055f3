//! # Task Trait
//!
//! A `Task` is one unit of deferred work. It is queued by value, taken off the
//! queue by the [`TaskManager`](super::TaskManager) when its pacing slot comes
//! up, and then processed against a context the caller supplies.
//!
//! Tasks own their inputs and hold no references, so a queued task never pins
//! the state it will eventually mutate.

/// A unit of deferred work.
pub trait Task {
    /// State the task operates on.
    type Context;
    /// What processing yields.
    type Output;

    /// Consumes the task and performs its work on `context`.
    fn process(self, context: &mut Self::Context) -> Self::Output;
}
