//! Dispatcher port: what emission sites call after a triggering write.

use std::future::Future;

use careops_domain::automation::{EventContext, Trigger};

/// Runs every matching automation rule for a trigger.
///
/// Completion carries no result: per-rule failures are handled (logged)
/// inside the dispatcher and never reach the caller.
pub trait Dispatcher {
    fn dispatch(&self, trigger: Trigger, context: EventContext) -> impl Future<Output = ()> + Send;
}

impl<T: Dispatcher + Send + Sync> Dispatcher for std::sync::Arc<T> {
    fn dispatch(&self, trigger: Trigger, context: EventContext) -> impl Future<Output = ()> + Send {
        (**self).dispatch(trigger, context)
    }
}
