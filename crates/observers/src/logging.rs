use polysulfide_core::Observer;
use tracing::debug;

use crate::traits::HasResidual;

/// Logs the residual of every event at `DEBUG` level and never acts.
///
/// Events are numbered from zero in the order they arrive. The `label`
/// distinguishes observers when several log to the same subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TracingObserver {
    label: &'static str,
    events: usize,
}

impl TracingObserver {
    #[must_use]
    pub fn new(label: &'static str) -> Self {
        Self { label, events: 0 }
    }

    /// Number of events observed so far.
    #[must_use]
    pub fn events(&self) -> usize {
        self.events
    }
}

impl<E: HasResidual, A> Observer<E, A> for TracingObserver {
    fn observe(&mut self, event: &E) -> Option<A> {
        debug!(
            observer = self.label,
            event = self.events,
            residual = event.residual(),
            "observed event"
        );
        self.events += 1;
        None
    }
}

impl<E: HasResidual, A> Observer<E, A> for &mut TracingObserver {
    fn observe(&mut self, event: &E) -> Option<A> {
        (**self).observe(event)
    }
}
