//! In-process publish/subscribe bus.
//!
//! The bus is a cheap, cloneable handle. Every component that needs it gets
//! one passed in explicitly; there is no process-wide instance.
//!
//! Delivery is synchronous. A listener may publish while it is handling an
//! event; such nested events are appended to a FIFO queue that the
//! outermost [`EventBus::publish`] call drains before returning. Each event
//! reaches every listener before the next queued event starts.

use crate::event::Event;
use derive_more::{Display, Error};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use tracing::{debug, instrument, trace, warn};

/// Something that wants to hear about bus traffic.
///
/// Listeners receive every event and ignore the variants they do not
/// care about.
pub trait Listener {
    /// Name used in log output.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Handles one event.
    ///
    /// An error is logged by the bus and does not stop delivery to the
    /// remaining listeners.
    fn process_event(&self, event: &Event) -> Result<(), ListenerError>;
}

impl<F> Listener for F
where
    F: Fn(&Event) -> Result<(), ListenerError>,
{
    fn process_event(&self, event: &Event) -> Result<(), ListenerError> {
        self(event)
    }
}

/// A listener failed to handle an event.
#[derive(Debug, Clone, Display, Error)]
#[display("Listener error: {} at {}:{}", message, file, line)]
pub struct ListenerError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ListenerError {
    /// Creates a new listener error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[derive(Default)]
struct BusInner {
    listeners: RefCell<Vec<Rc<dyn Listener>>>,
    queue: RefCell<VecDeque<Event>>,
    draining: Cell<bool>,
}

/// Handle to a shared publish/subscribe channel.
#[derive(Clone, Default)]
pub struct EventBus {
    inner: Rc<BusInner>,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listener_count())
            .field("queued", &self.inner.queue.borrow().len())
            .field("draining", &self.inner.draining.get())
            .finish()
    }
}

/// Clears the draining flag even if a listener panics.
struct DrainGuard<'a> {
    inner: &'a BusInner,
}

impl<'a> DrainGuard<'a> {
    fn enter(inner: &'a BusInner) -> Self {
        inner.draining.set(true);
        Self { inner }
    }
}

impl Drop for DrainGuard<'_> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            self.inner.queue.borrow_mut().clear();
        }
        self.inner.draining.set(false);
    }
}

impl EventBus {
    /// Creates a bus with no listeners.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `listener` for every future event.
    ///
    /// Listeners are called in registration order. A listener added while
    /// an event is being delivered starts with the next event.
    #[instrument(skip(self, listener), fields(listener = listener.name()))]
    pub fn subscribe(&self, listener: Rc<dyn Listener>) {
        let mut listeners = self.inner.listeners.borrow_mut();
        listeners.push(listener);
        debug!(count = listeners.len(), "Listener subscribed");
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    /// Delivers `event` to every listener.
    ///
    /// When called from inside a listener the event is queued and this
    /// returns immediately; the outer call delivers it. Returns the number
    /// of listener failures seen while draining (always 0 for a nested
    /// call).
    #[instrument(skip(self), fields(kind = event.kind()))]
    pub fn publish(&self, event: Event) -> usize {
        self.inner.queue.borrow_mut().push_back(event);
        if self.inner.draining.get() {
            trace!("Queued nested event");
            return 0;
        }

        let _guard = DrainGuard::enter(&self.inner);
        let mut failures = 0;
        while let Some(event) = self.next_queued() {
            failures += self.deliver(&event);
        }
        failures
    }

    fn next_queued(&self) -> Option<Event> {
        self.inner.queue.borrow_mut().pop_front()
    }

    fn deliver(&self, event: &Event) -> usize {
        // Snapshot so listeners may subscribe others mid-delivery.
        let listeners: Vec<Rc<dyn Listener>> = self.inner.listeners.borrow().clone();
        trace!(%event, listeners = listeners.len(), "Delivering event");

        let mut failures = 0;
        for listener in &listeners {
            if let Err(error) = listener.process_event(event) {
                failures += 1;
                warn!(
                    listener = listener.name(),
                    kind = event.kind(),
                    %error,
                    "Listener failed to handle event"
                );
            }
        }
        failures
    }
}
