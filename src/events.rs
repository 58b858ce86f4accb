//! Input events and the process-wide handler registry
//!
//! The registry maps an event kind to an ordered list of handlers and fans a
//! dispatched event out to every handler of its kind, in registration order.
//! There is no priority and no consumption: every handler always runs.
//! Handlers may register or unregister (themselves included) mid-dispatch;
//! an entry removed mid-dispatch is not invoked afterwards, and an entry
//! added mid-dispatch first sees the next event.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use log::trace;

use crate::context::UiContext;
use crate::geometry::{Point, Size};

/// Pointer button identity. Layout only reacts to the primary button, but
/// the value is passed through to click callbacks untouched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PointerButton {
    #[default]
    Primary,
    Secondary,
    Middle,
}

/// A discrete input event supplied by the host.
#[derive(Clone, Debug)]
pub enum Event {
    PointerDown {
        position: Point,
        button: PointerButton,
    },
    PointerUp {
        position: Point,
        button: PointerButton,
    },
    PointerMove {
        position: Point,
        /// Movement since the previous pointer-move.
        delta: Point,
    },
    ViewportResize {
        size: Size,
    },
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::PointerDown { .. } => EventKind::PointerDown,
            Event::PointerUp { .. } => EventKind::PointerUp,
            Event::PointerMove { .. } => EventKind::PointerMove,
            Event::ViewportResize { .. } => EventKind::ViewportResize,
        }
    }

    /// Pointer location, if the event has one.
    pub fn position(&self) -> Option<Point> {
        match self {
            Event::PointerDown { position, .. }
            | Event::PointerUp { position, .. }
            | Event::PointerMove { position, .. } => Some(*position),
            Event::ViewportResize { .. } => None,
        }
    }
}

/// Kind tag used as the registry key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    PointerDown,
    PointerUp,
    PointerMove,
    ViewportResize,
}

/// Identifies one registered handler. Returned by
/// [`EventRegistry::register`] and consumed by [`EventRegistry::unregister`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HandlerId(u64);

type Handler = Rc<RefCell<dyn FnMut(&Event, &UiContext)>>;

struct Entry {
    id: HandlerId,
    handler: Handler,
}

#[derive(Default)]
struct Inner {
    next_id: u64,
    handlers: HashMap<EventKind, Vec<Entry>>,
}

/// Ordered fan-out dispatch of input events.
#[derive(Default)]
pub struct EventRegistry {
    inner: RefCell<Inner>,
}

impl EventRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for one event kind. Handlers for a kind run in
    /// registration order; there is no ordering across kinds.
    pub fn register(
        &self,
        kind: EventKind,
        handler: impl FnMut(&Event, &UiContext) + 'static,
    ) -> HandlerId {
        let mut inner = self.inner.borrow_mut();
        inner.next_id += 1;
        let id = HandlerId(inner.next_id);
        inner.handlers.entry(kind).or_default().push(Entry {
            id,
            handler: Rc::new(RefCell::new(handler)),
        });
        trace!("registered handler {id:?} for {kind:?}");
        id
    }

    /// Remove a handler from every kind it was registered for.
    pub fn unregister(&self, id: HandlerId) {
        let mut inner = self.inner.borrow_mut();
        for entries in inner.handlers.values_mut() {
            entries.retain(|entry| entry.id != id);
        }
    }

    /// Number of handlers currently registered for a kind.
    pub fn handler_count(&self, kind: EventKind) -> usize {
        self.inner
            .borrow()
            .handlers
            .get(&kind)
            .map_or(0, Vec::len)
    }

    /// Invoke every handler registered for the event's kind, in registration
    /// order. Runs each handler to completion before the next; handlers may
    /// mutate the registry re-entrantly.
    pub fn dispatch(&self, event: &Event, ctx: &UiContext) {
        let snapshot: Vec<(HandlerId, Handler)> = {
            let inner = self.inner.borrow();
            inner
                .handlers
                .get(&event.kind())
                .map(|entries| {
                    entries
                        .iter()
                        .map(|entry| (entry.id, Rc::clone(&entry.handler)))
                        .collect()
                })
                .unwrap_or_default()
        };

        for (id, handler) in snapshot {
            if !self.is_registered(id, event.kind()) {
                continue;
            }
            (&mut *handler.borrow_mut())(event, ctx);
        }
    }

    fn is_registered(&self, id: HandlerId, kind: EventKind) -> bool {
        self.inner
            .borrow()
            .handlers
            .get(&kind)
            .is_some_and(|entries| entries.iter().any(|entry| entry.id == id))
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;

    fn pointer_down(x: i32, y: i32) -> Event {
        Event::PointerDown {
            position: Point::new(x, y),
            button: PointerButton::Primary,
        }
    }

    #[test]
    fn test_dispatch_runs_handlers_in_registration_order() {
        let ctx = UiContext::default();
        let order = Rc::new(RefCell::new(Vec::new()));

        for tag in ["first", "second", "third"] {
            let order = Rc::clone(&order);
            ctx.events()
                .register(EventKind::PointerDown, move |_, _| {
                    order.borrow_mut().push(tag);
                });
        }

        ctx.dispatch(&pointer_down(0, 0));
        assert_eq!(*order.borrow(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_dispatch_only_reaches_matching_kind() {
        let ctx = UiContext::default();
        let hits = Rc::new(RefCell::new(0));

        let hits_clone = Rc::clone(&hits);
        ctx.events().register(EventKind::PointerUp, move |_, _| {
            *hits_clone.borrow_mut() += 1;
        });

        ctx.dispatch(&pointer_down(0, 0));
        assert_eq!(*hits.borrow(), 0);

        ctx.dispatch(&Event::PointerUp {
            position: Point::ZERO,
            button: PointerButton::Primary,
        });
        assert_eq!(*hits.borrow(), 1);
    }

    #[test]
    fn test_unregister_removes_from_all_kinds() {
        let ctx = UiContext::default();
        let hits = Rc::new(RefCell::new(0));

        let hits_down = Rc::clone(&hits);
        let id = ctx.events().register(EventKind::PointerDown, move |_, _| {
            *hits_down.borrow_mut() += 1;
        });
        assert_eq!(ctx.events().handler_count(EventKind::PointerDown), 1);

        ctx.events().unregister(id);
        assert_eq!(ctx.events().handler_count(EventKind::PointerDown), 0);

        ctx.dispatch(&pointer_down(0, 0));
        assert_eq!(*hits.borrow(), 0);
    }

    #[test]
    fn test_handler_removed_mid_dispatch_is_skipped() {
        let ctx = UiContext::default();
        let removed_ran = Rc::new(RefCell::new(false));

        // First handler unregisters the second before it runs.
        let victim_slot = Rc::new(RefCell::new(None));
        let slot = Rc::clone(&victim_slot);
        ctx.events().register(EventKind::PointerDown, move |_, ctx| {
            if let Some(id) = *slot.borrow() {
                ctx.events().unregister(id);
            }
        });

        let flag = Rc::clone(&removed_ran);
        let victim = ctx.events().register(EventKind::PointerDown, move |_, _| {
            *flag.borrow_mut() = true;
        });
        *victim_slot.borrow_mut() = Some(victim);

        ctx.dispatch(&pointer_down(0, 0));
        assert!(!*removed_ran.borrow());
    }
}
