//! Button widget - a single-child wrapper with pointer callbacks
//!
//! The button wraps any widget, adopts its size, and reacts to pointer
//! events delivered through the event registry: a pointer-down inside its
//! rect fires `on_click`, and pointer-moves crossing its boundary fire
//! `on_hover` edges. Registry handlers hold a weak reference to the shared
//! hit state, so a dropped button simply stops reacting.

use std::cell::RefCell;
use std::rc::Rc;

use crate::context::UiContext;
use crate::error::LayoutError;
use crate::events::{Event, EventKind, HandlerId};
use crate::geometry::{Point, Rect, Size};
use crate::widget::{Widget, WidgetCore};

type ClickCallback = Box<dyn FnMut(&Event)>;
type HoverCallback = Box<dyn FnMut(bool)>;

/// Hit state shared between the tree node and the registry handlers.
struct HitState {
    rect: Rect,
    hovered: bool,
    on_click: Option<ClickCallback>,
    on_hover: Option<HoverCallback>,
}

impl HitState {
    fn pointer_down(&mut self, event: &Event) {
        let Some(position) = event.position() else {
            return;
        };
        if self.rect.contains(position) {
            if let Some(callback) = self.on_click.as_mut() {
                callback(event);
            }
        }
    }

    fn pointer_move(&mut self, event: &Event) {
        let Some(position) = event.position() else {
            return;
        };
        let inside = self.rect.contains(position);
        if inside != self.hovered {
            if let Some(callback) = self.on_hover.as_mut() {
                callback(inside);
            }
        }
        self.hovered = inside;
    }
}

/// Single-child wrapper firing callbacks on pointer input.
pub struct Button {
    core: WidgetCore,
    children: Vec<Box<dyn Widget>>,
    state: Rc<RefCell<HitState>>,
    handlers: Vec<HandlerId>,
}

impl Button {
    /// Registers for pointer-down and pointer-move at construction.
    pub fn new(mut child: Box<dyn Widget>, ctx: &UiContext) -> Result<Self, LayoutError> {
        let core = WidgetCore::new();
        child.set_parent(core.id())?;

        let state = Rc::new(RefCell::new(HitState {
            rect: Rect::ZERO,
            hovered: false,
            on_click: None,
            on_hover: None,
        }));

        let weak = Rc::downgrade(&state);
        let down = ctx
            .events()
            .register(EventKind::PointerDown, move |event, _ctx| {
                if let Some(state) = weak.upgrade() {
                    state.borrow_mut().pointer_down(event);
                }
            });

        let weak = Rc::downgrade(&state);
        let moved = ctx
            .events()
            .register(EventKind::PointerMove, move |event, _ctx| {
                if let Some(state) = weak.upgrade() {
                    state.borrow_mut().pointer_move(event);
                }
            });

        Ok(Self {
            core,
            children: vec![child],
            state,
            handlers: vec![down, moved],
        })
    }

    pub fn with_on_click(self, callback: impl FnMut(&Event) + 'static) -> Self {
        self.state.borrow_mut().on_click = Some(Box::new(callback));
        self
    }

    pub fn with_on_hover(self, callback: impl FnMut(bool) + 'static) -> Self {
        self.state.borrow_mut().on_hover = Some(Box::new(callback));
        self
    }

    /// Remove this button's registry subscriptions.
    pub fn detach(&mut self, ctx: &UiContext) {
        for id in self.handlers.drain(..) {
            ctx.events().unregister(id);
        }
    }

    pub fn is_hovered(&self) -> bool {
        self.state.borrow().hovered
    }

    fn child_mut(&mut self) -> &mut Box<dyn Widget> {
        &mut self.children[0]
    }
}

impl Widget for Button {
    fn core(&self) -> &WidgetCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut WidgetCore {
        &mut self.core
    }

    fn children(&self) -> &[Box<dyn Widget>] {
        &self.children
    }

    fn children_mut(&mut self) -> &mut [Box<dyn Widget>] {
        &mut self.children
    }

    fn measure(&mut self, max: Size, ctx: &UiContext) -> Size {
        self.child_mut().calculate_size(max, ctx)
    }

    fn place(&mut self, origin: Point, ctx: &UiContext) {
        self.child_mut().set_placement(origin, ctx);
        // Keep the registry-visible hit rect in sync with the placed rect.
        self.state.borrow_mut().rect = self.core.rect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::PointerButton;
    use crate::widget::testing::Probe;

    fn pointer_down(x: i32, y: i32) -> Event {
        Event::PointerDown {
            position: Point::new(x, y),
            button: PointerButton::Primary,
        }
    }

    fn pointer_move(x: i32, y: i32) -> Event {
        Event::PointerMove {
            position: Point::new(x, y),
            delta: Point::ZERO,
        }
    }

    fn clicked_button(ctx: &UiContext) -> (Button, Rc<RefCell<u32>>) {
        let clicks = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&clicks);
        let button = Button::new(Box::new(Probe::fixed(40, 20)), ctx)
            .unwrap()
            .with_on_click(move |_| *counter.borrow_mut() += 1);
        (button, clicks)
    }

    #[test]
    fn test_click_inside_fires_callback() {
        let ctx = UiContext::default();
        let (button, clicks) = clicked_button(&ctx);
        let mut button = button.with_rect(Rect::new(10, 10, 100, 100));
        button.update(&ctx);

        ctx.dispatch(&pointer_down(20, 15));
        assert_eq!(*clicks.borrow(), 1);

        ctx.dispatch(&pointer_down(200, 200));
        assert_eq!(*clicks.borrow(), 1);
    }

    #[test]
    fn test_hover_fires_on_edges_only() {
        let ctx = UiContext::default();
        let edges = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&edges);
        let mut button = Button::new(Box::new(Probe::fixed(40, 20)), &ctx)
            .unwrap()
            .with_on_hover(move |inside| log.borrow_mut().push(inside))
            .with_rect(Rect::new(0, 0, 100, 100));
        button.update(&ctx);

        ctx.dispatch(&pointer_move(5, 5));
        ctx.dispatch(&pointer_move(10, 10));
        ctx.dispatch(&pointer_move(200, 10));

        assert_eq!(*edges.borrow(), vec![true, false]);
    }

    #[test]
    fn test_adopts_child_size() {
        let ctx = UiContext::default();
        let mut button = Button::new(Box::new(Probe::fixed(40, 20)), &ctx)
            .unwrap()
            .with_rect(Rect::new(0, 0, 100, 100));
        button.update(&ctx);

        assert_eq!(button.core().rect().size(), Size::new(40, 20));
    }

    #[test]
    fn test_detach_stops_callbacks() {
        let ctx = UiContext::default();
        let (button, clicks) = clicked_button(&ctx);
        let mut button = button.with_rect(Rect::new(0, 0, 100, 100));
        button.update(&ctx);

        button.detach(&ctx);
        ctx.dispatch(&pointer_down(5, 5));

        assert_eq!(*clicks.borrow(), 0);
        assert_eq!(ctx.events().handler_count(EventKind::PointerDown), 0);
    }
}
