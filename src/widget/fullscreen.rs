//! Fullscreen widget - a root bound to the host viewport
//!
//! Its rect tracks the viewport: constructed at the current viewport size
//! and, once connected, resized by [`Event::ViewportResize`] dispatches,
//! which mark both layout phases dirty. It refuses parenting outright; a
//! fullscreen node under a container is a usage error, never silent.

use std::cell::RefCell;
use std::rc::Rc;

use log::debug;

use crate::context::UiContext;
use crate::error::LayoutError;
use crate::events::{Event, EventKind, HandlerId};
use crate::geometry::{Point, Rect, Size};
use crate::widget::{Dirty, Widget, WidgetCore, WidgetId};

/// Root container filling the host viewport.
pub struct Fullscreen {
    core: WidgetCore,
    children: Vec<Box<dyn Widget>>,
    handler: Option<HandlerId>,
}

impl Fullscreen {
    /// Builds the root at the context's current viewport size.
    pub fn new(mut child: Box<dyn Widget>, ctx: &UiContext) -> Result<Self, LayoutError> {
        let core = WidgetCore::with_parts(
            None,
            Some(Rect::from_parts(Point::ZERO, ctx.viewport())),
        );
        child.set_parent(core.id())?;
        Ok(Self {
            core,
            children: vec![child],
            handler: None,
        })
    }

    /// Subscribe to viewport resizes. The shared handle lets the registry
    /// reach the root directly; hosts keep updating it through the cell.
    pub fn connect(this: &Rc<RefCell<Self>>, ctx: &UiContext) {
        let weak = Rc::downgrade(this);
        let id = ctx
            .events()
            .register(EventKind::ViewportResize, move |event, _ctx| {
                let Event::ViewportResize { size } = event else {
                    return;
                };
                if let Some(fullscreen) = weak.upgrade() {
                    fullscreen.borrow_mut().handle_viewport_resize(*size);
                }
            });
        this.borrow_mut().handler = Some(id);
    }

    /// Drop the resize subscription.
    pub fn disconnect(&mut self, ctx: &UiContext) {
        if let Some(id) = self.handler.take() {
            ctx.events().unregister(id);
        }
    }

    fn handle_viewport_resize(&mut self, size: Size) {
        debug!("fullscreen root resized to {}x{}", size.width, size.height);
        self.core.rect_mut().set_size(size);
        self.core.mark(Dirty::RECALCULATE | Dirty::REPOSITION);
    }

    fn child_mut(&mut self) -> &mut Box<dyn Widget> {
        &mut self.children[0]
    }
}

impl Widget for Fullscreen {
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

    fn set_parent(&mut self, _parent: WidgetId) -> Result<(), LayoutError> {
        Err(LayoutError::FullscreenAttached)
    }

    fn measure(&mut self, max: Size, ctx: &UiContext) -> Size {
        self.child_mut().calculate_size(max, ctx);
        max
    }

    fn place(&mut self, origin: Point, ctx: &UiContext) {
        self.child_mut().set_placement(origin, ctx);
    }
}
