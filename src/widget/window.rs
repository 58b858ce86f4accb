//! Floating window widget and its desktop host
//!
//! A window bundles chrome (title bar, minimize/close buttons, resizable
//! borders) around an independently-managed child subtree. Pointer input
//! arrives through the event registry, so a window reacts regardless of
//! where it sits in draw order; a process-wide grab lock on the context
//! keeps simultaneous title-bar drags down to one window.
//!
//! The child subtree is laid out in window-local coordinates and composed
//! into the window's drawable as a blit.

use std::cell::RefCell;
use std::rc::Rc;

use log::debug;

use crate::context::UiContext;
use crate::drawable::{DrawOp, Drawable, IconKind};
use crate::error::LayoutError;
use crate::events::{Event, EventKind, HandlerId};
use crate::fill::Color;
use crate::geometry::{Point, Rect, Side, Size};
use crate::widget::{collect_scene, Dirty, Widget, WidgetCore};

/// Hit slop around border rects, in pixels to each side.
const RESIZE_RECT_TOLERANCE: i32 = 2;
/// Vertical gap above and below the title text.
const TITLE_OFFSET: i32 = 2;
const BORDER_THICKNESS: i32 = 1;
/// Button edge length as a share of the title-bar height.
const BUTTON_WIDTH_FACTOR: f32 = 0.4;

/// Window chrome colors.
#[derive(Clone, Debug)]
pub struct WindowStyle {
    pub title_fg: Color,
    pub title_bg: Color,
    pub window_bg: Color,
    pub border: Color,
    pub button_highlight: Color,
}

impl Default for WindowStyle {
    fn default() -> Self {
        Self {
            title_fg: Color::BLACK,
            title_bg: Color::rgb(186, 186, 186),
            window_bg: Color::rgb(222, 222, 222),
            border: Color::rgb(66, 66, 66),
            button_highlight: Color::rgb(227, 227, 227),
        }
    }
}

/// A floating, draggable, resizable, minimizable window.
pub struct Window {
    core: WidgetCore,
    children: Vec<Box<dyn Widget>>,
    title: String,
    style: WindowStyle,

    // Chrome geometry. Hit rects are absolute; the child area is
    // window-local. Recomputed on every size- or placement-changing update.
    title_bar: Rect,
    minimize_hit: Rect,
    close_hit: Rect,
    border_hits: Vec<(Rect, Side)>,
    child_area: Rect,
    button_width: i32,
    button_margin: i32,

    moving: bool,
    resize_side: Option<Side>,
    minimized: bool,
    highlight_minimize: bool,
    highlight_close: bool,
    closed: bool,
    raise_requested: bool,
    handlers: Vec<HandlerId>,
}

impl Window {
    pub fn new(
        mut child: Box<dyn Widget>,
        title: impl Into<String>,
        rect: Rect,
    ) -> Result<Self, LayoutError> {
        let core = WidgetCore::with_parts(None, Some(rect));
        child.set_parent(core.id())?;
        Ok(Self {
            core,
            children: vec![child],
            title: title.into(),
            style: WindowStyle::default(),
            title_bar: Rect::ZERO,
            minimize_hit: Rect::ZERO,
            close_hit: Rect::ZERO,
            border_hits: Vec::new(),
            child_area: Rect::ZERO,
            button_width: 0,
            button_margin: 0,
            moving: false,
            resize_side: None,
            minimized: false,
            highlight_minimize: false,
            highlight_close: false,
            closed: false,
            raise_requested: false,
            handlers: Vec::new(),
        })
    }

    pub fn with_style(mut self, style: WindowStyle) -> Self {
        self.style = style;
        self
    }

    /// Subscribe the window to pointer input. [`Desktop::add`] does this for
    /// hosts; standalone embedders call it after wrapping the window.
    pub fn connect(this: &Rc<RefCell<Self>>, ctx: &UiContext) {
        let weak = Rc::downgrade(this);
        let down = ctx
            .events()
            .register(EventKind::PointerDown, move |event, ctx| {
                if let (Some(window), Some(position)) = (weak.upgrade(), event.position()) {
                    window.borrow_mut().on_pointer_down(position, ctx);
                }
            });

        let weak = Rc::downgrade(this);
        let moved = ctx
            .events()
            .register(EventKind::PointerMove, move |event, _ctx| {
                if let Event::PointerMove { position, delta } = event {
                    if let Some(window) = weak.upgrade() {
                        window.borrow_mut().on_pointer_move(*position, *delta);
                    }
                }
            });

        let weak = Rc::downgrade(this);
        let up = ctx.events().register(EventKind::PointerUp, move |_event, ctx| {
            if let Some(window) = weak.upgrade() {
                window.borrow_mut().on_pointer_up(ctx);
            }
        });

        this.borrow_mut().handlers = vec![down, moved, up];
    }

    /// Close the window: unsubscribe from input and flag it for removal by
    /// its host.
    pub fn kill(&mut self, ctx: &UiContext) {
        debug!("window '{}' closed", self.title);
        self.closed = true;
        for id in self.handlers.drain(..) {
            ctx.events().unregister(id);
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn is_minimized(&self) -> bool {
        self.minimized
    }

    pub fn is_moving(&self) -> bool {
        self.moving
    }

    pub fn resize_side(&self) -> Option<Side> {
        self.resize_side
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn on_pointer_down(&mut self, position: Point, ctx: &UiContext) {
        if self.close_hit.contains(position) {
            // Nothing below may run on a closed window.
            self.kill(ctx);
            return;
        }

        if self.minimize_hit.contains(position) {
            self.minimized = !self.minimized;
            debug!("window '{}' minimized: {}", self.title, self.minimized);
            if let Some(child) = self.children.first_mut() {
                child.core_mut().set_visible(!self.minimized);
            }
            self.core.mark(Dirty::RECALCULATE | Dirty::REPOSITION);
            // The button sits inside the title bar; don't fall through into
            // a drag.
            return;
        }

        if self.title_bar.contains(position) && ctx.try_grab() {
            debug!("window '{}' grabbed", self.title);
            self.moving = true;
            self.raise_requested = true;
            return;
        }

        if !self.minimized {
            for (rect, side) in &self.border_hits {
                if rect.contains(position) {
                    debug!("window '{}' resizing from {side:?}", self.title);
                    self.resize_side = Some(*side);
                    break;
                }
            }
        }
    }

    fn on_pointer_move(&mut self, position: Point, delta: Point) {
        if self.moving {
            self.core.rect_mut().translate(delta.x, delta.y);
            self.core.mark(Dirty::REPOSITION | Dirty::REDRAW);
        }

        // Hover highlights track the pointer in every state.
        let over_minimize = self.minimize_hit.contains(position);
        if over_minimize != self.highlight_minimize {
            self.highlight_minimize = over_minimize;
            self.core.mark(Dirty::REDRAW);
        }
        let over_close = self.close_hit.contains(position);
        if over_close != self.highlight_close {
            self.highlight_close = over_close;
            self.core.mark(Dirty::REDRAW);
        }

        if let Some(side) = self.resize_side {
            debug_assert!(
                side != Side::Top,
                "resizing a window from the top is not possible (this is a bug)"
            );
            let rect = self.core.rect_mut();
            match side {
                Side::Left => {
                    // The left edge follows the pointer; the right stays put.
                    rect.x += delta.x;
                    rect.width -= delta.x;
                }
                Side::Right => rect.width += delta.x,
                Side::Bottom => rect.height += delta.y,
                Side::Top => {}
            }
            self.core
                .mark(Dirty::RECALCULATE | Dirty::REPOSITION | Dirty::REDRAW);
        }
    }

    fn on_pointer_up(&mut self, ctx: &UiContext) {
        ctx.release_grab();
        self.moving = false;
        self.resize_side = None;
    }

    pub(crate) fn take_raise_request(&mut self) -> bool {
        std::mem::take(&mut self.raise_requested)
    }

    /// Recompute the chrome rects for a window occupying `rect`. Hit rects
    /// are absolute; the child area is window-local.
    fn compute_chrome(&mut self, rect: Rect, ctx: &UiContext) {
        let title_height = ctx.line_height() + TITLE_OFFSET * 2;
        self.title_bar = Rect::new(rect.x, rect.y, rect.width, title_height);

        // A minimized window only exposes its title bar to border hits.
        let border_base = if self.minimized {
            self.title_bar
        } else {
            rect
        };
        self.border_hits = border_collide_rects(border_base, RESIZE_RECT_TOLERANCE);

        self.button_width = (title_height as f32 * BUTTON_WIDTH_FACTOR) as i32;
        self.button_margin = (title_height - self.button_width) / 2;

        self.minimize_hit = Rect::new(
            rect.x + self.button_margin,
            rect.y + self.button_margin,
            self.button_width,
            self.button_width,
        );
        self.close_hit = Rect::new(
            rect.right() - self.button_margin - self.button_width,
            rect.y + self.button_margin,
            self.button_width,
            self.button_width,
        );

        self.child_area = Rect::new(
            BORDER_THICKNESS,
            title_height + BORDER_THICKNESS,
            (rect.width - BORDER_THICKNESS * 2).max(0),
            (rect.height - title_height - BORDER_THICKNESS * 2).max(0),
        );
    }

    fn child_mut(&mut self) -> &mut Box<dyn Widget> {
        &mut self.children[0]
    }
}

impl Widget for Window {
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
        let rect = Rect::from_parts(self.core.rect().origin(), max);
        self.compute_chrome(rect, ctx);

        if !self.minimized {
            let inner = self.child_area.size();
            self.child_mut().calculate_size(inner, ctx);
        }
        max
    }

    fn place(&mut self, _origin: Point, ctx: &UiContext) {
        // A drag changes only the origin, so the absolute hit rects have to
        // follow here, not just in measure.
        let rect = self.core.rect();
        self.compute_chrome(rect, ctx);

        let child_origin = self.child_area.origin();
        self.child_mut().set_placement(child_origin, ctx);
    }

    fn draw(&mut self, _ctx: &UiContext) -> Option<Drawable> {
        let size = self.core.rect().size();
        let mut drawable = Drawable::new(size, true);
        let full = Rect::from_parts(Point::ZERO, size);
        let title_local = Rect::new(0, 0, size.width, self.title_bar.height);

        if !self.minimized {
            drawable.push(DrawOp::Fill {
                region: full,
                fill: self.style.window_bg.into(),
                rounding: 0,
                stroke: 0,
            });
        }
        drawable.push(DrawOp::Fill {
            region: title_local,
            fill: self.style.title_bg.into(),
            rounding: 0,
            stroke: 0,
        });

        if !self.minimized {
            drawable.push(DrawOp::Fill {
                region: full,
                fill: self.style.border.into(),
                rounding: 0,
                stroke: BORDER_THICKNESS,
            });
        }
        drawable.push(DrawOp::Fill {
            region: title_local,
            fill: self.style.border.into(),
            rounding: 0,
            stroke: BORDER_THICKNESS,
        });

        if self.highlight_minimize {
            drawable.push(DrawOp::Disc {
                center: Point::new(
                    self.button_width / 2 + self.button_margin,
                    self.button_width / 2 + self.button_margin,
                ),
                radius: self.button_width,
                color: self.style.button_highlight,
            });
        }
        if self.highlight_close {
            drawable.push(DrawOp::Disc {
                center: Point::new(
                    title_local.width - self.button_width / 2 - self.button_margin,
                    self.button_width / 2 + self.button_margin,
                ),
                radius: self.button_width,
                color: self.style.button_highlight,
            });
        }

        drawable.push(DrawOp::Text {
            origin: Point::new(self.button_margin * 2 + self.button_width, TITLE_OFFSET),
            content: self.title.clone(),
            color: self.style.title_fg,
            background: Some(self.style.title_bg),
        });

        drawable.push(DrawOp::Icon {
            region: Rect::new(
                self.button_margin,
                self.button_margin,
                self.button_width,
                self.button_width,
            ),
            icon: IconKind::Minimize {
                active: !self.minimized,
            },
        });
        drawable.push(DrawOp::Icon {
            region: Rect::new(
                title_local.right() - self.button_width - self.button_margin,
                self.button_margin,
                self.button_width,
                self.button_width,
            ),
            icon: IconKind::Close,
        });

        if !self.minimized {
            let mut scene = Vec::new();
            for child in &self.children {
                collect_scene(child.as_ref(), &mut scene);
            }
            for (origin, source) in scene {
                drawable.push(DrawOp::Blit { origin, source });
            }
        }

        Some(drawable)
    }
}

/// Left, right and bottom hit rects around a window's edges. The top edge
/// deliberately yields none: top resize is not supported.
fn border_collide_rects(base: Rect, tolerance: i32) -> Vec<(Rect, Side)> {
    vec![
        (
            Rect::new(
                base.left() - tolerance,
                base.top() - tolerance,
                tolerance * 2,
                base.height + tolerance * 2,
            ),
            Side::Left,
        ),
        (
            Rect::new(
                base.right() - tolerance,
                base.top() - tolerance,
                tolerance * 2,
                base.height + tolerance * 2,
            ),
            Side::Right,
        ),
        (
            Rect::new(
                base.left() - tolerance,
                base.bottom() - tolerance,
                base.width + tolerance * 2,
                tolerance * 2,
            ),
            Side::Bottom,
        ),
    ]
}

/// Host for top-level windows: owns them in z-order (last drawn topmost),
/// consumes raise and close requests, and ticks each window's update.
#[derive(Default)]
pub struct Desktop {
    windows: Vec<Rc<RefCell<Window>>>,
}

impl Desktop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a window, wire it to pointer input and place it topmost.
    pub fn add(&mut self, window: Window, ctx: &UiContext) -> Rc<RefCell<Window>> {
        let window = Rc::new(RefCell::new(window));
        Window::connect(&window, ctx);
        self.windows.push(Rc::clone(&window));
        window
    }

    /// One tick: drop closed windows, apply raises, then update every
    /// window in z-order. Hosts dispatch input before calling this so the
    /// tick reacts to the latest state.
    pub fn update(&mut self, ctx: &UiContext) {
        self.windows.retain(|window| !window.borrow().is_closed());

        let (raised, kept): (Vec<_>, Vec<_>) = self
            .windows
            .drain(..)
            .partition(|window| window.borrow_mut().take_raise_request());
        self.windows = kept;
        self.windows.extend(raised);

        for window in &self.windows {
            window.borrow_mut().update(ctx);
        }
    }

    /// Windows in draw order, bottom to top.
    pub fn windows(&self) -> &[Rc<RefCell<Window>>] {
        &self.windows
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// The composed scene: each visible window's drawable at its origin,
    /// bottom to top.
    pub fn scene(&self) -> Vec<(Point, Drawable)> {
        self.windows
            .iter()
            .filter_map(|window| {
                let window = window.borrow();
                let core = window.core();
                if !core.is_visible() {
                    return None;
                }
                core.drawable()
                    .map(|drawable| (core.rect().origin(), drawable.clone()))
            })
            .collect()
    }
}
