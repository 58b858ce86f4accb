//! Widget system - the layout tree and its three-phase update contract
//!
//! Every node carries a [`WidgetCore`] (identity, rect, invalidation flags)
//! and implements [`Widget`]. The update protocol runs, in strict order,
//! whichever phases a node's dirty flags request:
//!
//! 1. *Recalculate* - compute the node's size under the constraints offered
//!    by its parent (a parentless node offers itself its own rect),
//!    recursing into children with derived constraints.
//! 2. *Reposition* - store the absolute origin handed down by the parent and
//!    place children relative to it.
//! 3. *Redraw* - regenerate the node's drawable output. Containers produce
//!    none; the phase still walks children so leaves refresh independently.
//!
//! Recalculate always precedes reposition: placement for several policies
//! depends on sizes computed in the same pass, and a node must never be
//! positioned from stale size data. All three flags are set at construction
//! so a fresh node always runs the full protocol on first update.

pub mod align;
pub mod axial;
pub mod button;
pub mod fraction;
pub mod fullscreen;
pub mod padding;
pub mod panel;
pub mod stack;
pub mod window;

use std::fmt;

use bitflags::bitflags;
use uuid::Uuid;

pub use align::{Align, HAlignment, VAlignment};
pub use axial::{Axial, MainAxisSize};
pub use button::Button;
pub use fraction::Fraction;
pub use fullscreen::Fullscreen;
pub use padding::{Padding, PaddingValue};
pub use panel::Panel;
pub use stack::Stack;
pub use window::{Desktop, Window, WindowStyle};

use crate::context::UiContext;
use crate::drawable::Drawable;
use crate::error::LayoutError;
use crate::geometry::{Point, Rect, Size};

bitflags! {
    /// Pending phases of the update protocol.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct Dirty: u8 {
        const RECALCULATE = 1 << 0;
        const REPOSITION = 1 << 1;
        const REDRAW = 1 << 2;
    }
}

/// Opaque widget identity, generated when not supplied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WidgetId(Uuid);

impl WidgetId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Per-node state shared by every widget: identity, rect, invalidation
/// flags, the non-owning parent link and the last-produced drawable.
///
/// The rect is only consistent while both RECALCULATE and REPOSITION are
/// clear.
pub struct WidgetCore {
    id: WidgetId,
    rect: Rect,
    constraint: Option<Size>,
    dirty: Dirty,
    parent: Option<WidgetId>,
    visible: bool,
    drawable: Option<Drawable>,
}

impl WidgetCore {
    /// A core with a generated id and no explicit rect. Such a node must be
    /// attached to a container before its first update.
    pub fn new() -> Self {
        Self::with_parts(None, None)
    }

    pub fn with_parts(id: Option<WidgetId>, rect: Option<Rect>) -> Self {
        Self {
            id: id.unwrap_or_else(WidgetId::generate),
            rect: rect.unwrap_or(Rect::ZERO),
            constraint: rect.map(|r| r.size()),
            dirty: Dirty::all(),
            parent: None,
            visible: true,
            drawable: None,
        }
    }

    pub fn id(&self) -> WidgetId {
        self.id
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn rect_mut(&mut self) -> &mut Rect {
        &mut self.rect
    }

    /// The externally-supplied size constraint, `None` when unconstrained.
    pub fn constraint(&self) -> Option<Size> {
        self.constraint
    }

    /// Install an explicit rect after construction, recording it as the
    /// node's size constraint.
    pub fn assign_rect(&mut self, rect: Rect) {
        self.rect = rect;
        self.constraint = Some(rect.size());
        self.dirty = Dirty::all();
    }

    pub fn assign_id(&mut self, id: WidgetId) {
        self.id = id;
    }

    pub fn parent(&self) -> Option<WidgetId> {
        self.parent
    }

    pub fn dirty(&self) -> Dirty {
        self.dirty
    }

    pub fn mark(&mut self, flags: Dirty) {
        self.dirty |= flags;
    }

    pub fn clear(&mut self, flags: Dirty) {
        self.dirty &= !flags;
    }

    pub fn needs(&self, flags: Dirty) -> bool {
        self.dirty.intersects(flags)
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn drawable(&self) -> Option<&Drawable> {
        self.drawable.as_ref()
    }

    pub(crate) fn set_drawable(&mut self, drawable: Option<Drawable>) {
        self.drawable = drawable;
    }
}

impl Default for WidgetCore {
    fn default() -> Self {
        Self::new()
    }
}

/// A node of the layout tree.
///
/// Implementors provide the three hooks (`measure`, `place`, `draw`); the
/// protocol around them - flag bookkeeping, rect storage, recursion order -
/// is supplied by the provided methods and should not be overridden.
pub trait Widget {
    fn core(&self) -> &WidgetCore;

    fn core_mut(&mut self) -> &mut WidgetCore;

    /// Compute this node's size under the offered constraints, recursing
    /// into children with derived constraints. Returns the size the
    /// protocol stores into the rect.
    fn measure(&mut self, max: Size, ctx: &UiContext) -> Size;

    /// Place children given this node's absolute origin. The origin is
    /// already stored; policies that offset themselves (Align) may move it.
    fn place(&mut self, _origin: Point, _ctx: &UiContext) {}

    /// Regenerate visual output from current size and style. Containers
    /// produce none.
    fn draw(&mut self, _ctx: &UiContext) -> Option<Drawable> {
        None
    }

    /// Children in draw/z order. Leaves keep the default.
    fn children(&self) -> &[Box<dyn Widget>] {
        &[]
    }

    fn children_mut(&mut self) -> &mut [Box<dyn Widget>] {
        &mut []
    }

    /// Record this node's owning container. Fails when the node is already
    /// attached elsewhere, or refuses parenting outright (Fullscreen).
    fn set_parent(&mut self, parent: WidgetId) -> Result<(), LayoutError> {
        let core = self.core_mut();
        if core.parent.is_some() {
            return Err(LayoutError::AlreadyAttached(core.id));
        }
        core.parent = Some(parent);
        Ok(())
    }

    /// Recalculate phase: clears RECALCULATE, runs `measure`, stores the
    /// result. A size change marks REDRAW so the drawable is regenerated at
    /// the new size even when the parent, not the node, initiated the pass.
    fn calculate_size(&mut self, max: Size, ctx: &UiContext) -> Size {
        self.core_mut().clear(Dirty::RECALCULATE);
        let size = self.measure(max, ctx);
        let core = self.core_mut();
        if core.rect.size() != size {
            core.mark(Dirty::REDRAW);
        }
        core.rect.set_size(size);
        size
    }

    /// Reposition phase: clears REPOSITION, stores the origin, runs `place`.
    fn set_placement(&mut self, origin: Point, ctx: &UiContext) {
        let core = self.core_mut();
        core.clear(Dirty::REPOSITION);
        core.rect.set_origin(origin);
        self.place(origin, ctx);
    }

    /// Redraw phase: children first, then this node's drawable if REDRAW is
    /// pending.
    fn refresh(&mut self, ctx: &UiContext) {
        for child in self.children_mut() {
            child.refresh(ctx);
        }
        if self.core().needs(Dirty::REDRAW) {
            let drawable = self.draw(ctx);
            let core = self.core_mut();
            core.set_drawable(drawable);
            core.clear(Dirty::REDRAW);
        }
    }

    /// Per-tick entry point for parentless nodes: runs whichever phases are
    /// pending, offering the node its own rect as the constraint.
    fn update(&mut self, ctx: &UiContext) {
        debug_assert!(
            self.core().parent.is_some() || self.core().constraint.is_some(),
            "cannot determine size and position of widget {}: it has no parent and no explicit rect",
            self.core().id
        );

        if self.core().needs(Dirty::RECALCULATE) {
            let max = self.core().rect.size();
            self.calculate_size(max, ctx);
            self.core_mut().mark(Dirty::REDRAW);
        }

        if self.core().needs(Dirty::REPOSITION) {
            let origin = self.core().rect.origin();
            self.set_placement(origin, ctx);
            self.core_mut().mark(Dirty::REDRAW);
        }

        self.refresh(ctx);
    }

    /// Builder: supply an explicit rect (position plus size constraint).
    fn with_rect(mut self, rect: Rect) -> Self
    where
        Self: Sized,
    {
        self.core_mut().assign_rect(rect);
        self
    }

    /// Builder: supply an explicit id instead of a generated one.
    fn with_id(mut self, id: WidgetId) -> Self
    where
        Self: Sized,
    {
        self.core_mut().assign_id(id);
        self
    }
}

/// Attach each child to `parent`, in order. Used by container constructors.
pub(crate) fn adopt(
    parent: WidgetId,
    children: &mut [Box<dyn Widget>],
) -> Result<(), LayoutError> {
    for child in children.iter_mut() {
        child.set_parent(parent)?;
    }
    Ok(())
}

/// Walk a subtree depth-first, collecting every visible drawable with its
/// absolute origin, in draw order. This is the scene an external compositor
/// consumes.
pub fn collect_scene(widget: &dyn Widget, out: &mut Vec<(Point, Drawable)>) {
    let core = widget.core();
    if !core.is_visible() {
        return;
    }
    if let Some(drawable) = core.drawable() {
        out.push((core.rect().origin(), drawable.clone()));
    }
    for child in widget.children() {
        collect_scene(child.as_ref(), out);
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Instrumented leaf widget shared by the layout policy tests.

    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    /// Records every constraint offer, placement and draw; reports a fixed
    /// natural extent per axis, or greedily adopts the full offer.
    pub struct Probe {
        core: WidgetCore,
        pub natural_width: Option<i32>,
        pub natural_height: Option<i32>,
        pub log: Rc<RefCell<ProbeLog>>,
    }

    #[derive(Default)]
    pub struct ProbeLog {
        pub offers: Vec<Size>,
        pub placements: Vec<Point>,
        pub draws: u32,
    }

    impl Probe {
        pub fn greedy() -> Self {
            Self {
                core: WidgetCore::new(),
                natural_width: None,
                natural_height: None,
                log: Rc::default(),
            }
        }

        pub fn fixed(width: i32, height: i32) -> Self {
            Self {
                natural_width: Some(width),
                natural_height: Some(height),
                ..Self::greedy()
            }
        }

        pub fn fixed_height(height: i32) -> Self {
            Self {
                natural_height: Some(height),
                ..Self::greedy()
            }
        }

        pub fn log_handle(&self) -> Rc<RefCell<ProbeLog>> {
            Rc::clone(&self.log)
        }
    }

    impl Widget for Probe {
        fn core(&self) -> &WidgetCore {
            &self.core
        }

        fn core_mut(&mut self) -> &mut WidgetCore {
            &mut self.core
        }

        fn measure(&mut self, max: Size, _ctx: &UiContext) -> Size {
            self.log.borrow_mut().offers.push(max);
            Size::new(
                self.natural_width.unwrap_or(max.width),
                self.natural_height.unwrap_or(max.height),
            )
        }

        fn place(&mut self, origin: Point, _ctx: &UiContext) {
            self.log.borrow_mut().placements.push(origin);
        }

        fn draw(&mut self, _ctx: &UiContext) -> Option<Drawable> {
            self.log.borrow_mut().draws += 1;
            Some(Drawable::new(self.core.rect().size(), false))
        }
    }
}
