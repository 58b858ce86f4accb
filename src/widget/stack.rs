//! Stack widget - overlays children at a shared origin
//!
//! Children are measured twice: once under the full offer to discover each
//! natural size, then again under the union (max width, max height) of those
//! sizes, so proportionally-sized children can expand into the stack's final
//! footprint. All children share the stack's origin; later children paint
//! over earlier ones.

use crate::context::UiContext;
use crate::error::LayoutError;
use crate::geometry::{Point, Size};
use crate::widget::{adopt, Widget, WidgetCore};

/// Multi-child container overlaying its children.
pub struct Stack {
    core: WidgetCore,
    children: Vec<Box<dyn Widget>>,
}

impl Stack {
    pub fn new(mut children: Vec<Box<dyn Widget>>) -> Result<Self, LayoutError> {
        let core = WidgetCore::new();
        adopt(core.id(), &mut children)?;
        Ok(Self { core, children })
    }
}

impl Widget for Stack {
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
        let mut union = Size::ZERO;
        for child in &mut self.children {
            union = union.union(child.calculate_size(max, ctx));
        }
        // Second pass: re-offer the union so children sized relative to the
        // offer grow into the stack's footprint.
        for child in &mut self.children {
            child.calculate_size(union, ctx);
        }
        union
    }

    fn place(&mut self, origin: Point, ctx: &UiContext) {
        for child in &mut self.children {
            child.set_placement(origin, ctx);
        }
    }
}
