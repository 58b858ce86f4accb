//! Align widget - positions a single child within the offered space
//!
//! The child computes its natural size under the full offer; the container
//! adopts that size and then offsets itself (and the child) within the
//! offered space per the horizontal and vertical policies. Centering
//! divisions round per the context's overflow policy.

use crate::context::UiContext;
use crate::error::LayoutError;
use crate::geometry::{Point, Size};
use crate::widget::{Widget, WidgetCore};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HAlignment {
    Left,
    Right,
    #[default]
    Center,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VAlignment {
    Top,
    Bottom,
    #[default]
    Center,
}

/// Single-child container that aligns its child inside the offered space.
pub struct Align {
    core: WidgetCore,
    children: Vec<Box<dyn Widget>>,
    horizontal: HAlignment,
    vertical: VAlignment,
    available: Size,
}

impl Align {
    /// Centered on both axes; adjust with the builders.
    pub fn new(mut child: Box<dyn Widget>) -> Result<Self, LayoutError> {
        let core = WidgetCore::new();
        child.set_parent(core.id())?;
        Ok(Self {
            core,
            children: vec![child],
            horizontal: HAlignment::default(),
            vertical: VAlignment::default(),
            available: Size::ZERO,
        })
    }

    /// Alias for the default: centered on both axes.
    pub fn center(child: Box<dyn Widget>) -> Result<Self, LayoutError> {
        Self::new(child)
    }

    pub fn with_horizontal(mut self, horizontal: HAlignment) -> Self {
        self.horizontal = horizontal;
        self
    }

    pub fn with_vertical(mut self, vertical: VAlignment) -> Self {
        self.vertical = vertical;
        self
    }

    fn child_mut(&mut self) -> &mut Box<dyn Widget> {
        &mut self.children[0]
    }
}

impl Widget for Align {
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
        self.available = max;
        self.child_mut().calculate_size(max, ctx)
    }

    fn place(&mut self, origin: Point, ctx: &UiContext) {
        let size = self.core.rect().size();

        let mut aligned = origin;
        match self.horizontal {
            HAlignment::Left => {}
            HAlignment::Center => {
                aligned.x += ctx.halve((self.available.width - size.width).abs());
            }
            HAlignment::Right => aligned.x += self.available.width - size.width,
        }
        match self.vertical {
            VAlignment::Top => {}
            VAlignment::Center => {
                aligned.y += ctx.halve((self.available.height - size.height).abs());
            }
            VAlignment::Bottom => aligned.y += self.available.height - size.height,
        }

        self.child_mut().set_placement(aligned, ctx);
        // The container's own rect follows the child: it adopted the child's
        // size during measure, so the two rects coincide.
        self.core.rect_mut().set_origin(aligned);
    }
}
