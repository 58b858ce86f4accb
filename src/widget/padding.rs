//! Padding widget - insets a single child within reserved space
//!
//! Padding reserves space rather than shrinking to fit: its own size is the
//! full offered size and the child is offered what remains after the insets.

use crate::context::UiContext;
use crate::error::LayoutError;
use crate::geometry::{Point, Size};
use crate::widget::{Widget, WidgetCore};

/// Four non-negative insets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PaddingValue {
    pub left: i32,
    pub right: i32,
    pub top: i32,
    pub bottom: i32,
}

impl PaddingValue {
    /// The same inset on all four sides.
    pub fn uniform(value: i32) -> Self {
        Self {
            left: value,
            right: value,
            top: value,
            bottom: value,
        }
    }

    /// One inset for left/right, another for top/bottom.
    pub fn symmetric(horizontal: i32, vertical: i32) -> Self {
        Self {
            left: horizontal,
            right: horizontal,
            top: vertical,
            bottom: vertical,
        }
    }

    pub fn each(left: i32, right: i32, top: i32, bottom: i32) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    /// Build from 1 (uniform), 2 (horizontal, vertical) or 4 (per-side)
    /// values; any other count is a construction error.
    pub fn from_slice(values: &[i32]) -> Result<Self, LayoutError> {
        match *values {
            [value] => Ok(Self::uniform(value)),
            [horizontal, vertical] => Ok(Self::symmetric(horizontal, vertical)),
            [left, right, top, bottom] => Ok(Self::each(left, right, top, bottom)),
            _ => Err(LayoutError::InvalidPadding(values.len())),
        }
    }

    /// Total horizontal inset.
    pub fn axis_x(&self) -> i32 {
        self.left + self.right
    }

    /// Total vertical inset.
    pub fn axis_y(&self) -> i32 {
        self.top + self.bottom
    }
}

/// Single-child container that insets its child.
pub struct Padding {
    core: WidgetCore,
    children: Vec<Box<dyn Widget>>,
    padding: PaddingValue,
}

impl Padding {
    pub fn new(mut child: Box<dyn Widget>, padding: PaddingValue) -> Result<Self, LayoutError> {
        let core = WidgetCore::new();
        child.set_parent(core.id())?;
        Ok(Self {
            core,
            children: vec![child],
            padding,
        })
    }

    pub fn padding(&self) -> PaddingValue {
        self.padding
    }

    fn child_mut(&mut self) -> &mut Box<dyn Widget> {
        &mut self.children[0]
    }
}

impl Widget for Padding {
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
        let inner = Size::new(
            (max.width - self.padding.axis_x()).max(0),
            (max.height - self.padding.axis_y()).max(0),
        );
        self.child_mut().calculate_size(inner, ctx);
        max
    }

    fn place(&mut self, origin: Point, ctx: &UiContext) {
        let inset = origin.offset(self.padding.left, self.padding.top);
        self.child_mut().set_placement(inset, ctx);
    }
}
