//! Fraction widget - scales the offered space before delegating
//!
//! Offers the child `factor * offered` per axis, rounded by the context's
//! overflow policy, and adopts whatever size the child reports.

use crate::context::UiContext;
use crate::error::LayoutError;
use crate::geometry::{Point, Size};
use crate::widget::{Widget, WidgetCore};

/// Single-child container offering a fraction of the available space.
pub struct Fraction {
    core: WidgetCore,
    children: Vec<Box<dyn Widget>>,
    factor: (f32, f32),
}

impl Fraction {
    /// `factor` is `(width, height)`, typically in 0.0-1.0.
    pub fn new(mut child: Box<dyn Widget>, factor: (f32, f32)) -> Result<Self, LayoutError> {
        let core = WidgetCore::new();
        child.set_parent(core.id())?;
        Ok(Self {
            core,
            children: vec![child],
            factor,
        })
    }

    pub fn factor(&self) -> (f32, f32) {
        self.factor
    }

    fn child_mut(&mut self) -> &mut Box<dyn Widget> {
        &mut self.children[0]
    }
}

impl Widget for Fraction {
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
        let scaled = Size::new(
            ctx.scale(max.width, self.factor.0),
            ctx.scale(max.height, self.factor.1),
        );
        self.child_mut().calculate_size(scaled, ctx)
    }

    fn place(&mut self, origin: Point, ctx: &UiContext) {
        self.child_mut().set_placement(origin, ctx);
    }
}
