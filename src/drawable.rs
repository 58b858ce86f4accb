//! Drawable output - the opaque result of a widget's redraw phase
//!
//! A [`Drawable`] is a retained command list an external compositor turns
//! into pixels. The core guarantees its size equals the producing widget's
//! rect and that it is regenerated only when the widget's redraw flag was
//! set; everything else about rasterization is the renderer's business.

use crate::fill::{Color, Fill};
use crate::geometry::{Point, Rect, Size};

/// A single paint instruction, in drawable-local coordinates.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// Fill (or, with `stroke > 0`, outline) a region.
    Fill {
        region: Rect,
        fill: Fill,
        /// Corner radius; 0 draws square corners.
        rounding: i32,
        /// Outline width; 0 fills the region solid.
        stroke: i32,
    },
    /// A filled circle, used for button hover highlights.
    Disc {
        center: Point,
        radius: i32,
        color: Color,
    },
    /// A text run. Shaping and metrics live in the renderer.
    Text {
        origin: Point,
        content: String,
        color: Color,
        background: Option<Color>,
    },
    /// A named icon scaled into a region.
    Icon { region: Rect, icon: IconKind },
    /// Another drawable composed at an offset.
    Blit { origin: Point, source: Drawable },
}

/// Icons the window chrome asks the renderer for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IconKind {
    Minimize { active: bool },
    Close,
}

/// The visual output of one widget: a sized surface plus paint instructions.
#[derive(Clone, Debug, PartialEq)]
pub struct Drawable {
    size: Size,
    alpha: bool,
    ops: Vec<DrawOp>,
}

impl Drawable {
    pub fn new(size: Size, alpha: bool) -> Self {
        Self {
            size,
            alpha,
            ops: Vec::new(),
        }
    }

    pub fn push(&mut self, op: DrawOp) {
        self.ops.push(op);
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Whether the surface backing this drawable needs an alpha channel.
    pub fn requires_alpha(&self) -> bool {
        self.alpha
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drawable_records_ops_in_order() {
        let mut drawable = Drawable::new(Size::new(10, 10), false);
        drawable.push(DrawOp::Fill {
            region: Rect::new(0, 0, 10, 10),
            fill: Color::BLACK.into(),
            rounding: 0,
            stroke: 0,
        });
        drawable.push(DrawOp::Disc {
            center: Point::new(5, 5),
            radius: 2,
            color: Color::WHITE,
        });

        assert_eq!(drawable.ops().len(), 2);
        assert!(matches!(drawable.ops()[0], DrawOp::Fill { .. }));
        assert!(matches!(drawable.ops()[1], DrawOp::Disc { .. }));
    }
}
