//! Panel widget - a filled rectangle leaf
//!
//! The simplest drawing widget: adopts the full offered size and redraws a
//! single fill op. Its mutators touch visuals only, so they mark REDRAW and
//! nothing else.

use crate::context::UiContext;
use crate::drawable::{DrawOp, Drawable};
use crate::fill::Fill;
use crate::geometry::{Point, Rect, Size};
use crate::widget::{Dirty, Widget, WidgetCore};

/// A leaf painting its rect with a fill.
pub struct Panel {
    core: WidgetCore,
    fill: Fill,
    rounding: i32,
    stroke: i32,
}

impl Panel {
    pub fn new(fill: impl Into<Fill>) -> Self {
        Self {
            core: WidgetCore::new(),
            fill: fill.into(),
            rounding: 0,
            stroke: 0,
        }
    }

    /// Corner radius; 0 keeps square corners.
    pub fn with_rounding(mut self, rounding: i32) -> Self {
        self.rounding = rounding;
        self
    }

    /// Outline width; 0 fills solid.
    pub fn with_stroke(mut self, stroke: i32) -> Self {
        self.stroke = stroke;
        self
    }

    pub fn fill(&self) -> &Fill {
        &self.fill
    }

    pub fn set_fill(&mut self, fill: impl Into<Fill>) {
        self.fill = fill.into();
        self.core.mark(Dirty::REDRAW);
    }

    pub fn rounding(&self) -> i32 {
        self.rounding
    }

    pub fn set_rounding(&mut self, rounding: i32) {
        self.rounding = rounding;
        self.core.mark(Dirty::REDRAW);
    }

    pub fn stroke(&self) -> i32 {
        self.stroke
    }

    pub fn set_stroke(&mut self, stroke: i32) {
        self.stroke = stroke;
        self.core.mark(Dirty::REDRAW);
    }
}

impl Widget for Panel {
    fn core(&self) -> &WidgetCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut WidgetCore {
        &mut self.core
    }

    fn measure(&mut self, max: Size, _ctx: &UiContext) -> Size {
        max
    }

    fn draw(&mut self, _ctx: &UiContext) -> Option<Drawable> {
        let size = self.core.rect().size();
        // Rounded corners leave the corner pixels uncovered, forcing an
        // alpha surface even for an opaque fill.
        let alpha = self.rounding != 0 || self.fill.requires_alpha();

        let mut drawable = Drawable::new(size, alpha);
        drawable.push(DrawOp::Fill {
            region: Rect::from_parts(Point::ZERO, size),
            fill: self.fill.clone(),
            rounding: self.rounding,
            stroke: self.stroke,
        });
        Some(drawable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fill::Color;

    #[test]
    fn test_adopts_full_offer() {
        let ctx = UiContext::default();
        let mut panel = Panel::new(Color::BLACK).with_rect(Rect::new(0, 0, 120, 80));

        panel.update(&ctx);

        assert_eq!(panel.core().rect().size(), Size::new(120, 80));
        let drawable = panel.core().drawable().unwrap();
        assert_eq!(drawable.size(), Size::new(120, 80));
        assert!(!drawable.requires_alpha());
    }

    #[test]
    fn test_rounding_or_translucency_needs_alpha() {
        let ctx = UiContext::default();

        let mut rounded = Panel::new(Color::BLACK)
            .with_rounding(6)
            .with_rect(Rect::new(0, 0, 10, 10));
        rounded.update(&ctx);
        assert!(rounded.core().drawable().unwrap().requires_alpha());

        let mut translucent =
            Panel::new(Color::rgba(0, 0, 0, 128)).with_rect(Rect::new(0, 0, 10, 10));
        translucent.update(&ctx);
        assert!(translucent.core().drawable().unwrap().requires_alpha());
    }

    #[test]
    fn test_visual_mutators_mark_redraw_only() {
        let ctx = UiContext::default();
        let mut panel = Panel::new(Color::BLACK).with_rect(Rect::new(0, 0, 10, 10));
        panel.update(&ctx);
        assert!(panel.core().dirty().is_empty());

        panel.set_fill(Color::WHITE);
        assert_eq!(panel.core().dirty(), Dirty::REDRAW);

        panel.update(&ctx);
        panel.set_rounding(3);
        assert_eq!(panel.core().dirty(), Dirty::REDRAW);

        panel.update(&ctx);
        panel.set_stroke(2);
        assert_eq!(panel.core().dirty(), Dirty::REDRAW);
    }
}
