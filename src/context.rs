//! UiContext - explicit process-wide state for a widget tree
//!
//! The overflow policy, viewport size, window grab lock and event registry
//! are shared by everything under one host. They live on an injected context
//! instead of globals so tests (and embedders running several independent
//! trees) each own their instance. The core is single-threaded by contract,
//! so plain `Cell`/`RefCell` interior mutability is all that is needed.

use std::cell::{Cell, RefCell};

use crate::events::{Event, EventRegistry};
use crate::geometry::Size;

/// Rounding rule applied whenever layout math divides space that does not
/// split evenly. Read by every layout algorithm of the owning context.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OverflowPolicy {
    /// Round inexact divisions up (children may overflow the container).
    RoundUp,
    /// Round inexact divisions down (children may underfill the container).
    #[default]
    RoundDown,
}

impl OverflowPolicy {
    /// Integer division of `value` by `divisor` under this policy.
    /// `divisor` must be positive; callers guard the zero-children case.
    pub fn divide(self, value: i32, divisor: i32) -> i32 {
        match self {
            OverflowPolicy::RoundUp => (value + divisor - 1).div_euclid(divisor),
            OverflowPolicy::RoundDown => value.div_euclid(divisor),
        }
    }

    /// Halve a value, rounding per policy. Centering offsets use this.
    pub fn halve(self, value: i32) -> i32 {
        self.divide(value, 2)
    }

    /// Scale a value by a fractional factor, rounding per policy.
    pub fn scale(self, value: i32, factor: f32) -> i32 {
        let scaled = f64::from(value) * f64::from(factor);
        let rounded = match self {
            OverflowPolicy::RoundUp => scaled.ceil(),
            OverflowPolicy::RoundDown => scaled.floor(),
        };
        rounded as i32
    }
}

/// Line metrics for the active UI font. Text shaping is external; window
/// chrome only needs the line height to size its title bar.
pub trait FontMetrics {
    fn line_height(&self) -> i32;
}

/// Fixed line metrics, the default provider and the one tests inject.
#[derive(Clone, Copy, Debug)]
pub struct FixedMetrics(pub i32);

impl FontMetrics for FixedMetrics {
    fn line_height(&self) -> i32 {
        self.0
    }
}

const DEFAULT_LINE_HEIGHT: i32 = 18;

/// Shared state for one widget host: overflow policy, viewport, the window
/// grab lock, the event registry and the font metrics provider.
pub struct UiContext {
    overflow: Cell<OverflowPolicy>,
    viewport: Cell<Size>,
    grab: Cell<bool>,
    events: EventRegistry,
    metrics: RefCell<Box<dyn FontMetrics>>,
}

impl UiContext {
    pub fn new(viewport: Size) -> Self {
        Self {
            overflow: Cell::new(OverflowPolicy::default()),
            viewport: Cell::new(viewport),
            grab: Cell::new(false),
            events: EventRegistry::new(),
            metrics: RefCell::new(Box::new(FixedMetrics(DEFAULT_LINE_HEIGHT))),
        }
    }

    pub fn overflow_policy(&self) -> OverflowPolicy {
        self.overflow.get()
    }

    /// Select the rounding rule for all subsequent layout divisions under
    /// this context.
    pub fn set_overflow_policy(&self, policy: OverflowPolicy) {
        self.overflow.set(policy);
    }

    /// Divide under the current overflow policy.
    pub fn divide(&self, value: i32, divisor: i32) -> i32 {
        self.overflow.get().divide(value, divisor)
    }

    /// Halve under the current overflow policy.
    pub fn halve(&self, value: i32) -> i32 {
        self.overflow.get().halve(value)
    }

    /// Scale by a fractional factor under the current overflow policy.
    pub fn scale(&self, value: i32, factor: f32) -> i32 {
        self.overflow.get().scale(value, factor)
    }

    pub fn viewport(&self) -> Size {
        self.viewport.get()
    }

    /// Record a new host viewport size. Hosts follow this with a
    /// [`Event::ViewportResize`] dispatch so fullscreen roots react.
    pub fn set_viewport(&self, size: Size) {
        self.viewport.set(size);
    }

    pub fn events(&self) -> &EventRegistry {
        &self.events
    }

    /// Dispatch an event to every registered handler of its kind.
    pub fn dispatch(&self, event: &Event) {
        self.events.dispatch(event, self);
    }

    pub fn line_height(&self) -> i32 {
        self.metrics.borrow().line_height()
    }

    pub fn set_font_metrics(&self, metrics: Box<dyn FontMetrics>) {
        *self.metrics.borrow_mut() = metrics;
    }

    /// Try to take the window grab lock. At most one window may be mid-drag
    /// per context; the lock holder keeps it until [`UiContext::release_grab`].
    pub fn try_grab(&self) -> bool {
        if self.grab.get() {
            return false;
        }
        self.grab.set(true);
        true
    }

    pub fn release_grab(&self) {
        self.grab.set(false);
    }

    pub fn is_grabbed(&self) -> bool {
        self.grab.get()
    }
}

impl Default for UiContext {
    fn default() -> Self {
        Self::new(Size::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_divide_rounding() {
        assert_eq!(OverflowPolicy::RoundDown.divide(100, 3), 33);
        assert_eq!(OverflowPolicy::RoundUp.divide(100, 3), 34);
        assert_eq!(OverflowPolicy::RoundDown.divide(99, 3), 33);
        assert_eq!(OverflowPolicy::RoundUp.divide(99, 3), 33);
    }

    #[test]
    fn test_halve_rounding() {
        assert_eq!(OverflowPolicy::RoundDown.halve(61), 30);
        assert_eq!(OverflowPolicy::RoundUp.halve(61), 31);
    }

    #[test]
    fn test_scale_rounding() {
        assert_eq!(OverflowPolicy::RoundDown.scale(101, 0.5), 50);
        assert_eq!(OverflowPolicy::RoundUp.scale(101, 0.5), 51);
        assert_eq!(OverflowPolicy::RoundDown.scale(100, 1.0), 100);
    }

    #[test]
    fn test_grab_lock_is_exclusive() {
        let ctx = UiContext::new(Size::new(800, 600));

        assert!(ctx.try_grab());
        assert!(!ctx.try_grab());
        ctx.release_grab();
        assert!(ctx.try_grab());
    }

    #[test]
    fn test_policy_switch_affects_later_divisions() {
        let ctx = UiContext::new(Size::ZERO);

        assert_eq!(ctx.divide(100, 3), 33);
        ctx.set_overflow_policy(OverflowPolicy::RoundUp);
        assert_eq!(ctx.divide(100, 3), 34);
    }
}
