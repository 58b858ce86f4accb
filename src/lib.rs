//! trellis - a retained-mode widget layout and composition library
//!
//! A tree of widgets negotiates size and position in two downward passes
//! (recalculate, then reposition), tracks invalidation with per-node dirty
//! flags, and regenerates drawable output only when needed. Pixel rendering
//! is external: widgets emit opaque [`drawable::Drawable`] command lists for
//! a compositor to consume.
//!
//! Hosts drive a tree like this each frame:
//!
//! 1. dispatch input through [`context::UiContext::dispatch`], then
//! 2. tick [`widget::Widget::update`] on every root (or
//!    [`widget::Desktop::update`] for floating windows), then
//! 3. hand the collected scene to the renderer.
//!
//! Everything is single-threaded and synchronous; shared state (overflow
//! policy, event registry, window grab lock) lives on an explicitly injected
//! [`context::UiContext`].

pub mod context;
pub mod drawable;
pub mod error;
pub mod events;
pub mod fill;
pub mod geometry;
pub mod widget;

pub use context::{FixedMetrics, FontMetrics, OverflowPolicy, UiContext};
pub use drawable::{DrawOp, Drawable, IconKind};
pub use error::LayoutError;
pub use events::{Event, EventKind, EventRegistry, HandlerId, PointerButton};
pub use fill::{Color, Direction, Fill};
pub use geometry::{Axis, Point, Rect, Side, Size};
pub use widget::{
    collect_scene, Align, Axial, Button, Desktop, Dirty, Fraction, Fullscreen, HAlignment,
    MainAxisSize, Padding, PaddingValue, Panel, Stack, VAlignment, Widget, WidgetCore, WidgetId,
    Window, WindowStyle,
};
