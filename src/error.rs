//! Crate-level error types
//!
//! All errors here are usage errors reported at the call site: a failed
//! construction or attachment is fatal to that operation, not recoverable
//! locally. Degenerate layout inputs (zero children, zero-sized constraints)
//! are handled by policy in the layout code and never surface as errors.

use thiserror::Error;

use crate::widget::WidgetId;

/// Errors raised while building or attaching widgets.
#[derive(Error, Debug)]
pub enum LayoutError {
    /// Padding built from a slice with an unsupported number of values.
    #[error("invalid padding arguments: expected 1, 2 or 4 values, got {0}")]
    InvalidPadding(usize),

    /// A fullscreen widget was offered to a container.
    #[error("fullscreen widgets are root-only and cannot be attached to a container")]
    FullscreenAttached,

    /// A widget was offered to a second container.
    #[error("widget {0} is already attached to a container")]
    AlreadyAttached(WidgetId),
}
