//! Interfaces consumed from the embedding platform.

use std::fmt;

use tessera_core::{MeasureSpec, Size};

use crate::tree::{Bounds, NodeId};

/// Receives the effects of layout passes and invalidations.
///
/// All methods default to no-ops so hosts only implement what they need.
pub trait LayoutHost {
    /// A node's frame was changed by a layout pass.
    fn frame_changed(&mut self, _node: NodeId, _frame: Bounds) {}

    /// A root went from clean to needing layout.
    fn layout_requested(&mut self, _root: NodeId) {}

    /// A scroll container's scrollable content extent changed.
    fn content_extent_changed(&mut self, _node: NodeId, _extent: Size) {}
}

/// Fitting-size query for platform widgets without layout awareness.
pub trait IntrinsicSize: fmt::Debug {
    /// Size the widget would like within `offer`.
    ///
    /// The result is resolved against the modes afterwards, so it may ignore
    /// them.
    fn fitting_size(&self, offer: Size, width_spec: MeasureSpec, height_spec: MeasureSpec) -> Size;
}

/// An `IntrinsicSize` that always reports the same size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedIntrinsic(pub Size);

impl IntrinsicSize for FixedIntrinsic {
    fn fitting_size(&self, _offer: Size, _width_spec: MeasureSpec, _height_spec: MeasureSpec) -> Size {
        self.0
    }
}
