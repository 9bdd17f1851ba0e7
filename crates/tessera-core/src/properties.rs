//! Per-node layout configuration.

use crate::types::{Axis, Dimension, Gravity, Insets, UNBOUNDED};

/// Sizing and placement rules a node declares to its container.
///
/// Every node owns exactly one `LayoutProperties` value. The type is plain
/// data: cloning it gives an independent copy, so two nodes never share
/// configuration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LayoutProperties {
    /// Space reserved around the node, outside its box
    pub margin: Insets,
    pub min_width: f64,
    pub max_width: f64,
    pub min_height: f64,
    pub max_height: f64,
    pub width: Dimension,
    pub height: Dimension,
    /// Horizontal alignment within slack space, 0 = left, 1 = right
    pub horizontal_gravity: f64,
    /// Vertical alignment within slack space, 0 = top, 1 = bottom
    pub vertical_gravity: f64,
    /// Share of leftover space in a linear container, 0 = not weighted
    pub weight: f64,
    /// Keep occupying layout space while hidden
    pub hidden_takes_space: bool,
}

impl Default for LayoutProperties {
    fn default() -> Self {
        Self {
            margin: Insets::ZERO,
            min_width: 0.0,
            max_width: UNBOUNDED,
            min_height: 0.0,
            max_height: UNBOUNDED,
            width: Dimension::Fit,
            height: Dimension::Fit,
            horizontal_gravity: 0.0,
            vertical_gravity: 0.0,
            weight: 0.0,
            hidden_takes_space: false,
        }
    }
}

impl LayoutProperties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Both dimensions stretch to the parent.
    pub fn stretched() -> Self {
        Self::default().with_size(Dimension::Stretch, Dimension::Stretch)
    }

    /// Fixed width and height.
    pub fn fixed(width: f64, height: f64) -> Self {
        Self::default().with_size(Dimension::Exact(width), Dimension::Exact(height))
    }

    pub fn with_width(mut self, width: impl Into<Dimension>) -> Self {
        self.width = width.into();
        self
    }

    pub fn with_height(mut self, height: impl Into<Dimension>) -> Self {
        self.height = height.into();
        self
    }

    pub fn with_size(self, width: impl Into<Dimension>, height: impl Into<Dimension>) -> Self {
        self.with_width(width).with_height(height)
    }

    pub fn with_margin(mut self, margin: Insets) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_min_size(mut self, min_width: f64, min_height: f64) -> Self {
        self.min_width = min_width;
        self.min_height = min_height;
        self
    }

    pub fn with_max_size(mut self, max_width: f64, max_height: f64) -> Self {
        self.max_width = max_width;
        self.max_height = max_height;
        self
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_gravity(mut self, gravity: Gravity) -> Self {
        self.horizontal_gravity = gravity.horizontal;
        self.vertical_gravity = gravity.vertical;
        self
    }

    pub fn with_hidden_takes_space(mut self, hidden_takes_space: bool) -> Self {
        self.hidden_takes_space = hidden_takes_space;
        self
    }

    /// Declared dimension along an axis.
    pub fn dimension(&self, axis: Axis) -> Dimension {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    /// Minimum along an axis; negative minimums count as zero.
    pub fn min(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.min_width.max(0.0),
            Axis::Vertical => self.min_height.max(0.0),
        }
    }

    /// Maximum along an axis.
    pub fn max(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.max_width,
            Axis::Vertical => self.max_height,
        }
    }

    /// Gravity coefficient along an axis.
    pub fn gravity(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.horizontal_gravity,
            Axis::Vertical => self.vertical_gravity,
        }
    }

    /// Margins with negative sides clamped to zero.
    pub fn margins(&self) -> Insets {
        self.margin.non_negative()
    }

    /// Whether `min <= max` holds on both axes.
    pub fn is_consistent(&self) -> bool {
        self.min_width <= self.max_width && self.min_height <= self.max_height
    }

    /// Whether the node takes part in weighted distribution.
    pub fn is_weighted(&self) -> bool {
        self.weight > 0.0
    }
}
