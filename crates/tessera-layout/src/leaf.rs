//! Leaf nodes and their self-measurement.

use tessera_core::{Insets, MeasureSpec, Size};

use crate::host::IntrinsicSize;
use crate::text::{measure_text, TextStyle};

/// What a leaf displays, as far as layout is concerned.
#[derive(Debug)]
pub enum LeafContent {
    /// No content; the leaf measures as its padding
    View,
    /// Text estimated with the built-in metrics
    Text { text: String, style: TextStyle },
    /// An image with a natural pixel size
    Image { natural: Size },
    /// A platform widget queried through the host
    Native(Box<dyn IntrinsicSize>),
}

/// A node without children.
#[derive(Debug)]
pub struct Leaf {
    pub padding: Insets,
    pub content: LeafContent,
}

impl Leaf {
    pub fn new(content: LeafContent) -> Self {
        Self {
            padding: Insets::ZERO,
            content,
        }
    }

    /// A content-less view.
    pub fn empty() -> Self {
        Self::new(LeafContent::View)
    }

    pub fn text(text: impl Into<String>, style: TextStyle) -> Self {
        Self::new(LeafContent::Text {
            text: text.into(),
            style,
        })
    }

    pub fn image(width: f64, height: f64) -> Self {
        Self::new(LeafContent::Image {
            natural: Size::new(width, height),
        })
    }

    pub fn native(widget: impl IntrinsicSize + 'static) -> Self {
        Self::new(LeafContent::Native(Box::new(widget)))
    }

    pub fn with_padding(mut self, padding: Insets) -> Self {
        self.padding = padding;
        self
    }

    /// Short name of the content kind, used in tree dumps.
    pub fn kind_name(&self) -> &'static str {
        match self.content {
            LeafContent::View => "view",
            LeafContent::Text { .. } => "text",
            LeafContent::Image { .. } => "image",
            LeafContent::Native(_) => "native",
        }
    }

    /// Measure the leaf: content size plus padding, resolved against the
    /// offer by mode.
    pub fn measure(&self, offer: Size, width_spec: MeasureSpec, height_spec: MeasureSpec) -> Size {
        let inner_offer = offer.deflate(&self.padding);
        let content = match &self.content {
            LeafContent::View => Size::ZERO,
            LeafContent::Text { text, style } => {
                let max_width = match width_spec {
                    MeasureSpec::Unspecified => None,
                    MeasureSpec::Limit | MeasureSpec::Exact => Some(inner_offer.width),
                };
                let metrics = measure_text(text, style, max_width);
                Size::new(metrics.width, metrics.height)
            }
            LeafContent::Image { natural } => *natural,
            LeafContent::Native(widget) => widget.fitting_size(inner_offer, width_spec, height_spec),
        };
        let natural = Size::new(
            content.width + self.padding.horizontal(),
            content.height + self.padding.vertical(),
        );
        MeasureSpec::resolve_size(natural, offer, width_spec, height_spec)
    }
}
