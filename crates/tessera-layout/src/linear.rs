//! Linear container: children stacked along one axis.
//!
//! Measurement runs in two phases. Children without weight are measured
//! first, in order, each against the space the previous ones left over.
//! Weighted children then share what remains: every weighted child is
//! offered `remaining * weight / remaining_weight`, after which both the pool
//! and the remaining weight shrink. Placement packs children along the main
//! axis and aligns them on the cross axis by gravity.

use smallvec::{smallvec, SmallVec};
use tessera_core::{Insets, MeasureSpec, Orientation, Size};

use crate::measure::{measure_child, measure_child_forced, padded_space, point_on, spec_on, Arrangement, Slot};
use crate::tree::{LayoutTree, NodeId};

/// A container stacking its children vertically or horizontally.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinearContainer {
    pub orientation: Orientation,
    pub padding: Insets,
}

impl LinearContainer {
    pub fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            padding: Insets::ZERO,
        }
    }

    /// Create a vertical stack.
    pub fn vertical() -> Self {
        Self::new(Orientation::Vertical)
    }

    /// Create a horizontal stack.
    pub fn horizontal() -> Self {
        Self::new(Orientation::Horizontal)
    }

    pub fn with_padding(mut self, padding: Insets) -> Self {
        self.padding = padding;
        self
    }
}

pub(crate) fn layout(
    tree: &LayoutTree,
    container: &LinearContainer,
    children: &[NodeId],
    offer: Size,
    width_spec: MeasureSpec,
    height_spec: MeasureSpec,
) -> Arrangement {
    let main = container.orientation;
    let cross = main.cross();
    let padding = container.padding;
    let padded = padded_space(offer, &padding, width_spec, height_spec);
    let main_spec = spec_on(main, width_spec, height_spec);

    // Fixed children
    let mut sizes: SmallVec<[Option<Size>; 8]> = smallvec![None; children.len()];
    let mut total_weight = 0.0;
    let mut remaining = padded.get(main);
    let mut deferred_min = 0.0;
    for (index, &child) in children.iter().enumerate() {
        let Some(node) = tree.get(child) else {
            continue;
        };
        if !node.occupies_space() {
            continue;
        }

        let props = node.properties();
        let margin = props.margins();
        if props.is_weighted() {
            total_weight += props.weight;
            remaining -= margin.total(main) + props.min(main);
            deferred_min += props.min(main);
            continue;
        }

        remaining -= margin.total(main);
        let child_offer = Size::from_axes(main, remaining, padded.get(cross) - margin.total(cross));
        let size = measure_child(tree, child, child_offer, width_spec, height_spec);
        remaining = (remaining - size.get(main)).max(0.0);
        sizes[index] = Some(size);
    }

    // Weighted children
    remaining += deferred_min;
    let force_exact = (main_spec == MeasureSpec::Exact).then_some(main);
    for (index, &child) in children.iter().enumerate() {
        let Some(node) = tree.get(child) else {
            continue;
        };
        let props = node.properties();
        if !node.occupies_space() || !props.is_weighted() {
            continue;
        }

        let margin = props.margins();
        let share = remaining * props.weight / total_weight;
        let child_offer = Size::from_axes(main, share, padded.get(cross) - margin.total(cross));
        let size = measure_child_forced(tree, child, child_offer, width_spec, height_spec, force_exact);
        remaining = (remaining - size.get(main)).max(0.0);
        total_weight -= props.weight;
        sizes[index] = Some(size);
    }

    // Placement
    let mut cursor = padding.leading(main);
    let mut cross_extent = padding.leading(cross);
    let mut slots = SmallVec::new();
    for (index, &child) in children.iter().enumerate() {
        let (Some(node), Some(size)) = (tree.get(child), sizes[index]) else {
            continue;
        };

        let props = node.properties();
        let margin = props.margins();
        let main_pos = cursor + margin.leading(main);
        let cross_pos = padding.leading(cross) + margin.leading(cross);
        let slack = padded.get(cross) - margin.total(cross) - size.get(cross);
        cross_extent = cross_extent.max(cross_pos + size.get(cross) + margin.trailing(cross));
        cursor = main_pos + size.get(main) + margin.trailing(main);
        slots.push(Slot {
            node: child,
            origin: point_on(main, main_pos, cross_pos),
            size,
            shift: point_on(main, 0.0, slack * props.gravity(cross)),
        });
    }

    let natural = Size::from_axes(
        main,
        cursor + padding.trailing(main),
        cross_extent + padding.trailing(cross),
    );
    Arrangement {
        size: MeasureSpec::resolve_size(natural, offer, width_spec, height_spec),
        slots,
        content_extent: None,
    }
}
