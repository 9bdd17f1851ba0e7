//! Shared measurement utility used by every container strategy.

use glam::DVec2;
use log::{trace, warn};
use smallvec::SmallVec;
use tessera_core::{Axis, Insets, MeasureSpec, Size, UNBOUNDED};

use crate::tree::{Bounds, LayoutTree, Node, NodeId, NodeKind};
use crate::{frame, linear, scroll};

/// Where a container places one child.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slot {
    pub node: NodeId,
    /// Position from padding and margins alone
    pub origin: DVec2,
    pub size: Size,
    /// Gravity offset within the slack space, applied only when placing
    pub shift: DVec2,
}

impl Slot {
    /// Final frame relative to the container.
    pub fn frame(&self) -> Bounds {
        Bounds::from_origin_size(self.origin + self.shift, self.size)
    }
}

/// Result of running a container strategy against an offer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arrangement {
    /// The container's own resolved size
    pub size: Size,
    /// Children that take part in layout, in order
    pub slots: SmallVec<[Slot; 8]>,
    /// Scrollable content size, for scroll containers only
    pub content_extent: Option<Size>,
}

impl Arrangement {
    pub(crate) fn sized(size: Size) -> Self {
        Self {
            size,
            ..Default::default()
        }
    }
}

/// Ask a node to measure itself, without applying its own layout
/// properties. Unknown nodes measure as zero.
pub fn measure_node(
    tree: &LayoutTree,
    id: NodeId,
    offer: Size,
    width_spec: MeasureSpec,
    height_spec: MeasureSpec,
) -> Size {
    match tree.get(id) {
        Some(node) => arrange_node(tree, node, offer, width_spec, height_spec).size,
        None => Size::ZERO,
    }
}

/// Run the node's layout strategy.
pub(crate) fn arrange_node(
    tree: &LayoutTree,
    node: &Node,
    offer: Size,
    width_spec: MeasureSpec,
    height_spec: MeasureSpec,
) -> Arrangement {
    let arrangement = match &node.kind {
        NodeKind::Frame(container) => frame::layout(tree, container, &node.children, offer, width_spec, height_spec),
        NodeKind::Linear(container) => linear::layout(tree, container, &node.children, offer, width_spec, height_spec),
        NodeKind::Scroll(container) => scroll::layout(tree, container, offer, width_spec, height_spec),
        NodeKind::Leaf(leaf) => Arrangement::sized(leaf.measure(offer, width_spec, height_spec)),
    };
    trace!(
        "Measured {} {} as {}x{} (offer {}x{}, {:?}/{:?})",
        node.kind.name(),
        node.id,
        arrangement.size.width,
        arrangement.size.height,
        offer.width,
        offer.height,
        width_spec,
        height_spec
    );
    arrangement
}

/// Measure `child` on behalf of its container.
///
/// Derives the child's offer and modes from the parent's offer and modes
/// and the child's layout properties, lets the child measure itself, then
/// clamps the result to `[min, offer]` on both axes.
pub fn measure_child(
    tree: &LayoutTree,
    child: NodeId,
    offer: Size,
    parent_width_spec: MeasureSpec,
    parent_height_spec: MeasureSpec,
) -> Size {
    measure_child_forced(tree, child, offer, parent_width_spec, parent_height_spec, None)
}

/// `measure_child` with the child's mode on `force_exact` pinned to `Exact`.
pub(crate) fn measure_child_forced(
    tree: &LayoutTree,
    child: NodeId,
    offer: Size,
    parent_width_spec: MeasureSpec,
    parent_height_spec: MeasureSpec,
    force_exact: Option<Axis>,
) -> Size {
    let Some(node) = tree.get(child) else {
        return Size::ZERO;
    };
    let props = &node.properties;
    if !props.is_consistent() {
        warn!(
            "Node {child} has min > max ({}..{} x {}..{})",
            props.min_width, props.max_width, props.min_height, props.max_height
        );
    }

    let mut child_offer = Size::ZERO;
    let mut specs = [MeasureSpec::Unspecified; 2];
    for (slot, axis) in [Axis::Horizontal, Axis::Vertical].into_iter().enumerate() {
        let parent_spec = spec_on(axis, parent_width_spec, parent_height_spec);
        let dimension = props.dimension(axis);
        let mut spec = parent_spec.derived();
        if force_exact == Some(axis) || (parent_spec == MeasureSpec::Exact && dimension.is_stretch()) {
            spec = MeasureSpec::Exact;
        }

        let available = offer.get(axis).max(0.0);
        let min = props.min(axis);
        let max = props.max(axis);
        let extent = match dimension.explicit() {
            Some(explicit) if spec != MeasureSpec::Exact => {
                spec = MeasureSpec::Exact;
                available.min(min.max(explicit.min(max)))
            }
            _ => available.min(min.max(max)),
        };
        child_offer.set(axis, extent);
        specs[slot] = spec;
    }

    let measured = measure_node(tree, child, child_offer, specs[0], specs[1]);
    Size::new(
        child_offer.width.min(props.min(Axis::Horizontal).max(measured.width)),
        child_offer.height.min(props.min(Axis::Vertical).max(measured.height)),
    )
}

/// Pick the mode for an axis.
pub(crate) fn spec_on(axis: Axis, width_spec: MeasureSpec, height_spec: MeasureSpec) -> MeasureSpec {
    match axis {
        Axis::Horizontal => width_spec,
        Axis::Vertical => height_spec,
    }
}

/// Space inside the padding, unbounded on axes without a limit.
pub(crate) fn padded_space(offer: Size, padding: &Insets, width_spec: MeasureSpec, height_spec: MeasureSpec) -> Size {
    let mut padded = offer.deflate(padding);
    if width_spec == MeasureSpec::Unspecified {
        padded.width = UNBOUNDED;
    }
    if height_spec == MeasureSpec::Unspecified {
        padded.height = UNBOUNDED;
    }
    padded
}

/// A point from main-axis and cross-axis coordinates.
pub(crate) fn point_on(main_axis: Axis, main: f64, cross: f64) -> DVec2 {
    match main_axis {
        Axis::Horizontal => DVec2::new(main, cross),
        Axis::Vertical => DVec2::new(cross, main),
    }
}
