//! Scroll container: one content node over an unbounded scroll axis.

use glam::DVec2;
use smallvec::SmallVec;
use tessera_core::{Axis, Insets, MeasureSpec, Orientation, Size, UNBOUNDED};

use crate::measure::{measure_child, padded_space, spec_on, Arrangement, Slot};
use crate::tree::{LayoutTree, NodeId};

/// A container scrolling a single content node.
///
/// An optional background node is measured and placed like the content but
/// is never grown to fill the viewport.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScrollContainer {
    pub orientation: Orientation,
    pub padding: Insets,
    /// Grow content smaller than the viewport to cover it
    pub fill_content: bool,
    pub(crate) content: Option<NodeId>,
    pub(crate) background: Option<NodeId>,
    pub(crate) content_extent: Size,
    pub(crate) scroll_offset: DVec2,
}

impl ScrollContainer {
    pub fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            ..Default::default()
        }
    }

    pub fn vertical() -> Self {
        Self::new(Orientation::Vertical)
    }

    pub fn horizontal() -> Self {
        Self::new(Orientation::Horizontal)
    }

    pub fn with_padding(mut self, padding: Insets) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_fill_content(mut self, fill_content: bool) -> Self {
        self.fill_content = fill_content;
        self
    }

    pub fn content(&self) -> Option<NodeId> {
        self.content
    }

    pub fn background(&self) -> Option<NodeId> {
        self.background
    }

    /// Scrollable size recorded by the last arrange pass.
    pub fn content_extent(&self) -> Size {
        self.content_extent
    }

    pub fn scroll_offset(&self) -> DVec2 {
        self.scroll_offset
    }
}

pub(crate) fn layout(
    tree: &LayoutTree,
    container: &ScrollContainer,
    offer: Size,
    width_spec: MeasureSpec,
    height_spec: MeasureSpec,
) -> Arrangement {
    let scroll_axis = container.orientation;
    let cross = scroll_axis.cross();
    let padding = container.padding;
    let padded = padded_space(offer, &padding, width_spec, height_spec);
    let (child_width_spec, child_height_spec) = match scroll_axis {
        Axis::Horizontal => (MeasureSpec::Unspecified, height_spec),
        Axis::Vertical => (width_spec, MeasureSpec::Unspecified),
    };

    let mut natural = Size::new(padding.left, padding.top);
    let mut slots = SmallVec::new();
    let candidates = [(container.background, false), (container.content, true)];
    for (child, is_content) in candidates {
        let Some(child) = child else {
            continue;
        };
        let Some(node) = tree.get(child) else {
            continue;
        };
        if !node.occupies_space() {
            continue;
        }

        let props = node.properties();
        let margin = props.margins();
        let child_offer = Size::from_axes(scroll_axis, UNBOUNDED, padded.get(cross) - margin.total(cross));
        let mut size = measure_child(tree, child, child_offer, child_width_spec, child_height_spec);
        if is_content && container.fill_content {
            for axis in [Axis::Horizontal, Axis::Vertical] {
                let filled = padded.get(axis) - margin.total(axis);
                if spec_on(axis, width_spec, height_spec) == MeasureSpec::Exact && size.get(axis) < filled {
                    size.set(axis, filled);
                }
            }
        }

        let origin = DVec2::new(padding.left + margin.left, padding.top + margin.top);
        let shift = DVec2::new(
            (padded.width - margin.horizontal() - size.width) * props.horizontal_gravity,
            (padded.height - margin.vertical() - size.height) * props.vertical_gravity,
        );
        natural.width = natural.width.max(origin.x + size.width + margin.right);
        natural.height = natural.height.max(origin.y + size.height + margin.bottom);
        slots.push(Slot {
            node: child,
            origin,
            size,
            shift,
        });
    }

    natural.width += padding.right;
    natural.height += padding.bottom;
    Arrangement {
        size: MeasureSpec::resolve_size(natural, offer, width_spec, height_spec),
        slots,
        content_extent: Some(natural),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leaf::Leaf;
    use crate::measure::{arrange_node, measure_node};
    use crate::tree::Node;
    use tessera_core::{Dimension, LayoutProperties};

    fn scroll_with(tree: &mut LayoutTree, container: ScrollContainer, content: Node) -> (NodeId, NodeId) {
        let scroll = tree.insert(Node::new(container));
        let content = tree.insert(content);
        tree.append_child(scroll, content).unwrap();
        (scroll, content)
    }

    fn arrange(tree: &LayoutTree, root: NodeId, width: f64, height: f64) -> Arrangement {
        let node = tree.get(root).unwrap();
        arrange_node(tree, node, Size::new(width, height), MeasureSpec::Exact, MeasureSpec::Exact)
    }

    #[test]
    fn test_content_unbounded_on_scroll_axis() {
        let mut tree = LayoutTree::new();
        let content = Node::new(Leaf::image(50.0, 2000.0));
        let (scroll, _) = scroll_with(&mut tree, ScrollContainer::vertical(), content);

        let arrangement = arrange(&tree, scroll, 300.0, 400.0);
        assert_eq!(arrangement.size, Size::new(300.0, 400.0));
        assert_eq!(arrangement.slots[0].size, Size::new(50.0, 2000.0));
        assert_eq!(arrangement.content_extent, Some(Size::new(50.0, 2000.0)));
    }

    #[test]
    fn test_cross_axis_limited_to_viewport() {
        let mut tree = LayoutTree::new();
        let content = Node::new(Leaf::image(500.0, 20.0));
        let (scroll, _) = scroll_with(&mut tree, ScrollContainer::vertical(), content);

        let arrangement = arrange(&tree, scroll, 300.0, 400.0);
        assert_eq!(arrangement.slots[0].size, Size::new(300.0, 20.0));
    }

    #[test]
    fn test_stretch_ignored_on_scroll_axis() {
        let mut tree = LayoutTree::new();
        let content = Node::new(Leaf::image(10.0, 10.0))
            .with_properties(LayoutProperties::new().with_width(Dimension::Stretch));
        let (scroll, _) = scroll_with(&mut tree, ScrollContainer::horizontal(), content);

        let arrangement = arrange(&tree, scroll, 300.0, 400.0);
        // Stretch only applies where the parent offer is exact
        assert_eq!(arrangement.slots[0].size, Size::new(10.0, 10.0));
    }

    #[test]
    fn test_fill_content_grows_to_viewport() {
        let mut tree = LayoutTree::new();
        let content = Node::new(Leaf::image(50.0, 100.0));
        let container = ScrollContainer::vertical().with_fill_content(true);
        let (scroll, _) = scroll_with(&mut tree, container, content);

        let arrangement = arrange(&tree, scroll, 300.0, 400.0);
        assert_eq!(arrangement.slots[0].size, Size::new(300.0, 400.0));
    }

    #[test]
    fn test_fill_content_keeps_larger_content() {
        let mut tree = LayoutTree::new();
        let content = Node::new(Leaf::image(50.0, 1000.0));
        let container = ScrollContainer::vertical().with_fill_content(true);
        let (scroll, _) = scroll_with(&mut tree, container, content);

        let arrangement = arrange(&tree, scroll, 300.0, 400.0);
        assert_eq!(arrangement.slots[0].size, Size::new(300.0, 1000.0));
    }

    #[test]
    fn test_fill_content_needs_exact_offer() {
        let mut tree = LayoutTree::new();
        let content = Node::new(Leaf::image(50.0, 100.0));
        let container = ScrollContainer::vertical().with_fill_content(true);
        let (scroll, _) = scroll_with(&mut tree, container, content);

        let size = measure_node(&tree, scroll, Size::new(300.0, 400.0), MeasureSpec::Limit, MeasureSpec::Limit);
        assert_eq!(size, Size::new(50.0, 100.0));
    }

    #[test]
    fn test_background_is_not_filled() {
        let mut tree = LayoutTree::new();
        let content = Node::new(Leaf::image(50.0, 100.0));
        let container = ScrollContainer::vertical().with_fill_content(true);
        let (scroll, content) = scroll_with(&mut tree, container, content);
        let background = tree.insert(Node::new(Leaf::image(20.0, 20.0)));
        tree.set_scroll_background(scroll, Some(background)).unwrap();

        let arrangement = arrange(&tree, scroll, 300.0, 400.0);
        assert_eq!(arrangement.slots.len(), 2);
        assert_eq!(arrangement.slots[0].node, background);
        assert_eq!(arrangement.slots[0].size, Size::new(20.0, 20.0));
        assert_eq!(arrangement.slots[1].node, content);
    }

    #[test]
    fn test_empty_scroll_measures_padding() {
        let mut tree = LayoutTree::new();
        let scroll = tree.insert(Node::new(ScrollContainer::vertical().with_padding(Insets::uniform(6.0))));

        let size = measure_node(&tree, scroll, Size::ZERO, MeasureSpec::Unspecified, MeasureSpec::Unspecified);
        assert_eq!(size, Size::new(12.0, 12.0));
    }
}
