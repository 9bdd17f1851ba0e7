//! Frame container: children overlap, each aligned independently.

use glam::DVec2;
use smallvec::SmallVec;
use tessera_core::{Insets, MeasureSpec, Size};

use crate::measure::{measure_child, padded_space, Arrangement, Slot};
use crate::tree::{LayoutTree, NodeId};

/// A container that stacks its children on top of each other.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameContainer {
    pub padding: Insets,
}

impl FrameContainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_padding(mut self, padding: Insets) -> Self {
        self.padding = padding;
        self
    }
}

pub(crate) fn layout(
    tree: &LayoutTree,
    container: &FrameContainer,
    children: &[NodeId],
    offer: Size,
    width_spec: MeasureSpec,
    height_spec: MeasureSpec,
) -> Arrangement {
    let padding = container.padding;
    let padded = padded_space(offer, &padding, width_spec, height_spec);
    let mut natural = Size::new(padding.left, padding.top);
    let mut slots = SmallVec::new();

    for &child in children {
        let Some(node) = tree.get(child) else {
            continue;
        };
        if !node.occupies_space() {
            continue;
        }

        let props = node.properties();
        let margin = props.margins();
        let size = measure_child(tree, child, padded.deflate(&margin), width_spec, height_spec);
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
        content_extent: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leaf::Leaf;
    use crate::measure::measure_node;
    use crate::tree::Node;
    use tessera_core::{Dimension, Gravity, LayoutProperties, Visibility};

    fn frame_with(tree: &mut LayoutTree, container: FrameContainer, children: Vec<Node>) -> (NodeId, Vec<NodeId>) {
        let root = tree.insert(Node::new(container));
        let ids = children
            .into_iter()
            .map(|child| {
                let id = tree.insert(child);
                tree.append_child(root, id).unwrap();
                id
            })
            .collect();
        (root, ids)
    }

    fn arrange(tree: &LayoutTree, root: NodeId, width: f64, height: f64) -> Arrangement {
        let node = tree.get(root).unwrap();
        crate::measure::arrange_node(tree, node, Size::new(width, height), MeasureSpec::Exact, MeasureSpec::Exact)
    }

    #[test]
    fn test_gravity_placement() {
        let mut tree = LayoutTree::new();
        let child = Node::new(Leaf::empty())
            .with_properties(LayoutProperties::fixed(50.0, 20.0).with_gravity(Gravity::new(1.0, 0.5)));
        let (root, _) = frame_with(&mut tree, FrameContainer::new(), vec![child]);

        let arrangement = arrange(&tree, root, 200.0, 100.0);
        let frame = arrangement.slots[0].frame();
        assert!((frame.x - 150.0).abs() < 0.001);
        assert!((frame.y - 40.0).abs() < 0.001);
        assert!((frame.width - 50.0).abs() < 0.001);
    }

    #[test]
    fn test_gravity_not_part_of_measured_size() {
        let mut tree = LayoutTree::new();
        let child = Node::new(Leaf::empty())
            .with_properties(LayoutProperties::fixed(50.0, 20.0).with_gravity(Gravity::BOTTOM_RIGHT));
        let (root, _) = frame_with(&mut tree, FrameContainer::new(), vec![child]);

        let size = measure_node(&tree, root, Size::new(200.0, 100.0), MeasureSpec::Limit, MeasureSpec::Limit);
        assert_eq!(size, Size::new(50.0, 20.0));
    }

    #[test]
    fn test_stretch_minus_margins() {
        let mut tree = LayoutTree::new();
        let child = Node::new(Leaf::image(10.0, 10.0)).with_properties(
            LayoutProperties::new()
                .with_width(Dimension::Stretch)
                .with_margin(Insets::symmetric(12.0, 0.0)),
        );
        let (root, _) = frame_with(&mut tree, FrameContainer::new(), vec![child]);

        let arrangement = arrange(&tree, root, 300.0, 100.0);
        let frame = arrangement.slots[0].frame();
        assert!((frame.width - 276.0).abs() < 0.001);
        assert!((frame.x - 12.0).abs() < 0.001);
    }

    #[test]
    fn test_natural_size_is_bounding_box() {
        let mut tree = LayoutTree::new();
        let a = Node::new(Leaf::empty()).with_properties(LayoutProperties::fixed(40.0, 10.0));
        let b = Node::new(Leaf::empty())
            .with_properties(LayoutProperties::fixed(20.0, 30.0).with_margin(Insets::new(5.0, 0.0, 5.0, 0.0)));
        let (root, _) = frame_with(&mut tree, FrameContainer::new().with_padding(Insets::uniform(4.0)), vec![a, b]);

        let size = measure_node(&tree, root, Size::ZERO, MeasureSpec::Unspecified, MeasureSpec::Unspecified);
        assert_eq!(size, Size::new(48.0, 48.0));
    }

    #[test]
    fn test_gone_children_skipped() {
        let mut tree = LayoutTree::new();
        let a = Node::new(Leaf::empty())
            .with_properties(LayoutProperties::fixed(40.0, 40.0))
            .with_visibility(Visibility::Gone);
        let b = Node::new(Leaf::empty())
            .with_properties(LayoutProperties::fixed(40.0, 40.0))
            .with_visibility(Visibility::Invisible);
        let (root, ids) = frame_with(&mut tree, FrameContainer::new(), vec![a, b]);

        let arrangement = arrange(&tree, root, 100.0, 100.0);
        assert_eq!(arrangement.slots.len(), 1);
        assert_eq!(arrangement.slots[0].node, ids[1]);
    }

    #[test]
    fn test_limit_mode_caps_natural_size() {
        let mut tree = LayoutTree::new();
        let child = Node::new(Leaf::image(500.0, 20.0));
        let (root, _) = frame_with(&mut tree, FrameContainer::new(), vec![child]);

        let size = measure_node(&tree, root, Size::new(100.0, 100.0), MeasureSpec::Limit, MeasureSpec::Limit);
        assert_eq!(size, Size::new(100.0, 20.0));
    }
}
