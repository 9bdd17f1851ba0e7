//! Layout passes over a tree.

use log::{debug, trace};
use tessera_core::{MeasureSpec, TreeError};

use crate::measure;
use crate::tree::{Bounds, LayoutTree, NodeId};

/// Options for layout computation.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutOptions {
    /// Width the root is laid out at
    pub viewport_width: f64,
    /// Height the root is laid out at
    pub viewport_height: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            viewport_width: 800.0,
            viewport_height: 600.0,
        }
    }
}

impl LayoutOptions {
    pub fn new(viewport_width: f64, viewport_height: f64) -> Self {
        Self {
            viewport_width,
            viewport_height,
        }
    }
}

/// Lay out `root` to fill the viewport, then refresh absolute bounds.
pub fn compute_layout(tree: &mut LayoutTree, root: NodeId, options: &LayoutOptions) -> Result<(), TreeError> {
    debug!(
        "Layout pass for {root} at {}x{}",
        options.viewport_width, options.viewport_height
    );
    let bounds = Bounds::new(0.0, 0.0, options.viewport_width, options.viewport_height);
    arrange(tree, root, bounds)?;
    tree.compute_absolute_bounds(root);
    debug!("Layout pass for {root} done");
    Ok(())
}

/// Give a node its final frame and place its subtree inside it.
///
/// The node is measured with exact modes at the frame size. Child containers
/// whose size is unchanged and that do not need layout keep their previous
/// arrangement.
pub fn arrange(tree: &mut LayoutTree, id: NodeId, bounds: Bounds) -> Result<(), TreeError> {
    tree.node(id)?;
    tree.set_frame(id, bounds);
    arrange_children(tree, id);
    Ok(())
}

fn arrange_children(tree: &mut LayoutTree, id: NodeId) {
    let Some(node) = tree.get(id) else {
        return;
    };
    let arrangement = measure::arrange_node(
        tree,
        node,
        node.frame().size(),
        MeasureSpec::Exact,
        MeasureSpec::Exact,
    );
    if let Some(extent) = arrangement.content_extent {
        tree.record_content_extent(id, extent);
    }

    for slot in &arrangement.slots {
        let previous = tree.get(slot.node).map(|n| n.frame().size());
        tree.set_frame(slot.node, slot.frame());
        let Some(child) = tree.get(slot.node) else {
            continue;
        };
        let is_container = child.kind().is_container();
        let dirty = child.needs_layout() || previous != Some(slot.size);

        if is_container && dirty {
            arrange_children(tree, slot.node);
        } else {
            if is_container {
                trace!("Skipping clean subtree {}", slot.node);
            }
            tree.mark_clean(slot.node);
        }
    }
    tree.mark_clean(id);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::FrameContainer;
    use crate::host::LayoutHost;
    use crate::leaf::Leaf;
    use crate::linear::LinearContainer;
    use crate::scroll::ScrollContainer;
    use crate::tree::{Node, NodeKind};
    use glam::DVec2;
    use std::cell::RefCell;
    use std::rc::Rc;
    use tessera_core::{Dimension, Insets, LayoutProperties, Size, Visibility};

    #[derive(Default)]
    struct Recorder {
        frames: Rc<RefCell<Vec<NodeId>>>,
        extents: Rc<RefCell<Vec<Size>>>,
    }

    impl LayoutHost for Recorder {
        fn frame_changed(&mut self, node: NodeId, _frame: Bounds) {
            self.frames.borrow_mut().push(node);
        }

        fn content_extent_changed(&mut self, _node: NodeId, extent: Size) {
            self.extents.borrow_mut().push(extent);
        }
    }

    fn frame_of(tree: &LayoutTree, id: NodeId) -> Bounds {
        tree.get(id).unwrap().frame()
    }

    /// Vertical list, padding 16: a 40 high header and a weighted body.
    fn sample(tree: &mut LayoutTree) -> (NodeId, NodeId, NodeId) {
        let root = tree.insert(Node::new(LinearContainer::vertical().with_padding(Insets::uniform(16.0))));
        let a = tree.insert(Node::new(Leaf::empty()).with_properties(
            LayoutProperties::new().with_width(Dimension::Stretch).with_height(40.0),
        ));
        let b = tree.insert(Node::new(Leaf::empty()).with_properties(
            LayoutProperties::new().with_width(Dimension::Stretch).with_weight(1.0),
        ));
        tree.append_child(root, a).unwrap();
        tree.append_child(root, b).unwrap();
        (root, a, b)
    }

    #[test]
    fn test_end_to_end_linear() {
        let mut tree = LayoutTree::new();
        let (root, a, b) = sample(&mut tree);
        compute_layout(&mut tree, root, &LayoutOptions::new(300.0, 300.0)).unwrap();

        let root_frame = frame_of(&tree, root);
        assert!((root_frame.width - 300.0).abs() < 0.001);
        assert!((root_frame.height - 300.0).abs() < 0.001);

        let a_frame = frame_of(&tree, a);
        assert!((a_frame.y - 16.0).abs() < 0.001);
        assert!((a_frame.bottom() - 56.0).abs() < 0.001);
        assert!((a_frame.width - 268.0).abs() < 0.001);

        let b_frame = frame_of(&tree, b);
        assert!((b_frame.y - 56.0).abs() < 0.001);
        assert!((b_frame.bottom() - 284.0).abs() < 0.001);
        assert!((b_frame.width - 268.0).abs() < 0.001);

        assert!(tree.nodes().all(|n| !n.needs_layout()));
    }

    #[test]
    fn test_unknown_root() {
        let mut tree = LayoutTree::new();
        assert_eq!(
            compute_layout(&mut tree, NodeId(3), &LayoutOptions::default()),
            Err(TreeError::UnknownNode { id: 3 })
        );
    }

    #[test]
    fn test_second_pass_sets_no_frames() {
        let recorder = Recorder::default();
        let frames = recorder.frames.clone();
        let mut tree = LayoutTree::with_host(recorder);
        let (root, _, _) = sample(&mut tree);
        let options = LayoutOptions::new(300.0, 300.0);

        compute_layout(&mut tree, root, &options).unwrap();
        let first = frames.borrow().len();
        assert_eq!(first, 3);
        compute_layout(&mut tree, root, &options).unwrap();
        assert_eq!(frames.borrow().len(), first);
    }

    #[test]
    fn test_clean_subtree_skipped() {
        let mut tree = LayoutTree::new();
        let root = tree.insert(Node::new(FrameContainer::new()));
        let inner = tree.insert(Node::new(FrameContainer::new()).with_properties(LayoutProperties::fixed(100.0, 100.0)));
        let leaf = tree.insert(Node::new(Leaf::empty()).with_properties(LayoutProperties::fixed(10.0, 10.0)));
        tree.append_child(root, inner).unwrap();
        tree.append_child(inner, leaf).unwrap();
        compute_layout(&mut tree, root, &LayoutOptions::default()).unwrap();

        // A clean container of unchanged size is not re-arranged
        tree.set_frame(leaf, Bounds::new(5.0, 5.0, 10.0, 10.0));
        compute_layout(&mut tree, root, &LayoutOptions::default()).unwrap();
        assert!((frame_of(&tree, leaf).x - 5.0).abs() < 0.001);

        tree.mark_dirty(leaf);
        compute_layout(&mut tree, root, &LayoutOptions::default()).unwrap();
        assert!(frame_of(&tree, leaf).x.abs() < 0.001);
    }

    #[test]
    fn test_mutation_relayout() {
        let mut tree = LayoutTree::new();
        let (root, a, b) = sample(&mut tree);
        let options = LayoutOptions::new(300.0, 300.0);
        compute_layout(&mut tree, root, &options).unwrap();

        tree.update_properties(a, |p| p.height = Dimension::Exact(100.0)).unwrap();
        assert!(tree.get(root).unwrap().needs_layout());
        compute_layout(&mut tree, root, &options).unwrap();
        assert!((frame_of(&tree, b).y - 116.0).abs() < 0.001);

        tree.set_visibility(a, Visibility::Gone).unwrap();
        compute_layout(&mut tree, root, &options).unwrap();
        assert!((frame_of(&tree, b).y - 16.0).abs() < 0.001);
        assert!((frame_of(&tree, b).height - 268.0).abs() < 0.001);
    }

    #[test]
    fn test_scroll_extent_and_offset() {
        let recorder = Recorder::default();
        let extents = recorder.extents.clone();
        let mut tree = LayoutTree::with_host(recorder);
        let scroll = tree.insert(Node::new(ScrollContainer::vertical()));
        let content = tree.insert(Node::new(Leaf::image(100.0, 1000.0)));
        tree.append_child(scroll, content).unwrap();
        compute_layout(&mut tree, scroll, &LayoutOptions::new(300.0, 400.0)).unwrap();

        let NodeKind::Scroll(state) = tree.get(scroll).unwrap().kind() else {
            panic!("expected a scroll container");
        };
        assert_eq!(state.content_extent(), Size::new(100.0, 1000.0));
        assert_eq!(*extents.borrow(), vec![Size::new(100.0, 1000.0)]);

        let offset = tree.scroll_to(scroll, DVec2::new(50.0, 900.0)).unwrap();
        assert_eq!(offset, DVec2::new(0.0, 600.0));
        let abs = tree.get(content).unwrap().absolute_bounds();
        assert!((abs.y + 600.0).abs() < 0.001);

        // Hit testing follows the scrolled content
        assert_eq!(tree.hit_test(scroll, DVec2::new(10.0, 10.0)), Some(content));
    }

    #[test]
    fn test_shrinking_content_clamps_offset() {
        let mut tree = LayoutTree::new();
        let scroll = tree.insert(Node::new(ScrollContainer::vertical()));
        let content = tree.insert(Node::new(Leaf::image(100.0, 1000.0)));
        tree.append_child(scroll, content).unwrap();
        let options = LayoutOptions::new(300.0, 400.0);
        compute_layout(&mut tree, scroll, &options).unwrap();
        tree.scroll_to(scroll, DVec2::new(0.0, 600.0)).unwrap();

        tree.update_leaf(content, |leaf| *leaf = Leaf::image(100.0, 500.0)).unwrap();
        compute_layout(&mut tree, scroll, &options).unwrap();
        let NodeKind::Scroll(state) = tree.get(scroll).unwrap().kind() else {
            panic!("expected a scroll container");
        };
        assert_eq!(state.scroll_offset(), DVec2::new(0.0, 100.0));
    }
}
