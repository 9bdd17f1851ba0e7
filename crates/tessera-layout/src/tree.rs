//! Layout tree data structures.
//!
//! The tree is an arena of nodes addressed by `NodeId`. Children are owned
//! through the arena; a node only records the id of its parent, which is used
//! to propagate "needs layout" upwards.

use std::fmt::{self, Write as _};

use glam::DVec2;
use indexmap::IndexMap;
use log::{debug, trace};
use smallvec::SmallVec;
use tessera_core::{Insets, LayoutProperties, MeasureSpec, Orientation, Size, TreeError, Visibility};

use crate::frame::FrameContainer;
use crate::host::LayoutHost;
use crate::leaf::Leaf;
use crate::linear::LinearContainer;
use crate::measure;
use crate::scroll::ScrollContainer;

/// Unique identifier for a layout node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Axis-aligned rectangle.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    /// Position relative to parent (or absolute if root)
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Create bounds from an origin point and a size.
    pub fn from_origin_size(origin: DVec2, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    pub fn origin(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Get the right edge (x + width).
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Get the bottom edge (y + height).
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Check if a point is inside the bounds.
    pub fn contains(&self, point: DVec2) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }

    /// Move the bounds by an offset.
    pub fn translate(&self, offset: DVec2) -> Bounds {
        Bounds::new(self.x + offset.x, self.y + offset.y, self.width, self.height)
    }
}

/// The layout behavior of a node.
#[derive(Debug)]
pub enum NodeKind {
    Frame(FrameContainer),
    Linear(LinearContainer),
    Scroll(ScrollContainer),
    Leaf(Leaf),
}

impl NodeKind {
    pub fn is_container(&self) -> bool {
        !matches!(self, NodeKind::Leaf(_))
    }

    /// Short name of the kind, used in tree dumps.
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Frame(_) => "frame",
            NodeKind::Linear(_) => "linear",
            NodeKind::Scroll(_) => "scroll",
            NodeKind::Leaf(leaf) => leaf.kind_name(),
        }
    }

    pub fn padding(&self) -> Insets {
        match self {
            NodeKind::Frame(frame) => frame.padding,
            NodeKind::Linear(linear) => linear.padding,
            NodeKind::Scroll(scroll) => scroll.padding,
            NodeKind::Leaf(leaf) => leaf.padding,
        }
    }

    fn set_padding(&mut self, padding: Insets) {
        match self {
            NodeKind::Frame(frame) => frame.padding = padding,
            NodeKind::Linear(linear) => linear.padding = padding,
            NodeKind::Scroll(scroll) => scroll.padding = padding,
            NodeKind::Leaf(leaf) => leaf.padding = padding,
        }
    }
}

impl From<FrameContainer> for NodeKind {
    fn from(container: FrameContainer) -> Self {
        NodeKind::Frame(container)
    }
}

impl From<LinearContainer> for NodeKind {
    fn from(container: LinearContainer) -> Self {
        NodeKind::Linear(container)
    }
}

impl From<ScrollContainer> for NodeKind {
    fn from(container: ScrollContainer) -> Self {
        NodeKind::Scroll(container)
    }
}

impl From<Leaf> for NodeKind {
    fn from(leaf: Leaf) -> Self {
        NodeKind::Leaf(leaf)
    }
}

/// A node in the layout tree.
#[derive(Debug)]
pub struct Node {
    pub(crate) id: NodeId,
    pub(crate) name: Option<String>,
    pub(crate) properties: LayoutProperties,
    pub(crate) kind: NodeKind,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: SmallVec<[NodeId; 4]>,
    /// Frame relative to the parent
    pub(crate) frame: Bounds,
    /// Frame in root coordinates, scroll offsets applied
    pub(crate) absolute_bounds: Bounds,
    pub(crate) hidden: bool,
    pub(crate) needs_layout: bool,
}

impl Node {
    /// Create a detached node. It needs layout until its first pass.
    pub fn new(kind: impl Into<NodeKind>) -> Self {
        Self {
            id: NodeId(0),
            name: None,
            properties: LayoutProperties::default(),
            kind: kind.into(),
            parent: None,
            children: SmallVec::new(),
            frame: Bounds::default(),
            absolute_bounds: Bounds::default(),
            hidden: false,
            needs_layout: true,
        }
    }

    /// Set the name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Replace the layout properties. A hidden node keeps the visibility set
    /// by an earlier `with_visibility`.
    pub fn with_properties(mut self, properties: LayoutProperties) -> Self {
        let visibility = self.visibility();
        self.properties = properties;
        if self.hidden {
            self.apply_visibility(visibility);
        }
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.apply_visibility(visibility);
        self
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn properties(&self) -> &LayoutProperties {
        &self.properties
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn frame(&self) -> Bounds {
        self.frame
    }

    pub fn absolute_bounds(&self) -> Bounds {
        self.absolute_bounds
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn needs_layout(&self) -> bool {
        self.needs_layout
    }

    pub fn visibility(&self) -> Visibility {
        match (self.hidden, self.properties.hidden_takes_space) {
            (false, _) => Visibility::Visible,
            (true, true) => Visibility::Invisible,
            (true, false) => Visibility::Gone,
        }
    }

    /// Whether the node takes part in its container's layout.
    pub fn occupies_space(&self) -> bool {
        !self.hidden || self.properties.hidden_takes_space
    }

    fn apply_visibility(&mut self, visibility: Visibility) {
        match visibility {
            Visibility::Visible => self.hidden = false,
            Visibility::Invisible => {
                self.hidden = true;
                self.properties.hidden_takes_space = true;
            }
            Visibility::Gone => {
                self.hidden = true;
                self.properties.hidden_takes_space = false;
            }
        }
    }

    fn label(&self) -> &str {
        self.name.as_deref().unwrap_or_else(|| self.kind.name())
    }
}

/// Arena of layout nodes.
pub struct LayoutTree {
    nodes: IndexMap<NodeId, Node>,
    next_id: u64,
    host: Option<Box<dyn LayoutHost>>,
}

impl fmt::Debug for LayoutTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutTree")
            .field("nodes", &self.nodes)
            .field("next_id", &self.next_id)
            .field("has_host", &self.host.is_some())
            .finish()
    }
}

impl Default for LayoutTree {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutTree {
    /// Create an empty layout tree.
    pub fn new() -> Self {
        Self {
            nodes: IndexMap::new(),
            next_id: 0,
            host: None,
        }
    }

    /// Create an empty tree reporting to `host`.
    pub fn with_host(host: impl LayoutHost + 'static) -> Self {
        let mut tree = Self::new();
        tree.set_host(host);
        tree
    }

    pub fn set_host(&mut self, host: impl LayoutHost + 'static) {
        self.host = Some(Box::new(host));
    }

    /// Detach and return the host, if any.
    pub fn take_host(&mut self) -> Option<Box<dyn LayoutHost>> {
        self.host.take()
    }

    /// Add a detached node to the arena.
    pub fn insert(&mut self, mut node: Node) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        node.id = id;
        node.parent = None;
        node.children.clear();
        if let NodeKind::Scroll(scroll) = &mut node.kind {
            scroll.content = None;
            scroll.background = None;
        }
        self.nodes.insert(id, node);
        id
    }

    /// Get a node by ID.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Get a node by ID, failing on unknown ids.
    pub fn node(&self, id: NodeId) -> Result<&Node, TreeError> {
        self.nodes.get(&id).ok_or(TreeError::UnknownNode { id: id.0 })
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, TreeError> {
        self.nodes.get_mut(&id).ok_or(TreeError::UnknownNode { id: id.0 })
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over all nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Nodes without a parent.
    pub fn roots(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.values().filter(|n| n.parent.is_none()).map(|n| n.id)
    }

    /// Get children of a node.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(&id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    // ------------------------------------------------------------------
    // Structure
    // ------------------------------------------------------------------

    /// Append `child` as the last child of `parent`.
    ///
    /// For scroll containers this sets the content node.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        let index = self.children(parent).len();
        self.insert_child(parent, index, child)
    }

    /// Insert `child` at `index` among the children of `parent`.
    pub fn insert_child(&mut self, parent: NodeId, index: usize, child: NodeId) -> Result<(), TreeError> {
        self.check_attach(parent, child)?;
        if let NodeKind::Scroll(scroll) = &self.node(parent)?.kind {
            if scroll.content.is_some() {
                return Err(TreeError::ContentOccupied { id: parent.0 });
            }
            return self.set_scroll_content(parent, Some(child));
        }

        let node = self.node_mut(parent)?;
        let index = index.min(node.children.len());
        node.children.insert(index, child);
        self.node_mut(child)?.parent = Some(parent);
        self.mark_dirty(parent);
        Ok(())
    }

    /// Set or clear the content node of a scroll container.
    ///
    /// A previous content node is detached, not removed from the arena.
    pub fn set_scroll_content(&mut self, scroll: NodeId, content: Option<NodeId>) -> Result<(), TreeError> {
        self.set_scroll_slot(scroll, content, false)
    }

    /// Set or clear the background node of a scroll container.
    pub fn set_scroll_background(&mut self, scroll: NodeId, background: Option<NodeId>) -> Result<(), TreeError> {
        self.set_scroll_slot(scroll, background, true)
    }

    fn set_scroll_slot(&mut self, id: NodeId, child: Option<NodeId>, background: bool) -> Result<(), TreeError> {
        let previous = match &self.node(id)?.kind {
            NodeKind::Scroll(scroll) if background => scroll.background,
            NodeKind::Scroll(scroll) => scroll.content,
            _ => return Err(TreeError::NotAContainer { id: id.0 }),
        };
        if previous == child {
            return Ok(());
        }
        if let Some(child) = child {
            self.check_attach(id, child)?;
        }
        if let Some(previous) = previous {
            self.node_mut(previous)?.parent = None;
        }
        if let Some(child) = child {
            self.node_mut(child)?.parent = Some(id);
        }

        let node = self.node_mut(id)?;
        if let NodeKind::Scroll(scroll) = &mut node.kind {
            if background {
                scroll.background = child;
            } else {
                scroll.content = child;
            }
            node.children = scroll.background.into_iter().chain(scroll.content).collect();
        }
        self.mark_dirty(id);
        Ok(())
    }

    fn check_attach(&self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        let parent_node = self.node(parent)?;
        let child_node = self.node(child)?;
        if !parent_node.kind.is_container() {
            return Err(TreeError::NotAContainer { id: parent.0 });
        }
        if let Some(existing) = child_node.parent {
            return Err(TreeError::AlreadyAttached {
                child: child.0,
                parent: existing.0,
            });
        }

        let mut current = Some(parent);
        while let Some(id) = current {
            if id == child {
                return Err(TreeError::CycleDetected {
                    child: child.0,
                    parent: parent.0,
                });
            }
            current = self.nodes.get(&id).and_then(|n| n.parent);
        }
        Ok(())
    }

    /// Detach `child` from `parent`. The child stays in the arena as a root.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        let is_scroll = matches!(self.node(parent)?.kind, NodeKind::Scroll(_));
        if self.node(child)?.parent != Some(parent) {
            return Err(TreeError::UnknownNode { id: child.0 });
        }
        if is_scroll {
            let background = match &self.node(parent)?.kind {
                NodeKind::Scroll(scroll) => scroll.background == Some(child),
                _ => false,
            };
            return self.set_scroll_slot(parent, None, background);
        }

        self.node_mut(parent)?.children.retain(|c| *c != child);
        self.node_mut(child)?.parent = None;
        self.mark_dirty(parent);
        Ok(())
    }

    /// Remove a node and its whole subtree from the arena.
    pub fn remove(&mut self, id: NodeId) -> Result<(), TreeError> {
        if let Some(parent) = self.node(id)?.parent {
            self.remove_child(parent, id)?;
        }

        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.shift_remove(&current) {
                stack.extend(node.children.iter().copied());
            }
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Configuration
    // ------------------------------------------------------------------

    /// Replace a node's layout properties.
    pub fn set_properties(&mut self, id: NodeId, properties: LayoutProperties) -> Result<(), TreeError> {
        self.node_mut(id)?.properties = properties;
        self.mark_dirty(id);
        Ok(())
    }

    /// Edit a node's layout properties in place.
    pub fn update_properties(
        &mut self,
        id: NodeId,
        update: impl FnOnce(&mut LayoutProperties),
    ) -> Result<(), TreeError> {
        update(&mut self.node_mut(id)?.properties);
        self.mark_dirty(id);
        Ok(())
    }

    pub fn set_visibility(&mut self, id: NodeId, visibility: Visibility) -> Result<(), TreeError> {
        self.node_mut(id)?.apply_visibility(visibility);
        self.mark_dirty(id);
        Ok(())
    }

    /// Hide or show a node, keeping its `hidden_takes_space` setting.
    pub fn set_hidden(&mut self, id: NodeId, hidden: bool) -> Result<(), TreeError> {
        self.node_mut(id)?.hidden = hidden;
        self.mark_dirty(id);
        Ok(())
    }

    pub fn set_name(&mut self, id: NodeId, name: impl Into<String>) -> Result<(), TreeError> {
        self.node_mut(id)?.name = Some(name.into());
        Ok(())
    }

    pub fn set_padding(&mut self, id: NodeId, padding: Insets) -> Result<(), TreeError> {
        self.node_mut(id)?.kind.set_padding(padding);
        self.mark_dirty(id);
        Ok(())
    }

    /// Change the orientation of a linear or scroll container.
    ///
    /// Other kinds have no orientation and are left untouched.
    pub fn set_orientation(&mut self, id: NodeId, orientation: Orientation) -> Result<(), TreeError> {
        match &mut self.node_mut(id)?.kind {
            NodeKind::Linear(linear) => linear.orientation = orientation,
            NodeKind::Scroll(scroll) => scroll.orientation = orientation,
            other => {
                debug!("Ignoring orientation on {} node {id}", other.name());
                return Ok(());
            }
        }
        self.mark_dirty(id);
        Ok(())
    }

    /// Toggle fill-content on a scroll container. Other kinds ignore it.
    pub fn set_fill_content(&mut self, id: NodeId, fill_content: bool) -> Result<(), TreeError> {
        match &mut self.node_mut(id)?.kind {
            NodeKind::Scroll(scroll) => scroll.fill_content = fill_content,
            other => {
                debug!("Ignoring fill_content on {} node {id}", other.name());
                return Ok(());
            }
        }
        self.mark_dirty(id);
        Ok(())
    }

    /// Edit a leaf's content or padding in place.
    pub fn update_leaf(&mut self, id: NodeId, update: impl FnOnce(&mut Leaf)) -> Result<(), TreeError> {
        match &mut self.node_mut(id)?.kind {
            NodeKind::Leaf(leaf) => update(leaf),
            _ => return Err(TreeError::NotALeaf { id: id.0 }),
        }
        self.mark_dirty(id);
        Ok(())
    }

    /// Scroll a scroll container, clamping to its scrollable range.
    ///
    /// Only absolute bounds of the subtree change; no layout is requested.
    pub fn scroll_to(&mut self, id: NodeId, offset: DVec2) -> Result<DVec2, TreeError> {
        let node = self.node_mut(id)?;
        let viewport = node.frame.size();
        let NodeKind::Scroll(scroll) = &mut node.kind else {
            return Err(TreeError::NotAContainer { id: id.0 });
        };
        scroll.scroll_offset = clamp_scroll(offset, scroll.content_extent, viewport);
        let clamped = scroll.scroll_offset;
        self.refresh_absolute_bounds(id);
        Ok(clamped)
    }

    // ------------------------------------------------------------------
    // Invalidation
    // ------------------------------------------------------------------

    /// Mark a node and every ancestor as needing layout.
    ///
    /// The host is asked for a layout pass when the root was clean.
    pub fn mark_dirty(&mut self, id: NodeId) {
        let mut current = Some(id);
        let mut request = None;
        while let Some(node_id) = current {
            let Some(node) = self.nodes.get_mut(&node_id) else {
                break;
            };
            if node.parent.is_none() && !node.needs_layout {
                request = Some(node_id);
            }
            node.needs_layout = true;
            current = node.parent;
        }

        if let Some(root) = request {
            debug!("Layout requested for root {root} by {id}");
            if let Some(host) = self.host.as_mut() {
                host.layout_requested(root);
            }
        }
    }

    pub(crate) fn mark_clean(&mut self, id: NodeId) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.needs_layout = false;
        }
    }

    /// Set a node's frame, returning whether it changed.
    pub fn set_frame(&mut self, id: NodeId, frame: Bounds) -> bool {
        let Some(node) = self.nodes.get_mut(&id) else {
            return false;
        };
        if node.frame == frame {
            return false;
        }
        node.frame = frame;
        trace!("Frame of {id} set to {frame:?}");
        if let Some(host) = self.host.as_mut() {
            host.frame_changed(id, frame);
        }
        true
    }

    /// Store the content extent found while arranging a scroll container.
    pub(crate) fn record_content_extent(&mut self, id: NodeId, extent: Size) {
        let Some(node) = self.nodes.get_mut(&id) else {
            return;
        };
        let viewport = node.frame.size();
        let NodeKind::Scroll(scroll) = &mut node.kind else {
            return;
        };
        scroll.scroll_offset = clamp_scroll(scroll.scroll_offset, extent, viewport);
        if scroll.content_extent == extent {
            return;
        }
        scroll.content_extent = extent;
        if let Some(host) = self.host.as_mut() {
            host.content_extent_changed(id, extent);
        }
    }

    // ------------------------------------------------------------------
    // Measurement
    // ------------------------------------------------------------------

    /// Ask a node to measure itself against an offer.
    ///
    /// This is a pure query; no frame is written.
    pub fn measure(
        &self,
        id: NodeId,
        offer: Size,
        width_spec: MeasureSpec,
        height_spec: MeasureSpec,
    ) -> Result<Size, TreeError> {
        self.node(id)?;
        Ok(measure::measure_node(self, id, offer, width_spec, height_spec))
    }

    // ------------------------------------------------------------------
    // Queries over computed frames
    // ------------------------------------------------------------------

    /// Whether the node and all of its ancestors are shown.
    pub fn is_rendered(&self, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node_id) = current {
            match self.nodes.get(&node_id) {
                Some(node) if !node.hidden => current = node.parent,
                _ => return false,
            }
        }
        true
    }

    /// Compute absolute bounds for `root` and its subtree.
    pub fn compute_absolute_bounds(&mut self, root: NodeId) {
        let origin = self
            .nodes
            .get(&root)
            .and_then(|n| n.parent)
            .map(|parent| self.content_origin(parent))
            .unwrap_or(DVec2::ZERO);
        self.compute_absolute_bounds_recursive(root, origin);
    }

    fn refresh_absolute_bounds(&mut self, id: NodeId) {
        let Some(node) = self.nodes.get(&id) else {
            return;
        };
        let origin = self.content_origin(id);
        for child in node.children.clone() {
            self.compute_absolute_bounds_recursive(child, origin);
        }
    }

    /// Absolute origin of a node's children.
    fn content_origin(&self, id: NodeId) -> DVec2 {
        match self.nodes.get(&id) {
            Some(node) => {
                let offset = match &node.kind {
                    NodeKind::Scroll(scroll) => scroll.scroll_offset,
                    _ => DVec2::ZERO,
                };
                node.absolute_bounds.origin() - offset
            }
            None => DVec2::ZERO,
        }
    }

    fn compute_absolute_bounds_recursive(&mut self, id: NodeId, parent_origin: DVec2) {
        let children = {
            let Some(node) = self.nodes.get_mut(&id) else {
                return;
            };
            node.absolute_bounds = node.frame.translate(parent_origin);
            node.children.clone()
        };

        let origin = self.content_origin(id);
        for child in children {
            self.compute_absolute_bounds_recursive(child, origin);
        }
    }

    /// Find the topmost shown node under a point in absolute coordinates.
    pub fn hit_test(&self, root: NodeId, point: DVec2) -> Option<NodeId> {
        let node = self.nodes.get(&root)?;
        if node.hidden || !node.absolute_bounds.contains(point) {
            return None;
        }

        // Last child is on top
        node.children
            .iter()
            .rev()
            .find_map(|&child| self.hit_test(child, point))
            .or(Some(root))
    }

    /// Indented description of the subtree's frames, one node per line.
    pub fn dump(&self, root: NodeId) -> String {
        let mut out = String::new();
        self.dump_recursive(root, 0, &mut out);
        out
    }

    fn dump_recursive(&self, id: NodeId, depth: usize, out: &mut String) {
        let Some(node) = self.nodes.get(&id) else {
            return;
        };
        let frame = node.frame;
        let _ = write!(
            out,
            "{:indent$}{} {},{} {}x{}",
            "",
            node.label(),
            frame.x,
            frame.y,
            frame.width,
            frame.height,
            indent = depth * 2
        );
        match node.visibility() {
            Visibility::Visible => {}
            Visibility::Invisible => out.push_str(" invisible"),
            Visibility::Gone => out.push_str(" gone"),
        }
        out.push('\n');
        for &child in &node.children {
            self.dump_recursive(child, depth + 1, out);
        }
    }
}

fn clamp_scroll(offset: DVec2, extent: Size, viewport: Size) -> DVec2 {
    let max = DVec2::new(
        (extent.width - viewport.width).max(0.0),
        (extent.height - viewport.height).max(0.0),
    );
    offset.clamp(DVec2::ZERO, max)
}
