//! Declarative layout documents.
//!
//! A document is a JSON tree of node descriptions:
//!
//! ```json
//! {
//!   "type": "linear",
//!   "orientation": "vertical",
//!   "padding": { "top": 16, "left": 16, "bottom": 16, "right": 16 },
//!   "children": [
//!     { "type": "text", "text": "Title", "layout": { "width": "match_parent" } },
//!     { "type": "view", "gravity": "center_horizontal", "layout": { "weight": 1 } }
//!   ]
//! }
//! ```

use log::warn;
use serde::Deserialize;
use tessera_core::{DocumentError, Gravity, Insets, LayoutProperties, Orientation, Size, Visibility};

use crate::frame::FrameContainer;
use crate::leaf::{Leaf, LeafContent};
use crate::linear::LinearContainer;
use crate::scroll::ScrollContainer;
use crate::text::TextStyle;
use crate::tree::{LayoutTree, Node, NodeId};

/// Kind of node a description builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeType {
    Frame,
    Linear,
    Scroll,
    #[default]
    View,
    Text,
    Image,
}

/// Description of one node and its subtree.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NodeSpec {
    #[serde(rename = "type")]
    pub node_type: NodeType,
    pub name: Option<String>,
    pub layout: LayoutProperties,
    pub padding: Insets,
    pub visibility: Visibility,
    /// Overrides the gravity in `layout` when present
    pub gravity: Option<Gravity>,
    /// Linear and scroll containers
    pub orientation: Orientation,
    /// Frame and linear containers
    pub children: Vec<NodeSpec>,
    /// Scroll containers
    pub fill_content: bool,
    pub content: Option<Box<NodeSpec>>,
    pub background: Option<Box<NodeSpec>>,
    /// Text leaves
    pub text: String,
    pub style: TextStyle,
    /// Image leaves
    pub natural_width: f64,
    pub natural_height: f64,
}

impl NodeSpec {
    /// Parse a node description from JSON.
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Insert the described subtree into `tree`, returning its root.
    pub fn build(&self, tree: &mut LayoutTree) -> Result<NodeId, DocumentError> {
        let id = tree.insert(self.node());

        match self.node_type {
            NodeType::Frame | NodeType::Linear => {
                for child in &self.children {
                    let child_id = child.build(tree)?;
                    tree.append_child(id, child_id)?;
                }
            }
            NodeType::Scroll => {
                if !self.children.is_empty() {
                    warn!("Scroll container children are ignored, use `content`");
                }
                if let Some(background) = &self.background {
                    let background_id = background.build(tree)?;
                    tree.set_scroll_background(id, Some(background_id))?;
                }
                if let Some(content) = &self.content {
                    let content_id = content.build(tree)?;
                    tree.set_scroll_content(id, Some(content_id))?;
                }
            }
            NodeType::View | NodeType::Text | NodeType::Image => {
                if !self.children.is_empty() {
                    warn!("Children of a {:?} leaf are ignored", self.node_type);
                }
            }
        }
        Ok(id)
    }

    fn node(&self) -> Node {
        let mut properties = self.layout.clone();
        if let Some(gravity) = self.gravity {
            properties = properties.with_gravity(gravity);
        }

        let padding = self.padding;
        let mut node = match self.node_type {
            NodeType::Frame => Node::new(FrameContainer::new().with_padding(padding)),
            NodeType::Linear => Node::new(LinearContainer::new(self.orientation).with_padding(padding)),
            NodeType::Scroll => Node::new(
                ScrollContainer::new(self.orientation)
                    .with_padding(padding)
                    .with_fill_content(self.fill_content),
            ),
            NodeType::View => Node::new(Leaf::empty().with_padding(padding)),
            NodeType::Text => Node::new(Leaf::text(self.text.clone(), self.style.clone()).with_padding(padding)),
            NodeType::Image => Node::new(
                Leaf::new(LeafContent::Image {
                    natural: Size::new(self.natural_width, self.natural_height),
                })
                .with_padding(padding),
            ),
        }
        .with_properties(properties)
        .with_visibility(self.visibility);

        if let Some(name) = &self.name {
            node = node.with_name(name.clone());
        }
        node
    }
}

/// Parse a JSON document and build it into `tree`.
pub fn load_document(tree: &mut LayoutTree, json: &str) -> Result<NodeId, DocumentError> {
    NodeSpec::from_json(json)?.build(tree)
}
