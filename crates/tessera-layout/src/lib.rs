//! Two-pass layout for Tessera view trees.
//!
//! This crate computes the final frame of every node in a tree of boxes
//! described by declarative sizing rules. There is no constraint solver:
//! a recursive measure pass is followed by a placement pass.
//!
//! # Architecture
//!
//! 1. **Measurement utility**: turns a parent offer plus a child's layout
//!    properties into a concrete, clamped size
//! 2. **Container strategies**: frame (overlapping), linear (stacking with
//!    weights) and scroll (one unbounded child)
//! 3. **Leaves**: views, estimated text, images and host widgets
//! 4. **Arrange**: writes frames top-down and skips clean subtrees
//!
//! # Example
//!
//! ```ignore
//! use tessera_core::{Dimension, Insets, LayoutProperties};
//! use tessera_layout::{compute_layout, LayoutOptions, LayoutTree, Leaf, LinearContainer, Node};
//!
//! let mut tree = LayoutTree::new();
//! let root = tree.insert(Node::new(LinearContainer::vertical().with_padding(Insets::uniform(16.0))));
//! let header = tree.insert(Node::new(Leaf::empty()).with_properties(
//!     LayoutProperties::new().with_width(Dimension::Stretch).with_height(40.0),
//! ));
//! tree.append_child(root, header)?;
//! compute_layout(&mut tree, root, &LayoutOptions::default())?;
//!
//! println!("{}", tree.dump(root));
//! ```

mod compute;
#[cfg(feature = "serde")]
mod document;
mod frame;
mod host;
mod leaf;
mod linear;
mod measure;
mod scroll;
mod text;
mod tree;

pub use compute::{arrange, compute_layout, LayoutOptions};
#[cfg(feature = "serde")]
pub use document::{load_document, NodeSpec, NodeType};
pub use frame::FrameContainer;
pub use host::{FixedIntrinsic, IntrinsicSize, LayoutHost};
pub use leaf::{Leaf, LeafContent};
pub use linear::LinearContainer;
pub use measure::{measure_child, measure_node, Arrangement, Slot};
pub use scroll::ScrollContainer;
pub use text::{measure_text, TextMetrics, TextStyle};
pub use tree::{Bounds, LayoutTree, Node, NodeId, NodeKind};
