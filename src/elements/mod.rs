//! Structural elements module

mod material;
mod member;
mod node;
mod section;
mod support;

pub use material::Material;
pub use member::{FrameMember, TrussMember};
pub use node::{Node, NodeId};
pub use section::{composite_centroid, Plate, Section, Shape};
pub use support::{Support, SupportKind};
