pub mod config;
pub mod data;
pub mod export;
pub mod filter;
pub mod geometry;
pub mod graph;
pub mod layout;
pub mod util;

pub use config::LayoutConfig;
pub use filter::{FilterCriteria, FilterSummary};
pub use graph::{Edge, GraphStore, Node, NodeData, NodeKind, PersonInfo, PublicationInfo};
pub use layout::{RingLayout, initial_layout, layout_people_spread, layout_rings, relayout};
