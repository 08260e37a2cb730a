//! Browser-independent core: record decoding, graph construction, search,
//! selection and highlight overlays.

pub mod category;
pub mod error;
pub mod graph;
pub mod highlight;
pub mod record;
pub mod search;
pub mod selection;
pub mod session;

pub use category::{Category, infer_category};
pub use error::LoadError;
pub use graph::{EdgeStyle, GraphData, GraphEdge, GraphNode, build_graph};
pub use highlight::{NodeStyle, NodeTint, VisualOverlay, clear_highlight, highlight};
pub use record::{EntityKind, EntityMention, PaperRecord, Relation};
pub use search::{FilterOutcome, filter_papers};
pub use selection::{Detail, EntityDetail, PaperDetail, Selection};
pub use session::{GraphEvent, Panel, Session, View};
