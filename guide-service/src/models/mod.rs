//! Domain models for the guide service.

pub mod context;
pub mod guide;
pub mod loose;

pub use context::{ColorGroups, GuideRequest, KnowledgeBase, RequestContext};
pub use guide::{DesignGuide, DEFAULT_PRIMARY_COLOR};
