pub mod dom;
pub mod layout;
pub mod split;

// Re-export key types for easier usage
pub use dom::{Document, NodeId, NodeKind, Selector, SelectorError};
pub use layout::{FlowMetrics, FnProbe, InlineFlowLayout, PositionProbe};
pub use split::{
    SplitClasses, SplitError, SplitOptions, SplitResult, Target, split_text,
};
