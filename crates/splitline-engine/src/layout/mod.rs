//! Access to laid-out element positions.
//!
//! Line detection never sees font metrics or the wrapping algorithm. All it can
//! ask the layout engine is "where did this element end up vertically?". That
//! question is the [`PositionProbe`] trait. [`InlineFlowLayout`] is a small
//! deterministic inline layout engine implementing it, and tests can plug in
//! any closure through [`FnProbe`].

mod flow;

pub use flow::{FlowMetrics, InlineFlowLayout};

use crate::dom::{Document, NodeId};

/// Resolved vertical offset of an attached node, as assigned by a layout engine
pub trait PositionProbe {
    /// Top edge of `node` relative to its layout root
    fn offset_top(&mut self, doc: &Document, node: NodeId) -> f32;
}

impl<P: PositionProbe + ?Sized> PositionProbe for &mut P {
    fn offset_top(&mut self, doc: &Document, node: NodeId) -> f32 {
        (**self).offset_top(doc, node)
    }
}

/// Adapts a closure into a [`PositionProbe`]
pub struct FnProbe<F>(pub F);

impl<F> PositionProbe for FnProbe<F>
where
    F: FnMut(&Document, NodeId) -> f32,
{
    fn offset_top(&mut self, doc: &Document, node: NodeId) -> f32 {
        (self.0)(doc, node)
    }
}
