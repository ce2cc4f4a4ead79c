//! Fallback decoder for templates without dedicated logic.

use qpp_model::{Node, TemplateId};

use super::registry::NodeDecoder;
use crate::raw::RawElement;

/// Copies the raw attributes onto the node unchanged.
///
/// Children are still decoded by the tree builder, so structure below an
/// unknown or out-of-scope element is preserved.
pub struct DefaultDecoder;

impl NodeDecoder for DefaultDecoder {
    fn template(&self) -> TemplateId {
        TemplateId::Unrecognized
    }

    fn description(&self) -> &'static str {
        "Structure-preserving fallback decoder"
    }

    fn decode(&self, element: &RawElement, node: &mut Node) {
        for (key, value) in &element.attributes {
            node.put_value(key.clone(), value.clone());
        }
    }
}
