//! Advancing Care Information entries.

use qpp_model::{Node, TemplateId};

use super::common::{external_document_extension, put_optional};
use super::quality::MEASURE_ID;
use super::registry::NodeDecoder;
use crate::raw::RawElement;

/// Numerator/denominator measure reference. Its numerator and denominator
/// children carry no values of their own; their aggregate counts are
/// decoded as nested nodes.
pub struct AciNumeratorDenominatorDecoder;

impl NodeDecoder for AciNumeratorDenominatorDecoder {
    fn template(&self) -> TemplateId {
        TemplateId::AciNumeratorDenominator
    }

    fn description(&self) -> &'static str {
        "ACI numerator/denominator measure"
    }

    fn decode(&self, element: &RawElement, node: &mut Node) {
        put_optional(node, MEASURE_ID, external_document_extension(element));
    }
}
