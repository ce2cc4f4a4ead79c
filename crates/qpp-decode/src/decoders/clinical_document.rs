//! QRDA III document root.
//!
//! Pulls the program name and provider identifiers off the header. The
//! program name lives in `informationRecipient/intendedRecipient/id`; the
//! TIN and NPI sit under `documentationOf` and are recognized by the OID of
//! their `id` element.

use qpp_model::{Node, TemplateId};

use super::common::{id_extension_with_root, put_optional};
use super::registry::NodeDecoder;
use crate::raw::RawElement;

/// OID of the taxpayer identification number id.
pub const TIN_ROOT: &str = "2.16.840.1.113883.4.2";
/// OID of the national provider identifier id.
pub const NPI_ROOT: &str = "2.16.840.1.113883.4.6";

pub const PROGRAM_NAME: &str = "programName";
pub const TAX_ID: &str = "taxpayerIdentificationNumber";
pub const NPI: &str = "nationalProviderIdentifier";
pub const ENTITY_TYPE: &str = "entityType";

pub struct ClinicalDocumentDecoder;

impl NodeDecoder for ClinicalDocumentDecoder {
    fn template(&self) -> TemplateId {
        TemplateId::ClinicalDocument
    }

    fn description(&self) -> &'static str {
        "QRDA III clinical document header"
    }

    fn decode(&self, element: &RawElement, node: &mut Node) {
        let program = element
            .descend_attribute(&["informationRecipient", "intendedRecipient", "id"], "extension")
            .map(str::to_lowercase);
        put_optional(node, PROGRAM_NAME, program.as_deref());

        let performer = element.child("documentationOf");
        let tin = performer.and_then(|scope| id_extension_with_root(scope, TIN_ROOT));
        let npi = performer.and_then(|scope| id_extension_with_root(scope, NPI_ROOT));
        put_optional(node, TAX_ID, tin);
        put_optional(node, NPI, npi);

        let entity = if node.value(NPI).is_some() {
            "individual"
        } else {
            "group"
        };
        node.put_value(ENTITY_TYPE, entity);
    }
}
