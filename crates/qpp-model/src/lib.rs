//! Document model for QRDA III conversion.
//!
//! - [`Node`]: the template-identified document tree
//! - [`TemplateId`]: structural roles, keyed by HL7 template OID
//! - [`QrdaScope`]: named template subsets for scoped conversion
//! - [`ValidationError`]: one domain-rule violation with its location
//! - [`ConversionConfig`]: immutable per-invocation settings

pub mod config;
pub mod error;
pub mod node;
pub mod path;
pub mod scope;
pub mod template;
pub mod validation;

pub use config::ConversionConfig;
pub use error::{ModelError, Result};
pub use node::{DEFAULT_MARKER, Node, PreOrder};
pub use path::{NodePath, PathSegment};
pub use scope::QrdaScope;
pub use template::TemplateId;
pub use validation::ValidationError;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_scope_filter() {
        let config = ConversionConfig::default();
        assert!(config.in_scope(TemplateId::ClinicalDocument));

        let config = config.with_scope(Some(QrdaScope::IaSection.templates()));
        assert!(config.in_scope(TemplateId::IaMeasure));
        assert!(!config.in_scope(TemplateId::ClinicalDocument));
    }

    #[test]
    fn validation_error_serializes_message_and_path() {
        let error = ValidationError::new(
            "The measure reference results must have a measure GUID",
            NodePath::root("ClinicalDocument").child("component", 2),
        );
        let json = serde_json::to_value(&error).expect("serialize error");
        assert_eq!(
            json,
            serde_json::json!({
                "message": "The measure reference results must have a measure GUID",
                "path": "/ClinicalDocument/component[2]",
            })
        );
    }
}
