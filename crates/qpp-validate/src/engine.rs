//! Two-phase validation engine.
//!
//! Runs, in order:
//!
//! 1. the document check: an unscoped run on a root that is not a clinical
//!    document reports that single problem and stops;
//! 2. the grouped phase: nodes are grouped by template across the whole
//!    tree and each group is handed to its validator once, groups ordered by
//!    first pre-order appearance;
//! 3. the per-node phase, in pre-order.

use std::collections::{BTreeSet, HashMap};

use qpp_model::{Node, TemplateId, ValidationError};
use tracing::debug;

use crate::context::ValidationContext;
use crate::measures::MeasureConfigs;
use crate::registry::ValidatorRegistry;

pub const NOT_A_QRDA_DOCUMENT: &str = "The file is not a QRDA-III XML document";

/// Validates decoded trees. Never mutates the tree.
#[derive(Clone, Copy)]
pub struct ValidationEngine<'a> {
    registry: &'a ValidatorRegistry,
    measures: &'a MeasureConfigs,
    scope: Option<&'a BTreeSet<TemplateId>>,
}

impl<'a> ValidationEngine<'a> {
    pub fn new(registry: &'a ValidatorRegistry, measures: &'a MeasureConfigs) -> Self {
        Self {
            registry,
            measures,
            scope: None,
        }
    }

    /// Run validators only for templates in `scope`.
    #[must_use]
    pub fn with_scope(mut self, scope: Option<&'a BTreeSet<TemplateId>>) -> Self {
        self.scope = scope;
        self
    }

    fn in_scope(&self, template: TemplateId) -> bool {
        self.scope.is_none_or(|scope| scope.contains(&template))
    }

    /// Every problem found, in discovery order.
    pub fn validate(&self, root: &Node) -> Vec<ValidationError> {
        let mut context = ValidationContext::new(self.measures);

        if self.scope.is_none() && root.template() != TemplateId::ClinicalDocument {
            context.add_error(NOT_A_QRDA_DOCUMENT, root.path());
            return context.into_errors();
        }

        for (template, nodes) in group_by_template(root) {
            if !self.in_scope(template) {
                continue;
            }
            if let Some(validator) = self.registry.get(template) {
                validator.validate_group(&nodes, &mut context);
            }
        }
        let grouped = context.errors().len();

        for node in root.pre_order() {
            if !self.in_scope(node.template()) {
                continue;
            }
            if let Some(validator) = self.registry.get(node.template()) {
                validator.validate_node(node, &mut context);
            }
        }

        let errors = context.into_errors();
        debug!(
            grouped,
            per_node = errors.len() - grouped,
            "validation finished"
        );
        errors
    }
}

/// Nodes grouped by template, groups ordered by first pre-order appearance.
fn group_by_template(root: &Node) -> Vec<(TemplateId, Vec<&Node>)> {
    let mut groups: Vec<(TemplateId, Vec<&Node>)> = Vec::new();
    let mut index: HashMap<TemplateId, usize> = HashMap::new();
    for node in root.pre_order() {
        let slot = *index.entry(node.template()).or_insert_with(|| {
            groups.push((node.template(), Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(node);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use qpp_model::NodePath;

    #[test]
    fn groups_follow_first_appearance() {
        let mut root = Node::new(TemplateId::ClinicalDocument, NodePath::root("doc"));
        let mut ia = Node::new(TemplateId::IaSection, NodePath::root("ia"));
        ia.add_child(Node::new(TemplateId::IaMeasure, NodePath::root("m1")));
        root.add_child(ia);
        root.add_child(Node::new(TemplateId::AciSection, NodePath::root("aci")));
        root.add_child(Node::new(TemplateId::IaSection, NodePath::root("ia2")));

        let groups = group_by_template(&root);
        let order: Vec<TemplateId> = groups.iter().map(|(template, _)| *template).collect();
        assert_eq!(
            order,
            vec![
                TemplateId::ClinicalDocument,
                TemplateId::IaSection,
                TemplateId::IaMeasure,
                TemplateId::AciSection,
            ]
        );
        assert_eq!(groups[1].1.len(), 2);
    }
}
