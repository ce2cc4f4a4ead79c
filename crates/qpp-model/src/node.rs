//! The decoded document tree.
//!
//! A [`Node`] owns its children outright. The root is owned by whichever
//! conversion produced it, so structural edits (default-node removal) are
//! plain `&mut` operations on an owned tree and nothing else can observe
//! a half-edited state.

use std::collections::BTreeMap;

use crate::path::NodePath;
use crate::template::TemplateId;

/// Attribute key reserved for the default-node marker.
pub const DEFAULT_MARKER: &str = "defaultFor";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    template: TemplateId,
    children: Vec<Node>,
    values: BTreeMap<String, String>,
    path: NodePath,
}

impl Node {
    pub fn new(template: TemplateId, path: NodePath) -> Self {
        Self {
            template,
            children: Vec::new(),
            values: BTreeMap::new(),
            path,
        }
    }

    pub fn template(&self) -> TemplateId {
        self.template
    }

    pub fn path(&self) -> &NodePath {
        &self.path
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Direct children satisfying `predicate`.
    pub fn child_nodes<'a, P>(&'a self, predicate: P) -> impl Iterator<Item = &'a Node> + 'a
    where
        P: Fn(&Node) -> bool + 'a,
    {
        self.children.iter().filter(move |child| predicate(*child))
    }

    /// Number of direct children whose template is one of `templates`.
    pub fn count_children(&self, templates: &[TemplateId]) -> usize {
        self.children
            .iter()
            .filter(|child| templates.contains(&child.template))
            .count()
    }

    pub fn add_child(&mut self, child: Node) {
        self.children.push(child);
    }

    pub fn value(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn put_value(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn values(&self) -> &BTreeMap<String, String> {
        &self.values
    }

    /// Mark this node as synthesized rather than read from input.
    pub fn mark_default(&mut self, reason: impl Into<String>) {
        self.values.insert(DEFAULT_MARKER.to_string(), reason.into());
    }

    pub fn is_default(&self) -> bool {
        self.values.contains_key(DEFAULT_MARKER)
    }

    /// Iterate the subtree rooted here, ancestors before descendants,
    /// siblings in document order.
    pub fn pre_order(&self) -> PreOrder<'_> {
        PreOrder { stack: vec![self] }
    }

    /// Every node in the subtree (self included) whose template is listed.
    pub fn find_all(&self, templates: &[TemplateId]) -> Vec<&Node> {
        self.pre_order()
            .filter(|node| templates.contains(&node.template))
            .collect()
    }

    pub fn find_first(&self, template: TemplateId) -> Option<&Node> {
        self.pre_order().find(|node| node.template == template)
    }

    /// Detach every default-marked descendant, at any depth.
    ///
    /// Returns the number of subtrees removed. The node itself is never
    /// removed; callers decide what to do with a default root.
    pub fn remove_default_nodes(&mut self) -> usize {
        let before = self.children.len();
        self.children.retain(|child| !child.is_default());
        let mut removed = before - self.children.len();
        for child in &mut self.children {
            removed += child.remove_default_nodes();
        }
        removed
    }
}

/// Pre-order iterator returned by [`Node::pre_order`].
pub struct PreOrder<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(template: TemplateId, name: &str) -> Node {
        Node::new(template, NodePath::root(name))
    }

    fn sample_tree() -> Node {
        let mut root = node(TemplateId::ClinicalDocument, "doc");
        let mut section = node(TemplateId::MeasureSection, "section");
        let mut default_params = node(TemplateId::ReportingParametersAct, "params");
        default_params.mark_default("MEASURE_SECTION");
        section.add_child(default_params);
        section.add_child(node(TemplateId::MeasureReferenceResults, "results"));
        root.add_child(section);
        root.add_child(node(TemplateId::IaSection, "ia"));
        root
    }

    #[test]
    fn pre_order_visits_ancestors_first() {
        let root = sample_tree();
        let order: Vec<TemplateId> = root.pre_order().map(Node::template).collect();
        assert_eq!(
            order,
            vec![
                TemplateId::ClinicalDocument,
                TemplateId::MeasureSection,
                TemplateId::ReportingParametersAct,
                TemplateId::MeasureReferenceResults,
                TemplateId::IaSection,
            ]
        );
    }

    #[test]
    fn remove_default_nodes_detaches_nested_defaults() {
        let mut root = sample_tree();
        assert_eq!(root.remove_default_nodes(), 1);
        assert!(root.find_first(TemplateId::ReportingParametersAct).is_none());
        assert_eq!(root.pre_order().count(), 4);
        assert_eq!(root.remove_default_nodes(), 0);
    }

    #[test]
    fn count_children_only_looks_one_level_down() {
        let root = sample_tree();
        assert_eq!(root.count_children(&[TemplateId::MeasureSection]), 1);
        assert_eq!(root.count_children(&[TemplateId::MeasureReferenceResults]), 0);
        assert_eq!(root.find_all(&[TemplateId::MeasureReferenceResults]).len(), 1);
    }

    #[test]
    fn values_are_keyed_uniquely() {
        let mut measure = node(TemplateId::IaMeasure, "measure");
        measure.put_value("measureId", "IA_EPA_1");
        measure.put_value("measureId", "IA_EPA_2");
        assert_eq!(measure.value("measureId"), Some("IA_EPA_2"));
        assert_eq!(measure.values().len(), 1);
        assert!(!measure.is_default());
    }
}
