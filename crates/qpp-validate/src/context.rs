//! Per-document validation state and the fluent [`Checker`].

use qpp_model::{Node, NodePath, TemplateId, ValidationError};

use crate::measures::MeasureConfigs;

/// Errors collected while validating one document.
///
/// Owned by a single validation run; never shared between files.
pub struct ValidationContext<'a> {
    measures: &'a MeasureConfigs,
    errors: Vec<ValidationError>,
}

impl<'a> ValidationContext<'a> {
    pub fn new(measures: &'a MeasureConfigs) -> Self {
        Self {
            measures,
            errors: Vec::new(),
        }
    }

    pub fn measures(&self) -> &'a MeasureConfigs {
        self.measures
    }

    pub fn add_error(&mut self, message: impl Into<String>, path: &NodePath) {
        self.errors.push(ValidationError::new(message, path.clone()));
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<ValidationError> {
        self.errors
    }

    /// Rules stop at the first failure.
    pub fn check<'c, 'n>(&'c mut self, node: &'n Node) -> Checker<'c, 'n> {
        Checker::new(node, &mut self.errors, false)
    }

    /// Every rule is evaluated, failing or not.
    pub fn thoroughly_check<'c, 'n>(&'c mut self, node: &'n Node) -> Checker<'c, 'n> {
        Checker::new(node, &mut self.errors, true)
    }
}

/// Chains presence, format and cardinality rules against one node.
///
/// Each failing rule records one error at the node's path.
pub struct Checker<'c, 'n> {
    node: &'n Node,
    errors: &'c mut Vec<ValidationError>,
    thorough: bool,
    failed: bool,
}

impl<'c, 'n> Checker<'c, 'n> {
    fn new(node: &'n Node, errors: &'c mut Vec<ValidationError>, thorough: bool) -> Self {
        Self {
            node,
            errors,
            thorough,
            failed: false,
        }
    }

    /// True once any rule of this chain has failed.
    pub fn has_failed(&self) -> bool {
        self.failed
    }

    fn skip(&self) -> bool {
        self.failed && !self.thorough
    }

    fn rule(mut self, message: &str, passes: impl FnOnce(&Node) -> bool) -> Self {
        if self.skip() {
            return self;
        }
        if !passes(self.node) {
            self.errors
                .push(ValidationError::new(message, self.node.path().clone()));
            self.failed = true;
        }
        self
    }

    /// `key` is present and not blank.
    pub fn value(self, message: &str, key: &str) -> Self {
        self.rule(message, |node| {
            node.value(key).is_some_and(|value| !value.trim().is_empty())
        })
    }

    /// `key` is present and parses as an integer.
    pub fn int_value(self, message: &str, key: &str) -> Self {
        self.rule(message, |node| {
            node.value(key)
                .is_some_and(|value| value.trim().parse::<i64>().is_ok())
        })
    }

    /// `key` is present and one of `allowed`.
    pub fn value_in(self, message: &str, key: &str, allowed: &[&str]) -> Self {
        self.rule(message, |node| {
            node.value(key)
                .is_some_and(|value| allowed.contains(&value.trim()))
        })
    }

    /// At least `minimum` direct children with one of `templates`.
    pub fn child_minimum(self, message: &str, minimum: usize, templates: &[TemplateId]) -> Self {
        self.rule(message, |node| node.count_children(templates) >= minimum)
    }

    /// At most `maximum` direct children with one of `templates`.
    pub fn child_maximum(self, message: &str, maximum: usize, templates: &[TemplateId]) -> Self {
        self.rule(message, |node| node.count_children(templates) <= maximum)
    }

    /// Exactly `count` direct children with one of `templates`.
    pub fn child_exact(self, message: &str, count: usize, templates: &[TemplateId]) -> Self {
        self.rule(message, |node| node.count_children(templates) == count)
    }

    /// At least `minimum` direct children satisfying `predicate`.
    pub fn children_matching<P>(self, message: &str, minimum: usize, predicate: P) -> Self
    where
        P: Fn(&Node) -> bool,
    {
        self.rule(message, |node| {
            node.children()
                .iter()
                .filter(|child| predicate(child))
                .count()
                >= minimum
        })
    }

    /// Arbitrary predicate over the node.
    pub fn satisfies<P>(self, message: &str, predicate: P) -> Self
    where
        P: FnOnce(&Node) -> bool,
    {
        self.rule(message, predicate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn measure_data(kind: Option<&str>) -> Node {
        let mut node = Node::new(TemplateId::MeasureData, NodePath::root("observation"));
        if let Some(kind) = kind {
            node.put_value("type", kind);
        }
        node
    }

    #[test]
    fn check_stops_at_first_failure() {
        let configs = MeasureConfigs::default();
        let mut context = ValidationContext::new(&configs);
        let node = measure_data(None);
        context
            .check(&node)
            .value("missing type", "type")
            .value_in("bad type", "type", &["IPOP"])
            .child_minimum("no count", 1, &[TemplateId::AggregateCount]);
        let messages: Vec<&str> = context.errors().iter().map(ValidationError::message).collect();
        assert_eq!(messages, vec!["missing type"]);
    }

    #[test]
    fn thorough_check_reports_every_failure() {
        let configs = MeasureConfigs::default();
        let mut context = ValidationContext::new(&configs);
        let node = measure_data(Some("NOPE"));
        context
            .thoroughly_check(&node)
            .value("missing type", "type")
            .value_in("bad type", "type", &["IPOP"])
            .child_minimum("no count", 1, &[TemplateId::AggregateCount])
            .child_maximum("too many", 0, &[TemplateId::AggregateCount]);
        let messages: Vec<&str> = context.errors().iter().map(ValidationError::message).collect();
        assert_eq!(messages, vec!["bad type", "no count"]);
        assert_eq!(context.errors()[0].path().to_string(), "/observation");
    }

    #[test]
    fn children_matching_uses_predicate() {
        let configs = MeasureConfigs::default();
        let mut context = ValidationContext::new(&configs);
        let mut node = Node::new(TemplateId::MeasureReferenceResults, NodePath::root("organizer"));
        node.add_child(measure_data(Some("DENOM")));
        context
            .thoroughly_check(&node)
            .children_matching("needs denom", 1, |child| child.value("type") == Some("DENOM"))
            .children_matching("needs denex", 1, |child| child.value("type") == Some("DENEX"))
            .int_value("not an int", "type");
        assert_eq!(context.errors().len(), 2);
        assert_eq!(context.errors()[0].message(), "needs denex");
    }
}
