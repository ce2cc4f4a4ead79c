use std::collections::HashSet;

use qpp_decode::decoders::MEASURE_ID;
use qpp_model::Node;

use crate::context::ValidationContext;

/// Template for duplicate measure ids; `{}` is the measure id.
pub const DUPLICATE_MEASURE_ID: &str = "The measure {} is reported more than once";

/// Flag every repeat of a measure id after its first occurrence.
pub(super) fn report_duplicate_measures(nodes: &[&Node], context: &mut ValidationContext<'_>) {
    let mut seen = HashSet::new();
    for node in nodes {
        let Some(measure) = node.value(MEASURE_ID) else {
            continue;
        };
        if !seen.insert(measure) {
            context.add_error(DUPLICATE_MEASURE_ID.replace("{}", measure), node.path());
        }
    }
}

/// "At most one section of this kind per document": flag every extra one.
pub(super) fn report_extra_nodes(
    message: &str,
    nodes: &[&Node],
    context: &mut ValidationContext<'_>,
) {
    for node in nodes.iter().skip(1) {
        context.add_error(message, node.path());
    }
}
