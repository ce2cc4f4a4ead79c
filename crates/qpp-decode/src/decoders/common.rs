//! Shared extraction helpers for template decoders.

use qpp_model::Node;

use crate::raw::RawElement;

/// `reference/externalDocument/id@extension`, the measure identifier slot
/// used by measure reference and ACI entries.
pub(super) fn external_document_extension(element: &RawElement) -> Option<&str> {
    element.descend_attribute(&["reference", "externalDocument", "id"], "extension")
}

/// Store `value` under `key` when present; trims surrounding whitespace.
pub(super) fn put_optional(node: &mut Node, key: &str, value: Option<&str>) {
    if let Some(value) = value.map(str::trim).filter(|value| !value.is_empty()) {
        node.put_value(key, value);
    }
}

/// First descendant `id` element whose `root` attribute equals `root`.
pub(super) fn id_extension_with_root<'a>(element: &'a RawElement, root: &str) -> Option<&'a str> {
    element
        .find_descendant(|candidate| {
            candidate.name == "id" && candidate.attribute("root") == Some(root)
        })
        .and_then(|id| id.attribute("extension"))
}
