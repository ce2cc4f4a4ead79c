//! Builds the [`Node`] tree from a [`RawElement`] tree.

use std::collections::BTreeSet;
use std::path::Path;

use qpp_model::{ConversionConfig, Node, NodePath, TemplateId};
use tracing::debug;

use crate::decoders::{DecoderRegistry, NodeDecoder, default_registry};
use crate::error::Result;
use crate::raw::RawElement;
use crate::xml;

/// Template-dispatching tree builder.
///
/// Borrows its registry and scope, so one instance can be shared by every
/// task of a batch.
#[derive(Clone, Copy)]
pub struct QrdaDecoder<'a> {
    registry: &'a DecoderRegistry,
    scope: Option<&'a BTreeSet<TemplateId>>,
}

impl<'a> QrdaDecoder<'a> {
    pub fn new(registry: &'a DecoderRegistry) -> Self {
        Self {
            registry,
            scope: None,
        }
    }

    /// Restrict template-specific decoding to `scope`; templates outside it
    /// use the fallback decoder.
    #[must_use]
    pub fn with_scope(mut self, scope: Option<&'a BTreeSet<TemplateId>>) -> Self {
        self.scope = scope;
        self
    }

    /// Decode the whole document. The root always becomes a node.
    pub fn decode(&self, root: &RawElement) -> Node {
        let template = identify(root).unwrap_or(TemplateId::Unrecognized);
        self.decode_templated(root, template, NodePath::root(&root.name))
    }

    fn decoder_for(&self, template: TemplateId) -> &'a dyn NodeDecoder {
        let in_scope = self.scope.is_none_or(|scope| scope.contains(&template));
        if in_scope {
            self.registry.get(template)
        } else {
            self.registry.fallback()
        }
    }

    fn decode_templated(&self, element: &RawElement, template: TemplateId, path: NodePath) -> Node {
        let decoder = self.decoder_for(template);
        let mut node = Node::new(template, path);
        decoder.decode(element, &mut node);
        let path = node.path().clone();
        self.decode_children(element, &path, &mut node);
        decoder.finish(&mut node);
        node
    }

    fn decode_children(&self, element: &RawElement, path: &NodePath, parent: &mut Node) {
        for (position, child) in element.children.iter().enumerate() {
            if child.is_template_id() {
                continue;
            }
            let child_path = path.child(&child.name, position);
            match identify(child) {
                Some(template) => {
                    let node = self.decode_templated(child, template, child_path);
                    parent.add_child(node);
                }
                // Untemplated wrapper: lift its templated descendants.
                None => self.decode_children(child, &child_path, parent),
            }
        }
    }
}

/// Template of `element`, or `None` when it carries no `templateId` at all.
pub fn identify(element: &RawElement) -> Option<TemplateId> {
    if !element.has_template_ids() {
        return None;
    }
    let known = element
        .template_ids()
        .find_map(|(root, extension)| TemplateId::from_template_id(root, extension));
    Some(known.unwrap_or(TemplateId::Unrecognized))
}

/// Decode `raw` under `config`: scope-aware dispatch through the default
/// registry, then default-node removal when `skip_defaults` is set.
pub fn decode_document(raw: &RawElement, config: &ConversionConfig) -> Node {
    decode_with(default_registry(), raw, config)
}

pub fn decode_with(registry: &DecoderRegistry, raw: &RawElement, config: &ConversionConfig) -> Node {
    let mut root = QrdaDecoder::new(registry)
        .with_scope(config.scope.as_ref())
        .decode(raw);
    debug!(
        template = %root.template(),
        nodes = root.pre_order().count(),
        "decoded document tree"
    );
    if config.skip_defaults {
        let removed = root.remove_default_nodes();
        debug!(removed, "removed default nodes");
    }
    root
}

/// Read, parse and decode one file.
pub fn decode_file(path: &Path, config: &ConversionConfig) -> Result<Node> {
    let raw = xml::parse_file(path)?;
    Ok(decode_document(&raw, config))
}
