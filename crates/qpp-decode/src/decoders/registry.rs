//! Decoder trait and registry.
//!
//! The [`NodeDecoder`] trait defines how a templated element is turned into
//! a [`Node`]. Each decoder is registered in the [`DecoderRegistry`] under its
//! [`TemplateId`]; lookups for unbound templates fall back to the
//! structure-preserving [`DefaultDecoder`].
//!
//! # Example
//!
//! ```ignore
//! use qpp_decode::decoders::default_registry;
//!
//! let decoder = default_registry().get(TemplateId::MeasureData);
//! decoder.decode(&element, &mut node);
//! ```

use std::collections::HashMap;
use std::sync::OnceLock;

use qpp_model::{Node, TemplateId};

use super::aci::AciNumeratorDenominatorDecoder;
use super::clinical_document::ClinicalDocumentDecoder;
use super::default::DefaultDecoder;
use super::ia::IaMeasureDecoder;
use super::quality::{
    AggregateCountDecoder, MeasureDataDecoder, MeasureReferenceResultsDecoder,
    PerformanceRateDecoder,
};
use super::reporting_parameters::ReportingParametersDecoder;
use super::section::SectionDecoder;
use crate::raw::RawElement;

/// Template-specific decoding logic.
///
/// Decoding runs in two steps around the node's children:
///
/// 1. [`decode`](NodeDecoder::decode) reads values out of the raw element
///    before any child is decoded.
/// 2. [`finish`](NodeDecoder::finish) runs once every child has been decoded
///    and attached, so it may inspect them.
pub trait NodeDecoder: Send + Sync {
    /// Template this decoder is bound to.
    fn template(&self) -> TemplateId;

    /// Human-readable description of the decoder.
    fn description(&self) -> &'static str {
        "Template decoder"
    }

    fn decode(&self, element: &RawElement, node: &mut Node);

    fn finish(&self, _node: &mut Node) {}
}

/// Registry of decoders indexed by template.
///
/// Read-only once built. The default registry is cached using [`OnceLock`]
/// and may be shared across threads without locking.
pub struct DecoderRegistry {
    decoders: HashMap<TemplateId, Box<dyn NodeDecoder>>,
    fallback: Box<dyn NodeDecoder>,
}

impl DecoderRegistry {
    /// Creates an empty registry with the given fallback decoder.
    pub fn new(fallback: Box<dyn NodeDecoder>) -> Self {
        Self {
            decoders: HashMap::new(),
            fallback,
        }
    }

    /// Registry with a decoder for every template that has one.
    pub fn standard() -> Self {
        let mut registry = Self::new(Box::new(DefaultDecoder));
        for template in TemplateId::ALL {
            if let Some(decoder) = decoder_for(template) {
                registry.register(decoder);
            }
        }
        registry
    }

    /// Registers a decoder under its template, replacing any previous one.
    pub fn register(&mut self, decoder: Box<dyn NodeDecoder>) {
        self.decoders.insert(decoder.template(), decoder);
    }

    /// Decoder bound to `template`, if any.
    pub fn bound(&self, template: TemplateId) -> Option<&dyn NodeDecoder> {
        self.decoders.get(&template).map(|decoder| decoder.as_ref())
    }

    /// Decoder bound to `template`, or the fallback decoder.
    pub fn get(&self, template: TemplateId) -> &dyn NodeDecoder {
        self.bound(template).unwrap_or(self.fallback.as_ref())
    }

    pub fn fallback(&self) -> &dyn NodeDecoder {
        self.fallback.as_ref()
    }

    /// Number of bound decoders (excluding the fallback).
    pub fn len(&self) -> usize {
        self.decoders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decoders.is_empty()
    }

    pub fn templates(&self) -> impl Iterator<Item = TemplateId> + '_ {
        self.decoders.keys().copied()
    }
}

/// The binding table. Every template must be listed here.
fn decoder_for(template: TemplateId) -> Option<Box<dyn NodeDecoder>> {
    let decoder: Box<dyn NodeDecoder> = match template {
        TemplateId::ClinicalDocument => Box::new(ClinicalDocumentDecoder),
        TemplateId::ReportingParametersAct => Box::new(ReportingParametersDecoder),
        TemplateId::MeasureSection => Box::new(SectionDecoder::quality()),
        TemplateId::MeasureReferenceResults => Box::new(MeasureReferenceResultsDecoder),
        TemplateId::MeasureData => Box::new(MeasureDataDecoder),
        TemplateId::AggregateCount => Box::new(AggregateCountDecoder),
        TemplateId::PerformanceRate => Box::new(PerformanceRateDecoder),
        TemplateId::AciSection => Box::new(SectionDecoder::aci()),
        TemplateId::AciNumeratorDenominator => Box::new(AciNumeratorDenominatorDecoder),
        TemplateId::IaSection => Box::new(SectionDecoder::ia()),
        TemplateId::IaMeasure => Box::new(IaMeasureDecoder),
        TemplateId::AciNumerator | TemplateId::AciDenominator | TemplateId::Unrecognized => {
            return None;
        }
    };
    Some(decoder)
}

static DEFAULT_REGISTRY: OnceLock<DecoderRegistry> = OnceLock::new();

/// Returns the standard decoder registry, built on first access.
pub fn default_registry() -> &'static DecoderRegistry {
    DEFAULT_REGISTRY.get_or_init(DecoderRegistry::standard)
}
