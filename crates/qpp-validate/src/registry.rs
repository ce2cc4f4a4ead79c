//! Validator trait and registry.

use std::collections::HashMap;
use std::sync::OnceLock;

use qpp_model::{Node, TemplateId};

use crate::context::ValidationContext;
use crate::validators::{
    AciCountValidator, AciNumeratorDenominatorValidator, AggregateCountValidator,
    ClinicalDocumentValidator, IaMeasureValidator, MeasureDataValidator,
    MeasureReferenceResultsValidator, PerformanceRateValidator, ReportingParametersValidator,
    SectionValidator,
};

/// Rules for one template.
///
/// Both hooks default to doing nothing so a validator only implements the
/// phase it needs.
pub trait NodeValidator: Send + Sync {
    fn template(&self) -> TemplateId;

    /// Rules over a single node.
    fn validate_node(&self, _node: &Node, _context: &mut ValidationContext<'_>) {}

    /// Rules over every node of this template in the document, in pre-order.
    fn validate_group(&self, _nodes: &[&Node], _context: &mut ValidationContext<'_>) {}
}

/// Validators indexed by template. Read-only once built.
#[derive(Default)]
pub struct ValidatorRegistry {
    validators: HashMap<TemplateId, Box<dyn NodeValidator>>,
}

impl ValidatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in validator.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        for template in TemplateId::ALL {
            if let Some(validator) = validator_for(template) {
                registry.register(validator);
            }
        }
        registry
    }

    pub fn register(&mut self, validator: Box<dyn NodeValidator>) {
        self.validators.insert(validator.template(), validator);
    }

    pub fn get(&self, template: TemplateId) -> Option<&dyn NodeValidator> {
        self.validators.get(&template).map(|validator| validator.as_ref())
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

fn validator_for(template: TemplateId) -> Option<Box<dyn NodeValidator>> {
    let validator: Box<dyn NodeValidator> = match template {
        TemplateId::ClinicalDocument => Box::new(ClinicalDocumentValidator),
        TemplateId::ReportingParametersAct => Box::new(ReportingParametersValidator),
        TemplateId::MeasureSection => Box::new(SectionValidator::quality()),
        TemplateId::MeasureReferenceResults => Box::new(MeasureReferenceResultsValidator),
        TemplateId::MeasureData => Box::new(MeasureDataValidator),
        TemplateId::AggregateCount => Box::new(AggregateCountValidator),
        TemplateId::PerformanceRate => Box::new(PerformanceRateValidator),
        TemplateId::AciSection => Box::new(SectionValidator::aci()),
        TemplateId::AciNumeratorDenominator => Box::new(AciNumeratorDenominatorValidator),
        TemplateId::AciNumerator => Box::new(AciCountValidator::numerator()),
        TemplateId::AciDenominator => Box::new(AciCountValidator::denominator()),
        TemplateId::IaSection => Box::new(SectionValidator::ia()),
        TemplateId::IaMeasure => Box::new(IaMeasureValidator),
        TemplateId::Unrecognized => return None,
    };
    Some(validator)
}

static DEFAULT_REGISTRY: OnceLock<ValidatorRegistry> = OnceLock::new();

/// Returns the standard validator registry, built on first access.
pub fn default_validator_registry() -> &'static ValidatorRegistry {
    DEFAULT_REGISTRY.get_or_init(ValidatorRegistry::standard)
}
