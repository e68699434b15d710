//! Validation of a ModelTemplate graph
//!
//! Template reactions and biomass components point at the template's own
//! compartment list; compound references point into the external biochemistry
//! and can only be resolved through the caller supplied capability.
use crate::schema::template::{
    ModelTemplate, TemplateBiomass, TemplateBiomassComponent, TemplateReaction,
};
use crate::validate::checks::Checker;
use crate::validate::reference::parse_subpath;
use crate::validate::{RefResolver, Rule, Validate, ValidationReport};

impl Validate for ModelTemplate {
    fn validate(&self, resolver: &dyn RefResolver) -> ValidationReport {
        let mut checker = Checker::new();

        // Pass 1: reference well-formedness
        checker.reference(
            "mapping_ref",
            ModelTemplate::SCHEMA.field("mapping_ref").unwrap(),
            &self.mapping_ref,
        );
        let reaction_schema = TemplateReaction::SCHEMA;
        for reaction in &self.template_reactions {
            let base = format!("template_reactions/{}", reaction.id);
            checker.reference(
                &format!("{}/reaction_ref", base),
                reaction_schema.field("reaction_ref").unwrap(),
                &reaction.reaction_ref,
            );
            checker.reference(
                &format!("{}/compartment_ref", base),
                reaction_schema.field("compartment_ref").unwrap(),
                &reaction.compartment_ref,
            );
            for (i, complex_ref) in reaction.complex_refs.iter().enumerate() {
                checker.reference(
                    &format!("{}/complex_refs/{}", base, i),
                    reaction_schema.field("complex_refs").unwrap(),
                    complex_ref,
                );
            }
        }
        let component_schema = TemplateBiomassComponent::SCHEMA;
        for biomass in &self.biomasses {
            for (i, component) in biomass.components.iter().enumerate() {
                let base = format!("biomasses/{}/components/{}", biomass.id, i);
                checker.reference(
                    &format!("{}/compound_ref", base),
                    component_schema.field("compound_ref").unwrap(),
                    &component.compound_ref,
                );
                checker.reference(
                    &format!("{}/compartment_ref", base),
                    component_schema.field("compartment_ref").unwrap(),
                    &component.compartment_ref,
                );
            }
        }

        // Pass 2: id uniqueness within each list
        checker.unique_ids(
            "compartments",
            self.compartments.iter().map(|c| c.id.as_str()),
        );
        checker.unique_ids(
            "template_reactions",
            self.template_reactions.iter().map(|r| r.id.as_str()),
        );
        checker.unique_ids("biomasses", self.biomasses.iter().map(|b| b.id.as_str()));

        // Pass 3: compartment references resolve against the template's own
        // compartment list; compound references resolve through the store
        checker.resolve_absolute("mapping_ref", &self.mapping_ref, resolver);
        let compartment_ids = || self.compartments.iter().map(|c| c.id.as_str());
        for reaction in &self.template_reactions {
            checker.resolve_local(
                &format!("template_reactions/{}/compartment_ref", reaction.id),
                &reaction.compartment_ref,
                "compartments",
                compartment_ids(),
            );
        }
        for biomass in &self.biomasses {
            for (i, component) in biomass.components.iter().enumerate() {
                let base = format!("biomasses/{}/components/{}", biomass.id, i);
                checker.resolve_local(
                    &format!("{}/compartment_ref", base),
                    &component.compartment_ref,
                    "compartments",
                    compartment_ids(),
                );
                if let Some(parsed) = parse_subpath(&component.compound_ref) {
                    if !parsed.is_local() {
                        checker.resolve_absolute(
                            &format!("{}/compound_ref", base),
                            parsed.base,
                            resolver,
                        );
                    }
                }
            }
        }

        // Pass 4: direction domains
        for reaction in &self.template_reactions {
            checker.direction(
                &format!("template_reactions/{}/direction", reaction.id),
                &reaction.direction,
            );
        }

        // Pass 5: no cross-list consistency beyond the resolutions above

        checker.into_report()
    }
}
