//! Validation of an FBA run record
//!
//! The target model is an external object, so objective-term membership checks
//! run through the resolver capability and degrade to well-formedness when it
//! is absent.
use indexmap::IndexMap;

use crate::schema::fba::{
    FBABiomassVariable, FBACompoundBound, FBACompoundVariable, FBAConstraint, FBADeletionResult,
    FBAMinimalMediaResult, FBAReactionBound, FBAReactionVariable, FBA,
};
use crate::validate::checks::Checker;
use crate::validate::reference::is_wellformed_subpath;
use crate::validate::{ModelEntityKind, RefResolver, Rule, Validate, ValidationReport};

impl Validate for FBA {
    fn validate(&self, resolver: &dyn RefResolver) -> ValidationReport {
        let mut checker = Checker::new();

        // Pass 1: reference well-formedness
        let schema = FBA::SCHEMA;
        checker.reference(
            "fbamodel_ref",
            schema.field("fbamodel_ref").unwrap(),
            &self.fbamodel_ref,
        );
        checker.reference(
            "media_ref",
            schema.field("media_ref").unwrap(),
            &self.media_ref,
        );
        for (field, value) in [
            ("regmodel_ref", &self.regmodel_ref),
            ("prommodel_ref", &self.prommodel_ref),
            ("phenotypeset_ref", &self.phenotypeset_ref),
        ] {
            if let Some(value) = value {
                checker.reference(field, schema.field(field).unwrap(), value);
            }
        }
        check_objective_term_shapes(
            &mut checker,
            "compound_objective_terms",
            &self.compound_objective_terms,
        );
        check_objective_term_shapes(
            &mut checker,
            "reaction_objective_terms",
            &self.reaction_objective_terms,
        );
        check_objective_term_shapes(
            &mut checker,
            "biomass_objective_terms",
            &self.biomass_objective_terms,
        );
        for (i, bound) in self.reaction_bounds.iter().enumerate() {
            checker.reference(
                &format!("reaction_bounds/{}/modelreaction_ref", i),
                FBAReactionBound::SCHEMA.field("modelreaction_ref").unwrap(),
                &bound.modelreaction_ref,
            );
        }
        for (i, bound) in self.compound_bounds.iter().enumerate() {
            checker.reference(
                &format!("compound_bounds/{}/modelcompound_ref", i),
                FBACompoundBound::SCHEMA.field("modelcompound_ref").unwrap(),
                &bound.modelcompound_ref,
            );
        }
        for (i, constraint) in self.constraints.iter().enumerate() {
            let spec = FBAConstraint::SCHEMA.field("terms").unwrap();
            for reference in constraint.terms.keys() {
                checker.reference(
                    &format!("constraints/{}/terms/{}", i, reference),
                    spec,
                    reference,
                );
            }
        }
        for (i, variable) in self.reaction_variables.iter().enumerate() {
            checker.reference(
                &format!("reaction_variables/{}/modelreaction_ref", i),
                FBAReactionVariable::SCHEMA
                    .field("modelreaction_ref")
                    .unwrap(),
                &variable.modelreaction_ref,
            );
        }
        for (i, variable) in self.compound_variables.iter().enumerate() {
            checker.reference(
                &format!("compound_variables/{}/modelcompound_ref", i),
                FBACompoundVariable::SCHEMA
                    .field("modelcompound_ref")
                    .unwrap(),
                &variable.modelcompound_ref,
            );
        }
        for (i, variable) in self.biomass_variables.iter().enumerate() {
            checker.reference(
                &format!("biomass_variables/{}/biomass_ref", i),
                FBABiomassVariable::SCHEMA.field("biomass_ref").unwrap(),
                &variable.biomass_ref,
            );
        }
        let feature_spec = FBADeletionResult::SCHEMA.field("feature_refs").unwrap();
        for (i, result) in self.deletion_results.iter().enumerate() {
            for (j, feature_ref) in result.feature_refs.iter().enumerate() {
                checker.reference(
                    &format!("deletion_results/{}/feature_refs/{}", i, j),
                    feature_spec,
                    feature_ref,
                );
            }
        }
        let essential_spec = FBAMinimalMediaResult::SCHEMA
            .field("essential_nutrient_refs")
            .unwrap();
        let optional_spec = FBAMinimalMediaResult::SCHEMA
            .field("optional_nutrient_refs")
            .unwrap();
        for (i, result) in self.minimal_media_results.iter().enumerate() {
            for (j, nutrient_ref) in result.essential_nutrient_refs.iter().enumerate() {
                checker.reference(
                    &format!("minimal_media_results/{}/essential_nutrient_refs/{}", i, j),
                    essential_spec,
                    nutrient_ref,
                );
            }
            for (j, nutrient_ref) in result.optional_nutrient_refs.iter().enumerate() {
                checker.reference(
                    &format!("minimal_media_results/{}/optional_nutrient_refs/{}", i, j),
                    optional_spec,
                    nutrient_ref,
                );
            }
        }

        // Pass 2: no nested id lists in an FBA record

        // Pass 3: nothing resolves locally; best-effort absolute resolution
        checker.resolve_absolute("fbamodel_ref", &self.fbamodel_ref, resolver);
        checker.resolve_absolute("media_ref", &self.media_ref, resolver);

        // Pass 4: bound ordering on every bound and variable record
        for (i, bound) in self.reaction_bounds.iter().enumerate() {
            checker.bounds(
                &format!("reaction_bounds/{}", i),
                bound.lower_bound,
                bound.upper_bound,
            );
        }
        for (i, bound) in self.compound_bounds.iter().enumerate() {
            checker.bounds(
                &format!("compound_bounds/{}", i),
                bound.lower_bound,
                bound.upper_bound,
            );
        }
        for (i, variable) in self.reaction_variables.iter().enumerate() {
            checker.bounds(
                &format!("reaction_variables/{}", i),
                variable.lower_bound,
                variable.upper_bound,
            );
        }
        for (i, variable) in self.compound_variables.iter().enumerate() {
            checker.bounds(
                &format!("compound_variables/{}", i),
                variable.lower_bound,
                variable.upper_bound,
            );
        }
        for (i, variable) in self.biomass_variables.iter().enumerate() {
            checker.bounds(
                &format!("biomass_variables/{}", i),
                variable.lower_bound,
                variable.upper_bound,
            );
        }
        for (i, constraint) in self.constraints.iter().enumerate() {
            checker.direction(&format!("constraints/{}/sign", i), &constraint.sign);
        }

        // Pass 5: objective terms must target entities present in the model
        check_objective_targets(
            &mut checker,
            "compound_objective_terms",
            ModelEntityKind::Compound,
            &self.compound_objective_terms,
            resolver,
        );
        check_objective_targets(
            &mut checker,
            "reaction_objective_terms",
            ModelEntityKind::Reaction,
            &self.reaction_objective_terms,
            resolver,
        );
        check_objective_targets(
            &mut checker,
            "biomass_objective_terms",
            ModelEntityKind::Biomass,
            &self.biomass_objective_terms,
            resolver,
        );

        checker.into_report()
    }
}

fn check_objective_term_shapes(
    checker: &mut Checker,
    list_path: &str,
    terms: &IndexMap<String, f64>,
) {
    let spec = FBA::SCHEMA.field(list_path).unwrap();
    for reference in terms.keys() {
        checker.reference(&format!("{}/{}", list_path, reference), spec, reference);
    }
}

fn check_objective_targets(
    checker: &mut Checker,
    list_path: &str,
    kind: ModelEntityKind,
    terms: &IndexMap<String, f64>,
    resolver: &dyn RefResolver,
) {
    for reference in terms.keys() {
        // Malformed keys were reported in pass 1
        if !is_wellformed_subpath(reference) {
            continue;
        }
        if resolver.model_has(kind, reference) == Some(false) {
            checker.finding(
                format!("{}/{}", list_path, reference),
                Rule::ObjectiveTarget,
                format!("\"{}\" is not present in the target model", reference),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::fba::{FBABuilder, FBAReactionBoundBuilder, FBAReactionVariableBuilder};
    use crate::validate::NoResolver;

    /// Resolver that knows the target model's biomass list
    struct ModelMembership;

    impl RefResolver for ModelMembership {
        fn model_has(&self, kind: ModelEntityKind, reference: &str) -> Option<bool> {
            Some(kind == ModelEntityKind::Biomass && reference.ends_with("bio1"))
        }
    }

    fn setup_fba() -> FBA {
        let mut terms = IndexMap::new();
        terms.insert("~/biomasses/id/bio1".to_string(), 1.0);
        FBABuilder::default()
            .id("fba.0".to_string())
            .fbamodel_ref("ws/model/1".to_string())
            .media_ref("ws/Carbon-D-Glucose/1".to_string())
            .biomass_objective_terms(terms)
            .build()
            .unwrap()
    }

    #[test]
    fn valid_fba_empty_report() {
        let fba = setup_fba();
        assert!(fba.validate(&NoResolver).is_valid());
        assert!(fba.validate(&ModelMembership).is_valid());
    }

    #[test]
    fn bound_ordering() {
        let mut fba = setup_fba();
        fba.reaction_bounds.push(
            FBAReactionBoundBuilder::default()
                .modelreaction_ref("~/modelreactions/id/rxn00001_c0".to_string())
                .lower_bound(10.0)
                .upper_bound(-10.0)
                .build()
                .unwrap(),
        );
        let report = fba.validate(&NoResolver);
        assert_eq!(report.len(), 1);
        assert_eq!(report.findings()[0].rule, Rule::BoundOrdering);
        assert_eq!(report.findings()[0].path, "reaction_bounds/0");
    }

    #[test]
    fn bound_equality_allowed() {
        let mut fba = setup_fba();
        fba.reaction_bounds.push(
            FBAReactionBoundBuilder::default()
                .modelreaction_ref("~/modelreactions/id/rxn00001_c0".to_string())
                .lower_bound(0.0)
                .upper_bound(0.0)
                .build()
                .unwrap(),
        );
        assert!(fba.validate(&NoResolver).is_valid());
    }

    #[test]
    fn variable_bounds_checked() {
        let mut fba = setup_fba();
        fba.reaction_variables.push(
            FBAReactionVariableBuilder::default()
                .modelreaction_ref("~/modelreactions/id/rxn00001_c0".to_string())
                .lower_bound(5.0)
                .upper_bound(1.0)
                .value(Some(3.0))
                .build()
                .unwrap(),
        );
        let report = fba.validate(&NoResolver);
        assert_eq!(report.len(), 1);
        assert_eq!(report.findings()[0].path, "reaction_variables/0");
    }

    #[test]
    fn deletion_result_feature_ref_checked() {
        let mut fba = setup_fba();
        fba.deletion_results.push(
            crate::schema::fba::FBADeletionResultBuilder::default()
                .feature_refs(vec!["definitely not a ref".to_string()])
                .growth_fraction(0.0)
                .build()
                .unwrap(),
        );
        let report = fba.validate(&NoResolver);
        assert_eq!(report.len(), 1);
        assert_eq!(report.findings()[0].rule, Rule::MalformedReference);
        assert_eq!(report.findings()[0].path, "deletion_results/0/feature_refs/0");
    }

    #[test]
    fn minimal_media_nutrient_refs_checked() {
        let mut fba = setup_fba();
        fba.minimal_media_results.push(
            crate::schema::fba::FBAMinimalMediaResultBuilder::default()
                .essential_nutrient_refs(vec!["ws/biochem/1".to_string()])
                .optional_nutrient_refs(vec!["ws//bad".to_string()])
                .build()
                .unwrap(),
        );
        let report = fba.validate(&NoResolver);
        assert_eq!(report.len(), 1);
        assert_eq!(
            report.findings()[0].path,
            "minimal_media_results/0/optional_nutrient_refs/0"
        );
    }

    #[test]
    fn constraint_sign_checked() {
        let mut fba = setup_fba();
        let mut terms = IndexMap::new();
        terms.insert("~/modelreactions/id/rxn00001_c0".to_string(), 1.0);
        fba.constraints.push(
            crate::schema::fba::FBAConstraintBuilder::default()
                .name("atp_maintenance".to_string())
                .sign(">=".to_string())
                .terms(terms)
                .build()
                .unwrap(),
        );
        let report = fba.validate(&NoResolver);
        assert_eq!(report.len(), 1);
        assert_eq!(report.findings()[0].rule, Rule::InvalidDirection);
        assert_eq!(report.findings()[0].path, "constraints/0/sign");
    }

    #[test]
    fn objective_target_membership() {
        let mut fba = setup_fba();
        fba.reaction_objective_terms
            .insert("~/modelreactions/id/rxn99999_c0".to_string(), 1.0);
        // Without the capability only well-formedness applies
        assert!(fba.validate(&NoResolver).is_valid());
        // With it, the absent reaction is reported
        let report = fba.validate(&ModelMembership);
        assert_eq!(report.len(), 1);
        assert_eq!(report.findings()[0].rule, Rule::ObjectiveTarget);
    }

    #[test]
    fn malformed_objective_key() {
        let mut fba = setup_fba();
        fba.compound_objective_terms
            .insert("cpd00001".to_string(), 1.0);
        let report = fba.validate(&ModelMembership);
        // Reported once as malformed, not a second time as a bad target
        assert_eq!(report.len(), 1);
        assert_eq!(report.findings()[0].rule, Rule::MalformedReference);
    }
}
