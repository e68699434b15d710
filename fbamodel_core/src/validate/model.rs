//! Validation of an FBAModel graph
use crate::schema::model::{
    BiomassCompound, FBAModel, ModelCompartment, ModelCompound, ModelGapfill, ModelGapgen,
    ModelReaction, ModelReactionProtein, ModelReactionProteinSubunit, ModelReactionReagent,
};
use crate::validate::checks::Checker;
use crate::validate::{RefResolver, Rule, Validate, ValidationReport};

impl Validate for FBAModel {
    fn validate(&self, resolver: &dyn RefResolver) -> ValidationReport {
        let mut checker = Checker::new();

        // Pass 1: reference well-formedness against each field's declared kind
        check_reference_shapes(self, &mut checker);

        // Pass 2: id uniqueness within each enclosing list
        checker.unique_ids(
            "modelcompartments",
            self.modelcompartments.iter().map(|c| c.id.as_str()),
        );
        checker.unique_ids(
            "modelcompounds",
            self.modelcompounds.iter().map(|c| c.id.as_str()),
        );
        checker.unique_ids(
            "modelreactions",
            self.modelreactions.iter().map(|r| r.id.as_str()),
        );
        checker.unique_ids("biomasses", self.biomasses.iter().map(|b| b.id.as_str()));
        checker.unique_ids(
            "gapfillings",
            self.gapfillings.iter().map(|g| g.gapfill_id.as_str()),
        );
        checker.unique_ids("gapgens", self.gapgens.iter().map(|g| g.gapgen_id.as_str()));

        // Pass 3: local reference resolution against the lists in this graph,
        // plus best-effort absolute resolution of the model-level references
        resolve_local_references(self, &mut checker);
        for (field, value) in [
            ("genome_ref", &self.genome_ref),
            ("metagenome_ref", &self.metagenome_ref),
            ("template_ref", &self.template_ref),
        ] {
            if let Some(value) = value {
                checker.resolve_absolute(field, value, resolver);
            }
        }

        // Pass 4: numeric value domains
        for reaction in &self.modelreactions {
            let base = format!("modelreactions/{}", reaction.id);
            checker.probability(&format!("{}/probability", base), reaction.probability);
            checker.direction(&format!("{}/direction", base), &reaction.direction);
        }

        // Pass 5: cross-entity consistency
        check_integration(self, &mut checker, resolver);

        checker.into_report()
    }
}

fn check_reference_shapes(model: &FBAModel, checker: &mut Checker) {
    let schema = FBAModel::SCHEMA;
    for (field, value) in [
        ("genome_ref", &model.genome_ref),
        ("metagenome_ref", &model.metagenome_ref),
        ("template_ref", &model.template_ref),
    ] {
        if let Some(value) = value {
            checker.reference(field, schema.field(field).unwrap(), value);
        }
    }
    for compartment in &model.modelcompartments {
        let path = format!("modelcompartments/{}/compartment_ref", compartment.id);
        checker.reference(
            &path,
            ModelCompartment::SCHEMA.field("compartment_ref").unwrap(),
            &compartment.compartment_ref,
        );
    }
    for compound in &model.modelcompounds {
        let base = format!("modelcompounds/{}", compound.id);
        let schema = ModelCompound::SCHEMA;
        checker.reference(
            &format!("{}/compound_ref", base),
            schema.field("compound_ref").unwrap(),
            &compound.compound_ref,
        );
        checker.reference(
            &format!("{}/modelcompartment_ref", base),
            schema.field("modelcompartment_ref").unwrap(),
            &compound.modelcompartment_ref,
        );
    }
    for reaction in &model.modelreactions {
        let base = format!("modelreactions/{}", reaction.id);
        let schema = ModelReaction::SCHEMA;
        checker.reference(
            &format!("{}/reaction_ref", base),
            schema.field("reaction_ref").unwrap(),
            &reaction.reaction_ref,
        );
        checker.reference(
            &format!("{}/modelcompartment_ref", base),
            schema.field("modelcompartment_ref").unwrap(),
            &reaction.modelcompartment_ref,
        );
        for (i, reagent) in reaction.reagents.iter().enumerate() {
            checker.reference(
                &format!("{}/reagents/{}/modelcompound_ref", base, i),
                ModelReactionReagent::SCHEMA
                    .field("modelcompound_ref")
                    .unwrap(),
                &reagent.modelcompound_ref,
            );
        }
        for (i, protein) in reaction.proteins.iter().enumerate() {
            let protein_base = format!("{}/proteins/{}", base, i);
            checker.reference(
                &format!("{}/complex_ref", protein_base),
                ModelReactionProtein::SCHEMA.field("complex_ref").unwrap(),
                &protein.complex_ref,
            );
            for (j, subunit) in protein.subunits.iter().enumerate() {
                for (k, feature_ref) in subunit.feature_refs.iter().enumerate() {
                    checker.reference(
                        &format!("{}/subunits/{}/feature_refs/{}", protein_base, j, k),
                        ModelReactionProteinSubunit::SCHEMA
                            .field("feature_refs")
                            .unwrap(),
                        feature_ref,
                    );
                }
            }
        }
    }
    for biomass in &model.biomasses {
        for (i, compound) in biomass.biomasscompounds.iter().enumerate() {
            checker.reference(
                &format!(
                    "biomasses/{}/biomasscompounds/{}/modelcompound_ref",
                    biomass.id, i
                ),
                BiomassCompound::SCHEMA.field("modelcompound_ref").unwrap(),
                &compound.modelcompound_ref,
            );
        }
    }
    for gapfill in &model.gapfillings {
        let base = format!("gapfillings/{}", gapfill.gapfill_id);
        let schema = ModelGapfill::SCHEMA;
        checker.reference(
            &format!("{}/gapfill_ref", base),
            schema.field("gapfill_ref").unwrap(),
            &gapfill.gapfill_ref,
        );
        checker.reference(
            &format!("{}/media_ref", base),
            schema.field("media_ref").unwrap(),
            &gapfill.media_ref,
        );
    }
    for gapgen in &model.gapgens {
        let base = format!("gapgens/{}", gapgen.gapgen_id);
        let schema = ModelGapgen::SCHEMA;
        checker.reference(
            &format!("{}/gapgen_ref", base),
            schema.field("gapgen_ref").unwrap(),
            &gapgen.gapgen_ref,
        );
        checker.reference(
            &format!("{}/media_ref", base),
            schema.field("media_ref").unwrap(),
            &gapgen.media_ref,
        );
    }
}

fn resolve_local_references(model: &FBAModel, checker: &mut Checker) {
    let compartment_ids = || model.modelcompartments.iter().map(|c| c.id.as_str());
    let compound_ids = || model.modelcompounds.iter().map(|c| c.id.as_str());

    for compound in &model.modelcompounds {
        checker.resolve_local(
            &format!("modelcompounds/{}/modelcompartment_ref", compound.id),
            &compound.modelcompartment_ref,
            "modelcompartments",
            compartment_ids(),
        );
    }
    for reaction in &model.modelreactions {
        let base = format!("modelreactions/{}", reaction.id);
        checker.resolve_local(
            &format!("{}/modelcompartment_ref", base),
            &reaction.modelcompartment_ref,
            "modelcompartments",
            compartment_ids(),
        );
        for (i, reagent) in reaction.reagents.iter().enumerate() {
            checker.resolve_local(
                &format!("{}/reagents/{}/modelcompound_ref", base, i),
                &reagent.modelcompound_ref,
                "modelcompounds",
                compound_ids(),
            );
        }
    }
    for biomass in &model.biomasses {
        for (i, compound) in biomass.biomasscompounds.iter().enumerate() {
            checker.resolve_local(
                &format!(
                    "biomasses/{}/biomasscompounds/{}/modelcompound_ref",
                    biomass.id, i
                ),
                &compound.modelcompound_ref,
                "modelcompounds",
                compound_ids(),
            );
        }
    }
}

fn check_integration(model: &FBAModel, checker: &mut Checker, resolver: &dyn RefResolver) {
    // Integrated-solution indices must land inside the referenced analysis
    // object's solution list, when the resolver can report its length
    for gapfill in &model.gapfillings {
        let base = format!("gapfillings/{}", gapfill.gapfill_id);
        if gapfill.integrated {
            match gapfill.integrated_solution {
                None => checker.finding(
                    format!("{}/integrated_solution", base),
                    Rule::SolutionIndex,
                    "integrated is set but no solution index is recorded",
                ),
                Some(index) => {
                    if let Some(count) = resolver.solution_count(&gapfill.gapfill_ref) {
                        if index >= count {
                            checker.finding(
                                format!("{}/integrated_solution", base),
                                Rule::SolutionIndex,
                                format!(
                                    "solution index {} is out of range for {} solutions",
                                    index, count
                                ),
                            );
                        }
                    }
                }
            }
        }
    }
    for gapgen in &model.gapgens {
        let base = format!("gapgens/{}", gapgen.gapgen_id);
        if gapgen.integrated {
            match gapgen.integrated_solution {
                None => checker.finding(
                    format!("{}/integrated_solution", base),
                    Rule::SolutionIndex,
                    "integrated is set but no solution index is recorded",
                ),
                Some(index) => {
                    if let Some(count) = resolver.solution_count(&gapgen.gapgen_ref) {
                        if index >= count {
                            checker.finding(
                                format!("{}/integrated_solution", base),
                                Rule::SolutionIndex,
                                format!(
                                    "solution index {} is out of range for {} solutions",
                                    index, count
                                ),
                            );
                        }
                    }
                }
            }
        }
    }
    // At most one integrated record per referenced analysis
    for (i, gapfill) in model.gapfillings.iter().enumerate() {
        if !gapfill.integrated {
            continue;
        }
        let earlier = model.gapfillings[..i]
            .iter()
            .any(|g| g.integrated && g.gapfill_ref == gapfill.gapfill_ref);
        if earlier {
            checker.finding(
                format!("gapfillings/{}/integrated", gapfill.gapfill_id),
                Rule::DuplicateIntegration,
                format!(
                    "more than one integrated solution for \"{}\"",
                    gapfill.gapfill_ref
                ),
            );
        }
    }
    for (i, gapgen) in model.gapgens.iter().enumerate() {
        if !gapgen.integrated {
            continue;
        }
        let earlier = model.gapgens[..i]
            .iter()
            .any(|g| g.integrated && g.gapgen_ref == gapgen.gapgen_ref);
        if earlier {
            checker.finding(
                format!("gapgens/{}/integrated", gapgen.gapgen_id),
                Rule::DuplicateIntegration,
                format!(
                    "more than one integrated solution for \"{}\"",
                    gapgen.gapgen_ref
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::model::{
        BiomassBuilder, BiomassCompoundBuilder, FBAModelBuilder, ModelCompartmentBuilder,
        ModelCompoundBuilder, ModelGapfillBuilder, ModelReactionBuilder,
        ModelReactionReagentBuilder,
    };
    use crate::validate::NoResolver;

    struct SolutionCounts(usize);

    impl RefResolver for SolutionCounts {
        fn solution_count(&self, _reference: &str) -> Option<usize> {
            Some(self.0)
        }
    }

    fn setup_model() -> FBAModel {
        let mut model = FBAModelBuilder::default()
            .id("test_model".to_string())
            .genome_ref(Some("ws/genome/1".to_string()))
            .build()
            .unwrap();
        model.add_compartment(
            ModelCompartmentBuilder::default()
                .id("c0".to_string())
                .compartment_ref("ws/biochem/1".to_string())
                .build()
                .unwrap(),
        );
        model.add_compound(
            ModelCompoundBuilder::default()
                .id("cpd00001_c0".to_string())
                .compound_ref("ws/biochem/1".to_string())
                .modelcompartment_ref("~/modelcompartments/id/c0".to_string())
                .build()
                .unwrap(),
        );
        model.add_compound(
            ModelCompoundBuilder::default()
                .id("cpd00002_c0".to_string())
                .compound_ref("ws/biochem/1".to_string())
                .modelcompartment_ref("~/modelcompartments/id/c0".to_string())
                .build()
                .unwrap(),
        );
        model.add_reaction(
            ModelReactionBuilder::default()
                .id("rxn00001_c0".to_string())
                .reaction_ref("ws/biochem/1".to_string())
                .modelcompartment_ref("~/modelcompartments/id/c0".to_string())
                .reagents(vec![
                    ModelReactionReagentBuilder::default()
                        .modelcompound_ref("~/modelcompounds/id/cpd00001_c0".to_string())
                        .coefficient(-1.0)
                        .build()
                        .unwrap(),
                    ModelReactionReagentBuilder::default()
                        .modelcompound_ref("~/modelcompounds/id/cpd00002_c0".to_string())
                        .coefficient(1.0)
                        .build()
                        .unwrap(),
                ])
                .build()
                .unwrap(),
        );
        model.add_biomass(
            BiomassBuilder::default()
                .id("bio1".to_string())
                .protein(0.5)
                .biomasscompounds(vec![BiomassCompoundBuilder::default()
                    .modelcompound_ref("~/modelcompounds/id/cpd00001_c0".to_string())
                    .coefficient(-0.5)
                    .build()
                    .unwrap()])
                .build()
                .unwrap(),
        );
        model
    }

    #[test]
    fn valid_model_empty_report() {
        let model = setup_model();
        let report = model.validate(&NoResolver);
        assert!(report.is_valid(), "unexpected findings: {:?}", report);
    }

    #[test]
    fn validation_is_idempotent() {
        let model = setup_model();
        let first = model.validate(&NoResolver);
        let second = model.validate(&NoResolver);
        assert_eq!(first, second);
    }

    #[test]
    fn dangling_compartment_ref_reported_once() {
        let mut model = setup_model();
        model.add_compound(
            ModelCompoundBuilder::default()
                .id("cpd00003_e0".to_string())
                .compound_ref("ws/biochem/1".to_string())
                .modelcompartment_ref("~/modelcompartments/id/e0".to_string())
                .build()
                .unwrap(),
        );
        let report = model.validate(&NoResolver);
        assert_eq!(report.len(), 1);
        let finding = &report.findings()[0];
        assert_eq!(finding.rule, Rule::UnresolvedReference);
        assert_eq!(finding.path, "modelcompounds/cpd00003_e0/modelcompartment_ref");
    }

    #[test]
    fn compartment_ref_based_on_another_model() {
        // Well-formed, and the element id even exists locally, but the base
        // names another object: it cannot resolve in this model
        let mut model = setup_model();
        model.modelcompounds[0].modelcompartment_ref =
            "ws/othermodel/1/modelcompartments/id/c0".to_string();
        let report = model.validate(&NoResolver);
        assert_eq!(report.len(), 1);
        let finding = &report.findings()[0];
        assert_eq!(finding.rule, Rule::UnresolvedReference);
        assert_eq!(
            finding.path,
            "modelcompounds/cpd00001_c0/modelcompartment_ref"
        );
    }

    #[test]
    fn reagent_ref_based_on_another_model() {
        let mut model = setup_model();
        model.modelreactions[0].reagents[0].modelcompound_ref =
            "ws/othermodel/1/modelcompounds/id/cpd00001_c0".to_string();
        let report = model.validate(&NoResolver);
        assert_eq!(report.len(), 1);
        assert_eq!(report.findings()[0].rule, Rule::UnresolvedReference);
    }

    #[test]
    fn duplicate_compartment_id() {
        let mut model = setup_model();
        model.add_compartment(
            ModelCompartmentBuilder::default()
                .id("c0".to_string())
                .compartment_ref("ws/biochem/1".to_string())
                .build()
                .unwrap(),
        );
        let report = model.validate(&NoResolver);
        assert_eq!(report.len(), 1);
        assert_eq!(report.findings()[0].rule, Rule::DuplicateId);
        assert_eq!(report.findings()[0].path, "modelcompartments/c0");
    }

    #[test]
    fn malformed_reference_reported() {
        let mut model = setup_model();
        model.genome_ref = Some("not a ref".to_string());
        let report = model.validate(&NoResolver);
        assert_eq!(report.len(), 1);
        assert_eq!(report.findings()[0].rule, Rule::MalformedReference);
        assert_eq!(report.findings()[0].path, "genome_ref");
    }

    #[test]
    fn probability_out_of_range() {
        let mut model = setup_model();
        model.modelreactions[0].probability = 1.2;
        let report = model.validate(&NoResolver);
        assert_eq!(report.len(), 1);
        assert_eq!(report.findings()[0].rule, Rule::ProbabilityRange);
    }

    #[test]
    fn invalid_direction() {
        let mut model = setup_model();
        model.modelreactions[0].direction = "<=>".to_string();
        let report = model.validate(&NoResolver);
        assert_eq!(report.len(), 1);
        assert_eq!(report.findings()[0].rule, Rule::InvalidDirection);
    }

    fn gapfill_record(integrated: bool, solution: Option<usize>) -> ModelGapfill {
        ModelGapfillBuilder::default()
            .gapfill_id("gf.0".to_string())
            .gapfill_ref("ws/gapfill0/1".to_string())
            .media_ref("ws/Carbon-D-Glucose/1".to_string())
            .integrated(integrated)
            .integrated_solution(solution)
            .build()
            .unwrap()
    }

    #[test]
    fn integrated_solution_index_in_range() {
        let mut model = setup_model();
        model.gapfillings.push(gapfill_record(true, Some(2)));
        // Referenced gapfilling has 3 solutions: index 2 is valid
        assert!(model.validate(&SolutionCounts(3)).is_valid());
        // With only 2 solutions, index 2 is out of range
        let report = model.validate(&SolutionCounts(2));
        assert_eq!(report.len(), 1);
        assert_eq!(report.findings()[0].rule, Rule::SolutionIndex);
        // Without the capability the check degrades silently
        assert!(model.validate(&NoResolver).is_valid());
    }

    #[test]
    fn integrated_without_index() {
        let mut model = setup_model();
        model.gapfillings.push(gapfill_record(true, None));
        let report = model.validate(&NoResolver);
        assert_eq!(report.len(), 1);
        assert_eq!(report.findings()[0].rule, Rule::SolutionIndex);
    }

    #[test]
    fn duplicate_integration_reported() {
        let mut model = setup_model();
        model.gapfillings.push(gapfill_record(true, Some(0)));
        let mut second = gapfill_record(true, Some(1));
        second.gapfill_id = "gf.1".to_string();
        model.gapfillings.push(second);
        let report = model.validate(&SolutionCounts(5));
        assert_eq!(report.len(), 1);
        assert_eq!(report.findings()[0].rule, Rule::DuplicateIntegration);
        assert_eq!(report.findings()[0].path, "gapfillings/gf.1/integrated");
    }

    #[test]
    fn all_findings_accumulated() {
        let mut model = setup_model();
        model.genome_ref = Some("bad ref".to_string());
        model.modelreactions[0].probability = -0.5;
        model.modelcompounds[0].modelcompartment_ref = "~/modelcompartments/id/x9".to_string();
        let report = model.validate(&NoResolver);
        assert_eq!(report.len(), 3);
        // Pass order: well-formedness before resolution before value domains
        assert_eq!(report.findings()[0].rule, Rule::MalformedReference);
        assert_eq!(report.findings()[1].rule, Rule::UnresolvedReference);
        assert_eq!(report.findings()[2].rule, Rule::ProbabilityRange);
    }
}
