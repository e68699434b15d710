//! Validation of a Gapfilling analysis record
use crate::schema::gapfilling::{Gapfilling, GapfillingReaction, GapfillingSolution};
use crate::validate::checks::Checker;
use crate::validate::{RefResolver, Rule, Validate, ValidationReport};

impl Validate for Gapfilling {
    fn validate(&self, resolver: &dyn RefResolver) -> ValidationReport {
        let mut checker = Checker::new();

        // Pass 1: reference well-formedness
        let schema = Gapfilling::SCHEMA;
        checker.reference(
            "media_ref",
            schema.field("media_ref").unwrap(),
            &self.media_ref,
        );
        checker.reference(
            "fbamodel_ref",
            schema.field("fbamodel_ref").unwrap(),
            &self.fbamodel_ref,
        );
        for (field, value) in [("fba_ref", &self.fba_ref), ("probanno_ref", &self.probanno_ref)] {
            if let Some(value) = value {
                checker.reference(field, schema.field(field).unwrap(), value);
            }
        }
        for solution in &self.solutions {
            let base = format!("solutions/{}", solution.id);
            if let Some(media_ref) = &solution.media_ref {
                checker.reference(
                    &format!("{}/media_ref", base),
                    GapfillingSolution::SCHEMA.field("media_ref").unwrap(),
                    media_ref,
                );
            }
            let reaction_schema = GapfillingReaction::SCHEMA;
            for (i, reaction) in solution.reactions.iter().enumerate() {
                checker.reference(
                    &format!("{}/reactions/{}/reaction_ref", base, i),
                    reaction_schema.field("reaction_ref").unwrap(),
                    &reaction.reaction_ref,
                );
                checker.reference(
                    &format!("{}/reactions/{}/compartment_ref", base, i),
                    reaction_schema.field("compartment_ref").unwrap(),
                    &reaction.compartment_ref,
                );
                for (j, feature_ref) in reaction.candidate_feature_refs.iter().enumerate() {
                    checker.reference(
                        &format!("{}/reactions/{}/candidate_feature_refs/{}", base, i, j),
                        reaction_schema.field("candidate_feature_refs").unwrap(),
                        feature_ref,
                    );
                }
            }
        }

        // Pass 2: solution ids unique within the analysis
        checker.unique_ids("solutions", self.solutions.iter().map(|s| s.id.as_str()));

        // Pass 3: absolute resolution, best effort
        checker.resolve_absolute("media_ref", &self.media_ref, resolver);
        checker.resolve_absolute("fbamodel_ref", &self.fbamodel_ref, resolver);

        // Pass 4: multiplier weights and solution costs are non-negative,
        // directions are in domain
        for (field, value) in [
            ("reaction_addition_multiplier", self.reaction_addition_multiplier),
            ("biomass_transporter_multiplier", self.biomass_transporter_multiplier),
            ("direction_change_multiplier", self.direction_change_multiplier),
            ("no_structure_multiplier", self.no_structure_multiplier),
            ("unfavorable_multiplier", self.unfavorable_multiplier),
        ] {
            checker.non_negative(field, value);
        }
        for solution in &self.solutions {
            let base = format!("solutions/{}", solution.id);
            checker.non_negative(&format!("{}/solution_cost", base), solution.solution_cost);
            for (i, reaction) in solution.reactions.iter().enumerate() {
                checker.direction(
                    &format!("{}/reactions/{}/direction", base, i),
                    &reaction.direction,
                );
            }
        }

        // Pass 5: at most one solution marked integrated
        let mut integrated_seen = false;
        for solution in &self.solutions {
            if !solution.integrated {
                continue;
            }
            if integrated_seen {
                checker.finding(
                    format!("solutions/{}/integrated", solution.id),
                    Rule::DuplicateIntegration,
                    "more than one solution is marked integrated",
                );
            }
            integrated_seen = true;
        }

        checker.into_report()
    }
}
