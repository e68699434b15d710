//! Validation of a Gapgeneration analysis record
use crate::schema::gapgeneration::{Gapgeneration, GapgenerationReaction};
use crate::validate::checks::Checker;
use crate::validate::{RefResolver, Rule, Validate, ValidationReport};

impl Validate for Gapgeneration {
    fn validate(&self, resolver: &dyn RefResolver) -> ValidationReport {
        let mut checker = Checker::new();

        // Pass 1: reference well-formedness
        let schema = Gapgeneration::SCHEMA;
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
            ("fba_ref", &self.fba_ref),
            ("reference_media_ref", &self.reference_media_ref),
        ] {
            if let Some(value) = value {
                checker.reference(field, schema.field(field).unwrap(), value);
            }
        }
        let reaction_spec = GapgenerationReaction::SCHEMA
            .field("modelreaction_ref")
            .unwrap();
        for solution in &self.solutions {
            for (i, reaction) in solution.solution_reactions.iter().enumerate() {
                checker.reference(
                    &format!(
                        "solutions/{}/solution_reactions/{}/modelreaction_ref",
                        solution.id, i
                    ),
                    reaction_spec,
                    &reaction.modelreaction_ref,
                );
            }
        }

        // Pass 2: solution ids unique within the analysis
        checker.unique_ids("solutions", self.solutions.iter().map(|s| s.id.as_str()));

        // Pass 3: absolute resolution, best effort; solution reaction refs are
        // declared local to the target model and must be based on it, not on
        // some other object
        checker.resolve_absolute("fbamodel_ref", &self.fbamodel_ref, resolver);
        checker.resolve_absolute("media_ref", &self.media_ref, resolver);
        for solution in &self.solutions {
            for (i, reaction) in solution.solution_reactions.iter().enumerate() {
                checker.require_local_base(
                    &format!(
                        "solutions/{}/solution_reactions/{}/modelreaction_ref",
                        solution.id, i
                    ),
                    &reaction.modelreaction_ref,
                );
            }
        }

        // Pass 4: time limits and costs non-negative, directions in domain
        checker.non_negative("time_per_solution", self.time_per_solution);
        checker.non_negative("total_time_limit", self.total_time_limit);
        for solution in &self.solutions {
            let base = format!("solutions/{}", solution.id);
            checker.non_negative(&format!("{}/solution_cost", base), solution.solution_cost);
            for (i, reaction) in solution.solution_reactions.iter().enumerate() {
                checker.direction(
                    &format!("{}/solution_reactions/{}/direction", base, i),
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::gapgeneration::{
        GapgenerationBuilder, GapgenerationReactionBuilder, GapgenerationSolutionBuilder,
    };
    use crate::validate::NoResolver;

    fn setup_gapgen() -> Gapgeneration {
        GapgenerationBuilder::default()
            .id("gg.0".to_string())
            .fbamodel_ref("ws/model/1".to_string())
            .media_ref("ws/Carbon-D-Glucose/1".to_string())
            .solutions(vec![GapgenerationSolutionBuilder::default()
                .id("gg.0.sol.0".to_string())
                .solution_cost(1.0)
                .solution_reactions(vec![GapgenerationReactionBuilder::default()
                    .modelreaction_ref("~/modelreactions/id/rxn00001_c0".to_string())
                    .direction("<".to_string())
                    .build()
                    .unwrap()])
                .build()
                .unwrap()])
            .build()
            .unwrap()
    }

    #[test]
    fn valid_gapgen_empty_report() {
        assert!(setup_gapgen().validate(&NoResolver).is_valid());
    }

    #[test]
    fn negative_time_limit() {
        let mut gapgen = setup_gapgen();
        gapgen.time_per_solution = -60.0;
        let report = gapgen.validate(&NoResolver);
        assert_eq!(report.len(), 1);
        assert_eq!(report.findings()[0].rule, Rule::NegativeWeight);
        assert_eq!(report.findings()[0].path, "time_per_solution");
    }

    #[test]
    fn negative_solution_cost() {
        let mut gapgen = setup_gapgen();
        gapgen.solutions[0].solution_cost = -0.5;
        let report = gapgen.validate(&NoResolver);
        assert_eq!(report.len(), 1);
        assert_eq!(report.findings()[0].rule, Rule::NegativeWeight);
    }

    #[test]
    fn solution_reaction_ref_based_on_another_object() {
        let mut gapgen = setup_gapgen();
        gapgen.solutions[0].solution_reactions[0].modelreaction_ref =
            "ws/othermodel/1/modelreactions/id/rxn00001_c0".to_string();
        let report = gapgen.validate(&NoResolver);
        assert_eq!(report.len(), 1);
        assert_eq!(report.findings()[0].rule, Rule::UnresolvedReference);
        assert_eq!(
            report.findings()[0].path,
            "solutions/gg.0.sol.0/solution_reactions/0/modelreaction_ref"
        );
    }

    #[test]
    fn malformed_solution_reaction_ref() {
        let mut gapgen = setup_gapgen();
        gapgen.solutions[0].solution_reactions[0].modelreaction_ref = "rxn00001".to_string();
        let report = gapgen.validate(&NoResolver);
        assert_eq!(report.len(), 1);
        assert_eq!(report.findings()[0].rule, Rule::MalformedReference);
    }
}
