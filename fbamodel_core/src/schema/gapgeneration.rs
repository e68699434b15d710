//! This module provides the Gapgeneration struct representing one gap generation
//! analysis run, which searches for reactions to remove so a model stops growing
//! on a medium it should not grow on
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::schema::descriptor::{
    absolute_ref, id_field, subpath_ref, EntitySchema, FieldSpec, Semantic,
};

/// Represents one gapgeneration analysis run against a model
#[derive(Builder, Clone, Debug, Serialize, Deserialize)]
pub struct Gapgeneration {
    /// Used to identify the analysis (must be unique)
    pub id: String,
    /// Reference to the FBA run driving the search
    #[builder(default = "None")]
    pub fba_ref: Option<String>,
    /// Reference to the model the search targets
    pub fbamodel_ref: String,
    /// Reference to the media growth should be removed from
    pub media_ref: String,
    /// Reference to the media growth must be preserved in
    #[builder(default = "None")]
    pub reference_media_ref: Option<String>,
    /// Allow biomass composition hypotheses
    #[builder(default = "false")]
    pub biomass_hypothesis: bool,
    /// Allow media composition hypotheses
    #[builder(default = "false")]
    pub media_hypothesis: bool,
    /// Allow gene-protein-reaction hypotheses
    #[builder(default = "false")]
    pub gpr_hypothesis: bool,
    /// Seconds allotted per solution (non-negative)
    #[builder(default = "3600.0")]
    pub time_per_solution: f64,
    /// Seconds allotted for the whole search (non-negative)
    #[builder(default = "3600.0")]
    pub total_time_limit: f64,
    /// Solutions found by the search
    #[builder(default = "Vec::new()")]
    pub solutions: Vec<GapgenerationSolution>,
}

impl Gapgeneration {
    pub const SCHEMA: EntitySchema = EntitySchema {
        entity: "Gapgeneration",
        fields: &[
            id_field("id"),
            absolute_ref("fba_ref"),
            absolute_ref("fbamodel_ref"),
            absolute_ref("media_ref"),
            absolute_ref("reference_media_ref"),
            FieldSpec::new("time_per_solution", Semantic::NonNegative),
            FieldSpec::new("total_time_limit", Semantic::NonNegative),
        ],
    };
}

/// One solution found by a gapgeneration search
#[derive(Builder, Clone, Debug, Serialize, Deserialize)]
pub struct GapgenerationSolution {
    /// Used to identify the solution (must be unique within the analysis)
    pub id: String,
    /// Total cost of the solution (non-negative)
    pub solution_cost: f64,
    /// Whether this solution has been incorporated into the target model
    #[builder(default = "false")]
    pub integrated: bool,
    /// Reactions the solution removes or restricts
    #[builder(default = "Vec::new()")]
    pub solution_reactions: Vec<GapgenerationReaction>,
}

impl GapgenerationSolution {
    pub const SCHEMA: EntitySchema = EntitySchema {
        entity: "GapgenerationSolution",
        fields: &[
            id_field("id"),
            FieldSpec::new("solution_cost", Semantic::NonNegative),
        ],
    };
}

/// One reaction removed or restricted by a gapgeneration solution
#[derive(Builder, Clone, Debug, Serialize, Deserialize)]
pub struct GapgenerationReaction {
    /// Reference to the model reaction to remove or restrict
    pub modelreaction_ref: String,
    /// Remaining allowed direction, one of "<", "=", ">"
    #[builder(default = "\"=\".to_string()")]
    pub direction: String,
}

impl GapgenerationReaction {
    pub const SCHEMA: EntitySchema = EntitySchema {
        entity: "GapgenerationReaction",
        fields: &[subpath_ref("modelreaction_ref")],
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults() {
        let gapgen = GapgenerationBuilder::default()
            .id("gg.0".to_string())
            .fbamodel_ref("ws/model/1".to_string())
            .media_ref("ws/Carbon-D-Glucose/1".to_string())
            .build()
            .unwrap();
        assert_eq!(gapgen.time_per_solution, 3600.0);
        assert!(gapgen.solutions.is_empty());
    }
}
