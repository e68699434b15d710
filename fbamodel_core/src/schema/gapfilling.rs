//! This module provides the Gapfilling struct representing one gapfilling analysis run
//!
//! Gapfilling objects are write-once: the external search populates the solution
//! list exactly once; integration into a model is recorded on the model side.
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::schema::descriptor::{
    absolute_ref, id_field, subpath_ref, EntitySchema, FieldSpec, Semantic,
};

/// Represents one gapfilling analysis run against a model
#[derive(Builder, Clone, Debug, Serialize, Deserialize)]
pub struct Gapfilling {
    /// Used to identify the analysis (must be unique)
    pub id: String,
    /// Reference to the FBA run driving the search
    #[builder(default = "None")]
    pub fba_ref: Option<String>,
    /// Reference to the media the search was run in
    pub media_ref: String,
    /// Reference to the model the search targets
    pub fbamodel_ref: String,
    /// Reference to a probabilistic annotation weighting candidate reactions
    #[builder(default = "None")]
    pub probanno_ref: Option<String>,
    /// Allow new reaction additions
    #[builder(default = "true")]
    pub reaction_additions: bool,
    /// Allow biomass composition hypotheses
    #[builder(default = "false")]
    pub biomass_hypothesis: bool,
    /// Allow gene-protein-reaction hypotheses
    #[builder(default = "false")]
    pub gpr_hypothesis: bool,
    /// Allow reconciliation against the source model
    #[builder(default = "false")]
    pub model_reconciliation: bool,
    /// Penalty multiplier for adding a reaction (non-negative)
    #[builder(default = "1.0")]
    pub reaction_addition_multiplier: f64,
    /// Penalty multiplier for adding a biomass transporter (non-negative)
    #[builder(default = "1.0")]
    pub biomass_transporter_multiplier: f64,
    /// Penalty multiplier for reversing a reaction direction (non-negative)
    #[builder(default = "1.0")]
    pub direction_change_multiplier: f64,
    /// Penalty multiplier for reactions lacking structure (non-negative)
    #[builder(default = "1.0")]
    pub no_structure_multiplier: f64,
    /// Penalty multiplier for reactions breaking delta-G rules (non-negative)
    #[builder(default = "1.0")]
    pub unfavorable_multiplier: f64,
    /// Solutions found by the search
    #[builder(default = "Vec::new()")]
    pub solutions: Vec<GapfillingSolution>,
}

impl Gapfilling {
    pub const SCHEMA: EntitySchema = EntitySchema {
        entity: "Gapfilling",
        fields: &[
            id_field("id"),
            absolute_ref("fba_ref"),
            absolute_ref("media_ref"),
            absolute_ref("fbamodel_ref"),
            absolute_ref("probanno_ref"),
            FieldSpec::new("reaction_addition_multiplier", Semantic::NonNegative),
            FieldSpec::new("biomass_transporter_multiplier", Semantic::NonNegative),
            FieldSpec::new("direction_change_multiplier", Semantic::NonNegative),
            FieldSpec::new("no_structure_multiplier", Semantic::NonNegative),
            FieldSpec::new("unfavorable_multiplier", Semantic::NonNegative),
        ],
    };
}

/// One solution found by a gapfilling search
#[derive(Builder, Clone, Debug, Serialize, Deserialize)]
pub struct GapfillingSolution {
    /// Used to identify the solution (must be unique within the analysis)
    pub id: String,
    /// Total penalty cost of the solution (non-negative)
    pub solution_cost: f64,
    /// Whether this solution has been incorporated into the target model
    #[builder(default = "false")]
    pub integrated: bool,
    /// Reference to the media the solution was found in
    #[builder(default = "None")]
    pub media_ref: Option<String>,
    /// Reactions the solution adds or reverses
    #[builder(default = "Vec::new()")]
    pub reactions: Vec<GapfillingReaction>,
}

impl GapfillingSolution {
    pub const SCHEMA: EntitySchema = EntitySchema {
        entity: "GapfillingSolution",
        fields: &[
            id_field("id"),
            absolute_ref("media_ref"),
            FieldSpec::new("solution_cost", Semantic::NonNegative),
        ],
    };
}

/// One reaction proposed by a gapfilling solution
#[derive(Builder, Clone, Debug, Serialize, Deserialize)]
pub struct GapfillingReaction {
    /// Reference to the biochemistry reaction to add
    pub reaction_ref: String,
    /// Reference to the compartment the reaction runs in
    pub compartment_ref: String,
    /// Direction the added reaction proceeds, one of "<", "=", ">"
    #[builder(default = "\"=\".to_string()")]
    pub direction: String,
    /// Candidate genome features that could catalyze the reaction
    #[builder(default = "Vec::new()")]
    pub candidate_feature_refs: Vec<String>,
}

impl GapfillingReaction {
    pub const SCHEMA: EntitySchema = EntitySchema {
        entity: "GapfillingReaction",
        fields: &[
            absolute_ref("reaction_ref"),
            absolute_ref("compartment_ref"),
            subpath_ref("candidate_feature_refs"),
        ],
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults() {
        let gapfilling = GapfillingBuilder::default()
            .id("gf.0".to_string())
            .media_ref("ws/Carbon-D-Glucose/1".to_string())
            .fbamodel_ref("ws/model/1".to_string())
            .build()
            .unwrap();
        assert!(gapfilling.reaction_additions);
        assert_eq!(gapfilling.reaction_addition_multiplier, 1.0);
        assert!(gapfilling.solutions.is_empty());
    }
}
