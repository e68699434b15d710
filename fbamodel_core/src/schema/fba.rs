//! This module provides the FBA struct representing one flux balance analysis run
//!
//! An FBA object is write-once: the configuration fields are set when the run is
//! created, and the result lists are populated exactly once by the external solver.
use derive_builder::Builder;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::schema::descriptor::{
    absolute_ref, id_field, subpath_ref, EntitySchema, FieldSpec, Semantic,
};

/// Represents one flux balance analysis run against a model
#[derive(Builder, Clone, Debug, Serialize, Deserialize)]
pub struct FBA {
    /// Used to identify the FBA run (must be unique)
    pub id: String,
    /// Reference to the model analyzed
    pub fbamodel_ref: String,
    /// Reference to the media the analysis was run in
    pub media_ref: String,
    /// Reference to a regulatory model constraining the run
    #[builder(default = "None")]
    pub regmodel_ref: Option<String>,
    /// Reference to a PROM model constraining the run
    #[builder(default = "None")]
    pub prommodel_ref: Option<String>,
    /// Reference to a phenotype set simulated by the run
    #[builder(default = "None")]
    pub phenotypeset_ref: Option<String>,
    /// Run flux variability analysis
    #[builder(default = "false")]
    pub fva: bool,
    /// Minimize total flux at the optimal objective
    #[builder(default = "false")]
    pub minimize_flux: bool,
    /// Search for the minimal media supporting growth
    #[builder(default = "false")]
    pub find_min_media: bool,
    /// Treat every reaction as reversible
    #[builder(default = "false")]
    pub all_reversible: bool,
    /// Maximize the objective (false minimizes)
    #[builder(default = "true")]
    pub maximize_objective: bool,
    /// Simulate knockouts of every gene
    #[builder(default = "false")]
    pub simulate_ko: bool,
    /// Default bound magnitude applied to unbounded reactions
    #[builder(default = "1000.0")]
    pub default_max_flux: f64,
    /// Default uptake bound applied to exchange reactions
    #[builder(default = "0.0")]
    pub default_max_drain_flux: f64,
    /// Default excretion bound applied to exchange reactions
    #[builder(default = "-1000.0")]
    pub default_min_drain_flux: f64,
    /// Elemental uptake limits; negative means unlimited
    #[builder(default = "-1.0")]
    pub max_c_uptake: f64,
    #[builder(default = "-1.0")]
    pub max_n_uptake: f64,
    #[builder(default = "-1.0")]
    pub max_p_uptake: f64,
    #[builder(default = "-1.0")]
    pub max_o_uptake: f64,
    /// Objective coefficients keyed by local compound reference
    #[builder(default = "IndexMap::new()")]
    pub compound_objective_terms: IndexMap<String, f64>,
    /// Objective coefficients keyed by local reaction reference
    #[builder(default = "IndexMap::new()")]
    pub reaction_objective_terms: IndexMap<String, f64>,
    /// Objective coefficients keyed by local biomass reference
    #[builder(default = "IndexMap::new()")]
    pub biomass_objective_terms: IndexMap<String, f64>,
    /// Per-reaction bound overrides
    #[builder(default = "Vec::new()")]
    pub reaction_bounds: Vec<FBAReactionBound>,
    /// Per-compound (drain) bound overrides
    #[builder(default = "Vec::new()")]
    pub compound_bounds: Vec<FBACompoundBound>,
    /// User supplied linear constraints
    #[builder(default = "Vec::new()")]
    pub constraints: Vec<FBAConstraint>,
    /// Objective value, populated once the solve completes
    #[builder(default = "None")]
    pub objective_value: Option<f64>,
    /// Per-reaction flux results, populated once the solve completes
    #[builder(default = "Vec::new()")]
    pub reaction_variables: Vec<FBAReactionVariable>,
    /// Per-compound drain results, populated once the solve completes
    #[builder(default = "Vec::new()")]
    pub compound_variables: Vec<FBACompoundVariable>,
    /// Per-biomass flux results, populated once the solve completes
    #[builder(default = "Vec::new()")]
    pub biomass_variables: Vec<FBABiomassVariable>,
    /// Gene deletion results, populated once the solve completes
    #[builder(default = "Vec::new()")]
    pub deletion_results: Vec<FBADeletionResult>,
    /// Minimal media results, populated once the solve completes
    #[builder(default = "Vec::new()")]
    pub minimal_media_results: Vec<FBAMinimalMediaResult>,
    /// PROM constraint results, populated once the solve completes
    #[builder(default = "Vec::new()")]
    pub prom_results: Vec<FBAPromResult>,
}

impl FBA {
    pub const SCHEMA: EntitySchema = EntitySchema {
        entity: "FBA",
        fields: &[
            id_field("id"),
            absolute_ref("fbamodel_ref"),
            absolute_ref("media_ref"),
            absolute_ref("regmodel_ref"),
            absolute_ref("prommodel_ref"),
            absolute_ref("phenotypeset_ref"),
            subpath_ref("compound_objective_terms"),
            subpath_ref("reaction_objective_terms"),
            subpath_ref("biomass_objective_terms"),
        ],
    };

    /// Whether the solver has populated this run's results
    pub fn is_solved(&self) -> bool {
        self.objective_value.is_some()
    }
}

/// Bound override for one model reaction
#[derive(Builder, Clone, Debug, Serialize, Deserialize)]
pub struct FBAReactionBound {
    /// Reference to the bounded model reaction
    pub modelreaction_ref: String,
    /// Kind of variable bounded, e.g. "flux"
    #[builder(default = "\"flux\".to_string()")]
    pub variable_type: String,
    pub lower_bound: f64,
    pub upper_bound: f64,
}

impl FBAReactionBound {
    pub const SCHEMA: EntitySchema = EntitySchema {
        entity: "FBAReactionBound",
        fields: &[
            subpath_ref("modelreaction_ref"),
            FieldSpec::new("lower_bound", Semantic::Bound),
            FieldSpec::new("upper_bound", Semantic::Bound),
        ],
    };
}

/// Bound override for one model compound drain
#[derive(Builder, Clone, Debug, Serialize, Deserialize)]
pub struct FBACompoundBound {
    /// Reference to the bounded model compound
    pub modelcompound_ref: String,
    /// Kind of variable bounded, e.g. "drainflux"
    #[builder(default = "\"drainflux\".to_string()")]
    pub variable_type: String,
    pub lower_bound: f64,
    pub upper_bound: f64,
}

impl FBACompoundBound {
    pub const SCHEMA: EntitySchema = EntitySchema {
        entity: "FBACompoundBound",
        fields: &[
            subpath_ref("modelcompound_ref"),
            FieldSpec::new("lower_bound", Semantic::Bound),
            FieldSpec::new("upper_bound", Semantic::Bound),
        ],
    };
}

/// A user supplied linear constraint over flux variables
#[derive(Builder, Clone, Debug, Serialize, Deserialize)]
pub struct FBAConstraint {
    /// Human readable constraint name
    pub name: String,
    /// Right hand side of the constraint
    #[builder(default = "0.0")]
    pub rhs: f64,
    /// Constraint sense, one of "<", "=", ">"
    #[builder(default = "\"=\".to_string()")]
    pub sign: String,
    /// Terms keyed by local model reaction reference
    #[builder(default = "IndexMap::new()")]
    pub terms: IndexMap<String, f64>,
}

impl FBAConstraint {
    pub const SCHEMA: EntitySchema = EntitySchema {
        entity: "FBAConstraint",
        fields: &[subpath_ref("terms")],
    };
}

/// Solved flux result for one model reaction
#[derive(Builder, Clone, Debug, Serialize, Deserialize)]
pub struct FBAReactionVariable {
    /// Reference to the model reaction this variable tracks
    pub modelreaction_ref: String,
    #[builder(default = "\"flux\".to_string()")]
    pub variable_type: String,
    pub lower_bound: f64,
    pub upper_bound: f64,
    /// Variability class assigned by FVA, e.g. "essential", "blocked"
    #[builder(default = "None")]
    pub class: Option<String>,
    /// FVA minimum, when computed
    #[builder(default = "None")]
    pub min: Option<f64>,
    /// FVA maximum, when computed
    #[builder(default = "None")]
    pub max: Option<f64>,
    /// Solved flux value
    #[builder(default = "None")]
    pub value: Option<f64>,
}

impl FBAReactionVariable {
    pub const SCHEMA: EntitySchema = EntitySchema {
        entity: "FBAReactionVariable",
        fields: &[
            subpath_ref("modelreaction_ref"),
            FieldSpec::new("lower_bound", Semantic::Bound),
            FieldSpec::new("upper_bound", Semantic::Bound),
        ],
    };
}

/// Solved drain result for one model compound
#[derive(Builder, Clone, Debug, Serialize, Deserialize)]
pub struct FBACompoundVariable {
    /// Reference to the model compound this variable tracks
    pub modelcompound_ref: String,
    #[builder(default = "\"drainflux\".to_string()")]
    pub variable_type: String,
    pub lower_bound: f64,
    pub upper_bound: f64,
    #[builder(default = "None")]
    pub class: Option<String>,
    #[builder(default = "None")]
    pub min: Option<f64>,
    #[builder(default = "None")]
    pub max: Option<f64>,
    #[builder(default = "None")]
    pub value: Option<f64>,
}

impl FBACompoundVariable {
    pub const SCHEMA: EntitySchema = EntitySchema {
        entity: "FBACompoundVariable",
        fields: &[
            subpath_ref("modelcompound_ref"),
            FieldSpec::new("lower_bound", Semantic::Bound),
            FieldSpec::new("upper_bound", Semantic::Bound),
        ],
    };
}

/// Solved flux result for one biomass objective
#[derive(Builder, Clone, Debug, Serialize, Deserialize)]
pub struct FBABiomassVariable {
    /// Reference to the biomass this variable tracks
    pub biomass_ref: String,
    #[builder(default = "\"biomassflux\".to_string()")]
    pub variable_type: String,
    pub lower_bound: f64,
    pub upper_bound: f64,
    #[builder(default = "None")]
    pub class: Option<String>,
    #[builder(default = "None")]
    pub min: Option<f64>,
    #[builder(default = "None")]
    pub max: Option<f64>,
    #[builder(default = "None")]
    pub value: Option<f64>,
}

impl FBABiomassVariable {
    pub const SCHEMA: EntitySchema = EntitySchema {
        entity: "FBABiomassVariable",
        fields: &[
            subpath_ref("biomass_ref"),
            FieldSpec::new("lower_bound", Semantic::Bound),
            FieldSpec::new("upper_bound", Semantic::Bound),
        ],
    };
}

/// Growth outcome of one simulated gene deletion
#[derive(Builder, Clone, Debug, Serialize, Deserialize)]
pub struct FBADeletionResult {
    /// References to the deleted genome features
    pub feature_refs: Vec<String>,
    /// Fraction of wild type growth retained
    pub growth_fraction: f64,
}

impl FBADeletionResult {
    pub const SCHEMA: EntitySchema = EntitySchema {
        entity: "FBADeletionResult",
        fields: &[subpath_ref("feature_refs")],
    };
}

/// One compound of a computed minimal media
#[derive(Builder, Clone, Debug, Serialize, Deserialize)]
pub struct FBAMinimalMediaResult {
    /// Essential nutrient compounds
    #[builder(default = "Vec::new()")]
    pub essential_nutrient_refs: Vec<String>,
    /// Optional nutrient compounds
    #[builder(default = "Vec::new()")]
    pub optional_nutrient_refs: Vec<String>,
}

impl FBAMinimalMediaResult {
    pub const SCHEMA: EntitySchema = EntitySchema {
        entity: "FBAMinimalMediaResult",
        fields: &[
            absolute_ref("essential_nutrient_refs"),
            absolute_ref("optional_nutrient_refs"),
        ],
    };
}

/// Activity prediction from PROM regulatory constraints
#[derive(Builder, Clone, Debug, Serialize, Deserialize)]
pub struct FBAPromResult {
    /// Objective fraction after applying regulatory constraints
    pub objective_fraction: f64,
    /// Regulatory penalty incurred
    #[builder(default = "0.0")]
    pub alpha: f64,
    /// Growth penalty incurred
    #[builder(default = "0.0")]
    pub beta: f64,
}

impl FBAPromResult {
    pub const SCHEMA: EntitySchema = EntitySchema {
        entity: "FBAPromResult",
        fields: &[],
    };
}
