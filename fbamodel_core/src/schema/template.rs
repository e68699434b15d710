//! This module provides the ModelTemplate struct, the reconstruction template from
//! which models for a given domain are instantiated
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::schema::descriptor::{absolute_ref, id_field, subpath_ref, EntitySchema};

/// Represents a reconstruction template
#[derive(Builder, Clone, Debug, Serialize, Deserialize)]
pub struct ModelTemplate {
    /// Used to identify the template (must be unique)
    pub id: String,
    /// Human readable template name
    #[builder(default = "None")]
    pub name: Option<String>,
    /// Kind of model the template reconstructs, e.g. "GenomeScale"
    #[builder(default = "None")]
    pub model_type: Option<String>,
    /// Taxonomic domain the template applies to, e.g. "Bacteria"
    #[builder(default = "None")]
    pub domain: Option<String>,
    /// Reference to the mapping of roles to complexes used by the template
    pub mapping_ref: String,
    /// Compartments the template may instantiate
    #[builder(default = "Vec::new()")]
    pub compartments: Vec<TemplateCompartment>,
    /// Reactions the template may instantiate
    #[builder(default = "Vec::new()")]
    pub template_reactions: Vec<TemplateReaction>,
    /// Biomass objectives the template may instantiate
    #[builder(default = "Vec::new()")]
    pub biomasses: Vec<TemplateBiomass>,
}

impl ModelTemplate {
    pub const SCHEMA: EntitySchema = EntitySchema {
        entity: "ModelTemplate",
        fields: &[id_field("id"), absolute_ref("mapping_ref")],
    };
}

/// One compartment a template may instantiate
#[derive(Builder, Clone, Debug, Serialize, Deserialize)]
pub struct TemplateCompartment {
    /// Used to identify the compartment within the template (must be unique)
    pub id: String,
    /// Human readable compartment name
    #[builder(default = "None")]
    pub name: Option<String>,
    /// Index distinguishing multiple instances of the same compartment
    #[builder(default = "0")]
    pub index: u32,
    /// Default pH of the compartment
    #[builder(default = "7.0")]
    pub ph: f64,
}

impl TemplateCompartment {
    pub const SCHEMA: EntitySchema = EntitySchema {
        entity: "TemplateCompartment",
        fields: &[id_field("id")],
    };
}

/// One reaction a template may instantiate
#[derive(Builder, Clone, Debug, Serialize, Deserialize)]
pub struct TemplateReaction {
    /// Used to identify the reaction within the template (must be unique)
    pub id: String,
    /// Reference to the biochemistry reaction
    pub reaction_ref: String,
    /// Reference to the template compartment the reaction runs in
    pub compartment_ref: String,
    /// References to the mapping complexes that catalyze the reaction
    #[builder(default = "Vec::new()")]
    pub complex_refs: Vec<String>,
    /// Direction the reaction proceeds, one of "<", "=", ">"
    #[builder(default = "\"=\".to_string()")]
    pub direction: String,
    /// How the reaction enters reconstructed models, e.g. "conditional", "universal"
    #[serde(rename = "type")]
    #[builder(default = "\"conditional\".to_string()")]
    pub type_: String,
}

impl TemplateReaction {
    pub const SCHEMA: EntitySchema = EntitySchema {
        entity: "TemplateReaction",
        fields: &[
            id_field("id"),
            absolute_ref("reaction_ref"),
            subpath_ref("compartment_ref"),
            absolute_ref("complex_refs"),
        ],
    };
}

/// One biomass objective a template may instantiate
#[derive(Builder, Clone, Debug, Serialize, Deserialize)]
pub struct TemplateBiomass {
    /// Used to identify the biomass within the template (must be unique)
    pub id: String,
    /// Human readable biomass name
    #[builder(default = "None")]
    pub name: Option<String>,
    /// Kind of biomass, e.g. "growth"
    #[serde(rename = "type")]
    #[builder(default = "\"growth\".to_string()")]
    pub type_: String,
    /// Macromolecular composition coefficients
    #[builder(default = "0.0")]
    pub dna: f64,
    #[builder(default = "0.0")]
    pub rna: f64,
    #[builder(default = "0.0")]
    pub protein: f64,
    #[builder(default = "0.0")]
    pub cellwall: f64,
    #[builder(default = "0.0")]
    pub lipid: f64,
    #[builder(default = "0.0")]
    pub cofactor: f64,
    #[builder(default = "0.0")]
    pub energy: f64,
    #[builder(default = "0.0")]
    pub other: f64,
    /// Compounds taking part in biomass formation
    #[builder(default = "Vec::new()")]
    pub components: Vec<TemplateBiomassComponent>,
}

impl TemplateBiomass {
    pub const SCHEMA: EntitySchema = EntitySchema {
        entity: "TemplateBiomass",
        fields: &[id_field("id")],
    };
}

/// One compound of a template biomass objective
#[derive(Builder, Clone, Debug, Serialize, Deserialize)]
pub struct TemplateBiomassComponent {
    /// Macromolecular class the compound contributes to, e.g. "dna", "lipid"
    pub class: String,
    /// Reference to the biochemistry compound
    pub compound_ref: String,
    /// Reference to the template compartment holding the compound
    pub compartment_ref: String,
    /// Stoichiometric coefficient
    pub coefficient: f64,
    /// How the coefficient scales, e.g. "MOLFRACTION", "EXACT"
    #[builder(default = "\"EXACT\".to_string()")]
    pub coefficient_type: String,
}

impl TemplateBiomassComponent {
    pub const SCHEMA: EntitySchema = EntitySchema {
        entity: "TemplateBiomassComponent",
        fields: &[
            subpath_ref("compound_ref"),
            subpath_ref("compartment_ref"),
        ],
    };
}
