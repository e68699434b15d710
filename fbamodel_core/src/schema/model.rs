//! This module provides the FBAModel struct and its nested records, representing one
//! genome scale metabolic model artifact as produced by the reconstruction pipeline
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::schema::descriptor::{
    absolute_ref, id_field, subpath_ref, EntitySchema, FieldSpec, Semantic,
};

/// Represents a genome scale metabolic model artifact
///
/// Once constructed the model is an immutable value record; the only sanctioned
/// mutations are the gapfill/gapgen integration transitions, which flip the
/// `integrated` flag and record the solution index on the owning link record.
#[derive(Builder, Clone, Debug, Serialize, Deserialize)]
pub struct FBAModel {
    /// Used to identify the model (must be unique)
    pub id: String,
    /// Source database or pipeline the model was reconstructed from
    #[builder(default = "None")]
    pub source: Option<String>,
    /// Id of the model within its source
    #[builder(default = "None")]
    pub source_id: Option<String>,
    /// Kind of model, e.g. "GenomeScale" or "Community"
    #[serde(rename = "type")]
    #[builder(default = "None")]
    pub type_: Option<String>,
    /// Human readable model name
    #[builder(default = "None")]
    pub name: Option<String>,
    /// Reference to the genome the model was reconstructed from
    #[builder(default = "None")]
    pub genome_ref: Option<String>,
    /// Reference to the metagenome the model was reconstructed from
    #[builder(default = "None")]
    pub metagenome_ref: Option<String>,
    /// Reference to the template used during reconstruction
    #[builder(default = "None")]
    pub template_ref: Option<String>,
    /// Compartments instantiated in this model
    #[builder(default = "Vec::new()")]
    pub modelcompartments: Vec<ModelCompartment>,
    /// Compounds instantiated in this model
    #[builder(default = "Vec::new()")]
    pub modelcompounds: Vec<ModelCompound>,
    /// Reactions instantiated in this model
    #[builder(default = "Vec::new()")]
    pub modelreactions: Vec<ModelReaction>,
    /// Biomass objective functions of this model
    #[builder(default = "Vec::new()")]
    pub biomasses: Vec<Biomass>,
    /// Links to gapfilling analyses run against this model
    #[builder(default = "Vec::new()")]
    pub gapfillings: Vec<ModelGapfill>,
    /// Links to gapgeneration analyses run against this model
    #[builder(default = "Vec::new()")]
    pub gapgens: Vec<ModelGapgen>,
}

impl FBAModel {
    pub const SCHEMA: EntitySchema = EntitySchema {
        entity: "FBAModel",
        fields: &[
            id_field("id"),
            absolute_ref("genome_ref"),
            absolute_ref("metagenome_ref"),
            absolute_ref("template_ref"),
        ],
    };

    /// Add a compartment to the model
    pub fn add_compartment(&mut self, compartment: ModelCompartment) {
        self.modelcompartments.push(compartment);
    }

    /// Add a compound to the model
    pub fn add_compound(&mut self, compound: ModelCompound) {
        self.modelcompounds.push(compound);
    }

    /// Add a reaction to the model
    pub fn add_reaction(&mut self, reaction: ModelReaction) {
        self.modelreactions.push(reaction);
    }

    /// Add a biomass to the model
    pub fn add_biomass(&mut self, biomass: Biomass) {
        self.biomasses.push(biomass);
    }

    /// Look up a gapfill link record by its id
    pub fn gapfill(&self, gapfill_id: &str) -> Option<&ModelGapfill> {
        self.gapfillings.iter().find(|g| g.gapfill_id == gapfill_id)
    }

    /// Look up a gapgen link record by its id
    pub fn gapgen(&self, gapgen_id: &str) -> Option<&ModelGapgen> {
        self.gapgens.iter().find(|g| g.gapgen_id == gapgen_id)
    }

    /// Mark a previously computed gapfilling solution as incorporated into this model
    ///
    /// Records the solution index on the named gapfill link and flips its
    /// `integrated` flag. Whether the index is in range for the referenced
    /// Gapfilling object is checked at validation time, where the external
    /// object is reachable.
    pub fn integrate_gapfill_solution(
        &mut self,
        gapfill_id: &str,
        solution_index: usize,
    ) -> Result<(), IntegrationError> {
        let gapfill = self
            .gapfillings
            .iter_mut()
            .find(|g| g.gapfill_id == gapfill_id)
            .ok_or_else(|| IntegrationError::UnknownGapfill(gapfill_id.to_string()))?;
        if gapfill.integrated {
            return Err(IntegrationError::AlreadyIntegrated(gapfill_id.to_string()));
        }
        gapfill.integrated = true;
        gapfill.integrated_solution = Some(solution_index);
        Ok(())
    }

    /// Mark a previously computed gapgeneration solution as incorporated into this model
    pub fn integrate_gapgen_solution(
        &mut self,
        gapgen_id: &str,
        solution_index: usize,
    ) -> Result<(), IntegrationError> {
        let gapgen = self
            .gapgens
            .iter_mut()
            .find(|g| g.gapgen_id == gapgen_id)
            .ok_or_else(|| IntegrationError::UnknownGapgen(gapgen_id.to_string()))?;
        if gapgen.integrated {
            return Err(IntegrationError::AlreadyIntegrated(gapgen_id.to_string()));
        }
        gapgen.integrated = true;
        gapgen.integrated_solution = Some(solution_index);
        Ok(())
    }
}

/// Errors arising from gapfill/gapgen integration transitions
#[derive(Clone, Debug, Error)]
pub enum IntegrationError {
    #[error("No gapfill with id {0} in the model")]
    UnknownGapfill(String),
    #[error("No gapgen with id {0} in the model")]
    UnknownGapgen(String),
    #[error("Record {0} already has an integrated solution")]
    AlreadyIntegrated(String),
}

/// Represents one compartment instantiated in a model
#[derive(Builder, Clone, Debug, Serialize, Deserialize)]
pub struct ModelCompartment {
    /// Used to identify the compartment within the model (must be unique)
    pub id: String,
    /// Reference to the biochemistry compartment this instantiates
    pub compartment_ref: String,
    /// Index distinguishing multiple instances of the same compartment
    #[builder(default = "0")]
    pub compartment_index: u32,
    /// Human readable compartment label
    #[builder(default = "None")]
    pub label: Option<String>,
    /// pH of the compartment
    #[builder(default = "7.0")]
    pub ph: f64,
    /// Electrochemical potential of the compartment
    #[builder(default = "0.0")]
    pub potential: f64,
}

impl ModelCompartment {
    pub const SCHEMA: EntitySchema = EntitySchema {
        entity: "ModelCompartment",
        fields: &[id_field("id"), absolute_ref("compartment_ref")],
    };
}

/// Represents one compound instantiated in a model compartment
#[derive(Builder, Clone, Debug, Serialize, Deserialize)]
pub struct ModelCompound {
    /// Used to identify the compound within the model (must be unique)
    pub id: String,
    /// Reference to the biochemistry compound this instantiates
    pub compound_ref: String,
    /// Reference to the model compartment holding this compound
    pub modelcompartment_ref: String,
    /// Human readable compound name
    #[builder(default = "None")]
    pub name: Option<String>,
    /// Electrical charge of the compound
    #[builder(default = "0.0")]
    pub charge: f64,
    /// Chemical formula of the compound
    #[builder(default = "None")]
    pub formula: Option<String>,
}

impl ModelCompound {
    pub const SCHEMA: EntitySchema = EntitySchema {
        entity: "ModelCompound",
        fields: &[
            id_field("id"),
            absolute_ref("compound_ref"),
            subpath_ref("modelcompartment_ref"),
        ],
    };
}

/// Directionality convention for reactions: "<" reverse only, ">" forward only,
/// "=" reversible
pub const REACTION_DIRECTIONS: [&str; 3] = ["<", "=", ">"];

/// Represents one reaction instantiated in a model compartment
#[derive(Builder, Clone, Debug, Serialize, Deserialize)]
pub struct ModelReaction {
    /// Used to identify the reaction within the model (must be unique)
    pub id: String,
    /// Reference to the biochemistry reaction this instantiates
    pub reaction_ref: String,
    /// Reference to the model compartment holding this reaction
    pub modelcompartment_ref: String,
    /// Human readable reaction name
    #[builder(default = "None")]
    pub name: Option<String>,
    /// Direction the reaction may proceed, one of "<", "=", ">"
    #[builder(default = "\"=\".to_string()")]
    pub direction: String,
    /// Number of protons consumed or produced
    #[builder(default = "0.0")]
    pub protons: f64,
    /// Likelihood the reaction belongs in the model, in [0, 1]
    #[builder(default = "1.0")]
    pub probability: f64,
    /// Stoichiometry of the reaction over model compounds
    #[builder(default = "Vec::new()")]
    pub reagents: Vec<ModelReactionReagent>,
    /// Protein complexes catalyzing the reaction
    #[builder(default = "Vec::new()")]
    pub proteins: Vec<ModelReactionProtein>,
}

impl ModelReaction {
    pub const SCHEMA: EntitySchema = EntitySchema {
        entity: "ModelReaction",
        fields: &[
            id_field("id"),
            absolute_ref("reaction_ref"),
            subpath_ref("modelcompartment_ref"),
            FieldSpec::new("probability", Semantic::Probability),
        ],
    };
}

/// One reagent of a model reaction
///
/// Coefficients are signed: negative means consumed, positive means produced.
#[derive(Builder, Clone, Debug, Serialize, Deserialize)]
pub struct ModelReactionReagent {
    /// Reference to the model compound taking part in the reaction
    pub modelcompound_ref: String,
    /// Signed stoichiometric coefficient
    pub coefficient: f64,
}

impl ModelReactionReagent {
    pub const SCHEMA: EntitySchema = EntitySchema {
        entity: "ModelReactionReagent",
        fields: &[subpath_ref("modelcompound_ref")],
    };
}

/// A protein complex catalyzing a model reaction
#[derive(Builder, Clone, Debug, Serialize, Deserialize)]
pub struct ModelReactionProtein {
    /// Reference to the mapping complex this protein instantiates
    pub complex_ref: String,
    /// Free-form provenance note
    #[builder(default = "None")]
    pub note: Option<String>,
    /// Subunits making up the complex
    #[builder(default = "Vec::new()")]
    pub subunits: Vec<ModelReactionProteinSubunit>,
}

impl ModelReactionProtein {
    pub const SCHEMA: EntitySchema = EntitySchema {
        entity: "ModelReactionProtein",
        fields: &[absolute_ref("complex_ref")],
    };
}

/// One subunit of a catalyzing protein complex
#[derive(Builder, Clone, Debug, Serialize, Deserialize)]
pub struct ModelReactionProteinSubunit {
    /// Functional role fulfilled by the subunit
    pub role: String,
    /// Whether the role triggers the reaction
    #[builder(default = "false")]
    pub triggering: bool,
    /// Whether the subunit is optional for complex function
    #[builder(default = "false")]
    pub optional_subunit: bool,
    /// References to the genome features encoding the subunit
    #[builder(default = "Vec::new()")]
    pub feature_refs: Vec<String>,
}

impl ModelReactionProteinSubunit {
    pub const SCHEMA: EntitySchema = EntitySchema {
        entity: "ModelReactionProteinSubunit",
        fields: &[subpath_ref("feature_refs")],
    };
}

/// Represents one biomass objective function of a model
#[derive(Builder, Clone, Debug, Serialize, Deserialize)]
pub struct Biomass {
    /// Used to identify the biomass within the model (must be unique)
    pub id: String,
    /// Human readable biomass name
    #[builder(default = "None")]
    pub name: Option<String>,
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
    /// Compounds consumed or produced by biomass formation
    #[builder(default = "Vec::new()")]
    pub biomasscompounds: Vec<BiomassCompound>,
}

impl Biomass {
    pub const SCHEMA: EntitySchema = EntitySchema {
        entity: "Biomass",
        fields: &[id_field("id")],
    };
}

/// One compound taking part in biomass formation
#[derive(Builder, Clone, Debug, Serialize, Deserialize)]
pub struct BiomassCompound {
    /// Reference to the model compound
    pub modelcompound_ref: String,
    /// Signed stoichiometric coefficient
    pub coefficient: f64,
}

impl BiomassCompound {
    pub const SCHEMA: EntitySchema = EntitySchema {
        entity: "BiomassCompound",
        fields: &[subpath_ref("modelcompound_ref")],
    };
}

/// Link from a model to one gapfilling analysis run against it
#[derive(Builder, Clone, Debug, Serialize, Deserialize)]
pub struct ModelGapfill {
    /// Used to identify the link within the model (must be unique)
    pub gapfill_id: String,
    /// Reference to the Gapfilling analysis object
    pub gapfill_ref: String,
    /// Reference to the media the analysis was run in
    pub media_ref: String,
    /// Whether one of the analysis solutions has been incorporated into the model
    #[builder(default = "false")]
    pub integrated: bool,
    /// Index of the incorporated solution in the analysis object's solution list
    #[builder(default = "None")]
    pub integrated_solution: Option<usize>,
}

impl ModelGapfill {
    pub const SCHEMA: EntitySchema = EntitySchema {
        entity: "ModelGapfill",
        fields: &[
            id_field("gapfill_id"),
            absolute_ref("gapfill_ref"),
            absolute_ref("media_ref"),
        ],
    };
}

/// Link from a model to one gapgeneration analysis run against it
#[derive(Builder, Clone, Debug, Serialize, Deserialize)]
pub struct ModelGapgen {
    /// Used to identify the link within the model (must be unique)
    pub gapgen_id: String,
    /// Reference to the Gapgeneration analysis object
    pub gapgen_ref: String,
    /// Reference to the media the analysis was run in
    pub media_ref: String,
    /// Whether one of the analysis solutions has been incorporated into the model
    #[builder(default = "false")]
    pub integrated: bool,
    /// Index of the incorporated solution in the analysis object's solution list
    #[builder(default = "None")]
    pub integrated_solution: Option<usize>,
}

impl ModelGapgen {
    pub const SCHEMA: EntitySchema = EntitySchema {
        entity: "ModelGapgen",
        fields: &[
            id_field("gapgen_id"),
            absolute_ref("gapgen_ref"),
            absolute_ref("media_ref"),
        ],
    };
}
