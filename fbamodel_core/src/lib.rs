//! Core rust implementation of the typed object schema for genome scale metabolic model
//! artifacts (models, FBA runs, gapfilling/gapgeneration analyses, reconstruction templates),
//! with a reference-graph validator and an argument contract utility.
#![allow(unused)]

pub mod args;
pub mod schema;
pub mod validate;
