//! Module providing the entity types of the metabolic model object graph
pub mod descriptor;
pub mod fba;
pub mod gapfilling;
pub mod gapgeneration;
pub mod model;
pub mod template;
