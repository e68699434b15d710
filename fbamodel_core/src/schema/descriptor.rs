//! This module provides explicit field descriptors for the schema entities
//!
//! Each entity carries a `SCHEMA` table listing its id, reference, and
//! constrained-numeric fields. The validator consumes these tables uniformly
//! instead of re-deriving structure from each entity, so the contract of a
//! field (which kind of reference it holds, which numeric domain it lives in)
//! is inspectable in one place.

/// The two kinds of reference string used across the object graph
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RefKind {
    /// Identifies another top-level persisted object, `ws/obj` or `ws/obj/ver`
    Absolute,
    /// Identifies one element inside another object's nested list,
    /// `<base>/<list>/id/<element_id>` with `~` standing for the enclosing object
    SubPath,
}

/// Semantic type of a described field, driving which validator check applies
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Semantic {
    /// An id that must be unique within its enclosing list
    Id,
    /// A reference string of the given kind
    Reference(RefKind),
    /// A float constrained to [0, 1]
    Probability,
    /// A float constrained to be >= 0 (costs, multiplier weights, time limits)
    NonNegative,
    /// One half of a lower/upper bound pair, checked for ordering
    Bound,
    /// No value-domain constraint
    Scalar,
}

/// Describes one field of an entity
#[derive(Clone, Copy, Debug)]
pub struct FieldSpec {
    pub name: &'static str,
    pub semantic: Semantic,
}

impl FieldSpec {
    pub const fn new(name: &'static str, semantic: Semantic) -> Self {
        FieldSpec { name, semantic }
    }
}

/// Descriptor table for one entity type
#[derive(Clone, Copy, Debug)]
pub struct EntitySchema {
    pub entity: &'static str,
    pub fields: &'static [FieldSpec],
}

impl EntitySchema {
    /// Look up the descriptor for a named field
    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Shorthand used by the per-entity SCHEMA tables
pub const fn id_field(name: &'static str) -> FieldSpec {
    FieldSpec::new(name, Semantic::Id)
}

pub const fn absolute_ref(name: &'static str) -> FieldSpec {
    FieldSpec::new(name, Semantic::Reference(RefKind::Absolute))
}

pub const fn subpath_ref(name: &'static str) -> FieldSpec {
    FieldSpec::new(name, Semantic::Reference(RefKind::SubPath))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: EntitySchema = EntitySchema {
        entity: "Example",
        fields: &[
            id_field("id"),
            absolute_ref("compound_ref"),
            subpath_ref("modelcompartment_ref"),
            FieldSpec::new("probability", Semantic::Probability),
        ],
    };

    #[test]
    fn field_lookup() {
        let spec = EXAMPLE.field("modelcompartment_ref").unwrap();
        assert_eq!(spec.semantic, Semantic::Reference(RefKind::SubPath));
        assert!(EXAMPLE.field("missing").is_none());
    }
}
