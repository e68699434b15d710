//! Module providing the reference-graph validator
//!
//! Validation takes one fully materialized root entity (an FBAModel, FBA,
//! Gapfilling, Gapgeneration, or ModelTemplate together with its nested lists)
//! and verifies every structural and value-domain invariant, accumulating
//! every violation found into one [`ValidationReport`] rather than stopping at
//! the first. Findings are data, never errors; the caller decides whether a
//! non-empty report is fatal.
pub mod checks;
pub mod fba;
pub mod gapfilling;
pub mod gapgeneration;
pub mod model;
pub mod reference;
pub mod template;

use std::fmt::{Display, Formatter};

/// The invariant classes a finding can report against
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Rule {
    /// A reference string does not match the shape declared for its field
    MalformedReference,
    /// An id-typed field repeats a value within its enclosing list
    DuplicateId,
    /// A reference does not resolve to an entity in the graph or store
    UnresolvedReference,
    /// A lower bound exceeds its paired upper bound
    BoundOrdering,
    /// A multiplier weight, cost, or time limit is negative
    NegativeWeight,
    /// A probability lies outside [0, 1]
    ProbabilityRange,
    /// An integrated-solution index does not index the referenced solution list
    SolutionIndex,
    /// An objective term names an entity absent from the target model
    ObjectiveTarget,
    /// More than one solution is marked integrated for the same analysis
    DuplicateIntegration,
    /// A direction field holds something other than "<", "=", or ">"
    InvalidDirection,
}

/// One reported invariant violation
#[derive(Clone, Debug, PartialEq)]
pub struct Finding {
    /// Slash-joined path to the offending field within the root entity
    pub path: String,
    /// Which invariant class was violated
    pub rule: Rule,
    /// Human readable description of the violation
    pub message: String,
}

impl Display for Finding {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {:?}: {}", self.path, self.rule, self.message)
    }
}

/// Ordered sequence of findings from one validation pass; empty means valid
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ValidationReport {
    findings: Vec<Finding>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.findings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Finding> {
        self.findings.iter()
    }

    pub(crate) fn from_findings(findings: Vec<Finding>) -> Self {
        ValidationReport { findings }
    }
}

impl IntoIterator for ValidationReport {
    type Item = Finding;
    type IntoIter = std::vec::IntoIter<Finding>;

    fn into_iter(self) -> Self::IntoIter {
        self.findings.into_iter()
    }
}

/// Kinds of model entity an FBA objective term may target
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ModelEntityKind {
    Compound,
    Reaction,
    Biomass,
}

/// Caller supplied capability for resolving references against the external
/// object store
///
/// Every method may answer `None`, meaning the capability is absent; the
/// affected checks then degrade to well-formedness only and are never fatal.
pub trait RefResolver {
    /// Whether an absolute reference resolves in the external store
    fn resolve_absolute(&self, reference: &str) -> Option<bool> {
        let _ = reference;
        None
    }

    /// Number of solutions held by a referenced Gapfilling or Gapgeneration object
    fn solution_count(&self, reference: &str) -> Option<usize> {
        let _ = reference;
        None
    }

    /// Whether the target model of an FBA run contains the referenced entity
    fn model_has(&self, kind: ModelEntityKind, reference: &str) -> Option<bool> {
        let _ = (kind, reference);
        None
    }
}

/// Resolver with no capabilities; every external check degrades to
/// well-formedness only
pub struct NoResolver;

impl RefResolver for NoResolver {}

/// Validation of one root entity against the invariants of the object graph
pub trait Validate {
    /// Verify every invariant, accumulating all violations into one report
    fn validate(&self, resolver: &dyn RefResolver) -> ValidationReport;
}
