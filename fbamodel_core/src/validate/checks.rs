//! Shared accumulating check helpers used by the per-entity validators
//!
//! A [`Checker`] collects findings across the ordered validation passes; each
//! helper appends findings rather than returning errors, so one pass over a
//! graph reports every violation.
use std::collections::HashSet;

use crate::schema::descriptor::{FieldSpec, RefKind, Semantic};
use crate::schema::model::REACTION_DIRECTIONS;
use crate::validate::reference::{is_wellformed_absolute, parse_subpath};
use crate::validate::{Finding, RefResolver, Rule, ValidationReport};

/// Accumulates findings during one validation pass over a root entity
#[derive(Debug, Default)]
pub struct Checker {
    findings: Vec<Finding>,
}

impl Checker {
    pub fn new() -> Self {
        Checker::default()
    }

    /// Append a finding directly
    pub fn finding(&mut self, path: impl Into<String>, rule: Rule, message: impl Into<String>) {
        self.findings.push(Finding {
            path: path.into(),
            rule,
            message: message.into(),
        });
    }

    /// Check a reference string against the shape its field descriptor declares
    pub fn reference(&mut self, path: &str, spec: &FieldSpec, value: &str) {
        let kind = match spec.semantic {
            Semantic::Reference(kind) => kind,
            // Non-reference fields have nothing to check here
            _ => return,
        };
        let well_formed = match kind {
            RefKind::Absolute => is_wellformed_absolute(value),
            RefKind::SubPath => parse_subpath(value).is_some(),
        };
        if !well_formed {
            let expected = match kind {
                RefKind::Absolute => "absolute reference",
                RefKind::SubPath => "sub-path reference",
            };
            self.finding(
                path,
                Rule::MalformedReference,
                format!("\"{}\" is not a well-formed {}", value, expected),
            );
        }
    }

    /// Check every id in a list is unique, reporting each repeated occurrence
    pub fn unique_ids<'a>(&mut self, list_path: &str, ids: impl Iterator<Item = &'a str>) {
        let mut seen: HashSet<&str> = HashSet::new();
        for id in ids {
            if !seen.insert(id) {
                self.finding(
                    format!("{}/{}", list_path, id),
                    Rule::DuplicateId,
                    format!("id \"{}\" occurs more than once", id),
                );
            }
        }
    }

    /// Check a sub-path reference that must stay inside the enclosing object,
    /// reporting a reference whose base is anything other than `~`
    ///
    /// References already reported as malformed are skipped.
    pub fn require_local_base(&mut self, path: &str, value: &str) -> bool {
        let parsed = match parse_subpath(value) {
            Some(parsed) => parsed,
            None => return false,
        };
        if !parsed.is_local() {
            self.finding(
                path,
                Rule::UnresolvedReference,
                format!(
                    "\"{}\" is based on \"{}\", not the enclosing object",
                    value, parsed.base
                ),
            );
            return false;
        }
        true
    }

    /// Resolve a local sub-path reference against the named list of ids
    ///
    /// The reference must be based on the enclosing object; a base naming any
    /// other object cannot resolve within this graph and is reported. Malformed
    /// references are skipped, having been reported in the earlier pass.
    pub fn resolve_local<'a>(
        &mut self,
        path: &str,
        value: &str,
        expected_list: &str,
        ids: impl Iterator<Item = &'a str>,
    ) {
        if !self.require_local_base(path, value) {
            return;
        }
        let parsed = match parse_subpath(value) {
            Some(parsed) => parsed,
            None => return,
        };
        if parsed.list != expected_list {
            self.finding(
                path,
                Rule::UnresolvedReference,
                format!(
                    "\"{}\" names list \"{}\", expected \"{}\"",
                    value, parsed.list, expected_list
                ),
            );
            return;
        }
        let mut ids = ids;
        if !ids.any(|id| id == parsed.element_id) {
            self.finding(
                path,
                Rule::UnresolvedReference,
                format!(
                    "\"{}\" does not resolve: no \"{}\" in {}",
                    value, parsed.element_id, expected_list
                ),
            );
        }
    }

    /// Resolve an absolute reference through the caller supplied capability
    ///
    /// Best effort: when the resolver has no answer the check degrades to the
    /// well-formedness already performed and reports nothing. Malformed
    /// references are skipped, having been reported in the earlier pass.
    pub fn resolve_absolute(&mut self, path: &str, value: &str, resolver: &dyn RefResolver) {
        if !is_wellformed_absolute(value) {
            return;
        }
        if resolver.resolve_absolute(value) == Some(false) {
            self.finding(
                path,
                Rule::UnresolvedReference,
                format!("\"{}\" does not resolve in the object store", value),
            );
        }
    }

    /// Check bound ordering; equality is allowed
    pub fn bounds(&mut self, path: &str, lower: f64, upper: f64) {
        if lower > upper {
            self.finding(
                path,
                Rule::BoundOrdering,
                format!("lower bound {} exceeds upper bound {}", lower, upper),
            );
        }
    }

    /// Check a probability lies in [0, 1]
    pub fn probability(&mut self, path: &str, value: f64) {
        if !(0.0..=1.0).contains(&value) {
            self.finding(
                path,
                Rule::ProbabilityRange,
                format!("probability {} is outside [0, 1]", value),
            );
        }
    }

    /// Check a weight, cost, or time limit is non-negative
    pub fn non_negative(&mut self, path: &str, value: f64) {
        if value < 0.0 {
            self.finding(
                path,
                Rule::NegativeWeight,
                format!("value {} must be non-negative", value),
            );
        }
    }

    /// Check a direction field holds one of "<", "=", ">"
    pub fn direction(&mut self, path: &str, value: &str) {
        if !REACTION_DIRECTIONS.contains(&value) {
            self.finding(
                path,
                Rule::InvalidDirection,
                format!("direction \"{}\" is not one of <, =, >", value),
            );
        }
    }

    pub fn into_report(self) -> ValidationReport {
        ValidationReport::from_findings(self.findings)
    }
}
