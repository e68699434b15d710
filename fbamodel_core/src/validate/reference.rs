//! Well-formedness rules and parsing for the two reference string kinds
//!
//! Absolute references name a top-level persisted object: `ws/obj` or
//! `ws/obj/ver`. Sub-path references name one element inside another object's
//! nested list: `<base>/<list>/id/<element_id>`, where `<base>` is either `~`
//! (the enclosing object) or an absolute reference.

/// Whether a string is a well-formed absolute reference
///
/// Two or three non-empty segments separated by `/`, no whitespace anywhere.
pub fn is_wellformed_absolute(reference: &str) -> bool {
    if reference.chars().any(char::is_whitespace) {
        return false;
    }
    let segments: Vec<&str> = reference.split('/').collect();
    (2..=3).contains(&segments.len()) && segments.iter().all(|s| !s.is_empty())
}

/// A parsed sub-path reference
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SubPath<'a> {
    /// `~` for the enclosing object, otherwise an absolute reference
    pub base: &'a str,
    /// Name of the nested list within the base object
    pub list: &'a str,
    /// Id of the element within that list
    pub element_id: &'a str,
}

impl SubPath<'_> {
    /// Whether the reference points inside the enclosing object
    pub fn is_local(&self) -> bool {
        self.base == "~"
    }
}

/// Parse a sub-path reference, returning None if it is malformed
pub fn parse_subpath(reference: &str) -> Option<SubPath<'_>> {
    if reference.chars().any(char::is_whitespace) {
        return None;
    }
    let segments: Vec<&str> = reference.split('/').collect();
    // Trailing triple is <list>/id/<element_id>; whatever precedes it is the base
    if segments.len() < 4 || segments.iter().any(|s| s.is_empty()) {
        return None;
    }
    let element_id = segments[segments.len() - 1];
    let id_marker = segments[segments.len() - 2];
    let list = segments[segments.len() - 3];
    if id_marker != "id" {
        return None;
    }
    let base_segments = &segments[..segments.len() - 3];
    let base_len: usize = base_segments.iter().map(|s| s.len()).sum::<usize>()
        + base_segments.len().saturating_sub(1);
    let base = &reference[..base_len];
    let base_ok = base == "~" || is_wellformed_absolute(base);
    if !base_ok {
        return None;
    }
    Some(SubPath {
        base,
        list,
        element_id,
    })
}

/// Whether a string is a well-formed sub-path reference
pub fn is_wellformed_subpath(reference: &str) -> bool {
    parse_subpath(reference).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_wellformed() {
        assert!(is_wellformed_absolute("ws/Media"));
        assert!(is_wellformed_absolute("ws/Media/1"));
        assert!(is_wellformed_absolute("12/7/3"));
    }

    #[test]
    fn absolute_malformed() {
        assert!(!is_wellformed_absolute("Media"));
        assert!(!is_wellformed_absolute("ws//Media"));
        assert!(!is_wellformed_absolute(" ws/Media"));
        assert!(!is_wellformed_absolute("ws/Media/1/extra"));
        assert!(!is_wellformed_absolute(""));
    }

    #[test]
    fn subpath_local() {
        let parsed = parse_subpath("~/modelcompartments/id/c0").unwrap();
        assert_eq!(parsed.base, "~");
        assert_eq!(parsed.list, "modelcompartments");
        assert_eq!(parsed.element_id, "c0");
        assert!(parsed.is_local());
    }

    #[test]
    fn subpath_external_base() {
        let parsed = parse_subpath("ws/genome/2/features/id/fig.83333.1.peg.1").unwrap();
        assert_eq!(parsed.base, "ws/genome/2");
        assert_eq!(parsed.list, "features");
        assert_eq!(parsed.element_id, "fig.83333.1.peg.1");
        assert!(!parsed.is_local());
    }

    #[test]
    fn subpath_malformed() {
        assert!(parse_subpath("~/modelcompartments/c0").is_none()); // missing id marker
        assert!(parse_subpath("modelcompartments/id/c0").is_none()); // bare base
        assert!(parse_subpath("~/modelcompartments/id/").is_none());
        assert!(parse_subpath("~/model compartments/id/c0").is_none());
    }
}
