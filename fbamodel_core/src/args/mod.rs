//! Module providing the argument contract validator
//!
//! Every constructor and operation in the surrounding pipeline takes a named
//! argument bundle. This module normalizes such bundles into a canonical map,
//! enforces declared mandatory/optional contracts against them, and renders a
//! usage string on failure. Contract violations are fatal by default: callers
//! propagate them with `?` and the enclosing operation aborts rather than
//! retrying, since no argument contract violation is transient.
use indexmap::IndexMap;
use serde_json::Value;
use thiserror::Error;

/// Canonical named-argument mapping, insertion ordered
pub type ArgMap = IndexMap<String, Value>;

/// A raw argument bundle as accepted at every call site: either an already
/// keyed mapping or a flat alternating key/value sequence
#[derive(Clone, Debug)]
pub enum RawArgs {
    Map(ArgMap),
    Flat(Vec<Value>),
}

/// Errors produced when an argument bundle violates its contract
#[derive(Clone, Debug, Error)]
pub enum ArgError {
    #[error("{context}: arguments must be a mapping or an even-length key/value list")]
    MalformedArguments { context: String },
    #[error("{context}: missing mandatory arguments {missing:?}; usage: {usage}")]
    MissingMandatoryArguments {
        context: String,
        missing: Vec<String>,
        usage: String,
    },
}

/// Merge a raw argument bundle into a canonical [`ArgMap`]
///
/// A flat sequence must have even length and string keys; anything else fails
/// with [`ArgError::MalformedArguments`] naming the calling context.
pub fn normalize(raw: RawArgs, context: &str) -> Result<ArgMap, ArgError> {
    match raw {
        RawArgs::Map(map) => Ok(map),
        RawArgs::Flat(values) => {
            if values.len() % 2 != 0 {
                return Err(ArgError::MalformedArguments {
                    context: context.to_string(),
                });
            }
            let mut map = ArgMap::new();
            let mut values = values.into_iter();
            while let (Some(key), Some(value)) = (values.next(), values.next()) {
                let key = match key {
                    Value::String(key) => key,
                    _ => {
                        return Err(ArgError::MalformedArguments {
                            context: context.to_string(),
                        })
                    }
                };
                map.insert(key, value);
            }
            Ok(map)
        }
    }
}

/// The mandatory/optional argument contract of one operation
///
/// The calling operation's name is supplied explicitly at construction and
/// identifies the call site in every error and usage string.
#[derive(Clone, Debug, Default)]
pub struct Contract {
    context: String,
    mandatory: Vec<String>,
    optional: IndexMap<String, Value>,
    substitutions: IndexMap<String, String>,
}

impl Contract {
    pub fn new(context: &str) -> Self {
        Contract {
            context: context.to_string(),
            ..Contract::default()
        }
    }

    /// Declare a mandatory argument name
    pub fn mandatory(mut self, name: &str) -> Self {
        self.mandatory.push(name.to_string());
        self
    }

    /// Declare an optional argument with its default value
    pub fn optional(mut self, name: &str, default: Value) -> Self {
        self.optional.insert(name.to_string(), default);
        self
    }

    /// Declare a name substitution, applied before any presence checks
    pub fn substitute(mut self, old: &str, new: &str) -> Self {
        self.substitutions
            .insert(old.to_string(), new.to_string());
        self
    }

    /// Enforce this contract against a normalized argument map
    ///
    /// Substitutions are applied first, then every mandatory name is checked;
    /// all missing names are collected before failing. Optional names that are
    /// absent, or present but holding a degenerate empty value, receive their
    /// declared defaults. Returns the completed map.
    pub fn enforce(&self, mut args: ArgMap) -> Result<ArgMap, ArgError> {
        for (old, new) in &self.substitutions {
            if args.contains_key(new) {
                continue;
            }
            if let Some(value) = args.shift_remove(old) {
                args.insert(new.clone(), value);
            }
        }
        let missing: Vec<String> = self
            .mandatory
            .iter()
            .filter(|name| matches!(args.get(*name), None | Some(Value::Null)))
            .cloned()
            .collect();
        if !missing.is_empty() {
            return Err(ArgError::MissingMandatoryArguments {
                context: self.context.clone(),
                missing,
                usage: self.usage(&args),
            });
        }
        for (name, default) in &self.optional {
            let replace = match args.get(name) {
                None => true,
                Some(value) => is_degenerate_empty(value),
            };
            if replace {
                args.insert(name.clone(), default.clone());
            }
        }
        Ok(args)
    }

    /// Render the usage string for this contract against an argument map
    ///
    /// Shape: `context{mand1 => value/opt1(default) => value/...}`. Diagnostic
    /// text only, never parsed back.
    pub fn usage(&self, args: &ArgMap) -> String {
        let mut parts: Vec<String> = Vec::new();
        for name in &self.mandatory {
            let value = args.get(name).map(render_value).unwrap_or_default();
            parts.push(format!("{} => {}", name, value));
        }
        for (name, default) in &self.optional {
            let value = args.get(name).unwrap_or(default);
            parts.push(format!("{}({}) => {}", name, render_value(default), render_value(value)));
        }
        format!("{}{{{}}}", self.context, parts.join("/"))
    }
}

/// Whether an optional value counts as absent and should take its default
///
/// Compatibility rule carried from the pipeline this schema serves: an empty
/// string, or a one-element list holding null or an empty string, is treated
/// as unset. A legitimately empty optional input is therefore
/// indistinguishable from an omitted one. Other falsy values (0, false, an
/// empty list) are NOT treated as absent.
fn is_degenerate_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => match items.as_slice() {
            [Value::Null] => true,
            [Value::String(s)] => s.is_empty(),
            _ => false,
        },
        _ => false,
    }
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn normalize_flat_sequence() {
        let raw = RawArgs::Flat(vec![json!("id"), json!("X"), json!("name"), json!("Y")]);
        let args = normalize(raw, "new_model").unwrap();
        assert_eq!(args.get("id"), Some(&json!("X")));
        assert_eq!(args.get("name"), Some(&json!("Y")));
        assert_eq!(args.len(), 2);
    }

    #[test]
    fn normalize_odd_length_fails() {
        let raw = RawArgs::Flat(vec![json!("id"), json!("X"), json!("name")]);
        let err = normalize(raw, "new_model").unwrap_err();
        match err {
            ArgError::MalformedArguments { context } => assert_eq!(context, "new_model"),
            other => panic!("expected MalformedArguments, got {:?}", other),
        }
    }

    #[test]
    fn normalize_non_string_key_fails() {
        let raw = RawArgs::Flat(vec![json!(42), json!("X")]);
        assert!(matches!(
            normalize(raw, "new_model"),
            Err(ArgError::MalformedArguments { .. })
        ));
    }

    #[test]
    fn normalize_map_passthrough() {
        let mut map = ArgMap::new();
        map.insert("id".to_string(), json!("X"));
        let args = normalize(RawArgs::Map(map.clone()), "new_model").unwrap();
        assert_eq!(args, map);
    }

    fn gapgen_contract() -> Contract {
        Contract::new("run_gapgeneration")
            .mandatory("media_ref")
            .optional("timePerSolution", json!(3600))
    }

    #[test]
    fn missing_mandatory_collected() {
        let err = gapgen_contract().enforce(ArgMap::new()).unwrap_err();
        match err {
            ArgError::MissingMandatoryArguments {
                context, missing, ..
            } => {
                assert_eq!(context, "run_gapgeneration");
                assert_eq!(missing, vec!["media_ref".to_string()]);
            }
            other => panic!("expected MissingMandatoryArguments, got {:?}", other),
        }
    }

    #[test]
    fn all_missing_names_collected_before_failing() {
        let contract = Contract::new("new_fba")
            .mandatory("fbamodel_ref")
            .mandatory("media_ref");
        let mut args = ArgMap::new();
        args.insert("fva".to_string(), json!(true));
        let err = contract.enforce(args).unwrap_err();
        match err {
            ArgError::MissingMandatoryArguments { missing, .. } => {
                assert_eq!(
                    missing,
                    vec!["fbamodel_ref".to_string(), "media_ref".to_string()]
                );
            }
            other => panic!("expected MissingMandatoryArguments, got {:?}", other),
        }
    }

    #[test]
    fn null_counts_as_missing() {
        let mut args = ArgMap::new();
        args.insert("media_ref".to_string(), Value::Null);
        assert!(matches!(
            gapgen_contract().enforce(args),
            Err(ArgError::MissingMandatoryArguments { .. })
        ));
    }

    #[test]
    fn optional_default_substituted() {
        let mut args = ArgMap::new();
        args.insert("media_ref".to_string(), json!("ws/Media/1"));
        let completed = gapgen_contract().enforce(args).unwrap();
        assert_eq!(completed.get("timePerSolution"), Some(&json!(3600)));
    }

    #[test]
    fn empty_string_optional_takes_default() {
        let mut args = ArgMap::new();
        args.insert("media_ref".to_string(), json!("ws/Media/1"));
        args.insert("timePerSolution".to_string(), json!(""));
        let completed = gapgen_contract().enforce(args).unwrap();
        assert_eq!(completed.get("media_ref"), Some(&json!("ws/Media/1")));
        assert_eq!(completed.get("timePerSolution"), Some(&json!(3600)));
    }

    #[test]
    fn single_element_empty_list_takes_default() {
        let contract = Contract::new("op").optional("refs", json!(["ws/default/1"]));
        let mut args = ArgMap::new();
        args.insert("refs".to_string(), json!([null]));
        let completed = contract.enforce(args).unwrap();
        assert_eq!(completed.get("refs"), Some(&json!(["ws/default/1"])));

        // An empty list is left alone
        let mut args = ArgMap::new();
        args.insert("refs".to_string(), json!([]));
        let completed = contract.enforce(args).unwrap();
        assert_eq!(completed.get("refs"), Some(&json!([])));
    }

    #[test]
    fn zero_and_false_are_kept() {
        let contract = Contract::new("op")
            .optional("count", json!(10))
            .optional("verbose", json!(true));
        let mut args = ArgMap::new();
        args.insert("count".to_string(), json!(0));
        args.insert("verbose".to_string(), json!(false));
        let completed = contract.enforce(args).unwrap();
        assert_eq!(completed.get("count"), Some(&json!(0)));
        assert_eq!(completed.get("verbose"), Some(&json!(false)));
    }

    #[test]
    fn substitution_applied_before_checks() {
        let contract = Contract::new("op")
            .mandatory("media_ref")
            .substitute("media", "media_ref");
        let mut args = ArgMap::new();
        args.insert("media".to_string(), json!("ws/Media/1"));
        let completed = contract.enforce(args).unwrap();
        assert_eq!(completed.get("media_ref"), Some(&json!("ws/Media/1")));
        assert!(!completed.contains_key("media"));
    }

    #[test]
    fn substitution_does_not_clobber() {
        let contract = Contract::new("op")
            .mandatory("media_ref")
            .substitute("media", "media_ref");
        let mut args = ArgMap::new();
        args.insert("media_ref".to_string(), json!("ws/Media/1"));
        args.insert("media".to_string(), json!("ws/Other/1"));
        let completed = contract.enforce(args).unwrap();
        assert_eq!(completed.get("media_ref"), Some(&json!("ws/Media/1")));
    }

    #[test]
    fn usage_rendering() {
        let contract = gapgen_contract();
        let mut args = ArgMap::new();
        args.insert("media_ref".to_string(), json!("ws/Media/1"));
        assert_eq!(
            contract.usage(&args),
            "run_gapgeneration{media_ref => ws/Media/1/timePerSolution(3600) => 3600}"
        );
    }

    #[test]
    fn failure_carries_usage() {
        let err = gapgen_contract().enforce(ArgMap::new()).unwrap_err();
        match err {
            ArgError::MissingMandatoryArguments { usage, .. } => {
                assert!(usage.starts_with("run_gapgeneration{"));
                assert!(usage.contains("timePerSolution(3600)"));
            }
            other => panic!("expected MissingMandatoryArguments, got {:?}", other),
        }
    }

    #[test]
    fn normalize_then_enforce() {
        let raw = RawArgs::Flat(vec![
            json!("media_ref"),
            json!("ws/Media/1"),
            json!("timePerSolution"),
            json!(""),
        ]);
        let args = normalize(raw, "run_gapgeneration").unwrap();
        let completed = gapgen_contract().enforce(args).unwrap();
        assert_eq!(completed.get("timePerSolution"), Some(&json!(3600)));
    }
}
