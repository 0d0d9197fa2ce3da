//! Marshal engine: records into environment variables

use tracing::{debug, trace};

use crate::coerce::EnvValue;
use crate::error::EnvError;
use crate::record::EnvRecord;
use crate::set::EnvSet;

/// Render every bound field of `source` into a fresh [`EnvSet`].
///
/// Fields are visited in declaration order and nested records are merged
/// into the same set, so when two fields bind the same key the one declared
/// last wins. `None` pointers are skipped. `source` is never modified.
///
/// # Errors
///
/// [`EnvError::InvalidValue`] if `source` is a `None` record.
pub fn marshal<T>(source: &T) -> Result<EnvSet, EnvError>
where
    T: EnvRecord + ?Sized,
{
    if !source.is_present() {
        return Err(EnvError::InvalidValue);
    }

    let mut set = EnvSet::new();
    source.marshal_fields(&mut set)?;
    debug!(keys = set.len(), "marshalled record");
    Ok(set)
}

/// Format one bound field (used by macro-generated code)
#[doc(hidden)]
pub fn field<T: EnvValue>(source: &T, set: &mut EnvSet, key: &str) {
    match source.to_env_string() {
        Some(value) => {
            if set.insert(key, value).is_some() {
                trace!(key, "overwrote environment variable");
            } else {
                trace!(key, "emitted environment variable");
            }
        }
        None => trace!(key, "null field, skipping"),
    }
}

/// Recurse into a nested record (used by macro-generated code)
#[doc(hidden)]
pub fn nested<T>(source: &T, set: &mut EnvSet) -> Result<(), EnvError>
where
    T: EnvRecord + ?Sized,
{
    source.marshal_fields(set)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Manual {
        host: String,
        port: Option<u16>,
        tags: Vec<String>,
    }

    impl EnvRecord for Manual {
        fn unmarshal_fields(&mut self, _set: &mut EnvSet) -> Result<(), EnvError> {
            Ok(())
        }

        fn marshal_fields(&self, set: &mut EnvSet) -> Result<(), EnvError> {
            field(&self.host, set, "HOST");
            field(&self.port, set, "PORT");
            field(&self.tags, set, "TAGS");
            Ok(())
        }
    }

    #[test]
    fn test_marshal_formats_fields() {
        let source = Manual {
            host: "localhost".to_string(),
            port: Some(8080),
            tags: vec!["a".to_string(), "b".to_string()],
        };
        let set = marshal(&source).unwrap();
        assert_eq!(set.to_environ(), vec!["HOST=localhost", "PORT=8080", "TAGS=a,b"]);
    }

    #[test]
    fn test_marshal_skips_null_pointer() {
        let source = Manual {
            host: String::new(),
            port: None,
            tags: Vec::new(),
        };
        let set = marshal(&source).unwrap();
        assert_eq!(set.get("HOST"), Some(""));
        assert!(!set.contains_key("PORT"));
        assert_eq!(set.get("TAGS"), Some(""));
    }

    #[test]
    fn test_field_overwrites_existing_key() {
        let mut set: EnvSet = [("KEY", "old")].into_iter().collect();
        field(&true, &mut set, "KEY");
        assert_eq!(set.get("KEY"), Some("true"));
    }

    #[test]
    fn test_marshal_none_source_is_invalid() {
        let source: Option<Manual> = None;
        assert!(matches!(marshal(&source), Err(EnvError::InvalidValue)));
    }
}
