//! Unmarshal engine: environment variables into records

use tracing::{debug, trace};

use crate::coerce::EnvValue;
use crate::error::EnvError;
use crate::record::EnvRecord;
use crate::set::EnvSet;

/// Populate `target` from `set`, consuming every key a field binds.
///
/// Fields are visited in declaration order. Nested records are walked first,
/// sharing the same `set`, so a key claimed by a nested field is gone before
/// any later field looks for it. Keys no field binds stay in `set`, and a
/// bound key that is absent leaves its field untouched.
///
/// # Errors
///
/// - [`EnvError::InvalidValue`] if `target` is a `None` record; nothing is
///   mutated in that case
/// - [`EnvError::UnexportedField`] for a bound field that is not `pub`
/// - [`EnvError::ParseBool`], [`EnvError::ParseInt`] or
///   [`EnvError::UnsupportedType`] when a value cannot be coerced
///
/// The first error aborts the traversal. Fields assigned and keys consumed
/// before it are not rolled back.
pub fn unmarshal<T>(set: &mut EnvSet, target: &mut T) -> Result<(), EnvError>
where
    T: EnvRecord + ?Sized,
{
    if !target.is_present() {
        return Err(EnvError::InvalidValue);
    }

    let before = set.len();
    target.unmarshal_fields(set)?;
    debug!(consumed = before.saturating_sub(set.len()), remaining = set.len(), "unmarshalled record");
    Ok(())
}

/// Populate `target` from the process environment.
///
/// Takes a snapshot of the environment, unmarshals it into `target` and
/// returns the variables no field consumed. The process environment itself
/// is never modified.
///
/// # Errors
///
/// Fails like [`unmarshal`]. Variables that are not valid UTF-8 are left
/// out of the snapshot rather than failing the call.
pub fn unmarshal_from_environment<T>(target: &mut T) -> Result<EnvSet, EnvError>
where
    T: EnvRecord + ?Sized,
{
    let mut set = EnvSet::from_process_env();
    unmarshal(&mut set, target)?;
    Ok(set)
}

/// Build a `T` from `set`, returning it together with the unconsumed keys.
///
/// Starts from `T::default()`, so bound keys that are absent keep their
/// default values.
///
/// # Example
///
/// ```rust
/// use envset::{EnvRecord, EnvSet};
///
/// #[derive(Debug, Default, EnvRecord)]
/// pub struct Config {
///     #[env(name = "PORT")]
///     pub port: u16,
/// }
///
/// # fn main() -> anyhow::Result<()> {
/// let set = EnvSet::from_environ(["PORT=8080", "HOME=/root"])?;
/// let (config, rest) = envset::consume::<Config>(set)?;
/// assert_eq!(config.port, 8080);
/// assert_eq!(rest.get("HOME"), Some("/root"));
/// assert!(!rest.contains_key("PORT"));
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Fails like [`unmarshal`].
pub fn consume<T>(mut set: EnvSet) -> Result<(T, EnvSet), EnvError>
where
    T: EnvRecord + Default,
{
    let mut record = T::default();
    unmarshal(&mut set, &mut record)?;
    Ok((record, set))
}

/// Coerce and assign one bound field (used by macro-generated code)
#[doc(hidden)]
pub fn field<T: EnvValue>(target: &mut T, set: &mut EnvSet, key: &str) -> Result<(), EnvError> {
    let Some(value) = set.get(key) else {
        trace!(key, "environment variable not set, keeping field");
        return Ok(());
    };

    *target = T::from_env_str(value)?;
    set.remove(key);
    trace!(key, "consumed environment variable");
    Ok(())
}

/// Recurse into a nested record (used by macro-generated code)
#[doc(hidden)]
pub fn nested<T>(target: &mut T, set: &mut EnvSet) -> Result<(), EnvError>
where
    T: EnvRecord + ?Sized,
{
    target.unmarshal_fields(set)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Manual {
        name: String,
        retries: Option<u8>,
    }

    impl EnvRecord for Manual {
        fn unmarshal_fields(&mut self, set: &mut EnvSet) -> Result<(), EnvError> {
            field(&mut self.name, set, "NAME")?;
            field(&mut self.retries, set, "RETRIES")?;
            Ok(())
        }

        fn marshal_fields(&self, _set: &mut EnvSet) -> Result<(), EnvError> {
            Ok(())
        }
    }

    fn set_of(entries: &[(&str, &str)]) -> EnvSet {
        entries.iter().copied().collect()
    }

    #[test]
    fn test_field_consumes_key() {
        let mut set = set_of(&[("NAME", "svc"), ("OTHER", "x")]);
        let mut value = String::new();
        field(&mut value, &mut set, "NAME").unwrap();
        assert_eq!(value, "svc");
        assert!(!set.contains_key("NAME"));
        assert_eq!(set.get("OTHER"), Some("x"));
    }

    #[test]
    fn test_field_absent_keeps_value() {
        let mut set = EnvSet::new();
        let mut value = 7i32;
        field(&mut value, &mut set, "MISSING").unwrap();
        assert_eq!(value, 7);
    }

    #[test]
    fn test_field_failure_keeps_key_and_value() {
        let mut set = set_of(&[("COUNT", "many")]);
        let mut value = 3i64;
        assert!(matches!(
            field(&mut value, &mut set, "COUNT"),
            Err(EnvError::ParseInt(_))
        ));
        assert_eq!(value, 3);
        assert_eq!(set.get("COUNT"), Some("many"));
    }

    #[test]
    fn test_unmarshal_none_target_is_invalid() {
        let mut set = set_of(&[("NAME", "svc")]);
        let mut target: Option<Manual> = None;
        assert!(matches!(
            unmarshal(&mut set, &mut target),
            Err(EnvError::InvalidValue)
        ));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_unmarshal_some_target() {
        let mut set = set_of(&[("NAME", "svc"), ("RETRIES", "4")]);
        let mut target = Some(Manual::default());
        unmarshal(&mut set, &mut target).unwrap();
        let target = target.unwrap();
        assert_eq!(target.name, "svc");
        assert_eq!(target.retries, Some(4));
        assert!(set.is_empty());
    }

    /// Inserts a key while unmarshalling, so the set grows.
    struct Growing;

    impl EnvRecord for Growing {
        fn unmarshal_fields(&mut self, set: &mut EnvSet) -> Result<(), EnvError> {
            set.insert("ADDED_ONE", "1");
            set.insert("ADDED_TWO", "2");
            Ok(())
        }

        fn marshal_fields(&self, _set: &mut EnvSet) -> Result<(), EnvError> {
            Ok(())
        }
    }

    #[test]
    fn test_unmarshal_set_growing_is_logged() {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let mut set = set_of(&[("NAME", "svc")]);
            unmarshal(&mut set, &mut Growing).unwrap();
            assert_eq!(set.len(), 3);
        });
    }

    #[test]
    fn test_consume_returns_remainder() {
        let set = set_of(&[("NAME", "svc"), ("PATH", "/bin")]);
        let (record, rest) = consume::<Manual>(set).unwrap();
        assert_eq!(record.name, "svc");
        assert_eq!(record.retries, None);
        assert_eq!(rest, set_of(&[("PATH", "/bin")]));
    }
}
