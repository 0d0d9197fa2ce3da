//! Type coercion table
//!
//! Conversions between an environment variable's string value and the typed
//! value of a record field. Every field type bound with `#[env(name = "...")]`
//! must implement [`EnvValue`]; a type without an impl is rejected when the
//! derive expands, so both directions share one closed table:
//!
//! | Field type | Unmarshal | Marshal |
//! |---|---|---|
//! | `String` | verbatim | verbatim |
//! | `bool` | `true/false/1/0/t/f`, any case | `true` / `false` |
//! | integers | base-10, optional sign | decimal |
//! | `Option<T>`, `Box<T>` | allocate and coerce per `T` | `None` is skipped |
//! | `Vec<String>`, `Vec<{integer}>` | split on `,` | join with `,` |

use crate::error::EnvError;

/// Separator between list elements.
pub const LIST_SEPARATOR: char = ',';

/// A field type with a coercion rule in both directions.
pub trait EnvValue: Sized {
    /// Coerce an environment value into `Self`.
    ///
    /// # Errors
    ///
    /// Malformed boolean and integer literals surface as
    /// [`EnvError::ParseBool`] and [`EnvError::ParseInt`]. List elements that
    /// fail to parse surface as [`EnvError::UnsupportedType`].
    fn from_env_str(value: &str) -> Result<Self, EnvError>;

    /// Format `self` as an environment value.
    ///
    /// Returns `None` when there is nothing to emit (a null pointer).
    fn to_env_string(&self) -> Option<String>;
}

/// Element types allowed inside a `Vec` field.
pub trait EnvListItem: EnvValue {}

/// Error returned when a boolean literal is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid boolean literal '{0}'")]
pub struct ParseBoolError(String);

/// Parse a boolean literal.
///
/// Accepts `true`, `false`, `t`, `f`, `1` and `0`, ignoring ASCII case.
pub fn parse_bool(value: &str) -> Result<bool, ParseBoolError> {
    const TRUE: [&str; 3] = ["1", "t", "true"];
    const FALSE: [&str; 3] = ["0", "f", "false"];

    if TRUE.iter().any(|lit| value.eq_ignore_ascii_case(lit)) {
        Ok(true)
    } else if FALSE.iter().any(|lit| value.eq_ignore_ascii_case(lit)) {
        Ok(false)
    } else {
        Err(ParseBoolError(value.to_string()))
    }
}

impl EnvValue for String {
    fn from_env_str(value: &str) -> Result<Self, EnvError> {
        Ok(value.to_string())
    }

    fn to_env_string(&self) -> Option<String> {
        Some(self.clone())
    }
}

impl EnvListItem for String {}

impl EnvValue for bool {
    fn from_env_str(value: &str) -> Result<Self, EnvError> {
        Ok(parse_bool(value)?)
    }

    fn to_env_string(&self) -> Option<String> {
        Some(self.to_string())
    }
}

macro_rules! impl_integer {
    ($($ty:ty)*) => {
        $(
            impl EnvValue for $ty {
                fn from_env_str(value: &str) -> Result<Self, EnvError> {
                    Ok(value.parse::<$ty>()?)
                }

                fn to_env_string(&self) -> Option<String> {
                    Some(self.to_string())
                }
            }

            impl EnvListItem for $ty {}
        )*
    };
}

impl_integer!(i8 i16 i32 i64 i128 isize u8 u16 u32 u64 u128 usize);

impl<T: EnvValue> EnvValue for Option<T> {
    fn from_env_str(value: &str) -> Result<Self, EnvError> {
        T::from_env_str(value).map(Some)
    }

    fn to_env_string(&self) -> Option<String> {
        self.as_ref().and_then(EnvValue::to_env_string)
    }
}

impl<T: EnvValue> EnvValue for Box<T> {
    fn from_env_str(value: &str) -> Result<Self, EnvError> {
        T::from_env_str(value).map(Box::new)
    }

    fn to_env_string(&self) -> Option<String> {
        (**self).to_env_string()
    }
}

impl<T: EnvListItem> EnvValue for Vec<T> {
    fn from_env_str(value: &str) -> Result<Self, EnvError> {
        let items: Vec<&str> = value.split(LIST_SEPARATOR).collect();
        // `split` always yields at least one item, even for ""
        if items.is_empty() {
            return Err(EnvError::unsupported::<Self>(value));
        }

        items
            .into_iter()
            .map(|item| T::from_env_str(item).map_err(|_| EnvError::unsupported::<Self>(item)))
            .collect()
    }

    fn to_env_string(&self) -> Option<String> {
        let items: Vec<String> = self.iter().filter_map(EnvValue::to_env_string).collect();
        Some(items.join(LIST_SEPARATOR.to_string().as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_is_verbatim() {
        let value = String::from_env_str(" spaced, with commas ").unwrap();
        assert_eq!(value, " spaced, with commas ");
        assert_eq!(value.to_env_string().as_deref(), Some(" spaced, with commas "));
    }

    #[test]
    fn test_parse_bool_literals() {
        for lit in ["1", "t", "T", "true", "TRUE", "True", "tRuE"] {
            assert_eq!(parse_bool(lit), Ok(true), "{lit}");
        }
        for lit in ["0", "f", "F", "false", "FALSE", "False"] {
            assert_eq!(parse_bool(lit), Ok(false), "{lit}");
        }
    }

    #[test]
    fn test_parse_bool_rejects_other_forms() {
        for lit in ["", "yes", "no", "2", " true", "on"] {
            assert!(parse_bool(lit).is_err(), "{lit}");
        }
    }

    #[test]
    fn test_bool_parse_error_is_surfaced() {
        let err = bool::from_env_str("maybe").unwrap_err();
        assert!(matches!(err, EnvError::ParseBool(_)));
        assert_eq!(err.to_string(), "invalid boolean literal 'maybe'");
    }

    #[test]
    fn test_integer_base_10() {
        assert_eq!(i64::from_env_str("42").unwrap(), 42);
        assert_eq!(i64::from_env_str("-17").unwrap(), -17);
        assert_eq!(i32::from_env_str("+8").unwrap(), 8);
        assert_eq!(u16::from_env_str("8080").unwrap(), 8080);
        assert_eq!((-3isize).to_env_string().as_deref(), Some("-3"));
    }

    #[test]
    fn test_integer_parse_error_is_surfaced() {
        assert!(matches!(
            i64::from_env_str("0x10"),
            Err(EnvError::ParseInt(_))
        ));
        assert!(matches!(u8::from_env_str("256"), Err(EnvError::ParseInt(_))));
        assert!(matches!(u32::from_env_str("-1"), Err(EnvError::ParseInt(_))));
    }

    #[test]
    fn test_option_allocates_pointee() {
        assert_eq!(Option::<i32>::from_env_str("5").unwrap(), Some(5));
        assert!(matches!(
            Option::<bool>::from_env_str("nope"),
            Err(EnvError::ParseBool(_))
        ));
    }

    #[test]
    fn test_null_pointer_is_not_formatted() {
        assert_eq!(None::<String>.to_env_string(), None);
        assert_eq!(Some(true).to_env_string().as_deref(), Some("true"));
        assert_eq!(Box::new(7u8).to_env_string().as_deref(), Some("7"));
    }

    #[test]
    fn test_string_list_split() {
        let value = Vec::<String>::from_env_str("a,b,c").unwrap();
        assert_eq!(value, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_empty_input_yields_one_empty_item() {
        let value = Vec::<String>::from_env_str("").unwrap();
        assert_eq!(value, vec![String::new()]);
    }

    #[test]
    fn test_integer_list_split() {
        let value = Vec::<i64>::from_env_str("1,2,3").unwrap();
        assert_eq!(value, vec![1, 2, 3]);
    }

    #[test]
    fn test_integer_list_bad_element_is_unsupported() {
        match Vec::<i64>::from_env_str("1,x,3") {
            Err(EnvError::UnsupportedType { value, type_name }) => {
                assert_eq!(value, "x");
                assert!(type_name.contains("Vec<i64>"));
            }
            other => panic!("Expected UnsupportedType, got {other:?}"),
        }
    }

    #[test]
    fn test_list_join() {
        let strings = vec!["x".to_string(), "y".to_string()];
        assert_eq!(strings.to_env_string().as_deref(), Some("x,y"));
        assert_eq!(vec![4u32, 5, 6].to_env_string().as_deref(), Some("4,5,6"));
        assert_eq!(Vec::<i64>::new().to_env_string().as_deref(), Some(""));
    }
}
