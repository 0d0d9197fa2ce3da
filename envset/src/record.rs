//! The record trait implemented by `#[derive(EnvRecord)]`

use crate::error::EnvError;
use crate::set::EnvSet;

/// A struct whose fields bind to environment variables.
///
/// Implemented by `#[derive(EnvRecord)]`. The generated methods visit fields
/// in declaration order; prefer [`unmarshal`](crate::unmarshal) and
/// [`marshal`](crate::marshal) over calling them directly.
pub trait EnvRecord {
    /// Populate bound fields from `set`, removing each key that was used.
    ///
    /// # Errors
    ///
    /// Fails on the first field that is not public, or whose value cannot be
    /// coerced. Earlier assignments and removals are kept.
    fn unmarshal_fields(&mut self, set: &mut EnvSet) -> Result<(), EnvError>;

    /// Write every bound field into `set`, overwriting existing keys.
    ///
    /// # Errors
    ///
    /// Propagates the first failure of a nested record.
    fn marshal_fields(&self, set: &mut EnvSet) -> Result<(), EnvError>;

    /// Whether there is a record to traverse. `false` only for a null pointer.
    fn is_present(&self) -> bool {
        true
    }
}

/// A nullable record: `None` is skipped when nested and rejected at the top.
impl<T: EnvRecord> EnvRecord for Option<T> {
    fn unmarshal_fields(&mut self, set: &mut EnvSet) -> Result<(), EnvError> {
        match self {
            Some(record) => record.unmarshal_fields(set),
            None => Ok(()),
        }
    }

    fn marshal_fields(&self, set: &mut EnvSet) -> Result<(), EnvError> {
        match self {
            Some(record) => record.marshal_fields(set),
            None => Ok(()),
        }
    }

    fn is_present(&self) -> bool {
        self.as_ref().is_some_and(EnvRecord::is_present)
    }
}

impl<T: EnvRecord + ?Sized> EnvRecord for Box<T> {
    fn unmarshal_fields(&mut self, set: &mut EnvSet) -> Result<(), EnvError> {
        (**self).unmarshal_fields(set)
    }

    fn marshal_fields(&self, set: &mut EnvSet) -> Result<(), EnvError> {
        (**self).marshal_fields(set)
    }

    fn is_present(&self) -> bool {
        (**self).is_present()
    }
}
