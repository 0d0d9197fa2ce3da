//! Bind environment variables to typed, nested structs in both directions
//!
//! `envset` converts between a flat set of environment variables ([`EnvSet`])
//! and a struct whose fields declare, with `#[env(name = "KEY")]`, which
//! variable they bind to.
//!
//! - [`unmarshal`] populates a struct in place and **consumes** the keys it
//!   used, leaving the caller with what is left over
//! - [`consume`] does the same starting from `Default`, returning the record
//!   and the remainder
//! - [`unmarshal_from_environment`] reads a snapshot of the process
//!   environment first
//! - [`marshal`] renders a populated struct back into a fresh [`EnvSet`]
//!
//! # Example
//!
//! ```rust
//! use envset::{EnvRecord, EnvSet};
//!
//! #[derive(Debug, Default, EnvRecord)]
//! pub struct Database {
//!     #[env(name = "DB_HOST")]
//!     pub host: String,
//!
//!     #[env(name = "DB_PORT")]
//!     pub port: u16,
//! }
//!
//! #[derive(Debug, Default, EnvRecord)]
//! pub struct Config {
//!     #[env(name = "DEBUG")]
//!     pub debug: bool,
//!
//!     #[env(name = "ALLOWED_HOSTS")]
//!     pub allowed_hosts: Vec<String>,
//!
//!     #[env(name = "WORKERS")]
//!     pub workers: Option<u32>,
//!
//!     #[env(nested)]
//!     pub database: Database,
//! }
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut set = EnvSet::from_environ([
//!     "DEBUG=t",
//!     "ALLOWED_HOSTS=a.example,b.example",
//!     "DB_HOST=db.internal",
//!     "DB_PORT=5432",
//!     "SHELL=/bin/sh",
//! ])?;
//!
//! let mut config = Config::default();
//! envset::unmarshal(&mut set, &mut config)?;
//!
//! assert!(config.debug);
//! assert_eq!(config.allowed_hosts, vec!["a.example", "b.example"]);
//! assert_eq!(config.workers, None);
//! assert_eq!(config.database.port, 5432);
//!
//! // Only the unbound variable is left
//! assert_eq!(set.to_environ(), vec!["SHELL=/bin/sh"]);
//!
//! let out = envset::marshal(&config)?;
//! assert_eq!(out.get("DEBUG"), Some("true"));
//! assert_eq!(out.get("DB_HOST"), Some("db.internal"));
//! assert!(!out.contains_key("WORKERS"));
//! # Ok(())
//! # }
//! ```
//!
//! # Attributes
//!
//! ## `#[env(name = "KEY")]`
//!
//! Bind the field to the variable `KEY`. The field type must implement
//! [`EnvValue`]: `String`, `bool`, any primitive integer, `Option<T>` or
//! `Box<T>` of those, and `Vec<String>` or `Vec` of an integer. Fields
//! without the attribute are never touched.
//!
//! A bound field must be `pub`. Unmarshalling a record with a private bound
//! field fails with [`EnvError::UnexportedField`] when the traversal reaches
//! it; marshalling skips it.
//!
//! ## `#[env(nested)]`
//!
//! Walk into a field whose type is itself an [`EnvRecord`] (or an `Option`
//! or `Box` of one), sharing the same set. A private nested field is
//! skipped. A `None` nested record is skipped in both directions.
//!
//! The marker is required: a field whose type is a record but which lacks
//! `#[env(nested)]` is not walked at all, and the keys its fields bind are
//! left in the set.
//!
//! # Concurrency
//!
//! Calls are synchronous and keep no global state. An [`EnvSet`] is a plain
//! value: give each concurrent caller its own.

// Lets macro-generated `::envset::` paths resolve inside this crate
extern crate self as envset;

mod coerce;
pub mod de;
mod error;
mod record;
pub mod ser;
mod set;

pub use coerce::{parse_bool, EnvListItem, EnvValue, ParseBoolError, LIST_SEPARATOR};
pub use de::{consume, unmarshal, unmarshal_from_environment};
pub use envset_derive::EnvRecord;
pub use error::EnvError;
pub use record::EnvRecord;
pub use ser::marshal;
pub use set::EnvSet;
