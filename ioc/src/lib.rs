//! # Pollen
//!
//! A minimal dependency-injection registry for Rust.
//!
//! A registry maps string identifiers to values or to factories that build
//! instances on demand. Factories receive the registry itself so they can
//! resolve their own dependencies, and may be shared, in which case they run
//! once and their result is reused for the lifetime of the registry.
//!
//! ## Core Concepts
//!
//! - **Registry**: maps identifiers to definitions. Each identifier can be bound once.
//! - **Definition**: a value, a factory, or a configurable factory taking an
//!   argument object forwarded from `get_with`. Configurable factories can not be shared.
//! - **Identifier**: a plain string, or a `"<module>.<name>"` key derived from
//!   a type or function with `Identifier::of` / `Identifier::of_val`.
//! - **Global Registry**: a process-wide registry accessible via `global()`,
//!   with the panicking `resolve!` macro on top of it.
//!
//! ## Quick Start
//!
//! ```
//! use pollen::{Identifier, Registry, RegistryError};
//! use std::sync::Arc;
//!
//! struct Database {
//!   url: String,
//! }
//!
//! struct Query {
//!   sql: String,
//! }
//!
//! let registry = Registry::new();
//! registry.add_value("db.url", String::from("postgres://localhost/app")).unwrap();
//! registry
//!   .add_shared(Identifier::of::<Database>(), |registry| Database {
//!     url: (*registry.get::<String>("db.url").unwrap()).clone(),
//!   })
//!   .unwrap();
//! registry
//!   .add_configurable("query", |_, sql: &'static str| Query { sql: sql.to_string() })
//!   .unwrap();
//!
//! let db = registry.get::<Database>(Identifier::of::<Database>()).unwrap();
//! assert_eq!(db.url, "postgres://localhost/app");
//! assert!(Arc::ptr_eq(&db, &registry.get::<Database>(Identifier::of::<Database>()).unwrap()));
//!
//! let query = registry.get_with::<Query, _>("query", "SELECT 1").unwrap();
//! assert_eq!(query.sql, "SELECT 1");
//!
//! assert_eq!(
//!   registry.add_value("db.url", String::new()),
//!   Err(RegistryError::Overwrite { name: "db.url".to_string() })
//! );
//! ```

mod definition;
mod error;
mod global;
mod identifier;
mod internal;
#[cfg(feature = "local")]
mod local_registry;
mod macros;
mod registry;

pub use definition::Definition;
pub use error::{RegistryError, Result};
pub use global::global;
pub use identifier::Identifier;
#[cfg(feature = "local")]
pub use local_registry::{LocalDefinition, LocalRegistry};
pub use registry::Registry;
