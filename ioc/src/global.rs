//! The process-wide registry instance and access functions.

use crate::registry::Registry;
use once_cell::sync::Lazy;

// Created on first access.
static GLOBAL_REGISTRY: Lazy<Registry> = Lazy::new(Registry::default);

/// Provides a reference to the process-wide registry.
///
/// # Examples
///
/// ```
/// use pollen::global;
///
/// fn register_services() -> pollen::Result<()> {
///   global().add_value("app.name", String::from("pollen"))
/// }
///
/// register_services().unwrap();
/// assert!(global().has("app.name"));
/// ```
pub fn global() -> &'static Registry {
  &GLOBAL_REGISTRY
}
