//! Public macros for identifiers and panicking resolution.

/// Builds the identifier of an item defined in the calling module.
///
/// `fqn!(Mailer)` expands to the same `"<module>.Mailer"` key that
/// [`Identifier::of`](crate::Identifier::of) derives for a type declared at
/// the top of that module.
///
/// ```
/// use pollen::{fqn, Identifier};
///
/// assert_eq!(fqn!(Mailer), Identifier::new(concat!(module_path!(), ".Mailer")));
/// ```
#[macro_export]
macro_rules! fqn {
  ($name:ident) => {
    $crate::Identifier::new(concat!(module_path!(), ".", stringify!($name)))
  };
}

/// Resolves a service from the global registry.
///
/// # Panics
///
/// Panics with the [`RegistryError`](crate::RegistryError) message if the
/// service can not be resolved. For a non-panicking version, use
/// `global().get(...)` directly.
///
/// # Examples
///
/// ```
/// use pollen::{global, resolve};
/// use std::sync::Arc;
///
/// trait Greeter: Send + Sync { fn greet(&self) -> String; }
/// struct EnglishGreeter;
/// impl Greeter for EnglishGreeter { fn greet(&self) -> String { "Hello!".to_string() } }
///
/// global().add_value("doc.prefix", String::from("Dear")).unwrap();
/// global()
///   .add_shared_arc::<dyn Greeter>("doc.greeter", |_| Arc::new(EnglishGreeter))
///   .unwrap();
/// global()
///   .add_configurable("doc.letter", |registry, to: &'static str| {
///     format!("{} {}", resolve!(String, "doc.prefix", from: registry), to)
///   })
///   .unwrap();
///
/// assert_eq!(*resolve!(String, "doc.prefix"), "Dear");
/// assert_eq!(resolve!(trait Greeter, "doc.greeter").greet(), "Hello!");
/// assert_eq!(*resolve!(String, "doc.letter", "reader"), "Dear reader");
/// ```
#[macro_export]
macro_rules! resolve {
  // resolve!(trait MyTrait, "name")
  (trait $trait_ident:ident, $name:expr) => {
    $crate::resolve!(trait $trait_ident, $name, from: $crate::global())
  };

  // resolve!(trait MyTrait, "name", from: &registry)
  (trait $trait_ident:ident, $name:expr, from: $registry:expr) => {
    $registry
      .get::<dyn $trait_ident>($name)
      .unwrap_or_else(|err| panic!("Failed to resolve required trait service: {}", err))
  };

  // resolve!(MyService, "name", from: &registry)
  ($type:ty, $name:expr, from: $registry:expr) => {
    $registry
      .get::<$type>($name)
      .unwrap_or_else(|err| panic!("Failed to resolve required service: {}", err))
  };

  // resolve!(MyService, "name")
  ($type:ty, $name:expr) => {
    $crate::resolve!($type, $name, from: $crate::global())
  };

  // resolve!(MyService, "name", args)
  ($type:ty, $name:expr, $args:expr) => {
    $crate::global()
      .get_with::<$type, _>($name, $args)
      .unwrap_or_else(|err| panic!("Failed to resolve required service: {}", err))
  };
}
