//! The main `Registry` struct and its associated methods.

use crate::internal::{type_mismatch, Binding, Factory, Instance, ResolutionGuard};
use crate::definition::{Definition, Kind};
use crate::error::{RegistryError, Result};
use crate::identifier::Identifier;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use once_cell::sync::OnceCell;
use std::any::Any;
use std::sync::Arc;

/// A thread-safe dependency-injection registry.
///
/// Every identifier is bound at most once, either to a value or to a factory.
/// Shared factories run on their first resolution and their result is
/// returned from then on; transient factories run on every resolution.
///
/// ```
/// use pollen::Registry;
/// use std::sync::Arc;
///
/// let registry = Registry::new();
/// registry.add_value("greeting", String::from("hello")).unwrap();
/// registry
///   .add_shared("shout", |registry| registry.get::<String>("greeting").unwrap().to_uppercase())
///   .unwrap();
///
/// assert_eq!(*registry.get::<String>("shout").unwrap(), "HELLO");
/// assert!(Arc::ptr_eq(
///   &registry.get::<String>("shout").unwrap(),
///   &registry.get::<String>("shout").unwrap(),
/// ));
/// ```
#[derive(Default)]
pub struct Registry {
  bindings: DashMap<Identifier, Binding>,
}

// What is left to do once the map guard has been released.
enum Pending {
  Shared(Arc<OnceCell<Instance>>, Factory),
  Transient(Factory),
}

impl Registry {
  /// Creates a new, empty `Registry`.
  pub fn new() -> Self {
    Self::default()
  }

  // --- Registration ---

  /// Binds `definition` to `name`.
  ///
  /// `shared` only applies to factories. Fails with
  /// [`RegistryError::Overwrite`] if `name` is already bound and with
  /// [`RegistryError::ConfigurableShared`] if a configurable factory is
  /// registered as shared. Nothing is stored on failure.
  pub fn register(
    &self,
    name: impl Into<Identifier>,
    definition: Definition,
    shared: bool,
  ) -> Result<()> {
    let name = name.into();
    match self.bindings.entry(name) {
      Entry::Occupied(occupied) => {
        tracing::warn!(name = %occupied.key(), "identifier is already bound");
        Err(RegistryError::Overwrite {
          name: occupied.key().to_string(),
        })
      }
      Entry::Vacant(vacant) => {
        let binding = match definition.kind {
          Kind::Value(instance) => {
            tracing::debug!(name = %vacant.key(), "registered value");
            Binding::Instance(instance)
          }
          Kind::Factory(factory) if factory.is_configurable() && shared => {
            tracing::warn!(name = %vacant.key(), "rejected shared configurable factory");
            return Err(RegistryError::ConfigurableShared);
          }
          Kind::Factory(factory) => {
            tracing::debug!(
              name = %vacant.key(),
              shared,
              configurable = factory.is_configurable(),
              "registered factory"
            );
            if shared {
              Binding::Shared {
                cell: Arc::new(OnceCell::new()),
                factory,
              }
            } else {
              Binding::Transient(factory)
            }
          }
        };
        vacant.insert(binding);
        Ok(())
      }
    }
  }

  pub fn add_value<T: Any + Send + Sync>(
    &self,
    name: impl Into<Identifier>,
    value: T,
  ) -> Result<()> {
    self.register(name, Definition::value(value), false)
  }

  /// Registers a factory that runs on every resolution.
  pub fn add_factory<T: Any + Send + Sync>(
    &self,
    name: impl Into<Identifier>,
    factory: impl Fn(&Registry) -> T + Send + Sync + 'static,
  ) -> Result<()> {
    self.register(name, Definition::factory(factory), false)
  }

  /// Registers a factory that runs once, on the first resolution.
  pub fn add_shared<T: Any + Send + Sync>(
    &self,
    name: impl Into<Identifier>,
    factory: impl Fn(&Registry) -> T + Send + Sync + 'static,
  ) -> Result<()> {
    self.register(name, Definition::factory(factory), true)
  }

  pub fn add_shared_arc<T: ?Sized + Any + Send + Sync>(
    &self,
    name: impl Into<Identifier>,
    factory: impl Fn(&Registry) -> Arc<T> + Send + Sync + 'static,
  ) -> Result<()> {
    self.register(name, Definition::factory_arc(factory), true)
  }

  /// Registers a factory receiving the arguments passed to [`Registry::get_with`].
  pub fn add_configurable<T: Any + Send + Sync, A: Any>(
    &self,
    name: impl Into<Identifier>,
    factory: impl Fn(&Registry, A) -> T + Send + Sync + 'static,
  ) -> Result<()> {
    self.register(name, Definition::configurable(factory), false)
  }

  // --- Resolution ---

  /// Resolves `name` without forwarding any arguments.
  pub fn get<T: ?Sized + Any + Send + Sync>(&self, name: impl Into<Identifier>) -> Result<Arc<T>> {
    self.get_with(name, ())
  }

  /// Resolves `name`, forwarding `args` to a configurable factory.
  ///
  /// Values, shared instances and factories without parameters ignore
  /// `args`. The map is not locked while a factory runs, so factories may
  /// resolve and register other entries of this registry.
  pub fn get_with<T, A>(&self, name: impl Into<Identifier>, args: A) -> Result<Arc<T>>
  where
    T: ?Sized + Any + Send + Sync,
    A: Any,
  {
    let name = name.into();

    let pending = {
      let binding = self
        .bindings
        .get(&name)
        .ok_or_else(|| RegistryError::UndefinedName {
          name: name.to_string(),
        })?;
      match binding.value() {
        Binding::Instance(instance) => {
          tracing::trace!(name = %name, source = "value", "resolved");
          return downcast_ref::<T>(&name, instance);
        }
        Binding::Shared { cell, factory } => match cell.get() {
          Some(instance) => {
            tracing::trace!(name = %name, source = "cache", "resolved");
            return downcast_ref::<T>(&name, instance);
          }
          None => Pending::Shared(Arc::clone(cell), factory.clone()),
        },
        Binding::Transient(factory) => Pending::Transient(factory.clone()),
      }
    };

    let _guard = ResolutionGuard::enter(self.address(), &name)?;

    match pending {
      Pending::Shared(cell, factory) => {
        let mut created = false;
        let instance = cell.get_or_try_init(|| {
          created = true;
          factory.invoke(self, &name, Box::new(()))
        })?;
        if created {
          tracing::debug!(name = %name, "promoted shared instance");
        }
        tracing::trace!(name = %name, source = "factory", "resolved");
        downcast_ref::<T>(&name, instance)
      }
      Pending::Transient(factory) => {
        let instance = factory.invoke(self, &name, Box::new(args))?;
        tracing::trace!(name = %name, source = "factory", "resolved");
        instance
          .downcast::<Arc<T>>()
          .map(|boxed| *boxed)
          .map_err(|_| type_mismatch::<T>(&name))
      }
    }
  }

  /// Whether `name` is bound to a value or a factory.
  pub fn has(&self, name: impl Into<Identifier>) -> bool {
    self.bindings.contains_key(&name.into())
  }

  pub fn len(&self) -> usize {
    self.bindings.len()
  }

  pub fn is_empty(&self) -> bool {
    self.bindings.is_empty()
  }

  /// All bound identifiers, sorted.
  pub fn identifiers(&self) -> Vec<Identifier> {
    let mut names: Vec<Identifier> = self
      .bindings
      .iter()
      .map(|binding| binding.key().clone())
      .collect();
    names.sort();
    names
  }

  fn address(&self) -> usize {
    self as *const Self as usize
  }
}

fn downcast_ref<T: ?Sized + Any + Send + Sync>(
  name: &Identifier,
  instance: &Instance,
) -> Result<Arc<T>> {
  instance
    .downcast_ref::<Arc<T>>()
    .cloned()
    .ok_or_else(|| type_mismatch::<T>(name))
}
