//! A single-threaded, non-thread-safe dependency-injection registry.

use crate::internal::{type_mismatch, ResolutionGuard};
use crate::error::{RegistryError, Result};
use crate::identifier::Identifier;
use once_cell::unsync::OnceCell;
use std::any::{type_name, Any};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::rc::Rc;

// Holds an `Rc<T>`.
type LocalInstance = Box<dyn Any>;

type LocalCall = dyn Fn(&LocalRegistry, Box<dyn Any>) -> Option<LocalInstance>;

#[derive(Clone)]
struct LocalFactory {
  call: Rc<LocalCall>,
  args: Option<&'static str>,
}

impl LocalFactory {
  fn invoke(
    &self,
    registry: &LocalRegistry,
    name: &Identifier,
    args: Box<dyn Any>,
  ) -> Result<LocalInstance> {
    (self.call)(registry, args).ok_or_else(|| RegistryError::ArgumentMismatch {
      name: name.to_string(),
      expected: self.args.unwrap_or("()"),
    })
  }
}

enum LocalKind {
  Value(LocalInstance),
  Factory(LocalFactory),
}

/// A registration for a [`LocalRegistry`].
///
/// The single-threaded counterpart of [`Definition`](crate::Definition):
/// values are kept behind `Rc` and factories need not be `Send` or `Sync`.
pub struct LocalDefinition {
  kind: LocalKind,
}

impl LocalDefinition {
  pub fn value<T: Any>(value: T) -> Self {
    Self::rc(Rc::new(value))
  }

  pub fn rc<T: ?Sized + Any>(value: Rc<T>) -> Self {
    Self {
      kind: LocalKind::Value(Box::new(value)),
    }
  }

  pub fn factory<T: Any, F>(factory: F) -> Self
  where
    F: Fn(&LocalRegistry) -> T + 'static,
  {
    Self::factory_rc(move |registry| Rc::new(factory(registry)))
  }

  pub fn factory_rc<T: ?Sized + Any, F>(factory: F) -> Self
  where
    F: Fn(&LocalRegistry) -> Rc<T> + 'static,
  {
    let call = Rc::new(
      move |registry: &LocalRegistry, _args: Box<dyn Any>| -> Option<LocalInstance> {
        Some(Box::new(factory(registry)) as LocalInstance)
      },
    );
    Self {
      kind: LocalKind::Factory(LocalFactory { call, args: None }),
    }
  }

  pub fn configurable<T: Any, A: Any, F>(factory: F) -> Self
  where
    F: Fn(&LocalRegistry, A) -> T + 'static,
  {
    let call = Rc::new(
      move |registry: &LocalRegistry, args: Box<dyn Any>| -> Option<LocalInstance> {
        let args = args.downcast::<A>().ok()?;
        Some(Box::new(Rc::new(factory(registry, *args))) as LocalInstance)
      },
    );
    Self {
      kind: LocalKind::Factory(LocalFactory {
        call,
        args: Some(type_name::<A>()),
      }),
    }
  }

  pub fn is_configurable(&self) -> bool {
    matches!(&self.kind, LocalKind::Factory(factory) if factory.args.is_some())
  }
}

enum LocalBinding {
  Instance(LocalInstance),
  Shared {
    cell: OnceCell<LocalInstance>,
    factory: LocalFactory,
  },
  Transient(LocalFactory),
}

/// A single-threaded dependency-injection registry.
///
/// It follows the same rules as [`Registry`](crate::Registry) but stores
/// `Rc` handles in a plain `HashMap`, so it can hold types that are neither
/// `Send` nor `Sync`.
///
/// # Note on API
///
/// Registration takes `&mut self`. Factories receive `&LocalRegistry` and
/// can resolve other entries, but can not register new ones.
#[derive(Default)]
pub struct LocalRegistry {
  bindings: HashMap<Identifier, LocalBinding>,
}

impl LocalRegistry {
  /// Creates a new, empty `LocalRegistry`.
  pub fn new() -> Self {
    Self::default()
  }

  // --- Registration ---

  pub fn register(
    &mut self,
    name: impl Into<Identifier>,
    definition: LocalDefinition,
    shared: bool,
  ) -> Result<()> {
    let vacant = match self.bindings.entry(name.into()) {
      Entry::Occupied(occupied) => {
        tracing::warn!(name = %occupied.key(), "identifier is already bound");
        return Err(RegistryError::Overwrite {
          name: occupied.key().to_string(),
        });
      }
      Entry::Vacant(vacant) => vacant,
    };

    let binding = match definition.kind {
      LocalKind::Value(instance) => LocalBinding::Instance(instance),
      LocalKind::Factory(factory) if factory.args.is_some() && shared => {
        tracing::warn!(name = %vacant.key(), "rejected shared configurable factory");
        return Err(RegistryError::ConfigurableShared);
      }
      LocalKind::Factory(factory) if shared => LocalBinding::Shared {
        cell: OnceCell::new(),
        factory,
      },
      LocalKind::Factory(factory) => LocalBinding::Transient(factory),
    };
    tracing::debug!(name = %vacant.key(), shared, "registered local binding");
    vacant.insert(binding);
    Ok(())
  }

  pub fn add_value<T: Any>(&mut self, name: impl Into<Identifier>, value: T) -> Result<()> {
    self.register(name, LocalDefinition::value(value), false)
  }

  pub fn add_factory<T: Any>(
    &mut self,
    name: impl Into<Identifier>,
    factory: impl Fn(&LocalRegistry) -> T + 'static,
  ) -> Result<()> {
    self.register(name, LocalDefinition::factory(factory), false)
  }

  pub fn add_shared<T: Any>(
    &mut self,
    name: impl Into<Identifier>,
    factory: impl Fn(&LocalRegistry) -> T + 'static,
  ) -> Result<()> {
    self.register(name, LocalDefinition::factory(factory), true)
  }

  pub fn add_shared_rc<T: ?Sized + Any>(
    &mut self,
    name: impl Into<Identifier>,
    factory: impl Fn(&LocalRegistry) -> Rc<T> + 'static,
  ) -> Result<()> {
    self.register(name, LocalDefinition::factory_rc(factory), true)
  }

  pub fn add_configurable<T: Any, A: Any>(
    &mut self,
    name: impl Into<Identifier>,
    factory: impl Fn(&LocalRegistry, A) -> T + 'static,
  ) -> Result<()> {
    self.register(name, LocalDefinition::configurable(factory), false)
  }

  // --- Resolution ---

  pub fn get<T: ?Sized + Any>(&self, name: impl Into<Identifier>) -> Result<Rc<T>> {
    self.get_with(name, ())
  }

  /// Resolves `name`, forwarding `args` to a configurable factory.
  pub fn get_with<T: ?Sized + Any, A: Any>(
    &self,
    name: impl Into<Identifier>,
    args: A,
  ) -> Result<Rc<T>> {
    let name = name.into();
    let binding = self
      .bindings
      .get(&name)
      .ok_or_else(|| RegistryError::UndefinedName {
        name: name.to_string(),
      })?;

    match binding {
      LocalBinding::Instance(instance) => downcast_ref::<T>(&name, instance),
      LocalBinding::Shared { cell, factory } => {
        let instance = match cell.get() {
          Some(instance) => instance,
          None => {
            let _guard = ResolutionGuard::enter(self.address(), &name)?;
            let instance = cell.get_or_try_init(|| factory.invoke(self, &name, Box::new(())))?;
            tracing::debug!(name = %name, "promoted shared instance");
            instance
          }
        };
        downcast_ref::<T>(&name, instance)
      }
      LocalBinding::Transient(factory) => {
        let _guard = ResolutionGuard::enter(self.address(), &name)?;
        factory
          .invoke(self, &name, Box::new(args))?
          .downcast::<Rc<T>>()
          .map(|boxed| *boxed)
          .map_err(|_| type_mismatch::<T>(&name))
      }
    }
  }

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
    let mut names: Vec<Identifier> = self.bindings.keys().cloned().collect();
    names.sort();
    names
  }

  fn address(&self) -> usize {
    self as *const Self as usize
  }
}

fn downcast_ref<T: ?Sized + Any>(name: &Identifier, instance: &LocalInstance) -> Result<Rc<T>> {
  instance
    .downcast_ref::<Rc<T>>()
    .cloned()
    .ok_or_else(|| type_mismatch::<T>(name))
}
