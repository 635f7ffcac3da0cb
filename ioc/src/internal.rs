//! Core, non-public data structures for the registries.

use crate::error::{RegistryError, Result};
use crate::identifier::Identifier;
use crate::registry::Registry;
use once_cell::sync::OnceCell;
use std::any::Any;
use std::cell::RefCell;
use std::collections::HashSet;
use std::sync::Arc;

thread_local! {
  // The identifiers whose factories are running on this thread, each tagged
  // with the address of the registry that is running them.
  static RESOLVING: RefCell<HashSet<(usize, Identifier)>> = RefCell::new(HashSet::new());
}

/// An RAII guard that marks an identifier as being resolved.
///
/// Entering an identifier that is already marked on the current thread means
/// a factory asked for itself, directly or through other factories.
pub(crate) struct ResolutionGuard {
  key: (usize, Identifier),
}

impl ResolutionGuard {
  pub(crate) fn enter(owner: usize, name: &Identifier) -> Result<Self> {
    let key = (owner, name.clone());
    let inserted = RESOLVING.with(|resolving| resolving.borrow_mut().insert(key.clone()));
    if !inserted {
      tracing::warn!(name = %name, "circular dependency detected");
      return Err(RegistryError::CircularDependency {
        name: name.to_string(),
      });
    }
    Ok(Self { key })
  }
}

impl Drop for ResolutionGuard {
  fn drop(&mut self) {
    RESOLVING.with(|resolving| {
      resolving.borrow_mut().remove(&self.key);
    });
  }
}

/// A resolved object. Always holds an `Arc<T>` so that `T` may be unsized.
pub(crate) type Instance = Box<dyn Any + Send + Sync>;

pub(crate) type Call = dyn Fn(&Registry, Box<dyn Any>) -> Option<Instance> + Send + Sync;

/// A type-erased factory.
///
/// `call` returns `None` when the forwarded arguments are not of the type the
/// factory was declared with.
#[derive(Clone)]
pub(crate) struct Factory {
  call: Arc<Call>,
  args: Option<&'static str>,
}

impl Factory {
  pub(crate) fn simple(call: Arc<Call>) -> Self {
    Self { call, args: None }
  }

  pub(crate) fn configurable(call: Arc<Call>, args: &'static str) -> Self {
    Self {
      call,
      args: Some(args),
    }
  }

  pub(crate) fn is_configurable(&self) -> bool {
    self.args.is_some()
  }

  pub(crate) fn invoke(
    &self,
    registry: &Registry,
    name: &Identifier,
    args: Box<dyn Any>,
  ) -> Result<Instance> {
    (self.call)(registry, args).ok_or_else(|| RegistryError::ArgumentMismatch {
      name: name.to_string(),
      expected: self.args.unwrap_or("()"),
    })
  }
}

/// What an identifier is bound to inside a [`Registry`].
pub(crate) enum Binding {
  Instance(Instance),
  Shared {
    cell: Arc<OnceCell<Instance>>,
    factory: Factory,
  },
  Transient(Factory),
}

pub(crate) fn type_mismatch<T: ?Sized>(name: &Identifier) -> RegistryError {
  RegistryError::TypeMismatch {
    name: name.to_string(),
    expected: std::any::type_name::<T>(),
  }
}
