//! What can be registered: values and factories.

use crate::internal::{Factory, Instance};
use crate::registry::Registry;
use std::any::{type_name, Any};
use std::sync::Arc;

pub(crate) enum Kind {
  Value(Instance),
  Factory(Factory),
}

/// A registration for a [`Registry`].
///
/// A definition is either a value, returned as the same `Arc` on every
/// resolution, or a factory receiving the registry it is resolved from.
/// Factories built with [`Definition::configurable`] take one extra argument
/// object forwarded from [`Registry::get_with`] and can not be shared.
pub struct Definition {
  pub(crate) kind: Kind,
}

impl Definition {
  pub fn value<T: Any + Send + Sync>(value: T) -> Self {
    Self::arc(Arc::new(value))
  }

  /// A value that is already behind an `Arc`, such as an `Arc<dyn Trait>`.
  pub fn arc<T: ?Sized + Any + Send + Sync>(value: Arc<T>) -> Self {
    Self {
      kind: Kind::Value(Box::new(value)),
    }
  }

  pub fn factory<T, F>(factory: F) -> Self
  where
    T: Any + Send + Sync,
    F: Fn(&Registry) -> T + Send + Sync + 'static,
  {
    Self::factory_arc(move |registry| Arc::new(factory(registry)))
  }

  /// A factory producing `Arc<T>` directly, for trait-object services.
  pub fn factory_arc<T, F>(factory: F) -> Self
  where
    T: ?Sized + Any + Send + Sync,
    F: Fn(&Registry) -> Arc<T> + Send + Sync + 'static,
  {
    let call = Arc::new(move |registry: &Registry, _args: Box<dyn Any>| -> Option<Instance> {
      Some(Box::new(factory(registry)) as Instance)
    });
    Self {
      kind: Kind::Factory(Factory::simple(call)),
    }
  }

  /// A factory taking an argument object of type `A` besides the registry.
  pub fn configurable<T, A, F>(factory: F) -> Self
  where
    T: Any + Send + Sync,
    A: Any,
    F: Fn(&Registry, A) -> T + Send + Sync + 'static,
  {
    let call = Arc::new(move |registry: &Registry, args: Box<dyn Any>| -> Option<Instance> {
      let args = args.downcast::<A>().ok()?;
      Some(Box::new(Arc::new(factory(registry, *args))) as Instance)
    });
    Self {
      kind: Kind::Factory(Factory::configurable(call, type_name::<A>())),
    }
  }

  pub fn is_factory(&self) -> bool {
    matches!(self.kind, Kind::Factory(_))
  }

  /// Whether the factory takes arguments beyond the registry.
  pub fn is_configurable(&self) -> bool {
    match &self.kind {
      Kind::Factory(factory) => factory.is_configurable(),
      Kind::Value(_) => false,
    }
  }
}
