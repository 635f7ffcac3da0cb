use thiserror::Error;

/// The error type for every registry operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
  /// The identifier is already bound to a value or a factory.
  #[error("Name \"{name}\" is already in use")]
  Overwrite { name: String },

  /// Nothing is bound to the identifier.
  #[error("Unable to resolve \"{name}\"")]
  UndefinedName { name: String },

  /// A factory taking arguments was registered with `shared = true`.
  #[error("Configurable services can not be shared")]
  ConfigurableShared,

  /// The bound object is not of the requested type.
  #[error("Service \"{name}\" is not of type {expected}")]
  TypeMismatch { name: String, expected: &'static str },

  /// A configurable factory received arguments of another type.
  #[error("Service \"{name}\" expects arguments of type {expected}")]
  ArgumentMismatch { name: String, expected: &'static str },

  /// A factory asked, directly or through others, for its own identifier.
  #[error("Circular dependency detected while resolving \"{name}\"")]
  CircularDependency { name: String },
}

impl RegistryError {
  /// The identifier the error refers to, if it carries one.
  pub fn name(&self) -> Option<&str> {
    match self {
      RegistryError::Overwrite { name }
      | RegistryError::UndefinedName { name }
      | RegistryError::TypeMismatch { name, .. }
      | RegistryError::ArgumentMismatch { name, .. }
      | RegistryError::CircularDependency { name } => Some(name),
      RegistryError::ConfigurableShared => None,
    }
  }
}

/// A specialized `Result` type for registry operations.
pub type Result<T, E = RegistryError> = std::result::Result<T, E>;
