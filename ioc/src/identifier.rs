//! Registry keys and fully-qualified-name derivation.

use std::any::{type_name, type_name_of_val};
use std::fmt;

/// The string key an entry is stored under.
///
/// Plain strings convert unchanged. Types and functions can be turned into
/// a `"<module>.<name>"` key with [`Identifier::of`] and [`Identifier::of_val`].
///
/// ```
/// use pollen::Identifier;
///
/// struct Mailer;
///
/// assert!(Identifier::of::<Mailer>().as_str().ends_with(".Mailer"));
/// assert_eq!(Identifier::from("mailer").as_str(), "mailer");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier(String);

impl Identifier {
  pub fn new(name: impl Into<String>) -> Self {
    Self(name.into())
  }

  /// Derives the identifier of a type from its module path and local name.
  ///
  /// Only path types are rewritten. Names of compound types such as tuples,
  /// references or `dyn Trait` are kept as `type_name` reports them.
  pub fn of<T: ?Sized>() -> Self {
    Self::qualify(type_name::<T>())
  }

  /// Derives the identifier of a value from the name of its type.
  ///
  /// Function items have a type of their own named after the function, so
  /// `Identifier::of_val(&make_pool)` yields `"<module>.make_pool"`. Closures
  /// do not get distinct names and should be registered under a string.
  pub fn of_val<T: ?Sized>(value: &T) -> Self {
    Self::qualify(type_name_of_val(value))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  // Replaces the separator in front of the local name with a dot. Generic
  // arguments are left alone, and anything that is not a plain path is kept.
  fn qualify(path: &str) -> Self {
    let head = path.find('<').map_or(path, |end| &path[..end]);
    let is_path = head
      .chars()
      .all(|c| c.is_alphanumeric() || c == '_' || c == ':');
    if !is_path {
      return Self(path.to_owned());
    }
    match head.rfind("::") {
      Some(split) => Self(format!("{}.{}", &path[..split], &path[split + 2..])),
      None => Self(path.to_owned()),
    }
  }
}

impl fmt::Display for Identifier {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl fmt::Debug for Identifier {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Identifier({})", self.0)
  }
}

impl AsRef<str> for Identifier {
  fn as_ref(&self) -> &str {
    &self.0
  }
}

impl From<&str> for Identifier {
  fn from(name: &str) -> Self {
    Self(name.to_owned())
  }
}

impl From<String> for Identifier {
  fn from(name: String) -> Self {
    Self(name)
  }
}

impl From<&String> for Identifier {
  fn from(name: &String) -> Self {
    Self(name.clone())
  }
}

impl From<&Identifier> for Identifier {
  fn from(name: &Identifier) -> Self {
    name.clone()
  }
}
