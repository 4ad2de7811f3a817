use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

const SEPARATOR: char = '.';

/// A dotted namespace path such as `com.acme.orders`.
///
/// Containment is always evaluated on whole segments: `com.acme.orders` contains
/// `com.acme.orders.internal.Foo` but not `com.acme.ordersx.Bar`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Namespace(String);

impl Namespace {
    /// Parses and validates a namespace.
    ///
    /// # Errors
    /// Returns [`DomainError::InvalidNamespace`] for empty input, empty segments
    /// (`com..acme`, `.com`, `com.`) or segments containing whitespace.
    pub fn new(value: impl AsRef<str>) -> Result<Self, DomainError> {
        let value = value.as_ref().trim();

        if value.is_empty() {
            return Err(DomainError::InvalidNamespace {
                message: "EMPTY".into(),
                context: Some("Namespace cannot be empty".into()),
            });
        }

        for segment in value.split(SEPARATOR) {
            if segment.is_empty() {
                return Err(DomainError::InvalidNamespace {
                    message: value.to_owned().into(),
                    context: Some("Namespace contains an empty segment".into()),
                });
            }
            if segment.chars().any(char::is_whitespace) {
                return Err(DomainError::InvalidNamespace {
                    message: value.to_owned().into(),
                    context: Some("Namespace contains whitespace".into()),
                });
            }
        }

        Ok(Self(value.to_owned()))
    }

    /// Namespace portion of a fully qualified type name, `None` for types in the default namespace.
    pub fn of_type(fully_qualified_name: &str) -> Option<Self> {
        fully_qualified_name
            .rsplit_once(SEPARATOR)
            .and_then(|(namespace, _)| Self::new(namespace).ok())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split(SEPARATOR)
    }

    pub fn last_segment(&self) -> &str {
        self.0.rsplit_once(SEPARATOR).map_or(self.0.as_str(), |(_, last)| last)
    }

    pub fn depth(&self) -> usize {
        self.segments().count()
    }

    pub fn parent(&self) -> Option<Self> {
        self.0.rsplit_once(SEPARATOR).map(|(parent, _)| Self(parent.to_owned()))
    }

    /// Whether `name` (a namespace or a fully qualified type name) equals this namespace or
    /// lies below it.
    pub fn contains(&self, name: &str) -> bool {
        name.strip_prefix(self.0.as_str())
            .is_some_and(|rest| rest.is_empty() || rest.starts_with(SEPARATOR))
    }

    pub fn contains_namespace(&self, other: &Self) -> bool {
        self.contains(other.as_str())
    }

    /// Whether this namespace sits exactly one segment below `parent`.
    pub fn is_direct_child_of(&self, parent: &Self) -> bool {
        self.parent().as_ref() == Some(parent)
    }

    /// The ancestor (or self) located exactly one segment below `root`, if `self` lies under it.
    pub fn child_below(&self, root: &Self) -> Option<Self> {
        let rest = self.0.strip_prefix(root.as_str())?.strip_prefix(SEPARATOR)?;
        let segment = rest.split(SEPARATOR).next()?;
        Some(Self(format!("{root}{SEPARATOR}{segment}")))
    }
}

impl TryFrom<String> for Namespace {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, DomainError> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Namespace {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, DomainError> {
        Self::new(value)
    }
}

impl From<Namespace> for String {
    fn from(value: Namespace) -> Self {
        value.0
    }
}

impl AsRef<str> for Namespace {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
