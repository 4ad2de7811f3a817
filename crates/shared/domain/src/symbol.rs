use serde::{Deserialize, Serialize};

/// Where a symbol was compiled from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolOrigin {
    #[default]
    Production,
    Test,
}

/// A type known to the analyzed codebase together with its outgoing references.
///
/// `namespace` may be left empty in snapshots; [`Symbol::normalized`] derives it from `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Symbol {
    /// Fully qualified name, e.g. `com.acme.orders.Order`.
    pub name: String,
    #[serde(default)]
    pub namespace: String,
    /// Fully qualified names of symbols this one uses.
    #[serde(default)]
    pub references: Vec<String>,
    /// Fully qualified names of extended types and implemented interfaces.
    #[serde(default)]
    pub supertypes: Vec<String>,
    #[serde(default)]
    pub origin: SymbolOrigin,
}

impl Symbol {
    /// Creates a production symbol without references.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let namespace = namespace_of(&name).to_owned();
        Self {
            name,
            namespace,
            references: Vec::new(),
            supertypes: Vec::new(),
            origin: SymbolOrigin::Production,
        }
    }

    #[must_use]
    pub fn referencing<I, S>(mut self, targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.references.extend(targets.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn extending<I, S>(mut self, supertypes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.supertypes.extend(supertypes.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub const fn with_origin(mut self, origin: SymbolOrigin) -> Self {
        self.origin = origin;
        self
    }

    /// Fills in a missing namespace from the fully qualified name.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        if self.namespace.is_empty() {
            self.namespace = namespace_of(&self.name).to_owned();
        }
        self
    }

    pub fn simple_name(&self) -> &str {
        self.name.rsplit_once('.').map_or(self.name.as_str(), |(_, simple)| simple)
    }

    pub fn is_test(&self) -> bool {
        self.origin == SymbolOrigin::Test
    }

    /// Every outgoing dependency: plain references followed by supertypes.
    pub fn dependencies(&self) -> impl Iterator<Item = &str> {
        self.references.iter().chain(&self.supertypes).map(String::as_str)
    }
}

fn namespace_of(name: &str) -> &str {
    name.rsplit_once('.').map_or("", |(namespace, _)| namespace)
}
