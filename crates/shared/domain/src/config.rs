use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// How module names are derived from their base namespace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamingMode {
    /// Last namespace segment (`com.acme.orders` -> `orders`).
    #[default]
    Simple,
    /// The full namespace (`com.acme.orders`).
    FullyQualified,
}

/// Number of module hops to follow when computing a dependency closure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DependencyDepth {
    Limited(usize),
    Unbounded,
}

impl DependencyDepth {
    pub const NONE: Self = Self::Limited(0);
    pub const DIRECT: Self = Self::Limited(1);

    pub const fn is_zero(self) -> bool {
        matches!(self, Self::Limited(0))
    }

    /// Whether a module discovered at `hops` distance lies inside this depth.
    pub const fn admits(self, hops: usize) -> bool {
        match self {
            Self::Limited(max) => hops <= max,
            Self::Unbounded => true,
        }
    }
}

impl fmt::Display for DependencyDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Limited(depth) => write!(f, "{depth}"),
            Self::Unbounded => f.write_str("unbounded"),
        }
    }
}

/// Policy for narrowing a module test's bootstrap scope.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BootstrapMode {
    /// Only the module under test.
    #[default]
    StandAlone,
    /// The module and the modules it references directly.
    DirectDependencies,
    /// The module and everything it transitively references.
    AllDependencies,
}

impl BootstrapMode {
    pub const fn depth(self) -> DependencyDepth {
        match self {
            Self::StandAlone => DependencyDepth::NONE,
            Self::DirectDependencies => DependencyDepth::DIRECT,
            Self::AllDependencies => DependencyDepth::Unbounded,
        }
    }
}

impl fmt::Display for BootstrapMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::StandAlone => "stand_alone",
            Self::DirectDependencies => "direct_dependencies",
            Self::AllDependencies => "all_dependencies",
        })
    }
}

/// Declarations attached to a single module, keyed by its base namespace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModuleConfig {
    /// Names of modules this module may depend on. `None` (or empty) means unrestricted.
    pub allowed_dependencies: Option<Vec<String>>,
}

/// Root declaration of a modular codebase.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModulithConfig {
    /// Namespace of the root declaration; its direct children become modules.
    pub base_namespace: String,
    /// Further roots whose direct children also become modules.
    pub additional_namespaces: Vec<String>,
    pub naming: NamingMode,
    /// Namespaces (or fully qualified names) excluded from import.
    pub ignored: Vec<String>,
    /// Per-module declarations keyed by module base namespace.
    pub modules: BTreeMap<String, ModuleConfig>,
}

impl ModulithConfig {
    pub fn new(base_namespace: impl Into<String>) -> Self {
        Self { base_namespace: base_namespace.into(), ..Self::default() }
    }

    #[must_use]
    pub fn additional_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.additional_namespaces.push(namespace.into());
        self
    }

    #[must_use]
    pub const fn naming(mut self, naming: NamingMode) -> Self {
        self.naming = naming;
        self
    }

    #[must_use]
    pub fn ignore(mut self, name: impl Into<String>) -> Self {
        self.ignored.push(name.into());
        self
    }

    /// Declares the allowed dependencies of the module rooted at `base_namespace`.
    #[must_use]
    pub fn allow<I, S>(mut self, base_namespace: impl Into<String>, dependencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let allowed = dependencies.into_iter().map(Into::into).collect();
        self.modules.entry(base_namespace.into()).or_default().allowed_dependencies = Some(allowed);
        self
    }

    /// Base namespace followed by additional namespaces, duplicates removed, order kept.
    pub fn root_namespaces(&self) -> Vec<String> {
        let mut roots: Vec<String> = Vec::with_capacity(1 + self.additional_namespaces.len());
        for namespace in std::iter::once(&self.base_namespace).chain(&self.additional_namespaces) {
            let namespace = namespace.trim();
            if !roots.iter().any(|existing| existing == namespace) {
                roots.push(namespace.to_owned());
            }
        }
        roots
    }

    pub fn allowed_dependencies(&self, base_namespace: &str) -> Option<&[String]> {
        self.modules.get(base_namespace).and_then(|module| module.allowed_dependencies.as_deref())
    }
}

/// Settings of a single module test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModuleTestConfig {
    pub mode: BootstrapMode,
    pub verify_automatically: bool,
}

impl Default for ModuleTestConfig {
    fn default() -> Self {
        Self { mode: BootstrapMode::StandAlone, verify_automatically: true }
    }
}

impl ModuleTestConfig {
    pub const fn new(mode: BootstrapMode) -> Self {
        Self { mode, verify_automatically: true }
    }

    #[must_use]
    pub const fn verify_automatically(mut self, enabled: bool) -> Self {
        self.verify_automatically = enabled;
        self
    }
}
