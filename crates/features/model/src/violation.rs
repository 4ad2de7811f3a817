use std::fmt;

/// A single symbol-level edge, `source` referencing `target`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SymbolReference {
    pub source: String,
    pub target: String,
}

impl SymbolReference {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self { source: source.into(), target: target.into() }
    }
}

impl fmt::Display for SymbolReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source, self.target)
    }
}

/// One hop of a cycle together with the symbol references that create it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleEdge {
    pub from: String,
    pub to: String,
    /// At most [`crate::MAX_WITNESSES_PER_EDGE`] references, in discovery order.
    pub witnesses: Vec<SymbolReference>,
}

/// A dependency cycle between modules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleViolation {
    /// Module names in traversal order; the last one depends on the first.
    pub cycle: Vec<String>,
    pub edges: Vec<CycleEdge>,
}

impl CycleViolation {
    pub fn contains(&self, module: &str) -> bool {
        self.cycle.iter().any(|name| name == module)
    }
}

impl fmt::Display for CycleViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cycle detected: {}", self.cycle.join(" -> "))?;
        if let Some(first) = self.cycle.first() {
            write!(f, " -> {first}")?;
        }
        for edge in &self.edges {
            write!(f, "\n    {} -> {}:", edge.from, edge.to)?;
            for witness in &edge.witnesses {
                write!(f, "\n      {witness}")?;
            }
        }
        Ok(())
    }
}

/// A module depending on a module outside its declared allow-list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyViolation {
    pub module: String,
    pub target_module: String,
    pub reference: SymbolReference,
    pub allowed: Vec<String>,
}

impl fmt::Display for DependencyViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Module '{}' depends on non-allowed module '{}' via {} (allowed: [{}])",
            self.module,
            self.target_module,
            self.reference,
            self.allowed.join(", ")
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    Cycle(CycleViolation),
    Dependency(DependencyViolation),
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cycle(cycle) => cycle.fmt(f),
            Self::Dependency(dependency) => dependency.fmt(f),
        }
    }
}

impl From<CycleViolation> for Violation {
    fn from(value: CycleViolation) -> Self {
        Self::Cycle(value)
    }
}

impl From<DependencyViolation> for Violation {
    fn from(value: DependencyViolation) -> Self {
        Self::Dependency(value)
    }
}

/// Every violation found by a single verification run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "Architecture verification failed with {} violation(s):{}",
    .violations.len(),
    render(.violations)
)]
pub struct VerificationError {
    violations: Vec<Violation>,
}

impl VerificationError {
    pub(crate) const fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn cycles(&self) -> impl Iterator<Item = &CycleViolation> {
        self.violations.iter().filter_map(|violation| match violation {
            Violation::Cycle(cycle) => Some(cycle),
            Violation::Dependency(_) => None,
        })
    }

    pub fn dependency_violations(&self) -> impl Iterator<Item = &DependencyViolation> {
        self.violations.iter().filter_map(|violation| match violation {
            Violation::Dependency(dependency) => Some(dependency),
            Violation::Cycle(_) => None,
        })
    }

    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }
}

fn render(violations: &[Violation]) -> String {
    violations.iter().map(|violation| format!("\n  - {violation}")).collect()
}
