use crate::error::{ExecutionError, ExecutionErrorExt};
use modulith_domain::config::ModulithConfig;
use modulith_domain::namespace::Namespace;
use modulith_kernel::config::load_config;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Locates the modulith root declaration responsible for a test anchor.
pub trait ConfigurationFinder: Send + Sync {
    /// # Errors
    /// Returns [`ExecutionError::Configuration`] if no declaration covers `anchor`.
    fn find(&self, anchor: &str) -> Result<ModulithConfig, ExecutionError>;
}

/// A finder over a fixed set of declarations.
///
/// The declaration whose base namespace is the closest enclosing namespace of the anchor wins,
/// mirroring a walk up the namespace hierarchy from the anchor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StaticConfigurationFinder {
    #[serde(default)]
    configurations: Vec<ModulithConfig>,
}

impl StaticConfigurationFinder {
    pub fn new(configurations: impl IntoIterator<Item = ModulithConfig>) -> Self {
        Self { configurations: configurations.into_iter().collect() }
    }

    #[must_use]
    pub fn register(mut self, configuration: ModulithConfig) -> Self {
        self.configurations.push(configuration);
        self
    }

    /// Loads declarations from a file listing them under `configurations`.
    ///
    /// # Errors
    /// Returns [`ExecutionError::Settings`] if the file is missing or malformed.
    pub fn load(path: Option<impl AsRef<Path>>) -> Result<Self, ExecutionError> {
        let finder: Self = load_config(path).context("Loading configuration registrations")?;
        Ok(finder)
    }

    pub fn len(&self) -> usize {
        self.configurations.len()
    }
}

impl ConfigurationFinder for StaticConfigurationFinder {
    fn find(&self, anchor: &str) -> Result<ModulithConfig, ExecutionError> {
        let found = self
            .configurations
            .iter()
            .filter_map(|config| {
                let base = Namespace::new(&config.base_namespace).ok()?;
                base.contains(anchor).then(|| (base.depth(), config))
            })
            .max_by_key(|(depth, _)| *depth)
            .map(|(_, config)| config.clone());

        debug!(anchor, found = found.is_some(), "Looked up modulith configuration");

        found.ok_or_else(|| {
            ExecutionError::configuration(format!("No modulith configuration encloses '{anchor}'"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closest_enclosing_declaration_wins() {
        let finder = StaticConfigurationFinder::default()
            .register(ModulithConfig::new("com.acme"))
            .register(ModulithConfig::new("com.acme.platform"))
            .register(ModulithConfig::new("com.acmex"));

        let found = finder.find("com.acme.platform.billing.InvoiceTests").unwrap();
        assert_eq!(found.base_namespace, "com.acme.platform");

        let found = finder.find("com.acme.orders.OrderTests").unwrap();
        assert_eq!(found.base_namespace, "com.acme");
    }

    #[test]
    fn test_unrelated_anchor_is_a_configuration_error() {
        let finder = StaticConfigurationFinder::new([ModulithConfig::new("com.acme")]);

        let err = finder.find("org.other.Tests").unwrap_err();
        assert!(matches!(err, ExecutionError::Configuration { .. }));
    }
}
