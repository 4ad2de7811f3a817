use crate::error::ExecutionError;
use crate::execution::ModuleTestExecution;
use crate::finder::ConfigurationFinder;
use fxhash::FxHashMap;
use modulith_domain::config::ModuleTestConfig;
use modulith_symbols::SymbolImporter;
use parking_lot::{Mutex, RwLock};
use std::sync::{Arc, OnceLock};
use tracing::{debug, trace};

type Slot = Arc<Mutex<Option<Arc<ModuleTestExecution>>>>;

static GLOBAL: OnceLock<ExecutionRegistry> = OnceLock::new();

/// Caches one [`ModuleTestExecution`] per anchor.
///
/// The map lock is only held to find or create an anchor's slot; construction runs under the
/// slot's own lock, so concurrent requests for the same anchor build it once while different
/// anchors proceed independently. Failed constructions leave the slot empty.
#[derive(Debug, Clone, Default)]
pub struct ExecutionRegistry {
    slots: Arc<RwLock<FxHashMap<String, Slot>>>,
}

impl ExecutionRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry.
    pub fn global() -> &'static Self {
        GLOBAL.get_or_init(Self::new)
    }

    fn slot(&self, anchor: &str) -> Slot {
        if let Some(slot) = self.slots.read().get(anchor) {
            return Arc::clone(slot);
        }
        Arc::clone(self.slots.write().entry(anchor.to_owned()).or_default())
    }

    /// Whether `slot` is still the one registered for `anchor`.
    fn is_current(&self, anchor: &str, slot: &Slot) -> bool {
        self.slots.read().get(anchor).is_some_and(|current| Arc::ptr_eq(current, slot))
    }

    /// The cached execution for `anchor`, if one was built.
    pub fn get(&self, anchor: &str) -> Option<Arc<ModuleTestExecution>> {
        let slot = self.slots.read().get(anchor).cloned()?;
        slot.lock().clone()
    }

    /// Returns the cached execution for `anchor` or builds it with `init`.
    ///
    /// A slot detached by [`ExecutionRegistry::remove`] while this call waited on it is never
    /// filled; the call starts over on the anchor's current slot.
    ///
    /// # Errors
    /// Propagates the error of `init`; nothing is cached in that case.
    pub fn get_or_try_init<F>(
        &self,
        anchor: &str,
        init: F,
    ) -> Result<Arc<ModuleTestExecution>, ExecutionError>
    where
        F: FnOnce() -> Result<ModuleTestExecution, ExecutionError>,
    {
        loop {
            let slot = self.slot(anchor);
            let mut guard = slot.lock();

            if !self.is_current(anchor, &slot) {
                trace!(anchor, "Slot removed while waiting, retrying");
                continue;
            }
            if let Some(execution) = guard.as_ref() {
                trace!(anchor, "Reusing module test execution");
                return Ok(Arc::clone(execution));
            }

            let execution = Arc::new(init()?);
            *guard = Some(Arc::clone(&execution));
            debug!(anchor, module = %execution.module().name(), "Registered module test execution");

            return Ok(execution);
        }
    }

    /// Finds the configuration of `anchor` and builds (or reuses) its execution.
    ///
    /// # Errors
    /// Returns the finder's error or any [`ModuleTestExecution::new`] failure.
    pub fn execution_for(
        &self,
        anchor: &str,
        finder: &dyn ConfigurationFinder,
        test_config: ModuleTestConfig,
        importer: &dyn SymbolImporter,
    ) -> Result<Arc<ModuleTestExecution>, ExecutionError> {
        self.get_or_try_init(anchor, || {
            let config = finder.find(anchor)?;
            ModuleTestExecution::new(anchor, &config, test_config, importer)
        })
    }

    /// Drops the cached execution for `anchor`.
    ///
    /// Waits for a construction in flight for `anchor` and removes its result.
    pub fn remove(&self, anchor: &str) -> Option<Arc<ModuleTestExecution>> {
        let slot = self.slots.read().get(anchor).cloned()?;
        let mut guard = slot.lock();

        let mut slots = self.slots.write();
        if slots.get(anchor).is_some_and(|current| Arc::ptr_eq(current, &slot)) {
            slots.remove(anchor);
        }
        drop(slots);

        guard.take()
    }

    /// Number of anchors with a built execution.
    pub fn len(&self) -> usize {
        let slots: Vec<Slot> = self.slots.read().values().cloned().collect();
        slots.iter().filter(|slot| slot.lock().is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_initialization_is_not_cached() {
        let registry = ExecutionRegistry::new();

        let first = registry.get_or_try_init("com.acme.orders.OrderTests", || {
            Err(ExecutionError::configuration("boom"))
        });

        assert!(first.is_err());
        assert!(registry.get("com.acme.orders.OrderTests").is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_global_registry_is_shared() {
        assert!(std::ptr::eq(ExecutionRegistry::global(), ExecutionRegistry::global()));
    }
}
