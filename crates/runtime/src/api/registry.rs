//! Provider registry for managing action providers.
//!
//! Providers are registered per [`Controller`]; individual combatants can be
//! bound to a specific provider, which takes precedence over their
//! controller's provider.

use std::collections::HashMap;
use std::sync::Arc;

use encounter_core::{CombatantId, Controller};

use super::{ActionProvider, Result, RuntimeError};

/// Registry mapping controllers and combatants to action providers.
///
/// # Resolution Order
///
/// 1. A provider bound to the combatant itself
/// 2. The provider registered for the combatant's controller
#[derive(Default)]
pub struct ProviderRegistry {
    /// Arc so a provider can be cloned out and awaited without holding the registry.
    by_controller: HashMap<Controller, Arc<dyn ActionProvider>>,
    by_combatant: HashMap<CombatantId, Arc<dyn ActionProvider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the provider for every combatant with `controller`.
    ///
    /// Replaces any previous provider for that controller.
    pub fn register(&mut self, controller: Controller, provider: impl ActionProvider + 'static) {
        self.by_controller.insert(controller, Arc::new(provider));
    }

    /// Bind one combatant to its own provider.
    pub fn bind(&mut self, combatant: CombatantId, provider: impl ActionProvider + 'static) {
        self.by_combatant.insert(combatant, Arc::new(provider));
    }

    /// Remove a combatant binding, reverting it to its controller's provider.
    pub fn unbind(&mut self, combatant: CombatantId) -> bool {
        self.by_combatant.remove(&combatant).is_some()
    }

    pub fn has(&self, controller: Controller) -> bool {
        self.by_controller.contains_key(&controller)
    }

    /// Resolve the provider for a combatant.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::ProviderNotSet`] if neither a binding nor a
    /// controller provider exists.
    pub fn resolve(
        &self,
        combatant: CombatantId,
        controller: Controller,
    ) -> Result<Arc<dyn ActionProvider>> {
        self.by_combatant
            .get(&combatant)
            .or_else(|| self.by_controller.get(&controller))
            .cloned()
            .ok_or(RuntimeError::ProviderNotSet { controller })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::DefendActionProvider;

    #[test]
    fn binding_takes_precedence_over_controller() {
        let mut registry = ProviderRegistry::new();
        assert!(matches!(
            registry.resolve(CombatantId(1), Controller::Npc),
            Err(RuntimeError::ProviderNotSet {
                controller: Controller::Npc
            })
        ));

        registry.bind(CombatantId(1), DefendActionProvider);
        assert!(registry.resolve(CombatantId(1), Controller::Npc).is_ok());
        assert!(registry.resolve(CombatantId(2), Controller::Npc).is_err());

        registry.register(Controller::Npc, DefendActionProvider);
        assert!(registry.resolve(CombatantId(2), Controller::Npc).is_ok());
        assert!(registry.unbind(CombatantId(1)));
        assert!(!registry.unbind(CombatantId(1)));
        assert!(registry.has(Controller::Npc));
        assert!(!registry.has(Controller::Player));
    }
}
