use arrayvec::ArrayVec;

use crate::config::RulesConfig;
use crate::rules::SpellKind;

/// Known spells and remaining slots for one encounter.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpellBook {
    known: ArrayVec<SpellKind, { RulesConfig::MAX_KNOWN_SPELLS }>,
    slots: u8,
    max_slots: u8,
}

impl SpellBook {
    /// Builds a spellbook, ignoring duplicates and anything past capacity.
    pub fn new(spells: impl IntoIterator<Item = SpellKind>, slots: u8) -> Self {
        let mut known = ArrayVec::new();
        for spell in spells {
            if !known.contains(&spell) && known.try_push(spell).is_err() {
                break;
            }
        }
        Self {
            known,
            slots,
            max_slots: slots,
        }
    }

    pub fn knows(&self, spell: SpellKind) -> bool {
        self.known.contains(&spell)
    }

    pub fn known(&self) -> &[SpellKind] {
        &self.known
    }

    pub fn slots(&self) -> u8 {
        self.slots
    }

    pub fn max_slots(&self) -> u8 {
        self.max_slots
    }

    pub fn has_slots(&self, cost: u8) -> bool {
        self.slots >= cost
    }

    /// Spends `cost` slots. Returns false and spends nothing if too few remain.
    pub fn spend(&mut self, cost: u8) -> bool {
        match self.slots.checked_sub(cost) {
            Some(remaining) => {
                self.slots = remaining;
                true
            }
            None => false,
        }
    }
}
