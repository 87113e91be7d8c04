//! Encounter scenario loader.

use std::path::Path;

use encounter_core::{EncounterSpec, EncounterState};

use crate::loaders::{LoadResult, read_file};

/// Loader for encounter scenarios from RON files.
///
/// # RON Format
///
/// ```ron
/// EncounterSpec(
///     name: "Goblin Ambush",
///     seed: 42,
///     arena: Some(Arena(width: 12, height: 8)),
///     combatants: [
///         CombatantTemplate(name: "Aldric", class: Fighter, weapon: Sword),
///         CombatantTemplate(name: "Goblin", side: Hostile, position: Position(x: 3, y: 0)),
///     ],
/// )
/// ```
pub struct ScenarioLoader;

impl ScenarioLoader {
    pub fn load(path: &Path) -> LoadResult<EncounterSpec> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse scenario RON {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<EncounterSpec> {
        let spec: EncounterSpec = ron::from_str(content)?;
        Ok(spec)
    }

    /// Loads a scenario and builds the unstarted encounter from it.
    pub fn load_state(path: &Path) -> LoadResult<EncounterState> {
        let spec = Self::load(path)?;
        EncounterState::from_spec(&spec)
            .map_err(|e| anyhow::anyhow!("Invalid scenario {}: {}", path.display(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use encounter_core::{CharacterClass, Side, WeaponKind};

    #[test]
    fn omitted_fields_take_template_defaults() {
        let spec = ScenarioLoader::parse(
            r#"(
                name: "Test",
                seed: 5,
                combatants: [
                    (name: "Mira", class: MagicUser, spells: [MagicMissile], spell_slots: 2),
                    (name: "Rat", side: Hostile, position: (x: 1, y: 0), hit_points: Some(2)),
                ],
            )"#,
        )
        .unwrap();

        assert_eq!(spec.seed, 5);
        assert_eq!(spec.arena, None);
        assert_eq!(spec.combatants[0].class, CharacterClass::MagicUser);
        assert_eq!(spec.combatants[0].weapon, WeaponKind::Unarmed);
        assert_eq!(spec.combatants[1].side, Side::Hostile);
        assert_eq!(spec.combatants[1].level, 1);
    }
}
