//! Content factory for locating scenarios and rules in a data directory.

use std::path::{Path, PathBuf};

use encounter_core::{EncounterSpec, RulesConfig};

use crate::loaders::{LoadResult, RulesLoader, ScenarioLoader};

/// Content factory that loads encounter content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── rules.toml
/// └── scenarios/
///     ├── goblin_ambush.ron
///     └── crypt_guardians.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Directory bundled with this crate.
    pub fn bundled() -> Self {
        Self::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("data"))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Load `rules.toml`, or the default rules when the file is absent.
    pub fn load_rules(&self) -> LoadResult<RulesConfig> {
        let path = self.data_dir.join("rules.toml");
        if path.exists() {
            RulesLoader::load(&path)
        } else {
            Ok(RulesConfig::default())
        }
    }

    /// Load `scenarios/<name>.ron`.
    pub fn load_scenario(&self, name: &str) -> LoadResult<EncounterSpec> {
        let path = self.scenario_dir().join(format!("{name}.ron"));
        ScenarioLoader::load(&path)
    }

    /// Scenario names (file stems) in sorted order.
    pub fn scenario_names(&self) -> LoadResult<Vec<String>> {
        let dir = self.scenario_dir();
        let entries = std::fs::read_dir(&dir)
            .map_err(|e| anyhow::anyhow!("Failed to read directory {}: {}", dir.display(), e))?;

        let mut names = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) == Some("ron")
                && let Some(stem) = path.file_stem().and_then(|stem| stem.to_str())
            {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    fn scenario_dir(&self) -> PathBuf {
        self.data_dir.join("scenarios")
    }
}
