//! Rules configuration loader.

use std::path::Path;

use encounter_core::RulesConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for rules configuration from TOML files.
///
/// Every field is optional; omitted fields keep their defaults.
pub struct RulesLoader;

impl RulesLoader {
    pub fn load(path: &Path) -> LoadResult<RulesConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse rules TOML {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<RulesConfig> {
        let rules: RulesConfig = toml::from_str(content)?;
        Ok(rules)
    }
}
