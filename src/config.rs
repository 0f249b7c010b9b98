use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::align::cost::CostParams;

/// On-disk configuration. Every field is optional in the TOML; missing
/// fields keep their defaults.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub cost: CostParams,
}

pub fn load(path: &Path) -> Result<Config> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("failed to parse config {}", path.display()))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn empty_config_is_all_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.cost.variance, 6.8);
    }

    #[test]
    fn partial_override_keeps_the_rest() {
        let config: Config = toml::from_str(
            "[cost]\nvariance = 7.2\npenalty_merge = 500\n",
        )
        .unwrap();
        assert_eq!(config.cost.variance, 7.2);
        assert_eq!(config.cost.penalty_merge, 500);
        assert_eq!(config.cost.chars_per_char, 1.0);
        assert_eq!(config.cost.penalty_insert_delete, 450);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(toml::from_str::<Config>("[cost]\nvariancee = 7.2\n").is_err());
    }
}
