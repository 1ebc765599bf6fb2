//! Game configuration files. TOML by default, JSON when the extension says so.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use delver_core::GameConfig;

pub fn load_config(path: &Path) -> Result<GameConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    parse_config(&text, path)
}

pub fn parse_config(text: &str, path: &Path) -> Result<GameConfig> {
    let is_json = path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let config: GameConfig = if is_json {
        serde_json::from_str(text)
            .with_context(|| format!("Invalid JSON config: {}", path.display()))?
    } else {
        toml::from_str(text).with_context(|| format!("Invalid TOML config: {}", path.display()))?
    };
    config.validate().with_context(|| format!("Invalid config: {}", path.display()))?;
    Ok(config)
}

pub fn render_config(config: &GameConfig) -> Result<String> {
    toml::to_string_pretty(config).context("Failed to serialize config")
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn toml_file_overrides_only_the_given_fields() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("delver.toml");
        fs::write(&path, "monster_count = 2\n\n[generation]\nmin_rooms = 3\n").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.monster_count, Some(2));
        assert_eq!(config.generation.min_rooms, 3);
        assert_eq!(config.generation.width, 80);
        assert_eq!(config.player_speed, 10);
    }

    #[test]
    fn json_extension_selects_the_json_parser() {
        let config = parse_config(r#"{ "dig_strength": 40 }"#, Path::new("cfg.JSON")).unwrap();
        assert_eq!(config.dig_strength, 40);
    }

    #[test]
    fn rendered_defaults_parse_back() {
        let text = render_config(&GameConfig::default()).unwrap();
        let parsed = parse_config(&text, Path::new("defaults.toml")).unwrap();
        assert_eq!(parsed, GameConfig::default());
    }

    #[test]
    fn inverted_ranges_are_rejected() {
        let err = parse_config("monster_count_min = 9\nmonster_count_max = 2\n", Path::new("x.toml"))
            .unwrap_err();
        assert!(err.to_string().contains("x.toml"));
        assert!(format!("{err:#}").contains("monster_count range 9..=2 is empty"));
        assert!(parse_config("monster_speed_min = 0\n", Path::new("x.toml")).is_err());
    }
}
