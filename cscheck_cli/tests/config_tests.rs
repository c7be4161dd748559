//! Configuration manager tests
//!
//! Every test that loads configuration runs inside a `figment::Jail` so the
//! `CSCHECK_` environment seen by one test never leaks into another.

use cscheck_cli::config::ConfigManager;
use cscheck_cli::output::OutputFormat;
use figment::Jail;
use std::fs;

fn jailed_manager(jail: &Jail) -> ConfigManager {
    ConfigManager::with_path(jail.directory().join("config.toml"))
}

#[test]
fn test_default_values_when_file_missing() {
    Jail::expect_with(|jail| {
        let manager = jailed_manager(jail);
        let config = manager.load().unwrap();

        assert_eq!(config.hash.default_algorithm, "SHA256");
        assert_eq!(config.output_format(), OutputFormat::Text);
        assert!(config.output.color_enabled);
        assert!(config.output.progress_enabled);
        assert!(!manager.get_config_path().exists());
        Ok(())
    });
}

#[test]
fn test_set_then_get() {
    Jail::expect_with(|jail| {
        let mut manager = jailed_manager(jail);

        manager.set("hash.default_algorithm", "tiger").unwrap();
        manager.set("output.default_format", "JSON").unwrap();
        manager.set("output.progress_enabled", "false").unwrap();

        assert_eq!(manager.get("hash.default_algorithm").unwrap(), "TIGER");
        assert_eq!(manager.get("output.default_format").unwrap(), "json");
        assert_eq!(manager.get("output.progress_enabled").unwrap(), "false");
        Ok(())
    });
}

#[test]
fn test_file_merges_with_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", "[output]\ncolor_enabled = false\n")?;
        let config = jailed_manager(jail).load().unwrap();

        assert!(!config.output.color_enabled);
        assert!(config.output.progress_enabled);
        assert_eq!(config.hash.default_algorithm, "SHA256");
        Ok(())
    });
}

#[test]
fn test_environment_overrides_file() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", "[hash]\ndefault_algorithm = \"MD5\"\n")?;
        jail.set_env("CSCHECK_HASH__DEFAULT_ALGORITHM", "SHA512");

        let manager = jailed_manager(jail);
        assert_eq!(manager.get("hash.default_algorithm").unwrap(), "SHA512");
        Ok(())
    });
}

#[test]
fn test_set_preserves_existing_values() {
    Jail::expect_with(|jail| {
        let mut manager = jailed_manager(jail);
        manager.set("output.color_enabled", "false").unwrap();
        manager.set("hash.default_algorithm", "sm3").unwrap();

        let content = fs::read_to_string(manager.get_config_path()).unwrap();
        let parsed: toml::Value = toml::from_str(&content).unwrap();
        assert_eq!(parsed["output"]["color_enabled"].as_bool(), Some(false));
        assert_eq!(parsed["hash"]["default_algorithm"].as_str(), Some("SM3"));
        Ok(())
    });
}

#[test]
fn test_list_shows_all_values() {
    Jail::expect_with(|jail| {
        let items = jailed_manager(jail).list().unwrap();
        let keys: Vec<&str> = items.iter().map(|(k, _)| k.as_str()).collect();

        assert_eq!(
            keys,
            vec![
                "hash.default_algorithm",
                "output.color_enabled",
                "output.default_format",
                "output.progress_enabled",
            ]
        );
        Ok(())
    });
}

#[test]
fn test_invalid_values_rejected() {
    Jail::expect_with(|jail| {
        let mut manager = jailed_manager(jail);

        assert!(manager.set("hash.default_algorithm", "blake3").is_err());
        assert!(manager.set("output.default_format", "yaml").is_err());
        assert!(manager.set("output.progress_enabled", "yes").is_err());
        assert!(manager.get("hash.missing").is_err());
        Ok(())
    });
}

#[test]
fn test_creates_config_directory() {
    Jail::expect_with(|jail| {
        let path = jail.directory().join("nested/dir/config.toml");
        let mut manager = ConfigManager::with_path(path.clone());

        manager.set("output.color_enabled", "true").unwrap();
        assert!(path.exists());
        Ok(())
    });
}
