//! Configuration types for longecho.
//!
//! This crate provides the configuration used by longecho for
//! `.longecho/config.yaml` files.

pub mod loader;
pub mod types;

pub use loader::*;
pub use types::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_has_sensible_values() {
        let config = LongechoConfig::default();

        assert!(config.policy.extra_durable_extensions.is_empty());
        assert!(config.policy.extra_skip_directories.is_empty());
        assert!(config.policy.extra_excluded_files.is_empty());
        assert_eq!(config.policy.format_scan_depth, None);
        assert_eq!(config.policy.summary_max_length, None);

        assert_eq!(config.discovery.max_depth, None);
        assert!(!config.discovery.follow_symlinks);
    }

    #[test]
    fn test_config_serializes_to_yaml() {
        let config = LongechoConfig::default();
        let yaml = serde_yaml::to_string(&config).unwrap();

        assert!(yaml.contains("policy:"));
        assert!(yaml.contains("discovery:"));
        assert!(yaml.contains("follow_symlinks: false"));
    }

    #[test]
    fn test_partial_configs_merge_with_defaults() {
        let partial_yaml = r#"
policy:
  extra_durable_extensions: [".parquet"]
"#;

        let config: LongechoConfig = serde_yaml::from_str(partial_yaml).unwrap();

        assert_eq!(config.policy.extra_durable_extensions, vec![".parquet"]);
        assert!(config.policy.extra_skip_directories.is_empty());
        assert!(!config.discovery.follow_symlinks);
    }
}
