pub mod queue_config;
pub mod storage_config;

use crate::config::queue_config::QueueConfig;
use crate::config::storage_config::StorageConfig;
use crate::roster::Person;
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Main configuration structure matching config.yaml format
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub queue: QueueConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

impl Config {
    /// Load configuration from YAML file. A relative `roster_file` is
    /// resolved against the config file's directory.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let mut config: Config =
            serde_yaml::from_str(&content).with_context(|| "Failed to parse YAML config file")?;

        let resolved = match (&config.storage.roster_file, path.parent()) {
            (Some(roster_file), Some(base)) if roster_file.is_relative() => {
                Some(base.join(roster_file))
            }
            _ => None,
        };
        if resolved.is_some() {
            config.storage.roster_file = resolved;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.queue.queue_capacity == 0 {
            bail!("queue_capacity must be at least 1");
        }
        if self.queue.mess_capacity == 0 {
            bail!("mess_capacity must be at least 1");
        }
        if self.queue.refresh_interval_secs == 0 {
            bail!("refresh_interval_secs must be at least 1");
        }
        Ok(())
    }

    /// Students listed in `roster_file`, if one is configured
    pub fn roster_seed(&self) -> Result<Option<Vec<Person>>> {
        let Some(path) = &self.storage.roster_file else {
            return Ok(None);
        };

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read roster file: {}", path.display()))?;
        let people: Vec<Person> = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse roster file: {}", path.display()))?;
        Ok(Some(people))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{tempdir, NamedTempFile};

    #[test]
    fn test_config_from_file() {
        let yaml = r#"
queue:
  queue_capacity: 5
  refresh_interval_secs: 10
storage:
  data_dir: "/tmp/mess"
"#;
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", yaml).unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.queue.queue_capacity, 5);
        assert_eq!(config.queue.mess_capacity, 20);
        assert_eq!(config.queue.refresh_interval_secs, 10);
        assert_eq!(config.storage.data_dir, Path::new("/tmp/mess"));
    }

    #[test]
    fn test_empty_sections_use_defaults() {
        let config: Config = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config.queue, QueueConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "queue:\n  mess_capacity: 0\n").unwrap();

        let err = Config::from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("mess_capacity"));
    }

    #[test]
    fn test_file_not_found() {
        let result = Config::from_file(Path::new("nonexistent.yaml"));
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Failed to read config file"));
    }

    #[test]
    fn test_invalid_yaml() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "queue: [").unwrap();

        let result = Config::from_file(file.path());
        assert!(result.unwrap_err().to_string().contains("parse"));
    }

    #[test]
    fn test_roster_seed_relative_to_config() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("students.yaml"),
            r#"
- id: "s1"
  name: "Asha"
  rollNumber: "EE001"
  email: "asha@example.com"
  qrCode: "ASHA"
"#,
        )
        .unwrap();
        let config_path = dir.path().join("config.yaml");
        std::fs::write(&config_path, "storage:\n  roster_file: students.yaml\n").unwrap();

        let config = Config::from_file(&config_path).unwrap();
        let seed = config.roster_seed().unwrap().unwrap();
        assert_eq!(seed.len(), 1);
        assert_eq!(seed[0].qr_code, "ASHA");
    }

    #[test]
    fn test_no_roster_seed() {
        assert!(Config::default().roster_seed().unwrap().is_none());
    }
}
