use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// YAML list of students seeded instead of the built-in roster
    #[serde(default)]
    pub roster_file: Option<PathBuf>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            roster_file: None,
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("mess-queue"))
        .unwrap_or_else(|| PathBuf::from(".mess-queue"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_storage_config() {
        let config = StorageConfig::default();
        assert!(
            config.data_dir.ends_with("mess-queue") || config.data_dir.ends_with(".mess-queue")
        );
        assert!(config.roster_file.is_none());
    }

    #[test]
    fn test_storage_config_deserialization() {
        let yaml = r#"
data_dir: "/var/lib/mess"
roster_file: "students.yaml"
"#;
        let config: StorageConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/mess"));
        assert_eq!(config.roster_file, Some(PathBuf::from("students.yaml")));
    }
}
