use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for a single evaluation run
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RunConfig {
    /// Directory holding the pet images to classify
    pub image_dir: PathBuf,
    /// Text file with known dog names, one name or comma-separated
    /// synonym group per line
    pub dog_names_file: PathBuf,
    /// Base URL of the image classification service
    pub api_endpoint: String,
    /// Model architecture the service should classify with
    #[serde(default = "default_model")]
    pub model: String,
    /// Environment variable holding the API key, if the service needs one
    #[serde(default)]
    pub env_var_api_key: Option<String>,
    /// Rate limit for classification requests per second
    #[serde(default = "default_rate_limit")]
    pub rate_limit_rps: f64,
    /// Print images the classifier got wrong on the dog/not-dog question
    #[serde(default)]
    pub show_incorrect_dogs: bool,
    /// Print dogs the classifier detected but assigned the wrong breed
    #[serde(default)]
    pub show_incorrect_breeds: bool,
    /// Optional local path to store run results as JSON
    #[serde(default)]
    pub storage_path: Option<String>,
}

fn default_model() -> String {
    "resnet".to_string()
}

fn default_rate_limit() -> f64 {
    10.0
}

/// Root configuration containing the list of runs
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Evaluation runs to execute in order
    pub runs: Vec<RunConfig>,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_parsing() {
        let toml_content = r#"
[[runs]]
image_dir = "pet_images"
dog_names_file = "dognames.txt"
api_endpoint = "http://localhost:8080"
model = "vgg"
env_var_api_key = "CLASSIFIER_API_KEY"
rate_limit_rps = 5.0
show_incorrect_dogs = true
show_incorrect_breeds = true
storage_path = "/tmp/results.json"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", toml_content).unwrap();

        let config = Config::from_file(temp_file.path()).unwrap();
        assert_eq!(config.runs.len(), 1);
        assert_eq!(config.runs[0].image_dir, PathBuf::from("pet_images"));
        assert_eq!(config.runs[0].model, "vgg");
        assert_eq!(
            config.runs[0].env_var_api_key.as_deref(),
            Some("CLASSIFIER_API_KEY")
        );
        assert_eq!(config.runs[0].rate_limit_rps, 5.0);
        assert!(config.runs[0].show_incorrect_dogs);
        assert!(config.runs[0].show_incorrect_breeds);
        assert_eq!(
            config.runs[0].storage_path.as_deref(),
            Some("/tmp/results.json")
        );
    }

    #[test]
    fn test_config_defaults() {
        let toml_content = r#"
[[runs]]
image_dir = "pet_images"
dog_names_file = "dognames.txt"
api_endpoint = "http://localhost:8080"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", toml_content).unwrap();

        let config = Config::from_file(temp_file.path()).unwrap();
        assert_eq!(config.runs[0].model, "resnet");
        assert_eq!(config.runs[0].rate_limit_rps, 10.0);
        assert!(config.runs[0].env_var_api_key.is_none());
        assert!(!config.runs[0].show_incorrect_dogs);
        assert!(!config.runs[0].show_incorrect_breeds);
        assert!(config.runs[0].storage_path.is_none());
    }

    #[test]
    fn test_config_multiple_runs() {
        let toml_content = r#"
[[runs]]
image_dir = "pet_images"
dog_names_file = "dognames.txt"
api_endpoint = "http://localhost:8080"
model = "resnet"

[[runs]]
image_dir = "pet_images"
dog_names_file = "dognames.txt"
api_endpoint = "http://localhost:8080"
model = "alexnet"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", toml_content).unwrap();

        let config = Config::from_file(temp_file.path()).unwrap();
        assert_eq!(config.runs.len(), 2);
        assert_eq!(config.runs[0].model, "resnet");
        assert_eq!(config.runs[1].model, "alexnet");
    }

    #[test]
    fn test_config_missing_file() {
        let result = Config::from_file(Path::new("/nonexistent/run.toml"));
        assert!(result.is_err());
    }
}
