use crate::classifier::HttpClassifier;
use crate::config::{Config, RunConfig};
use crate::dognames::DogNames;
use crate::evaluation;
use crate::labels;
use crate::models::EvalResults;
use anyhow::{Context, Result};
use std::path::Path;

/// Main runner that orchestrates the evaluation runs
pub struct Runner {
    config: Config,
    verbose: bool,
}

impl Runner {
    /// Create a new runner with the given configuration
    pub fn new(config: Config, verbose: bool) -> Self {
        Self { config, verbose }
    }

    /// Execute every run defined in the configuration, in order
    pub async fn run_all(&self) -> Result<Vec<EvalResults>> {
        let mut all_results = Vec::new();
        let total_runs = self.config.runs.len();

        for (run_index, run) in self.config.runs.iter().enumerate() {
            let results = self
                .run_single(run, run_index + 1, total_runs)
                .await
                .with_context(|| {
                    format!("Run {}/{} ({}) failed", run_index + 1, total_runs, run.model)
                })?;
            all_results.push(results);
        }

        Ok(all_results)
    }

    /// Execute one evaluation run
    async fn run_single(
        &self,
        run: &RunConfig,
        run_num: usize,
        total_runs: usize,
    ) -> Result<EvalResults> {
        if self.verbose {
            println!(
                "Running evaluation {}/{} with model {} on {}",
                run_num,
                total_runs,
                run.model,
                run.image_dir.display()
            );
        }

        let file_names = list_images(&run.image_dir)?;
        let images = labels::pet_labels(file_names);
        let dog_names = DogNames::from_file(&run.dog_names_file)?;

        if self.verbose {
            println!(
                "Classifying {} images against {} dog names",
                images.len(),
                dog_names.len()
            );
        }

        let mut classifier = HttpClassifier::from_config(run)?;
        let results = evaluation::evaluate(
            &mut classifier,
            &run.image_dir,
            &images,
            &run.model,
            &dog_names,
        )
        .await?;

        for warning in &results.warnings {
            eprintln!("** Warning: {}", warning);
        }

        if let Some(storage_path) = &run.storage_path {
            if self.verbose {
                println!(
                    "Storing results for run {}/{} to {}",
                    run_num, total_runs, storage_path
                );
            }
            store_results(&results, storage_path)?;
        }

        Ok(results)
    }
}

/// List image file names in a directory, sorted for deterministic runs
///
/// Subdirectories and hidden files are skipped; labels are derived from
/// file names alone, so anything else in the directory is not an image to
/// evaluate.
pub fn list_images(dir: &Path) -> Result<Vec<String>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read image directory: {}", dir.display()))?;

    let mut file_names = Vec::new();
    for entry in entries {
        let entry = entry
            .with_context(|| format!("Failed to read directory entry in {}", dir.display()))?;
        if !entry.file_type()?.is_file() {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy().into_owned();
        if file_name.starts_with('.') {
            continue;
        }
        file_names.push(file_name);
    }

    file_names.sort();
    Ok(file_names)
}

/// Store one run's results to a JSON file, creating parent directories
pub fn store_results(results: &EvalResults, path: &str) -> Result<()> {
    let json_content = serde_json::to_string_pretty(results)
        .context("Failed to serialize results to JSON")?;

    if let Some(parent) = Path::new(path).parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(path, json_content)
        .with_context(|| format!("Failed to write results to: {}", path))?;
    println!("Results stored to: {}", path);

    Ok(())
}
