use crate::models::DogFlags;
use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::Path;

/// Set of known dog names, loaded once per run
///
/// The source file carries one dog name per line; a line may hold several
/// comma-separated synonyms. Names are matched exactly, never by substring:
/// a set containing `"hound"` does not make `"walker hound"` a dog.
#[derive(Debug, Clone)]
pub struct DogNames {
    names: HashSet<String>,
}

impl DogNames {
    /// Load the dog-name set from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read dog names file: {}", path.display()))?;

        Ok(Self::parse(&content))
    }

    /// Parse dog names from line-oriented text
    ///
    /// Each comma-separated fragment is trimmed and inserted independently;
    /// fragments left empty by trimming are skipped.
    pub fn parse(content: &str) -> Self {
        let names = content
            .lines()
            .flat_map(|line| line.split(','))
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect();

        Self { names }
    }

    /// Exact membership test for a full label
    pub fn contains(&self, label: &str) -> bool {
        self.names.contains(label)
    }

    /// Whether any comma-separated candidate in the classifier label is a
    /// known dog name
    pub fn classified_as_dog(&self, classifier_label: &str) -> bool {
        classifier_label
            .split(',')
            .any(|candidate| self.names.contains(candidate.trim()))
    }

    /// Compute the dog flags for one image's pair of labels
    pub fn flags(&self, pet_label: &str, classifier_label: &str) -> DogFlags {
        DogFlags {
            pet_is_dog: self.contains(pet_label),
            classifier_is_dog: self.classified_as_dog(classifier_label),
        }
    }

    /// Number of distinct names in the set
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// True when the set holds no names
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
