use serde::{Deserialize, Serialize};
use std::fmt;

/// A pet image to evaluate, keyed by its file name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PetImage {
    /// Image file name within the run's image directory
    pub file_name: String,
    /// Ground-truth pet label derived from the file name
    pub label: String,
}

/// Outcome of comparing a classifier label against the pet label
///
/// Intermediate value: it records the raw match before the dog-name
/// adjustment is applied.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchedLabels {
    /// Ground-truth pet label
    pub pet_label: String,
    /// Normalized classifier output
    pub classifier_label: String,
    /// Whether the pet label appears in the classifier output as a
    /// whole phrase
    pub is_match: bool,
}

/// Dog/not-dog verdicts for the two labels of one image
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DogFlags {
    /// The ground-truth pet label names a dog
    pub pet_is_dog: bool,
    /// The classifier output names a dog
    pub classifier_is_dog: bool,
}

/// Finalized evaluation record for a single image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultEntry {
    /// Image file name
    pub file_name: String,
    /// Ground-truth pet label
    pub pet_label: String,
    /// Normalized classifier output
    pub classifier_label: String,
    /// Whether the labels match as a whole phrase
    pub is_match: bool,
    /// The pet label names a dog
    pub pet_is_dog: bool,
    /// The classifier output names a dog
    pub classifier_is_dog: bool,
}

impl ResultEntry {
    /// Build the finalized record from the match outcome and dog flags
    pub fn new(file_name: String, matched: MatchedLabels, flags: DogFlags) -> Self {
        Self {
            file_name,
            pet_label: matched.pet_label,
            classifier_label: matched.classifier_label,
            is_match: matched.is_match,
            pet_is_dog: flags.pet_is_dog,
            classifier_is_dog: flags.classifier_is_dog,
        }
    }

    /// True when exactly one of the two dog flags is set
    pub fn dog_flags_disagree(&self) -> bool {
        self.pet_is_dog != self.classifier_is_dog
    }

    /// True when the image is a correctly detected dog with the wrong breed
    pub fn is_wrong_breed(&self) -> bool {
        self.pet_is_dog && self.classifier_is_dog && !self.is_match
    }
}

/// Non-fatal problem encountered while building results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EvalWarning {
    /// A file name appeared more than once; the first entry was kept
    DuplicateImage { file_name: String },
}

impl fmt::Display for EvalWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalWarning::DuplicateImage { file_name } => {
                write!(
                    f,
                    "pet image '{}' listed more than once; keeping the first entry",
                    file_name
                )
            }
        }
    }
}

/// Statistics calculated over one run's result entries
///
/// Counts are prefixed `n_`, percentages `pct_`. Every percentage lies in
/// [0, 100] and is 0 when its denominator count is 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultStats {
    /// Total number of images evaluated
    pub n_images: usize,
    /// Images whose pet label names a dog
    pub n_dog_images: usize,
    /// Images whose pet label does not name a dog
    pub n_not_dog_images: usize,
    /// Dog images the classifier also called a dog
    pub n_correct_dogs: usize,
    /// Non-dog images the classifier also called not a dog
    pub n_correct_non_dogs: usize,
    /// Dog images whose breed label matched
    pub n_correct_breed: usize,
    /// Images whose labels matched, dog or not
    pub n_label_matches: usize,
    /// 100 * n_correct_dogs / n_dog_images
    pub pct_correct_dogs: f64,
    /// 100 * n_correct_non_dogs / n_not_dog_images
    pub pct_correct_non_dogs: f64,
    /// 100 * n_correct_breed / n_dog_images
    pub pct_correct_breed: f64,
    /// 100 * n_label_matches / n_images
    pub pct_label_matches: f64,
}

/// Complete output of a single evaluation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalResults {
    /// Model architecture the classifier was asked to use
    pub model: String,
    /// Aggregated statistics
    pub stats: ResultStats,
    /// Per-image result entries, in evaluation order
    pub entries: Vec<ResultEntry>,
    /// Non-fatal warnings raised while building the entries
    pub warnings: Vec<EvalWarning>,
}
