use crate::classifier::ImageClassifier;
use crate::dognames::DogNames;
use crate::labels::labels_match;
use crate::models::{
    EvalResults, EvalWarning, MatchedLabels, PetImage, ResultEntry, ResultStats,
};
use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::Path;

/// First transformation stage: compare one image's labels
pub fn match_labels(pet_label: &str, classifier_label: &str) -> MatchedLabels {
    MatchedLabels {
        is_match: labels_match(classifier_label, pet_label),
        pet_label: pet_label.to_string(),
        classifier_label: classifier_label.to_string(),
    }
}

/// Second transformation stage: attach dog flags and finalize the record
pub fn finalize_entry(
    file_name: &str,
    matched: MatchedLabels,
    dog_names: &DogNames,
) -> ResultEntry {
    let flags = dog_names.flags(&matched.pet_label, &matched.classifier_label);

    ResultEntry::new(file_name.to_string(), matched, flags)
}

/// Classify every image, compare labels, and aggregate statistics
///
/// Duplicate file names are rejected: the first entry is retained and a
/// warning is recorded, without calling the classifier again. A classifier
/// failure aborts the whole run.
pub async fn evaluate<C: ImageClassifier>(
    classifier: &mut C,
    image_dir: &Path,
    images: &[PetImage],
    model: &str,
    dog_names: &DogNames,
) -> Result<EvalResults> {
    let mut entries = Vec::with_capacity(images.len());
    let mut warnings = Vec::new();
    let mut seen = HashSet::new();

    for image in images {
        if !seen.insert(image.file_name.clone()) {
            warnings.push(EvalWarning::DuplicateImage {
                file_name: image.file_name.clone(),
            });
            continue;
        }

        let classifier_label = classifier
            .classify(&image_dir.join(&image.file_name), model)
            .await
            .with_context(|| format!("Failed to classify image: {}", image.file_name))?;

        let matched = match_labels(&image.label, &classifier_label);
        entries.push(finalize_entry(&image.file_name, matched, dog_names));
    }

    let stats = calculate_stats(&entries);

    Ok(EvalResults {
        model: model.to_string(),
        stats,
        entries,
        warnings,
    })
}

/// Aggregate result entries into counts and percentages in one pass
pub fn calculate_stats(entries: &[ResultEntry]) -> ResultStats {
    let mut n_dog_images = 0;
    let mut n_not_dog_images = 0;
    let mut n_correct_dogs = 0;
    let mut n_correct_non_dogs = 0;
    let mut n_correct_breed = 0;
    let mut n_label_matches = 0;

    for entry in entries {
        // Agreement on the dog/not-dog question
        if entry.pet_is_dog && entry.classifier_is_dog {
            n_correct_dogs += 1;
        } else if !entry.pet_is_dog && !entry.classifier_is_dog {
            n_correct_non_dogs += 1;
        }

        if entry.pet_is_dog {
            n_dog_images += 1;
        } else {
            n_not_dog_images += 1;
        }

        // Correct breed requires a dog image whose labels match
        if entry.pet_is_dog && entry.is_match {
            n_correct_breed += 1;
        }

        if entry.is_match {
            n_label_matches += 1;
        }
    }

    ResultStats {
        n_images: entries.len(),
        n_dog_images,
        n_not_dog_images,
        n_correct_dogs,
        n_correct_non_dogs,
        n_correct_breed,
        n_label_matches,
        pct_correct_dogs: percentage(n_correct_dogs, n_dog_images),
        pct_correct_non_dogs: percentage(n_correct_non_dogs, n_not_dog_images),
        pct_correct_breed: percentage(n_correct_breed, n_dog_images),
        pct_label_matches: percentage(n_label_matches, entries.len()),
    }
}

/// Ratio as a percentage, 0 when the denominator is 0
fn percentage(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        100.0 * numerator as f64 / denominator as f64
    }
}
