use crate::models::PetImage;

/// Derive the ground-truth pet label from an image file name
///
/// The file name is lowercased and split on underscores; the final segment
/// (numeric disambiguator plus extension, e.g. `01.jpg`) is dropped and the
/// remaining words are joined with single spaces. A name with no underscore
/// yields an empty label; that is an accepted edge case, not an error.
pub fn label_from_filename(file_name: &str) -> String {
    let lowered = file_name.to_lowercase();
    let words: Vec<&str> = lowered.split('_').collect();

    words[..words.len() - 1].join(" ").trim().to_string()
}

/// Build pet image records from a listing of file names, preserving order
pub fn pet_labels(file_names: impl IntoIterator<Item = String>) -> Vec<PetImage> {
    file_names
        .into_iter()
        .map(|file_name| {
            let label = label_from_filename(&file_name);
            PetImage { file_name, label }
        })
        .collect()
}

/// Decide whether the pet label appears in the classifier label as a
/// whole phrase
///
/// Classifier output may concatenate several comma-separated candidate
/// phrases (`"malamute, siberian husky"`), so plain substring search is not
/// enough: `"cat"` must not match inside `"category"`. Only the first
/// occurrence of the pet label is considered. It counts as a match when it
/// spans the whole classifier label, or when it sits on delimiter
/// boundaries: preceded by the start of the string or a space, and followed
/// by the end of the string, a space, or a comma.
pub fn labels_match(classifier_label: &str, pet_label: &str) -> bool {
    let Some(start) = classifier_label.find(pet_label) else {
        return false;
    };
    let end = start + pet_label.len();
    let bytes = classifier_label.as_bytes();

    if start == 0 && end == bytes.len() {
        return true;
    }

    let left_ok = start == 0 || bytes[start - 1] == b' ';
    let right_ok = end == bytes.len() || bytes[end] == b' ' || bytes[end] == b',';

    left_ok && right_ok
}
