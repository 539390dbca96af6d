use crate::config::RunConfig;
use crate::models::{EvalResults, ResultEntry, ResultStats};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Output format options
#[derive(Debug, Clone, ValueEnum, Serialize, Deserialize)]
pub enum OutputFormat {
    Plain,
    Json,
}

/// Print evaluation results in the specified format
pub fn print_results(results: &[EvalResults], runs: &[RunConfig], format: OutputFormat) {
    match format {
        OutputFormat::Plain => print_plain(results, runs),
        OutputFormat::Json => print_json(results),
    }
}

/// Print results in plain text format, one report per run
fn print_plain(results: &[EvalResults], runs: &[RunConfig]) {
    for (i, (result, run)) in results.iter().zip(runs).enumerate() {
        println!("=== Run {} ===", i + 1);
        print!(
            "{}",
            format_report(
                &result.entries,
                &result.stats,
                &result.model,
                run.show_incorrect_dogs,
                run.show_incorrect_breeds,
            )
        );

        if !result.warnings.is_empty() {
            println!();
            for warning in &result.warnings {
                println!("** Warning: {}", warning);
            }
        }

        if i < results.len() - 1 {
            println!();
            println!("{}", "=".repeat(50));
            println!();
        }
    }
}

/// Render one run's report: summary block plus the requested listings
pub fn format_report(
    entries: &[ResultEntry],
    stats: &ResultStats,
    model: &str,
    show_incorrect_dogs: bool,
    show_incorrect_breeds: bool,
) -> String {
    let mut report = String::new();

    report.push_str(&format!(
        "\n**** Results Summary for CNN Model Arch: {} ****\n",
        model.to_uppercase()
    ));
    report.push_str(&format!("{:>20}: {:3}\n", "N Images", stats.n_images));
    report.push_str(&format!("{:>20}: {:3}\n", "N Dog Images", stats.n_dog_images));
    report.push_str(&format!(
        "{:>20}: {:3}\n",
        "N Not-Dog Images", stats.n_not_dog_images
    ));

    for (name, value) in [
        ("pct_correct_dogs", stats.pct_correct_dogs),
        ("pct_correct_non_dogs", stats.pct_correct_non_dogs),
        ("pct_correct_breed", stats.pct_correct_breed),
        ("pct_label_matches", stats.pct_label_matches),
    ] {
        report.push_str(&format!("{:>20}: {:5.1}\n", name, value));
    }

    // Only worth listing when at least one dog/not-dog call was wrong
    if show_incorrect_dogs && stats.n_correct_dogs + stats.n_correct_non_dogs != stats.n_images {
        report.push_str("\nINCORRECT Dog/NOT Dog Assignments:\n");
        for entry in entries.iter().filter(|e| e.dog_flags_disagree()) {
            report.push_str(&format_entry_line(entry));
        }
    }

    if show_incorrect_breeds && stats.n_correct_dogs != stats.n_correct_breed {
        report.push_str("\nINCORRECT Dog Breed Assignment:\n");
        for entry in entries.iter().filter(|e| e.is_wrong_breed()) {
            report.push_str(&format_entry_line(entry));
        }
    }

    report
}

/// One real-vs-classifier line for the misclassification listings
fn format_entry_line(entry: &ResultEntry) -> String {
    format!(
        "Real: {:<26}   Classifier: {:<30}\n",
        entry.pet_label, entry.classifier_label
    )
}

/// Print results in JSON format
fn print_json(results: &[EvalResults]) {
    match serde_json::to_string_pretty(results) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing results to JSON: {}", e),
    }
}

/// Render a duration as h:mm:ss for the runtime footer
pub fn format_elapsed(elapsed: Duration) -> String {
    let total = elapsed.as_secs();

    format!("{}:{:02}:{:02}", total / 3600, (total % 3600) / 60, total % 60)
}
