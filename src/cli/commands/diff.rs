use std::path::Path;

use crate::adapters::records::json_record_file::JsonRecordFile;
use crate::cli::output;
use crate::config::app_config::AppConfig;
use crate::core::errors::Result;
use crate::core::services::classifier::ChangeClassifier;

/// Execute the `ordertrail diff` command.
///
/// Classifies the changes between two order documents and prints them.
/// Nothing is written. Tracked custom fields come from the config when
/// the data directory is initialized.
pub fn execute(dir: &Path, old: &Path, new: &Path) -> Result<()> {
    let before = JsonRecordFile::new(old).load()?;
    let after = JsonRecordFile::new(new).load()?;

    let classifier = if dir.join("config.toml").exists() {
        ChangeClassifier::new(AppConfig::load(dir)?.tracking.custom_meta_fields)
    } else {
        ChangeClassifier::default()
    };

    let events = classifier.classify("-", Some(&before), Some(&after));

    output::header("ordertrail diff");

    if events.is_empty() {
        output::success("No differences found");
        return Ok(());
    }

    for event in &events {
        output::print_event(event);
    }
    println!();
    output::success(&format!("{} change(s)", events.len()));

    Ok(())
}
