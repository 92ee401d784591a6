//! The config model: base, comparison and working documents
//!
//! `ConfigModel` is a plain value. Operations that change it take it by
//! value and hand back the new state together with their result, so there
//! is never a second handle to the documents being edited.
//!
//! Every public operation recovers its errors into a [`Status`] or report
//! text; nothing here returns an error to the caller.

use std::path::Path;

use tracing::{debug, info, warn};

use crate::compare::Comparator;
use crate::document::{describe, read_document, write_document};
use crate::fields::{daily_tweak, display_value, ConfigDocument, FieldValue, TweakField, DAILY_TWEAKS};
use crate::naming;
use crate::report::{ConfigSummary, NO_CONFIG_SUMMARY};

mod status;

pub use status::{ModelError, Status};

/// Current display value of one daily tweak
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TweakValue {
    pub field: &'static TweakField,
    pub value: String,
}

/// Find a tweak value by field key
pub fn tweak_value<'a>(values: &'a [TweakValue], key: &str) -> Option<&'a str> {
    values
        .iter()
        .find(|v| v.field.key == key)
        .map(|v| v.value.as_str())
}

/// The three document slots
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigModel {
    base: ConfigDocument,
    comparison: ConfigDocument,
    working: ConfigDocument,
}

impl ConfigModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base(&self) -> &ConfigDocument {
        &self.base
    }

    pub fn comparison(&self) -> &ConfigDocument {
        &self.comparison
    }

    pub fn working(&self) -> &ConfigDocument {
        &self.working
    }

    pub fn has_base(&self) -> bool {
        !self.working.is_empty()
    }

    /// Load `path` as the new base and start a fresh working copy of it.
    ///
    /// On failure the model is returned unchanged along with an empty tweak
    /// list, which means "nothing to display".
    pub fn set_base(self, path: &Path) -> (Self, Status, Vec<TweakValue>) {
        let (doc, status) = load(path);
        if status.is_failure() {
            return (self, status, Vec::new());
        }
        if doc.is_empty() {
            warn!(path = %path.display(), "refusing empty config as base");
            return (self, ModelError::EmptyConfig.into(), Vec::new());
        }

        info!(path = %path.display(), fields = doc.len(), "base config loaded");
        let model = Self {
            working: doc.clone(),
            base: doc,
            comparison: self.comparison,
        };
        let values = model.tweak_values();
        (model, status, values)
    }

    /// Display values of the daily tweaks in catalog order
    pub fn tweak_values(&self) -> Vec<TweakValue> {
        if self.working.is_empty() {
            return Vec::new();
        }

        DAILY_TWEAKS
            .iter()
            .map(|field| TweakValue {
                field,
                value: self.working.get(field.key).map(display_value).unwrap_or_default(),
            })
            .collect()
    }

    /// Apply raw form edits to the working document.
    ///
    /// Only daily tweak keys are considered. Blank inputs are skipped unless
    /// the existing value is a boolean. Each input is coerced to the type of
    /// the value already in the working document.
    pub fn update_tweaks<I, K, V>(mut self, new_values: I) -> (Self, Status)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        if self.working.is_empty() {
            return (self, ModelError::NoBaseLoaded.into());
        }

        let mut changed = 0usize;
        for (key, input) in new_values {
            let (key, input) = (key.as_ref(), input.as_ref());
            let Some(field) = daily_tweak(key) else {
                debug!(key, "ignoring edit to a field outside the daily tweaks");
                continue;
            };

            let current = FieldValue::from_json(self.working.get(field.key));
            if input.trim().is_empty() && !current.is_boolean() {
                continue;
            }

            let updated = current.coerce(input).into_json();
            if self.working.get(field.key) != Some(&updated) {
                debug!(key = field.key, value = %updated, "daily tweak changed");
                changed += 1;
            }
            self.working.insert(field.key.to_string(), updated);
        }

        let status = if changed > 0 {
            info!(changed, "daily tweaks updated");
            Status::Success(format!(
                "Daily tweaks updated successfully ({} parameters changed).",
                changed
            ))
        } else {
            Status::Info("No changes applied to daily tweaks (values were empty or same).".to_string())
        };
        (self, status)
    }

    /// Discard edits by copying the base into the working document again
    pub fn reset_working(mut self) -> (Self, Status) {
        if self.base.is_empty() {
            return (self, ModelError::NoBaseLoaded.into());
        }
        self.working = self.base.clone();
        (self, Status::Success("Working configuration reset to base".to_string()))
    }

    /// Load `path` into the comparison slot and report it against the base
    pub fn compare_with(mut self, path: &Path) -> (Self, String) {
        if self.base.is_empty() {
            return (self, Status::from(ModelError::NoBaseLoaded).to_string());
        }

        let (doc, status) = load(path);
        if status.is_failure() {
            return (self, format!("Error loading comparison file:\n{}", status));
        }

        self.comparison = doc;
        let report = compare(&self.base, &self.comparison);
        (self, report)
    }

    pub fn summary(&self) -> String {
        summarize(&self.working)
    }

    pub fn suggest_filename(&self) -> String {
        naming::suggest_filename(&self.working)
    }

    pub fn save(&self, filename: &str, output_dir: &Path) -> Status {
        save(&self.working, filename, output_dir)
    }
}

/// Load a document and describe it.
///
/// Failures come back as an empty document plus a failure status.
pub fn load(path: &Path) -> (ConfigDocument, Status) {
    match read_document(path) {
        Ok(doc) => {
            let status = Status::Success(format!("Loaded {}", describe(&doc)));
            (doc, status)
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to load config");
            (ConfigDocument::new(), Status::Failure(e))
        }
    }
}

/// Compare two documents and render the report
pub fn compare(base: &ConfigDocument, other: &ConfigDocument) -> String {
    match Comparator::compare(base, other) {
        Ok(comparison) => comparison.to_markdown(),
        Err(e) => Status::Failure(e).to_string(),
    }
}

/// Compare two files without touching any model state
pub fn compare_files(base_path: &Path, other_path: &Path) -> String {
    let (base, base_status) = load(base_path);
    let (other, other_status) = load(other_path);

    if base_status.is_failure() || other_status.is_failure() {
        return format!("Error loading files:\n{}\n{}", base_status, other_status);
    }
    compare(&base, &other)
}

/// Render a summary of the working document
pub fn summarize(working: &ConfigDocument) -> String {
    if working.is_empty() {
        return NO_CONFIG_SUMMARY.to_string();
    }
    ConfigSummary::from_document(working).to_markdown()
}

/// Save the working document as `filename` under `output_dir`.
///
/// A `.json` suffix is added when missing and an existing file is
/// overwritten.
pub fn save(working: &ConfigDocument, filename: &str, output_dir: &Path) -> Status {
    match save_inner(working, filename, output_dir) {
        Ok(status) => status,
        Err(e) => {
            warn!(filename, error = %e, "failed to save config");
            Status::Failure(e)
        }
    }
}

fn save_inner(working: &ConfigDocument, filename: &str, output_dir: &Path) -> Result<Status, ModelError> {
    if working.is_empty() {
        return Err(ModelError::EmptyConfig);
    }

    let filename = filename.trim();
    if filename.is_empty() {
        return Err(ModelError::EmptyFilename);
    }

    let filename = if filename.to_lowercase().ends_with(".json") {
        filename.to_string()
    } else {
        format!("{}.json", filename)
    };

    let path = write_document(working, output_dir, &filename)?;
    info!(path = %path.display(), "config saved");
    Ok(Status::Success(format!(
        "Configuration saved successfully as: {}",
        path.display()
    )))
}
