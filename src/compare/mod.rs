//! Shallow comparison of two config documents
//!
//! Catalog fields are compared on their string form, so `1` and `"1"` count
//! as equal. `optimizer_args` is compared on the JSON value itself, with
//! null and absent both meaning "not set".

use serde_json::Value;
use tracing::debug;

use crate::document::describe;
use crate::fields::{
    report_value, ConfigDocument, TweakField, DAILY_TWEAKS, IMPORTANT_PARAMS, OPTIMIZER_ARGS_KEY,
    OPTIMIZER_KEY,
};
use crate::model::ModelError;
use crate::report::{optimizer_args_text, ArgsDiff, Comparison, FieldDiff, Verdict};

/// Field-by-field comparator for config documents
pub struct Comparator;

impl Comparator {
    /// Compare `other` against `base`
    pub fn compare(base: &ConfigDocument, other: &ConfigDocument) -> Result<Comparison, ModelError> {
        if base.is_empty() {
            return Err(ModelError::MissingDocument("base"));
        }
        if other.is_empty() {
            return Err(ModelError::MissingDocument("comparison"));
        }

        let daily = Self::catalog_diffs(DAILY_TWEAKS, base, other);
        let important = Self::catalog_diffs(IMPORTANT_PARAMS, base, other);
        let optimizer_args = Self::optimizer_args_diff(base, other);

        let verdict = if !daily.is_empty() || optimizer_args.is_some() {
            None
        } else if important.is_empty() {
            Some(Verdict::Equivalent)
        } else if important.iter().all(|d| d.key == OPTIMIZER_KEY) {
            Some(Verdict::OptimizersDiffer)
        } else {
            None
        };

        debug!(
            daily = daily.len(),
            important = important.len(),
            optimizer_args = optimizer_args.is_some(),
            "compared config documents"
        );

        Ok(Comparison {
            base_status: describe(base),
            comparison_status: describe(other),
            daily,
            important,
            optimizer_args,
            verdict,
        })
    }

    fn catalog_diffs(
        catalog: &'static [TweakField],
        base: &ConfigDocument,
        other: &ConfigDocument,
    ) -> Vec<FieldDiff> {
        catalog
            .iter()
            .filter_map(|field| Self::check_field(field, base, other))
            .collect()
    }

    /// Check a single catalog field, comparing string forms
    fn check_field(
        field: &'static TweakField,
        base: &ConfigDocument,
        other: &ConfigDocument,
    ) -> Option<FieldDiff> {
        let base_value = report_value(base.get(field.key));
        let other_value = report_value(other.get(field.key));

        if base_value == other_value {
            return None;
        }

        Some(FieldDiff {
            key: field.key,
            label: field.label,
            base: base_value,
            other: other_value,
        })
    }

    fn optimizer_args_diff(base: &ConfigDocument, other: &ConfigDocument) -> Option<ArgsDiff> {
        let set = |doc: &ConfigDocument| -> Option<Value> {
            doc.get(OPTIMIZER_ARGS_KEY).filter(|v| !v.is_null()).cloned()
        };

        if set(base) == set(other) {
            return None;
        }

        Some(ArgsDiff {
            base: optimizer_args_text(base),
            other: optimizer_args_text(other),
        })
    }
}
