//! Structured reports and their markdown rendering
//!
//! Reports are built as plain data first so their content can be checked
//! without caring about formatting. Text is produced only by `to_markdown`.

use crate::fields::{
    report_value, ConfigDocument, TweakField, DAILY_TWEAKS, IMPORTANT_PARAMS, OPTIMIZER_ARGS_KEY,
};

/// Shown instead of a summary when nothing is loaded
pub const NO_CONFIG_SUMMARY: &str = "No configuration loaded. Please load a base config first.";

/// A labelled field value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldLine {
    pub label: &'static str,
    pub value: String,
}

/// Overview of the fields a user cares about in one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSummary {
    pub daily: Vec<FieldLine>,
    pub important: Vec<FieldLine>,
    pub optimizer_args: String,
}

impl ConfigSummary {
    pub fn from_document(doc: &ConfigDocument) -> Self {
        let lines = |catalog: &[TweakField]| -> Vec<FieldLine> {
            catalog
                .iter()
                .map(|field| FieldLine {
                    label: field.label,
                    value: report_value(doc.get(field.key)),
                })
                .collect()
        };

        Self {
            daily: lines(DAILY_TWEAKS),
            important: lines(IMPORTANT_PARAMS),
            optimizer_args: optimizer_args_text(doc),
        }
    }

    pub fn to_markdown(&self) -> String {
        let mut parts = vec!["## 🎯 Current Configuration Summary".to_string()];

        parts.push(String::new());
        parts.push("### Daily Tweaks".to_string());
        parts.extend(self.daily.iter().map(bullet));

        parts.push(String::new());
        parts.push("### Key Settings (Important Parameters)".to_string());
        parts.extend(self.important.iter().map(bullet));
        parts.push(format!("- **Optimizer Args:** `{}`", self.optimizer_args));

        parts.join("\n")
    }
}

fn bullet(line: &FieldLine) -> String {
    format!("- **{}:** `{}`", line.label, line.value)
}

/// `optimizer_args` as text; absent and null both read "Not set"
pub(crate) fn optimizer_args_text(doc: &ConfigDocument) -> String {
    match doc.get(OPTIMIZER_ARGS_KEY) {
        Some(v) if !v.is_null() => report_value(Some(v)),
        _ => report_value(None),
    }
}

/// One field that differs between two documents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDiff {
    pub key: &'static str,
    pub label: &'static str,
    pub base: String,
    pub other: String,
}

/// Differing `optimizer_args`, already rendered as text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgsDiff {
    pub base: String,
    pub other: String,
}

/// Closing remark of a comparison when no key parameter changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Nothing in the three passes differs
    Equivalent,
    /// Only the optimizer name differs
    OptimizersDiffer,
}

/// Result of comparing a base document against another
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    pub base_status: String,
    pub comparison_status: String,
    pub daily: Vec<FieldDiff>,
    pub important: Vec<FieldDiff>,
    pub optimizer_args: Option<ArgsDiff>,
    pub verdict: Option<Verdict>,
}

impl Comparison {
    /// Total number of differing entries across all passes
    pub fn difference_count(&self) -> usize {
        self.daily.len() + self.important.len() + usize::from(self.optimizer_args.is_some())
    }

    pub fn to_markdown(&self) -> String {
        let mut blocks = vec![
            "## 🔍 Configuration Comparison".to_string(),
            format!("**Base:** {}", self.base_status),
            format!("**Comparison:** {}", self.comparison_status),
        ];

        if !self.daily.is_empty() {
            blocks.push("### 📝 Daily Tweaks Differences".to_string());
            blocks.extend(self.daily.iter().map(|d| {
                format!(
                    "**{}:**\n  Base: `{}`\n  Comparison: `{}`",
                    d.label, d.base, d.other
                )
            }));
        }

        if !self.important.is_empty() {
            blocks.push("### ⚙️ Important Parameter Differences".to_string());
            blocks.extend(
                self.important
                    .iter()
                    .map(|d| format!("**{}:** `{}` → `{}`", d.label, d.base, d.other)),
            );
        }

        if let Some(args) = &self.optimizer_args {
            blocks.push("### 🔧 Optimizer Arguments Changed".to_string());
            blocks.push(format!("Base Args: `{}`", args.base));
            blocks.push(format!("Comparison Args: `{}`", args.other));
        }

        match self.verdict {
            Some(Verdict::Equivalent) => {
                blocks.push("✅ **Configurations are very similar in key parameters!**".to_string())
            }
            Some(Verdict::OptimizersDiffer) => blocks.push(
                "⚠️ **Optimizers differ, but other key parameters are similar.**".to_string(),
            ),
            None => {}
        }

        blocks.join("\n\n")
    }
}
