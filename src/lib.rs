//! kohya-tweaks - Edit, compare and save Kohya LoRA training configs
//!
//! Configs stay untyped JSON objects; only a curated set of fields is
//! exposed for editing, and everything else is written back untouched.

pub mod commands;
pub mod compare;
pub mod config;
pub mod document;
pub mod fields;
pub mod model;
pub mod naming;
pub mod report;
pub mod session;

pub use fields::{ConfigDocument, FieldValue, TweakField, Variant, DAILY_TWEAKS, IMPORTANT_PARAMS};
pub use model::{ConfigModel, ModelError, Status, TweakValue};
