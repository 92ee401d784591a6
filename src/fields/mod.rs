//! Field catalogs and typed views over Kohya training configs
//!
//! A config document stays an untyped JSON object. This module adds the
//! small typed surface on top of it: the variant a document belongs to, the
//! curated tweak catalogs, and a tagged view of a single field value.

use serde_json::{Map, Number, Value};

/// A training configuration document (top-level JSON object, key order preserved)
pub type ConfigDocument = Map<String, Value>;

/// Training config variant, decided by a fixed precedence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Flux1Lora,
    SdxlLora,
    StandardLora,
    Unknown,
}

impl Variant {
    /// Classify a document.
    ///
    /// Checks run in order and stop at the first match:
    /// `LoRA_type == "Flux1"`, then a truthy `sdxl`, then
    /// `LoRA_type == "Standard"`.
    pub fn classify(doc: &ConfigDocument) -> Self {
        let lora_type = doc.get("LoRA_type").and_then(|v| v.as_str());

        if lora_type == Some("Flux1") {
            Variant::Flux1Lora
        } else if doc.get("sdxl").is_some_and(is_truthy) {
            Variant::SdxlLora
        } else if lora_type == Some("Standard") {
            Variant::StandardLora
        } else {
            Variant::Unknown
        }
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Variant::Flux1Lora => write!(f, "Flux1 LoRA"),
            Variant::SdxlLora => write!(f, "SDXL LoRA"),
            Variant::StandardLora => write!(f, "Standard LoRA"),
            Variant::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Truthiness of a JSON value: false, null, zero, and empty containers are falsy
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// A field exposed for editing or review
#[derive(Debug, PartialEq, Eq)]
pub struct TweakField {
    pub key: &'static str,
    pub label: &'static str,
}

/// Fields changed on nearly every training run, in display order
pub const DAILY_TWEAKS: &[TweakField] = &[
    TweakField { key: "output_name", label: "Output Name" },
    TweakField { key: "training_comment", label: "Training Comment (Trigger Words)" },
    TweakField { key: "sample_prompts", label: "Sample Prompts" },
    TweakField { key: "learning_rate", label: "Learning Rate" },
    TweakField { key: "unet_lr", label: "UNet Learning Rate" },
    TweakField { key: "text_encoder_lr", label: "Text Encoder Learning Rate" },
    TweakField { key: "epoch", label: "Epochs" },
    TweakField { key: "max_train_steps", label: "Max Train Steps" },
    TweakField { key: "seed", label: "Seed" },
    TweakField { key: "train_batch_size", label: "Batch Size" },
];

/// Rarely edited fields that still change what a run produces
pub const IMPORTANT_PARAMS: &[TweakField] = &[
    TweakField { key: "optimizer", label: "Optimizer" },
    TweakField { key: "lr_scheduler", label: "LR Scheduler" },
    TweakField { key: "network_dim", label: "Network Dimension" },
    TweakField { key: "network_alpha", label: "Network Alpha" },
    TweakField { key: "noise_offset", label: "Noise Offset" },
    TweakField { key: "min_snr_gamma", label: "Min SNR Gamma" },
    TweakField { key: "save_every_n_epochs", label: "Save Every N Epochs" },
    TweakField { key: "save_every_n_steps", label: "Save Every N Steps" },
];

pub const OPTIMIZER_KEY: &str = "optimizer";
pub const OPTIMIZER_ARGS_KEY: &str = "optimizer_args";

/// Placeholder shown for a field the document does not carry
pub const NOT_SET: &str = "Not set";

/// Look up a daily tweak by key
pub fn daily_tweak(key: &str) -> Option<&'static TweakField> {
    DAILY_TWEAKS.iter().find(|f| f.key == key)
}

/// Natural string form of a JSON value.
///
/// Strings come back unquoted, null as an empty string, and everything
/// else in its JSON text form.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Like [`display_value`], but absent fields read [`NOT_SET`] and null reads `null`
pub fn report_value(value: Option<&Value>) -> String {
    match value {
        None => NOT_SET.to_string(),
        Some(Value::Null) => "null".to_string(),
        Some(v) => display_value(v),
    }
}

/// Tagged view of a field value, used to drive type-preserving edits
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Boolean(bool),
    Integer(i64),
    /// Integers above `i64::MAX`
    Unsigned(u64),
    Float(f64),
    String(String),
    Null,
    Other(Value),
}

/// Inputs that switch a boolean field on
const TRUTHY_INPUTS: &[&str] = &["true", "1", "yes", "on", "checked"];

impl FieldValue {
    /// Tag an existing field. Absent fields are treated like null.
    pub fn from_json(value: Option<&Value>) -> Self {
        match value {
            None | Some(Value::Null) => FieldValue::Null,
            Some(Value::Bool(b)) => FieldValue::Boolean(*b),
            Some(Value::Number(n)) => {
                if let Some(i) = n.as_i64() {
                    FieldValue::Integer(i)
                } else if let Some(u) = n.as_u64() {
                    FieldValue::Unsigned(u)
                } else {
                    FieldValue::Float(n.as_f64().unwrap_or_default())
                }
            }
            Some(Value::String(s)) => FieldValue::String(s.clone()),
            Some(other) => FieldValue::Other(other.clone()),
        }
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, FieldValue::Boolean(_))
    }

    /// Reinterpret a raw form input using this value's type.
    ///
    /// Booleans accept a fixed set of truthy words. Integers take anything
    /// that fits `i64` or `u64` and floats anything finite; otherwise both
    /// fall back to the raw string. Anything else takes the raw string
    /// unchanged.
    pub fn coerce(&self, input: &str) -> FieldValue {
        match self {
            FieldValue::Boolean(_) => {
                let lowered = input.to_lowercase();
                FieldValue::Boolean(TRUTHY_INPUTS.contains(&lowered.as_str()))
            }
            FieldValue::Integer(_) | FieldValue::Unsigned(_) => parse_integer(input.trim())
                .unwrap_or_else(|| FieldValue::String(input.to_string())),
            FieldValue::Float(_) => match input.trim().parse::<f64>() {
                Ok(f) if f.is_finite() => FieldValue::Float(f),
                _ => FieldValue::String(input.to_string()),
            },
            FieldValue::String(_) | FieldValue::Null | FieldValue::Other(_) => {
                FieldValue::String(input.to_string())
            }
        }
    }

    pub fn into_json(self) -> Value {
        match self {
            FieldValue::Boolean(b) => Value::Bool(b),
            FieldValue::Integer(i) => Value::Number(i.into()),
            FieldValue::Unsigned(u) => Value::Number(u.into()),
            FieldValue::Float(f) => Number::from_f64(f)
                .map(Value::Number)
                .unwrap_or_else(|| Value::String(f.to_string())),
            FieldValue::String(s) => Value::String(s),
            FieldValue::Null => Value::Null,
            FieldValue::Other(v) => v,
        }
    }
}

fn parse_integer(input: &str) -> Option<FieldValue> {
    if let Ok(i) = input.parse::<i64>() {
        return Some(FieldValue::Integer(i));
    }
    input.parse::<u64>().ok().map(FieldValue::Unsigned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> ConfigDocument {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_flux_wins_over_sdxl() {
        let d = doc(json!({"LoRA_type": "Flux1", "sdxl": true}));
        assert_eq!(Variant::classify(&d), Variant::Flux1Lora);
    }

    #[test]
    fn test_sdxl_wins_over_standard() {
        let d = doc(json!({"LoRA_type": "Standard", "sdxl": true}));
        assert_eq!(Variant::classify(&d), Variant::SdxlLora);
    }

    #[test]
    fn test_falsy_sdxl_falls_through() {
        let d = doc(json!({"LoRA_type": "Standard", "sdxl": false}));
        assert_eq!(Variant::classify(&d), Variant::StandardLora);

        let d = doc(json!({"sdxl": 0}));
        assert_eq!(Variant::classify(&d), Variant::Unknown);
    }

    #[test]
    fn test_unknown_when_nothing_matches() {
        assert_eq!(Variant::classify(&ConfigDocument::new()), Variant::Unknown);
        let d = doc(json!({"LoRA_type": "LyCORIS/LoHa"}));
        assert_eq!(Variant::classify(&d), Variant::Unknown);
    }

    #[test]
    fn test_coerce_integer() {
        let v = FieldValue::Integer(10);
        assert_eq!(v.coerce("15"), FieldValue::Integer(15));
        assert_eq!(v.coerce("abc"), FieldValue::String("abc".to_string()));
        assert_eq!(v.coerce(" -3 "), FieldValue::Integer(-3));
        assert_eq!(
            v.coerce("18446744073709551615"),
            FieldValue::Unsigned(u64::MAX)
        );
    }

    #[test]
    fn test_large_integers_stay_integers() {
        let v = FieldValue::from_json(Some(&json!(u64::MAX)));
        assert_eq!(v, FieldValue::Unsigned(u64::MAX));
        assert_eq!(v.coerce("42"), FieldValue::Integer(42));
        assert_eq!(v.coerce("42").into_json(), json!(42));
        assert_eq!(
            v.coerce("99999999999999999999"),
            FieldValue::String("99999999999999999999".to_string())
        );
    }

    #[test]
    fn test_coerce_float() {
        let v = FieldValue::Float(0.0001);
        assert_eq!(v.coerce("2e-4"), FieldValue::Float(0.0002));
        assert_eq!(v.coerce("fast"), FieldValue::String("fast".to_string()));
        assert_eq!(v.coerce("inf"), FieldValue::String("inf".to_string()));
    }

    #[test]
    fn test_coerce_boolean() {
        let v = FieldValue::Boolean(false);
        assert_eq!(v.coerce("Checked"), FieldValue::Boolean(true));
        assert_eq!(v.coerce("ON"), FieldValue::Boolean(true));
        assert_eq!(v.coerce(""), FieldValue::Boolean(false));
        assert_eq!(v.coerce("nope"), FieldValue::Boolean(false));
    }

    #[test]
    fn test_coerce_string_and_null_keep_raw_input() {
        assert_eq!(
            FieldValue::Null.coerce("42"),
            FieldValue::String("42".to_string())
        );
        assert_eq!(
            FieldValue::String("a".to_string()).coerce(" b "),
            FieldValue::String(" b ".to_string())
        );
    }

    #[test]
    fn test_display_value() {
        assert_eq!(display_value(&json!(10)), "10");
        assert_eq!(display_value(&json!(0.0001)), "0.0001");
        assert_eq!(display_value(&json!(true)), "true");
        assert_eq!(display_value(&json!("x y")), "x y");
        assert_eq!(display_value(&Value::Null), "");
        assert_eq!(report_value(None), NOT_SET);
    }
}
