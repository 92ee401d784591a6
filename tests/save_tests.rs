// Integration tests for filename suggestion and saving

use anyhow::Result;
use kohya_tweaks::model;
use kohya_tweaks::naming::{suggest_filename, suggest_from_inputs, FALLBACK_FILENAME};
use kohya_tweaks::{ConfigDocument, ConfigModel, ModelError};
use serde_json::{json, Value};
use std::fs;
use tempfile::TempDir;

fn doc(value: Value) -> ConfigDocument {
    value.as_object().cloned().unwrap()
}

#[test]
fn test_filename_from_output_name() {
    let working = doc(json!({"output_name": "TestLoRA_v1"}));
    assert_eq!(suggest_filename(&working), "TestLoRA_v1_config.json");
}

#[test]
fn test_filename_from_training_comment() {
    let working = doc(json!({
        "output_name": "",
        "training_comment": "mychar_concept by artist"
    }));
    assert_eq!(suggest_filename(&working), "mychar_concept_config.json");

    let working = doc(json!({"training_comment": "another concept", "optimizer": "AdamW"}));
    assert_eq!(suggest_filename(&working), "another_concept_config.json");
}

#[test]
fn test_filename_sanitizes_output_name() {
    let working = doc(json!({"output_name": "Lora With Spaces"}));
    assert_eq!(suggest_filename(&working), "Lora_With_Spaces_config.json");

    let working = doc(json!({"output_name": "Invalid!@#Chars"}));
    assert_eq!(suggest_filename(&working), "Invalid___Chars_config.json");
}

#[test]
fn test_filename_fallbacks() {
    assert_eq!(suggest_filename(&ConfigDocument::new()), FALLBACK_FILENAME);

    let working = doc(json!({"optimizer": "AdamW"}));
    assert_eq!(suggest_filename(&working), "modified_config.json");
}

#[test]
fn test_filename_from_form_inputs() {
    assert_eq!(suggest_from_inputs("v2 final", "ignored"), "v2_final_config.json");
    assert_eq!(suggest_from_inputs("", "zz, woman"), "zz_woman_config.json");
    assert_eq!(suggest_from_inputs("", "a photo of sks"), "a_photo_config.json");
}

#[test]
fn test_save_requires_config_and_name() -> Result<()> {
    let temp = TempDir::new()?;

    let status = model::save(&ConfigDocument::new(), "out", temp.path());
    assert!(matches!(status.error(), Some(ModelError::EmptyConfig)));

    let working = doc(json!({"epoch": 1}));
    let status = model::save(&working, "   ", temp.path());
    assert!(matches!(status.error(), Some(ModelError::EmptyFilename)));
    Ok(())
}

#[test]
fn test_save_appends_json_suffix() -> Result<()> {
    let temp = TempDir::new()?;
    let working = doc(json!({"epoch": 1}));

    let status = model::save(&working, "my_run", temp.path());
    assert!(status.is_success(), "{}", status);
    assert!(temp.path().join("my_run.json").exists());

    let status = model::save(&working, "Upper.JSON", temp.path());
    assert!(status.is_success());
    assert!(temp.path().join("Upper.JSON").exists());
    assert!(!temp.path().join("Upper.JSON.json").exists());
    Ok(())
}

#[test]
fn test_save_reports_absolute_path() -> Result<()> {
    let temp = TempDir::new()?;
    let working = doc(json!({"epoch": 1}));

    let status = model::save(&working, "abs.json", temp.path());
    let expected = fs::canonicalize(temp.path().join("abs.json"))?;
    assert_eq!(
        status.to_string(),
        format!("✅ Configuration saved successfully as: {}", expected.display())
    );
    Ok(())
}

#[test]
fn test_save_round_trip() -> Result<()> {
    let temp = TempDir::new()?;
    let source = temp.path().join("source.json");
    fs::write(
        &source,
        serde_json::to_string(&json!({
            "output_name": "Drache",
            "training_comment": "drache ✨ über",
            "epoch": 10,
            "learning_rate": 0.0001,
            "sdxl": true,
            "optimizer_args": ["betas=0.9,0.99"],
            "nested": {"a": [1, 2, {"b": null}]}
        }))?,
    )?;

    let (model, _, _) = ConfigModel::new().set_base(&source);
    let (model, _) = model.update_tweaks([("epoch", "12")]);
    let out_dir = temp.path().join("configs");
    assert!(model.save("roundtrip", &out_dir).is_success());

    let saved = out_dir.join("roundtrip.json");
    let (reloaded, status) = model::load(&saved);
    assert!(status.is_success());
    assert_eq!(&reloaded, model.working());

    let keys: Vec<&String> = reloaded.keys().collect();
    let expected: Vec<&String> = model.working().keys().collect();
    assert_eq!(keys, expected);
    Ok(())
}

#[test]
fn test_save_pretty_prints_and_keeps_unicode() -> Result<()> {
    let temp = TempDir::new()?;
    let working = doc(json!({"training_comment": "über", "epoch": 1}));

    assert!(model::save(&working, "pretty", temp.path()).is_success());
    let text = fs::read_to_string(temp.path().join("pretty.json"))?;

    assert_eq!(text, "{\n  \"training_comment\": \"über\",\n  \"epoch\": 1\n}");
    Ok(())
}

#[test]
fn test_save_creates_missing_directory_idempotently() -> Result<()> {
    let temp = TempDir::new()?;
    let out_dir = temp.path().join("deep").join("configs");
    let working = doc(json!({"epoch": 1}));

    assert!(model::save(&working, "first", &out_dir).is_success());
    assert!(model::save(&working, "first", &out_dir).is_success());
    assert!(out_dir.join("first.json").exists());
    Ok(())
}

#[test]
fn test_save_overwrites_existing_file() -> Result<()> {
    let temp = TempDir::new()?;
    fs::write(temp.path().join("same.json"), "old contents")?;

    let working = doc(json!({"epoch": 2}));
    assert!(model::save(&working, "same.json", temp.path()).is_success());

    let (reloaded, _) = model::load(&temp.path().join("same.json"));
    assert_eq!(reloaded, working);
    Ok(())
}

#[test]
fn test_save_into_a_file_path_fails_with_io_error() -> Result<()> {
    let temp = TempDir::new()?;
    let blocker = temp.path().join("blocker");
    fs::write(&blocker, "not a directory")?;

    let working = doc(json!({"epoch": 1}));
    let status = model::save(&working, "x", &blocker);
    assert!(matches!(status.error(), Some(ModelError::Io { .. })));
    Ok(())
}
