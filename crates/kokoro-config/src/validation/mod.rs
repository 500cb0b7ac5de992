//! Full configuration validation.
//!
//! Each section pushes its problems into a shared list; the orchestrator
//! collects them into a single `ConfigError`.


use crate::schema::KokoroConfig;
use kokoro_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &KokoroConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_model(&mut errors, config);
    validate_risk(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_model(errors: &mut Vec<String>, config: &KokoroConfig) {
    let name = &config.model.name;
    if name.is_empty() {
        errors.push("model.name must not be empty".into());
        return;
    }
    // The name becomes a URL path segment.
    if name.chars().any(char::is_whitespace) || name.contains('/') {
        errors.push(format!(
            "model.name = {name:?} must not contain whitespace or '/'"
        ));
    }
}

fn validate_risk(errors: &mut Vec<String>, config: &KokoroConfig) {
    let Some(keywords) = &config.risk.keywords else {
        return;
    };
    if keywords.is_empty() {
        errors.push("risk.keywords must contain at least one keyword".into());
    }
    for (i, kw) in keywords.iter().enumerate() {
        if kw.is_empty() {
            errors.push(format!("risk.keywords[{i}] is empty"));
        }
    }
}
