//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# kokoro configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[model]
# Gemini model variant, e.g. "gemini-1.5-flash" or "gemini-1.0-pro".
name = "gemini-1.5-flash"

[risk]
# Phrases that trigger the caution notice when they appear in either the
# user's message or the reply. Matching is case-sensitive substring search.
# Leave commented out to use the built-in set.
# keywords = ["死にたい", "自殺", "消えたい", "限界", "苦しい", "つらい", "もうダメ"]

[logging]
# level = "INFO"         # TRACE, DEBUG, INFO, WARNING, ERROR
"##
    .to_string()
}
