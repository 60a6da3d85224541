//! Environment variable expansion for configuration strings.

use std::sync::LazyLock;

use regex::Regex;

use crate::ConfigError;

/// `${VAR}` references without a default value.
static REQUIRED_VAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("valid regex")
});

/// Expand environment variable references in a string.
///
/// Supports:
/// - `${VAR}` - expands to the value of VAR, errors if unset
/// - `${VAR:-default}` - expands to VAR if set, otherwise uses default
///
/// Returns the original string unchanged if no `$` is present.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains('$') {
        return Ok(value.to_owned());
    }

    if let Some(var) = REQUIRED_VAR
        .captures_iter(value)
        .map(|caps| caps[1].to_owned())
        .find(|var| std::env::var_os(var).is_none())
    {
        return Err(ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{var}}} not set"),
        });
    }

    let expanded = shellexpand::env_with_context_no_errors(value, |var| std::env::var(var).ok());
    Ok(expanded.into_owned())
}

/// Expand environment variables, then a leading `~`, in a path string.
pub(crate) fn expand_path(value: &str, field: &str) -> Result<String, ConfigError> {
    let expanded = expand_env(value, field)?;
    Ok(shellexpand::tilde(&expanded).into_owned())
}
