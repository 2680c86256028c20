//! Environment variable expansion for configuration strings.

use std::env::VarError;

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references using the process environment.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    expand_with(value, field, |name| match std::env::var(name) {
        Ok(v) => Ok(Some(v)),
        Err(VarError::NotPresent) => Ok(None),
        Err(e) => Err(e),
    })
}

/// Expand variable references using a custom lookup.
///
/// A variable that resolves to `None` and has no `:-default` is an error.
pub(crate) fn expand_with<F>(value: &str, field: &str, lookup: F) -> Result<String, ConfigError>
where
    F: FnMut(&str) -> Result<Option<String>, VarError>,
{
    shellexpand::env_with_context(value, lookup)
        .map(std::borrow::Cow::into_owned)
        .map_err(|e| ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{}}} {}", e.var_name, describe(&e.cause)),
        })
}

fn describe(cause: &VarError) -> &'static str {
    match cause {
        VarError::NotPresent => "not set",
        VarError::NotUnicode(_) => "is not valid unicode",
    }
}
