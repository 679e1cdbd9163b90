//! In-place `${VAR}` expansion of config fields.

use std::env::VarError;

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in one config field.
///
/// Fields without `${` are left as they are, so URLs carrying a bare `$`
/// survive untouched.
pub(crate) fn expand_field(value: &mut String, field: &str) -> Result<(), ConfigError> {
    if !value.contains("${") {
        return Ok(());
    }

    let expanded = shellexpand::env(value.as_str()).map_err(|e| {
        let message = match e.cause {
            VarError::NotPresent => format!("${{{}}} not set", e.var_name),
            VarError::NotUnicode(_) => format!("${{{}}} is not valid unicode", e.var_name),
        };
        ConfigError::EnvVar {
            field: field.to_owned(),
            message,
        }
    })?;
    *value = expanded.into_owned();
    Ok(())
}
