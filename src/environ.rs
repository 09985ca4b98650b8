//! Configuration taken from the process environment.

use std::ffi::{OsStr, OsString};

#[derive(Debug, PartialEq, thiserror::Error)]
#[error("Invalid value of {name:?}: {value:?}")]
pub struct InvalidEnvValue {
    name: OsString,
    value: OsString,
}

/// Value of variable `name`, treating an empty value the same as unset.
pub fn get<N: AsRef<OsStr>>(
    name: N,
) -> Result<Option<String>, InvalidEnvValue> {
    let name = name.as_ref();
    let value = match std::env::var_os(name) {
        Some(value) => value.into_string().map_err(|value| InvalidEnvValue {
            name: name.into(),
            value,
        })?,
        None => return Ok(None),
    };
    Ok(Some(value).filter(|value| !value.is_empty()))
}

pub fn get_or<N: AsRef<OsStr>>(
    name: N,
    default: &str,
) -> Result<String, InvalidEnvValue> {
    Ok(get(name)?.unwrap_or_else(|| default.into()))
}
