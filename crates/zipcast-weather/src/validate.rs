//! Zip and country code checks. Pure; no I/O.

use crate::error::ValidationError;
use crate::types::ValidatedQuery;

const ZIP_LEN: usize = 5;
const COUNTRY_LEN: usize = 2;

/// Validate a zip code on its own. Returns the trimmed code.
pub fn validate_zip(raw_zip: &str) -> Result<String, ValidationError> {
    let zip = raw_zip.trim();

    if zip.is_empty() {
        return Err(ValidationError::EmptyInput);
    }

    if zip.len() != ZIP_LEN || !zip.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::InvalidZipFormat(zip.to_string()));
    }

    Ok(zip.to_string())
}

/// Validate a zip/country pair.
///
/// The country code is trimmed and checked case-insensitively but keeps the
/// caller's casing.
pub fn validate(raw_zip: &str, raw_country: &str) -> Result<ValidatedQuery, ValidationError> {
    let zip = validate_zip(raw_zip)?;
    let country = raw_country.trim();

    if country.len() != COUNTRY_LEN || !country.bytes().all(|b| b.is_ascii_alphabetic()) {
        return Err(ValidationError::InvalidCountryFormat(country.to_string()));
    }

    Ok(ValidatedQuery {
        zip,
        country: country.to_string(),
    })
}
