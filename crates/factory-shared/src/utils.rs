//! Utility functions

use serde::{Deserialize, Deserializer};

/// Masks the local part of an email for log output.
pub fn mask_email(email: &str) -> String {
    if let Some(at_pos) = email.find('@') {
        let (local, domain) = email.split_at(at_pos);
        let shown = if local.chars().count() <= 2 { 1 } else { 2 };
        let prefix: String = local.chars().take(shown).collect();
        format!("{}***{}", prefix, domain)
    } else {
        "***".to_string()
    }
}

/// Trims the address and lower-cases its domain part. The local part is kept
/// as typed.
pub fn normalize_email(email: &str) -> String {
    let email = email.trim();
    match email.rsplit_once('@') {
        Some((local, domain)) => format!("{}@{}", local, domain.to_lowercase()),
        None => email.to_string(),
    }
}

/// Deserializes a field that distinguishes "absent" from "explicit null".
///
/// Use together with `#[serde(default)]`: a missing key yields `None`,
/// `null` yields `Some(None)` and a value yields `Some(Some(v))`.
pub fn deserialize_nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
