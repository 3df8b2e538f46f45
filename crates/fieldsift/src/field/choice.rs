//! Case-insensitive prefix completion against a fixed set of names.
//!
//! Used both for choice filter values and for FIELD arguments of options such
//! as `--sort`.

use crate::error::FieldError;

/// Completes `raw` to one of `candidates`.
///
/// An exact (case-insensitive) match wins. Otherwise `raw` must be the prefix
/// of exactly one candidate. Returns the index of the chosen candidate.
pub(crate) fn complete<S: AsRef<str>>(raw: &str, candidates: &[S]) -> Result<usize, FieldError> {
    let needle = raw.trim().to_lowercase();

    if let Some(index) = candidates
        .iter()
        .position(|c| c.as_ref().to_lowercase() == needle)
    {
        return Ok(index);
    }

    let prefixed: Vec<usize> = candidates
        .iter()
        .enumerate()
        .filter(|(_, c)| c.as_ref().to_lowercase().starts_with(&needle))
        .map(|(index, _)| index)
        .collect();

    match prefixed.as_slice() {
        [index] => Ok(*index),
        [] => Err(FieldError::InvalidChoice {
            value: raw.to_string(),
            choices: listing(candidates),
        }),
        _ => Err(FieldError::AmbiguousChoice {
            value: raw.to_string(),
            choices: listing(candidates),
        }),
    }
}

/// Lists names lowercased and sorted, the way help texts and errors show
/// them.
pub(crate) fn listing<I, S>(names: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut names: Vec<String> = names
        .into_iter()
        .map(|name| name.as_ref().to_lowercase())
        .collect();
    names.sort();
    names.dedup();
    names.join(", ")
}
