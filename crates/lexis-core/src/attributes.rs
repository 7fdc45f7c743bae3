use crate::error::AttributeError;

/// Frequency given to words that arrive without explicit attributes
pub const DEFAULT_FREQUENCY: i32 = 1000;

/// Resolve the attribute string handed to the main dictionary.
///
/// With no tokens the default attribute is used at [`DEFAULT_FREQUENCY`].
/// Otherwise tokens are read as `(name, frequency)` pairs and re-joined with
/// single spaces, in input order. An unpaired trailing token is an error.
pub fn resolve_attributes(
    default_attribute: &str,
    tokens: &[String],
) -> Result<String, AttributeError> {
    if tokens.is_empty() {
        return Ok(format!("{} {}", default_attribute, DEFAULT_FREQUENCY));
    }

    let mut pairs = Vec::with_capacity(tokens.len() / 2);
    for pair in tokens.chunks(2) {
        let [name, value] = pair else {
            return Err(AttributeError::Unpaired(pair[0].clone()));
        };

        let frequency: i32 = value
            .parse()
            .map_err(|source| AttributeError::InvalidFrequency {
                attribute: name.clone(),
                value: value.clone(),
                source,
            })?;

        pairs.push(format!("{} {}", name, frequency));
    }

    Ok(pairs.join(" "))
}
