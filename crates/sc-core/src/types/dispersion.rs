//! Dispersion statistics returned by the `/calculate` endpoint.

use serde::{Deserialize, Deserializer, Serialize, de};

/// Measures of spread for one numeric column.
///
/// # Examples
///
/// ```
/// use sc_core::Dispersion;
///
/// let dispersion = Dispersion {
///     standard_deviation: 2.5,
///     variance: 6.25,
///     range: 10.0,
///     interquartile_range: 4.0,
/// };
/// assert_eq!(dispersion.lines()[2], "Range: 10.00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dispersion {
    /// Sample standard deviation.
    pub standard_deviation: f64,
    /// Sample variance.
    pub variance: f64,
    /// Maximum minus minimum.
    pub range: f64,
    /// Third quartile minus first quartile.
    pub interquartile_range: f64,
}

/// One labeled field of a [`Dispersion`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DispersionField {
    /// Standard deviation.
    StandardDeviation,
    /// Variance.
    Variance,
    /// Range.
    Range,
    /// Interquartile range.
    InterquartileRange,
}

impl DispersionField {
    /// All fields in display order.
    pub const ALL: [Self; 4] = [
        Self::StandardDeviation,
        Self::Variance,
        Self::Range,
        Self::InterquartileRange,
    ];

    /// Returns the label printed before the value.
    #[inline]
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::StandardDeviation => "Standard Deviation",
            Self::Variance => "Variance",
            Self::Range => "Range",
            Self::InterquartileRange => "Interquartile Range",
        }
    }
}

impl Dispersion {
    /// Returns the value of one field.
    #[inline]
    #[must_use]
    pub const fn get(&self, field: DispersionField) -> f64 {
        match field {
            DispersionField::StandardDeviation => self.standard_deviation,
            DispersionField::Variance => self.variance,
            DispersionField::Range => self.range,
            DispersionField::InterquartileRange => self.interquartile_range,
        }
    }

    /// Renders every field as `Label: value`, always with two decimals.
    #[must_use]
    pub fn lines(&self) -> [String; 4] {
        DispersionField::ALL.map(|field| format!("{}: {:.2}", field.label(), self.get(field)))
    }
}

/// Body of a `/calculate` response.
///
/// The service either returns the four measures or an object carrying an
/// `error` message. A body with a non-empty `error` is always the failure
/// variant, even if measure fields are present too. An empty `error` counts as
/// absent, so the body must then carry the measures to decode at all.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DispersionResponse {
    /// The service rejected the request.
    Failure {
        /// Human-readable reason. Never empty.
        #[serde(deserialize_with = "non_empty")]
        error: String,
    },
    /// The computed measures.
    Success(Dispersion),
}

fn non_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    if value.is_empty() {
        return Err(de::Error::invalid_value(
            de::Unexpected::Str(&value),
            &"a non-empty error message",
        ));
    }
    Ok(value)
}

impl DispersionResponse {
    /// Converts the response into a `Result`, with the server message as the error.
    pub fn into_result(self) -> Result<Dispersion, String> {
        match self {
            Self::Success(dispersion) => Ok(dispersion),
            Self::Failure { error } => Err(error),
        }
    }
}
