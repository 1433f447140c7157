use serde::{de, Deserialize, Deserializer};

/// One search hit from Nominatim. Only the fields the search pipeline uses
/// are kept.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Place {
    #[serde(deserialize_with = "number_or_string")]
    pub lat: f64,
    #[serde(deserialize_with = "number_or_string")]
    pub lon: f64,
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Numeric {
    Number(f64),
    Text(String),
}

/// Nominatim sends coordinates as strings; other deployments send numbers.
fn number_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match Numeric::deserialize(deserializer)? {
        Numeric::Number(n) => n,
        Numeric::Text(s) => match s.trim().parse::<f64>() {
            Ok(n) => n,
            Err(e) => return Err(invalid(format!("invalid coordinate '{s}': {e}"))),
        },
    };

    if value.is_finite() {
        Ok(value)
    } else {
        Err(invalid("coordinate is not a finite number"))
    }
}

fn invalid<E: de::Error>(message: impl std::fmt::Display) -> E {
    E::custom(message)
}
