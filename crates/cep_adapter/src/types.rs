use serde::{Deserialize, Serialize};

/// A resolved address, normalized across providers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// Postal code, digits only
    pub code: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub street: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub neighborhood: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub city: String,
    /// Federative unit (two-letter region)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub state: String,
    /// Identifier of the provider that produced this address
    pub source: String,
}

impl Address {
    /// An address without a code carries no usable data.
    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }

    /// Labelled optional fields that hold a value, in display order.
    pub fn fields(&self) -> Vec<(&'static str, &str)> {
        [
            ("Street", self.street.as_str()),
            ("Neighborhood", self.neighborhood.as_str()),
            ("City", self.city.as_str()),
            ("State", self.state.as_str()),
        ]
        .into_iter()
        .filter(|(_, v)| !v.is_empty())
        .collect()
    }
}

/// Keep only the digits of an upstream code, falling back to the requested one.
pub(crate) fn normalize_code(upstream: &str, requested: &str) -> String {
    let digits: String = upstream.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        requested.to_string()
    } else {
        digits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Address {
        Address {
            code: "01153000".into(),
            street: "Rua Vitorino Carmilo".into(),
            neighborhood: String::new(),
            city: "São Paulo".into(),
            state: "SP".into(),
            source: "ViaCEP".into(),
        }
    }

    #[test]
    fn fields_skip_empty_values() {
        let labels: Vec<&str> = sample().fields().into_iter().map(|(l, _)| l).collect();
        assert_eq!(labels, vec!["Street", "City", "State"]);
    }

    #[test]
    fn empty_optional_fields_are_not_serialized() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["code"], "01153000");
        assert_eq!(json["source"], "ViaCEP");
        assert!(json.get("neighborhood").is_none());
    }

    #[test]
    fn missing_optional_fields_deserialize_as_empty() {
        let addr: Address =
            serde_json::from_str(r#"{"code":"01153000","source":"BrasilAPI"}"#).unwrap();
        assert!(addr.street.is_empty());
        assert!(!addr.is_empty());
    }

    #[test]
    fn address_without_code_is_empty() {
        assert!(Address::default().is_empty());
    }

    #[test]
    fn upstream_code_is_stripped_to_digits() {
        assert_eq!(normalize_code("01153-000", "99999999"), "01153000");
        assert_eq!(normalize_code("", "01153000"), "01153000");
    }
}
