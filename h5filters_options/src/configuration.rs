use derive_more::{Deref, Display, From, Into};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// A filter configuration: a JSON object of named filter parameters.
///
/// For example, the configuration of a `blosc` filter:
/// ```json
/// {
///     "cname": "zstd",
///     "clevel": 5,
///     "shuffle": 1
/// }
/// ```
#[derive(Default, Serialize, Deserialize, Clone, Eq, PartialEq, Debug, Display, Deref, From, Into)]
#[display("{}", serde_json::to_string(self).unwrap_or_default())]
pub struct Configuration(serde_json::Map<String, serde_json::Value>);

impl Configuration {
    /// Create a configuration from a serializable typed configuration.
    ///
    /// # Errors
    /// Returns a [`serde_json::Error`] if `configuration` does not serialize to a JSON object.
    pub fn from_typed<T: Serialize>(configuration: &T) -> Result<Self, serde_json::Error> {
        match serde_json::to_value(configuration)? {
            serde_json::Value::Object(map) => Ok(Self(map)),
            serde_json::Value::Null => Ok(Self::default()),
            _ => Err(serde::ser::Error::custom(
                "configuration must serialize to an object",
            )),
        }
    }

    /// Try and convert the configuration to a typed configuration.
    ///
    /// # Errors
    /// Returns a [`serde_json::Error`] if the configuration does not match `T`.
    pub fn to_typed<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(serde_json::Value::Object(self.0.clone()))
    }

    /// Returns true if the configuration has no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<serde_json::Value> for Configuration {
    type Error = serde_json::Error;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        serde_json::from_value(value)
    }
}

/// Filter metadata with a `name` and optional `configuration`.
///
/// For example:
/// ```json
/// {
///     "name": "zfp",
///     "configuration": {
///         "rate": 10.0
///     }
/// }
/// ```
#[derive(Serialize, Deserialize, Clone, Eq, PartialEq, Debug, Display)]
#[serde(deny_unknown_fields)]
#[display("{}", serde_json::to_string(self).unwrap_or_default())]
pub struct FilterMetadata {
    name: String,
    #[serde(default, skip_serializing_if = "Configuration::is_empty")]
    configuration: Configuration,
}

impl FilterMetadata {
    /// Create metadata for the filter `name` with an empty configuration.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            configuration: Configuration::default(),
        }
    }

    /// Create metadata for the filter `name` with `configuration`.
    #[must_use]
    pub fn new_with_configuration(name: &str, configuration: Configuration) -> Self {
        Self {
            name: name.to_string(),
            configuration,
        }
    }

    /// Return the filter name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return the filter configuration.
    #[must_use]
    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::lz4::Lz4Configuration;

    #[test]
    fn metadata_without_configuration() {
        let metadata: FilterMetadata = serde_json::from_str(r#"{"name": "lz4"}"#).unwrap();
        assert_eq!(metadata.name(), "lz4");
        assert!(metadata.configuration().is_empty());
        assert_eq!(metadata.to_string(), r#"{"name":"lz4"}"#);
    }

    #[test]
    fn metadata_unknown_field() {
        assert!(serde_json::from_str::<FilterMetadata>(r#"{"name": "lz4", "id": 1}"#).is_err());
    }

    #[test]
    fn configuration_typed() {
        let configuration =
            Configuration::try_from(serde_json::json!({"nbytes": 1024})).unwrap();
        let typed: Lz4Configuration = configuration.to_typed().unwrap();
        assert_eq!(typed.nbytes, 1024);
        assert_eq!(Configuration::from_typed(&typed).unwrap(), configuration);
    }

    #[test]
    fn configuration_not_an_object() {
        assert!(Configuration::try_from(serde_json::json!([1, 2])).is_err());
        assert!(Configuration::from_typed(&5u32).is_err());
    }
}
