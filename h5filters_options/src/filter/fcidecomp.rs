//! The `fcidecomp` filter configuration.
//!
//! `fcidecomp` takes no parameters. Its native plugin requires a C++11 build.

use derive_more::Display;
use h5filters_registry::filter::{FCIDECOMP, FCIDECOMP_ID};
use serde::{Deserialize, Serialize};

use crate::{EncodeOptions, InvalidParameterError};

/// `fcidecomp` filter configuration parameters (none).
#[derive(Serialize, Deserialize, Clone, Copy, Eq, PartialEq, Debug, Display, Default)]
#[serde(deny_unknown_fields)]
#[display("{{}}")]
pub struct FciDecompConfiguration {}

impl EncodeOptions for FciDecompConfiguration {
    const FILTER_NAME: &'static str = FCIDECOMP;
    const FILTER_ID: u32 = FCIDECOMP_ID;

    fn encode_options(&self) -> Result<Vec<u32>, InvalidParameterError> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fcidecomp_no_options() {
        let configuration: FciDecompConfiguration = serde_json::from_str("{}").unwrap();
        assert!(configuration.encode_options().unwrap().is_empty());
        assert!(serde_json::from_str::<FciDecompConfiguration>(r#"{"level": 1}"#).is_err());
    }
}
