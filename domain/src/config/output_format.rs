//! Output format value object

use serde::{Deserialize, Serialize};

/// Output format for resolution results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// The resolution result as a flat JSON object (default)
    #[default]
    Json,
    /// Human-readable summary
    Summary,
    /// External-adapter envelope (`jobRunID`, `data.result`, `statusCode`)
    Adapter,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_json() {
        assert_eq!(OutputFormat::default(), OutputFormat::Json);
    }

    #[test]
    fn test_deserialize_lowercase() {
        let format: OutputFormat = serde_json::from_str("\"adapter\"").unwrap();
        assert_eq!(format, OutputFormat::Adapter);
        assert!(serde_json::from_str::<OutputFormat>("\"full\"").is_err());
    }
}
