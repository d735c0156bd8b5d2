//! JSON bodies exchanged with the solve endpoint.

use std::collections::BTreeMap;
use std::io::Cursor;

use base64::{engine::general_purpose, Engine as _};
use image::{ImageFormat, RgbaImage};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::SolveError;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolveRequest {
    /// `data:image/png;base64,...`
    pub image: String,
    pub dict_of_vars: BTreeMap<String, String>,
}

/// Response envelope; every field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SolveResponse {
    pub message: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub data: Vec<SolveEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SolveEntry {
    #[serde(deserialize_with = "scalar_text")]
    pub expr: String,
    #[serde(deserialize_with = "scalar_text")]
    pub result: String,
    pub assign: bool,
}

impl SolveEntry {
    pub fn label(&self) -> String {
        format!("{} = {}", self.expr, self.result)
    }

    pub fn latex(&self) -> String {
        format!("\\(\\LARGE{{{} = {}}}\\)", self.expr, self.result)
    }
}

/// Results come back as strings or bare numbers depending on the expression.
fn scalar_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(text) => text,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}

pub fn parse_response(json: &str) -> Result<SolveResponse, SolveError> {
    serde_json::from_str(json).map_err(|e| SolveError::Parse(e.to_string()))
}

/// PNG-encode `image` and wrap it in a base64 data URL.
pub fn png_data_url(image: &RgbaImage) -> Result<String, SolveError> {
    let mut bytes: Vec<u8> = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|e| SolveError::Encode(e.to_string()))?;
    Ok(format!("data:image/png;base64,{}", general_purpose::STANDARD.encode(&bytes)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_numeric_results_and_missing_fields() {
        let response = parse_response(
            r#"{"message":"Image Processed","type":"success","data":[{"expr":"x","result":2,"assign":true},{"expr":"2 + 2","result":"4"}]}"#,
        )
        .unwrap();
        assert_eq!(response.kind.as_deref(), Some("success"));
        assert_eq!(response.data[0].result, "2");
        assert!(response.data[0].assign);
        assert!(!response.data[1].assign);
        assert_eq!(response.data[1].label(), "2 + 2 = 4");
        assert_eq!(response.data[1].latex(), "\\(\\LARGE{2 + 2 = 4}\\)");

        assert_eq!(parse_response("{}").unwrap(), SolveResponse::default());
        assert!(matches!(parse_response("not json"), Err(SolveError::Parse(_))));
    }

    #[test]
    fn test_png_data_url_prefix() {
        let url = png_data_url(&RgbaImage::new(2, 2)).unwrap();
        assert!(url.starts_with("data:image/png;base64,iVBORw0KGgo"));
    }

    #[test]
    fn test_request_field_names() {
        let request = SolveRequest {
            image: "data:".to_string(),
            dict_of_vars: BTreeMap::from([("x".to_string(), "5".to_string())]),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["dict_of_vars"]["x"], "5");
        assert_eq!(json["image"], "data:");
    }
}
