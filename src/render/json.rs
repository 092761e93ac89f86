//! JSON rendering for outline results.

use std::io::Write;

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::error::{Error, Result};

/// Indentation used by pretty output.
const PRETTY_INDENT: &[u8] = b"    ";

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with four-space indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serialize a value to a JSON string.
pub fn to_json<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let mut buf = Vec::new();
    write_json(&mut buf, value, format)?;
    String::from_utf8(buf).map_err(|e| Error::Render(format!("JSON is not UTF-8: {}", e)))
}

/// Serialize a value as JSON into a writer.
///
/// Non-ASCII text is written as-is rather than escaped.
pub fn write_json<W: Write, T: Serialize + ?Sized>(
    writer: W,
    value: &T,
    format: JsonFormat,
) -> Result<()> {
    let result = match format {
        JsonFormat::Pretty => {
            let formatter = PrettyFormatter::with_indent(PRETTY_INDENT);
            let mut ser = Serializer::with_formatter(writer, formatter);
            value.serialize(&mut ser)
        }
        JsonFormat::Compact => serde_json::to_writer(writer, value),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ErrorReport, HeadingLevel, OutlineEntry, OutlineResult};

    fn sample() -> OutlineResult {
        OutlineResult::new(
            "Rapport annuel",
            vec![OutlineEntry::new(HeadingLevel::H1, "1. Aperçu", 2)],
        )
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&sample(), JsonFormat::Pretty).unwrap();
        let expected = concat!(
            "{\n",
            "    \"title\": \"Rapport annuel\",\n",
            "    \"outline\": [\n",
            "        {\n",
            "            \"level\": \"H1\",\n",
            "            \"text\": \"1. Aperçu\",\n",
            "            \"page\": 2\n",
            "        }\n",
            "    ]\n",
            "}"
        );
        assert_eq!(json, expected);
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&OutlineResult::default(), JsonFormat::Compact).unwrap();
        assert_eq!(json, r#"{"title":"","outline":[]}"#);
    }

    #[test]
    fn test_write_error_report() {
        let mut buf = Vec::new();
        let report = ErrorReport::new("boom", "broken.pdf");
        write_json(&mut buf, &report, JsonFormat::Compact).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            r#"{"error":"boom","message":"Failed to process broken.pdf"}"#
        );
    }
}
