use serde::{Deserialize, Deserializer};

/// Deserializes a text-segment index that may arrive as a JSON number or a
/// decimal string.
///
/// The OCR service serializes 64-bit indices as strings in its JSON output,
/// while older processor versions emit plain numbers. Anything unparseable
/// deserializes to zero rather than failing the whole document.
pub mod text_index {
    use super::*;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IndexValue {
        Number(i64),
        Text(String),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<i64, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<IndexValue>::deserialize(deserializer)? {
            Some(IndexValue::Number(n)) => Ok(n),
            Some(IndexValue::Text(s)) => Ok(s.trim().parse().unwrap_or(0)),
            None => Ok(0),
        }
    }
}
