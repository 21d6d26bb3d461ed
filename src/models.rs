use serde::{Deserialize, Serialize};

/// Pseudo-type bucket for records with an absent or empty `store_type`.
pub const UNSPECIFIED_TYPE: &str = "ไม่ระบุ";

/// Envelope returned by the directory endpoint:
/// `{ "status": "success", "data": [...], "message": "..." }`.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectoryResponse {
    pub status: String,
    #[serde(default)]
    pub data: Vec<StoreRecord>,
    #[serde(default)]
    pub message: Option<String>,
}

/// One store row as delivered by the directory endpoint.
///
/// The backend serializes numbers inconsistently (ids and coordinates as
/// strings, counts sometimes as numbers, `has_images` as `0`/`1`). All such
/// fields are accepted in either form and normalized here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoreRecord {
    #[serde(deserialize_with = "de_string_from_string_or_number")]
    pub id: String,
    pub store_name: String,
    #[serde(default)]
    pub store_type: Option<String>,
    #[serde(default)]
    pub province: String,
    #[serde(default)]
    pub district: String,
    #[serde(default)]
    pub subdistrict: String,
    /// Source text of the latitude; parsed lazily via [`StoreRecord::coordinate`].
    #[serde(default, deserialize_with = "de_string_from_string_or_number")]
    pub latitude: String,
    /// Source text of the longitude; parsed lazily via [`StoreRecord::coordinate`].
    #[serde(default, deserialize_with = "de_string_from_string_or_number")]
    pub longitude: String,
    /// Comma-separated image URLs, possibly empty.
    #[serde(default)]
    pub image_urls: String,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default, deserialize_with = "de_u32_from_string_or_number")]
    pub total_images: u32,
    #[serde(default, deserialize_with = "de_bool_from_anything")]
    pub has_images: bool,
}

impl StoreRecord {
    /// Type label with the absent/empty case folded into [`UNSPECIFIED_TYPE`].
    pub fn type_label(&self) -> &str {
        match self.store_type.as_deref().map(str::trim) {
            Some(t) if !t.is_empty() => t,
            _ => UNSPECIFIED_TYPE,
        }
    }

    /// Parse the coordinate fields. Returns `None` unless both parse to
    /// finite floats; such records are excluded from rendering and grouping.
    pub fn coordinate(&self) -> Option<Coordinate> {
        let lat = self.latitude.trim().parse::<f64>().ok()?;
        let lon = self.longitude.trim().parse::<f64>().ok()?;
        if lat.is_finite() && lon.is_finite() {
            Some(Coordinate { lat, lon })
        } else {
            None
        }
    }

    /// Split `image_urls` on commas, trimming and dropping empty entries.
    pub fn image_url_list(&self) -> Vec<String> {
        self.image_urls
            .split(',')
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// A parsed map coordinate. Compared by exact value equality: two records
/// belong to one location only when their source text parses to the same
/// decimal values. Never constructed with non-finite components.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

/// The full ordered record list fetched in one request. Replaced wholesale on
/// refetch, never mutated in place.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DirectorySnapshot {
    pub records: Vec<StoreRecord>,
}

impl DirectorySnapshot {
    pub fn new(records: Vec<StoreRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StoreRecord> {
        self.records.iter()
    }
}

/// Serde helper: parse a `String` from either a JSON string or a number.
fn de_string_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    struct StringVisitor;

    impl<'de> Visitor<'de> for StringVisitor {
        type Value = String;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            write!(f, "a string or number")
        }

        fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(s.to_string())
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(v.to_string())
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(v.to_string())
        }

        fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(v.to_string())
        }
    }

    deserializer.deserialize_any(StringVisitor)
}

/// Serde helper: parse `u32` from either a JSON number or a string.
fn de_u32_from_string_or_number<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    struct U32Visitor;

    impl<'de> Visitor<'de> for U32Visitor {
        type Value = u32;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            write!(f, "a string or integer representing a non-negative number")
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(v as u32)
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            if v < 0 {
                return Err(E::custom("negative value for u32"));
            }
            Ok(v as u32)
        }

        fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            if s.trim().is_empty() {
                return Ok(0);
            }
            s.trim().parse::<u32>().map_err(E::custom)
        }
    }

    deserializer.deserialize_any(U32Visitor)
}

/// Serde helper: parse `bool` from a bool, `0`/`1`, or a string thereof.
fn de_bool_from_anything<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    struct BoolVisitor;

    impl<'de> Visitor<'de> for BoolVisitor {
        type Value = bool;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            write!(f, "a boolean, 0/1, or a string thereof")
        }

        fn visit_bool<E>(self, v: bool) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(v)
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(v != 0)
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(v != 0)
        }

        fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            match s.trim() {
                "1" | "true" | "TRUE" | "True" => Ok(true),
                "0" | "false" | "FALSE" | "False" | "" => Ok(false),
                other => Err(E::custom(format!("not a boolean: {other:?}"))),
            }
        }
    }

    deserializer.deserialize_any(BoolVisitor)
}
