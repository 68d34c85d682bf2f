use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use serde::{Deserialize, Serialize};

/// Content types a site can be configured for, in the order the form offers them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Movie,
    Series,
    Anime,
    Channel,
}

impl ContentType {
    pub const ALL: [ContentType; 4] = [ContentType::Movie, ContentType::Series, ContentType::Anime, ContentType::Channel];
    pub const DEFAULTS: [ContentType; 2] = [ContentType::Movie, ContentType::Series];

    pub fn as_str(self) -> &'static str {
        match self { ContentType::Movie => "movie", ContentType::Series => "series", ContentType::Anime => "anime", ContentType::Channel => "channel" }
    }

    /// Option label shown in the type selector.
    pub fn label(self) -> &'static str {
        match self { ContentType::Movie => "Film", ContentType::Series => "Serie", ContentType::Anime => "Anime", ContentType::Channel => "Live TV" }
    }

    pub fn is_default(self) -> bool { Self::DEFAULTS.contains(&self) }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for ContentType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| anyhow!("unknown content type `{}` (expected movie, series, anime, channel)", s))
    }
}

/// One row of the form as it goes over the wire. `types` stays as raw option values;
/// the form does not validate what the view hands it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteEntry {
    pub domain: String,
    pub types: Vec<String>,
}

impl SiteEntry {
    pub fn new(domain: impl Into<String>, types: &[ContentType]) -> Self {
        Self { domain: domain.into(), types: types.iter().map(|t| t.as_str().to_string()).collect() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigureRequest {
    pub sites: Vec<SiteEntry>,
}

/// Body returned by the configure endpoint. Fields are read the way the page script reads
/// `data.addonUrl` / `data.error`: anything that is not a JSON object has neither field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigureResponse {
    pub addon_url: Option<serde_json::Value>,
    pub error: Option<serde_json::Value>,
}

impl<'de> Deserialize<'de> for ConfigureResponse {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::Object(mut map) => Ok(Self { addon_url: map.remove("addonUrl"), error: map.remove("error") }),
            // Property access on null throws in the page script, so it is a failed call, not a rejection.
            serde_json::Value::Null => Err(serde::de::Error::custom("response body is null")),
            _ => Ok(Self::default()),
        }
    }
}

impl ConfigureResponse {
    /// The addon URL when it is truthy, coerced to a string.
    pub fn usable_addon_url(&self) -> Option<String> {
        self.addon_url.as_ref().filter(|v| is_truthy(v)).map(js_string)
    }

    /// Failure detail from the `error` field, `undefined` when absent.
    pub fn error_detail(&self) -> String {
        self.error.as_ref().map(js_string).unwrap_or_else(|| "undefined".to_string())
    }
}

fn is_truthy(v: &serde_json::Value) -> bool {
    match v {
        serde_json::Value::Null => false,
        serde_json::Value::Bool(b) => *b,
        serde_json::Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        serde_json::Value::String(s) => !s.is_empty(),
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => true,
    }
}

/// String conversion as JavaScript's `String(value)` does it for JSON values.
fn js_string(v: &serde_json::Value) -> String {
    match v {
        serde_json::Value::Null => "null".to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Number(n) => match (n.as_i64(), n.as_u64(), n.as_f64()) {
            (Some(i), _, _) => i.to_string(),
            (_, Some(u), _) => u.to_string(),
            (_, _, Some(f)) if f.fract() == 0.0 && f.abs() < 1e21 => format!("{:.0}", f),
            (_, _, Some(f)) => f.to_string(),
            _ => n.to_string(),
        },
        serde_json::Value::String(s) => s.clone(),
        // Array elements are joined with commas; null entries become empty strings.
        serde_json::Value::Array(items) => items
            .iter()
            .map(|i| if i.is_null() { String::new() } else { js_string(i) })
            .collect::<Vec<_>>()
            .join(","),
        serde_json::Value::Object(_) => "[object Object]".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_entry_serializes_movie_and_series() {
        let e = SiteEntry::new("", &ContentType::DEFAULTS);
        let v = serde_json::to_value(&e).unwrap();
        assert_eq!(v, serde_json::json!({"domain": "", "types": ["movie", "series"]}));
    }

    #[test]
    fn empty_request_is_empty_sites_array() {
        let body = serde_json::to_string(&ConfigureRequest { sites: vec![] }).unwrap();
        assert_eq!(body, r#"{"sites":[]}"#);
    }

    #[test]
    fn content_type_parses_known_tags_only() {
        assert_eq!("anime".parse::<ContentType>().unwrap(), ContentType::Anime);
        assert!("Movie".parse::<ContentType>().is_err());
        assert!("music".parse::<ContentType>().is_err());
    }

    fn parse(body: &str) -> ConfigureResponse { serde_json::from_str(body).unwrap() }

    #[test]
    fn usable_addon_url_follows_truthiness() {
        assert_eq!(parse(r#"{"addonUrl":"http://x/manifest.json"}"#).usable_addon_url().as_deref(), Some("http://x/manifest.json"));
        assert_eq!(parse(r#"{"addonUrl":42}"#).usable_addon_url().as_deref(), Some("42"));
        assert_eq!(parse(r#"{"addonUrl":1.5}"#).usable_addon_url().as_deref(), Some("1.5"));
        assert_eq!(parse(r#"{"addonUrl":true}"#).usable_addon_url().as_deref(), Some("true"));
        assert_eq!(parse(r#"{"addonUrl":["a","b"]}"#).usable_addon_url().as_deref(), Some("a,b"));
        assert_eq!(parse(r#"{"addonUrl":{}}"#).usable_addon_url().as_deref(), Some("[object Object]"));
        for falsy in [r#"{"addonUrl":""}"#, r#"{"addonUrl":0}"#, r#"{"addonUrl":0.0}"#, r#"{"addonUrl":false}"#, r#"{"addonUrl":null}"#, "{}"] {
            assert_eq!(parse(falsy).usable_addon_url(), None, "{}", falsy);
        }
    }

    #[test]
    fn non_object_bodies_carry_no_addon_url() {
        let arr = parse(r#"["http://x/manifest.json"]"#);
        assert_eq!(arr.usable_addon_url(), None);
        assert_eq!(arr.error_detail(), "undefined");
        assert_eq!(parse(r#""http://x/manifest.json""#).usable_addon_url(), None);
        assert_eq!(parse("7").usable_addon_url(), None);
        assert!(serde_json::from_str::<ConfigureResponse>("null").is_err());
    }

    #[test]
    fn error_detail_matches_string_coercion() {
        assert_eq!(parse(r#"{"error":"bad domain"}"#).error_detail(), "bad domain");
        assert_eq!(parse(r#"{"error":{"code":3}}"#).error_detail(), "[object Object]");
        assert_eq!(parse(r#"{"error":404}"#).error_detail(), "404");
        assert_eq!(parse(r#"{"error":null}"#).error_detail(), "null");
        assert_eq!(parse("{}").error_detail(), "undefined");
    }
}
