use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use serde::{Deserialize, Serialize};

/// Language of user-facing notices. Italian matches the stock form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    It,
    En,
}

impl FromStr for Locale {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "it" | "italian" => Ok(Locale::It),
            "en" | "english" => Ok(Locale::En),
            other => Err(anyhow!("unknown locale `{}` (expected it, en)", other)),
        }
    }
}

/// Something the user is told through a blocking notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    ManifestGenerated,
    /// The server answered but without an addon URL.
    ServerError(String),
    /// The request itself failed or the body was not JSON.
    ConfigurationFailed(String),
    UrlCopied,
    GenerateFirst,
}

impl Notice {
    pub fn is_failure(&self) -> bool { matches!(self, Notice::ServerError(_) | Notice::ConfigurationFailed(_)) }

    pub fn localized(&self, locale: Locale) -> Localized<'_> { Localized { notice: self, locale } }
}

/// A notice rendered in a given locale.
pub struct Localized<'a> {
    notice: &'a Notice,
    locale: Locale,
}

impl fmt::Display for Localized<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.notice, self.locale) {
            (Notice::ManifestGenerated, Locale::It) => f.write_str("Manifest generato con successo!"),
            (Notice::ManifestGenerated, Locale::En) => f.write_str("Manifest generated successfully!"),
            (Notice::ServerError(d), Locale::It) => write!(f, "Errore: {}", d),
            (Notice::ServerError(d), Locale::En) => write!(f, "Error: {}", d),
            (Notice::ConfigurationFailed(m), Locale::It) => write!(f, "Errore nella configurazione: {}", m),
            (Notice::ConfigurationFailed(m), Locale::En) => write!(f, "Configuration error: {}", m),
            (Notice::UrlCopied, Locale::It) => f.write_str("URL copiato negli appunti!"),
            (Notice::UrlCopied, Locale::En) => f.write_str("URL copied to clipboard!"),
            (Notice::GenerateFirst, Locale::It) => f.write_str("Genera prima il manifest!"),
            (Notice::GenerateFirst, Locale::En) => f.write_str("Generate the manifest first!"),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.localized(Locale::default())) }
}
