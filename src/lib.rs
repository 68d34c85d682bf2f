pub mod config;
pub mod controller;
pub mod form;
pub mod logging;
pub mod notice;
pub mod platform;
pub mod transport;
pub mod types;
#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(all(test, not(target_arch = "wasm32")))]
mod testing;

// --- Library API for embedding ---

/// Convenience re-exports for embedders.
pub mod prelude {
    pub use crate::config::FormConfig;
    pub use crate::controller::{FormController, SubmitOutcome};
    pub use crate::form::{ClickTarget, MemoryForm, RowId, SiteForm};
    pub use crate::notice::{Locale, Notice};
    pub use crate::platform::{Platform, TerminalPlatform};
    pub use crate::transport::{ConfigureTransport, HttpTransport};
    pub use crate::types::{ConfigureRequest, ConfigureResponse, ContentType, SiteEntry};
}
