use anyhow::Result;
use tracing::{debug, info, warn};

use crate::config::FormConfig;
use crate::form::SiteForm;
use crate::notice::Notice;
use crate::platform::Platform;
use crate::transport::ConfigureTransport;
use crate::types::{ConfigureRequest, ContentType};

/// How a submit ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The server returned an addon URL; it is now in the display field.
    Generated(String),
    /// The server answered without a usable addon URL.
    Rejected(String),
    /// The request never produced a JSON answer.
    Failed(String),
}

/// Wires the form's user actions to the configure endpoint.
///
/// Every operation is a one-shot handler; the only state is what the form holds.
pub struct FormController<F, T, P> {
    form: F,
    transport: T,
    platform: P,
    config: FormConfig,
}

impl<F: SiteForm, T: ConfigureTransport, P: Platform> FormController<F, T, P> {
    pub fn new(form: F, transport: T, platform: P, config: FormConfig) -> Self { Self { form, transport, platform, config } }

    pub fn form(&self) -> &F { &self.form }
    pub fn platform(&self) -> &P { &self.platform }
    pub fn config(&self) -> &FormConfig { &self.config }

    /// Append an empty row with the default type selection.
    pub fn add_entry(&self) -> Result<F::Row> {
        let row = self.form.append_row(&ContentType::DEFAULTS)?;
        debug!("site row added");
        Ok(row)
    }

    /// Delegated click from the row container.
    pub fn remove_entry(&self, target: &F::Target) -> bool {
        let removed = self.form.remove_row(target);
        if removed { debug!("site row removed"); }
        removed
    }

    pub async fn submit(&self) -> SubmitOutcome {
        let sites = match self.form.read_entries() {
            Ok(sites) => sites,
            Err(e) => return self.fail(format!("{:#}", e)),
        };
        info!(sites = sites.len(), "submitting configuration");
        let request = ConfigureRequest { sites };
        match self.transport.configure(&request).await {
            Ok(response) => match response.usable_addon_url() {
                Some(url) => {
                    self.form.set_addon_url(&url);
                    info!(addon_url = %url, "manifest generated");
                    self.notify(Notice::ManifestGenerated);
                    SubmitOutcome::Generated(url)
                }
                None => {
                    let detail = response.error_detail();
                    warn!(error = %detail, "configuration rejected");
                    self.notify(Notice::ServerError(detail.clone()));
                    SubmitOutcome::Rejected(detail)
                }
            },
            Err(e) => self.fail(format!("{:#}", e)),
        }
    }

    pub fn copy_url(&self) {
        self.form.select_addon_url();
        self.platform.copy_selection(&self.form.addon_url());
        self.notify(Notice::UrlCopied);
    }

    /// Open the installer link for the current addon URL. Returns the link that was opened.
    pub fn install_addon(&self) -> Option<String> {
        let url = self.form.addon_url();
        if url.is_empty() {
            self.notify(Notice::GenerateFirst);
            return None;
        }
        let link = self.config.install_link(&url);
        debug!(%link, "opening installer");
        self.platform.open_url(&link);
        Some(link)
    }

    fn fail(&self, message: String) -> SubmitOutcome {
        warn!(error = %message, "configuration request failed");
        self.notify(Notice::ConfigurationFailed(message.clone()));
        SubmitOutcome::Failed(message)
    }

    fn notify(&self, notice: Notice) { self.platform.notify(&notice, self.config.locale); }
}
