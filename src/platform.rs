use crate::notice::{Locale, Notice};

/// User-facing side effects: notifications, clipboard, opening a new browsing context.
pub trait Platform {
    fn notify(&self, notice: &Notice, locale: Locale);
    /// Copy the current selection. Failures are not reported.
    fn copy_selection(&self, text: &str);
    fn open_url(&self, url: &str);
}

/// Platform for a terminal: notices go to stdout (failures to stderr), and since there is
/// neither clipboard nor browser, copied text and opened links are printed.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPlatform;

impl Platform for TerminalPlatform {
    fn notify(&self, notice: &Notice, locale: Locale) {
        if notice.is_failure() { eprintln!("{}", notice.localized(locale)); } else { println!("{}", notice.localized(locale)); }
    }

    fn copy_selection(&self, text: &str) { println!("{}", text); }

    fn open_url(&self, url: &str) { println!("Open: {}", url); }
}
