use std::cell::{Cell, RefCell};

use anyhow::Result;

use crate::types::{ContentType, SiteEntry};

/// The view the controller drives: a list of site rows plus the addon URL field.
///
/// Methods take `&self`; the view owns its state the way a document owns its nodes,
/// so a handler can read the rows, await the server, and write the result back.
pub trait SiteForm {
    /// Handle to a row, returned when one is appended.
    type Row;
    /// Whatever a click inside the row container reports as its origin.
    type Target;

    fn append_row(&self, defaults: &[ContentType]) -> Result<Self::Row>;
    /// Detach the row owning `target` if `target` is a remove control. Returns whether a row went away.
    fn remove_row(&self, target: &Self::Target) -> bool;
    /// Current rows in visual order, raw domain text and selected type values.
    fn read_entries(&self) -> Result<Vec<SiteEntry>>;
    fn addon_url(&self) -> String;
    fn set_addon_url(&self, url: &str);
    fn select_addon_url(&self);
}

pub const ROW_CLASS: &str = "site-entry";
pub const REMOVE_CLASS: &str = "remove-site";
const DOMAIN_PLACEHOLDER: &str = "URL del sito (es. https://example.com)";
const REMOVE_LABEL: &str = "Rimuovi";

/// Inner HTML of a `div.site-entry` row: domain input, multi-select with `defaults` preselected,
/// remove button.
pub fn row_markup(defaults: &[ContentType]) -> String {
    let options: String = ContentType::ALL
        .iter()
        .map(|t| {
            let selected = if defaults.contains(t) { " selected" } else { "" };
            format!("<option value=\"{}\"{}>{}</option>", t.as_str(), selected, t.label())
        })
        .collect();
    format!(
        "<input type=\"text\" class=\"domain\" placeholder=\"{}\" required>\
         <select class=\"types\" multiple>{}</select>\
         <button type=\"button\" class=\"{}\">{}</button>",
        DOMAIN_PLACEHOLDER, options, REMOVE_CLASS, REMOVE_LABEL
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowId(u64);

/// Origin of a click inside the in-memory row container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    RemoveSite(RowId),
    Domain(RowId),
    Types(RowId),
    Container,
}

#[derive(Debug, Clone)]
struct Row {
    id: RowId,
    domain: String,
    types: Vec<String>,
}

/// `SiteForm` kept in memory. Backs the CLI and the controller tests.
#[derive(Debug, Default)]
pub struct MemoryForm {
    rows: RefCell<Vec<Row>>,
    next_id: Cell<u64>,
    addon_url: RefCell<String>,
    selection: RefCell<Option<String>>,
}

impl MemoryForm {
    pub fn new() -> Self { Self::default() }

    pub fn row_ids(&self) -> Vec<RowId> { self.rows.borrow().iter().map(|r| r.id).collect() }
    pub fn len(&self) -> usize { self.rows.borrow().len() }
    pub fn is_empty(&self) -> bool { self.rows.borrow().is_empty() }

    /// Replace the domain text of a row, as typing would. Unknown rows are ignored.
    pub fn set_domain(&self, row: RowId, text: &str) {
        if let Some(r) = self.rows.borrow_mut().iter_mut().find(|r| r.id == row) { r.domain = text.to_string(); }
    }

    /// Replace the selection of a row. Selected options come back in option order, like a multi-select.
    pub fn set_types(&self, row: RowId, types: &[ContentType]) {
        if let Some(r) = self.rows.borrow_mut().iter_mut().find(|r| r.id == row) {
            r.types = ContentType::ALL.iter().filter(|t| types.contains(t)).map(|t| t.as_str().to_string()).collect();
        }
    }

    /// Text captured by the last `select_addon_url`.
    pub fn selection(&self) -> Option<String> { self.selection.borrow().clone() }
}

impl SiteForm for MemoryForm {
    type Row = RowId;
    type Target = ClickTarget;

    fn append_row(&self, defaults: &[ContentType]) -> Result<RowId> {
        let id = RowId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        let types = defaults.iter().map(|t| t.as_str().to_string()).collect();
        self.rows.borrow_mut().push(Row { id, domain: String::new(), types });
        Ok(id)
    }

    fn remove_row(&self, target: &ClickTarget) -> bool {
        let ClickTarget::RemoveSite(id) = *target else { return false };
        let mut rows = self.rows.borrow_mut();
        let before = rows.len();
        rows.retain(|r| r.id != id);
        rows.len() != before
    }

    fn read_entries(&self) -> Result<Vec<SiteEntry>> {
        Ok(self.rows.borrow().iter().map(|r| SiteEntry { domain: r.domain.clone(), types: r.types.clone() }).collect())
    }

    fn addon_url(&self) -> String { self.addon_url.borrow().clone() }
    fn set_addon_url(&self, url: &str) { *self.addon_url.borrow_mut() = url.to_string(); }
    fn select_addon_url(&self) { *self.selection.borrow_mut() = Some(self.addon_url()); }
}
