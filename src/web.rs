//! Browser front end: binds the form controller to the configuration page.
//!
//! Expected markup: `#addSite`, `#sitesList`, `#generateManifest` and `#addonUrl`, plus optional
//! `#copyUrl` / `#installAddon` buttons. `copyUrl` and `installAddon` are also exported so the
//! page can call them from inline handlers.

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{anyhow, Context, Result};
use tracing::{info, warn};
use url::Url;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlDocument, HtmlInputElement, HtmlOptionElement, HtmlSelectElement, Window};

use crate::config::FormConfig;
use crate::controller::FormController;
use crate::form::{row_markup, SiteForm, REMOVE_CLASS, ROW_CLASS};
use crate::notice::{Locale, Notice};
use crate::platform::Platform;
use crate::transport::HttpTransport;
use crate::types::{ContentType, SiteEntry};

type WebController = FormController<DomForm, HttpTransport, BrowserPlatform>;

thread_local! {
    static CONTROLLER: RefCell<Option<Rc<WebController>>> = const { RefCell::new(None) };
}

fn js_err(v: JsValue) -> anyhow::Error { anyhow!("{}", v.as_string().unwrap_or_else(|| format!("{:?}", v))) }

fn to_js(e: anyhow::Error) -> JsValue { JsValue::from_str(&format!("{:#}", e)) }

fn element_by_id(document: &Document, id: &str) -> Result<Element> {
    document.get_element_by_id(id).ok_or_else(|| anyhow!("missing #{} element", id))
}

/// `SiteForm` backed by the document. Rows are `div.site-entry` nodes inside `#sitesList`.
pub struct DomForm {
    document: Document,
    list: Element,
    addon_url: HtmlInputElement,
}

impl DomForm {
    pub fn attach(document: Document) -> Result<Self> {
        let list = element_by_id(&document, "sitesList")?;
        let addon_url = element_by_id(&document, "addonUrl")?
            .dyn_into::<HtmlInputElement>()
            .map_err(|_| anyhow!("#addonUrl is not an input"))?;
        Ok(Self { document, list, addon_url })
    }

    fn read_row(row: &Element) -> Result<SiteEntry> {
        let domain = row
            .query_selector(".domain")
            .map_err(js_err)?
            .and_then(|e| e.dyn_into::<HtmlInputElement>().ok())
            .context("site row has no .domain input")?
            .value();
        let select = row
            .query_selector(".types")
            .map_err(js_err)?
            .and_then(|e| e.dyn_into::<HtmlSelectElement>().ok())
            .context("site row has no .types select")?;
        let selected = select.selected_options();
        let types = (0..selected.length())
            .filter_map(|i| selected.item(i))
            .filter_map(|e| e.dyn_into::<HtmlOptionElement>().ok())
            .map(|o| o.value())
            .collect();
        Ok(SiteEntry { domain, types })
    }
}

impl SiteForm for DomForm {
    type Row = Element;
    type Target = Element;

    fn append_row(&self, defaults: &[ContentType]) -> Result<Element> {
        let row = self.document.create_element("div").map_err(js_err)?;
        row.set_class_name(ROW_CLASS);
        row.set_inner_html(&row_markup(defaults));
        self.list.append_child(&row).map_err(js_err)?;
        Ok(row)
    }

    fn remove_row(&self, target: &Element) -> bool {
        if !target.class_list().contains(REMOVE_CLASS) { return false; }
        match target.parent_element() {
            Some(row) => { row.remove(); true }
            None => false,
        }
    }

    fn read_entries(&self) -> Result<Vec<SiteEntry>> {
        let nodes = self.document.query_selector_all(&format!(".{}", ROW_CLASS)).map_err(js_err)?;
        (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|n| n.dyn_into::<Element>().ok())
            .map(|row| Self::read_row(&row))
            .collect()
    }

    fn addon_url(&self) -> String { self.addon_url.value() }
    fn set_addon_url(&self, url: &str) { self.addon_url.set_value(url); }
    fn select_addon_url(&self) { self.addon_url.select(); }
}

/// Alerts, `execCommand("copy")` and `window.open`.
pub struct BrowserPlatform {
    window: Window,
    document: Document,
}

impl Platform for BrowserPlatform {
    fn notify(&self, notice: &Notice, locale: Locale) {
        if let Err(e) = self.window.alert_with_message(&notice.localized(locale).to_string()) {
            warn!("alert failed: {}", js_err(e));
        }
    }

    fn copy_selection(&self, _text: &str) {
        if let Some(doc) = self.document.dyn_ref::<HtmlDocument>() {
            let _ = doc.exec_command("copy");
        }
    }

    fn open_url(&self, url: &str) {
        if let Err(e) = self.window.open_with_url_and_target(url, "_blank") {
            warn!("window.open failed: {}", js_err(e));
        }
    }
}

/// Page language decides the notice locale; anything unknown falls back to the default.
fn page_locale(document: &Document) -> Option<Locale> {
    document.document_element()?.get_attribute("lang")?.split('-').next()?.parse().ok()
}

fn build_controller() -> Result<WebController> {
    let window = web_sys::window().context("no window")?;
    let document = window.document().context("no document")?;
    let mut config = FormConfig::default();
    if let Some(locale) = page_locale(&document) { config.locale = locale; }
    let page = Url::parse(&window.location().href().map_err(js_err)?).context("page URL is not absolute")?;
    let transport = HttpTransport::new(&page, &config.endpoint)?;
    let form = DomForm::attach(document.clone())?;
    Ok(FormController::new(form, transport, BrowserPlatform { window, document }, config))
}

fn on_click(el: &Element, handler: impl FnMut(Event) + 'static) -> Result<()> {
    let cb = Closure::<dyn FnMut(Event)>::new(handler);
    el.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref()).map_err(js_err)?;
    // Listeners live as long as the page.
    cb.forget();
    Ok(())
}

fn wire(controller: &Rc<WebController>, document: &Document) -> Result<()> {
    let c = controller.clone();
    on_click(&element_by_id(document, "addSite")?, move |_| {
        if let Err(e) = c.add_entry() { warn!("could not add site row: {:#}", e); }
    })?;

    let c = controller.clone();
    on_click(&element_by_id(document, "sitesList")?, move |e: Event| {
        if let Some(target) = e.target().and_then(|t| t.dyn_into::<Element>().ok()) { c.remove_entry(&target); }
    })?;

    let c = controller.clone();
    on_click(&element_by_id(document, "generateManifest")?, move |_| {
        let c = c.clone();
        wasm_bindgen_futures::spawn_local(async move { c.submit().await; });
    })?;

    if let Some(el) = document.get_element_by_id("copyUrl") {
        let c = controller.clone();
        on_click(&el, move |_| c.copy_url())?;
    }
    if let Some(el) = document.get_element_by_id("installAddon") {
        let c = controller.clone();
        on_click(&el, move |_| { c.install_addon(); })?;
    }
    Ok(())
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    crate::logging::init("info");
    let controller = Rc::new(build_controller().map_err(to_js)?);
    let document = web_sys::window().and_then(|w| w.document()).ok_or_else(|| JsValue::from_str("no document"))?;
    wire(&controller, &document).map_err(to_js)?;
    CONTROLLER.with(|slot| *slot.borrow_mut() = Some(controller));
    info!("configuration form ready");
    Ok(())
}

fn with_controller(f: impl FnOnce(&WebController)) {
    CONTROLLER.with(|slot| match slot.borrow().as_ref() {
        Some(c) => f(c),
        None => warn!("configuration form is not initialised"),
    });
}

#[wasm_bindgen(js_name = copyUrl)]
pub fn copy_url() { with_controller(|c| c.copy_url()); }

#[wasm_bindgen(js_name = installAddon)]
pub fn install_addon() { with_controller(|c| { c.install_addon(); }); }
