//! Form and page widgets hosted on a deterministic page runtime.
//!
//! A [`Page`] owns an in-memory document built from HTML, a listener table, a
//! virtual clock with a timer queue and mocked platform services (confirm and
//! alert dialogs, clipboard). The widgets bind to elements of that document:
//!
//! - [`Page::init_toggle_fields`] shows/hides dependent fields from trigger values,
//! - [`Page::init_alerts_collapse`] collapses an alert panel into a compact bar,
//! - [`Page::init_confirm_button`] gates clicks behind a confirmation dialog,
//! - [`Page::init_copy_to_clipboard`] copies an element's text to the clipboard,
//! - [`Page::init_fade_in`] staggers a fade-in class over matched elements.
//!
//! ```
//! use page_widgets::{Page, Result, ToggleFieldsConfig};
//!
//! fn main() -> Result<()> {
//!     let mut page = Page::from_html(
//!         r#"
//!         <div><select id='kind'>
//!           <option value='cash'>Cash</option>
//!           <option value='bono'>Bono</option>
//!         </select></div>
//!         <div id='serial-row'><input id='serial'></div>
//!         "#,
//!     )?;
//!
//!     let config = ToggleFieldsConfig::new("kind", |kind, _| kind == "BONO").dependents(["serial"]);
//!     page.init_toggle_fields(config)?;
//!     page.assert_disabled("#serial", true)?;
//!
//!     page.select_option("#kind", "bono")?;
//!     page.advance_time(10)?;
//!     page.assert_disabled("#serial", false)?;
//!     page.assert_style("#serial-row", "opacity", "1")?;
//!     Ok(())
//! }
//! ```

use std::collections::{HashMap, HashSet, VecDeque};
use std::error::Error as StdError;
use std::fmt;
use std::rc::Rc;

mod core_dom_utils;
mod core_impl;
mod page;
mod runtime_state;
mod selector;
mod widgets;

pub(crate) use core_dom_utils::*;
pub(crate) use core_impl::*;
pub(crate) use runtime_state::*;
pub(crate) use selector::*;
pub(crate) use widgets::*;

pub use page::Page;
pub use runtime_state::{FormSubmission, Navigation, PendingTimer};
pub use widgets::{
    AlertsCollapseConfig, AlertsHandle, AlertsView, DEFAULT_COLLAPSE_DELAY_MS,
    DEFAULT_COPY_ERROR_PREFIX, DEFAULT_FADE_IN_STEP_MS, FADE_IN_CLASS, ShowPredicate,
    TRIGGER_HIGHLIGHT_CLASS, TRIGGER_HIGHLIGHT_MS, ToggleFieldsConfig, ToggleHandle,
    VisibilityAnimation, normalize_trigger_value,
};


pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    HtmlParse(String),
    Runtime(String),
    SelectorNotFound(String),
    UnsupportedSelector(String),
    TypeMismatch {
        selector: String,
        expected: String,
        actual: String,
    },
    AssertionFailed {
        selector: String,
        expected: String,
        actual: String,
        dom_snippet: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HtmlParse(msg) => write!(f, "html parse error: {msg}"),
            Self::Runtime(msg) => write!(f, "page runtime error: {msg}"),
            Self::SelectorNotFound(selector) => write!(f, "selector not found: {selector}"),
            Self::UnsupportedSelector(selector) => write!(f, "unsupported selector: {selector}"),
            Self::TypeMismatch {
                selector,
                expected,
                actual,
            } => write!(
                f,
                "type mismatch for {selector}: expected {expected}, actual {actual}"
            ),
            Self::AssertionFailed {
                selector,
                expected,
                actual,
                dom_snippet,
            } => write!(
                f,
                "assertion failed for {selector}: expected {expected}, actual {actual}, snippet {dom_snippet}"
            ),
        }
    }
}

impl StdError for Error {}
