//! Capabilities the page behaviours need from the elements they drive.
//!
//! Each trait covers one thing an element can do. The browser types from
//! `web_sys` implement them here; tests implement them with plain structs.

pub trait TextSource {
    fn value(&self) -> String;
}

pub trait Disableable {
    fn set_disabled(&self, disabled: bool);
}

pub trait Visibility {
    fn set_visible(&self, visible: bool);
}

/// Shows a blocking message to the user.
pub trait Notifier {
    fn notify(&self, message: &str);
}

pub trait Cancelable {
    fn prevent_default(&self);
}

pub trait ClassToggle {
    /// Toggles `class` and returns whether it is present afterwards.
    fn toggle_class(&self, class: &str) -> bool;
}

impl TextSource for web_sys::HtmlInputElement {
    fn value(&self) -> String {
        web_sys::HtmlInputElement::value(self)
    }
}

impl Disableable for web_sys::HtmlButtonElement {
    fn set_disabled(&self, disabled: bool) {
        web_sys::HtmlButtonElement::set_disabled(self, disabled)
    }
}

impl Visibility for web_sys::HtmlElement {
    fn set_visible(&self, visible: bool) {
        let display = if visible { "inline-block" } else { "none" };
        if let Err(err) = self.style().set_property("display", display) {
            log_js_error("set display", &err);
        }
    }
}

impl Cancelable for web_sys::Event {
    fn prevent_default(&self) {
        web_sys::Event::prevent_default(self)
    }
}

impl ClassToggle for web_sys::Element {
    fn toggle_class(&self, class: &str) -> bool {
        match self.class_list().toggle(class) {
            Ok(present) => present,
            Err(err) => {
                log_js_error("toggle class", &err);
                false
            }
        }
    }
}

/// `window.alert`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserAlert;

impl Notifier for BrowserAlert {
    fn notify(&self, message: &str) {
        if let Err(err) = leptos::window().alert_with_message(message) {
            log_js_error("alert", &err);
        }
    }
}

fn log_js_error(action: &str, err: &impl std::fmt::Debug) {
    log::warn!("Failed to {}: {:?}", action, err);
}
