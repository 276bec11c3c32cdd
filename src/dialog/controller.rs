use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, warn};

use super::options::{Callback, DialogConfig, PartialConfig, resolve};
use crate::dom::{Document, Event, ListenerId, NodeId, Selection, css};

/// The bordered box holding the dialog content.
pub const PANEL_SELECTOR: &str = ".modal";
/// The row holding the confirm and cancel controls.
pub const FOOTER_SELECTOR: &str = ".modal-footer";
pub const CONFIRM_SELECTOR: &str = "button.confirm";
pub const CANCEL_SELECTOR: &str = "button.cancel";

/// Controller of one dialog bound to a root element.
///
/// Clones refer to the same instance: the root, the resolved options and the
/// set of listeners currently bound are shared.
#[derive(Clone)]
pub struct Dialog {
    root: NodeId,
    config: Rc<DialogConfig>,
    bound: Rc<RefCell<Vec<ListenerId>>>,
}

impl Dialog {
    /// Bind `root` and resolve `overrides` against the defaults.
    pub fn new(root: NodeId, overrides: PartialConfig) -> Self {
        Self::with_config(root, resolve(overrides))
    }

    pub fn with_config(root: NodeId, config: DialogConfig) -> Self {
        Self {
            root,
            config: Rc::new(config),
            bound: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub const fn root(&self) -> NodeId {
        self.root
    }

    pub fn config(&self) -> &DialogConfig {
        &self.config
    }

    /// Whether the dialog's listeners are currently attached.
    pub fn is_active(&self) -> bool {
        !self.bound.borrow().is_empty()
    }

    /// Hide the root element. Listeners stay attached.
    pub fn hide(&self, doc: &mut Document) {
        doc.hide(self.root);
    }

    pub fn is_visible(&self, doc: &Document) -> bool {
        doc.is_displayed(self.root)
    }

    /// Show the dialog, center its panel and wire up its controls.
    ///
    /// Listeners bound by an earlier activation are removed first, so every
    /// handler is attached exactly once no matter how often this runs.
    pub fn activate(&self, doc: &mut Document) -> &Self {
        self.detach(doc);

        let root = doc.select(self.root);
        if root.is_empty() {
            warn!(root = %self.root, "Dialog root does not exist");
        }
        let panel = root.find(doc, PANEL_SELECTOR);
        let footer = root.find(doc, FOOTER_SELECTOR);
        if panel.is_empty() {
            warn!(root = %self.root, "Dialog has no panel, skipping placement");
        }

        root.show(doc);
        self.center(doc, &panel);

        let mut bound = panel.on(doc, "click", |_, event| event.stop_propagation());

        let config = Rc::clone(&self.config);
        bound.extend(self.bind_control(
            doc,
            &footer,
            CONFIRM_SELECTOR,
            &config.confirm_button_text,
            &config.confirm_event_name,
            &config.on_confirm,
        ));
        bound.extend(self.bind_control(
            doc,
            &footer,
            CANCEL_SELECTOR,
            &config.cancel_button_text,
            &config.cancel_event_name,
            &config.on_cancel,
        ));

        let root_id = self.root;
        bound.extend(root.on(doc, "click", move |doc, event| {
            debug!(root = %root_id, "Dismissing dialog on outside click");
            doc.hide(root_id);
            event.stop_propagation();
        }));

        debug!(root = %self.root, listeners = bound.len(), "Dialog activated");
        *self.bound.borrow_mut() = bound;
        self
    }

    /// Remove every listener this dialog attached and hide it.
    pub fn deactivate(&self, doc: &mut Document) {
        self.detach(doc);
        self.hide(doc);
    }

    fn detach(&self, doc: &mut Document) {
        for id in self.bound.borrow_mut().drain(..) {
            doc.off(id);
        }
    }

    /// Size the panel and place it in the middle of the viewport.
    fn center(&self, doc: &mut Document, panel: &Selection) {
        let viewport = doc.viewport();
        let width = &self.config.width;
        let parsed_width = css::parse_int(width);
        if parsed_width.is_none() && !panel.is_empty() {
            warn!(width = %width, "Dialog width has no numeric part, offset is undefined");
        }

        // Measured after `show` and before the new width is applied.
        let height = panel.height(doc).map(f64::from);

        let left = centered_offset(f64::from(viewport.width), parsed_width);
        let top = centered_offset(f64::from(viewport.height), height);

        panel.css(doc, "width", width);
        panel.css(doc, "left", &css::px(left));
        panel.css(doc, "top", &css::px(top));
    }

    fn bind_control(
        &self,
        doc: &mut Document,
        footer: &Selection,
        selector: &str,
        text: &str,
        event_name: &str,
        callback: &Callback,
    ) -> Vec<ListenerId> {
        let control = footer.find(doc, selector);
        if control.is_empty() {
            warn!(selector, "Dialog control not found");
        }
        control.set_text(doc, text);

        let dialog = self.clone();
        let callback = Rc::clone(callback);
        control.on(doc, event_name, move |doc: &mut Document, event: &mut Event| {
            callback(&dialog, doc, event);
        })
    }
}

/// Offset that centers an extent of `size` within `available`. An unknown
/// size gives `NaN`.
pub fn centered_offset(available: f64, size: Option<f64>) -> f64 {
    size.map_or(f64::NAN, |size| (available - size) / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_offset() {
        assert!((centered_offset(1200.0, Some(500.0)) - 350.0).abs() < f64::EPSILON);
        assert!((centered_offset(25.0, Some(6.0)) - 9.5).abs() < f64::EPSILON);
        assert!((centered_offset(80.0, Some(100.0)) + 10.0).abs() < f64::EPSILON);
        assert!(centered_offset(80.0, None).is_nan());
    }
}
