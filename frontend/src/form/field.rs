use log::warn;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};

use super::validation::{validate, FieldError, FieldInput, FieldKind};
use crate::dom;

const ERROR_CLASS: &str = "error";
const ERROR_NODE_CLASS: &str = "field-error";

/// A form control that can be validated in place.
#[derive(Clone)]
pub struct FormField {
    element: Element,
}

impl FormField {
    pub fn new(element: Element) -> Self {
        Self { element }
    }

    pub fn element(&self) -> &Element {
        &self.element
    }

    pub fn value(&self) -> String {
        if let Some(input) = self.element.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else if let Some(select) = self.element.dyn_ref::<HtmlSelectElement>() {
            select.value()
        } else if let Some(area) = self.element.dyn_ref::<HtmlTextAreaElement>() {
            area.value()
        } else {
            String::new()
        }
    }

    pub fn kind(&self) -> FieldKind {
        if let Some(input) = self.element.dyn_ref::<HtmlInputElement>() {
            FieldKind::from_input_type(&input.type_())
        } else if self.element.is_instance_of::<HtmlSelectElement>() {
            FieldKind::Select
        } else if self.element.is_instance_of::<HtmlTextAreaElement>() {
            FieldKind::TextArea
        } else {
            FieldKind::Text
        }
    }

    pub fn required(&self) -> bool {
        self.element.has_attribute("required")
    }

    /// Validates the current value and updates the inline error indicator.
    pub fn check(&self) -> Result<(), FieldError> {
        let value = self.value();
        let result = validate(&FieldInput {
            value: &value,
            kind: self.kind(),
            required: self.required(),
        });
        self.show(result);
        result
    }

    fn show(&self, result: Result<(), FieldError>) {
        self.clear_error();

        let Err(error) = result else {
            return;
        };

        let _ = self.element.class_list().add_1(ERROR_CLASS);

        let (Some(document), Some(parent)) = (dom::document(), self.element.parent_element()) else {
            return;
        };
        match document.create_element("span") {
            Ok(node) => {
                node.set_class_name(ERROR_NODE_CLASS);
                node.set_text_content(Some(&error.to_string()));
                if let Err(e) = parent.append_child(&node) {
                    warn!("Failed to attach field error: {:?}", e);
                }
            }
            Err(e) => warn!("Failed to create field error: {:?}", e),
        }
    }

    pub fn clear_error(&self) {
        let _ = self.element.class_list().remove_1(ERROR_CLASS);
        if let Some(parent) = self.element.parent_element() {
            let selector = format!(".{}", ERROR_NODE_CLASS);
            if let Ok(Some(node)) = parent.query_selector(&selector) {
                node.remove();
            }
        }
    }
}
