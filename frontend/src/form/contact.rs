use std::rc::Rc;

use log::{debug, warn};
use wasm_bindgen::JsCast;
use web_sys::{Document, FormData, HtmlButtonElement, HtmlFormElement, HtmlInputElement};

use super::controller::{Delivery, DeliveryError, FormSurface, Phase, SubmissionFlow};
use super::field::FormField;
use super::message::Submission;
use crate::components::notification::Toasts;
use crate::config::SiteConfig;
use crate::dom;
use crate::utils::format_phone;

const FORM_ID: &str = "contactForm";
const PHONE_ID: &str = "phone";
const REQUIRED_SELECTOR: &str = "input[required], select[required]";
const FIELD_NAMES: [&str; 5] = ["name", "email", "phone", "service", "message"];
const BUSY_CLASS: &str = "btn--loading";
const BUSY_LABEL: &str = "Enviando...";

pub type ContactFlow = SubmissionFlow<DomForm, WindowDelivery, Toasts>;

/// The `#contactForm` element and the controls the flow touches.
pub struct DomForm {
    form: HtmlFormElement,
    submit: HtmlButtonElement,
    original_label: String,
    required: Vec<FormField>,
}

impl DomForm {
    pub fn find(document: &Document) -> Option<Self> {
        let form: HtmlFormElement = dom::by_id(document, FORM_ID)?;
        let submit = form
            .query_selector("button[type=\"submit\"]")
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlButtonElement>().ok())?;
        let original_label = submit.text_content().unwrap_or_default();
        let required = form
            .query_selector_all(REQUIRED_SELECTOR)
            .map(dom::elements)
            .unwrap_or_default()
            .into_iter()
            .map(FormField::new)
            .collect();

        Some(Self {
            form,
            submit,
            original_label,
            required,
        })
    }

    pub fn form(&self) -> &HtmlFormElement {
        &self.form
    }

    pub fn required_fields(&self) -> &[FormField] {
        &self.required
    }
}

impl FormSurface for DomForm {
    fn validate_required(&self) -> bool {
        // Every field is checked so all errors show at once
        self.required
            .iter()
            .fold(true, |valid, field| field.check().is_ok() && valid)
    }

    fn submission(&self) -> Submission {
        match FormData::new_with_form(&self.form) {
            Ok(data) => Submission::from_pairs(
                FIELD_NAMES
                    .iter()
                    .map(|name| (*name, data.get(name).as_string().unwrap_or_default())),
            ),
            Err(e) => {
                warn!("Failed to read contact form: {:?}", e);
                Submission::default()
            }
        }
    }

    fn set_busy(&self, busy: bool) {
        self.submit.set_disabled(busy);
        let classes = self.submit.class_list();
        if busy {
            let _ = classes.add_1(BUSY_CLASS);
            self.submit.set_text_content(Some(BUSY_LABEL));
        } else {
            let _ = classes.remove_1(BUSY_CLASS);
            self.submit.set_text_content(Some(&self.original_label));
        }
    }

    fn reset(&self) {
        self.form.reset();
        for field in &self.required {
            field.clear_error();
        }
    }
}

/// Opens the deep link in a new tab.
pub struct WindowDelivery;

impl Delivery for WindowDelivery {
    fn deliver(&self, url: &str) -> Result<(), DeliveryError> {
        let window = dom::window().ok_or_else(|| DeliveryError::Open("no window".to_string()))?;
        match window.open_with_url_and_target(url, "_blank") {
            Ok(Some(_)) => Ok(()),
            Ok(None) => Err(DeliveryError::Blocked),
            Err(e) => Err(DeliveryError::Open(format!("{:?}", e))),
        }
    }
}

/// Wires the contact form: inline validation, phone formatting and submit.
pub fn mount(document: &Document, config: Rc<SiteConfig>) -> Option<Rc<ContactFlow>> {
    let Some(surface) = DomForm::find(document) else {
        debug!("No #{} with a submit button, skipping contact form", FORM_ID);
        return None;
    };

    if let Some(phone) = dom::by_id::<HtmlInputElement>(document, PHONE_ID) {
        let input = phone.clone();
        dom::listen(&phone, "input", move |_| {
            input.set_value(&format_phone(&input.value()));
        });
    }

    for field in surface.required_fields() {
        let on_blur = field.clone();
        dom::listen(field.element(), "blur", move |_| {
            let _ = on_blur.check();
        });
        let on_input = field.clone();
        dom::listen(field.element(), "input", move |_| on_input.clear_error());
    }

    let timeout_ms = config.notification_timeout_ms;
    let form = surface.form().clone();
    let flow = Rc::new(SubmissionFlow::new(
        surface,
        WindowDelivery,
        Toasts::new(timeout_ms),
        config,
    ));

    {
        let flow = flow.clone();
        dom::listen(&form, "submit", move |event| {
            event.prevent_default();
            if flow.phase() != Phase::Idle {
                return;
            }
            if let Err(e) = flow.submit() {
                debug!("Contact form not sent: {}", e);
            }
        });
    }

    Some(flow)
}
