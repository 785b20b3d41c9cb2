use std::cell::Cell;
use std::rc::Rc;

use log::{debug, error, info};
use thiserror::Error;

use super::message::Submission;
use crate::components::notification::{NotificationKind, Notifier};
use crate::config::SiteConfig;

pub const INVALID_NOTICE: &str = "Por favor, corrija os campos destacados";
pub const SUCCESS_NOTICE: &str = "Mensagem enviada com sucesso! Em breve entraremos em contato.";
pub const FAILURE_NOTICE: &str = "Erro ao enviar mensagem. Tente novamente ou entre em contato diretamente.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Validating,
    Invalid,
    Submitting,
    Succeeded,
    Failed,
}

/// The parts of the contact form the submission flow drives.
pub trait FormSurface {
    /// Checks every required field, marking each invalid one inline.
    fn validate_required(&self) -> bool;
    fn submission(&self) -> Submission;
    fn set_busy(&self, busy: bool);
    fn reset(&self);
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeliveryError {
    #[error("could not open the messaging link: {0}")]
    Open(String),
    #[error("the browser blocked the messaging window")]
    Blocked,
}

/// Hands the composed deep link to the outside world.
#[cfg_attr(test, mockall::automock)]
pub trait Delivery {
    fn deliver(&self, url: &str) -> Result<(), DeliveryError>;
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("the form has invalid fields")]
    Invalid,
    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}

pub struct SubmissionFlow<S, D, N> {
    surface: S,
    delivery: D,
    notifier: N,
    config: Rc<SiteConfig>,
    phase: Cell<Phase>,
}

impl<S, D, N> SubmissionFlow<S, D, N>
where
    S: FormSurface,
    D: Delivery,
    N: Notifier,
{
    pub fn new(surface: S, delivery: D, notifier: N, config: Rc<SiteConfig>) -> Self {
        Self {
            surface,
            delivery,
            notifier,
            config,
            phase: Cell::new(Phase::Idle),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase.get()
    }

    fn enter(&self, phase: Phase) {
        debug!("Contact form {:?} -> {:?}", self.phase.get(), phase);
        self.phase.set(phase);
    }

    /// Runs one submit attempt to completion. The flow is back in `Idle`
    /// when this returns, whatever the outcome.
    pub fn submit(&self) -> Result<(), SubmitError> {
        self.enter(Phase::Validating);

        if !self.surface.validate_required() {
            self.enter(Phase::Invalid);
            self.notifier.notify(INVALID_NOTICE, NotificationKind::Error);
            self.enter(Phase::Idle);
            return Err(SubmitError::Invalid);
        }

        self.enter(Phase::Submitting);
        self.surface.set_busy(true);

        let text = self.surface.submission().compose();
        let url = self.config.whatsapp_link(&text);
        let result = self.delivery.deliver(&url);

        match &result {
            Ok(()) => {
                info!("Contact request handed to WhatsApp");
                self.surface.reset();
                self.notifier.notify(SUCCESS_NOTICE, NotificationKind::Success);
                self.enter(Phase::Succeeded);
            }
            Err(e) => {
                error!("Failed to send contact form: {}", e);
                let notice = format!("{} {}", FAILURE_NOTICE, self.config.email_address);
                self.notifier.notify(&notice, NotificationKind::Error);
                self.enter(Phase::Failed);
            }
        }

        self.surface.set_busy(false);
        self.enter(Phase::Idle);
        result.map_err(SubmitError::from)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::components::notification::MockNotifier;
    use crate::form::message::Submission;
    use crate::form::validation::{validate, FieldInput, FieldKind};

    const SUBMIT_LABEL: &str = "Quero agendar minha consulta";

    /// In-memory stand-in for the contact form.
    struct FakeForm {
        values: RefCell<Submission>,
        errors: RefCell<Vec<&'static str>>,
        disabled: Cell<bool>,
        label: RefCell<String>,
        saved_label: RefCell<Option<String>>,
    }

    impl FakeForm {
        fn with(values: Submission) -> Self {
            Self::with_label(values, SUBMIT_LABEL)
        }

        fn with_label(values: Submission, label: &str) -> Self {
            Self {
                values: RefCell::new(values),
                errors: RefCell::new(Vec::new()),
                disabled: Cell::new(false),
                label: RefCell::new(label.to_string()),
                saved_label: RefCell::new(None),
            }
        }
    }

    impl FormSurface for FakeForm {
        fn validate_required(&self) -> bool {
            let values = self.values.borrow();
            let required = [
                ("name", values.name.as_str(), FieldKind::Text),
                ("email", values.email.as_str(), FieldKind::Email),
                ("phone", values.phone.as_str(), FieldKind::Tel),
                ("service", values.service.as_str(), FieldKind::Select),
            ];

            let mut errors = self.errors.borrow_mut();
            errors.clear();
            for (name, value, kind) in required {
                if validate(&FieldInput { value, kind, required: true }).is_err() {
                    errors.push(name);
                }
            }
            errors.is_empty()
        }

        fn submission(&self) -> Submission {
            self.values.borrow().clone()
        }

        fn set_busy(&self, busy: bool) {
            self.disabled.set(busy);
            let mut label = self.label.borrow_mut();
            if busy {
                let shown = std::mem::replace(&mut *label, "Enviando...".to_string());
                self.saved_label.borrow_mut().get_or_insert(shown);
            } else if let Some(saved) = self.saved_label.borrow_mut().take() {
                *label = saved;
            }
        }

        fn reset(&self) {
            *self.values.borrow_mut() = Submission::default();
        }
    }

    fn ana() -> Submission {
        Submission::from_pairs([
            ("name", "Ana"),
            ("email", "ana@x.com"),
            ("phone", "11999998888"),
            ("service", "inicial"),
        ])
    }

    fn flow(
        form: FakeForm,
        delivery: MockDelivery,
        notifier: MockNotifier,
    ) -> SubmissionFlow<FakeForm, MockDelivery, MockNotifier> {
        SubmissionFlow::new(form, delivery, notifier, Rc::new(SiteConfig::default()))
    }

    #[test]
    fn empty_required_field_never_delivers() {
        let mut values = ana();
        values.email.clear();

        let mut delivery = MockDelivery::new();
        delivery.expect_deliver().never();
        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify()
            .withf(|message, kind| message == INVALID_NOTICE && *kind == NotificationKind::Error)
            .times(1)
            .return_const(());

        let flow = flow(FakeForm::with(values), delivery, notifier);
        assert!(matches!(flow.submit(), Err(SubmitError::Invalid)));
        assert_eq!(*flow.surface.errors.borrow(), vec!["email"]);
        assert!(!flow.surface.disabled.get());
        assert_eq!(flow.phase(), Phase::Idle);
    }

    #[test]
    fn valid_form_delivers_encoded_message() {
        let url = Arc::new(Mutex::new(String::new()));

        let mut delivery = MockDelivery::new();
        {
            let url = url.clone();
            delivery.expect_deliver().times(1).returning(move |u| {
                *url.lock().unwrap() = u.to_string();
                Ok(())
            });
        }
        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify()
            .withf(|message, kind| message == SUCCESS_NOTICE && *kind == NotificationKind::Success)
            .times(1)
            .return_const(());

        let flow = flow(FakeForm::with(ana()), delivery, notifier);
        assert!(flow.submit().is_ok());

        let url = url.lock().unwrap();
        assert!(url.starts_with("https://wa.me/5511999999999?text="));
        assert!(url.contains("Ana"));
        assert!(url.contains("Consulta%20Inicial"));
        assert!(url.contains("ana%40x.com"));
        assert!(!url.contains("undefined"));
    }

    #[test]
    fn success_resets_fields_and_restores_button() {
        let mut delivery = MockDelivery::new();
        delivery.expect_deliver().times(1).returning(|_| Ok(()));
        let mut notifier = MockNotifier::new();
        notifier.expect_notify().times(1).return_const(());

        let flow = flow(FakeForm::with_label(ana(), "Enviar pelo WhatsApp"), delivery, notifier);
        flow.submit().unwrap();

        let form = &flow.surface;
        assert_eq!(*form.values.borrow(), Submission::default());
        assert!(!form.disabled.get());
        assert_eq!(*form.label.borrow(), "Enviar pelo WhatsApp");
        assert_eq!(flow.phase(), Phase::Idle);
    }

    #[test]
    fn delivery_failure_keeps_values_and_recovers() {
        let mut delivery = MockDelivery::new();
        delivery
            .expect_deliver()
            .times(1)
            .returning(|_| Err(DeliveryError::Blocked));
        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify()
            .withf(|message, kind| {
                message.starts_with(FAILURE_NOTICE)
                    && message.ends_with("contato@marianasantos.com")
                    && *kind == NotificationKind::Error
            })
            .times(1)
            .return_const(());

        let flow = flow(FakeForm::with_label(ana(), "Enviar pelo WhatsApp"), delivery, notifier);
        let err = flow.submit().unwrap_err();
        assert!(matches!(err, SubmitError::Delivery(DeliveryError::Blocked)));

        let form = &flow.surface;
        assert_eq!(form.values.borrow().name, "Ana");
        assert!(!form.disabled.get());
        assert_eq!(*form.label.borrow(), "Enviar pelo WhatsApp");
        assert_eq!(flow.phase(), Phase::Idle);
    }

    #[test]
    fn resubmitting_after_failure_works() {
        let mut delivery = MockDelivery::new();
        let mut attempts = 0;
        delivery.expect_deliver().times(2).returning(move |_| {
            attempts += 1;
            if attempts == 1 {
                Err(DeliveryError::Open("popup error".to_string()))
            } else {
                Ok(())
            }
        });
        let mut notifier = MockNotifier::new();
        notifier.expect_notify().times(2).return_const(());

        let flow = flow(FakeForm::with(ana()), delivery, notifier);
        assert!(flow.submit().is_err());
        assert!(flow.submit().is_ok());
        assert_eq!(*flow.surface.values.borrow(), Submission::default());
    }
}
