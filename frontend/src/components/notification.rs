use std::cell::{Cell, RefCell};

use gloo_timers::callback::Timeout;
use log::warn;
use web_sys::Element;
use yew::prelude::*;
use yew::AppHandle;

use crate::dom;

const ENTER_DELAY_MS: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

impl NotificationKind {
    /// Unrecognised names fall back to `Info`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "success" => NotificationKind::Success,
            "error" => NotificationKind::Error,
            _ => NotificationKind::Info,
        }
    }

    pub fn modifier(self) -> &'static str {
        match self {
            NotificationKind::Success => "notification--success",
            NotificationKind::Error => "notification--error",
            NotificationKind::Info => "notification--info",
        }
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait Notifier {
    fn notify(&self, message: &str, kind: NotificationKind);
}

#[derive(Properties, PartialEq)]
pub struct NotificationProps {
    pub message: String,
    pub kind: NotificationKind,
    pub on_close: Callback<()>,
}

#[function_component(Notification)]
pub fn notification(props: &NotificationProps) -> Html {
    let shown = use_state(|| false);

    // Slide in shortly after mounting so the transition runs
    {
        let shown = shown.setter();
        use_effect_with_deps(
            move |_| {
                let timeout = Timeout::new(ENTER_DELAY_MS, move || shown.set(true));
                move || drop(timeout)
            },
            (),
        );
    }

    let close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    html! {
        <div class={classes!("notification", props.kind.modifier(), (*shown).then(|| "notification--show"))}>
            <div class="notification__content">
                <span class="notification__message">{ props.message.clone() }</span>
                <button class="notification__close" onclick={close}>{"×"}</button>
            </div>
        </div>
    }
}

struct ActiveToast {
    id: u64,
    app: AppHandle<Notification>,
    host: Element,
    _expiry: Timeout,
}

impl ActiveToast {
    fn close(self) {
        self.app.destroy();
        self.host.remove();
    }
}

thread_local! {
    static ACTIVE: RefCell<Option<ActiveToast>> = RefCell::new(None);
    static NEXT_ID: Cell<u64> = Cell::new(0);
}

/// Removes toast `id` if it is still the one on screen.
fn dismiss(id: u64) {
    let toast = ACTIVE.with(|active| {
        let mut active = active.borrow_mut();
        if active.as_ref().map(|toast| toast.id) == Some(id) {
            active.take()
        } else {
            None
        }
    });
    if let Some(toast) = toast {
        toast.close();
    }
}

fn dismiss_current() {
    if let Some(toast) = ACTIVE.with(|active| active.borrow_mut().take()) {
        toast.close();
    }
}

/// Shows one toast at a time in a host element appended to `<body>`.
pub struct Toasts {
    timeout_ms: u32,
}

impl Toasts {
    pub fn new(timeout_ms: u32) -> Self {
        Self { timeout_ms }
    }
}

impl Notifier for Toasts {
    fn notify(&self, message: &str, kind: NotificationKind) {
        dismiss_current();

        let (Some(document), Some(body)) = (dom::document(), dom::body()) else {
            return;
        };
        let host = match document.create_element("div") {
            Ok(host) => host,
            Err(e) => {
                warn!("Failed to create notification host: {:?}", e);
                return;
            }
        };
        if let Err(e) = body.append_child(&host) {
            warn!("Failed to attach notification host: {:?}", e);
            return;
        }

        let id = NEXT_ID.with(|next| {
            let id = next.get();
            next.set(id + 1);
            id
        });

        // Closing tears down the app that owns the button, so wait a tick.
        let on_close = Callback::from(move |_: ()| {
            Timeout::new(0, move || dismiss(id)).forget();
        });
        let app = yew::Renderer::<Notification>::with_root_and_props(
            host.clone(),
            NotificationProps {
                message: message.to_string(),
                kind,
                on_close,
            },
        )
        .render();

        let expiry = Timeout::new(self.timeout_ms, move || dismiss(id));
        ACTIVE.with(|active| {
            *active.borrow_mut() = Some(ActiveToast {
                id,
                app,
                host,
                _expiry: expiry,
            });
        });
    }
}
