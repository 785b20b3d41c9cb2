use log::error;
use stylist::GlobalStyle;

/// Rules the scripted effects depend on; the page stylesheet does not ship them.
const EFFECT_STYLES: &str = r#"
    .animate-on-scroll {
        opacity: 0;
        transform: translateY(30px);
        transition: all 0.6s ease-out;
    }

    .animate-in {
        opacity: 1;
        transform: translateY(0);
    }

    .form__input.error,
    .form__select.error,
    .form__textarea.error {
        border-color: #ef4444;
        box-shadow: 0 0 0 3px rgba(239, 68, 68, 0.1);
    }

    .field-error {
        display: block;
        color: #ef4444;
        font-size: 0.875rem;
        margin-top: 0.25rem;
    }

    .notification {
        position: fixed;
        top: 100px;
        right: 20px;
        max-width: 400px;
        z-index: 1100;
        transform: translateX(100%);
        transition: transform 0.3s ease-out;
    }

    .notification--show {
        transform: translateX(0);
    }

    .notification__content {
        display: flex;
        align-items: center;
        justify-content: space-between;
        padding: 1rem;
        background: white;
        border-radius: 0.5rem;
        box-shadow: 0 10px 25px rgba(0, 0, 0, 0.1);
        border-left: 4px solid #10b981;
    }

    .notification--error .notification__content {
        border-left-color: #ef4444;
    }

    .notification--info .notification__content {
        border-left-color: #3b82f6;
    }

    .notification__close {
        background: none;
        border: none;
        font-size: 1.5rem;
        cursor: pointer;
        color: #6b7280;
        margin-left: 1rem;
    }

    .header--scrolled {
        box-shadow: 0 4px 20px rgba(0, 0, 0, 0.1);
        backdrop-filter: blur(10px);
        background-color: rgba(255, 255, 255, 0.95);
    }

    .lazy {
        opacity: 0;
        transition: opacity 0.3s;
    }

    @media (max-width: 640px) {
        .notification {
            right: 10px;
            left: 10px;
            max-width: none;
        }
    }
"#;

/// Mounts the effect styles into `<head>`.
pub fn inject() {
    if let Err(e) = GlobalStyle::new(EFFECT_STYLES) {
        error!("Failed to inject effect styles: {}", e);
    }
}
