use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

// Whitespace is stripped before matching, so the formatted variant allows the
// space after the area code to be missing.
static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\([0-9]{2}\)\s?[0-9]{4,5}-[0-9]{4}$|^[0-9]{10,11}$").expect("valid phone pattern")
});

static NON_WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9_\s]").expect("valid sanitize pattern"));

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Accepts `(DD) DDDD-DDDD`, `(DD) DDDDD-DDDD` or 10-11 bare digits.
pub fn is_valid_phone(phone: &str) -> bool {
    let compact: String = phone.chars().filter(|c| !c.is_whitespace()).collect();
    PHONE_RE.is_match(&compact)
}

/// Formats 10 or 11 digit Brazilian numbers. Anything else is returned as is.
pub fn format_phone(phone: &str) -> String {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    match digits.len() {
        11 => format!("({}) {}-{}", &digits[..2], &digits[2..7], &digits[7..]),
        10 => format!("({}) {}-{}", &digits[..2], &digits[2..6], &digits[6..]),
        _ => phone.to_string(),
    }
}

pub fn sanitize_string(input: &str) -> String {
    let stripped = NON_WORD_RE.replace_all(input, "");
    WHITESPACE_RE.replace_all(&stripped, " ").trim().to_string()
}

pub fn now_ms() -> f64 {
    web_sys::js_sys::Date::now()
}

/// Fixed-window rate limiter: the first call passes, later calls are dropped
/// until `limit_ms` has elapsed since the last one that passed.
#[derive(Debug, Clone)]
pub struct Throttle {
    limit_ms: f64,
    window_start: Option<f64>,
}

impl Throttle {
    pub fn new(limit_ms: u32) -> Self {
        Self {
            limit_ms: f64::from(limit_ms),
            window_start: None,
        }
    }

    pub fn try_fire(&mut self, now_ms: f64) -> bool {
        match self.window_start {
            Some(start) if now_ms - start < self.limit_ms => false,
            _ => {
                self.window_start = Some(now_ms);
                true
            }
        }
    }
}

pub fn throttle<F>(limit_ms: u32, f: F) -> impl FnMut()
where
    F: FnMut(),
{
    throttle_with_clock(limit_ms, now_ms, f)
}

pub fn throttle_with_clock<F, C>(limit_ms: u32, clock: C, mut f: F) -> impl FnMut()
where
    F: FnMut(),
    C: Fn() -> f64,
{
    let mut gate = Throttle::new(limit_ms);
    move || {
        if gate.try_fire(clock()) {
            f();
        }
    }
}

/// Runs `f` once `wait_ms` have passed without another call. Each call drops
/// the pending timeout, which cancels it.
pub fn debounce<F>(wait_ms: u32, f: F) -> impl FnMut()
where
    F: Fn() + 'static,
{
    let f = Rc::new(f);
    let pending: Rc<RefCell<Option<Timeout>>> = Rc::new(RefCell::new(None));
    move || {
        let f = f.clone();
        let timeout = Timeout::new(wait_ms, move || (*f)());
        pending.borrow_mut().replace(timeout);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn email_accepts_simple_addresses() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("ana.souza+site@clinica.com.br"));
    }

    #[test]
    fn email_rejects_missing_at_or_dot() {
        for bad in ["", "ana", "ana.x.com", "ana@x", "ana@xcom", "@x.com", "ana@.", "an a@x.com", "ana@x.com "] {
            assert!(!is_valid_email(bad), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn phone_accepts_formatted_and_bare_numbers() {
        assert!(is_valid_phone("(11) 99999-8888"));
        assert!(is_valid_phone("(11) 3333-4444"));
        assert!(is_valid_phone("11999998888"));
        assert!(is_valid_phone("1133334444"));
        assert!(is_valid_phone(" 11 99999 8888 "));
    }

    #[test]
    fn phone_rejects_other_shapes() {
        for bad in ["", "999998888", "119999988880", "(11) 999-8888", "11-99999-8888", "abcdefghijk"] {
            assert!(!is_valid_phone(bad), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn formatter_handles_eleven_and_ten_digits() {
        assert_eq!(format_phone("11999998888"), "(11) 99999-8888");
        assert_eq!(format_phone("1133334444"), "(11) 3333-4444");
        assert_eq!(format_phone("(11) 99999-8888"), "(11) 99999-8888");
        assert_eq!(format_phone("11 9 9999 8888"), "(11) 99999-8888");
    }

    #[test]
    fn formatter_leaves_other_lengths_alone() {
        for input in ["", "1", "119999", "119999988880", "abc", "(11) 9999"] {
            assert_eq!(format_phone(input), input);
        }
    }

    #[test]
    fn formatter_output_matches_phone_check() {
        let digits = "0123456789";
        for len in [10usize, 11] {
            for shift in 0..10 {
                let number: String = digits.chars().cycle().skip(shift).take(len).collect();
                let formatted = format_phone(&number);
                assert!(is_valid_phone(&formatted), "{formatted}");
                assert_eq!(formatted.len(), len + 4);
            }
        }
    }

    #[test]
    fn sanitize_strips_symbols_and_collapses_spaces() {
        assert_eq!(sanitize_string("  Olá,   mundo!  "), "Ol mundo");
        assert_eq!(sanitize_string("a\t\nb_c-d"), "a b_cd");
        assert_eq!(sanitize_string("***"), "");
    }

    #[test]
    fn throttle_fires_first_then_waits_for_the_window() {
        let mut gate = Throttle::new(16);
        assert!(gate.try_fire(0.0));
        assert!(!gate.try_fire(5.0));
        assert!(!gate.try_fire(15.9));
        assert!(gate.try_fire(16.0));
        assert!(!gate.try_fire(20.0));
        assert!(gate.try_fire(40.0));
    }

    #[test]
    fn throttled_handler_runs_at_most_once_per_window() {
        let clock = Rc::new(Cell::new(0.0));
        let calls = Rc::new(Cell::new(0u32));

        let mut handler = {
            let clock = clock.clone();
            let calls = calls.clone();
            throttle_with_clock(16, move || clock.get(), move || calls.set(calls.get() + 1))
        };

        for i in 0..100 {
            clock.set(f64::from(i));
            handler();
        }

        let elapsed = 100.0_f64;
        let bound = (elapsed / 16.0).ceil() as u32;
        assert!(calls.get() >= 1);
        assert!(calls.get() <= bound, "{} calls, bound {}", calls.get(), bound);
    }
}
