#![forbid(unsafe_code)]

//! Turning linter panics into linter failures
//!
//! A panic hook records the backtrace at the panic site while a linter call
//! is guarded on the current thread, so the failure keeps the frames of the
//! code that actually panicked. Outside guarded calls the previously
//! installed hook runs unchanged.
//!
//! If another hook replaces ours, a guarded panic leaves no recorded trace.
//! That failure falls back to a backtrace taken where the panic was caught,
//! and the hook is installed again on top of the replacement.

use crate::linters::{LinterFailure, capture_backtrace};
use std::any::Any;
use std::cell::{Cell, RefCell};
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Mutex, PoisonError};

thread_local! {
    static GUARDED: Cell<bool> = const { Cell::new(false) };
    static PANIC_TRACE: RefCell<Option<Vec<String>>> = const { RefCell::new(None) };
}

/// Whether our hook is believed to be the installed one
static HOOK_INSTALLED: Mutex<bool> = Mutex::new(false);

fn install_hook() {
    let mut installed = HOOK_INSTALLED.lock().unwrap_or_else(PoisonError::into_inner);
    if *installed {
        return;
    }

    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        if GUARDED.try_with(Cell::get).unwrap_or(false) {
            let trace = capture_backtrace();
            let _ = PANIC_TRACE.try_with(|slot| *slot.borrow_mut() = Some(trace));
        } else {
            previous(info);
        }
    }));
    *installed = true;
}

fn forget_hook() {
    *HOOK_INSTALLED.lock().unwrap_or_else(PoisonError::into_inner) = false;
}

/// Run a linter call, converting a panic into a [`LinterFailure`]
pub(crate) fn guard<T>(
    call: impl FnOnce() -> Result<T, LinterFailure>,
) -> Result<T, LinterFailure> {
    install_hook();

    let was_guarded = GUARDED.with(|guarded| guarded.replace(true));
    let outcome = panic::catch_unwind(AssertUnwindSafe(call));
    GUARDED.with(|guarded| guarded.set(was_guarded));

    match outcome {
        Ok(result) => result,
        Err(payload) => {
            let backtrace = match PANIC_TRACE.with(|slot| slot.borrow_mut().take()) {
                Some(trace) => trace,
                None => {
                    forget_hook();
                    capture_backtrace()
                }
            };
            Err(LinterFailure::with_backtrace(
                format!("panicked: {}", panic_message(payload.as_ref())),
                backtrace,
            ))
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
