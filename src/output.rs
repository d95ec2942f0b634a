//! User-facing progress output
//!
//! The installer reports what it is doing through the `println!` and `eprintln!` macros defined
//! here rather than the std ones. Library users can install a callback via
//! [`crate::run_with_callback`] to receive those lines, e.g. to show them in a GUI, instead of
//! having them written to stdout/stderr.

use std::io::Write;
use std::sync::{Mutex, PoisonError};

type OutputCallbackFn = Box<dyn Fn(&str) + Send + Sync>;

static OUTPUT_CALLBACK: Mutex<Option<OutputCallbackFn>> = Mutex::new(None);

/// Route all output to `callback` until the returned guard is dropped.
pub(crate) fn set_output_callback<F>(callback: F) -> OutputCallbackGuard
where
    F: Fn(&str) + Send + Sync + 'static,
{
    *OUTPUT_CALLBACK
        .lock()
        .unwrap_or_else(PoisonError::into_inner) = Some(Box::new(callback));
    OutputCallbackGuard
}

pub struct OutputCallbackGuard;

impl Drop for OutputCallbackGuard {
    fn drop(&mut self) {
        *OUTPUT_CALLBACK
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = None;
    }
}

/// Hand `s` plus a newline to the callback. Returns false if none is set.
fn send_to_callback(s: &str) -> bool {
    if let Ok(guard) = OUTPUT_CALLBACK.lock()
        && let Some(ref callback) = *guard
    {
        callback(s);
        callback("\n");
        return true;
    }
    false
}

pub(crate) fn write_output_line(s: &str) {
    if !send_to_callback(s) {
        std::println!("{s}");
        let _ = std::io::stdout().flush();
    }
}

pub(crate) fn write_error_line(s: &str) {
    if !send_to_callback(s) {
        std::eprintln!("{s}");
        let _ = std::io::stderr().flush();
    }
}

/// Shadows `std::println!` to respect the output callback
macro_rules! println {
    () => {
        $crate::output::write_output_line("")
    };
    ($($arg:tt)*) => {{
        $crate::output::write_output_line(&format!($($arg)*))
    }};
}
pub(crate) use println;

/// Shadows `std::eprintln!` to respect the output callback
macro_rules! eprintln {
    () => {
        $crate::output::write_error_line("")
    };
    ($($arg:tt)*) => {{
        $crate::output::write_error_line(&format!($($arg)*))
    }};
}
pub(crate) use eprintln;
