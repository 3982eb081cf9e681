pub fn set_panic_hook() {
    // When the `console_error_panic_hook` feature is enabled, panics are
    // forwarded to the browser console with a readable backtrace.
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}
