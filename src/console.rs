use std::sync::Once;

static CONSOLE_INIT: Once = Once::new();

/// One-time console setup, meant to be called at process start.
///
/// Rust's standard streams are neither tied to standard input nor
/// synchronized with C stdio, so the only work left is enabling ANSI escape
/// processing on Windows consoles. Later calls do nothing.
pub fn init_console() {
    CONSOLE_INIT.call_once(|| {
        #[cfg(windows)]
        colored::control::set_virtual_terminal(true).ok();
    });
}

#[test]
fn test_init_console_is_idempotent() {
    init_console();
    init_console();
    assert!(CONSOLE_INIT.is_completed());
}
