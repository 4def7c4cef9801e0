pub mod terminal;

/// Output surface the views draw on.
pub trait Screen: Send + Sync {
    /// Interrupt the user with `message`.
    fn alert(&self, message: &str);

    /// Replace the current page with `frame`.
    fn render(&self, frame: &str);
}

/// Screen writing to stdout; `styled` enables clearing and ANSI highlighting.
#[must_use]
pub const fn terminal(styled: bool) -> terminal::Screen {
    terminal::Screen::new(styled)
}
