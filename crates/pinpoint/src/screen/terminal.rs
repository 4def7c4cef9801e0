use std::io::Write;
use std::sync::Mutex;

const RULE: &str = "----------------------------------------";
const CLEAR: &str = "\x1b[2J\x1b[H";

/// Console screen.
///
/// On a TTY (`styled`) every frame replaces the screen and the latest alert
/// is repeated under the next frame so the clear does not wipe it. Otherwise
/// frames are printed one after another, separated by a rule.
pub struct Screen {
    styled: bool,
    pending_alert: Mutex<Option<String>>,
}

impl Screen {
    #[must_use]
    pub const fn new(styled: bool) -> Self {
        Self {
            styled,
            pending_alert: Mutex::new(None),
        }
    }

    fn take_alert(&self) -> Option<String> {
        self.pending_alert.lock().ok()?.take()
    }
}

impl crate::screen::Screen for Screen {
    fn alert(&self, message: &str) {
        let mut stdout = std::io::stdout().lock();
        let _ = writeln!(stdout, "{}", format_alert(message, self.styled));
        let _ = stdout.flush();
        if self.styled {
            if let Ok(mut pending) = self.pending_alert.lock() {
                *pending = Some(message.to_owned());
            }
        }
    }

    fn render(&self, frame: &str) {
        let alert = if self.styled { self.take_alert() } else { None };
        let mut stdout = std::io::stdout().lock();
        let _ = writeln!(
            stdout,
            "{}",
            format_frame(frame, alert.as_deref(), self.styled)
        );
        let _ = stdout.flush();
    }
}

fn format_alert(message: &str, styled: bool) -> String {
    if styled {
        // Bold red.
        format!("\x1b[1;31m! {message}\x1b[0m")
    } else {
        format!("! {message}")
    }
}

fn format_frame(frame: &str, alert: Option<&str>, styled: bool) -> String {
    if !styled {
        return format!("{RULE}\n{frame}");
    }
    match alert {
        Some(message) => format!("{CLEAR}{frame}\n\n{}", format_alert(message, true)),
        None => format!("{CLEAR}{frame}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screen::Screen as _;

    #[test]
    fn plain_alert() {
        assert_eq!(format_alert("Enable location access!", false), "! Enable location access!");
    }

    #[test]
    fn styled_alert_is_reset() {
        let alert = format_alert("x", true);
        assert!(alert.starts_with("\x1b[1;31m"));
        assert!(alert.ends_with("\x1b[0m"));
    }

    #[test]
    fn plain_frame_follows_rule() {
        assert_eq!(format_frame("hello", None, false), format!("{RULE}\nhello"));
        assert_eq!(format_frame("hello", Some("x"), false), format!("{RULE}\nhello"));
    }

    #[test]
    fn styled_frame_clears_first() {
        assert_eq!(format_frame("hello", None, true), "\x1b[2J\x1b[Hhello");
    }

    #[test]
    fn styled_frame_repeats_alert_below() {
        let out = format_frame("hello", Some("Enable location access!"), true);
        assert!(out.starts_with("\x1b[2J\x1b[Hhello\n\n"));
        assert!(out.ends_with("! Enable location access!\x1b[0m"));
    }

    #[test]
    fn alert_is_carried_into_one_styled_frame() {
        let screen = Screen::new(true);
        screen.alert("Enable location access!");
        assert_eq!(screen.take_alert().as_deref(), Some("Enable location access!"));
        assert_eq!(screen.take_alert(), None);
    }

    #[test]
    fn plain_screen_keeps_no_alert() {
        let screen = Screen::new(false);
        screen.alert("Enable location access!");
        assert_eq!(screen.take_alert(), None);
    }
}
