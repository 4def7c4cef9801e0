use std::sync::{Arc, Mutex, Weak};

use futures_lite::io::{AsyncBufRead, AsyncBufReadExt};

/// A key as seen by view key observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Char(char),
}

/// Translate one line of terminal input into key presses.
///
/// Terminal input is line buffered, so every character of the line is
/// reported first and the line terminator last.
#[must_use]
pub fn keys_from_line(line: &str) -> Vec<Key> {
    line.chars()
        .map(Key::Char)
        .chain(std::iter::once(Key::Enter))
        .collect()
}

/// Feed every line read from `input` to `keyboard` until end of input, then
/// close the keyboard.
///
/// Bytes that are not UTF-8 are replaced, so a garbled line still ends in
/// [`Key::Enter`].
pub async fn pump(mut input: impl AsyncBufRead + Unpin, keyboard: &Keyboard) {
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match input.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(%e, "reading input failed, stopping");
                break;
            }
        }
        let line = String::from_utf8_lossy(&buf);
        let line = line.trim_end_matches('\n').trim_end_matches('\r');
        for key in keys_from_line(line) {
            keyboard.press(key);
        }
    }
    tracing::info!("input closed");
    keyboard.close();
}

type Callback = Arc<dyn Fn() + Send + Sync>;

struct Registration {
    id: u64,
    key: Key,
    on_press: Callback,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    registrations: Vec<Registration>,
}

/// Process-wide key event hub.
///
/// Observers attach with [`Keyboard::listen`] and stay attached exactly as
/// long as the returned [`Listener`] lives.
#[derive(Clone)]
pub struct Keyboard {
    registry: Arc<Mutex<Registry>>,
    // Never carries a message; closing it tells waiters no more keys come.
    open: async_channel::Sender<()>,
    closed: async_channel::Receiver<()>,
}

impl Default for Keyboard {
    fn default() -> Self {
        let (open, closed) = async_channel::bounded(1);
        Self {
            registry: Arc::default(),
            open,
            closed,
        }
    }
}

impl Keyboard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the input as exhausted. Observers stay attached.
    pub fn close(&self) {
        self.open.close();
    }

    /// Wait until [`Keyboard::close`] has been called.
    pub async fn closed(&self) {
        // `recv` only fails once the channel is closed.
        let _ = self.closed.recv().await;
    }

    /// Call `on_press` every time `key` is pressed until the returned
    /// listener is dropped.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use = "the observer is removed as soon as the listener is dropped"]
    pub fn listen(&self, key: Key, on_press: impl Fn() + Send + Sync + 'static) -> Listener {
        let mut registry = self.registry.lock().expect("poisoned");
        let id = registry.next_id;
        registry.next_id += 1;
        registry.registrations.push(Registration {
            id,
            key,
            on_press: Arc::new(on_press),
        });
        drop(registry);
        tracing::debug!(id, ?key, "key listener attached");
        Listener {
            id,
            registry: Arc::downgrade(&self.registry),
        }
    }

    /// Deliver a key press to every observer of `key`.
    ///
    /// Returns how many observers were notified.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn press(&self, key: Key) -> usize {
        // Callbacks run outside the lock so they may attach or detach observers.
        let matching: Vec<Callback> = self
            .registry
            .lock()
            .expect("poisoned")
            .registrations
            .iter()
            .filter(|r| r.key == key)
            .map(|r| Arc::clone(&r.on_press))
            .collect();
        for on_press in &matching {
            on_press();
        }
        matching.len()
    }

    /// Number of attached observers.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn listeners(&self) -> usize {
        self.registry.lock().expect("poisoned").registrations.len()
    }
}

/// Keeps a key observer attached. Dropping it detaches the observer.
pub struct Listener {
    id: u64,
    registry: Weak<Mutex<Registry>>,
}

impl Drop for Listener {
    fn drop(&mut self) {
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        let Ok(mut registry) = registry.lock() else {
            return;
        };
        registry.registrations.retain(|r| r.id != self.id);
        tracing::debug!(id = self.id, "key listener detached");
    }
}
