/// Keyboard keys tracked by the input snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Space,

    Up,
    Down,
    Left,
    Right,

    W,
    A,
    S,
    D,
    P,
}

impl Key {
    pub const COUNT: usize = 12;

    pub const ALL: [Key; Key::COUNT] = [
        Key::Escape,
        Key::Enter,
        Key::Space,
        Key::Up,
        Key::Down,
        Key::Left,
        Key::Right,
        Key::W,
        Key::A,
        Key::S,
        Key::D,
        Key::P,
    ];

    #[inline(always)]
    pub const fn to_index(self) -> usize {
        self as usize
    }
}

/// Input state for a single tick. Rebuilt every tick by [`InputCollector`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    down: [bool; Key::COUNT],
    pressed: [bool; Key::COUNT],
    released: [bool; Key::COUNT],
    quit: bool,
}

impl InputSnapshot {
    /// Key is held at the end of the tick.
    #[inline]
    pub fn is_down(&self, key: Key) -> bool {
        self.down[key.to_index()]
    }

    /// Key went down since the previous tick.
    #[inline]
    pub fn was_pressed(&self, key: Key) -> bool {
        self.pressed[key.to_index()]
    }

    #[inline]
    pub fn was_released(&self, key: Key) -> bool {
        self.released[key.to_index()]
    }

    /// `Some(true)` if newly pressed, `Some(false)` if newly released.
    ///
    /// A key tapped and let go within one tick reports the press.
    pub fn transition(&self, key: Key) -> Option<bool> {
        if self.was_pressed(key) {
            Some(true)
        } else if self.was_released(key) {
            Some(false)
        } else {
            None
        }
    }

    /// The window was closed or the process was asked to stop.
    #[inline]
    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    pub fn with_quit(mut self) -> Self {
        self.quit = true;
        self
    }

    pub fn with_pressed(mut self, key: Key) -> Self {
        self.pressed[key.to_index()] = true;
        self.down[key.to_index()] = true;
        self
    }

    pub fn with_down(mut self, key: Key) -> Self {
        self.down[key.to_index()] = true;
        self
    }
}

/// Accumulates host events between ticks.
#[derive(Debug, Default)]
pub struct InputCollector {
    current: InputSnapshot,
}

impl InputCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key(&mut self, key: Key, down: bool, repeat: bool) {
        let i = key.to_index();
        let cur = &mut self.current;

        if down {
            if !repeat && !cur.down[i] {
                cur.pressed[i] = true;
            }
            cur.down[i] = true;
        } else {
            if cur.down[i] {
                cur.released[i] = true;
            }
            cur.down[i] = false;
        }
    }

    pub fn request_quit(&mut self) {
        self.current.quit = true;
    }

    /// Forget held keys, e.g. after the window lost focus. A pending quit
    /// request survives.
    pub fn clear(&mut self) {
        let quit = self.current.quit;
        self.current = InputSnapshot { quit, ..InputSnapshot::default() };
    }

    /// Produces the snapshot for the next tick. Edges and the quit flag are
    /// consumed; held state carries over.
    pub fn snapshot(&mut self) -> InputSnapshot {
        let out = self.current.clone();
        self.current.pressed = [false; Key::COUNT];
        self.current.released = [false; Key::COUNT];
        self.current.quit = false;
        out
    }
}
