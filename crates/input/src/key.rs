use std::fmt;

/// A logical key the viewer responds to.
///
/// Physical bindings (WASD, arrows, Q/E, ...) live in the desktop app; the
/// core only sees these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    Forward,
    Back,
    Left,
    Right,
    RotateLeft,
    RotateRight,
    ScaleUp,
    ScaleDown,
    /// Request application shutdown.
    Exit,
}

impl Key {
    pub const ALL: [Key; 9] = [
        Key::Forward,
        Key::Back,
        Key::Left,
        Key::Right,
        Key::RotateLeft,
        Key::RotateRight,
        Key::ScaleUp,
        Key::ScaleDown,
        Key::Exit,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Key::Forward => "forward",
            Key::Back => "back",
            Key::Left => "left",
            Key::Right => "right",
            Key::RotateLeft => "rotate-left",
            Key::RotateRight => "rotate-right",
            Key::ScaleUp => "scale-up",
            Key::ScaleDown => "scale-down",
            Key::Exit => "exit",
        }
    }

    pub fn from_name(name: &str) -> Option<Key> {
        Key::ALL.into_iter().find(|k| k.name() == name)
    }

    fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-frame query supplied by the input collaborator.
pub trait KeyInput {
    /// Is `key` held down during the current frame?
    fn is_held(&self, key: Key) -> bool;
}

impl<F> KeyInput for F
where
    F: Fn(Key) -> bool,
{
    fn is_held(&self, key: Key) -> bool {
        self(key)
    }
}

/// Set of currently held keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct HeldKeys(u16);

impl HeldKeys {
    pub const NONE: HeldKeys = HeldKeys(0);

    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key transition. Returns true if the held set changed.
    pub fn set(&mut self, key: Key, held: bool) -> bool {
        let before = self.0;
        if held {
            self.0 |= key.bit();
        } else {
            self.0 &= !key.bit();
        }
        before != self.0
    }

    pub fn press(&mut self, key: Key) -> bool {
        self.set(key, true)
    }

    pub fn release(&mut self, key: Key) -> bool {
        self.set(key, false)
    }

    /// Release everything, e.g. when the window loses focus.
    pub fn clear(&mut self) {
        self.0 = 0;
    }

    pub fn contains(&self, key: Key) -> bool {
        self.0 & key.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(&self) -> impl Iterator<Item = Key> + '_ {
        Key::ALL.into_iter().filter(|k| self.contains(*k))
    }
}

impl KeyInput for HeldKeys {
    fn is_held(&self, key: Key) -> bool {
        self.contains(key)
    }
}

impl FromIterator<Key> for HeldKeys {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        let mut keys = HeldKeys::new();
        for key in iter {
            keys.press(key);
        }
        keys
    }
}

impl fmt::Display for HeldKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("none");
        }
        for (i, key) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("+")?;
            }
            f.write_str(key.name())?;
        }
        Ok(())
    }
}
