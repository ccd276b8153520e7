use std::fmt;

/// Opaque identifier of a live OS window (an `HWND` on Windows).
///
/// Zero is never a valid window.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowId(pub usize);

impl WindowId {
    /// Returns whether this is the null handle.
    pub fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WindowId(0x{:X})", self.0)
    }
}

/// Opaque identifier of a window's system menu (an `HMENU` on Windows).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MenuId(pub usize);

/// A position in screen coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Per-edge margins in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Margins {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Margins {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// The same margin on all four edges.
    pub fn uniform(value: i32) -> Self {
        Self::new(value, value, value, value)
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

/// Commands offered by the native system menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SystemCommand {
    Restore,
    Move,
    Size,
    Minimize,
    Maximize,
    Close,
}

impl SystemCommand {
    /// The `SC_*` identifier sent with `WM_SYSCOMMAND`.
    pub fn id(self) -> u32 {
        match self {
            Self::Size => 0xF000,
            Self::Move => 0xF010,
            Self::Minimize => 0xF020,
            Self::Maximize => 0xF030,
            Self::Close => 0xF060,
            Self::Restore => 0xF120,
        }
    }

    /// Maps an `SC_*` identifier back to a command.
    pub fn from_id(id: u32) -> Option<Self> {
        // The low four bits are used internally by the OS.
        match id & 0xFFF0 {
            0xF000 => Some(Self::Size),
            0xF010 => Some(Self::Move),
            0xF020 => Some(Self::Minimize),
            0xF030 => Some(Self::Maximize),
            0xF060 => Some(Self::Close),
            0xF120 => Some(Self::Restore),
            _ => None,
        }
    }
}
