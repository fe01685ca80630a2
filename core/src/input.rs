//! Platform-agnostic input types.
//!
//! Provides key, mouse button, and input event types that identify physical
//! input without depending on any windowing or browser crate. Platform
//! layers map their native events to [`InputEvent`] and feed them to
//! consumers such as [`FlyControls`](crate::controls::FlyControls).

/// Physical keyboard key identifier.
///
/// Matches common physical key positions (US QWERTY layout names).
/// Platform layers map their native key codes to this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum KeyCode {
    // Letters
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,

    // Modifiers
    ShiftLeft,
    ShiftRight,
    ControlLeft,
    ControlRight,
    AltLeft,
    AltRight,

    // Arrows
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    // Common keys
    Space,
    Enter,
    Escape,
    Tab,
}

impl KeyCode {
    /// Check whether this is a Shift key (either side).
    pub fn is_shift(&self) -> bool {
        matches!(self, Self::ShiftLeft | Self::ShiftRight)
    }

    /// Check whether this is an Alt key (either side).
    pub fn is_alt(&self) -> bool {
        matches!(self, Self::AltLeft | Self::AltRight)
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum MouseButton {
    /// Primary button.
    Left,
    /// Wheel button.
    Middle,
    /// Secondary button.
    Right,
}

/// A single input event delivered by the platform layer.
#[derive(Debug, Clone, Copy, PartialEq)]
#[non_exhaustive]
pub enum InputEvent {
    /// A key was pressed.
    KeyDown(KeyCode),
    /// A key was released.
    KeyUp(KeyCode),
    /// A mouse button was pressed.
    MouseDown(MouseButton),
    /// A mouse button was released.
    MouseUp(MouseButton),
    /// The mouse moved by a relative delta, in pixels.
    MouseMove {
        /// Horizontal delta, positive to the right.
        dx: f32,
        /// Vertical delta, positive downward.
        dy: f32,
    },
}
