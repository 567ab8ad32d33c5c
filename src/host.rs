//! Outbound boundary to the platform keyboard widget.
//!
//! The session talks to the platform side through [`KeyboardHost`], nine
//! best-effort calls mirroring the static methods a managed-runtime bridge
//! class exposes. Every call can fail without consequence for the caller:
//! the session logs the failure, keeps its own state, and moves on. A
//! binding the one-time resolution step could not locate yields
//! [`HostError::Unbound`] on every use, which callers treat as a skip.

use thiserror::Error;

/// One of the nine outbound boundary calls.
///
/// [`std::fmt::Display`] renders the name the call target is resolved
/// under, which is what belongs in logs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HostCall {
    /// Ask the platform to show the soft keyboard.
    ShowKeyboard,
    /// Ask the platform to hide the soft keyboard.
    HideKeyboard,
    /// Read the platform's notion of keyboard visibility.
    IsKeyboardVisible,
    /// Push the field text to the platform widget.
    SetText,
    /// Read the platform widget's field text.
    GetText,
    /// Push the cursor position to the platform widget.
    SetCursorPosition,
    /// Read the platform widget's cursor position.
    GetCursorPosition,
    /// Forward the advisory input-type bits.
    SetInputType,
    /// Forward the advisory hint text.
    SetHint,
}

impl HostCall {
    /// All nine calls, in resolution order.
    pub const ALL: [HostCall; 9] = [
        HostCall::ShowKeyboard,
        HostCall::HideKeyboard,
        HostCall::IsKeyboardVisible,
        HostCall::SetText,
        HostCall::GetText,
        HostCall::SetCursorPosition,
        HostCall::GetCursorPosition,
        HostCall::SetInputType,
        HostCall::SetHint,
    ];

    /// Name the call target is resolved under on the bridge class.
    pub fn binding_name(self) -> &'static str {
        match self {
            HostCall::ShowKeyboard => "showKeyboardStatic",
            HostCall::HideKeyboard => "hideKeyboardStatic",
            HostCall::IsKeyboardVisible => "isKeyboardVisibleStatic",
            HostCall::SetText => "setTextStatic",
            HostCall::GetText => "getTextStatic",
            HostCall::SetCursorPosition => "setCursorPositionStatic",
            HostCall::GetCursorPosition => "getCursorPositionStatic",
            HostCall::SetInputType => "setInputType",
            HostCall::SetHint => "setHint",
        }
    }
}

impl std::fmt::Display for HostCall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.binding_name())
    }
}

/// Failure of a single outbound boundary call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HostError {
    /// The call target was not located during binding setup; the call was
    /// never attempted.
    #[error("no binding resolved for {0}")]
    Unbound(HostCall),
    /// The call reached the boundary and failed there.
    #[error("{call} failed: {reason}")]
    Failed {
        /// The failing call.
        call: HostCall,
        /// Failure description from the boundary.
        reason: String,
    },
}

impl HostError {
    /// Returns which call failed.
    pub fn call(&self) -> HostCall {
        match self {
            HostError::Unbound(call) => *call,
            HostError::Failed { call, .. } => *call,
        }
    }

    /// Returns whether the failure is a missing binding rather than a
    /// failed invocation.
    pub fn is_unbound(&self) -> bool {
        matches!(self, HostError::Unbound(_))
    }
}

/// The managed-runtime side of the keyboard boundary.
///
/// Implementations are shared across threads behind an `Arc`; every method
/// is a single synchronous boundary call. The Android adapter binds these
/// to JNI static methods; tests use a recording mock.
pub trait KeyboardHost: Send + Sync {
    /// Asks the platform to show the soft keyboard.
    fn show_keyboard(&self) -> Result<(), HostError>;

    /// Asks the platform to hide the soft keyboard.
    fn hide_keyboard(&self) -> Result<(), HostError>;

    /// Reads the platform's notion of keyboard visibility.
    fn is_keyboard_visible(&self) -> Result<bool, HostError>;

    /// Pushes the field text to the platform widget.
    fn set_text(&self, text: &str) -> Result<(), HostError>;

    /// Reads the platform widget's field text.
    fn get_text(&self) -> Result<String, HostError>;

    /// Pushes the cursor position to the platform widget.
    fn set_cursor_position(&self, position: i32) -> Result<(), HostError>;

    /// Reads the platform widget's cursor position.
    fn get_cursor_position(&self) -> Result<i32, HostError>;

    /// Forwards the advisory input-type bits.
    fn set_input_type(&self, input_type: i32) -> Result<(), HostError>;

    /// Forwards the advisory hint text.
    fn set_hint(&self, hint: &str) -> Result<(), HostError>;
}
