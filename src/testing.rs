//! Test double for the keyboard boundary.
//!
//! [`RecordingHost`] behaves like a minimal platform keyboard widget: it
//! stores what the session pushes, answers pulls from that storage, and
//! records every call that crossed the boundary in order. Individual
//! bindings can be scripted missing or failing to exercise the degraded
//! paths.

use parking_lot::Mutex;

use crate::host::{HostCall, HostError, KeyboardHost};

/// One boundary crossing observed by [`RecordingHost`], with arguments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecordedCall {
    /// The session asked to show the keyboard.
    ShowKeyboard,
    /// The session asked to hide the keyboard.
    HideKeyboard,
    /// The session pulled the visibility flag.
    IsKeyboardVisible,
    /// The session pushed this text.
    SetText(String),
    /// The session pulled the widget text.
    GetText,
    /// The session pushed this cursor position.
    SetCursorPosition(i32),
    /// The session pulled the cursor position.
    GetCursorPosition,
    /// The session forwarded these input-type bits.
    SetInputType(i32),
    /// The session forwarded this hint.
    SetHint(String),
}

#[derive(Default)]
struct RecordingHostInner {
    calls: Vec<RecordedCall>,
    unbound: Vec<HostCall>,
    failing: Vec<(HostCall, String)>,
    visible: bool,
    text: String,
    cursor: i32,
}

/// Recording fake of the platform keyboard widget.
///
/// Calls against missing bindings return [`HostError::Unbound`] and are not
/// recorded (they never cross the boundary); scripted failures are recorded
/// and then fail. Everything else succeeds and mutates the fake widget
/// state, which the pull calls read back.
#[derive(Default)]
pub struct RecordingHost {
    inner: Mutex<RecordingHostInner>,
}

impl RecordingHost {
    /// Creates a host with every binding resolved and succeeding.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a binding as unresolved; its calls are skipped.
    pub fn with_unbound(self, call: HostCall) -> Self {
        self.inner.lock().unbound.push(call);
        self
    }

    /// Scripts a binding to fail with `reason` on every call.
    pub fn with_failure(self, call: HostCall, reason: &str) -> Self {
        self.inner.lock().failing.push((call, reason.to_string()));
        self
    }

    /// Overwrites the fake widget's visibility.
    pub fn set_platform_visible(&self, visible: bool) {
        self.inner.lock().visible = visible;
    }

    /// Overwrites the fake widget's text.
    pub fn set_platform_text(&self, text: &str) {
        self.inner.lock().text = text.to_string();
    }

    /// Overwrites the fake widget's cursor position.
    pub fn set_platform_cursor(&self, cursor: i32) {
        self.inner.lock().cursor = cursor;
    }

    /// Returns all recorded calls in order, leaving them recorded.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.inner.lock().calls.clone()
    }

    /// Drains and returns all recorded calls in order.
    pub fn take_calls(&self) -> Vec<RecordedCall> {
        std::mem::take(&mut self.inner.lock().calls)
    }

    /// Returns how many calls crossed the boundary so far.
    pub fn call_count(&self) -> usize {
        self.inner.lock().calls.len()
    }

    fn gate(&self, call: HostCall) -> Result<(), HostError> {
        let inner = self.inner.lock();
        if inner.unbound.contains(&call) {
            return Err(HostError::Unbound(call));
        }
        Ok(())
    }

    fn record(&self, call: HostCall, recorded: RecordedCall) -> Result<(), HostError> {
        let mut inner = self.inner.lock();
        inner.calls.push(recorded);
        if let Some((_, reason)) = inner.failing.iter().find(|(c, _)| *c == call) {
            return Err(HostError::Failed {
                call,
                reason: reason.clone(),
            });
        }
        Ok(())
    }
}

impl KeyboardHost for RecordingHost {
    fn show_keyboard(&self) -> Result<(), HostError> {
        self.gate(HostCall::ShowKeyboard)?;
        self.record(HostCall::ShowKeyboard, RecordedCall::ShowKeyboard)?;
        self.inner.lock().visible = true;
        Ok(())
    }

    fn hide_keyboard(&self) -> Result<(), HostError> {
        self.gate(HostCall::HideKeyboard)?;
        self.record(HostCall::HideKeyboard, RecordedCall::HideKeyboard)?;
        self.inner.lock().visible = false;
        Ok(())
    }

    fn is_keyboard_visible(&self) -> Result<bool, HostError> {
        self.gate(HostCall::IsKeyboardVisible)?;
        self.record(HostCall::IsKeyboardVisible, RecordedCall::IsKeyboardVisible)?;
        Ok(self.inner.lock().visible)
    }

    fn set_text(&self, text: &str) -> Result<(), HostError> {
        self.gate(HostCall::SetText)?;
        self.record(HostCall::SetText, RecordedCall::SetText(text.to_string()))?;
        self.inner.lock().text = text.to_string();
        Ok(())
    }

    fn get_text(&self) -> Result<String, HostError> {
        self.gate(HostCall::GetText)?;
        self.record(HostCall::GetText, RecordedCall::GetText)?;
        Ok(self.inner.lock().text.clone())
    }

    fn set_cursor_position(&self, position: i32) -> Result<(), HostError> {
        self.gate(HostCall::SetCursorPosition)?;
        self.record(
            HostCall::SetCursorPosition,
            RecordedCall::SetCursorPosition(position),
        )?;
        self.inner.lock().cursor = position;
        Ok(())
    }

    fn get_cursor_position(&self) -> Result<i32, HostError> {
        self.gate(HostCall::GetCursorPosition)?;
        self.record(HostCall::GetCursorPosition, RecordedCall::GetCursorPosition)?;
        Ok(self.inner.lock().cursor)
    }

    fn set_input_type(&self, input_type: i32) -> Result<(), HostError> {
        self.gate(HostCall::SetInputType)?;
        self.record(
            HostCall::SetInputType,
            RecordedCall::SetInputType(input_type),
        )?;
        Ok(())
    }

    fn set_hint(&self, hint: &str) -> Result<(), HostError> {
        self.gate(HostCall::SetHint)?;
        self.record(HostCall::SetHint, RecordedCall::SetHint(hint.to_string()))?;
        Ok(())
    }
}
