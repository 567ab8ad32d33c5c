//! The keyboard bridge session.
//!
//! [`KeyboardBridge`] is the single source of truth for the current text
//! field's content, cursor, focus, and keyboard visibility, kept consistent
//! between the render loop and the platform keyboard widget on the other
//! side of the boundary.
//!
//! ## Threading
//!
//! The handle is cheap to clone and safe to use from any thread; all state
//! sits behind one lock. Inbound notifications mutate state immediately,
//! while outbound boundary calls are collected under the lock and dispatched
//! after it is released, so a platform widget that calls back synchronously
//! on the same thread cannot deadlock the session. Races between the render
//! thread and the platform callback thread resolve last-writer-wins.
//!
//! ## Usage
//!
//! ```
//! use softboard::{DisplayBuffer, FieldArgs, FieldResponse, KeyboardBridge};
//!
//! let bridge = KeyboardBridge::new();
//! bridge.initialize();
//!
//! // Each frame, drive the embedder's text control through the bridge.
//! let mut email = String::new();
//! let mut widget = |_: &FieldArgs, _buffer: &mut DisplayBuffer| FieldResponse::IDLE;
//! let changed = bridge.render_field(&mut widget, &FieldArgs::new("email"), &mut email);
//! assert!(!changed);
//!
//! bridge.update();
//! bridge.shutdown();
//! ```

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use smallvec::SmallVec;
use tracing::{debug, info, warn};

use crate::{
    config::{defaults, key_codes},
    display_buffer::DisplayBuffer,
    field::{FieldArgs, FieldId, FieldWidget},
    host::{HostError, KeyboardHost},
    key_events::{KeyEvent, KeyEventQueue},
};

/// Keyboard visibility as tracked by the session.
///
/// `visible` is the last known value. `confirmed` tells whether it came
/// from an authoritative source (an inbound platform notification or a
/// successful [`refresh_from_host`](KeyboardBridge::refresh_from_host)
/// pull) or was merely assumed after an outbound show/hide request, which
/// can silently fail on the platform side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Visibility {
    /// Last known keyboard visibility.
    pub visible: bool,
    /// Whether the value came from an authoritative source.
    pub confirmed: bool,
}

/// One outbound boundary call, queued under the session lock and issued
/// after it is released.
enum Outbound {
    ShowKeyboard,
    HideKeyboard,
    SetText(String),
    SetCursor(i32),
    SetInputType(i32),
    SetHint(String),
}

type OutboundBatch = SmallVec<[Outbound; 4]>;

struct SessionState {
    initialized: bool,
    visible: bool,
    visibility_confirmed: bool,
    text: String,
    display: DisplayBuffer,
    cursor: i32,
    focused: Option<FieldId>,
    input_type: i32,
    hint: String,
    key_events: KeyEventQueue,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            initialized: false,
            visible: false,
            visibility_confirmed: false,
            text: String::new(),
            display: DisplayBuffer::new(),
            cursor: defaults::DEFAULT_CURSOR_POSITION,
            focused: None,
            input_type: defaults::DEFAULT_INPUT_TYPE,
            hint: defaults::DEFAULT_HINT.to_string(),
            key_events: KeyEventQueue::default(),
        }
    }
}

impl SessionState {
    /// Replaces the canonical text and mirrors it into the display buffer.
    fn set_text_and_refresh(&mut self, text: &str) {
        self.text.clear();
        self.text.push_str(text);
        self.display.set_text(&self.text);
    }
}

#[derive(Default)]
struct BridgeShared {
    state: Mutex<SessionState>,
    host: RwLock<Option<Arc<dyn KeyboardHost>>>,
}

/// Shared handle to one keyboard bridge session.
///
/// Construct one session, [`bind_host`](Self::bind_host) the platform
/// adapter, [`initialize`](Self::initialize) it, and hand clones to the
/// render loop and to the platform callback registration. Every mutating
/// operation silently no-ops while the session is uninitialized; outbound
/// boundary calls are best-effort and never surface errors to callers.
#[derive(Clone, Default)]
pub struct KeyboardBridge {
    inner: Arc<BridgeShared>,
}

impl KeyboardBridge {
    /// Creates an uninitialized session with no host bound.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches the boundary implementation outbound calls go through.
    ///
    /// Without a host every outbound call is skipped; state tracking still
    /// works, which is how the session runs in tests and on platforms
    /// without a soft keyboard.
    pub fn bind_host(&self, host: Arc<dyn KeyboardHost>) {
        *self.inner.host.write() = Some(host);
    }

    /// Marks the session ready for use. Idempotent; always succeeds.
    pub fn initialize(&self) -> bool {
        let mut state = self.inner.state.lock();
        if state.initialized {
            return true;
        }
        info!("Initializing keyboard bridge");
        state.display.clear();
        state.initialized = true;
        true
    }

    /// Tears the session down: clears focus, hides the keyboard if it is
    /// visible, and marks the session uninitialized. Idempotent.
    pub fn shutdown(&self) {
        let batch = {
            let mut state = self.inner.state.lock();
            if !state.initialized {
                return;
            }
            info!("Shutting down keyboard bridge");
            state.focused = None;
            let mut batch = OutboundBatch::new();
            if state.visible {
                state.visible = false;
                state.visibility_confirmed = false;
                batch.push(Outbound::HideKeyboard);
            }
            state.initialized = false;
            batch
        };
        self.dispatch(batch);
    }

    /// Returns whether [`initialize`](Self::initialize) has been called
    /// without a later [`shutdown`](Self::shutdown).
    pub fn is_initialized(&self) -> bool {
        self.inner.state.lock().initialized
    }

    /// Asks the platform to show the soft keyboard.
    ///
    /// `visible` flips optimistically even if the outbound call is skipped
    /// or fails; [`visibility`](Self::visibility) reports the value as
    /// unconfirmed until the platform acknowledges it.
    pub fn show_keyboard(&self) {
        let batch = {
            let mut state = self.inner.state.lock();
            if !state.initialized {
                return;
            }
            debug!("Showing soft keyboard");
            state.visible = true;
            state.visibility_confirmed = false;
            let mut batch = OutboundBatch::new();
            batch.push(Outbound::ShowKeyboard);
            batch
        };
        self.dispatch(batch);
    }

    /// Asks the platform to hide the soft keyboard. Same optimistic
    /// tracking as [`show_keyboard`](Self::show_keyboard).
    pub fn hide_keyboard(&self) {
        let batch = {
            let mut state = self.inner.state.lock();
            if !state.initialized {
                return;
            }
            debug!("Hiding soft keyboard");
            state.visible = false;
            state.visibility_confirmed = false;
            let mut batch = OutboundBatch::new();
            batch.push(Outbound::HideKeyboard);
            batch
        };
        self.dispatch(batch);
    }

    /// Returns the last known keyboard visibility.
    pub fn is_keyboard_visible(&self) -> bool {
        self.inner.state.lock().visible
    }

    /// Returns the last known visibility together with whether it has been
    /// confirmed by the platform.
    pub fn visibility(&self) -> Visibility {
        let state = self.inner.state.lock();
        Visibility {
            visible: state.visible,
            confirmed: state.visibility_confirmed,
        }
    }

    /// Makes `id` the focused field, replacing any previous one.
    ///
    /// Any identifier is accepted; nothing checks that a field with this id
    /// exists on screen.
    pub fn set_focused_input(&self, id: impl Into<FieldId>) {
        let mut state = self.inner.state.lock();
        if !state.initialized {
            return;
        }
        let id = id.into();
        debug!("Input field focused: {id}");
        state.focused = Some(id);
    }

    /// Drops field focus, if any.
    pub fn clear_focus(&self) {
        let mut state = self.inner.state.lock();
        if !state.initialized {
            return;
        }
        debug!("Input focus cleared");
        state.focused = None;
    }

    /// Returns whether any field is focused.
    pub fn is_input_focused(&self) -> bool {
        self.inner.state.lock().focused.is_some()
    }

    /// Returns the focused field's id, if any.
    pub fn focused_field(&self) -> Option<FieldId> {
        self.inner.state.lock().focused.clone()
    }

    /// Replaces the field text and pushes it to the platform widget.
    ///
    /// The canonical text is stored untruncated; only the display buffer
    /// backing the on-screen control is capped at its capacity.
    pub fn set_input_text(&self, text: &str) {
        let batch = {
            let mut state = self.inner.state.lock();
            if !state.initialized {
                return;
            }
            state.set_text_and_refresh(text);
            let mut batch = OutboundBatch::new();
            batch.push(Outbound::SetText(state.text.clone()));
            batch
        };
        self.dispatch(batch);
    }

    /// Returns the canonical (untruncated) field text.
    pub fn input_text(&self) -> String {
        self.inner.state.lock().text.clone()
    }

    /// Stores the cursor position and pushes it to the platform widget.
    ///
    /// The value is not validated against the text length; out-of-range
    /// positions are stored and forwarded as-is.
    pub fn set_cursor_position(&self, position: i32) {
        let batch = {
            let mut state = self.inner.state.lock();
            if !state.initialized {
                return;
            }
            state.cursor = position;
            let mut batch = OutboundBatch::new();
            batch.push(Outbound::SetCursor(position));
            batch
        };
        self.dispatch(batch);
    }

    /// Returns the stored cursor position.
    pub fn cursor_position(&self) -> i32 {
        self.inner.state.lock().cursor
    }

    /// Stores the advisory input-type bits and forwards them.
    ///
    /// See [`crate::config::input_types`] for the catalog; the bridge never
    /// interprets the value.
    pub fn set_input_type(&self, input_type: i32) {
        let batch = {
            let mut state = self.inner.state.lock();
            if !state.initialized {
                return;
            }
            state.input_type = input_type;
            let mut batch = OutboundBatch::new();
            batch.push(Outbound::SetInputType(input_type));
            batch
        };
        self.dispatch(batch);
    }

    /// Returns the stored input-type bits.
    pub fn input_type(&self) -> i32 {
        self.inner.state.lock().input_type
    }

    /// Stores the advisory hint text and forwards it.
    pub fn set_hint(&self, hint: &str) {
        let batch = {
            let mut state = self.inner.state.lock();
            if !state.initialized {
                return;
            }
            state.hint = hint.to_string();
            let mut batch = OutboundBatch::new();
            batch.push(Outbound::SetHint(state.hint.clone()));
            batch
        };
        self.dispatch(batch);
    }

    /// Returns the stored hint text.
    pub fn hint(&self) -> String {
        self.inner.state.lock().hint.clone()
    }

    /// Drives one frame of an editable field through the bridge.
    ///
    /// `text` is the embedder's canonical value for this field. The control
    /// runs against a frame-local copy of the session display buffer, then
    /// the bridge applies the frame's outcome:
    ///
    /// 1. the control edits the buffer and reports activity;
    /// 2. newly acquired focus adopts the field, pushes `text` to the
    ///    platform, and requests the keyboard;
    /// 3. an edit is read back into `text` and pushed to the platform;
    /// 4. a field that was focused at entry refreshes the buffer from the
    ///    session text, so edits pushed by the platform appear on screen.
    ///
    /// When focus acquisition and an edit land in the same frame, focus and
    /// show are processed first and the edit read back second, so the edit
    /// survives the focus handoff.
    ///
    /// Returns whether the control reported an edit. Uninitialized sessions
    /// return `false` without driving the control.
    pub fn render_field(
        &self,
        widget: &mut impl FieldWidget,
        args: &FieldArgs,
        text: &mut String,
    ) -> bool {
        let (mut buffer, was_focused) = {
            let state = self.inner.state.lock();
            if !state.initialized {
                return false;
            }
            (
                state.display.clone(),
                state.focused.as_ref() == Some(&args.id),
            )
        };

        // The control runs outside the lock; notifications landing during
        // the frame are folded in below, last writer wins.
        let response = widget.edit(args, &mut buffer);

        let batch = {
            let mut state = self.inner.state.lock();
            if !state.initialized {
                return false;
            }
            let mut batch = OutboundBatch::new();

            if response.active && !was_focused {
                debug!("Input field focused: {}", args.id);
                state.focused = Some(args.id.clone());
                state.text.clear();
                state.text.push_str(text);
                if !response.changed {
                    buffer.set_text(&state.text);
                }
                batch.push(Outbound::SetText(state.text.clone()));
                state.visible = true;
                state.visibility_confirmed = false;
                batch.push(Outbound::ShowKeyboard);
            }

            if response.changed {
                text.clear();
                text.push_str(buffer.as_str());
                state.text.clear();
                state.text.push_str(text);
                batch.push(Outbound::SetText(state.text.clone()));
            }

            if was_focused {
                buffer.set_text(&state.text);
            }

            state.display = buffer;
            batch
        };
        self.dispatch(batch);
        response.changed
    }

    /// Per-frame resync: while a field is focused, re-pushes the text and
    /// cursor to the platform widget. No-op otherwise.
    pub fn update(&self) {
        let batch = {
            let state = self.inner.state.lock();
            if !state.initialized || state.focused.is_none() {
                return;
            }
            let mut batch = OutboundBatch::new();
            batch.push(Outbound::SetText(state.text.clone()));
            batch.push(Outbound::SetCursor(state.cursor));
            batch
        };
        self.dispatch(batch);
    }

    /// Pulls state back from the platform widget, reconciling divergence
    /// left by failed or skipped outbound calls.
    ///
    /// Visibility is always pulled and marked confirmed on success. Text
    /// and cursor are pulled only while a field is focused, mirroring the
    /// push gating of [`update`](Self::update). Unavailable bindings are
    /// skipped individually.
    pub fn refresh_from_host(&self) {
        let host = self.inner.host.read().clone();
        let Some(host) = host else {
            return;
        };
        if !self.is_initialized() {
            return;
        }

        let visible = host.is_keyboard_visible();
        let focused = self.is_input_focused();
        let pulled_text = focused.then(|| host.get_text());
        let pulled_cursor = focused.then(|| host.get_cursor_position());

        let mut state = self.inner.state.lock();
        if !state.initialized {
            return;
        }
        match visible {
            Ok(visible) => {
                state.visible = visible;
                state.visibility_confirmed = true;
            }
            Err(err) => log_host_error(&err),
        }
        // Focus may have changed while pulling; apply only if it held.
        if state.focused.is_some() {
            match pulled_text {
                Some(Ok(text)) => state.set_text_and_refresh(&text),
                Some(Err(err)) => log_host_error(&err),
                None => {}
            }
            match pulled_cursor {
                Some(Ok(cursor)) => state.cursor = cursor,
                Some(Err(err)) => log_host_error(&err),
                None => {}
            }
        }
    }

    /// Handles a text change pushed by the platform keyboard: overwrites
    /// the canonical text, refreshes the display buffer, and acknowledges
    /// by pushing the value back (idempotent round trip).
    pub fn on_text_input(&self, text: &str) {
        let batch = {
            let mut state = self.inner.state.lock();
            if !state.initialized {
                return;
            }
            debug!("Text input received ({} bytes)", text.len());
            state.set_text_and_refresh(text);
            let mut batch = OutboundBatch::new();
            batch.push(Outbound::SetText(state.text.clone()));
            batch
        };
        self.dispatch(batch);
    }

    /// Handles a platform key-down notification.
    ///
    /// The event is queued for [`take_key_events`](Self::take_key_events).
    /// The back key dismisses the keyboard and drops focus when the
    /// keyboard is visible; the enter key is noted for the focused field
    /// without any state change.
    pub fn on_key_down(&self, code: i32) {
        let batch = {
            let mut state = self.inner.state.lock();
            if !state.initialized {
                return;
            }
            debug!("Key down: {code}");
            state.key_events.push_event(KeyEvent::down(code));
            let mut batch = OutboundBatch::new();
            match code {
                key_codes::KEYCODE_BACK => {
                    if state.visible {
                        debug!("Back key dismisses the keyboard");
                        state.visible = false;
                        state.visibility_confirmed = false;
                        state.focused = None;
                        batch.push(Outbound::HideKeyboard);
                    }
                }
                key_codes::KEYCODE_ENTER => {
                    if state.focused.is_some() {
                        debug!("Enter key in focused field");
                    }
                }
                _ => {}
            }
            batch
        };
        self.dispatch(batch);
    }

    /// Handles a platform key-up notification; the event is queued only.
    pub fn on_key_up(&self, code: i32) {
        let mut state = self.inner.state.lock();
        if !state.initialized {
            return;
        }
        debug!("Key up: {code}");
        state.key_events.push_event(KeyEvent::up(code));
    }

    /// Authoritative notification that the platform showed the keyboard.
    pub fn on_keyboard_show(&self) {
        let mut state = self.inner.state.lock();
        if !state.initialized {
            return;
        }
        debug!("Keyboard shown");
        state.visible = true;
        state.visibility_confirmed = true;
    }

    /// Authoritative notification that the platform hid the keyboard.
    ///
    /// Losing the keyboard always defocuses the field.
    pub fn on_keyboard_hide(&self) {
        let mut state = self.inner.state.lock();
        if !state.initialized {
            return;
        }
        debug!("Keyboard hidden");
        state.visible = false;
        state.visibility_confirmed = true;
        state.focused = None;
    }

    /// Drains the queued key events, oldest first.
    pub fn take_key_events(&self) -> Vec<KeyEvent> {
        self.inner.state.lock().key_events.take_events()
    }

    /// Issues the collected outbound calls. Callers must not hold the
    /// session lock; the platform side may call back synchronously.
    fn dispatch(&self, batch: OutboundBatch) {
        if batch.is_empty() {
            return;
        }
        let host = self.inner.host.read().clone();
        let Some(host) = host else {
            debug!(
                "Skipping {} outbound keyboard call(s): no host bound",
                batch.len()
            );
            return;
        };
        for op in batch {
            let result = match &op {
                Outbound::ShowKeyboard => host.show_keyboard(),
                Outbound::HideKeyboard => host.hide_keyboard(),
                Outbound::SetText(text) => host.set_text(text),
                Outbound::SetCursor(position) => host.set_cursor_position(*position),
                Outbound::SetInputType(input_type) => host.set_input_type(*input_type),
                Outbound::SetHint(hint) => host.set_hint(hint),
            };
            if let Err(err) = result {
                log_host_error(&err);
            }
        }
    }
}

fn log_host_error(err: &HostError) {
    if err.is_unbound() {
        debug!("Outbound keyboard call skipped: {err}");
    } else {
        warn!("Outbound keyboard call failed: {err}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::input_types,
        field::FieldResponse,
        host::HostCall,
        key_events::KeyEventKind,
        testing::{RecordedCall, RecordingHost},
    };

    fn bridge_with_host() -> (KeyboardBridge, Arc<RecordingHost>) {
        let bridge = KeyboardBridge::new();
        let host = Arc::new(RecordingHost::new());
        bridge.bind_host(host.clone());
        (bridge, host)
    }

    fn typing_widget(
        text: &'static str,
    ) -> impl FnMut(&FieldArgs, &mut DisplayBuffer) -> FieldResponse {
        move |_: &FieldArgs, buffer: &mut DisplayBuffer| {
            buffer.set_text(text);
            FieldResponse {
                changed: true,
                active: true,
            }
        }
    }

    fn clicking_widget() -> impl FnMut(&FieldArgs, &mut DisplayBuffer) -> FieldResponse {
        |_: &FieldArgs, _: &mut DisplayBuffer| FieldResponse {
            changed: false,
            active: true,
        }
    }

    #[test]
    fn initialize_is_idempotent() {
        let bridge = KeyboardBridge::new();
        assert!(!bridge.is_initialized());
        assert!(bridge.initialize());
        assert!(bridge.initialize());
        assert!(bridge.is_initialized());
    }

    #[test]
    fn mutating_operations_no_op_while_uninitialized() {
        let (bridge, host) = bridge_with_host();

        bridge.show_keyboard();
        bridge.hide_keyboard();
        bridge.set_focused_input("email");
        bridge.set_input_text("hello");
        bridge.set_cursor_position(3);
        bridge.set_input_type(input_types::TYPE_CLASS_NUMBER);
        bridge.set_hint("number");
        bridge.on_text_input("pushed");
        bridge.on_keyboard_show();

        assert!(!bridge.is_keyboard_visible());
        assert_eq!(bridge.focused_field(), None);
        assert_eq!(bridge.input_text(), "");
        assert_eq!(bridge.cursor_position(), defaults::DEFAULT_CURSOR_POSITION);
        assert_eq!(bridge.input_type(), defaults::DEFAULT_INPUT_TYPE);
        assert_eq!(bridge.hint(), defaults::DEFAULT_HINT);
        assert_eq!(host.call_count(), 0);
    }

    #[test]
    fn show_keyboard_before_initialize_stays_hidden() {
        let (bridge, host) = bridge_with_host();
        bridge.show_keyboard();
        assert!(!bridge.is_keyboard_visible());
        assert!(host.calls().is_empty());
    }

    #[test]
    fn focus_and_text_round_trip() {
        let (bridge, _host) = bridge_with_host();
        bridge.initialize();
        bridge.set_focused_input("email");
        bridge.set_input_text("user@example.com");

        assert_eq!(bridge.input_text(), "user@example.com");
        assert_eq!(bridge.focused_field().map(|id| id.to_string()), Some("email".into()));
        assert!(bridge.is_input_focused());
    }

    #[test]
    fn oversized_text_truncates_only_the_display_copy() {
        let (bridge, host) = bridge_with_host();
        bridge.initialize();
        bridge.set_focused_input("notes");

        let long = "x".repeat(DisplayBuffer::MAX_TEXT_LEN + 500);
        bridge.set_input_text(&long);
        assert_eq!(bridge.input_text(), long);
        // The platform receives the untruncated value too
        assert_eq!(host.take_calls(), vec![RecordedCall::SetText(long.clone())]);

        // The control sees the capped display copy
        let mut seen_len = 0;
        let mut widget = |_: &FieldArgs, buffer: &mut DisplayBuffer| {
            seen_len = buffer.len();
            FieldResponse::IDLE
        };
        let mut text = long.clone();
        bridge.render_field(&mut widget, &FieldArgs::new("notes"), &mut text);
        assert_eq!(seen_len, DisplayBuffer::MAX_TEXT_LEN);
        assert_eq!(bridge.input_text(), long);
    }

    #[test]
    fn clear_focus_wins_over_any_focus_sequence() {
        let (bridge, _host) = bridge_with_host();
        bridge.initialize();
        bridge.set_focused_input("a");
        bridge.set_focused_input("b");
        bridge.set_focused_input("c");
        bridge.clear_focus();

        assert_eq!(bridge.focused_field(), None);
        assert!(!bridge.is_input_focused());
    }

    #[test]
    fn keyboard_hide_notification_always_clears_visibility_and_focus() {
        let (bridge, _host) = bridge_with_host();
        bridge.initialize();
        bridge.set_focused_input("field");
        bridge.show_keyboard();

        bridge.on_keyboard_hide();
        assert!(!bridge.is_keyboard_visible());
        assert_eq!(bridge.focused_field(), None);
        assert_eq!(
            bridge.visibility(),
            Visibility {
                visible: false,
                confirmed: true,
            }
        );

        // Holds from the already-hidden state too
        bridge.on_keyboard_hide();
        assert!(!bridge.is_keyboard_visible());
        assert_eq!(bridge.focused_field(), None);
    }

    #[test]
    fn last_rendered_focus_wins() {
        let (bridge, _host) = bridge_with_host();
        bridge.initialize();

        let mut first = String::from("first");
        let mut second = String::from("second");
        bridge.render_field(&mut clicking_widget(), &FieldArgs::new("first"), &mut first);
        bridge.render_field(&mut clicking_widget(), &FieldArgs::new("second"), &mut second);

        assert_eq!(bridge.focused_field(), Some(FieldId::new("second")));
    }

    #[test]
    fn back_key_hides_keyboard_and_drops_focus() {
        let (bridge, host) = bridge_with_host();
        bridge.initialize();
        bridge.set_focused_input("field");
        bridge.show_keyboard();
        host.take_calls();

        bridge.on_key_down(key_codes::KEYCODE_BACK);
        assert!(!bridge.is_keyboard_visible());
        assert_eq!(bridge.focused_field(), None);
        assert_eq!(host.take_calls(), vec![RecordedCall::HideKeyboard]);
    }

    #[test]
    fn back_key_does_nothing_while_hidden() {
        let (bridge, host) = bridge_with_host();
        bridge.initialize();
        bridge.set_focused_input("field");

        bridge.on_key_down(key_codes::KEYCODE_BACK);
        // Focus survives; only a visible keyboard makes back dismissive
        assert_eq!(bridge.focused_field(), Some(FieldId::new("field")));
        assert!(host.calls().is_empty());
    }

    #[test]
    fn enter_key_changes_nothing() {
        let (bridge, host) = bridge_with_host();
        bridge.initialize();
        bridge.set_focused_input("field");
        bridge.show_keyboard();
        host.take_calls();

        bridge.on_key_down(key_codes::KEYCODE_ENTER);
        assert!(bridge.is_keyboard_visible());
        assert_eq!(bridge.focused_field(), Some(FieldId::new("field")));
        assert!(host.calls().is_empty());
    }

    #[test]
    fn key_events_queue_and_drain_in_order() {
        let (bridge, _host) = bridge_with_host();

        // Nothing is recorded before initialization
        bridge.on_key_down(10);
        assert!(bridge.take_key_events().is_empty());

        bridge.initialize();
        bridge.on_key_down(66);
        bridge.on_key_up(66);
        bridge.on_key_down(29);

        let events = bridge.take_key_events();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0], KeyEvent::down(66));
        assert_eq!(events[1].kind, KeyEventKind::Up);
        assert_eq!(events[2].code, 29);
        assert!(bridge.take_key_events().is_empty());
    }

    #[test]
    fn update_resyncs_text_and_cursor_while_focused() {
        let (bridge, host) = bridge_with_host();
        bridge.initialize();
        bridge.set_focused_input("field");
        bridge.set_input_text("abc");
        bridge.set_cursor_position(2);
        host.take_calls();

        bridge.update();
        assert_eq!(
            host.take_calls(),
            vec![
                RecordedCall::SetText("abc".into()),
                RecordedCall::SetCursorPosition(2),
            ]
        );

        bridge.clear_focus();
        bridge.update();
        assert!(host.calls().is_empty());
    }

    #[test]
    fn text_pushed_by_the_platform_is_stored_and_acknowledged() {
        let (bridge, host) = bridge_with_host();
        bridge.initialize();
        bridge.set_focused_input("field");
        host.take_calls();

        bridge.on_text_input("from keyboard");
        assert_eq!(bridge.input_text(), "from keyboard");
        assert_eq!(
            host.take_calls(),
            vec![RecordedCall::SetText("from keyboard".into())]
        );

        // The refreshed display buffer reaches the control next frame
        let mut seen = String::new();
        let mut widget = |_: &FieldArgs, buffer: &mut DisplayBuffer| {
            seen = buffer.as_str().to_string();
            FieldResponse::IDLE
        };
        let mut text = String::new();
        bridge.render_field(&mut widget, &FieldArgs::new("field"), &mut text);
        assert_eq!(seen, "from keyboard");
    }

    #[test]
    fn render_field_click_adopts_field_and_requests_keyboard() {
        let (bridge, host) = bridge_with_host();
        bridge.initialize();

        let mut text = String::from("stored");
        let changed =
            bridge.render_field(&mut clicking_widget(), &FieldArgs::new("email"), &mut text);

        assert!(!changed);
        assert_eq!(text, "stored");
        assert_eq!(bridge.focused_field(), Some(FieldId::new("email")));
        assert_eq!(bridge.input_text(), "stored");
        assert_eq!(
            bridge.visibility(),
            Visibility {
                visible: true,
                confirmed: false,
            }
        );
        assert_eq!(
            host.take_calls(),
            vec![
                RecordedCall::SetText("stored".into()),
                RecordedCall::ShowKeyboard,
            ]
        );
    }

    #[test]
    fn render_field_reads_edits_back() {
        let (bridge, host) = bridge_with_host();
        bridge.initialize();
        bridge.set_focused_input("field");
        let mut text = String::from("old");
        bridge.set_input_text(&text);
        host.take_calls();

        let changed =
            bridge.render_field(&mut typing_widget("edited"), &FieldArgs::new("field"), &mut text);

        assert!(changed);
        assert_eq!(text, "edited");
        assert_eq!(bridge.input_text(), "edited");
        assert_eq!(
            host.take_calls(),
            vec![RecordedCall::SetText("edited".into())]
        );
    }

    #[test]
    fn simultaneous_click_and_edit_keeps_the_edit() {
        let (bridge, host) = bridge_with_host();
        bridge.initialize();

        let mut text = String::from("old");
        let changed =
            bridge.render_field(&mut typing_widget("new"), &FieldArgs::new("field"), &mut text);

        assert!(changed);
        assert_eq!(text, "new");
        assert_eq!(bridge.input_text(), "new");
        assert_eq!(bridge.focused_field(), Some(FieldId::new("field")));
        // Focus and show land before the read-back
        assert_eq!(
            host.take_calls(),
            vec![
                RecordedCall::SetText("old".into()),
                RecordedCall::ShowKeyboard,
                RecordedCall::SetText("new".into()),
            ]
        );
    }

    #[test]
    fn focused_field_reclaims_the_display_buffer() {
        let (bridge, _host) = bridge_with_host();
        bridge.initialize();
        bridge.set_focused_input("a");
        bridge.set_input_text("aaa");

        // An unfocused control scribbles the shared buffer without editing
        let mut scribble = |_: &FieldArgs, buffer: &mut DisplayBuffer| {
            buffer.set_text("zzz");
            FieldResponse::IDLE
        };
        let mut b_text = String::new();
        bridge.render_field(&mut scribble, &FieldArgs::new("b"), &mut b_text);

        // The focused field sees the scribble this frame and repairs the
        // buffer from the session text on its way out
        let mut seen = Vec::new();
        let mut observer = |_: &FieldArgs, buffer: &mut DisplayBuffer| {
            seen.push(buffer.as_str().to_string());
            FieldResponse::IDLE
        };
        let mut a_text = String::from("aaa");
        bridge.render_field(&mut observer, &FieldArgs::new("a"), &mut a_text);
        bridge.render_field(&mut observer, &FieldArgs::new("a"), &mut a_text);
        assert_eq!(seen, vec!["zzz".to_string(), "aaa".to_string()]);
    }

    #[test]
    fn render_field_uninitialized_never_drives_the_control() {
        let (bridge, host) = bridge_with_host();
        let mut calls = 0;
        let mut widget = |_: &FieldArgs, _: &mut DisplayBuffer| {
            calls += 1;
            FieldResponse::IDLE
        };
        let mut text = String::from("text");

        let changed = bridge.render_field(&mut widget, &FieldArgs::new("field"), &mut text);
        assert!(!changed);
        assert_eq!(calls, 0);
        assert!(host.calls().is_empty());
    }

    #[test]
    fn shutdown_hides_clears_and_deactivates() {
        let (bridge, host) = bridge_with_host();
        bridge.initialize();
        bridge.set_focused_input("field");
        bridge.show_keyboard();
        host.take_calls();

        bridge.shutdown();
        assert!(!bridge.is_initialized());
        assert!(!bridge.is_keyboard_visible());
        assert_eq!(bridge.focused_field(), None);
        assert_eq!(host.take_calls(), vec![RecordedCall::HideKeyboard]);

        // Idempotent, and operations stay inert afterwards
        bridge.shutdown();
        bridge.show_keyboard();
        assert!(host.calls().is_empty());
        assert!(!bridge.is_keyboard_visible());
    }

    #[test]
    fn shutdown_without_visible_keyboard_skips_the_hide_call() {
        let (bridge, host) = bridge_with_host();
        bridge.initialize();
        bridge.shutdown();
        assert!(host.calls().is_empty());
    }

    #[test]
    fn reinitialize_keeps_canonical_state_but_resets_the_display() {
        let (bridge, _host) = bridge_with_host();
        bridge.initialize();
        bridge.set_focused_input("notes");
        bridge.set_input_text("hello");
        bridge.set_cursor_position(5);
        bridge.set_input_type(input_types::TYPE_CLASS_NUMBER);
        bridge.set_hint("Digits only");
        bridge.on_key_down(key_codes::KEYCODE_ENTER);

        bridge.shutdown();
        assert!(bridge.initialize());

        assert_eq!(bridge.input_text(), "hello");
        assert_eq!(bridge.cursor_position(), 5);
        assert_eq!(bridge.input_type(), input_types::TYPE_CLASS_NUMBER);
        assert_eq!(bridge.hint(), "Digits only");
        assert_eq!(
            bridge.take_key_events(),
            vec![KeyEvent::down(key_codes::KEYCODE_ENTER)]
        );
        assert_eq!(bridge.focused_field(), None);

        // The canonical text outlives the cleared display copy
        let mut seen = String::new();
        let mut widget = |_: &FieldArgs, buffer: &mut DisplayBuffer| {
            seen = buffer.as_str().to_string();
            FieldResponse::IDLE
        };
        let mut text = String::new();
        bridge.render_field(&mut widget, &FieldArgs::new("notes"), &mut text);
        assert_eq!(seen, "");
        assert_eq!(bridge.input_text(), "hello");
    }

    #[test]
    fn optimistic_visibility_is_unconfirmed_until_acknowledged() {
        let bridge = KeyboardBridge::new();
        let host = Arc::new(RecordingHost::new().with_unbound(HostCall::ShowKeyboard));
        bridge.bind_host(host.clone());
        bridge.initialize();

        bridge.show_keyboard();
        assert_eq!(
            bridge.visibility(),
            Visibility {
                visible: true,
                confirmed: false,
            }
        );
        assert!(host.calls().is_empty());

        bridge.on_keyboard_show();
        assert_eq!(
            bridge.visibility(),
            Visibility {
                visible: true,
                confirmed: true,
            }
        );
    }

    #[test]
    fn failed_host_calls_do_not_disturb_state() {
        let bridge = KeyboardBridge::new();
        let host = Arc::new(RecordingHost::new().with_failure(HostCall::SetText, "exception"));
        bridge.bind_host(host.clone());
        bridge.initialize();

        bridge.set_input_text("kept");
        assert_eq!(bridge.input_text(), "kept");
        assert_eq!(host.take_calls(), vec![RecordedCall::SetText("kept".into())]);
    }

    #[test]
    fn refresh_from_host_reconciles_visibility() {
        let (bridge, host) = bridge_with_host();
        bridge.initialize();
        host.set_platform_visible(true);

        assert!(!bridge.is_keyboard_visible());
        bridge.refresh_from_host();
        assert_eq!(
            bridge.visibility(),
            Visibility {
                visible: true,
                confirmed: true,
            }
        );
    }

    #[test]
    fn refresh_from_host_pulls_text_and_cursor_only_while_focused() {
        let (bridge, host) = bridge_with_host();
        bridge.initialize();
        host.set_platform_text("platform text");
        host.set_platform_cursor(7);

        bridge.refresh_from_host();
        assert_eq!(bridge.input_text(), "");
        assert_eq!(bridge.cursor_position(), 0);

        bridge.set_focused_input("field");
        bridge.refresh_from_host();
        assert_eq!(bridge.input_text(), "platform text");
        assert_eq!(bridge.cursor_position(), 7);
    }

    #[test]
    fn refresh_from_host_skips_unbound_pulls() {
        let bridge = KeyboardBridge::new();
        let host = Arc::new(
            RecordingHost::new()
                .with_unbound(HostCall::IsKeyboardVisible)
                .with_unbound(HostCall::GetText),
        );
        bridge.bind_host(host.clone());
        bridge.initialize();
        bridge.set_focused_input("field");
        bridge.set_input_text("local");
        host.set_platform_cursor(4);
        host.take_calls();

        bridge.refresh_from_host();
        // Visibility and text pulls were skipped, the cursor pull landed
        assert!(!bridge.visibility().confirmed);
        assert_eq!(bridge.input_text(), "local");
        assert_eq!(bridge.cursor_position(), 4);
    }

    #[test]
    fn out_of_range_cursor_is_stored_and_forwarded() {
        let (bridge, host) = bridge_with_host();
        bridge.initialize();
        bridge.set_input_text("ab");
        host.take_calls();

        bridge.set_cursor_position(999);
        assert_eq!(bridge.cursor_position(), 999);
        assert_eq!(
            host.take_calls(),
            vec![RecordedCall::SetCursorPosition(999)]
        );
    }

    #[test]
    fn input_type_and_hint_are_stored_and_forwarded() {
        let (bridge, host) = bridge_with_host();
        bridge.initialize();

        let password =
            input_types::TYPE_CLASS_TEXT | input_types::TYPE_TEXT_VARIATION_PASSWORD;
        bridge.set_input_type(password);
        bridge.set_hint("Enter password...");

        assert_eq!(bridge.input_type(), password);
        assert_eq!(bridge.hint(), "Enter password...");
        assert_eq!(
            host.take_calls(),
            vec![
                RecordedCall::SetInputType(password),
                RecordedCall::SetHint("Enter password...".into()),
            ]
        );
    }

    #[test]
    fn works_without_a_bound_host() {
        let bridge = KeyboardBridge::new();
        bridge.initialize();
        bridge.set_focused_input("field");
        bridge.set_input_text("offline");
        bridge.show_keyboard();

        assert_eq!(bridge.input_text(), "offline");
        assert_eq!(
            bridge.visibility(),
            Visibility {
                visible: true,
                confirmed: false,
            }
        );
        bridge.refresh_from_host();
        assert!(!bridge.visibility().confirmed);
    }
}
