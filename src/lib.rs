//! softboard bridges immediate-mode overlay UIs to the Android soft
//! keyboard.
//!
//! Overlays rendered from native code (injected ImGui-style UIs, game
//! tooling, engine debug panels) have no platform text widget behind their
//! text fields, so the soft keyboard never comes up and committed text has
//! nowhere to go. softboard keeps one [`KeyboardBridge`] session per
//! overlay that owns the field text, cursor, focus, and keyboard
//! visibility, and keeps that state consistent with the platform keyboard
//! widget on the other side of the JNI boundary.
//!
//! # Sessions
//!
//! A session is created once, bound to a platform host, initialized, and
//! then driven from the render loop:
//!
//! ```
//! use softboard::KeyboardBridge;
//!
//! let bridge = KeyboardBridge::new();
//! bridge.initialize();
//!
//! bridge.set_hint("Search");
//! bridge.show_keyboard();
//! assert!(bridge.is_keyboard_visible());
//!
//! bridge.shutdown();
//! ```
//!
//! Every mutating operation is a silent no-op until
//! [`initialize`](KeyboardBridge::initialize) runs, and the session never
//! surfaces boundary failures to the render loop; a missing or failing
//! platform binding degrades to local-only state.
//!
//! # Fields
//!
//! The render loop drives each editable control through
//! [`render_field`](KeyboardBridge::render_field), handing the bridge a
//! [`FieldWidget`] closure that draws the control against the shared
//! [`DisplayBuffer`]. The bridge adopts focus when the control is clicked,
//! requests the keyboard, pushes edits out, and folds committed keyboard
//! text back into the caller's `String`.
//!
//! ```
//! use softboard::{DisplayBuffer, FieldArgs, FieldResponse, KeyboardBridge};
//!
//! let bridge = KeyboardBridge::new();
//! bridge.initialize();
//!
//! let mut name = String::from("Ada");
//! let mut widget = |_: &FieldArgs, _: &mut DisplayBuffer| FieldResponse::IDLE;
//! bridge.render_field(&mut widget, &FieldArgs::new("name"), &mut name);
//! ```
//!
//! # Platform wiring
//!
//! On Android, `android::install` registers the ten inbound native
//! callbacks on the embedder's Java bridge class and resolves the nine
//! outbound static-method bindings once, by name and signature. Other
//! platforms (and tests) implement [`KeyboardHost`] directly; the
//! `testing` feature exposes a recording mock.
//!
//! # Logging
//!
//! The crate logs through `tracing` and never installs a subscriber on its
//! own. Embedders without one can call [`init_tracing`] during startup.
#![deny(missing_docs, clippy::unwrap_used)]

pub mod android;
pub mod bridge;
pub mod config;
pub mod display_buffer;
pub mod field;
pub mod host;
pub mod key_events;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use crate::{
    bridge::{KeyboardBridge, Visibility},
    display_buffer::{DISPLAY_BUFFER_CAPACITY, DisplayBuffer},
    field::{FieldArgs, FieldId, FieldResponse, FieldSize, FieldWidget},
    host::{HostCall, HostError, KeyboardHost},
    key_events::{KeyEvent, KeyEventKind},
};

/// Installs a global `tracing` subscriber suited to the platform.
///
/// Optional. Call once at startup from embedders that do not install
/// their own subscriber; later calls (or an already installed subscriber)
/// leave the existing one in place.
pub fn init_tracing() {
    #[cfg(target_os = "android")]
    {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_max_level(tracing::Level::INFO)
            .try_init();
    }

    #[cfg(not(target_os = "android"))]
    {
        let filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) => match tracing_subscriber::EnvFilter::try_new("error,softboard=info") {
                Ok(filter) => filter,
                Err(_) => tracing_subscriber::EnvFilter::new("error"),
            },
        };

        let _ = tracing_subscriber::fmt()
            .pretty()
            .with_env_filter(filter)
            .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
            .try_init();
    }
}
