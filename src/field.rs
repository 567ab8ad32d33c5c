//! Field identity and the seam to the embedding UI's text-edit control.
//!
//! The bridge never draws anything. Each frame the embedder hands
//! [`render_field`](crate::KeyboardBridge::render_field) a [`FieldWidget`]
//! that drives its own immediate-mode text control against the session's
//! [`DisplayBuffer`](crate::DisplayBuffer) and reports what happened. Fields
//! are identified by [`FieldId`], an owned label that doubles as the focus
//! token.

use std::{fmt, sync::Arc};

use crate::display_buffer::DisplayBuffer;

/// Owned identifier of an editable field.
///
/// Focusing a field stores its id in the session; the id is a cheap-clone
/// interned label, so holding it never borrows from the embedder's frame
/// data. Two ids are equal when their labels are equal.
///
/// # Examples
///
/// ```
/// use softboard::FieldId;
///
/// let id = FieldId::new("email");
/// assert_eq!(id.as_str(), "email");
/// assert_eq!(id, FieldId::from("email"));
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct FieldId(Arc<str>);

impl FieldId {
    /// Creates a field id from a label.
    pub fn new(label: impl Into<Arc<str>>) -> Self {
        Self(label.into())
    }

    /// Returns the label this id was created from.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FieldId {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl From<String> for FieldId {
    fn from(label: String) -> Self {
        Self::new(label)
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldId({:?})", &*self.0)
    }
}

/// Requested size of the on-screen control, in the embedder's units.
///
/// `AUTO` (all zeroes) lets the control pick its own size, the usual
/// immediate-mode convention.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FieldSize {
    /// Requested width, `0.0` for automatic.
    pub width: f32,
    /// Requested height, `0.0` for automatic.
    pub height: f32,
}

impl FieldSize {
    /// Let the control size itself.
    pub const AUTO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    /// Creates an explicit size.
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Per-frame arguments for [`render_field`](crate::KeyboardBridge::render_field).
///
/// `flags` is an opaque bit set forwarded to the control untouched; the
/// bridge never interprets it.
#[derive(Clone, Debug)]
pub struct FieldArgs {
    /// Identity of the field, also the focus token.
    pub id: FieldId,
    /// Requested control size.
    pub size: FieldSize,
    /// Whether the control accepts line breaks.
    pub multiline: bool,
    /// Opaque control flags, forwarded untouched.
    pub flags: i32,
}

impl FieldArgs {
    /// Creates arguments for a single-line, auto-sized control.
    pub fn new(id: impl Into<FieldId>) -> Self {
        Self {
            id: id.into(),
            size: FieldSize::AUTO,
            multiline: false,
            flags: 0,
        }
    }

    /// Overrides the control size.
    pub fn size(mut self, size: FieldSize) -> Self {
        self.size = size;
        self
    }

    /// Marks the control as multiline.
    pub fn multiline(mut self, multiline: bool) -> Self {
        self.multiline = multiline;
        self
    }

    /// Sets the opaque control flags.
    pub fn flags(mut self, flags: i32) -> Self {
        self.flags = flags;
        self
    }
}

/// What the embedder's control reported for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FieldResponse {
    /// The control edited the buffer this frame.
    pub changed: bool,
    /// The control is interactively active (clicked, tapped, or editing).
    pub active: bool,
}

impl FieldResponse {
    /// Nothing happened this frame.
    pub const IDLE: Self = Self {
        changed: false,
        active: false,
    };
}

/// One frame of the embedder's text-edit control.
///
/// Implementations draw the control backed by `buffer` and report whether
/// it was edited and whether it is interactively active. The buffer is a
/// frame-local copy of the session's display storage; the bridge reads it
/// back after the call.
///
/// Closures with the matching signature implement this trait, which keeps
/// render loops terse:
///
/// ```
/// use softboard::{DisplayBuffer, FieldArgs, FieldResponse, FieldWidget};
///
/// let mut widget = |_args: &FieldArgs, buffer: &mut DisplayBuffer| {
///     buffer.set_text("typed");
///     FieldResponse { changed: true, active: true }
/// };
/// let mut buffer = DisplayBuffer::new();
/// let response = widget.edit(&FieldArgs::new("demo"), &mut buffer);
/// assert!(response.changed);
/// ```
pub trait FieldWidget {
    /// Draws one frame of the control against `buffer` and reports the
    /// interaction.
    fn edit(&mut self, args: &FieldArgs, buffer: &mut DisplayBuffer) -> FieldResponse;
}

impl<F> FieldWidget for F
where
    F: FnMut(&FieldArgs, &mut DisplayBuffer) -> FieldResponse,
{
    fn edit(&mut self, args: &FieldArgs, buffer: &mut DisplayBuffer) -> FieldResponse {
        self(args, buffer)
    }
}
