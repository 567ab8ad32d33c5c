//! JNI-backed [`KeyboardHost`] driving static methods on the embedder's
//! bridge class.
//!
//! Binding setup resolves each of the nine outbound call targets by name
//! and signature exactly once; later calls reuse the stored method ids. A
//! target missing from the bridge class is reported once at setup and
//! yields [`HostError::Unbound`] on every use instead of an attempted
//! call.

use jni::{
    JNIEnv, JavaVM,
    objects::{GlobalRef, JClass, JStaticMethodID, JString, JValue, JValueOwned},
    signature::{Primitive, ReturnType},
};
use thiserror::Error;
use tracing::warn;

use crate::host::{HostCall, HostError, KeyboardHost};

/// Errors raised while setting up or driving the JNI boundary.
#[derive(Debug, Error)]
pub enum AndroidHostError {
    /// An underlying JNI call failed.
    #[error("JNI error: {0}")]
    Jni(#[from] jni::errors::Error),
    /// The bridge class could not be loaded in this process.
    #[error("bridge class {0} not found")]
    ClassNotFound(String),
    /// Java handed back a null reference where an object was required.
    #[error("unexpected null {0} from Java")]
    NullReturn(&'static str),
}

/// Logs and clears any pending Java exception, then wraps the error.
///
/// JNI leaves the thread unusable while an exception is pending, so every
/// failed call must pass through here before anything else touches the
/// env.
pub(crate) fn map_jni_error(env: &mut JNIEnv<'_>, error: jni::errors::Error) -> AndroidHostError {
    if matches!(error, jni::errors::Error::JavaException) {
        let _ = env.exception_describe();
        let _ = env.exception_clear();
    }
    AndroidHostError::Jni(error)
}

/// Outcome of binding setup: which of the nine outbound call targets
/// resolved on the bridge class.
///
/// An incomplete report is not fatal. The session keeps running and the
/// unresolved calls degrade to skips, so an embedder can ship a bridge
/// class that only implements the subset it cares about.
#[derive(Clone, Debug, Default)]
pub struct BindingReport {
    missing: Vec<HostCall>,
}

impl BindingReport {
    /// Returns `true` when every call target resolved.
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    /// Call targets that did not resolve, in resolution order.
    pub fn missing(&self) -> &[HostCall] {
        &self.missing
    }
}

/// JNI signature each call target is resolved with.
fn jni_signature(call: HostCall) -> &'static str {
    match call {
        HostCall::ShowKeyboard | HostCall::HideKeyboard => "()V",
        HostCall::IsKeyboardVisible => "()Z",
        HostCall::SetText | HostCall::SetHint => "(Ljava/lang/String;)V",
        HostCall::GetText => "()Ljava/lang/String;",
        HostCall::SetCursorPosition | HostCall::SetInputType => "(I)V",
        HostCall::GetCursorPosition => "()I",
    }
}

/// Static method ids resolved once during binding setup.
///
/// Method ids stay valid for the lifetime of the class, which the host
/// pins with a global reference, so they are safe to cache and share
/// across threads.
#[derive(Clone, Copy, Default)]
struct MethodTable {
    show_keyboard: Option<JStaticMethodID>,
    hide_keyboard: Option<JStaticMethodID>,
    is_keyboard_visible: Option<JStaticMethodID>,
    set_text: Option<JStaticMethodID>,
    get_text: Option<JStaticMethodID>,
    set_cursor_position: Option<JStaticMethodID>,
    get_cursor_position: Option<JStaticMethodID>,
    set_input_type: Option<JStaticMethodID>,
    set_hint: Option<JStaticMethodID>,
}

impl MethodTable {
    fn resolve(env: &mut JNIEnv<'_>, class: &JClass<'_>) -> (Self, BindingReport) {
        let mut table = Self::default();
        let mut report = BindingReport::default();
        for call in HostCall::ALL {
            match env.get_static_method_id(class, call.binding_name(), jni_signature(call)) {
                Ok(id) => *table.slot(call) = Some(id),
                Err(err) => {
                    let err = map_jni_error(env, err);
                    warn!("Keyboard binding {call} did not resolve: {err}");
                    report.missing.push(call);
                }
            }
        }
        (table, report)
    }

    fn slot(&mut self, call: HostCall) -> &mut Option<JStaticMethodID> {
        match call {
            HostCall::ShowKeyboard => &mut self.show_keyboard,
            HostCall::HideKeyboard => &mut self.hide_keyboard,
            HostCall::IsKeyboardVisible => &mut self.is_keyboard_visible,
            HostCall::SetText => &mut self.set_text,
            HostCall::GetText => &mut self.get_text,
            HostCall::SetCursorPosition => &mut self.set_cursor_position,
            HostCall::GetCursorPosition => &mut self.get_cursor_position,
            HostCall::SetInputType => &mut self.set_input_type,
            HostCall::SetHint => &mut self.set_hint,
        }
    }

    fn get(&self, call: HostCall) -> Option<JStaticMethodID> {
        match call {
            HostCall::ShowKeyboard => self.show_keyboard,
            HostCall::HideKeyboard => self.hide_keyboard,
            HostCall::IsKeyboardVisible => self.is_keyboard_visible,
            HostCall::SetText => self.set_text,
            HostCall::GetText => self.get_text,
            HostCall::SetCursorPosition => self.set_cursor_position,
            HostCall::GetCursorPosition => self.get_cursor_position,
            HostCall::SetInputType => self.set_input_type,
            HostCall::SetHint => self.set_hint,
        }
    }
}

/// [`KeyboardHost`] backed by the resolved bridge class.
///
/// The host owns a global reference to the class and attaches the calling
/// thread to the VM on demand, so the session may drive it from any
/// thread. Java exceptions thrown by a binding are described, cleared,
/// and surfaced as [`HostError::Failed`].
pub struct AndroidKeyboardHost {
    jvm: JavaVM,
    class: GlobalRef,
    table: MethodTable,
}

impl AndroidKeyboardHost {
    /// Resolves the nine outbound call targets on `class` and wraps them.
    ///
    /// Returns the host together with a [`BindingReport`] naming any
    /// targets the class does not declare.
    pub fn from_class(
        env: &mut JNIEnv<'_>,
        class: &JClass<'_>,
    ) -> Result<(Self, BindingReport), AndroidHostError> {
        let (table, report) = MethodTable::resolve(env, class);
        let class = env
            .new_global_ref(class)
            .map_err(|err| map_jni_error(env, err))?;
        let jvm = env.get_java_vm().map_err(|err| map_jni_error(env, err))?;
        Ok((Self { jvm, class, table }, report))
    }

    fn method(&self, call: HostCall) -> Result<JStaticMethodID, HostError> {
        self.table.get(call).ok_or(HostError::Unbound(call))
    }

    /// Attaches the current thread, rebuilds a local class handle, and runs
    /// `body`, folding every failure into [`HostError::Failed`].
    fn with_attached<R>(
        &self,
        call: HostCall,
        body: impl FnOnce(&mut JNIEnv<'_>, &JClass<'_>) -> Result<R, AndroidHostError>,
    ) -> Result<R, HostError> {
        let failed = |reason: String| HostError::Failed { call, reason };
        let mut env = self
            .jvm
            .attach_current_thread()
            .map_err(|err| failed(err.to_string()))?;
        let class = match env.new_local_ref(self.class.as_obj()) {
            Ok(object) => JClass::from(object),
            Err(err) => {
                let err = map_jni_error(&mut env, err);
                return Err(failed(err.to_string()));
            }
        };
        body(&mut env, &class).map_err(|err| failed(err.to_string()))
    }

    fn call_void(&self, call: HostCall) -> Result<(), HostError> {
        let method = self.method(call)?;
        self.with_attached(call, |env, class| {
            unsafe {
                env.call_static_method_unchecked(
                    class,
                    method,
                    ReturnType::Primitive(Primitive::Void),
                    &[],
                )
            }
            .map_err(|err| map_jni_error(env, err))?;
            Ok(())
        })
    }

    fn call_void_int(&self, call: HostCall, value: i32) -> Result<(), HostError> {
        let method = self.method(call)?;
        self.with_attached(call, |env, class| {
            let args = [JValue::Int(value).as_jni()];
            unsafe {
                env.call_static_method_unchecked(
                    class,
                    method,
                    ReturnType::Primitive(Primitive::Void),
                    &args,
                )
            }
            .map_err(|err| map_jni_error(env, err))?;
            Ok(())
        })
    }

    fn call_void_string(&self, call: HostCall, text: &str) -> Result<(), HostError> {
        let method = self.method(call)?;
        self.with_attached(call, |env, class| {
            let text = env.new_string(text).map_err(|err| map_jni_error(env, err))?;
            let text = JValueOwned::from(text);
            let args = [text.as_jni()];
            unsafe {
                env.call_static_method_unchecked(
                    class,
                    method,
                    ReturnType::Primitive(Primitive::Void),
                    &args,
                )
            }
            .map_err(|err| map_jni_error(env, err))?;
            Ok(())
        })
    }
}

impl KeyboardHost for AndroidKeyboardHost {
    fn show_keyboard(&self) -> Result<(), HostError> {
        self.call_void(HostCall::ShowKeyboard)
    }

    fn hide_keyboard(&self) -> Result<(), HostError> {
        self.call_void(HostCall::HideKeyboard)
    }

    fn is_keyboard_visible(&self) -> Result<bool, HostError> {
        let method = self.method(HostCall::IsKeyboardVisible)?;
        self.with_attached(HostCall::IsKeyboardVisible, |env, class| {
            let value = unsafe {
                env.call_static_method_unchecked(
                    class,
                    method,
                    ReturnType::Primitive(Primitive::Boolean),
                    &[],
                )
            }
            .map_err(|err| map_jni_error(env, err))?;
            Ok(value.z()?)
        })
    }

    fn set_text(&self, text: &str) -> Result<(), HostError> {
        self.call_void_string(HostCall::SetText, text)
    }

    fn get_text(&self) -> Result<String, HostError> {
        let method = self.method(HostCall::GetText)?;
        self.with_attached(HostCall::GetText, |env, class| {
            let value = unsafe {
                env.call_static_method_unchecked(class, method, ReturnType::Object, &[])
            }
            .map_err(|err| map_jni_error(env, err))?;
            let object = value.l()?;
            if object.is_null() {
                return Err(AndroidHostError::NullReturn("java.lang.String"));
            }
            let string = JString::from(object);
            let text = env
                .get_string(&string)
                .map_err(|err| map_jni_error(env, err))?;
            Ok(String::from(text))
        })
    }

    fn set_cursor_position(&self, position: i32) -> Result<(), HostError> {
        self.call_void_int(HostCall::SetCursorPosition, position)
    }

    fn get_cursor_position(&self) -> Result<i32, HostError> {
        let method = self.method(HostCall::GetCursorPosition)?;
        self.with_attached(HostCall::GetCursorPosition, |env, class| {
            let value = unsafe {
                env.call_static_method_unchecked(
                    class,
                    method,
                    ReturnType::Primitive(Primitive::Int),
                    &[],
                )
            }
            .map_err(|err| map_jni_error(env, err))?;
            Ok(value.i()?)
        })
    }

    fn set_input_type(&self, input_type: i32) -> Result<(), HostError> {
        self.call_void_int(HostCall::SetInputType, input_type)
    }

    fn set_hint(&self, hint: &str) -> Result<(), HostError> {
        self.call_void_string(HostCall::SetHint, hint)
    }
}
