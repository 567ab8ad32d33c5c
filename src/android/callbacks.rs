//! Inbound native callbacks and session installation.
//!
//! The embedder's bridge class declares ten `native` methods; [`install`]
//! registers them against the handlers in this module, resolves the
//! outbound bindings, and routes every later callback to the installed
//! session. Registration happens through `RegisterNatives` rather than
//! exported `Java_*` symbols, so the Java class can live in any package.

use std::{
    ffi::c_void,
    sync::{Arc, OnceLock},
};

use jni::{
    JNIEnv, NativeMethod,
    objects::{JClass, JString},
    sys::{JNI_FALSE, jboolean, jint, jstring},
};
use parking_lot::RwLock;
use tracing::{debug, info, warn};

use crate::{
    android::host::{AndroidHostError, AndroidKeyboardHost, BindingReport, map_jni_error},
    bridge::KeyboardBridge,
    config::defaults,
};

/// Session the native callbacks route into.
fn installed() -> &'static RwLock<Option<KeyboardBridge>> {
    static INSTALLED: OnceLock<RwLock<Option<KeyboardBridge>>> = OnceLock::new();
    INSTALLED.get_or_init(|| RwLock::new(None))
}

fn session() -> Option<KeyboardBridge> {
    installed().read().clone()
}

/// Wires `bridge` to the embedder's keyboard bridge class.
///
/// Looks up `bridge_class` (dotted or slashed form), registers the ten
/// inbound native methods on it, resolves the nine outbound call targets,
/// and binds the resulting host to `bridge`. Returns the binding report;
/// missing outbound targets degrade to skipped calls rather than failing
/// installation. Installing again replaces the previous session.
pub fn install(
    bridge: &KeyboardBridge,
    env: &mut JNIEnv<'_>,
    bridge_class: &str,
) -> Result<BindingReport, AndroidHostError> {
    let path = bridge_class.replace('.', "/");
    let class = match env.find_class(&path) {
        Ok(class) => class,
        Err(err) => {
            let err = map_jni_error(env, err);
            warn!("Keyboard bridge class {bridge_class} is not loadable: {err}");
            return Err(AndroidHostError::ClassNotFound(bridge_class.to_string()));
        }
    };

    register_natives(env, &class)?;
    let (host, report) = AndroidKeyboardHost::from_class(env, &class)?;

    *installed().write() = Some(bridge.clone());
    bridge.bind_host(Arc::new(host));

    if report.is_complete() {
        info!("Keyboard bridge installed on {bridge_class}");
    } else {
        warn!(
            "Keyboard bridge installed on {bridge_class} with {} unresolved binding(s)",
            report.missing().len()
        );
    }
    Ok(report)
}

/// Removes the installed session; later inbound callbacks become no-ops.
///
/// The Java-side natives stay registered, they just stop finding a
/// session to route into.
pub fn uninstall() {
    *installed().write() = None;
}

fn register_natives(env: &mut JNIEnv<'_>, class: &JClass<'_>) -> Result<(), AndroidHostError> {
    let natives = [
        native(
            "nativeOnTextInput",
            "(Ljava/lang/String;)V",
            on_text_input as *mut c_void,
        ),
        native("nativeOnKeyDown", "(I)V", on_key_down as *mut c_void),
        native("nativeOnKeyUp", "(I)V", on_key_up as *mut c_void),
        native("nativeOnKeyboardShow", "()V", on_keyboard_show as *mut c_void),
        native("nativeOnKeyboardHide", "()V", on_keyboard_hide as *mut c_void),
        native("nativeSetInputFocus", "(Z)V", set_input_focus as *mut c_void),
        native(
            "nativeSetInputText",
            "(Ljava/lang/String;)V",
            set_input_text as *mut c_void,
        ),
        native(
            "nativeGetInputText",
            "()Ljava/lang/String;",
            get_input_text as *mut c_void,
        ),
        native(
            "nativeSetCursorPosition",
            "(I)V",
            set_cursor_position as *mut c_void,
        ),
        native(
            "nativeGetCursorPosition",
            "()I",
            get_cursor_position as *mut c_void,
        ),
    ];
    env.register_native_methods(class, &natives)
        .map_err(|err| map_jni_error(env, err))?;
    Ok(())
}

fn native(name: &str, sig: &str, fn_ptr: *mut c_void) -> NativeMethod {
    NativeMethod {
        name: name.into(),
        sig: sig.into(),
        fn_ptr,
    }
}

extern "system" fn on_text_input(mut env: JNIEnv<'_>, _class: JClass<'_>, text: JString<'_>) {
    let Some(bridge) = session() else { return };
    match env.get_string(&text) {
        Ok(text) => bridge.on_text_input(&String::from(text)),
        Err(err) => warn!("Dropping committed text with unreadable payload: {err}"),
    }
}

extern "system" fn on_key_down(_env: JNIEnv<'_>, _class: JClass<'_>, code: jint) {
    if let Some(bridge) = session() {
        bridge.on_key_down(code);
    }
}

extern "system" fn on_key_up(_env: JNIEnv<'_>, _class: JClass<'_>, code: jint) {
    if let Some(bridge) = session() {
        bridge.on_key_up(code);
    }
}

extern "system" fn on_keyboard_show(_env: JNIEnv<'_>, _class: JClass<'_>) {
    if let Some(bridge) = session() {
        bridge.on_keyboard_show();
    }
}

extern "system" fn on_keyboard_hide(_env: JNIEnv<'_>, _class: JClass<'_>) {
    if let Some(bridge) = session() {
        bridge.on_keyboard_hide();
    }
}

extern "system" fn set_input_focus(_env: JNIEnv<'_>, _class: JClass<'_>, focused: jboolean) {
    let Some(bridge) = session() else { return };
    if focused == JNI_FALSE {
        bridge.clear_focus();
    } else {
        // Focus is owned by the overlay side; a grant without a target
        // field has nothing to adopt.
        debug!("Ignoring focus grant from the platform");
    }
}

extern "system" fn set_input_text(mut env: JNIEnv<'_>, _class: JClass<'_>, text: JString<'_>) {
    let Some(bridge) = session() else { return };
    match env.get_string(&text) {
        Ok(text) => bridge.set_input_text(&String::from(text)),
        Err(err) => warn!("Dropping pushed text with unreadable payload: {err}"),
    }
}

extern "system" fn get_input_text(mut env: JNIEnv<'_>, _class: JClass<'_>) -> jstring {
    let text = session()
        .map(|bridge| bridge.input_text())
        .unwrap_or_default();
    match env.new_string(&text) {
        Ok(text) => text.into_raw(),
        Err(err) => {
            warn!("Failed to hand the field text to Java: {err}");
            std::ptr::null_mut()
        }
    }
}

extern "system" fn set_cursor_position(_env: JNIEnv<'_>, _class: JClass<'_>, position: jint) {
    if let Some(bridge) = session() {
        bridge.set_cursor_position(position);
    }
}

extern "system" fn get_cursor_position(_env: JNIEnv<'_>, _class: JClass<'_>) -> jint {
    session()
        .map(|bridge| bridge.cursor_position())
        .unwrap_or(defaults::DEFAULT_CURSOR_POSITION)
}
