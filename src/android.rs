//! Android adapter wiring a keyboard session to the embedder's bridge class
//! over JNI.
//!
//! ## Usage
//!
//! Call `install` once, typically from `JNI_OnLoad` or an early native
//! callback, with the session and the fully qualified name of the Java
//! bridge class. Installation registers the ten inbound native methods on
//! that class, resolves the nine outbound static-method bindings, and binds
//! the resulting host to the session. The Java side never references this
//! crate's symbols by name, so the bridge class may live in any package.

#[cfg(target_os = "android")]
pub mod callbacks;
#[cfg(target_os = "android")]
pub mod host;

#[cfg(target_os = "android")]
pub use callbacks::{install, uninstall};
#[cfg(target_os = "android")]
pub use host::{AndroidHostError, AndroidKeyboardHost, BindingReport};
