//! Input path: braille gesture capture and display state relay.

pub mod extract;
pub mod interceptor;

pub use extract::{
    GLOBAL_COMMANDS_MODULE, GLOBAL_COMMANDS_OWNER, KEYBOARD_SCRIPT_PREFIX, bound_script_path,
    build_gesture_payload, lookup_script_path, resolve_script_path,
};
pub use interceptor::InputInterceptor;
