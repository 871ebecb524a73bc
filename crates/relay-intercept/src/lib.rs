//! # relay-intercept
//!
//! Hooks a screen-reader host's speech, braille display, and gesture entry
//! points and republishes what passes through them as topic events:
//!
//! - Host capability model (entry points, extension and decision points,
//!   gesture maps)
//! - Synchronous topic dispatcher with per-subscriber failure isolation
//! - Idempotent install/remove of every hook, restoring the host exactly
//! - Output (speech) and input (braille gesture, display state) interceptors
//! - Manager that installs interceptors from configuration

pub mod display;
pub mod events;
pub mod host;
pub mod input;
pub mod lifecycle;
pub mod manager;
pub mod output;
pub mod prelude;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use display::DisplayHooks;
pub use events::{Event, EventDispatcher, EventPayload, PublishReport, Subscriber, Topic};
pub use host::Host;
pub use input::InputInterceptor;
pub use lifecycle::{HandleSlot, InterceptionHandle, Interceptor, PatchSlot};
pub use manager::{InterceptStatus, InterceptorManager};
pub use output::OutputInterceptor;
