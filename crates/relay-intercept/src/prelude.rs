//! Prelude for convenient imports.

pub use relay_core::{AppError, AppResult, ErrorKind};

pub use crate::events::{
    ClosureSubscriber, Event, EventDispatcher, EventPayload, PublishReport, Subscriber,
    SubscriptionId, Topic,
};
pub use crate::host::{
    AttributeValue, BrailleDisplayGesture, BrailleInputGesture, DisplayInfo, Gesture,
    GestureMap, GestureMapProvider, GestureMaps, Host, InMemoryGestureMap, OtherGesture,
    ScriptBinding, ScriptRef, SpeechCommand, SpeechEntryPoints, SpeechItem, SpeechPriority,
    SpeechSequence,
};
pub use crate::input::InputInterceptor;
pub use crate::lifecycle::Interceptor;
pub use crate::manager::{InterceptStatus, InterceptorManager};
pub use crate::output::OutputInterceptor;
