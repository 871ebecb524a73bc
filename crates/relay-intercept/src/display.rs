//! Braille display state relay.

use std::sync::Arc;

use serde_json::Value;
use tracing::{error, info};

use relay_core::AppResult;

use crate::events::{EventDispatcher, EventPayload, Topic};
use crate::host::{DisplayInfo, Handler, Host};
use crate::lifecycle::{HandleSlot, Interceptor};

/// Publishes `set_display` whenever the active display or its size changes.
#[derive(Debug)]
pub struct DisplayHooks {
    host: Arc<Host>,
    dispatcher: Arc<EventDispatcher>,
    changed: HandleSlot<Handler<DisplayInfo>>,
    size_changed: HandleSlot<Handler<usize>>,
}

impl DisplayHooks {
    /// Creates the hooks without installing them.
    pub fn new(host: Arc<Host>, dispatcher: Arc<EventDispatcher>) -> Self {
        Self {
            host,
            dispatcher,
            changed: HandleSlot::new("display_changed"),
            size_changed: HandleSlot::new("display_size_changed"),
        }
    }

    fn display_changed_handler(&self) -> Handler<DisplayInfo> {
        let dispatcher = self.dispatcher.clone();
        Arc::new(move |display: &DisplayInfo| {
            dispatcher.publish(
                Topic::SetDisplay,
                EventPayload::new().with_string("display", &display.name),
            );
        })
    }

    fn size_changed_handler(&self) -> Handler<usize> {
        let dispatcher = self.dispatcher.clone();
        Arc::new(move |cells: &usize| {
            dispatcher.publish(
                Topic::SetDisplay,
                EventPayload::new().with_value("displaySize", Value::from(*cells)),
            );
        })
    }
}

impl Interceptor for DisplayHooks {
    fn name(&self) -> &str {
        "display"
    }

    fn register(&self) -> AppResult<()> {
        let notifications = &self.host.braille;

        let installed_changed = self.changed.fill_with(|| {
            let handler = self.display_changed_handler();
            notifications.display_changed.register(handler.clone());
            handler
        });
        let installed_size = self.size_changed.fill_with(|| {
            let handler = self.size_changed_handler();
            notifications.display_size_changed.register(handler.clone());
            handler
        });

        if installed_changed || installed_size {
            info!("Display hooks registered");
        }
        Ok(())
    }

    fn unregister(&self) -> AppResult<()> {
        let notifications = &self.host.braille;
        let mut removed = false;

        if let Some(handler) = self.changed.take() {
            notifications.display_changed.unregister(&handler);
            removed = true;
        }
        if let Some(handler) = self.size_changed.take() {
            notifications.display_size_changed.unregister(&handler);
            removed = true;
        }

        if removed {
            info!("Display hooks unregistered");
        }
        Ok(())
    }

    fn is_registered(&self) -> bool {
        self.changed.is_filled() || self.size_changed.is_filled()
    }
}

impl Drop for DisplayHooks {
    fn drop(&mut self) {
        if let Err(e) = self.unregister() {
            error!(error = %e, "Error removing display hooks on drop");
        }
    }
}
