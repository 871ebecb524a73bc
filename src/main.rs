//! Host Relay demo: wires an in-memory host, installs the interceptors,
//! drives a short scripted session, and restores the host.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use relay_core::config::AppConfig;
use relay_core::AppResult;
use relay_core::error::AppError;
use relay_intercept::events::{ClosureSubscriber, EventDispatcher};
use relay_intercept::host::{
    BrailleDisplayGesture, BrailleInputGesture, DisplayInfo, Gesture, GestureMaps, Host,
    InMemoryGestureMap, OtherGesture, PauseSpeechFn, ScriptBinding, ScriptRef, SpeakFn,
    SpeechCommand, SpeechEntryPoints, SpeechPriority, SpeechSequence,
};
use relay_intercept::manager::InterceptorManager;

fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config) {
        tracing::error!("Relay demo error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from files and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("RELAY_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Speech engine that only logs what it would say.
fn logging_speech() -> SpeechEntryPoints {
    let speak: SpeakFn = Arc::new(|sequence: &SpeechSequence, priority: SpeechPriority| -> AppResult<()> {
        tracing::info!(text = %sequence.text(), ?priority, "Host speaks");
        Ok(())
    });
    let pause: PauseSpeechFn = Arc::new(|switch: bool| -> AppResult<()> {
        tracing::info!(switch, "Host pauses speech");
        Ok(())
    });
    SpeechEntryPoints::new(speak, pause)
}

fn demo_gesture_maps() -> GestureMaps {
    let user = InMemoryGestureMap::new();
    let locale = InMemoryGestureMap::new().with_binding(
        "bk:dot1+dot2+space",
        ScriptBinding::new("globalCommands", "GlobalCommands", "braille_toggleTether"),
    );
    let display = InMemoryGestureMap::new().with_binding(
        "br(freedomScientific):leftWizWheelUp",
        ScriptBinding::new("globalCommands", "GlobalCommands", "braille_scrollBack"),
    );
    GestureMaps::new(Arc::new(user), Arc::new(locale)).with_display(Arc::new(display))
}

/// Main demo run function
fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Host Relay demo v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Host and relay transport ─────────────────────────
    let host = Arc::new(Host::new(logging_speech(), Arc::new(demo_gesture_maps())));
    let original_speak = host.speech.emit.current();
    let original_pause = host.speech.pause.current();

    let dispatcher = Arc::new(EventDispatcher::new());
    dispatcher.subscribe_all(ClosureSubscriber::shared("json_relay", |event| {
        let line = serde_json::to_string(event)?;
        tracing::info!(topic = %event.topic, event = %line, "Relayed event");
        Ok(())
    }));

    // ── Step 2: Install interceptors ─────────────────────────────
    let manager = InterceptorManager::with_dispatcher(host.clone(), dispatcher, config.intercept);
    manager.register_all()?;
    tracing::info!(status = ?manager.status(), "Interceptors active");

    // ── Step 3: Scripted session ─────────────────────────────────
    host.speech.speak(
        &SpeechSequence::from_text("Desktop")
            .with_command(SpeechCommand::Index { index: 1 })
            .with_text("list"),
        SpeechPriority::Normal,
    )?;
    host.speech.pause_speech(true)?;
    host.speech.pause_speech(false)?;

    host.braille
        .display_changed
        .notify(&DisplayInfo::new("freedomScientific", "Freedom Scientific Focus", 40));
    host.braille.display_size_changed.notify(&40);

    let gestures = [
        Gesture::from(
            BrailleDisplayGesture::new(
                "freedomScientific",
                &["br(freedomScientific):leftWizWheelUp"],
            )
            .with_model("focus40")
            .with_id("leftWizWheelUp"),
        ),
        Gesture::from(
            BrailleDisplayGesture::new("freedomScientific", &["br(freedomScientific):routing"])
                .with_id("routing")
                .with_routing_index(12)
                .with_script(ScriptRef::new(
                    "braille_routeTo",
                    "globalCommands.GlobalCommands",
                )),
        ),
        Gesture::from(BrailleInputGesture::new(0b11, true, &["bk:dot1+dot2+space"])),
        Gesture::from(OtherGesture {
            kind: "keyboard".to_string(),
            identifiers: vec!["kb:NVDA+t".to_string()],
        }),
    ];

    for gesture in &gestures {
        let executed = host.input.execute_gesture(gesture);
        tracing::info!(kind = gesture.kind(), executed, "Gesture handled");
    }

    // ── Step 4: Tear down ────────────────────────────────────────
    manager.unregister_all();

    if !host.speech.emit.holds(&original_speak) || !host.speech.pause.holds(&original_pause) {
        return Err(AppError::interception(
            "Speech entry points were not restored",
        ));
    }

    tracing::info!("Host restored, demo complete");
    Ok(())
}
