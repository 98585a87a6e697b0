//! Handwave: control the desktop with webcam hand gestures.

mod app_command;
mod config;
mod error;
mod event_bridge;
mod frame_loop;
mod held_key_guard;
mod hotkey_handler;
mod injector;
mod landmark_source;
mod menu_handler;
#[cfg(test)]
mod tests;
mod tray_command;
mod tray_icon_state;
mod tray_manager;

pub(crate) use {
    app_command::AppCommand,
    error::{AppError, Result as AppResult},
    frame_loop::FrameLoop,
    held_key_guard::HeldKeyGuard,
    hotkey_handler::HotkeyHandler,
    injector::{EnigoInjector, InputInjector},
    landmark_source::LandmarkSource,
    menu_handler::MenuHandler,
    tray_command::{TrayCommand, TraySender},
    tray_icon_state::TrayIconState,
    tray_manager::TrayManager,
};

use crate::config::Config;

use handwave_core::GestureSession;

use std::{fmt::Debug, path::PathBuf};

use clap::Parser;
use global_hotkey::GlobalHotKeyManager;
use tao::{
    event::{Event, StartCause},
    event_loop::{ControlFlow, EventLoopBuilder, EventLoopProxy},
};
use tokio::sync::{mpsc, watch};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

/// Log filter used when `RUST_LOG` is not set.
const DEFAULT_LOG_FILTER: &str = "handwave=info,handwave_core=info";

#[derive(Parser, Debug)]
#[command(name = "handwave", version, about = "Control the desktop with hand gestures")]
struct Cli {
    /// Configuration file (default: config.toml in the platform config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,
}

fn init_tracing(json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

/// Log a fatal startup error and exit.
fn or_exit<T, E: Debug>(result: Result<T, E>, what: &str) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            error!(error = ?e, "{}", what);
            std::process::exit(1);
        }
    }
}

/// Open OS input, then the detector.
fn open_io(config: &Config) -> AppResult<(EnigoInjector, LandmarkSource)> {
    let injector = EnigoInjector::new()?;
    let source = LandmarkSource::open(&config.detector)?;
    Ok((injector, source))
}

/// Everything the runtime thread takes ownership of.
struct Pipeline {
    config: Config,
    session: GestureSession,
    quit_hotkey_id: u32,
    menu_handler: MenuHandler,
    command_tx: mpsc::Sender<AppCommand>,
    command_rx: mpsc::Receiver<AppCommand>,
    tray_proxy: EventLoopProxy<TrayCommand>,
    run_id: Uuid,
}

impl Pipeline {
    /// Open the OS input and the detector, then drive every task until the
    /// frame loop finishes.
    async fn run(self) {
        let Pipeline {
            config,
            session,
            quit_hotkey_id,
            menu_handler,
            command_tx,
            command_rx,
            tray_proxy,
            run_id,
        } = self;

        let (injector, source) = match open_io(&config) {
            Ok(pair) => pair,
            Err(e) => {
                error!(error = ?e, "Gesture pipeline could not start");
                tray_proxy.send_command(TrayCommand::Shutdown);
                return;
            }
        };

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let hotkey_handler = HotkeyHandler::new(quit_hotkey_id, command_tx.clone());
        let frame_loop = FrameLoop {
            guard: HeldKeyGuard::new(session, injector),
            source,
            classifier: config.gestures.classifier,
            tray_tx: tray_proxy,
            command_rx,
            shutdown_tx,
            run_id,
        };

        let mut ctrl_c_shutdown = shutdown_rx.clone();
        let menu_shutdown = shutdown_rx.clone();

        tokio::join!(
            async {
                if let Err(e) = hotkey_handler.run(shutdown_rx).await {
                    error!(error = ?e, "Hotkey handler failed");
                }
            },
            async {
                if let Err(e) = menu_handler.run(menu_shutdown).await {
                    error!(error = ?e, "Menu handler failed");
                }
            },
            async {
                tokio::select! {
                    result = tokio::signal::ctrl_c() => {
                        if result.is_ok() {
                            info!("Ctrl+C received");
                            let _ = command_tx.send(AppCommand::Shutdown).await;
                        }
                    }
                    _ = ctrl_c_shutdown.changed() => {}
                }
            },
            async {
                if let Err(e) = frame_loop.run().await {
                    error!(error = ?e, "Frame loop failed");
                }
            }
        );
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    let run_id = Uuid::new_v4();
    info!(run_id = %run_id, version = env!("CARGO_PKG_VERSION"), "Handwave launching");

    // A bad config must stop startup before any UI appears.
    let config = or_exit(Config::load(cli.config.as_deref()), "Config could not be loaded");
    let session = or_exit(GestureSession::new(config.gestures), "Gesture tuning rejected");
    let quit_hotkey = or_exit(config.controls.quit_hotkey(), "Quit hotkey rejected");

    let event_loop = EventLoopBuilder::<TrayCommand>::with_user_event().build();
    let tray_proxy = event_loop.create_proxy();

    // TrayIcon is !Send, so the tray stays on the event loop thread.
    let mut tray_manager = or_exit(TrayManager::new(), "Tray icon could not be created");

    // Dropping the manager unregisters the hotkey.
    let mut hotkey_manager: Option<GlobalHotKeyManager> = None;
    let mut startup = Some((config, session));

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::UserEvent(TrayCommand::SetState(state)) => {
                if let Err(e) = tray_manager.update_state(state) {
                    error!(error = ?e, "Tray icon update failed");
                }
            }
            Event::UserEvent(TrayCommand::Shutdown) => {
                *control_flow = ControlFlow::ExitWithCode(0);
            }
            Event::NewEvents(StartCause::Init) => {
                let Some((config, session)) = startup.take() else {
                    return;
                };

                #[cfg(target_os = "macos")]
                unsafe {
                    use core_foundation::runloop::{CFRunLoopGetMain, CFRunLoopWakeUp};
                    CFRunLoopWakeUp(CFRunLoopGetMain());
                }

                // WM_HOTKEY is only delivered to the thread pumping tao's loop.
                let (manager, quit_hotkey_id) = or_exit(
                    HotkeyHandler::register_hotkey(quit_hotkey),
                    "Quit hotkey could not be registered",
                );
                hotkey_manager = Some(manager);

                let (command_tx, command_rx) = mpsc::channel(32);
                let pipeline = Pipeline {
                    config,
                    session,
                    quit_hotkey_id,
                    menu_handler: MenuHandler::new(
                        tray_manager.pause_item_id().clone(),
                        tray_manager.quit_item_id().clone(),
                        command_tx.clone(),
                    ),
                    command_tx,
                    command_rx,
                    tray_proxy: tray_proxy.clone(),
                    run_id,
                };

                std::thread::spawn(move || {
                    let rt = or_exit(tokio::runtime::Runtime::new(), "Tokio runtime unavailable");
                    rt.block_on(pipeline.run());
                });
            }
            _ => {}
        }

        // Keeps the hotkey registered for the life of the loop.
        let _ = &hotkey_manager;
    });
}
