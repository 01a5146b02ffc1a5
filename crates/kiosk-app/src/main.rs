mod app;
mod cli;
mod events;
mod platform;

use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use winit::event_loop::{EventLoop, EventLoopProxy};

use kiosk_host::{lockdown, HostSession};
use kiosk_webview::{ViewCommand, ViewProxy};

use crate::events::ShellEvent;

/// Forward queued view commands from the dispatch core to the event loop.
async fn forward_view_commands(
    mut commands: tokio::sync::mpsc::UnboundedReceiver<ViewCommand>,
    proxy: EventLoopProxy<ShellEvent>,
) {
    while let Some(command) = commands.recv().await {
        if proxy.send_event(ShellEvent::View(command)).is_err() {
            break;
        }
    }
}

fn main() {
    let args = cli::parse();

    let config = match &args.config {
        Some(path) => kiosk_config::load_from_path(Path::new(path)),
        None => kiosk_config::load_default(),
    }
    .unwrap_or_else(|e| {
        eprintln!("config load failed, using defaults: {e}");
        kiosk_config::KioskConfig::default()
    });

    let log_directive = args
        .log_level
        .as_deref()
        .unwrap_or(&config.logging.filter);
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                log_directive
                    .parse()
                    .unwrap_or_else(|_| "kiosk=info".parse().unwrap()),
            ),
        )
        .init();

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "secure browser starting"
    );

    let event_loop = EventLoop::<ShellEvent>::with_user_event()
        .build()
        .expect("failed to create event loop");
    let proxy = event_loop.create_proxy();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .expect("failed to create tokio runtime");

    let (view, view_rx) = ViewProxy::channel();
    runtime.spawn(forward_view_commands(view_rx, proxy.clone()));

    let (platform, store) = platform::build(proxy);
    lockdown::apply_lockdown(&*platform.accessibility);
    let session = HostSession::new(platform, Arc::new(view.clone()));

    let mut app = app::KioskApp::new(
        config,
        runtime.handle().clone(),
        session,
        store,
        view,
        !args.windowed,
    );

    tracing::info!("entering event loop");
    if let Err(e) = event_loop.run_app(&mut app) {
        tracing::error!("event loop error: {e}");
    }
    tracing::info!("shutdown complete");
}
