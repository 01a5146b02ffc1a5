//! Implements `winit::application::ApplicationHandler` to drive the kiosk
//! window and the embedded content view.

use std::sync::Arc;

use tracing::{error, info, warn};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowAttributes, WindowId};

use kiosk_common::new_request_id;
use kiosk_config::KioskConfig;
use kiosk_host::HostSession;
use kiosk_platform::KeyValueStore;
use kiosk_protocol::{Response, ResponseEnvelope};
use kiosk_webview::{welcome_script, ContentShell, ShellConfig, UserAgent, ViewProxy};

use crate::events::ShellEvent;

pub struct KioskApp {
    config: KioskConfig,
    runtime: tokio::runtime::Handle,
    session: Arc<HostSession>,
    store: Arc<dyn KeyValueStore>,
    view: ViewProxy,
    kiosk_session: bool,
    window: Option<Arc<Window>>,
    shell: Option<ContentShell>,
}

impl KioskApp {
    pub fn new(
        config: KioskConfig,
        runtime: tokio::runtime::Handle,
        session: Arc<HostSession>,
        store: Arc<dyn KeyValueStore>,
        view: ViewProxy,
        kiosk_session: bool,
    ) -> Self {
        Self {
            config,
            runtime,
            session,
            store,
            view,
            kiosk_session,
            window: None,
            shell: None,
        }
    }

    /// Stored `launchUrl` key if present, else the configured default.
    fn resolve_launch_url(&self) -> String {
        let stored = self
            .runtime
            .block_on(self.store.get("launchUrl"))
            .unwrap_or_default()
            .and_then(|v| v.as_str().map(str::to_string));
        stored.unwrap_or_else(|| self.config.browser.launch_url.clone())
    }

    fn full_bounds(window: &Window) -> wry::Rect {
        let size = window.inner_size();
        wry::Rect {
            position: wry::dpi::LogicalPosition::new(0.0, 0.0).into(),
            size: wry::dpi::PhysicalSize::new(size.width, size.height).into(),
        }
    }
}

impl ApplicationHandler<ShellEvent> for KioskApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title("Secure Browser")
            .with_maximized(true);
        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                error!("failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let url = if self.kiosk_session {
            self.resolve_launch_url()
        } else {
            // Non-kiosk sessions never navigate the content view.
            "about:blank".to_string()
        };
        let user_agent = UserAgent::new(
            &self.config.browser.product,
            &self.config.browser.version,
        )
        .dev_build(self.config.browser.dev_build)
        .build();

        let shell_config = ShellConfig {
            url: url.clone(),
            user_agent: Some(user_agent),
            ..ShellConfig::default()
        };

        let session = Arc::clone(&self.session);
        let handle = self.runtime.clone();
        let on_message = move |raw: String| {
            let session = Arc::clone(&session);
            handle.spawn(async move {
                session.handle_message(&raw).await;
            });
        };

        let view = self.view.clone();
        let on_load = move || {
            let welcome = ResponseEnvelope::new(Response::push("APP WELCOME", new_request_id(), ""));
            view.run_script(welcome_script(&welcome));
        };

        match ContentShell::create(
            window.as_ref(),
            Self::full_bounds(&window),
            &shell_config,
            on_message,
            on_load,
        ) {
            Ok(shell) => self.shell = Some(shell),
            Err(e) => {
                error!("failed to create content view: {e}");
                event_loop.exit();
                return;
            }
        }

        info!(url = %url, kiosk = self.kiosk_session, "shell window created");
        self.window = Some(window);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                info!("window close requested");
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if size.width > 0 && size.height > 0 {
                    if let (Some(window), Some(shell)) = (&self.window, &self.shell) {
                        shell.set_bounds(Self::full_bounds(window));
                    }
                }
            }
            _ => {}
        }
    }

    fn user_event(&mut self, event_loop: &ActiveEventLoop, event: ShellEvent) {
        match event {
            ShellEvent::View(command) => match &self.shell {
                Some(shell) => shell.apply(&command),
                None => warn!("view command before shell creation"),
            },
            ShellEvent::CloseRequested => {
                info!("teardown requested by the content page");
                event_loop.exit();
            }
        }
    }
}
