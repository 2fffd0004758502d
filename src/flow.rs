//! Host integration: the display-refresh loop and load completion.
//!
//! The winit event loop is the single scheduling source. Every
//! `RedrawRequested` runs one [`AnimationLoop::step`] and immediately asks for
//! the next redraw, so the loop runs until the window closes. Asset loads run
//! on the async runtime of the platform (tokio natively, the browser's
//! microtask queue on WASM) and report back through the event-loop proxy as
//! [`FlowEvent::Loaded`], so a completion is never handled while a frame is
//! being stepped.
//!
//! # Lifecycle
//!
//! 1. `run` sets up logging and builds the scene from its config
//! 2. `resumed` creates the window, sizes the projection and spawns all loads
//! 3. `window_event` / `device_event` feed the orbit controller
//! 4. `RedrawRequested` steps and renders one frame
//! 5. `user_event` applies finished loads to the scene

use std::sync::Arc;

use instant::{Duration, Instant};
use winit::{
    application::ApplicationHandler,
    event::{DeviceEvent, DeviceId, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop, EventLoopProxy},
    window::{Window, WindowId},
};

use crate::{
    animation::AnimationLoop,
    config::SceneConfig,
    context::Context,
    layout,
    render::Renderer,
    resources::{self, AssetLoaded, AssetRequest},
};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[derive(Debug)]
pub enum FlowEvent {
    Loaded(AssetLoaded),
}

pub struct App<R: Renderer> {
    #[cfg(not(target_arch = "wasm32"))]
    async_runtime: tokio::runtime::Runtime,
    proxy: EventLoopProxy<FlowEvent>,
    window: Option<Arc<Window>>,
    ctx: Context,
    animation: AnimationLoop,
    renderer: R,
    // taken once the loads are spawned
    requests: Option<Vec<AssetRequest>>,
}

impl<R: Renderer> App<R> {
    fn new(
        event_loop: &EventLoop<FlowEvent>,
        config: &SceneConfig,
        renderer: R,
    ) -> anyhow::Result<Self> {
        let build = layout::build(config)?;
        Ok(Self {
            #[cfg(not(target_arch = "wasm32"))]
            async_runtime: tokio::runtime::Runtime::new()?,
            proxy: event_loop.create_proxy(),
            window: None,
            ctx: build.context,
            animation: build.animation,
            renderer,
            requests: Some(build.requests),
        })
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.ctx.camera.projection.resize(width, height);
            self.renderer.resize(width, height);
        }
    }

    fn spawn_loads(&mut self, requests: Vec<AssetRequest>) {
        log::info!("loading {} assets", requests.len());
        for request in requests {
            let proxy = self.proxy.clone();
            let load = async move {
                let loaded = resources::fetch(request).await;
                if proxy.send_event(FlowEvent::Loaded(loaded)).is_err() {
                    log::debug!("event loop closed before a load finished");
                }
            };
            #[cfg(not(target_arch = "wasm32"))]
            self.async_runtime.spawn(load);
            #[cfg(target_arch = "wasm32")]
            wasm_bindgen_futures::spawn_local(load);
        }
    }
}

impl<R: Renderer> ApplicationHandler<FlowEvent> for App<R> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        #[allow(unused_mut)]
        let mut window_attributes = Window::default_attributes().with_title("orrery");
        #[cfg(target_arch = "wasm32")]
        {
            use winit::platform::web::WindowAttributesExtWebSys;
            const CANVAS_ID: &str = "canvas";
            let canvas = web_sys::window()
                .and_then(|window| window.document())
                .and_then(|document| document.get_element_by_id(CANVAS_ID))
                .map(|element| element.unchecked_into::<web_sys::HtmlCanvasElement>());
            if canvas.is_none() {
                log::warn!("no #{} element, letting winit create a canvas", CANVAS_ID);
            }
            window_attributes = window_attributes.with_canvas(canvas);
        }
        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("could not create a window: {}", e);
                event_loop.exit();
                return;
            }
        };
        let size = window.inner_size();
        self.resize(size.width, size.height);
        if let Some(requests) = self.requests.take() {
            self.spawn_loads(requests);
        }
        window.request_redraw();
        self.window = Some(window);
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: FlowEvent) {
        match event {
            FlowEvent::Loaded(loaded) => self.ctx.apply(loaded),
        }
    }

    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _device_id: DeviceId, event: DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
            self.ctx.camera.controller.handle_mouse(dx, dy);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        self.ctx.camera.controller.handle_window_events(&event);
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => self.resize(size.width, size.height),
            WindowEvent::RedrawRequested => {
                self.animation
                    .step(&mut self.ctx, Instant::now(), &mut self.renderer);
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}

pub fn init_logger() {
    #[cfg(not(target_arch = "wasm32"))]
    {
        if let Err(e) = env_logger::try_init() {
            eprintln!("Warning: Could not initialize logger: {}", e);
        }
    }
    #[cfg(target_arch = "wasm32")]
    {
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::log_1(&format!("could not initialize logger: {}", e).into());
        }
    }
}

/// Opens a window and animates the scene until it is closed.
pub fn run<R: Renderer + 'static>(config: SceneConfig, renderer: R) -> anyhow::Result<()> {
    init_logger();
    let event_loop: EventLoop<FlowEvent> = EventLoop::with_user_event().build()?;
    let app = App::new(&event_loop, &config, renderer)?;
    #[cfg(not(target_arch = "wasm32"))]
    {
        let mut app = app;
        event_loop.run_app(&mut app)?;
    }
    #[cfg(target_arch = "wasm32")]
    {
        use winit::platform::web::EventLoopExtWebSys;
        event_loop.spawn_app(app);
    }
    Ok(())
}

/// Runs a scene without a window: all loads are resolved first, then
/// `frames` steps are taken `frame_time` apart.
///
/// Returns the final scene so callers can inspect it.
pub fn run_headless<R: Renderer>(
    config: &SceneConfig,
    renderer: &mut R,
    frames: u64,
    frame_time: Duration,
) -> anyhow::Result<(Context, AnimationLoop)> {
    let layout::SceneBuild {
        mut context,
        mut animation,
        requests,
        ..
    } = layout::build(config)?;
    for loaded in futures::executor::block_on(resources::fetch_all(requests)) {
        context.apply(loaded);
    }
    let mut now = Instant::now();
    for frame in 0..frames {
        if frame > 0 {
            now += frame_time;
        }
        animation.step(&mut context, now, renderer);
    }
    Ok((context, animation))
}

/// Browser entry point: runs the classic layout on the `#canvas` element.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    let config = crate::config::SceneConfig::preset(crate::config::Preset::Classic)
        .map_err(|e| JsValue::from_str(&format!("{:#}", e)))?;
    run(config, crate::render::FrameLog::default()).map_err(|e| JsValue::from_str(&format!("{:#}", e)))
}
