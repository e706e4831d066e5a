use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    dpi::{PhysicalSize, Size},
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowAttributes, WindowId},
};

use crate::{
    config::ViewerConfig,
    error::ViewerError,
    gfx::{rendering::FrameRecorder, RenderEngine, SceneManager, ViewManager},
};

pub struct TabletopApp {
    event_loop: EventLoop<()>,
    app_state: AppState,
}

struct AppState {
    config: ViewerConfig,
    window: Option<Arc<Window>>,
    render_engine: Option<RenderEngine>,
    view: ViewManager,
    scene: SceneManager,
    recorder: FrameRecorder,
    init_error: Option<ViewerError>,
}

impl TabletopApp {
    pub fn new(config: ViewerConfig) -> Result<Self, ViewerError> {
        let event_loop = EventLoop::new()?;

        let view = ViewManager::new(&config);
        let scene = SceneManager::new(config.assets.texture_dir.clone());

        Ok(Self {
            event_loop,
            app_state: AppState {
                config,
                window: None,
                render_engine: None,
                view,
                scene,
                recorder: FrameRecorder::new(),
                init_error: None,
            },
        })
    }

    /// Runs the event loop until the window closes
    ///
    /// Returns the initialization error, if one ended the loop.
    pub fn run(mut self) -> Result<(), ViewerError> {
        self.event_loop.set_control_flow(ControlFlow::Poll);
        self.event_loop.run_app(&mut self.app_state)?;

        match self.app_state.init_error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl AppState {
    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), ViewerError> {
        let window_config = &self.config.window;
        let attributes = WindowAttributes::default()
            .with_title(window_config.title.clone())
            .with_inner_size(Size::Physical(PhysicalSize::new(
                window_config.width,
                window_config.height,
            )))
            .with_resizable(false);

        let window = Arc::new(event_loop.create_window(attributes)?);
        self.window = Some(window.clone());

        let renderer = pollster::block_on(RenderEngine::new(window, &self.config))?;
        self.scene.prepare_scene(&renderer, &mut self.recorder);
        self.render_engine = Some(renderer);
        Ok(())
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(render_engine) = self.render_engine.as_mut() else {
            return;
        };

        self.recorder.begin_frame();
        self.view.prepare_scene_view(Some(&mut self.recorder));
        self.scene.render_scene(&mut self.recorder);

        match render_engine.render_frame(&self.recorder, &self.scene) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                render_engine.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Out of GPU memory, exiting");
                event_loop.exit();
            }
            Err(err) => log::warn!("Skipping frame: {}", err),
        }
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(err) = self.init(event_loop) {
            log::error!("Initialization failed: {}", err);
            self.init_error = Some(err);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput { event, .. } => {
                if is_escape_press(&event) {
                    event_loop.exit();
                    return;
                }
                self.view.handle_keyboard(&event);
            }
            WindowEvent::CursorMoved { position, .. } => self.view.handle_cursor_moved(position),
            WindowEvent::CursorLeft { .. } => self.view.handle_cursor_left(),
            WindowEvent::MouseWheel { delta, .. } => self.view.handle_scroll(&delta),
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                self.view.resize(width, height);
                if let Some(render_engine) = self.render_engine.as_mut() {
                    render_engine.resize(width, height);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => (),
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(ref window) = self.window {
            window.request_redraw();
        }
    }
}

fn is_escape_press(event: &KeyEvent) -> bool {
    event.state == ElementState::Pressed
        && event.physical_key == PhysicalKey::Code(KeyCode::Escape)
}
