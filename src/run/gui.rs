//! GUI mode implementation (requires "gui" feature).

use std::sync::Arc;

use tracing::{debug, error, info, warn};
use winit::application::ApplicationHandler;
use winit::event::{ElementState, KeyEvent, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::ModifiersState;
use winit::window::{Window, WindowId};

use crate::config::Config;
use crate::core::app::EditorApp;
use crate::core::input::{MouseEvent, MouseEventKind};
use crate::core::input_router::{route_key, route_mouse};
use crate::error::{EditorError, Result};
use crate::gui::{DEFAULT_FONT_SIZE, GridRenderer, input};
use crate::terminal::display::Display;

const WINDOW_TITLE: &str = "quill";

/// Run in GUI mode (requires "gui" feature).
pub fn run_gui_mode(config: &Config) -> Result<()> {
    let font = config.get_string("font").map(str::to_string);
    let font_size = config
        .get_int("font_size")
        .map(|px| px.clamp(6, 96) as f32)
        .unwrap_or(DEFAULT_FONT_SIZE);

    let event_loop = EventLoop::new().map_err(|e| EditorError::Gui(e.to_string()))?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = GuiApp {
        window: None,
        renderer: None,
        editor: EditorApp::initialize_with_config(config),
        display: Display::new(80, 24),
        modifiers: ModifiersState::default(),
        font,
        font_size,
        dirty: true,
        cursor_px: None,
        startup_error: None,
    };

    event_loop
        .run_app(&mut app)
        .map_err(|e| EditorError::Gui(e.to_string()))?;

    match app.startup_error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

struct GuiApp {
    window: Option<Arc<Window>>,
    renderer: Option<GridRenderer>,
    editor: EditorApp,
    display: Display,
    modifiers: ModifiersState,
    font: Option<String>,
    font_size: f32,
    dirty: bool,
    /// Last pointer position in physical pixels
    cursor_px: Option<(f64, f64)>,
    startup_error: Option<EditorError>,
}

impl ApplicationHandler for GuiApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(winit::dpi::LogicalSize::new(960, 640));
        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                error!("failed to create window: {}", e);
                self.startup_error = Some(EditorError::Gui(e.to_string()));
                event_loop.exit();
                return;
            }
        };

        match GridRenderer::new(
            window.clone(),
            self.font.as_deref(),
            self.font_size,
            window.scale_factor(),
        ) {
            Ok(renderer) => {
                let (cols, rows) = renderer.grid_size();
                info!(cols, rows, "window created");
                self.resize_grid(cols, rows);
                self.renderer = Some(renderer);
            }
            Err(e) => {
                error!("failed to create renderer: {}", e);
                self.startup_error = Some(e);
                event_loop.exit();
                return;
            }
        }
        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                info!("window closed");
                event_loop.exit();
                return;
            }
            WindowEvent::ModifiersChanged(mods) => {
                self.modifiers = mods.state();
                return;
            }
            WindowEvent::Resized(size) => {
                let Some(renderer) = self.renderer.as_mut() else {
                    return;
                };
                renderer.resize(size.width, size.height);
                let (cols, rows) = renderer.grid_size();
                self.resize_grid(cols, rows);
            }
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
                return;
            }
            WindowEvent::KeyboardInput { event, .. } => self.handle_keyboard(event),
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor_px = Some((position.x, position.y));
                return;
            }
            WindowEvent::CursorLeft { .. } => {
                self.cursor_px = None;
                return;
            }
            WindowEvent::MouseWheel { delta, .. } => self.handle_mouse_wheel(delta),
            WindowEvent::MouseInput { state, button, .. } => {
                if state != ElementState::Pressed {
                    return;
                }
                let Some(button) = input::mouse_button(button) else {
                    return;
                };
                self.send_mouse(MouseEventKind::Down(button));
            }
            _ => return,
        }

        if self.editor.should_exit() {
            event_loop.exit();
            return;
        }
        self.dirty = true;
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl Drop for GuiApp {
    fn drop(&mut self) {
        // The renderer's surface must go before the window it draws into
        drop(self.renderer.take());
        drop(self.window.take());
    }
}

impl GuiApp {
    fn resize_grid(&mut self, cols: usize, rows: usize) {
        let cols = cols.min(u16::MAX as usize) as u16;
        let rows = rows.min(u16::MAX as usize) as u16;
        self.display.update_size(cols, rows);
        let (cols, rows) = self.display.terminal_size;
        self.editor.resize(cols as usize, rows as usize);
        self.dirty = true;
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(renderer) = self.renderer.as_mut() else {
            return;
        };
        if self.dirty {
            self.display.render(&self.editor);
            self.display.swap_buffers();
            self.dirty = false;
        }

        match renderer.render(&self.display.front_buffer, &self.display.palette) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                debug!("surface lost, reconfiguring");
                let (width, height) = renderer.size();
                renderer.resize(width, height);
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                error!("GPU out of memory");
                self.startup_error = Some(EditorError::Gui("GPU out of memory".into()));
                event_loop.exit();
            }
            Err(e) => warn!("render error: {:?}", e),
        }
    }

    fn handle_keyboard(&mut self, event: KeyEvent) {
        if !input::should_process(event.state) {
            return;
        }
        if let Some(input_event) = input::translate_key(&event.logical_key, self.modifiers) {
            route_key(&mut self.editor, &input_event);
        }
    }

    fn handle_mouse_wheel(&mut self, delta: MouseScrollDelta) {
        let Some((kind, notches)) = input::wheel_scroll(delta) else {
            return;
        };
        for _ in 0..notches {
            self.send_mouse(kind);
        }
    }

    /// Route a mouse event at the pointer's cell; ignored off the grid
    fn send_mouse(&mut self, kind: MouseEventKind) {
        let (Some((x, y)), Some(renderer)) = (self.cursor_px, self.renderer.as_ref()) else {
            return;
        };
        let Some((col, row)) = renderer.metrics().px_to_grid(x as f32, y as f32) else {
            return;
        };
        let event = MouseEvent::new(col as u16, row as u16, kind);
        route_mouse(&mut self.editor, &event);
    }
}
