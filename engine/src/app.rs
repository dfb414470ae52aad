use std::error::Error;

use pixels::{PixelsBuilder, SurfaceTexture};
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, Event, MouseButton, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

use crate::graphics::Renderer2d;
use crate::input::{map_virtual_key, InputEvent};
use crate::pixels_renderer::PixelsRenderer2d;
use crate::surface::SurfaceSize;

pub struct AppConfig {
    pub title: String,
    /// Logical frame-buffer size; the window starts at the same physical size.
    pub size: SurfaceSize,
    pub vsync: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameControl {
    Continue,
    Exit,
}

/// Receives one call per displayed frame with every input event gathered since the previous one.
pub trait FrameHandler {
    fn frame(
        &mut self,
        events: &[InputEvent],
        renderer: &mut dyn Renderer2d,
    ) -> Result<FrameControl, Box<dyn Error>>;

    /// Called once before the loop exits, whatever the reason.
    fn shutdown(&mut self) {}
}

pub fn run<H: FrameHandler + 'static>(config: AppConfig, mut handler: H) -> Result<(), Box<dyn Error>> {
    let event_loop = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title(config.title)
        .with_inner_size(PhysicalSize::new(config.size.width, config.size.height))
        .build(&event_loop)?;

    let window_size = window.inner_size();
    let surface_texture = SurfaceTexture::new(window_size.width, window_size.height, &window);
    let pixels = PixelsBuilder::new(config.size.width, config.size.height, surface_texture)
        .enable_vsync(config.vsync)
        .build()?;
    let mut renderer = PixelsRenderer2d::new(pixels, config.size)?;

    let mut pending: Vec<InputEvent> = Vec::new();
    let mut cursor: Option<(i32, i32)> = None;
    let mut running = true;

    log::info!(
        "window open: {}x{} (vsync {})",
        config.size.width,
        config.size.height,
        config.vsync
    );

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Poll;
        if !running {
            return;
        }

        let mut stop = |handler: &mut H, control_flow: &mut ControlFlow, code: i32| {
            handler.shutdown();
            running = false;
            *control_flow = if code == 0 {
                ControlFlow::Exit
            } else {
                ControlFlow::ExitWithCode(code)
            };
        };

        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => pending.push(InputEvent::Quit),
                WindowEvent::Resized(size) => {
                    if let Err(err) = renderer.resize_surface(size.width, size.height) {
                        log::error!("resize failed: {err}");
                        stop(&mut handler, control_flow, 1);
                    }
                }
                WindowEvent::CursorMoved { position, .. } => {
                    cursor = renderer.window_to_frame(position.x, position.y);
                }
                WindowEvent::MouseInput {
                    state: ElementState::Pressed,
                    button: MouseButton::Left,
                    ..
                } => {
                    if let Some((x, y)) = cursor {
                        pending.push(InputEvent::MouseDown { x, y });
                    }
                }
                WindowEvent::KeyboardInput { input, .. } => {
                    if input.state == ElementState::Pressed {
                        if let Some(key) = input.virtual_keycode.and_then(map_virtual_key) {
                            pending.push(InputEvent::KeyDown(key));
                        }
                    }
                }
                _ => {}
            },
            Event::RedrawRequested(_) => {
                let events = std::mem::take(&mut pending);
                match renderer.draw_frame(|gfx| handler.frame(&events, gfx)) {
                    Ok(FrameControl::Continue) => {
                        if let Err(err) = renderer.present() {
                            log::error!("present failed: {err}");
                            stop(&mut handler, control_flow, 1);
                        }
                    }
                    Ok(FrameControl::Exit) => {
                        log::info!("quit requested");
                        stop(&mut handler, control_flow, 0);
                    }
                    Err(err) => {
                        log::error!("frame failed: {err}");
                        stop(&mut handler, control_flow, 1);
                    }
                }
            }
            Event::MainEventsCleared => window.request_redraw(),
            _ => {}
        }
    });

    #[allow(unreachable_code)]
    Ok(())
}
