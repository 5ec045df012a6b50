use std::collections::HashSet;
use std::num::NonZeroU32;
use std::rc::Rc;
use std::time::{Duration, Instant};

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use gridcast::renderer::render_frame;
use gridcast::scaler::{ScaleLut, blit_nearest};
use gridcast::{Camera, Config, Controller, GridMap, Intents, PlayerState};

struct App {
    window: Option<Rc<Window>>,
    surface: Option<softbuffer::Surface<Rc<Window>, Rc<Window>>>,
    grid: GridMap,
    camera: Camera,
    controller: Controller,
    player: PlayerState,

    // HUD
    frame_counter: u32,
    last_fps_print: Instant,

    // Internal frame at the configured resolution
    fb: Vec<u32>,
    scale_lut: ScaleLut,

    keys_down: HashSet<KeyCode>,
    frame_interval: Duration,
    next_frame: Instant,
}

impl App {
    fn new(config: &Config) -> Result<Self, gridcast::ConfigError> {
        let camera = config.camera();
        Ok(Self {
            window: None,
            surface: None,
            grid: config.grid()?,
            camera,
            controller: config.controller(),
            player: config.spawn(),

            frame_counter: 0,
            last_fps_print: Instant::now(),

            fb: vec![0; camera.screen_width * camera.screen_height],
            scale_lut: ScaleLut::empty(),

            keys_down: HashSet::new(),
            frame_interval: Duration::from_millis(config.frame_interval_ms),
            next_frame: Instant::now(),
        })
    }

    fn intents(&self) -> Intents {
        let down = |code| self.keys_down.contains(&code);
        Intents {
            turn_left: down(KeyCode::KeyH),
            turn_right: down(KeyCode::KeyL),
            move_forward: down(KeyCode::KeyW),
            move_backward: down(KeyCode::KeyS),
            strafe_left: down(KeyCode::KeyA),
            strafe_right: down(KeyCode::KeyD),
        }
    }

    fn wants_exit(&self) -> bool {
        let ctrl = self.keys_down.contains(&KeyCode::ControlLeft)
            || self.keys_down.contains(&KeyCode::ControlRight);
        let quit = ctrl && self.keys_down.contains(&KeyCode::KeyD);
        quit || self.keys_down.contains(&KeyCode::Escape)
    }

    fn draw(&mut self, id: WindowId) {
        let (window, surface) = match (&self.window, &mut self.surface) {
            (Some(w), Some(s)) if w.id() == id => (w, s),
            _ => return,
        };

        let size = window.inner_size();
        let (Some(dw), Some(dh)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        else {
            return; // Minimized window, skip drawing
        };

        let commands = match self.camera.compute_frame(&self.grid, &self.player) {
            Ok(commands) => commands,
            Err(err) => {
                log::error!("skipping frame: {err}");
                return;
            }
        };
        let (fw, fh) = (self.camera.screen_width, self.camera.screen_height);
        render_frame(&mut self.fb, fw, fh, &commands);

        if let Err(err) = surface.resize(dw, dh) {
            log::error!("surface resize failed: {err}");
            return;
        }
        let (dw, dh) = (dw.get() as usize, dh.get() as usize);
        if self.scale_lut.dst_size() != (dw, dh) {
            self.scale_lut = ScaleLut::new(dw, dh, fw, fh);
        }

        let mut buf = match surface.buffer_mut() {
            Ok(buf) => buf,
            Err(err) => {
                log::error!("buffer unavailable: {err}");
                return;
            }
        };
        blit_nearest(&mut buf, dw, &self.fb, fw, &self.scale_lut);
        if let Err(err) = buf.present() {
            log::error!("present failed: {err}");
        }

        self.frame_counter += 1;
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_fps_print).as_secs_f32();
        if elapsed >= 1.0 {
            log::info!("FPS: {:.1}", self.frame_counter as f32 / elapsed);
            self.frame_counter = 0;
            self.last_fps_print = now;
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let attributes = Window::default_attributes()
            .with_title("gridcast")
            .with_inner_size(LogicalSize::new(
                self.camera.screen_width as f64,
                self.camera.screen_height as f64,
            ));

        let window = Rc::new(event_loop.create_window(attributes).expect("create window"));

        let context = softbuffer::Context::new(window.clone()).expect("softbuffer context");
        let surface =
            softbuffer::Surface::new(&context, window.clone()).expect("softbuffer surface");

        self.surface = Some(surface);
        self.window = Some(window);
        self.next_frame = Instant::now();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("close requested; stopping");
                event_loop.exit();
            }

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state,
                        ..
                    },
                ..
            } => {
                match state {
                    ElementState::Pressed => {
                        self.keys_down.insert(code);
                    }
                    ElementState::Released => {
                        self.keys_down.remove(&code);
                    }
                }
                if self.wants_exit() {
                    event_loop.exit();
                }
            }

            WindowEvent::RedrawRequested => {
                let intents = self.intents();
                self.controller.apply(&mut self.player, intents, &self.grid);
                self.draw(id);
            }

            WindowEvent::Focused(false) => self.keys_down.clear(),
            _ => (),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        if now >= self.next_frame {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
            self.next_frame = now + self.frame_interval;
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_frame));
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args_os().nth(1) {
        Some(path) => {
            log::info!("loading config from {}", path.to_string_lossy());
            Config::load(&path)?
        }
        None => Config::default(),
    };

    let mut app = App::new(&config)?;
    log::info!(
        "map {}x{}, screen {}x{}, focal length {} ({:.1} deg fov)",
        app.grid.width(),
        app.grid.height(),
        app.camera.screen_width,
        app.camera.screen_height,
        app.camera.focal_length,
        app.camera.fov().to_degrees()
    );

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);
    event_loop.run_app(&mut app)?;
    Ok(())
}
