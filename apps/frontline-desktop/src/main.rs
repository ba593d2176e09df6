use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use frontline_common::MovementTarget;
use frontline_input::{ControlConfig, InputState, MovementResolver};
use frontline_scene::{Scene, SceneLayout};
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

/// Scene ticks per second. Movement is per tick, not per second.
const TICK_RATE: f64 = 60.0;

#[derive(Parser)]
#[command(name = "frontline-desktop", about = "Frontline desktop scene")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Control config file (.yaml, .yml or .json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Object moved by input: player or camera
    #[arg(short, long)]
    target: Option<MovementTarget>,

    /// Distance moved per tick per held binding
    #[arg(long, allow_negative_numbers = true)]
    step: Option<f32>,
}

/// Application state.
struct AppState {
    scene: Scene,
    input: InputState,
    resolver: MovementResolver,
    target: MovementTarget,
}

impl AppState {
    fn new(config: &ControlConfig) -> Self {
        Self {
            scene: Scene::new(SceneLayout::default()),
            input: InputState::new(config.key_map()),
            resolver: MovementResolver::from_config(config),
            target: config.movement_target,
        }
    }

    fn handle_key(&mut self, key: KeyCode, pressed: bool) {
        if let Some(raw) = raw_key_id(key) {
            self.input.set_key(raw, pressed);
        }
    }

    /// One scene tick. Returns true when the target moved.
    fn update(&mut self) -> bool {
        let moving = self
            .scene
            .step(&self.input, &self.resolver, self.target)
            .is_moving;
        // Nothing replays a live session; keep the log from growing.
        self.scene.drain_events();
        moving
    }

    fn title(&self) -> String {
        let p = self.scene.player().position;
        let c = self.scene.camera().position;
        format!(
            "Frontline [{}] player ({:.1}, {:.1}, {:.1}) camera ({:.1}, {:.1}, {:.1})",
            self.target, p.x, p.y, p.z, c.x, c.y, c.z
        )
    }
}

/// Browser-style identifier for a physical key, in the form the key map is
/// written in: the unshifted character for letters and digits, the DOM name
/// for the arrow keys.
///
/// Keyed on the physical key so a release always names the same key as its
/// press, whatever modifiers changed in between.
fn raw_key_id(key: KeyCode) -> Option<&'static str> {
    let id = match key {
        KeyCode::KeyA => "a",
        KeyCode::KeyB => "b",
        KeyCode::KeyC => "c",
        KeyCode::KeyD => "d",
        KeyCode::KeyE => "e",
        KeyCode::KeyF => "f",
        KeyCode::KeyG => "g",
        KeyCode::KeyH => "h",
        KeyCode::KeyI => "i",
        KeyCode::KeyJ => "j",
        KeyCode::KeyK => "k",
        KeyCode::KeyL => "l",
        KeyCode::KeyM => "m",
        KeyCode::KeyN => "n",
        KeyCode::KeyO => "o",
        KeyCode::KeyP => "p",
        KeyCode::KeyQ => "q",
        KeyCode::KeyR => "r",
        KeyCode::KeyS => "s",
        KeyCode::KeyT => "t",
        KeyCode::KeyU => "u",
        KeyCode::KeyV => "v",
        KeyCode::KeyW => "w",
        KeyCode::KeyX => "x",
        KeyCode::KeyY => "y",
        KeyCode::KeyZ => "z",
        KeyCode::Digit0 => "0",
        KeyCode::Digit1 => "1",
        KeyCode::Digit2 => "2",
        KeyCode::Digit3 => "3",
        KeyCode::Digit4 => "4",
        KeyCode::Digit5 => "5",
        KeyCode::Digit6 => "6",
        KeyCode::Digit7 => "7",
        KeyCode::Digit8 => "8",
        KeyCode::Digit9 => "9",
        KeyCode::ArrowUp => "ArrowUp",
        KeyCode::ArrowDown => "ArrowDown",
        KeyCode::ArrowLeft => "ArrowLeft",
        KeyCode::ArrowRight => "ArrowRight",
        KeyCode::Space => " ",
        _ => return None,
    };
    Some(id)
}

struct DesktopApp {
    state: AppState,
    window: Option<Arc<Window>>,
    tick_interval: Duration,
    next_tick: Instant,
}

impl DesktopApp {
    fn new(config: &ControlConfig) -> Self {
        Self {
            state: AppState::new(config),
            window: None,
            tick_interval: Duration::from_secs_f64(1.0 / TICK_RATE),
            next_tick: Instant::now(),
        }
    }
}

impl ApplicationHandler for DesktopApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title(self.state.title())
            .with_inner_size(PhysicalSize::new(1280u32, 720));
        match event_loop.create_window(attrs) {
            Ok(window) => {
                self.window = Some(Arc::new(window));
                self.next_tick = Instant::now();
                tracing::info!("window created");
            }
            Err(e) => {
                tracing::error!("failed to create window: {e}");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Focused(false) => {
                // Key-ups for keys held while unfocused never arrive.
                self.state.input.release_all();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: key_state,
                        ..
                    },
                ..
            } => {
                self.state
                    .handle_key(key, key_state == ElementState::Pressed);
            }
            WindowEvent::RedrawRequested => {
                if let Some(window) = &self.window {
                    window.set_title(&self.state.title());
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        if now >= self.next_tick {
            if self.state.update() {
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            self.next_tick += self.tick_interval;
            // Do not try to catch up after a stall.
            if self.next_tick < now {
                self.next_tick = now + self.tick_interval;
            }
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_tick));
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let mut config = match &cli.config {
        Some(path) => ControlConfig::load(path)?,
        None => ControlConfig::default(),
    };
    if let Some(target) = cli.target {
        config.movement_target = target;
    }
    if let Some(step) = cli.step {
        config.step_size = step;
    }
    config.validate()?;

    tracing::info!(
        movement_target = %config.movement_target,
        step = config.step_size,
        "frontline-desktop starting"
    );

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = DesktopApp::new(&config);
    event_loop.run_app(&mut app)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use frontline_input::KeyBinding;

    #[test]
    fn letter_keys_map_to_lowercase() {
        assert_eq!(raw_key_id(KeyCode::KeyW), Some("w"));
        assert_eq!(raw_key_id(KeyCode::KeyA), Some("a"));
        assert_eq!(raw_key_id(KeyCode::Digit7), Some("7"));
    }

    #[test]
    fn arrow_keys_use_dom_names() {
        assert_eq!(raw_key_id(KeyCode::ArrowLeft), Some("ArrowLeft"));
        assert_eq!(raw_key_id(KeyCode::Escape), None);
        assert_eq!(raw_key_id(KeyCode::ShiftLeft), None);
    }

    #[test]
    fn release_with_shift_held_still_stops_movement() {
        let mut state = AppState::new(&ControlConfig::default());
        state.handle_key(KeyCode::KeyW, true);
        state.handle_key(KeyCode::ShiftLeft, true);
        assert!(state.update());

        state.handle_key(KeyCode::KeyW, false);
        assert!(!state.input.is_active(KeyBinding::MoveForward));
        assert_eq!(state.input.held_keys().count(), 0);
        for _ in 0..3 {
            assert!(!state.update());
        }
    }

    #[test]
    fn key_events_drive_the_configured_target() {
        let config = ControlConfig {
            movement_target: MovementTarget::Camera,
            ..ControlConfig::default()
        };
        let mut state = AppState::new(&config);
        state.handle_key(KeyCode::ArrowUp, true);
        assert!(state.input.is_active(KeyBinding::MoveForward));
        assert!(state.update());
        assert_eq!(state.scene.player().position.z, 0.0);
        assert_eq!(state.scene.camera().position.z, -10.0 + 0.1);

        state.handle_key(KeyCode::ArrowUp, false);
        assert!(!state.update());
        assert!(state.title().contains("[camera]"));
    }

    #[test]
    fn event_log_stays_empty_over_a_long_session() {
        let mut state = AppState::new(&ControlConfig::default());
        state.handle_key(KeyCode::KeyD, true);
        for _ in 0..36_000 {
            state.update();
        }
        assert_eq!(state.scene.tick(), 36_000);
        assert!(state.scene.events().is_empty());
    }
}
