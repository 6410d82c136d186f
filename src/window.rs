//! Window frontend: owns the `winit` event loop and drives one generation per redraw.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use quadlife::{GameOfLife, Layout};
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::render::{Camera, CellRenderer, Gpu, GpuInit, SurfaceErrorAction};
use crate::stats::Stats;

/// Window configuration.
#[derive(Debug, Clone)]
pub struct WindowConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    pub gpu: GpuInit,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "quadlife".to_string(),
            initial_size: LogicalSize::new(1000.0, 900.0),
            gpu: GpuInit::default(),
        }
    }
}

/// Loop limits shared with the console frontend.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunLimits {
    /// Stop after this many generations; `None` runs until quit.
    pub generations: Option<u64>,
    /// Pause after every generation.
    pub sleep: Option<Duration>,
}

impl RunLimits {
    pub fn is_done(&self, game: &GameOfLife) -> bool {
        self.generations.is_some_and(|max| game.generation() >= max)
    }
}

/// Opens the window and runs until Enter is pressed, the window is closed or
/// the generation limit is reached.
pub fn run(config: WindowConfig, game: GameOfLife, limits: RunLimits) -> Result<()> {
    let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
    let mut app = App::new(config, game, limits);

    event_loop
        .run_app(&mut app)
        .context("winit event loop terminated with error")?;

    match app.error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

struct Scene {
    // dropped before the window
    cells: CellRenderer,
    gpu: Gpu,
    window: Arc<Window>,
}

struct App {
    config: WindowConfig,
    limits: RunLimits,
    game: GameOfLife,
    layout: Layout,
    camera: Camera,
    stats: Stats,
    scene: Option<Scene>,
    error: Option<anyhow::Error>,
}

impl App {
    fn new(config: WindowConfig, game: GameOfLife, limits: RunLimits) -> Self {
        let size = game.grid().size();
        let stats = Stats::new(game.alive_count());
        Self {
            config,
            limits,
            game,
            layout: Layout::new(size),
            camera: Camera::for_grid(size),
            stats,
            scene: None,
            error: None,
        }
    }

    fn create_scene(&self, event_loop: &ActiveEventLoop) -> Result<Scene> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size)
            .with_resizable(true);

        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("failed to create window")?,
        );

        let gpu = pollster::block_on(Gpu::new(window.clone(), self.config.gpu.clone()))
            .context("GPU initialization failed")?;
        let cells = CellRenderer::new(&gpu, self.layout.size() * self.layout.size());

        Ok(Scene { cells, gpu, window })
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.error = Some(err);
        event_loop.exit();
    }

    /// Draws the next generation. The game only advances once a surface
    /// texture has been acquired.
    fn frame(&mut self) -> Result<()> {
        let Some(scene) = self.scene.as_mut() else {
            return Ok(());
        };

        let mut frame = match scene.gpu.begin_frame() {
            Ok(frame) => frame,
            Err(err) => {
                return match scene.gpu.handle_surface_error(err.clone()) {
                    SurfaceErrorAction::Fatal => Err(err).context("surface lost for good"),
                    action => {
                        log::warn!("skipping frame after surface error: {err} ({action:?})");
                        Ok(())
                    }
                };
            }
        };

        self.game.next_generation();
        self.stats.record(self.game.alive_count());
        self.stats.log_if_due();

        let size = scene.gpu.size();
        let view_proj = self.camera.view_proj(size.width, size.height);
        scene
            .cells
            .prepare(scene.gpu.queue(), view_proj, self.game.grid(), &self.layout);

        scene.cells.draw(&mut frame.encoder, &frame.view);
        scene.window.pre_present_notify();
        scene.gpu.submit(frame);

        if let Some(sleep) = self.limits.sleep {
            std::thread::sleep(sleep);
        }
        Ok(())
    }

    fn is_minimized(&self) -> bool {
        self.scene
            .as_ref()
            .is_some_and(|scene| is_zero_sized(scene.gpu.size()))
    }
}

fn is_zero_sized(size: PhysicalSize<u32>) -> bool {
    size.width == 0 || size.height == 0
}

/// What a redraw does with the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FrameAction {
    /// The generation limit is reached.
    Exit,
    /// Nothing can be presented; the game is left as is.
    Idle,
    /// Advance one generation and draw it.
    Advance,
}

fn frame_action(limits: &RunLimits, game: &GameOfLife, size: PhysicalSize<u32>) -> FrameAction {
    if limits.is_done(game) {
        FrameAction::Exit
    } else if is_zero_sized(size) {
        FrameAction::Idle
    } else {
        FrameAction::Advance
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.scene.is_some() {
            return;
        }

        match self.create_scene(event_loop) {
            Ok(scene) => {
                scene.window.request_redraw();
                self.scene = Some(scene);
            }
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        // continuous redraw, one generation per frame
        event_loop.set_control_flow(ControlFlow::Wait);
        if self.limits.is_done(&self.game) {
            event_loop.exit();
            return;
        }
        if self.is_minimized() {
            // Resized wakes the loop up again
            return;
        }
        if let Some(scene) = &self.scene {
            scene.window.request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Enter),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                log::info!("quit after {} generations", self.game.generation());
                event_loop.exit();
            }

            WindowEvent::Resized(new_size) => {
                if let Some(scene) = self.scene.as_mut() {
                    scene.gpu.resize(new_size);
                    scene.window.request_redraw();
                }
            }

            WindowEvent::RedrawRequested => {
                let Some(size) = self.scene.as_ref().map(|scene| scene.gpu.size()) else {
                    return;
                };
                match frame_action(&self.limits, &self.game, size) {
                    FrameAction::Exit => {
                        log::info!("reached {} generations", self.game.generation());
                        event_loop.exit();
                    }
                    FrameAction::Idle => {}
                    FrameAction::Advance => {
                        if let Err(err) = self.frame() {
                            self.fail(event_loop, err);
                        }
                    }
                }
            }

            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quadlife::{Grid, UpdateMode};

    #[test]
    fn limits_stop_at_generation_count() {
        let mut game = GameOfLife::new(Grid::new(4), UpdateMode::Buffered);
        let limits = RunLimits {
            generations: Some(2),
            sleep: None,
        };

        assert!(!limits.is_done(&game));
        game.next_generation();
        assert!(!limits.is_done(&game));
        game.next_generation();
        assert!(limits.is_done(&game));
    }

    #[test]
    fn unlimited_never_done() {
        let mut game = GameOfLife::new(Grid::new(4), UpdateMode::Legacy);
        for _ in 0..10 {
            game.next_generation();
        }

        assert!(!RunLimits::default().is_done(&game));
    }

    /// Runs redraws the way the event loop does and returns how many
    /// generations were computed before exit.
    fn redraw_until_exit(limits: RunLimits, sizes: &[PhysicalSize<u32>]) -> u64 {
        let mut game = GameOfLife::new(Grid::new(4), UpdateMode::Buffered);
        for &size in sizes.iter().cycle().take(100) {
            match frame_action(&limits, &game, size) {
                FrameAction::Exit => break,
                FrameAction::Idle => {}
                FrameAction::Advance => game.next_generation(),
            }
        }
        game.generation()
    }

    #[test]
    fn zero_generations_never_advance() {
        let limits = RunLimits {
            generations: Some(0),
            sleep: None,
        };

        assert_eq!(redraw_until_exit(limits, &[PhysicalSize::new(1000, 900)]), 0);
    }

    #[test]
    fn redraws_stop_at_generation_count() {
        let limits = RunLimits {
            generations: Some(3),
            sleep: None,
        };

        assert_eq!(redraw_until_exit(limits, &[PhysicalSize::new(1000, 900)]), 3);
    }

    #[test]
    fn minimized_window_does_not_advance() {
        let game = GameOfLife::new(Grid::new(4), UpdateMode::Buffered);
        let limits = RunLimits::default();

        let zero_sized = [
            PhysicalSize::new(0, 0),
            PhysicalSize::new(0, 900),
            PhysicalSize::new(1000, 0),
        ];
        for size in zero_sized {
            assert_eq!(frame_action(&limits, &game, size), FrameAction::Idle);
        }
        // only every other redraw has a surface to draw into
        let sizes = [PhysicalSize::new(0, 0), PhysicalSize::new(800, 600)];
        assert_eq!(redraw_until_exit(limits, &sizes), 50);
    }

    #[test]
    fn limit_wins_over_minimized() {
        let game = GameOfLife::new(Grid::new(4), UpdateMode::Buffered);
        let limits = RunLimits {
            generations: Some(0),
            sleep: None,
        };

        assert_eq!(
            frame_action(&limits, &game, PhysicalSize::new(0, 0)),
            FrameAction::Exit
        );
    }
}
