/// Terminal driver for the wireframe projection engine
///
/// Owns the character-cell surface, polls the keyboard once per tick and
/// forwards the current zoom/rotation/spin values to the projection
/// engine, which decides whether anything needs redrawing.
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal,
};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};

use objwire_core::{Direction, Mesh, Projector, Rotation};

pub mod renderer;

pub use renderer::TermSurface;

/// Logical canvas the engine projects onto, in pixels.
const CANVAS_WIDTH: f32 = 840.0;
const CANVAS_HEIGHT: f32 = 560.0;

const MOVE_AMOUNT: f32 = 20.0;
const ROTATE_STEP: f32 = 0.1;
const ZOOM_STEP: f32 = 1.0;
const ZOOM_MIN: f32 = 1.0;
const ZOOM_MAX: f32 = 500.0;

/// Main application struct for terminal wireframe viewing
pub struct App {
    projector: Projector,
    surface: TermSurface,
    mesh_name: String,
    zoom: f32,
    rotation: Rotation,
    spin: bool,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl App {
    pub fn new(mesh: Mesh, mesh_name: impl Into<String>) -> io::Result<Self> {
        let (cols, rows) = terminal::size()?;
        // keep the last row free for the status line
        let surface = TermSurface::new(
            cols as usize,
            rows.saturating_sub(1) as usize,
            CANVAS_WIDTH,
            CANVAS_HEIGHT,
        );

        let mut projector = Projector::new();
        projector.set_mesh(mesh);

        Ok(Self {
            projector,
            surface,
            mesh_name: mesh_name.into(),
            zoom: objwire_core::ViewState::DEFAULT_ZOOM,
            rotation: Rotation::zero(),
            spin: false,
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / 30); // 30 FPS target

        while self.running {
            let frame_start = Instant::now();

            // one batch of input, then exactly one engine tick
            let delta = self.handle_input()?;
            self.tick(delta);
            self.present()?;

            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    /// Drain pending key events; returns the rotation delta the keys
    /// produced this tick, if any.
    fn handle_input(&mut self) -> io::Result<Option<Rotation>> {
        let mut delta: Option<Rotation> = None;
        let nudge = |delta: &mut Option<Rotation>, dx: f32, dy: f32, dz: f32| {
            delta.get_or_insert(Rotation::zero()).rotate(dx, dy, dz);
        };

        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(KeyEvent { code, .. }) = event::read()? {
                match code {
                    KeyCode::Char('q') | KeyCode::Esc => self.running = false,
                    KeyCode::Up => self.projector.move_by(Direction::Up, MOVE_AMOUNT),
                    KeyCode::Down => self.projector.move_by(Direction::Down, MOVE_AMOUNT),
                    KeyCode::Left => self.projector.move_by(Direction::Left, MOVE_AMOUNT),
                    KeyCode::Right => self.projector.move_by(Direction::Right, MOVE_AMOUNT),
                    KeyCode::Char('x') => nudge(&mut delta, ROTATE_STEP, 0.0, 0.0),
                    KeyCode::Char('X') => nudge(&mut delta, -ROTATE_STEP, 0.0, 0.0),
                    KeyCode::Char('y') => nudge(&mut delta, 0.0, ROTATE_STEP, 0.0),
                    KeyCode::Char('Y') => nudge(&mut delta, 0.0, -ROTATE_STEP, 0.0),
                    KeyCode::Char('z') => nudge(&mut delta, 0.0, 0.0, ROTATE_STEP),
                    KeyCode::Char('Z') => nudge(&mut delta, 0.0, 0.0, -ROTATE_STEP),
                    KeyCode::Char('+') | KeyCode::Char('=') => {
                        self.zoom = (self.zoom + ZOOM_STEP).min(ZOOM_MAX);
                    }
                    KeyCode::Char('-') => {
                        self.zoom = (self.zoom - ZOOM_STEP).max(ZOOM_MIN);
                    }
                    KeyCode::Char('p') => self.spin = !self.spin,
                    KeyCode::Char('0') => {
                        self.rotation = Rotation::zero();
                        self.projector.reset_rotation();
                    }
                    _ => {}
                }
            }
        }
        Ok(delta)
    }

    fn tick(&mut self, delta: Option<Rotation>) {
        // without spin the driver holds the absolute angles, like the
        // reference viewer's sliders; with spin the engine accumulates
        // and only key nudges are forwarded as deltas
        let rotation = if self.spin {
            delta
        } else {
            if let Some(delta) = delta {
                self.rotation.rotate(delta.x, delta.y, delta.z);
            }
            Some(self.rotation)
        };
        self.projector
            .render(&mut self.surface, self.zoom, rotation, self.spin);
    }

    fn present(&mut self) -> io::Result<()> {
        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;
        self.surface.present(&mut stdout)?;

        let rotation = self.projector.view().rotation;
        queue!(
            stdout,
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "{} | zoom {:.0} | rot ({:.2}, {:.2}, {:.2}) | spin {} | fps {:.1} | \
                 arrows=pan x/y/z=rotate +/-=zoom p=spin 0=reset q=quit",
                self.mesh_name,
                self.zoom,
                rotation.x,
                rotation.y,
                rotation.z,
                if self.spin { "on" } else { "off" },
                self.fps
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}
