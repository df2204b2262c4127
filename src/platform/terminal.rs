//! Terminal front end
//!
//! Draws the arena as coloured cells with crossterm. Each sprite is reduced
//! to its average opaque colour and scaled from arena pixels to cells.
//!
//! Input model: held keys are tracked by the time of their last press or
//! repeat event. Terminals with the keyboard-enhancement protocol report
//! releases and keys are dropped on release; elsewhere a key expires after
//! `HOLD_WINDOW` without a repeat.

use std::collections::HashMap;
use std::io::{BufWriter, Stdout, Write, stdout};
use std::path::Path;
use std::time::{Duration, Instant};

use crossterm::{
    ExecutableCommand, QueueableCommand, cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::{self, Color, Print},
    terminal,
};
use glam::IVec2;

use super::{Clock, InputSource, InputState, Platform, Renderer, Rgb};
use crate::error::{LoadError, PlatformError};
use crate::graphics::ImageHandle;

/// A key without a repeat for this long counts as released.
/// OS key repeat runs at 15 Hz or faster, so this spans at least two repeats.
const HOLD_WINDOW: Duration = Duration::from_millis(150);

/// Sprite reduced to what a cell can show
#[derive(Debug, Clone, Copy)]
struct CellSprite {
    size: IVec2,
    color: Rgb,
}

pub struct TerminalPlatform {
    out: BufWriter<Stdout>,
    arena: IVec2,
    cols: u16,
    rows: u16,
    cells: Vec<Rgb>,
    sprites: Vec<CellSprite>,
    /// Key → time of last press/repeat
    held: HashMap<KeyCode, Instant>,
    quit_requested: bool,
    keyboard_enhanced: bool,
    active: bool,
    started: Instant,
    last_frame: Instant,
}

impl TerminalPlatform {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            out: BufWriter::new(stdout()),
            arena: IVec2::ONE,
            cols: 0,
            rows: 0,
            cells: Vec::new(),
            sprites: Vec::new(),
            held: HashMap::new(),
            quit_requested: false,
            keyboard_enhanced: false,
            active: false,
            started: now,
            last_frame: now,
        }
    }

    /// Arena pixel → cell coordinate along one axis
    fn to_cell(pixel: i32, arena: i32, cells: u16) -> i64 {
        i64::from(pixel) * i64::from(cells) / i64::from(arena.max(1))
    }

    fn is_held(&self, keys: &[KeyCode], now: Instant) -> bool {
        keys.iter().any(|key| {
            self.held
                .get(key)
                .is_some_and(|&seen| self.keyboard_enhanced || now - seen <= HOLD_WINDOW)
        })
    }

    fn handle_key(&mut self, key: KeyEvent) {
        let code = fold_case(key.code);
        match key.kind {
            KeyEventKind::Press => {
                let ctrl_c =
                    code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL);
                if ctrl_c || matches!(code, KeyCode::Esc | KeyCode::Char('q')) {
                    self.quit_requested = true;
                }
                self.held.insert(code, Instant::now());
            }
            KeyEventKind::Repeat => {
                self.held.insert(code, Instant::now());
            }
            KeyEventKind::Release => {
                self.held.remove(&code);
            }
        }
    }
}

impl Default for TerminalPlatform {
    fn default() -> Self {
        Self::new()
    }
}

/// Shift and caps lock must not change which action a letter maps to
fn fold_case(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

/// Mean colour of the mostly opaque pixels (white if there are none)
fn average_color(image: &image::RgbaImage) -> Rgb {
    let (mut r, mut g, mut b, mut n) = (0u64, 0u64, 0u64, 0u64);
    for pixel in image.pixels() {
        let [pr, pg, pb, pa] = pixel.0;
        if pa > 127 {
            r += u64::from(pr);
            g += u64::from(pg);
            b += u64::from(pb);
            n += 1;
        }
    }
    if n == 0 {
        return [255, 255, 255];
    }
    [(r / n) as u8, (g / n) as u8, (b / n) as u8]
}

impl Renderer for TerminalPlatform {
    fn load_image(&mut self, path: &Path) -> Result<ImageHandle, LoadError> {
        let decoded = image::open(path).map_err(|err| match err {
            image::ImageError::IoError(source) => LoadError::Io {
                path: path.to_path_buf(),
                source,
            },
            other => LoadError::Decode {
                path: path.to_path_buf(),
                reason: other.to_string(),
            },
        })?;
        let rgba = decoded.to_rgba8();
        let size = IVec2::new(rgba.width() as i32, rgba.height() as i32);

        let id = self.sprites.len() as u32;
        self.sprites.push(CellSprite {
            size,
            color: average_color(&rgba),
        });
        log::info!("Loaded {} ({}x{})", path.display(), size.x, size.y);
        Ok(ImageHandle { id, size })
    }

    fn clear(&mut self, color: Rgb) {
        self.cells.fill(color);
    }

    fn blit(&mut self, image: &ImageHandle, position: IVec2) {
        let Some(sprite) = self.sprites.get(image.id as usize).copied() else {
            log::warn!("Blit of unknown image {}", image.id);
            return;
        };
        let (cols, rows) = (i64::from(self.cols), i64::from(self.rows));

        let x0 = Self::to_cell(position.x, self.arena.x, self.cols);
        let y0 = Self::to_cell(position.y, self.arena.y, self.rows);
        // Every sprite covers at least one cell
        let x1 = Self::to_cell(position.x + sprite.size.x, self.arena.x, self.cols).max(x0 + 1);
        let y1 = Self::to_cell(position.y + sprite.size.y, self.arena.y, self.rows).max(y0 + 1);

        for y in y0.max(0)..y1.min(rows) {
            for x in x0.max(0)..x1.min(cols) {
                self.cells[(y * cols + x) as usize] = sprite.color;
            }
        }
    }

    fn present(&mut self) -> Result<(), PlatformError> {
        let cols = usize::from(self.cols);
        let mut current: Option<Rgb> = None;

        for (row, line) in self.cells.chunks(cols.max(1)).enumerate() {
            self.out.queue(cursor::MoveTo(0, row as u16))?;
            for &color in line {
                if current != Some(color) {
                    let [r, g, b] = color;
                    self.out
                        .queue(style::SetBackgroundColor(Color::Rgb { r, g, b }))?;
                    current = Some(color);
                }
                self.out.queue(Print(' '))?;
            }
        }
        self.out.queue(style::ResetColor)?;
        self.out.flush()?;
        Ok(())
    }
}

impl InputSource for TerminalPlatform {
    fn poll_input(&mut self) -> Result<InputState, PlatformError> {
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) => self.handle_key(key),
                Event::Resize(cols, rows) => {
                    self.cols = cols;
                    self.rows = rows;
                    self.cells = vec![[0, 0, 0]; usize::from(cols) * usize::from(rows)];
                }
                Event::FocusLost => self.held.clear(),
                _ => {}
            }
        }

        let now = Instant::now();
        Ok(InputState {
            up: self.is_held(&[KeyCode::Up, KeyCode::Char('w')], now),
            down: self.is_held(&[KeyCode::Down, KeyCode::Char('s')], now),
            left: self.is_held(&[KeyCode::Left, KeyCode::Char('a')], now),
            right: self.is_held(&[KeyCode::Right, KeyCode::Char('d')], now),
            fire: self.is_held(&[KeyCode::Char(' ')], now),
            quit: self.quit_requested,
        })
    }
}

impl Clock for TerminalPlatform {
    fn now_millis(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }

    fn throttle_to_fps(&mut self, fps: u32) {
        let frame = Duration::from_secs(1) / fps.max(1);
        let elapsed = self.last_frame.elapsed();
        if elapsed < frame {
            std::thread::sleep(frame - elapsed);
        }
        self.last_frame = Instant::now();
    }
}

impl Platform for TerminalPlatform {
    fn init(&mut self, title: &str, size: IVec2) -> Result<(), PlatformError> {
        self.arena = size.max(IVec2::ONE);

        terminal::enable_raw_mode()?;
        self.active = true;
        self.out.execute(terminal::EnterAlternateScreen)?;
        self.out.execute(terminal::SetTitle(title))?;
        self.out.execute(cursor::Hide)?;

        // Ghostty / kitty-protocol terminals report releases; others refuse
        self.keyboard_enhanced = self
            .out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();

        let (cols, rows) = terminal::size()?;
        self.cols = cols;
        self.rows = rows;
        self.cells = vec![[0, 0, 0]; usize::from(cols) * usize::from(rows)];

        log::info!(
            "Terminal {}x{} cells for {}x{} arena (key release events: {})",
            cols,
            rows,
            size.x,
            size.y,
            self.keyboard_enhanced
        );
        Ok(())
    }

    fn teardown(&mut self) -> Result<(), PlatformError> {
        if !self.active {
            return Ok(());
        }
        self.active = false;

        if self.keyboard_enhanced {
            let _ = self.out.execute(PopKeyboardEnhancementFlags);
        }
        let _ = self.out.execute(style::ResetColor);
        let _ = self.out.execute(cursor::Show);
        let _ = self.out.execute(terminal::LeaveAlternateScreen);
        terminal::disable_raw_mode()?;
        Ok(())
    }
}
