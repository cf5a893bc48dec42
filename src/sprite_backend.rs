//! Crossterm backend that overlays kitty graphics after each cell flush.

use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use crossterm::{cursor::MoveTo, queue, style::Print};
use ratatui::backend::{Backend, ClearType, CrosstermBackend, WindowSize};
use ratatui::buffer::Cell;
use ratatui::layout::{Position, Size};

const DELETE_ALL_PLACEMENTS: &str = "\x1b_Ga=d,d=a,q=2\x1b\\";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Placement {
    pub x: u16,
    pub y: u16,
    pub sequence: String,
}

/// The portrait currently placed on screen, if any.
#[derive(Default, Debug, Clone)]
pub struct SpriteRegistry {
    placement: Option<Placement>,
}

impl SpriteRegistry {
    pub fn show(&mut self, placement: Placement) {
        self.placement = Some(placement);
    }

    pub fn clear(&mut self) {
        self.placement = None;
    }

    pub fn placement(&self) -> Option<&Placement> {
        self.placement.as_ref()
    }
}

static REGISTRY: OnceLock<Arc<Mutex<SpriteRegistry>>> = OnceLock::new();

pub fn sprite_registry() -> Arc<Mutex<SpriteRegistry>> {
    REGISTRY
        .get_or_init(|| Arc::new(Mutex::new(SpriteRegistry::default())))
        .clone()
}

fn lock(registry: &Mutex<SpriteRegistry>) -> MutexGuard<'_, SpriteRegistry> {
    registry.lock().unwrap_or_else(PoisonError::into_inner)
}

pub fn show_sprite(x: u16, y: u16, sequence: String) {
    let registry = sprite_registry();
    lock(&registry).show(Placement { x, y, sequence });
}

pub fn clear_sprites() {
    let registry = sprite_registry();
    lock(&registry).clear();
}

#[derive(Debug, Clone)]
pub struct SpriteBackend<W: Write> {
    inner: CrosstermBackend<W>,
    registry: Arc<Mutex<SpriteRegistry>>,
    had_sprite: bool,
}

impl<W: Write> SpriteBackend<W> {
    pub fn new(writer: W, registry: Arc<Mutex<SpriteRegistry>>) -> Self {
        Self {
            inner: CrosstermBackend::new(writer),
            registry,
            had_sprite: false,
        }
    }
}

impl<W: Write> Backend for SpriteBackend<W> {
    fn draw<'a, I>(&mut self, content: I) -> io::Result<()>
    where
        I: Iterator<Item = (u16, u16, &'a Cell)>,
    {
        self.inner.draw(content)?;
        let placement = lock(&self.registry).placement().cloned();
        if self.had_sprite {
            queue!(self.inner, Print(DELETE_ALL_PLACEMENTS))?;
        }
        self.had_sprite = placement.is_some();
        if let Some(Placement { x, y, sequence }) = placement {
            queue!(self.inner, MoveTo(x, y), Print(sequence))?;
        }
        Ok(())
    }

    fn append_lines(&mut self, n: u16) -> io::Result<()> {
        self.inner.append_lines(n)
    }

    fn hide_cursor(&mut self) -> io::Result<()> {
        self.inner.hide_cursor()
    }

    fn show_cursor(&mut self) -> io::Result<()> {
        self.inner.show_cursor()
    }

    fn get_cursor_position(&mut self) -> io::Result<Position> {
        self.inner.get_cursor_position()
    }

    fn set_cursor_position<P: Into<Position>>(&mut self, position: P) -> io::Result<()> {
        self.inner.set_cursor_position(position)
    }

    fn clear(&mut self) -> io::Result<()> {
        self.inner.clear()
    }

    fn clear_region(&mut self, clear_type: ClearType) -> io::Result<()> {
        self.inner.clear_region(clear_type)
    }

    fn size(&self) -> io::Result<Size> {
        self.inner.size()
    }

    fn window_size(&mut self) -> io::Result<WindowSize> {
        self.inner.window_size()
    }

    fn flush(&mut self) -> io::Result<()> {
        Backend::flush(&mut self.inner)
    }
}

impl<W: Write> Write for SpriteBackend<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Write::flush(&mut self.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_keeps_only_latest_placement() {
        let mut registry = SpriteRegistry::default();
        registry.show(Placement {
            x: 1,
            y: 2,
            sequence: "a".into(),
        });
        registry.show(Placement {
            x: 3,
            y: 4,
            sequence: "b".into(),
        });
        assert_eq!(registry.placement().map(|p| (p.x, p.y)), Some((3, 4)));
        registry.clear();
        assert!(registry.placement().is_none());
    }

    #[test]
    fn draw_emits_sequence_then_deletes_on_clear() {
        let registry = Arc::new(Mutex::new(SpriteRegistry::default()));
        let mut backend = SpriteBackend::new(Vec::<u8>::new(), Arc::clone(&registry));
        lock(&registry).show(Placement {
            x: 0,
            y: 0,
            sequence: "PORTRAIT".into(),
        });
        backend.draw(std::iter::empty()).expect("draw");
        lock(&registry).clear();
        backend.draw(std::iter::empty()).expect("draw");
        Write::flush(&mut backend).expect("flush");

        let written = String::from_utf8(backend.inner.writer().clone()).expect("utf8");
        let shown = written.find("PORTRAIT").expect("sequence written");
        let deleted = written.find(DELETE_ALL_PLACEMENTS).expect("delete written");
        assert!(shown < deleted);
    }
}
