//! Test doubles shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use crate::error::RenderError;
use crate::loader::{DecodedImage, ImageLoader};
use crate::ui::canvas::{Canvas, Renderable};
use crate::ui::event::{dispatch, LoopState, QuitSignal, ViewerEvent};
use crate::ui::render::{Color, Rect};
use crate::ui::session::ViewerSession;

/// Write a solid grey PNG of the given size and return its path.
pub fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    image::RgbaImage::from_pixel(width, height, image::Rgba([128, 128, 128, 255]))
        .save(&path)
        .expect("write test png");
    path
}

#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    SetDrawColor(Color),
    Upload { size: (u32, u32) },
    Clear,
    FillRect(Option<Rect>),
    Copy { size: (u32, u32), dst: Rect },
    Present,
    ReleaseSurface,
    RecreateSurface,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailPoint {
    Upload,
    Clear,
    Fill,
    Copy,
    Present,
    Recreate,
}

#[derive(Debug)]
pub struct FakeTexture {
    width: u32,
    height: u32,
}

impl Renderable for FakeTexture {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// Canvas that records every successful call instead of drawing.
#[derive(Debug)]
pub struct RecordingCanvas {
    pub ops: Vec<Op>,
    pub output: (u32, u32),
    pub fail_at: Option<FailPoint>,
    pub visible: bool,
    pub title: String,
    /// False between `release_surface` and a successful `recreate_surface`.
    pub attached: bool,
}

impl RecordingCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            ops: Vec::new(),
            output: (width, height),
            fail_at: None,
            visible: false,
            title: String::new(),
            attached: true,
        }
    }

    fn check(&self, point: FailPoint) -> Result<(), RenderError> {
        if self.fail_at == Some(point) {
            Err(RenderError::SurfaceLost)
        } else {
            Ok(())
        }
    }

    /// Drawing ops from the most recent `Clear` onwards.
    pub fn last_frame(&self) -> Vec<Op> {
        let start = self.ops.iter().rposition(|op| *op == Op::Clear).unwrap_or(self.ops.len());
        self.ops[start..].to_vec()
    }

    pub fn presents(&self) -> usize {
        self.ops.iter().filter(|op| **op == Op::Present).count()
    }

    pub fn uploads(&self) -> usize {
        self.ops.iter().filter(|op| matches!(op, Op::Upload { .. })).count()
    }

    /// Source sizes of every image drawn, in order.
    pub fn copied_sizes(&self) -> Vec<(u32, u32)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Copy { size, .. } => Some(*size),
                _ => None,
            })
            .collect()
    }
}

impl Canvas for RecordingCanvas {
    type Texture = FakeTexture;

    fn set_draw_color(&mut self, color: Color) {
        self.ops.push(Op::SetDrawColor(color));
    }

    fn clear(&mut self) -> Result<(), RenderError> {
        if !self.attached {
            return Err(RenderError::SurfaceLost);
        }
        self.check(FailPoint::Clear)?;
        self.ops.push(Op::Clear);
        Ok(())
    }

    fn fill_rect(&mut self, rect: Option<Rect>) -> Result<(), RenderError> {
        self.check(FailPoint::Fill)?;
        self.ops.push(Op::FillRect(rect));
        Ok(())
    }

    fn copy(&mut self, texture: &FakeTexture, dst: Rect) -> Result<(), RenderError> {
        self.check(FailPoint::Copy)?;
        self.ops.push(Op::Copy { size: texture.size(), dst });
        Ok(())
    }

    fn present(&mut self) -> Result<(), RenderError> {
        self.check(FailPoint::Present)?;
        self.ops.push(Op::Present);
        Ok(())
    }

    fn output_size(&self) -> Result<(u32, u32), RenderError> {
        Ok(self.output)
    }

    fn create_texture(&mut self, image: DecodedImage) -> Result<FakeTexture, RenderError> {
        self.check(FailPoint::Upload)?;
        self.ops.push(Op::Upload { size: (image.width, image.height) });
        Ok(FakeTexture {
            width: image.width,
            height: image.height,
        })
    }

    fn show(&mut self) {
        self.visible = true;
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn release_surface(&mut self) {
        self.attached = false;
        self.ops.push(Op::ReleaseSurface);
    }

    fn recreate_surface(&mut self) -> Result<(), RenderError> {
        self.check(FailPoint::Recreate)?;
        self.attached = true;
        self.ops.push(Op::RecreateSurface);
        Ok(())
    }
}

/// In-memory event queue standing in for the platform one. Posting a quit
/// appends to the back, like a real event loop proxy.
#[derive(Debug, Default)]
pub struct ScriptedEvents {
    queue: RefCell<VecDeque<ViewerEvent>>,
}

impl ScriptedEvents {
    pub fn new(events: impl IntoIterator<Item = ViewerEvent>) -> Self {
        Self {
            queue: RefCell::new(events.into_iter().collect()),
        }
    }

    pub fn push(&self, event: ViewerEvent) {
        self.queue.borrow_mut().push_back(event);
    }

    /// Dispatch the next queued event, `None` when the queue is empty.
    pub fn pump<C: Canvas, L: ImageLoader>(&self, session: &mut ViewerSession<C, L>) -> Option<LoopState> {
        let event = self.queue.borrow_mut().pop_front()?;
        Some(dispatch(session, event, self))
    }

    /// Pump until stopped or drained; returns the final state and how many
    /// events were handled.
    pub fn run<C: Canvas, L: ImageLoader>(&self, session: &mut ViewerSession<C, L>) -> (LoopState, usize) {
        let mut handled = 0;
        while let Some(state) = self.pump(session) {
            handled += 1;
            if state == LoopState::Stopped {
                return (LoopState::Stopped, handled);
            }
        }
        (LoopState::Running, handled)
    }
}

impl QuitSignal for ScriptedEvents {
    fn post_quit(&self) {
        self.push(ViewerEvent::Quit);
    }
}
