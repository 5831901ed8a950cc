use winit::event::{ElementState, WindowEvent};
use winit::event_loop::EventLoopProxy;
use winit::keyboard::{Key, NamedKey};

use crate::loader::ImageLoader;
use crate::ui::canvas::Canvas;
use crate::ui::session::{Direction, ViewerSession};

/// Events posted to the event loop by the viewer itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserEvent {
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Next,
    Previous,
    Quit,
}

impl Command {
    pub fn from_key(key: &Key) -> Option<Self> {
        match key {
            Key::Named(NamedKey::ArrowRight | NamedKey::Space) => Some(Self::Next),
            Key::Named(NamedKey::ArrowLeft) => Some(Self::Previous),
            Key::Named(NamedKey::Escape) => Some(Self::Quit),
            Key::Character(s) => match s.to_lowercase().as_str() {
                "n" | "l" => Some(Self::Next),
                "p" | "h" => Some(Self::Previous),
                "q" => Some(Self::Quit),
                _ => None,
            },
            _ => None,
        }
    }
}

/// What the viewer reacts to, independent of the windowing backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerEvent {
    KeyReleased(Command),
    /// The render target was lost and recreated.
    RenderTargetReset,
    Exposed,
    Resized { width: u32, height: u32 },
    CloseRequested,
    Quit,
    Ignored,
}

impl ViewerEvent {
    /// Keys act on release; presses and auto-repeat are ignored.
    pub fn from_key(key: &Key, state: ElementState, repeat: bool) -> Self {
        if state != ElementState::Released || repeat {
            return Self::Ignored;
        }
        Command::from_key(key).map_or(Self::Ignored, Self::KeyReleased)
    }

    pub fn from_window_event(event: &WindowEvent) -> Self {
        match event {
            WindowEvent::CloseRequested => Self::CloseRequested,
            WindowEvent::Resized(size) => Self::Resized {
                width: size.width,
                height: size.height,
            },
            WindowEvent::RedrawRequested => Self::Exposed,
            WindowEvent::KeyboardInput { event, .. } => {
                Self::from_key(&event.logical_key, event.state, event.repeat)
            }
            _ => Self::Ignored,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Stopped,
}

/// Queues a quit request behind whatever events are already pending.
pub trait QuitSignal {
    fn post_quit(&self);
}

impl QuitSignal for EventLoopProxy<UserEvent> {
    fn post_quit(&self) {
        if let Err(e) = self.send_event(UserEvent::Quit) {
            log::error!("could not post quit event: {}", e);
        }
    }
}

/// Handle one event to completion.
pub fn dispatch<C, L, Q>(session: &mut ViewerSession<C, L>, event: ViewerEvent, quit: &Q) -> LoopState
where
    C: Canvas,
    L: ImageLoader,
    Q: QuitSignal + ?Sized,
{
    match event {
        ViewerEvent::KeyReleased(Command::Next) => session.advance(Direction::Forward),
        ViewerEvent::KeyReleased(Command::Previous) => session.advance(Direction::Backward),
        ViewerEvent::KeyReleased(Command::Quit) | ViewerEvent::CloseRequested => quit.post_quit(),
        ViewerEvent::RenderTargetReset => {
            session.invalidate();
            session.render();
        }
        ViewerEvent::Exposed => session.render(),
        ViewerEvent::Resized { width, height } => {
            log::debug!("resized to {}x{}", width, height);
            session.render();
        }
        ViewerEvent::Quit => return LoopState::Stopped,
        ViewerEvent::Ignored => {}
    }
    LoopState::Running
}

/// The platform took the surface away (suspend).
pub fn suspend<C: Canvas, L: ImageLoader>(session: &mut ViewerSession<C, L>) {
    log::debug!("suspended, releasing render surface");
    session.canvas_mut().release_surface();
}

/// Back from suspension: rebuild the surface, then treat it as a render
/// target reset. If the surface cannot be rebuilt, drawing keeps failing
/// until the next resume.
pub fn resume<C, L, Q>(session: &mut ViewerSession<C, L>, quit: &Q) -> LoopState
where
    C: Canvas,
    L: ImageLoader,
    Q: QuitSignal + ?Sized,
{
    match session.canvas_mut().recreate_surface() {
        Ok(()) => dispatch(session, ViewerEvent::RenderTargetReset, quit),
        Err(e) => {
            log::error!("could not recreate render surface: {}", e);
            LoopState::Running
        }
    }
}
