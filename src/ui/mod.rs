use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoopProxy};
use winit::window::WindowId;

use crate::error::ViewerError;
use crate::files::PathList;
use crate::loader::ImageRsLoader;
use crate::ui::canvas::{SoftbufferCanvas, WindowSettings};
use crate::ui::event::{dispatch, resume, suspend, LoopState, UserEvent, ViewerEvent};
use crate::ui::session::ViewerSession;

pub mod canvas;
pub mod event;
pub mod render;
pub mod session;

// ---------------------------------------------------------------------------
// Application handler (winit 0.30 style)
// ---------------------------------------------------------------------------

/// Bridges winit callbacks to the viewer's event dispatch. The session is
/// built on the first `resumed`, when a window can be created.
pub struct App {
    settings: WindowSettings,
    pending: Option<PathList>,
    session: Option<ViewerSession<SoftbufferCanvas, ImageRsLoader>>,
    proxy: EventLoopProxy<UserEvent>,
    error: Option<ViewerError>,
}

impl App {
    pub fn new(paths: PathList, settings: WindowSettings, proxy: EventLoopProxy<UserEvent>) -> Self {
        Self {
            settings,
            pending: Some(paths),
            session: None,
            proxy,
            error: None,
        }
    }

    /// The setup failure that stopped the loop, if any.
    pub fn into_result(self) -> Result<(), ViewerError> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn handle(&mut self, event_loop: &ActiveEventLoop, event: ViewerEvent) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if dispatch(session, event, &self.proxy) == LoopState::Stopped {
            log::info!("quit");
            event_loop.exit();
        }
    }
}

impl ApplicationHandler<UserEvent> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Wait);

        if let Some(session) = self.session.as_mut() {
            if resume(session, &self.proxy) == LoopState::Stopped {
                event_loop.exit();
            }
            return;
        }

        let Some(paths) = self.pending.take() else {
            return;
        };
        match SoftbufferCanvas::new(event_loop, &self.settings) {
            Ok(canvas) => {
                let mut session = ViewerSession::new(paths, canvas, ImageRsLoader, self.settings.background);
                session.show();
                self.session = Some(session);
            }
            Err(e) => {
                self.error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn suspended(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(session) = self.session.as_mut() {
            suspend(session);
        }
    }

    fn user_event(&mut self, event_loop: &ActiveEventLoop, event: UserEvent) {
        match event {
            UserEvent::Quit => self.handle(event_loop, ViewerEvent::Quit),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        self.handle(event_loop, ViewerEvent::from_window_event(&event));
    }
}
