use crate::context::Context;

/// What the loop should do after a view's frame.
pub enum ViewAction {
    /// Keep the current view and present the frame.
    Continue,
    /// End the run after this tick.
    Terminate,
    /// Dispose of the current view and make this one active.
    Replace(Box<dyn View>),
}

impl std::fmt::Debug for ViewAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewAction::Continue => f.write_str("Continue"),
            ViewAction::Terminate => f.write_str("Terminate"),
            ViewAction::Replace(v) => write!(f, "Replace({})", v.name()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuitResponse {
    Accept,
    Ignore,
}

/// One screen of the application.
///
/// Views are built by their owner before being installed, so anything that can
/// fail (missing assets and the like) is dealt with at construction time.
/// Frame calls cannot fail.
pub trait View {
    fn name(&self) -> &str {
        "view"
    }

    fn render(&mut self, ctx: &mut Context, elapsed: f64) -> ViewAction;

    /// Asked first on a tick that carries a quit request. `Accept` ends the run
    /// without rendering; `Ignore` lets `render` proceed as usual.
    fn on_quit_request(&mut self, _ctx: &mut Context) -> QuitResponse {
        QuitResponse::Accept
    }

    /// Called right before the view is dropped, whether it was replaced or the
    /// run ended.
    fn on_dispose(&mut self, _ctx: &mut Context) {}
}
