use std::mem;

use log::{debug, info};

use crate::{
    context::Context,
    view::{QuitResponse, View, ViewAction},
};

pub enum MachineState {
    Running(Box<dyn View>),
    Terminated,
}

/// Outcome of one [`ViewMachine::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    Replaced,
    Terminated,
}

/// Owns the single active view and applies its control signals.
pub struct ViewMachine {
    state: MachineState,
    replacements: u64,
}

impl ViewMachine {
    pub fn new(initial: Box<dyn View>) -> Self {
        info!(target: "phi::machine", "initial view '{}'", initial.name());
        Self {
            state: MachineState::Running(initial),
            replacements: 0,
        }
    }

    /// Runs one tick against the snapshot already stored in `ctx`.
    pub fn step(&mut self, ctx: &mut Context, elapsed: f64) -> Step {
        let action = {
            let MachineState::Running(view) = &mut self.state else {
                return Step::Terminated;
            };

            if ctx.input().quit_requested() {
                match view.on_quit_request(ctx) {
                    QuitResponse::Accept => {
                        info!(target: "phi::machine", "quit requested, '{}' accepted", view.name());
                        ViewAction::Terminate
                    }
                    QuitResponse::Ignore => {
                        debug!(target: "phi::machine", "quit request ignored by '{}'", view.name());
                        view.render(ctx, elapsed)
                    }
                }
            } else {
                view.render(ctx, elapsed)
            }
        };

        match action {
            ViewAction::Continue => Step::Continue,
            ViewAction::Terminate => {
                self.terminate(ctx);
                Step::Terminated
            }
            ViewAction::Replace(next) => {
                self.replace(ctx, next);
                Step::Replaced
            }
        }
    }

    /// Disposes of the active view, if any. Further steps do nothing.
    pub fn terminate(&mut self, ctx: &mut Context) {
        if let MachineState::Running(mut view) = mem::replace(&mut self.state, MachineState::Terminated) {
            info!(target: "phi::machine", "terminating in '{}'", view.name());
            view.on_dispose(ctx);
        }
    }

    fn replace(&mut self, ctx: &mut Context, next: Box<dyn View>) {
        let MachineState::Running(mut old) = mem::replace(&mut self.state, MachineState::Terminated) else {
            return;
        };

        info!(target: "phi::machine", "view '{}' -> '{}'", old.name(), next.name());
        old.on_dispose(ctx);
        drop(old);

        self.state = MachineState::Running(next);
        self.replacements += 1;
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        matches!(self.state, MachineState::Running(_))
    }

    pub fn active_name(&self) -> Option<&str> {
        match &self.state {
            MachineState::Running(view) => Some(view.name()),
            MachineState::Terminated => None,
        }
    }

    #[inline]
    pub fn replacements(&self) -> u64 {
        self.replacements
    }
}
