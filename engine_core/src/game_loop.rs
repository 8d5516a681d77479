use crate::{
    clock::{FrameClock, HostTime, TimeSource},
    context::Context,
    input::InputSnapshot,
    machine::{Step, ViewMachine},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pump {
    /// Ahead of schedule; the clock slept and no frame ran.
    Idle,
    Frame(Step),
}

/// Clock-gated driver for a [`ViewMachine`].
pub struct GameLoop<T: TimeSource = HostTime> {
    clock: FrameClock<T>,
    machine: ViewMachine,
    frames: u64,
}

impl<T: TimeSource> GameLoop<T> {
    pub fn new(clock: FrameClock<T>, machine: ViewMachine) -> Self {
        Self { clock, machine, frames: 0 }
    }

    /// One loop iteration. Input is only sampled once the clock delivers a tick.
    pub fn pump(&mut self, ctx: &mut Context, input: impl FnOnce() -> InputSnapshot) -> Pump {
        if !self.machine.is_running() {
            return Pump::Frame(Step::Terminated);
        }

        let Some(elapsed) = self.clock.tick() else {
            return Pump::Idle;
        };

        ctx.set_input(input());
        let step = self.machine.step(ctx, elapsed);
        self.frames += 1;

        if step == Step::Continue {
            ctx.surface().present();
        }
        Pump::Frame(step)
    }

    /// Pumps until the machine terminates. Returns the number of frames run.
    pub fn run_blocking(&mut self, ctx: &mut Context, mut input: impl FnMut() -> InputSnapshot) -> u64 {
        while self.machine.is_running() {
            self.pump(ctx, &mut input);
        }
        self.frames
    }

    /// Ends the run from outside, disposing of the active view.
    pub fn shutdown(&mut self, ctx: &mut Context) {
        self.machine.terminate(ctx);
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.machine.is_running()
    }

    /// Frames in which a view was invoked (or a quit request was handled).
    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn machine(&self) -> &ViewMachine {
        &self.machine
    }

    pub fn clock(&self) -> &FrameClock<T> {
        &self.clock
    }
}
