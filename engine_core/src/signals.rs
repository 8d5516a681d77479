use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// Process-level stop request (Ctrl-C), polled once per tick by the host.
#[derive(Clone, Default)]
pub struct ExitSignal {
    flag: Arc<AtomicBool>,
}

impl ExitSignal {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn request_exit(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Reads and clears the request, so a vetoed quit is not re-sent every tick.
    #[inline]
    pub fn take(&self) -> bool {
        self.flag.swap(false, Ordering::Relaxed)
    }

    pub fn install_ctrlc_handler(&self) -> anyhow::Result<()> {
        let s = self.clone();
        ctrlc::set_handler(move || s.request_exit())?;
        Ok(())
    }
}
