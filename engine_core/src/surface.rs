use std::sync::Arc;

use winit::window::Window;

/// Presentation target handed to views through the context.
///
/// Drawing primitives belong to the rendering backend; the core only needs to
/// present finished frames and label the window.
pub trait Surface {
    fn size(&self) -> (u32, u32);
    fn set_title(&mut self, title: &str);
    fn present(&mut self);

    /// Frames presented so far.
    fn presented(&self) -> u64;
}

pub struct WindowSurface {
    window: Arc<Window>,
    title: String,
    presented: u64,
}

impl WindowSurface {
    pub fn new(window: Arc<Window>) -> Self {
        let title = window.title();
        Self { window, title, presented: 0 }
    }
}

impl Surface for WindowSurface {
    fn size(&self) -> (u32, u32) {
        let size = self.window.inner_size();
        (size.width, size.height)
    }

    fn set_title(&mut self, title: &str) {
        if self.title != title {
            self.title = title.to_string();
            self.window.set_title(title);
        }
    }

    fn present(&mut self) {
        self.window.pre_present_notify();
        self.window.request_redraw();
        self.presented += 1;
    }

    fn presented(&self) -> u64 {
        self.presented
    }
}

/// Surface without a window, for tests and headless runs.
#[derive(Debug, Default)]
pub struct HeadlessSurface {
    size: (u32, u32),
    title: String,
    presented: u64,
}

impl HeadlessSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self { size: (width, height), ..Self::default() }
    }

    pub fn title(&self) -> &str {
        &self.title
    }
}

impl Surface for HeadlessSurface {
    fn size(&self) -> (u32, u32) {
        self.size
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn present(&mut self) {
        self.presented += 1;
    }

    fn presented(&self) -> u64 {
        self.presented
    }
}
