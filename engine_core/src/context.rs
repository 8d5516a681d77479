use crate::{
    cache::{ResourceCache, ResourceHandle},
    error::LoadError,
    input::InputSnapshot,
    surface::Surface,
};

/// Context passed to every view call.
///
/// One instance lives for the whole run. The active view gets exclusive
/// `&mut` access for the duration of its call and nothing else touches it
/// until the call returns.
pub struct Context {
    input: InputSnapshot,
    cache: ResourceCache,
    surface: Box<dyn Surface>,
}

impl Context {
    pub fn new(cache: ResourceCache, surface: Box<dyn Surface>) -> Self {
        Self {
            input: InputSnapshot::default(),
            cache,
            surface,
        }
    }

    /// Input for the current tick.
    #[inline]
    pub fn input(&self) -> &InputSnapshot {
        &self.input
    }

    /// Replaces the snapshot; the previous one is dropped.
    #[inline]
    pub fn set_input(&mut self, input: InputSnapshot) {
        self.input = input;
    }

    #[inline]
    pub fn get_or_load(&mut self, id: &str, variant: u32) -> Result<ResourceHandle, LoadError> {
        self.cache.get_or_load(id, variant)
    }

    #[inline]
    pub fn resources(&mut self) -> &mut ResourceCache {
        &mut self.cache
    }

    #[inline]
    pub fn surface(&mut self) -> &mut dyn Surface {
        self.surface.as_mut()
    }

    #[inline]
    pub fn surface_ref(&self) -> &dyn Surface {
        self.surface.as_ref()
    }
}
