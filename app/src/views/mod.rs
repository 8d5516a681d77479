use phi_core::{cache::ResourceHandle, Context, LoadError};

pub mod game;
pub mod menu;

pub const BANNER: &str = "banner.txt";
pub const SHIP: &str = "ship.txt";

/// Everything the views need, loaded once at startup so switching screens
/// cannot fail later.
#[derive(Debug, Clone)]
pub struct Assets {
    pub banner: ResourceHandle,
    pub ship: ResourceHandle,
}

impl Assets {
    pub fn load(ctx: &mut Context) -> Result<Self, LoadError> {
        let banner = ctx.get_or_load(BANNER, 0)?;
        banner.as_text()?;
        let ship = ctx.get_or_load(SHIP, 1)?;
        Ok(Self { banner, ship })
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::HashMap;

    use phi_core::{
        cache::{Resource, ResourceCache, ResourceKey, ResourceLoader},
        surface::HeadlessSurface,
        Context, LoadError,
    };

    use super::Assets;

    struct MemLoader(HashMap<&'static str, &'static str>);

    impl ResourceLoader for MemLoader {
        fn load(&mut self, key: &ResourceKey) -> Result<Resource, LoadError> {
            self.0
                .get(key.id.as_str())
                .map(|text| Resource::new(key.clone(), text.as_bytes().to_vec()))
                .ok_or_else(|| LoadError::Other(format!("missing {}", key.id)))
        }
    }

    pub fn context_with(files: &[(&'static str, &'static str)]) -> Context {
        let loader = MemLoader(files.iter().copied().collect());
        Context::new(ResourceCache::new(loader), Box::new(HeadlessSurface::new(800, 600)))
    }

    pub fn context() -> Context {
        context_with(&[(super::BANNER, "ARCADE"), (super::SHIP, " ^ \n/#\\")])
    }

    pub fn assets(ctx: &mut Context) -> Assets {
        Assets::load(ctx).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use phi_core::cache::ResourceHandle;

    use super::testing::{context, context_with};
    use super::*;

    #[test]
    fn missing_ship_fails_the_whole_bundle() {
        let mut ctx = context_with(&[(BANNER, "ARCADE")]);
        assert!(Assets::load(&mut ctx).is_err());
    }

    #[test]
    fn reloading_hits_the_cache() {
        let mut ctx = context();
        let a = Assets::load(&mut ctx).unwrap();
        let b = Assets::load(&mut ctx).unwrap();
        assert!(ResourceHandle::ptr_eq(&a.banner, &b.banner));
        assert!(ResourceHandle::ptr_eq(&a.ship, &b.ship));
    }
}
