use std::path::Path;

use anyhow::Context as _;
use phi_core::{log::ConsoleLoggerConfig, Context, Engine, EngineConfig, View};

mod views;

const CONFIG_PATH: &str = "phi.toml";

/// Startup factory. Every asset is loaded here, so a missing file ends the
/// process with an error instead of a clean exit later.
fn initial_view(ctx: &mut Context) -> anyhow::Result<Box<dyn View>> {
    let menu = views::menu::MainMenuView::new(ctx).context("loading game assets")?;
    Ok(Box::new(menu))
}

fn main() -> anyhow::Result<()> {
    phi_core::log::init(ConsoleLoggerConfig::from_env())?;

    let cfg = if Path::new(CONFIG_PATH).exists() {
        Engine::load_config_toml(CONFIG_PATH)?
    } else {
        EngineConfig::default()
    };

    Engine::new(cfg).run(initial_view)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::{
        testing::{context, context_with},
        BANNER, SHIP,
    };

    #[test]
    fn missing_ship_is_a_startup_error() {
        let mut ctx = context_with(&[(BANNER, "ARCADE")]);
        let Err(err) = initial_view(&mut ctx) else {
            panic!("expected a startup error");
        };
        let chain = format!("{err:#}");
        assert!(chain.contains("loading game assets"));
        assert!(chain.contains(SHIP));
    }

    #[test]
    fn complete_assets_start_on_the_menu() {
        let mut ctx = context();
        let view = initial_view(&mut ctx).unwrap();
        assert_eq!(view.name(), "main-menu");
    }
}
