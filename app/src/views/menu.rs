use log::info;
use phi_core::{Context, Key, LoadError, View, ViewAction};

use super::{game::GameView, Assets};

/// What a menu entry does when activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    NewGame,
    Quit,
}

struct MenuItem {
    label: &'static str,
    action: MenuAction,
}

const ITEMS: [MenuItem; 2] = [
    MenuItem { label: "New Game", action: MenuAction::NewGame },
    MenuItem { label: "Quit", action: MenuAction::Quit },
];

pub struct MainMenuView {
    assets: Assets,
    selected: usize,
}

impl MainMenuView {
    /// Loads every asset the game needs, so a missing file fails here.
    pub fn new(ctx: &mut Context) -> Result<Self, LoadError> {
        let assets = Assets::load(ctx)?;
        for line in assets.banner.as_text()?.lines() {
            info!(target: "arcade::menu", "{line}");
        }
        Ok(Self::with_assets(assets))
    }

    pub fn with_assets(assets: Assets) -> Self {
        Self { assets, selected: 0 }
    }

    pub fn selected(&self) -> MenuAction {
        ITEMS[self.selected].action
    }

    #[cfg(test)]
    pub fn assets(&self) -> &Assets {
        &self.assets
    }

    fn title(&self) -> String {
        let entries: Vec<String> = ITEMS
            .iter()
            .enumerate()
            .map(|(i, item)| {
                if i == self.selected {
                    format!("> {} <", item.label)
                } else {
                    item.label.to_string()
                }
            })
            .collect();
        format!("ArcadeRS | {}", entries.join("  "))
    }

    fn activate(&self, ctx: &mut Context) -> ViewAction {
        match self.selected() {
            MenuAction::NewGame => {
                ViewAction::Replace(Box::new(GameView::new(self.assets.clone(), ctx)))
            }
            MenuAction::Quit => ViewAction::Terminate,
        }
    }
}

impl View for MainMenuView {
    fn name(&self) -> &str {
        "main-menu"
    }

    fn render(&mut self, ctx: &mut Context, _elapsed: f64) -> ViewAction {
        let input = ctx.input();
        if input.was_pressed(Key::Escape) {
            return ViewAction::Terminate;
        }

        if input.was_pressed(Key::Up) || input.was_pressed(Key::W) {
            self.selected = (self.selected + ITEMS.len() - 1) % ITEMS.len();
        }
        if input.was_pressed(Key::Down) || input.was_pressed(Key::S) {
            self.selected = (self.selected + 1) % ITEMS.len();
        }
        if input.was_pressed(Key::Enter) || input.was_pressed(Key::Space) {
            return self.activate(ctx);
        }

        let title = self.title();
        ctx.surface().set_title(&title);
        ViewAction::Continue
    }
}
