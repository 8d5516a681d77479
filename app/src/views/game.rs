use log::info;
use phi_core::{Context, Key, View, ViewAction};

use super::{menu::MainMenuView, Assets};

/// Pixels per second.
const PLAYER_SPEED: f64 = 180.0;
const SHOT_SPEED: f64 = 240.0;
const SHIP_SIZE: f64 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shot {
    pub x: f64,
    pub y: f64,
}

pub struct GameView {
    assets: Assets,
    x: f64,
    y: f64,
    paused: bool,
    shots: Vec<Shot>,
    fired: u32,
}

impl GameView {
    pub fn new(assets: Assets, ctx: &Context) -> Self {
        let (w, h) = ctx.surface_ref().size();
        Self {
            assets,
            x: f64::from(w) / 2.0,
            y: f64::from(h) - SHIP_SIZE * 2.0,
            paused: false,
            shots: Vec::new(),
            fired: 0,
        }
    }

    #[cfg(test)]
    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    #[cfg(test)]
    pub fn shots(&self) -> &[Shot] {
        &self.shots
    }

    #[cfg(test)]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    fn steer(&mut self, ctx: &Context, elapsed: f64) {
        let input = ctx.input();
        let up = input.is_down(Key::Up) || input.is_down(Key::W);
        let down = input.is_down(Key::Down) || input.is_down(Key::S);
        let left = input.is_down(Key::Left) || input.is_down(Key::A);
        let right = input.is_down(Key::Right) || input.is_down(Key::D);

        let dy = f64::from(i8::from(down) - i8::from(up));
        let dx = f64::from(i8::from(right) - i8::from(left));

        // keep diagonal speed equal to straight speed
        let scale = if dx != 0.0 && dy != 0.0 { std::f64::consts::FRAC_1_SQRT_2 } else { 1.0 };
        let step = PLAYER_SPEED * elapsed * scale;

        let (w, h) = ctx.surface_ref().size();
        self.x = (self.x + dx * step).clamp(0.0, (f64::from(w) - SHIP_SIZE).max(0.0));
        self.y = (self.y + dy * step).clamp(0.0, (f64::from(h) - SHIP_SIZE).max(0.0));
    }

    fn advance_shots(&mut self, elapsed: f64) {
        for shot in self.shots.iter_mut() {
            shot.y -= SHOT_SPEED * elapsed;
        }
        self.shots.retain(|s| s.y >= 0.0);
    }
}

impl View for GameView {
    fn name(&self) -> &str {
        "game"
    }

    fn render(&mut self, ctx: &mut Context, elapsed: f64) -> ViewAction {
        if ctx.input().was_pressed(Key::Escape) {
            let menu = MainMenuView::with_assets(self.assets.clone());
            return ViewAction::Replace(Box::new(menu));
        }

        if ctx.input().was_pressed(Key::P) {
            self.paused = !self.paused;
        }

        if !self.paused {
            self.steer(ctx, elapsed);
            self.advance_shots(elapsed);

            if ctx.input().was_pressed(Key::Space) {
                self.shots.push(Shot { x: self.x + SHIP_SIZE / 2.0, y: self.y });
                self.fired += 1;
            }
        }

        let title = if self.paused {
            "ArcadeRS | PAUSED".to_string()
        } else {
            format!(
                "ArcadeRS | ship ({:.0}, {:.0}) | shots {} | {} bytes of ship",
                self.x,
                self.y,
                self.shots.len(),
                self.assets.ship.bytes().len()
            )
        };
        ctx.surface().set_title(&title);
        ViewAction::Continue
    }

    fn on_dispose(&mut self, _ctx: &mut Context) {
        info!(
            target: "arcade::game",
            "leaving game: {} shots fired, releasing {} in flight",
            self.fired,
            self.shots.len()
        );
        self.shots.clear();
    }
}

#[cfg(test)]
mod tests {
    use phi_core::InputSnapshot;

    use super::*;
    use crate::views::testing::{assets, context};

    fn game(ctx: &mut Context) -> GameView {
        let assets = assets(ctx);
        GameView::new(assets, ctx)
    }

    const DT: f64 = 0.5;

    #[test]
    fn moves_with_elapsed_time() {
        let mut ctx = context();
        let mut game = game(&mut ctx);
        let (x0, y0) = game.position();

        ctx.set_input(InputSnapshot::default().with_down(Key::Left));
        game.render(&mut ctx, DT);

        let (x1, y1) = game.position();
        assert!((x0 - x1 - PLAYER_SPEED * DT).abs() < 1e-9);
        assert_eq!(y0, y1);
    }

    #[test]
    fn diagonal_is_not_faster() {
        let mut ctx = context();
        let mut game = game(&mut ctx);
        let (x0, y0) = game.position();

        ctx.set_input(InputSnapshot::default().with_down(Key::Left).with_down(Key::Up));
        game.render(&mut ctx, 0.1);

        let (x1, y1) = game.position();
        let dist = ((x1 - x0).powi(2) + (y1 - y0).powi(2)).sqrt();
        assert!((dist - PLAYER_SPEED * 0.1).abs() < 1e-9);
    }

    #[test]
    fn ship_stays_on_screen() {
        let mut ctx = context();
        let mut game = game(&mut ctx);

        ctx.set_input(InputSnapshot::default().with_down(Key::Right).with_down(Key::Down));
        for _ in 0..50 {
            game.render(&mut ctx, DT);
        }
        assert_eq!(game.position(), (800.0 - SHIP_SIZE, 600.0 - SHIP_SIZE));
    }

    #[test]
    fn shots_fly_up_and_expire() {
        let mut ctx = context();
        let mut game = game(&mut ctx);

        ctx.set_input(InputSnapshot::default().with_pressed(Key::Space));
        game.render(&mut ctx, 0.0);
        assert_eq!(game.shots().len(), 1);

        ctx.set_input(InputSnapshot::default());
        for _ in 0..10 {
            game.render(&mut ctx, DT);
        }
        assert!(game.shots().is_empty());
    }

    #[test]
    fn pause_freezes_the_ship() {
        let mut ctx = context();
        let mut game = game(&mut ctx);

        ctx.set_input(InputSnapshot::default().with_pressed(Key::P));
        game.render(&mut ctx, DT);
        assert!(game.is_paused());

        let before = game.position();
        ctx.set_input(InputSnapshot::default().with_down(Key::Left));
        game.render(&mut ctx, DT);
        assert_eq!(game.position(), before);
    }

    #[test]
    fn escape_goes_back_to_menu() {
        let mut ctx = context();
        let mut game = game(&mut ctx);

        ctx.set_input(InputSnapshot::default().with_pressed(Key::Escape));
        match game.render(&mut ctx, DT) {
            ViewAction::Replace(next) => assert_eq!(next.name(), "main-menu"),
            other => panic!("expected replace, got {other:?}"),
        }
    }

    #[test]
    fn dispose_releases_shots() {
        let mut ctx = context();
        let mut game = game(&mut ctx);

        ctx.set_input(InputSnapshot::default().with_pressed(Key::Space));
        game.render(&mut ctx, 0.0);
        game.on_dispose(&mut ctx);
        assert!(game.shots().is_empty());
    }
}
