//! Collect-the-dots game.
//!
//! The arena is a fixed grid of cells. The player moves one cell per key
//! press; every collectible picked up is worth ten points and a new wave
//! spawns once the arena is empty. The best score is kept in the settings
//! store under `gameHighScore`.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crossterm::event::{Event, KeyCode};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ratatui::layout::Rect;
use ratatui::style::Modifier;

use super::{Component, ComponentContext, centered_x, key_press, left_click};
use crate::geometry::rect_contains;
use crate::store::SettingsStore;
use crate::ui::UiFrame;
use crate::window::menu_bar::MenuCommand;

pub const ARENA_WIDTH: u16 = 40;
pub const ARENA_HEIGHT: u16 = 12;
pub const COLLECTIBLES_PER_WAVE: usize = 5;
pub const POINTS_PER_PICKUP: u32 = 10;
const PLAYER_START: Cell = Cell { x: 5, y: 2 };

const START_LABEL: &str = "[ Start Game ]";
const RESET_LABEL: &str = "[ Reset Game ]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub x: u16,
    pub y: u16,
}

#[derive(Debug)]
pub struct SimpleGame {
    player: Cell,
    collectibles: Vec<Cell>,
    score: u32,
    started: bool,
    store: Rc<RefCell<SettingsStore>>,
    rng: StdRng,
}

impl SimpleGame {
    pub fn new(store: Rc<RefCell<SettingsStore>>) -> Self {
        Self::with_rng(store, StdRng::from_entropy())
    }

    pub fn with_rng(store: Rc<RefCell<SettingsStore>>, rng: StdRng) -> Self {
        Self {
            player: PLAYER_START,
            collectibles: Vec::new(),
            score: 0,
            started: false,
            store,
            rng,
        }
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.store.borrow().game_high_score()
    }

    pub fn player(&self) -> Cell {
        self.player
    }

    pub fn collectibles(&self) -> &[Cell] {
        &self.collectibles
    }

    pub fn start(&mut self) {
        self.started = true;
        self.score = 0;
        self.player = PLAYER_START;
        self.spawn_wave();
        tracing::debug!("game started");
    }

    pub fn reset(&mut self) {
        self.started = false;
    }

    fn spawn_wave(&mut self) {
        self.collectibles = (0..COLLECTIBLES_PER_WAVE)
            .map(|_| Cell {
                x: self.rng.gen_range(0..ARENA_WIDTH),
                y: self.rng.gen_range(0..ARENA_HEIGHT),
            })
            .collect();
    }

    /// Move the player by one step, clamped to the arena.
    pub fn step(&mut self, dx: i32, dy: i32) {
        if !self.started {
            return;
        }
        let clamp = |v: u16, d: i32, max: u16| (v as i32 + d).clamp(0, max as i32 - 1) as u16;
        self.player = Cell {
            x: clamp(self.player.x, dx, ARENA_WIDTH),
            y: clamp(self.player.y, dy, ARENA_HEIGHT),
        };
        self.collect();
    }

    fn collect(&mut self) {
        let before = self.collectibles.len();
        let player = self.player;
        self.collectibles.retain(|c| *c != player);
        let picked = (before - self.collectibles.len()) as u32;
        if picked > 0 {
            self.score += picked * POINTS_PER_PICKUP;
            self.save_high_score();
        }
        if self.collectibles.is_empty() {
            self.spawn_wave();
        }
    }

    fn save_high_score(&self) {
        match self.store.borrow_mut().record_game_score(self.score) {
            Ok(true) => tracing::debug!(score = self.score, "new high score"),
            Ok(false) => {}
            Err(err) => tracing::warn!(error = %err, "could not save high score"),
        }
    }

    fn arena_rect(area: Rect) -> Rect {
        let width = ARENA_WIDTH + 2;
        Rect::new(
            area.x + area.width.saturating_sub(width) / 2,
            area.y + 1,
            width,
            ARENA_HEIGHT + 2,
        )
    }

    fn button_rect(area: Rect, started: bool) -> Rect {
        if started {
            let arena = Self::arena_rect(area);
            Rect::new(
                centered_x(area, RESET_LABEL),
                arena.y + arena.height,
                RESET_LABEL.len() as u16,
                1,
            )
        } else {
            Rect::new(
                centered_x(area, START_LABEL),
                area.y + area.height / 2 + 1,
                START_LABEL.len() as u16,
                1,
            )
        }
    }
}

impl Component for SimpleGame {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext) {
        let palette = ctx.palette();
        frame.fill(area, palette.window());
        if area.height < 2 {
            return;
        }
        let status = format!("Score: {}   High Score: {}", self.score, self.high_score());
        frame.set_string(
            centered_x(area, &status),
            area.y,
            &status,
            palette.window().add_modifier(Modifier::BOLD),
        );

        let button = Self::button_rect(area, self.started);
        if !self.started {
            let lines = ["Use arrow keys or WASD to move.", "Collect all dots to win!"];
            for (i, line) in lines.iter().enumerate() {
                let y = (button.y + i as u16).saturating_sub(4);
                frame.set_string(centered_x(area, line), y, line, palette.muted());
            }
            frame.set_string(button.x, button.y, START_LABEL, palette.selected());
            return;
        }

        let arena = Self::arena_rect(area);
        let inner = ARENA_WIDTH as usize;
        let border = palette.border();
        frame.set_string(arena.x, arena.y, &format!("┌{}┐", "─".repeat(inner)), border);
        for row in 0..ARENA_HEIGHT {
            let y = arena.y + 1 + row;
            frame.set_string(arena.x, y, "│", border);
            frame.fill(Rect::new(arena.x + 1, y, ARENA_WIDTH, 1), palette.desktop());
            frame.set_string(arena.x + 1 + ARENA_WIDTH, y, "│", border);
        }
        frame.set_string(
            arena.x,
            arena.y + arena.height - 1,
            &format!("└{}┘", "─".repeat(inner)),
            border,
        );
        for c in &self.collectibles {
            frame.set_string(arena.x + 1 + c.x, arena.y + 1 + c.y, "●", palette.accent());
        }
        frame.set_string(
            arena.x + 1 + self.player.x,
            arena.y + 1 + self.player.y,
            "█",
            palette.selected(),
        );
        frame.set_string(button.x, button.y, RESET_LABEL, palette.selected());
    }

    fn handle_event(&mut self, event: &Event, ctx: &ComponentContext) -> bool {
        if let Some(mouse) = left_click(event) {
            if rect_contains(Self::button_rect(ctx.area(), self.started), mouse.column, mouse.row) {
                if self.started {
                    self.reset();
                } else {
                    self.start();
                }
                return true;
            }
            return false;
        }
        let Some(key) = key_press(event) else {
            return false;
        };
        if !self.started {
            return match key.code {
                KeyCode::Enter | KeyCode::Char(' ') => {
                    self.start();
                    true
                }
                _ => false,
            };
        }
        match key.code {
            KeyCode::Up | KeyCode::Char('w') => self.step(0, -1),
            KeyCode::Down | KeyCode::Char('s') => self.step(0, 1),
            KeyCode::Left | KeyCode::Char('a') => self.step(-1, 0),
            KeyCode::Right | KeyCode::Char('d') => self.step(1, 0),
            KeyCode::Esc => self.reset(),
            _ => return false,
        }
        true
    }

    // A collectible can spawn under the player; pick it up without waiting
    // for the next move.
    fn tick(&mut self, _elapsed: Duration) {
        if self.started {
            self.collect();
        }
    }

    fn menu_command(&mut self, command: MenuCommand) -> bool {
        match command {
            MenuCommand::NewGame => {
                self.start();
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::test_support::{click, key};
    use crate::theme::ThemeMode;

    const AREA: Rect = Rect {
        x: 19,
        y: 3,
        width: 44,
        height: 17,
    };

    fn game() -> (SimpleGame, Rc<RefCell<SettingsStore>>) {
        let store = Rc::new(RefCell::new(SettingsStore::in_memory()));
        let g = SimpleGame::with_rng(store.clone(), StdRng::seed_from_u64(7));
        (g, store)
    }

    fn ctx() -> ComponentContext {
        ComponentContext::new(true, AREA, ThemeMode::Dark.palette())
    }

    #[test]
    fn start_spawns_a_full_wave_inside_the_arena() {
        let (mut g, _) = game();
        assert!(!g.is_started());
        g.handle_event(&key(KeyCode::Enter), &ctx());
        assert!(g.is_started());
        assert_eq!(g.collectibles().len(), COLLECTIBLES_PER_WAVE);
        assert!(
            g.collectibles()
                .iter()
                .all(|c| c.x < ARENA_WIDTH && c.y < ARENA_HEIGHT)
        );
    }

    #[test]
    fn movement_is_clamped_to_arena() {
        let (mut g, _) = game();
        g.start();
        for _ in 0..100 {
            g.step(-1, -1);
        }
        assert_eq!(g.player(), Cell { x: 0, y: 0 });
        for _ in 0..100 {
            g.step(1, 1);
        }
        assert_eq!(
            g.player(),
            Cell {
                x: ARENA_WIDTH - 1,
                y: ARENA_HEIGHT - 1
            }
        );
    }

    #[test]
    fn pickup_scores_and_saves_high_score() {
        let (mut g, store) = game();
        g.start();
        g.collectibles = vec![Cell { x: 6, y: 2 }, Cell { x: 30, y: 9 }];
        g.handle_event(&key(KeyCode::Char('d')), &ctx());
        assert_eq!(g.score(), POINTS_PER_PICKUP);
        assert_eq!(g.collectibles().len(), 1);
        assert_eq!(store.borrow().game_high_score(), POINTS_PER_PICKUP);
    }

    #[test]
    fn clearing_the_wave_spawns_another() {
        let (mut g, _) = game();
        g.start();
        g.collectibles = vec![Cell { x: 5, y: 3 }];
        g.step(0, 1);
        assert_eq!(g.score(), POINTS_PER_PICKUP);
        assert_eq!(g.collectibles().len(), COLLECTIBLES_PER_WAVE);
    }

    #[test]
    fn high_score_survives_restart_and_is_not_lowered() {
        let (mut g, store) = game();
        store.borrow_mut().record_game_score(50).unwrap();
        g.start();
        g.collectibles = vec![Cell { x: 6, y: 2 }, Cell { x: 0, y: 0 }];
        g.step(1, 0);
        assert_eq!(g.high_score(), 50);
        g.menu_command(MenuCommand::NewGame);
        assert_eq!(g.score(), 0);
        assert_eq!(g.high_score(), 50);
    }

    #[test]
    fn moves_are_ignored_before_start() {
        let (mut g, _) = game();
        assert!(!g.handle_event(&key(KeyCode::Left), &ctx()));
        assert_eq!(g.player(), PLAYER_START);
    }

    #[test]
    fn start_and_reset_buttons() {
        let (mut g, _) = game();
        let start = SimpleGame::button_rect(AREA, false);
        assert!(g.handle_event(&click(start.x + 1, start.y), &ctx()));
        assert!(g.is_started());
        let reset = SimpleGame::button_rect(AREA, true);
        assert!(g.handle_event(&click(reset.x + 1, reset.y), &ctx()));
        assert!(!g.is_started());
    }

    #[test]
    fn tick_collects_under_player() {
        let (mut g, _) = game();
        g.start();
        g.collectibles = vec![PLAYER_START, Cell { x: 20, y: 8 }];
        g.tick(Duration::from_millis(33));
        assert_eq!(g.score(), POINTS_PER_PICKUP);
    }
}
