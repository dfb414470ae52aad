//! Wires the screens, the shared services and the music together behind the engine's frame loop.

use std::error::Error;

use engine::app::{FrameControl, FrameHandler};
use engine::audio::MusicPlayer;
use engine::geometry::Dim2D;
use engine::graphics::Renderer2d;
use engine::input::InputEvent;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::clock::Clock;
use crate::game_screen::GameScreen;
use crate::high_scores::HighScores;
use crate::menu_screen::MenuScreen;
use crate::scores_screen::ScoresScreen;
use crate::screens::{FrameOutcome, ScreenContext, ScreenError, ScreenId, ScreenMachine};
use crate::settings::GameSettings;
use crate::tetris_core::TetrisCore;

pub struct TetrisApp {
    machine: ScreenMachine,
    clock: Box<dyn Clock>,
    high_scores: HighScores,
    music: Option<MusicPlayer>,
}

impl TetrisApp {
    /// Builds every screen and focuses the menu. Any screen that fails to build aborts startup.
    pub fn new(
        settings: &GameSettings,
        clock: Box<dyn Clock>,
        music: Option<MusicPlayer>,
    ) -> Result<Self, ScreenError> {
        let screen = Dim2D::new(settings.video.width, settings.video.height);
        let rng = match settings.gameplay.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let core = TetrisCore::new(rng, settings.gameplay.fall_delay_ms);

        let mut machine = ScreenMachine::new(ScreenId::Menu);
        machine.register(ScreenId::Menu, Box::new(MenuScreen::new(screen)?));
        machine.register(ScreenId::Game, Box::new(GameScreen::new(screen, core)?));
        machine.register(ScreenId::Scores, Box::new(ScoresScreen::new(screen)?));

        let mut high_scores = HighScores::new(settings.gameplay.high_score_capacity);
        machine.start(&mut ScreenContext {
            clock: clock.as_ref(),
            high_scores: &mut high_scores,
        })?;

        Ok(Self {
            machine,
            clock,
            high_scores,
            music,
        })
    }

    pub fn current_screen(&self) -> ScreenId {
        self.machine.current()
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    /// One frame of input, simulation and drawing. A quit event ends the run before dispatch.
    pub fn run_frame(
        &mut self,
        events: &[InputEvent],
        renderer: &mut dyn Renderer2d,
    ) -> Result<FrameControl, ScreenError> {
        if events.contains(&InputEvent::Quit) {
            return Ok(FrameControl::Exit);
        }

        let mut ctx = ScreenContext {
            clock: self.clock.as_ref(),
            high_scores: &mut self.high_scores,
        };
        let outcome = self.machine.run_frame(events, &mut ctx, renderer)?;

        if outcome == FrameOutcome::Switched(ScreenId::Game) {
            if let Some(music) = self.music.as_mut() {
                if let Err(err) = music.play_new() {
                    log::warn!("music disabled: {err}");
                    self.music = None;
                }
            }
        }
        Ok(FrameControl::Continue)
    }
}

impl FrameHandler for TetrisApp {
    fn frame(
        &mut self,
        events: &[InputEvent],
        renderer: &mut dyn Renderer2d,
    ) -> Result<FrameControl, Box<dyn Error>> {
        Ok(self.run_frame(events, renderer)?)
    }

    fn shutdown(&mut self) {
        self.machine.shutdown();
        if let Some(music) = self.music.as_mut() {
            music.stop();
        }
        log::info!("shut down with high scores {:?}", self.high_scores.entries());
    }
}
