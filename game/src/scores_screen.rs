use engine::geometry::{hor_center_within, Dim2D, Point2D};
use engine::graphics::Renderer2d;
use engine::input::{InputEvent, Key};
use engine::text::{Font, TextImage};

use crate::screens::{
    Screen, ScreenContext, ScreenError, ScreenId, Transition, BACKGROUND, FOREGROUND,
};

const TOP_TITLE_OFFSET: i32 = 50;
const TOP_LIST_OFFSET: i32 = 170;
const LINE_GAP: i32 = 16;
const BOTTOM_HINT_OFFSET: i32 = 60;

/// Leaderboard view. The list is rebuilt from the high scores every time the screen is focused.
pub struct ScoresScreen {
    within: Dim2D,
    title: TextImage,
    hint: TextImage,
    lines: Vec<TextImage>,
}

impl ScoresScreen {
    pub fn new(within: Dim2D) -> Result<Self, ScreenError> {
        let title = Self::centered(&Font::LARGE, "High Scores", within, TOP_TITLE_OFFSET)
            .map_err(ScreenError::text("scores title"))?;
        let hint_y = within.h as i32 - BOTTOM_HINT_OFFSET;
        let hint = Self::centered(&Font::SMALL, "Enter to return", within, hint_y)
            .map_err(ScreenError::text("scores hint"))?;
        Ok(Self {
            within,
            title,
            hint,
            lines: Vec::new(),
        })
    }

    fn centered(
        font: &Font,
        text: &str,
        within: Dim2D,
        y: i32,
    ) -> Result<TextImage, engine::text::TextError> {
        let image = TextImage::new(font, text, FOREGROUND)?;
        let x = hor_center_within(image.dim(), within);
        Ok(image.at(Point2D::new(x, y)))
    }

    /// Text of the rows currently on display.
    pub fn lines(&self) -> Vec<&str> {
        self.lines.iter().map(TextImage::text).collect()
    }
}

impl Screen for ScoresScreen {
    fn focus(&mut self, ctx: &mut ScreenContext<'_>) -> Result<(), ScreenError> {
        let rows: Vec<String> = if ctx.high_scores.is_empty() {
            vec!["No scores yet".to_string()]
        } else {
            ctx.high_scores
                .entries()
                .iter()
                .enumerate()
                .map(|(i, score)| format!("{}. {score}", i + 1))
                .collect()
        };

        let font = Font::MEDIUM;
        let step = font.size() as i32 + LINE_GAP;
        self.lines = rows
            .iter()
            .enumerate()
            .map(|(i, row)| Self::centered(&font, row, self.within, TOP_LIST_OFFSET + i as i32 * step))
            .collect::<Result<Vec<_>, _>>()
            .map_err(ScreenError::text("score row"))?;
        Ok(())
    }

    fn update(&mut self, _ctx: &mut ScreenContext<'_>) -> Result<Transition, ScreenError> {
        Ok(Transition::Stay)
    }

    fn handle_event(
        &mut self,
        event: &InputEvent,
        _ctx: &mut ScreenContext<'_>,
    ) -> Result<Transition, ScreenError> {
        match event {
            InputEvent::KeyDown(Key::Enter | Key::Escape) | InputEvent::MouseDown { .. } => {
                Ok(Transition::To(ScreenId::Menu))
            }
            _ => Ok(Transition::Stay),
        }
    }

    fn render(&self, renderer: &mut dyn Renderer2d) {
        renderer.clear(BACKGROUND);
        self.title.render(renderer);
        for line in &self.lines {
            line.render(renderer);
        }
        self.hint.render(renderer);
    }

    fn destroy(&mut self) {
        self.lines.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::high_scores::HighScores;

    fn focus_with(scores: &mut HighScores) -> ScoresScreen {
        let mut screen = ScoresScreen::new(Dim2D::new(640, 640)).unwrap();
        let clock = ManualClock::new(0);
        let mut ctx = ScreenContext {
            clock: &clock,
            high_scores: scores,
        };
        screen.focus(&mut ctx).unwrap();
        screen
    }

    #[test]
    fn empty_table_shows_placeholder() {
        let screen = focus_with(&mut HighScores::default());
        assert_eq!(screen.lines(), ["No scores yet"]);
    }

    #[test]
    fn rows_are_ranked() {
        let mut scores = HighScores::default();
        for s in [12, 40, 3] {
            scores.insert(s);
        }
        let screen = focus_with(&mut scores);
        assert_eq!(screen.lines(), ["1. 40", "2. 12", "3. 3"]);
        assert_eq!(screen.lines[1].pos.y, TOP_LIST_OFFSET + 40 + LINE_GAP);
    }

    #[test]
    fn refocus_picks_up_new_scores() {
        let mut scores = HighScores::default();
        let mut screen = focus_with(&mut scores);
        scores.insert(9);
        let clock = ManualClock::new(0);
        let mut ctx = ScreenContext {
            clock: &clock,
            high_scores: &mut scores,
        };
        screen.focus(&mut ctx).unwrap();
        assert_eq!(screen.lines(), ["1. 9"]);
    }

    #[test]
    fn any_confirm_returns_to_menu() {
        let mut screen = focus_with(&mut HighScores::default());
        let clock = ManualClock::new(0);
        let mut scores = HighScores::default();
        let mut ctx = ScreenContext {
            clock: &clock,
            high_scores: &mut scores,
        };
        for event in [
            InputEvent::KeyDown(Key::Enter),
            InputEvent::KeyDown(Key::Escape),
            InputEvent::MouseDown { x: 0, y: 0 },
        ] {
            assert_eq!(
                screen.handle_event(&event, &mut ctx).unwrap(),
                Transition::To(ScreenId::Menu)
            );
        }
        assert_eq!(
            screen.handle_event(&InputEvent::KeyDown(Key::Left), &mut ctx).unwrap(),
            Transition::Stay
        );
    }
}
