use engine::geometry::{hor_center_within, Dim2D, Point2D};
use engine::graphics::Renderer2d;
use engine::input::{InputEvent, Key};
use engine::text::{Font, TextImage};

use crate::screens::{
    Screen, ScreenContext, ScreenError, ScreenId, Transition, BACKGROUND, FOREGROUND,
};

const TOP_TITLE_OFFSET: i32 = 50;
const TOP_MENU_OFFSET: i32 = 250;
const ENTRY_GAP: i32 = 24;
const HIGHLIGHT_MARGIN: u32 = 8;

struct MenuEntry {
    image: TextImage,
    target: ScreenId,
}

pub struct MenuScreen {
    title: TextImage,
    entries: Vec<MenuEntry>,
    selected: usize,
}

impl MenuScreen {
    pub fn new(within: Dim2D) -> Result<Self, ScreenError> {
        let title = TextImage::new(&Font::LARGE, "Tetris", FOREGROUND)
            .map_err(ScreenError::text("menu title"))?;
        let title_x = hor_center_within(title.dim(), within);
        let title = title.at(Point2D::new(title_x, TOP_TITLE_OFFSET));

        let mut entries = Vec::new();
        let mut y = TOP_MENU_OFFSET;
        for (label, target) in [("New Game", ScreenId::Game), ("High Scores", ScreenId::Scores)] {
            let image = TextImage::new(&Font::MEDIUM, label, FOREGROUND)
                .map_err(ScreenError::text("menu entry"))?;
            let x = hor_center_within(image.dim(), within);
            let height = image.dim().h as i32;
            entries.push(MenuEntry {
                image: image.at(Point2D::new(x, y)),
                target,
            });
            y += height + ENTRY_GAP;
        }

        Ok(Self {
            title,
            entries,
            selected: 0,
        })
    }

    pub fn selected(&self) -> ScreenId {
        self.entries[self.selected].target
    }

    /// Top-left corner of the entry leading to `target`, for pointer-driven tests and tools.
    pub fn entry_pos(&self, target: ScreenId) -> Option<Point2D> {
        self.entries
            .iter()
            .find(|e| e.target == target)
            .map(|e| e.image.pos)
    }
}

impl Screen for MenuScreen {
    fn focus(&mut self, _ctx: &mut ScreenContext<'_>) -> Result<(), ScreenError> {
        self.selected = 0;
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
        let count = self.entries.len();
        let transition = match *event {
            InputEvent::KeyDown(Key::Up) => {
                self.selected = (self.selected + count - 1) % count;
                Transition::Stay
            }
            InputEvent::KeyDown(Key::Down) => {
                self.selected = (self.selected + 1) % count;
                Transition::Stay
            }
            InputEvent::KeyDown(Key::Enter) => Transition::To(self.selected()),
            InputEvent::MouseDown { x, y } => self
                .entries
                .iter()
                .find(|e| e.image.contains(x, y))
                .map_or(Transition::Stay, |e| Transition::To(e.target)),
            _ => Transition::Stay,
        };
        Ok(transition)
    }

    fn render(&self, renderer: &mut dyn Renderer2d) {
        renderer.clear(BACKGROUND);
        self.title.render(renderer);
        for (i, entry) in self.entries.iter().enumerate() {
            entry.image.render(renderer);
            if i == self.selected {
                renderer.rect_outline(entry.image.rect().outset(HIGHLIGHT_MARGIN), FOREGROUND);
            }
        }
    }
}
