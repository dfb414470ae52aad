//! Screen registry and the transition protocol between menu, game and scores.

use std::fmt;

use engine::graphics::{Color, Renderer2d};
use engine::input::InputEvent;
use engine::text::TextError;

use crate::clock::Clock;
use crate::high_scores::HighScores;

pub const BACKGROUND: Color = [25, 25, 25, 255];
pub const FOREGROUND: Color = [225, 225, 225, 255];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScreenId {
    Menu,
    Game,
    Scores,
}

impl ScreenId {
    pub const COUNT: usize = 3;

    fn index(self) -> usize {
        self as usize
    }
}

/// What a hook asks the machine to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Stay,
    /// Switch to the target and run its focus hook. Naming the current screen re-runs focus.
    To(ScreenId),
}

#[derive(Debug)]
pub enum ScreenError {
    Text { what: &'static str, source: TextError },
}

impl ScreenError {
    pub fn text(what: &'static str) -> impl FnOnce(TextError) -> ScreenError {
        move |source| ScreenError::Text { what, source }
    }
}

impl fmt::Display for ScreenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScreenError::Text { what, source } => write!(f, "cannot build {what} text: {source}"),
        }
    }
}

impl std::error::Error for ScreenError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScreenError::Text { source, .. } => Some(source),
        }
    }
}

/// Shared services handed to every hook.
pub struct ScreenContext<'a> {
    pub clock: &'a dyn Clock,
    pub high_scores: &'a mut HighScores,
}

pub trait Screen {
    /// Runs every time the screen becomes current, including self transitions.
    fn focus(&mut self, ctx: &mut ScreenContext<'_>) -> Result<(), ScreenError>;

    fn update(&mut self, ctx: &mut ScreenContext<'_>) -> Result<Transition, ScreenError>;

    fn handle_event(
        &mut self,
        event: &InputEvent,
        ctx: &mut ScreenContext<'_>,
    ) -> Result<Transition, ScreenError>;

    fn render(&self, renderer: &mut dyn Renderer2d);

    /// Runs once at shutdown.
    fn destroy(&mut self) {}
}

/// Outcome of one [`ScreenMachine::run_frame`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Rendered,
    /// At least one transition happened; the last target is current now and nothing was drawn.
    Switched(ScreenId),
}

pub struct ScreenMachine {
    screens: [Option<Box<dyn Screen>>; ScreenId::COUNT],
    current: ScreenId,
}

impl ScreenMachine {
    pub fn new(initial: ScreenId) -> Self {
        Self {
            screens: [None, None, None],
            current: initial,
        }
    }

    /// # Panics
    ///
    /// If `id` already has a screen.
    pub fn register(&mut self, id: ScreenId, screen: Box<dyn Screen>) {
        let slot = &mut self.screens[id.index()];
        assert!(slot.is_none(), "screen {id:?} registered twice");
        *slot = Some(screen);
    }

    pub fn current(&self) -> ScreenId {
        self.current
    }

    fn screen_mut(&mut self, id: ScreenId) -> &mut dyn Screen {
        self.screens[id.index()]
            .as_deref_mut()
            .unwrap_or_else(|| panic!("screen {id:?} was never registered"))
    }

    /// Focuses the initial screen.
    pub fn start(&mut self, ctx: &mut ScreenContext<'_>) -> Result<(), ScreenError> {
        self.switch_to(self.current, ctx)
    }

    /// # Panics
    ///
    /// If `id` has no registered screen.
    pub fn switch_to(&mut self, id: ScreenId, ctx: &mut ScreenContext<'_>) -> Result<(), ScreenError> {
        log::debug!("focus {id:?}");
        self.current = id;
        self.screen_mut(id).focus(ctx)
    }

    /// Dispatches `events` in order, then one update unless a transition already happened, then
    /// renders if the frame ended on the same screen it started with.
    pub fn run_frame(
        &mut self,
        events: &[InputEvent],
        ctx: &mut ScreenContext<'_>,
        renderer: &mut dyn Renderer2d,
    ) -> Result<FrameOutcome, ScreenError> {
        let mut switched = None;
        for event in events {
            let transition = self.screen_mut(self.current).handle_event(event, ctx)?;
            if let Transition::To(id) = transition {
                self.switch_to(id, ctx)?;
                switched = Some(id);
            }
        }

        if switched.is_none() {
            if let Transition::To(id) = self.screen_mut(self.current).update(ctx)? {
                self.switch_to(id, ctx)?;
                switched = Some(id);
            }
        }

        if let Some(id) = switched {
            return Ok(FrameOutcome::Switched(id));
        }
        self.screen_mut(self.current).render(renderer);
        Ok(FrameOutcome::Rendered)
    }

    /// Calls `destroy` on every registered screen and drops them.
    pub fn shutdown(&mut self) {
        for slot in &mut self.screens {
            if let Some(mut screen) = slot.take() {
                screen.destroy();
            }
        }
    }
}
