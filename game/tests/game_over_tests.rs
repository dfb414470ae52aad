use engine::geometry::{Dim2D, Point2D};
use engine::input::{InputEvent, Key};

use tetris::board::{COLS, ROWS};
use tetris::clock::ManualClock;
use tetris::game_screen::GameScreen;
use tetris::high_scores::HighScores;
use tetris::pieces::{FallingPiece, PieceKind};
use tetris::screens::{Screen, ScreenContext, ScreenId, Transition};
use tetris::tetris_core::{TetrisCore, FALL_DELAY_MS};

use rand::rngs::StdRng;
use rand::SeedableRng;

fn game_screen() -> GameScreen {
    let core = TetrisCore::new(StdRng::seed_from_u64(3), FALL_DELAY_MS);
    GameScreen::new(Dim2D::new(640, 640), core).expect("game screen should build")
}

fn send(screen: &mut GameScreen, ctx: &mut ScreenContext<'_>, key: Key) -> Transition {
    screen.handle_event(&InputEvent::KeyDown(key), ctx).unwrap()
}

#[test]
fn blocked_spawn_reports_score_and_leaves_game() {
    let clock = ManualClock::new(1_000);
    let mut scores = HighScores::default();
    let mut ctx = ScreenContext {
        clock: &clock,
        high_scores: &mut scores,
    };
    let mut screen = game_screen();
    screen.focus(&mut ctx).unwrap();

    // Earn a point: an I piece completes the bottom row.
    for x in 0..COLS - 4 {
        screen.core_mut().board_mut().set_cell(x, 0, Some(PieceKind::S));
    }
    screen.core_mut().set_falling_piece_for_test(FallingPiece {
        relative: Point2D::new(COLS as i32 - 4, 0),
        ..FallingPiece::spawn(PieceKind::I, 0)
    });
    clock.advance(FALL_DELAY_MS + 1);
    assert_eq!(screen.update(&mut ctx).unwrap(), Transition::Stay);
    assert_eq!(screen.core().points(), 1);
    assert_eq!(screen.points_text().text(), "1");

    // Block the spawn area.
    for y in ROWS - 3..ROWS {
        screen.core_mut().board_mut().fill_row(y, PieceKind::Z);
    }
    assert_eq!(screen.update(&mut ctx).unwrap(), Transition::To(ScreenId::Menu));
    assert_eq!(scores.entries(), &[1]);
}

#[test]
fn refocus_starts_a_clean_round() {
    let clock = ManualClock::new(0);
    let mut scores = HighScores::default();
    let mut ctx = ScreenContext {
        clock: &clock,
        high_scores: &mut scores,
    };
    let mut screen = game_screen();
    screen.focus(&mut ctx).unwrap();
    screen.core_mut().board_mut().fill_row(3, PieceKind::L);
    screen.update(&mut ctx).unwrap();
    assert!(screen.core().is_falling());

    clock.set(7_000);
    screen.focus(&mut ctx).unwrap();
    assert!(screen.core().board().is_empty());
    assert!(!screen.core().is_falling());
    assert_eq!(screen.core().points(), 0);
    assert_eq!(screen.core().last_update_ms(), 7_000);
    assert_eq!(screen.points_text().text(), "0");
}

#[test]
fn keys_drive_the_falling_piece() {
    let clock = ManualClock::new(0);
    let mut scores = HighScores::default();
    let mut ctx = ScreenContext {
        clock: &clock,
        high_scores: &mut scores,
    };
    let mut screen = game_screen();
    screen.focus(&mut ctx).unwrap();
    screen.core_mut().set_falling_piece_for_test(FallingPiece {
        relative: Point2D::new(4, 10),
        ..FallingPiece::spawn(PieceKind::I, 0)
    });

    assert_eq!(send(&mut screen, &mut ctx, Key::Left), Transition::Stay);
    assert_eq!(screen.core().falling_piece().relative, Point2D::new(3, 10));
    send(&mut screen, &mut ctx, Key::Right);
    send(&mut screen, &mut ctx, Key::Right);
    assert_eq!(screen.core().falling_piece().relative, Point2D::new(5, 10));

    clock.set(120);
    send(&mut screen, &mut ctx, Key::Down);
    assert_eq!(screen.core().falling_piece().relative, Point2D::new(5, 9));
    assert_eq!(screen.core().last_update_ms(), 120);

    send(&mut screen, &mut ctx, Key::Up);
    assert!(screen.core().falling_piece().cells().iter().all(|c| c.x == 5));

    assert_eq!(
        send(&mut screen, &mut ctx, Key::Escape),
        Transition::To(ScreenId::Menu)
    );
    assert!(scores.is_empty());
}
