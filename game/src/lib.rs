pub mod app;
pub mod board;
pub mod clock;
pub mod game_screen;
pub mod high_scores;
pub mod menu_screen;
pub mod pieces;
pub mod scores_screen;
pub mod screens;
pub mod settings;
pub mod tetris_core;
