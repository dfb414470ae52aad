use std::error::Error;

use engine::app::{run, AppConfig};
use engine::audio::{MusicPlayer, MusicTrack};
use engine::surface::SurfaceSize;
use tetris::app::TetrisApp;
use tetris::clock::SystemClock;
use tetris::settings::{GameSettings, SettingsStore};

fn start_music(settings: &GameSettings) -> Option<MusicPlayer> {
    if !settings.audio.music_enabled {
        return None;
    }
    let track = match &settings.audio.music_path {
        Some(path) => MusicTrack::File(path.clone()),
        None => MusicTrack::Procedural,
    };
    match MusicPlayer::new(track, settings.audio.effective_music_gain()) {
        Ok(player) => Some(player),
        Err(err) => {
            log::warn!("audio disabled: {err}");
            None
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let store = SettingsStore::from_env();
    let settings = store.load();
    log::info!("settings loaded from {}", store.path().display());

    let music = start_music(&settings);
    let app = match TetrisApp::new(&settings, Box::new(SystemClock::new()), music) {
        Ok(app) => app,
        Err(err) => {
            log::error!("startup failed: {err}");
            return Err(err.into());
        }
    };

    let config = AppConfig {
        title: "Tetris".to_string(),
        size: SurfaceSize::new(settings.video.width, settings.video.height),
        vsync: settings.video.vsync,
    };
    run(config, app)
}
