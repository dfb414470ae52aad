//! Background music on top of `rodio`.
//!
//! Audio is optional: callers treat a failed [`MusicPlayer::new`] as "play silently".

use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::time::Duration;

use rodio::decoder::DecoderError;
use rodio::{Decoder, OutputStream, OutputStreamHandle, PlayError, Sink, Source, StreamError};

pub const MUSIC_FADE: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MusicTrack {
    /// Built-in looping arpeggio.
    Procedural,
    /// Any format `rodio` can decode, looped forever.
    File(PathBuf),
}

#[derive(Debug)]
pub enum AudioError {
    Device(StreamError),
    Sink(PlayError),
    Open(std::io::Error),
    Decode(DecoderError),
}

impl fmt::Display for AudioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AudioError::Device(err) => write!(f, "no audio output: {err}"),
            AudioError::Sink(err) => write!(f, "cannot open music sink: {err}"),
            AudioError::Open(err) => write!(f, "cannot open music file: {err}"),
            AudioError::Decode(err) => write!(f, "cannot decode music file: {err}"),
        }
    }
}

impl std::error::Error for AudioError {}

impl From<StreamError> for AudioError {
    fn from(err: StreamError) -> Self {
        AudioError::Device(err)
    }
}

impl From<PlayError> for AudioError {
    fn from(err: PlayError) -> Self {
        AudioError::Sink(err)
    }
}

impl From<std::io::Error> for AudioError {
    fn from(err: std::io::Error) -> Self {
        AudioError::Open(err)
    }
}

impl From<DecoderError> for AudioError {
    fn from(err: DecoderError) -> Self {
        AudioError::Decode(err)
    }
}

pub struct MusicPlayer {
    sink: Option<Sink>,
    handle: OutputStreamHandle,
    _stream: OutputStream,
    track: MusicTrack,
    volume: f32,
}

impl MusicPlayer {
    pub fn new(track: MusicTrack, volume: f32) -> Result<Self, AudioError> {
        let (stream, handle) = OutputStream::try_default()?;
        Ok(Self {
            sink: None,
            handle,
            _stream: stream,
            track,
            volume: volume.clamp(0.0, 1.0),
        })
    }

    /// Restarts the track from the beginning, fading it in.
    pub fn play_new(&mut self) -> Result<(), AudioError> {
        self.stop();
        let sink = Sink::try_new(&self.handle)?;
        sink.set_volume(self.volume);
        match &self.track {
            MusicTrack::Procedural => sink.append(Arpeggio::new().fade_in(MUSIC_FADE)),
            MusicTrack::File(path) => {
                let source = Decoder::new(BufReader::new(File::open(path)?))?;
                sink.append(source.repeat_infinite().fade_in(MUSIC_FADE));
            }
        }
        log::debug!("music started: {:?}", self.track);
        self.sink = Some(sink);
        Ok(())
    }

    pub fn stop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
    }

    pub fn is_playing(&self) -> bool {
        self.sink.as_ref().is_some_and(|s| !s.empty())
    }
}

/// Endless stereo arpeggio with a short envelope per note.
#[derive(Debug, Clone)]
pub struct Arpeggio {
    sample_rate: u32,
    channels: u16,
    frame: u64,
    chan: u16,
}

impl Arpeggio {
    const NOTES_HZ: [f32; 8] = [329.63, 392.0, 493.88, 392.0, 293.66, 349.23, 440.0, 349.23];

    pub fn new() -> Self {
        Self {
            sample_rate: 44_100,
            channels: 2,
            frame: 0,
            chan: 0,
        }
    }
}

impl Default for Arpeggio {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for Arpeggio {
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        let note_frames = (self.sample_rate as u64) / 5;
        let note = ((self.frame / note_frames) % Self::NOTES_HZ.len() as u64) as usize;
        let pos = self.frame % note_frames;
        let t = pos as f32 / self.sample_rate as f32;
        let phase = std::f32::consts::TAU * Self::NOTES_HZ[note] * t;

        let attack = (self.sample_rate as u64) / 100;
        let release = (self.sample_rate as u64) / 30;
        let env = if pos < attack {
            pos as f32 / attack as f32
        } else if pos >= note_frames - release {
            (note_frames - pos) as f32 / release as f32
        } else {
            1.0
        };

        let sample = (phase.sin() + (phase * 3.0).sin() * 0.15) * 0.25 * env;

        self.chan += 1;
        if self.chan >= self.channels {
            self.chan = 0;
            self.frame = self.frame.wrapping_add(1);
        }
        Some(sample)
    }
}

impl Source for Arpeggio {
    fn current_frame_len(&self) -> Option<usize> {
        None
    }

    fn channels(&self) -> u16 {
        self.channels
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn total_duration(&self) -> Option<Duration> {
        None
    }
}
