mod audio_backend;

pub use audio_backend::{AudioBackend, MediaError, Playback};
