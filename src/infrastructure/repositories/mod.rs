pub mod audio_repository;
pub mod fs_audio_repository;
pub mod translate_tts_repository;
pub mod tts_repository;

pub use audio_repository::AudioRepository;
pub use fs_audio_repository::{FsAudioRepository, SequentialAudioRepository};
pub use translate_tts_repository::TranslateTtsRepository;
pub use tts_repository::TtsRepository;
