//! Local audio file adapters

mod local_dir;

pub use local_dir::LocalAudioDir;
