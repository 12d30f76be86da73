/// Scene file decoders and playlist handling for palcycle (JSON, IFF ILBM/PBM, Atari ST VDAT).

pub mod byterun;
pub mod ilbm;
pub mod json;
pub mod loader;
pub mod playlist;
pub mod reader;
pub mod vdat;

pub use ilbm::IlbmDecoder;
pub use json::JsonDecoder;
pub use loader::{decode_scene, load_scene};
pub use playlist::Playlist;
