pub mod keycodes;
pub mod router;

pub use router::{CaptureHandle, KeyRouter};
