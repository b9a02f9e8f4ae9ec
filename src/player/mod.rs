pub mod null;
pub mod traits;
pub mod uri;

pub use null::NullOutput;
pub use traits::{AudioCommand, AudioOutput, PlayerStatus, RepeatMode};
pub use uri::parse_uri;
