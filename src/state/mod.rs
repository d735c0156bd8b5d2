mod editor_state;
pub mod context;
mod persistence;

pub use context::{EditorContext, DEFAULT_COLOR, PALETTE};
pub use editor_state::{EditorState, Grab, GrabOffset};
pub use persistence::Preferences;
