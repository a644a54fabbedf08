pub mod assist;
pub mod editor;
pub mod history;
pub mod input;
pub mod inspector;
pub mod selection;
pub mod session;
pub mod shortcuts;
pub mod tools;

pub use editor::SceneEditor;
pub use history::History;
pub use session::{EditorSession, ViewMode};
