mod admin_editor;
mod editor_session;

pub use admin_editor::{
    listing_for, AdminEditor, DeleteConfirmation, DeleteOutcome, EditorError, SaveOutcome,
};
pub use editor_session::EditorSession;
