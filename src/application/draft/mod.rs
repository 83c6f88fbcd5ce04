pub mod autosave;

pub use autosave::AutosaveSession;
