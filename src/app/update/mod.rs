use std::path::PathBuf;

mod appearance;
mod core;
mod editor;
mod playback;
mod scripts;
mod sync;

/// Describes work that must be performed outside the pure reducer.
pub(super) enum Effect {
    OpenScriptFile(PathBuf),
    SaveScriptFile { content: String, path: PathBuf },
    OpenExternalDisplay,
    CloseExternalDisplay,
    SetFullscreen(bool),
    FocusWindow,
    QuitSafely,
}
