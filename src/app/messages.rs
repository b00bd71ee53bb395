use crate::external::InboxEvent;
use crate::file_io::OpenedText;
use iced::keyboard::{Key, Modifiers};
use iced::widget::text_editor;
use iced::window;
use prompter_core::{CueDirection, CueStyle, ScriptId};
use std::path::PathBuf;
use std::time::Instant;

/// Messages emitted by the UI.
#[derive(Debug, Clone)]
pub enum Message {
    TogglePlayPause,
    SpeedUp,
    SlowDown,
    SetSpeed(f32),
    ResetPlayback,
    NextCue,
    PrevCue,
    Frame(Instant),
    ElapsedTick,
    Wheel(f32),
    MarkerClicked(usize),
    SurfaceResized {
        width: f32,
        height: f32,
    },
    FontSizeChanged(u32),
    ToggleMirror,
    CueEnabledChanged(bool),
    CueStyleSelected(CueStyle),
    CuePositionChanged(u8),
    CueColorSelected(String),
    CueOpacityChanged(u8),
    CueThicknessChanged(u8),
    ToggleSettings,
    ToggleSidebar,
    ToggleFullscreen,
    AddScript,
    DeleteScript(ScriptId),
    SelectScript(ScriptId),
    OpenPathInputChanged(String),
    OpenPathRequested,
    ScriptFileOpened {
        path: PathBuf,
        result: Result<OpenedText, String>,
    },
    ExportActiveScript,
    ScriptFileSaved(Result<PathBuf, String>),
    ToggleEditor,
    EditorAction(text_editor::Action),
    EditorNameChanged(String),
    SaveEditor,
    InsertCuePoint,
    EditorCueNav(CueDirection),
    SmartCaps,
    AutosaveTick(Instant),
    ClosePanel,
    OpenExternalDisplay,
    CloseExternalDisplay,
    SyncTick(Instant),
    DisplayInbox(InboxEvent),
    WindowOpened(window::Id),
    WindowResized {
        width: f32,
        height: f32,
    },
    KeyPressed {
        key: Key,
        modifiers: Modifiers,
    },
    PollSystemSignals,
    SafeQuit,
}
