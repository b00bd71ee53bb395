//! Playback core for the teleprompter.
//!
//! Everything in here is GUI-agnostic: the state store, the scroll animator,
//! cue navigation, the layout metrics the renderer reports back, and the
//! snapshot replication used to drive the external display process.

pub mod animator;
pub mod cue;
pub mod layout;
pub mod model;
pub mod store;
pub mod sync;

pub use animator::{FrameOutcome, ScrollAnimator};
pub use cue::{CueNavigator, resolve_cue_target};
pub use layout::{ContentLayout, LayoutBlock, LayoutParams, max_scroll};
pub use model::{
    AppSettings, CueAction, CueDirection, CueStyle, PlaybackState, Script, ScriptId,
};
pub use store::{
    AppState, PlaybackPatch, PromptStore, ScriptPatch, SettingsPatch, StateCommand, StatePatch,
    SubscriptionId,
};
