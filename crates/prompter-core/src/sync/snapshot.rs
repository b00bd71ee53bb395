use crate::model::{AppSettings, PlaybackState, ScriptId};
use crate::store::AppState;
use serde::{Deserialize, Serialize};

pub const SNAPSHOT_SCHEMA_VERSION: u32 = 1;

/// Everything the external display needs to paint one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncSnapshot {
    pub version: u32,
    /// Monotonic per publisher; receivers drop anything not newer than the
    /// last applied snapshot.
    pub seq: u64,
    pub playback: PlaybackState,
    pub settings: AppSettings,
    pub active_script_id: ScriptId,
    #[serde(default)]
    pub script_content: Option<String>,
}

impl SyncSnapshot {
    pub fn capture(state: &AppState, seq: u64) -> Self {
        Self {
            version: SNAPSHOT_SCHEMA_VERSION,
            seq,
            playback: state.playback.clone(),
            settings: state.settings.clone(),
            active_script_id: state.active_script_id.clone(),
            script_content: state.active_script().map(|script| script.content.clone()),
        }
    }

    pub fn validate(&self) -> Result<(), SnapshotError> {
        if self.version != SNAPSHOT_SCHEMA_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: self.version,
                expected: SNAPSHOT_SCHEMA_VERSION,
            });
        }
        if !self.playback.speed.is_finite() || self.playback.speed <= 0.0 {
            return Err(SnapshotError::InvalidField {
                field: "playback.speed",
            });
        }
        if !self.playback.scroll_position.is_finite() || self.playback.scroll_position < 0.0 {
            return Err(SnapshotError::InvalidField {
                field: "playback.scroll_position",
            });
        }
        if self.active_script_id.trim().is_empty() {
            return Err(SnapshotError::InvalidField {
                field: "active_script_id",
            });
        }
        Ok(())
    }
}

/// One line on the external display's stdin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DisplayCommand {
    Snapshot(SyncSnapshot),
    Focus,
    Shutdown,
}

impl DisplayCommand {
    pub fn name(&self) -> &'static str {
        match self {
            DisplayCommand::Snapshot(_) => "snapshot",
            DisplayCommand::Focus => "focus",
            DisplayCommand::Shutdown => "shutdown",
        }
    }

    /// Serialize without the trailing newline.
    pub fn encode_line(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn decode_line(line: &str) -> Result<Self, SnapshotError> {
        let line = line.trim();
        let command = match serde_json::from_str::<DisplayCommand>(line) {
            Ok(command) => command,
            Err(err) => {
                // Version mismatch wins over the parse error.
                if let Ok(VersionProbe {
                    version: Some(found),
                }) = serde_json::from_str::<VersionProbe>(line)
                {
                    if found != SNAPSHOT_SCHEMA_VERSION {
                        return Err(SnapshotError::UnsupportedVersion {
                            found,
                            expected: SNAPSHOT_SCHEMA_VERSION,
                        });
                    }
                }
                return Err(err.into());
            }
        };
        if let DisplayCommand::Snapshot(snapshot) = &command {
            snapshot.validate()?;
        }
        Ok(command)
    }
}

#[derive(Deserialize)]
struct VersionProbe {
    version: Option<u32>,
}

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("Malformed display command: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Unsupported snapshot version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("Invalid snapshot field: {field}")]
    InvalidField { field: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_line_carries_kind_tag_and_active_content() {
        let state = AppState::default();
        let line = DisplayCommand::Snapshot(SyncSnapshot::capture(&state, 3))
            .encode_line()
            .expect("encode snapshot");

        assert!(line.starts_with(r#"{"kind":"snapshot""#));
        assert!(!line.contains('\n'));
        let decoded = DisplayCommand::decode_line(&line).expect("decode snapshot");
        let DisplayCommand::Snapshot(snapshot) = decoded else {
            panic!("expected snapshot, got {decoded:?}");
        };
        assert_eq!(snapshot.seq, 3);
        assert_eq!(snapshot.active_script_id, "1");
        assert_eq!(
            snapshot.script_content.as_deref(),
            Some(state.active_content())
        );
    }

    #[test]
    fn control_commands_are_bare_tags() {
        assert_eq!(
            DisplayCommand::Focus.encode_line().expect("encode focus"),
            r#"{"kind":"focus"}"#
        );
        assert_eq!(
            DisplayCommand::decode_line("{\"kind\":\"shutdown\"}\n").expect("decode shutdown"),
            DisplayCommand::Shutdown
        );
    }

    #[test]
    fn rejects_other_schema_versions() {
        let line = r#"{"kind":"snapshot","version":2,"seq":1,"frame":{}}"#;
        let err = DisplayCommand::decode_line(line).expect_err("version 2 must be rejected");
        assert!(matches!(
            err,
            SnapshotError::UnsupportedVersion {
                found: 2,
                expected: 1
            }
        ));
    }

    #[test]
    fn rejects_garbage_and_bad_fields() {
        assert!(matches!(
            DisplayCommand::decode_line("not json"),
            Err(SnapshotError::Malformed(_))
        ));

        let mut snapshot = SyncSnapshot::capture(&AppState::default(), 1);
        snapshot.playback.scroll_position = -5.0;
        let line = DisplayCommand::Snapshot(snapshot)
            .encode_line()
            .expect("encode snapshot");
        assert!(matches!(
            DisplayCommand::decode_line(&line),
            Err(SnapshotError::InvalidField {
                field: "playback.scroll_position"
            })
        ));
    }
}
