//! Editor-drafted logging-time entries
//!
//! `add-logging-time` writes a zeroed JSON template next to the session
//! file, hands it to the user's editor, and reads the result back as the
//! entry to create.

use std::fs;
use std::path::Path;
use std::process::Command;

use anyhow::{bail, Context, Result};
use suft_domain::NewLoggingTime;

const DRAFT_FILE: &str = "logging_time.json";

/// Write the template, run the editor on it, and parse what the user saved.
pub fn compose(editor: &str, dir: &Path) -> Result<NewLoggingTime> {
    fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;
    let path = dir.join(DRAFT_FILE);
    let template = serde_json::to_string_pretty(&NewLoggingTime::default())?;
    fs::write(&path, template).with_context(|| format!("failed to write {}", path.display()))?;

    // The editor value may carry arguments ("code -w"); the first token is
    // the program.
    let mut parts = editor.split_whitespace();
    let program = parts.next().context("editor command is empty")?;
    let status = Command::new(program)
        .args(parts)
        .arg(&path)
        .status()
        .with_context(|| format!("failed to launch editor {editor:?}"))?;
    if !status.success() {
        bail!("editor {editor:?} exited with {status}");
    }

    let data =
        fs::read_to_string(&path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&data)
        .with_context(|| format!("draft {} is not a valid logging-time entry", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untouched_template_parses_as_the_zero_draft() {
        let dir = tempfile::tempdir().unwrap();
        // `true` exits without touching the file, leaving the template.
        let draft = compose("true", dir.path()).unwrap();
        assert_eq!(draft, NewLoggingTime::default());
    }

    #[test]
    fn failing_editor_aborts_the_draft() {
        let dir = tempfile::tempdir().unwrap();
        let err = compose("false", dir.path()).unwrap_err();
        assert!(err.to_string().contains("exited"));
    }

    #[test]
    fn missing_editor_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        assert!(compose("definitely-not-an-editor-binary", dir.path()).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn edited_draft_is_read_back() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let editor = dir.path().join("fake-editor.sh");
        fs::write(
            &editor,
            "#!/bin/sh\nprintf '%s' '{\"commentEmployee\":\"support\",\"day1Time\":1.5,\"day2Time\":0,\"day3Time\":0,\"day4Time\":0,\"day5Time\":0,\"day6Time\":0,\"day7Time\":0,\"projectId\":7,\"task\":\"ops\",\"workKindId\":21}' > \"$1\"\n",
        )
        .unwrap();
        fs::set_permissions(&editor, fs::Permissions::from_mode(0o755)).unwrap();

        let draft = compose(editor.to_str().unwrap(), dir.path()).unwrap();
        assert_eq!(draft.comment_employee, "support");
        assert_eq!(draft.day1_time, 1.5);
        assert_eq!(draft.work_kind_id, 21);
    }
}
