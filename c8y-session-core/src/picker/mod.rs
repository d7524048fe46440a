//! Interactive session picker
//!
//! Picks exactly one session out of a list. Only redacted copies are ever
//! handed to the prompt, so passwords and TOTP secrets are never rendered;
//! [`restore_selection`] puts the credentials back afterwards.

use crate::error::PickerError;
use crate::types::SessionRecord;
use std::io;
use tracing::debug;

/// Picker behaviour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickOptions {
    /// Return the only session without prompting
    pub auto_select_if_only_one: bool,
}

impl Default for PickOptions {
    fn default() -> Self {
        Self {
            auto_select_if_only_one: true,
        }
    }
}

/// Presents a single-choice list and returns the chosen index
pub trait Prompter {
    fn select(&self, choices: &[SessionRecord]) -> Result<usize, PickerError>;
}

/// Prompter rendering on the terminal (stderr)
#[derive(Debug, Clone, Default)]
pub struct TerminalPrompter;

/// One picker row: value, label (also what typing filters on) and hint
fn rows(choices: &[SessionRecord]) -> Vec<(usize, String, String)> {
    choices
        .iter()
        .enumerate()
        .map(|(index, choice)| (index, choice.filter_value(), choice.description()))
        .collect()
}

impl Prompter for TerminalPrompter {
    fn select(&self, choices: &[SessionRecord]) -> Result<usize, PickerError> {
        let mut prompt = cliclack::select("Select a Cumulocity session").filter_mode();
        for (index, label, hint) in rows(choices) {
            prompt = prompt.item(index, label, hint);
        }

        prompt.interact().map_err(|e| match e.kind() {
            io::ErrorKind::Interrupted => PickerError::SelectionAborted,
            _ => PickerError::Prompt {
                reason: e.to_string(),
            },
        })
    }
}

/// Pick one session
///
/// The returned record is redacted; use [`restore_selection`] to get the
/// credentials back.
pub fn pick<P: Prompter + ?Sized>(
    records: &[SessionRecord],
    options: PickOptions,
    prompter: &P,
) -> Result<SessionRecord, PickerError> {
    match records {
        [] => Err(PickerError::NoMatch),
        [only] if options.auto_select_if_only_one => {
            debug!("Only one session matched, selecting it");
            Ok(only.redacted())
        }
        _ => {
            let choices: Vec<SessionRecord> = records.iter().map(SessionRecord::redacted).collect();
            let index = prompter.select(&choices)?;
            choices
                .into_iter()
                .nth(index)
                .ok_or_else(|| PickerError::Prompt {
                    reason: format!("selection index {} out of range", index),
                })
        }
    }
}

/// Re-attach the credentials of the picked session
pub fn restore_selection(mut picked: SessionRecord, records: &[SessionRecord]) -> SessionRecord {
    if let Some(full) = records.iter().find(|r| r.session_uri == picked.session_uri) {
        picked.restore_credentials(full);
    }
    picked
}
