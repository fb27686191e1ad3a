//! Commands over the skill list and the pure reducer that applies them

use hrdesk_types::ResumeExtractedSkill;
use tracing::warn;

use crate::reconciler::{MergeCounts, SkillReconciler};
use crate::row::RowId;

/// One user action on the skill list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkillCommand {
    AddBlankRow,
    SetName { row: RowId, text: String },
    SetLevel { row: RowId, level: i32 },
    SetEvidence { row: RowId, text: String },
    RemoveRow { row: RowId },
    MergeResume(Vec<ResumeExtractedSkill>),
}

/// What a command did, for the render step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// A row was appended; it should receive focus
    RowAdded(RowId),
    RowUpdated(RowId),
    RowRemoved(RowId),
    Merged(MergeCounts),
    /// The command referenced something that no longer exists
    Ignored { reason: String },
}

/// New state plus outcome
#[derive(Debug, Clone)]
pub struct Transition {
    pub state: SkillReconciler,
    pub outcome: CommandOutcome,
}

/// Apply `command` to `state`
pub fn reduce(mut state: SkillReconciler, command: SkillCommand) -> Transition {
    let outcome = match command {
        SkillCommand::AddBlankRow => CommandOutcome::RowAdded(state.add_blank_row()),
        SkillCommand::SetName { row, text } => updated(row, state.set_row_name(row, &text)),
        SkillCommand::SetLevel { row, level } => updated(row, state.set_row_level(row, level)),
        SkillCommand::SetEvidence { row, text } => {
            updated(row, state.set_row_evidence(row, &text))
        }
        SkillCommand::RemoveRow { row } => match state.remove_row(row) {
            Some(_) => CommandOutcome::RowRemoved(row),
            None => missing(row),
        },
        SkillCommand::MergeResume(skills) => {
            CommandOutcome::Merged(state.merge_resume_skills(&skills))
        }
    };
    Transition { state, outcome }
}

fn updated(row: RowId, found: bool) -> CommandOutcome {
    if found {
        CommandOutcome::RowUpdated(row)
    } else {
        missing(row)
    }
}

fn missing(row: RowId) -> CommandOutcome {
    warn!(row = %row, "Command addressed a row that no longer exists");
    CommandOutcome::Ignored {
        reason: format!("row {row} not found"),
    }
}
