//! Command dispatch with a render step after each command

use chrono::Utc;
use hrdesk_types::{level_label, EmployeeProject};
use std::fmt::Write as _;
use std::io::{self, Write};

use crate::command::{reduce, CommandOutcome, SkillCommand};
use crate::reconciler::SkillReconciler;
use crate::stats::SkillStats;

/// Side-effecting view of the skill list
pub trait Renderer {
    fn render(
        &mut self,
        list: &SkillReconciler,
        stats: &SkillStats,
        outcome: &CommandOutcome,
    ) -> io::Result<()>;
}

/// Owns the list, runs commands through [`reduce`] and re-renders
pub struct Dispatcher<R: Renderer> {
    state: SkillReconciler,
    projects: Vec<EmployeeProject>,
    renderer: R,
}

impl<R: Renderer> Dispatcher<R> {
    pub fn new(state: SkillReconciler, projects: Vec<EmployeeProject>, renderer: R) -> Self {
        Self {
            state,
            projects,
            renderer,
        }
    }

    pub fn dispatch(&mut self, command: SkillCommand) -> io::Result<CommandOutcome> {
        let transition = reduce(std::mem::take(&mut self.state), command);
        self.state = transition.state;
        let stats = self.stats();
        self.renderer
            .render(&self.state, &stats, &transition.outcome)?;
        Ok(transition.outcome)
    }

    pub fn stats(&self) -> SkillStats {
        SkillStats::compute(&self.state.assignments(), &self.projects, Utc::now())
    }

    pub fn state(&self) -> &SkillReconciler {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut SkillReconciler {
        &mut self.state
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn into_state(self) -> SkillReconciler {
        self.state
    }
}

/// Plain-text table of the list
pub fn render_table(list: &SkillReconciler) -> String {
    if list.is_empty() {
        return "No skills recorded yet. Add skills to track proficiency.\n".to_string();
    }
    let mut out = String::new();
    for (pos, row) in list.rows().iter().enumerate() {
        let a = &row.assignment;
        let name = if a.skill_name.is_empty() {
            "(type a skill...)"
        } else {
            a.skill_name.as_str()
        };
        let _ = writeln!(
            out,
            "{:>3}. {:<28} {:<16} {:>2} - {:<14} {}",
            pos,
            name,
            a.category_name,
            a.proficiency_level,
            level_label(a.proficiency_level),
            a.evidence
        );
    }
    out
}

/// Writes the table and statistics to any [`Write`] sink
pub struct TextRenderer<W: Write> {
    out: W,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn render(
        &mut self,
        list: &SkillReconciler,
        stats: &SkillStats,
        outcome: &CommandOutcome,
    ) -> io::Result<()> {
        match outcome {
            CommandOutcome::RowAdded(id) => {
                let pos = list.position_of(*id).unwrap_or_default();
                writeln!(self.out, "Added row {pos}")?;
            }
            CommandOutcome::Merged(counts) => writeln!(
                self.out,
                "Resume merged: {} added, {} updated. Save to keep these changes.",
                counts.added, counts.updated
            )?,
            CommandOutcome::Ignored { reason } => writeln!(self.out, "Ignored: {reason}")?,
            CommandOutcome::RowUpdated(_) | CommandOutcome::RowRemoved(_) => {}
        }
        write!(self.out, "{}", render_table(list))?;
        writeln!(self.out, "{stats}")
    }
}
