//! Line-oriented skill editing on a terminal
//!
//! Rows are addressed by the position shown in the table; each position is
//! resolved to its row id when the line is parsed.

use anyhow::{anyhow, bail, Result};
use hrdesk_client::HrClient;
use hrdesk_editors::SkillsDashboard;
use hrdesk_reconciler::{
    render_table, Dispatcher, RowId, SkillCommand, SkillReconciler, TextRenderer,
};
use hrdesk_types::EmployeeId;
use std::io::{self, Write};
use std::path::PathBuf;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::warn;

const HELP: &str = "\
Commands:
  add                      append a blank row
  name <row> <skill>       set the skill name (matched against the catalog)
  level <row> <0-10>       set the proficiency level
  evidence <row> <text>    set the evidence text
  remove <row>             delete a row
  resume <file>            upload a resume and merge the extracted skills
  show                     print the table again
  save                     replace the stored skills with this list
  quit                     leave without saving";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditLine {
    Command(SkillCommand),
    Resume(PathBuf),
    Show,
    Save,
    Help,
    Quit,
}

pub fn parse_line(line: &str, list: &SkillReconciler) -> Result<EditLine> {
    let line = line.trim();
    let (verb, rest) = line
        .split_once(char::is_whitespace)
        .map(|(v, r)| (v, r.trim()))
        .unwrap_or((line, ""));

    let parsed = match verb.to_lowercase().as_str() {
        "add" => EditLine::Command(SkillCommand::AddBlankRow),
        "name" => {
            let (row, text) = row_and_text(rest, list)?;
            EditLine::Command(SkillCommand::SetName { row, text })
        }
        "level" => {
            let (row, text) = row_and_text(rest, list)?;
            let level = text
                .parse()
                .map_err(|_| anyhow!("Level must be a number, got '{}'", text))?;
            EditLine::Command(SkillCommand::SetLevel { row, level })
        }
        "evidence" => {
            let (row, text) = row_and_text(rest, list)?;
            EditLine::Command(SkillCommand::SetEvidence { row, text })
        }
        "remove" => EditLine::Command(SkillCommand::RemoveRow {
            row: row_at(rest, list)?,
        }),
        "resume" if !rest.is_empty() => EditLine::Resume(PathBuf::from(rest)),
        "resume" => bail!("Usage: resume <file>"),
        "show" | "" => EditLine::Show,
        "save" => EditLine::Save,
        "help" | "?" => EditLine::Help,
        "quit" | "exit" => EditLine::Quit,
        other => bail!("Unknown command '{}'; type help", other),
    };
    Ok(parsed)
}

fn row_and_text(rest: &str, list: &SkillReconciler) -> Result<(RowId, String)> {
    let (pos, text) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
    Ok((row_at(pos, list)?, text.trim().to_string()))
}

fn row_at(pos: &str, list: &SkillReconciler) -> Result<RowId> {
    let index: usize = pos
        .trim()
        .parse()
        .map_err(|_| anyhow!("Expected a row number, got '{}'", pos))?;
    list.row_id_at(index)
        .ok_or_else(|| anyhow!("No row {}", index))
}

/// Run an editing session reading commands from `input`
pub async fn run<R>(client: &HrClient, employee_id: EmployeeId, input: R) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let dashboard = SkillsDashboard::load(client, employee_id).await?;
    println!("Editing skills of {}", dashboard.employee().display_name());
    let (list, projects) = dashboard.into_parts();
    let mut dispatcher = Dispatcher::new(list, projects, TextRenderer::new(io::stdout()));
    print!("{}", render_table(dispatcher.state()));
    println!("{}", dispatcher.stats());
    println!("Type help for commands.");

    let mut lines = input.lines();
    loop {
        print!("skills> ");
        io::stdout().flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };

        let parsed = match parse_line(&line, dispatcher.state()) {
            Ok(parsed) => parsed,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };

        match parsed {
            EditLine::Command(command) => {
                dispatcher.dispatch(command)?;
            }
            EditLine::Resume(path) => {
                let bytes = match tokio::fs::read(&path).await {
                    Ok(bytes) => bytes,
                    Err(e) => {
                        println!("Cannot read {}: {}", path.display(), e);
                        continue;
                    }
                };
                let file_name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "resume".to_string());
                match client.upload_resume(employee_id, &file_name, bytes).await {
                    Ok(extracted) => {
                        dispatcher.dispatch(SkillCommand::MergeResume(extracted))?;
                    }
                    Err(e) => println!("Resume upload failed: {e}"),
                }
            }
            EditLine::Show => {
                print!("{}", render_table(dispatcher.state()));
                println!("{}", dispatcher.stats());
            }
            EditLine::Save => match dispatcher.state_mut().save(client, employee_id).await {
                Ok(count) => println!("Saved {count} skills."),
                Err(e) => {
                    warn!(employee_id, "Skill save failed: {}", e);
                    println!("{}", e.user_message());
                }
            },
            EditLine::Help => println!("{HELP}"),
            EditLine::Quit => break,
        }
    }
    Ok(())
}
