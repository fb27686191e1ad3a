use crate::config::Config;
use crate::edit_session;
use crate::{
    CatalogAction, Commands, DirectoryAction, EmployeeAction, ProjectAction, SkillsAction,
};
use anyhow::{Context, Result};
use chrono::Utc;
use hrdesk_client::HrClient;
use hrdesk_editors::{
    CatalogEditor, EmployeeDirectory, EmployeeEditor, ProjectPanel, SkillsDashboard,
};
use hrdesk_persistence::LocalStore;
use hrdesk_reconciler::render_table;
use hrdesk_types::{initials, EmployeeDraft, EmployeeId, ProjectId};
use std::path::Path;
use tracing::{info, warn};

/// Runs one command against the HR server
pub struct HrDeskService {
    config: Config,
    client: HrClient,
}

impl HrDeskService {
    pub fn new(config: Config) -> Result<Self> {
        let client = HrClient::new(&config.server)
            .with_context(|| format!("Invalid server URL {}", config.server.base_url))?;
        info!("Using HR server at {}", client.base_url());
        Ok(Self { config, client })
    }

    pub async fn run(self, command: Commands) -> Result<()> {
        match command {
            Commands::Version => println!("hrdesk {}", env!("CARGO_PKG_VERSION")),
            Commands::Me => self.me().await?,
            Commands::Logout => {
                self.client.logout().await?;
                println!("Logged out.");
            }
            Commands::Employee { action } => self.employee(action).await?,
            Commands::Skills { action } => self.skills(action).await?,
            Commands::Catalog { action } => self.catalog(action).await?,
            Commands::Project { action } => self.project(action).await?,
            Commands::Directory { action } => self.directory(action).await?,
        }
        Ok(())
    }

    async fn me(&self) -> Result<()> {
        let session = self.client.me().await?;
        println!(
            "{} <{}>",
            session.manager_name.as_deref().unwrap_or("Unknown"),
            session.manager_email.as_deref().unwrap_or("")
        );
        if let Some(department) = session.department_name {
            println!("Department: {department}");
        }
        Ok(())
    }

    async fn employee(&self, action: EmployeeAction) -> Result<()> {
        match action {
            EmployeeAction::Show { id } => {
                let editor = EmployeeEditor::open(&self.client, Some(id)).await?;
                print_form(editor.form(), &editor);
            }
            EmployeeAction::Save {
                id,
                firstname,
                lastname,
                title,
                department,
                email,
                phone,
            } => {
                let mut editor = EmployeeEditor::open(&self.client, id).await?;
                editor.begin_edit();
                if let Some(form) = editor.form_mut() {
                    let fields = [
                        (&mut form.firstname, firstname),
                        (&mut form.lastname, lastname),
                        (&mut form.title, title),
                        (&mut form.department, department),
                        (&mut form.email, email),
                        (&mut form.phone, phone),
                    ];
                    for (field, value) in fields {
                        if let Some(value) = value {
                            *field = value;
                        }
                    }
                }
                let saved = editor.submit(&self.client).await?;
                println!("Saved employee {saved}.");
            }
            EmployeeAction::Delete { id } => {
                self.client.delete_employee(id).await?;
                println!("Employee {id} deleted.");
            }
        }
        Ok(())
    }

    async fn skills(&self, action: SkillsAction) -> Result<()> {
        match action {
            SkillsAction::Show { id } => {
                let dashboard = SkillsDashboard::load(&self.client, id).await?;
                print_dashboard(&dashboard);
            }
            SkillsAction::Edit { id } => {
                let stdin = tokio::io::BufReader::new(tokio::io::stdin());
                edit_session::run(&self.client, id, stdin).await?;
            }
            SkillsAction::MergeResume { id, file, save } => {
                self.merge_resume(id, &file, save).await?;
            }
        }
        Ok(())
    }

    async fn merge_resume(&self, id: EmployeeId, file: &Path, save: bool) -> Result<()> {
        let bytes = tokio::fs::read(file)
            .await
            .with_context(|| format!("Failed to read {}", file.display()))?;
        let file_name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "resume".to_string());

        let mut dashboard = SkillsDashboard::load(&self.client, id).await?;
        let counts = dashboard
            .import_resume(&self.client, &file_name, bytes)
            .await?;
        println!(
            "Resume merged: {} added, {} updated.",
            counts.added, counts.updated
        );

        if save {
            match dashboard.save(&self.client).await {
                Ok(count) => println!("Saved {count} skills."),
                Err(e) => {
                    warn!(employee_id = id, "Skill save failed: {}", e);
                    anyhow::bail!(e.user_message());
                }
            }
        } else {
            println!("Not saved; rerun with --save to keep these changes.");
        }
        print_dashboard(&dashboard);
        Ok(())
    }

    async fn catalog(&self, action: CatalogAction) -> Result<()> {
        let mut editor = match self.config.session.manager_id {
            Some(manager_id) => CatalogEditor::load(&self.client, manager_id).await?,
            None => CatalogEditor::for_session(&self.client).await?,
        };
        match action {
            CatalogAction::List { query } => {
                let skills = editor.filter(query.as_deref().unwrap_or(""));
                if skills.is_empty() {
                    println!("No skills match.");
                }
                for skill in skills {
                    println!(
                        "{:>5}  {:<32} {}",
                        skill.skill_id,
                        skill.skill_name,
                        editor.category_name(skill.category_id)
                    );
                }
            }
            CatalogAction::Add { name, category } => {
                editor.add(&self.client, &name, category).await?;
                println!("Added. Catalog now has {} skills.", editor.clear_filter().len());
            }
            CatalogAction::Update {
                skill_id,
                name,
                category,
            } => {
                editor.update(&self.client, skill_id, &name, category).await?;
                println!("Skill {skill_id} updated.");
            }
            CatalogAction::Delete { skill_id } => {
                editor.delete(&self.client, skill_id).await?;
                println!("Skill {skill_id} deleted.");
            }
        }
        Ok(())
    }

    async fn project(&self, action: ProjectAction) -> Result<()> {
        let message = match action {
            ProjectAction::Show { id } => {
                let panel = ProjectPanel::load(&self.client, id).await?;
                print_project(&panel);
                return Ok(());
            }
            ProjectAction::Update {
                id,
                status,
                priority,
                start,
                end,
            } => {
                let mut panel = ProjectPanel::load(&self.client, id).await?;
                let mut details = panel.details();
                if let Some(status) = status {
                    details.status = status;
                }
                if let Some(priority) = priority {
                    details.priority = priority;
                }
                if let Some(start) = start {
                    details.start_date = start;
                }
                if let Some(end) = end {
                    details.end_date = end;
                }
                panel.save_details(&self.client, &details).await?
            }
            ProjectAction::AddMember { id, member, role } => {
                let mut panel = self.panel(id).await?;
                panel.add_member(&self.client, &member, &role).await?
            }
            ProjectAction::EditMember { id, member, role } => {
                let mut panel = self.panel(id).await?;
                panel.edit_member(&self.client, &member, &role).await?
            }
            ProjectAction::RemoveMember { id, member } => {
                let mut panel = self.panel(id).await?;
                panel.remove_member(&self.client, &member).await?
            }
            ProjectAction::Delete { id } => {
                let panel = self.panel(id).await?;
                panel.delete_project(&self.client).await?
            }
        };
        println!("{message}");
        Ok(())
    }

    async fn panel(&self, id: ProjectId) -> Result<ProjectPanel> {
        Ok(ProjectPanel::load(&self.client, id).await?)
    }

    async fn directory(&self, action: DirectoryAction) -> Result<()> {
        let store = LocalStore::new(&self.config.database.path).await?;
        let directory = EmployeeDirectory::new(store);
        match action {
            DirectoryAction::List { query } => {
                let entries = directory.list(&query.join(" ")).await?;
                if entries.is_empty() {
                    println!("No employees found.");
                }
                for entry in entries {
                    println!(
                        "[{:<2}] {:>4}  {:<24} {:<20} {:<16} {}",
                        initials(&entry.full_name),
                        entry.id,
                        entry.full_name,
                        entry.title,
                        entry.department,
                        entry.email
                    );
                }
            }
            DirectoryAction::Sync => {
                let count = directory.sync(&self.client).await?;
                println!("Synced {count} employees.");
            }
            DirectoryAction::Remove { id } => {
                directory.remove(&id).await?;
                println!("Removed {id}.");
            }
        }
        Ok(())
    }
}

fn print_form(form: &EmployeeDraft, editor: &EmployeeEditor) {
    let department = editor
        .departments()
        .iter()
        .find(|d| d.dep_id.to_string() == form.department)
        .map(|d| d.departmentname.clone())
        .unwrap_or_else(|| form.department.clone());
    println!("{} {}", form.firstname, form.lastname);
    println!("  Title:      {}", form.title);
    println!("  Department: {department}");
    println!("  Email:      {}", form.email);
    println!("  Phone:      {}", form.phone);
}

fn print_dashboard(dashboard: &SkillsDashboard) {
    println!("{}", dashboard.employee().display_name());
    print!("{}", render_table(dashboard.skills()));
    println!("{}", dashboard.stats(Utc::now()));
    for project in dashboard.projects() {
        println!(
            "  {} [{}] {}",
            project.project_name,
            project.status,
            project.role.as_deref().unwrap_or("")
        );
    }
}

fn print_project(panel: &ProjectPanel) {
    let project = panel.project();
    let details = panel.details();
    println!("{} (#{})", project.project_name, project.project_id);
    println!("  Status:   {}", details.status);
    println!("  Priority: {}", details.priority);
    println!("  Dates:    {} to {}", details.start_date, details.end_date);
    println!("  Members:");
    if panel.members().is_empty() {
        println!("    No members yet");
    }
    for member in panel.members() {
        println!(
            "    {:>4}  {:<24} {}",
            member.emp_id.map(|id| id.to_string()).unwrap_or_default(),
            member.full_name.as_deref().unwrap_or("Unknown"),
            member.role_or_default()
        );
    }
    let skills: Vec<&str> = panel.skills().iter().map(|s| s.skill_name.as_str()).collect();
    if skills.is_empty() {
        println!("  Skills:   No skills saved");
    } else {
        println!("  Skills:   {}", skills.join(", "));
    }
}

