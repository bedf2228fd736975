//! Command handlers.
//!
//! Each handler works against one `SessionStore` built from the loaded
//! configuration; project and AI commands require a signed-in session.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::debug;

use flowplan_core::models::{NewProject, SuggestTasksRequest};
use flowplan_core::{ApiClient, BearerToken, Config, FileStorage, SessionStore};

use crate::cli::{Commands, ProjectsCommand, DEFAULT_ACCOUNT_NAME};
use crate::output;

pub struct App {
    pub session: SessionStore<FileStorage>,
    pub json: bool,
}

impl App {
    pub fn new(config: &Config, json: bool) -> Result<Self> {
        let api = ApiClient::new(config.backend_url.as_str())
            .context("Failed to create HTTP client")?;
        let storage = FileStorage::new(config.data_dir.clone());
        debug!(backend = %api.base_url(), data_dir = %storage.dir().display(), "Opening session");
        Ok(Self {
            session: SessionStore::open(api, storage),
            json,
        })
    }

    fn require_token(&self) -> Result<BearerToken> {
        self.session
            .bearer()
            .ok_or_else(|| anyhow::anyhow!("Not logged in. Run `flowplan login` first."))
    }

    fn print_json<T: Serialize>(&self, value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }
}

pub async fn run(app: &mut App, command: Commands) -> Result<()> {
    match command {
        Commands::Login { email, password } => {
            let password = password_or_prompt(password)?;
            let auth = app.session.login(&email, &password).await?;
            if app.json {
                return app.print_json(&auth.user);
            }
            println!("Logged in as {}", output::user_line(&auth.user));
        }
        Commands::Register {
            name,
            email,
            password,
        } => {
            let name = if name.trim().is_empty() {
                DEFAULT_ACCOUNT_NAME.to_string()
            } else {
                name
            };
            let password = password_or_prompt(password)?;
            let auth = app.session.register(&name, &email, &password).await?;
            if app.json {
                return app.print_json(&auth.user);
            }
            println!("Account created. Logged in as {}", output::user_line(&auth.user));
        }
        Commands::Logout => {
            app.session.logout();
            if !app.json {
                println!("Logged out");
            }
        }
        Commands::Whoami => match app.session.user() {
            Some(user) if app.json => app.print_json(user)?,
            Some(user) => println!("{}", output::user_line(user)),
            None if app.json => println!("null"),
            None => println!("Not logged in"),
        },
        Commands::Projects(ProjectsCommand::List) => {
            let token = app.require_token()?;
            let projects = app.session.api().list_projects(&token).await?;
            if app.json {
                return app.print_json(&projects);
            }
            if projects.is_empty() {
                println!("No projects yet");
            }
            for project in &projects {
                println!("{}", output::project_line(project));
            }
        }
        Commands::Projects(ProjectsCommand::Create { name, description }) => {
            let token = app.require_token()?;
            let project = app
                .session
                .api()
                .create_project(&token, &NewProject { name, description })
                .await?;
            if app.json {
                return app.print_json(&project);
            }
            println!("Created {}", output::project_line(&project));
        }
        Commands::Suggest {
            project_name,
            description,
            count,
        } => {
            let token = app.require_token()?;
            let request = SuggestTasksRequest {
                project_name,
                description,
                count,
            };
            let response = app.session.api().suggest_tasks(&token, &request).await?;
            if app.json {
                return app.print_json(&response);
            }
            if response.tasks.is_empty() {
                println!("No suggestions");
            }
            for (i, task) in response.tasks.iter().enumerate() {
                println!("{}", output::task_lines(i, task));
            }
        }
    }
    Ok(())
}

fn password_or_prompt(password: Option<String>) -> Result<String> {
    match password {
        Some(password) => Ok(password),
        None => rpassword::prompt_password("Password: ").context("Failed to read password"),
    }
}
