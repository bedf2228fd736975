//! Text rendering for command results.

use flowplan_core::models::{Project, SuggestedTask, User};

pub fn user_line(user: &User) -> String {
    match (user.name().filter(|n| !n.is_empty()), user.email()) {
        (Some(name), Some(email)) => format!("{} <{}>", name, email),
        _ => user.display_name().to_string(),
    }
}

pub fn project_line(project: &Project) -> String {
    match project.description.as_deref() {
        Some(description) if !description.is_empty() => {
            format!("#{}  {}  {}", project.id, project.name, description)
        }
        _ => format!("#{}  {}", project.id, project.name),
    }
}

pub fn task_lines(index: usize, task: &SuggestedTask) -> String {
    let mut out = format!("{}. {}", index + 1, task.title);
    if !task.priority.is_empty() {
        out.push_str(&format!(" [{}]", task.priority));
    }
    if !task.description.is_empty() {
        out.push_str(&format!("\n   {}", task.description));
    }
    out
}
