use serde::{Deserialize, Serialize};

/// Payload of `POST /ai/suggest-tasks`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuggestTasksRequest {
    pub project_name: String,
    pub description: String,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestedTask {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub priority: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SuggestTasksResponse {
    #[serde(default)]
    pub tasks: Vec<SuggestedTask>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_tasks_is_empty() {
        let resp: SuggestTasksResponse = serde_json::from_value(json!({})).unwrap();
        assert!(resp.tasks.is_empty());
    }

    #[test]
    fn test_tasks_decode() {
        let resp: SuggestTasksResponse = serde_json::from_value(json!({
            "tasks": [{"title": "Audit pricing page", "description": "List gaps", "priority": "high"}]
        }))
        .unwrap();
        assert_eq!(resp.tasks[0].priority, "high");
    }
}
