//! Navigation collaborator interface and route paths.

/// Page routing as seen by the orchestrator.
pub trait Navigator: Send + Sync {
    fn navigate_to(&self, path: &str);

    fn current_path(&self) -> String;

    fn current_query_param(&self, name: &str) -> Option<String>;
}

/// Route paths of the locations the orchestrator navigates to.
pub mod routes {
    /// Query parameter that asks for the assistant panel to be open.
    pub const ASSISTANT_QUERY_PARAM: &str = "assistant";

    pub fn chat(chat_id: &str) -> String {
        format!("/chat/{}", chat_id)
    }

    /// The dedicated full-screen editor location.
    pub fn document_fullscreen(document_id: Option<&str>) -> String {
        match document_id {
            Some(id) => format!("/documents/{}/fullscreen", id),
            None => "/documents/fullscreen".to_string(),
        }
    }

    pub fn app(app_id: &str) -> String {
        format!("/apps/{}", app_id)
    }

    pub fn is_document_fullscreen(path: &str) -> bool {
        let path = path.split('?').next().unwrap_or(path);
        path.starts_with("/documents/") && path.trim_end_matches('/').ends_with("/fullscreen")
    }
}
