//! In-process navigation history.

use loom_core::ports::Navigator;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// A [`Navigator`] keeping the visited locations in memory.
///
/// Used when loom is hosted outside a browser router: the CLI and tests.
#[derive(Debug)]
pub struct HistoryNavigator {
    history: Mutex<Vec<String>>,
}

impl HistoryNavigator {
    /// Starts at `initial`, which may carry a query string.
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            history: Mutex::new(vec![initial.into()]),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<String>> {
        self.history.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn current_location(&self) -> String {
        self.lock().last().cloned().unwrap_or_else(|| "/".to_string())
    }

    /// Every location visited, oldest first.
    pub fn history(&self) -> Vec<String> {
        self.lock().clone()
    }

    /// Returns to the previous location, if any.
    pub fn back(&self) -> Option<String> {
        let mut history = self.lock();
        if history.len() > 1 {
            history.pop();
        }
        history.last().cloned()
    }
}

impl Default for HistoryNavigator {
    fn default() -> Self {
        Self::new("/")
    }
}

impl Navigator for HistoryNavigator {
    fn navigate_to(&self, path: &str) {
        tracing::debug!(path, "Navigating");
        self.lock().push(path.to_string());
    }

    fn current_path(&self) -> String {
        let location = self.current_location();
        match location.split_once('?') {
            Some((path, _)) => path.to_string(),
            None => location,
        }
    }

    fn current_query_param(&self, name: &str) -> Option<String> {
        let location = self.current_location();
        let (_, query) = location.split_once('?')?;
        query
            .split('&')
            .filter_map(|pair| match pair.split_once('=') {
                Some((key, value)) => Some((key, value)),
                None if !pair.is_empty() => Some((pair, "")),
                None => None,
            })
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_and_query() {
        let nav = HistoryNavigator::new("/documents/d1?assistant=open&tab=2");
        assert_eq!(nav.current_path(), "/documents/d1");
        assert_eq!(nav.current_query_param("assistant").as_deref(), Some("open"));
        assert_eq!(nav.current_query_param("tab").as_deref(), Some("2"));
        assert_eq!(nav.current_query_param("missing"), None);
    }

    #[test]
    fn test_flag_without_value() {
        let nav = HistoryNavigator::new("/?assistant");
        assert_eq!(nav.current_query_param("assistant").as_deref(), Some(""));
    }

    #[test]
    fn test_navigate_and_back() {
        let nav = HistoryNavigator::default();
        nav.navigate_to("/chat/c1");
        assert_eq!(nav.current_path(), "/chat/c1");
        assert_eq!(nav.back().as_deref(), Some("/"));
        assert_eq!(nav.back().as_deref(), Some("/"));
        assert_eq!(nav.history(), vec!["/".to_string()]);
    }
}
