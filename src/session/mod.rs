//! Conversation-session management.
//!
//! Keeps a bounded window of question/answer exchanges per session and
//! renders it as the plain-text history blob the agent appends to its
//! system instruction.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use uuid::Uuid;

/// One question/answer exchange.
#[derive(Debug, Clone)]
struct Exchange {
    user: String,
    assistant: String,
}

/// In-memory session manager.
pub struct SessionManager {
    sessions: Mutex<HashMap<String, VecDeque<Exchange>>>,
    max_history: usize,
}

impl SessionManager {
    /// Create a manager that remembers `max_history` exchanges per session.
    pub fn new(max_history: usize) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            max_history,
        }
    }

    /// Create a new session and return its id.
    pub fn create_session(&self) -> String {
        let id = Uuid::new_v4().to_string();
        self.sessions
            .lock()
            .unwrap()
            .insert(id.clone(), VecDeque::new());
        id
    }

    /// Record one exchange, evicting the oldest beyond the history window.
    pub fn add_exchange(&self, session_id: &str, user: &str, assistant: &str) {
        let mut sessions = self.sessions.lock().unwrap();
        let history = sessions.entry(session_id.to_string()).or_default();
        history.push_back(Exchange {
            user: user.to_string(),
            assistant: assistant.to_string(),
        });
        while history.len() > self.max_history {
            history.pop_front();
        }
    }

    /// Render a session's history, or `None` when there is nothing to show.
    pub fn get_history(&self, session_id: &str) -> Option<String> {
        let sessions = self.sessions.lock().unwrap();
        let history = sessions.get(session_id)?;
        if history.is_empty() {
            return None;
        }

        let lines: Vec<String> = history
            .iter()
            .map(|e| format!("User: {}\nAssistant: {}", e.user, e.assistant))
            .collect();
        Some(lines.join("\n"))
    }

    /// Forget a session's history.
    pub fn clear_session(&self, session_id: &str) {
        if let Some(history) = self.sessions.lock().unwrap().get_mut(session_id) {
            history.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_format() {
        let manager = SessionManager::new(2);
        let id = manager.create_session();

        manager.add_exchange(&id, "What is MCP?", "Model Context Protocol");

        let history = manager.get_history(&id).unwrap();
        assert_eq!(history, "User: What is MCP?\nAssistant: Model Context Protocol");
    }

    #[test]
    fn test_history_truncates_to_window() {
        let manager = SessionManager::new(2);
        let id = manager.create_session();

        manager.add_exchange(&id, "q1", "a1");
        manager.add_exchange(&id, "q2", "a2");
        manager.add_exchange(&id, "q3", "a3");

        let history = manager.get_history(&id).unwrap();
        assert!(!history.contains("q1"));
        assert!(history.contains("q2"));
        assert!(history.contains("q3"));
    }

    #[test]
    fn test_unknown_and_empty_sessions() {
        let manager = SessionManager::new(2);
        assert!(manager.get_history("missing").is_none());

        let id = manager.create_session();
        assert!(manager.get_history(&id).is_none());
    }

    #[test]
    fn test_clear_session() {
        let manager = SessionManager::new(2);
        let id = manager.create_session();
        manager.add_exchange(&id, "q", "a");

        manager.clear_session(&id);
        assert!(manager.get_history(&id).is_none());
    }

    #[test]
    fn test_add_exchange_creates_unknown_session() {
        let manager = SessionManager::new(2);
        manager.add_exchange("adhoc", "q", "a");
        assert!(manager.get_history("adhoc").is_some());
    }
}
