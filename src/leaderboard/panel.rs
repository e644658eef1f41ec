use super::client::{validate_nickname, LeaderboardEntry, MAX_NICKNAME_LEN};
use crate::error::LeaderboardError;

pub const FETCH_FAILED_MESSAGE: &str = "Failed to load leaderboard.";
pub const SUBMIT_FAILED_MESSAGE: &str = "Failed to submit score.";
pub const NICKNAME_PROMPT_MESSAGE: &str = "Please enter a nickname.";
pub const SUBMITTED_MESSAGE: &str = "Score submitted!";

/// What the leaderboard area currently shows
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PanelContent {
    #[default]
    Empty,
    Loading,
    Entries(Vec<LeaderboardEntry>),
    /// A fixed message shown in place of the list
    Message(String),
}

/// UI state for the nickname field and the leaderboard list
#[derive(Debug, Clone, Default)]
pub struct LeaderboardPanel {
    nickname: String,
    content: PanelContent,
    status: Option<String>,
    /// A submit request is on its way
    submitting: bool,
    submitted: bool,
}

impl LeaderboardPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nickname(&self) -> &str {
        &self.nickname
    }

    pub fn content(&self) -> &PanelContent {
        &self.content
    }

    /// One-line feedback about the last submit attempt
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn has_submitted(&self) -> bool {
        self.submitted
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn push_char(&mut self, ch: char) {
        if ch.is_control() || self.nickname.chars().count() >= MAX_NICKNAME_LEN {
            return;
        }
        self.nickname.push(ch);
    }

    pub fn pop_char(&mut self) {
        self.nickname.pop();
    }

    /// Forget the previous round's submit state; the nickname is kept
    pub fn on_new_round(&mut self) {
        self.status = None;
        self.submitting = false;
        self.submitted = false;
        // Pending fetches are cancelled on restart
        if self.content == PanelContent::Loading {
            self.content = PanelContent::Empty;
        }
    }

    /// Check the nickname before a submit
    ///
    /// At most one submit runs at a time and a round is submitted once.
    /// On any error no request should be made.
    pub fn begin_submit(&mut self) -> Result<String, LeaderboardError> {
        if self.submitting || self.submitted {
            return Err(LeaderboardError::AlreadySubmitted);
        }

        match validate_nickname(&self.nickname) {
            Ok(name) => {
                let name = name.to_string();
                self.submitting = true;
                self.status = Some("Submitting...".to_string());
                Ok(name)
            }
            Err(err) => {
                self.status = Some(NICKNAME_PROMPT_MESSAGE.to_string());
                Err(err)
            }
        }
    }

    pub fn begin_fetch(&mut self) {
        self.content = PanelContent::Loading;
    }

    pub fn apply_submit(&mut self, result: Result<(), LeaderboardError>) {
        self.submitting = false;
        match result {
            Ok(()) => {
                self.submitted = true;
                self.status = Some(SUBMITTED_MESSAGE.to_string());
            }
            Err(LeaderboardError::EmptyNickname) => {
                self.status = Some(NICKNAME_PROMPT_MESSAGE.to_string());
            }
            Err(LeaderboardError::AlreadySubmitted) => {}
            Err(_) => {
                self.status = Some(SUBMIT_FAILED_MESSAGE.to_string());
            }
        }
    }

    pub fn apply_fetch(&mut self, result: Result<Vec<LeaderboardEntry>, LeaderboardError>) {
        self.content = match result {
            Ok(entries) => PanelContent::Entries(entries),
            Err(_) => PanelContent::Message(FETCH_FAILED_MESSAGE.to_string()),
        };
    }

    /// Lines to display, server order preserved
    pub fn lines(&self) -> Vec<String> {
        match &self.content {
            PanelContent::Empty => Vec::new(),
            PanelContent::Loading => vec!["Loading...".to_string()],
            PanelContent::Entries(entries) if entries.is_empty() => {
                vec!["No scores yet.".to_string()]
            }
            PanelContent::Entries(entries) => entries.iter().map(ToString::to_string).collect(),
            PanelContent::Message(message) => vec![message.clone()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, score: i64) -> LeaderboardEntry {
        LeaderboardEntry(name.to_string(), score)
    }

    fn truncated_body() -> LeaderboardError {
        LeaderboardError::Body(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            "truncated response",
        ))
    }

    #[test]
    fn test_lines_keep_server_order() {
        let mut panel = LeaderboardPanel::new();
        panel.apply_fetch(Ok(vec![entry("Alice", 5), entry("Bob", 3)]));
        assert_eq!(panel.lines(), vec!["Alice: 5", "Bob: 3"]);

        // Not sorted locally either
        panel.apply_fetch(Ok(vec![entry("Low", 1), entry("High", 99)]));
        assert_eq!(panel.lines(), vec!["Low: 1", "High: 99"]);
    }

    #[test]
    fn test_fetch_failure_shows_message() {
        let mut panel = LeaderboardPanel::new();
        panel.begin_fetch();
        assert_eq!(panel.lines(), vec!["Loading..."]);

        panel.apply_fetch(Err(truncated_body()));
        assert_eq!(panel.lines(), vec![FETCH_FAILED_MESSAGE]);
    }

    #[test]
    fn test_empty_nickname_prompts() {
        let mut panel = LeaderboardPanel::new();
        panel.push_char(' ');

        assert!(matches!(
            panel.begin_submit(),
            Err(LeaderboardError::EmptyNickname)
        ));
        assert_eq!(panel.status(), Some(NICKNAME_PROMPT_MESSAGE));
    }

    #[test]
    fn test_submit_results() {
        let mut panel = LeaderboardPanel::new();
        for ch in "Alice".chars() {
            panel.push_char(ch);
        }
        assert_eq!(panel.begin_submit().unwrap(), "Alice");

        panel.apply_submit(Err(truncated_body()));
        assert_eq!(panel.status(), Some(SUBMIT_FAILED_MESSAGE));
        assert!(!panel.has_submitted());

        panel.apply_submit(Ok(()));
        assert_eq!(panel.status(), Some(SUBMITTED_MESSAGE));
        assert!(panel.has_submitted());

        panel.on_new_round();
        assert!(!panel.has_submitted());
        assert_eq!(panel.nickname(), "Alice");
    }

    #[test]
    fn test_one_submit_at_a_time() {
        let mut panel = LeaderboardPanel::new();
        for ch in "Alice".chars() {
            panel.push_char(ch);
        }

        assert!(panel.begin_submit().is_ok());
        assert!(panel.is_submitting());
        assert!(matches!(
            panel.begin_submit(),
            Err(LeaderboardError::AlreadySubmitted)
        ));

        // A failed attempt can be retried
        panel.apply_submit(Err(truncated_body()));
        assert!(!panel.is_submitting());
        assert!(panel.begin_submit().is_ok());

        panel.apply_submit(Ok(()));
        assert!(panel.begin_submit().is_err());
        assert_eq!(panel.status(), Some(SUBMITTED_MESSAGE));

        panel.on_new_round();
        assert!(panel.begin_submit().is_ok());
        panel.on_new_round();
        assert!(!panel.is_submitting());
    }

    #[test]
    fn test_nickname_editing() {
        let mut panel = LeaderboardPanel::new();
        for ch in "abcdefghijklmnopqrstuvwxyz".chars() {
            panel.push_char(ch);
        }
        assert_eq!(panel.nickname().len(), MAX_NICKNAME_LEN);

        panel.push_char('\n');
        panel.pop_char();
        assert_eq!(panel.nickname(), "abcdefghijklmno");
    }
}
