//! The single in-memory workspace: conversation, uploads and the
//! latest evaluation. All mutation goes through the transition methods here;
//! handlers never touch the fields directly.

use uuid::Uuid;

use crate::chat::models::{FileSummary, Message, MessageRole, UploadedFile};
use crate::chat::prompts::{upload_message, GREETING};
use crate::evaluation::models::EvaluationResult;
use crate::llm_client::InlineFile;

#[derive(Debug, Clone)]
pub struct Session {
    messages: Vec<Message>,
    files: Vec<UploadedFile>,
    evaluation: Option<EvaluationResult>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// A fresh session holding only the greeting.
    pub fn new() -> Self {
        Self {
            messages: vec![Message::system(GREETING)],
            files: Vec::new(),
            evaluation: None,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn files(&self) -> &[UploadedFile] {
        &self.files
    }

    pub fn file_summaries(&self) -> Vec<FileSummary> {
        self.files.iter().map(UploadedFile::summary).collect()
    }

    pub fn inline_files(&self) -> Vec<InlineFile> {
        self.files.iter().map(UploadedFile::to_inline).collect()
    }

    pub fn evaluation(&self) -> Option<&EvaluationResult> {
        self.evaluation.as_ref()
    }

    /// An evaluation needs at least one exchange beyond the greeting.
    pub fn can_evaluate(&self) -> bool {
        self.messages.len() > 1
    }

    /// Records a user message and returns the history that preceded it.
    pub fn begin_turn(&mut self, text: impl Into<String>) -> Vec<Message> {
        let history = self.messages.clone();
        self.messages.push(Message::new(MessageRole::User, text));
        history
    }

    pub fn push_model(&mut self, text: impl Into<String>) {
        self.messages.push(Message::new(MessageRole::Model, text));
    }

    /// Attaches files and records the upload announcement as a user turn.
    /// Returns the announcement and the history before it.
    pub fn add_files(&mut self, new_files: Vec<UploadedFile>) -> (String, Vec<Message>) {
        let names: Vec<&str> = new_files.iter().map(|f| f.name.as_str()).collect();
        let announcement = upload_message(&names);
        self.files.extend(new_files);
        let history = self.begin_turn(announcement.clone());
        (announcement, history)
    }

    pub fn remove_file(&mut self, id: Uuid) -> Option<UploadedFile> {
        let index = self.files.iter().position(|f| f.id == id)?;
        Some(self.files.remove(index))
    }

    /// Replaces any previous evaluation.
    pub fn set_evaluation(&mut self, evaluation: EvaluationResult) {
        self.evaluation = Some(evaluation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str) -> UploadedFile {
        UploadedFile {
            id: Uuid::new_v4(),
            name: name.to_string(),
            mime_type: "application/pdf".to_string(),
            size: 1,
            data: "AA==".to_string(),
        }
    }

    #[test]
    fn test_new_session_has_greeting_only() {
        let session = Session::new();
        assert_eq!(session.messages().len(), 1);
        assert!(session.messages()[0].is_system);
        assert!(!session.can_evaluate());
        assert!(session.evaluation().is_none());
    }

    #[test]
    fn test_begin_turn_returns_prior_history() {
        let mut session = Session::new();
        let history = session.begin_turn("What is the budget?");
        assert_eq!(history.len(), 1);
        assert_eq!(session.messages().len(), 2);
        assert_eq!(session.messages()[1].role, MessageRole::User);
        assert!(session.can_evaluate());
    }

    #[test]
    fn test_add_files_announces_upload() {
        let mut session = Session::new();
        let (announcement, history) = session.add_files(vec![file("a.pdf"), file("b.pdf")]);
        assert!(announcement.starts_with("I have uploaded 2 new file(s): a.pdf, b.pdf."));
        assert_eq!(history.len(), 1);
        assert_eq!(session.files().len(), 2);
        assert_eq!(session.messages().last().unwrap().text, announcement);
    }

    #[test]
    fn test_remove_file() {
        let mut session = Session::new();
        let f = file("a.pdf");
        let id = f.id;
        session.add_files(vec![f]);

        assert!(session.remove_file(Uuid::new_v4()).is_none());
        assert_eq!(session.remove_file(id).unwrap().name, "a.pdf");
        assert!(session.files().is_empty());
        assert!(session.inline_files().is_empty());
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut session = Session::new();
        session.add_files(vec![file("a.pdf")]);
        session.push_model("Summary.");
        session.reset();
        assert_eq!(session.messages().len(), 1);
        assert!(session.files().is_empty());
    }
}
