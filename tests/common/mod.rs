//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;
use git2::{Oid, Repository, Signature};

use aicommit::error::{PromptError, ShellError};
use aicommit::git::commands;
use aicommit::{ActionPrompter, ShellExecutor, ShellRunner};

/// A test git repository builder for integration tests.
pub struct TestRepo {
    pub dir: tempfile::TempDir,
    pub repo: Repository,
}

impl TestRepo {
    /// Create a new git repository with a local identity and no signing.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let repo = Repository::init(dir.path()).expect("Failed to init git repo");
        {
            let mut config = repo.config().expect("Failed to open repo config");
            config.set_str("user.name", "Test User").expect("Failed to set user.name");
            config
                .set_str("user.email", "test@example.com")
                .expect("Failed to set user.email");
            config
                .set_bool("commit.gpgsign", false)
                .expect("Failed to disable signing");
        }
        Self { dir, repo }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Shell runner rooted at this repository.
    pub fn shell(&self) -> ShellRunner {
        ShellRunner::new(false).with_current_dir(self.path())
    }

    /// Write `content` to `name` in the working tree without staging it.
    pub fn write_file(&self, name: &str, content: &str) {
        std::fs::write(self.path().join(name), content).expect("Failed to write test file");
    }

    /// Add `name` to the index.
    pub fn stage(&self, name: &str) {
        let mut index = self.repo.index().expect("Failed to get index");
        index.add_path(Path::new(name)).expect("Failed to add file");
        index.write().expect("Failed to write index");
    }

    /// Commit the current index. Returns the commit OID.
    pub fn commit_index(&self, message: &str) -> Oid {
        let sig = Signature::now("Test User", "test@example.com")
            .expect("Failed to create signature");
        let mut index = self.repo.index().expect("Failed to get index");
        let tree_id = index.write_tree().expect("Failed to write tree");
        let tree = self.repo.find_tree(tree_id).expect("Failed to find tree");

        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .expect("Failed to create commit")
    }

    /// Repository with one commit containing `README.md`.
    pub fn with_initial_commit() -> Self {
        let repo = Self::new();
        repo.write_file("README.md", "# test\n");
        repo.stage("README.md");
        repo.commit_index("initial commit");
        repo
    }

    /// Full message of the commit at HEAD.
    pub fn head_message(&self) -> String {
        let head = self.repo.head().expect("Failed to read HEAD");
        let commit = head.peel_to_commit().expect("HEAD is not a commit");
        commit.message().unwrap_or_default().to_string()
    }

    /// Number of commits reachable from HEAD.
    pub fn commit_count(&self) -> usize {
        let mut walk = self.repo.revwalk().expect("Failed to create revwalk");
        if walk.push_head().is_err() {
            return 0;
        }
        walk.count()
    }
}

/// Real shell runner that records composed command lines.
///
/// Clear-screen commands are answered locally since test environments
/// usually have no terminal.
pub struct RecordingShell {
    inner: ShellRunner,
    pub calls: Mutex<Vec<String>>,
}

impl RecordingShell {
    pub fn new(inner: ShellRunner) -> Self {
        Self {
            inner,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ShellExecutor for RecordingShell {
    async fn run(&self, command: &str, extra_args: &[String]) -> Result<String, ShellError> {
        self.calls
            .lock()
            .unwrap()
            .push(aicommit::shell::compose_command_line(command, extra_args));
        if command == commands::clear_screen() {
            return Ok(String::new());
        }
        self.inner.run(command, extra_args).await
    }
}

/// Prompter that replays canned answers and records the questions asked.
pub struct ScriptedPrompter {
    answers: Mutex<VecDeque<Result<String, PromptError>>>,
    pub questions: Mutex<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: Mutex::new(answers.iter().map(|a| Ok(a.to_string())).collect()),
            questions: Mutex::new(Vec::new()),
        }
    }

    /// Prompter whose first answer is a Ctrl-C.
    pub fn interrupted() -> Self {
        Self {
            answers: Mutex::new(VecDeque::from([Err(PromptError::Interrupted)])),
            questions: Mutex::new(Vec::new()),
        }
    }

    pub fn times_asked(&self) -> usize {
        self.questions.lock().unwrap().len()
    }
}

impl ActionPrompter for ScriptedPrompter {
    fn ask(&self, question: &str) -> Result<String, PromptError> {
        self.questions.lock().unwrap().push(question.to_string());
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("No scripted answer left for {question:?}"))
    }
}

/// NDJSON body in the shape Ollama streams from `/api/chat`.
pub fn ollama_stream_body(fragments: &[&str]) -> String {
    let mut body = String::new();
    for fragment in fragments {
        let line = serde_json::json!({
            "model": "llama3.2:3b",
            "message": {"role": "assistant", "content": fragment},
            "done": false,
        });
        body.push_str(&line.to_string());
        body.push('\n');
    }
    let last = serde_json::json!({
        "model": "llama3.2:3b",
        "message": {"role": "assistant", "content": ""},
        "done": true,
    });
    body.push_str(&last.to_string());
    body.push('\n');
    body
}
