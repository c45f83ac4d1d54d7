//! Fixed command lines this tool runs.

/// Succeeds only inside a git work tree or git dir.
pub const IS_GIT_REPO: &str = "git rev-parse --git-dir";

/// Diff of the index against HEAD.
pub const STAGED_DIFF: &str = "git diff --cached";

/// Commit with a message; the quoted message is appended as one extra argument.
pub const COMMIT: &str = "git commit -m";

/// Command that clears the terminal on this platform.
pub fn clear_screen() -> &'static str {
    if cfg!(windows) { "cls" } else { "clear" }
}

/// Wrap a commit message in double quotes for the commit command line.
///
/// Embedded quotes are passed through unchanged.
pub fn quote_message(message: &str) -> String {
    format!("\"{message}\"")
}
