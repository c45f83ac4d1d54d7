//! Read-only repository checks.

use tracing::debug;

use crate::error::ShellError;
use crate::git::commands;
use crate::shell::ShellExecutor;

/// Answers "is this a repository?" and "what is staged?" through the shell.
pub struct RepositoryInspector<'a, E: ShellExecutor> {
    shell: &'a E,
    debug: bool,
}

impl<'a, E: ShellExecutor> RepositoryInspector<'a, E> {
    pub fn new(shell: &'a E, debug: bool) -> Self {
        Self { shell, debug }
    }

    /// Whether the working directory is inside a git repository.
    ///
    /// Any failure of the check command counts as "not a repository".
    pub async fn is_repository(&self) -> bool {
        match self.shell.run(commands::IS_GIT_REPO, &[]).await {
            Ok(_) => true,
            Err(e) => {
                if self.debug {
                    debug!("Repository check failed: {}", e);
                }
                false
            }
        }
    }

    /// Staged diff text, empty when nothing is staged.
    pub async fn staged_diff(&self) -> Result<String, ShellError> {
        let diff = self.shell.run(commands::STAGED_DIFF, &[]).await?;

        if self.debug {
            debug!("Staged diff ({} bytes):\n{}", diff.len(), diff);
        }

        Ok(diff)
    }
}
