use std::path::{Path, PathBuf};

/// Environment and configuration for an acervo-enabled project.
#[derive(Clone, Debug)]
pub struct AcervoContext {
    /// Project root that holds the bibliography database.
    project_root: PathBuf,
    log_dir: Option<PathBuf>,
}

impl AcervoContext {
    /// Create a new context rooted at the given path (no log directory).
    #[must_use]
    pub fn new(project_root: PathBuf) -> Self {
        Self {
            project_root,
            log_dir: None,
        }
    }

    /// Create a new context with an explicit log directory.
    #[must_use]
    pub fn with_log_dir(project_root: PathBuf, log_dir: Option<PathBuf>) -> Self {
        Self {
            project_root,
            log_dir,
        }
    }

    /// Create a context from the current working directory (no log directory).
    pub fn from_cwd() -> anyhow::Result<Self> {
        let cwd = std::env::current_dir()?;
        Ok(Self::new(cwd))
    }

    /// Root directory of the project where acervo is initialized.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Optional parent directory for log file output.
    /// When set, operational logs are written to JSONL files under this path.
    pub fn log_dir(&self) -> Option<&Path> {
        self.log_dir.as_deref()
    }

    /// Path to the acervo `SQLite` database file (`acervo.db`).
    /// Default: `<project_root>/.acervo/acervo.db`
    pub fn db_path(&self) -> PathBuf {
        self.acervo_dir().join("acervo.db")
    }

    /// Path to the `.acervo/` directory.
    /// Default: `<project_root>/.acervo/`
    pub fn acervo_dir(&self) -> PathBuf {
        self.project_root.join(".acervo")
    }

    /// Path to the project's `.gitignore` file.
    /// Default: `<project_root>/.gitignore`
    pub fn gitignore_path(&self) -> PathBuf {
        self.project_root.join(".gitignore")
    }
}
