//! LikeC4 web component generation.

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use c4docs_projects::{ProjectKey, ROOT_DIR};
use c4docs_views::is_valid_identifier;

/// Input for generating one project's web component bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateRequest<'a> {
    /// Project to generate.
    pub project: &'a ProjectKey,
    /// Project directory relative to `docs_dir`.
    pub project_dir: &'a str,
    /// Documentation source root.
    pub docs_dir: &'a Path,
    /// Destination script file inside the site directory.
    pub output: PathBuf,
    /// Whether views are laid out with Graphviz (dot).
    pub use_dot: bool,
}

impl GenerateRequest<'_> {
    /// Directory passed to the generator as the project workspace.
    #[must_use]
    pub fn project_path(&self) -> PathBuf {
        match self.project {
            ProjectKey::Named(_) if self.project_dir != ROOT_DIR => {
                self.docs_dir.join(self.project_dir)
            }
            _ => self.docs_dir.to_path_buf(),
        }
    }
}

/// Error generating a web component bundle.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error(
        "Invalid project name '{0}': must start with a letter and contain only letters, numbers, hyphens, and underscores"
    )]
    InvalidProject(String),

    #[error("Generator command is empty")]
    EmptyCommand,

    #[error("'{0}' command not found. Ensure Node.js and likec4 are installed")]
    CommandNotFound(String),

    #[error("Generator exited with {0}")]
    Failed(ExitStatus),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Produces the web component script for a LikeC4 project.
pub trait WebComponentGenerator {
    /// Generate `request.output` for `request.project`.
    fn generate(&self, request: &GenerateRequest<'_>) -> Result<(), GenerateError>;
}

/// Generator backed by the LikeC4 CLI (`likec4 codegen webcomponent`).
///
/// The command runs synchronously with inherited stdio, without a timeout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LikeC4Cli {
    command: Vec<String>,
}

impl Default for LikeC4Cli {
    fn default() -> Self {
        Self::new(["npx", "likec4"])
    }
}

impl LikeC4Cli {
    /// Create a generator invoking `command` (program followed by arguments).
    #[must_use]
    pub fn new<I, S>(command: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            command: command.into_iter().map(Into::into).collect(),
        }
    }

    /// Command line for `request`: the program and its arguments.
    pub fn command_line(
        &self,
        request: &GenerateRequest<'_>,
    ) -> Result<(String, Vec<OsString>), GenerateError> {
        let (program, prefix) = self
            .command
            .split_first()
            .ok_or(GenerateError::EmptyCommand)?;

        let mut args: Vec<OsString> = prefix.iter().map(OsString::from).collect();
        args.push("codegen".into());
        args.push("webcomponent".into());
        if !request.use_dot {
            args.push("--no-use-dot".into());
        }
        if let Some(name) = request.project.name() {
            args.push("--webcomponent-prefix".into());
            args.push(name.to_ascii_lowercase().into());
        }
        args.push(request.project_path().into_os_string());
        args.push("-o".into());
        args.push(request.output.clone().into_os_string());

        Ok((program.clone(), args))
    }
}

impl WebComponentGenerator for LikeC4Cli {
    fn generate(&self, request: &GenerateRequest<'_>) -> Result<(), GenerateError> {
        if let Some(name) = request.project.name()
            && !is_valid_identifier(name)
        {
            return Err(GenerateError::InvalidProject(name.to_owned()));
        }

        let (program, args) = self.command_line(request)?;

        if let Some(parent) = request.output.parent() {
            std::fs::create_dir_all(parent)?;
        }

        tracing::info!(
            project = %request.project,
            path = %request.project_path().display(),
            "Generating web component"
        );

        let status = Command::new(&program).args(&args).status().map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                GenerateError::CommandNotFound(program.clone())
            } else {
                GenerateError::Io(e)
            }
        })?;

        if status.success() {
            Ok(())
        } else {
            Err(GenerateError::Failed(status))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn request<'a>(project: &'a ProjectKey, project_dir: &'a str, use_dot: bool) -> GenerateRequest<'a> {
        GenerateRequest {
            project,
            project_dir,
            docs_dir: Path::new("/work/docs"),
            output: PathBuf::from("/work/site/assets/likec4/likec4_views.js"),
            use_dot,
        }
    }

    fn args_of(cli: &LikeC4Cli, request: &GenerateRequest<'_>) -> (String, Vec<String>) {
        let (program, args) = cli.command_line(request).unwrap();
        let args = args
            .into_iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        (program, args)
    }

    #[test]
    fn test_project_path_default_project() {
        let key = ProjectKey::Default;
        assert_eq!(request(&key, ".", true).project_path(), PathBuf::from("/work/docs"));
    }

    #[test]
    fn test_project_path_named_project() {
        let key = ProjectKey::named("billing");
        assert_eq!(
            request(&key, "domains/billing", true).project_path(),
            PathBuf::from("/work/docs/domains/billing")
        );
    }

    #[test]
    fn test_project_path_named_project_at_root() {
        let key = ProjectKey::named("root");
        assert_eq!(request(&key, ".", true).project_path(), PathBuf::from("/work/docs"));
    }

    #[test]
    fn test_command_line_default_project() {
        let key = ProjectKey::Default;
        let (program, args) = args_of(&LikeC4Cli::default(), &request(&key, ".", true));

        assert_eq!(program, "npx");
        assert_eq!(
            args,
            vec![
                "likec4",
                "codegen",
                "webcomponent",
                "/work/docs",
                "-o",
                "/work/site/assets/likec4/likec4_views.js",
            ]
        );
    }

    #[test]
    fn test_command_line_named_project_without_dot() {
        let key = ProjectKey::named("Billing");
        let (program, args) = args_of(&LikeC4Cli::new(["likec4"]), &request(&key, "billing", false));

        assert_eq!(program, "likec4");
        assert_eq!(
            args,
            vec![
                "codegen",
                "webcomponent",
                "--no-use-dot",
                "--webcomponent-prefix",
                "billing",
                "/work/docs/billing",
                "-o",
                "/work/site/assets/likec4/likec4_views.js",
            ]
        );
    }

    #[test]
    fn test_empty_command() {
        let key = ProjectKey::Default;
        let cli = LikeC4Cli::new(Vec::<String>::new());
        assert!(matches!(
            cli.command_line(&request(&key, ".", true)),
            Err(GenerateError::EmptyCommand)
        ));
    }

    #[test]
    fn test_invalid_project_rejected_before_running() {
        let key = ProjectKey::named("bad name");
        let temp = tempfile::tempdir().unwrap();
        let req = GenerateRequest {
            output: temp.path().join("assets/likec4/x.js"),
            ..request(&key, "bad", true)
        };

        let err = LikeC4Cli::new(["c4docs-test-no-such-program"]).generate(&req).unwrap_err();

        assert!(matches!(err, GenerateError::InvalidProject(ref name) if name == "bad name"));
        assert!(!temp.path().join("assets").exists());
    }

    #[test]
    fn test_missing_executable() {
        let key = ProjectKey::Default;
        let temp = tempfile::tempdir().unwrap();
        let req = GenerateRequest {
            output: temp.path().join("assets/likec4/likec4_views.js"),
            ..request(&key, ".", true)
        };

        let err = LikeC4Cli::new(["c4docs-test-no-such-program"]).generate(&req).unwrap_err();

        assert!(matches!(err, GenerateError::CommandNotFound(ref p) if p == "c4docs-test-no-such-program"));
        assert!(temp.path().join("assets/likec4").is_dir());
    }

    #[cfg(unix)]
    #[test]
    fn test_non_zero_exit() {
        let key = ProjectKey::Default;
        let temp = tempfile::tempdir().unwrap();
        let req = GenerateRequest {
            output: temp.path().join("likec4_views.js"),
            ..request(&key, ".", true)
        };

        let err = LikeC4Cli::new(["false"]).generate(&req).unwrap_err();

        assert!(matches!(err, GenerateError::Failed(status) if !status.success()));
    }

    #[cfg(unix)]
    #[test]
    fn test_successful_run() {
        let key = ProjectKey::named("billing");
        let temp = tempfile::tempdir().unwrap();
        let req = GenerateRequest {
            output: temp.path().join("assets/likec4/likec4_views_billing.js"),
            ..request(&key, "billing", true)
        };

        LikeC4Cli::new(["true"]).generate(&req).unwrap();

        assert!(temp.path().join("assets/likec4").is_dir());
    }
}
