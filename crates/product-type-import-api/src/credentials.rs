use std::path::PathBuf;

/// Environment variable that may carry credential lines directly.
pub const CREDENTIALS_ENV: &str = "PRODUCT_TYPE_IMPORT_CREDENTIALS";

/// File in the home directory holding one `project:client_id:client_secret`
/// line per project. Lines starting with `#` are comments.
pub const CREDENTIALS_FILE: &str = ".ct-project-credentials";

/// API credentials resolved for one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub project_key: String,
    pub client_id: String,
    pub client_secret: String,
}

#[derive(Debug, thiserror::Error)]
pub enum CredentialsError {
    #[error("Project Key is needed")]
    MissingProjectKey,

    #[error("no credentials found for project \"{0}\"")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(String),
}

/// Resolve credentials for `project_key`.
///
/// Sources, in precedence order: the `PRODUCT_TYPE_IMPORT_CREDENTIALS`
/// environment variable, then `~/.ct-project-credentials`. Rejects with
/// `Project Key is needed` when no project key is supplied.
pub fn project_credentials(project_key: Option<&str>) -> Result<Credentials, CredentialsError> {
    let key = require_project_key(project_key)?;

    if let Ok(lines) = std::env::var(CREDENTIALS_ENV) {
        if let Some(credentials) = parse_lines(&lines, key) {
            return Ok(credentials);
        }
    }

    if let Some(path) = credentials_file() {
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| CredentialsError::Io(e.to_string()))?;
            if let Some(credentials) = parse_lines(&contents, key) {
                return Ok(credentials);
            }
        }
    }

    Err(CredentialsError::NotFound(key.to_owned()))
}

/// Resolve credentials for `project_key` from explicit credential
/// lines instead of the default sources.
pub fn project_credentials_from(
    contents: &str,
    project_key: Option<&str>,
) -> Result<Credentials, CredentialsError> {
    let key = require_project_key(project_key)?;

    parse_lines(contents, key).ok_or_else(|| CredentialsError::NotFound(key.to_owned()))
}

fn require_project_key(project_key: Option<&str>) -> Result<&str, CredentialsError> {
    match project_key {
        Some(key) if !key.is_empty() => Ok(key),
        _ => Err(CredentialsError::MissingProjectKey),
    }
}

fn credentials_file() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CREDENTIALS_FILE))
}

fn parse_lines(contents: &str, project_key: &str) -> Option<Credentials> {
    contents.lines().find_map(|line| {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return None;
        }

        let mut parts = line.splitn(3, ':');
        let project = parts.next()?;
        let client_id = parts.next()?;
        let client_secret = parts.next()?;

        (project == project_key).then(|| Credentials {
            project_key: project.to_owned(),
            client_id: client_id.to_owned(),
            client_secret: client_secret.to_owned(),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINES: &str = "\
# managed by ops
shop-staging:id-1:secret-1
shop-prod:id-2:secret-2
";

    #[test]
    fn missing_project_key_is_rejected_with_the_exact_message() {
        let error = project_credentials(None).unwrap_err();
        assert_eq!(error.to_string(), "Project Key is needed");

        let error = project_credentials_from(LINES, Some("")).unwrap_err();
        assert_eq!(error.to_string(), "Project Key is needed");
    }

    #[test]
    fn resolves_the_matching_line() {
        let credentials = project_credentials_from(LINES, Some("shop-prod")).unwrap();
        assert_eq!(
            credentials,
            Credentials {
                project_key: "shop-prod".into(),
                client_id: "id-2".into(),
                client_secret: "secret-2".into(),
            }
        );
    }

    #[test]
    fn unknown_project_is_not_found() {
        let error = project_credentials_from(LINES, Some("other")).unwrap_err();
        assert!(matches!(error, CredentialsError::NotFound(_)));
    }

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        let contents = "\n# shop-prod:hidden:hidden\n\nshop-prod:id:secret\n";
        let credentials = project_credentials_from(contents, Some("shop-prod")).unwrap();
        assert_eq!(credentials.client_id, "id");
    }

    #[test]
    fn secrets_may_contain_colons() {
        let credentials =
            project_credentials_from("p:id:se:cr:et", Some("p")).unwrap();
        assert_eq!(credentials.client_secret, "se:cr:et");
    }
}
