//! Credential storage backed by an external secret-management process.
//!
//! The default backend is libsecret's `secret-tool`, addressed by a fixed
//! `service`/`account` attribute pair. Every call spawns a fresh process.

use std::io::Write;
use std::process::{Command, Output, Stdio};

use chrono::Utc;

use crate::domain::{AppError, CredentialConfig, Result};

/// Capability to read, write and erase the single stored token.
pub trait CredentialStore {
    /// Fetch the stored token.
    ///
    /// # Errors
    /// `CredentialNotFound` if nothing is stored.
    fn get(&self) -> Result<String>;

    /// Store `token`, replacing any previous value.
    ///
    /// # Errors
    /// `InvalidInput` if `token` is empty.
    fn put(&self, token: &str) -> Result<()>;

    /// Erase the stored token.
    ///
    /// # Errors
    /// `CredentialNotFound` if nothing is stored.
    fn delete(&self) -> Result<()>;
}

/// `secret-tool` compatible credential store.
pub struct SecretToolStore {
    program: String,
    leading_args: Vec<String>,
    service: String,
    account: String,
}

impl SecretToolStore {
    /// Create a store from configuration.
    ///
    /// # Errors
    /// Returns a config error if no program is configured.
    pub fn from_config(config: &CredentialConfig) -> Result<Self> {
        let (program, leading_args) =
            config
                .command
                .split_first()
                .ok_or_else(|| AppError::Config {
                    message: "credentials.command must name a program".into(),
                })?;

        Ok(Self {
            program: program.clone(),
            leading_args: leading_args.to_vec(),
            service: config.service.clone(),
            account: config.account.clone(),
        })
    }

    fn command(&self, operation: &str) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.leading_args).arg(operation);
        command
    }

    fn attributes(&self) -> [&str; 4] {
        ["service", &self.service, "account", &self.account]
    }

    fn lookup(&self) -> Result<Option<String>> {
        let output = self
            .command("lookup")
            .args(self.attributes())
            .stdin(Stdio::null())
            .output()
            .map_err(|e| spawn_error(&self.program, e))?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.trim().is_empty() {
            return Err(AppError::credential_store(stderr.trim().to_string()));
        }

        // secret-tool exits non-zero without diagnostics when nothing matches
        if !output.status.success() {
            return Ok(None);
        }

        let value = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Ok((!value.is_empty()).then_some(value))
    }
}

impl CredentialStore for SecretToolStore {
    fn get(&self) -> Result<String> {
        let token = self.lookup()?.ok_or(AppError::CredentialNotFound)?;
        tracing::debug!(service = %self.service, "Token retrieved from secret store");
        Ok(token)
    }

    fn put(&self, token: &str) -> Result<()> {
        if token.is_empty() {
            return Err(AppError::InvalidInput {
                message: "token must be a non-empty string".into(),
            });
        }

        let label = format!("{} ({})", self.service, Utc::now().to_rfc3339());

        let mut child = self
            .command("store")
            .arg(format!("--label={label}"))
            .args(self.attributes())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| spawn_error(&self.program, e))?;

        // A store that exits early closes the pipe; its own diagnostic takes precedence
        let written = child
            .stdin
            .take()
            .map_or(Ok(()), |mut stdin| stdin.write_all(token.as_bytes()));

        let output = child
            .wait_with_output()
            .map_err(|e| AppError::io("Failed to wait for secret store", e))?;
        check_output("store", &output)?;
        written.map_err(|e| AppError::io("Failed to pass token to secret store", e))?;

        tracing::info!(service = %self.service, "Token stored");
        Ok(())
    }

    fn delete(&self) -> Result<()> {
        if self.lookup()?.is_none() {
            return Err(AppError::CredentialNotFound);
        }

        let output = self
            .command("clear")
            .args(self.attributes())
            .stdin(Stdio::null())
            .output()
            .map_err(|e| spawn_error(&self.program, e))?;
        check_output("clear", &output)?;

        tracing::info!(service = %self.service, "Token removed");
        Ok(())
    }
}

fn spawn_error(program: &str, err: std::io::Error) -> AppError {
    AppError::CredentialStore {
        message: format!("Failed to run {program}: {err}"),
        source: Some(err),
    }
}

/// Treat a non-zero exit or any diagnostic output as failure.
fn check_output(operation: &str, output: &Output) -> Result<()> {
    let stderr = String::from_utf8_lossy(&output.stderr);

    if !stderr.trim().is_empty() {
        return Err(AppError::credential_store(stderr.trim().to_string()));
    }

    if !output.status.success() {
        return Err(AppError::credential_store(format!(
            "{operation} exited with {}",
            output.status
        )));
    }

    Ok(())
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    /// Minimal stand-in for secret-tool, keeping the secret in a file next to the script.
    const FAKE_SECRET_TOOL: &str = r#"
db="$(dirname "$0")/secret"
case "$1" in
  lookup)
    if [ -f "$db" ]; then cat "$db"; else exit 1; fi ;;
  store)
    cat > "$db" ;;
  clear)
    rm -f "$db" ;;
esac
"#;

    fn fake_store(dir: &Path, script: &str) -> SecretToolStore {
        let script_path = dir.join("secret-tool.sh");
        fs::write(&script_path, script).unwrap();

        SecretToolStore::from_config(&CredentialConfig {
            command: vec!["sh".into(), script_path.display().to_string()],
            ..CredentialConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_round_trip() {
        let dir = tempdir().unwrap();
        let store = fake_store(dir.path(), FAKE_SECRET_TOOL);

        store.put("ghp_secret").unwrap();
        assert_eq!(store.get().unwrap(), "ghp_secret");

        store.delete().unwrap();
        assert!(matches!(store.get(), Err(AppError::CredentialNotFound)));
    }

    #[test]
    fn test_put_overwrites_previous_value() {
        let dir = tempdir().unwrap();
        let store = fake_store(dir.path(), FAKE_SECRET_TOOL);

        store.put("first").unwrap();
        store.put("second").unwrap();
        assert_eq!(store.get().unwrap(), "second");
    }

    #[test]
    fn test_empty_token_is_rejected_without_spawning() {
        let store = SecretToolStore::from_config(&CredentialConfig {
            command: vec!["/nonexistent/secret-tool".into()],
            ..CredentialConfig::default()
        })
        .unwrap();

        assert!(matches!(store.put(""), Err(AppError::InvalidInput { .. })));
        // The same store fails at spawn time for any real call
        assert!(matches!(
            store.put("token"),
            Err(AppError::CredentialStore { .. })
        ));
    }

    #[test]
    fn test_delete_without_entry_is_not_found() {
        let dir = tempdir().unwrap();
        let store = fake_store(dir.path(), FAKE_SECRET_TOOL);

        assert!(matches!(store.delete(), Err(AppError::CredentialNotFound)));
    }

    #[test]
    fn test_diagnostic_output_is_failure() {
        let dir = tempdir().unwrap();
        let store = fake_store(dir.path(), "echo 'secret service unavailable' >&2\n");

        let err = store.get().unwrap_err();
        match err {
            AppError::CredentialStore { message, .. } => {
                assert_eq!(message, "secret service unavailable");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_non_zero_store_exit_is_failure() {
        let dir = tempdir().unwrap();
        let store = fake_store(dir.path(), "cat > /dev/null\nexit 3\n");

        assert!(matches!(
            store.put("token"),
            Err(AppError::CredentialStore { .. })
        ));
    }

    #[test]
    fn test_store_diagnostic_wins_over_closed_stdin() {
        let dir = tempdir().unwrap();
        let store = fake_store(dir.path(), "echo 'collection is locked' >&2\nexit 1\n");

        // Larger than a pipe buffer, so the write fails once the store has exited
        let token = "x".repeat(1 << 20);
        match store.put(&token).unwrap_err() {
            AppError::CredentialStore { message, .. } => {
                assert_eq!(message, "collection is locked");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_from_config_requires_program() {
        let config = CredentialConfig {
            command: Vec::new(),
            ..CredentialConfig::default()
        };
        assert!(SecretToolStore::from_config(&config).is_err());
    }
}
