//! Helpers intended for [`std::process::Command`] and related structures.

use std::process::{Command, ExitStatus};

use anyhow::{Context, Result};

/// How much of a failed child's stderr we carry into the error message.
const STDERR_TAIL_MAX: usize = 1024;

/// Helpers intended for [`std::process::Command`].
pub trait CommandRunExt {
    /// Log (at debug level) the full child commandline.
    fn log_debug(&mut self) -> &mut Self;

    /// Execute the child process, returning its stdout as a string.
    /// If the process exits unsuccessfully, the returned error includes
    /// the tail of its stderr.
    fn run_get_string(&mut self) -> Result<String>;

    /// Execute the child process and parse its stdout as JSON.
    fn run_and_parse_json<T: serde::de::DeserializeOwned>(&mut self) -> Result<T>;

    /// Render the command line in a form that can be pasted into a shell.
    fn to_string_pretty(&self) -> String;
}

/// Return the trailing (at most `max` bytes) content of `buf` as trimmed UTF-8.
fn last_utf8_content(buf: &[u8], max: usize) -> String {
    let start = buf.len().saturating_sub(max);
    String::from_utf8_lossy(&buf[start..]).trim().to_string()
}

fn check_status(status: ExitStatus, stderr: &[u8]) -> Result<()> {
    if status.success() {
        return Ok(());
    }
    let stderr = last_utf8_content(stderr, STDERR_TAIL_MAX);
    anyhow::bail!("Subprocess failed: {status:?}\n{stderr}")
}

impl CommandRunExt for Command {
    fn log_debug(&mut self) -> &mut Self {
        tracing::debug!("exec: {}", self.to_string_pretty());
        self
    }

    fn run_get_string(&mut self) -> Result<String> {
        let program = self.get_program().to_string_lossy().into_owned();
        let output = self
            .log_debug()
            .output()
            .with_context(|| format!("Spawning {program}"))?;
        check_status(output.status, &output.stderr)
            .with_context(|| format!("Running {program}"))?;
        String::from_utf8(output.stdout).with_context(|| format!("Parsing {program} output"))
    }

    fn run_and_parse_json<T: serde::de::DeserializeOwned>(&mut self) -> Result<T> {
        let program = self.get_program().to_string_lossy().into_owned();
        let buf = self.run_get_string()?;
        serde_json::from_str(&buf).with_context(|| format!("Parsing {program} JSON output"))
    }

    fn to_string_pretty(&self) -> String {
        std::iter::once(self.get_program())
            .chain(self.get_args())
            .map(|arg| {
                let arg = arg.to_string_lossy();
                shlex::try_quote(&arg)
                    .map(|quoted| quoted.into_owned())
                    .unwrap_or_else(|_| arg.to_string())
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_utf8_content() {
        similar_asserts::assert_eq!(last_utf8_content(b"", 10), "");
        similar_asserts::assert_eq!(last_utf8_content(b"  oops\n", 10), "oops");
        similar_asserts::assert_eq!(last_utf8_content(b"0123456789abc", 3), "abc");
    }

    #[test]
    fn test_run_get_string() -> Result<()> {
        let out = Command::new("echo").arg("hello world").run_get_string()?;
        similar_asserts::assert_eq!(out, "hello world\n");
        Ok(())
    }

    #[test]
    fn test_run_failures() {
        let e = Command::new("false").run_get_string().unwrap_err();
        assert!(format!("{e:#}").contains("Running false"));

        let e = Command::new("/no/such/fsinv-binary")
            .run_get_string()
            .unwrap_err();
        assert!(format!("{e:#}").contains("Spawning /no/such/fsinv-binary"));
    }

    #[test]
    fn test_run_and_parse_json() -> Result<()> {
        #[derive(Debug, serde::Deserialize, PartialEq, Eq)]
        struct Doc {
            a: u32,
        }
        let doc: Doc = Command::new("echo")
            .arg(r#"{"a": 42}"#)
            .run_and_parse_json()?;
        assert_eq!(doc, Doc { a: 42 });

        let r: Result<Doc> = Command::new("echo").arg("not json").run_and_parse_json();
        assert!(r.is_err());
        Ok(())
    }

    #[test]
    fn test_to_string_pretty() {
        let mut cmd = Command::new("lsblk");
        cmd.args(["--json", "--output", "NAME"]);
        similar_asserts::assert_eq!(cmd.to_string_pretty(), "lsblk --json --output NAME");

        let mut cmd = Command::new("df");
        cmd.arg("/mnt/my data");
        let rendered = cmd.to_string_pretty();
        assert_ne!(rendered, "df /mnt/my data");
        similar_asserts::assert_eq!(
            shlex::split(&rendered).unwrap(),
            vec!["df".to_string(), "/mnt/my data".to_string()]
        );
    }
}
