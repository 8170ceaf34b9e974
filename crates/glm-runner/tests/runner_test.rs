use std::path::{Path, PathBuf};
use std::time::Duration;

use glm_build::{Pipeline, Script, ShellCommand, Word};
use glm_core::BuildVariable;
use glm_runner::{RunError, ScriptArtifact, ScriptExecutor, ShellExecutor};
use mockall::mock;
use tempfile::TempDir;

mock! {
    Executor {}

    impl ScriptExecutor for Executor {
        async fn run(&self, script: &Path, env: &[BuildVariable]) -> Result<(), RunError>;
    }
}

/// `printf %s $NAME > <out>`
fn printf_script(name: &str, value: &str, out: &Path) -> Script {
    let printf = ShellCommand::new("printf")
        .arg(Word::literal("%s").unwrap())
        .arg(Word::var(name, value).unwrap());
    Script::new(Pipeline::new(printf).redirect_to(out).unwrap())
}

fn write_raw(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("raw.sh");
    std::fs::write(&path, body).unwrap();
    path
}

// ── Lifecycle Tests ──

#[tokio::test]
async fn write_creates_script_with_prelude() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("script.sh");
    let script = Script::new(ShellCommand::new("true"));

    let written = ScriptArtifact::new(&path, script).write().unwrap();

    assert_eq!(written.path(), path);
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "#!/bin/sh\nset -ef\nIFS=''\ntrue\n"
    );
}

#[tokio::test]
async fn write_overwrites_previous_script() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("script.sh");
    std::fs::write(&path, "old content that is much longer than the new one\n").unwrap();

    ScriptArtifact::new(&path, Script::new(ShellCommand::new("true")))
        .write()
        .unwrap();

    assert!(!std::fs::read_to_string(&path).unwrap().contains("old content"));
}

#[tokio::test]
async fn write_reports_unwritable_path() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("no-such-dir").join("script.sh");

    let result = ScriptArtifact::new(path, Script::new(ShellCommand::new("true"))).write();

    assert!(matches!(result, Err(RunError::Write { .. })));
}

#[tokio::test]
async fn execute_passes_script_path_and_env_to_executor() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("script.sh");
    let env = vec![BuildVariable::new("FOO", "bar")];

    let mut mock = MockExecutor::new();
    let expected_path = path.clone();
    mock.expect_run()
        .times(1)
        .returning(move |script, env| {
            assert_eq!(script, expected_path.as_path());
            assert!(script.exists(), "script must be on disk before it runs");
            assert_eq!(env, [BuildVariable::new("FOO", "bar")]);
            Ok(())
        });

    ScriptArtifact::new(&path, Script::new(ShellCommand::new("true")))
        .write()
        .unwrap()
        .execute(&mock, None, &env)
        .await
        .unwrap();
}

#[tokio::test(start_paused = true)]
async fn execute_waits_for_delay_before_running() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("script.sh");
    let started = tokio::time::Instant::now();

    let mut mock = MockExecutor::new();
    mock.expect_run().times(1).returning(move |_, _| {
        assert!(started.elapsed() >= Duration::from_secs(3));
        Ok(())
    });

    ScriptArtifact::new(&path, Script::new(ShellCommand::new("true")))
        .write()
        .unwrap()
        .execute(&mock, Some(Duration::from_secs(3)), &[])
        .await
        .unwrap();
}

#[tokio::test]
async fn execute_propagates_executor_failure() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("script.sh");

    let mut mock = MockExecutor::new();
    mock.expect_run().times(1).returning(|script, _| {
        Err(RunError::Spawn {
            script: script.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no shell"),
        })
    });

    let result = ScriptArtifact::new(&path, Script::new(ShellCommand::new("true")))
        .write()
        .unwrap()
        .execute(&mock, None, &[])
        .await;

    assert!(matches!(result, Err(RunError::Spawn { .. })));
}

// ── Shell Executor Tests ──

#[tokio::test]
async fn shell_executor_exports_variables_to_script() {
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("out.txt");
    let value = "two  spaces and a *glob* ?";
    let script = printf_script("GLM_TEST_VALUE", value, &out);

    ScriptArtifact::new(tmp.path().join("script.sh"), script)
        .write()
        .unwrap()
        .execute(
            &ShellExecutor,
            None,
            &[BuildVariable::new("GLM_TEST_VALUE", value)],
        )
        .await
        .unwrap();

    assert_eq!(std::fs::read_to_string(&out).unwrap(), value);
}

#[tokio::test]
async fn shell_executor_passes_empty_value_as_argument() {
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("out.txt");
    let script = printf_script("GLM_TEST_EMPTY", "", &out);

    ScriptArtifact::new(tmp.path().join("script.sh"), script)
        .write()
        .unwrap()
        .execute(&ShellExecutor, None, &[BuildVariable::new("GLM_TEST_EMPTY", "")])
        .await
        .unwrap();

    assert_eq!(std::fs::read_to_string(&out).unwrap(), "");
}

#[tokio::test]
async fn shell_executor_reports_exit_code() {
    let tmp = TempDir::new().unwrap();
    let script = write_raw(tmp.path(), "echo building\nexit 3\n");

    let result = ShellExecutor.run(&script, &[]).await;

    let err = result.unwrap_err();
    assert!(matches!(err, RunError::Failed { .. }));
    assert_eq!(err.exit_code(), Some(3));
}

#[tokio::test]
async fn shell_executor_succeeds_with_output() {
    let tmp = TempDir::new().unwrap();
    let script = write_raw(tmp.path(), "echo line one\necho line two\n");

    ShellExecutor.run(&script, &[]).await.unwrap();
}

#[tokio::test]
async fn shell_executor_survives_non_utf8_output() {
    let tmp = TempDir::new().unwrap();
    // One invalid byte, then well over a pipe buffer of further output.
    let script = write_raw(
        tmp.path(),
        "printf 'progress \\377\\n'\n\
         i=0\n\
         while [ $i -lt 20000 ]; do echo \"layer $i extracted\"; i=$((i + 1)); done\n\
         exit 0\n",
    );

    ShellExecutor.run(&script, &[]).await.unwrap();
}

#[tokio::test]
async fn shell_executor_fails_on_missing_script() {
    let tmp = TempDir::new().unwrap();

    let result = ShellExecutor
        .run(&tmp.path().join("does-not-exist.sh"), &[])
        .await;

    // sh starts, cannot open the file, and exits non-zero.
    assert!(matches!(result, Err(RunError::Failed { .. })));
}
