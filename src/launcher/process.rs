//! Child Process Supervision
//!
//! Spawns the services described by `ProcessSpec`s and forwards their output.
//!
//! ## Responsibilities
//! - **Spawning**: Starting each service with its own arguments and extra environment.
//! - **Log Forwarding**: One background task per output stream, prefixing every line.
//! - **Shutdown**: Asking every child to stop, then killing the ones that outlive the timeout.

use anyhow::Result;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::{Child, Command};
use tokio::task::JoinHandle;

/// How long a child may take to exit after `SIGTERM` before it is killed.
pub const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// How to start one service.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessSpec {
    pub name: String,
    pub program: String,
    pub args: Vec<String>,
    /// Extra environment added on top of the launcher's own.
    pub env: Vec<(String, String)>,
}

impl ProcessSpec {
    pub fn new(name: &str, program: &str, args: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            program: program.to_string(),
            args: args.iter().map(|arg| arg.to_string()).collect(),
            env: Vec::new(),
        }
    }

    pub fn with_env(mut self, key: &str, value: &str) -> Self {
        self.env.push((key.to_string(), value.to_string()));
        self
    }
}

/// `searchd` and `gateway`, both run through `cargo run`.
pub fn default_specs(
    searchd_addr: &str,
    gateway_addr: &str,
    searchd_url: &str,
) -> Vec<ProcessSpec> {
    vec![
        ProcessSpec::new("searchd", "cargo", &["run", "--quiet", "--bin", "searchd"])
            .with_env("SEARCHD_ADDR", searchd_addr),
        ProcessSpec::new("gateway", "cargo", &["run", "--quiet", "-p", "gateway"])
            .with_env("SEARCHD_URL", searchd_url)
            .with_env("GATEWAY_ADDR", gateway_addr),
    ]
}

/// A started child and the tasks forwarding its output.
struct RunningProcess {
    spec: ProcessSpec,
    child: Child,
    pipes: Vec<JoinHandle<()>>,
}

/// Owns every child process started by the launcher.
pub struct Supervisor {
    running: Vec<RunningProcess>,
}

impl Supervisor {
    /// Starts every spec. A spec that fails to spawn is logged and skipped.
    pub fn start(specs: Vec<ProcessSpec>) -> Self {
        let mut running = Vec::new();
        for spec in specs {
            match spawn(&spec) {
                Ok((child, pipes)) => {
                    tracing::info!(
                        "[{}] started pid={}",
                        spec.name,
                        child.id().map(|pid| pid.to_string()).unwrap_or_default()
                    );
                    running.push(RunningProcess { spec, child, pipes });
                }
                Err(e) => {
                    tracing::error!("[{}] failed to start: {}", spec.name, e);
                }
            }
        }
        Self { running }
    }

    /// Names of the processes that were started successfully.
    pub fn names(&self) -> Vec<String> {
        self.running.iter().map(|p| p.spec.name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.running.len()
    }

    pub fn is_empty(&self) -> bool {
        self.running.is_empty()
    }

    /// Sends `SIGTERM` to every child, then `SIGKILL` to any child still
    /// running after `SHUTDOWN_TIMEOUT`.
    pub async fn shutdown(self) {
        for mut process in self.running {
            let name = process.spec.name.clone();
            if let Err(e) = terminate(&mut process.child) {
                tracing::debug!("[{}] terminate failed (already exited?): {}", name, e);
            }

            match tokio::time::timeout(SHUTDOWN_TIMEOUT, process.child.wait()).await {
                Ok(Ok(status)) => tracing::info!("[{}] exited with {}", name, status),
                Ok(Err(e)) => tracing::warn!("[{}] wait failed: {}", name, e),
                Err(_) => {
                    tracing::warn!(
                        "[{}] still running after {:?}, killing",
                        name,
                        SHUTDOWN_TIMEOUT
                    );
                    if let Err(e) = process.child.kill().await {
                        tracing::warn!("[{}] kill failed: {}", name, e);
                    }
                }
            }

            for pipe in process.pipes {
                pipe.abort();
            }
        }
    }
}

#[cfg(unix)]
fn terminate(child: &mut Child) -> std::io::Result<()> {
    // No pid means the child has already been reaped
    let Some(pid) = child.id() else {
        return Ok(());
    };
    // SAFETY: `kill` takes plain integers and the pid belongs to our unreaped child
    if unsafe { libc::kill(pid as libc::pid_t, libc::SIGTERM) } == 0 {
        Ok(())
    } else {
        Err(std::io::Error::last_os_error())
    }
}

#[cfg(not(unix))]
fn terminate(child: &mut Child) -> std::io::Result<()> {
    child.start_kill()
}

fn spawn(spec: &ProcessSpec) -> Result<(Child, Vec<JoinHandle<()>>)> {
    let mut command = Command::new(&spec.program);
    command
        .args(&spec.args)
        .envs(spec.env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let mut child = command.spawn()?;

    let mut pipes = Vec::new();
    if let Some(stdout) = child.stdout.take() {
        pipes.push(pipe_with_prefix(spec.name.clone(), stdout));
    }
    if let Some(stderr) = child.stderr.take() {
        pipes.push(pipe_with_prefix(spec.name.clone(), stderr));
    }

    Ok((child, pipes))
}

fn pipe_with_prefix<R>(name: String, reader: R) -> JoinHandle<()>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut lines = BufReader::new(reader).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => println!("{}", prefix_line(&name, &line)),
                Ok(None) => break,
                Err(e) => {
                    tracing::debug!("[{}] output stream closed: {}", name, e);
                    break;
                }
            }
        }
    })
}

pub fn prefix_line(name: &str, line: &str) -> String {
    format!("[{}] {}", name, line)
}
