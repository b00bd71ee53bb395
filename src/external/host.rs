use super::DisplayPlacement;
use crate::EXTERNAL_DISPLAY_FLAG;
use prompter_core::sync::{DisplayCommand, HostError, SecondaryStatus, WindowHost};
use std::collections::VecDeque;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Child, ChildStdin, Command, Stdio};
use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use tracing::{debug, info, warn};

#[derive(Debug, Default)]
struct OutboxQueue {
    snapshot: Option<String>,
    controls: VecDeque<String>,
    closing: bool,
    broken: bool,
}

/// Lines waiting for the writer thread. A new snapshot replaces one that was
/// never written; control commands are kept in order.
#[derive(Debug, Default)]
struct Outbox {
    queue: Mutex<OutboxQueue>,
    ready: Condvar,
}

impl Outbox {
    fn lock(&self) -> MutexGuard<'_, OutboxQueue> {
        self.queue.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn push(&self, command: &DisplayCommand, line: String) -> Result<(), HostError> {
        let mut queue = self.lock();
        if queue.broken || queue.closing {
            return Err(HostError::Closed);
        }
        match command {
            DisplayCommand::Snapshot(_) => {
                if queue.snapshot.replace(line).is_some() {
                    debug!("Replaced unsent snapshot");
                }
            }
            _ => queue.controls.push_back(line),
        }
        self.ready.notify_one();
        Ok(())
    }

    /// The writer drains what is queued, then exits and drops stdin.
    fn close(&self) {
        self.lock().closing = true;
        self.ready.notify_one();
    }

    fn mark_broken(&self) {
        self.lock().broken = true;
        self.ready.notify_one();
    }

    fn is_broken(&self) -> bool {
        self.lock().broken
    }

    /// Blocks until a line is queued. `None` once closing and empty.
    fn next_line(&self) -> Option<String> {
        let mut queue = self.lock();
        loop {
            if queue.broken {
                return None;
            }
            if let Some(line) = queue.snapshot.take() {
                return Some(line);
            }
            if let Some(line) = queue.controls.pop_front() {
                return Some(line);
            }
            if queue.closing {
                return None;
            }
            queue = self
                .ready
                .wait(queue)
                .unwrap_or_else(|poisoned| poisoned.into_inner());
        }
    }
}

/// Writer thread body: one JSON line per queued command.
fn write_lines(mut writer: impl Write, outbox: &Outbox) {
    while let Some(mut line) = outbox.next_line() {
        line.push('\n');
        let written = writer
            .write_all(line.as_bytes())
            .and_then(|()| writer.flush());
        if let Err(err) = written {
            debug!("External display pipe closed: {err}");
            outbox.mark_broken();
            return;
        }
    }
}

/// Runs the external display as a child process fed through its stdin.
/// Writes happen on a dedicated thread so the UI never waits on the pipe.
#[derive(Debug)]
pub struct ProcessWindowHost {
    placement: DisplayPlacement,
    config_path: Option<PathBuf>,
    child: Option<Child>,
    outbox: Option<Arc<Outbox>>,
}

impl ProcessWindowHost {
    pub fn new(placement: DisplayPlacement, config_path: Option<PathBuf>) -> Self {
        Self {
            placement,
            config_path,
            child: None,
            outbox: None,
        }
    }

    fn command_args(&self) -> Vec<String> {
        let mut args = vec![EXTERNAL_DISPLAY_FLAG.to_string()];
        args.extend(self.placement.to_args());
        if let Some(path) = &self.config_path {
            args.push("--config".to_string());
            args.push(path.display().to_string());
        }
        args
    }

    fn reap_in_background(mut child: Child) {
        let pid = child.id();
        let spawned = std::thread::Builder::new()
            .name("external-display-reaper".to_string())
            .spawn(move || match child.wait() {
                Ok(status) => debug!(pid, %status, "External display exited"),
                Err(err) => warn!(pid, "Failed to wait for external display: {err}"),
            });
        if let Err(err) = spawned {
            warn!(pid, "Unable to reap external display: {err}");
        }
    }

    fn abandon(mut child: Child) {
        if let Err(err) = child.kill() {
            debug!(pid = child.id(), "Failed to kill external display: {err}");
        }
        Self::reap_in_background(child);
    }

    /// A child without a stdin pipe is useless; kill it rather than leak it.
    fn take_stdin(mut child: Child) -> Result<(Child, ChildStdin), HostError> {
        match child.stdin.take() {
            Some(stdin) => Ok((child, stdin)),
            None => {
                Self::abandon(child);
                Err(HostError::Closed)
            }
        }
    }

    fn pipe_alive(&self) -> bool {
        self.outbox.as_ref().is_some_and(|outbox| !outbox.is_broken())
    }

    fn detach_outbox(&mut self) {
        if let Some(outbox) = self.outbox.take() {
            outbox.close();
        }
    }
}

impl WindowHost for ProcessWindowHost {
    fn create_secondary(&mut self) -> Result<SecondaryStatus, HostError> {
        if self.is_open() {
            return Ok(SecondaryStatus::Focused);
        }
        self.close_secondary();
        let exe = std::env::current_exe()?;
        let args = self.command_args();
        let child = Command::new(&exe)
            .args(&args)
            .stdin(Stdio::piped())
            .spawn()?;
        let (child, stdin) = Self::take_stdin(child)?;

        let outbox = Arc::new(Outbox::default());
        let writer_outbox = Arc::clone(&outbox);
        let spawned = std::thread::Builder::new()
            .name("external-display-writer".to_string())
            .spawn(move || write_lines(stdin, &writer_outbox));
        if let Err(err) = spawned {
            Self::abandon(child);
            return Err(HostError::Spawn(err));
        }

        info!(pid = child.id(), ?args, "Spawned external display");
        self.outbox = Some(outbox);
        self.child = Some(child);
        Ok(SecondaryStatus::Created)
    }

    fn close_secondary(&mut self) {
        self.detach_outbox();
        if let Some(child) = self.child.take() {
            Self::reap_in_background(child);
        }
    }

    fn send_to_secondary(&mut self, command: &DisplayCommand) -> Result<(), HostError> {
        let Some(outbox) = self.outbox.as_ref() else {
            return Err(HostError::Closed);
        };
        let line = command.encode_line()?;
        if let Err(err) = outbox.push(command, line) {
            debug!(command = command.name(), "External display pipe closed");
            self.detach_outbox();
            return Err(err);
        }
        Ok(())
    }

    fn poll_closed(&mut self) -> bool {
        let Some(child) = self.child.as_mut() else {
            return false;
        };
        match child.try_wait() {
            Ok(Some(status)) => {
                info!(%status, "External display window closed");
                self.child = None;
                self.detach_outbox();
                true
            }
            Ok(None) if !self.pipe_alive() => {
                self.detach_outbox();
                if let Some(child) = self.child.take() {
                    Self::reap_in_background(child);
                }
                true
            }
            Ok(None) => false,
            Err(err) => {
                warn!("Failed to query external display status: {err}");
                false
            }
        }
    }

    fn is_open(&self) -> bool {
        self.child.is_some() && self.pipe_alive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn child_arguments_carry_placement_and_config() {
        let host = ProcessWindowHost::new(
            DisplayPlacement {
                x: Some(2560.0),
                y: Some(0.0),
                ..DisplayPlacement::default()
            },
            Some(PathBuf::from("conf/stage.toml")),
        );
        assert_eq!(
            host.command_args(),
            vec![
                "--external-display",
                "--x",
                "2560",
                "--y",
                "0",
                "--config",
                "conf/stage.toml"
            ]
        );
    }

    #[test]
    fn unopened_host_reports_closed() {
        let mut host = ProcessWindowHost::new(DisplayPlacement::default(), None);
        assert!(!host.is_open());
        assert!(!host.poll_closed());
        assert!(matches!(
            host.send_to_secondary(&DisplayCommand::Focus),
            Err(HostError::Closed)
        ));
        host.close_secondary();
    }

    fn snapshot(seq: u64) -> DisplayCommand {
        DisplayCommand::Snapshot(prompter_core::sync::SyncSnapshot::capture(
            &prompter_core::AppState::default(),
            seq,
        ))
    }

    fn queue(outbox: &Outbox, command: DisplayCommand) -> Result<(), HostError> {
        let line = command.encode_line().expect("encode command");
        outbox.push(&command, line)
    }

    #[test]
    fn unsent_snapshots_are_coalesced() {
        let outbox = Outbox::default();
        queue(&outbox, snapshot(1)).expect("queue first");
        queue(&outbox, snapshot(2)).expect("queue second");
        queue(&outbox, DisplayCommand::Focus).expect("queue focus");
        queue(&outbox, snapshot(3)).expect("queue third");
        queue(&outbox, DisplayCommand::Shutdown).expect("queue shutdown");
        outbox.close();

        let mut written = Vec::new();
        write_lines(&mut written, &outbox);
        let text = String::from_utf8(written).expect("utf8 output");
        let commands: Vec<DisplayCommand> = text
            .lines()
            .map(|line| DisplayCommand::decode_line(line).expect("decode written line"))
            .collect();
        assert_eq!(
            commands,
            vec![snapshot(3), DisplayCommand::Focus, DisplayCommand::Shutdown]
        );
        assert!(queue(&outbox, DisplayCommand::Focus).is_err());
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::from(std::io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn failed_write_marks_the_pipe_broken() {
        let outbox = Outbox::default();
        queue(&outbox, snapshot(1)).expect("queue snapshot");
        write_lines(BrokenPipe, &outbox);

        assert!(outbox.is_broken());
        assert!(matches!(
            queue(&outbox, snapshot(2)),
            Err(HostError::Closed)
        ));
    }

    #[test]
    fn pushing_never_waits_for_the_writer() {
        let outbox = Outbox::default();
        for seq in 1..=1_000 {
            queue(&outbox, snapshot(seq)).expect("queue without a writer");
        }
        assert_eq!(outbox.next_line(), Some(snapshot(1_000).encode_line().expect("encode")));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn child_without_stdin_is_killed() {
        let child = Command::new("sleep")
            .arg("30")
            .stdin(Stdio::null())
            .spawn()
            .expect("spawn sleep");
        let proc_dir = PathBuf::from(format!("/proc/{}", child.id()));

        assert!(matches!(
            ProcessWindowHost::take_stdin(child),
            Err(HostError::Closed)
        ));
        let deadline = std::time::Instant::now() + std::time::Duration::from_secs(5);
        while proc_dir.exists() && std::time::Instant::now() < deadline {
            std::thread::sleep(std::time::Duration::from_millis(20));
        }
        assert!(!proc_dir.exists());
    }
}
