//! In-memory fakes for the monitor's external seams.

use std::collections::{HashSet, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use aptfetch_status::{LockProbe, SourceFuture, StatusError, StatusSource};
use aptfetch_tray::TrayIcon;

use crate::{CommandOutput, CommandRunner, MonitorError, PresentationError, PresentationSink, RunFuture};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkCall {
    Icon(TrayIcon),
    Tooltip(String),
    Notify(String, String),
    Info(String),
    Error(String),
    Toggled(bool),
}

#[derive(Default)]
pub struct RecordingSink {
    calls: Mutex<Vec<SinkCall>>,
    fail_dialogs: AtomicBool,
}

impl RecordingSink {
    pub fn fail_dialogs(&self) {
        self.fail_dialogs.store(true, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<SinkCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn icons(&self) -> Vec<TrayIcon> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                SinkCall::Icon(i) => Some(i),
                _ => None,
            })
            .collect()
    }

    /// Titles of emitted notifications.
    pub fn notifications(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                SinkCall::Notify(title, _) => Some(title),
                _ => None,
            })
            .collect()
    }

    pub fn infos(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                SinkCall::Info(text) => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn errors(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                SinkCall::Error(text) => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn toggles(&self) -> Vec<bool> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                SinkCall::Toggled(on) => Some(on),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: SinkCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl PresentationSink for RecordingSink {
    fn set_icon(&self, icon: TrayIcon) {
        self.record(SinkCall::Icon(icon));
    }

    fn set_tooltip(&self, text: &str) {
        self.record(SinkCall::Tooltip(text.into()));
    }

    fn notify(&self, title: &str, body: &str) {
        self.record(SinkCall::Notify(title.into(), body.into()));
    }

    fn show_info(&self, text: &str) -> Result<(), PresentationError> {
        if self.fail_dialogs.load(Ordering::SeqCst) {
            return Err(PresentationError::Unavailable("no display".into()));
        }
        self.record(SinkCall::Info(text.into()));
        Ok(())
    }

    fn show_error(&self, text: &str) {
        self.record(SinkCall::Error(text.into()));
    }

    fn notifications_toggled(&self, enabled: bool) {
        self.record(SinkCall::Toggled(enabled));
    }
}

pub struct FakeLock(AtomicBool);

impl FakeLock {
    pub fn new(present: bool) -> Self {
        Self(AtomicBool::new(present))
    }

    pub fn set(&self, present: bool) {
        self.0.store(present, Ordering::SeqCst);
    }
}

impl LockProbe for FakeLock {
    fn exists(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Replays queued outputs; repeats the last one when the queue runs dry.
/// With `hang` set, fetches never complete.
#[derive(Default)]
pub struct FakeSource {
    outputs: Mutex<VecDeque<String>>,
    last: Mutex<String>,
    hang: bool,
    calls: AtomicUsize,
}

impl FakeSource {
    pub fn new(outputs: &[&str]) -> Self {
        Self {
            outputs: Mutex::new(outputs.iter().map(|s| s.to_string()).collect()),
            ..Self::default()
        }
    }

    pub fn hanging() -> Self {
        Self {
            hang: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl StatusSource for FakeSource {
    fn fetch(&self) -> SourceFuture<'_> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Box::pin(async move {
            if self.hang {
                std::future::pending::<()>().await;
            }
            let mut last = self.last.lock().unwrap();
            if let Some(next) = self.outputs.lock().unwrap().pop_front() {
                *last = next;
            }
            if last.is_empty() {
                return Err(StatusError::Timeout(0));
            }
            Ok(last.clone())
        })
    }
}

/// Pretends a fixed set of programs is installed.
#[derive(Default)]
pub struct FakeRunner {
    installed: HashSet<String>,
    stderr: String,
    spawn_fails: bool,
    lookups: Mutex<Vec<String>>,
    launched: Mutex<Vec<String>>,
}

impl FakeRunner {
    pub fn with_installed(programs: &[&str]) -> Self {
        Self {
            installed: programs.iter().map(|s| s.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn stderr(mut self, text: &str) -> Self {
        self.stderr = text.into();
        self
    }

    pub fn spawn_fails(mut self) -> Self {
        self.spawn_fails = true;
        self
    }

    pub fn lookups(&self) -> Vec<String> {
        self.lookups.lock().unwrap().clone()
    }

    pub fn launched(&self) -> Vec<String> {
        self.launched.lock().unwrap().clone()
    }
}

impl CommandRunner for FakeRunner {
    fn exists<'a>(&'a self, program: &'a str) -> RunFuture<'a, bool> {
        Box::pin(async move {
            self.lookups.lock().unwrap().push(program.into());
            self.installed.contains(program)
        })
    }

    fn launch_elevated<'a>(
        &'a self,
        program: &'a str,
    ) -> RunFuture<'a, Result<CommandOutput, MonitorError>> {
        Box::pin(async move {
            if self.spawn_fails {
                return Err(MonitorError::Launch {
                    program: "pkexec".into(),
                    source: std::io::Error::from(std::io::ErrorKind::NotFound),
                });
            }
            self.launched.lock().unwrap().push(program.into());
            Ok(CommandOutput {
                success: self.stderr.is_empty(),
                stderr: self.stderr.clone(),
            })
        })
    }
}
