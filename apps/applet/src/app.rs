//! Application orchestrator: wires the monitor, timers and panel together.

use std::sync::Arc;
use std::time::Duration;

use aptfetch_desktop::{DesktopSink, SystemRunner};
use aptfetch_monitor::{
    LaunchOutcome, PresentationSink, Scheduler, StatusMonitor, UpdateManagerLauncher,
};
use aptfetch_status::{LockProbe, PathLockProbe, StatusSource};
use aptfetch_tray::{TrayConfig, TrayEvent, TrayHandle, console};
use tokio::sync::Mutex;

use crate::config::Config;

/// How often the tray event channel is drained.
const EVENT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Runs the applet until the user quits or SIGINT arrives.
pub async fn run(config: Config) -> anyhow::Result<()> {
    // -- Tray --
    let tray_config = TrayConfig {
        notifications_enabled: config.notifications_enabled,
        ..TrayConfig::default()
    };
    let applet_name = tray_config.applet_name.clone();
    let (mut tray_handle, event_tx, update_rx) = TrayHandle::new(tray_config);
    console::spawn(applet_name, event_tx, update_rx)?;
    if !config.notifications_enabled {
        // Bring the front-end switch in line with the saved setting.
        tray_handle.set_notifications(false);
    }
    let tray = Arc::new(std::sync::Mutex::new(tray_handle));

    // -- Monitor --
    let sink: Arc<dyn PresentationSink> =
        Arc::new(DesktopSink::new(config.desktop_config(), Arc::clone(&tray)));
    let lock: Arc<dyn LockProbe> = Arc::new(PathLockProbe::new(&config.lock_path));
    let monitor = Arc::new(Mutex::new(StatusMonitor::new(
        config.monitor_config(),
        Arc::clone(&sink),
        lock,
    )));

    // -- Timers --
    let source: Arc<dyn StatusSource> = Arc::new(config.status_source());
    let mut scheduler = Scheduler::new(Arc::clone(&monitor), source).await;
    scheduler.start();

    // -- Update manager --
    let launcher = Arc::new(UpdateManagerLauncher::new(
        config.update_managers.clone(),
        Arc::new(SystemRunner::new(&config.elevation_program)),
        sink,
    ));

    tracing::info!(lock = %config.lock_path.display(), "applet ready");

    // -- Main loop --
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = &mut ctrl_c => {
                tracing::info!("SIGINT received, shutting down");
                break;
            }
            _ = tokio::time::sleep(EVENT_POLL_INTERVAL) => {
                if drain_events(&tray, &monitor, &launcher).await == Flow::Quit {
                    tracing::info!("quit requested via tray");
                    break;
                }
            }
        }
    }

    // -- Graceful shutdown --
    tracing::info!("stopping timers...");
    scheduler.stop();
    match tray.lock() {
        Ok(tray) => tray.shutdown(),
        Err(_) => tracing::error!("tray handle lock poisoned"),
    }

    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Handles every queued tray event.
async fn drain_events(
    tray: &std::sync::Mutex<TrayHandle>,
    monitor: &Mutex<StatusMonitor>,
    launcher: &Arc<UpdateManagerLauncher>,
) -> Flow {
    loop {
        // The std guard must be released before awaiting.
        let event = match tray.lock() {
            Ok(tray) => tray.try_recv_event(),
            Err(_) => {
                tracing::error!("tray handle lock poisoned");
                return Flow::Quit;
            }
        };
        let Some(event) = event else {
            return Flow::Continue;
        };
        if handle_event(event, monitor, launcher).await == Flow::Quit {
            return Flow::Quit;
        }
    }
}

async fn handle_event(
    event: TrayEvent,
    monitor: &Mutex<StatusMonitor>,
    launcher: &Arc<UpdateManagerLauncher>,
) -> Flow {
    tracing::debug!(?event, "tray event");
    match event {
        TrayEvent::StatusRequested => monitor.lock().await.on_status_clicked(),
        TrayEvent::NotificationsToggled(enabled) => {
            monitor.lock().await.on_notification_toggle_changed(enabled)
        }
        TrayEvent::AboutRequested => monitor.lock().await.on_about_clicked(),
        TrayEvent::UpdateManagerRequested => {
            let launcher = Arc::clone(launcher);
            tokio::spawn(async move {
                match launcher.launch().await {
                    Ok(LaunchOutcome::Launched(program)) => {
                        tracing::info!(program, "update manager exited")
                    }
                    Ok(LaunchOutcome::NotFound) => {}
                    Err(e) => tracing::warn!("update manager launch failed: {e}"),
                }
            });
        }
        TrayEvent::QuitRequested => return Flow::Quit,
    }
    Flow::Continue
}

/// Fetches the status once and prints it.
///
/// With `json` set the decoded snapshot is printed as JSON, otherwise the
/// same summary the Status dialog shows.
pub async fn print_status(config: &Config, json: bool) -> anyhow::Result<()> {
    let source = config.status_source();
    let raw = source.fetch().await?;
    let snapshot = aptfetch_status::decode(&raw)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        print!("{}", aptfetch_status::summary(&snapshot));
    }
    Ok(())
}
