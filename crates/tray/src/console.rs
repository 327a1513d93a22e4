//! Terminal front-end for the tray interface.
//!
//! Reads menu commands from stdin and reports icon/tooltip changes through
//! the log. Used when the applet runs outside a panel host.

use std::io::BufRead;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread;

use crate::menu::{MenuAction, MenuItem, MenuState};
use crate::tray::{TrayEvent, TrayUpdate};

/// Maps one line of user input to a tray event.
///
/// Returns `None` for blank or unknown input.
pub fn parse_command(line: &str, state: &MenuState) -> Option<TrayEvent> {
    let mut words = line.split_whitespace();
    let cmd = words.next()?.to_ascii_lowercase();
    let arg = words.next().map(str::to_ascii_lowercase);

    let action = match cmd.as_str() {
        "status" | "s" => MenuAction::Status,
        "notify" | "notifications" | "n" => match arg.as_deref() {
            Some("on") => return Some(TrayEvent::NotificationsToggled(true)),
            Some("off") => return Some(TrayEvent::NotificationsToggled(false)),
            None | Some("toggle") => MenuAction::ToggleNotifications,
            Some(_) => return None,
        },
        "update" | "u" => MenuAction::UpdateManager,
        "about" => MenuAction::About,
        "quit" | "q" | "exit" => MenuAction::Quit,
        _ => return None,
    };

    Some(action.into_event(state))
}

/// Renders menu items as plain text lines.
pub fn render_menu(items: &[MenuItem]) -> String {
    items
        .iter()
        .map(|item| match (item.toggled, item.label.is_empty()) {
            (_, true) => "  ----".to_string(),
            (Some(on), _) => format!("  [{}] {}", if on { "x" } else { " " }, item.label),
            (None, _) if item.enabled => format!("  > {}", item.label),
            (None, _) => format!("  {}", item.label),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Starts the console front-end threads.
///
/// One thread reads commands from stdin, the other drains `update_rx` and
/// logs what a panel would display. Both exit when their channel closes.
pub fn spawn(
    applet_name: String,
    event_tx: mpsc::Sender<TrayEvent>,
    update_rx: mpsc::Receiver<TrayUpdate>,
) -> std::io::Result<()> {
    let state = Arc::new(Mutex::new(MenuState {
        applet_name,
        ..MenuState::default()
    }));

    let render_state = Arc::clone(&state);
    thread::Builder::new()
        .name("tray-updates".into())
        .spawn(move || {
            for update in update_rx {
                if let Ok(mut s) = render_state.lock() {
                    s.apply(&update);
                }
                match update {
                    TrayUpdate::IconChanged(icon) => tracing::info!(%icon, "tray icon"),
                    TrayUpdate::TooltipChanged(text) => tracing::info!(tooltip = %text, "tray tooltip"),
                    TrayUpdate::NotificationsToggled(enabled) => {
                        tracing::info!(enabled, "notifications toggled")
                    }
                    TrayUpdate::CloseMenu => {}
                    TrayUpdate::Shutdown => break,
                }
            }
            tracing::debug!("tray update thread exiting");
        })?;

    thread::Builder::new()
        .name("tray-input".into())
        .spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else { break };
                let snapshot = match state.lock() {
                    Ok(s) => s.clone(),
                    Err(_) => break,
                };

                if line.trim().eq_ignore_ascii_case("menu") {
                    println!("{}", render_menu(&snapshot.build_menu()));
                    continue;
                }

                match parse_command(&line, &snapshot) {
                    Some(event) => {
                        let quit = event == TrayEvent::QuitRequested;
                        if event_tx.send(event).is_err() || quit {
                            break;
                        }
                    }
                    None if line.trim().is_empty() => {}
                    None => println!(
                        "unknown command: {} (try: menu, status, notify [on|off], update, about, quit)",
                        line.trim()
                    ),
                }
            }
            tracing::debug!("tray input thread exiting");
        })?;

    Ok(())
}
