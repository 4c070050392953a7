//! Headless mode execution

use super::{
    SessionData,
    messages::{
        SessionMessage, print_session_exit_success, print_session_shutdown,
        print_session_starting,
    },
};
use crate::projection::DashboardView;
use crate::report::status_line;
use crate::view_model::{DashboardViewModel, Transition};
use chrono::Local;
use std::error::Error;

/// Runs the application in headless mode
///
/// This function handles:
/// 1. Console event logging
/// 2. Applying fetch results and printing a summary per refresh
/// 3. Ctrl+C shutdown handling
///
/// # Arguments
/// * `session` - Session data from setup
///
/// # Returns
/// * `Ok(())` - Headless mode completed successfully
/// * `Err` - Headless mode failed
pub async fn run_headless_mode(mut session: SessionData) -> Result<(), Box<dyn Error>> {
    print_session_starting(
        "headless",
        &session.environment,
        session.view_model.variant(),
        session.refresh_interval,
        session.log_threshold,
    );

    // Event loop: log events to console until Ctrl+C
    loop {
        tokio::select! {
            Some(event) = session.event_receiver.recv() => {
                if event.should_display(session.log_threshold) {
                    println!("{}", event);
                }
            }
            Some(outcome) = session.outcome_receiver.recv() => {
                let transition = session.view_model.apply(outcome.result);
                if let Some(message) = describe(&session.view_model, transition) {
                    message.print();
                }
            }
            _ = tokio::signal::ctrl_c() => {
                break;
            }
        }
    }

    print_session_shutdown();
    session.refresh_handle.shutdown().await;
    print_session_exit_success();

    Ok(())
}

/// Console line for a state transition, if it is worth printing.
fn describe(view_model: &DashboardViewModel, transition: Transition) -> Option<SessionMessage> {
    match transition {
        Transition::EnteredReady | Transition::Refreshed => match view_model.project() {
            DashboardView::Ready(dashboard) => Some(SessionMessage::success(format!(
                "#{} {}",
                view_model.refreshes(),
                status_line(&dashboard)
            ))),
            DashboardView::Loading => None,
        },
        Transition::KeptStale => {
            let age = view_model
                .stale_age(Local::now())
                .map(|age| age.num_seconds())
                .unwrap_or(0);
            Some(SessionMessage::warn(format!(
                "Keeping snapshot from {}s ago after {} failed refresh(es): {}",
                age,
                view_model.consecutive_failures(),
                view_model.last_error().unwrap_or("refresh failed")
            )))
        }
        Transition::StillLoading => None,
    }
}
