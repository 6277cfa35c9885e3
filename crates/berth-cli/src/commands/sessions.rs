use super::AppContext;
use anyhow::{Result, bail};
use berth_application::SessionListController;
use berth_core::protocol::CreateSessionRequest;
use berth_core::session::{ContainerInfo, Session, SessionStatus};
use colored::{ColoredString, Colorize};
use std::collections::HashMap;

fn status_label(status: SessionStatus) -> ColoredString {
    match status {
        SessionStatus::Running => "running".green(),
        SessionStatus::Stopped => "stopped".yellow(),
        SessionStatus::Pending => "pending".cyan(),
        SessionStatus::Error => "error".red(),
    }
}

pub(crate) fn print_row(session: &Session) {
    let image = session
        .container_info
        .as_ref()
        .map(|info| info.image.as_str())
        .unwrap_or("-");
    println!(
        "{}  {:<10}  {}  {}",
        session.id,
        status_label(session.status),
        session.name,
        image
    );
}

pub async fn list(ctx: &AppContext, workspace_id: &str) -> Result<()> {
    let mut sessions = SessionListController::new(ctx.client.clone(), workspace_id);
    sessions.load().await?;
    if sessions.items().is_empty() {
        println!("No sessions.");
        return Ok(());
    }
    for session in sessions.items() {
        print_row(session);
    }
    Ok(())
}

pub async fn create(
    ctx: &AppContext,
    workspace_id: &str,
    name: &str,
    image: Option<&str>,
) -> Result<()> {
    if name.trim().is_empty() {
        bail!("session name must not be empty");
    }
    let request = CreateSessionRequest {
        name: name.trim().to_string(),
        status: SessionStatus::Stopped,
        container_info: image.map(|image| ContainerInfo {
            image: image.to_string(),
            ports: Vec::new(),
            environment: HashMap::new(),
        }),
    };
    let mut sessions = SessionListController::new(ctx.client.clone(), workspace_id);
    let session = sessions.create(&request).await?;
    println!("Created session {}", session.id);
    Ok(())
}

pub async fn start(ctx: &AppContext, workspace_id: &str, session_id: &str) -> Result<()> {
    let mut sessions = SessionListController::new(ctx.client.clone(), workspace_id);
    let session = sessions.start(session_id).await?;
    print_row(&session);
    Ok(())
}

pub async fn stop(ctx: &AppContext, workspace_id: &str, session_id: &str) -> Result<()> {
    let mut sessions = SessionListController::new(ctx.client.clone(), workspace_id);
    let session = sessions.stop(session_id).await?;
    print_row(&session);
    Ok(())
}

pub async fn delete(ctx: &AppContext, workspace_id: &str, session_id: &str) -> Result<()> {
    let mut sessions = SessionListController::new(ctx.client.clone(), workspace_id);
    sessions.delete(session_id).await?;
    println!("Deleted session {session_id}");
    Ok(())
}

pub async fn start_all(ctx: &AppContext, workspace_id: &str) -> Result<()> {
    let mut sessions = SessionListController::new(ctx.client.clone(), workspace_id);
    sessions.load().await?;
    let issued = sessions.start_all().await;
    println!("Issued {issued} start call(s)");
    for session in sessions.items() {
        print_row(session);
    }
    Ok(())
}

pub async fn stop_all(ctx: &AppContext, workspace_id: &str) -> Result<()> {
    let mut sessions = SessionListController::new(ctx.client.clone(), workspace_id);
    sessions.load().await?;
    let issued = sessions.stop_all().await;
    println!("Issued {issued} stop call(s)");
    for session in sessions.items() {
        print_row(session);
    }
    Ok(())
}
