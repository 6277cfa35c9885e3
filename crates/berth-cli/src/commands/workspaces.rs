use super::AppContext;
use anyhow::{Result, bail};
use berth_application::WorkspaceListController;
use berth_core::workspace::Workspace;

fn print_row(workspace: &Workspace) {
    println!(
        "{}  {}  {}",
        workspace.id,
        workspace.name,
        workspace.description.as_deref().unwrap_or("-")
    );
}

pub async fn list(ctx: &AppContext) -> Result<()> {
    let mut workspaces = WorkspaceListController::new(ctx.client.clone());
    workspaces.load().await?;
    if workspaces.items().is_empty() {
        println!("No workspaces.");
        return Ok(());
    }
    for workspace in workspaces.items() {
        print_row(workspace);
    }
    Ok(())
}

pub async fn create(ctx: &AppContext, name: &str, description: Option<&str>) -> Result<()> {
    if name.trim().is_empty() {
        bail!("workspace name must not be empty");
    }
    let mut workspaces = WorkspaceListController::new(ctx.client.clone());
    let workspace = workspaces.create(name.trim(), description).await?;
    println!("Created workspace {}", workspace.id);
    Ok(())
}

pub async fn update(
    ctx: &AppContext,
    id: &str,
    name: &str,
    description: Option<&str>,
) -> Result<()> {
    if name.trim().is_empty() {
        bail!("workspace name must not be empty");
    }
    let mut workspaces = WorkspaceListController::new(ctx.client.clone());
    let workspace = workspaces.update(id, name.trim(), description).await?;
    print_row(&workspace);
    Ok(())
}

pub async fn delete(ctx: &AppContext, id: &str) -> Result<()> {
    let mut workspaces = WorkspaceListController::new(ctx.client.clone());
    workspaces.delete(id).await?;
    println!("Deleted workspace {id}");
    Ok(())
}
