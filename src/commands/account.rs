use std::io::Write;

use anyhow::Result;

use super::Workspace;
use crate::services::auth::AuthService;

pub fn signup(
    workspace: &Workspace,
    email: &str,
    password: &str,
    name: Option<&str>,
    out: &mut dyn Write,
) -> Result<()> {
    let user = AuthService::new(&workspace.db).sign_up(email, password, name)?;
    writeln!(out, "Welcome, {}! You are signed in.", user.display_name())?;
    Ok(())
}

pub fn signin(workspace: &Workspace, email: &str, password: &str, out: &mut dyn Write) -> Result<()> {
    let user = AuthService::new(&workspace.db).sign_in(email, password)?;
    writeln!(out, "Signed in as {}", user.email)?;
    Ok(())
}

pub fn signout(workspace: &Workspace, out: &mut dyn Write) -> Result<()> {
    AuthService::new(&workspace.db).sign_out()?;
    writeln!(out, "Signed out")?;
    Ok(())
}

pub fn whoami(workspace: &Workspace, out: &mut dyn Write) -> Result<()> {
    match AuthService::new(&workspace.db).current_user()? {
        Some(user) => match &user.name {
            Some(name) => writeln!(out, "{} <{}>", name, user.email)?,
            None => writeln!(out, "{}", user.email)?,
        },
        None => writeln!(out, "Not signed in")?,
    }
    Ok(())
}
