#![deny(clippy::all, clippy::pedantic)]

use crate::client::{CliError, Ctx};
use crate::io::read_line;

pub async fn login(ctx: &Ctx, email: &str, password: Option<String>) -> Result<(), CliError> {
    ctx.require_auth_key()?;
    let password = match password {
        Some(password) => password,
        None => read_line("Password: ")?,
    };
    let user = ctx.gate().login(email, &password).await?;
    println!("Signed in as {}", user.email);
    Ok(())
}

pub fn logout(ctx: &Ctx) -> Result<(), CliError> {
    ctx.gate().logout()?;
    println!("Signed out");
    Ok(())
}

pub fn whoami(ctx: &Ctx) -> Result<(), CliError> {
    let user = ctx.session()?;
    println!("{} (session valid until {})", user.email, user.expires_at);
    Ok(())
}
