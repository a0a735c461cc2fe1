// User management CLI commands

use std::io::{self, Write};

use crate::services::AuthService;

/// Read a password from stdin
pub fn prompt_password() -> Result<String, Box<dyn std::error::Error>> {
    print!("Password: ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let password = input.trim_end_matches(['\r', '\n']).to_string();

    if password.is_empty() {
        return Err("Password must not be empty".into());
    }
    Ok(password)
}

pub async fn register_user(
    auth_service: &AuthService,
    username: &str,
    password: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let saved = auth_service.register(username, password).await?;

    println!("✅ Registered {} (id {})", saved.username, saved.id.unwrap_or_default());
    Ok(())
}

pub async fn grant_role(
    auth_service: &AuthService,
    username: &str,
    role: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let saved = auth_service.grant_role(username, role).await?;

    println!("✅ {} now has roles: {}", saved.username, saved.role_names().join(", "));
    Ok(())
}

pub async fn list_users(auth_service: &AuthService) -> Result<(), Box<dyn std::error::Error>> {
    let users = auth_service.list_users().await?;

    if users.is_empty() {
        println!("No users registered.");
        return Ok(());
    }

    for user in users {
        println!(
            "{:>5}  {:<24} enabled={} non_expired={} credentials_non_expired={} non_locked={} roles=[{}]",
            user.id.unwrap_or_default(),
            user.username,
            user.enabled,
            user.account_non_expired,
            user.credentials_non_expired,
            user.account_non_locked,
            user.role_names().join(", "),
        );
    }
    Ok(())
}
