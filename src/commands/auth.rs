use clap::ArgMatches;
use colored::*;

use crate::client::JiraClient;
use crate::config::{load_config, save_config, ConnectionConfig};
use crate::constants::DEFAULT_READ_TIMEOUT_SECS;
use crate::formatting::mask_secret;

pub async fn handle_auth(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = load_config()?;

    if matches.get_flag("show") {
        let show = |value: &Option<String>| value.clone().unwrap_or_else(|| "(not set)".to_string());
        println!("URL:      {}", show(&config.url));
        println!("Username: {}", show(&config.username));
        println!(
            "Password: {}",
            config
                .password
                .as_deref()
                .map(mask_secret)
                .unwrap_or_else(|| "(not set)".to_string())
        );
        println!("Project:  {}", show(&config.project_name));
        return Ok(());
    }

    let mut changed = false;
    for (id, slot) in [
        ("url", &mut config.url),
        ("username", &mut config.username),
        ("password", &mut config.password),
        ("project-name", &mut config.project_name),
    ] {
        if let Some(value) = matches.get_one::<String>(id) {
            *slot = Some(value.clone());
            changed = true;
        }
    }

    if !changed {
        println!("Usage: jira-fix-version auth --url <URL> --username <USER> --password <PASSWORD> or jira-fix-version auth --show");
        return Ok(());
    }

    save_config(&config)?;
    println!("Credentials saved successfully!");

    if let (Some(site), Some(username), Some(password)) =
        (&config.url, &config.username, &config.password)
    {
        let client = JiraClient::new(&ConnectionConfig {
            site: site.clone(),
            username: username.clone(),
            password: password.clone(),
            read_timeout_secs: DEFAULT_READ_TIMEOUT_SECS,
        })?;
        match client.get_myself().await {
            Ok(user) => println!("{} Connected as: {}", "✅".green(), user.display_name),
            Err(e) => println!("{} Failed to authenticate: {}", "❌".red(), e),
        }
    }

    Ok(())
}
