use anyhow::Result;

use crate::config::Config;

pub fn list_projects(config: &Config) -> Result<()> {
    let curated = config.curated_projects();
    if curated.is_empty() {
        println!("No curated projects configured.");
        return Ok(());
    }

    println!("{:<32} {:<14} MATCH KEYS", "PROJECT", "BADGE");
    for project in &curated {
        println!(
            "{:<32} {:<14} {}",
            project.display_name,
            project.badge.as_str(),
            project.match_keys().join(", ")
        );
    }

    Ok(())
}
