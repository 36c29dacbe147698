//! Repos command.

use serde_json::json;

use crate::cli::output;
use crate::core::resolver::ConfigResolver;
use crate::error::Result;

/// List custom Maven repositories.
pub fn execute(resolver: &ConfigResolver, json: bool) -> Result<()> {
    let repos = resolver.custom_repositories();

    if json {
        let entries: Vec<_> = repos
            .iter()
            .map(|repo| {
                json!({
                    "name": repo.name(),
                    "index": repo.index,
                    "url": repo.url,
                    "username": repo.username,
                    "has_credentials": repo.has_credentials(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if repos.is_empty() {
        output::dimmed("no custom repositories configured");
        return Ok(());
    }

    output::section("Custom repositories");
    for repo in &repos {
        output::kv(&repo.name(), &repo.url);
        if repo.username.is_empty() {
            output::list_item("no credentials");
        } else {
            output::list_item(&format!(
                "user {} / password {}",
                repo.username,
                if repo.password.is_empty() {
                    "missing".to_string()
                } else {
                    output::mask(&repo.password)
                }
            ));
        }
    }

    Ok(())
}
