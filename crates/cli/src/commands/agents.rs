use nutrafuel_core::domain::agent::{AgentProfile, AgentTier};

use crate::commands::CommandResult;

pub fn run() -> CommandResult {
    let mut lines = Vec::new();
    for (heading, tier) in
        [("storefront agents:", AgentTier::Frontend), ("admin agents:", AgentTier::Backend)]
    {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push(heading.to_string());
        for profile in AgentProfile::for_tier(tier) {
            lines.push(format!("- {} ({}): {}", profile.id, profile.name, profile.description));
        }
    }
    CommandResult::text(lines.join("\n"))
}
