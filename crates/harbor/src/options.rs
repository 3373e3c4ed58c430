//! Resolution of client options from a JSON file and CLI overrides.

use harbor_gateway::ClientOptions;
use miette::Result;
use tracing::debug;

use crate::OptionArgs;

/// Load options from `--options` (if given) and apply flag overrides.
pub async fn resolve(args: &OptionArgs) -> Result<ClientOptions> {
    let mut options = match &args.options {
        Some(path) => {
            let json = tokio::fs::read_to_string(path)
                .await
                .map_err(|e| miette::miette!("failed to read {}: {}", path.display(), e))?;
            ClientOptions::from_json(&json)
                .map_err(|e| miette::miette!("invalid options in {}: {}", path.display(), e))?
        }
        None => ClientOptions::default(),
    };

    if let Some(enabled) = args.cache_enabled {
        options = options.cache_enabled(enabled);
    }
    if let Some(limit) = args.guild_limit {
        options = options.guild_limit(limit);
    }
    if let Some(limit) = args.user_limit {
        options = options.user_limit(limit);
    }

    debug!(?options, "resolved client options");
    Ok(options)
}
