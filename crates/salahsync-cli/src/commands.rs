//! Command parsing and execution.

use std::time::Duration;

use anyhow::{anyhow, Result};
use serde_json::json;
use tracing::info;

use salahsync_core::utils::{format_bytes, format_hours_old};
use salahsync_core::{CacheDomain, DismissalKind, PromptFrequency, PromptScheduler};

use crate::AppContext;

/// How often `watch` probes connectivity, standing in for platform events
const WATCH_PROBE_INTERVAL: Duration = Duration::from_secs(60);

pub const USAGE: &str = "\
Usage: salahsync <command>

Commands:
  status [--json]                 Show freshness, sizes and prompt state
  sync                            Probe connectivity and record a sync
  clear [DOMAIN|all]              Clear one domain (prayer-times, qibla,
                                  calendar, mosques, preferences) or all
  dismiss temporary|session|extended
                                  Hide the refresh prompt for 2h/8h/24h
  prompts on|off                  Enable or disable refresh prompts
  frequency conservative|normal|aggressive
                                  How eagerly to prompt
  watch                           Monitor connectivity and prompt state
  help                            Show this message";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Status { json: bool },
    Sync,
    Clear(Option<CacheDomain>),
    Dismiss(DismissalKind),
    Prompts(bool),
    Frequency(PromptFrequency),
    Watch,
    Help,
}

impl Command {
    pub fn parse(args: &[String]) -> Result<Self> {
        let mut args = args.iter().map(String::as_str);
        let command = match args.next() {
            None | Some("status") => match args.next() {
                None => Command::Status { json: false },
                Some("--json") => Command::Status { json: true },
                Some(other) => return Err(anyhow!("unexpected argument: {}", other)),
            },
            Some("sync") => Command::Sync,
            Some("clear") => match args.next() {
                None | Some("all") => Command::Clear(None),
                Some(domain) => Command::Clear(Some(domain.parse().map_err(|e: String| anyhow!(e))?)),
            },
            Some("dismiss") => {
                let kind = args.next().ok_or_else(|| anyhow!("dismiss needs a kind"))?;
                Command::Dismiss(kind.parse().map_err(|e: String| anyhow!(e))?)
            }
            Some("prompts") => match args.next() {
                Some("on") => Command::Prompts(true),
                Some("off") => Command::Prompts(false),
                _ => return Err(anyhow!("prompts needs on or off")),
            },
            Some("frequency") => {
                let frequency = args.next().ok_or_else(|| anyhow!("frequency needs a value"))?;
                Command::Frequency(frequency.parse().map_err(|e: String| anyhow!(e))?)
            }
            Some("watch") => Command::Watch,
            Some("help") | Some("--help") | Some("-h") => Command::Help,
            Some(other) => return Err(anyhow!("unknown command: {}", other)),
        };
        Ok(command)
    }
}

pub async fn run(ctx: &AppContext, command: Command) -> Result<()> {
    match command {
        Command::Status { json } => status(ctx, json).await,
        Command::Sync => sync(ctx).await,
        Command::Clear(domain) => {
            match domain {
                Some(domain) => {
                    ctx.cache.clear(domain).await;
                    println!("Cleared {}", domain);
                }
                None => {
                    ctx.cache.clear_all_cache().await;
                    println!("Cleared all cached data");
                }
            }
            Ok(())
        }
        Command::Dismiss(kind) => {
            let prefs = ctx.policy.dismiss(kind).await;
            if let Some(until) = prefs.dismissed_until {
                println!("Refresh prompt hidden until {}", until.format("%Y-%m-%d %H:%M UTC"));
            }
            Ok(())
        }
        Command::Prompts(enabled) => {
            ctx.policy.set_auto_prompts(enabled).await;
            println!("Refresh prompts {}", if enabled { "enabled" } else { "disabled" });
            Ok(())
        }
        Command::Frequency(frequency) => {
            ctx.policy.set_prompt_frequency(frequency).await;
            println!("Prompt frequency set to {}", frequency.as_str());
            Ok(())
        }
        Command::Watch => watch(ctx).await,
        Command::Help => {
            println!("{}", USAGE);
            Ok(())
        }
    }
}

async fn status(ctx: &AppContext, as_json: bool) -> Result<()> {
    let freshness = ctx.cache.get_cache_freshness().await;
    let stats = ctx.cache.get_cache_stats().await;
    let ages = ctx.cache.get_cache_ages().await;
    let prefs = ctx.policy.load_preferences().await;
    let network = ctx.cache.get_network_status().await;
    let needs_sync = ctx.cache.needs_sync().await;
    let show_prompt = ctx.policy.should_show_refresh_prompt(ctx.monitor.is_online()).await;

    if as_json {
        let output = json!({
            "freshness": freshness,
            "stats": stats,
            "preferences": prefs,
            "networkStatus": network.map(|online| if online { "online" } else { "offline" }),
            "needsSync": needs_sync,
            "showRefreshPrompt": show_prompt,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let last_sync = freshness
        .last_sync
        .map(|at| at.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| "never".to_string());
    println!("Freshness:      {} ({})", freshness.status.as_str(), format_hours_old(freshness.hours_old));
    println!("Last sync:      {}", last_sync);
    println!("Needs sync:     {}", if needs_sync { "yes" } else { "no" });
    println!(
        "Network:        {}",
        match network {
            Some(true) => "online",
            Some(false) => "offline",
            None => "unknown",
        }
    );
    println!(
        "Prompts:        {} ({}){}",
        if prefs.enable_auto_prompts { "on" } else { "off" },
        prefs.prompt_frequency.as_str(),
        prefs
            .dismissed_until
            .map(|until| format!(", dismissed until {}", until.format("%Y-%m-%d %H:%M UTC")))
            .unwrap_or_default()
    );
    println!("Show prompt:    {}", if show_prompt { "yes" } else { "no" });
    println!();
    println!("{:<20} {:>10}  {}", "Cache", "Size", "Age");
    for domain in CacheDomain::ALL {
        let size = stats.sizes.get(&domain).copied().unwrap_or(0);
        println!("{:<20} {:>10}  {}", domain.name(), format_bytes(size), ages.display(domain));
    }
    println!("{:<20} {:>10}", "total", format_bytes(stats.total_size));
    Ok(())
}

async fn sync(ctx: &AppContext) -> Result<()> {
    if !ctx.monitor.is_online() {
        ctx.monitor.test_connectivity().await;
    }
    if ctx.monitor.sync_when_online().await {
        println!("Online - sync recorded");
    } else {
        println!("Offline - connectivity probe to {} failed", ctx.config.probe_url);
    }
    Ok(())
}

async fn watch(ctx: &AppContext) -> Result<()> {
    let subscription = ctx.monitor.add_listener(|status| {
        println!(
            "Network: {} ({}{})",
            if status.is_online { "online" } else { "offline" },
            status.connection_type.as_str(),
            if status.is_slow_connection { ", slow" } else { "" }
        );
    });
    let scheduler = PromptScheduler::spawn(
        ctx.policy.clone(),
        &ctx.monitor,
        ctx.config.prompt_recheck_interval(),
    );
    let mut decision = scheduler.subscribe();
    let mut probe_ticker = tokio::time::interval(WATCH_PROBE_INTERVAL);
    info!("Watching connectivity, Ctrl-C to stop");

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            _ = probe_ticker.tick() => {
                ctx.monitor.test_connectivity().await;
            }
            changed = decision.changed() => {
                if changed.is_err() {
                    break;
                }
                let show = *decision.borrow_and_update();
                if show {
                    println!("Your data may be stale - run `salahsync sync` to refresh");
                } else {
                    println!("Refresh prompt hidden");
                }
            }
        }
    }

    subscription.unsubscribe();
    scheduler.stop().await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Command> {
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        Command::parse(&args)
    }

    #[test]
    fn test_parse_defaults_to_status() {
        assert_eq!(parse(&[]).unwrap(), Command::Status { json: false });
        assert_eq!(parse(&["status", "--json"]).unwrap(), Command::Status { json: true });
    }

    #[test]
    fn test_parse_clear() {
        assert_eq!(parse(&["clear"]).unwrap(), Command::Clear(None));
        assert_eq!(parse(&["clear", "all"]).unwrap(), Command::Clear(None));
        assert_eq!(
            parse(&["clear", "qibla"]).unwrap(),
            Command::Clear(Some(CacheDomain::QiblaDirection))
        );
        assert!(parse(&["clear", "weather"]).is_err());
    }

    #[test]
    fn test_parse_preferences() {
        assert_eq!(
            parse(&["dismiss", "session"]).unwrap(),
            Command::Dismiss(DismissalKind::Session)
        );
        assert_eq!(parse(&["prompts", "off"]).unwrap(), Command::Prompts(false));
        assert_eq!(
            parse(&["frequency", "aggressive"]).unwrap(),
            Command::Frequency(PromptFrequency::Aggressive)
        );
        assert!(parse(&["dismiss"]).is_err());
        assert!(parse(&["prompts", "maybe"]).is_err());
    }

    #[test]
    fn test_parse_unknown() {
        assert!(parse(&["launch"]).is_err());
        assert_eq!(parse(&["--help"]).unwrap(), Command::Help);
    }
}
