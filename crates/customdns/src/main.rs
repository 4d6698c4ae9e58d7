// # customdns - Pi-hole custom DNS entry
//
// This binary is a THIN integration layer over customdns-core:
// 1. Reading configuration from environment variables
// 2. Validating the desired entry
// 3. Running one reconciliation
// 4. Printing a JSON result and exiting with a matching code
//
// ## Configuration
//
// ### Connection
// - `PIHOLE_URL`: Base URL of the Pi-hole server (required)
// - `PIHOLE_API_KEY`: API key (required)
// - `PIHOLE_API_PATH`: API path below the URL (default: /admin/api)
// - `PIHOLE_TIMEOUT_SECS`: HTTP timeout in seconds (default: 30)
//
// ### Entry
// - `PIHOLE_DOMAIN`: Domain to manage (required)
// - `PIHOLE_IP`: IP the domain maps to (required)
// - `PIHOLE_STATE`: present or absent (default: present)
// - `PIHOLE_RELOAD`: Reload DNS after a change (default: true)
//
// ### Mode
// - `PIHOLE_MODE`: set to `check` or `dry-run` to report without changing
// - `PIHOLE_LOG_LEVEL`: trace, debug, info, warn, error (default: info)
//
// ## Example
//
// ```bash
// export PIHOLE_URL=http://pi.hole
// export PIHOLE_API_KEY=your_key
// export PIHOLE_DOMAIN=nas.home.lan
// export PIHOLE_IP=192.168.1.10
//
// customdns
// {"action":"add","api_url":"http://pi.hole/admin/api","changed":true,"dry_run":false}
// ```

use anyhow::{Context, Result};
use customdns_core::{
    ConnectionConfig, CustomDnsConfig, EntryConfig, Presence, ReconcileOutcome, Reconciler,
};
use customdns_pihole::PiholeTransport;
use std::env;
use std::net::IpAddr;
use std::process::ExitCode;
use tracing::{Level, error, info, warn};
use tracing_subscriber::FmtSubscriber;

/// Exit codes for different termination scenarios
///
/// - 0: Reconciled (changed or not)
/// - 1: Configuration error
/// - 2: Reconciliation failed
#[derive(Debug, Clone, Copy)]
enum CustomDnsExitCode {
    Success = 0,
    ConfigError = 1,
    ReconcileError = 2,
}

impl From<CustomDnsExitCode> for ExitCode {
    fn from(code: CustomDnsExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Parse a boolean the way operators tend to write it
fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("{} must be a boolean. Got: '{}'", name, other),
    }
}

fn required(name: &str) -> Result<String> {
    env::var(name).with_context(|| format!("{} is required. Set it via: export {}=...", name, name))
}

/// Load configuration from environment variables
fn config_from_env() -> Result<CustomDnsConfig> {
    let mut connection = ConnectionConfig::new(required("PIHOLE_URL")?, required("PIHOLE_API_KEY")?);
    if let Ok(api_path) = env::var("PIHOLE_API_PATH") {
        connection = connection.with_api_path(api_path);
    }
    if let Ok(timeout) = env::var("PIHOLE_TIMEOUT_SECS") {
        let timeout = timeout
            .trim()
            .parse()
            .with_context(|| format!("PIHOLE_TIMEOUT_SECS must be a number. Got: '{}'", timeout))?;
        connection = connection.with_timeout_secs(timeout);
    }

    let mut entry = EntryConfig::new(required("PIHOLE_DOMAIN")?, required("PIHOLE_IP")?);
    if let Ok(state) = env::var("PIHOLE_STATE") {
        entry = entry.with_state(state.parse::<Presence>()?);
    }
    if let Ok(reload) = env::var("PIHOLE_RELOAD") {
        entry = entry.with_reload(parse_bool("PIHOLE_RELOAD", &reload)?);
    }

    let dry_run = matches!(
        env::var("PIHOLE_MODE")
            .unwrap_or_default()
            .to_lowercase()
            .as_str(),
        "check" | "dry-run"
    );

    Ok(CustomDnsConfig {
        connection,
        entry,
        dry_run,
    })
}

/// Validate the configuration beyond what the core checks
fn validate(config: &CustomDnsConfig) -> Result<()> {
    config.validate()?;
    validate_domain_name(&config.entry.domain)?;

    config
        .entry
        .ip
        .parse::<IpAddr>()
        .with_context(|| format!("PIHOLE_IP is not a valid IP address: '{}'", config.entry.ip))?;

    Ok(())
}

/// Validate that a string is a valid domain name
///
/// Basic RFC 1035 checks: total length, label length, characters, hyphens.
fn validate_domain_name(domain: &str) -> Result<()> {
    if domain.is_empty() {
        anyhow::bail!("Domain name cannot be empty");
    }

    if domain.len() > 253 {
        anyhow::bail!(
            "Domain name too long: {} chars (max 253). Got: {}",
            domain.len(),
            domain
        );
    }

    for label in domain.split('.') {
        if label.is_empty() {
            anyhow::bail!("Domain name has empty label: '{}'", domain);
        }

        if label.len() > 63 {
            anyhow::bail!(
                "Domain label too long: {} chars (max 63). Label: '{}'",
                label.len(),
                label
            );
        }

        if !label.chars().all(|c| c.is_alphanumeric() || c == '-') {
            anyhow::bail!(
                "Domain label contains invalid characters. Label: '{}'. \
                Valid: alphanumeric and hyphen only.",
                label
            );
        }

        if label.starts_with('-') || label.ends_with('-') {
            anyhow::bail!(
                "Domain label cannot start or end with hyphen. Label: '{}'",
                label
            );
        }
    }

    Ok(())
}

fn log_level_from_env() -> Level {
    match env::var("PIHOLE_LOG_LEVEL")
        .unwrap_or_else(|_| "info".to_string())
        .to_lowercase()
        .as_str()
    {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

fn success_json(outcome: &ReconcileOutcome, api_url: &str, dry_run: bool) -> serde_json::Value {
    serde_json::json!({
        "changed": outcome.changed(),
        "api_url": api_url,
        "action": outcome.action().map(|a| a.as_str()),
        "dry_run": dry_run,
    })
}

fn failure_json(msg: &str) -> serde_json::Value {
    serde_json::json!({
        "failed": true,
        "changed": false,
        "msg": msg,
    })
}

fn main() -> ExitCode {
    // Logs go to stderr; stdout carries only the JSON result
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level_from_env())
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return CustomDnsExitCode::ConfigError.into();
    }

    let config = match config_from_env().and_then(|config| {
        validate(&config)?;
        Ok(config)
    }) {
        Ok(config) => config,
        Err(e) => {
            error!("Configuration error: {:#}", e);
            println!("{}", failure_json(&format!("{:#}", e)));
            return CustomDnsExitCode::ConfigError.into();
        }
    };

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            println!("{}", failure_json(&e.to_string()));
            return CustomDnsExitCode::ReconcileError.into();
        }
    };

    let api_url = config.connection.endpoint();

    match rt.block_on(run(&config)) {
        Ok(outcome) => {
            println!("{}", success_json(&outcome, &api_url, config.dry_run));
            CustomDnsExitCode::Success.into()
        }
        Err(e) => {
            error!("Reconciliation failed: {:#}", e);
            println!("{}", failure_json(&format!("{:#}", e)));
            CustomDnsExitCode::ReconcileError.into()
        }
    }
}

/// Run one reconciliation
async fn run(config: &CustomDnsConfig) -> Result<ReconcileOutcome> {
    if config.dry_run {
        warn!("Running in check mode - no changes will be made");
    }

    let transport = PiholeTransport::from_config(&config.connection)?;
    info!("Using Pi-hole API at {}", transport.endpoint());

    let reconciler = Reconciler::new(Box::new(transport), config.connection.api_key.as_str());
    let desired = config.entry.desired_state();

    let outcome = reconciler.reconcile(&desired, config.dry_run).await?;
    Ok(outcome)
}
