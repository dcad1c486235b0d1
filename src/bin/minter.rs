//! Team-minting CLI.
//!
//! Drives the full pipeline from an operator's shell: load and compress
//! an image, push it through the pin relay, resolve the recipient, then
//! dispatch the privileged mint and wait for inclusion.

use std::collections::VecDeque;
use std::path::Path;
use std::sync::Arc;

use alloy::primitives::utils::format_ether;
use chrono::{DateTime, NaiveDateTime, Utc};

use snapmint::domain::ImageAsset;
use snapmint::infra::RelayClient;
use snapmint::media::{compress, CompressorConfig};
use snapmint::mint::{EvmMintGateway, MintConfig, MintGateway, MintSubmitter};
use snapmint::resolve::{AddressResolver, EnsResolver, ResolverConfig, ResolverSession};
use snapmint::session::MintSession;

const DEFAULT_RELAY_URL: &str = "http://localhost:3001";

fn print_help() {
    eprintln!(
        "\
snapmint

USAGE:
  snapmint <command> [options]

COMMANDS:
  mint             Mint a soulbound token to a recipient
  check-minter     Check the team-minter capability of an address
  price            Print the public mint price
  resolve          Resolve a recipient name to an address
  relay-health     Probe the pin relay

mint OPTIONS:
  --recipient <addr|name>   (required) 0x address or ENS-style name
  --image <path>            (optional) photo to compress and pin;
                            omitted means the contract's default image
  --text <s>                (optional) personal message
  --event-name <s>          (optional) event name
  --event-date <ts>         (optional) RFC 3339 or YYYY-MM-DDTHH:MM
  --relay <url>             (default: http://localhost:3001)

check-minter OPTIONS:
  --address <addr>          (defaults to the configured signing key)

resolve OPTIONS:
  --name <s>                (required)

ENV:
  MINT_RPC_URL, MINT_CONTRACT_ADDRESS, TEAM_MINTER_PRIVATE_KEY,
  MINT_CHAIN_ID (default 137), RESOLVER_RPC_URL, ENS_REGISTRY_ADDRESS
"
    );
}

fn require_mint_config() -> anyhow::Result<MintConfig> {
    MintConfig::from_env().ok_or_else(|| {
        anyhow::anyhow!(
            "MINT_RPC_URL, MINT_CONTRACT_ADDRESS and TEAM_MINTER_PRIVATE_KEY are required"
        )
    })
}

fn take_option(args: &mut VecDeque<String>, flag: &str) -> anyhow::Result<String> {
    args.pop_front()
        .ok_or_else(|| anyhow::anyhow!("{flag} requires a value"))
}

fn parse_event_date(value: &str) -> anyhow::Result<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Utc));
    }
    let naive = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M")
        .map_err(|e| anyhow::anyhow!("unparseable event date {value:?}: {e}"))?;
    Ok(naive.and_utc())
}

fn mime_for_path(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "image/jpeg",
    }
}

#[derive(Default)]
struct MintArgs {
    recipient: Option<String>,
    image: Option<String>,
    text: Option<String>,
    event_name: Option<String>,
    event_date: Option<String>,
    relay: Option<String>,
}

async fn cmd_mint(mut args: VecDeque<String>) -> anyhow::Result<()> {
    let mut opts = MintArgs::default();
    while let Some(arg) = args.pop_front() {
        match arg.as_str() {
            "--recipient" => opts.recipient = Some(take_option(&mut args, "--recipient")?),
            "--image" => opts.image = Some(take_option(&mut args, "--image")?),
            "--text" => opts.text = Some(take_option(&mut args, "--text")?),
            "--event-name" => opts.event_name = Some(take_option(&mut args, "--event-name")?),
            "--event-date" => opts.event_date = Some(take_option(&mut args, "--event-date")?),
            "--relay" => opts.relay = Some(take_option(&mut args, "--relay")?),
            other => anyhow::bail!("unknown option: {other}"),
        }
    }
    let recipient = opts
        .recipient
        .ok_or_else(|| anyhow::anyhow!("--recipient is required"))?;

    let gateway = Arc::new(EvmMintGateway::new(require_mint_config()?));
    let caller = gateway.caller()?;

    let mut session = MintSession::default();
    if let Some(text) = opts.text {
        session.custom_text = text;
    }
    if let Some(event_name) = opts.event_name {
        session.event_name = event_name;
    }
    if let Some(event_date) = opts.event_date {
        session.event_date = parse_event_date(&event_date)?;
    }

    // Upload strictly precedes dispatch when a custom image is chosen.
    if let Some(image_path) = opts.image {
        let path = Path::new(&image_path);
        let bytes = std::fs::read(path)
            .map_err(|e| anyhow::anyhow!("could not read {image_path:?}: {e}"))?;
        let asset = ImageAsset::from_encoded(bytes, mime_for_path(path))?;
        println!(
            "Loaded {image_path} ({}x{}, {} KB)",
            asset.width,
            asset.height,
            asset.len() / 1024
        );

        let generation = session.begin_generation();
        let compressed = compress(&asset, &CompressorConfig::default())?;
        println!(
            "Compressed to {} KB at quality {} in {} attempt(s)",
            compressed.size() / 1024,
            compressed.quality,
            compressed.attempts
        );

        let upload_bytes = compressed.bytes.clone();
        let mime_type = compressed.mime_type;
        session.attach_photo(generation, compressed);

        let relay = RelayClient::new(opts.relay.as_deref().unwrap_or(DEFAULT_RELAY_URL));
        let record = relay.upload(upload_bytes, "photo.jpg", mime_type).await?;
        println!("Pinned: {}", record.ipfs_url);
        println!("Gateway: {}", record.gateway_url);
        session.record_upload(generation, record);
    }

    let resolver = Arc::new(EnsResolver::new(ResolverConfig::from_env()));
    let resolution = ResolverSession::new(resolver);
    if let Some(handle) = resolution.edit(&recipient) {
        handle.await?;
    }
    let snapshot = resolution.snapshot();
    if let Some(address) = snapshot.resolved {
        println!("Recipient: {address}");
    }
    session.set_resolution(snapshot);

    let submitter = MintSubmitter::new(gateway);
    let receipt = submitter.submit(&mut session, caller).await?;

    println!("Minted in tx {}", receipt.tx_hash);
    if let Some(block) = receipt.block_number {
        println!("Included in block {block}");
    }
    Ok(())
}

async fn cmd_check_minter(mut args: VecDeque<String>) -> anyhow::Result<()> {
    let mut address = None;
    while let Some(arg) = args.pop_front() {
        match arg.as_str() {
            "--address" => address = Some(take_option(&mut args, "--address")?),
            other => anyhow::bail!("unknown option: {other}"),
        }
    }

    let gateway = EvmMintGateway::new(require_mint_config()?);
    let address = match address {
        Some(s) => s.parse()?,
        None => gateway.caller()?,
    };

    let authorized = gateway.is_team_minter(address).await?;
    if authorized {
        println!("{address} is an authorized team minter");
    } else {
        println!("{address} is NOT an authorized team minter");
    }
    Ok(())
}

async fn cmd_price() -> anyhow::Result<()> {
    let gateway = EvmMintGateway::new(require_mint_config()?);
    let price = gateway.mint_price().await?;
    println!("Public mint price: {}", format_ether(price));
    Ok(())
}

async fn cmd_resolve(mut args: VecDeque<String>) -> anyhow::Result<()> {
    let mut name = None;
    while let Some(arg) = args.pop_front() {
        match arg.as_str() {
            "--name" => name = Some(take_option(&mut args, "--name")?),
            other => anyhow::bail!("unknown option: {other}"),
        }
    }
    let name = name.ok_or_else(|| anyhow::anyhow!("--name is required"))?;

    let resolver = EnsResolver::new(ResolverConfig::from_env());
    match resolver.resolve_name(&name).await? {
        Some(address) => println!("{name} -> {address}"),
        None => println!("{name} has no registered address"),
    }
    Ok(())
}

async fn cmd_relay_health(mut args: VecDeque<String>) -> anyhow::Result<()> {
    let mut relay_url = None;
    while let Some(arg) = args.pop_front() {
        match arg.as_str() {
            "--relay" => relay_url = Some(take_option(&mut args, "--relay")?),
            other => anyhow::bail!("unknown option: {other}"),
        }
    }

    let relay = RelayClient::new(relay_url.as_deref().unwrap_or(DEFAULT_RELAY_URL));
    let health = relay.health().await?;
    println!("{}: {}", health.status, health.message);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut args: VecDeque<String> = std::env::args().skip(1).collect();

    let Some(command) = args.pop_front() else {
        print_help();
        std::process::exit(2);
    };

    match command.as_str() {
        "mint" => cmd_mint(args).await,
        "check-minter" => cmd_check_minter(args).await,
        "price" => cmd_price().await,
        "resolve" => cmd_resolve(args).await,
        "relay-health" => cmd_relay_health(args).await,
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        other => {
            eprintln!("unknown command: {other}\n");
            print_help();
            std::process::exit(2);
        }
    }
}
