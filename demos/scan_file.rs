//! Scan a local file, or a URL, against the Arachnid Shield API.
//!
//! Credentials come from `ARACHNID_SHIELD_USERNAME` and
//! `ARACHNID_SHIELD_PASSWORD`; `ARACHNID_SHIELD_URL` overrides the API address.
//!
//! Run with: cargo run --example scan_file -- <path-or-url>

use arachnid_shield::prelude::*;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("arachnid_shield=debug")),
        )
        .init();

    let target = std::env::args()
        .nth(1)
        .ok_or("usage: scan_file <path-or-url>")?;

    let client = ArachnidShield::new(ShieldConfig::from_env()?)?;

    let scanned = if target.starts_with("http://") || target.starts_with("https://") {
        client.scan_media_from_url(&target).await
    } else {
        client.scan_media_from_file(&target).await
    };

    let scanned = scanned.map_err(|e| -> Box<dyn std::error::Error> {
        match e {
            ShieldError::Api { status, detail } => {
                format!("API rejected the request ({status}): {detail}").into()
            }
            other => other.into(),
        }
    })?;

    println!("=== Scan Result ===");
    println!("Size: {} bytes", scanned.size_bytes());
    println!("SHA1 (base32): {}", scanned.sha1_base32());
    println!("SHA256: {}", scanned.sha256_hex());
    println!("Classification: {}", scanned.classification());

    match scanned.match_type() {
        Some(match_type) => println!("Match type: {match_type}"),
        None => println!("Match type: none"),
    }

    if scanned.matches_known_media() {
        println!("\nMatched known media; {} near match(es)", scanned.near_match_details().len());
    } else {
        println!("\nNo known match");
    }

    Ok(())
}
