//! PayNow Demo CLI
//!
//! Command-line host for the PayNow payload generator: builds a request
//! from arguments, prints the raw payload or a base64 PNG data URI, and can
//! draw the QR code in the terminal.

use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use clap::Parser;
use paynow_lib::{Paynow, PaynowConfig, QrRequest};
use std::path::PathBuf;

mod ui;

#[derive(Parser)]
#[command(name = "paynow-demo")]
#[command(about = "Generate PayNow QR payment payloads", long_about = None)]
#[command(version)]
struct Cli {
    /// Transaction amount in SGD
    #[arg(short, long)]
    amount: f64,

    /// Merchant company name
    #[arg(short, long)]
    company: String,

    /// Company UEN to pay (mandatory unless --mobile is given)
    #[arg(long)]
    uen: Option<String>,

    /// Mobile number to pay (mandatory unless --uen is given)
    #[arg(long)]
    mobile: Option<String>,

    /// Unique order reference (bill number)
    #[arg(short, long, default_value = "")]
    reference: String,

    /// ISO 3166-1 alpha-2 country code of the merchant
    #[arg(long, default_value = "SG")]
    country: String,

    /// City of the merchant
    #[arg(long, default_value = "Singapore")]
    city: String,

    /// Hours until the code expires
    #[arg(long, default_value_t = 24)]
    expires_in: i64,

    /// Allow the payer to edit the amount
    #[arg(long)]
    editable: bool,

    /// Print a base64 PNG data URI instead of the raw payload
    #[arg(long)]
    image: bool,

    /// PNG logo to embed when rendering an image
    #[arg(long)]
    logo: Option<PathBuf>,

    /// Pixel size of the rendered image
    #[arg(long, default_value_t = 512)]
    size: u32,

    /// Also draw the QR code in the terminal
    #[arg(long)]
    qr: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let mut request = QrRequest::new(
        cli.amount,
        Utc::now() + Duration::hours(cli.expires_in),
        &cli.company,
    )
    .with_reference(&cli.reference)
    .with_location(&cli.country, &cli.city)
    .editable(cli.editable);
    if let Some(uen) = &cli.uen {
        request = request.with_uen(uen);
    }
    if let Some(mobile) = &cli.mobile {
        request = request.with_mobile(mobile);
    }

    let paynow = Paynow::with_config(PaynowConfig {
        logo_path: cli.logo,
        pixel_size: cli.size,
    });

    ui::header("PayNow QR Code");
    let payload = paynow
        .generate(&request)
        .context("payload generation failed")?;
    ui::key_value("Payload", &payload);

    if cli.image {
        let uri = paynow
            .generate(&request.clone().as_image())
            .context("image rendering failed")?;
        ui::key_value("Data URI", &uri);
    }

    if cli.qr {
        ui::qr_code(&payload)?;
    }

    ui::success("Done");
    Ok(())
}
