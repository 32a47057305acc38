//! `scrip` — command-line client for the Scrip prescription-form service.
//!
//! # Usage
//!
//! ```text
//! scrip list
//! scrip submit --first-name Ann --last-name Lee --contact-number 555-1234 \
//!   --date 2024-01-10 --physician-signature "Dr. Roe"
//! scrip update 3 --merge --contact-number 555-9999
//! scrip --url http://clinic:3000 delete 3
//! ```

mod client;
mod output;

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use client::{ApiClient, ApiConfig};
use scrip_core::{form::RecordForm, record::RecordId};
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "scrip", about = "Manage prescription-form records")]
struct Cli {
  /// Path to a TOML config file (url).
  #[arg(short, long, value_name = "FILE")]
  config: Option<std::path::PathBuf>,

  /// Base URL of the scrip server (default: http://localhost:3000).
  #[arg(long, env = "SCRIP_URL")]
  url: Option<String>,

  /// Print records as JSON instead of a table.
  #[arg(long, global = true)]
  json: bool,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// List every record.
  List,
  /// Show a single record.
  Show { id: i64 },
  /// Submit a new record.
  Submit(FormArgs),
  /// Replace a record; with `--merge`, change only the given fields.
  Update {
    id:    i64,
    #[arg(long)]
    merge: bool,
    #[command(flatten)]
    form:  FormArgs,
  },
  /// Delete a record.
  Delete { id: i64 },
}

/// Record fields; the server decides which are required.
#[derive(Args, Debug, Default)]
struct FormArgs {
  #[arg(long)]
  first_name:          Option<String>,
  #[arg(long)]
  last_name:           Option<String>,
  #[arg(long)]
  contact_number:      Option<String>,
  #[arg(long)]
  issue1:              Option<String>,
  #[arg(long)]
  issue2:              Option<String>,
  /// How the medication is to be taken.
  #[arg(long)]
  medication_process:  Option<String>,
  /// `YYYY-MM-DD`.
  #[arg(long)]
  date:                Option<String>,
  #[arg(long)]
  physician_signature: Option<String>,
}

impl From<FormArgs> for RecordForm {
  fn from(a: FormArgs) -> Self {
    RecordForm {
      first_name:          a.first_name,
      last_name:           a.last_name,
      contact_number:      a.contact_number,
      issue1:              a.issue1,
      issue2:              a.issue2,
      medication_process:  a.medication_process,
      date:                a.date,
      physician_signature: a.physician_signature,
    }
  }
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  url: String,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_writer(io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let file_cfg: ConfigFile = if let Some(path) = &cli.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flags override config file, which overrides defaults.
  let api_config = ApiConfig {
    base_url: cli
      .url
      .or_else(|| (!file_cfg.url.is_empty()).then(|| file_cfg.url.clone()))
      .unwrap_or_else(|| "http://localhost:3000".to_string()),
  };
  tracing::debug!(base_url = %api_config.base_url, "using scrip server");

  let client = ApiClient::new(api_config)?;
  let mut stdout = io::stdout().lock();
  run(&client, cli.command, cli.json, &mut stdout).await
}

async fn run(
  client: &ApiClient,
  command: Command,
  json: bool,
  out: &mut impl Write,
) -> Result<()> {
  match command {
    Command::List => {
      let records = client.list_records().await?;
      if json {
        serde_json::to_writer_pretty(&mut *out, &records)?;
        writeln!(out)?;
      } else {
        output::write_table(out, &records)?;
      }
    }
    Command::Show { id } => {
      let record = client.get_record(RecordId(id)).await?;
      if json {
        serde_json::to_writer_pretty(&mut *out, &record)?;
        writeln!(out)?;
      } else {
        output::write_table(out, std::slice::from_ref(&record))?;
      }
    }
    Command::Submit(form) => {
      let record = client.submit(&form.into()).await?;
      if json {
        serde_json::to_writer_pretty(&mut *out, &record)?;
        writeln!(out)?;
      } else {
        writeln!(out, "Submitted record {}", record.id)?;
      }
    }
    Command::Update { id, merge, form } => {
      let form = RecordForm::from(form);
      let ack = if merge {
        client.patch(RecordId(id), &form).await?
      } else {
        client.update(RecordId(id), &form).await?
      };
      writeln!(out, "{ack}")?;
    }
    Command::Delete { id } => {
      let ack = client.delete(RecordId(id)).await?;
      writeln!(out, "{ack}")?;
    }
  }
  Ok(())
}
