// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! `realty-policy` - evaluate access requests against the realty policy table.
//!
//! Results are written to stdout as JSON; logs go to stderr.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use realty_policy::schema::validate_value;
use realty_policy::{
	check_permission, permission_tiers, policy_table, AccessRequest, Collection, Decision,
	DocumentPermission, Operation, PolicyFamily, PrincipalId, Profile, Record, SchemaKind,
};
use realty_policy_config::{load_config_with_cli, CliOverrides, LoggingConfig, ResolverBackend};

mod backend;
mod version;

/// Realty policy - authorization checks for real-estate transaction records
#[derive(Parser, Debug)]
#[command(name = "realty-policy", version, about, long_about = None)]
struct Args {
	/// Path to a configuration file (replaces /etc/realty/policy.toml)
	#[arg(short, long)]
	config: Option<PathBuf>,

	/// Log filter directive (overrides config)
	#[arg(short, long)]
	log_level: Option<String>,

	/// Output logs as JSON (overrides config)
	#[arg(long)]
	json_logs: bool,

	/// Identity resolver backend (overrides config)
	#[arg(long, value_enum)]
	backend: Option<BackendArg>,

	/// JSON profile seed for the memory backend (overrides config)
	#[arg(long)]
	profiles: Option<PathBuf>,

	/// Profile database URL for the sqlite backend (overrides config)
	#[arg(long)]
	database_url: Option<String>,

	#[command(subcommand)]
	command: Command,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum BackendArg {
	Memory,
	Sqlite,
}

impl From<BackendArg> for ResolverBackend {
	fn from(v: BackendArg) -> Self {
		match v {
			BackendArg::Memory => ResolverBackend::Memory,
			BackendArg::Sqlite => ResolverBackend::Sqlite,
		}
	}
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum SchemaArg {
	Offer,
	Negotiation,
	Document,
	Party,
}

impl From<SchemaArg> for SchemaKind {
	fn from(v: SchemaArg) -> Self {
		match v {
			SchemaArg::Offer => SchemaKind::Offer,
			SchemaArg::Negotiation => SchemaKind::Negotiation,
			SchemaArg::Document => SchemaKind::Document,
			SchemaArg::Party => SchemaKind::Party,
		}
	}
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Evaluate an access request document (`-` reads stdin)
	Evaluate {
		/// JSON request: collection, operation, resourceId, existing, proposed
		request: PathBuf,
		/// Caller id; omit to evaluate as an unauthenticated caller
		#[arg(short, long)]
		principal: Option<String>,
	},
	/// Print the advisory permission tiers
	Tiers,
	/// List governed collections and their rule families
	Collections,
	/// Check a document ACL for a principal
	CheckPermission {
		/// JSON document record (`-` reads stdin)
		document: PathBuf,
		#[arg(short, long)]
		principal: String,
		/// canView, canEdit, canShare or canDelete
		#[arg(long)]
		permission: DocumentPermission,
	},
	/// Validate proposed data against a record schema
	Validate {
		#[arg(short, long, value_enum)]
		kind: SchemaArg,
		/// JSON record (`-` reads stdin)
		record: PathBuf,
	},
	/// Manage stored profiles (sqlite backend)
	Profiles {
		#[command(subcommand)]
		command: ProfilesCommand,
	},
	/// Show version and build information
	Version,
}

#[derive(Subcommand, Debug)]
enum ProfilesCommand {
	/// Import a JSON seed of `{ "<id>": { "role": ..., "clientIds": {...} } }`
	Import { file: PathBuf },
	/// Print one profile
	Get { id: String },
	/// Print every stored profile
	List,
	/// Delete a profile
	Delete { id: String },
}

fn init_tracing(logging: &LoggingConfig) {
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

	if logging.json {
		tracing_subscriber::registry()
			.with(filter)
			.with(fmt::layer().json().with_writer(std::io::stderr))
			.init();
	} else {
		tracing_subscriber::registry()
			.with(filter)
			.with(fmt::layer().with_writer(std::io::stderr))
			.init();
	}
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
	let args = Args::parse();

	if let Command::Version = args.command {
		println!("{}", version::format_version_info());
		return Ok(ExitCode::SUCCESS);
	}

	let overrides = CliOverrides {
		log_level: args.log_level.clone(),
		json_logs: args.json_logs.then_some(true),
		backend: args.backend.map(Into::into),
		profiles_path: args.profiles.clone(),
		database_url: args.database_url.clone(),
	};
	let config = load_config_with_cli(args.config.clone(), overrides)?;
	init_tracing(&config.logging);

	match args.command {
		Command::Evaluate { request, principal } => {
			let request: AccessRequest = read_json(&request)?;
			let authorizer = backend::build_authorizer(&config).await?;
			let principal = principal.map(PrincipalId::new);
			let decision = authorizer.decide(principal.as_ref(), &request).await;
			let allowed = decision.is_allowed();
			print_json(&EvaluationOutput::new(principal, &request, decision))?;
			Ok(if allowed {
				ExitCode::SUCCESS
			} else {
				ExitCode::FAILURE
			})
		}
		Command::Tiers => {
			print_json(&permission_tiers())?;
			Ok(ExitCode::SUCCESS)
		}
		Command::Collections => {
			let rows: Vec<CollectionRow> = policy_table()
				.into_iter()
				.map(|(collection, family)| CollectionRow {
					collection,
					validates: family.schema(),
					family,
				})
				.collect();
			print_json(&rows)?;
			Ok(ExitCode::SUCCESS)
		}
		Command::CheckPermission {
			document,
			principal,
			permission,
		} => {
			let document: Record = read_json(&document)?;
			let granted = check_permission(&document, &principal, permission);
			print_json(&serde_json::json!({
				"principal": principal,
				"permission": permission,
				"granted": granted,
			}))?;
			Ok(if granted {
				ExitCode::SUCCESS
			} else {
				ExitCode::FAILURE
			})
		}
		Command::Validate { kind, record } => {
			let value: serde_json::Value = read_json(&record)?;
			let kind = SchemaKind::from(kind);
			match validate_value(kind, &value) {
				Ok(()) => {
					print_json(&serde_json::json!({ "kind": kind, "valid": true }))?;
					Ok(ExitCode::SUCCESS)
				}
				Err(error) => {
					print_json(&serde_json::json!({
						"kind": kind,
						"valid": false,
						"error": error,
						"message": error.to_string(),
					}))?;
					Ok(ExitCode::FAILURE)
				}
			}
		}
		Command::Profiles { command } => run_profiles(&config.resolver, command).await,
		Command::Version => Ok(ExitCode::SUCCESS),
	}
}

async fn run_profiles(
	config: &realty_policy_config::ResolverConfig,
	command: ProfilesCommand,
) -> Result<ExitCode> {
	let store = backend::open_store(config).await?;

	match command {
		ProfilesCommand::Import { file } => {
			let seed: HashMap<PrincipalId, Profile> = read_json(&file)?;
			let mut profiles: Vec<(PrincipalId, Profile)> = seed.into_iter().collect();
			profiles.sort_by(|a, b| a.0.cmp(&b.0));
			let imported = store.upsert_profiles(&profiles).await?;
			tracing::info!(imported, path = %file.display(), "profiles imported");
			print_json(&serde_json::json!({ "imported": imported }))?;
		}
		ProfilesCommand::Get { id } => {
			let id = PrincipalId::new(id);
			match store.get_profile(&id).await? {
				Some(profile) => print_json(&profile)?,
				None => {
					eprintln!("profile {id} not found");
					return Ok(ExitCode::FAILURE);
				}
			}
		}
		ProfilesCommand::List => {
			let profiles: Vec<ProfileRow> = store
				.list_profiles()
				.await?
				.into_iter()
				.map(|(id, profile)| ProfileRow { id, profile })
				.collect();
			print_json(&profiles)?;
		}
		ProfilesCommand::Delete { id } => {
			let id = PrincipalId::new(id);
			if !store.delete_profile(&id).await? {
				eprintln!("profile {id} not found");
				return Ok(ExitCode::FAILURE);
			}
		}
	}

	Ok(ExitCode::SUCCESS)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EvaluationOutput {
	principal_id: Option<PrincipalId>,
	collection: Collection,
	operation: Operation,
	allowed: bool,
	#[serde(flatten)]
	decision: Decision,
	/// What a caller would be shown.
	#[serde(skip_serializing_if = "Option::is_none")]
	message: Option<&'static str>,
}

impl EvaluationOutput {
	fn new(principal_id: Option<PrincipalId>, request: &AccessRequest, decision: Decision) -> Self {
		let message = decision.reason().map(|r| r.error().public_message());
		Self {
			principal_id,
			collection: request.collection,
			operation: request.operation,
			allowed: decision.is_allowed(),
			decision,
			message,
		}
	}
}

#[derive(Serialize)]
struct CollectionRow {
	collection: Collection,
	#[serde(flatten)]
	family: PolicyFamily,
	/// Schema applied to proposed data.
	#[serde(skip_serializing_if = "Option::is_none")]
	validates: Option<SchemaKind>,
}

#[derive(Serialize)]
struct ProfileRow {
	id: PrincipalId,
	#[serde(flatten)]
	profile: Profile,
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
	let content = if path == Path::new("-") {
		std::io::read_to_string(std::io::stdin()).context("failed to read stdin")?
	} else {
		std::fs::read_to_string(path)
			.with_context(|| format!("failed to read {}", path.display()))?
	};
	serde_json::from_str(&content).with_context(|| format!("invalid JSON in {}", path.display()))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
	println!("{}", serde_json::to_string_pretty(value)?);
	Ok(())
}
