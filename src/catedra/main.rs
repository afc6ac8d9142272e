use catedra::api::{build_payload, CatedraApi, ConfigAction};
use catedra::config::CatedraConfig;
use catedra::error::{CatedraError, Result};
use catedra::store::fs_backend::FsBackend;
use catedra::store::LoadOutcome;
use clap::Parser;
use colored::Colorize;
use directories::ProjectDirs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod args;
mod cli;

use args::{Cli, Commands};
use cli::print::{
    print_config, print_json, print_messages, print_record, print_records, print_stats, print_user,
};

const HOME_ENV: &str = "CATEDRA_HOME";
const LOG_ENV: &str = "CATEDRA_LOG";

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(if cli.verbose { "debug" } else { "warn" });

    let mut api = init_api()?;

    match cli.command {
        Commands::List {
            entity,
            order,
            limit,
            json,
        } => handle_list(&api, &entity, order, limit, json),
        Commands::Filter {
            entity,
            criteria,
            order,
            limit,
            json,
        } => handle_filter(&api, &entity, &criteria, order, limit, json),
        Commands::Get { entity, id } => handle_get(&api, &entity, &id),
        Commands::Create {
            entity,
            fields,
            data,
        } => handle_create(&mut api, &entity, &fields, data),
        Commands::Update {
            entity,
            id,
            fields,
            data,
        } => handle_update(&mut api, &entity, &id, &fields, data),
        Commands::Delete { entity, id } => handle_delete(&mut api, &entity, &id),
        Commands::Kinds => handle_kinds(&api),
        Commands::Whoami => handle_whoami(&api),
        Commands::Logout => handle_logout(&api),
        Commands::Config { key, value } => handle_config(&api, key, value),
        Commands::Reset { yes } => handle_reset(&mut api, yes),
    }
}

fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn data_dir() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os(HOME_ENV) {
        return Ok(PathBuf::from(home));
    }
    let proj_dirs = ProjectDirs::from("org", "catedra", "catedra").ok_or_else(|| {
        CatedraError::Store(format!(
            "Could not determine a data directory, set {}",
            HOME_ENV
        ))
    })?;
    Ok(proj_dirs.data_dir().to_path_buf())
}

fn init_api() -> Result<CatedraApi<FsBackend>> {
    let dir = data_dir()?;
    let config = CatedraConfig::load(&dir)?;
    let backend = FsBackend::new(dir.clone());
    let api = CatedraApi::open(backend, config, dir)?;

    if let LoadOutcome::Recovered { reason } = api.load_outcome() {
        eprintln!(
            "{}",
            format!(
                "Warning: stored content was unreadable ({}), using defaults",
                reason
            )
            .yellow()
        );
    }
    Ok(api)
}

fn handle_list(
    api: &CatedraApi<FsBackend>,
    entity: &str,
    order: Option<String>,
    limit: Option<usize>,
    json: bool,
) -> Result<()> {
    let result = api.list(entity, order.as_deref(), limit)?;
    if json {
        print_json(&result.records)?;
    } else {
        print_records(&result.records);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_filter(
    api: &CatedraApi<FsBackend>,
    entity: &str,
    criteria: &[String],
    order: Option<String>,
    limit: Option<usize>,
    json: bool,
) -> Result<()> {
    let result = api.filter(entity, criteria, order.as_deref(), limit)?;
    if json {
        print_json(&result.records)?;
    } else {
        print_records(&result.records);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_get(api: &CatedraApi<FsBackend>, entity: &str, id: &str) -> Result<()> {
    let result = api.get(entity, id)?;
    for record in &result.records {
        print_record(record)?;
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_create(
    api: &mut CatedraApi<FsBackend>,
    entity: &str,
    fields: &[String],
    data: Option<String>,
) -> Result<()> {
    let payload = build_payload(data.as_deref(), fields)?;
    let result = api.create(entity, payload)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_update(
    api: &mut CatedraApi<FsBackend>,
    entity: &str,
    id: &str,
    fields: &[String],
    data: Option<String>,
) -> Result<()> {
    let patch = build_payload(data.as_deref(), fields)?;
    if patch.is_empty() {
        return Err(CatedraError::InvalidInput(
            "Nothing to update: pass field=value terms or --data".into(),
        ));
    }
    let result = api.update(entity, id, patch)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete(api: &mut CatedraApi<FsBackend>, entity: &str, id: &str) -> Result<()> {
    let result = api.delete(entity, id)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_kinds(api: &CatedraApi<FsBackend>) -> Result<()> {
    let result = api.stats()?;
    print_stats(&result.stats);
    Ok(())
}

fn handle_whoami(api: &CatedraApi<FsBackend>) -> Result<()> {
    let result = api.whoami()?;
    if let Some(user) = &result.user {
        print_user(user);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_logout(api: &CatedraApi<FsBackend>) -> Result<()> {
    let result = api.logout()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(
    api: &CatedraApi<FsBackend>,
    key: Option<String>,
    value: Option<String>,
) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };
    let show_all = matches!(action, ConfigAction::ShowAll);

    let result = api.config(action)?;
    if show_all {
        if let Some(config) = &result.config {
            print_config(config);
        }
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_reset(api: &mut CatedraApi<FsBackend>, yes: bool) -> Result<()> {
    if !yes {
        println!(
            "{}",
            "This discards all stored content. Re-run with --yes to confirm.".yellow()
        );
        return Ok(());
    }
    let result = api.reset()?;
    print_messages(&result.messages);
    Ok(())
}
