//! Subcommand implementations.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use tracing::{info, warn};

use directory_ingest::{RefreshOutcome, source_for_location};
use directory_model::{DEFAULT_EXPORT_FILENAME, FilterField, RecordId, ViewMode};
use directory_persistence::FileStore;
use directory_query::DirectoryEngine;

use crate::cli::{Cli, ExportArgs, FacetsArgs, FavoriteCommand, ListArgs, QueryArgs, ThemeAction};
use directory_cli::render::{
    facet_list, page_nav, page_summary, records_cards, records_table, stats_table,
};
use directory_cli::settings::{Settings, load_settings};

pub type Engine = DirectoryEngine<FileStore>;

/// Resolved settings plus an engine opened over file storage.
pub struct Session {
    pub settings: Settings,
    pub engine: Engine,
}

impl Session {
    pub fn open(cli: &Cli) -> Self {
        let mut settings = load_settings(cli.config.as_deref());
        if let Some(source) = &cli.source {
            settings.source.clone_from(source);
        }
        let engine = DirectoryEngine::open(settings.file_store(), settings.engine_config());
        Self { settings, engine }
    }

    /// Fetch fresh records unless `offline`. Fails only when there is
    /// nothing to show.
    pub fn load_records(&mut self, offline: bool) -> Result<()> {
        if offline {
            if self.engine.records().is_empty() {
                bail!("no cached companies available; run once without --offline");
            }
            return Ok(());
        }
        let source = source_for_location(&self.settings.source, self.settings.http_timeout())
            .with_context(|| format!("invalid source {}", self.settings.source))?;
        match self.engine.refresh(&source) {
            RefreshOutcome::Failed(error) => {
                bail!("{} ({error})", error.user_message());
            }
            RefreshOutcome::ServedStale(error) => {
                warn!(%error, "showing cached companies");
                eprintln!("warning: {} Showing cached companies.", error.user_message());
            }
            RefreshOutcome::Replaced { record_count, .. } => {
                info!(record_count, source = %self.settings.source, "companies loaded");
            }
            RefreshOutcome::Unchanged => {}
        }
        Ok(())
    }

    fn apply_query(&mut self, query: &QueryArgs) {
        let sort = query.sort.unwrap_or_else(|| self.settings.default_sort());
        let engine = &mut self.engine;
        engine.set_search_term(query.search.clone().unwrap_or_default());
        engine.set_location(query.location.clone());
        engine.set_industry(query.industry.clone());
        engine.set_sort_key(sort);
        engine.set_favorites_only(query.favorites_only);
    }
}

pub fn run_list(session: &mut Session, args: &ListArgs) -> Result<()> {
    session.apply_query(&args.query);
    let engine = &mut session.engine;
    if let Some(page) = args.page {
        engine.go_to_page(page);
    }

    let page = engine.page();
    match args.view.unwrap_or(engine.view_mode()) {
        ViewMode::Table => println!("{}", records_table(&page, engine.favorites())),
        ViewMode::Card => print!("{}", records_cards(&page, engine.favorites())),
    }
    let info = engine.page_info();
    println!(
        "{}",
        page_summary(&info, engine.query().has_active_filters())
    );
    if info.page_count > 1 {
        println!("{}", page_nav(&engine.page_numbers(), info.current_page));
    }
    Ok(())
}

pub fn run_facets(session: &Session, args: &FacetsArgs) -> Result<()> {
    let fields: &[FilterField] = match &args.field {
        Some(field) => std::slice::from_ref(field),
        None => FilterField::all(),
    };
    let facets = session.engine.facets();
    for (position, field) in fields.iter().enumerate() {
        if args.field.is_none() {
            if position > 0 {
                println!();
            }
            println!("{}:", heading(*field));
        }
        print!("{}", facet_list(facets.get(*field)));
    }
    Ok(())
}

fn heading(field: FilterField) -> &'static str {
    match field {
        FilterField::Location => "Locations",
        FilterField::Industry => "Industries",
    }
}

pub fn run_stats(session: &mut Session, query: &QueryArgs) -> Result<()> {
    session.apply_query(query);
    println!("{}", stats_table(&session.engine.stats()));
    Ok(())
}

pub fn run_favorite(session: &mut Session, command: &FavoriteCommand) -> Result<()> {
    let engine = &mut session.engine;
    match command {
        FavoriteCommand::Toggle { id } => {
            let id = RecordId::new(id.as_str())?;
            let Some(name) = engine.find(&id).map(|record| record.name.clone()) else {
                bail!("no company with id {id}");
            };
            if engine.toggle_favorite(&id) {
                println!("Added {name} to favorites.");
            } else {
                println!("Removed {name} from favorites.");
            }
        }
        FavoriteCommand::List => {
            let favorites = engine.favorite_records();
            if favorites.is_empty() {
                println!("No favorites yet.");
            } else {
                println!("{}", records_table(&favorites, engine.favorites()));
            }
        }
    }
    Ok(())
}

pub fn run_view(session: &mut Session, mode: Option<ViewMode>) -> Result<()> {
    if let Some(mode) = mode {
        session.engine.set_view_mode(mode);
    }
    println!("{}", session.engine.view_mode());
    Ok(())
}

pub fn run_theme(session: &mut Session, action: Option<ThemeAction>) -> Result<()> {
    if let Some(action) = action {
        let theme = action.apply(session.engine.theme());
        session.engine.set_theme(theme);
    }
    println!("{}", session.engine.theme());
    Ok(())
}

pub fn run_export(session: &mut Session, args: &ExportArgs) -> Result<()> {
    session.apply_query(&args.query);
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_EXPORT_FILENAME));
    if output.as_os_str() == "-" {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        session.engine.export_csv(&mut handle)?;
        handle.flush().context("failed to flush stdout")?;
        return Ok(());
    }
    let rows = session
        .engine
        .export_to_path(&output)
        .with_context(|| format!("failed to export to {}", output.display()))?;
    println!("Exported {rows} companies to {}", output.display());
    Ok(())
}
