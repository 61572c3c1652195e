//! The directory engine: record store, query state, favorites, and
//! pagination wired together over one storage backend.
//!
//! Derived state is recomputed lazily. Facets are cached against the record
//! version; the result set is cached against the record version, the
//! effective query, and (only while favorites-only is on) the favorites
//! revision. Stats count matches before the favorites restriction. Any change to a filtering dimension sends the view back to the
//! first page.

use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use directory_ingest::{FetchError, LoadStatus, RecordSource, RecordStore, RefreshOutcome};
use directory_model::{
    CURRENT_PAGE_KEY, DEFAULT_PAGE_SIZE, FilterField, QueryState, Record, RecordId, SortKey,
    THEME_KEY, Theme, VIEW_MODE_KEY, ViewMode,
};
use directory_persistence::{FallbackStore, Persistence, Scope, load_json, save_json};

use crate::debounce::{DEFAULT_DEBOUNCE, DebouncedInput};
use crate::error::ExportError;
use crate::export;
use crate::facets::FacetSet;
use crate::favorites::Favorites;
use crate::memo::Memo;
use crate::paginator::{PageItem, Paginator};
use crate::pipeline;
use crate::stats::{DirectoryStats, ResultScope};

/// Engine tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub page_size: usize,
    pub search_debounce: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            search_debounce: DEFAULT_DEBOUNCE,
        }
    }
}

/// Position of the current page within the results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    pub current_page: usize,
    pub page_count: usize,
    /// 1-based index of the first record shown; `0` when there are none.
    pub first_item: usize,
    /// 1-based index of the last record shown; `0` when there are none.
    pub last_item: usize,
    pub total_items: usize,
    pub has_prev: bool,
    pub has_next: bool,
}

#[derive(Debug, Clone, PartialEq)]
struct ResultKey {
    version: u64,
    query: QueryState,
    favorites_revision: Option<u64>,
}

/// Query engine over a company directory.
#[derive(Debug)]
pub struct DirectoryEngine<S: Persistence> {
    storage: FallbackStore<S>,
    store: RecordStore,
    query: QueryState,
    search: DebouncedInput<String>,
    favorites: Favorites,
    paginator: Paginator,
    view_mode: ViewMode,
    theme: Theme,
    facets: Memo<u64, FacetSet>,
    results: Memo<ResultKey, Arc<[usize]>>,
    matched: Memo<ResultKey, usize>,
}

impl<S: Persistence> DirectoryEngine<S> {
    /// Open the engine, restoring cached records, favorites, preferences,
    /// and the session page from `storage`.
    pub fn open(storage: S, config: EngineConfig) -> Self {
        let storage = FallbackStore::new(storage);
        let store = RecordStore::open(&storage);
        let favorites = Favorites::load(&storage);
        let view_mode = load_preference(&storage, VIEW_MODE_KEY);
        let theme = load_preference(&storage, THEME_KEY);

        let mut paginator = Paginator::new(config.page_size);
        paginator.restore(load_session_page(&storage));

        debug!(
            record_count = store.records().len(),
            favorites = favorites.len(),
            %view_mode,
            %theme,
            page = paginator.current_page(),
            "engine opened"
        );

        let mut engine = Self {
            storage,
            store,
            query: QueryState::default(),
            search: DebouncedInput::new(String::new(), config.search_debounce),
            favorites,
            paginator,
            view_mode,
            theme,
            facets: Memo::new(),
            results: Memo::new(),
            matched: Memo::new(),
        };
        // A cached snapshot means results are already known.
        if engine.store.snapshot().is_some() {
            engine.clamp_page();
        }
        engine
    }

    // Records ----------------------------------------------------------------

    /// Fetch from `source` and swap in the result.
    pub fn refresh<R: RecordSource + ?Sized>(&mut self, source: &R) -> RefreshOutcome {
        let outcome = self.store.refresh(source, &mut self.storage);
        self.clamp_page();
        outcome
    }

    /// Mark a fetch as outstanding, for front ends that fetch elsewhere.
    pub fn begin_refresh(&mut self) {
        self.store.begin_refresh();
    }

    /// Apply the result of a fetch performed elsewhere.
    pub fn apply_fetch_result(
        &mut self,
        result: directory_ingest::Result<Vec<Record>>,
    ) -> RefreshOutcome {
        let outcome = self.store.complete_refresh(result, &mut self.storage);
        self.clamp_page();
        outcome
    }

    pub fn records(&self) -> &[Record] {
        self.store.records()
    }

    pub fn record_store(&self) -> &RecordStore {
        &self.store
    }

    pub fn status(&self) -> &LoadStatus {
        self.store.status()
    }

    /// The fetch error to show, when there is no snapshot to fall back on.
    pub fn error(&self) -> Option<&FetchError> {
        self.store.error()
    }

    pub fn find(&self, id: &RecordId) -> Option<&Record> {
        self.records().iter().find(|record| &record.id == id)
    }

    // Query ------------------------------------------------------------------

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    /// The search text as typed, which may not be effective yet.
    pub fn raw_search(&self) -> &str {
        self.search.raw()
    }

    /// Feed typed search input. The query picks it up once input has been
    /// quiet for the debounce interval; see [`DirectoryEngine::poll_search`].
    pub fn input_search(&mut self, text: impl Into<String>, now: Instant) {
        let text = text.into();
        if *self.search.raw() != text {
            self.reset_page();
        }
        self.search.input(text, now);
    }

    /// When the pending search input settles, if any is pending.
    pub fn search_deadline(&self) -> Option<Instant> {
        self.search.deadline()
    }

    /// Adopt settled search input. Returns `true` when the effective search
    /// term changed.
    pub fn poll_search(&mut self, now: Instant) -> bool {
        match self.search.poll(now).cloned() {
            Some(term) => self.adopt_search(term),
            None => false,
        }
    }

    /// Adopt pending search input immediately.
    pub fn flush_search(&mut self) -> bool {
        match self.search.flush().cloned() {
            Some(term) => self.adopt_search(term),
            None => false,
        }
    }

    /// Set the search term without debouncing.
    pub fn set_search_term(&mut self, term: impl Into<String>) -> bool {
        let term = term.into();
        self.search.reset(term.clone());
        self.adopt_search(term)
    }

    /// Cancel pending search input so no late update happens.
    pub fn teardown(&mut self) {
        self.search.teardown();
    }

    pub fn set_location(&mut self, location: Option<String>) -> bool {
        self.set_filter(FilterField::Location, location)
    }

    pub fn set_industry(&mut self, industry: Option<String>) -> bool {
        self.set_filter(FilterField::Industry, industry)
    }

    pub fn set_filter(&mut self, field: FilterField, value: Option<String>) -> bool {
        let changed = self.query.set_filter(field, value);
        if changed {
            debug!(%field, value = self.query.filter(field), "filter changed");
            self.reset_page();
        }
        changed
    }

    /// Change the sort order. The current page is kept.
    pub fn set_sort_key(&mut self, sort_key: SortKey) -> bool {
        self.query.set_sort_key(sort_key)
    }

    pub fn set_favorites_only(&mut self, favorites_only: bool) -> bool {
        let changed = self.query.set_favorites_only(favorites_only);
        if changed {
            self.reset_page();
        }
        changed
    }

    /// Reset search, filters, sort, and favorites-only to their defaults.
    pub fn clear_filters(&mut self) {
        self.search.reset(String::new());
        self.query = QueryState::default();
        self.reset_page();
        debug!("filters cleared");
    }

    // Derived ----------------------------------------------------------------

    /// Distinct values of every filterable field.
    pub fn facets(&self) -> FacetSet {
        self.facets.get_or_compute(self.store.version(), || {
            FacetSet::from_records(self.store.records())
        })
    }

    pub fn facet(&self, field: FilterField) -> Arc<[String]> {
        Arc::clone(self.facets().get(field))
    }

    /// Indices of the visible records, in display order.
    pub fn result_indices(&self) -> Arc<[usize]> {
        let key = ResultKey {
            version: self.store.version(),
            query: self.query.clone(),
            favorites_revision: self
                .query
                .favorites_only()
                .then(|| self.favorites.revision()),
        };
        self.results.get_or_compute(key, || {
            pipeline::derive(self.store.records(), &self.query, &self.favorites).into()
        })
    }

    /// Visible records, in display order.
    pub fn results(&self) -> Vec<&Record> {
        let records = self.store.records();
        self.result_indices()
            .iter()
            .map(|&index| &records[index])
            .collect()
    }

    pub fn result_count(&self) -> usize {
        self.result_indices().len()
    }

    /// Records matching search and filters, ignoring favorites-only.
    pub fn matched_count(&self) -> usize {
        let mut query = self.query.clone();
        query.set_favorites_only(false);
        let key = ResultKey {
            version: self.store.version(),
            query,
            favorites_revision: None,
        };
        self.matched.get_or_compute(key, || {
            pipeline::filter_sort(self.store.records(), &self.query).len()
        })
    }

    /// How many times facets and results have been recomputed.
    pub fn computation_counts(&self) -> (u64, u64) {
        (self.facets.computations(), self.results.computations())
    }

    pub fn stats(&self) -> DirectoryStats {
        let facets = self.facets();
        let total_records = self.store.records().len();
        let filtered_count = self.matched_count();
        DirectoryStats {
            total_records,
            locations: facets.locations.len(),
            industries: facets.industries.len(),
            filtered_count,
            favorites_count: self.favorites.len(),
            // A filter that matches every record still counts as "all".
            scope: if filtered_count == total_records {
                ResultScope::All
            } else {
                ResultScope::Filtered
            },
        }
    }

    // Pagination -------------------------------------------------------------

    pub fn current_page(&self) -> usize {
        self.paginator.current_page()
    }

    pub fn page_size(&self) -> usize {
        self.paginator.page_size()
    }

    pub fn page_count(&self) -> usize {
        self.paginator.page_count(self.result_count())
    }

    /// Records on the current page.
    pub fn page(&self) -> Vec<&Record> {
        let records = self.store.records();
        let indices = self.result_indices();
        self.paginator
            .window(&indices)
            .iter()
            .map(|&index| &records[index])
            .collect()
    }

    pub fn page_info(&self) -> PageInfo {
        let total_items = self.result_count();
        let page_count = self.paginator.page_count(total_items);
        let range = self.paginator.range(total_items);
        let (first_item, last_item) = if range.is_empty() {
            (0, 0)
        } else {
            (range.start + 1, range.end)
        };
        let current_page = self.current_page().min(page_count);
        PageInfo {
            current_page,
            page_count,
            first_item,
            last_item,
            total_items,
            has_prev: current_page > 1,
            has_next: current_page < page_count,
        }
    }

    pub fn page_numbers(&self) -> Vec<PageItem> {
        self.paginator.page_numbers(self.result_count())
    }

    /// Jump to `page`, clamped into range. Returns the resulting page.
    pub fn go_to_page(&mut self, page: usize) -> usize {
        let len = self.result_count();
        let before = self.paginator.current_page();
        let page = self.paginator.go_to(page, len);
        if page != before {
            self.save_page();
        }
        page
    }

    pub fn next_page(&mut self) -> usize {
        self.go_to_page(self.paginator.current_page().saturating_add(1))
    }

    pub fn prev_page(&mut self) -> usize {
        self.go_to_page(self.paginator.current_page().saturating_sub(1))
    }

    // Favorites --------------------------------------------------------------

    pub fn favorites(&self) -> &Favorites {
        &self.favorites
    }

    pub fn is_favorite(&self, id: &RecordId) -> bool {
        self.favorites.contains(id)
    }

    /// Every favorite record in the current sort order, regardless of search
    /// and filters. The query and page are left alone.
    pub fn favorite_records(&self) -> Vec<&Record> {
        let records = self.store.records();
        let mut query = QueryState::default();
        query.set_sort_key(self.query.sort_key());
        query.set_favorites_only(true);
        pipeline::derive(records, &query, &self.favorites)
            .into_iter()
            .map(|index| &records[index])
            .collect()
    }

    /// Flip favorite membership of `id`. Returns whether it is now a
    /// favorite.
    pub fn toggle_favorite(&mut self, id: &RecordId) -> bool {
        let now_favorite = self.favorites.toggle(id, &mut self.storage);
        debug!(id = %id, now_favorite, "favorite toggled");
        if self.query.favorites_only() {
            self.clamp_page();
        }
        now_favorite
    }

    // Preferences ------------------------------------------------------------

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn set_view_mode(&mut self, view_mode: ViewMode) {
        self.view_mode = view_mode;
        save_preference(&mut self.storage, VIEW_MODE_KEY, &view_mode);
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        save_preference(&mut self.storage, THEME_KEY, &theme);
    }

    /// Switch between light and dark. Returns the new theme.
    pub fn toggle_theme(&mut self) -> Theme {
        self.set_theme(self.theme.toggled());
        self.theme
    }

    // Export -----------------------------------------------------------------

    /// Write the visible results as CSV. Returns the row count.
    pub fn export_csv<W: Write>(&self, writer: W) -> Result<usize, ExportError> {
        export::write_csv(writer, self.results())
    }

    pub fn export_to_path(&self, path: &Path) -> Result<usize, ExportError> {
        export::export_to_path(path, self.results())
    }

    // Storage ----------------------------------------------------------------

    pub fn storage(&self) -> &FallbackStore<S> {
        &self.storage
    }

    fn adopt_search(&mut self, term: String) -> bool {
        let changed = self.query.set_search_term(term);
        if changed {
            debug!(term = self.query.search_term(), "search term settled");
            self.reset_page();
        }
        changed
    }

    fn reset_page(&mut self) {
        if self.paginator.reset() {
            self.save_page();
        }
    }

    fn clamp_page(&mut self) {
        if self.paginator.clamp(self.result_count()) {
            debug!(page = self.paginator.current_page(), "page clamped");
            self.save_page();
        }
    }

    fn save_page(&mut self) {
        let page = self.paginator.current_page();
        if let Err(error) = save_json(&mut self.storage, Scope::Session, CURRENT_PAGE_KEY, &page) {
            warn!(key = CURRENT_PAGE_KEY, %error, "could not save current page");
        }
    }
}

fn load_preference<P, T>(storage: &P, key: &str) -> T
where
    P: Persistence + ?Sized,
    T: serde::de::DeserializeOwned + Default,
{
    match load_json(storage, Scope::Durable, key) {
        Ok(value) => value.unwrap_or_default(),
        Err(error) => {
            warn!(key, %error, "ignoring unreadable preference");
            T::default()
        }
    }
}

fn save_preference<P, T>(storage: &mut P, key: &str, value: &T)
where
    P: Persistence + ?Sized,
    T: serde::Serialize,
{
    if let Err(error) = save_json(storage, Scope::Durable, key, value) {
        warn!(key, %error, "could not save preference");
    }
}

fn load_session_page<P: Persistence + ?Sized>(storage: &P) -> usize {
    match load_json::<usize, _>(storage, Scope::Session, CURRENT_PAGE_KEY) {
        Ok(page) => page.unwrap_or(1).max(1),
        Err(error) => {
            warn!(key = CURRENT_PAGE_KEY, %error, "ignoring unreadable saved page");
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use directory_persistence::MemoryStore;

    fn company(id: u64, name: &str, location: &str) -> Record {
        Record {
            id: RecordId::from(id),
            name: name.to_string(),
            location: location.to_string(),
            industry: "Retail".to_string(),
            employees: id * 10,
            founded: 2000,
            description: String::new(),
        }
    }

    fn loaded(records: Vec<Record>) -> DirectoryEngine<MemoryStore> {
        let mut engine = DirectoryEngine::open(MemoryStore::new(), EngineConfig::default());
        engine.apply_fetch_result(Ok(records));
        engine
    }

    fn thirteen() -> Vec<Record> {
        (1..=13)
            .map(|id| company(id, &format!("Company {id:02}"), "Oslo"))
            .collect()
    }

    #[test]
    fn filter_change_resets_page() {
        let mut engine = loaded(thirteen());
        assert_eq!(engine.go_to_page(3), 3);
        engine.set_location(Some("Oslo".to_string()));
        assert_eq!(engine.current_page(), 1);
    }

    #[test]
    fn sort_change_keeps_page() {
        let mut engine = loaded(thirteen());
        engine.go_to_page(2);
        engine.set_sort_key(SortKey::NameDesc);
        assert_eq!(engine.current_page(), 2);
        assert_eq!(engine.page()[0].name, "Company 07");
    }

    #[test]
    fn page_info_reports_visible_range() {
        let mut engine = loaded(thirteen());
        engine.go_to_page(3);
        let info = engine.page_info();
        assert_eq!(info.first_item, 13);
        assert_eq!(info.last_item, 13);
        assert_eq!(info.page_count, 3);
        assert!(info.has_prev);
        assert!(!info.has_next);
    }

    #[test]
    fn empty_results_have_an_empty_range() {
        let mut engine = loaded(thirteen());
        engine.set_search_term("nothing matches");
        let info = engine.page_info();
        assert_eq!((info.first_item, info.last_item, info.total_items), (0, 0, 0));
        assert_eq!(info.page_count, 1);
    }

    #[test]
    fn clear_filters_restores_defaults() {
        let mut engine = loaded(thirteen());
        engine.set_search_term("01");
        engine.set_sort_key(SortKey::FoundedDesc);
        engine.set_favorites_only(true);
        engine.clear_filters();
        assert_eq!(engine.query(), &QueryState::default());
        assert_eq!(engine.raw_search(), "");
        assert_eq!(engine.result_count(), 13);
    }

    #[test]
    fn stats_track_narrowing() {
        let mut engine = loaded(vec![
            company(1, "Acme", "Berlin"),
            company(2, "Zenith", "Oslo"),
        ]);
        let stats = engine.stats();
        assert_eq!(stats.total_records, 2);
        assert_eq!(stats.locations, 2);
        assert_eq!(stats.industries, 1);
        assert_eq!(stats.scope, ResultScope::All);
        engine.set_location(Some("Oslo".to_string()));
        let stats = engine.stats();
        assert_eq!(stats.filtered_count, 1);
        assert!(stats.is_filtered());
    }

    #[test]
    fn stats_ignore_favorites_only() {
        let mut engine = loaded((1..=5).map(|id| company(id, "Co", "Oslo")).collect());
        engine.toggle_favorite(&RecordId::from(3));
        engine.set_favorites_only(true);
        assert_eq!(engine.result_count(), 1);
        let stats = engine.stats();
        assert_eq!(stats.filtered_count, 5);
        assert_eq!(stats.favorites_count, 1);
        assert_eq!(stats.scope, ResultScope::All);
    }

    #[test]
    fn favorite_records_leave_query_and_page_alone() {
        let mut engine = loaded(thirteen());
        engine.toggle_favorite(&RecordId::from(12));
        engine.toggle_favorite(&RecordId::from(2));
        engine.set_search_term("Company");
        assert_eq!(engine.go_to_page(2), 2);

        let names: Vec<&str> = engine
            .favorite_records()
            .iter()
            .map(|record| record.name.as_str())
            .collect();
        assert_eq!(names, ["Company 02", "Company 12"]);
        assert!(!engine.query().favorites_only());
        assert_eq!(engine.query().search_term(), "Company");
        assert_eq!(engine.current_page(), 2);
        assert_eq!(
            engine.storage().inner().get_session(CURRENT_PAGE_KEY).unwrap().as_deref(),
            Some("2")
        );
    }

    #[test]
    fn preferences_persist() {
        let mut engine = loaded(Vec::new());
        engine.set_view_mode(ViewMode::Table);
        assert_eq!(engine.toggle_theme(), Theme::Dark);
        let storage = engine.storage().inner();
        assert_eq!(
            storage.get_durable(VIEW_MODE_KEY).unwrap().as_deref(),
            Some("\"table\"")
        );
        assert_eq!(
            storage.get_durable(THEME_KEY).unwrap().as_deref(),
            Some("\"dark\"")
        );
    }
}
