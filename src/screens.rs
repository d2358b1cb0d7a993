//! List-Screen Controller
//!
//! One generic screen replaces the per-entity controller copies: it owns
//! the current page, page size, and active filter, and translates UI
//! events (query, reset, page click, page-size change) into fresh
//! queries and button plans. Any front end — or a headless test — drives
//! it through plain method calls.

use crate::pagination::{plan_page_buttons, PageButton, PageRequest, PageResult, DEFAULT_PER_PAGE};

/// A data source a list screen can page through.
pub trait PagedSource {
    type Row;
    type Filter: Default;

    /// Run the paginated query. Implementations follow the query
    /// contract: out-of-range pages clamp, failures degrade to an empty
    /// result.
    fn fetch(
        &self,
        filter: &Self::Filter,
        request: PageRequest,
    ) -> impl std::future::Future<Output = PageResult<Self::Row>> + Send;
}

/// Everything a front end needs to redraw a list screen.
#[derive(Debug, Clone)]
pub struct ScreenUpdate<T> {
    pub result: PageResult<T>,
    pub buttons: Vec<PageButton>,
}

/// UI-agnostic list screen state: current page, page size, active filter,
/// and the last known page count. Single-owner, one query in flight at a
/// time.
pub struct ListScreen<S: PagedSource> {
    source: S,
    filter: S::Filter,
    page: u32,
    per_page: u32,
    total_pages: u32,
}

impl<S: PagedSource> ListScreen<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            filter: S::Filter::default(),
            page: 1,
            per_page: DEFAULT_PER_PAGE,
            total_pages: 1,
        }
    }

    pub fn current_page(&self) -> u32 {
        self.page
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    pub fn filter(&self) -> &S::Filter {
        &self.filter
    }

    /// Re-run the query for the current state and plan the page buttons.
    /// Adopts the effective page the query reports, so an out-of-range
    /// request (e.g. after deletions shrank the listing) self-corrects.
    pub async fn refresh(&mut self) -> ScreenUpdate<S::Row> {
        let request = PageRequest::new(self.page, self.per_page);
        let result = self.source.fetch(&self.filter, request).await;
        self.page = result.page;
        self.total_pages = result.total_pages;
        let buttons = plan_page_buttons(self.total_pages, self.page);
        ScreenUpdate { result, buttons }
    }

    /// Query event: install a new filter and show its first page.
    pub async fn apply_filter(&mut self, filter: S::Filter) -> ScreenUpdate<S::Row> {
        self.filter = filter;
        self.page = 1;
        self.refresh().await
    }

    /// Reset event: clear the filter and show the first page.
    pub async fn reset(&mut self) -> ScreenUpdate<S::Row> {
        self.apply_filter(S::Filter::default()).await
    }

    /// Page-button click, including jump markers.
    pub async fn page_clicked(&mut self, button: PageButton) -> ScreenUpdate<S::Row> {
        self.page = button.target(self.page, self.total_pages);
        self.refresh().await
    }

    /// Page-size change: back to the first page at the new size.
    pub async fn set_per_page(&mut self, per_page: u32) -> ScreenUpdate<S::Row> {
        self.per_page = per_page.max(1);
        self.page = 1;
        self.refresh().await
    }
}
