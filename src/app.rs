use std::collections::HashMap;

use chrono::{DateTime, Local};
use tracing::debug;

use crate::models::{Artwork, ArtworkId, FetchEvent, Overlay, Page};
use crate::pagination::{FetchRequest, Pagination, parse_page_size};
use crate::selection::SelectionTracker;

/// Everything the table screen shows, owned by the UI loop.
#[derive(Debug)]
pub struct App {
    pub pagination: Pagination,
    pub selection: SelectionTracker,
    pub records: Vec<Artwork>,
    pub cursor: usize,
    pub overlay: Overlay,
    pub in_flight: usize,
    pub last_loaded: Option<DateTime<Local>>,
    titles: HashMap<ArtworkId, String>,
    pending_preselect: Option<(FetchRequest, usize)>,
    preselect_on_resize: bool,
}

impl App {
    pub fn new(page_size: usize, preselect_on_resize: bool) -> Self {
        Self {
            pagination: Pagination::new(page_size),
            selection: SelectionTracker::new(),
            records: Vec::new(),
            cursor: 0,
            overlay: Overlay::None,
            in_flight: 0,
            last_loaded: None,
            titles: HashMap::new(),
            pending_preselect: None,
            preselect_on_resize,
        }
    }

    pub fn initial_request(&self) -> FetchRequest {
        self.pagination.request()
    }

    pub fn mark_requested(&mut self, request: FetchRequest) {
        self.in_flight += 1;
        debug!(
            page = request.page_index,
            size = request.page_size,
            in_flight = self.in_flight,
            "fetch requested"
        );
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    /// Applies a fetch completion. Completions land in arrival order, so the
    /// last one to arrive is what the table shows.
    pub fn apply(&mut self, event: FetchEvent) {
        self.in_flight = self.in_flight.saturating_sub(1);
        match event {
            FetchEvent::Loaded { request, page } => self.load_page(request, page),
            FetchEvent::Failed { request, error } => {
                // The page the pre-selection was meant for never arrived.
                if self.pending_preselect.is_some_and(|(pending, _)| pending == request) {
                    self.pending_preselect = None;
                }
                debug!(
                    page = request.page_index,
                    size = request.page_size,
                    %error,
                    "keeping previous page"
                );
            }
        }
    }

    fn load_page(&mut self, request: FetchRequest, page: Page) {
        for artwork in &page.records {
            if let Some(title) = &artwork.title {
                self.titles.insert(artwork.id, title.clone());
            }
        }
        self.records = page.records;
        self.pagination.set_total(page.total);
        self.cursor = self.cursor.min(self.records.len().saturating_sub(1));
        self.last_loaded = Some(Local::now());

        if let Some((pending, n)) = self.pending_preselect {
            if pending == request {
                self.pending_preselect = None;
                let visible = self.visible_ids();
                self.selection.select_leading(&visible, n);
                debug!(n, "pre-selected leading rows after page size change");
            }
        }
    }

    pub fn visible_ids(&self) -> Vec<ArtworkId> {
        self.records.iter().map(|a| a.id).collect()
    }

    pub fn is_selected(&self, id: ArtworkId) -> bool {
        self.selection.contains(id)
    }

    pub fn visible_selection(&self) -> Vec<ArtworkId> {
        self.selection.visible_selection(&self.visible_ids())
    }

    pub fn all_visible_selected(&self) -> bool {
        self.selection.all_selected(&self.visible_ids())
    }

    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_down(&mut self) {
        if self.cursor + 1 < self.records.len() {
            self.cursor += 1;
        }
    }

    pub fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor = self.records.len().saturating_sub(1);
    }

    pub fn toggle_current_row(&mut self) {
        if let Some(id) = self.records.get(self.cursor).map(|a| a.id) {
            let visible = self.visible_ids();
            self.selection.toggle(&visible, id);
        }
    }

    pub fn toggle_select_all(&mut self) {
        let visible = self.visible_ids();
        self.selection.toggle_all(&visible);
    }

    pub fn next_page(&mut self) -> Option<FetchRequest> {
        let request = self.pagination.next_page();
        self.page_moved(request)
    }

    pub fn prev_page(&mut self) -> Option<FetchRequest> {
        let request = self.pagination.prev_page();
        self.page_moved(request)
    }

    pub fn first_page(&mut self) -> Option<FetchRequest> {
        let request = self.pagination.first_page();
        self.page_moved(request)
    }

    pub fn last_page(&mut self) -> Option<FetchRequest> {
        let request = self.pagination.last_page();
        self.page_moved(request)
    }

    /// A page move supersedes any pre-selection still waiting for its page.
    fn page_moved(&mut self, request: Option<FetchRequest>) -> Option<FetchRequest> {
        if request.is_some() {
            self.pending_preselect = None;
        }
        request
    }

    pub fn open_page_size_prompt(&mut self) {
        self.overlay = Overlay::PageSizePrompt {
            input: String::new(),
        };
    }

    pub fn prompt_push(&mut self, c: char) {
        if let Overlay::PageSizePrompt { input } = &mut self.overlay {
            input.push(c);
        }
    }

    pub fn prompt_pop(&mut self) {
        if let Overlay::PageSizePrompt { input } = &mut self.overlay {
            input.pop();
        }
    }

    /// Submits the rows-per-page prompt. Invalid text raises a blocking alert
    /// and changes nothing else.
    pub fn submit_page_size(&mut self) -> Option<FetchRequest> {
        let Overlay::PageSizePrompt { input } = &self.overlay else {
            return None;
        };
        match parse_page_size(input) {
            Ok(n) => {
                self.overlay = Overlay::None;
                self.cursor = 0;
                let request = self.pagination.set_page_size(n);
                if self.preselect_on_resize {
                    self.pending_preselect = Some((request, n));
                }
                Some(request)
            }
            Err(e) => {
                debug!(input = %input, error = %e, "rejected page size");
                self.overlay = Overlay::Alert {
                    message: e.to_string(),
                };
                None
            }
        }
    }

    pub fn show_selection_summary(&mut self) {
        self.overlay = Overlay::SelectionSummary;
    }

    pub fn dismiss_overlay(&mut self) {
        self.overlay = Overlay::None;
    }

    /// Title seen for `id` during this session, if any.
    pub fn title_of(&self, id: ArtworkId) -> Option<&str> {
        self.titles.get(&id).map(String::as_str)
    }

    pub fn selected_ids_text(&self) -> String {
        self.selection
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }
}
