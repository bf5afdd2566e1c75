//! Page counter for the events catalog.

use crate::models::Page;

pub const DEFAULT_PAGE_SIZE: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    page: u32,
    page_size: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagerControls {
    pub prev_enabled: bool,
    pub next_enabled: bool,
    pub label: String,
}

impl Pager {
    pub fn new(page_size: u32) -> Self {
        Self {
            page: 1,
            page_size: if page_size == 0 { DEFAULT_PAGE_SIZE } else { page_size },
        }
    }

    /// Starts at `page`, clamped to the first page.
    pub fn at(page: u32, page_size: u32) -> Self {
        Self {
            page: page.max(1),
            ..Self::new(page_size)
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn next(&mut self) {
        self.page += 1;
    }

    pub fn prev(&mut self) {
        if self.page > 1 {
            self.page -= 1;
        }
    }

    pub fn label(&self) -> String {
        format!("Page {}", self.page)
    }

    pub fn controls<T>(&self, envelope: &Page<T>) -> PagerControls {
        PagerControls {
            prev_enabled: envelope.has_prev,
            next_enabled: envelope.has_next,
            label: self.label(),
        }
    }
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}
