//! Category Carousel
//!
//! State of one category strip on the front page. The fetch is deferred
//! until the section comes within 600px of the viewport, happens at most
//! once per mounted instance, and its result is dropped if the carousel
//! was unmounted while the fetch was in flight.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::debug;

use super::pagination::{Paginator, PAGE_SIZE};
use super::service::ArticleFeed;
use super::swipe::SwipeTracker;
use crate::models::Article;
use crate::visibility::{Rect, Viewport, VisibilityTrigger};

/// Pre-fetch margin in pixels around the viewport
pub const CAROUSEL_MARGIN_PX: f64 = 600.0;

/// Viewports at least this wide get the paged grid
pub const WIDE_BREAKPOINT_PX: f64 = 768.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Paged grid
    Wide,
    /// Swipeable single-file strip
    Narrow,
}

impl Layout {
    pub fn for_viewport(viewport: Viewport) -> Self {
        if viewport.width >= WIDE_BREAKPOINT_PX {
            Layout::Wide
        } else {
            Layout::Narrow
        }
    }
}

/// What the carousel section renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CarouselView {
    /// Fetch not finished yet
    Loading,
    /// No articles: the section renders nothing
    Hidden,
    Grid {
        items: Vec<Article>,
        page: usize,
        total_pages: usize,
        can_prev: bool,
        can_next: bool,
    },
    Strip {
        items: Vec<Article>,
        index: usize,
        offset: f64,
    },
}

#[derive(Debug, Default)]
struct Fetched {
    articles: Vec<Article>,
    done: bool,
}

// == Category Carousel ==
#[derive(Debug)]
pub struct CategoryCarousel {
    category: String,
    title: String,
    trigger: VisibilityTrigger,
    has_fetched: bool,
    alive: Arc<AtomicBool>,
    fetched: Arc<Mutex<Fetched>>,
    pager: Paginator,
    swipe: SwipeTracker,
}

impl CategoryCarousel {
    /// Mounts a carousel for the store category `category`.
    pub fn mount(category: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            title: title.into(),
            trigger: VisibilityTrigger::new(CAROUSEL_MARGIN_PX),
            has_fetched: false,
            alive: Arc::new(AtomicBool::new(true)),
            fetched: Arc::new(Mutex::new(Fetched::default())),
            pager: Paginator::new(PAGE_SIZE, 0),
            swipe: SwipeTracker::new(0),
        }
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Reports the section position. Starts the fetch the first time the
    /// section is near the viewport and returns its task handle.
    pub fn observe(&mut self, section: Rect, viewport: Viewport, feed: &ArticleFeed) -> Option<JoinHandle<()>> {
        let mut visible = false;
        self.trigger.observe(section, viewport, || visible = true);
        if !visible || self.has_fetched || !self.alive.load(Ordering::SeqCst) {
            return None;
        }
        self.has_fetched = true;

        let feed = feed.clone();
        let category = self.category.clone();
        let alive = Arc::clone(&self.alive);
        let fetched = Arc::clone(&self.fetched);

        Some(tokio::spawn(async move {
            let articles = feed.category(&category).await;
            if !alive.load(Ordering::SeqCst) {
                debug!(category, "carousel unmounted, dropping fetch result");
                return;
            }
            let mut slot = fetched.lock().unwrap_or_else(PoisonError::into_inner);
            slot.articles = articles;
            slot.done = true;
        }))
    }

    /// Tears the carousel down; in-flight results are discarded.
    pub fn unmount(&mut self) {
        self.alive.store(false, Ordering::SeqCst);
        self.trigger.disconnect();
    }

    pub fn is_mounted(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    /// Articles received so far.
    pub fn articles(&self) -> Vec<Article> {
        self.fetched
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .articles
            .clone()
    }

    fn sync(&mut self) -> (Vec<Article>, bool) {
        let (articles, done) = {
            let slot = self.fetched.lock().unwrap_or_else(PoisonError::into_inner);
            (slot.articles.clone(), slot.done)
        };
        if self.pager.total() != articles.len() {
            self.pager.set_total(articles.len());
        }
        if self.swipe.len() != articles.len() {
            self.swipe.set_len(articles.len());
        }
        (articles, done)
    }

    // == Wide Navigation ==
    pub fn next_page(&mut self) {
        self.sync();
        self.pager.next();
    }

    pub fn prev_page(&mut self) {
        self.sync();
        self.pager.prev();
    }

    // == Narrow Navigation ==
    pub fn touch_start(&mut self, x: f64) {
        self.sync();
        self.swipe.touch_start(x);
    }

    pub fn touch_move(&mut self, x: f64) -> f64 {
        self.swipe.touch_move(x)
    }

    pub fn touch_end(&mut self) -> usize {
        self.sync();
        self.swipe.touch_end()
    }

    // == Render ==
    pub fn view(&mut self, layout: Layout) -> CarouselView {
        let (articles, done) = self.sync();
        if !done {
            return CarouselView::Loading;
        }
        if articles.is_empty() {
            return CarouselView::Hidden;
        }

        match layout {
            Layout::Wide => CarouselView::Grid {
                items: self.pager.page(&articles).to_vec(),
                page: self.pager.current(),
                total_pages: self.pager.total_pages(),
                can_prev: self.pager.can_prev(),
                can_next: self.pager.can_next(),
            },
            Layout::Narrow => CarouselView::Strip {
                index: self.swipe.index(),
                offset: self.swipe.offset(),
                items: articles,
            },
        }
    }
}

impl Drop for CategoryCarousel {
    fn drop(&mut self) {
        self.alive.store(false, Ordering::SeqCst);
    }
}
