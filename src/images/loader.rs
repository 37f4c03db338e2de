//! Optimized Image Loader
//!
//! Per-image loading state machine:
//! `NotInView -> InView -> (Loaded | Errored)`.
//!
//! The loader renders a shimmer skeleton until the image loads, an optional
//! blurred placeholder over it, and the full image once in view. A failed
//! load shows a fixed message and is never retried.

use serde::Serialize;

use super::provider::srcset_attr;
use super::{optimize_url, placeholder_for, srcset, ImageSize, IMAGE_UNAVAILABLE, LAZY_MARGIN_PX};
use crate::visibility::{Rect, Viewport, VisibilityTrigger};

const PRIORITY_SIZES: &str = "(min-width: 1024px) 50vw, 100vw";
const LAZY_SIZES: &str = "(max-width: 768px) 100vw, 33vw";

// == Load State ==
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadState {
    NotInView,
    InView,
    Loaded,
    Errored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Loading {
    Eager,
    Lazy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchPriority {
    High,
    Auto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Decoding {
    Sync,
    Async,
}

// == Options ==
/// Caller-supplied image parameters.
#[derive(Debug, Clone, Default)]
pub struct ImageOptions {
    pub src: String,
    pub alt: String,
    pub size: ImageSize,
    /// Above-the-fold image: skip lazy detection and load eagerly
    pub priority: bool,
    /// Overrides the computed `sizes` hint
    pub sizes: Option<String>,
    /// Precomputed placeholder URL; derived from `src` when absent
    pub placeholder: Option<String>,
}

impl ImageOptions {
    pub fn new(src: impl Into<String>, alt: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            alt: alt.into(),
            ..Self::default()
        }
    }

    pub fn size(mut self, size: ImageSize) -> Self {
        self.size = size;
        self
    }

    pub fn priority(mut self, priority: bool) -> Self {
        self.priority = priority;
        self
    }

    pub fn sizes(mut self, sizes: impl Into<String>) -> Self {
        self.sizes = Some(sizes.into());
        self
    }

    pub fn placeholder(mut self, placeholder: Option<String>) -> Self {
        self.placeholder = placeholder;
        self
    }
}

// == Render Plan ==
/// What the image element should currently display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageRender {
    pub state: LoadState,
    pub alt: String,
    /// Main image URL, present once in view and not errored
    pub src: Option<String>,
    pub srcset: Option<String>,
    pub sizes: Option<String>,
    pub loading: Loading,
    pub fetch_priority: FetchPriority,
    pub decoding: Decoding,
    pub placeholder: Option<String>,
    pub placeholder_visible: bool,
    pub shimmer_visible: bool,
    pub error_message: Option<&'static str>,
}

// == Image Loader ==
#[derive(Debug, Clone)]
pub struct ImageLoader {
    options: ImageOptions,
    state: LoadState,
    trigger: VisibilityTrigger,
    optimized_src: String,
    srcset: String,
    placeholder: Option<String>,
}

impl ImageLoader {
    /// Creates a loader. Priority images start in view.
    pub fn new(options: ImageOptions) -> Self {
        let quality = options.size.quality();
        let optimized_src = optimize_url(&options.src, options.size.width(), quality);
        let srcset = srcset_attr(&srcset(&options.src, quality));
        let placeholder = placeholder_for(&options.src, options.placeholder.as_deref());

        let (state, trigger) = if options.priority {
            (LoadState::InView, VisibilityTrigger::fired(LAZY_MARGIN_PX))
        } else {
            (LoadState::NotInView, VisibilityTrigger::new(LAZY_MARGIN_PX))
        };

        Self {
            options,
            state,
            trigger,
            optimized_src,
            srcset,
            placeholder,
        }
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    /// Reports the element position; moves to `InView` on first intersection.
    pub fn observe(&mut self, element: Rect, viewport: Viewport) -> LoadState {
        let state = &mut self.state;
        self.trigger.observe(element, viewport, || {
            if *state == LoadState::NotInView {
                *state = LoadState::InView;
            }
        });
        self.state
    }

    /// The browser finished loading the main image.
    pub fn on_load(&mut self) {
        if self.state == LoadState::InView {
            self.state = LoadState::Loaded;
        }
    }

    /// The browser failed to load the main image.
    pub fn on_error(&mut self) {
        if self.state == LoadState::InView {
            self.state = LoadState::Errored;
        }
    }

    /// Tears down the visibility observer.
    pub fn unmount(&mut self) {
        self.trigger.disconnect();
    }

    /// `sizes` hint for the current options.
    pub fn sizes_hint(&self) -> String {
        match &self.options.sizes {
            Some(sizes) => sizes.clone(),
            None if self.options.priority => PRIORITY_SIZES.to_string(),
            None => LAZY_SIZES.to_string(),
        }
    }

    pub fn render(&self) -> ImageRender {
        let loaded = self.state == LoadState::Loaded;
        let errored = self.state == LoadState::Errored;
        let in_view = matches!(self.state, LoadState::InView | LoadState::Loaded);
        let has_srcset = !self.srcset.is_empty();
        let priority = self.options.priority;

        ImageRender {
            state: self.state,
            alt: self.options.alt.clone(),
            src: in_view.then(|| self.optimized_src.clone()),
            srcset: (in_view && has_srcset).then(|| self.srcset.clone()),
            sizes: (in_view && has_srcset).then(|| self.sizes_hint()),
            loading: if priority { Loading::Eager } else { Loading::Lazy },
            fetch_priority: if priority {
                FetchPriority::High
            } else {
                FetchPriority::Auto
            },
            decoding: if priority { Decoding::Sync } else { Decoding::Async },
            placeholder: self.placeholder.clone(),
            placeholder_visible: self.placeholder.is_some() && !loaded && !errored,
            shimmer_visible: !loaded,
            error_message: errored.then_some(IMAGE_UNAVAILABLE),
        }
    }
}
