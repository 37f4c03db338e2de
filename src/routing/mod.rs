//! Routing Module
//!
//! Hash-path navigation: the page table and the category sections.

mod categories;
mod route;

pub use categories::{find_category, CategoryInfo, CATEGORIES};
pub use route::Route;
