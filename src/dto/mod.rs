//! JSON shapes returned by the service layer.

use serde::Serialize;

pub mod categories;
pub mod penalties;
pub mod savings;
pub mod schedules;
pub mod slots;

/// One page of a listing with the size of the whole result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub pages: usize,
    pub total: usize,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, page: usize, per_page: usize, total: usize) -> Self {
        Self {
            items,
            page,
            pages: total.div_ceil(per_page.max(1)),
            total,
        }
    }
}
