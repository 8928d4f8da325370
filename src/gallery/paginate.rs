use crate::{
    foundation::error::{GalleryError, GalleryResult},
    gallery::model::Person,
};

/// Globally sorted entries split into fixed-capacity pages.
#[derive(Clone, Debug)]
pub struct Pagination {
    sorted: Vec<Person>,
    capacity: usize,
}

/// One page: a contiguous slice of the globally sorted entries.
#[derive(Clone, Copy, Debug)]
pub struct Page<'a> {
    /// 0-based render index.
    pub index: usize,
    /// Members in display order, `1..=capacity` entries.
    pub members: &'a [Person],
}

/// Stable-sort `persons` by sort key and split them into pages of `capacity` entries.
///
/// Every page holds exactly `capacity` entries except the last, which holds the remainder.
pub fn paginate(mut persons: Vec<Person>, capacity: usize) -> GalleryResult<Pagination> {
    if capacity == 0 {
        return Err(GalleryError::config("page capacity must be > 0"));
    }
    if persons.is_empty() {
        return Err(GalleryError::empty_input(
            "batch creation requires at least one person",
        ));
    }
    // `sort_by` is stable: equal keys keep definition-file order.
    persons.sort_by(|a, b| a.sort_key.cmp(&b.sort_key));
    Ok(Pagination {
        sorted: persons,
        capacity,
    })
}

impl Pagination {
    /// Entries per full page.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// All entries in global display order.
    pub fn sorted(&self) -> &[Person] {
        &self.sorted
    }

    /// `ceil(total / capacity)`.
    pub fn page_count(&self) -> usize {
        self.sorted.len().div_ceil(self.capacity)
    }

    /// Zero-padding width of batch file indices for this pagination.
    pub fn index_width(&self) -> usize {
        index_width(self.page_count())
    }

    /// Page at `index`, if in range.
    pub fn page(&self, index: usize) -> Option<Page<'_>> {
        self.sorted
            .chunks(self.capacity)
            .nth(index)
            .map(|members| Page { index, members })
    }

    /// Pages in render order.
    pub fn pages(&self) -> impl ExactSizeIterator<Item = Page<'_>> {
        self.sorted
            .chunks(self.capacity)
            .enumerate()
            .map(|(index, members)| Page { index, members })
    }
}

/// `ceil(log10(page_count + 1))`, at least 1.
///
/// Equals the number of decimal digits of `page_count`: 9 pages give width 1, 10 pages width 2.
pub fn index_width(page_count: usize) -> usize {
    let mut width = 1;
    let mut rest = page_count / 10;
    while rest > 0 {
        width += 1;
        rest /= 10;
    }
    width
}

#[cfg(test)]
#[path = "../../tests/unit/gallery/paginate.rs"]
mod tests;
