//! Query building blocks: ordering keys, filters and page requests.
//!
//! Callers hand the accessor plain closures instead of expression trees.
//! The HTTP layer resolves textual field names into an [`OrderBy`] before
//! calling in.

use std::cmp::Ordering;
use std::fmt;

use crate::entity::Entity;

/// Page size used when the caller does not pick one.
pub const DEFAULT_PAGE_SIZE: usize = 25;

type Comparator<E> = dyn Fn(&E, &E) -> Ordering + Send + Sync;
type Predicate<E> = dyn Fn(&E) -> bool + Send + Sync;

/// Ordering applied to a filtered result set.
pub struct OrderBy<E> {
    compare: Box<Comparator<E>>,
}

impl<E: 'static> OrderBy<E> {
    /// Order by a key extracted from each entity.
    ///
    /// ```ignore
    /// let by_title = OrderBy::key(|s: &Sticker| s.title.clone());
    /// ```
    pub fn key<K, F>(extract: F) -> Self
    where
        K: Ord,
        F: Fn(&E) -> K + Send + Sync + 'static,
    {
        Self {
            compare: Box::new(move |a, b| extract(a).cmp(&extract(b))),
        }
    }

    /// Order with an explicit comparison function.
    pub fn comparator<F>(compare: F) -> Self
    where
        F: Fn(&E, &E) -> Ordering + Send + Sync + 'static,
    {
        Self {
            compare: Box::new(compare),
        }
    }

    /// Compare two entities under this ordering (ascending).
    pub fn compare(&self, a: &E, b: &E) -> Ordering {
        (self.compare)(a, b)
    }
}

impl<E: Entity> OrderBy<E> {
    /// Order by entity identifier.
    pub fn id() -> Self {
        Self::key(|entity: &E| entity.id())
    }
}

impl<E: Entity> Default for OrderBy<E> {
    fn default() -> Self {
        Self::id()
    }
}

impl<E> fmt::Debug for OrderBy<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("OrderBy(..)")
    }
}

/// Boolean predicate over entities of one kind.
pub struct Filter<E> {
    predicate: Box<Predicate<E>>,
}

impl<E: 'static> Filter<E> {
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&E) -> bool + Send + Sync + 'static,
    {
        Self {
            predicate: Box::new(predicate),
        }
    }

    pub fn matches(&self, entity: &E) -> bool {
        (self.predicate)(entity)
    }
}

impl<E> fmt::Debug for Filter<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Filter(..)")
    }
}

/// Arguments of a paginated query: filter, then count, then order, then page.
///
/// Defaults to ordering by id, ascending, 25 entities per page, first page,
/// no filter.
#[derive(Debug)]
pub struct PageRequest<E> {
    pub order_by: OrderBy<E>,
    pub ascending: bool,
    pub page_size: usize,
    pub page_number: usize,
    pub filter: Option<Filter<E>>,
}

impl<E: Entity> Default for PageRequest<E> {
    fn default() -> Self {
        Self::new(OrderBy::id())
    }
}

impl<E: 'static> PageRequest<E> {
    /// A first-page, ascending, unfiltered request with the given ordering.
    pub fn new(order_by: OrderBy<E>) -> Self {
        Self {
            order_by,
            ascending: true,
            page_size: DEFAULT_PAGE_SIZE,
            page_number: 0,
            filter: None,
        }
    }

    /// Replace the ordering.
    pub fn order_by(mut self, order_by: OrderBy<E>) -> Self {
        self.order_by = order_by;
        self
    }

    pub fn ascending(mut self, ascending: bool) -> Self {
        self.ascending = ascending;
        self
    }

    pub fn descending(self) -> Self {
        self.ascending(false)
    }

    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Zero-based page number.
    pub fn page(mut self, page_number: usize) -> Self {
        self.page_number = page_number;
        self
    }

    /// Keep only entities satisfying `predicate`.
    pub fn filter<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&E) -> bool + Send + Sync + 'static,
    {
        self.filter = Some(Filter::new(predicate));
        self
    }

    /// True if `entity` passes the filter (or there is none).
    pub fn matches(&self, entity: &E) -> bool {
        match &self.filter {
            Some(filter) => filter.matches(entity),
            None => true,
        }
    }

    /// Compare two entities honouring the sort direction.
    pub fn compare(&self, a: &E, b: &E) -> Ordering {
        let ordering = self.order_by.compare(a, b);
        if self.ascending {
            ordering
        } else {
            ordering.reverse()
        }
    }

    /// Number of entities to skip before the requested page starts.
    pub fn offset(&self) -> usize {
        self.page_number.saturating_mul(self.page_size)
    }
}
