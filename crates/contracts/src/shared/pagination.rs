//! Paginated list envelope and client-side page bookkeeping.
//!
//! The backend has served two envelope shapes over time. Both are accepted by
//! [`PageWire`] and normalized into [`Page`] right after decoding, so views
//! only ever see one shape.

use serde::{Deserialize, Serialize};

/// Page size assumed when the server does not report one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Canonical page of list results. `current_page` is 1-based.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub objects: Vec<T>,
    pub total_count: u64,
    pub num_pages: u32,
    pub current_page: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            objects: Vec::new(),
            total_count: 0,
            num_pages: 1,
            current_page: 1,
            page_size: None,
        }
    }
}

impl<T> Page<T> {
    /// Both `num_pages == 0` and `num_pages == 1` with no objects mean "no items".
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Last navigable page, never below 1.
    pub fn last_page(&self) -> u32 {
        self.num_pages.max(1)
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
            .filter(|size| *size > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE)
    }

    /// 1-based position of `objects[index]` within the whole result set.
    pub fn ordinal(&self, index: usize) -> u64 {
        item_ordinal(self.current_page, self.page_size(), index)
    }
}

/// `(current_page - 1) * page_size + index + 1`
pub fn item_ordinal(current_page: u32, page_size: u32, index: usize) -> u64 {
    let page = u64::from(current_page.max(1));
    (page - 1) * u64::from(page_size) + index as u64 + 1
}

/// Page envelope exactly as received from the backend.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PageWire<T> {
    Current {
        objects: Vec<T>,
        total_count: u64,
        num_pages: u32,
        current_page: u32,
        #[serde(default)]
        page_size: Option<u32>,
    },
    Legacy {
        count: u64,
        next: Option<String>,
        previous: Option<String>,
        results: Vec<T>,
    },
}

impl<T> PageWire<T> {
    /// Normalizes either shape. `requested_page` and `known_page_size` are
    /// only consulted for the legacy shape, which reports neither.
    pub fn into_page(self, requested_page: u32, known_page_size: Option<u32>) -> Page<T> {
        match self {
            PageWire::Current {
                objects,
                total_count,
                num_pages,
                current_page,
                page_size,
            } => Page {
                objects,
                total_count,
                num_pages,
                current_page: current_page.max(1),
                page_size,
            },
            PageWire::Legacy {
                count,
                next,
                previous,
                results,
            } => {
                let requested_page = requested_page.max(1);
                let page_size = legacy_page_size(
                    count,
                    next.is_some(),
                    previous.is_some(),
                    results.len(),
                    requested_page,
                )
                .or(known_page_size.filter(|size| *size > 0));
                let size = u64::from(page_size.unwrap_or(DEFAULT_PAGE_SIZE));
                let num_pages = count.div_ceil(size) as u32;
                Page {
                    objects: results,
                    total_count: count,
                    num_pages,
                    current_page: requested_page,
                    page_size,
                }
            }
        }
    }
}

/// Page size implied by a legacy page, when it implies one.
///
/// A page followed by another one is necessarily full. Otherwise every page
/// before `requested_page` is full, so the items in front of this one divide
/// evenly among them.
fn legacy_page_size(
    count: u64,
    has_next: bool,
    has_previous: bool,
    len: usize,
    requested_page: u32,
) -> Option<u32> {
    if has_next && len > 0 {
        return Some(len as u32);
    }
    if has_previous && requested_page > 1 {
        let before = count.saturating_sub(len as u64);
        let size = before / u64::from(requested_page - 1);
        if size > 0 && size >= len as u64 {
            return Some(size as u32);
        }
    }
    None
}

/// List endpoints that may answer with a bare array or with a page envelope.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListWire<T> {
    Plain(Vec<T>),
    Paged(PageWire<T>),
}

impl<T> ListWire<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            ListWire::Plain(items) => items,
            ListWire::Paged(page) => page.into_page(1, None).objects,
        }
    }
}

/// Query parameters of paginated list requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListQuery {
    pub page: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<i64>,
}

impl ListQuery {
    pub fn page(page: u32) -> Self {
        Self {
            page: page.max(1),
            document: None,
        }
    }

    pub fn with_document(mut self, document: Option<i64>) -> Self {
        self.document = document;
        self
    }
}

/// Page cursor of one list view.
///
/// Previous/Next and direct jumps are clamped to `[1, last]`, so no request
/// is ever issued for page 0 or past the last known page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    current: u32,
    last: u32,
    page_size: Option<u32>,
}

impl Default for Pager {
    fn default() -> Self {
        Self::new()
    }
}

impl Pager {
    pub fn new() -> Self {
        Self {
            current: 1,
            last: 1,
            page_size: None,
        }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn last(&self) -> u32 {
        self.last
    }

    /// Page size learned from the pages loaded so far.
    pub fn page_size(&self) -> Option<u32> {
        self.page_size
    }

    pub fn has_previous(&self) -> bool {
        self.current > 1
    }

    pub fn has_next(&self) -> bool {
        self.current < self.last
    }

    pub fn previous(&mut self) -> u32 {
        self.go_to(self.current.saturating_sub(1))
    }

    pub fn next(&mut self) -> u32 {
        self.go_to(self.current.saturating_add(1))
    }

    pub fn go_to(&mut self, page: u32) -> u32 {
        self.current = page.clamp(1, self.last);
        self.current
    }

    /// Page numbers offered as direct jump buttons.
    pub fn pages(&self) -> Vec<u32> {
        (1..=self.last).collect()
    }

    /// Takes the bounds of a freshly loaded page. Returns the page to load
    /// instead when the cursor now lies past the end of the result set.
    pub fn reconcile<T>(&mut self, page: &Page<T>) -> Option<u32> {
        self.last = page.last_page();
        if page.page_size.is_some() {
            self.page_size = page.page_size;
        }
        if self.current > self.last {
            self.current = self.last;
            return Some(self.current);
        }
        None
    }

    /// Called after an item was deleted from the current page, before the
    /// refetch. `items_on_page` counts the items shown before the deletion.
    /// Deleting the only item of a page other than the first steps back one
    /// page so the refetch stays within the shrunken result set.
    pub fn after_delete(&mut self, items_on_page: usize) -> u32 {
        if items_on_page <= 1 && self.current > 1 {
            self.current -= 1;
            self.last = self.last.saturating_sub(1).max(self.current);
        }
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn page_of(objects: Vec<u32>, current_page: u32, num_pages: u32) -> Page<u32> {
        Page {
            total_count: objects.len() as u64,
            objects,
            num_pages,
            current_page,
            page_size: None,
        }
    }

    #[test]
    fn test_current_shape_decodes() {
        let wire: PageWire<u32> = serde_json::from_value(json!({
            "objects": [1, 2, 3],
            "total_count": 23,
            "num_pages": 3,
            "current_page": 3
        }))
        .unwrap();
        let page = wire.into_page(1, None);
        assert_eq!(page.objects, vec![1, 2, 3]);
        assert_eq!(page.num_pages, 3);
        assert_eq!(page.current_page, 3);
        assert_eq!(page.page_size(), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_legacy_shape_is_normalized() {
        let wire: PageWire<u32> = serde_json::from_value(json!({
            "count": 25,
            "next": "http://localhost:8000/api/ai/document/?page=3",
            "previous": "http://localhost:8000/api/ai/document/?page=1",
            "results": [11, 12, 13, 14, 15, 16, 17, 18, 19, 20]
        }))
        .unwrap();
        let page = wire.into_page(2, None);
        assert_eq!(page.current_page, 2);
        assert_eq!(page.num_pages, 3);
        assert_eq!(page.total_count, 25);
        assert_eq!(page.ordinal(0), 11);
    }

    #[test]
    fn test_legacy_last_page_of_default_size() {
        let wire: PageWire<u32> = serde_json::from_value(json!({
            "count": 12,
            "next": null,
            "previous": "http://x/?page=1",
            "results": [11, 12]
        }))
        .unwrap();
        let page = wire.into_page(2, None);
        assert_eq!(page.num_pages, 2);
        assert_eq!(page.page_size, Some(10));
    }

    #[test]
    fn test_empty_results_mean_no_items() {
        let zero: PageWire<u32> = serde_json::from_value(json!({
            "objects": [], "total_count": 0, "num_pages": 0, "current_page": 1
        }))
        .unwrap();
        let one: PageWire<u32> = serde_json::from_value(json!({
            "objects": [], "total_count": 0, "num_pages": 1, "current_page": 1
        }))
        .unwrap();
        let legacy: PageWire<u32> = serde_json::from_value(json!({
            "count": 0, "next": null, "previous": null, "results": []
        }))
        .unwrap();
        for page in [zero.into_page(1, None), one.into_page(1, None), legacy.into_page(1, None)] {
            assert!(page.is_empty());
            assert_eq!(page.last_page(), 1);
        }
    }

    #[test]
    fn test_list_wire_accepts_array_and_page() {
        let plain: ListWire<u32> = serde_json::from_value(json!([4, 5])).unwrap();
        assert_eq!(plain.into_vec(), vec![4, 5]);

        let paged: ListWire<u32> = serde_json::from_value(json!({
            "count": 1, "next": null, "previous": null, "results": [9]
        }))
        .unwrap();
        assert_eq!(paged.into_vec(), vec![9]);
    }

    #[test]
    fn test_ordinal_uses_reported_page_size() {
        assert_eq!(item_ordinal(1, 10, 0), 1);
        assert_eq!(item_ordinal(3, 10, 4), 25);

        let mut page = page_of(vec![1, 2], 2, 2);
        page.page_size = Some(25);
        assert_eq!(page.ordinal(1), 27);

        page.page_size = Some(0);
        assert_eq!(page.ordinal(1), 12);
    }

    #[test]
    fn test_navigation_is_clamped() {
        let mut pager = Pager::new();
        assert_eq!(pager.previous(), 1);
        assert_eq!(pager.next(), 1);

        pager.reconcile(&page_of(vec![1], 1, 4));
        assert!(pager.has_next());
        assert_eq!(pager.next(), 2);
        assert_eq!(pager.go_to(9), 4);
        assert!(!pager.has_next());
        assert_eq!(pager.next(), 4);
        assert_eq!(pager.go_to(0), 1);
        assert!(!pager.has_previous());
        assert_eq!(pager.pages(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_every_page_in_range_is_reachable() {
        let mut pager = Pager::new();
        pager.reconcile(&page_of(vec![1], 1, 7));
        for p in 1..=7 {
            assert_eq!(pager.go_to(p), p);
        }
    }

    #[test]
    fn test_delete_last_item_on_last_page_steps_back() {
        let mut pager = Pager::new();
        pager.reconcile(&page_of(vec![1], 1, 3));
        pager.go_to(3);

        assert_eq!(pager.after_delete(1), 2);
        assert_eq!(pager.last(), 2);
        assert_eq!(pager.reconcile(&page_of(vec![1; 10], 2, 2)), None);
        assert_eq!(pager.current(), 2);
    }

    #[test]
    fn test_delete_keeps_page_when_items_remain() {
        let mut pager = Pager::new();
        pager.reconcile(&page_of(vec![1], 1, 3));
        pager.go_to(2);
        assert_eq!(pager.after_delete(4), 2);

        let mut first = Pager::new();
        assert_eq!(first.after_delete(1), 1);
    }

    #[test]
    fn test_reconcile_clamps_past_the_end() {
        let mut pager = Pager::new();
        pager.reconcile(&page_of(vec![1], 1, 5));
        pager.go_to(5);
        assert_eq!(pager.reconcile(&page_of(vec![], 5, 3)), Some(3));
        assert_eq!(pager.current(), 3);
        assert_eq!(pager.reconcile(&page_of(vec![], 1, 0)), Some(1));
    }

    #[test]
    fn test_list_query_serializes_optional_document() {
        let query = ListQuery::page(0);
        assert_eq!(serde_json::to_value(&query).unwrap(), json!({ "page": 1 }));
        let query = ListQuery::page(2).with_document(Some(7));
        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({ "page": 2, "document": 7 })
        );
    }

    fn legacy_page(count: u64, page: u32, last: u32, results: Vec<u32>) -> PageWire<u32> {
        let url = |p: u32| format!("http://localhost:8000/api/ai/document/?page={}", p);
        serde_json::from_value(json!({
            "count": count,
            "next": (page < last).then(|| url(page + 1)),
            "previous": (page > 1).then(|| url(page - 1)),
            "results": results
        }))
        .unwrap()
    }

    #[test]
    fn test_legacy_last_page_reachable_with_small_page_size() {
        let mut pager = Pager::new();
        let first = legacy_page(12, 1, 3, vec![1, 2, 3, 4, 5]).into_page(1, pager.page_size());
        assert_eq!(first.num_pages, 3);
        assert_eq!(pager.reconcile(&first), None);
        assert_eq!(pager.page_size(), Some(5));

        assert_eq!(pager.go_to(3), 3);
        let last = legacy_page(12, 3, 3, vec![11, 12]).into_page(3, pager.page_size());
        assert_eq!(last.num_pages, 3);
        assert_eq!(last.ordinal(0), 11);
        assert_eq!(pager.reconcile(&last), None);
        assert_eq!(pager.current(), 3);
    }

    #[test]
    fn test_legacy_last_page_infers_size_from_earlier_pages() {
        let page = legacy_page(12, 3, 3, vec![11, 12]).into_page(3, None);
        assert_eq!(page.page_size, Some(5));
        assert_eq!(page.num_pages, 3);
        assert_eq!(page.ordinal(1), 12);
    }

    #[test]
    fn test_known_page_size_applies_to_single_legacy_page() {
        let page = legacy_page(3, 1, 1, vec![1, 2, 3]).into_page(1, Some(5));
        assert_eq!(page.num_pages, 1);
        assert_eq!(page.page_size, Some(5));
    }
}
