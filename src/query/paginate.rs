use super::{ListResponse, Pagination};

/// Slices an in-memory collection into one page, producing the same shape
/// the list endpoint returns. Useful for client-side collections and test
/// fixtures.
pub fn paginate<T: Clone>(data: &[T], pagination: &Pagination) -> ListResponse<T> {
    let page = pagination.page.max(1);
    let page_size = pagination.page_size.max(1);
    let total = data.len() as u64;
    let total_pages = ((total + page_size as u64 - 1) / page_size as u64) as u32;

    let start = (page as u64 - 1) * page_size as u64;
    let fin = (start + page_size as u64).min(total);
    let window: Vec<T> = data
        .iter()
        .skip(start as usize)
        .take(page_size as usize)
        .cloned()
        .collect();

    ListResponse {
        data: window,
        total,
        // One-based for display, even on an empty window
        inicio: start + 1,
        fin,
        total_pages,
        has_next_page: page < total_pages,
        has_prev_page: page > 1,
        current_page: page,
        applied_sort: None,
    }
}
