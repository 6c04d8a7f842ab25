use super::*;

fn size(value: usize) -> NonZeroUsize {
    NonZeroUsize::new(value).unwrap()
}

#[test]
fn total_pages_never_below_one() {
    assert_eq!(total_pages(0, size(6)), 1);
    assert_eq!(total_pages(6, size(6)), 1);
    assert_eq!(total_pages(7, size(6)), 2);
    assert_eq!(total_pages(15, size(6)), 3);
}

#[test]
fn page_slice_windows_and_past_end_is_empty() {
    let items: Vec<usize> = (0..10).collect();

    assert_eq!(page_slice(&items, 1, size(7)), &[0usize, 1, 2, 3, 4, 5, 6]);
    assert_eq!(page_slice(&items, 2, size(7)), &[7usize, 8, 9]);
    assert!(page_slice(&items, 3, size(7)).is_empty());
    assert!(page_slice(&items, usize::MAX, size(7)).is_empty());
}

#[test]
fn page_for_index_is_one_based() {
    assert_eq!(page_for_index(0, size(7)), 1);
    assert_eq!(page_for_index(6, size(7)), 1);
    assert_eq!(page_for_index(7, size(7)), 2);
    assert_eq!(page_for_index(8, size(7)), 2);
}

#[test]
fn next_and_prev_clamp_at_bounds() {
    let mut pager = Pager::new(size(CLIENT_PAGE_SIZE));

    assert!(!pager.prev());
    assert_eq!(pager.page(), 1);

    assert!(pager.next(17));
    assert!(pager.next(17));
    assert!(!pager.next(17));
    assert_eq!(pager.page(), 3);

    assert!(pager.prev());
    assert_eq!(pager.page(), 2);
}

#[test]
fn go_to_clamps_into_range() {
    let mut pager = Pager::new(size(SERVICE_PAGE_SIZE));

    pager.go_to(9, 13);
    assert_eq!(pager.page(), 3);

    pager.go_to(0, 13);
    assert_eq!(pager.page(), 1);
}

#[test]
fn clamp_pulls_page_back_after_shrink() {
    let mut pager = Pager::new(size(COMPACT_CLIENT_PAGE_SIZE));
    pager.go_to(3, 20);
    assert_eq!(pager.page(), 3);

    pager.clamp(8);
    assert_eq!(pager.page(), 2);
    assert_eq!(pager.bounds(8), 7..8);

    pager.clamp(0);
    assert_eq!(pager.page(), 1);
    assert_eq!(pager.bounds(0), 0..0);
}
