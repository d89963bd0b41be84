//! Filtered, ordered pagination.

use stickers::{
    CancellationToken, DataAccessError, DataAccessor, InMemoryDataAccessor, OrderBy, PageRequest,
    DEFAULT_PAGE_SIZE,
};

use crate::support::{names, seeded, Named};

fn by_name() -> OrderBy<Named> {
    OrderBy::key(|n: &Named| n.name.clone())
}

#[tokio::test]
async fn first_page_descending_by_name() {
    let acc = seeded(10);
    let cancel = CancellationToken::new();

    let page = acc
        .get_paginated(PageRequest::new(by_name()).descending().page_size(3), &cancel)
        .await
        .unwrap();

    assert_eq!(page.page_index, 0);
    assert_eq!(page.page_size, 3);
    assert_eq!(page.total_count, 10);
    assert_eq!(page.total_pages, 4);
    assert_eq!(names(&page.items), vec!["Test9", "Test8", "Test7"]);
}

#[tokio::test]
async fn partial_page_with_filter() {
    let acc = seeded(10);
    let cancel = CancellationToken::new();

    let page = acc
        .get_paginated(
            PageRequest::new(by_name())
                .descending()
                .page_size(3)
                .page(1)
                .filter(|n| n.id % 2 == 0),
            &cancel,
        )
        .await
        .unwrap();

    assert_eq!(page.page_index, 1);
    assert_eq!(page.page_size, 3);
    assert_eq!(page.total_count, 5);
    assert_eq!(page.total_pages, 2);
    assert_eq!(names(&page.items), vec!["Test2", "Test10"]);
}

#[tokio::test]
async fn default_request() {
    let acc = seeded(30);
    let cancel = CancellationToken::new();

    let page = acc
        .get_paginated(PageRequest::<Named>::default(), &cancel)
        .await
        .unwrap();

    assert_eq!(page.page_size, DEFAULT_PAGE_SIZE);
    assert_eq!(page.items.len(), DEFAULT_PAGE_SIZE);
    assert_eq!(page.items[0].id, 1);
    assert_eq!(page.total_pages, 2);
}

#[tokio::test]
async fn page_beyond_end_is_empty_but_counts_everything() {
    let acc = seeded(10);
    let cancel = CancellationToken::new();

    let page = acc
        .get_paginated(PageRequest::<Named>::default().page_size(4).page(7), &cancel)
        .await
        .unwrap();

    assert!(page.items.is_empty());
    assert_eq!(page.total_count, 10);
    assert_eq!(page.total_pages, 3);
}

#[tokio::test]
async fn empty_result_has_zero_pages() {
    let acc = InMemoryDataAccessor::new();
    let cancel = CancellationToken::new();

    let page = acc
        .get_paginated(PageRequest::<Named>::default(), &cancel)
        .await
        .unwrap();

    assert!(page.items.is_empty());
    assert_eq!(page.total_count, 0);
    assert_eq!(page.total_pages, 0);
}

#[tokio::test]
async fn zero_page_size_is_invalid() {
    let acc = seeded(3);
    let cancel = CancellationToken::new();

    let err = acc
        .get_paginated(PageRequest::<Named>::default().page_size(0), &cancel)
        .await
        .unwrap_err();
    assert!(matches!(err, DataAccessError::InvalidArgument(_)));
}

#[tokio::test]
async fn pages_cover_filtered_set_once_in_order() {
    let acc = seeded(23);
    let cancel = CancellationToken::new();
    let page_size = 4;

    let first = acc
        .get_paginated(
            PageRequest::new(by_name()).page_size(page_size).filter(|n| n.id % 3 != 0),
            &cancel,
        )
        .await
        .unwrap();

    let mut collected = Vec::new();
    for page_number in 0..first.total_pages {
        let page = acc
            .get_paginated(
                PageRequest::new(by_name())
                    .page_size(page_size)
                    .page(page_number)
                    .filter(|n| n.id % 3 != 0),
                &cancel,
            )
            .await
            .unwrap();
        assert_eq!(page.total_count, first.total_count);
        collected.extend(page.items);
    }

    assert_eq!(collected.len(), first.total_count);
    let mut expected: Vec<String> = (1..=23)
        .filter(|i| i % 3 != 0)
        .map(|i| format!("Test{}", i))
        .collect();
    expected.sort();
    let got: Vec<String> = collected.into_iter().map(|n| n.name).collect();
    assert_eq!(got, expected);
}

#[tokio::test]
async fn total_count_ignores_paging() {
    let acc = seeded(17);
    let cancel = CancellationToken::new();

    for (size, page) in [(1, 0), (5, 2), (17, 0), (100, 3)] {
        let result = acc
            .get_paginated(
                PageRequest::<Named>::default()
                    .page_size(size)
                    .page(page)
                    .filter(|n| n.id > 5),
                &cancel,
            )
            .await
            .unwrap();
        assert_eq!(result.total_count, 12);
    }
}

#[tokio::test]
async fn ties_keep_insertion_order() {
    let acc = InMemoryDataAccessor::with_entities(vec![
        Named { id: 3, name: "same".into() },
        Named { id: 1, name: "same".into() },
        Named { id: 2, name: "other".into() },
    ])
    .unwrap();
    let cancel = CancellationToken::new();

    let ascending = acc
        .get_paginated(PageRequest::new(by_name()), &cancel)
        .await
        .unwrap();
    let ids: Vec<i32> = ascending.items.iter().map(|n| n.id).collect();
    assert_eq!(ids, vec![2, 3, 1]);

    let descending = acc
        .get_paginated(PageRequest::new(by_name()).descending(), &cancel)
        .await
        .unwrap();
    let ids: Vec<i32> = descending.items.iter().map(|n| n.id).collect();
    assert_eq!(ids, vec![3, 1, 2]);
}

#[tokio::test]
async fn repeated_queries_are_identical() {
    let acc = seeded(12);
    let cancel = CancellationToken::new();
    let request = || PageRequest::new(by_name()).descending().page_size(5).page(1);

    let a = acc.get_paginated(request(), &cancel).await.unwrap();
    let b = acc.get_paginated(request(), &cancel).await.unwrap();
    assert_eq!(a, b);
}

#[tokio::test]
async fn exists_agrees_with_total_count() {
    let acc = seeded(10);
    let cancel = CancellationToken::new();

    for threshold in [0, 5, 10, 11] {
        let exists = acc
            .exists(move |n: &Named| n.id > threshold, &cancel)
            .await
            .unwrap();
        let page = acc
            .get_paginated(
                PageRequest::<Named>::default()
                    .page_size(1)
                    .filter(move |n| n.id > threshold),
                &cancel,
            )
            .await
            .unwrap();
        assert_eq!(exists, page.total_count > 0);
    }
}
