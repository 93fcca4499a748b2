//! Tests for the table engine: derivation, reconciliation and placeholders.

use folio_table::{
    CellValue, Column, Columns, EventResult, ProcessingMode, RenderInput, SortDescriptor,
    SortDirection, SortIndicator, TableEngine, TableEvent, TableOptions, TablePage, TableView,
};

#[derive(Debug, Clone, PartialEq)]
struct Order {
    id: u32,
    symbol: &'static str,
    price: f64,
}

const SYMBOLS: [&str; 4] = ["TSLA", "AAPL", "MSFT", "GOOGL"];

fn orders(n: u32) -> Vec<Order> {
    (1..=n)
        .map(|id| Order {
            id,
            symbol: SYMBOLS[(id as usize) % SYMBOLS.len()],
            price: f64::from(id) * 10.0,
        })
        .collect()
}

fn columns() -> Columns<Order> {
    Columns::new(vec![
        Column::new("id", "Order ID", |o: &Order| CellValue::from(o.id)).sortable(false),
        Column::new("symbol", "Symbol", |o: &Order| CellValue::from(o.symbol)),
        Column::new("price", "Price", |o: &Order| CellValue::from(o.price)),
    ])
    .unwrap()
}

fn client_table(page_size: usize) -> TableEngine<Order> {
    let options = TableOptions::default()
        .page_size(page_size)
        .sorting(ProcessingMode::ClientComputed)
        .pagination(ProcessingMode::ClientComputed);
    TableEngine::new(columns(), options)
}

fn ready<'a>(view: TableView<'a, Order>) -> TablePage<'a, Order> {
    match view {
        TableView::Ready(page) => page,
        other => panic!("expected a ready page, got {:?}", other),
    }
}

fn ids(page: &TablePage<'_, Order>) -> Vec<u32> {
    page.rows().iter().map(|o| o.id).collect()
}

// =============================================================================
// Client-computed pagination
// =============================================================================

#[test]
fn test_twelve_rows_two_pages() {
    let rows = orders(12);
    let mut table = client_table(10);

    let page = ready(table.render(&rows, &RenderInput::new()));
    assert_eq!(ids(&page), (1..=10).collect::<Vec<_>>());
    assert_eq!(page.page_count(), 2);
    assert_eq!(page.page_index(), 0);
    assert_eq!(page.total_items(), 12);
    assert!(!page.can_previous_page());
    assert!(page.can_next_page());

    assert_eq!(table.next_page(), EventResult::Consumed);
    assert_eq!(
        table.drain_events(),
        vec![TableEvent::PageChanged { page_index: 1 }]
    );

    let page = ready(table.render(&rows, &RenderInput::new()));
    assert_eq!(ids(&page), vec![11, 12]);
    assert_eq!(page.display_range(), Some((11, 12)));
    assert!(!page.can_next_page());

    assert_eq!(table.next_page(), EventResult::Ignored);
    assert!(table.drain_events().is_empty());
}

#[test]
fn test_same_page_twice_is_identical() {
    let rows = orders(25);
    let mut table = client_table(10);
    table.render(&rows, &RenderInput::new());
    table.set_page_index(1);

    let first = ids(&ready(table.render(&rows, &RenderInput::new())));
    assert_eq!(table.set_page_index(1), EventResult::Ignored);
    let second = ids(&ready(table.render(&rows, &RenderInput::new())));
    assert_eq!(first, second);
    assert_eq!(first, (11..=20).collect::<Vec<_>>());
}

#[test]
fn test_page_size_change_resets_to_first_page() {
    let rows = orders(45);
    let mut table = client_table(10);
    table.render(&rows, &RenderInput::new());

    table.set_page_index(2);
    table.drain_events();

    assert_eq!(table.set_page_size(20), EventResult::Consumed);
    assert_eq!(
        table.drain_events(),
        vec![
            TableEvent::PageSizeChanged { page_size: 20 },
            TableEvent::PageChanged { page_index: 0 },
        ]
    );
    assert_eq!(table.pagination().page_index(), 0);
    assert_eq!(table.pagination().page_size(), 20);

    let page = ready(table.render(&rows, &RenderInput::new()));
    assert_eq!(ids(&page), (1..=20).collect::<Vec<_>>());
    assert_eq!(page.page_count(), 3);
}

#[test]
fn test_zero_page_size_ignored() {
    let rows = orders(5);
    let mut table = client_table(10);
    table.render(&rows, &RenderInput::new());
    assert_eq!(table.set_page_size(0), EventResult::Ignored);
    assert_eq!(table.pagination().page_size(), 10);
}

#[test]
fn test_out_of_range_page_clamped_to_last() {
    let rows = orders(30);
    let mut table = client_table(10);
    table.render(&rows, &RenderInput::new());

    table.set_page_index(99);
    assert_eq!(
        table.drain_events(),
        vec![TableEvent::PageChanged { page_index: 2 }]
    );
    assert_eq!(ids(&ready(table.render(&rows, &RenderInput::new()))).len(), 10);
}

#[test]
fn test_shrinking_rows_clamps_page() {
    let rows = orders(30);
    let mut table = client_table(10);
    table.render(&rows, &RenderInput::new());
    table.last_page();

    let fewer = orders(12);
    let page = ready(table.render(&fewer, &RenderInput::new()));
    assert_eq!(page.page_index(), 1);
    assert_eq!(ids(&page), vec![11, 12]);
}

#[test]
fn test_pagination_disabled_shows_everything() {
    let rows = orders(25);
    let options = TableOptions::default()
        .pagination(ProcessingMode::ClientComputed)
        .enable_pagination(false);
    let mut table = TableEngine::new(columns(), options);

    let page = ready(table.render(&rows, &RenderInput::new()));
    assert_eq!(page.rows().len(), 25);
    assert_eq!(table.next_page(), EventResult::Ignored);
}

// =============================================================================
// Client-computed sorting
// =============================================================================

#[test]
fn test_toggle_price_three_times() {
    let rows = orders(5);
    let mut table = client_table(10);

    table.toggle_sort("price");
    assert_eq!(table.sort(), &SortDescriptor::Ascending("price".into()));
    table.toggle_sort("price");
    assert_eq!(table.sort(), &SortDescriptor::Descending("price".into()));
    table.toggle_sort("price");
    assert_eq!(table.sort(), &SortDescriptor::Unsorted);

    assert_eq!(
        table.drain_events(),
        vec![
            TableEvent::SortChanged {
                column: Some("price".into()),
                direction: Some(SortDirection::Asc),
            },
            TableEvent::SortChanged {
                column: Some("price".into()),
                direction: Some(SortDirection::Desc),
            },
            TableEvent::SortChanged {
                column: None,
                direction: None,
            },
        ]
    );

    let page = ready(table.render(&rows, &RenderInput::new()));
    assert_eq!(ids(&page), vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_sort_descending_then_page() {
    let rows = orders(12);
    let mut table = client_table(10);
    table.toggle_sort("price");
    table.toggle_sort("price");

    let page = ready(table.render(&rows, &RenderInput::new()));
    assert!(!page.rows().is_pass_through());
    assert_eq!(ids(&page), (3..=12).rev().collect::<Vec<_>>());

    table.next_page();
    let page = ready(table.render(&rows, &RenderInput::new()));
    assert_eq!(ids(&page), vec![2, 1]);
}

#[test]
fn test_sort_does_not_touch_input() {
    let rows = orders(8);
    let before = rows.clone();
    let mut table = client_table(10);
    table.toggle_sort("symbol");
    ready(table.render(&rows, &RenderInput::new()));
    assert_eq!(rows, before);
}

#[test]
fn test_sort_is_stable_across_cycles() {
    let rows = orders(12);
    let mut table = client_table(20);

    for _ in 0..3 {
        table.toggle_sort("symbol");
        let page = ready(table.render(&rows, &RenderInput::new()));
        let sorted: Vec<(&str, u32)> = page.rows().iter().map(|o| (o.symbol, o.id)).collect();
        // Within a symbol, ids stay in their original (ascending) order.
        for pair in sorted.windows(2) {
            if pair[0].0 == pair[1].0 {
                assert!(pair[0].1 < pair[1].1, "tie reordered: {:?}", pair);
            }
        }
        table.toggle_sort("symbol");
        table.toggle_sort("symbol");
        assert_eq!(table.sort(), &SortDescriptor::Unsorted);
    }
}

#[test]
fn test_descending_keeps_ties_in_input_order() {
    let rows = orders(8);
    let mut table = client_table(20);
    table.toggle_sort("symbol");
    table.toggle_sort("symbol");

    let page = ready(table.render(&rows, &RenderInput::new()));
    let sorted: Vec<(&str, u32)> = page.rows().iter().map(|o| (o.symbol, o.id)).collect();
    assert_eq!(
        sorted,
        vec![
            ("TSLA", 4),
            ("TSLA", 8),
            ("MSFT", 2),
            ("MSFT", 6),
            ("GOOGL", 3),
            ("GOOGL", 7),
            ("AAPL", 1),
            ("AAPL", 5),
        ]
    );
}

#[test]
fn test_switching_column_starts_ascending() {
    let mut table = client_table(10);
    table.toggle_sort("price");
    table.toggle_sort("price");
    table.toggle_sort("symbol");
    assert_eq!(table.sort(), &SortDescriptor::Ascending("symbol".into()));
}

#[test]
fn test_non_sortable_column_ignored() {
    let mut table = client_table(10);
    assert_eq!(table.toggle_sort("id"), EventResult::Ignored);
    assert_eq!(table.sort(), &SortDescriptor::Unsorted);
    assert!(table.drain_events().is_empty());
}

#[test]
fn test_unknown_column_ignored() {
    let mut table = client_table(10);
    assert_eq!(table.toggle_sort("nope"), EventResult::Ignored);
    assert!(table.pending_events().is_empty());
}

#[test]
fn test_sorting_disabled_ignores_toggles() {
    let options = TableOptions::default()
        .sorting(ProcessingMode::ClientComputed)
        .enable_sorting(false);
    let mut table = TableEngine::new(columns(), options);
    assert_eq!(table.toggle_sort("price"), EventResult::Ignored);
    assert!(table.headers().iter().all(|h| h.indicator.is_none()));
}

#[test]
fn test_panicking_accessor_sorts_lowest() {
    let columns = Columns::new(vec![Column::new("risky", "Risky", |o: &Order| {
        if o.id == 3 {
            panic!("bad row");
        }
        CellValue::from(o.price)
    })])
    .unwrap();
    let options = TableOptions::default()
        .sorting(ProcessingMode::ClientComputed)
        .pagination(ProcessingMode::ClientComputed);
    let mut table = TableEngine::new(columns, options);
    table.toggle_sort("risky");

    let rows = orders(5);
    let page = ready(table.render(&rows, &RenderInput::new()));
    assert_eq!(ids(&page), vec![3, 1, 2, 4, 5]);
    assert_eq!(table.resolve_row(&rows[2]), vec![CellValue::Missing]);
}

#[test]
fn test_headers_show_indicators() {
    let mut table = client_table(10);
    table.toggle_sort("price");
    let headers = table.headers();

    assert_eq!(headers[0].id, "id");
    assert_eq!(headers[0].indicator, None);
    assert_eq!(headers[1].indicator, Some(SortIndicator::Unsorted));
    assert_eq!(headers[2].indicator, Some(SortIndicator::Ascending));
    assert_eq!(SortIndicator::Ascending.symbol(), "↑");
}

// =============================================================================
// Delegated mode
// =============================================================================

#[test]
fn test_delegated_rows_pass_through_untouched() {
    let rows = orders(5);
    let mut table = TableEngine::new(columns(), TableOptions::default().page_size(5));

    table.toggle_sort("price");
    table.toggle_sort("price");
    assert_eq!(table.sort(), &SortDescriptor::Descending("price".into()));

    let input = RenderInput::new().total_items(42).current_page(3);
    let page = ready(table.render(&rows, &input));

    let slice = page.rows().as_slice().expect("pass-through rows");
    assert!(std::ptr::eq(slice, rows.as_slice()));
    assert_eq!(page.page_index(), 3);
    assert_eq!(page.page_count(), 9);
    assert_eq!(page.total_items(), 42);
    assert_eq!(page.display_range(), Some((16, 20)));
}

#[test]
fn test_delegated_navigation_emits_requests() {
    let rows = orders(10);
    let mut table = TableEngine::new(columns(), TableOptions::default());
    table.render(&rows, &RenderInput::new().total_items(35));

    assert_eq!(table.next_page(), EventResult::Consumed);
    assert_eq!(table.toggle_sort("symbol"), EventResult::Consumed);
    assert_eq!(
        table.drain_events(),
        vec![
            TableEvent::PageChanged { page_index: 1 },
            TableEvent::SortChanged {
                column: Some("symbol".into()),
                direction: Some(SortDirection::Asc),
            },
        ]
    );

    // The owner re-supplies its authoritative values on the next render.
    let input = RenderInput::new()
        .total_items(35)
        .current_page(1)
        .sort(SortDescriptor::Ascending("symbol".into()));
    let page = ready(table.render(&rows, &input));
    assert!(page.rows().is_pass_through());
    assert_eq!(ids(&page), (1..=10).collect::<Vec<_>>());
    assert_eq!(page.page_count(), 4);
}

#[test]
fn test_delegated_without_total_uses_lower_bound() {
    let rows = orders(10);
    let mut table = TableEngine::new(columns(), TableOptions::default());
    let page = ready(table.render(&rows, &RenderInput::new().current_page(2)));
    assert_eq!(page.total_items(), 30);
    assert_eq!(page.page_count(), 3);
}

#[test]
fn test_delegated_huge_page_without_total_does_not_overflow() {
    let rows = orders(10);
    let mut table = TableEngine::new(columns(), TableOptions::default());
    let page = ready(table.render(&rows, &RenderInput::new().current_page(usize::MAX / 2)));
    assert_eq!(page.total_items(), usize::MAX);
    assert_eq!(page.page_index(), usize::MAX / 2);

    let page = ready(table.render(&rows, &RenderInput::new().current_page(usize::MAX)));
    assert!(!page.can_next_page());
}

#[test]
fn test_zero_page_count_override_falls_back_to_computed() {
    let rows = orders(10);
    let mut table = TableEngine::new(columns(), TableOptions::default());
    let page = ready(table.render(&rows, &RenderInput::new().total_items(35).page_count(0)));
    assert_eq!(page.page_count(), 4);
    assert!(page.can_next_page());
}

#[test]
fn test_page_count_override() {
    let rows = orders(10);
    let mut table = TableEngine::new(columns(), TableOptions::default());
    let page = ready(table.render(&rows, &RenderInput::new().total_items(10).page_count(4)));
    assert_eq!(page.page_count(), 4);
    assert!(page.can_next_page());
}

// =============================================================================
// Placeholders and state
// =============================================================================

#[test]
fn test_loading_short_circuits() {
    let rows = orders(3);
    let mut table = client_table(10);
    assert!(table.render(&rows, &RenderInput::new().loading(true)).is_loading());
}

#[test]
fn test_page_survives_loading_render() {
    let rows = orders(30);
    let mut table = client_table(10);
    table.render(&rows, &RenderInput::new());
    assert_eq!(table.set_page_index(2), EventResult::Consumed);

    assert!(table.render(&[], &RenderInput::new().loading(true)).is_loading());
    assert_eq!(table.pagination().page_index(), 2);
    assert_eq!(table.pagination().total_items(), 30);

    let page = ready(table.render(&rows, &RenderInput::new()));
    assert_eq!(page.page_index(), 2);
    assert_eq!(ids(&page), (21..=30).collect::<Vec<_>>());
}

#[test]
fn test_empty_rows_render_empty() {
    let mut table = client_table(10);
    assert!(table.render(&[], &RenderInput::new()).is_empty());
    assert_eq!(table.pagination().page_count(), 0);
    assert_eq!(table.next_page(), EventResult::Ignored);
    assert_eq!(table.set_page_index(3), EventResult::Ignored);
}

#[test]
fn test_snapshot_and_restore() {
    let rows = orders(45);
    let mut table = client_table(10);
    table.render(&rows, &RenderInput::new());
    table.toggle_sort("price");
    table.set_page_index(2);
    let state = table.snapshot();

    let mut other = client_table(10);
    other.restore(state.clone());
    assert_eq!(other.snapshot(), state);
    assert!(other.pending_events().is_empty());

    let json = serde_json::to_string(&state).unwrap();
    let back: folio_table::TableState = serde_json::from_str(&json).unwrap();
    assert_eq!(back, state);
}

#[test]
fn test_options_deserialize_with_defaults() {
    let options: TableOptions =
        serde_json::from_str(r#"{ "page_size": 20, "sorting": "client_computed" }"#).unwrap();
    assert_eq!(options.page_size, 20);
    assert_eq!(options.sorting, ProcessingMode::ClientComputed);
    assert_eq!(options.pagination, ProcessingMode::Delegated);
    assert_eq!(options.page_size_options, vec![10, 20, 50]);
    assert!(options.enable_sorting);
}

#[test]
fn test_event_serialization() {
    let event = TableEvent::SortChanged {
        column: Some("price".into()),
        direction: Some(SortDirection::Desc),
    };
    assert_eq!(
        serde_json::to_string(&event).unwrap(),
        r#"{"type":"sort_changed","column":"price","direction":"desc"}"#
    );
}
