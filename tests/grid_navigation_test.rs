//! Grid navigation scenarios through the public `Grid` API.

use std::collections::{HashSet, VecDeque};

use secretgrid::grid::navigation::NavigationState;
use secretgrid::grid::{filter, layout};
use secretgrid::{CellConstraints, Grid, Item, MatchMode};

/// Constraints that give a 3x2 grid on a 30x10 viewport.
fn three_by_two() -> CellConstraints {
    CellConstraints {
        min_cell_width: 10,
        max_cell_width: 10,
        cell_height: 4,
        spacing: 0,
    }
}

fn items(count: usize) -> Vec<Item> {
    (0..count)
        .map(|i| Item::new(format!("id-{i}"), format!("service/secret-{i:02}")))
        .collect()
}

fn grid_with(count: usize) -> Grid {
    let mut grid = Grid::new(three_by_two(), MatchMode::Substring);
    grid.resize(30, 10);
    grid.set_items(items(count));
    grid
}

#[test]
fn layout_matches_reference_viewport() {
    let shape = layout::compute(80, 20, &CellConstraints::default());
    assert_eq!((shape.columns, shape.rows, shape.cell_width), (2, 4, 39));

    let tiny = layout::compute(10, 10, &CellConstraints::default());
    assert_eq!((tiny.columns, tiny.cell_width), (1, 35));
    assert!(tiny.rows >= 1);
}

#[test]
fn twelve_items_span_two_screen_pages() {
    let mut grid = grid_with(12);
    assert_eq!(grid.shape().capacity(), 6);
    assert_eq!(grid.page_indicator(), (1, 2));

    assert!(grid.next_screen_page());
    assert_eq!(grid.page_indicator(), (2, 2));
    assert_eq!(grid.selected().map(|item| item.id.as_str()), Some("id-6"));
    assert_eq!(grid.visible_items().len(), 6);

    assert!(!grid.next_screen_page());
    assert!(grid.prev_screen_page());
    assert_eq!(grid.selected().map(|item| item.id.as_str()), Some("id-0"));
}

#[test]
fn moving_down_off_the_bottom_row_turns_the_page() {
    let mut grid = grid_with(12);
    assert!(grid.move_right());
    assert!(grid.move_down());
    assert_eq!(grid.selected().map(|item| item.id.as_str()), Some("id-4"));

    assert!(grid.move_down());
    assert_eq!(grid.navigation().screen_page, 1);
    assert_eq!(grid.selected().map(|item| item.id.as_str()), Some("id-7"));

    assert!(grid.move_up());
    assert_eq!(grid.navigation().screen_page, 0);
    assert_eq!(grid.selected().map(|item| item.id.as_str()), Some("id-4"));
}

#[test]
fn shorter_destination_page_keeps_column_without_selection() {
    // Page 1 holds only id-6 and id-7.
    let mut grid = grid_with(8);
    grid.move_right();
    grid.move_right();
    grid.move_down();
    assert!(grid.move_down());

    let nav = grid.navigation();
    assert_eq!((nav.screen_page, nav.cursor_row, nav.cursor_col), (1, 0, 2));
    assert!(grid.selected().is_none());

    assert!(grid.move_left());
    assert_eq!(grid.selected().map(|item| item.id.as_str()), Some("id-7"));
}

/// Explores every navigation state reachable from the origin of a 3x2 grid
/// over five items and checks the selection never points past the items.
#[test]
fn every_reachable_cursor_is_valid_or_empty() {
    let grid = grid_with(5);
    let item_count = grid.filtered_items().len();
    let shape = *grid.shape();

    let mut seen: HashSet<(usize, usize, usize)> = HashSet::new();
    let mut queue = VecDeque::from([*grid.navigation()]);
    let key = |nav: &NavigationState| (nav.cursor_row, nav.cursor_col, nav.screen_page);

    while let Some(nav) = queue.pop_front() {
        if !seen.insert(key(&nav)) {
            continue;
        }

        assert!(nav.cursor_row < shape.rows);
        assert!(nav.cursor_col < shape.columns);
        assert!(nav.screen_page < nav.total_screen_pages);
        if let Some(index) = nav.selected_index(&shape, item_count) {
            assert!(index < item_count, "index {index} past {item_count} items");
        }

        let moves: [fn(&mut NavigationState, &layout::GridShape, usize) -> bool; 6] = [
            |n, s, c| n.move_up(s, c),
            |n, s, c| n.move_down(s, c),
            |n, _, _| n.move_left(),
            |n, s, c| n.move_right(s, c),
            |n, _, _| n.next_screen_page(),
            |n, _, _| n.prev_screen_page(),
        ];
        for step in moves {
            let mut next = nav;
            step(&mut next, &shape, item_count);
            queue.push_back(next);
        }
    }

    // (0,0) (0,1) (0,2) (1,0) (1,1) on page 0; the empty (1,2) cell is never reached.
    assert!(!seen.contains(&(1, 2, 0)));
    assert_eq!(seen.len(), 5);
}

#[test]
fn queries_always_filter_the_full_item_set() {
    let mut grid = grid_with(12);
    grid.enter_filter_mode();
    for c in "secret-1".chars() {
        grid.push_query_char(c);
    }
    assert_eq!(grid.filtered_items().len(), 2);

    // Widening the query must bring back items the narrower query hid.
    grid.pop_query_char();
    assert_eq!(grid.filtered_items().len(), 12);
    assert_eq!(grid.filtered_items(), grid.items());

    let full = grid.items().to_vec();
    let narrowed = filter::apply(&full, "SECRET-0", MatchMode::Substring);
    assert_eq!(filter::apply(&full, "", MatchMode::Substring), full);
    assert_eq!(narrowed.len(), 10);
}

#[test]
fn query_change_resets_navigation() {
    let mut grid = grid_with(12);
    grid.next_screen_page();
    grid.move_right();

    grid.enter_filter_mode();
    grid.push_query_char('0');
    let nav = grid.navigation();
    assert_eq!((nav.cursor_row, nav.cursor_col, nav.screen_page), (0, 0, 0));
    assert_eq!(grid.page_indicator(), (1, 2));
}

#[test]
fn no_match_is_an_empty_grid_not_an_error() {
    let mut grid = grid_with(12);
    grid.set_query("zzz".to_string());
    assert!(grid.visible_items().is_empty());
    assert!(grid.selected().is_none());
    assert_eq!(grid.page_indicator(), (1, 1));
}

#[test]
fn resize_keeps_page_while_it_exists() {
    let mut grid = grid_with(12);
    grid.next_screen_page();
    grid.move_right();

    // Four rows: capacity 12, one screen page.
    grid.resize(30, 20);
    assert_eq!(grid.page_indicator(), (1, 1));
    assert_eq!(grid.navigation().screen_page, 0);

    // Back to 3x2: page 0 stays, and the cursor still points at an item.
    grid.resize(30, 10);
    assert_eq!(grid.page_indicator(), (1, 2));
    assert!(grid.selected().is_some());
}

#[test]
fn degenerate_viewport_still_navigates() {
    let mut grid = Grid::new(three_by_two(), MatchMode::Substring);
    grid.resize(0, 0);
    grid.set_items(items(3));
    assert_eq!(grid.shape().capacity(), 1);
    assert_eq!(grid.page_indicator(), (1, 3));
    assert!(grid.move_down());
    assert_eq!(grid.selected().map(|item| item.id.as_str()), Some("id-1"));
}
