#![no_main]
use libfuzzer_sys::fuzz_target;
use table_engine::{Column, Columns, Row, TableController};

/// Fuzz dataset decoding and the filter/sort/click pipeline.
///
/// Arbitrary UTF-8 is parsed as a dataset; anything that decodes is run
/// through a controller with filters and sorts on fields that may be
/// missing or hold mixed types.
fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(rows) = table_engine::parse_dataset_str(s) else {
        return;
    };
    let Ok(columns) = Columns::new(vec![
        Column::new("a", "A").sortable(),
        Column::new("b", "B").sortable(),
    ]) else {
        return;
    };

    let mut table = TableController::builder(columns)
        .rows(rows)
        .expansion(|row: &Row| format!("{} fields", row.len()))
        .build();
    table.toggle_sort("a");
    table.set_filter("b", s.get(..2).unwrap_or(""));
    table.toggle_sort("a");
    table.click_row(0);
    let _ = table.view();
});
