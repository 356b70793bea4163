use super::*;
use crate::input::columns::{BAT_KE, PELVIS_ROT};

#[test]
fn test_parse_lowercases_headers() {
    let table = parse_table("Frame,Pelvis_Rot,Bat_KE\n0,1.5,2\n1,2.5,3\n");
    assert_eq!(table.headers(), &["frame", "pelvis_rot", "bat_ke"]);
    assert_eq!(table.n_rows(), 2);
    assert_eq!(table.resolve(&PELVIS_ROT), Some(&[1.5, 2.5][..]));
    assert!(table.movement_ids().is_none());
}

#[test]
fn test_parse_strips_bom_and_names_blank_headers() {
    let table = parse_table("\u{feff}time,,bat_ke\n0,1,2\n");
    assert_eq!(table.headers(), &["time", "column_1", "bat_ke"]);
}

#[test]
fn test_non_numeric_cells_are_zero_and_counted() {
    let table = parse_table("a,b\n1,x\nNaN,2\n3,\n");
    assert_eq!(table.column("a"), Some(&[1.0, 0.0, 3.0][..]));
    assert_eq!(table.column("b"), Some(&[0.0, 2.0, 0.0][..]));
    assert_eq!(
        table.coerced_cells(),
        &[("a".to_string(), 1), ("b".to_string(), 2)]
    );
}

#[test]
fn test_short_rows_are_padded() {
    let table = parse_table("a,b,c\n1,2\n4,5,6\n");
    assert_eq!(table.n_rows(), 2);
    assert_eq!(table.column("c"), Some(&[0.0, 6.0][..]));
}

#[test]
fn test_blank_rows_skipped() {
    let table = parse_table("a,b\n1,2\n,\n3,4\n");
    assert_eq!(table.n_rows(), 2);
    assert_eq!(table.column("a"), Some(&[1.0, 3.0][..]));
}

#[test]
fn test_empty_payload() {
    let table = parse_table("");
    assert!(table.is_empty());
    assert!(table.headers().is_empty());
}

#[test]
fn test_movement_id_column_is_not_numeric() {
    let table = parse_table("movement_id,bat_ke\n1.0,5\n1,6\n2,7\n");
    assert_eq!(table.headers(), &["bat_ke"]);
    assert_eq!(
        table.movement_ids(),
        Some(&["1".to_string(), "1".to_string(), "2".to_string()][..])
    );
}

#[test]
fn test_partition_keeps_first_appearance_order() {
    let table = parse_table("swing_id,bat_ke\nb,1\na,2\nb,3\na,4\nc,5\n");
    let parts = table.partition().unwrap();
    let ids: Vec<&str> = parts.iter().map(|(id, _)| id.as_str()).collect();
    assert_eq!(ids, vec!["b", "a", "c"]);
    assert_eq!(parts[0].1.resolve(&BAT_KE), Some(&[1.0, 3.0][..]));
    assert_eq!(parts[1].1.resolve(&BAT_KE), Some(&[2.0, 4.0][..]));
    assert!(parts[0].1.movement_ids().is_none());
}

#[test]
fn test_partition_none_without_ids() {
    let table = MetricTable::from_columns(vec![("bat_ke", vec![1.0, 2.0])]);
    assert!(table.partition().is_none());
    let grouped = table.with_movement_ids(vec!["7".into(), "7.0".into()]);
    assert_eq!(grouped.partition().unwrap().len(), 1);
    assert!(grouped.ungrouped().movement_ids().is_none());
}

#[test]
fn test_from_columns_pads_to_longest() {
    let table = MetricTable::from_columns(vec![("A", vec![1.0]), ("b", vec![1.0, 2.0, 3.0])]);
    assert_eq!(table.n_rows(), 3);
    assert_eq!(table.column("a"), Some(&[1.0, 0.0, 0.0][..]));
}

#[test]
fn test_map_columns_selects_by_header() {
    let mut table =
        MetricTable::from_columns(vec![("x", vec![1.0, 2.0]), ("y", vec![1.0, 2.0])]);
    table.map_columns(
        |h, _| h == "y",
        |_, values| values.iter_mut().for_each(|v| *v *= 10.0),
    );
    assert_eq!(table.column("x"), Some(&[1.0, 2.0][..]));
    assert_eq!(table.column("y"), Some(&[10.0, 20.0][..]));
}

#[test]
fn test_replacement_characters_are_coerced() {
    let table = parse_table("time,pelvis_rot (\u{fffd})\n0,1\n0.004,\u{fffd}2\n");
    assert_eq!(table.headers(), &["time", "pelvis_rot (\u{fffd})"]);
    assert_eq!(table.resolve(&PELVIS_ROT), Some(&[1.0, 0.0][..]));
    assert_eq!(table.coerced_cells(), &[("pelvis_rot (\u{fffd})".to_string(), 1)]);
}
