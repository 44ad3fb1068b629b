use pretty_assertions::assert_eq;
use typed_frame::{
    join, merge, Aggregate, Column, ColumnInfo, ColumnRegistry, ColumnType, ElementType,
    FrameError, Table, TypeCode, Value,
};

fn ids_and_names() -> Table {
    let registry = ColumnRegistry::standard();
    Table::from_types(
        &registry,
        [("id", TypeCode::new(3)), ("name", TypeCode::new(5))],
    )
    .unwrap()
}

fn rows(table: &Table) -> Vec<Vec<Value>> {
    (0..table.row_count())
        .map(|row| table.get_row(row).unwrap())
        .collect()
}

#[test]
fn add_insert_remove_rows() {
    let mut table = ids_and_names();
    table.add_row(vec![Value::Int(1), Value::from("a")]).unwrap();
    table.add_row(vec![Value::Int(2), Value::from("b")]).unwrap();
    table
        .insert_row(1, vec![Value::Int(3), Value::from("c")])
        .unwrap();
    assert_eq!(
        rows(&table),
        vec![
            vec![Value::Int(1), Value::from("a")],
            vec![Value::Int(3), Value::from("c")],
            vec![Value::Int(2), Value::from("b")],
        ]
    );

    table.remove_row(0).unwrap();
    assert_eq!(
        rows(&table),
        vec![
            vec![Value::Int(3), Value::from("c")],
            vec![Value::Int(2), Value::from("b")],
        ]
    );
    assert_eq!(table.row_count(), 2);
}

#[test]
fn out_of_range_rows_and_columns_fail() {
    let mut table = ids_and_names();
    table.add_row(vec![Value::Int(1), Value::from("a")]).unwrap();

    assert_eq!(
        table.get(0, 1).unwrap_err(),
        FrameError::RowOutOfBounds { index: 1, rows: 1 }
    );
    assert_eq!(
        table.get(2, 0).unwrap_err(),
        FrameError::ColumnOutOfBounds {
            index: 2,
            columns: 2
        }
    );
    assert_eq!(
        table.remove_rows(0, 2).unwrap_err(),
        FrameError::InvalidRange {
            from: 0,
            to: 2,
            rows: 1
        }
    );
    assert_eq!(
        table.get("missing", 0).unwrap_err(),
        FrameError::UnknownColumn("missing".to_owned())
    );
}

#[test]
fn group_by_sum() {
    let table = Table::from_columns([
        Column::from(vec![1i32, 1, 2]).with_name("k"),
        Column::from(vec![5i32, 3, 10]).with_name("v"),
    ])
    .unwrap();

    let grouped = table.group_by("k", Aggregate::Sum).unwrap();
    assert_eq!(
        rows(&grouped),
        vec![
            vec![Value::Int(1), Value::Long(8)],
            vec![Value::Int(2), Value::Long(10)],
        ]
    );
}

#[test]
fn double_binary_round_trip_is_exact() {
    let column = Column::from(vec![1.5f64, -2.0]);
    let binary = column.convert_to(TypeCode::new(19)).unwrap();
    assert_eq!(
        binary.get(0).unwrap(),
        Value::Binary(1.5f64.to_bits().to_be_bytes().to_vec())
    );
    let back = binary.convert_to(TypeCode::new(7)).unwrap();
    assert_eq!(
        back.values(2).unwrap(),
        vec![Value::Double(1.5), Value::Double(-2.0)]
    );
}

#[test]
fn unparsable_text_fails_conversion() {
    let column = Column::from(vec!["12", "x"]);
    let err = column
        .convert_to_type(ColumnType::non_null(ElementType::Int))
        .unwrap_err();
    assert_eq!(
        err,
        FrameError::Conversion {
            from: ColumnType::non_null(ElementType::String),
            to: ColumnType::non_null(ElementType::Int),
            value: "x".to_owned(),
        }
    );
}

#[test]
fn converting_a_grown_column_leaves_slack_at_defaults() {
    let mut table = ids_and_names();
    for (id, text) in [(1, "10"), (2, "20"), (3, "30")] {
        table.add_row(vec![Value::Int(id), Value::from(text)]).unwrap();
    }
    assert_eq!(table.capacity(), 4);

    let numbers = table.column("name").unwrap().convert_to(TypeCode::new(3)).unwrap();
    assert_eq!(
        numbers.values(4).unwrap(),
        vec![Value::Int(10), Value::Int(20), Value::Int(30), Value::Int(0)]
    );
    table.set_column("name", numbers).unwrap();
    assert_eq!(
        table.get_row(2).unwrap(),
        vec![Value::Int(3), Value::Int(30)]
    );

    let mut blobs = Table::from_columns([
        Column::new(ColumnType::non_null(ElementType::Binary), 0).with_name("b"),
    ])
    .unwrap();
    for n in 1u8..=3 {
        blobs.add_row(vec![Value::Binary(vec![0, 0, 0, n])]).unwrap();
    }
    let ints = blobs.column("b").unwrap().convert_to(TypeCode::new(3)).unwrap();
    assert_eq!(
        ints.values(4).unwrap(),
        vec![Value::Int(1), Value::Int(2), Value::Int(3), Value::Int(0)]
    );
}

#[test]
fn join_of_single_rows_is_one_row() {
    let left = Table::from_columns([
        Column::from(vec![7i32]).with_name("id"),
        Column::from(vec!["left"]).with_name("label"),
    ])
    .unwrap();
    let right = Table::from_columns([
        Column::from(vec![7i32]).with_name("owner"),
        Column::from(vec![2.5f64]).with_name("amount"),
    ])
    .unwrap();

    let joined = join(&left, "id", &right, "owner").unwrap();
    assert_eq!(
        rows(&joined),
        vec![vec![Value::Int(7), Value::from("left"), Value::Double(2.5)]]
    );
    assert_eq!(
        joined.column_names(),
        vec![Some("id"), Some("label"), Some("amount")]
    );
}

#[test]
fn join_fans_out_duplicate_keys() {
    let left = Table::from_columns([Column::from(vec!["a", "b", "a"]).with_name("k")]).unwrap();
    let right = Table::from_columns([
        Column::from(vec![Some("a"), None, Some("a")]).with_name("k2"),
        Column::from(vec![1i8, 2, 3]).with_name("n"),
    ])
    .unwrap();

    let joined = join(&left, 0, &right, 0).unwrap();
    assert_eq!(
        rows(&joined),
        vec![
            vec![Value::from("a"), Value::Byte(1)],
            vec![Value::from("a"), Value::Byte(3)],
            vec![Value::from("a"), Value::Byte(1)],
            vec![Value::from("a"), Value::Byte(3)],
        ]
    );
}

#[test]
fn merge_aliases_input_buffers() {
    let mut left = Table::from_columns([Column::from(vec![1i32, 2]).with_name("x")]).unwrap();
    let mut right = Table::from_columns([Column::from(vec![3i32, 4]).with_name("x")]).unwrap();

    let mut merged = merge([&mut left, &mut right]).unwrap();
    assert_eq!(merged.column_names(), vec![Some("x_1"), Some("x_2")]);

    merged.set("x_1", 1, Value::Int(20)).unwrap();
    assert_eq!(left.get("x", 1).unwrap(), Value::Int(20));

    let mut independent = left.clone();
    independent.set("x", 0, Value::Int(-1)).unwrap();
    assert_eq!(merged.get(0, 0).unwrap(), Value::Int(1));
}

#[test]
fn describe_serializes_for_external_encoders() {
    let mut table = ids_and_names();
    table.add_row(vec![Value::Int(1), Value::from("a")]).unwrap();

    let json = serde_json::to_value(table.describe()).unwrap();
    assert_eq!(
        json,
        serde_json::json!([
            {"name": "id", "type_code": 3, "capacity": 2, "row_count": 1},
            {"name": "name", "type_code": 5, "capacity": 2, "row_count": 1},
        ])
    );

    let decoded: Vec<ColumnInfo> = serde_json::from_value(json).unwrap();
    let registry = ColumnRegistry::standard();
    let rebuilt = decoded
        .iter()
        .map(|info| {
            let name = info.name.clone().unwrap_or_default();
            registry.create_named(name, info.type_code, info.capacity)
        })
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    assert_eq!(rebuilt[1].column_type(), ColumnType::non_null(ElementType::String));
    assert_eq!(rebuilt[1].capacity(), 2);
}

#[test]
fn sort_and_slice() {
    let mut table = Table::from_columns([
        Column::from(vec![3i32, 1, 2]).with_name("n"),
        Column::from(vec!['c', 'a', 'b']).with_name("c"),
    ])
    .unwrap();
    table.sort_by("n", false).unwrap();

    let head = table.get_rows(0, 2).unwrap();
    assert_eq!(
        rows(&head),
        vec![
            vec![Value::Int(1), Value::Char('a')],
            vec![Value::Int(2), Value::Char('b')],
        ]
    );
    assert!(head.like().is_empty());
    assert_eq!(head.like().column_names(), vec![Some("n"), Some("c")]);
}

#[test]
fn column_management_keeps_names_in_sync() {
    let mut table = Table::new();
    table.add_column(Column::of_code(TypeCode::new(12), 3).unwrap()).unwrap();
    assert_eq!(table.row_count(), 3);
    assert!(!table.has_column_names());
    assert_eq!(table.get(0, 2).unwrap(), Value::Null);

    table
        .add_column(Column::from(vec!["p", "q", "r", "s"]))
        .unwrap();
    assert_eq!(table.columns()[1].capacity(), 3);

    table.set_column_names(["count", "tag"]).unwrap();
    assert_eq!(
        table.set_column_names(["only"]).unwrap_err(),
        FrameError::NameCountMismatch {
            expected: 2,
            actual: 1
        }
    );
    table.set_column_name("tag", "label").unwrap();
    assert!(table.has_column("label"));
    assert!(!table.has_column("tag"));

    let too_short = Column::from(vec![1i64]);
    assert_eq!(
        table.add_column(too_short).unwrap_err(),
        FrameError::CapacityMismatch {
            expected: 3,
            actual: 1
        }
    );

    table.remove_column_names();
    assert_eq!(table.column_names(), vec![None, None]);
    assert_eq!(table.column_index("label").unwrap_err(), FrameError::NoColumnNames);
}
