use proptest::prelude::*;
use typed_frame::{Column, ColumnType, ElementType, Table, Value};

#[derive(Debug, Clone)]
enum Op {
    Add(Option<i32>, String),
    Insert(usize, Option<i32>, String),
    Remove(usize, usize),
    Flush,
    Clear,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (any::<Option<i32>>(), "[a-z]{0,3}").prop_map(|(n, s)| Op::Add(n, s)),
        3 => (any::<usize>(), any::<Option<i32>>(), "[a-z]{0,3}")
            .prop_map(|(at, n, s)| Op::Insert(at, n, s)),
        3 => (any::<usize>(), 0usize..5).prop_map(|(at, len)| Op::Remove(at, len)),
        1 => Just(Op::Flush),
        1 => Just(Op::Clear),
    ]
}

fn empty_table() -> Table {
    Table::from_columns([
        Column::new(ColumnType::nullable(ElementType::Int), 0).with_name("n"),
        Column::new(ColumnType::non_null(ElementType::String), 0).with_name("s"),
    ])
    .unwrap()
}

fn row(n: Option<i32>, s: &str) -> Vec<Value> {
    vec![Value::from(n), Value::from(s)]
}

fn int_table(values: &[i32]) -> Table {
    let ids: Vec<i64> = (0..values.len() as i64).collect();
    Table::from_columns([
        Column::from(ids).with_name("id"),
        Column::from(values.to_vec()).with_name("v"),
    ])
    .unwrap()
}

fn assert_consistent(table: &Table) -> Result<(), TestCaseError> {
    let capacity = table.capacity();
    prop_assert!(table.row_count() <= capacity);
    for column in table.columns() {
        prop_assert_eq!(column.capacity(), capacity);
        for slot in table.row_count()..capacity {
            prop_assert_eq!(column.get(slot).unwrap(), column.default_value());
        }
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        rng_seed: proptest::test_runner::RngSeed::Fixed(0),
        failure_persistence: None,
        .. ProptestConfig::default()
    })]

    #[test]
    fn mutations_keep_columns_in_lockstep(ops in proptest::collection::vec(op(), 0..64)) {
        let mut table = empty_table();
        let mut model: Vec<(Option<i32>, String)> = Vec::new();

        for op in ops {
            match op {
                Op::Add(n, s) => {
                    table.add_row(row(n, &s)).unwrap();
                    model.push((n, s));
                }
                Op::Insert(at, n, s) => {
                    let at = at % (model.len() + 1);
                    table.insert_row(at, row(n, &s)).unwrap();
                    model.insert(at, (n, s));
                }
                Op::Remove(at, len) => {
                    let from = at % (model.len() + 1);
                    let to = (from + len).min(model.len());
                    table.remove_rows(from, to).unwrap();
                    model.drain(from..to);
                }
                Op::Flush => {
                    table.flush();
                    prop_assert_eq!(table.capacity(), model.len());
                }
                Op::Clear => {
                    table.clear().unwrap();
                    model.clear();
                }
            }
            assert_consistent(&table)?;
            prop_assert_eq!(table.row_count(), model.len());
        }

        for (index, (n, s)) in model.iter().enumerate() {
            prop_assert_eq!(table.get_row(index).unwrap(), row(*n, s));
        }
    }

    #[test]
    fn added_columns_keep_slack_at_defaults(
        rows in 1usize..20,
        removed in 0usize..20,
        extra in proptest::collection::vec(any::<i64>(), 0..40),
    ) {
        let mut table = int_table(&vec![7; rows]);
        table.add_row(vec![Value::Long(rows as i64), Value::Int(7)]).unwrap();
        let removed = removed.min(table.row_count());
        table.remove_rows(0, removed).unwrap();

        let mut filled = extra;
        filled.resize(filled.len().max(table.row_count()), -1);
        table.add_column(Column::from(filled.clone()).with_name("added")).unwrap();
        assert_consistent(&table)?;

        let added = table.column("added").unwrap().values(table.row_count()).unwrap();
        let expected: Vec<Value> = filled[..table.row_count()].iter().map(|&v| Value::Long(v)).collect();
        prop_assert_eq!(added, expected);

        table.set_column("added", Column::from(filled)).unwrap();
        assert_consistent(&table)?;
    }

    #[test]
    fn removal_shrinks_lazily(len in 1usize..80, a in any::<usize>(), b in any::<usize>()) {
        let mut table = empty_table();
        for i in 0..len {
            table.add_row(row(Some(i as i32), "x")).unwrap();
        }
        let (from, to) = {
            let (x, y) = (a % (len + 1), b % (len + 1));
            (x.min(y), x.max(y))
        };
        let before = table.capacity();
        table.remove_rows(from, to).unwrap();

        let rows = len - (to - from);
        prop_assert_eq!(table.row_count(), rows);
        if to > from && rows * 3 < before {
            prop_assert_eq!(table.capacity(), rows + table.options().shrink_buffer);
        } else {
            prop_assert_eq!(table.capacity(), before);
        }
        assert_consistent(&table)?;
    }

    #[test]
    fn insert_then_remove_is_identity(
        values in proptest::collection::vec(any::<i32>(), 0..32),
        at in any::<usize>(),
        extra in any::<i32>(),
    ) {
        let original = int_table(&values);
        let mut table = original.clone();
        let at = at % (values.len() + 1);

        table.insert_row(at, vec![Value::Long(-1), Value::Int(extra)]).unwrap();
        prop_assert_eq!(table.row_count(), values.len() + 1);
        table.remove_row(at).unwrap();

        prop_assert!(table.content_eq(&original));
    }

    #[test]
    fn filter_and_exclude_partition_rows(
        values in proptest::collection::vec(-50i32..50, 0..64),
        pattern in prop::sample::select(vec!["-?[0-9]", "[1-3][0-9]", "-.*", "7|13|-2", ".*"]),
    ) {
        let table = int_table(&values);
        let kept = table.filter("v", pattern).unwrap();
        let mut rest = table.clone();
        rest.exclude("v", pattern).unwrap();

        prop_assert_eq!(kept.row_count() + rest.row_count(), table.row_count());
        prop_assert_eq!(kept.count("v", pattern).unwrap(), kept.row_count());
        prop_assert_eq!(rest.count("v", pattern).unwrap(), 0);

        let mut ids: Vec<Value> = kept.column("id").unwrap().values(kept.row_count()).unwrap();
        ids.extend(rest.column("id").unwrap().values(rest.row_count()).unwrap());
        ids.sort_by(Value::total_cmp);
        let all: Vec<Value> = (0..values.len() as i64).map(Value::Long).collect();
        prop_assert_eq!(ids, all);
    }

    #[test]
    fn lossless_conversions_round_trip(
        ints in proptest::collection::vec(any::<i32>(), 0..32),
        doubles in proptest::collection::vec(any::<f64>(), 0..32),
    ) {
        let int_column = Column::from(ints);
        let long = int_column.convert_to_type(ColumnType::non_null(ElementType::Long)).unwrap();
        let back = long.convert_to(int_column.type_code()).unwrap();
        prop_assert_eq!(&back, &int_column);

        let binary = int_column
            .convert_to_type(ColumnType::non_null(ElementType::Binary))
            .unwrap();
        let back = binary.convert_to(int_column.type_code()).unwrap();
        prop_assert_eq!(&back, &int_column);

        let double_column = Column::from(doubles);
        let binary = double_column
            .convert_to_type(ColumnType::nullable(ElementType::Binary))
            .unwrap();
        let back = binary.convert_to(double_column.type_code()).unwrap();
        prop_assert_eq!(&back, &double_column);
    }
}
