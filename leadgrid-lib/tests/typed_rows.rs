//! Tables over statically typed rows.

use std::borrow::Cow;

use chrono::DateTime;
use chrono::TimeZone;
use chrono::Utc;
use leadgrid_lib::export::ExportScope;
use leadgrid_lib::model::RowId;
use leadgrid_lib::model::Value;
use leadgrid_lib::table::Column;
use leadgrid_lib::table::ColumnKey;
use leadgrid_lib::table::FilterValue;
use leadgrid_lib::table::SortDirection;
use leadgrid_lib::table::TableConfig;
use leadgrid_lib::table::TableController;
use leadgrid_lib::table::TableRow;
use rust_decimal::Decimal;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum OrderField {
    Number,
    Customer,
    Total,
    PlacedAt,
    Status,
}

impl ColumnKey for OrderField {
    fn name(&self) -> &str {
        match self {
            OrderField::Number => "number",
            OrderField::Customer => "customer",
            OrderField::Total => "total",
            OrderField::PlacedAt => "placed_at",
            OrderField::Status => "status",
        }
    }
}

#[derive(Debug, Clone)]
struct Order {
    id: Uuid,
    number: i64,
    customer: String,
    total: Decimal,
    placed_at: DateTime<Utc>,
    status: Option<String>,
}

impl TableRow for Order {
    type Key = OrderField;

    fn id(&self) -> RowId {
        RowId::Guid(self.id)
    }

    fn value(&self, key: &OrderField) -> Cow<'_, Value> {
        Cow::Owned(match key {
            OrderField::Number => Value::Int(self.number),
            OrderField::Customer => Value::from(self.customer.as_str()),
            OrderField::Total => Value::Decimal(self.total),
            OrderField::PlacedAt => Value::DateTime(self.placed_at),
            OrderField::Status => Value::from(self.status.clone()),
        })
    }
}

fn orders() -> Vec<Order> {
    let day = |d: u32| Utc.with_ymd_and_hms(2024, 5, d, 9, 0, 0).unwrap();
    vec![
        Order {
            id: Uuid::new_v4(),
            number: 1001,
            customer: "acme".into(),
            total: Decimal::new(19_999, 2),
            placed_at: day(3),
            status: Some("paid".into()),
        },
        Order {
            id: Uuid::new_v4(),
            number: 1002,
            customer: "Globex".into(),
            total: Decimal::new(5_000, 2),
            placed_at: day(1),
            status: None,
        },
        Order {
            id: Uuid::new_v4(),
            number: 1003,
            customer: "Initech".into(),
            total: Decimal::new(120_000, 2),
            placed_at: day(2),
            status: Some("refunded".into()),
        },
    ]
}

fn columns() -> Vec<Column<Order>> {
    vec![
        Column::new(OrderField::Number, "#").sortable(),
        Column::new(OrderField::Customer, "Customer").sortable().searchable(),
        Column::new(OrderField::Total, "Total")
            .sortable()
            .render(|order: &Order| format!("${:.2}", order.total)),
        Column::new(OrderField::PlacedAt, "Placed").sortable(),
        Column::new(OrderField::Status, "Status").sortable(),
    ]
}

fn numbers(rows: &[&Order]) -> Vec<i64> {
    rows.iter().map(|order| order.number).collect()
}

#[test]
fn test_sorts_by_typed_values() {
    let mut table = TableController::new(orders(), columns(), TableConfig::default()).unwrap();

    table.set_sort(&OrderField::Total);
    assert_eq!(numbers(&table.page_rows()), vec![1002, 1001, 1003]);

    table.set_sort(&OrderField::PlacedAt);
    assert_eq!(numbers(&table.page_rows()), vec![1002, 1003, 1001]);

    table.set_sort(&OrderField::Customer);
    assert_eq!(numbers(&table.page_rows()), vec![1001, 1002, 1003]);

    // Nulls sort last ascending and first descending.
    table.set_sort(&OrderField::Status);
    assert_eq!(numbers(&table.page_rows()), vec![1001, 1003, 1002]);
    table.set_sort(&OrderField::Status);
    assert_eq!(numbers(&table.page_rows()), vec![1002, 1003, 1001]);
}

#[test]
fn test_filters_and_search_on_typed_rows() {
    let config = TableConfig::new().with_sort(OrderField::Number, SortDirection::Desc);
    let mut table = TableController::new(orders(), columns(), config).unwrap();

    table.set_filter(OrderField::Total, FilterValue::one(50i64));
    assert_eq!(numbers(&table.page_rows()), vec![1002]);

    table.clear_filters();
    table.set_search("INI");
    assert_eq!(numbers(&table.page_rows()), vec![1003]);
}

#[test]
fn test_selection_uses_row_ids() {
    let rows = orders();
    let target = rows[2].id;
    let mut table = TableController::new(rows, columns(), TableConfig::default()).unwrap();

    table.toggle_row_selected(RowId::Guid(target), true);
    table.set_page(1);
    table.set_page_size(25);
    assert_eq!(table.selected_ids(), vec![RowId::Guid(target)]);
    assert_eq!(numbers(&table.selected_rows()), vec![1003]);
}

#[test]
fn test_export_uses_renderers() {
    let table = TableController::new(orders(), columns(), TableConfig::default()).unwrap();
    let export = table.export_csv(ExportScope::CurrentPage).unwrap();

    assert_eq!(
        export.as_str(),
        Some(
            "#,Customer,Total,Placed,Status\n\
             1001,acme,$199.99,2024-05-03T09:00:00Z,paid\n\
             1002,Globex,$50.00,2024-05-01T09:00:00Z,\n\
             1003,Initech,$1200.00,2024-05-02T09:00:00Z,refunded\n"
        )
    );
}

#[test]
fn test_distinct_values_for_filter_options() {
    let table = TableController::new(orders(), columns(), TableConfig::default()).unwrap();
    assert_eq!(
        table.distinct_values(&OrderField::Status),
        vec![Value::from("paid"), Value::from("refunded")]
    );
}
