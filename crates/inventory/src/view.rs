//! Derived, render-ready projections of a store.

use serde::Serialize;

use ephinv_events::Notification;

use crate::cycle::Variant;
use crate::record::Record;
use crate::store::Store;

/// Standing banner: nothing on this page is kept between interactions.
pub const RESET_NOTICE: &str = "Warning: this list is not saved. Every interaction \
(adding or removing an item) resets it to its initial state.";

/// Headline metric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metric {
    pub label: &'static str,
    pub value: u64,
    /// Secondary annotation shown under the value.
    pub annotation: Option<String>,
}

/// Column headers plus stringified rows, without a row-number column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    pub columns: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
}

/// One entry of the removal selection control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    /// Identifier submitted back on removal.
    pub key: String,
    pub label: String,
}

/// Everything a presentation layer needs for one rendering pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InventoryView {
    pub variant: Variant,
    pub record_count: usize,
    pub total_quantity: Option<u64>,
    pub metric: Metric,
    pub table: Table,
    pub options: Vec<SelectOption>,
    pub notifications: Vec<Notification>,
    /// Permanent warning shown above the page, independent of the outcome.
    pub notice: &'static str,
    /// No records: show "The list is empty." instead of metric and table.
    pub empty: bool,
}

impl InventoryView {
    /// Project the store and drain the notifications emitted this cycle.
    pub fn render<R: Record>(store: &mut Store<R>) -> Self {
        let record_count = store.len();
        let total_quantity = store.total_quantity();

        let metric = match total_quantity {
            Some(total) => Metric {
                label: "Total Quantity",
                value: total,
                annotation: Some(match record_count {
                    1 => "1 item".to_string(),
                    n => format!("{n} items"),
                }),
            },
            None => Metric {
                label: "Total Items",
                value: record_count as u64,
                annotation: None,
            },
        };

        let table = Table {
            columns: R::COLUMNS.to_vec(),
            rows: store.records().iter().map(R::row).collect(),
        };

        let options = store
            .records()
            .iter()
            .map(|r| SelectOption {
                key: r.id().to_string(),
                label: r.label(),
            })
            .collect();

        Self {
            variant: R::VARIANT,
            record_count,
            total_quantity,
            metric,
            table,
            options,
            notifications: store.toasts_mut().drain(),
            notice: RESET_NOTICE,
            empty: record_count == 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{CatalogItem, NamedItem, StockedItem};
    use ephinv_core::{CatalogNumber, Quantity};

    #[test]
    fn v3_metric_is_total_quantity_with_count_annotation() {
        let view = InventoryView::render(&mut Store::<StockedItem>::from_snapshot());

        assert_eq!(view.total_quantity, Some(185));
        assert_eq!(view.metric.value, 185);
        assert_eq!(view.metric.annotation.as_deref(), Some("3 items"));
        assert_eq!(view.table.columns, vec!["Catalog Number", "Item Name", "Quantity Units"]);
    }

    #[test]
    fn v1_and_v2_metric_is_record_count() {
        let v1 = InventoryView::render(&mut Store::<NamedItem>::from_snapshot());
        let v2 = InventoryView::render(&mut Store::<CatalogItem>::from_snapshot());

        assert_eq!(v1.metric.value, 3);
        assert_eq!(v2.metric.value, 3);
        assert_eq!(v2.total_quantity, None);
        assert_eq!(v1.options[0].key, "Laptop");
        assert_eq!(v2.options[0].key, "100001");
        assert_eq!(v2.options[0].label, "100001 - Laptop");
    }

    #[test]
    fn render_drains_notifications() {
        let mut store = Store::<CatalogItem>::from_snapshot();
        store.add_item("Tablet", None).unwrap();

        let view = InventoryView::render(&mut store);
        assert_eq!(view.notifications.len(), 1);
        assert!(store.toasts().is_empty());
    }

    #[test]
    fn empty_store_is_flagged() {
        let view = InventoryView::render(&mut Store::<NamedItem>::from_records(Vec::new()).unwrap());
        assert!(view.empty);
        assert!(view.table.rows.is_empty());
        assert!(view.options.is_empty());
        assert_eq!(view.notice, RESET_NOTICE);
    }

    #[test]
    fn annotation_uses_singular_for_one_record() {
        let mut store = Store::from_records(vec![StockedItem {
            catalog_number: CatalogNumber::FIRST,
            name: "Laptop".into(),
            quantity: Quantity::DEFAULT,
        }])
        .unwrap();
        let view = InventoryView::render(&mut store);
        assert_eq!(view.metric.annotation.as_deref(), Some("1 item"));

        let view = InventoryView::render(&mut Store::<StockedItem>::from_records(Vec::new()).unwrap());
        assert_eq!(view.metric.annotation.as_deref(), Some("0 items"));
    }

    #[test]
    fn every_view_carries_the_reset_notice() {
        for view in [
            InventoryView::render(&mut Store::<NamedItem>::from_snapshot()),
            InventoryView::render(&mut Store::<StockedItem>::from_snapshot()),
        ] {
            assert!(view.notice.contains("resets it to its initial state"));
        }
    }
}
