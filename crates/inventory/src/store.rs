use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::Serialize;

use ephinv_core::{Aggregate, CatalogNumber, DomainError, DomainResult, Quantity};
use ephinv_events::{Event, Notification, NotificationSink, ToastBuffer};

use crate::record::Record;

/// Command: AddItem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddItem {
    pub name: String,
    /// Only consulted by quantity-tracking schemas; `None` means the form default.
    pub quantity: Option<i64>,
    pub occurred_at: DateTime<Utc>,
}

/// Command: RemoveItem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveItem<K> {
    pub id: K,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCommand<K> {
    AddItem(AddItem),
    RemoveItem(RemoveItem<K>),
}

/// Event: ItemAdded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemAdded<R> {
    pub record: R,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ItemRemoved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemRemoved<R> {
    pub record: R,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum StoreEvent<R> {
    ItemAdded(ItemAdded<R>),
    ItemRemoved(ItemRemoved<R>),
}

impl<R: Record> Event for StoreEvent<R> {
    fn event_type(&self) -> &'static str {
        match self {
            StoreEvent::ItemAdded(_) => "inventory.item.added",
            StoreEvent::ItemRemoved(_) => "inventory.item.removed",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            StoreEvent::ItemAdded(e) => e.occurred_at,
            StoreEvent::ItemRemoved(e) => e.occurred_at,
        }
    }
}

/// Ordered, in-memory list of records for one interaction cycle.
///
/// Invariants: names are unique, catalog numbers are unique, and every
/// tracked quantity is positive. Insertion order is preserved.
#[derive(Debug, Clone, PartialEq)]
pub struct Store<R: Record> {
    records: Vec<R>,
    toasts: ToastBuffer,
    version: u64,
}

impl<R: Record> Store<R> {
    /// Fresh store seeded from the literal snapshot.
    pub fn from_snapshot() -> Self {
        Self::unchecked(R::snapshot())
    }

    /// Store over caller-provided records (used for empty or custom seeds).
    ///
    /// Rejects record lists that break the store invariants: duplicate
    /// names, duplicate catalog numbers, or a quantity total beyond `u64`.
    pub fn from_records(records: Vec<R>) -> DomainResult<Self> {
        let mut names = HashSet::new();
        let mut numbers = HashSet::new();
        let mut total: u64 = 0;

        for record in &records {
            if !names.insert(record.name()) {
                return Err(DomainError::duplicate_name(record.name()));
            }
            if let Some(n) = record.catalog_number() {
                if !numbers.insert(n) {
                    return Err(DomainError::invalid_id(format!("duplicate catalog number {n}")));
                }
            }
            if let Some(q) = record.quantity() {
                total = total
                    .checked_add(q.units())
                    .ok_or(DomainError::Overflow("total quantity"))?;
            }
        }

        Ok(Self::unchecked(records))
    }

    fn unchecked(records: Vec<R>) -> Self {
        Self {
            records,
            toasts: ToastBuffer::new(),
            version: 0,
        }
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &R::Id) -> Option<&R> {
        self.records.iter().find(|r| r.id() == id)
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.records.iter().any(|r| r.name() == name)
    }

    /// Catalog number the next added record receives.
    ///
    /// `100001` when there is nothing to number from, otherwise one past the
    /// current maximum.
    pub fn next_index(&self) -> DomainResult<CatalogNumber> {
        match self.records.iter().filter_map(R::catalog_number).max() {
            None => Ok(CatalogNumber::FIRST),
            Some(max) => max
                .checked_next()
                .ok_or(DomainError::Overflow("catalog number")),
        }
    }

    /// Sum of all quantities; `None` for schemas that do not track quantity.
    pub fn total_quantity(&self) -> Option<u64> {
        R::TRACKS_QUANTITY.then(|| self.units())
    }

    // The total always fits: `from_records` and `decide_add` reject overflow.
    fn units(&self) -> u64 {
        self.records
            .iter()
            .filter_map(R::quantity)
            .fold(0, |acc, q| acc.saturating_add(q.units()))
    }

    /// Notifications emitted during this cycle so far.
    pub fn toasts(&self) -> &ToastBuffer {
        &self.toasts
    }

    pub(crate) fn toasts_mut(&mut self) -> &mut ToastBuffer {
        &mut self.toasts
    }

    /// Append a new record.
    ///
    /// Emits a notification describing the outcome. On failure the store is
    /// left untouched.
    pub fn add_item(&mut self, name: &str, quantity: Option<i64>) -> DomainResult<R> {
        let cmd = AddItem {
            name: name.to_string(),
            quantity,
            occurred_at: Utc::now(),
        };

        let outcome = self.decide_add(&cmd).map(|event| {
            let record = event.record.clone();
            self.apply(&StoreEvent::ItemAdded(event));
            record
        });

        let toast = match &outcome {
            Ok(record) => Notification::success(format!(
                "Added '{}' (only for this interaction, it will vanish on the next one).",
                record.name()
            )),
            Err(e) => failure_notification(e),
        };
        self.toasts.notify(toast);

        outcome
    }

    /// Remove the single record matching `id`.
    ///
    /// Emits a notification describing the outcome. On failure the store is
    /// left untouched.
    pub fn remove_item(&mut self, id: &R::Id) -> DomainResult<R> {
        let cmd = RemoveItem {
            id: id.clone(),
            occurred_at: Utc::now(),
        };

        let outcome = self.decide_remove(&cmd).map(|event| {
            let record = event.record.clone();
            self.apply(&StoreEvent::ItemRemoved(event));
            record
        });

        let toast = match &outcome {
            Ok(record) => Notification::success(format!(
                "Removed '{}' (only for this interaction, it will return on the next one).",
                record.name()
            )),
            Err(e) => failure_notification(e),
        };
        self.toasts.notify(toast);

        outcome
    }

    fn decide_add(&self, cmd: &AddItem) -> DomainResult<ItemAdded<R>> {
        let name = cmd.name.trim();
        if name.is_empty() {
            return Err(DomainError::EmptyName);
        }

        let quantity = match (R::TRACKS_QUANTITY, cmd.quantity) {
            (true, Some(raw)) => Quantity::new(raw)?,
            _ => Quantity::DEFAULT,
        };

        if self.contains_name(name) {
            return Err(DomainError::duplicate_name(name));
        }

        if R::TRACKS_QUANTITY && self.units().checked_add(quantity.units()).is_none() {
            return Err(DomainError::Overflow("total quantity"));
        }

        Ok(ItemAdded {
            record: R::build(self.next_index()?, name.to_string(), quantity),
            occurred_at: cmd.occurred_at,
        })
    }

    fn decide_remove(&self, cmd: &RemoveItem<R::Id>) -> DomainResult<ItemRemoved<R>> {
        let record = self
            .get(&cmd.id)
            .cloned()
            .ok_or_else(|| DomainError::not_found(&cmd.id))?;

        Ok(ItemRemoved {
            record,
            occurred_at: cmd.occurred_at,
        })
    }
}

impl<R: Record> Aggregate for Store<R> {
    type Command = StoreCommand<R::Id>;
    type Event = StoreEvent<R>;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            StoreEvent::ItemAdded(e) => {
                self.records.push(e.record.clone());
            }
            StoreEvent::ItemRemoved(e) => {
                let id = e.record.id();
                self.records.retain(|r| r.id() != id);
            }
        }

        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            StoreCommand::AddItem(cmd) => Ok(vec![StoreEvent::ItemAdded(self.decide_add(cmd)?)]),
            StoreCommand::RemoveItem(cmd) => {
                Ok(vec![StoreEvent::ItemRemoved(self.decide_remove(cmd)?)])
            }
        }
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Toast for a rejected operation. Duplicates are a warning; everything
/// else is an error.
fn failure_notification(err: &DomainError) -> Notification {
    match err {
        DomainError::DuplicateName(name) => {
            Notification::warning(format!("Item '{name}' is already on the list."))
        }
        DomainError::EmptyName => Notification::error("Item name cannot be empty."),
        DomainError::InvalidQuantity(q) => {
            Notification::error(format!("Quantity must be at least 1 (got {q})."))
        }
        DomainError::NotFound(id) => Notification::error(format!("Item '{id}' was not found.")),
        DomainError::InvalidId(msg) => Notification::error(format!("Invalid identifier: {msg}.")),
        DomainError::Overflow(what) => Notification::error(format!("Cannot add item: {what} out of range.")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{CatalogItem, NamedItem, StockedItem};
    use ephinv_events::NotificationLevel;

    fn last_level<R: Record>(store: &Store<R>) -> NotificationLevel {
        store.toasts().last().map(|n| n.level).unwrap()
    }

    fn stocked(catalog_number: u64, name: &str, units: i64) -> StockedItem {
        StockedItem {
            catalog_number: CatalogNumber::new(catalog_number),
            name: name.to_string(),
            quantity: Quantity::new(units).unwrap(),
        }
    }

    #[test]
    fn add_appends_with_next_catalog_number() {
        let mut store = Store::<CatalogItem>::from_snapshot();
        let added = store.add_item("Tablet", None).unwrap();

        assert_eq!(added.catalog_number, CatalogNumber::new(100_004));
        assert_eq!(store.len(), 4);
        assert_eq!(store.records().last(), Some(&added));
        assert_eq!(last_level(&store), NotificationLevel::Success);
        assert_eq!(store.version(), 1);
    }

    #[test]
    fn add_trims_the_name() {
        let mut store = Store::<NamedItem>::from_snapshot();
        let added = store.add_item("  Monitor ", None).unwrap();
        assert_eq!(added.name, "Monitor");
        assert!(store.contains_name("Monitor"));
    }

    #[test]
    fn add_rejects_blank_names() {
        let mut store = Store::<NamedItem>::from_snapshot();
        let before = store.records().to_vec();

        assert_eq!(store.add_item("   ", None), Err(DomainError::EmptyName));
        assert_eq!(store.records(), before.as_slice());
        assert_eq!(last_level(&store), NotificationLevel::Error);
        assert_eq!(store.version(), 0);
    }

    #[test]
    fn add_rejects_duplicates_as_warning() {
        let mut store = Store::<CatalogItem>::from_snapshot();

        assert_eq!(
            store.add_item("Phone", None),
            Err(DomainError::duplicate_name("Phone"))
        );
        assert_eq!(store.len(), 3);
        assert_eq!(last_level(&store), NotificationLevel::Warning);
    }

    #[test]
    fn duplicate_check_is_case_sensitive() {
        let mut store = Store::<NamedItem>::from_snapshot();
        assert!(store.add_item("phone", None).is_ok());
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn quantity_is_validated_only_when_tracked() {
        let mut stocked = Store::<StockedItem>::from_snapshot();
        assert_eq!(stocked.add_item("Tablet", Some(0)), Err(DomainError::InvalidQuantity(0)));
        assert_eq!(stocked.add_item("Tablet", Some(-1)), Err(DomainError::InvalidQuantity(-1)));
        assert_eq!(stocked.len(), 3);

        let added = stocked.add_item("Tablet", Some(1)).unwrap();
        assert_eq!(added.quantity, Quantity::DEFAULT);

        let mut catalog = Store::<CatalogItem>::from_snapshot();
        assert!(catalog.add_item("Tablet", Some(-5)).is_ok());
    }

    #[test]
    fn missing_quantity_defaults_to_one() {
        let mut store = Store::<StockedItem>::from_snapshot();
        let added = store.add_item("Tablet", None).unwrap();
        assert_eq!(added.quantity.units(), 1);
        assert_eq!(store.total_quantity(), Some(186));
    }

    #[test]
    fn empty_name_is_reported_before_invalid_quantity() {
        let mut store = Store::<StockedItem>::from_snapshot();
        assert_eq!(store.add_item("", Some(0)), Err(DomainError::EmptyName));
    }

    #[test]
    fn remove_by_catalog_number_preserves_order() {
        let mut store = Store::<StockedItem>::from_snapshot();
        let removed = store.remove_item(&CatalogNumber::new(100_002)).unwrap();

        assert_eq!(removed.name, "Phone");
        let names: Vec<_> = store.records().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Laptop", "Headset"]);
        assert_eq!(store.total_quantity(), Some(135));
    }

    #[test]
    fn remove_by_name_in_v1() {
        let mut store = Store::<NamedItem>::from_snapshot();
        store.remove_item(&"Laptop".to_string()).unwrap();
        assert!(!store.contains_name("Laptop"));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn remove_missing_name_in_v1_is_not_found() {
        let mut store = Store::<NamedItem>::from_snapshot();
        let before = store.records().to_vec();

        assert_eq!(
            store.remove_item(&"Nope".to_string()),
            Err(DomainError::not_found("Nope"))
        );
        assert_eq!(store.records(), before.as_slice());
        assert_eq!(store.version(), 0);
        assert_eq!(last_level(&store), NotificationLevel::Error);
    }

    #[test]
    fn remove_missing_is_not_found() {
        let mut store = Store::<CatalogItem>::from_snapshot();
        assert_eq!(
            store.remove_item(&CatalogNumber::new(999_999)),
            Err(DomainError::not_found("999999"))
        );
        assert_eq!(store.len(), 3);
        assert_eq!(last_level(&store), NotificationLevel::Error);
    }

    #[test]
    fn next_index_on_empty_store() {
        let store = Store::<CatalogItem>::from_records(Vec::new()).unwrap();
        assert_eq!(store.next_index(), Ok(CatalogNumber::FIRST));

        let mut store = Store::<StockedItem>::from_records(Vec::new()).unwrap();
        let added = store.add_item("Tablet", Some(3)).unwrap();
        assert_eq!(added.catalog_number, CatalogNumber::FIRST);
    }

    #[test]
    fn next_index_uses_max_not_last() {
        let store = Store::from_records(vec![
            CatalogItem {
                catalog_number: CatalogNumber::new(100_010),
                name: "A".into(),
            },
            CatalogItem {
                catalog_number: CatalogNumber::new(100_002),
                name: "B".into(),
            },
        ])
        .unwrap();
        assert_eq!(store.next_index(), Ok(CatalogNumber::new(100_011)));
    }

    #[test]
    fn exhausted_catalog_numbers_reject_the_add() {
        let mut store = Store::from_records(vec![CatalogItem {
            catalog_number: CatalogNumber::new(u64::MAX),
            name: "A".into(),
        }])
        .unwrap();

        assert_eq!(store.next_index(), Err(DomainError::Overflow("catalog number")));
        assert_eq!(store.add_item("B", None), Err(DomainError::Overflow("catalog number")));
        assert_eq!(store.len(), 1);
        assert_eq!(last_level(&store), NotificationLevel::Error);
    }

    #[test]
    fn quantity_total_never_overflows() {
        let max = i64::MAX;
        let err = Store::from_records(vec![
            stocked(100_001, "A", max),
            stocked(100_002, "B", max),
            stocked(100_003, "C", max),
        ])
        .unwrap_err();
        assert_eq!(err, DomainError::Overflow("total quantity"));

        let mut store =
            Store::from_records(vec![stocked(100_001, "A", max), stocked(100_002, "B", max)])
                .unwrap();
        assert_eq!(store.total_quantity(), Some(2 * max as u64));
        assert_eq!(
            store.add_item("C", Some(max)),
            Err(DomainError::Overflow("total quantity"))
        );
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn from_records_rejects_broken_invariants() {
        let dup_name = Store::from_records(vec![stocked(100_001, "A", 1), stocked(100_002, "A", 1)]);
        assert_eq!(dup_name.unwrap_err(), DomainError::duplicate_name("A"));

        let dup_number = Store::from_records(vec![stocked(100_001, "A", 1), stocked(100_001, "B", 1)]);
        assert!(matches!(dup_number, Err(DomainError::InvalidId(_))));
    }

    #[test]
    fn total_quantity_only_for_stocked_schema() {
        assert_eq!(Store::<StockedItem>::from_snapshot().total_quantity(), Some(185));
        assert_eq!(Store::<CatalogItem>::from_snapshot().total_quantity(), None);
        assert_eq!(Store::<NamedItem>::from_snapshot().total_quantity(), None);
    }

    #[test]
    fn handle_does_not_mutate_state() {
        let store = Store::<CatalogItem>::from_snapshot();
        let before = store.clone();

        let cmd = StoreCommand::AddItem(AddItem {
            name: "Tablet".into(),
            quantity: None,
            occurred_at: Utc::now(),
        });
        let events = store.handle(&cmd).unwrap();

        assert_eq!(store, before);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type(), "inventory.item.added");
    }

    #[test]
    fn apply_removed_event_drops_record() {
        let mut store = Store::<CatalogItem>::from_snapshot();
        let cmd = StoreCommand::RemoveItem(RemoveItem {
            id: CatalogNumber::new(100_001),
            occurred_at: Utc::now(),
        });

        let events = store.handle(&cmd).unwrap();
        for e in &events {
            store.apply(e);
        }

        assert!(store.get(&CatalogNumber::new(100_001)).is_none());
        assert_eq!(store.version(), 1);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;
        use proptest::sample::Index;

        const MAX_RECORDS: usize = 20;

        /// Valid v3 stores: unique names, unique catalog numbers (in any
        /// order), positive quantities. Includes the empty store.
        fn arb_stocked_store() -> impl Strategy<Value = Store<StockedItem>> {
            let items = prop::collection::btree_map(
                "[A-Za-z][A-Za-z0-9]{0,8}",
                1i64..1_000_000,
                0..MAX_RECORDS,
            );
            let numbers = prop::collection::btree_set(100_001u64..999_999, MAX_RECORDS)
                .prop_map(|set| set.into_iter().collect::<Vec<_>>())
                .prop_shuffle();

            (items, numbers).prop_map(|(items, numbers)| {
                let records = items
                    .into_iter()
                    .zip(numbers)
                    .map(|((name, units), n)| stocked(n, &name, units))
                    .collect();
                Store::from_records(records).unwrap()
            })
        }

        /// Valid v1 stores (unique names), including the empty store.
        fn arb_named_store() -> impl Strategy<Value = Store<NamedItem>> {
            prop::collection::btree_set("[A-Za-z][A-Za-z0-9]{0,8}", 0..MAX_RECORDS).prop_map(
                |names| {
                    let records = names.into_iter().map(|name| NamedItem { name }).collect();
                    Store::from_records(records).unwrap()
                },
            )
        }

        proptest! {
            /// Property: adding an absent name grows the store by one, at max + 1;
            /// adding it again is rejected and changes nothing.
            #[test]
            fn add_absent_name_grows_by_one(
                mut store in arb_stocked_store(),
                name in "[A-Za-z][A-Za-z0-9]{0,20}",
            ) {
                prop_assume!(!store.contains_name(&name));
                let before = store.len();
                let expected = store
                    .records()
                    .iter()
                    .map(|r| r.catalog_number.value() + 1)
                    .max()
                    .unwrap_or(100_001);

                let added = store.add_item(&name, None).unwrap();
                prop_assert_eq!(added.catalog_number, CatalogNumber::new(expected));
                prop_assert_eq!(store.len(), before + 1);
                prop_assert!(store.contains_name(&name));

                prop_assert_eq!(
                    store.add_item(&name, None),
                    Err(DomainError::duplicate_name(name.clone()))
                );
                prop_assert_eq!(store.len(), before + 1);
            }

            /// Property: next_index is exactly max + 1, or 100001 when empty.
            #[test]
            fn next_index_is_max_plus_one(store in arb_stocked_store()) {
                let next = store.next_index().unwrap();
                match store.records().iter().map(|r| r.catalog_number).max() {
                    Some(max) => {
                        prop_assert!(next > max);
                        prop_assert_eq!(next.value(), max.value() + 1);
                    }
                    None => prop_assert_eq!(next, CatalogNumber::FIRST),
                }
            }

            /// Property: removing a present id shrinks by one and keeps the
            /// relative order of the rest.
            #[test]
            fn remove_present_id(mut store in arb_stocked_store(), pick in any::<Index>()) {
                prop_assume!(!store.is_empty());
                let id = store.records()[pick.index(store.len())].catalog_number;
                let expected: Vec<_> = store
                    .records()
                    .iter()
                    .filter(|r| r.catalog_number != id)
                    .cloned()
                    .collect();

                store.remove_item(&id).unwrap();
                prop_assert_eq!(store.records(), expected.as_slice());
                prop_assert!(store.get(&id).is_none());
            }

            /// Property: removing an absent id is NotFound and leaves the store as is.
            #[test]
            fn remove_absent_id(mut store in arb_stocked_store(), absent in 1u64..100_001) {
                let before = store.records().to_vec();
                prop_assert_eq!(
                    store.remove_item(&CatalogNumber::new(absent)),
                    Err(DomainError::not_found(absent))
                );
                prop_assert_eq!(store.records(), before.as_slice());
            }

            /// Property: v1 removal by name, present and absent.
            #[test]
            fn remove_by_name(mut store in arb_named_store(), pick in any::<Index>()) {
                // Generated names never contain spaces.
                let before = store.records().to_vec();
                prop_assert_eq!(
                    store.remove_item(&"no such item".to_string()),
                    Err(DomainError::not_found("no such item"))
                );
                prop_assert_eq!(store.records(), before.as_slice());

                prop_assume!(!store.is_empty());
                let name = before[pick.index(before.len())].name.clone();
                store.remove_item(&name).unwrap();
                prop_assert_eq!(store.len(), before.len() - 1);
                prop_assert!(!store.contains_name(&name));
            }

            /// Property: positive quantities are accepted, non-positive rejected.
            #[test]
            fn quantity_sign_decides_outcome(mut store in arb_stocked_store(), q in -1_000i64..1_000) {
                let name = "Item With Space";
                let before = store.len();
                let result = store.add_item(name, Some(q));
                if q >= 1 {
                    prop_assert!(result.is_ok());
                    prop_assert_eq!(store.len(), before + 1);
                } else {
                    prop_assert_eq!(result, Err(DomainError::InvalidQuantity(q)));
                    prop_assert_eq!(store.len(), before);
                }
            }
        }
    }
}
