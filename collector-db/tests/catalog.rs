use collector_catalog::*;
use collector_db::*;

fn seeded() -> CatalogStore {
    let store = CatalogStore::open_memory().unwrap();
    store
        .add_catalog_entry(
            &NewCatalogEntry::new("DE-1849-001", "Deutschland")
                .year(1849)
                .set_name("Bayern Schwarzer Einser"),
        )
        .unwrap();
    store
        .add_catalog_entry(
            &NewCatalogEntry::new("GB-1840-001", "Großbritannien")
                .year(1840)
                .set_name("Penny Black"),
        )
        .unwrap();
    store
        .add_catalog_entry(
            &NewCatalogEntry::new("DE-1850-005", "Deutschland")
                .year(1850)
                .set_name("Preußen"),
        )
        .unwrap();

    store
        .add_inventory_entry(&NewInventoryEntry::new("DE-1849-001", "Gestempelt").variant("Type I"))
        .unwrap();
    store
        .add_inventory_entry(&NewInventoryEntry::new("GB-1840-001", "Postfrisch"))
        .unwrap();
    store
        .add_inventory_entry(&NewInventoryEntry::new("DE-1849-001", "Ungebraucht").variant("Type II"))
        .unwrap();
    store
}

#[test]
fn catalog_and_inventory_have_separate_sequences() {
    let store = CatalogStore::open_memory().unwrap();
    assert_eq!(
        store
            .add_catalog_entry(&NewCatalogEntry::new("A-1", "Austria"))
            .unwrap(),
        1
    );
    assert_eq!(
        store
            .add_inventory_entry(&NewInventoryEntry::new("A-1", "Used"))
            .unwrap(),
        1
    );
    assert_eq!(
        store
            .add_catalog_entry(&NewCatalogEntry::new("A-2", "Austria"))
            .unwrap(),
        2
    );
}

#[test]
fn duplicate_catalog_number_is_constraint_error() {
    let store = seeded();
    let err = store
        .add_catalog_entry(&NewCatalogEntry::new("DE-1849-001", "Bayern"))
        .unwrap_err();
    assert!(matches!(err, StoreError::Constraint(_)));
    assert_eq!(err.kind(), ErrorKind::Constraint);
    assert_eq!(store.list_catalog().unwrap().len(), 3);
}

#[test]
fn listings_are_newest_first() {
    let store = seeded();
    let catalog: Vec<i64> = store.list_catalog().unwrap().iter().map(|c| c.id).collect();
    assert_eq!(catalog, vec![3, 2, 1]);
    let inventory: Vec<i64> = store.list_inventory().unwrap().iter().map(|i| i.id).collect();
    assert_eq!(inventory, vec![3, 2, 1]);
}

#[test]
fn inventory_order_ignores_timestamps() {
    let store = seeded();
    store
        .connection()
        .unwrap()
        .execute(
            "UPDATE inventory SET created_at = '2000-01-01 00:00:00.000' WHERE id = 3",
            [],
        )
        .unwrap();

    let inventory: Vec<i64> = store.list_inventory().unwrap().iter().map(|i| i.id).collect();
    assert_eq!(inventory, vec![3, 2, 1]);
    let joined: Vec<i64> = store.joined_view().unwrap().iter().map(|j| j.inventory_id).collect();
    assert_eq!(joined, vec![3, 2, 1]);
}

#[test]
fn search_catalog_by_region_orders_by_year() {
    let store = seeded();
    let found = store
        .search_catalog(&CatalogQuery {
            region: Some("Deutschland".to_string()),
            ..CatalogQuery::default()
        })
        .unwrap();
    let numbers: Vec<&str> = found.iter().map(|c| c.catalog_number.as_str()).collect();
    assert_eq!(numbers, vec!["DE-1850-005", "DE-1849-001"]);
}

#[test]
fn search_catalog_conjunction() {
    let store = seeded();
    let found = store
        .search_catalog(&CatalogQuery {
            region: Some("Deutschland".to_string()),
            year: Some(1840),
            catalog_number: None,
        })
        .unwrap();
    assert!(found.is_empty());

    let all = store.search_catalog(&CatalogQuery::default()).unwrap();
    assert_eq!(all.len(), 3);
}

#[test]
fn search_inventory_by_catalog_number() {
    let store = seeded();
    let found = store
        .search_inventory(&InventoryQuery {
            catalog_number: Some("DE-1849-001".to_string()),
            condition: None,
        })
        .unwrap();
    assert_eq!(found.len(), 2);
    assert_eq!(found[0].variant.as_deref(), Some("Type II"));
    assert_eq!(found[1].variant.as_deref(), Some("Type I"));

    let found = store
        .search_inventory(&InventoryQuery {
            catalog_number: Some("DE-1849-001".to_string()),
            condition: Some("Gestempelt".to_string()),
        })
        .unwrap();
    assert_eq!(found.len(), 1);
}

#[test]
fn get_catalog_entry_by_number() {
    let store = seeded();
    let entry = store.get_catalog_entry("GB-1840-001").unwrap().unwrap();
    assert_eq!(entry.set_name.as_deref(), Some("Penny Black"));
    assert_eq!(store.get_catalog_entry("XX-0000-000").unwrap(), None);
}

#[test]
fn joined_view_fills_catalog_fields() {
    let store = seeded();
    let joined = store.joined_view().unwrap();
    assert_eq!(joined.len(), 3);

    assert_eq!(joined[0].inventory_id, 3);
    assert_eq!(joined[0].region.as_deref(), Some("Deutschland"));
    assert_eq!(joined[0].year, Some(1849));
    assert_eq!(joined[1].set_name.as_deref(), Some("Penny Black"));
}

#[test]
fn joined_view_tolerates_missing_catalog_entry() {
    let store = seeded();
    let id = store
        .add_inventory_entry(&NewInventoryEntry::new("CH-1843-001", "Gestempelt"))
        .unwrap();

    let joined = store.joined_view().unwrap();
    assert_eq!(joined.len(), 4);
    let orphan = &joined[0];
    assert_eq!(orphan.inventory_id, id);
    assert_eq!(orphan.catalog_number, "CH-1843-001");
    assert_eq!(orphan.region, None);
    assert_eq!(orphan.year, None);
    assert_eq!(orphan.set_name, None);
}

#[test]
fn statistics_group_region_and_condition() {
    let store = seeded();
    store
        .add_inventory_entry(&NewInventoryEntry::new("DE-1850-005", "Gestempelt"))
        .unwrap();

    let stats = store.statistics().unwrap();
    assert_eq!(stats.total_catalog, 3);
    assert_eq!(stats.total_inventory, 4);
    assert_eq!(stats.by_region[0].key, "Deutschland");
    assert_eq!(stats.by_region[0].count, 2);
    assert_eq!(stats.by_condition[0].key, "Gestempelt");
    assert_eq!(stats.by_condition[0].count, 2);

    let regions: i64 = stats.by_region.iter().map(|g| g.count).sum();
    let conditions: i64 = stats.by_condition.iter().map(|g| g.count).sum();
    assert_eq!(regions, stats.total_catalog);
    assert_eq!(conditions, stats.total_inventory);
}

#[test]
fn empty_catalog_statistics() {
    let store = CatalogStore::open_memory().unwrap();
    let stats = store.statistics().unwrap();
    assert_eq!(stats.total_catalog, 0);
    assert_eq!(stats.total_inventory, 0);
    assert!(stats.by_region.is_empty());
    assert!(store.joined_view().unwrap().is_empty());
}

#[test]
fn blank_inventory_fields_rejected() {
    let store = CatalogStore::open_memory().unwrap();
    let err = store
        .add_inventory_entry(&NewInventoryEntry::new(" ", "Used"))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(store.list_inventory().unwrap().is_empty());
}
