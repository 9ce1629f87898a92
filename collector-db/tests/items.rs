use chrono::{Local, NaiveDate};
use collector_catalog::*;
use collector_db::*;

fn jenny() -> NewItem {
    NewItem::new("United States", 1918, "24 cents", "Used")
        .description("Inverted Jenny airmail stamp")
        .price("150.00".parse().unwrap())
}

fn penny_black() -> NewItem {
    NewItem::new("United Kingdom", 1840, "1 penny", "Mint")
        .description("Penny Black")
        .price("500.00".parse().unwrap())
}

#[test]
fn two_stamp_scenario() {
    let store = ItemStore::open_memory().unwrap();
    assert_eq!(store.insert(&jenny()).unwrap(), 1);
    assert_eq!(store.insert(&penny_black()).unwrap(), 2);

    let all = store.list_all().unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].id, 2);
    assert_eq!(all[0].country, "United Kingdom");
    assert_eq!(all[1].id, 1);
    assert_eq!(all[1].country, "United States");

    let stats = store.statistics().unwrap();
    assert_eq!(stats.total_items, 2);
    assert_eq!(stats.total_value, Price::from_cents(65000));
    assert_eq!(stats.average_value, Price::from_cents(32500));
}

#[test]
fn listing_follows_insert_order_when_clock_steps_back() {
    let store = ItemStore::open_memory().unwrap();
    store.insert(&jenny()).unwrap();
    store.insert(&penny_black()).unwrap();
    // The later row carries an earlier timestamp.
    store
        .connection()
        .unwrap()
        .execute(
            "UPDATE stamps SET created_at = '2000-01-01 00:00:00.000' WHERE id = 2",
            [],
        )
        .unwrap();

    let ids: Vec<i64> = store.list_all().unwrap().iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![2, 1]);

    let ids: Vec<i64> = store
        .search(&ItemQuery::text("penny"))
        .unwrap()
        .iter()
        .map(|s| s.id)
        .collect();
    assert_eq!(ids, vec![2]);
}

#[test]
fn fields_roundtrip() {
    let store = ItemStore::open_memory().unwrap();
    let date = NaiveDate::from_ymd_opt(2023, 11, 4).unwrap();
    let id = store.insert(&jenny().acquired_on(date)).unwrap();

    let item = store.get_by_id(id).unwrap().unwrap();
    assert_eq!(item.country, "United States");
    assert_eq!(item.year, 1918);
    assert_eq!(item.denomination, "24 cents");
    assert_eq!(item.condition, "Used");
    assert_eq!(item.description, "Inverted Jenny airmail stamp");
    assert_eq!(item.acquisition_date, date);
    assert_eq!(item.price, Some(Price::from_cents(15000)));
}

#[test]
fn defaults_applied_on_insert() {
    let store = ItemStore::open_memory().unwrap();
    let before = Local::now().date_naive();
    let id = store
        .insert(&NewItem::new("Japan", 1871, "48 mon", "Mint"))
        .unwrap();
    let after = Local::now().date_naive();

    let item = store.get_by_id(id).unwrap().unwrap();
    assert_eq!(item.description, "");
    assert_eq!(item.price, None);
    assert!(item.acquisition_date == before || item.acquisition_date == after);
}

#[test]
fn ids_strictly_increase() {
    let store = ItemStore::open_memory().unwrap();
    let mut last = 0;
    for year in 1900..1910 {
        let id = store
            .insert(&NewItem::new("France", year, "10c", "Used"))
            .unwrap();
        assert!(id > last);
        last = id;
    }
}

#[test]
fn ids_not_reused_after_external_delete() {
    let store = ItemStore::open_memory().unwrap();
    store.insert(&jenny()).unwrap();
    let second = store.insert(&penny_black()).unwrap();
    store
        .connection()
        .unwrap()
        .execute("DELETE FROM stamps WHERE id = ?1", [second])
        .unwrap();

    let third = store.insert(&penny_black()).unwrap();
    assert!(third > second);
}

#[test]
fn invalid_insert_leaves_no_row() {
    let store = ItemStore::open_memory().unwrap();
    let bad = NewItem::new("", 1918, "24 cents", "Used");
    let err = store.insert(&bad).unwrap_err();
    assert!(matches!(
        err,
        StoreError::Validation(ValidationError::EmptyField("country"))
    ));
    assert_eq!(err.kind(), ErrorKind::Validation);

    let negative = jenny().price(Price::from_cents(-100));
    assert_eq!(store.insert(&negative).unwrap_err().kind(), ErrorKind::Validation);

    assert!(store.list_all().unwrap().is_empty());
    // A rejected insert must not consume an id
    assert_eq!(store.insert(&jenny()).unwrap(), 1);
}

#[test]
fn empty_store_lists_nothing() {
    let store = ItemStore::open_memory().unwrap();
    assert!(store.list_all().unwrap().is_empty());
    assert!(store.search(&ItemQuery::default()).unwrap().is_empty());
}

#[test]
fn empty_store_statistics_are_zero() {
    let store = ItemStore::open_memory().unwrap();
    let stats = store.statistics().unwrap();
    assert_eq!(stats.total_items, 0);
    assert_eq!(stats.total_value, Price::ZERO);
    assert_eq!(stats.average_value, Price::ZERO);
    assert!(stats.by_country.is_empty());
}

#[test]
fn statistics_ignore_unpriced_stamps() {
    let store = ItemStore::open_memory().unwrap();
    store.insert(&jenny()).unwrap();
    store
        .insert(&NewItem::new("United States", 1869, "3 cents", "Used"))
        .unwrap();
    store.insert(&penny_black()).unwrap();

    let stats = store.statistics().unwrap();
    assert_eq!(stats.total_items, 3);
    assert_eq!(stats.total_value, Price::from_cents(65000));
    assert_eq!(stats.average_value, Price::from_cents(32500));
}

#[test]
fn statistics_group_by_country() {
    let store = ItemStore::open_memory().unwrap();
    store.insert(&penny_black()).unwrap();
    store.insert(&jenny()).unwrap();
    store.insert(&jenny()).unwrap();
    store.insert(&NewItem::new("Canada", 1851, "3d", "Used")).unwrap();

    let stats = store.statistics().unwrap();
    let groups: Vec<(&str, i64)> = stats
        .by_country
        .iter()
        .map(|g| (g.key.as_str(), g.count))
        .collect();
    assert_eq!(
        groups,
        vec![("United States", 2), ("Canada", 1), ("United Kingdom", 1)]
    );

    let grouped: i64 = stats.by_country.iter().map(|g| g.count).sum();
    assert_eq!(grouped, stats.total_items);
    assert_eq!(stats.total_items as usize, store.list_all().unwrap().len());
}

#[test]
fn get_by_id_missing_is_none() {
    let store = ItemStore::open_memory().unwrap();
    store.insert(&jenny()).unwrap();
    assert_eq!(store.get_by_id(42).unwrap(), None);

    let err = store.require(42).unwrap_err();
    assert!(matches!(err, StoreError::NotFound { entity: "stamp", .. }));
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(store.require(1).unwrap().country, "United States");
}

// ── Search ──────────────────────────────────────────────────────────────────

fn seeded() -> ItemStore {
    let store = ItemStore::open_memory().unwrap();
    store.insert(&jenny()).unwrap();
    store.insert(&penny_black()).unwrap();
    store
        .insert(&NewItem::new("United Kingdom", 1841, "2 pence", "Used").description("Two Penny Blue"))
        .unwrap();
    store
        .insert(&NewItem::new("Mauritius", 1847, "1 penny", "Mint").description("Post Office 100%"))
        .unwrap();
    store
}

#[test]
fn empty_query_matches_list_all() {
    let store = seeded();
    let all = store.list_all().unwrap();
    let found = store.search(&ItemQuery::default()).unwrap();
    assert_eq!(found, all);
}

#[test]
fn text_search_matches_country_or_description() {
    let store = seeded();

    let by_country = store.search(&ItemQuery::text("Kingdom")).unwrap();
    assert_eq!(by_country.len(), 2);
    // Newest first for free-text search
    assert!(by_country[0].id > by_country[1].id);

    let by_description = store.search(&ItemQuery::text("Jenny")).unwrap();
    assert_eq!(by_description.len(), 1);
    assert_eq!(by_description[0].country, "United States");

    let either = store.search(&ItemQuery::text("Penny")).unwrap();
    assert_eq!(either.len(), 2);
}

#[test]
fn text_search_is_ascii_case_insensitive() {
    let store = seeded();
    assert_eq!(store.search(&ItemQuery::text("penny black")).unwrap().len(), 1);
}

#[test]
fn like_wildcards_are_literal() {
    let store = seeded();
    let found = store.search(&ItemQuery::text("100%")).unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].country, "Mauritius");
    assert!(store.search(&ItemQuery::text("_")).unwrap().is_empty());
    assert!(store.search(&ItemQuery::text("%")).unwrap().len() == 1);
}

#[test]
fn structured_search_orders_by_year() {
    let store = seeded();
    let found = store
        .search(&ItemQuery::default().with_country("United Kingdom"))
        .unwrap();
    let years: Vec<i32> = found.iter().map(|i| i.year).collect();
    assert_eq!(years, vec![1841, 1840]);
}

#[test]
fn criteria_are_conjunctive() {
    let store = seeded();
    let found = store
        .search(
            &ItemQuery::default()
                .with_country("United Kingdom")
                .with_condition("Mint"),
        )
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].description, "Penny Black");

    let found = store
        .search(&ItemQuery::text("Penny").with_year(1841))
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].denomination, "2 pence");
}

#[test]
fn exact_match_is_not_substring() {
    let store = seeded();
    assert!(store
        .search(&ItemQuery::default().with_country("United"))
        .unwrap()
        .is_empty());
}

#[test]
fn no_match_is_empty_not_error() {
    let store = seeded();
    assert!(store.search(&ItemQuery::text("Zanzibar")).unwrap().is_empty());
    assert!(store
        .search(&ItemQuery::default().with_year(2099))
        .unwrap()
        .is_empty());
}
