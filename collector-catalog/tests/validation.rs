use chrono::NaiveDate;
use collector_catalog::*;

fn jenny() -> NewItem {
    NewItem::new("United States", 1918, "24 cents", "Used")
        .description("Inverted Jenny airmail stamp")
        .price(Price::from_cents(15000))
}

#[test]
fn valid_item_passes() {
    assert_eq!(jenny().validate(), Ok(()));
}

#[test]
fn optional_fields_may_be_absent() {
    let item = NewItem::new("Japan", 1871, "48 mon", "Mint");
    assert_eq!(item.description, None);
    assert_eq!(item.acquisition_date, None);
    assert_eq!(item.price, None);
    assert!(item.validate().is_ok());
}

#[test]
fn blank_required_fields_are_rejected() {
    let mut item = jenny();
    item.country = "   ".to_string();
    assert_eq!(item.validate(), Err(ValidationError::EmptyField("country")));

    let mut item = jenny();
    item.denomination = String::new();
    assert_eq!(item.validate(), Err(ValidationError::EmptyField("denomination")));

    let mut item = jenny();
    item.condition = String::new();
    assert_eq!(item.validate(), Err(ValidationError::EmptyField("condition")));
}

#[test]
fn negative_price_is_rejected() {
    let item = jenny().price(Price::from_cents(-1));
    assert_eq!(
        item.validate(),
        Err(ValidationError::NegativePrice(Price::from_cents(-1)))
    );
}

#[test]
fn zero_price_is_allowed() {
    assert!(jenny().price(Price::ZERO).validate().is_ok());
}

#[test]
fn year_out_of_range_is_rejected() {
    let mut item = jenny();
    item.year = 0;
    assert_eq!(item.validate(), Err(ValidationError::YearOutOfRange(0)));
    item.year = 10_000;
    assert_eq!(item.validate(), Err(ValidationError::YearOutOfRange(10_000)));
}

#[test]
fn builder_sets_acquisition_date() {
    let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
    assert_eq!(jenny().acquired_on(date).acquisition_date, Some(date));
}

#[test]
fn catalog_entry_validation() {
    let entry = NewCatalogEntry::new("DE-1849-001", "Deutschland")
        .year(1849)
        .set_name("Bayern Schwarzer Einser");
    assert!(entry.validate().is_ok());

    assert_eq!(
        NewCatalogEntry::new("", "Deutschland").validate(),
        Err(ValidationError::EmptyField("catalog_number"))
    );
    assert_eq!(
        NewCatalogEntry::new("DE-1849-001", " ").validate(),
        Err(ValidationError::EmptyField("region"))
    );
    assert!(NewCatalogEntry::new("X", "Y").year(-5).validate().is_err());
}

#[test]
fn inventory_entry_validation() {
    assert!(NewInventoryEntry::new("GB-1840-001", "Postfrisch").validate().is_ok());
    assert_eq!(
        NewInventoryEntry::new("GB-1840-001", "").validate(),
        Err(ValidationError::EmptyField("condition"))
    );
}

#[test]
fn query_blank_strings_do_not_count() {
    let query = ItemQuery {
        text: Some("  ".to_string()),
        country: Some(String::new()),
        year: None,
        condition: None,
    };
    assert!(query.is_empty());
    assert!(!query.has_structured());

    assert!(ItemQuery::default().with_year(1840).has_structured());
    assert!(!ItemQuery::text("Penny").has_structured());
    assert!(!ItemQuery::text("Penny").is_empty());
}
