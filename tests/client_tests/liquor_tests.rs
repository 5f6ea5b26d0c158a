//! Liquor Catalogue Tests

use telegods::liquor::Catalogue;
use telegods::ClientError;

#[test]
fn test_parse_catalogue() {
    let json = r#"[
        ["l-1", "Old Tom Gin", "UK", 4, 12.5],
        ["l-2", "Pisco", "PE", 0, 30],
        3,
        "owner-uuid"
    ]"#;

    let catalogue = Catalogue::parse(json).unwrap();

    assert_eq!(catalogue.connected_users, 3);
    assert_eq!(catalogue.owner_uuid, "owner-uuid");
    assert_eq!(catalogue.liquors.len(), 2);

    let gin = catalogue.get("l-1").unwrap();
    assert_eq!(gin.commercial_name, "Old Tom Gin");
    assert_eq!(gin.origin, "UK");
    assert_eq!(gin.stock, 4);
    assert_eq!(gin.price, 12.5);

    assert_eq!(catalogue.get("l-2").unwrap().price, 30.0);
    assert!(catalogue.get("l-3").is_none());
}

#[test]
fn test_parse_empty_store() {
    let catalogue = Catalogue::parse(r#"[0, "owner"]"#).unwrap();
    assert!(catalogue.is_empty());
    assert_eq!(catalogue.connected_users, 0);
}

#[test]
fn test_parse_too_short() {
    assert!(matches!(
        Catalogue::parse(r#"["owner"]"#),
        Err(ClientError::Catalogue(_))
    ));
}

#[test]
fn test_parse_bad_trailer() {
    assert!(matches!(
        Catalogue::parse(r#"["x", 5]"#),
        Err(ClientError::Catalogue(_))
    ));
}

#[test]
fn test_parse_bad_row() {
    let result = Catalogue::parse(r#"[["l-1", "Gin"], 1, "owner"]"#);
    assert!(matches!(result, Err(ClientError::Json(_))));
}

#[test]
fn test_parse_not_json() {
    assert!(matches!(Catalogue::parse("OK"), Err(ClientError::Json(_))));
}
