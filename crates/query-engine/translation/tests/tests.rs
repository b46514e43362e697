mod common;

use query_engine_sql::sql;
use query_engine_translation::translation::error::Error;
use similar_asserts::assert_eq;

#[test]
fn select_source() {
    let result = common::test_translation("select_source").unwrap();
    insta::assert_snapshot!(result, @r"
    read
    SELECT DISTINCT p.id AS product_id, p.name AS product_name, p.released AS product_released, s.id AS supplier_id, s.name AS supplier_name FROM products p LEFT JOIN suppliers s ON p.main_supplier = s.id WHERE  p.discontinued = 0 ;
    ");
}

#[test]
fn order_by_nested_member() {
    let result = common::test_translation("order_by_nested_member").unwrap();
    insta::assert_snapshot!(result, @r"
    read
    SELECT DISTINCT p.id AS product_id, p.name AS product_name, p.released AS product_released, s.id AS supplier_id, s.name AS supplier_name FROM products p LEFT JOIN suppliers s ON p.main_supplier = s.id WHERE  p.discontinued = 0  ORDER BY supplier_name, LOWER(product_name);
    ");
}

#[test]
fn skip_take() {
    let result = common::test_translation("skip_take").unwrap();
    insta::assert_snapshot!(result, @r"
    read
    SELECT DISTINCT p.id AS product_id, p.name AS product_name, p.released AS product_released, s.id AS supplier_id, s.name AS supplier_name FROM products p LEFT JOIN suppliers s ON p.main_supplier = s.id WHERE  p.discontinued = 0  ORDER BY product_id LIMIT 20, 10;
    ");
}

#[test]
fn count() {
    let result = common::test_translation("count").unwrap();
    insta::assert_snapshot!(result, @r"
    aggregate > read
    SELECT COUNT(*) AS numrows FROM products p LEFT JOIN suppliers s ON p.main_supplier = s.id WHERE  p.discontinued = 0 ;
    ");
}

#[test]
fn cast_take() {
    let result = common::test_translation("cast_take").unwrap();
    insta::assert_snapshot!(result, @r"
    cast > read
    SELECT DISTINCT p.id AS product_id, p.name AS product_name, p.released AS product_released, s.id AS supplier_id, s.name AS supplier_name FROM products p LEFT JOIN suppliers s ON p.main_supplier = s.id WHERE  p.discontinued = 0  LIMIT 5;
    ");
}

#[test]
fn count_cast() {
    let result = common::test_translation("count_cast").unwrap();
    assert_eq!(result, common::test_translation("count").unwrap());
}

#[test]
fn element_at() {
    let result = common::test_translation("element_at").unwrap();
    insta::assert_snapshot!(result, @r"
    element at
    <no statement>
    ");
}

#[test]
fn take_variable() {
    let result = common::translate_request("take_variable").unwrap();
    assert_eq!(
        result,
        Err(Error::UnsupportedOperatorArgument {
            operator: "Take",
            argument: "the variable 'page_size'".to_string()
        })
    );
}

#[test]
fn take_count() {
    let result = common::translate_request("take_count").unwrap();
    assert_eq!(
        result,
        Err(Error::Sql(sql::error::Error::UnsupportedOnAggregate {
            operation: "take"
        }))
    );
}

#[test]
fn order_by_unmapped_member() {
    let result = common::translate_request("order_by_unmapped_member").unwrap();
    assert_eq!(
        result,
        Err(Error::UnsupportedMember {
            entity: "Supplier".into(),
            property: "rating".into()
        })
    );
}
