//! Entities used across the test suites, with their field mappings.

use chrono::NaiveDate;
use lazy_query_configuration::Configuration;
use query_engine_execution::error::Error;
use query_engine_execution::materializer::{FieldValue, Materializable, NestedRow};
use query_engine_metadata::metadata::{
    Entity, EntityInfo, FieldMapping, Metadata, OrderByModifier, RecursiveFetch, ScalarType,
};
use query_engine_models::{EntityName, PropertyName};
use query_engine_sql::sql;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Employee {
    pub id: i64,
    pub name: String,
}

impl Entity for Employee {
    fn name() -> EntityName {
        "Employee".into()
    }

    fn info() -> EntityInfo {
        EntityInfo::new()
            .column(
                "id",
                FieldMapping::new("id", ScalarType::Integer)
                    .with_alias("employee_id")
                    .with_primary_key(),
            )
            .column(
                "name",
                FieldMapping::new("name", ScalarType::Text).with_alias("employee_name"),
            )
    }
}

impl Materializable for Employee {
    fn set_field(&mut self, property: &PropertyName, value: FieldValue) -> Result<(), Error> {
        match property.as_str() {
            "id" => self.id = value.try_into()?,
            "name" => self.name = value.try_into()?,
            _ => return Err(Error::UnknownProperty(property.clone())),
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Supplier {
    pub id: i64,
    pub name: String,
}

impl Entity for Supplier {
    fn name() -> EntityName {
        "Supplier".into()
    }

    fn info() -> EntityInfo {
        EntityInfo::new()
            .column(
                "id",
                FieldMapping::new("id", ScalarType::Integer)
                    .with_alias("supplier_id")
                    .with_primary_key(),
            )
            .column(
                "name",
                FieldMapping::new("name", ScalarType::Text).with_alias("supplier_name"),
            )
    }
}

impl Materializable for Supplier {
    fn set_field(&mut self, property: &PropertyName, value: FieldValue) -> Result<(), Error> {
        match property.as_str() {
            "id" => self.id = value.try_into()?,
            "name" => self.name = value.try_into()?,
            _ => return Err(Error::UnknownProperty(property.clone())),
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub released: Option<NaiveDate>,
    pub main_supplier: Supplier,
}

impl Entity for Product {
    fn name() -> EntityName {
        "Product".into()
    }

    fn info() -> EntityInfo {
        EntityInfo::new()
            .column(
                "id",
                FieldMapping::new("id", ScalarType::Integer)
                    .with_alias("product_id")
                    .with_primary_key(),
            )
            .column(
                "name",
                FieldMapping::new("name", ScalarType::Text)
                    .with_alias("product_name")
                    .with_order_by_modifier(OrderByModifier::Function {
                        function: "LOWER".to_string(),
                    }),
            )
            .column(
                "released",
                FieldMapping::new("released", ScalarType::Date).with_alias("product_released"),
            )
            .recursive("main_supplier", RecursiveFetch::new("Supplier"))
    }
}

impl Materializable for Product {
    fn set_field(&mut self, property: &PropertyName, value: FieldValue) -> Result<(), Error> {
        match property.as_str() {
            "id" => self.id = value.try_into()?,
            "name" => self.name = value.try_into()?,
            "released" => self.released = Some(value.try_into()?),
            _ => return Err(Error::UnknownProperty(property.clone())),
        }
        Ok(())
    }

    fn set_nested(&mut self, property: &PropertyName, row: NestedRow<'_>) -> Result<(), Error> {
        match property.as_str() {
            "main_supplier" => self.main_supplier = row.materialize()?,
            _ => return Err(Error::UnknownProperty(property.clone())),
        }
        Ok(())
    }
}

/// The field mappings of every test entity.
pub fn metadata() -> Metadata {
    let mut metadata = Metadata::empty();
    metadata
        .register::<Employee>()
        .register::<Supplier>()
        .register::<Product>();
    metadata
}

/// Read employees from `employees e`.
pub fn employees_configuration() -> Configuration {
    let metadata = metadata();
    let mut baseline = sql::helpers::empty_select();
    baseline
        .add_select_for_entity("e", &Employee::info())
        .add_from("employees e");
    Configuration::new(metadata, Employee::name(), baseline)
}

/// Read products joined with their main supplier.
pub fn products_configuration() -> Configuration {
    let metadata = metadata();
    let mut baseline = sql::helpers::empty_select();
    baseline
        .add_select_for_entity("p", &Product::info())
        .add_select_for_entity("s", &Supplier::info())
        .add_from("products p");
    baseline
        .add_join("LEFT JOIN", "suppliers s", "p.main_supplier = s.id")
        .map(|_| ())
        .unwrap_or_else(|err| panic!("the baseline has a FROM clause: {err}"));
    Configuration::new(metadata, Product::name(), baseline)
}

/// A row as the employees baseline returns it.
pub fn employee_row(id: i64, name: &str) -> serde_json::Value {
    serde_json::json!({ "employee_id": id, "employee_name": name })
}

/// A row as the products baseline returns it.
pub fn product_row(
    id: i64,
    name: &str,
    released: Option<&str>,
    supplier_id: i64,
    supplier_name: &str,
) -> serde_json::Value {
    serde_json::json!({
        "product_id": id,
        "product_name": name,
        "product_released": released,
        "supplier_id": supplier_id,
        "supplier_name": supplier_name,
    })
}
