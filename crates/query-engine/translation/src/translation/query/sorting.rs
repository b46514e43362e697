//! Resolve the key paths of `OrderBy` and `ThenBy` to the expressions to order by.

use query_engine_metadata::metadata::PropertyInfo;
use query_engine_models::{EntityName, KeyPath, OrderDirection};

use crate::translation::error::Error;
use crate::translation::helpers::Env;

/// What a prefix of a key path refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Resolution {
    /// An entity whose properties can still be accessed.
    Entity(EntityName),
    /// A mapped column. Accesses beyond it are not looked at.
    Column(String),
}

/// Translate a key path to the expression the rows should be ordered by.
pub fn translate_key_path(env: &Env, key: &KeyPath) -> Result<String, Error> {
    match resolve(env, key)? {
        Resolution::Column(expression) => Ok(expression),
        Resolution::Entity(entity) => Err(Error::NotSupported(format!(
            "ordering by the entity '{entity}' rather than one of its columns"
        ))),
    }
}

fn resolve(env: &Env, key: &KeyPath) -> Result<Resolution, Error> {
    match key {
        KeyPath::Parameter => Ok(Resolution::Entity(env.root_entity().clone())),
        KeyPath::Member { object, property } => match resolve(env, object)? {
            column @ Resolution::Column(_) => Ok(column),
            Resolution::Entity(entity) => {
                // An entity without metadata has no mapped members either.
                let property_info = env
                    .lookup_entity(&entity)
                    .ok()
                    .and_then(|entity_info| entity_info.lookup_property(property));
                match property_info {
                    None => Err(Error::UnsupportedMember {
                        entity,
                        property: property.clone(),
                    }),
                    Some(PropertyInfo::Recursive(fetch)) => {
                        Ok(Resolution::Entity(fetch.entity().clone()))
                    }
                    Some(PropertyInfo::Column(mapping)) => Ok(Resolution::Column(
                        mapping.order_by_expression(OrderDirection::Ascending),
                    )),
                }
            }
        },
    }
}
