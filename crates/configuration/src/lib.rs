pub mod configuration;
pub mod error;
pub mod version1;

pub use configuration::{get_configuration_schema, make_runtime_configuration, Configuration};
pub use version1::{
    parse_configuration, write_parsed_configuration, Baseline, JoinClause, OrderByClause,
    ParsedConfiguration, SelectItem, WhereClause, CONFIGURATION_FILENAME,
};
