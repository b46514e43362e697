use std::fs;
use std::path::PathBuf;

use query_engine_translation::translation;

/// The directory holding the configuration and the requests.
fn goldenfiles() -> PathBuf {
    PathBuf::from("tests/goldenfiles")
}

/// Translate the request in `goldenfiles/{testname}.json` against the shared configuration.
pub fn translate_request(
    testname: &str,
) -> anyhow::Result<Result<translation::query::Operation, translation::error::Error>> {
    let _ = env_logger::builder().is_test(true).try_init();

    let parsed_configuration = lazy_query_configuration::parse_configuration(goldenfiles())?;
    let configuration = lazy_query_configuration::make_runtime_configuration(parsed_configuration)?;

    let request = fs::read_to_string(goldenfiles().join(format!("{testname}.json")))?;
    let query = serde_json::from_str(&request)?;

    let env = translation::helpers::Env::new(&configuration.metadata, &configuration.root_entity)
        .with_count_override(configuration.count_override.as_deref());

    Ok(translation::query::translate(
        &env,
        &query,
        translation::query::Operation::Read(configuration.baseline.clone()),
    ))
}

/// Translate a request and describe the resulting operation chain and its SQL.
pub fn test_translation(testname: &str) -> anyhow::Result<String> {
    let operation = translate_request(testname)??;

    let mut kinds = vec![];
    let mut current = &operation;
    loop {
        kinds.push(current.kind());
        match current {
            translation::query::Operation::Aggregate(inner)
            | translation::query::Operation::Cast { inner, .. } => current = inner.as_ref(),
            _ => break,
        }
    }

    let sql = match operation.query_sql()? {
        Some(sql) => sql.sql,
        None => "<no statement>".to_string(),
    };

    Ok(format!("{}\n{}", kinds.join(" > "), sql))
}
