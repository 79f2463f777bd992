use crate::dtr::MonthlyLog;
use crate::error::{invalid_input, DtrResult};
use crate::utils::time::month_path;
use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

// Export stores
pub mod firebase;
pub mod memory;

pub use firebase::FirebaseStore;
pub use memory::InMemoryStore;

/// Read access to the hierarchical attendance database
#[async_trait]
pub trait RecordStore: Send + Sync + 'static {
    /// Keys of the direct children of a collection
    async fn list_entity_ids(&self, collection_path: &str) -> DtrResult<Vec<String>>;

    /// Value stored at a path, `None` when nothing is stored there
    async fn read_record(&self, path: &str) -> DtrResult<Option<Value>>;
}

/// Keys of the direct children of a stored value
pub(crate) fn child_keys(value: &Value) -> Vec<String> {
    match value {
        Value::Object(map) => map.keys().cloned().collect(),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .filter(|(_, item)| !item.is_null())
            .map(|(index, _)| index.to_string())
            .collect(),
        _ => Vec::new(),
    }
}

/// Characters the database never allows in a key
const FORBIDDEN_KEY_CHARS: [char; 6] = ['/', '.', '#', '$', '[', ']'];

/// Check that a name can only address a single database key
pub fn validate_key(key: &str) -> DtrResult<()> {
    if key.is_empty() {
        return Err(invalid_input("Employee name must not be empty"));
    }
    if key
        .chars()
        .any(|c| FORBIDDEN_KEY_CHARS.contains(&c) || c.is_ascii_control())
    {
        return Err(invalid_input(&format!("Invalid employee name: {:?}", key)));
    }
    Ok(())
}

/// Path of one employee's log for one month
pub fn log_path(logs_path: &str, employee: &str, year: i32, month: u32) -> String {
    format!(
        "{}/{}/{}",
        logs_path.trim_matches('/'),
        employee,
        month_path(year, month)
    )
}

/// Sorted list of tracked employee names
pub async fn fetch_employee_names(
    store: &dyn RecordStore,
    names_path: &str,
) -> DtrResult<Vec<String>> {
    let mut names = store.list_entity_ids(names_path).await?;
    names.sort();
    names.dedup();
    debug!("Fetched {} employee names", names.len());
    Ok(names)
}

/// Read one employee's log for one month; nothing stored is an empty log
pub async fn fetch_monthly_log(
    store: &dyn RecordStore,
    logs_path: &str,
    employee: &str,
    year: i32,
    month: u32,
) -> DtrResult<MonthlyLog> {
    validate_key(employee)?;

    let path = log_path(logs_path, employee, year, month);
    let log = match store.read_record(&path).await? {
        Some(value) => MonthlyLog::from_value(&value),
        None => MonthlyLog::new(),
    };
    debug!("Fetched {} day records from {}", log.len(), path);
    Ok(log)
}

/// Names containing the search text, case-insensitively
pub fn filter_names(names: &[String], query: &str) -> Vec<String> {
    let query = query.trim().to_lowercase();
    names
        .iter()
        .filter(|name| name.to_lowercase().contains(&query))
        .cloned()
        .collect()
}
