use crate::inventory::{ProjectChoice, Variant};
use serde::Deserialize;
use serde_json::Value;

// /projects/ entry
//  ├── id | project_id       (number or string)
//  ├── project_name | name
//  ├── project_code | code
//  └── project_flat_configuration   multi_flat | multi_plot | ...

#[derive(Debug, Deserialize)]
pub struct ProjectListEntry {
    pub id: Option<Value>,
    pub project_id: Option<Value>,
    pub project_name: Option<String>,
    pub name: Option<String>,
    pub project_code: Option<String>,
    pub code: Option<String>,
    pub project_flat_configuration: Option<String>,
}

impl ProjectListEntry {
    pub fn is_variant(&self, variant: Variant) -> bool {
        self.project_flat_configuration
            .as_deref()
            .map(|c| c.trim().eq_ignore_ascii_case(variant.configuration()))
            .unwrap_or(false)
    }

    /// Picker entry. Entries without any usable id are skipped.
    pub fn into_choice(self) -> Option<ProjectChoice> {
        let code = non_empty(self.project_code)
            .or_else(|| non_empty(self.code))
            .unwrap_or_default();
        let id = id_string(self.id.as_ref())
            .or_else(|| id_string(self.project_id.as_ref()))
            .or_else(|| Some(code.clone()).filter(|c| !c.is_empty()))?;
        let name = non_empty(self.project_name)
            .or_else(|| non_empty(self.name))
            .unwrap_or_else(|| "Unnamed project".to_string());

        Some(ProjectChoice { id, name, code })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn id_string(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// `/projects/` may answer with a bare list or a paginated `{ results }`.
pub fn project_entries(payload: Value) -> Result<Vec<ProjectListEntry>, serde_json::Error> {
    let list = match payload {
        Value::Array(items) => Value::Array(items),
        Value::Object(mut map) => map.remove("results").unwrap_or(Value::Array(Vec::new())),
        _ => Value::Array(Vec::new()),
    };
    serde_json::from_value(list)
}
