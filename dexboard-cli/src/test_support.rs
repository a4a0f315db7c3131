use std::path::{Path, PathBuf};

use serde_json::Value;

/// Fresh directory under the system temp dir.
pub fn scratch_dir(label: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "dexboard-{label}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ));
    std::fs::create_dir_all(&dir).expect("create scratch dir");
    dir
}

pub fn write_json(path: &Path, value: &Value) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent dir");
    }
    std::fs::write(path, serde_json::to_vec_pretty(value).unwrap()).expect("write json");
}

/// Save document with one species per `(species, status, shiny)` triple.
pub fn save_json(uuid: &str, forms: &[(&str, &str, bool)]) -> Value {
    let mut registers = serde_json::Map::new();
    for (species, status, shiny) in forms {
        registers.insert(
            (*species).to_string(),
            serde_json::json!({ "normal": { "status": status, "isShiny": shiny } }),
        );
    }
    serde_json::json!({
        "uuid": uuid,
        "extraData": { "cobbledex_discovery": { "registers": registers } }
    })
}
