//! Optional TOML file supplying raw configuration values.
//!
//! The file is a flat table using the same keys as the CLI flags:
//!
//! ```toml
//! prompt = "PROMPT.md"
//! check = "check.sh"
//! wait = 10
//! ```
//!
//! Values are not validated here; they are merged beneath the CLI flags and
//! the result goes through the normal validation pipeline.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde_json::{Map, Value};

/// Load a TOML args file into a raw value map.
pub fn load_args_file(path: &Path) -> Result<Map<String, Value>> {
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let table: toml::Table =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    match serde_json::to_value(table).with_context(|| format!("convert {}", path.display()))? {
        Value::Object(map) => Ok(map),
        other => Err(anyhow!(
            "expected table in {}, got {}",
            path.display(),
            crate::config::schema::kind(&other)
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn loads_typed_values() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("wally.toml");
        fs::write(
            &path,
            "prompt = \"PROMPT.md\"\nlimit = 5\nwait = \"10\"\nextra = true\n",
        )
        .expect("write");

        let map = load_args_file(&path).expect("load");
        assert_eq!(map.get("prompt"), Some(&json!("PROMPT.md")));
        assert_eq!(map.get("limit"), Some(&json!(5)));
        assert_eq!(map.get("wait"), Some(&json!("10")));
        assert_eq!(map.get("extra"), Some(&json!(true)));
    }

    #[test]
    fn missing_file_is_an_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        let err = load_args_file(&temp.path().join("missing.toml")).expect_err("should fail");
        assert!(err.to_string().starts_with("read "));
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("broken.toml");
        fs::write(&path, "prompt = \n").expect("write");

        let err = load_args_file(&path).expect_err("should fail");
        assert!(err.to_string().starts_with("parse "));
    }
}
