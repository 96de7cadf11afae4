//! INI file configuration adapter.

use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let mut config = Ini::new();
        config.load(path).map_err(std::io::Error::other)?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, String> {
        let mut config = Ini::new();
        config.read(content.to_string())?;
        Ok(Self { config })
    }

    fn parse_bool(value: &str) -> Option<bool> {
        match value.to_lowercase().as_str() {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" => Some(false),
            _ => None,
        }
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.config
            .getint(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_double(&self, section: &str, key: &str, default: f64) -> f64 {
        self.config
            .getfloat(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        self.config
            .get(section, key)
            .as_ref()
            .and_then(|v| Self::parse_bool(v))
            .unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn from_string_parses_config() {
        let content = r#"
[data]
price_dir = ./data

[backtest]
principal = 100.0
scope = 30

[strategy]
rule = tilted
buy_range = 2.5
"#;
        let adapter = FileConfigAdapter::from_string(content).unwrap();
        assert_eq!(
            adapter.get_string("data", "price_dir"),
            Some("./data".to_string())
        );
        assert_eq!(
            adapter.get_string("strategy", "rule"),
            Some("tilted".to_string())
        );
        assert_eq!(adapter.get_int("backtest", "scope", 0), 30);
        assert_eq!(adapter.get_double("strategy", "buy_range", 0.0), 2.5);
    }

    #[test]
    fn get_string_returns_none_for_missing_key() {
        let adapter = FileConfigAdapter::from_string("[backtest]\nprincipal = 100\n").unwrap();
        assert_eq!(adapter.get_string("backtest", "missing"), None);
        assert_eq!(adapter.get_string("missing_section", "key"), None);
    }

    #[test]
    fn get_int_returns_default_for_missing_or_non_numeric() {
        let adapter = FileConfigAdapter::from_string("[backtest]\nscope = abc\n").unwrap();
        assert_eq!(adapter.get_int("backtest", "scope", 42), 42);
        assert_eq!(adapter.get_int("backtest", "missing", 42), 42);
    }

    #[test]
    fn get_double_returns_value_or_default() {
        let adapter = FileConfigAdapter::from_string("[backtest]\nprincipal = 250.5\n").unwrap();
        assert_eq!(adapter.get_double("backtest", "principal", 0.0), 250.5);
        assert_eq!(adapter.get_double("backtest", "missing", 99.9), 99.9);
    }

    #[test]
    fn get_bool_parses_truthy_and_falsy() {
        let adapter =
            FileConfigAdapter::from_string("[report]\na = true\nb = yes\nc = 0\n").unwrap();
        assert!(adapter.get_bool("report", "a", false));
        assert!(adapter.get_bool("report", "b", false));
        assert!(!adapter.get_bool("report", "c", true));
        assert!(adapter.get_bool("report", "missing", true));
    }

    #[test]
    fn from_file_reads_config() {
        let content = "[data]\nprice_dir = /var/prices\n";
        let file = create_temp_config(content);
        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(
            adapter.get_string("data", "price_dir"),
            Some("/var/prices".to_string())
        );
    }

    #[test]
    fn from_file_returns_error_for_missing_file() {
        let result = FileConfigAdapter::from_file("/nonexistent/path/config.ini");
        assert!(result.is_err());
    }
}
