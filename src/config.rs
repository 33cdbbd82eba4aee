use crate::error::ConfigError;

use ini::{Ini, Properties};
use log::{debug, log_enabled, Level::Debug};
use rust_decimal::Decimal;
use std::str::FromStr;

pub const DEFAULT_CONFIG_FILE: &str = "conf/lotnorm.ini";

#[derive(Debug, Clone, PartialEq)]
pub struct LoggingConfig {
    pub directory: String,
    pub level: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeeConfig {
    pub maker: Decimal,
    pub taker: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub logging: LoggingConfig,
    pub exchange_info: String,
    pub fees: Option<FeeConfig>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            directory: "logs".to_string(),
            level: "info".to_string(),
        }
    }
}

pub fn load(cfg_file_path: &str) -> Result<Ini, ConfigError> {
    Ini::load_from_file(cfg_file_path).map_err(|e| ConfigError::Load {
        path: cfg_file_path.to_string(),
        source: e,
    })
}

pub fn new(cfg_file_path: &str) -> Result<Config, ConfigError> {
    from_ini(&load(cfg_file_path)?)
}

fn describe(inifile: &Ini) -> Vec<String> {
    let mut lines = vec!["configuration file: ".to_string()];
    for (section, prop) in inifile.iter() {
        lines.push(format!("[{:?}]", section));
        for (k, v) in prop.iter() {
            lines.push(format!("{:?}={:?}", k, v));
        }
    }
    lines
}

// Needs the logger to be running, call it once logging is initialised.
pub fn dump(inifile: &Ini) {
    if log_enabled!(Debug) {
        for line in describe(inifile) {
            debug!("{}", line);
        }
    }
}

fn required<'a>(
    section: &'a Properties,
    name: &'static str,
    key: &'static str,
) -> Result<&'a str, ConfigError> {
    section.get(key).ok_or(ConfigError::MissingKey {
        section: name,
        key,
    })
}

fn parse_decimal(section: &'static str, key: &'static str, v: &str) -> Result<Decimal, ConfigError> {
    Decimal::from_str(v.trim()).map_err(|_| ConfigError::InvalidValue {
        section,
        key,
        value: v.to_string(),
    })
}

pub fn from_ini(inifile: &Ini) -> Result<Config, ConfigError> {
    // [Logging] is optional, every entry has a default.
    let mut logging = LoggingConfig::default();
    if let Some(s) = inifile.section(Some("Logging")) {
        if let Some(dir) = s.get("Directory") {
            logging.directory = dir.to_string();
        }
        if let Some(level) = s.get("Level") {
            logging.level = level.to_string();
        }
    }

    let rules_section = inifile
        .section(Some("Rules"))
        .ok_or(ConfigError::MissingSection("Rules"))?;
    let exchange_info = required(rules_section, "Rules", "ExchangeInfo")?;

    let fees = match inifile.section(Some("Fees")) {
        Some(s) => Some(FeeConfig {
            maker: parse_decimal("Fees", "Maker", required(s, "Fees", "Maker")?)?,
            taker: parse_decimal("Fees", "Taker", required(s, "Fees", "Taker")?)?,
        }),
        None => None,
    };

    Ok(Config {
        logging,
        exchange_info: exchange_info.to_string(),
        fees,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn load(s: &str) -> Result<Config, ConfigError> {
        from_ini(&Ini::load_from_str(s).unwrap())
    }

    #[test]
    fn full() {
        let cfg = load(
            "[Logging]\nDirectory=testlogs\nLevel=debug\n\
             [Rules]\nExchangeInfo=data/exchange_info.json\n\
             [Fees]\nMaker=0.001\nTaker=0.00075\n",
        )
        .unwrap();
        assert_eq!(cfg.logging.directory, "testlogs");
        assert_eq!(cfg.logging.level, "debug");
        assert_eq!(cfg.exchange_info, "data/exchange_info.json");
        assert_eq!(
            cfg.fees,
            Some(FeeConfig {
                maker: dec!(0.001),
                taker: dec!(0.00075)
            })
        );
    }

    #[test]
    fn defaults() {
        let cfg = load("[Rules]\nExchangeInfo=info.json\n").unwrap();
        assert_eq!(cfg.logging, LoggingConfig::default());
        assert_eq!(cfg.fees, None);
    }

    #[test]
    fn missing_rules() {
        match load("[Logging]\nLevel=info\n") {
            Err(ConfigError::MissingSection("Rules")) => {}
            other => panic!("unexpected result {:?}", other),
        }
        match load("[Rules]\n") {
            Err(ConfigError::MissingKey { key: "ExchangeInfo", .. }) => {}
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn bad_fee() {
        match load("[Rules]\nExchangeInfo=info.json\n[Fees]\nMaker=lots\nTaker=0.001\n") {
            Err(ConfigError::InvalidValue { key: "Maker", .. }) => {}
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn missing_file() {
        assert!(new("conf/does-not-exist.ini").is_err());
    }

    #[test]
    fn dump_after_logger_start() {
        let inifile = Ini::load_from_str("[Rules]\nExchangeInfo=info.json\n").unwrap();
        let lines = describe(&inifile);
        assert_eq!(lines[0], "configuration file: ");
        assert!(lines.contains(&"[Some(\"Rules\")]".to_string()));
        assert!(lines.contains(&"\"ExchangeInfo\"=\"info.json\"".to_string()));

        let _logger = crate::utils::init_logging("testlogs/config/dump", "debug").unwrap();
        assert!(log_enabled!(Debug));
        dump(&inifile);
    }

    #[test]
    fn shipped_config() {
        let cfg = new(DEFAULT_CONFIG_FILE).unwrap();
        assert_eq!(cfg.exchange_info, "data/exchange_info.json");
    }
}
