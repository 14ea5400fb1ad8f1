use miette::{IntoDiagnostic, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    pub server: Server,
    pub locations: Locations,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Server {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Locations {
    /// CSV file with the reference hierarchy, loaded once at startup.
    /// Columns: city code, province code, country code, city name, province name, country name.
    pub path: PathBuf,
}

impl Default for Server {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for Locations {
    fn default() -> Self {
        Self {
            path: PathBuf::from("cities.csv"),
        }
    }
}

impl Settings {
    pub fn load(path: &str) -> Result<Self> {
        let mut builder = config::Config::builder()
            .set_default("server.host", Server::default().host)
            .into_diagnostic()?
            .set_default("server.port", Server::default().port)
            .into_diagnostic()?
            .set_default(
                "locations.path",
                Locations::default().path.to_string_lossy().to_string(),
            )
            .into_diagnostic()?;

        // Optional file
        if Path::new(path).exists() {
            builder = builder.add_source(config::File::with_name(path));
        }

        // Environment overrides: TERRITORY__SERVER__PORT=9090, etc.
        builder =
            builder.add_source(config::Environment::with_prefix("TERRITORY").separator("__"));

        let cfg = builder.build().into_diagnostic()?;
        let mut s: Settings = cfg.try_deserialize().into_diagnostic()?;

        // Normalize location file path to be relative to current dir
        if s.locations.path.is_relative() {
            s.locations.path = std::env::current_dir()
                .into_diagnostic()?
                .join(&s.locations.path);
        }

        Ok(s)
    }
}
