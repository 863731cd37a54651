use anyhow::Result;
use figment::{providers::{Env, Format, Toml}, Figment};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub dataset: DatasetConfig,
    pub model: ModelConfig,
    pub chart: ChartConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub request_timeout_secs: u64,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatasetConfig {
    /// CSV file with one row per day of historical consumption.
    pub path: PathBuf,
    /// Header of the column holding dd/mm/yyyy dates.
    pub date_column: String,
    /// Header of the column holding the region's consumption values.
    pub value_column: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    pub n_trees: usize,
    /// Unbounded when absent.
    #[serde(default)]
    pub max_depth: Option<u16>,
    pub min_samples_split: usize,
    /// Fixed seed so repeated trainings on the same data agree.
    pub seed: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            n_trees: 100,
            max_depth: None,
            min_samples_split: 2,
            seed: 1,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChartConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self { width: 1000, height: 600 }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let figment = Figment::new()
            .merge(Toml::file("config/default.toml"))
            .merge(Env::prefixed("OPF__").split("__"));
        Ok(figment.extract()?)
    }
}
