use serde::Deserialize;
use nodegauge_core::error::{NodeGaugeError, Result};

const RESERVED_PATHS: [&str; 2] = ["/healthz", "/readyz"];

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExporterConfig {
    pub version: u32,

    #[serde(default)]
    pub exporter: ExporterSection,

    #[serde(default)]
    pub sampler: SamplerSection,

    /// Empty means the built-in node gauges.
    #[serde(default)]
    pub gauges: Vec<GaugeSpec>,
}

impl Default for ExporterConfig {
    fn default() -> Self {
        Self {
            version: 1,
            exporter: ExporterSection::default(),
            sampler: SamplerSection::default(),
            gauges: Vec::new(),
        }
    }
}

impl ExporterConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(NodeGaugeError::InvalidConfig(format!(
                "unsupported config version {}",
                self.version
            )));
        }

        self.exporter.validate()?;
        self.sampler.validate()?;

        for g in &self.gauges {
            if !g.offset.is_finite() {
                return Err(NodeGaugeError::InvalidConfig(format!(
                    "gauges[{}].offset must be finite",
                    g.name
                )));
            }
        }
        Ok(())
    }

    /// Gauges to register at startup.
    pub fn gauge_specs(&self) -> Vec<GaugeSpec> {
        if self.gauges.is_empty() {
            default_gauges()
        } else {
            self.gauges.clone()
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExporterSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    #[serde(default = "default_metrics_path")]
    pub metrics_path: String,
}

impl Default for ExporterSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            metrics_path: default_metrics_path(),
        }
    }
}

impl ExporterSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr()?;

        if !self.metrics_path.starts_with('/') {
            return Err(NodeGaugeError::InvalidConfig(
                "exporter.metrics_path must start with '/'".into(),
            ));
        }
        // ':' '*' '{' '}' are route syntax for the router; keep to literal segments.
        if let Some(c) = self.metrics_path.chars().find(|c| !is_path_char(*c)) {
            return Err(NodeGaugeError::InvalidConfig(format!(
                "exporter.metrics_path {:?} contains unsupported character {c:?}",
                self.metrics_path
            )));
        }
        if self.metrics_path.contains("//") {
            return Err(NodeGaugeError::InvalidConfig(format!(
                "exporter.metrics_path {:?} contains an empty segment",
                self.metrics_path
            )));
        }
        if RESERVED_PATHS.contains(&self.metrics_path.as_str()) {
            return Err(NodeGaugeError::InvalidConfig(format!(
                "exporter.metrics_path {} is reserved",
                self.metrics_path
            )));
        }
        Ok(())
    }

    /// Normalized `host:port`, resolved when the listener binds.
    pub fn listen_addr(&self) -> Result<String> {
        parse_listen(&self.listen)
    }
}

fn is_path_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '/' | '-' | '_' | '.' | '~')
}

/// Check `host:port` shape without resolving the host; a bare `:port` binds
/// every IPv4 interface. Hostnames are looked up at bind time.
pub fn parse_listen(s: &str) -> Result<String> {
    let invalid = |why: &str| NodeGaugeError::InvalidConfig(format!("exporter.listen {s:?}: {why}"));

    let full = if s.starts_with(':') {
        format!("0.0.0.0{s}")
    } else {
        s.to_string()
    };
    let (host, port) = full.rsplit_once(':').ok_or_else(|| invalid("expected host:port"))?;
    if host.is_empty() || host.chars().any(char::is_whitespace) {
        return Err(invalid("missing or malformed host"));
    }
    port.parse::<u16>().map_err(|_| invalid("port must be 0-65535"))?;
    Ok(full)
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SamplerSection {
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    #[serde(default = "default_uniform_domain")]
    pub uniform_domain: f64,
}

impl Default for SamplerSection {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            interval_ms: default_interval_ms(),
            uniform_domain: default_uniform_domain(),
        }
    }
}

impl SamplerSection {
    pub fn validate(&self) -> Result<()> {
        if !(100..=3_600_000).contains(&self.interval_ms) {
            return Err(NodeGaugeError::InvalidConfig(
                "sampler.interval_ms must be between 100 and 3600000".into(),
            ));
        }
        if !self.uniform_domain.is_finite() || self.uniform_domain < 0.0 {
            return Err(NodeGaugeError::InvalidConfig(
                "sampler.uniform_domain must be a finite, non-negative number".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct GaugeSpec {
    pub name: String,
    #[serde(default)]
    pub help: String,
    /// Added to the sampler's base value.
    #[serde(default)]
    pub offset: f64,
}

fn default_listen() -> String {
    ":7081".into()
}
fn default_metrics_path() -> String {
    "/metrics".into()
}
fn default_enabled() -> bool {
    true
}
fn default_interval_ms() -> u64 {
    2000
}
fn default_uniform_domain() -> f64 {
    0.2
}

fn default_gauges() -> Vec<GaugeSpec> {
    vec![
        GaugeSpec {
            name: "cpu_total".into(),
            help: "Current cpu used capacity of node.".into(),
            offset: 0.0,
        },
        GaugeSpec {
            name: "ram_total".into(),
            help: "Current ram used capacity of node.".into(),
            offset: 5.0,
        },
        GaugeSpec {
            name: "disk_total".into(),
            help: "Current disk capacity of node.".into(),
            offset: 10.0,
        },
    ]
}
