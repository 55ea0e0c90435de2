//! Shared helpers for CLI commands.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use gadgetry_ir::{Angle, Circuit, PauliString, PauliTensor, QubitId};
use gadgetry_synth::{ConfigDocument, PairEncoding, SynthesisConfig};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

/// A gadget-pair job as read from YAML or JSON.
///
/// ```yaml
/// name: example
/// gadget0: { pauli: "X0 Y1 Z2", angle: 0.3 }
/// gadget1: { pauli: "Y0 Y1 X2", angle: theta, coeff: -1 }
/// config: { cx_config: tree }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JobFile {
    /// Circuit name
    #[serde(default = "default_job_name")]
    pub name: String,

    /// Register width; defaults to one past the greatest qubit used
    #[serde(default)]
    pub num_qubits: Option<u32>,

    /// Applied first
    pub gadget0: GadgetSpec,

    /// Applied second
    pub gadget1: GadgetSpec,

    /// Synthesis settings
    #[serde(default)]
    pub config: ConfigDocument,
}

/// One gadget of a job.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GadgetSpec {
    /// Pauli string, e.g. `"X0 Z2"`
    pub pauli: PauliString,

    /// Rotation angle
    pub angle: AngleSpec,

    /// Real coefficient, +1 or -1
    #[serde(default = "default_coeff")]
    pub coeff: f64,
}

/// A numeric angle or the name of a free parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AngleSpec {
    /// Radians
    Value(f64),
    /// Free parameter
    Symbol(String),
}

impl From<&AngleSpec> for Angle {
    fn from(spec: &AngleSpec) -> Self {
        match spec {
            AngleSpec::Value(v) => Angle::constant(*v),
            AngleSpec::Symbol(s) => Angle::symbol(s.clone()),
        }
    }
}

fn default_job_name() -> String {
    "gadget_pair".to_string()
}

fn default_coeff() -> f64 {
    1.0
}

impl GadgetSpec {
    /// The coefficient-carrying operator.
    pub fn tensor(&self) -> PauliTensor {
        PauliTensor::new(self.pauli.clone(), Complex64::new(self.coeff, 0.0))
    }

    /// The angle as IR.
    pub fn angle(&self) -> Angle {
        Angle::from(&self.angle)
    }
}

impl JobFile {
    /// Parse a job; the format follows the file extension (YAML unless `.json`).
    pub fn parse(source: &str, path: &Path) -> Result<Self> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        match ext.to_lowercase().as_str() {
            "json" => serde_json::from_str(source).context("Invalid JSON job"),
            _ => serde_yaml_ng::from_str(source).context("Invalid YAML job"),
        }
    }

    /// Width of the target circuit.
    pub fn width(&self) -> u32 {
        let used = [&self.gadget0.pauli, &self.gadget1.pauli]
            .into_iter()
            .flat_map(PauliString::qubits)
            .map(|q| q.index() + 1)
            .max()
            .unwrap_or(0);
        self.num_qubits.map_or(used, |n| n.max(used))
    }

    /// Empty target circuit for this job.
    pub fn circuit(&self) -> Circuit {
        Circuit::with_size(self.name.clone(), self.width())
    }

    /// The gadgets in application order.
    pub fn gadgets(&self) -> [(PauliTensor, Angle); 2] {
        [
            (self.gadget0.tensor(), self.gadget0.angle()),
            (self.gadget1.tensor(), self.gadget1.angle()),
        ]
    }
}

/// Load a job from a YAML or JSON file.
pub fn load_job(path: &str) -> Result<JobFile> {
    let path_obj = Path::new(path);

    if !path_obj.exists() {
        anyhow::bail!("File not found: {path}");
    }

    let source =
        fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))?;
    JobFile::parse(&source, path_obj).with_context(|| format!("Failed to parse job: {path}"))
}

/// Resolve settings: command-line flags over environment over job file.
pub fn resolve_config(
    job: &JobFile,
    cx_config: Option<&str>,
    encoding: Option<&str>,
) -> Result<SynthesisConfig> {
    let mut config = job.config.resolve()?;
    config.apply_env_overrides()?;
    if let Some(tag) = cx_config {
        config.cx_config = tag.parse().map_err(gadgetry_synth::SynthError::from)?;
    }
    if let Some(tag) = encoding {
        config.encoding = tag.parse::<PairEncoding>()?;
    }
    Ok(config)
}

/// Qubits of `circuit` in declaration order.
pub fn order(circuit: &Circuit) -> Vec<QubitId> {
    circuit.qubits().to_vec()
}
