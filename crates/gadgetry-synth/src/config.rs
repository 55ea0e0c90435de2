//! Synthesis configuration.
//!
//! Settings come from, highest precedence first:
//! 1. Environment variables (`GADGETRY_` prefix)
//! 2. A YAML or JSON document
//! 3. Default values

use std::fmt;
use std::str::FromStr;

use gadgetry_ir::{Angle, Circuit, CxConfig, PauliTensor};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::angle::convert_angle;
use crate::boxes::append_pauli_gadget_pair_as_box;
use crate::error::{SynthError, SynthResult};
use crate::gadget::{append_pauli_gadget, check_declared};
use crate::pair::append_pauli_gadget_pair;

/// Environment variable overriding the reduction strategy.
pub const ENV_CX_CONFIG: &str = "GADGETRY_CX_CONFIG";
/// Environment variable overriding the pair encoding.
pub const ENV_ENCODING: &str = "GADGETRY_ENCODING";

/// How a gadget pair is written into the target circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PairEncoding {
    /// One conjugation composite holding U and V.
    #[default]
    Conjugation,
    /// One `PauliExpPair` box, synthesized on expansion.
    Boxed,
    /// Two independent single-gadget syntheses.
    Sequential,
}

impl PairEncoding {
    /// Every encoding, in declaration order.
    pub const ALL: [PairEncoding; 3] = [
        PairEncoding::Conjugation,
        PairEncoding::Boxed,
        PairEncoding::Sequential,
    ];

    /// The canonical textual tag.
    pub fn as_str(self) -> &'static str {
        match self {
            PairEncoding::Conjugation => "conjugation",
            PairEncoding::Boxed => "boxed",
            PairEncoding::Sequential => "sequential",
        }
    }
}

impl fmt::Display for PairEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PairEncoding {
    type Err = SynthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "conjugation" => Ok(PairEncoding::Conjugation),
            "boxed" | "box" => Ok(PairEncoding::Boxed),
            "sequential" => Ok(PairEncoding::Sequential),
            _ => Err(SynthError::Config(format!(
                "unknown pair encoding '{s}' (expected one of: conjugation, boxed, sequential)"
            ))),
        }
    }
}

/// Resolved synthesis settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SynthesisConfig {
    /// Reduction strategy for both the conjugation and the payload.
    pub cx_config: CxConfig,
    /// Encoding used by [`synthesize_pair`].
    pub encoding: PairEncoding,
}

/// Unvalidated settings as they appear in a document.
///
/// Tags stay strings until [`ConfigDocument::resolve`], so an unknown
/// strategy surfaces as [`SynthError::UnsupportedConfiguration`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigDocument {
    /// Strategy tag
    #[serde(default)]
    pub cx_config: Option<String>,
    /// Encoding tag
    #[serde(default)]
    pub encoding: Option<String>,
}

impl ConfigDocument {
    /// Validate the tags, falling back to defaults for absent ones.
    pub fn resolve(&self) -> SynthResult<SynthesisConfig> {
        let mut config = SynthesisConfig::default();
        if let Some(tag) = &self.cx_config {
            config.cx_config = tag.parse()?;
        }
        if let Some(tag) = &self.encoding {
            config.encoding = tag.parse()?;
        }
        Ok(config)
    }
}

impl SynthesisConfig {
    /// Create a configuration with the given strategy and default encoding.
    pub fn new(cx_config: CxConfig) -> Self {
        Self {
            cx_config,
            encoding: PairEncoding::default(),
        }
    }

    /// Builder: set the encoding.
    pub fn with_encoding(mut self, encoding: PairEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Parse a YAML document.
    pub fn from_yaml_str(text: &str) -> SynthResult<Self> {
        let doc: ConfigDocument =
            serde_yaml_ng::from_str(text).map_err(|e| SynthError::Config(e.to_string()))?;
        doc.resolve()
    }

    /// Parse a JSON document.
    pub fn from_json_str(text: &str) -> SynthResult<Self> {
        let doc: ConfigDocument =
            serde_json::from_str(text).map_err(|e| SynthError::Config(e.to_string()))?;
        doc.resolve()
    }

    /// Apply `GADGETRY_CX_CONFIG` and `GADGETRY_ENCODING` from the process
    /// environment. Unset variables leave the current values unchanged.
    pub fn apply_env_overrides(&mut self) -> SynthResult<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> SynthResult<()> {
        if let Some(tag) = lookup(ENV_CX_CONFIG) {
            self.cx_config = tag.parse()?;
            debug!(cx_config = %self.cx_config, "strategy overridden from environment");
        }
        if let Some(tag) = lookup(ENV_ENCODING) {
            self.encoding = tag.parse()?;
            debug!(encoding = %self.encoding, "encoding overridden from environment");
        }
        Ok(())
    }
}

/// Append `exp(-i angle1/2 · P1) · exp(-i angle0/2 · P0)` to `circuit` in
/// the configured encoding.
///
/// Both coefficients and every qubit either gadget acts on are checked
/// before anything is appended.
pub fn synthesize_pair(
    config: &SynthesisConfig,
    circuit: &mut Circuit,
    pauli0: &PauliTensor,
    angle0: &Angle,
    pauli1: &PauliTensor,
    angle1: &Angle,
) -> SynthResult<()> {
    debug!(strategy = %config.cx_config, encoding = %config.encoding, "synthesizing gadget pair");
    match config.encoding {
        PairEncoding::Conjugation => {
            append_pauli_gadget_pair(circuit, pauli0, angle0, pauli1, angle1, config.cx_config)
        }
        PairEncoding::Boxed => append_pauli_gadget_pair_as_box(
            circuit,
            pauli0,
            angle0,
            pauli1,
            angle1,
            config.cx_config,
        ),
        PairEncoding::Sequential => {
            let angle0 = convert_angle(pauli0.coeff, angle0)?;
            let angle1 = convert_angle(pauli1.coeff, angle1)?;
            check_declared(circuit, &pauli0.string)?;
            check_declared(circuit, &pauli1.string)?;
            append_pauli_gadget(circuit, &pauli0.string, &angle0, config.cx_config)?;
            append_pauli_gadget(circuit, &pauli1.string, &angle1, config.cx_config)
        }
    }
}
