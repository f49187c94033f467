//! # Snarkjs Subprocess Backend
//!
//! Drives the `circom`/`snarkjs` proving toolchain as a child process.
//! The circuit is compiled and set up out of band; this backend consumes
//! the compiled witness generator, the proving key, and the exported
//! verification key.
//!
//! ## Resource Model
//!
//! Proving can take seconds. Every subprocess invocation carries an
//! explicit wall-clock timeout; on expiry the child is killed and the
//! call fails with a timed-out error. Inputs containing the private
//! score are written only to a per-run scratch directory that is removed
//! when the run ends, and are never cached or re-submitted
//! automatically.

use std::io::Read;
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::inputs::{CircuitInputs, PublicSignals};
use crate::traits::{ExternalVerifyingKey, ProofBackend, ProveError, ProverOutput, VerifyError};

fn default_node_bin() -> PathBuf {
    PathBuf::from("node")
}

fn default_snarkjs_bin() -> PathBuf {
    PathBuf::from("snarkjs")
}

fn default_timeout_secs() -> u64 {
    120
}

/// Filesystem and timeout configuration for the snarkjs toolchain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnarkjsConfig {
    /// The `node` interpreter used to run the witness generator.
    #[serde(default = "default_node_bin")]
    pub node_bin: PathBuf,
    /// The `snarkjs` executable.
    #[serde(default = "default_snarkjs_bin")]
    pub snarkjs_bin: PathBuf,
    /// The compiled `generate_witness.js` for the comparison circuit.
    pub witness_generator: PathBuf,
    /// The compiled circuit WASM.
    pub circuit_wasm: PathBuf,
    /// The Groth16 proving key (`.zkey`).
    pub proving_key: PathBuf,
    /// Wall-clock deadline for each toolchain invocation, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl SnarkjsConfig {
    fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// A proof backend that shells out to the snarkjs toolchain.
#[derive(Debug, Clone)]
pub struct SnarkjsBackend {
    config: SnarkjsConfig,
}

impl SnarkjsBackend {
    /// Create a backend over a toolchain configuration.
    pub fn new(config: SnarkjsConfig) -> Self {
        Self { config }
    }
}

/// Outcome of one subprocess run.
struct RunOutput {
    success: bool,
    stdout: String,
    stderr: String,
}

/// Subprocess-level failures, before any toolchain semantics apply.
#[derive(Debug)]
enum RunError {
    Spawn(std::io::Error),
    TimedOut { seconds: u64 },
    Wait(std::io::Error),
}

/// Drain a child stream on a helper thread so a chatty child cannot
/// block on a full pipe while the parent polls for exit.
fn drain<R: Read + Send + 'static>(stream: Option<R>) -> std::thread::JoinHandle<String> {
    std::thread::spawn(move || {
        let mut buf = String::new();
        if let Some(mut stream) = stream {
            let _ = stream.read_to_string(&mut buf);
        }
        buf
    })
}

fn wait_with_deadline(child: &mut Child, timeout: Duration) -> Result<bool, RunError> {
    let deadline = Instant::now() + timeout;
    loop {
        match child.try_wait().map_err(RunError::Wait)? {
            Some(status) => return Ok(status.success()),
            None if Instant::now() >= deadline => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(RunError::TimedOut {
                    seconds: timeout.as_secs(),
                });
            }
            None => std::thread::sleep(Duration::from_millis(25)),
        }
    }
}

/// Run a command to completion under a wall-clock deadline.
fn run_with_timeout(command: &mut Command, timeout: Duration) -> Result<RunOutput, RunError> {
    let mut child = command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(RunError::Spawn)?;

    let stdout = drain(child.stdout.take());
    let stderr = drain(child.stderr.take());

    let success = wait_with_deadline(&mut child, timeout)?;
    let stdout = stdout.join().unwrap_or_default();
    let stderr = stderr.join().unwrap_or_default();

    Ok(RunOutput {
        success,
        stdout,
        stderr,
    })
}

fn trimmed(output: &str) -> String {
    let s = output.trim();
    // Toolchain stderr can be verbose; keep the tail where the actual
    // error message lands.
    match s.char_indices().nth_back(499) {
        Some((idx, _)) => s[idx..].to_string(),
        None => s.to_string(),
    }
}

impl ProofBackend for SnarkjsBackend {
    fn prove(&self, inputs: &CircuitInputs) -> Result<ProverOutput, ProveError> {
        // The Groth16 comparison circuit takes non-negative field
        // elements; negative encodings are circuit-specific and not
        // part of this toolchain contract.
        if inputs.threshold_int() < 0 || inputs.score_int() < 0 {
            return Err(ProveError::InvalidInputs(
                "comparison circuit inputs must be non-negative".to_string(),
            ));
        }

        let scratch = tempfile::tempdir()
            .map_err(|e| ProveError::Unavailable(format!("scratch directory: {e}")))?;
        let input_path = scratch.path().join("input.json");
        let witness_path = scratch.path().join("witness.wtns");
        let proof_path = scratch.path().join("proof.json");
        let public_path = scratch.path().join("public.json");

        let input_doc = serde_json::to_vec(&inputs.to_input_document())
            .map_err(|e| ProveError::InvalidInputs(e.to_string()))?;
        std::fs::write(&input_path, input_doc)
            .map_err(|e| ProveError::Unavailable(format!("scratch directory: {e}")))?;

        // Witness generation: node generate_witness.js <wasm> <input> <witness>
        let witness = run_with_timeout(
            Command::new(&self.config.node_bin)
                .arg(&self.config.witness_generator)
                .arg(&self.config.circuit_wasm)
                .arg(&input_path)
                .arg(&witness_path),
            self.config.timeout(),
        )
        .map_err(|e| match e {
            RunError::Spawn(e) => ProveError::Unavailable(format!("node: {e}")),
            RunError::Wait(e) => ProveError::Unavailable(format!("node: {e}")),
            RunError::TimedOut { seconds } => ProveError::TimedOut { seconds },
        })?;
        if !witness.success {
            tracing::warn!(stderr = %trimmed(&witness.stderr), "witness generation failed");
            return Err(ProveError::GenerationFailed(format!(
                "witness generation: {}",
                trimmed(&witness.stderr)
            )));
        }

        // Proof generation: snarkjs groth16 prove <zkey> <witness> <proof> <public>
        let prove = run_with_timeout(
            Command::new(&self.config.snarkjs_bin)
                .args(["groth16", "prove"])
                .arg(&self.config.proving_key)
                .arg(&witness_path)
                .arg(&proof_path)
                .arg(&public_path),
            self.config.timeout(),
        )
        .map_err(|e| match e {
            RunError::Spawn(e) => ProveError::Unavailable(format!("snarkjs: {e}")),
            RunError::Wait(e) => ProveError::Unavailable(format!("snarkjs: {e}")),
            RunError::TimedOut { seconds } => ProveError::TimedOut { seconds },
        })?;
        if !prove.success {
            tracing::warn!(stderr = %trimmed(&prove.stderr), "proof generation failed");
            return Err(ProveError::GenerationFailed(format!(
                "groth16 prove: {}",
                trimmed(&prove.stderr)
            )));
        }

        let proof: Value = read_json(&proof_path)
            .map_err(|e| ProveError::GenerationFailed(format!("proof.json: {e}")))?;
        let signals: Vec<String> = read_json(&public_path)
            .map_err(|e| ProveError::GenerationFailed(format!("public.json: {e}")))?;

        tracing::debug!(signals = signals.len(), "snarkjs proof generated");
        Ok(ProverOutput {
            proof,
            public_signals: PublicSignals::new(signals),
        })
    }

    fn verify(
        &self,
        proof: &Value,
        public_signals: &PublicSignals,
        key: &ExternalVerifyingKey,
    ) -> Result<bool, VerifyError> {
        if !proof.is_object() {
            return Err(VerifyError::MalformedProof(
                "proof is not a JSON object".to_string(),
            ));
        }

        let scratch = tempfile::tempdir()
            .map_err(|e| VerifyError::Unavailable(format!("scratch directory: {e}")))?;
        let key_path = scratch.path().join("verification_key.json");
        let proof_path = scratch.path().join("proof.json");
        let public_path = scratch.path().join("public.json");

        let write = |path: &std::path::Path, value: &Value| -> Result<(), VerifyError> {
            let bytes = serde_json::to_vec(value)
                .map_err(|e| VerifyError::MalformedProof(e.to_string()))?;
            std::fs::write(path, bytes)
                .map_err(|e| VerifyError::Unavailable(format!("scratch directory: {e}")))
        };
        write(&key_path, key.as_value())?;
        write(&proof_path, proof)?;
        write(
            &public_path,
            &serde_json::json!(public_signals.values()),
        )?;

        // snarkjs groth16 verify <vkey> <public> <proof>
        let outcome = run_with_timeout(
            Command::new(&self.config.snarkjs_bin)
                .args(["groth16", "verify"])
                .arg(&key_path)
                .arg(&public_path)
                .arg(&proof_path),
            self.config.timeout(),
        )
        .map_err(|e| match e {
            RunError::Spawn(e) => VerifyError::Unavailable(format!("snarkjs: {e}")),
            RunError::Wait(e) => VerifyError::Unavailable(format!("snarkjs: {e}")),
            RunError::TimedOut { seconds } => VerifyError::TimedOut { seconds },
        })?;

        // snarkjs prints an OK marker for valid proofs and exits nonzero
        // for invalid ones; both are verdicts, not service failures.
        Ok(outcome.success && outcome.stdout.contains("OK"))
    }
}

fn read_json<T: serde::de::DeserializeOwned>(
    path: &std::path::Path,
) -> Result<T, Box<dyn std::error::Error>> {
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn missing_toolchain_config() -> SnarkjsConfig {
        SnarkjsConfig {
            node_bin: PathBuf::from("/nonexistent/node"),
            snarkjs_bin: PathBuf::from("/nonexistent/snarkjs"),
            witness_generator: PathBuf::from("generate_witness.js"),
            circuit_wasm: PathBuf::from("circuit.wasm"),
            proving_key: PathBuf::from("circuit.zkey"),
            timeout_secs: 5,
        }
    }

    #[test]
    fn run_with_timeout_captures_output() {
        let out = run_with_timeout(
            Command::new("echo").arg("hello"),
            Duration::from_secs(5),
        )
        .unwrap();
        assert!(out.success);
        assert!(out.stdout.contains("hello"));
    }

    #[test]
    fn run_with_timeout_kills_slow_child() {
        let err = run_with_timeout(
            Command::new("sleep").arg("30"),
            Duration::from_millis(100),
        );
        assert!(matches!(err, Err(RunError::TimedOut { .. })));
    }

    #[test]
    fn run_with_timeout_reports_spawn_failure() {
        let err = run_with_timeout(
            &mut Command::new("/nonexistent/binary"),
            Duration::from_secs(1),
        );
        assert!(matches!(err, Err(RunError::Spawn(_))));
    }

    #[test]
    fn prove_without_toolchain_is_unavailable() {
        let backend = SnarkjsBackend::new(missing_toolchain_config());
        let err = backend.prove(&CircuitInputs::new(380, 350)).unwrap_err();
        assert!(matches!(err, ProveError::Unavailable(_)));
    }

    #[test]
    fn prove_rejects_negative_inputs() {
        let backend = SnarkjsBackend::new(missing_toolchain_config());
        let err = backend.prove(&CircuitInputs::new(-380, 350)).unwrap_err();
        assert!(matches!(err, ProveError::InvalidInputs(_)));
    }

    #[test]
    fn verify_without_toolchain_is_unavailable() {
        let backend = SnarkjsBackend::new(missing_toolchain_config());
        let signals = PublicSignals::new(vec!["1".to_string(), "350".to_string()]);
        let key = ExternalVerifyingKey::from_value(serde_json::json!({}));
        let err = backend
            .verify(&serde_json::json!({"pi_a": []}), &signals, &key)
            .unwrap_err();
        assert!(matches!(err, VerifyError::Unavailable(_)));
    }

    #[test]
    fn verify_rejects_non_object_proof() {
        let backend = SnarkjsBackend::new(missing_toolchain_config());
        let signals = PublicSignals::new(vec!["1".to_string(), "350".to_string()]);
        let key = ExternalVerifyingKey::from_value(serde_json::json!({}));
        let err = backend
            .verify(&serde_json::json!([1, 2]), &signals, &key)
            .unwrap_err();
        assert!(matches!(err, VerifyError::MalformedProof(_)));
    }

    #[test]
    fn config_defaults_fill_in() {
        let config: SnarkjsConfig = serde_json::from_str(
            r#"{
                "witness_generator": "gw.js",
                "circuit_wasm": "c.wasm",
                "proving_key": "c.zkey"
            }"#,
        )
        .unwrap();
        assert_eq!(config.node_bin, PathBuf::from("node"));
        assert_eq!(config.snarkjs_bin, PathBuf::from("snarkjs"));
        assert_eq!(config.timeout_secs, 120);
    }
}
