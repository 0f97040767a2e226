//! Drivers run an operation's invocation image
//!
//! Only drivers that do not need a container runtime ship with Stevedore:
//! - `debug` prints the operation it would run and reports each declared
//!   output with its default value
//! - `dry-run` accepts the operation and reports no outputs

use indexmap::IndexMap;

use crate::bundle::Bundle;
use crate::error::{Result, provider};
use crate::provider::Operation;

pub const DEBUG_DRIVER: &str = "debug";
pub const DRY_RUN_DRIVER: &str = "dry-run";

/// What a driver reports back after running an operation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OperationResult {
    pub outputs: IndexMap<String, serde_json::Value>,
}

pub trait Driver {
    fn run(&self, op: &Operation, bundle: &Bundle) -> Result<OperationResult>;
}

/// Look up a driver by name
pub fn lookup(name: &str) -> Result<Box<dyn Driver>> {
    match name {
        DEBUG_DRIVER => Ok(Box::new(DebugDriver)),
        DRY_RUN_DRIVER => Ok(Box::new(DryRunDriver)),
        other => Err(provider::unsupported_driver(other)),
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DebugDriver;

impl Driver for DebugDriver {
    fn run(&self, op: &Operation, bundle: &Bundle) -> Result<OperationResult> {
        let rendered = serde_json::to_string_pretty(op)
            .map_err(|e| provider::driver_failed(e.to_string()))?;
        println!("{rendered}");

        let outputs = op
            .outputs
            .iter()
            .filter_map(|name| {
                bundle
                    .output_default(name)
                    .map(|value| (name.clone(), value.clone()))
            })
            .collect();

        Ok(OperationResult { outputs })
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunDriver;

impl Driver for DryRunDriver {
    fn run(&self, op: &Operation, _bundle: &Bundle) -> Result<OperationResult> {
        tracing::info!(installation = %op.installation, action = %op.action, "dry run, nothing executed");
        Ok(OperationResult::default())
    }
}
