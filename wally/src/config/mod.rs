//! Configuration schema and validation pipeline.
//!
//! [`validate`] turns an untyped input bag into a [`Config`]. Every field is
//! checked; all failures are collected into a single [`ConfigError`] carried
//! through `anyhow::Error`. Callers recover it with
//! `err.downcast_ref::<ConfigError>()`. Errors raised by the path probe itself
//! pass through untouched.

pub mod issue;
pub mod schema;

use std::time::Duration;

use anyhow::{Result, anyhow};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::io::probe::PathProbe;

pub use issue::{ConfigError, ConfigIssue, IssueCode};
pub use schema::Field;

use schema::{
    DEFAULT_AGENT, DEFAULT_LIMIT, DEFAULT_MODEL, DEFAULT_WAIT, Rejection, lookup, number_or,
    required_path, string_or,
};

/// Validated loop configuration. Every field is populated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Config {
    /// Prompt file; existed when the config was validated.
    pub prompt: String,
    /// Stop-condition script; existed when the config was validated.
    pub check: String,
    /// Maximum agent invocations. `0` means unbounded.
    pub limit: f64,
    /// Seconds to wait between invocations.
    pub wait: f64,
    pub agent: String,
    pub model: String,
}

impl Config {
    /// Invocation cap, or `None` when unbounded.
    pub fn max_invocations(&self) -> Option<u64> {
        if self.limit <= 0.0 {
            return None;
        }
        // Float-to-int `as` saturates.
        Some(self.limit.ceil() as u64)
    }

    /// Pause between invocations. Negative waits clamp to zero.
    pub fn wait_duration(&self) -> Duration {
        Duration::try_from_secs_f64(self.wait.max(0.0)).unwrap_or(Duration::MAX)
    }
}

/// Validate raw input against the schema.
///
/// Unknown keys are ignored. The `prompt` and `check` existence checks run
/// concurrently; all other rules are synchronous.
#[instrument(skip_all)]
pub async fn validate<P: PathProbe + ?Sized>(input: &Value, probe: &P) -> Result<Config> {
    let Some(fields) = input.as_object() else {
        let issue = ConfigIssue {
            path: None,
            code: IssueCode::InvalidType,
            reason: format!("expected object, received {}", schema::kind(input)),
        };
        debug!(reason = %issue.reason, "input rejected");
        return Err(reject(vec![issue]));
    };

    let prompt = required_path(lookup(fields, Field::Prompt));
    let check = required_path(lookup(fields, Field::Check));
    let limit = number_or(lookup(fields, Field::Limit), DEFAULT_LIMIT);
    let wait = number_or(lookup(fields, Field::Wait), DEFAULT_WAIT);
    let agent = string_or(lookup(fields, Field::Agent), DEFAULT_AGENT);
    let model = string_or(lookup(fields, Field::Model), DEFAULT_MODEL);

    let (prompt, check) = tokio::join!(
        refine_existing_file(probe, prompt),
        refine_existing_file(probe, check),
    );
    let (prompt, check) = (prompt?, check?);

    match (prompt, check, limit, wait, agent, model) {
        (Ok(prompt), Ok(check), Ok(limit), Ok(wait), Ok(agent), Ok(model)) => {
            let config = Config {
                prompt,
                check,
                limit,
                wait,
                agent,
                model,
            };
            info!(
                prompt = %config.prompt,
                check = %config.check,
                limit = config.limit,
                wait = config.wait,
                agent = %config.agent,
                model = %config.model,
                "config validated"
            );
            Ok(config)
        }
        (prompt, check, limit, wait, agent, model) => {
            let rejections = [
                (Field::Prompt, prompt.err()),
                (Field::Check, check.err()),
                (Field::Limit, limit.err()),
                (Field::Wait, wait.err()),
                (Field::Agent, agent.err()),
                (Field::Model, model.err()),
            ];
            let issues = rejections
                .into_iter()
                .filter_map(|(field, rejection)| {
                    let issue = rejection?.attach(field);
                    debug!(
                        field = %field,
                        code = %issue.code,
                        reason = %issue.reason,
                        "field rejected"
                    );
                    Some(issue)
                })
                .collect();
            Err(reject(issues))
        }
    }
}

fn reject(issues: Vec<ConfigIssue>) -> anyhow::Error {
    match ConfigError::from_issues(issues) {
        Some(error) => error.into(),
        None => anyhow!("rejected input produced no issues"),
    }
}

/// Existence refinement. Skipped when the type check already failed.
///
/// The outer `Result` carries probe faults; the inner one carries the
/// validation outcome.
async fn refine_existing_file<P: PathProbe + ?Sized>(
    probe: &P,
    checked: Result<String, Rejection>,
) -> Result<Result<String, Rejection>> {
    let path = match checked {
        Ok(path) => path,
        Err(rejection) => return Ok(Err(rejection)),
    };
    if path.is_empty() {
        return Ok(Err(Rejection::missing_file()));
    }
    if probe.exists(&path).await? {
        Ok(Ok(path))
    } else {
        Ok(Err(Rejection::missing_file()))
    }
}
