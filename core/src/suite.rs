//! Sequential execution of a set of probes under one base configuration.

use log::{error, info};

use crate::catalog;
use crate::error::SuiteError;
use crate::probe::{OutcomeSummary, Probe, ProbeOutcome};
use crate::transport::{HttpAdapter, Transport};

/// An ordered collection of probes.
#[derive(Debug, Clone)]
pub struct Suite {
    probes: Vec<Probe>,
}

impl Suite {
    pub fn new(probes: Vec<Probe>) -> Self {
        Self { probes }
    }

    /// All declared probes.
    pub fn catalog() -> Self {
        Self::new(catalog::probes())
    }

    pub fn probes(&self) -> &[Probe] {
        &self.probes
    }

    /// Keep only the named probes, preserving declaration order.
    ///
    /// An empty list keeps everything.
    pub fn only(self, names: &[String]) -> Result<Self, SuiteError> {
        if names.is_empty() {
            return Ok(self);
        }
        if let Some(unknown) = names
            .iter()
            .find(|name| !self.probes.iter().any(|p| p.name == name.as_str()))
        {
            return Err(SuiteError::UnknownProbe(unknown.clone()));
        }
        let probes = self
            .probes
            .into_iter()
            .filter(|p| names.iter().any(|name| name == p.name))
            .collect();
        Ok(Self { probes })
    }

    /// Run every probe in order. A failing probe never stops the run.
    pub fn run<T: Transport>(&self, adapter: &HttpAdapter<T>) -> SuiteReport {
        let mut outcomes = Vec::with_capacity(self.probes.len());
        for probe in &self.probes {
            info!("running {}", probe.name);
            let outcome = probe.run(adapter);
            match &outcome.result {
                Ok(status) => info!("{} passed (status {status})", probe.name),
                Err(err) => error!("{} failed: {err}", probe.name),
            }
            outcomes.push(outcome);
        }
        SuiteReport {
            base_url: adapter.config().base_url().to_string(),
            outcomes,
        }
    }
}

/// Outcomes of one suite run.
#[derive(Debug)]
pub struct SuiteReport {
    pub base_url: String,
    pub outcomes: Vec<ProbeOutcome>,
}

impl SuiteReport {
    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.passed()
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    pub fn outcome(&self, name: &str) -> Option<&ProbeOutcome> {
        self.outcomes.iter().find(|o| o.name == name)
    }

    /// Process exit status: 0 when every probe passed, 1 otherwise.
    pub fn exit_code(&self) -> u8 {
        if self.is_success() {
            0
        } else {
            1
        }
    }

    pub fn summaries(&self) -> Vec<OutcomeSummary> {
        self.outcomes.iter().map(ProbeOutcome::summary).collect()
    }
}
