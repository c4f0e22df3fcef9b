/*
Copyright 2024 San Francisco Compute Company

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/

//! Concurrent per-host probing with a lock-guarded merge

use crate::domain::parsers::parse_key_value;
use crate::domain::{SYS_DESCR_OID, SYS_OBJECT_ID_OID};
use crate::ports::DeviceProber;
use log::{debug, info, warn};
use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::{Arc, Mutex, MutexGuard};

/// A host handed to one worker
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeTarget {
    pub ip: IpAddr,
    pub name: String,
}

/// What a worker brings back for a responding host
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeResponse {
    pub ip: IpAddr,
    pub name: String,
    /// Raw sysObjectID response text
    pub object_id: String,
    /// sysDescr value; `None` when the detail probe failed
    pub description: Option<String>,
}

/// Merged result of one fan-out pass
///
/// `responses` and `unreachable` are disjoint and together cover every target.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FanOutOutcome {
    pub responses: HashMap<IpAddr, ProbeResponse>,
    pub unreachable: Vec<IpAddr>,
}

type Ledger = Arc<Mutex<FanOutOutcome>>;

// Workers only insert or append while holding the guard, so a poisoned lock
// still holds consistent data.
fn lock(ledger: &Ledger) -> MutexGuard<'_, FanOutOutcome> {
    ledger.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Probes every target in its own task and waits for all of them
pub struct FanOutCoordinator {
    prober: Arc<dyn DeviceProber>,
}

impl FanOutCoordinator {
    pub fn new(prober: Arc<dyn DeviceProber>) -> Self {
        Self { prober }
    }

    /// Probe all targets concurrently
    ///
    /// One task is spawned per target, with no upper bound. The call returns
    /// once every task has finished.
    pub async fn probe_all(&self, targets: Vec<ProbeTarget>) -> FanOutOutcome {
        let total = targets.len();
        info!("Probing {} hosts", total);

        let ledger: Ledger = Arc::new(Mutex::new(FanOutOutcome::default()));
        let mut workers = Vec::with_capacity(total);

        for target in targets {
            let ip = target.ip;
            let prober = Arc::clone(&self.prober);
            let ledger = Arc::clone(&ledger);
            workers.push((ip, tokio::spawn(probe_host(prober, target, ledger))));
        }

        for (ip, worker) in workers {
            if let Err(e) = worker.await {
                warn!("Probe worker for {} aborted: {}", ip, e);
                let mut outcome = lock(&ledger);
                if !outcome.responses.contains_key(&ip) && !outcome.unreachable.contains(&ip) {
                    outcome.unreachable.push(ip);
                }
            }
        }

        let outcome = std::mem::take(&mut *lock(&ledger));
        info!(
            "{} of {} hosts responded, {} unreachable",
            outcome.responses.len(),
            total,
            outcome.unreachable.len()
        );
        outcome
    }
}

/// Worker body: manufacturer probe, then detail probe
async fn probe_host(prober: Arc<dyn DeviceProber>, target: ProbeTarget, ledger: Ledger) {
    let object_id = match prober.get(target.ip, SYS_OBJECT_ID_OID).await {
        Ok(raw) => raw,
        Err(e) => {
            debug!("Excluding {}: {}", target.ip, e);
            lock(&ledger).unreachable.push(target.ip);
            return;
        }
    };

    let description = match prober.get(target.ip, SYS_DESCR_OID).await {
        Ok(raw) => Some(match parse_key_value(&raw, '=') {
            Ok((_, value)) => value,
            Err(_) => raw.trim().to_string(),
        }),
        Err(e) => {
            debug!("No description for {}: {}", target.ip, e);
            None
        }
    };

    let response = ProbeResponse {
        ip: target.ip,
        name: target.name,
        object_id,
        description,
    };
    lock(&ledger).responses.insert(response.ip, response);
}
