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

use clap::{Parser, Subcommand};
use inventory_poller::domain::presentation::{render_items, render_report};
use inventory_poller::{
    ContainerConfig, ContainerConfigBuilder, InventoryError, InventoryReportingService,
    ServiceContainer,
};
use log::{error, info};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

/// Exit status after an interrupt (128 + SIGINT)
const INTERRUPTED_EXIT: u8 = 130;

/// Build a network inventory from a Zabbix server and SNMP agents
///
/// Credentials and networks come from ZABBIX_URL, ZABBIX_USER,
/// ZABBIX_PASSWORD, SNMP_COMMUNITY and NETS (hyphen-delimited).
#[derive(Debug, Parser)]
#[command(
    name = "inventory_poller",
    version,
    about,
    after_help = "Older .env files using USER, PASSWORD and COMMUNITY must rename them to \
                  ZABBIX_USER, ZABBIX_PASSWORD and SNMP_COMMUNITY."
)]
struct Opt {
    /// SNMP response timeout per attempt in milliseconds
    #[arg(long, default_value_t = 1000)]
    timeout_ms: u64,

    /// SNMP resends after a timeout
    #[arg(long, default_value_t = 2)]
    retries: u32,

    /// Monitoring API request timeout in seconds
    #[arg(long, default_value_t = 30)]
    http_timeout_secs: u64,

    /// Accept invalid TLS certificates from the monitoring API
    #[arg(long, default_value_t = false)]
    skip_tls_verify: bool,

    /// Entries kept by the manufacturer lookup cache
    #[arg(long, default_value_t = 256)]
    cache_capacity: usize,

    /// JSON file mapping OID prefixes to manufacturers
    #[arg(long)]
    oid_table: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Option<Cmd>,
}

#[derive(Debug, Clone, Copy, PartialEq, Subcommand)]
enum Cmd {
    /// Probe every matching host over SNMP and print the inventory (default)
    Probe,
    /// Print CPU, memory, disk and software items per host
    Items,
}

impl Opt {
    fn container_config(&self) -> ContainerConfig {
        ContainerConfigBuilder::new()
            .probe_timeout(Duration::from_millis(self.timeout_ms))
            .retry_count(self.retries)
            .http_timeout(Duration::from_secs(self.http_timeout_secs))
            .skip_tls_verify(self.skip_tls_verify)
            .cache_capacity(self.cache_capacity)
            .oid_table_path(self.oid_table.clone())
            .verbose(self.verbose)
            .build()
    }
}

fn init_logging(container_config: &ContainerConfig) {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(container_config.log_filter()),
    )
    .init();
}

async fn run(cmd: Cmd, container_config: ContainerConfig) -> Result<String, InventoryError> {
    let container = ServiceContainer::new(container_config);
    let provider = container.create_configuration_provider();
    let service: Arc<dyn InventoryReportingService> =
        container.create_inventory_service(provider.as_ref())?;

    match cmd {
        Cmd::Probe => {
            let report = service.collect_inventory().await?;
            info!(
                "{} hosts answered, {} unreachable",
                report.hosts.len(),
                report.unreachable.len()
            );
            Ok(render_report(&report))
        }
        Cmd::Items => {
            let reports = service.collect_host_items().await?;
            info!("Collected items for {} hosts", reports.len());
            Ok(render_items(&reports))
        }
    }
}


#[tokio::main]
async fn main() -> ExitCode {
    let opt = Opt::parse();
    let container_config = opt.container_config();
    init_logging(&container_config);

    let cmd = opt.cmd.unwrap_or(Cmd::Probe);

    tokio::select! {
        result = run(cmd, container_config) => match result {
            Ok(output) => {
                print!("{output}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                error!("Inventory run failed: {e}");
                eprintln!("Error: {e}");
                ExitCode::FAILURE
            }
        },
        _ = tokio::signal::ctrl_c() => {
            println!("Process stopped");
            ExitCode::from(INTERRUPTED_EXIT)
        }
    }
}
