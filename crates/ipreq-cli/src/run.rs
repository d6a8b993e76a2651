//! Pipeline orchestration: extract, resolve, group, and fan out per-carrier
//! artifacts. Per-record and per-artifact failures are isolated; only an
//! unreadable report or an empty record set aborts the run.

use anyhow::{Context, bail};
use chrono::Local;
use std::fs;
use std::path::PathBuf;
use tracing::{error, info, warn};

use ipreq_artifact::{self as artifact, ArtifactError};
use ipreq_core::{
    Carrier, CaseMetadata, GroupedRecords, ResolvedRecord, dialect, extract_report,
    group_by_carrier,
};
use ipreq_resolve::{FileCache, RdapClient, Resolver};

use crate::Cli;

pub fn run(cli: &Cli) -> anyhow::Result<()> {
    let (mut metadata, raw) = extract_report(&cli.report)?;
    metadata.fir_number = cli.fir_no.clone();
    metadata.fir_date = cli.fir_date.clone();
    info!(subject = %metadata.subject_name, records = raw.len(), "extracted report");

    if raw.is_empty() {
        bail!("no login records found in {}", cli.report.display());
    }

    let cache = FileCache::load(&cli.cache);
    let client = RdapClient::with_base_url(&cli.rdap_url)?;
    let mut resolver = Resolver::new(cache, client);

    let total = raw.len();
    let mut resolved = Vec::with_capacity(total);
    for (idx, record) in raw.into_iter().enumerate() {
        if (idx + 1) % 10 == 0 || idx + 1 == total {
            info!(current = idx + 1, total, "resolving records");
        }
        let carrier = resolver.resolve(&record.ip_text);
        resolved.push(ResolvedRecord::from_raw(record, carrier));
    }

    let grouped = group_by_carrier(resolved);
    report_unresolved(&grouped);

    fs::create_dir_all(&cli.out)
        .with_context(|| format!("creating output directory {}", cli.out.display()))?;
    generate_artifacts(cli, &metadata, &grouped);

    info!(out = %cli.out.display(), "done");
    Ok(())
}

fn report_unresolved(grouped: &GroupedRecords) {
    if grouped.unresolved.is_empty() {
        return;
    }
    let ips: Vec<&str> = grouped.unresolved.iter().map(|r| r.ip.as_str()).collect();
    warn!(
        count = ips.len(),
        ?ips,
        "unresolved IPs excluded from carrier artifacts; re-run to retry"
    );
}

fn generate_artifacts(cli: &Cli, metadata: &CaseMetadata, grouped: &GroupedRecords) {
    let prefix = metadata.subject_name.replace(' ', "_");
    let today = Local::now().date_naive();
    let letter_template = cli.templates.join("ip_letter.txt");

    for (carrier, records) in &grouped.groups {
        info!(carrier = %carrier, records = records.len(), "generating artifacts");
        match carrier {
            Carrier::Jio => {
                let rows = dialect::jio_window_rows(records);
                report(artifact::fill_sheet(
                    &cli.templates.join("jio_ip.tsv"),
                    &out_path(cli, &prefix, "JIO_Data.tsv"),
                    &rows,
                ));
                report(artifact::write_jio_text(
                    &out_path(cli, &prefix, "JIO_Data.txt"),
                    &rows,
                ));
                report(artifact::fill_letter(
                    &letter_template,
                    &out_path(cli, &prefix, "JIO_Request_Letter.txt"),
                    metadata,
                    *carrier,
                    records,
                    today,
                ));
            }
            Carrier::Airtel => {
                report(artifact::fill_sheet(
                    &cli.templates.join("airtel_format.tsv"),
                    &out_path(cli, &prefix, "Airtel_Data.tsv"),
                    &dialect::airtel_instant_rows(records),
                ));
                report(artifact::fill_letter(
                    &letter_template,
                    &out_path(cli, &prefix, "AIRTEL_Request_Letter.txt"),
                    metadata,
                    *carrier,
                    records,
                    today,
                ));
            }
            Carrier::Vi => {
                report(artifact::fill_letter(
                    &letter_template,
                    &out_path(cli, &prefix, "VI_Request_Letter.txt"),
                    metadata,
                    *carrier,
                    records,
                    today,
                ));
            }
            Carrier::Bsnl | Carrier::Other => {
                let name = format!("{}_Data.tsv", carrier.short_code());
                report(artifact::write_generic_sheet(
                    &out_path(cli, &prefix, &name),
                    &dialect::generic_rows(records),
                ));
            }
            // Grouping never places Unknown in a carrier bucket.
            Carrier::Unknown => {}
        }
    }
}

fn out_path(cli: &Cli, prefix: &str, suffix: &str) -> PathBuf {
    cli.out.join(format!("{prefix}_{suffix}"))
}

/// Per-artifact failures are logged and skipped so the remaining artifacts
/// still generate.
fn report(outcome: Result<(), ArtifactError>) {
    if let Err(err) = outcome {
        error!(error = %err, "artifact generation failed");
    }
}
