//! Offline Indexing Pipeline
//!
//! Reads canonical hand records (JSON Lines), extracts villain decision
//! points, encodes them, and builds one similarity partition per villain.

use anyhow::Context;
use clap::Parser;
use clap::ValueEnum;
use spinscope::encode::Encoder;
use spinscope::encode::TOTAL_DIMENSIONS;
use spinscope::extract::Extractor;
use spinscope::hands::store;
use spinscope::hands::HandRecord;
use spinscope::index::IndexKind;
use spinscope::index::Manager;
use spinscope::Cancel;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Kind {
    Exact,
    Nsw,
    Ivf,
}

#[derive(Debug, Parser)]
#[command(about = "build per-villain similarity indices from hand records")]
struct Args {
    /// json-lines file of canonical hand records
    hands: PathBuf,
    /// directory for partition artifacts
    #[arg(long, default_value = "indices")]
    out: PathBuf,
    /// index structure to build
    #[arg(long, value_enum, default_value_t = Kind::Nsw)]
    kind: Kind,
    /// nsw: per-node connectivity bound
    #[arg(long, default_value_t = 32)]
    degree: usize,
    /// nsw: search candidate list size
    #[arg(long, default_value_t = 64)]
    breadth: usize,
    /// ivf: centroid count (default sqrt of partition size)
    #[arg(long)]
    centroids: Option<usize>,
    /// ivf: cells scanned per query
    #[arg(long, default_value_t = 8)]
    probes: usize,
}

impl Args {
    fn kind(&self) -> IndexKind {
        match self.kind {
            Kind::Exact => IndexKind::Exact,
            Kind::Nsw => IndexKind::Nsw {
                degree: self.degree,
                breadth: self.breadth,
            },
            Kind::Ivf => IndexKind::Ivf {
                centroids: self.centroids,
                probes: self.probes,
            },
        }
    }
}

fn main() -> anyhow::Result<()> {
    spinscope::log();
    let args = Args::parse();
    let records: Vec<HandRecord> = store::read_all(&args.hands)
        .with_context(|| format!("reading {}", args.hands.display()))?;
    log::info!("{:<32}{:<32}", "hands loaded", records.len());
    let cancel = Cancel::new();
    let (points, report) = Extractor::default().extract_all(&records, &cancel);
    log::info!(
        "{:<32}{:<32}",
        "decision points extracted",
        format!("{} ({} hands skipped)", report.succeeded, report.skipped)
    );
    let mut encoder = Encoder::default();
    encoder.fit(&points);
    let manager = Manager::new(&args.out, TOTAL_DIMENSIONS);
    let rebuilt = manager.rebuild_all(&points, &encoder, args.kind(), &cancel);
    anyhow::ensure!(
        rebuilt.errors.is_empty(),
        "{} partitions failed to build",
        rebuilt.errors.len()
    );
    let summary = manager.summary()?;
    for meta in &summary.partitions {
        log::info!(
            "{:<32}{:<32}",
            meta.villain,
            format!("{} vectors ({})", meta.total_vectors, meta.index_kind)
        );
    }
    log::info!(
        "{:<32}{:<32}",
        "indexing complete",
        format!(
            "{} partitions, {} vectors",
            summary.partitions.len(),
            summary.total_vectors
        )
    );
    Ok(())
}
