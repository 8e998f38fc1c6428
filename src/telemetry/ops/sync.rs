use tracing::Span;
use tracing::info_span;

use crate::telemetry::ctx::{OpMarker, PhaseSpan};

#[derive(Copy, Clone, Debug)]
pub struct SyncJob;

#[derive(Copy, Clone, Debug)]
pub enum Phase { LoadSources, Source, LoadKnown, Fetch, Diff, ResetPush, WriteNews, WritePush }

impl PhaseSpan for Phase {
    fn name(&self) -> &'static str { match self {
        Phase::LoadSources => "load_sources",
        Phase::Source => "source",
        Phase::LoadKnown => "load_known",
        Phase::Fetch => "fetch",
        Phase::Diff => "diff",
        Phase::ResetPush => "reset_push",
        Phase::WriteNews => "write_news",
        Phase::WritePush => "write_push",
    }}
    fn span(&self) -> Span { match self {
        Phase::LoadSources => info_span!("load_sources"),
        Phase::Source => info_span!("source"),
        Phase::LoadKnown => info_span!("load_known"),
        Phase::Fetch => info_span!("fetch"),
        Phase::Diff => info_span!("diff"),
        Phase::ResetPush => info_span!("reset_push"),
        Phase::WriteNews => info_span!("write_news"),
        Phase::WritePush => info_span!("write_push"),
    }}
}

impl OpMarker for SyncJob {
    const NAME: &'static str = "sync";
    type Phase = Phase;
    fn root_span() -> Span { info_span!("sync") }
}
