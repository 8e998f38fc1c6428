use tracing::Span;
use tracing::info_span;

use crate::telemetry::ctx::{OpMarker, PhaseSpan};

#[derive(Copy, Clone, Debug)]
pub struct Sources;

#[derive(Copy, Clone, Debug)]
pub enum Phase { Load }

impl PhaseSpan for Phase {
    fn name(&self) -> &'static str { match self { Phase::Load => "load" } }
    fn span(&self) -> Span { match self { Phase::Load => info_span!("load") } }
}

impl OpMarker for Sources {
    const NAME: &'static str = "sources";
    type Phase = Phase;
    fn root_span() -> Span { info_span!("sources") }
}
