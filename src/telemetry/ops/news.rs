use tracing::Span;
use tracing::info_span;

use crate::telemetry::ctx::{OpMarker, PhaseSpan};

#[derive(Copy, Clone, Debug)]
pub struct News;

#[derive(Copy, Clone, Debug)]
pub enum Phase { Plan, List, Import }

impl PhaseSpan for Phase {
    fn name(&self) -> &'static str { match self { Phase::Plan => "plan", Phase::List => "list", Phase::Import => "import" } }
    fn span(&self) -> Span { match self { Phase::Plan => info_span!("plan"), Phase::List => info_span!("list"), Phase::Import => info_span!("import") } }
}

impl OpMarker for News {
    const NAME: &'static str = "news";
    type Phase = Phase;
    fn root_span() -> Span { info_span!("news") }
}
