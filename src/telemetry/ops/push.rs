use tracing::Span;
use tracing::info_span;

use crate::telemetry::ctx::{OpMarker, PhaseSpan};

#[derive(Copy, Clone, Debug)]
pub struct Push;

#[derive(Copy, Clone, Debug)]
pub enum Phase { Plan, List, Reset }

impl PhaseSpan for Phase {
    fn name(&self) -> &'static str { match self { Phase::Plan => "plan", Phase::List => "list", Phase::Reset => "reset" } }
    fn span(&self) -> Span { match self { Phase::Plan => info_span!("plan"), Phase::List => info_span!("list"), Phase::Reset => info_span!("reset") } }
}

impl OpMarker for Push {
    const NAME: &'static str = "push";
    type Phase = Phase;
    fn root_span() -> Span { info_span!("push") }
}
