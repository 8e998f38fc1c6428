use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

pub const SCHEMA_VERSION: &str = "newsfeed.v1";

/// Run-level figures attached to a `sync` result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunMeta {
    pub duration_ms: u128,
    pub sources: usize,
    pub failed: usize,
}

/// Either what a command would do or what it did; serialized under a
/// `plan` or `result` key.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Body {
    Plan(Value),
    Result(Value),
}

/// One stdout document per invocation in `--json` mode.
#[derive(Debug, Clone, Serialize)]
pub struct Envelope {
    pub schema_version: &'static str,
    pub time: DateTime<Utc>,
    pub run_id: Uuid,
    pub op: &'static str,
    pub apply: bool,
    #[serde(flatten)]
    pub body: Body,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<RunMeta>,
}

impl Envelope {
    pub fn plan<T: Serialize>(op: &'static str, plan: &T) -> Result<Self, serde_json::Error> {
        Ok(Self::build(op, Body::Plan(serde_json::to_value(plan)?), None))
    }

    pub fn result<T: Serialize>(op: &'static str, result: &T, meta: Option<RunMeta>) -> Result<Self, serde_json::Error> {
        Ok(Self::build(op, Body::Result(serde_json::to_value(result)?), meta))
    }

    fn build(op: &'static str, body: Body, meta: Option<RunMeta>) -> Self {
        Envelope {
            schema_version: SCHEMA_VERSION,
            time: Utc::now(),
            run_id: Uuid::new_v4(),
            op,
            apply: matches!(body, Body::Result(_)),
            body,
            meta,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn plan_envelope_is_not_applied() {
        let env = Envelope::plan("sync", &json!({"new": 5})).expect("to serialize plan");
        let v = serde_json::to_value(&env).unwrap();
        assert_eq!(v["schema_version"], "newsfeed.v1");
        assert_eq!(v["op"], "sync");
        assert_eq!(v["apply"], false);
        assert_eq!(v["plan"]["new"], 5);
        assert!(v.get("result").is_none());
        assert!(v.get("meta").is_none());
        assert!(v["run_id"].is_string());
    }

    #[test]
    fn sync_result_carries_run_figures() {
        let meta = RunMeta { duration_ms: 12, sources: 3, failed: 1 };
        let env = Envelope::result("sync", &json!({"inserted": 3}), Some(meta)).expect("to serialize result");
        let v = serde_json::to_value(&env).unwrap();
        assert_eq!(v["apply"], true);
        assert_eq!(v["result"]["inserted"], 3);
        assert_eq!(v["meta"], json!({"duration_ms": 12, "sources": 3, "failed": 1}));
        assert!(v.get("plan").is_none());
    }
}
