pub mod config;
pub mod ctx;
pub mod emit;
pub mod ops;

use ctx::LogCtx;

fn log_ctx<O: ctx::OpMarker>() -> LogCtx<O> { LogCtx { json: config::logs_are_json(), _marker: std::marker::PhantomData } }

pub fn init() -> LogCtx<ops::init::Init> { log_ctx() }
pub fn sources() -> LogCtx<ops::sources::Sources> { log_ctx() }
pub fn sync() -> LogCtx<ops::sync::SyncJob> { log_ctx() }
pub fn news() -> LogCtx<ops::news::News> { log_ctx() }
pub fn push() -> LogCtx<ops::push::Push> { log_ctx() }
