use super::gated_store::GatedStore;
use chrono::{DateTime, TimeZone, Utc};
use std::sync::Arc;
use today_infra::{Config, InMemoryNativeStore, StaticTimeSys, TodayContext};

/// Monday noon, the instant every test runs at
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap()
}

pub fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, day, hour, 0, 0).unwrap()
}

pub fn setup_context(native: Arc<InMemoryNativeStore>, config: Config) -> TodayContext {
    let mut ctx = TodayContext::create(native, config);
    ctx.sys = Arc::new(StaticTimeSys { now: now() });
    ctx
}

/// Context on top of an authorized in memory store
pub fn setup() -> (Arc<InMemoryNativeStore>, TodayContext) {
    let native = Arc::new(InMemoryNativeStore::authorized());
    let ctx = setup_context(native.clone(), Config::default());
    (native, ctx)
}

/// Like `setup`, but saves go through a `GatedStore` that can hold them
pub fn setup_gated() -> (Arc<InMemoryNativeStore>, Arc<GatedStore>, TodayContext) {
    let (native, mut ctx) = setup();
    let gated = Arc::new(GatedStore::new(ctx.store.clone()));
    ctx.store = gated.clone();
    (native, gated, ctx)
}
