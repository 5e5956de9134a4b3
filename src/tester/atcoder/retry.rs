extern crate reqwest;
extern crate tokio;

use crate::config::retry::{RETRY_COUNT, RETRY_DELAY};
use log::debug;
use std::future::Future;
use tokio::time::sleep;

pub(super) async fn async_retry<F, U, Out>(fun: F) -> reqwest::Result<Out>
where
    F: Fn() -> U,
    U: Future<Output = reqwest::Result<Out>>,
{
    for i in 0..RETRY_COUNT - 1 {
        match fun().await {
            Ok(v) => return Ok(v),
            Err(e) => {
                debug!("request failed (attempt {}): {}", i + 1, e);
                sleep(RETRY_DELAY).await;
            }
        }
    }
    fun().await
}
