//! Order building, signing, and status translation.
//!
//! # Responsibilities
//! - Build the `OnDemand.place_order_keep_alive` call
//! - Sign and submit it, watching its progress
//! - Translate `subxt` progress into resolver status updates, decoding
//!   dispatch errors into module errors where metadata allows

use std::future::Future;
use std::time::Duration;

use futures_util::stream::{self, BoxStream};
use futures_util::StreamExt;
use subxt::dynamic::Value;
use subxt::error::DispatchError;
use subxt::tx::{DynamicPayload, TxInBlock, TxProgress, TxStatus};
use subxt::{OnlineClient, PolkadotConfig};

use crate::blockchain::client::ChainClient;
use crate::blockchain::types::{ChainError, ChainResult, SubmissionRequest};
use crate::config::NetworkConfig;
use crate::resolver::{DispatchFailure, StatusNotification};

/// Pallet providing on-demand coretime.
pub const ON_DEMAND_PALLET: &str = "OnDemand";

/// Call that places an order without reaping the sender.
pub const PLACE_ORDER_CALL: &str = "place_order_keep_alive";

/// Status updates of one submitted transaction.
pub type StatusStream = BoxStream<'static, ChainResult<StatusNotification>>;

type Progress = TxProgress<PolkadotConfig, OnlineClient<PolkadotConfig>>;
type InBlock = TxInBlock<PolkadotConfig, OnlineClient<PolkadotConfig>>;

/// Chain boundary used by the purchase driver.
pub trait OrderPlacer {
    /// Submit `request` on `network` and return its status updates.
    fn place_order(
        &self,
        network: &NetworkConfig,
        request: SubmissionRequest,
    ) -> impl Future<Output = ChainResult<StatusStream>> + Send;
}

/// Places orders on live relay chains, one connection per order.
#[derive(Debug, Clone)]
pub struct RelayOrderPlacer {
    connect_timeout: Duration,
}

impl RelayOrderPlacer {
    pub fn new(connect_timeout: Duration) -> Self {
        Self { connect_timeout }
    }
}

impl OrderPlacer for RelayOrderPlacer {
    async fn place_order(
        &self,
        network: &NetworkConfig,
        request: SubmissionRequest,
    ) -> ChainResult<StatusStream> {
        let client = ChainClient::connect(network, self.connect_timeout).await?;
        submit_order(&client, request).await
    }
}

/// Build the dynamic order call.
pub fn place_order_call(request: &SubmissionRequest) -> DynamicPayload {
    subxt::dynamic::tx(
        ON_DEMAND_PALLET,
        PLACE_ORDER_CALL,
        vec![
            Value::u128(request.max_amount),
            Value::u128(u128::from(request.para_id)),
        ],
    )
}

/// Sign and submit `request` through `client`, watching its progress.
pub async fn submit_order(
    client: &ChainClient,
    request: SubmissionRequest,
) -> ChainResult<StatusStream> {
    let call = place_order_call(&request);

    let progress = client
        .api()
        .tx()
        .sign_and_submit_then_watch_default(&call, &request.signer)
        .await
        .map_err(|e| ChainError::Submission(e.to_string()))?;

    tracing::info!(
        network = %client.network().name,
        tx_hash = ?progress.extrinsic_hash(),
        "Order submitted"
    );

    Ok(status_stream(progress, client.network().name.clone()))
}

/// Translate transaction progress into status updates.
///
/// Ends after finalization. When the pool reports the transaction invalid,
/// dropped, or errored, the stream yields [`ChainError::PoolRejected`] and ends.
pub fn status_stream(progress: Progress, network: String) -> StatusStream {
    stream::unfold(Some(progress), move |state| {
        let network = network.clone();
        async move {
            let mut progress = state?;
            loop {
                let status = match progress.next().await {
                    None => return None,
                    Some(Ok(status)) => status,
                    Some(Err(e)) => return Some((Err(ChainError::Rpc(e.to_string())), None)),
                };

                match status {
                    TxStatus::InBestBlock(in_block) => {
                        tracing::debug!(network = %network, block = ?in_block.block_hash(), "In best block");
                        let update = block_update(&in_block, StatusNotification::in_block()).await;
                        return Some((update, Some(progress)));
                    }
                    TxStatus::InFinalizedBlock(in_block) => {
                        tracing::debug!(network = %network, block = ?in_block.block_hash(), "In finalized block");
                        let update = block_update(&in_block, StatusNotification::finalized()).await;
                        return Some((update, None));
                    }
                    TxStatus::Validated => {
                        tracing::debug!(network = %network, "Transaction validated");
                    }
                    TxStatus::Broadcasted { .. } => {
                        tracing::debug!(network = %network, "Transaction broadcasted");
                    }
                    TxStatus::NoLongerInBestBlock => {
                        tracing::warn!(network = %network, "Transaction no longer in best block");
                    }
                    TxStatus::Invalid { message } => {
                        return Some((Err(pool_rejection(&network, "invalid", message)), None));
                    }
                    TxStatus::Dropped { message } => {
                        return Some((Err(pool_rejection(&network, "dropped", message)), None));
                    }
                    TxStatus::Error { message } => {
                        return Some((Err(pool_rejection(&network, "error", message)), None));
                    }
                }
            }
        }
    })
    .boxed()
}

async fn block_update(
    in_block: &InBlock,
    stage: StatusNotification,
) -> ChainResult<StatusNotification> {
    stage_update(stage, in_block.wait_for_success().await.map(|_| ()))
}

/// Complete a block stage with the extrinsic's dispatch result.
///
/// A runtime dispatch error travels in the same update as its stage.
fn stage_update(
    stage: StatusNotification,
    result: Result<(), subxt::Error>,
) -> ChainResult<StatusNotification> {
    match result {
        Ok(()) => Ok(stage),
        Err(subxt::Error::Runtime(err)) => Ok(stage.with_dispatch_error(dispatch_failure(err))),
        Err(e) => Err(ChainError::Rpc(e.to_string())),
    }
}

fn pool_rejection(network: &str, status: &'static str, reason: String) -> ChainError {
    tracing::warn!(network = %network, status, reason = %reason, "Transaction rejected by the pool");
    ChainError::PoolRejected { status, reason }
}

/// Decode a runtime dispatch error.
fn dispatch_failure(err: DispatchError) -> DispatchFailure {
    match err {
        DispatchError::Module(module) => match module.details() {
            Ok(details) => DispatchFailure::Module {
                section: section_name(details.pallet.name()),
                name: details.variant.name.clone(),
                docs: details.variant.docs.clone(),
            },
            Err(_) => DispatchFailure::Opaque(module.to_string()),
        },
        other => DispatchFailure::Opaque(other.to_string()),
    }
}

/// Pallet names are reported in camel case (`OnDemand` → `onDemand`).
pub fn section_name(pallet: &str) -> String {
    let mut chars = pallet.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
