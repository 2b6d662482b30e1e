use crate::entity::BotError;
use crate::monad::client::{ChainClient, ReceiptSummary};
use crate::monad::utils::with_gas_margin;
use alloy::consensus::{SignableTransaction, TxEnvelope, TxLegacy};
use alloy::eips::eip2718::Encodable2718;
use alloy::network::TxSignerSync;
use alloy::primitives::{Address, Bytes, TxKind, B256, U256};
use alloy::rpc::types::eth::{TransactionInput, TransactionRequest};
use alloy::signers::local::PrivateKeySigner;
use anyhow::{anyhow, Result};
use log::{debug, info, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;
use tokio::time::{sleep, timeout};

pub const RECEIPT_TIMEOUT_SECS: u64 = 120;
const RECEIPT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Builds, signs and broadcasts legacy transactions for one account.
pub struct TransactionSender {
    client: Arc<dyn ChainClient>,
    signer: PrivateKeySigner,
    chain_id: OnceCell<u64>,
    receipt_timeout: Duration,
}

impl TransactionSender {
    pub fn new(client: Arc<dyn ChainClient>, signer: PrivateKeySigner) -> Self {
        Self {
            client,
            signer,
            chain_id: OnceCell::new(),
            receipt_timeout: Duration::from_secs(RECEIPT_TIMEOUT_SECS),
        }
    }

    /// Skip the `eth_chainId` lookup
    pub fn with_chain_id(self, chain_id: u64) -> Self {
        Self {
            chain_id: OnceCell::new_with(Some(chain_id)),
            ..self
        }
    }

    pub fn address(&self) -> Address {
        self.signer.address()
    }

    async fn chain_id(&self) -> Result<u64> {
        self.chain_id
            .get_or_try_init(|| self.client.chain_id())
            .await
            .copied()
    }

    /// Send a call and block until it is mined with status 1.
    pub async fn send(&self, to: Address, calldata: Vec<u8>, value: U256) -> Result<ReceiptSummary> {
        let from = self.address();
        let input = Bytes::from(calldata);

        let nonce = self.client.transaction_count(from).await?;
        let gas_price = self.client.gas_price().await?;

        // Dry run of the complete call to size the gas limit
        let request = TransactionRequest {
            from: Some(from),
            to: Some(TxKind::Call(to)),
            gas_price: Some(gas_price),
            value: Some(value),
            nonce: Some(nonce),
            input: TransactionInput::new(input.clone()),
            ..Default::default()
        };
        let estimated_gas = self.client.estimate_gas(request).await?;
        let gas_limit = with_gas_margin(estimated_gas);

        let mut tx = TxLegacy {
            chain_id: Some(self.chain_id().await?),
            nonce,
            gas_price,
            gas_limit,
            to: TxKind::Call(to),
            value,
            input,
        };

        let signature = TxSignerSync::sign_transaction_sync(&self.signer, &mut tx)
            .map_err(|e| anyhow!("Failed to sign transaction: {}", e))?;
        let signed: TxEnvelope = tx.into_signed(signature).into();
        let raw = signed.encoded_2718();

        debug!(
            "Sending tx to {} (nonce={}, gas_price={}, gas_limit={}, value={})",
            to, nonce, gas_price, gas_limit, value
        );
        let tx_hash = self.client.send_raw_transaction(raw).await?;
        info!("Transaction sent: {}", tx_hash);

        let receipt = self.wait_for_receipt(tx_hash).await?;
        info!(
            "Transaction {} mined in block {}, gas used {}",
            tx_hash,
            receipt
                .block_number
                .map_or_else(|| "pending".to_string(), |block| block.to_string()),
            receipt.gas_used
        );
        if !receipt.success {
            return Err(BotError::TransactionReverted {
                hash: tx_hash.to_string(),
            }
            .into());
        }

        Ok(receipt)
    }

    /// Poll for a receipt until the timeout elapses.
    ///
    /// RPC errors while polling are logged and polled through, the transaction
    /// may still be mined.
    pub async fn wait_for_receipt(&self, tx_hash: B256) -> Result<ReceiptSummary> {
        let poll = async {
            loop {
                match self.client.transaction_receipt(tx_hash).await {
                    Ok(Some(receipt)) => return receipt,
                    Ok(None) => {}
                    Err(e) => warn!("Failed to fetch receipt for {}: {:#}", tx_hash, e),
                }
                sleep(RECEIPT_POLL_INTERVAL).await;
            }
        };

        match timeout(self.receipt_timeout, poll).await {
            Ok(receipt) => Ok(receipt),
            Err(_) => Err(BotError::ReceiptTimeout {
                hash: tx_hash.to_string(),
                seconds: self.receipt_timeout.as_secs(),
            }
            .into()),
        }
    }
}
