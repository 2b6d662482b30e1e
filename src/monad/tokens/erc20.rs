use crate::entity::Token;
use crate::monad::abi::IERC20;
use crate::monad::client::ChainClient;
use crate::monad::tokens::transaction::TransactionSender;
use crate::monad::utils::from_base_units;
use alloy::primitives::{Address, B256, U256};
use alloy::sol_types::SolCall;
use anyhow::Result;
use log::{debug, info};
use rust_decimal::Decimal;

/// Get the human balance of an ERC-20 token
pub async fn get_token_balance(
    client: &dyn ChainClient,
    token: &Token,
    owner: Address,
) -> Result<Decimal> {
    let raw = client.token_balance(token.address, owner).await?;
    from_base_units(raw, token.decimals)
}

/// Make sure `spender` may debit at least `amount` base units.
///
/// Grants an unlimited allowance when the current one is short and returns the
/// hash of the confirmed approval.
pub async fn ensure_allowance(
    client: &dyn ChainClient,
    sender: &TransactionSender,
    token: &Token,
    spender: Address,
    amount: U256,
) -> Result<Option<B256>> {
    let owner = sender.address();
    let allowance = client.allowance(token.address, owner, spender).await?;

    if allowance >= amount {
        debug!(
            "Sufficient {} allowance: {} >= {}",
            token.symbol, allowance, amount
        );
        return Ok(None);
    }

    info!("Approving {} for {}", token.symbol, spender);
    let calldata = IERC20::approveCall {
        spender,
        amount: U256::MAX,
    }
    .abi_encode();

    let receipt = sender.send(token.address, calldata, U256::ZERO).await?;
    info!("Approve for {} confirmed: {}", token.symbol, receipt.tx_hash);

    Ok(Some(receipt.tx_hash))
}
