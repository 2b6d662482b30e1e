use alloy::primitives::{address, Address, B256, U256};
use alloy::rpc::types::eth::TransactionRequest;
use alloy::sol_types::SolCall;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use kuru_swap_bot::entity::{Account, Token, VerifiedMarket};
use kuru_swap_bot::kuru::abi::IKuruRouter;
use kuru_swap_bot::monad::abi::IERC20;
use kuru_swap_bot::monad::tokens::constants::USDC_CONTRACT;
use kuru_swap_bot::monad::{ChainClient, ReceiptSummary, TokenRegistry};
use kuru_swap_bot::{ServiceContainer, Settings};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

const KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
const WALLET: Address = address!("f39fd6e51aad88f6f4ce6ab8827279cfffb92266");
const POOL: Address = address!("d3af145f1aa1a471b5f0f62c52cf8fcdc9ab55d3");

fn e18() -> U256 {
    U256::from(10u64).pow(U256::from(18u64))
}

/// Chain state that settles router swaps at the minimum output
#[derive(Default)]
struct InMemoryChain {
    native: Mutex<U256>,
    usdc: Mutex<U256>,
    allowance: Mutex<U256>,
    pending: Mutex<Option<TransactionRequest>>,
    swaps: Mutex<Vec<IKuruRouter::anyToAnySwapCall>>,
    values: Mutex<Vec<U256>>,
    nonce: Mutex<u64>,
}

impl InMemoryChain {
    fn new(native: U256, usdc: U256) -> Self {
        let chain = Self::default();
        *chain.native.lock().unwrap() = native;
        *chain.usdc.lock().unwrap() = usdc;
        chain
    }

    fn settle(&self, tx: TransactionRequest) -> Result<()> {
        let to = tx
            .to
            .and_then(|kind| kind.to().copied())
            .ok_or_else(|| anyhow!("contract creation"))?;
        let input = tx.input.input().cloned().unwrap_or_default();
        let value = tx.value.unwrap_or_default();

        if to == USDC_CONTRACT {
            let approve = IERC20::approveCall::abi_decode(&input)?;
            *self.allowance.lock().unwrap() = approve.amount;
            return Ok(());
        }

        let swap = IKuruRouter::anyToAnySwapCall::abi_decode(&input)?;
        self.values.lock().unwrap().push(value);
        let mut native = self.native.lock().unwrap();
        let mut usdc = self.usdc.lock().unwrap();
        if swap.debitToken == Address::ZERO {
            *native -= value;
            *usdc += swap.minAmountOut;
        } else {
            *usdc -= swap.amount;
            *native += swap.minAmountOut;
        }
        self.swaps.lock().unwrap().push(swap);
        Ok(())
    }
}

#[async_trait]
impl ChainClient for InMemoryChain {
    async fn chain_id(&self) -> Result<u64> {
        Ok(10143)
    }

    async fn native_balance(&self, _owner: Address) -> Result<U256> {
        Ok(*self.native.lock().unwrap())
    }

    async fn token_balance(&self, _token: Address, _owner: Address) -> Result<U256> {
        Ok(*self.usdc.lock().unwrap())
    }

    async fn token_decimals(&self, _token: Address) -> Result<u8> {
        Ok(6)
    }

    async fn allowance(&self, _token: Address, _owner: Address, _spender: Address) -> Result<U256> {
        Ok(*self.allowance.lock().unwrap())
    }

    async fn verified_market(&self, _router: Address, _pool: Address) -> Result<VerifiedMarket> {
        Ok(VerifiedMarket {
            price_precision: 100,
            size_precision: U256::from(10u64),
            base_asset: Address::ZERO,
            base_asset_decimals: U256::from(18u8),
            quote_asset: USDC_CONTRACT,
            quote_asset_decimals: U256::from(6u8),
            tick_size: 1,
            min_size: U256::from(1u8),
            max_size: U256::MAX,
            taker_fee_bps: U256::from(30u8),
            maker_fee_bps: U256::from(10u8),
        })
    }

    async fn price_over_route(
        &self,
        _calculator: Address,
        _route: Vec<Address>,
        is_buy: Vec<bool>,
    ) -> Result<U256> {
        // 1 MON = 2 USDC
        if is_buy[0] {
            Ok(U256::from(2u8) * e18())
        } else {
            Ok(e18() / U256::from(2u8))
        }
    }

    async fn transaction_count(&self, _owner: Address) -> Result<u64> {
        Ok(*self.nonce.lock().unwrap())
    }

    async fn gas_price(&self) -> Result<u128> {
        Ok(50_000_000_000)
    }

    async fn estimate_gas(&self, tx: TransactionRequest) -> Result<u64> {
        *self.pending.lock().unwrap() = Some(tx);
        Ok(200_000)
    }

    async fn send_raw_transaction(&self, _raw: Vec<u8>) -> Result<B256> {
        let tx = self
            .pending
            .lock()
            .unwrap()
            .take()
            .ok_or_else(|| anyhow!("nothing estimated"))?;
        self.settle(tx)?;

        let mut nonce = self.nonce.lock().unwrap();
        *nonce += 1;
        Ok(B256::left_padding_from(&nonce.to_be_bytes()))
    }

    async fn transaction_receipt(&self, hash: B256) -> Result<Option<ReceiptSummary>> {
        Ok(Some(ReceiptSummary {
            tx_hash: hash,
            success: true,
            block_number: Some(1),
            gas_used: 150_000,
        }))
    }
}

fn registry() -> Arc<TokenRegistry> {
    Arc::new(
        TokenRegistry::new(
            vec![
                Token::native("MON", 18),
                Token::erc20("USDC", USDC_CONTRACT, 6),
            ],
            HashMap::from([("USDC".to_string(), POOL)]),
        )
        .unwrap(),
    )
}

fn account() -> Account {
    Account {
        index: 1,
        private_key: format!("0x{}", KEY),
        proxy: None,
    }
}

#[tokio::test(start_paused = true)]
async fn random_swaps_spend_a_share_of_native_balance() {
    let chain = Arc::new(InMemoryChain::new(e18(), U256::ZERO));
    let mut settings = Settings::default();
    settings.rpc.chain_id = Some(10143);
    settings.flow.number_of_swaps = (2, 2);
    settings.flow.percent_of_balance_to_swap = (10.into(), 10.into());
    settings.general.random_pause_between_actions = (1, 1);

    let container =
        ServiceContainer::with_client(&settings, &account(), registry(), chain.clone()).unwrap();
    assert_eq!(container.wallet(), WALLET);

    let results = container
        .orchestrator()
        .with_rng(StdRng::seed_from_u64(42))
        .run()
        .await
        .unwrap();

    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|result| result.success));
    assert!(results.iter().all(|result| result.tx_hash.is_some()));

    // 10% of 1 MON, then 10% of the remaining 0.9 MON
    let values = chain.values.lock().unwrap().clone();
    assert_eq!(
        values,
        vec![e18() / U256::from(10u8), e18() * U256::from(9u8) / U256::from(100u8)]
    );
    assert_eq!(*chain.usdc.lock().unwrap(), U256::from(198_000u64 + 178_200u64));

    let swaps = chain.swaps.lock().unwrap();
    assert!(swaps.iter().all(|swap| swap.marketAddresses == vec![POOL]
        && swap.isBuy == vec![false]
        && swap.nativeSend == vec![true]
        && swap.creditToken == USDC_CONTRACT));
    // native swaps never need an allowance
    assert_eq!(*chain.allowance.lock().unwrap(), U256::ZERO);
}

#[tokio::test(start_paused = true)]
async fn consolidation_approves_then_sells_tokens() {
    let chain = Arc::new(InMemoryChain::new(e18(), U256::from(3_000_000u64)));
    let mut settings = Settings::default();
    settings.kuru.swap_all_to_monad = true;

    let container =
        ServiceContainer::with_client(&settings, &account(), registry(), chain.clone()).unwrap();

    let results = container.orchestrator().run().await.unwrap();

    assert_eq!(results.len(), 1);
    assert!(results[0].success);
    assert_eq!(results[0].source_token, "USDC");
    assert_eq!(results[0].target_token, "MON");

    assert_eq!(*chain.allowance.lock().unwrap(), U256::MAX);
    assert_eq!(*chain.usdc.lock().unwrap(), U256::ZERO);
    // 3 USDC at 0.5 MON with 1% slippage
    assert_eq!(
        *chain.native.lock().unwrap(),
        e18() + U256::from(1_485_000_000_000_000_000u128)
    );

    let swaps = chain.swaps.lock().unwrap();
    assert_eq!(swaps.len(), 1);
    assert_eq!(swaps[0].debitToken, USDC_CONTRACT);
    assert_eq!(swaps[0].creditToken, Address::ZERO);
    assert_eq!(swaps[0].amount, U256::from(3_000_000u64));
    assert_eq!(swaps[0].isBuy, vec![true]);
    assert_eq!(swaps[0].nativeSend, vec![false]);
    assert_eq!(chain.values.lock().unwrap()[0], U256::ZERO);
}
