use alloy::{
    eips::BlockId,
    primitives::{
        utils::{format_units, Unit},
        Address, U256,
    },
    providers::Provider,
    rpc::types::{BlockNumberOrTag, TransactionReceipt},
};
use eyre::eyre;

use vault_core::core::bits::Amount;

/// Account nonce including transactions still in the mempool.
pub async fn pending_nonce<P: Provider>(provider: &P, account: Address) -> eyre::Result<u64> {
    let nonce: u64 = provider
        .get_transaction_count(account)
        .block_id(BlockId::Number(BlockNumberOrTag::Pending))
        .await?;
    Ok(nonce)
}

/// Ether actually paid for a mined transaction.
pub fn gas_spent(receipt: &TransactionReceipt) -> eyre::Result<Amount> {
    let wei = U256::from(receipt.effective_gas_price) * U256::from(receipt.gas_used);

    let formatted = format_units(wei, Unit::ETHER.get())
        .map_err(|err| eyre!("Failed to format gas value: {}", err))?;

    let amount = formatted
        .parse()
        .map_err(|err| eyre!("Failed to convert gas value to Amount: {}", err))?;

    Ok(amount)
}
