use alloy::primitives::{address, b256};

use crate::core::bits::{Address, PoolId, Symbol, TxHash};

pub fn get_mock_chain_name() -> Symbol {
    Symbol::from("fantom")
}

pub fn get_mock_address_1() -> Address {
    address!("0xd8da6bf26964af9d7eed9e03e53415d37aa96045")
}

pub fn get_mock_address_2() -> Address {
    address!("0xd8da6bf26964af9d7eed9e03e53415d37aa96046")
}

pub fn get_mock_address_3() -> Address {
    address!("0xd8da6bf26964af9d7eed9e03e53415d37aa96047")
}

// Token trio used by the route tests: EQUAL, WFTM, BTC
pub fn get_mock_output_token() -> Address {
    address!("0x3fd3a0c85b70754efc07ac9ac0cbbdce664865a6")
}

pub fn get_mock_native_token() -> Address {
    address!("0x21be370d5312f44cb42ce377bc9b8a0cef1a4c83")
}

pub fn get_mock_lp_token() -> Address {
    address!("0x321162cd933e2be498cd2267a90534a804051b11")
}

pub fn get_mock_pool_id() -> PoolId {
    b256!("0xcde5a11a4acb4ee4c805352cec57e236bdbc3837000200000000000000000019")
}

pub fn get_mock_tx_hash() -> TxHash {
    b256!("0x1111111111111111111111111111111111111111111111111111111111111111")
}
