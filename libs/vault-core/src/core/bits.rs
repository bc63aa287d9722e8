pub type Symbol = string_cache::DefaultAtom; // chain, token, or platform name
pub type Amount = rust_decimal::Decimal; // ether-denominated value
pub type Address = alloy::primitives::Address; // address (EVM)
pub type TxHash = alloy::primitives::TxHash; // transaction hash (EVM)
pub type PoolId = alloy::primitives::B256; // balancer-style pool identifier
