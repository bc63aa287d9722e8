pub mod client;
pub mod contracts;
pub mod factory;
pub mod init_calldata;
pub mod pipeline;
pub mod predictor;
pub mod test_util;
pub mod util;
