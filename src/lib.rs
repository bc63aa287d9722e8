pub mod app {
    pub mod address_book;
    pub mod config;
    pub mod config_loader;
    pub mod deployer;
    pub mod verifier;
}

pub mod cli;
