//! Chain access: connection, signing session and program handle.

pub mod connection;
pub mod idl;
pub mod program;
pub mod provider;

pub use connection::{ChainConnection, RpcConnection};
pub use idl::ProgramIdl;
pub use program::Program;
pub use provider::{KeypairWallet, Provider, WalletSigner};
