pub mod dispatch;
pub mod jsonrpc;

pub use dispatch::Dispatcher;
pub use jsonrpc::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};
