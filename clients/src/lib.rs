pub mod api;
pub mod rpc;
