pub mod config;
pub mod diagram;
pub mod lookup;
pub mod server;
#[doc(hidden)]
pub mod test_support;
