pub mod response_result;
pub mod server;
pub mod server_environment;
pub mod signature;
#[cfg(test)]
pub mod test_support;
