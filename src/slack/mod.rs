pub mod command;
pub mod events;
pub mod gateway;
pub mod handler;
#[cfg(test)]
pub mod test_support;
pub mod views;
