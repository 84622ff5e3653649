pub mod channel_store;
