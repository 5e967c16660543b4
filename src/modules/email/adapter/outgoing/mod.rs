#[cfg(test)]
pub mod memory_sender;
pub mod smtp_sender;
