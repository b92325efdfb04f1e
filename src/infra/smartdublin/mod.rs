mod client;

pub use client::SmartDublinClient;
