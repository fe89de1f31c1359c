pub mod channel;
pub mod groq;
