pub mod health;
pub mod transcribe;
pub mod translate;
