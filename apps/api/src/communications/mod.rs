// Candidate communications: outgoing email through a pluggable sender, with
// every attempt the sender answers logged as sent or failed.

pub mod handlers;
pub mod sender;
