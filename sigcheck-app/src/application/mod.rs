mod verify_signatures;

pub use verify_signatures::VerifySignatures;
