mod provider;
mod signature;
mod verdict;

pub use provider::Provider;
pub use signature::{SignatureImage, SignaturePair};
pub use verdict::{Verdict, VerdictSummary};
