// The deterministic JD/resume matching engine.
// Pipeline: sections -> exact matching -> scoring -> report (+ hard-fail).
// Every emitted fact is a literal substring of the inputs; anything that
// cannot be derived with certainty is reported as absent/zero.

pub mod exact;
pub mod handlers;
pub mod normalizer;
pub mod policy;
pub mod report;
pub mod scoring;
pub mod sections;
