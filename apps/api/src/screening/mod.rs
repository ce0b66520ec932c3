// Candidate screening: the weighted filter score, derived reports, and the
// HTTP handlers that assemble both from stored jobs, CVs and assessments.

pub mod handlers;
pub mod report;
pub mod scoring;
