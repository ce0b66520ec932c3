// CRUD over jobs, CVs (applications) and hiring decisions.

pub mod cvs;
pub mod decisions;
pub mod jobs;
