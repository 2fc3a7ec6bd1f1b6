// src/models/mod.rs
//! Domain records shared by the search pipeline, the repositories and the API

pub mod job;
pub mod resource;
pub mod resume;

pub use job::{
    company_facets, company_slug, group_by_company, slug_to_company_name, CompanyFilter, CompanyJob,
    CompanyProfile, Compensation, Employer, JobKind, JobListing,
};
pub use resource::{seeded_catalog, ResourceCatalog, ResourceFilter, ResourceTab};
pub use resume::ResumeData;
