pub mod account_handlers;
pub mod company_handlers;
pub mod job_handlers;
pub mod newsletter_handlers;
pub mod resource_handlers;
pub mod system_handlers;

pub use account_handlers::*;
pub use company_handlers::*;
pub use job_handlers::*;
pub use newsletter_handlers::*;
pub use resource_handlers::*;
pub use system_handlers::*;
