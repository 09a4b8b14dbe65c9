//! Gallery backend library.
//!
//! Identity webhook ingestion, ownership-scoped collections of images, and a
//! photo search gateway, exposed over actix-web.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
