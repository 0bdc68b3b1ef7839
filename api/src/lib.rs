// Module layout (Clean Architecture style)
// - bootstrap: configuration and application context
// - infrastructure: PostgreSQL pool and sqlx repositories
// - presentation: HTTP handlers and routing
// - application: access policy, validation, ports and use cases
// - domain: core models

pub mod application;
pub mod bootstrap;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

#[cfg(test)]
pub(crate) mod test_support;
