//! Mapper document parsing.
//!
//! [`XmlMapperBuilder`] walks one `<mapper>` document and registers what it
//! declares into a shared [`batis_core::Configuration`]. Elements whose references are
//! not loaded yet are queued, and [`resolve_pending`] retries the queues
//! until a pass makes no progress.

mod document;
pub use document::parse_document;

mod include;

mod mapper;
pub use mapper::XmlMapperBuilder;

mod pending;
pub use pending::{resolve_pending, Progress};

mod statement;
pub use statement::XmlStatementBuilder;
