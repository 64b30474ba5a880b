use crate::XNode;
use std::sync::Arc;

/// A reusable `<sql>` element, kept unparsed until a statement includes it.
#[derive(Debug, Clone)]
pub struct SqlFragment {
    pub id: String,
    pub database_id: Option<String>,
    pub node: Arc<XNode>,
}
