//! Response compression layer.

use tower_http::compression::CompressionLayer;
use tower_http::compression::predicate::{And, DefaultPredicate, NotForContentType, Predicate};

/// Builds a gzip compression layer.
///
/// PDF downloads are excluded so they keep their exact `Content-Length`.
pub fn build_compression_layer() -> CompressionLayer<And<DefaultPredicate, NotForContentType>> {
    CompressionLayer::new()
        .compress_when(DefaultPredicate::new().and(NotForContentType::new("application/pdf")))
}
