//! Structured logging field name constants for shoprec.
//!
//! All crates use these constants for consistent structured logging
//! fields, so log aggregation tools can query by standardized names
//! across every subsystem.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Degraded service, requires operator attention |
//! | WARN  | Recoverable issue, automatic fallback applied |
//! | INFO  | Lifecycle events, registration/request completions |
//! | DEBUG | Decision points (detection method, filter toggles) |
//! | TRACE | Per-item iteration (per-candidate scores) |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Correlation ID propagated across a request. Format: UUIDv7.
pub const REQUEST_ID: &str = "request_id";

/// Merchant identifier the operation is scoped to.
pub const MERCHANT_ID: &str = "merchant_id";

/// Merchant product identifier.
pub const PRODUCT_ID: &str = "product_id";

/// Cross-catalog representative identifier.
pub const REPRESENTATIVE_ID: &str = "representative_id";

// ─── Detection fields ──────────────────────────────────────────────────────

/// Detected or target category.
pub const CATEGORY: &str = "category";

/// Detection method ("ml", "keywords", "ml+keywords").
pub const DETECTION_METHOD: &str = "method";

/// Classifier confidence value.
pub const CONFIDENCE: &str = "confidence";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Number of results returned.
pub const RESULT_COUNT: &str = "result_count";

/// Number of candidates entering or surviving a pipeline stage.
pub const CANDIDATE_COUNT: &str = "candidate_count";

/// Number of embeddings contributing to a query vector.
pub const EMBEDDING_COUNT: &str = "embedding_count";

// ─── Filter fields ─────────────────────────────────────────────────────────

/// Filter stage name ("category", "location", "ethical", "price").
pub const FILTER_STAGE: &str = "filter_stage";

/// Climate classification for a location ("hot", "cold").
pub const CLIMATE: &str = "climate";

/// Raw user location string.
pub const LOCATION: &str = "location";

// ─── Outcome fields ────────────────────────────────────────────────────────

/// Boolean success/failure indicator.
pub const SUCCESS: &str = "success";

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";
