//! Tool name shortening for length-limited tool protocols.
//!
//! ## Modules
//!
//! - [`shortener`]: stateless word-level truncation of a single name
//! - [`resolver`]: collision-free bidirectional cache of exposed names
//! - [`audit`]: length reports over a loaded tool set
//!
//! ```
//! use tool_naming::NameResolver;
//!
//! let resolver = NameResolver::new();
//! let original = "FDA_get_info_on_conditions_for_doctor_consultation_by_drug_name";
//! let exposed = resolver.get_exposed_name(original, 55).unwrap();
//!
//! assert_eq!(exposed, "FDA_get_info_on_cond_for_doct_cons_by_drug_name");
//! assert_eq!(resolver.resolve(&exposed), original);
//! ```

pub mod audit;
pub mod error;
pub mod resolver;
pub mod shortener;

pub use audit::{audit_lengths, audit_shortening, LengthAudit, OverLimit, ShorteningAudit};
pub use error::{NamingError, NamingResult};
pub use resolver::{NameMapping, NameResolver, ResolverCounts, DEFAULT_MAX_LENGTH, MAX_SUFFIX};
pub use shortener::{category_prefix, char_len, shorten, SEGMENT_DELIMITER};
